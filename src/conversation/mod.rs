//! Pure conversation logic layered over the GitHub model.
//!
//! Nothing here performs I/O against GitHub; handlers in [`crate::cli`]
//! fetch threads through the gateway and hand them to these helpers.

pub mod bulk;
pub mod cleanup;
pub mod filter;
pub mod status;

pub use bulk::{BulkOutcome, BulkPlan, FailurePolicy};
pub use cleanup::CleanupPlan;
pub use filter::{ResolutionFilter, ThreadFilter};
pub use status::ThreadStatistics;
