//! Unit tests for configuration loading and precedence.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, repository, and API base resolution tests
//! - `loading`: Environment loading and validation tests

mod helpers;
