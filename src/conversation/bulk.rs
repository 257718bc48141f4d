//! Sequential execution of one mutation over many targets.
//!
//! Targets are validated by the caller before execution starts, so a batch
//! either never touches the remote or runs in input order under one of two
//! failure policies.

use std::fmt::Display;
use std::future::Future;
use std::io::Write;

use crate::github::error::TalkError;

/// What to do when one target fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the failure, carry on, and print a tally at the end.
    ContinueOnError,
    /// Stop at the first failure and return it.
    FailFast,
}

/// Describes a batch for messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkPlan<'a> {
    /// Failure policy.
    pub policy: FailurePolicy,
    /// Verb used in failure context, e.g. `resolve`.
    pub action: &'a str,
    /// Tally suffix, e.g. `comment(s) hidden`.
    pub tally_label: &'a str,
}

/// Counts from a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Targets that succeeded.
    pub succeeded: usize,
    /// Targets attempted.
    pub total: usize,
}

impl BulkOutcome {
    /// Targets that failed.
    #[must_use]
    pub const fn failed(self) -> usize {
        self.total.saturating_sub(self.succeeded)
    }

    /// Converts partial failure into [`TalkError::BulkIncomplete`].
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::BulkIncomplete`] when any target failed.
    pub const fn into_result(self) -> Result<Self, TalkError> {
        if self.failed() > 0 {
            Err(TalkError::BulkIncomplete {
                failed: self.failed(),
                total: self.total,
            })
        } else {
            Ok(self)
        }
    }
}

/// Runs `operation` over `targets` in order.
///
/// Each success writes the confirmation line returned by `operation` to
/// `out`. Under [`FailurePolicy::ContinueOnError`] each failure is written
/// to `err` prefixed with `✗` and a `✓ N/M label` tally closes batches of
/// more than one target or with any failure.
///
/// # Errors
///
/// Under [`FailurePolicy::FailFast`], returns the first failure wrapped as
/// `failed to <action> <target>`. Under either policy, write failures on
/// the output streams are returned as [`TalkError::Io`].
pub async fn execute<T, F, Fut>(
    targets: Vec<T>,
    plan: BulkPlan<'_>,
    mut operation: F,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<BulkOutcome, TalkError>
where
    T: Display,
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<String, TalkError>>,
{
    let total = targets.len();
    let mut succeeded = 0_usize;

    for target in targets {
        let label = target.to_string();
        match operation(target).await {
            Ok(confirmation) => {
                writeln!(out, "{confirmation}")?;
                succeeded = succeeded.saturating_add(1);
            }
            Err(error) => {
                let context = format!("failed to {} {label}", plan.action);
                match plan.policy {
                    FailurePolicy::FailFast => return Err(error.with_context(context)),
                    FailurePolicy::ContinueOnError => {
                        tracing::warn!(item = %label, %error, "bulk target failed");
                        writeln!(err, "✗ {context}: {error}")?;
                    }
                }
            }
        }
    }

    let outcome = BulkOutcome { succeeded, total };
    if plan.policy == FailurePolicy::ContinueOnError && (total > 1 || outcome.failed() > 0) {
        writeln!(out, "\n✓ {succeeded}/{total} {}", plan.tally_label)?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use rstest::rstest;

    use super::{BulkOutcome, BulkPlan, FailurePolicy, execute};
    use crate::github::error::TalkError;

    fn plan(policy: FailurePolicy) -> BulkPlan<'static> {
        BulkPlan {
            policy,
            action: "hide",
            tally_label: "comment(s) hidden",
        }
    }

    fn denied() -> TalkError {
        TalkError::PermissionDenied {
            message: "nope".to_owned(),
        }
    }

    fn run(
        policy: FailurePolicy,
        targets: Vec<&'static str>,
        failing: &'static str,
    ) -> (Result<BulkOutcome, TalkError>, Vec<String>, String, String) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");
        let attempted = RefCell::new(Vec::new());
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = runtime.block_on(execute(
            targets,
            plan(policy),
            |target| {
                attempted.borrow_mut().push(target.to_owned());
                let outcome = if target == failing {
                    Err(denied())
                } else {
                    Ok(format!("✓ Hidden comment {target}"))
                };
                async move { outcome }
            },
            &mut out,
            &mut err,
        ));
        (
            result,
            attempted.into_inner(),
            String::from_utf8(out).expect("utf8 stdout"),
            String::from_utf8(err).expect("utf8 stderr"),
        )
    }

    #[rstest]
    fn continue_on_error_attempts_every_target_and_tallies() {
        let (result, attempted, out, err) = run(
            FailurePolicy::ContinueOnError,
            vec!["PRRC_a", "PRRC_b", "PRRC_c"],
            "PRRC_b",
        );

        let outcome = result.expect("batch completes");
        assert_eq!(attempted, vec!["PRRC_a", "PRRC_b", "PRRC_c"]);
        assert_eq!(outcome, BulkOutcome { succeeded: 2, total: 3 });
        assert!(out.contains("✓ Hidden comment PRRC_a"));
        assert!(out.contains("✓ Hidden comment PRRC_c"));
        assert!(out.ends_with("\n✓ 2/3 comment(s) hidden\n"), "tally missing: {out:?}");
        assert!(err.starts_with("✗ failed to hide PRRC_b: permission denied"));
        assert_eq!(
            outcome.into_result(),
            Err(TalkError::BulkIncomplete { failed: 1, total: 3 })
        );
    }

    #[rstest]
    fn fail_fast_stops_at_first_failure() {
        let (result, attempted, out, err) = run(
            FailurePolicy::FailFast,
            vec!["PRRT_a", "PRRT_b", "PRRT_c"],
            "PRRT_b",
        );

        assert_eq!(attempted, vec!["PRRT_a", "PRRT_b"]);
        assert_eq!(result, Err(denied().with_context("failed to hide PRRT_b")));
        assert_eq!(out, "✓ Hidden comment PRRT_a\n");
        assert!(err.is_empty());
    }

    #[rstest]
    fn single_success_prints_no_tally() {
        let (result, _, out, _) = run(FailurePolicy::ContinueOnError, vec!["PRRC_a"], "");
        assert_eq!(result, Ok(BulkOutcome { succeeded: 1, total: 1 }));
        assert_eq!(out, "✓ Hidden comment PRRC_a\n");
    }
}
