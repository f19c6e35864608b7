//! Partial-failure accounting
//!
//! Every operation that keeps going past local failures reports an
//! [`Outcome`] instead of a bare boolean, so callers can derive exit codes and
//! tests can assert on exact counts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of failure messages retained
pub const MAX_RECORDED_FAILURES: usize = 100;

/// Tally of succeeded, failed and skipped units of work
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Units that completed
    pub succeeded: usize,
    /// Units that were attempted and failed
    pub failed: usize,
    /// Units that were not attempted
    pub skipped: usize,
    /// Failure messages (limited to the first 100)
    pub failures: Vec<String>,
}

impl Outcome {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `n` successful units
    pub fn succeed(&mut self, n: usize) {
        self.succeeded += n;
    }

    /// Record a failed unit with its reason
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.failed += 1;
        if self.failures.len() < MAX_RECORDED_FAILURES {
            self.failures.push(reason.into());
        }
    }

    /// Record a unit that was not attempted
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Fold another tally into this one
    pub fn merge(&mut self, other: Outcome) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.skipped += other.skipped;
        let room = MAX_RECORDED_FAILURES.saturating_sub(self.failures.len());
        self.failures.extend(other.failures.into_iter().take(room));
    }

    /// Number of attempted units
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }

    /// True when nothing failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Succeeded over attempted, 1.0 when nothing was attempted
    pub fn ratio(&self) -> f64 {
        let attempted = self.attempted();
        if attempted == 0 {
            1.0
        } else {
            self.succeeded as f64 / attempted as f64
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} succeeded", self.succeeded, self.attempted())?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

/// Try a whole slice of work at once, falling back to one item at a time
///
/// `whole` is attempted first with every item. If it fails, each item is
/// retried through `single`; items that fail individually are recorded as
/// failures and the rest still count as succeeded.
///
/// # Arguments
/// * `ctx` - State shared by both attempts (typically a session)
/// * `items` - The unit of work
/// * `whole` - Attempt covering all items
/// * `single` - Attempt covering one item
///
/// # Returns
/// The tally of items, never the batch attempt itself
pub fn retry_narrowed<C, T, E, W, S>(
    ctx: &mut C,
    items: &[T],
    mut whole: W,
    mut single: S,
) -> Outcome
where
    C: ?Sized,
    E: fmt::Display,
    W: FnMut(&mut C, &[T]) -> Result<(), E>,
    S: FnMut(&mut C, &T) -> Result<(), E>,
{
    let mut outcome = Outcome::new();
    if items.is_empty() {
        return outcome;
    }

    match whole(ctx, items) {
        Ok(()) => outcome.succeed(items.len()),
        Err(e) => {
            tracing::debug!(
                "Batch of {} failed, retrying individually: {}",
                items.len(),
                e
            );
            for item in items {
                match single(ctx, item) {
                    Ok(()) => outcome.succeed(1),
                    Err(e) => outcome.fail(e.to_string()),
                }
            }
        }
    }
    outcome
}
