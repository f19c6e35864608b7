//! Sequential statement execution with per-statement failure isolation

use serde::{Deserialize, Serialize};

use crate::database::Session;
use crate::outcome::Outcome;

/// Longest failure message kept per statement
pub const MAX_MESSAGE_CHARS: usize = 150;

/// How statement failures affect the reported completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// The run completes once every statement was attempted
    #[default]
    Lenient,
    /// Any failed statement marks the run incomplete
    Strict,
}

/// Result of running a statement list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Whether the run counts as completed under the execution mode
    pub completed: bool,
    /// Per-statement tally
    pub outcome: Outcome,
}

/// Runs statements one at a time on a single session
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaExecutor {
    mode: ExecutionMode,
}

/// Truncate a message to at most `max` characters
pub fn truncate_message(message: &str, max: usize) -> String {
    match message.char_indices().nth(max) {
        Some((idx, _)) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

impl SchemaExecutor {
    pub fn new(mode: ExecutionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Execute statements in order
    ///
    /// Each statement runs in autocommit so one failure cannot poison the
    /// statements after it. A failure is logged and the pass continues; the
    /// session is committed once at the end.
    pub fn execute(&self, session: &mut dyn Session, statements: &[String]) -> ExecutionReport {
        let mut outcome = Outcome::new();

        if let Err(e) = session.set_autocommit(true) {
            tracing::warn!("Could not enable autocommit: {}", e);
        }

        for (i, statement) in statements.iter().enumerate() {
            tracing::debug!("Executing statement {}: {}", i + 1, truncate_message(statement, 100));
            match session.execute(statement, &[]) {
                Ok(_) => outcome.succeed(1),
                Err(e) => {
                    let message = truncate_message(&e.to_string(), MAX_MESSAGE_CHARS);
                    tracing::warn!("Error in statement {}: {}", i + 1, message);
                    outcome.fail(format!("statement {}: {}", i + 1, message));
                }
            }
        }

        let committed = match session.commit() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Commit failed: {}", e);
                false
            }
        };

        let completed = committed
            && match self.mode {
                ExecutionMode::Lenient => true,
                ExecutionMode::Strict => outcome.is_success(),
            };

        tracing::info!(
            "Executed {} statements: {}",
            statements.len(),
            outcome
        );

        ExecutionReport { completed, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_message() {
        assert_eq!(truncate_message("abcdef", 3), "abc");
        assert_eq!(truncate_message("ab", 3), "ab");
        assert_eq!(truncate_message("ééé", 2), "éé");
    }

    #[test]
    fn test_default_mode_is_lenient() {
        assert_eq!(SchemaExecutor::default().mode(), ExecutionMode::Lenient);
    }
}
