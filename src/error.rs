use crate::RuleId;
use thiserror::Error;

/// Errors surfaced by [`Session`](crate::Session) operations that take
/// caller-supplied references into the catalogue or the password.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no rule with id {0}")]
    UnknownRule(RuleId),

    #[error("rule {0} is not active yet")]
    InactiveRule(RuleId),

    #[error("rule {rule} has no example at index {index}")]
    NoSuchExample { rule: RuleId, index: usize },

    #[error("selection {start}..{end} is outside the password (length {len})")]
    InvalidSelection { start: usize, end: usize, len: usize },
}

/// Errors raised while building [`Options`](crate::Options) from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: expected a non-negative integer number of milliseconds, got {value:?}")]
    InvalidMillis { var: &'static str, value: String },

    #[error("{var}: must be greater than zero")]
    ZeroInterval { var: &'static str },

    #[error("{var}: duration out of range")]
    OutOfRange { var: &'static str },
}
