use thiserror::Error;

/// Errors raised while building a grid-world problem or a solver input.
///
/// These are always surfaced to the caller. Hitting an iteration cap is not
/// an error; see [`crate::solver::Status`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Grid size must be a positive integer, got {0}")]
    InvalidSize(usize),

    #[error("Cell ({x}, {y}) lies outside a {size}x{size} grid")]
    CellOutOfRange { x: i64, y: i64, size: usize },

    #[error("Discount must lie in [0, 1], got {0}")]
    DiscountOutOfRange(f64),

    #[error("Convergence threshold must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    #[error("Expected {expected} values, got {actual}")]
    ValuesLengthMismatch { expected: usize, actual: usize },

    #[error("Value at state {state} is not finite: {value}")]
    NonFiniteValue { state: usize, value: f64 },

    #[error("Expected {expected} policy entries, got {actual}")]
    PolicyLengthMismatch { expected: usize, actual: usize },

    #[error("Action {action} at state {state} is not one of the {n_actions} available actions")]
    InvalidAction {
        state: usize,
        action: usize,
        n_actions: usize,
    },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
