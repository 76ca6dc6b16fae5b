use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputeError {
    /// The operation identifier is not one of the registered operations
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Raised by the divide unit itself when the divisor is zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Operands violate a precondition of the requested operation
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
