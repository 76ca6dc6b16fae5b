//! Arithmetic core of the calculation service: a closed registry of
//! operations and the pure computation units they dispatch to.

pub mod error;
pub mod operation;

pub use error::{ComputeError, Result};
pub use operation::{resolve, supported_operations, ComputationUnit, Operation};
