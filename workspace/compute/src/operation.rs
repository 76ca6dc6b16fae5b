//! Operation registry and the computation units behind it.
//!
//! The set of operations is closed: every supported operation is a variant of
//! [`OperationKind`], named once in [`REGISTRY`] and mapped to its unit in
//! [`unit_for`]. Adding an operation means adding a variant, a registry row
//! and a match arm.

use crate::error::{ComputeError, Result};
use model::entities::calculation::OperationKind;
use tracing::{debug, instrument, warn};

/// A pure function implementing one binary arithmetic operation.
pub type ComputationUnit = fn(f64, f64) -> Result<f64>;

/// Identifiers accepted by [`resolve`].
const REGISTRY: [(&str, OperationKind); 4] = [
    ("Add", OperationKind::Add),
    ("Sub", OperationKind::Sub),
    ("Multiply", OperationKind::Multiply),
    ("Divide", OperationKind::Divide),
];

fn unit_for(kind: OperationKind) -> ComputationUnit {
    match kind {
        OperationKind::Add => add,
        OperationKind::Sub => sub,
        OperationKind::Multiply => multiply,
        OperationKind::Divide => divide,
    }
}

fn add(a: f64, b: f64) -> Result<f64> {
    Ok(a + b)
}

fn sub(a: f64, b: f64) -> Result<f64> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> Result<f64> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> Result<f64> {
    // Matches -0.0 as well.
    if b == 0.0 {
        return Err(ComputeError::DivisionByZero);
    }
    Ok(a / b)
}

/// A resolved operation, ready to be applied to operands.
#[derive(Clone, Copy, Debug)]
pub struct Operation {
    kind: OperationKind,
    unit: ComputationUnit,
}

impl Operation {
    /// The kind this operation was resolved to.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Check operands against the operation's domain before computing.
    ///
    /// This is the request-level guard; it reports a [`ComputeError::Validation`]
    /// so callers can reject input before anything is persisted.
    pub fn validate(&self, a: f64, b: f64) -> Result<()> {
        if !a.is_finite() || !b.is_finite() {
            return Err(ComputeError::Validation(
                "Operands must be finite numbers.".to_string(),
            ));
        }
        if self.kind == OperationKind::Divide && b == 0.0 {
            return Err(ComputeError::Validation(
                "Division by zero is not allowed.".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply the computation unit to `(a, b)`.
    ///
    /// A result that overflows to infinity is rejected as a [`ComputeError::Validation`].
    pub fn compute(&self, a: f64, b: f64) -> Result<f64> {
        debug!(operation = %self.kind, a, b, "computing");
        let result = (self.unit)(a, b)?;
        if !result.is_finite() {
            warn!(operation = %self.kind, "result is not a finite number");
            return Err(ComputeError::Validation(
                "Result is not a finite number.".to_string(),
            ));
        }
        Ok(result)
    }
}

impl From<OperationKind> for Operation {
    fn from(kind: OperationKind) -> Self {
        Operation {
            kind,
            unit: unit_for(kind),
        }
    }
}

/// Look up an operation by its identifier. Matching is exact and case-sensitive.
#[instrument]
pub fn resolve(operation_id: &str) -> Result<Operation> {
    match REGISTRY.iter().find(|(name, _)| *name == operation_id) {
        Some(&(_, kind)) => Ok(Operation::from(kind)),
        None => {
            warn!("Rejected unknown operation identifier");
            Err(ComputeError::UnknownOperation(operation_id.to_string()))
        }
    }
}

/// All registered operation identifiers, in registry order.
pub fn supported_operations() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [(f64, f64); 6] = [
        (2.0, 3.0),
        (-5.0, 3.0),
        (0.0, 7.5),
        (1e10, -2.5),
        (0.1, 0.2),
        (-4.25, -0.5),
    ];

    #[test]
    fn test_add_sub_multiply_match_closed_form() {
        for (a, b) in SAMPLES {
            assert_eq!(resolve("Add").unwrap().compute(a, b).unwrap(), a + b);
            assert_eq!(resolve("Sub").unwrap().compute(a, b).unwrap(), a - b);
            assert_eq!(resolve("Multiply").unwrap().compute(a, b).unwrap(), a * b);
        }
    }

    #[test]
    fn test_divide_matches_within_tolerance() {
        for (a, b) in SAMPLES {
            let result = resolve("Divide").unwrap().compute(a, b).unwrap();
            assert!((result - a / b).abs() <= f64::EPSILON * (a / b).abs());
        }
        assert_eq!(resolve("Divide").unwrap().compute(10.0, 5.0).unwrap(), 2.0);
    }

    #[test]
    fn test_divide_by_zero_fails() {
        let divide = resolve("Divide").unwrap();
        for a in [0.0, 1.0, -3.5, f64::MAX] {
            assert_eq!(divide.compute(a, 0.0), Err(ComputeError::DivisionByZero));
            assert_eq!(divide.compute(a, -0.0), Err(ComputeError::DivisionByZero));
        }
    }

    #[test]
    fn test_unknown_operation() {
        for name in ["Unknown", "add", "DIVIDE", "", "Modulo"] {
            match resolve(name) {
                Err(ComputeError::UnknownOperation(id)) => assert_eq!(id, name),
                other => panic!("expected UnknownOperation for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_resolve_returns_matching_kind() {
        assert_eq!(resolve("Add").unwrap().kind(), OperationKind::Add);
        assert_eq!(resolve("Sub").unwrap().kind(), OperationKind::Sub);
        assert_eq!(resolve("Multiply").unwrap().kind(), OperationKind::Multiply);
        assert_eq!(resolve("Divide").unwrap().kind(), OperationKind::Divide);
    }

    #[test]
    fn test_from_kind_uses_registered_unit() {
        for name in supported_operations() {
            let resolved = resolve(name).unwrap();
            let from_kind = Operation::from(resolved.kind());
            assert_eq!(from_kind.kind(), resolved.kind());
            assert_eq!(
                from_kind.compute(9.0, 3.0).unwrap(),
                resolved.compute(9.0, 3.0).unwrap()
            );
        }
    }

    #[test]
    fn test_validate_rejects_zero_divisor_only_for_divide() {
        assert!(matches!(
            resolve("Divide").unwrap().validate(1.0, 0.0),
            Err(ComputeError::Validation(_))
        ));
        for name in ["Add", "Sub", "Multiply"] {
            assert!(resolve(name).unwrap().validate(1.0, 0.0).is_ok());
        }
        assert!(resolve("Divide").unwrap().validate(1.0, 2.0).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite_operands() {
        let add = resolve("Add").unwrap();
        assert!(add.validate(f64::NAN, 1.0).is_err());
        assert!(add.validate(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_overflowing_result_is_rejected() {
        let overflow = [
            ("Multiply", 1e308, 10.0),
            ("Add", f64::MAX, f64::MAX),
            ("Sub", -f64::MAX, f64::MAX),
            ("Divide", 1e308, 1e-10),
        ];
        for (name, a, b) in overflow {
            let operation = resolve(name).unwrap();
            assert!(operation.validate(a, b).is_ok());
            assert!(matches!(operation.compute(a, b), Err(ComputeError::Validation(_))));
        }
    }

    #[test]
    fn test_supported_operations_lists_registry() {
        let names: Vec<_> = supported_operations().collect();
        assert_eq!(names, vec!["Add", "Sub", "Multiply", "Divide"]);
    }
}
