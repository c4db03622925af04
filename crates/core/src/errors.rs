use rust_decimal::Decimal;
use thiserror::Error;

/// Invariant violations on quote mutation. Operator shorthand is never an
/// error: unresolvable input is a first-class resolution outcome, not a
/// failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("line item `{name}` quantity must be greater than zero")]
    ZeroQuantity { name: String },
    #[error("discount percent must be between 0 and 100, got {0}")]
    PercentOutOfRange(Decimal),
}
