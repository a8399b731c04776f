//! The marker contract tying a built type to its builder.

use crate::contract::Contract;
use crate::error::{BuildError, BuildResult};
use crate::record::Record;
use crate::value::Value;

/// A type whose instances are manufactured by a builder.
///
/// Implementations are normally generated by the [`buildable!`] macro; the
/// conventional way to obtain a builder is the static
/// [`builder()`](Buildable::builder) accessor.
///
/// [`buildable!`]: macro@crate::buildable
pub trait Buildable: Sized {
    /// The fluent builder type whose terminal call produces `Self`.
    type Builder;

    /// The contract instances of this type satisfy.
    fn contract() -> Contract;

    /// Start building a new instance.
    fn builder() -> Self::Builder;

    /// Wrap a finished record, rejecting records built for a different
    /// contract.
    fn from_record(record: Record) -> BuildResult<Self>;
}

/// Shared contract check for [`Buildable::from_record`] implementations.
/// Public for use from `buildable!` expansions.
#[doc(hidden)]
pub fn check_contract(expected: &Contract, record: &Record) -> BuildResult<()> {
    if record.contract() == expected {
        Ok(())
    } else {
        Err(BuildError::ConstructionFailure {
            contract: expected.name().to_string(),
            detail: format!(
                "record was built for contract '{}'",
                record.contract().name()
            ),
        })
    }
}

/// Shared completeness check for [`Buildable::from_record`] implementations.
/// A typed accessor for a required reference field has no null to return,
/// so every such field must hold a value before the record enters a typed
/// wrapper. Scalar fields are exempt: absence resolves to the
/// zero-equivalent default.
/// Public for use from `buildable!` expansions.
#[doc(hidden)]
pub fn check_required_fields(record: &Record) -> BuildResult<()> {
    for spec in record.contract().fields() {
        if spec.optional || spec.ty.is_scalar() {
            continue;
        }
        if record.raw(&spec.name).is_none_or(Value::is_null) {
            return Err(BuildError::ConstructionFailure {
                contract: record.contract().name().to_string(),
                detail: format!("required property '{}' is not set", spec.name),
            });
        }
    }
    Ok(())
}
