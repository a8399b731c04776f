//! Factory wiring: the sole entry point other subsystems use.

use tracing::debug;

use crate::builder::Builder;
use crate::contract::{BuilderContract, Contract};

/// Creates live builders from a (builder contract, buildable contract) pair.
///
/// No contract-shape validation happens here. A malformed contract surfaces
/// its error lazily, on the first mismatched call against the builder or
/// the finished record.
#[derive(Debug, Clone, Default)]
pub struct BuilderFactory;

impl BuilderFactory {
    pub fn new() -> Self {
        Self
    }

    /// Allocate a fresh, empty work-in-progress bag and wrap it in a
    /// builder whose terminal call satisfies `buildable`.
    pub fn builder(&self, shape: BuilderContract, buildable: Contract) -> Builder {
        debug!(
            builder = %shape.name(),
            buildable = %buildable.name(),
            "creating builder"
        );
        Builder::new(shape, buildable)
    }
}
