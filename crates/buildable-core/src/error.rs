//! Error taxonomy for the builder/record framework.
//!
//! Every variant is a fail-fast programming-contract violation surfaced at
//! the call that triggered it. None are retried and none fall back to a
//! silent default or a partially-built result.

use thiserror::Error;

/// Root error type for builder and record operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A builder-contract method was called with the wrong argument count:
    /// the terminal method takes zero arguments, every setter takes one.
    #[error("builder method '{method}' takes {expected} argument(s), got {actual}")]
    InvalidBuilderUsage {
        method: String,
        expected: usize,
        actual: usize,
    },

    /// A buildable-contract method name matches no recognized accessor or
    /// identity pattern, or names a property the contract never declared.
    #[error("accessor '{method}' matches no declared property or recognized pattern")]
    UnsupportedAccessor { method: String },

    /// The terminal call found state that cannot honor the finished
    /// record's contract.
    #[error("cannot finalize '{contract}': {detail}")]
    ConstructionFailure { contract: String, detail: String },
}

pub type BuildResult<T> = Result<T, BuildError>;
