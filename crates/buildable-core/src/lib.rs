//! Buildable Core - fluent builders for structurally-typed immutable records.
//!
//! A pair of plain contract descriptions — a read-only buildable contract
//! and a fluent builder contract — is enough to manufacture working
//! immutable value objects: no hand-written implementation of either side.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          BuilderFactory                 │
//! │  (builder contract, buildable contract) │
//! └──────────────────┬──────────────────────┘
//!                    │ allocates
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │             Builder                     │
//! │   fluent setters over a PropertyBag     │
//! └──────────────────┬──────────────────────┘
//!                    │ terminal call clones the bag
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │             Record                      │
//! │  frozen bag + contract: accessors with  │
//! │  default rules, structural identity     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The builder stays usable after every terminal call; each snapshot is an
//! independent clone, so later mutation never leaks into a finished record.
//! Records are immutable and safe to share across threads.
//!
//! ## Usage
//!
//! ```rust
//! use buildable_core::buildable;
//!
//! buildable! {
//!     pub struct Secret builder SecretBuilder {
//!         name: Option<String>,
//!         uses: i32,
//!         shared: bool,
//!     }
//! }
//!
//! let secret = Secret::builder()
//!     .name("api-key".to_string())
//!     .uses(3)
//!     .get()
//!     .unwrap();
//!
//! assert_eq!(secret.name(), Some("api-key".to_string()));
//! assert_eq!(secret.uses(), 3);
//! assert!(!secret.shared()); // unset scalar: zero-equivalent default
//! ```
//!
//! The same machinery is reachable dynamically through
//! [`BuilderFactory`] and method-name dispatch (`get<Property>`,
//! `is<Property>`, `equals`, `hashCode`, `toString`) for callers that only
//! hold contract descriptions at runtime.

// Property bag: the dynamic name-to-value store
pub mod bag;

// Marker contract for built types
pub mod buildable;

// Fluent construction over a work-in-progress bag
pub mod builder;

// Declarative contract schema
pub mod contract;

// Error types
pub mod error;

// Factory entry point
pub mod factory;

// The immutable built view
pub mod record;

// The type-erased value model
pub mod value;

mod macros;

pub use bag::PropertyBag;
pub use buildable::Buildable;
#[doc(hidden)]
pub use buildable::check_contract;
#[doc(hidden)]
pub use buildable::check_required_fields;
pub use builder::{Builder, Dispatch};
pub use contract::{BuilderContract, Contract, FieldSpec, FieldType, FieldValue};
pub use error::{BuildError, BuildResult};
pub use factory::BuilderFactory;
pub use record::Record;
pub use value::{ScalarKind, Value};

// Public API - what external crates should use
pub mod prelude {
    pub use crate::bag::PropertyBag;
    pub use crate::buildable::Buildable;
    pub use crate::builder::{Builder, Dispatch};
    pub use crate::contract::{BuilderContract, Contract, FieldSpec, FieldType, FieldValue};
    pub use crate::error::{BuildError, BuildResult};
    pub use crate::factory::BuilderFactory;
    pub use crate::record::Record;
    pub use crate::value::{ScalarKind, Value};
}
