//! The builder dispatcher: fluent construction over a work-in-progress bag.
//!
//! All mutable state lives in the owned bag; the builder itself is a
//! stateless router over it. The terminal call clones the bag and freezes
//! the clone inside a [`Record`], severing it from further mutation, so a
//! builder can keep producing independent snapshots for as long as the
//! caller holds it.
//!
//! Builders are single-owner. Setters take `&mut self` (or `self` on the
//! fluent surface), so concurrent mutation is unrepresentable without a
//! lock the caller adds; no internal locking is performed.

use tracing::{debug, trace};

use crate::bag::PropertyBag;
use crate::contract::{BuilderContract, Contract, FieldValue};
use crate::error::{BuildError, BuildResult};
use crate::record::Record;
use crate::value::Value;

/// Fluent builder for a buildable contract, created by
/// [`BuilderFactory::builder`](crate::factory::BuilderFactory::builder).
#[derive(Debug, Clone)]
pub struct Builder {
    shape: BuilderContract,
    buildable: Contract,
    work_in_progress: PropertyBag,
}

/// Outcome of a dynamically-dispatched builder call.
#[derive(Debug, PartialEq)]
pub enum Dispatch {
    /// A setter ran; keep chaining on the same builder.
    Chained,
    /// The terminal method ran and produced an immutable snapshot.
    Built(Record),
}

impl Builder {
    pub(crate) fn new(shape: BuilderContract, buildable: Contract) -> Self {
        Self {
            shape,
            buildable,
            work_in_progress: PropertyBag::new(),
        }
    }

    /// The buildable contract the terminal call will satisfy.
    pub fn buildable(&self) -> &Contract {
        &self.buildable
    }

    /// Store a property, chaining. The name is used verbatim as the
    /// property key; nothing checks it against the buildable contract until
    /// the terminal call.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        let property = property.into();
        let value = value.into();
        trace!(property = %property, kind = value.kind(), "builder set");
        self.work_in_progress.set(property, value);
        self
    }

    /// Typed variant of [`set`](Self::set), used by generated builders.
    pub fn property<T: FieldValue>(self, name: impl Into<String>, value: T) -> Self {
        self.set(name, value.into_value())
    }

    /// The terminal operation: clone the bag, check declared-field
    /// conformance, and freeze the clone into a [`Record`].
    ///
    /// The builder stays usable; calling this again, with or without
    /// intervening mutation, yields independent, isolated snapshots.
    pub fn build(&self) -> BuildResult<Record> {
        let snapshot = self.work_in_progress.clone();
        for spec in self.buildable.fields() {
            if let Some(value) = snapshot.get(&spec.name) {
                if !spec.conforms(value) {
                    return Err(BuildError::ConstructionFailure {
                        contract: self.buildable.name().to_string(),
                        detail: format!(
                            "property '{}' is declared {} but holds {}",
                            spec.name,
                            spec,
                            value.kind()
                        ),
                    });
                }
            }
        }
        debug!(
            contract = %self.buildable.name(),
            properties = snapshot.len(),
            "built immutable snapshot"
        );
        Ok(Record::new(self.buildable.clone(), snapshot))
    }

    /// Dispatch a call by method name, the way a proxied builder interface
    /// would.
    ///
    /// The terminal method (zero arguments) finalizes; every other name is
    /// a setter taking exactly one argument, stored under the method name
    /// verbatim — no `with`/`set` prefix is stripped, so builder method
    /// names must match accessor property names exactly. Any other arity
    /// fails fast.
    pub fn invoke(&mut self, method: &str, mut args: Vec<Value>) -> BuildResult<Dispatch> {
        if method == self.shape.terminal_method() {
            if !args.is_empty() {
                return Err(BuildError::InvalidBuilderUsage {
                    method: method.to_string(),
                    expected: 0,
                    actual: args.len(),
                });
            }
            return Ok(Dispatch::Built(self.build()?));
        }
        let actual = args.len();
        match args.pop() {
            Some(value) if args.is_empty() => {
                trace!(property = %method, kind = value.kind(), "builder set");
                self.work_in_progress.set(method, value);
                Ok(Dispatch::Chained)
            }
            _ => Err(BuildError::InvalidBuilderUsage {
                method: method.to_string(),
                expected: 1,
                actual,
            }),
        }
    }
}
