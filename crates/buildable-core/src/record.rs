//! The immutable record: the built view returned by a terminal call.
//!
//! # Design
//!
//! A `Record` is a frozen property bag plus the buildable contract it was
//! built against. Nothing hands out mutable access after construction, so
//! records are safe to share and read from any number of threads.
//!
//! Identity is structural. Two records are equal iff they hold the same set
//! of property names, each name's declared type matches where determinable,
//! and each value is value-equal. The contract's *name* does not
//! participate: two contracts over the same properties describe the same
//! value.
//!
//! Besides the typed accessors, `invoke` offers the naming-convention
//! surface: `get<Property>` and `is<Property>` resolve the property with
//! the default-value rules, and `equals` / `hashCode` / `toString` route to
//! the structural identity. Anything else fails fast.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::bag::PropertyBag;
use crate::contract::{Contract, FieldSpec, FieldType, FieldValue};
use crate::error::{BuildError, BuildResult};
use crate::value::Value;

/// An immutable value object satisfying a buildable contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    contract: Contract,
    properties: PropertyBag,
}

enum AccessorKind {
    Get,
    Is,
}

impl Record {
    /// Only the builder's terminal call constructs records; the bag it
    /// passes in is a private clone no other reference can mutate.
    pub(crate) fn new(contract: Contract, properties: PropertyBag) -> Self {
        Self {
            contract,
            properties,
        }
    }

    pub fn contract(&self) -> &Contract {
        &self.contract
    }

    /// The stored value without default substitution. `None` means the
    /// property was never set; a stored null comes back as `Value::Null`.
    /// Undeclared properties set through the builder are visible here.
    pub fn raw(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.property_names()
    }

    /// Resolve a declared property with the default-value rules:
    /// set and non-null returns the value; otherwise a required scalar
    /// returns its zero-equivalent default and everything else resolves to
    /// null. Undeclared names fail fast.
    pub fn get(&self, property: &str) -> BuildResult<Value> {
        let spec = self
            .contract
            .spec(property)
            .ok_or_else(|| BuildError::UnsupportedAccessor {
                method: property.to_string(),
            })?;
        Ok(self.resolve_spec(spec))
    }

    /// Resolve a declared property into a Rust type.
    ///
    /// Asking for a type that disagrees with what resolution produced is a
    /// contract mismatch and fails the same way an unknown accessor does.
    pub fn typed<T: FieldValue>(&self, property: &str) -> BuildResult<T> {
        let resolved = self.get(property)?;
        T::from_value(resolved).ok_or_else(|| BuildError::UnsupportedAccessor {
            method: property.to_string(),
        })
    }

    /// Dispatch a call by method name, the way a proxied interface would.
    ///
    /// - `get<Property>` resolves the lower-cased property.
    /// - `is<Property>` does the same but only for boolean-declared fields.
    /// - `equals` (one argument), `hashCode`, `toString` route to
    ///   structural identity; `equals` returns false for non-records.
    /// - Anything else, including a recognized name with the wrong
    ///   argument count, is an `UnsupportedAccessor`.
    pub fn invoke(&self, method: &str, args: &[Value]) -> BuildResult<Value> {
        match method {
            "toString" => {
                self.require_no_args(method, args)?;
                Ok(Value::Text(self.to_string()))
            }
            "hashCode" => {
                self.require_no_args(method, args)?;
                Ok(Value::Long(self.structural_hash() as i64))
            }
            "equals" => {
                if args.len() != 1 {
                    return Err(BuildError::UnsupportedAccessor {
                        method: method.to_string(),
                    });
                }
                let equal = match &args[0] {
                    Value::Record(other) => self == other.as_ref(),
                    _ => false,
                };
                Ok(Value::Bool(equal))
            }
            _ => {
                self.require_no_args(method, args)?;
                let (kind, property) =
                    accessor_property(method).ok_or_else(|| BuildError::UnsupportedAccessor {
                        method: method.to_string(),
                    })?;
                if let AccessorKind::Is = kind {
                    // `is` accessors only exist for boolean-declared fields.
                    let declared = self.contract.spec(&property).map(|spec| spec.ty);
                    if declared.is_none_or(|ty| !ty.is_boolean()) {
                        return Err(BuildError::UnsupportedAccessor {
                            method: method.to_string(),
                        });
                    }
                }
                self.get(&property).map_err(|_| BuildError::UnsupportedAccessor {
                    method: method.to_string(),
                })
            }
        }
    }

    /// Deterministic structural hash, exposed for the `hashCode` identity
    /// call. Equal records always hash equally.
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    fn resolve_spec(&self, spec: &FieldSpec) -> Value {
        match self.properties.get(&spec.name) {
            // A stored null behaves like absence at the accessor level; the
            // bag itself keeps the distinction for identity purposes.
            Some(value) if !value.is_null() => value.clone(),
            _ => {
                if spec.optional {
                    Value::Null
                } else {
                    match spec.ty {
                        FieldType::Scalar(kind) => kind.default_value(),
                        _ => Value::Null,
                    }
                }
            }
        }
    }

    fn require_no_args(&self, method: &str, args: &[Value]) -> BuildResult<()> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(BuildError::UnsupportedAccessor {
                method: method.to_string(),
            })
        }
    }

    /// Declared type of a set property, where determinable.
    fn declared(&self, property: &str) -> Option<(FieldType, bool)> {
        self.contract
            .spec(property)
            .map(|spec| (spec.ty, spec.optional))
    }
}

/// Parse `get<Property>` / `is<Property>` into the bare property name,
/// lower-casing the first letter. The character after the prefix must be
/// upper-case, so `getter` is not an accessor for `ter`.
fn accessor_property(method: &str) -> Option<(AccessorKind, String)> {
    for (prefix, kind) in [("get", AccessorKind::Get), ("is", AccessorKind::Is)] {
        if let Some(rest) = method.strip_prefix(prefix) {
            if rest.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
                return Some((kind, uncapitalize(rest)));
            }
        }
    }
    None
}

fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.properties.len() != other.properties.len() {
            return false;
        }
        self.properties.iter().all(|(name, value)| {
            other.properties.get(name).is_some_and(|other_value| {
                self.declared(name) == other.declared(name) && value == other_value
            })
        })
    }
}

impl Eq for Record {}

impl Hash for Record {
    /// Deterministic fold over the sorted property names of
    /// (name, declared type, value). Only set properties participate, so
    /// the hash agrees with equality.
    fn hash<H: Hasher>(&self, state: &mut H) {
        for (name, value) in self.properties.iter() {
            name.hash(state);
            self.declared(name).hash(state);
            value.hash(state);
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: ", self.contract.name())?;
        for (i, (name, value)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarKind;

    fn contract() -> Contract {
        Contract::new("Widget")
            .field("count", FieldType::Scalar(ScalarKind::Int))
            .field("active", FieldType::Scalar(ScalarKind::Bool))
            .optional("label", FieldType::Text)
            .optional("verified", FieldType::Scalar(ScalarKind::Bool))
            .field("owner", FieldType::Text)
    }

    fn record_with(pairs: &[(&str, Value)]) -> Record {
        let mut bag = PropertyBag::new();
        for (name, value) in pairs {
            bag.set(*name, value.clone());
        }
        Record::new(contract(), bag)
    }

    #[test]
    fn unset_required_scalar_resolves_to_default() {
        let record = record_with(&[]);
        assert_eq!(record.get("count").unwrap(), Value::Int(0));
        assert_eq!(record.get("active").unwrap(), Value::Bool(false));
    }

    #[test]
    fn unset_optional_and_reference_resolve_to_null() {
        let record = record_with(&[]);
        assert_eq!(record.get("label").unwrap(), Value::Null);
        assert_eq!(record.get("owner").unwrap(), Value::Null);
    }

    #[test]
    fn stored_null_resolves_like_absence_but_stays_set() {
        let record = record_with(&[("count", Value::Null)]);
        assert_eq!(record.get("count").unwrap(), Value::Int(0));
        assert_eq!(record.raw("count"), Some(&Value::Null));
        assert_eq!(record.property_names().collect::<Vec<_>>(), vec!["count"]);
    }

    #[test]
    fn undeclared_property_fails_fast_on_get() {
        let record = record_with(&[]);
        assert!(matches!(
            record.get("bogus"),
            Err(BuildError::UnsupportedAccessor { .. })
        ));
    }

    #[test]
    fn invoke_routes_get_accessors_by_name() {
        let record = record_with(&[("count", Value::Int(3))]);
        assert_eq!(record.invoke("getCount", &[]).unwrap(), Value::Int(3));
        assert_eq!(record.invoke("getLabel", &[]).unwrap(), Value::Null);
    }

    #[test]
    fn invoke_is_accessor_requires_boolean_declaration() {
        let record = record_with(&[("active", Value::Bool(true))]);
        assert_eq!(record.invoke("isActive", &[]).unwrap(), Value::Bool(true));
        assert!(matches!(
            record.invoke("isCount", &[]),
            Err(BuildError::UnsupportedAccessor { .. })
        ));
    }

    #[test]
    fn invoke_unset_primitive_boolean_is_false() {
        let record = record_with(&[]);
        assert_eq!(record.invoke("isActive", &[]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn invoke_unset_optional_boolean_is_null() {
        let record = record_with(&[]);
        assert_eq!(record.invoke("isVerified", &[]).unwrap(), Value::Null);
    }

    #[test]
    fn invoke_rejects_unrecognized_patterns() {
        let record = record_with(&[]);
        for method in ["count", "fetchCount", "get", "is", "getBogus"] {
            assert!(
                matches!(
                    record.invoke(method, &[]),
                    Err(BuildError::UnsupportedAccessor { .. })
                ),
                "expected '{method}' to be rejected"
            );
        }
    }

    #[test]
    fn invoke_rejects_accessor_with_arguments() {
        let record = record_with(&[]);
        assert!(matches!(
            record.invoke("getCount", &[Value::Int(1)]),
            Err(BuildError::UnsupportedAccessor { .. })
        ));
    }

    #[test]
    fn invoke_identity_methods() {
        let record = record_with(&[("count", Value::Int(3))]);
        let same = record_with(&[("count", Value::Int(3))]);
        let other = record_with(&[("count", Value::Int(4))]);

        assert_eq!(
            record.invoke("equals", &[Value::from(same)]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            record.invoke("equals", &[Value::from(other)]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            record.invoke("equals", &[Value::Int(3)]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            record.invoke("hashCode", &[]).unwrap(),
            Value::Long(record.structural_hash() as i64)
        );
        assert_eq!(
            record.invoke("toString", &[]).unwrap(),
            Value::Text(record.to_string())
        );
    }

    #[test]
    fn equality_is_structural_over_set_properties() {
        let a = record_with(&[("count", Value::Int(1)), ("owner", Value::from("x"))]);
        let b = record_with(&[("owner", Value::from("x")), ("count", Value::Int(1))]);
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
    }

    #[test]
    fn extra_or_differing_property_breaks_equality() {
        let base = record_with(&[("count", Value::Int(1))]);
        let extra = record_with(&[("count", Value::Int(1)), ("owner", Value::from("x"))]);
        let differing = record_with(&[("count", Value::Int(2))]);
        assert_ne!(base, extra);
        assert_ne!(base, differing);
    }

    #[test]
    fn contract_name_does_not_participate_in_equality() {
        let mut bag = PropertyBag::new();
        bag.set("count", Value::Int(1));
        let a = Record::new(
            Contract::new("A").field("count", FieldType::Scalar(ScalarKind::Int)),
            bag.clone(),
        );
        let b = Record::new(
            Contract::new("B").field("count", FieldType::Scalar(ScalarKind::Int)),
            bag,
        );
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
    }

    #[test]
    fn differing_declared_types_break_equality() {
        let mut bag = PropertyBag::new();
        bag.set("count", Value::Null);
        let a = Record::new(
            Contract::new("A").optional("count", FieldType::Text),
            bag.clone(),
        );
        let b = Record::new(Contract::new("A").optional("count", FieldType::List), bag);
        assert_ne!(a, b);
    }

    #[test]
    fn display_lists_properties_in_sorted_order() {
        let record = record_with(&[
            ("owner", Value::from("ada")),
            ("count", Value::Int(2)),
            ("label", Value::Null),
        ]);
        assert_eq!(
            record.to_string(),
            "[Widget: count=2, label=null, owner=ada]"
        );
    }

    #[test]
    fn typed_accessors_recover_rust_values() {
        let record = record_with(&[("count", Value::Int(9)), ("label", Value::from("tag"))]);
        assert_eq!(record.typed::<i32>("count").unwrap(), 9);
        assert_eq!(
            record.typed::<Option<String>>("label").unwrap(),
            Some("tag".to_string())
        );
        let unset = record_with(&[]);
        assert_eq!(unset.typed::<Option<String>>("label").unwrap(), None);
        assert_eq!(unset.typed::<i32>("count").unwrap(), 0);
    }
}
