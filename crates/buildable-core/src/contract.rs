//! Contract descriptions: the declarative schema both dispatchers resolve
//! against.
//!
//! # Design
//!
//! A buildable contract is an explicit list of named, typed fields with an
//! optional flag, not a bag of parsed method names. The naming-convention
//! surface (`get<Property>` / `is<Property>`) still exists on [`Record`],
//! but it resolves against this schema, which keeps the property set
//! checkable and the declared types available for structural identity.
//!
//! No shape validation happens when a contract is written down. A malformed
//! contract surfaces its error on the first call that trips over it.
//!
//! [`Record`]: crate::record::Record

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::value::{ScalarKind, Value};

// ── FieldType ─────────────────────────────────────────────────────────────────

/// The declared type of a contract field.
///
/// Scalar fields substitute a zero-equivalent default when unset; the
/// reference kinds (`Text`, `List`, `Record`) resolve to null instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Scalar(ScalarKind),
    Text,
    List,
    Record,
}

impl FieldType {
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Scalar(ScalarKind::Bool))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Text => f.write_str("text"),
            Self::List => f.write_str("list"),
            Self::Record => f.write_str("record"),
        }
    }
}

// ── FieldSpec ─────────────────────────────────────────────────────────────────

/// One declared field: name, type, and whether absence is an ordinary state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
    pub optional: bool,
}

impl FieldSpec {
    /// Whether a stored value satisfies this field's declared type.
    ///
    /// A stored null conforms to anything except a required scalar, since a
    /// scalar accessor has no null to hand back.
    pub fn conforms(&self, value: &Value) -> bool {
        if value.is_null() {
            return self.optional || !self.ty.is_scalar();
        }
        match (self.ty, value) {
            (FieldType::Scalar(kind), v) => v.scalar_kind() == Some(kind),
            (FieldType::Text, Value::Text(_)) => true,
            (FieldType::List, Value::List(_)) => true,
            (FieldType::Record, Value::Record(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "optional {}", self.ty)
        } else {
            write!(f, "{}", self.ty)
        }
    }
}

// ── Contract ──────────────────────────────────────────────────────────────────

/// A buildable contract: the read-only interface a finished record satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Declare a required field.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty,
            optional: false,
        });
        self
    }

    /// Declare a field whose absence is an ordinary, observable state.
    pub fn optional(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty,
            optional: true,
        });
        self
    }

    /// Declare a field from a Rust type. `Option<T>` declares an optional
    /// field of `T`'s field type.
    pub fn field_of<T: FieldValue>(self, name: impl Into<String>) -> Self {
        if T::is_optional() {
            self.optional(name, T::field_type())
        } else {
            self.field(name, T::field_type())
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up the declared spec for a property name, case-sensitively.
    pub fn spec(&self, property: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == property)
    }
}

// ── BuilderContract ───────────────────────────────────────────────────────────

/// The builder contract's shape: every method other than the single terminal
/// one is a one-argument setter whose name is used verbatim as the property
/// key. Only the terminal method's name needs declaring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuilderContract {
    name: String,
    terminal: String,
}

impl BuilderContract {
    /// By convention the terminal method is named `get`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            terminal: "get".to_string(),
        }
    }

    /// Override the terminal method name.
    pub fn terminal(mut self, method: impl Into<String>) -> Self {
        self.terminal = method.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terminal_method(&self) -> &str {
        &self.terminal
    }
}

// ── FieldValue ────────────────────────────────────────────────────────────────

/// Bridge between Rust types and the dynamic value model.
///
/// Implemented for the scalar kinds, `String`, `Vec<Value>`, [`Record`] and
/// `Option<T>` of any of those. The `buildable!` macro also implements it for
/// every generated record type, so buildables nest inside each other.
pub trait FieldValue: Sized {
    fn field_type() -> FieldType;

    fn is_optional() -> bool {
        false
    }

    fn into_value(self) -> Value;

    /// Recover the Rust value, or `None` when the stored kind does not match.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! scalar_field_value {
    ($($ty:ty => $variant:ident / $kind:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn field_type() -> FieldType {
                    FieldType::Scalar(ScalarKind::$kind)
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_field_value! {
    bool => Bool / Bool,
    i8 => Byte / Byte,
    char => Char / Char,
    i16 => Short / Short,
    i32 => Int / Int,
    i64 => Long / Long,
    f32 => Float / Float,
    f64 => Double / Double,
}

impl FieldValue for String {
    fn field_type() -> FieldType {
        FieldType::Text
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldValue for Vec<Value> {
    fn field_type() -> FieldType {
        FieldType::List
    }

    fn into_value(self) -> Value {
        Value::List(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(v) => Some(v),
            _ => None,
        }
    }
}

impl FieldValue for Record {
    fn field_type() -> FieldType {
        FieldType::Record
    }

    fn into_value(self) -> Value {
        Value::Record(Box::new(self))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Record(v) => Some(*v),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn field_type() -> FieldType {
        T::field_type()
    }

    fn is_optional() -> bool {
        true
    }

    fn into_value(self) -> Value {
        match self {
            Some(inner) => inner.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_spec_lookup_is_case_sensitive() {
        let contract = Contract::new("Thing").field("displayName", FieldType::Text);
        assert!(contract.spec("displayName").is_some());
        assert!(contract.spec("displayname").is_none());
        assert!(contract.spec("missing").is_none());
    }

    #[test]
    fn field_of_marks_option_fields_optional() {
        let contract = Contract::new("Thing")
            .field_of::<i32>("count")
            .field_of::<Option<String>>("label");
        let count = contract.spec("count").unwrap();
        assert!(!count.optional);
        assert_eq!(count.ty, FieldType::Scalar(ScalarKind::Int));
        let label = contract.spec("label").unwrap();
        assert!(label.optional);
        assert_eq!(label.ty, FieldType::Text);
    }

    #[test]
    fn null_conforms_unless_field_is_required_scalar() {
        let required_int = FieldSpec {
            name: "n".into(),
            ty: FieldType::Scalar(ScalarKind::Int),
            optional: false,
        };
        let optional_int = FieldSpec {
            optional: true,
            ..required_int.clone()
        };
        let text = FieldSpec {
            name: "t".into(),
            ty: FieldType::Text,
            optional: false,
        };
        assert!(!required_int.conforms(&Value::Null));
        assert!(optional_int.conforms(&Value::Null));
        assert!(text.conforms(&Value::Null));
    }

    #[test]
    fn conformance_checks_runtime_kind_exactly() {
        let spec = FieldSpec {
            name: "n".into(),
            ty: FieldType::Scalar(ScalarKind::Int),
            optional: false,
        };
        assert!(spec.conforms(&Value::Int(5)));
        assert!(!spec.conforms(&Value::Long(5)));
        assert!(!spec.conforms(&Value::Text("5".into())));
    }

    #[test]
    fn builder_contract_defaults_to_get_terminal() {
        let shape = BuilderContract::new("ThingBuilder");
        assert_eq!(shape.terminal_method(), "get");
        let shape = shape.terminal("build");
        assert_eq!(shape.terminal_method(), "build");
    }

    #[test]
    fn option_field_value_round_trips_null() {
        assert_eq!(Option::<i32>::from_value(Value::Null), Some(None));
        assert_eq!(Option::<i32>::from_value(Value::Int(2)), Some(Some(2)));
        assert_eq!(Option::<i32>::from_value(Value::Text("x".into())), None);
        assert_eq!(None::<i32>.into_value(), Value::Null);
    }
}
