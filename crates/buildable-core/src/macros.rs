//! The `buildable!` macro: a thin codegen layer mapping declared field
//! accessors onto the generic [`Record`](crate::Record).
//!
//! One invocation emits, for a contract pair, the typed read-only wrapper
//! and its fluent builder — no hand-written implementation of either. Field
//! declarations double as the contract schema: `Option<T>` fields resolve
//! to `None` when unset, scalar fields resolve to their zero-equivalent
//! default. A non-`Option` reference-typed field is *required*: Rust has no
//! null for its accessor to return, so the terminal call fails with
//! [`ConstructionFailure`](crate::BuildError::ConstructionFailure) while
//! the field is unset. Declare the field `Option<T>` when absence is an
//! ordinary state.
//!
//! ```
//! use buildable_core::buildable;
//!
//! buildable! {
//!     /// A named counter.
//!     pub struct Counter builder CounterBuilder {
//!         count: i32,
//!         label: Option<String>,
//!     }
//! }
//!
//! let counter = Counter::builder()
//!     .count(3)
//!     .label("hits".to_string())
//!     .get()
//!     .unwrap();
//! assert_eq!(counter.count(), 3);
//! assert_eq!(counter.label(), Some("hits".to_string()));
//! ```

/// Generate an immutable record type and its fluent builder from a field
/// list:
///
/// ```ignore
/// buildable! {
///     pub struct Widget builder WidgetBuilder {
///         count: i32,
///         label: Option<String>,
///     }
/// }
/// ```
///
/// Scalar fields resolve to their zero-equivalent default when unset,
/// `Option<T>` fields to `None`, and non-`Option` reference fields must be
/// set or `get()` fails. Setters chain; `get()` is the terminal call and
/// the builder stays usable afterwards.
#[macro_export]
macro_rules! buildable {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident builder $builder:ident {
            $(
                $(#[$fmeta:meta])*
                $fname:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        $vis struct $name {
            record: $crate::Record,
        }

        impl $name {
            /// Start building a new instance.
            $vis fn builder() -> $builder {
                <Self as $crate::Buildable>::builder()
            }

            /// The backing record, for structural inspection and dynamic
            /// dispatch.
            $vis fn record(&self) -> &$crate::Record {
                &self.record
            }

            $vis fn into_record(self) -> $crate::Record {
                self.record
            }

            $(
                $(#[$fmeta])*
                $vis fn $fname(&self) -> $fty {
                    self.record
                        .typed(stringify!($fname))
                        .expect("buildable! keeps accessors and contract in agreement")
                }
            )*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.record, f)
            }
        }

        impl $crate::Buildable for $name {
            type Builder = $builder;

            fn contract() -> $crate::Contract {
                $crate::Contract::new(stringify!($name))
                    $( .field_of::<$fty>(stringify!($fname)) )*
            }

            fn builder() -> $builder {
                $builder {
                    inner: $crate::BuilderFactory::new().builder(
                        $crate::BuilderContract::new(stringify!($builder)),
                        <Self as $crate::Buildable>::contract(),
                    ),
                }
            }

            fn from_record(record: $crate::Record) -> $crate::BuildResult<Self> {
                $crate::check_contract(&<Self as $crate::Buildable>::contract(), &record)?;
                // Typed accessors have no null to return, so required
                // reference fields must be populated before wrapping.
                $crate::check_required_fields(&record)?;
                ::std::result::Result::Ok(Self { record })
            }
        }

        // Generated types nest inside other buildables as record fields.
        impl $crate::FieldValue for $name {
            fn field_type() -> $crate::FieldType {
                $crate::FieldType::Record
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Record(::std::boxed::Box::new(self.record))
            }

            fn from_value(value: $crate::Value) -> ::std::option::Option<Self> {
                match value {
                    $crate::Value::Record(record) => {
                        ::std::option::Option::Some(Self { record: *record })
                    }
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::std::convert::From<$name> for $crate::Value {
            fn from(built: $name) -> Self {
                $crate::Value::Record(::std::boxed::Box::new(built.record))
            }
        }

        /// Fluent builder; every setter chains and `get()` finalizes an
        /// independent snapshot.
        #[derive(Debug, Clone)]
        $vis struct $builder {
            inner: $crate::Builder,
        }

        impl $builder {
            $(
                $vis fn $fname(self, value: impl ::std::convert::Into<$fty>) -> Self {
                    Self {
                        inner: self
                            .inner
                            .property::<$fty>(stringify!($fname), value.into()),
                    }
                }
            )*

            /// Terminal call: freeze the properties set so far. The builder
            /// stays usable afterwards.
            $vis fn get(&self) -> $crate::BuildResult<$name> {
                <$name as $crate::Buildable>::from_record(self.inner.build()?)
            }
        }
    };
}
