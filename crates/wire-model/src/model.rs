use serde_json::{Map, Value};

use crate::bag::PropertyBag;
use crate::errors::{Error, Result};
use crate::options::JsonOptions;
use crate::validate::Validate;

/// A structured JSON object backed by a [`PropertyBag`].
///
/// Implementations are normally generated with [`wire_model!`](crate::wire_model)
/// and then given hand-written accessors and a [`Validate`] impl that touches
/// every declared field.
pub trait Model: Validate + Sized {
    const NAME: &'static str;
    /// Wire keys the schema declares accessors for.
    const FIELDS: &'static [&'static str];

    fn bag(&self) -> &PropertyBag;
    fn bag_mut(&mut self) -> &mut PropertyBag;
    fn from_bag_unchecked(bag: PropertyBag) -> Self;
    fn into_bag(self) -> PropertyBag;

    /// Trusted construction from a JSON object. No field is interpreted.
    fn from_raw_unchecked(raw: Map<String, Value>) -> Self {
        Self::from_bag_unchecked(PropertyBag::from_raw_unchecked(raw))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(raw) => Ok(Self::from_raw_unchecked(raw)),
            other => Err(Error::not_an_object(Self::NAME, &other)),
        }
    }

    fn from_json_str(text: &str, options: &JsonOptions) -> Result<Self> {
        Self::from_value(options.parse(text)?)
    }

    /// Build from a borrowed value and validate it. This is the test a union
    /// variant applies to decide whether it accepts a payload.
    fn from_value_validated(value: &Value) -> Result<Self> {
        let raw = value
            .as_object()
            .ok_or_else(|| Error::not_an_object(Self::NAME, value))?;
        let model = Self::from_raw_unchecked(raw.clone());
        model.validate()?;
        Ok(model)
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.bag().get(name)
    }

    /// Low-level write. Discriminator fields are reachable through here too;
    /// typed setters are the intended path.
    fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.bag_mut().set(name, value)
    }

    /// Keys present in the payload that the schema has no accessor for.
    fn extra_fields(&self) -> Vec<&str> {
        self.bag()
            .keys()
            .filter(|key| !Self::FIELDS.iter().any(|field| field == key))
            .collect()
    }

    fn to_value(&self) -> Value {
        Value::Object(self.bag().as_map().clone())
    }

    fn into_value(self) -> Value {
        self.into_bag().into()
    }

    fn to_json_string(&self, options: &JsonOptions) -> Result<String> {
        options.render(self.bag())
    }
}

/// A model whose shape is named by a constant field, e.g. `"type": "text"`.
pub trait Discriminated: Model {
    const FIELD: &'static str;
    const TAG: &'static str;

    fn check_tag(&self) -> Result<()> {
        self.bag().required_with(Self::FIELD, |value| match value.as_str() {
            Some(tag) if tag == Self::TAG => Ok(()),
            _ => Err(Error::mismatch(
                Self::FIELD,
                format!("constant {:?}", Self::TAG),
                format!("found {value}"),
            )),
        })
    }
}

/// Declare a bag-backed model type.
///
/// ```ignore
/// wire_model! {
///     /// A plain text block.
///     pub struct TextBlock tagged("type" = "text") { "type", "text", "cache_control" }
/// }
/// ```
///
/// The `tagged` form also implements [`Discriminated`] and makes `Default`
/// stamp the constant field, so a fresh value serializes with its
/// discriminator already in place.
#[macro_export]
macro_rules! wire_model {
    (@shape $(#[$meta:meta])* $vis:vis struct $name:ident { $($key:literal),* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            bag: $crate::PropertyBag,
        }

        impl $crate::Model for $name {
            const NAME: &'static str = stringify!($name);
            const FIELDS: &'static [&'static str] = &[$($key),*];

            fn bag(&self) -> &$crate::PropertyBag {
                &self.bag
            }

            fn bag_mut(&mut self) -> &mut $crate::PropertyBag {
                &mut self.bag
            }

            fn from_bag_unchecked(bag: $crate::PropertyBag) -> Self {
                Self { bag }
            }

            fn into_bag(self) -> $crate::PropertyBag {
                self.bag
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(&self.bag, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::Deserialize as _;
                $crate::PropertyBag::deserialize(deserializer).map(|bag| Self { bag })
            }
        }

        impl ::core::convert::From<$name> for $crate::__private::serde_json::Value {
            fn from(model: $name) -> Self {
                model.bag.into()
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident tagged($field:literal = $tag:literal) {
            $($key:literal),* $(,)?
        }
    ) => {
        $crate::wire_model!(@shape $(#[$meta])* $vis struct $name { $($key),* });

        impl $crate::Discriminated for $name {
            const FIELD: &'static str = $field;
            const TAG: &'static str = $tag;
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                let mut bag = $crate::PropertyBag::new();
                bag.set($field, $tag);
                Self { bag }
            }
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($key:literal),* $(,)? }
    ) => {
        $crate::wire_model!(@shape $(#[$meta])* $vis struct $name { $($key),* });

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self {
                    bag: $crate::PropertyBag::new(),
                }
            }
        }
    };
}
