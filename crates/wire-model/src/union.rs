//! Resolution of one JSON value into exactly one of several declared shapes.
//!
//! A [`Resolver`] picks its strategy from the variants it is given. When every
//! variant is a [`Discriminated`] model naming the same field with a distinct
//! literal, the literal alone selects the variant and that variant's failure
//! is final. Otherwise variants are tried in declaration order, the first one
//! that decodes and validates wins, and if none does every rejection is
//! reported together.

use std::any::type_name;
use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{json_type_name, Error, Result, VariantFailure};
use crate::model::{Discriminated, Model};
use crate::options::JsonOptions;
use crate::validate::Validate;

type ParseFn<U> = Box<dyn Fn(&Value) -> Result<U> + Send + Sync>;

/// One declared shape of a union and how to recognize it.
pub struct Variant<U> {
    name: &'static str,
    tag: Option<(&'static str, &'static str)>,
    parse: ParseFn<U>,
}

impl<U: 'static> Variant<U> {
    /// A variant with a custom recognizer. `parse` must both decode and
    /// validate; returning `Ok` claims the value.
    pub fn new<F>(name: &'static str, parse: F) -> Self
    where
        F: Fn(&Value) -> Result<U> + Send + Sync + 'static,
    {
        Self {
            name,
            tag: None,
            parse: Box::new(parse),
        }
    }

    /// A model variant without a usable discriminator.
    pub fn model<M: Model + 'static>(wrap: fn(M) -> U) -> Self {
        Self::new(M::NAME, move |value| M::from_value_validated(value).map(wrap))
    }

    /// A model variant selected by its constant field.
    pub fn tagged<M: Discriminated + 'static>(wrap: fn(M) -> U) -> Self {
        Self {
            tag: Some((M::FIELD, M::TAG)),
            ..Self::model(wrap)
        }
    }

    /// Any serde-decodable value: primitives, open enums, lists of models.
    pub fn value<T>(name: &'static str, wrap: fn(T) -> U) -> Self
    where
        T: DeserializeOwned + Validate + 'static,
    {
        Self::new(name, move |value| {
            let decoded = T::deserialize(value)
                .map_err(|err| Error::mismatch("$", type_name::<T>(), err))?;
            decoded.validate()?;
            Ok(wrap(decoded))
        })
    }

    /// A nested union.
    pub fn union<V: Union>(wrap: fn(V) -> U) -> Self {
        Self::new(V::NAME, move |value| V::resolve(value).map(wrap))
    }

    /// An array whose elements are each resolved as union `V`.
    pub fn list<V: Union>(name: &'static str, wrap: fn(Vec<V>) -> U) -> Self {
        Self::new(name, move |value| resolve_list::<V>(value).map(wrap))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The `(field, literal)` pair this variant is selected by, if any.
    pub fn tag(&self) -> Option<(&'static str, &'static str)> {
        self.tag
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Dispatch on the string value of the named field.
    Discriminator(&'static str),
    /// Try each variant in declaration order.
    OrderedTrial,
}

pub struct Resolver<U> {
    union: &'static str,
    strategy: Strategy,
    variants: Vec<Variant<U>>,
}

impl<U> Resolver<U> {
    pub fn new(union: &'static str, variants: Vec<Variant<U>>) -> Self {
        let strategy = select_strategy(&variants);
        Self {
            union,
            strategy,
            variants,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn variants(&self) -> &[Variant<U>] {
        &self.variants
    }

    pub fn resolve(&self, value: &Value) -> Result<U> {
        match self.strategy {
            Strategy::Discriminator(field) => self.dispatch(field, value),
            Strategy::OrderedTrial => self.trial(value),
        }
    }

    fn dispatch(&self, field: &str, value: &Value) -> Result<U> {
        // `Value::get` is `None` for anything but an object
        let Some(tag) = value.get(field).and_then(Value::as_str) else {
            return Err(self.no_match(
                format!("discriminator `{field}` is missing or not a string"),
                Vec::new(),
            ));
        };

        let Some(variant) = self
            .variants
            .iter()
            .find(|variant| matches!(variant.tag, Some((_, literal)) if literal == tag))
        else {
            return Err(self.no_match(
                format!("no variant is declared for `{field}` = {tag:?}"),
                Vec::new(),
            ));
        };

        match (variant.parse)(value) {
            Ok(resolved) => {
                tracing::trace!(
                    union = self.union,
                    variant = variant.name,
                    "resolved by discriminator"
                );
                Ok(resolved)
            }
            Err(err) => {
                tracing::debug!(
                    union = self.union,
                    variant = variant.name,
                    error = %err,
                    "discriminated variant rejected the payload"
                );
                Err(err)
            }
        }
    }

    fn trial(&self, value: &Value) -> Result<U> {
        let mut attempts = Vec::with_capacity(self.variants.len());
        for variant in &self.variants {
            match (variant.parse)(value) {
                Ok(resolved) => {
                    tracing::trace!(
                        union = self.union,
                        variant = variant.name,
                        rejected = attempts.len(),
                        "resolved by ordered trial"
                    );
                    return Ok(resolved);
                }
                Err(error) => {
                    tracing::debug!(
                        union = self.union,
                        variant = variant.name,
                        error = %error,
                        "variant rejected the payload"
                    );
                    attempts.push(VariantFailure {
                        variant: variant.name,
                        error,
                    });
                }
            }
        }
        Err(self.no_match("no variant accepted the value".to_string(), attempts))
    }

    fn no_match(&self, reason: String, attempts: Vec<VariantFailure>) -> Error {
        Error::NoMatchingUnionVariant {
            union: self.union,
            reason,
            attempts,
        }
    }
}

fn select_strategy<U>(variants: &[Variant<U>]) -> Strategy {
    let mut shared_field = None;
    let mut literals = HashSet::new();
    for variant in variants {
        let Some((field, literal)) = variant.tag else {
            return Strategy::OrderedTrial;
        };
        match shared_field {
            None => shared_field = Some(field),
            Some(existing) if existing != field => return Strategy::OrderedTrial,
            Some(_) => {}
        }
        if !literals.insert(literal) {
            return Strategy::OrderedTrial;
        }
    }
    shared_field.map_or(Strategy::OrderedTrial, Strategy::Discriminator)
}

/// A value that is exactly one of several declared shapes, or an unknown
/// payload retained verbatim.
///
/// The enum itself and its serde, `Validate` and conversion impls are
/// generated by [`wire_union!`](crate::wire_union); this trait supplies the
/// variant table.
pub trait Union: Validate + Sized + 'static {
    const NAME: &'static str;

    /// Variants in declaration order. Under ordered trial, earlier entries
    /// win when more than one would accept the same value.
    fn variants() -> Vec<Variant<Self>>;

    /// Wrap a payload without classifying it.
    fn unknown(raw: Value) -> Self;

    fn as_unknown(&self) -> Option<&Value>;

    fn resolver() -> Resolver<Self> {
        Resolver::new(Self::NAME, Self::variants())
    }

    fn resolve(value: &Value) -> Result<Self> {
        Self::resolver().resolve(value)
    }

    /// Resolve, keeping anything the resolver rejects as an unknown variant
    /// so it can still be re-serialized unchanged.
    fn resolve_or_unknown(value: Value) -> Self {
        match Self::resolve(&value) {
            Ok(resolved) => resolved,
            Err(err) => {
                tracing::debug!(
                    union = Self::NAME,
                    error = %err,
                    "keeping payload as unknown variant"
                );
                Self::unknown(value)
            }
        }
    }

    fn from_json_str(text: &str, options: &JsonOptions) -> Result<Self> {
        Self::resolve(&options.parse(text)?)
    }

    fn is_unknown(&self) -> bool {
        self.as_unknown().is_some()
    }

    /// Gate for typed use: an unknown variant can only be re-serialized.
    fn ensure_known(&self) -> Result<&Self> {
        if self.is_unknown() {
            return Err(Error::UnknownVariantValidated { union: Self::NAME });
        }
        Ok(self)
    }
}

/// Resolve every element of a JSON array as union `U`, stopping at the first
/// element that fails.
pub fn resolve_list<U: Union>(value: &Value) -> Result<Vec<U>> {
    let items = value.as_array().ok_or_else(|| {
        Error::mismatch("$", "array", format!("found {}", json_type_name(value)))
    })?;
    let resolver = U::resolver();
    items.iter().map(|item| resolver.resolve(item)).collect()
}

/// Declare the enum for a union type.
///
/// An `Unknown(serde_json::Value)` variant is appended to the listed ones.
/// Serialization writes the held variant (or the unknown payload) unchanged;
/// deserialization runs [`Union::resolve`], so the type must also implement
/// [`Union`].
#[macro_export]
macro_rules! wire_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident($ty:ty)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $($variant($ty),)*
            Unknown($crate::__private::serde_json::Value),
        }

        impl $name {
            pub fn to_value(&self) -> $crate::__private::serde_json::Value {
                self.clone().into()
            }
        }

        impl $crate::Validate for $name {
            fn validate(&self) -> $crate::Result<()> {
                match self {
                    $(Self::$variant(inner) => $crate::Validate::validate(inner),)*
                    Self::Unknown(_) => Err($crate::Error::UnknownVariantValidated {
                        union: <Self as $crate::Union>::NAME,
                    }),
                }
            }
        }

        $(
            impl ::core::convert::From<$ty> for $name {
                fn from(inner: $ty) -> Self {
                    Self::$variant(inner)
                }
            }
        )*

        impl ::core::convert::From<$name> for $crate::__private::serde_json::Value {
            fn from(union: $name) -> Self {
                match union {
                    $($name::$variant(inner) => inner.into(),)*
                    $name::Unknown(raw) => raw,
                }
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                match self {
                    $(Self::$variant(inner) => {
                        $crate::__private::serde::Serialize::serialize(inner, serializer)
                    })*
                    Self::Unknown(raw) => {
                        $crate::__private::serde::Serialize::serialize(raw, serializer)
                    }
                }
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::Deserialize as _;
                let value = $crate::__private::serde_json::Value::deserialize(deserializer)?;
                <Self as $crate::Union>::resolve(&value)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}
