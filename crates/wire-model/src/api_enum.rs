//! String-coded enums whose set of legal values may grow on the server
//! before the client catches up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum::VariantNames;

use crate::errors::{Error, Result};
use crate::validate::Validate;

/// The closed set of tokens a build knows about. Implement it on a
/// `strum`-derived enum (`EnumString`, `AsRefStr`, `VariantNames`); token
/// matching is exact and case-sensitive.
pub trait KnownValue: FromStr + AsRef<str> + VariantNames + Copy + PartialEq + fmt::Debug {
    const NAME: &'static str;
}

/// An open enum value: the raw wire token plus the member it resolved to,
/// if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiEnum<K> {
    raw: String,
    known: Option<K>,
}

impl<K: KnownValue> ApiEnum<K> {
    /// Never fails. A token outside the known set is kept verbatim and only
    /// reported by [`validate`](Validate::validate) or [`value`](Self::value).
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let known = K::from_str(&raw).ok();
        if known.is_none() {
            tracing::debug!(name = K::NAME, value = %raw, "unrecognized enum value kept as raw");
        }
        Self { raw, known }
    }

    /// The token exactly as seen on the wire.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn known(&self) -> Option<K> {
        self.known
    }

    pub fn is_known(&self) -> bool {
        self.known.is_some()
    }

    /// The resolved member, failing the same way validation does.
    pub fn value(&self) -> Result<K> {
        self.known.ok_or_else(|| Error::UnrecognizedEnumValue {
            name: K::NAME,
            value: self.raw.clone(),
            expected: K::VARIANTS,
        })
    }
}

impl<K: KnownValue> Validate for ApiEnum<K> {
    fn validate(&self) -> Result<()> {
        self.value().map(|_| ())
    }
}

impl<K: KnownValue> From<K> for ApiEnum<K> {
    fn from(known: K) -> Self {
        Self {
            raw: known.as_ref().to_string(),
            known: Some(known),
        }
    }
}

impl<K: KnownValue> PartialEq<K> for ApiEnum<K> {
    fn eq(&self, other: &K) -> bool {
        self.known.as_ref() == Some(other)
    }
}

impl<K> fmt::Display for ApiEnum<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<K> From<ApiEnum<K>> for Value {
    fn from(value: ApiEnum<K>) -> Self {
        Value::String(value.raw)
    }
}

// Output is always the raw token, never the resolved member.
impl<K> Serialize for ApiEnum<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, K: KnownValue> Deserialize<'de> for ApiEnum<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::parse)
    }
}
