//! Model layer for a JSON wire protocol whose schema grows independently of
//! its clients.
//!
//! - [`PropertyBag`] keeps every field of an object, known or not, in order.
//! - [`Model`] types expose typed accessors as views over that bag.
//! - [`ApiEnum`] holds string-coded values that may be newer than this build.
//! - [`Union`] types resolve a value into one declared shape, by discriminator
//!   or by ordered trial, and can retain unclassified payloads verbatim.
//! - [`Validate`] is explicit and never runs implicitly during decoding.
pub mod api_enum;
pub mod bag;
pub mod errors;
pub mod messages;
pub mod model;
pub mod options;
pub mod settings;
pub mod union;
pub mod validate;

pub use api_enum::{ApiEnum, KnownValue};
pub use bag::PropertyBag;
pub use errors::{Error, ErrorKind, Result, VariantFailure};
pub use model::{Discriminated, Model};
pub use options::JsonOptions;
pub use settings::Settings;
pub use union::{resolve_list, Resolver, Strategy, Union, Variant};
pub use validate::Validate;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
