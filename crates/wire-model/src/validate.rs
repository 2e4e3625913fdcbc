//! Explicit, on-demand structural validation.
//!
//! Nothing here runs during construction or deserialization. A caller asks
//! for it, and the walk stops at the first violation it finds.

use serde_json::{Map, Value};

use crate::errors::Result;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(T::validate)
    }
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(T::validate)
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> Result<()> {
        (**self).validate()
    }
}

macro_rules! accept_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate(&self) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

// Presence and shape were already checked by the accessor that produced them.
accept_scalar!(String, bool, i32, i64, u32, u64, f64, Value, Map<String, Value>);
