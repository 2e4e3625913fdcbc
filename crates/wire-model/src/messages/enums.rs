use strum_macros::{AsRefStr, Display, EnumString, VariantNames};

use crate::api_enum::KnownValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl KnownValue for Role {
    const NAME: &'static str = "Role";
}

/// Why the model stopped producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, VariantNames)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    ToolUse,
    PauseTurn,
    Refusal,
}

impl KnownValue for StopReason {
    const NAME: &'static str = "StopReason";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, VariantNames)]
pub enum ImageMediaType {
    #[strum(serialize = "image/jpeg")]
    Jpeg,
    #[strum(serialize = "image/png")]
    Png,
    #[strum(serialize = "image/gif")]
    Gif,
    #[strum(serialize = "image/webp")]
    Webp,
}

impl KnownValue for ImageMediaType {
    const NAME: &'static str = "ImageMediaType";
}

/// Lifetime of a cache breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display, VariantNames)]
pub enum CacheTtl {
    #[strum(serialize = "5m")]
    FiveMinutes,
    #[strum(serialize = "1h")]
    OneHour,
}

impl KnownValue for CacheTtl {
    const NAME: &'static str = "CacheTtl";
}
