//! Concrete shapes built on the generic model layer.
//!
//! These cover the message exchange itself: content blocks, tool definitions,
//! tool choice, requests and responses. Every shape keeps unknown fields, and
//! every enum-valued field is an [`ApiEnum`](crate::ApiEnum), so a payload
//! from a newer server still decodes and re-encodes unchanged.
pub mod content;
pub mod enums;
pub mod message;
pub mod tool;

pub use content::{
    Base64ImageSource, CacheControl, ContentBlock, ImageBlock, ImageSource, TextBlock,
    ThinkingBlock, ToolResultBlock, ToolResultContent, ToolUseBlock, UrlImageSource,
};
pub use enums::{CacheTtl, ImageMediaType, Role, StopReason};
pub use message::{Message, MessageContent, MessageParam, Usage};
pub use tool::{
    InputSchema, Tool, ToolChoice, ToolChoiceAny, ToolChoiceAuto, ToolChoiceNone, ToolChoiceTool,
};
