use serde_json::{Map, Value};

use super::enums::{CacheTtl, ImageMediaType};
use crate::api_enum::ApiEnum;
use crate::errors::Result;
use crate::model::Discriminated;
use crate::union::{resolve_list, Union, Variant};
use crate::validate::Validate;

crate::wire_model! {
    /// Marks a cache breakpoint on the block that carries it.
    pub struct CacheControl tagged("type" = "ephemeral") { "type", "ttl" }
}

impl CacheControl {
    pub fn ttl(&self) -> Result<Option<ApiEnum<CacheTtl>>> {
        self.bag.optional("ttl")
    }

    pub fn with_ttl(mut self, ttl: CacheTtl) -> Self {
        self.bag.set("ttl", ApiEnum::from(ttl));
        self
    }
}

impl Validate for CacheControl {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.ttl()?.validate()
    }
}

crate::wire_model! {
    pub struct TextBlock tagged("type" = "text") { "type", "text", "citations", "cache_control" }
}

impl TextBlock {
    pub fn new<S: Into<String>>(text: S) -> Self {
        let mut block = Self::default();
        block.set_text(text);
        block
    }

    pub fn text(&self) -> Result<String> {
        self.bag.required("text")
    }

    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        self.bag.set("text", text.into());
    }

    /// Citations are passed through untouched.
    pub fn citations(&self) -> Result<Option<Vec<Value>>> {
        self.bag.optional("citations")
    }

    pub fn cache_control(&self) -> Result<Option<CacheControl>> {
        self.bag.optional("cache_control")
    }

    pub fn with_cache_control(mut self, cache_control: CacheControl) -> Self {
        self.bag.set("cache_control", cache_control);
        self
    }
}

impl Validate for TextBlock {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.text()?;
        self.citations()?;
        self.cache_control()?.validate()
    }
}

crate::wire_model! {
    pub struct Base64ImageSource tagged("type" = "base64") { "type", "media_type", "data" }
}

impl Base64ImageSource {
    pub fn new<S: Into<String>>(media_type: ImageMediaType, data: S) -> Self {
        let mut source = Self::default();
        source.bag.set("media_type", ApiEnum::from(media_type));
        source.bag.set("data", data.into());
        source
    }

    pub fn media_type(&self) -> Result<ApiEnum<ImageMediaType>> {
        self.bag.required("media_type")
    }

    pub fn data(&self) -> Result<String> {
        self.bag.required("data")
    }
}

impl Validate for Base64ImageSource {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.media_type()?.validate()?;
        self.data()?;
        Ok(())
    }
}

crate::wire_model! {
    pub struct UrlImageSource tagged("type" = "url") { "type", "url" }
}

impl UrlImageSource {
    pub fn new<S: Into<String>>(url: S) -> Self {
        let mut source = Self::default();
        source.bag.set("url", url.into());
        source
    }

    pub fn url(&self) -> Result<String> {
        self.bag.required("url")
    }
}

impl Validate for UrlImageSource {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.url()?;
        Ok(())
    }
}

crate::wire_union! {
    pub enum ImageSource {
        Base64(Base64ImageSource),
        Url(UrlImageSource),
    }
}

impl Union for ImageSource {
    const NAME: &'static str = "ImageSource";

    fn variants() -> Vec<Variant<Self>> {
        vec![Variant::tagged(Self::Base64), Variant::tagged(Self::Url)]
    }

    fn unknown(raw: Value) -> Self {
        Self::Unknown(raw)
    }

    fn as_unknown(&self) -> Option<&Value> {
        match self {
            Self::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}

crate::wire_model! {
    pub struct ImageBlock tagged("type" = "image") { "type", "source", "cache_control" }
}

impl ImageBlock {
    pub fn new<S: Into<ImageSource>>(source: S) -> Self {
        let source: ImageSource = source.into();
        let mut block = Self::default();
        block.bag.set("source", source);
        block
    }

    pub fn source(&self) -> Result<ImageSource> {
        self.bag.required_with("source", ImageSource::resolve)
    }

    pub fn cache_control(&self) -> Result<Option<CacheControl>> {
        self.bag.optional("cache_control")
    }

    pub fn with_cache_control(mut self, cache_control: CacheControl) -> Self {
        self.bag.set("cache_control", cache_control);
        self
    }
}

impl Validate for ImageBlock {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.source()?.validate()?;
        self.cache_control()?.validate()
    }
}

crate::wire_model! {
    /// A tool invocation requested by the model.
    pub struct ToolUseBlock tagged("type" = "tool_use") {
        "type", "id", "name", "input", "cache_control"
    }
}

impl ToolUseBlock {
    pub fn new<I, N>(id: I, name: N, input: Map<String, Value>) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        let mut block = Self::default();
        block.bag.set("id", id.into());
        block.bag.set("name", name.into());
        block.bag.set("input", input);
        block
    }

    pub fn id(&self) -> Result<String> {
        self.bag.required("id")
    }

    pub fn name(&self) -> Result<String> {
        self.bag.required("name")
    }

    pub fn input(&self) -> Result<Map<String, Value>> {
        self.bag.required("input")
    }

    pub fn cache_control(&self) -> Result<Option<CacheControl>> {
        self.bag.optional("cache_control")
    }
}

impl Validate for ToolUseBlock {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.id()?;
        self.name()?;
        self.input()?;
        self.cache_control()?.validate()
    }
}

crate::wire_union! {
    /// Tool output: either a bare string or a list of content blocks.
    pub enum ToolResultContent {
        Text(String),
        Blocks(Vec<ContentBlock>),
    }
}

impl Union for ToolResultContent {
    const NAME: &'static str = "ToolResultContent";

    fn variants() -> Vec<Variant<Self>> {
        vec![
            Variant::value("Text", Self::Text),
            Variant::list("Blocks", Self::Blocks),
        ]
    }

    fn unknown(raw: Value) -> Self {
        Self::Unknown(raw)
    }

    fn as_unknown(&self) -> Option<&Value> {
        match self {
            Self::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}

crate::wire_model! {
    /// The outcome of a tool call, sent back by the client.
    pub struct ToolResultBlock tagged("type" = "tool_result") {
        "type", "tool_use_id", "content", "is_error", "cache_control"
    }
}

impl ToolResultBlock {
    pub fn new<S: Into<String>>(tool_use_id: S) -> Self {
        let mut block = Self::default();
        block.bag.set("tool_use_id", tool_use_id.into());
        block
    }

    pub fn tool_use_id(&self) -> Result<String> {
        self.bag.required("tool_use_id")
    }

    pub fn content(&self) -> Result<Option<ToolResultContent>> {
        self.bag.optional_with("content", ToolResultContent::resolve)
    }

    pub fn set_content(&mut self, content: Option<ToolResultContent>) {
        self.bag.set_optional("content", content);
    }

    pub fn with_content<C: Into<ToolResultContent>>(mut self, content: C) -> Self {
        self.set_content(Some(content.into()));
        self
    }

    pub fn is_error(&self) -> Result<Option<bool>> {
        self.bag.optional("is_error")
    }

    pub fn with_error(mut self, is_error: bool) -> Self {
        self.bag.set("is_error", is_error);
        self
    }

    pub fn cache_control(&self) -> Result<Option<CacheControl>> {
        self.bag.optional("cache_control")
    }
}

impl Validate for ToolResultBlock {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.tool_use_id()?;
        self.content()?.validate()?;
        self.is_error()?;
        self.cache_control()?.validate()
    }
}

crate::wire_model! {
    pub struct ThinkingBlock tagged("type" = "thinking") { "type", "thinking", "signature" }
}

impl ThinkingBlock {
    pub fn thinking(&self) -> Result<String> {
        self.bag.required("thinking")
    }

    pub fn signature(&self) -> Result<String> {
        self.bag.required("signature")
    }
}

impl Validate for ThinkingBlock {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.thinking()?;
        self.signature()?;
        Ok(())
    }
}

crate::wire_union! {
    /// Content passed to or from the model
    pub enum ContentBlock {
        Text(TextBlock),
        Image(ImageBlock),
        ToolUse(ToolUseBlock),
        ToolResult(ToolResultBlock),
        Thinking(ThinkingBlock),
    }
}

impl Union for ContentBlock {
    const NAME: &'static str = "ContentBlock";

    fn variants() -> Vec<Variant<Self>> {
        vec![
            Variant::tagged(Self::Text),
            Variant::tagged(Self::Image),
            Variant::tagged(Self::ToolUse),
            Variant::tagged(Self::ToolResult),
            Variant::tagged(Self::Thinking),
        ]
    }

    fn unknown(raw: Value) -> Self {
        Self::Unknown(raw)
    }

    fn as_unknown(&self) -> Option<&Value> {
        match self {
            Self::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}

impl ContentBlock {
    pub fn text<S: Into<String>>(text: S) -> Self {
        ContentBlock::Text(TextBlock::new(text))
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            ContentBlock::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_tool_use(&self) -> Option<&ToolUseBlock> {
        match self {
            ContentBlock::ToolUse(tool_use) => Some(tool_use),
            _ => None,
        }
    }

    pub fn as_tool_result(&self) -> Option<&ToolResultBlock> {
        match self {
            ContentBlock::ToolResult(tool_result) => Some(tool_result),
            _ => None,
        }
    }

    /// Decode a JSON array of blocks.
    pub fn resolve_all(value: &Value) -> Result<Vec<ContentBlock>> {
        resolve_list(value)
    }
}
