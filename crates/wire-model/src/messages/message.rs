use serde_json::Value;

use super::content::{ContentBlock, ToolUseBlock};
use super::enums::{Role, StopReason};
use crate::api_enum::ApiEnum;
use crate::errors::{Error, Result};
use crate::model::Discriminated;
use crate::union::{Union, Variant};
use crate::validate::Validate;

crate::wire_union! {
    /// Message content: shorthand text or a list of blocks.
    pub enum MessageContent {
        Text(String),
        Blocks(Vec<ContentBlock>),
    }
}

impl Union for MessageContent {
    const NAME: &'static str = "MessageContent";

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
    /// A message sent as part of a request.
    pub struct MessageParam { "role", "content" }
}

impl MessageParam {
    pub fn new<C: Into<MessageContent>>(role: Role, content: C) -> Self {
        let content: MessageContent = content.into();
        let mut message = Self::default();
        message.bag.set("role", ApiEnum::from(role));
        message.bag.set("content", content);
        message
    }

    /// Create a new user message
    pub fn user<C: Into<MessageContent>>(content: C) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant message
    pub fn assistant<C: Into<MessageContent>>(content: C) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Result<ApiEnum<Role>> {
        self.bag.required("role")
    }

    pub fn content(&self) -> Result<MessageContent> {
        self.bag.required_with("content", MessageContent::resolve)
    }

    /// Append a block, promoting shorthand text content to a block list.
    pub fn with_block<B: Into<ContentBlock>>(mut self, block: B) -> Result<Self> {
        let mut blocks = match self.content()? {
            MessageContent::Text(text) => vec![ContentBlock::text(text)],
            MessageContent::Blocks(blocks) => blocks,
            MessageContent::Unknown(_) => {
                return Err(Error::UnknownVariantValidated {
                    union: MessageContent::NAME,
                })
            }
        };
        blocks.push(block.into());
        self.bag.set("content", blocks);
        Ok(self)
    }
}

impl Validate for MessageParam {
    fn validate(&self) -> Result<()> {
        self.role()?.validate()?;
        self.content()?.validate()
    }
}

crate::wire_model! {
    /// Token accounting for one response.
    pub struct Usage {
        "input_tokens",
        "output_tokens",
        "cache_creation_input_tokens",
        "cache_read_input_tokens",
    }
}

impl Usage {
    pub fn new(input_tokens: i64, output_tokens: i64) -> Self {
        let mut usage = Self::default();
        usage.bag.set("input_tokens", input_tokens);
        usage.bag.set("output_tokens", output_tokens);
        usage
    }

    pub fn input_tokens(&self) -> Result<i64> {
        self.bag.required("input_tokens")
    }

    pub fn output_tokens(&self) -> Result<i64> {
        self.bag.required("output_tokens")
    }

    pub fn cache_creation_input_tokens(&self) -> Result<Option<i64>> {
        self.bag.optional("cache_creation_input_tokens")
    }

    pub fn cache_read_input_tokens(&self) -> Result<Option<i64>> {
        self.bag.optional("cache_read_input_tokens")
    }

    pub fn total_tokens(&self) -> Result<i64> {
        let input_tokens = self.input_tokens()?;
        let output_tokens = self.output_tokens()?;
        input_tokens.checked_add(output_tokens).ok_or_else(|| {
            Error::mismatch(
                "output_tokens",
                "i64",
                format!("{input_tokens} + {output_tokens} overflows the token total"),
            )
        })
    }
}

impl Validate for Usage {
    fn validate(&self) -> Result<()> {
        self.input_tokens()?;
        self.output_tokens()?;
        self.cache_creation_input_tokens()?;
        self.cache_read_input_tokens()?;
        Ok(())
    }
}

crate::wire_model! {
    /// A complete response message from the model.
    pub struct Message tagged("type" = "message") {
        "id",
        "type",
        "role",
        "content",
        "model",
        "stop_reason",
        "stop_sequence",
        "usage",
    }
}

impl Message {
    pub fn id(&self) -> Result<String> {
        self.bag.required("id")
    }

    pub fn role(&self) -> Result<ApiEnum<Role>> {
        self.bag.required("role")
    }

    pub fn content(&self) -> Result<Vec<ContentBlock>> {
        self.bag.required_with("content", ContentBlock::resolve_all)
    }

    pub fn model(&self) -> Result<String> {
        self.bag.required("model")
    }

    pub fn stop_reason(&self) -> Result<Option<ApiEnum<StopReason>>> {
        self.bag.optional("stop_reason")
    }

    pub fn stop_sequence(&self) -> Result<Option<String>> {
        self.bag.optional("stop_sequence")
    }

    pub fn usage(&self) -> Result<Usage> {
        self.bag.required("usage")
    }

    /// Text of every text block, joined by newlines.
    pub fn text(&self) -> Result<String> {
        let mut texts = Vec::new();
        for block in self.content()? {
            if let ContentBlock::Text(text) = block {
                texts.push(text.text()?);
            }
        }
        Ok(texts.join("\n"))
    }

    pub fn tool_uses(&self) -> Result<Vec<ToolUseBlock>> {
        Ok(self
            .content()?
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse(tool_use) => Some(tool_use),
                _ => None,
            })
            .collect())
    }

    /// Turn the response into a request-side message for the next turn.
    pub fn to_param(&self) -> Result<MessageParam> {
        let mut param = MessageParam::default();
        param.bag.set("role", self.role()?);
        param.bag.set("content", self.content()?);
        Ok(param)
    }
}

impl Validate for Message {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.id()?;
        self.role()?.validate()?;
        self.content()?.validate()?;
        self.model()?;
        // newer stop reasons are expected; only the shape is checked
        self.stop_reason()?;
        self.stop_sequence()?;
        self.usage()?.validate()
    }
}
