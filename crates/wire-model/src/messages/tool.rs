use serde_json::{Map, Value};

use super::content::CacheControl;
use crate::errors::Result;
use crate::model::Discriminated;
use crate::union::{Union, Variant};
use crate::validate::Validate;

crate::wire_model! {
    /// JSON Schema for a tool's parameters. Only the top-level shape is
    /// interpreted; the schema body is passed through as-is.
    pub struct InputSchema tagged("type" = "object") { "type", "properties", "required" }
}

impl InputSchema {
    pub fn new(properties: Map<String, Value>) -> Self {
        let mut schema = Self::default();
        schema.bag.set("properties", properties);
        schema
    }

    pub fn with_required<S: Into<String>>(mut self, required: Vec<S>) -> Self {
        let required: Vec<String> = required.into_iter().map(Into::into).collect();
        self.bag.set("required", required);
        self
    }

    pub fn properties(&self) -> Result<Option<Map<String, Value>>> {
        self.bag.optional("properties")
    }

    pub fn required(&self) -> Result<Option<Vec<String>>> {
        self.bag.optional("required")
    }
}

impl Validate for InputSchema {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.properties()?;
        self.required()?;
        Ok(())
    }
}

crate::wire_model! {
    /// A tool that can be used by a model.
    pub struct Tool { "name", "description", "input_schema", "cache_control" }
}

impl Tool {
    /// Create a new tool with the given name and parameter schema
    pub fn new<N: Into<String>>(name: N, input_schema: InputSchema) -> Self {
        let mut tool = Self::default();
        tool.bag.set("name", name.into());
        tool.bag.set("input_schema", input_schema);
        tool
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.bag.set("description", description.into());
        self
    }

    pub fn name(&self) -> Result<String> {
        self.bag.required("name")
    }

    pub fn description(&self) -> Result<Option<String>> {
        self.bag.optional("description")
    }

    pub fn input_schema(&self) -> Result<InputSchema> {
        self.bag.required("input_schema")
    }

    pub fn cache_control(&self) -> Result<Option<CacheControl>> {
        self.bag.optional("cache_control")
    }
}

impl Validate for Tool {
    fn validate(&self) -> Result<()> {
        self.name()?;
        self.description()?;
        self.input_schema()?.validate()?;
        self.cache_control()?.validate()
    }
}

crate::wire_model! {
    /// The model decides whether to call a tool.
    pub struct ToolChoiceAuto tagged("type" = "auto") { "type", "disable_parallel_tool_use" }
}

crate::wire_model! {
    /// The model must call some tool.
    pub struct ToolChoiceAny tagged("type" = "any") { "type", "disable_parallel_tool_use" }
}

crate::wire_model! {
    /// The model must call the named tool.
    pub struct ToolChoiceTool tagged("type" = "tool") {
        "type", "name", "disable_parallel_tool_use"
    }
}

crate::wire_model! {
    /// The model must not call any tool.
    pub struct ToolChoiceNone tagged("type" = "none") { "type" }
}

impl ToolChoiceAuto {
    pub fn disable_parallel_tool_use(&self) -> Result<Option<bool>> {
        self.bag.optional("disable_parallel_tool_use")
    }
}

impl ToolChoiceAny {
    pub fn disable_parallel_tool_use(&self) -> Result<Option<bool>> {
        self.bag.optional("disable_parallel_tool_use")
    }
}

impl ToolChoiceTool {
    pub fn new<S: Into<String>>(name: S) -> Self {
        let mut choice = Self::default();
        choice.bag.set("name", name.into());
        choice
    }

    pub fn name(&self) -> Result<String> {
        self.bag.required("name")
    }

    pub fn disable_parallel_tool_use(&self) -> Result<Option<bool>> {
        self.bag.optional("disable_parallel_tool_use")
    }
}

impl Validate for ToolChoiceAuto {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.disable_parallel_tool_use()?;
        Ok(())
    }
}

impl Validate for ToolChoiceAny {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.disable_parallel_tool_use()?;
        Ok(())
    }
}

impl Validate for ToolChoiceTool {
    fn validate(&self) -> Result<()> {
        self.check_tag()?;
        self.name()?;
        self.disable_parallel_tool_use()?;
        Ok(())
    }
}

impl Validate for ToolChoiceNone {
    fn validate(&self) -> Result<()> {
        self.check_tag()
    }
}

crate::wire_union! {
    /// How the model should use the provided tools.
    pub enum ToolChoice {
        Auto(ToolChoiceAuto),
        Any(ToolChoiceAny),
        Tool(ToolChoiceTool),
        None(ToolChoiceNone),
    }
}

impl Union for ToolChoice {
    const NAME: &'static str = "ToolChoice";

    fn variants() -> Vec<Variant<Self>> {
        vec![
            Variant::tagged(Self::Auto),
            Variant::tagged(Self::Any),
            Variant::tagged(Self::Tool),
            Variant::tagged(Self::None),
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
