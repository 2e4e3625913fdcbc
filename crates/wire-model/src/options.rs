//! Explicit serializer conventions.
//!
//! Every parse and render call takes a [`JsonOptions`] rather than reading a
//! process-wide default, so two callers with different conventions never
//! interfere.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOptions {
    /// Emit indented, multi-line JSON instead of the compact wire form.
    #[serde(default)]
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: default_indent(),
        }
    }
}

impl JsonOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }

    /// Parse UTF-8 JSON text into a value tree. Trailing non-whitespace
    /// input is rejected.
    pub fn parse(&self, text: &str) -> Result<Value> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        let value = Value::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(value)
    }

    /// Render any serializable value using these conventions.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if !self.pretty {
            return Ok(serde_json::to_string(value)?);
        }

        let indent = " ".repeat(self.indent);
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
        value.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

fn default_indent() -> usize {
    2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_compact_render_preserves_key_order() {
        let value = JsonOptions::default()
            .parse(r#"{"z":1,"a":{"y":true,"b":null}}"#)
            .unwrap();
        let rendered = JsonOptions::default().render(&value).unwrap();
        assert_eq!(rendered, r#"{"z":1,"a":{"y":true,"b":null}}"#);
    }

    #[test]
    fn test_pretty_render_uses_indent() {
        let options = JsonOptions {
            pretty: true,
            indent: 4,
        };
        let rendered = options.render(&json!({"a": 1})).unwrap();
        assert_eq!(rendered, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_parse_rejects_trailing_input() {
        let err = JsonOptions::default().parse(r#"{"a":1} x"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_deserialize_defaults() {
        let options: JsonOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options, JsonOptions::default());
    }
}
