use anyhow::Result as AnyhowResult;
use serde_json::{json, Value};

use wire_model::messages::{
    Base64ImageSource, ContentBlock, ImageBlock, ImageMediaType, ImageSource, Message,
    MessageContent, MessageParam, Role, StopReason, TextBlock, ToolResultBlock, ToolResultContent,
};
use wire_model::{ApiEnum, ErrorKind, JsonOptions, Model, Union, Validate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn test_text_block_keeps_unknown_field_byte_for_byte() -> AnyhowResult<()> {
    init_tracing();
    let options = JsonOptions::default();
    let input = r#"{"type":"text","text":"hi","extra_field":42}"#;

    let block = TextBlock::from_json_str(input, &options)?;
    assert_eq!(block.text()?, "hi");
    assert_eq!(block.extra_fields(), ["extra_field"]);
    assert_eq!(block.to_json_string(&options)?, input);

    let block = ContentBlock::from_json_str(input, &options)?;
    assert!(matches!(block, ContentBlock::Text(_)));
    assert_eq!(options.render(&block)?, input);
    Ok(())
}

#[test]
fn test_unknown_numbers_keep_their_exact_text() -> AnyhowResult<()> {
    let options = JsonOptions::default();
    let input = concat!(
        r#"{"type":"text","text":"hi","big_id":123456789012345678901234567890,"#,
        r#""price":0.1000000000000000055511151231257827,"exp":1e2,"zero":-0}"#
    );

    let block = TextBlock::from_json_str(input, &options)?;
    block.validate()?;
    assert_eq!(block.extra_fields(), ["big_id", "price", "exp", "zero"]);
    assert_eq!(block.to_json_string(&options)?, input);

    let block = ContentBlock::from_json_str(input, &options)?;
    assert_eq!(options.render(&block)?, input);
    Ok(())
}

#[test]
fn test_round_trip_preserves_nested_unknown_keys_and_order() -> AnyhowResult<()> {
    init_tracing();
    let options = JsonOptions::default();
    let input = concat!(
        r#"{"id":"msg_9","type":"message","role":"assistant","content":["#,
        r#"{"type":"text","text":"ok","z_note":{"b":1,"a":2}},"#,
        r#"{"type":"server_tool_use","id":"srv_1","name":"web_search","input":{}}],"#,
        r#""model":"m","stop_reason":"end_turn","stop_sequence":null,"#,
        r#""usage":{"input_tokens":1,"output_tokens":2},"container":null}"#
    );

    let message = Message::from_json_str(input, &options)?;
    assert_eq!(message.to_json_string(&options)?, input);
    assert_eq!(message.extra_fields(), ["container"]);
    Ok(())
}

#[test]
fn test_newer_block_types_fail_resolution_but_survive_raw_access() -> AnyhowResult<()> {
    let message = Message::from_value(json!({
        "id": "msg_9",
        "type": "message",
        "role": "assistant",
        "content": [{"type": "server_tool_use", "id": "srv_1"}],
        "model": "m",
        "usage": {"input_tokens": 1, "output_tokens": 2}
    }))?;

    let err = message.content().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMatchingUnionVariant);

    let raw = message.get("content").and_then(Value::as_array).map(Vec::len);
    assert_eq!(raw, Some(1));

    let blocks: Vec<ContentBlock> = message
        .get("content")
        .and_then(Value::as_array)
        .map_or_else(Vec::new, |items| {
            items.iter().cloned().map(ContentBlock::resolve_or_unknown).collect()
        });
    assert!(blocks[0].is_unknown());
    assert_eq!(blocks[0].to_value(), json!({"type": "server_tool_use", "id": "srv_1"}));
    Ok(())
}

#[test]
fn test_open_enum_accepts_future_values() -> AnyhowResult<()> {
    let reason: ApiEnum<StopReason> = serde_json::from_value(json!("compaction"))?;
    assert_eq!(reason.raw(), "compaction");
    assert_eq!(reason.known(), None);
    assert_eq!(serde_json::to_value(&reason)?, json!("compaction"));

    let err = reason.validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedEnumValue);
    assert!(err.to_string().contains("end_turn"));

    let media: ApiEnum<ImageMediaType> = serde_json::from_value(json!("image/png"))?;
    assert_eq!(media.value()?, ImageMediaType::Png);
    Ok(())
}

#[test]
fn test_required_field_failures() -> AnyhowResult<()> {
    let block = TextBlock::from_value(json!({}))?;
    assert_eq!(block.text().unwrap_err().kind(), ErrorKind::MissingRequiredField);

    // `type` is checked first
    let err = block.validate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredField);
    assert!(err.to_string().contains("`type`"));

    let block = TextBlock::from_value(json!({"type": "text", "text": null}))?;
    assert_eq!(block.validate().unwrap_err().kind(), ErrorKind::RequiredFieldIsNull);

    let block = TextBlock::from_value(json!({"type": "text", "text": ["a"]}))?;
    assert_eq!(block.validate().unwrap_err().kind(), ErrorKind::TypeMismatch);
    Ok(())
}

#[test]
fn test_parse_failures_are_syntax_errors() {
    let options = JsonOptions::default();
    for text in [r#"{"type": "text""#, r#"{"type":"text"} trailing"#, ""] {
        let err = TextBlock::from_json_str(text, &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{text}");
    }

    let err = TextBlock::from_json_str("[1, 2]", &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn test_deserialization_never_validates() -> AnyhowResult<()> {
    let options = JsonOptions::default();
    let block = TextBlock::from_json_str(r#"{"type":"text","text":5}"#, &options)?;
    assert!(block.validate().is_err());
    assert_eq!(block.to_json_string(&options)?, r#"{"type":"text","text":5}"#);
    Ok(())
}

#[test]
fn test_conversation_turn() -> AnyhowResult<()> {
    init_tracing();
    let options = JsonOptions::pretty();

    let request = MessageParam::user(vec![
        ContentBlock::text("What is in this image?"),
        ContentBlock::Image(ImageBlock::new(Base64ImageSource::new(
            ImageMediaType::Jpeg,
            "aGk=",
        ))),
    ]);
    request.validate()?;

    let rendered = request.to_json_string(&options)?;
    assert!(rendered.contains("\n  \"role\": \"user\""));
    let reparsed = MessageParam::from_json_str(&rendered, &options)?;
    assert_eq!(reparsed, request);

    match reparsed.content()? {
        MessageContent::Blocks(blocks) => match &blocks[1] {
            ContentBlock::Image(image) => {
                assert!(matches!(image.source()?, ImageSource::Base64(_)))
            }
            other => panic!("Expected image block, got {other:?}"),
        },
        other => panic!("Expected blocks, got {other:?}"),
    }

    let result = MessageParam::user(vec![ContentBlock::from(
        ToolResultBlock::new("toolu_01").with_content("72F and sunny".to_string()),
    )]);
    result.validate()?;
    assert_eq!(result.role()?, Role::User);
    Ok(())
}

#[test]
fn test_tool_result_content_prefers_text_shorthand() -> AnyhowResult<()> {
    let content = ToolResultContent::resolve(&json!("done"))?;
    assert_eq!(content, ToolResultContent::Text("done".to_string()));

    let err = ToolResultContent::resolve(&json!(42)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMatchingUnionVariant);
    assert_eq!(err.attempts().len(), 2);
    Ok(())
}
