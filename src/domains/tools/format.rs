//! Pure result-formatting helpers.
//!
//! Every function here is a deterministic mapping from a parsed payload to a
//! display string: identical input always yields byte-identical output. The
//! per-family formatters in `definitions/` build on these.

use serde_json::Value;

use super::error::ToolError;

/// Parse `text` as JSON, mapping failure to a `Parse` error named `what`.
pub fn parse_json(text: &str, what: &str) -> Result<Value, ToolError> {
    serde_json::from_str(text).map_err(|_| ToolError::parse(what))
}

/// Render a JSON value for display: strings without quotes, scalars as-is,
/// null as "null", and composite values as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Look up `key` in a record and render it for a labeled field block.
/// Missing or null fields render as "unknown".
pub fn field_text(record: &Value, key: &str) -> String {
    match record.get(key) {
        None | Some(Value::Null) => "unknown".to_string(),
        Some(value) => value_text(value),
    }
}

/// Render records as labeled field blocks in declared order, each block
/// terminated by a `---` separator line.
pub fn render_blocks(records: &[Value], fields: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();
    for record in records {
        for (label, key) in fields {
            lines.push(format!("{}: {}", label, field_text(record, key)));
        }
        lines.push("---".to_string());
    }
    lines.join("\n")
}

/// Render records as bulleted blocks: the first field gets a `- ` bullet,
/// the rest are indented beneath it, and each block ends with `---`.
pub fn render_nested_blocks(records: &[Value], fields: &[(&str, &str)]) -> String {
    let mut lines = Vec::new();
    for record in records {
        for (i, (label, key)) in fields.iter().enumerate() {
            let prefix = if i == 0 { "- " } else { "  " };
            lines.push(format!("{}{}: {}", prefix, label, field_text(record, key)));
        }
        lines.push("---".to_string());
    }
    lines.join("\n")
}

/// Render status tags as a parenthesized, comma-joined suffix:
/// `["DEFAULT", "PREVIEW"]` becomes ` (DEFAULT, PREVIEW)`; no tags, no suffix.
pub fn tag_suffix(tags: &[&str]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!(" ({})", tags.join(", "))
    }
}

/// Re-serialize JSON text with stable 2-space indentation; if the text does
/// not parse, return it unmodified.
pub fn pretty_json_or_raw(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_failure_names_payload() {
        let err = parse_json("not json", "Azure CLI output").unwrap_err();
        assert_eq!(err.to_string(), "Error parsing Azure CLI output");
    }

    #[test]
    fn test_field_text_variants() {
        let record = json!({
            "name": "aks1",
            "count": 3,
            "preview": false,
            "missing": null,
            "nested": {"a": 1}
        });
        assert_eq!(field_text(&record, "name"), "aks1");
        assert_eq!(field_text(&record, "count"), "3");
        assert_eq!(field_text(&record, "preview"), "false");
        assert_eq!(field_text(&record, "missing"), "unknown");
        assert_eq!(field_text(&record, "absent"), "unknown");
        assert_eq!(field_text(&record, "nested"), "{\"a\":1}");
    }

    #[test]
    fn test_render_blocks_order_and_separator() {
        let records = vec![
            json!({"name": "a", "location": "eastus"}),
            json!({"name": "b", "location": "westus"}),
        ];
        let text = render_blocks(&records, &[("Name", "name"), ("Location", "location")]);
        assert_eq!(
            text,
            "Name: a\nLocation: eastus\n---\nName: b\nLocation: westus\n---"
        );
    }

    #[test]
    fn test_render_blocks_empty_is_empty_string() {
        // Callers are responsible for the "none found" sentence.
        assert_eq!(render_blocks(&[], &[("Name", "name")]), "");
    }

    #[test]
    fn test_render_nested_blocks_bullets_first_field() {
        let records = vec![json!({"name": "pool1", "mode": "User"})];
        let text = render_nested_blocks(&records, &[("Name", "name"), ("Mode", "mode")]);
        assert_eq!(text, "- Name: pool1\n  Mode: User\n---");
    }

    #[test]
    fn test_tag_suffix() {
        assert_eq!(tag_suffix(&[]), "");
        assert_eq!(tag_suffix(&["PREVIEW"]), " (PREVIEW)");
        assert_eq!(tag_suffix(&["DEFAULT", "PREVIEW"]), " (DEFAULT, PREVIEW)");
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let pretty = pretty_json_or_raw(r#"{"b":1,"a":[2,3]}"#);
        assert!(pretty.contains("\n  \"a\": ["));
    }

    #[test]
    fn test_pretty_json_malformed_returns_raw_unchanged() {
        let raw = "0 issues found\nnothing to report";
        assert_eq!(pretty_json_or_raw(raw), raw);
    }

    #[test]
    fn test_pretty_json_is_deterministic() {
        let a = pretty_json_or_raw(r#"{"z":1,"a":2}"#);
        let b = pretty_json_or_raw(r#"{"z":1,"a":2}"#);
        assert_eq!(a, b);
    }
}
