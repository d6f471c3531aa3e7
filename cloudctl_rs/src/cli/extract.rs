//! Turn an API error body into one human-readable line.
//!
//! Strategies run in order and the first non-empty result wins:
//!
//! 1. XML `<errors><error>..</error>..</errors>`, joined with `" / "`
//! 2. JSON `[[field, message], ..]` (last element of the first entry) or `{"error": ..}`
//! 3. The raw body when the content type is `text/plain`
//! 4. The caller's default, or `"Internal server error."`
//!
//! Each decoder returns `None` on any parse problem; nothing here fails.

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde_json::Value;

use super::failure::ResponseBody;

pub const GENERIC_ERROR: &str = "Internal server error.";

/// Strategies 1-3.
pub fn extract(body: &ResponseBody) -> Option<String> {
    from_xml(&body.text)
        .or_else(|| from_json(&body.text))
        .or_else(|| from_plain_text(body))
}

/// Strategies 1-3, then `default`.
pub fn extract_or(body: &ResponseBody, default: impl FnOnce() -> String) -> String {
    extract(body).unwrap_or_else(default)
}

/// Strategies 1-3, then [`GENERIC_ERROR`].
pub fn extract_or_generic(body: &ResponseBody) -> String {
    extract_or(body, || GENERIC_ERROR.to_string())
}

/// Text of every `error` element under an `errors` root.
pub fn from_xml(text: &str) -> Option<String> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut in_error = 0usize;
    let mut current = String::new();
    let mut messages: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(tag)) => {
                let name = tag.name();
                if depth == 0 {
                    if saw_root || name.as_ref() != b"errors" {
                        return None;
                    }
                    saw_root = true;
                } else if name.as_ref() == b"error" {
                    if in_error == 0 {
                        current.clear();
                    }
                    in_error += 1;
                }
                depth += 1;
            }
            Ok(Event::End(tag)) => {
                depth = depth.checked_sub(1)?;
                if depth > 0 && tag.name().as_ref() == b"error" && in_error > 0 {
                    in_error -= 1;
                    if in_error == 0 {
                        push_message(&mut messages, &current);
                    }
                }
            }
            Ok(Event::Empty(tag)) => {
                // <errors/> has no messages; <error/> contributes nothing
                if depth == 0 {
                    if saw_root || tag.name().as_ref() != b"errors" {
                        return None;
                    }
                    saw_root = true;
                }
            }
            Ok(Event::Text(content)) => {
                if depth == 0 {
                    return None;
                }
                if in_error > 0 {
                    current.push_str(&content.unescape().ok()?);
                }
            }
            Ok(Event::CData(content)) => {
                if depth == 0 {
                    return None;
                }
                if in_error > 0 {
                    current.push_str(std::str::from_utf8(&content).ok()?);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::trace!("error body is not XML: {e}");
                return None;
            }
        }
    }

    if !saw_root || depth != 0 || messages.is_empty() {
        return None;
    }
    Some(messages.join(" / "))
}

fn push_message(messages: &mut Vec<String>, raw: &str) {
    let message = raw.trim();
    if !message.is_empty() {
        messages.push(message.to_string());
    }
}

/// `[[field, message], ..]` -> last element of the first entry; `{"error": msg}` -> msg.
pub fn from_json(text: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::trace!("error body is not JSON: {e}");
            return None;
        }
    };

    let message = match &value {
        Value::Array(entries) => match entries.first()? {
            Value::Array(pair) => pair.last()?,
            _ => return None,
        },
        Value::Object(map) => map.get("error")?,
        _ => return None,
    };

    scalar_to_string(message).filter(|m| !m.trim().is_empty())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// The body itself when the server labelled it `text/plain`.
pub fn from_plain_text(body: &ResponseBody) -> Option<String> {
    if !body.is_plain_text() {
        return None;
    }
    let text = body.text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str) -> ResponseBody {
        ResponseBody::new(text)
    }

    #[test]
    fn test_xml_single_error() {
        assert_eq!(
            extract(&body("<errors><error>X</error></errors>")).as_deref(),
            Some("X")
        );
    }

    #[test]
    fn test_xml_multiple_errors_joined() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<errors>
  <error>Name is too short</error>
  <error>Name &amp; stack must differ</error>
  <error><![CDATA[Region <eu> is full]]></error>
</errors>"#;
        assert_eq!(
            extract(&body(xml)).as_deref(),
            Some("Name is too short / Name & stack must differ / Region <eu> is full")
        );
    }

    #[test]
    fn test_xml_wins_even_with_json_content_type() {
        let b = body("<errors><error>X</error></errors>").with_content_type("application/json");
        assert_eq!(extract(&b).as_deref(), Some("X"));
    }

    #[test]
    fn test_xml_wrong_root_or_broken_falls_through() {
        assert_eq!(from_xml("<error>X</error>"), None);
        assert_eq!(from_xml("<errors><error>X</error>"), None);
        assert_eq!(from_xml("<errors><error>X</errors>"), None);
        assert_eq!(from_xml("<errors/>"), None);
        assert_eq!(from_xml("<errors><error> </error></errors>"), None);
        assert_eq!(from_xml("plain words"), None);
        assert_eq!(from_xml(r#"{"error":"nope"}"#), None);
    }

    #[test]
    fn test_json_array_shape() {
        assert_eq!(
            extract(&body(r#"[["base","bad thing"]]"#)).as_deref(),
            Some("bad thing")
        );
        assert_eq!(
            extract(&body(r#"[["name","is taken"],["base","ignored"]]"#)).as_deref(),
            Some("is taken")
        );
    }

    #[test]
    fn test_json_object_shape() {
        assert_eq!(extract(&body(r#"{"error":"nope"}"#)).as_deref(), Some("nope"));
        assert_eq!(extract(&body(r#"{"error":42}"#)).as_deref(), Some("42"));
    }

    #[test]
    fn test_json_other_shapes_fall_through() {
        assert_eq!(from_json(r#"{"message":"nope"}"#), None);
        assert_eq!(from_json(r#"["flat"]"#), None);
        assert_eq!(from_json("[]"), None);
        assert_eq!(from_json(r#"[[]]"#), None);
        assert_eq!(from_json(r#""just a string""#), None);
        assert_eq!(from_json(r#"{"error":""}"#), None);
        assert_eq!(from_json("{not json"), None);
    }

    #[test]
    fn test_plain_text_body() {
        let b = body("  Service unavailable\n").with_content_type("text/plain; charset=utf-8");
        assert_eq!(extract(&b).as_deref(), Some("Service unavailable"));

        let b = body("Service unavailable").with_content_type("text/html");
        assert_eq!(extract(&b), None);
    }

    #[test]
    fn test_defaults() {
        let b = body("<html>502 Bad Gateway</html>").with_content_type("text/html");
        assert_eq!(extract_or_generic(&b), GENERIC_ERROR);
        assert_eq!(extract_or(&b, || "App not found".to_string()), "App not found");
        assert_eq!(extract_or_generic(&body("")), "Internal server error.");
    }
}
