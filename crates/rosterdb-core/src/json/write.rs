use crate::json::Json;
use std::fmt::Write;

/// Render a document as compact single-line text.
#[must_use]
pub fn to_string(json: &Json) -> String {
    let mut out = String::new();
    write_value(&mut out, json, None, 0);

    out
}

/// Render a document with two-space indentation.
#[must_use]
pub fn to_string_pretty(json: &Json) -> String {
    let mut out = String::new();
    write_value(&mut out, json, Some(2), 0);

    out
}

fn write_value(out: &mut String, json: &Json, indent: Option<usize>, depth: usize) {
    match json {
        Json::Null => out.push_str("null"),
        Json::Bool(true) => out.push_str("true"),
        Json::Bool(false) => out.push_str("false"),
        Json::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Json::Float(f) => write_float(out, *f),
        Json::Str(s) => write_string(out, s),
        Json::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, indent, depth + 1);
                write_value(out, item, indent, depth + 1);
            }
            newline(out, indent, depth);
            out.push(']');
        }
        Json::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline(out, indent, depth + 1);
                write_string(out, key);
                out.push(':');
                if indent.is_some() {
                    out.push(' ');
                }
                write_value(out, value, indent, depth + 1);
            }
            newline(out, indent, depth);
            out.push('}');
        }
    }
}

fn newline(out: &mut String, indent: Option<usize>, depth: usize) {
    if let Some(width) = indent {
        out.push('\n');
        for _ in 0..depth * width {
            out.push(' ');
        }
    }
}

// Debug formatting is the shortest form that parses back to the same value.
// Non-finite floats have no JSON spelling and degrade to null.
fn write_float(out: &mut String, f: f64) {
    if f.is_finite() {
        let _ = write!(out, "{f:?}");
    } else {
        out.push_str("null");
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    out.push_str(&escape(s));
    out.push('"');
}

/// Escape text for embedding in a quoted JSON string. Named escapes for the
/// common controls, `\u00XX` for the rest of C0.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }

    out
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{JsonMap, parse};
    use proptest::prelude::*;

    #[test]
    fn compact_rendering() {
        let mut map = JsonMap::new();
        map.insert("a", Json::Int(1));
        map.insert("b", Json::Array(vec![Json::Null, Json::Bool(true)]));

        assert_eq!(to_string(&Json::Object(map)), r#"{"a":1,"b":[null,true]}"#);
    }

    #[test]
    fn pretty_rendering() {
        let mut map = JsonMap::new();
        map.insert("a", Json::Int(1));

        assert_eq!(to_string_pretty(&Json::Object(map)), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn empty_containers_stay_inline() {
        assert_eq!(to_string_pretty(&Json::Array(vec![])), "[]");
        assert_eq!(to_string_pretty(&Json::Object(JsonMap::new())), "{}");
    }

    #[test]
    fn named_escapes() {
        assert_eq!(escape("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape("\n\r\t\u{0008}\u{000C}"), "\\n\\r\\t\\b\\f");
    }

    #[test]
    fn remaining_controls_use_unicode_form() {
        assert_eq!(escape("\u{0001}"), "\\u0001");
        assert_eq!(escape("\u{001F}"), "\\u001f");
    }

    #[test]
    fn floats_keep_their_point() {
        assert_eq!(to_string(&Json::Float(1.0)), "1.0");
        assert_eq!(to_string(&Json::Float(0.25)), "0.25");
        assert_eq!(to_string(&Json::Float(f64::NAN)), "null");
    }

    #[test]
    fn written_text_parses_back() {
        let doc = parse(r#"{"k": ["x\ny", 1.5, {"z": null}]}"#).unwrap();

        assert_eq!(parse(&to_string(&doc)).unwrap(), doc);
        assert_eq!(parse(&to_string_pretty(&doc)).unwrap(), doc);
    }

    proptest! {
        #[test]
        fn escaping_round_trips(s in "\\PC*") {
            let written = to_string(&Json::Str(s.clone()));
            prop_assert_eq!(parse(&written).unwrap(), Json::Str(s));
        }

        #[test]
        fn control_heavy_strings_round_trip(s in "[\\x00-\\x1f\"\\\\a-z]*") {
            let written = to_string(&Json::Str(s.clone()));
            prop_assert_eq!(parse(&written).unwrap(), Json::Str(s));
        }
    }
}
