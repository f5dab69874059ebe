use crate::json::{Json, JsonMap};
use thiserror::Error as ThisError;

///
/// ParseError
///
/// Fatal for the whole document; the loader never recovers partial trees.
/// Positions are byte offsets into the source text.
///

#[derive(Debug, ThisError, PartialEq, Eq)]
#[remain::sorted]
pub enum ParseError {
    #[error("invalid escape '\\{escape}' at byte {pos}")]
    BadEscape { pos: usize, escape: char },

    #[error("invalid number '{text}' at byte {pos}")]
    BadNumber { pos: usize, text: String },

    #[error("invalid unicode escape at byte {pos}")]
    BadUnicode { pos: usize },

    #[error("trailing characters at byte {pos}")]
    Trailing { pos: usize },

    #[error("expected {expected} at byte {pos}, found '{found}'")]
    Unexpected {
        pos: usize,
        expected: &'static str,
        found: char,
    },

    #[error("unexpected end of input at byte {pos}")]
    UnexpectedEnd { pos: usize },
}

/// Parse one complete JSON document.
pub fn parse(text: &str) -> Result<Json, ParseError> {
    let mut parser = Parser { src: text, pos: 0 };

    parser.skip_ws();
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos < parser.src.len() {
        return Err(ParseError::Trailing { pos: parser.pos });
    }

    Ok(value)
}

///
/// Parser
///

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();

        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, want: char, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(ParseError::Unexpected {
                pos: self.pos,
                expected,
                found: c,
            }),
            None => Err(ParseError::UnexpectedEnd { pos: self.pos }),
        }
    }

    fn eat(&mut self, lit: &'static str) -> bool {
        if self.src[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    fn value(&mut self) -> Result<Json, ParseError> {
        match self.peek() {
            Some('{') => self.object(),
            Some('[') => self.array(),
            Some('"') => self.string().map(Json::Str),
            Some('t' | 'f' | 'n') => self.literal(),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => self.number(),
            Some(c) => Err(ParseError::Unexpected {
                pos: self.pos,
                expected: "a value",
                found: c,
            }),
            None => Err(ParseError::UnexpectedEnd { pos: self.pos }),
        }
    }

    fn literal(&mut self) -> Result<Json, ParseError> {
        if self.eat("true") {
            Ok(Json::Bool(true))
        } else if self.eat("false") {
            Ok(Json::Bool(false))
        } else if self.eat("null") {
            Ok(Json::Null)
        } else {
            // peek() is Some here, the dispatcher checked.
            let found = self.peek().unwrap_or('\0');
            Err(ParseError::Unexpected {
                pos: self.pos,
                expected: "a value",
                found,
            })
        }
    }

    fn object(&mut self) -> Result<Json, ParseError> {
        self.expect('{', "'{'")?;
        let mut map = JsonMap::new();

        self.skip_ws();
        if self.peek() == Some('}') {
            self.bump();
            return Ok(Json::Object(map));
        }

        loop {
            self.skip_ws();
            let key = self.string()?;
            self.skip_ws();
            self.expect(':', "':'")?;
            self.skip_ws();
            let value = self.value()?;
            map.insert(key, value);
            self.skip_ws();

            match self.bump() {
                Some(',') => {}
                Some('}') => return Ok(Json::Object(map)),
                Some(c) => {
                    return Err(ParseError::Unexpected {
                        pos: self.pos - c.len_utf8(),
                        expected: "',' or '}'",
                        found: c,
                    });
                }
                None => return Err(ParseError::UnexpectedEnd { pos: self.pos }),
            }
        }
    }

    fn array(&mut self) -> Result<Json, ParseError> {
        self.expect('[', "'['")?;
        let mut items = Vec::new();

        self.skip_ws();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(Json::Array(items));
        }

        loop {
            self.skip_ws();
            items.push(self.value()?);
            self.skip_ws();

            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(Json::Array(items)),
                Some(c) => {
                    return Err(ParseError::Unexpected {
                        pos: self.pos - c.len_utf8(),
                        expected: "',' or ']'",
                        found: c,
                    });
                }
                None => return Err(ParseError::UnexpectedEnd { pos: self.pos }),
            }
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        self.expect('"', "'\"'")?;
        let mut out = String::new();

        loop {
            let start = self.pos;
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => {
                    let escape_pos = self.pos;
                    match self.bump() {
                        Some('"') => out.push('"'),
                        Some('\\') => out.push('\\'),
                        Some('/') => out.push('/'),
                        Some('b') => out.push('\u{0008}'),
                        Some('f') => out.push('\u{000C}'),
                        Some('n') => out.push('\n'),
                        Some('r') => out.push('\r'),
                        Some('t') => out.push('\t'),
                        Some('u') => out.push(self.unicode_escape()?),
                        Some(c) => {
                            return Err(ParseError::BadEscape {
                                pos: escape_pos,
                                escape: c,
                            });
                        }
                        None => return Err(ParseError::UnexpectedEnd { pos: self.pos }),
                    }
                }
                Some(c) => out.push(c),
                None => return Err(ParseError::UnexpectedEnd { pos: start }),
            }
        }
    }

    /// Called after `\u`. Handles surrogate pairs spelled as two escapes.
    fn unicode_escape(&mut self) -> Result<char, ParseError> {
        let unit = self.hex4()?;

        if (0xD800..=0xDBFF).contains(&unit) {
            let pos = self.pos;
            if !self.eat("\\u") {
                return Err(ParseError::BadUnicode { pos });
            }
            let low = self.hex4()?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(ParseError::BadUnicode { pos });
            }
            let code = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
            return char::from_u32(code).ok_or(ParseError::BadUnicode { pos });
        }
        if (0xDC00..=0xDFFF).contains(&unit) {
            return Err(ParseError::BadUnicode { pos: self.pos });
        }

        char::from_u32(u32::from(unit)).ok_or(ParseError::BadUnicode { pos: self.pos })
    }

    fn hex4(&mut self) -> Result<u16, ParseError> {
        let start = self.pos;
        let Some(hex) = self.src.get(start..start + 4) else {
            return Err(if start + 4 > self.src.len() {
                ParseError::UnexpectedEnd { pos: self.pos }
            } else {
                ParseError::BadUnicode { pos: start }
            });
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseError::BadUnicode { pos: start });
        }
        let unit =
            u16::from_str_radix(hex, 16).map_err(|_| ParseError::BadUnicode { pos: start })?;
        self.pos = start + 4;

        Ok(unit)
    }

    fn number(&mut self) -> Result<Json, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E') {
                self.bump();
            } else {
                break;
            }
        }
        let text = &self.src[start..self.pos];

        if text.contains(['.', 'e', 'E']) {
            text.parse::<f64>().map(Json::Float).map_err(|_| {
                ParseError::BadNumber {
                    pos: start,
                    text: text.to_string(),
                }
            })
        } else {
            text.parse::<i64>().map(Json::Int).map_err(|_| {
                ParseError::BadNumber {
                    pos: start,
                    text: text.to_string(),
                }
            })
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(parse("null").unwrap(), Json::Null);
        assert_eq!(parse("true").unwrap(), Json::Bool(true));
        assert_eq!(parse("false").unwrap(), Json::Bool(false));
        assert_eq!(parse("42").unwrap(), Json::Int(42));
        assert_eq!(parse("-7").unwrap(), Json::Int(-7));
        assert_eq!(parse("\"hi\"").unwrap(), Json::Str("hi".to_string()));
    }

    #[test]
    fn fraction_or_exponent_becomes_float() {
        assert_eq!(parse("1.5").unwrap(), Json::Float(1.5));
        assert_eq!(parse("1e3").unwrap(), Json::Float(1000.0));
        assert_eq!(parse("2E-1").unwrap(), Json::Float(0.2));
        assert_eq!(parse("10").unwrap(), Json::Int(10));
    }

    #[test]
    fn parses_nested_structures() {
        let doc = parse(r#"{"a": [1, {"b": null}, "x"], "c": {"d": false}}"#).unwrap();

        let root = doc.as_object().unwrap();
        let a = root.get("a").unwrap().as_array().unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a[0], Json::Int(1));
        assert!(a[1].as_object().unwrap().get("b").unwrap().is_null());
        assert_eq!(
            root.get("c").unwrap().as_object().unwrap().get("d"),
            Some(&Json::Bool(false))
        );
    }

    #[test]
    fn object_keys_keep_document_order() {
        let doc = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = doc.as_object().unwrap().keys().collect();

        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn standard_escapes() {
        let doc = parse(r#""line\nbreak\ttab \"quoted\" back\\slash \b\f\r""#).unwrap();

        assert_eq!(
            doc,
            Json::Str("line\nbreak\ttab \"quoted\" back\\slash \u{0008}\u{000C}\r".to_string())
        );
    }

    #[test]
    fn unicode_escapes() {
        assert_eq!(parse(r#""A""#).unwrap(), Json::Str("A".to_string()));
        assert_eq!(
            parse(r#""élève""#).unwrap(),
            Json::Str("élève".to_string())
        );
        // Surrogate pair for U+1F600.
        assert_eq!(
            parse(r#""😀""#).unwrap(),
            Json::Str("\u{1F600}".to_string())
        );
    }

    #[test]
    fn lone_surrogate_is_rejected() {
        assert!(matches!(
            parse(r#""\ud83d""#),
            Err(ParseError::BadUnicode { .. })
        ));
    }

    #[test]
    fn bad_escape_is_rejected() {
        assert!(matches!(
            parse(r#""\q""#),
            Err(ParseError::BadEscape { escape: 'q', .. })
        ));
    }

    #[test]
    fn unterminated_string_is_rejected() {
        assert!(matches!(
            parse("\"abc"),
            Err(ParseError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn trailing_input_is_rejected() {
        assert_eq!(parse("42 junk"), Err(ParseError::Trailing { pos: 3 }));
    }

    #[test]
    fn errors_carry_byte_offsets() {
        assert_eq!(
            parse("[1, x]"),
            Err(ParseError::Unexpected {
                pos: 4,
                expected: "a value",
                found: 'x',
            })
        );
    }

    #[test]
    fn malformed_number_is_rejected() {
        assert!(matches!(
            parse("1.2.3"),
            Err(ParseError::BadNumber { .. })
        ));
        assert!(matches!(parse("--5"), Err(ParseError::BadNumber { .. })));
    }

    #[test]
    fn missing_colon_is_rejected() {
        assert!(matches!(
            parse(r#"{"a" 1}"#),
            Err(ParseError::Unexpected { expected: "':'", .. })
        ));
    }

    #[test]
    fn big_integers_stay_wide() {
        assert_eq!(
            parse("9223372036854775807").unwrap(),
            Json::Int(i64::MAX)
        );
    }

    #[test]
    fn whitespace_everywhere() {
        let doc = parse(" \t\n{ \"a\" :\n[ 1 , 2 ] }\r\n").unwrap();

        assert_eq!(
            doc.as_object().unwrap().get("a").unwrap().as_array().unwrap(),
            &[Json::Int(1), Json::Int(2)]
        );
    }
}
