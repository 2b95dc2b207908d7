//! Recursive-descent reader for the PHP serialization grammar.
//!
//! Strings carry an explicit byte length, so delimiters inside string
//! payloads never need escaping and are read verbatim.

use std::str::FromStr;

use thiserror::Error;

use super::value::{PhpKey, PhpValue};
use crate::config::MAX_DECODE_DEPTH;

/// What went wrong while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("expected '{expected}', found '{found}'")]
    UnexpectedByte { expected: char, found: char },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("invalid length '{0}'")]
    InvalidLength(String),

    #[error("unknown type marker '{0}'")]
    UnknownType(char),

    #[error("array keys must be integers or strings, found '{0}'")]
    InvalidKey(char),

    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),
}

/// Malformed or truncated serialized input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct DecodeError {
    /// Byte offset into the input where decoding failed.
    pub offset: usize,
    pub kind: DecodeErrorKind,
}

/// Decode a PHP-serialized string.
///
/// Decoding stops after the first complete value; anything after it is ignored.
///
/// # Examples
/// ```
/// use wxr_parser::php::{unserialize, PhpValue};
///
/// let value = unserialize(r#"a:2:{i:0;s:3:"foo";s:3:"bar";b:1;}"#).unwrap();
/// assert_eq!(value.get("0"), Some(&PhpValue::String("foo".to_string())));
/// assert_eq!(value.get("bar"), Some(&PhpValue::Bool(true)));
///
/// assert!(unserialize("a:1:{").is_err());
/// ```
pub fn unserialize(input: &str) -> Result<PhpValue, DecodeError> {
    unserialize_bytes(input.as_bytes())
}

/// Decode PHP-serialized bytes. String payloads that are not UTF-8 are
/// converted lossily.
pub fn unserialize_bytes(input: &[u8]) -> Result<PhpValue, DecodeError> {
    let mut reader = Reader { input, pos: 0 };
    let value = reader.read_value(0)?;

    let trailing = input.len().saturating_sub(reader.pos);
    if trailing > 0 {
        tracing::debug!(offset = reader.pos, trailing, "Ignoring data after serialized value");
    }

    Ok(value)
}

struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError {
            offset: self.pos,
            kind,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .peek()
            .ok_or_else(|| self.error(DecodeErrorKind::UnexpectedEof))?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, expected: u8) -> Result<(), DecodeError> {
        let offset = self.pos;
        let found = self.next_byte()?;
        if found != expected {
            return Err(DecodeError {
                offset,
                kind: DecodeErrorKind::UnexpectedByte {
                    expected: char::from(expected),
                    found: char::from(found),
                },
            });
        }
        Ok(())
    }

    /// Read up to (and consume) `delimiter`, returning the text before it.
    fn read_until(&mut self, delimiter: u8) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        let rest = self.input.get(start..).unwrap_or_default();
        let len = rest
            .iter()
            .position(|&b| b == delimiter)
            .ok_or(DecodeError {
                offset: self.input.len(),
                kind: DecodeErrorKind::UnexpectedEof,
            })?;
        self.pos = start + len + 1;

        let raw = &rest[..len];
        std::str::from_utf8(raw).map_err(|_| DecodeError {
            offset: start,
            kind: DecodeErrorKind::InvalidNumber(String::from_utf8_lossy(raw).into_owned()),
        })
    }

    fn read_number<T: FromStr>(&mut self, delimiter: u8) -> Result<T, DecodeError> {
        let offset = self.pos;
        let text = self.read_until(delimiter)?;
        text.parse().map_err(|_| DecodeError {
            offset,
            kind: DecodeErrorKind::InvalidNumber(text.to_string()),
        })
    }

    fn read_length(&mut self, delimiter: u8) -> Result<usize, DecodeError> {
        let offset = self.pos;
        let text = self.read_until(delimiter)?;
        text.parse().map_err(|_| DecodeError {
            offset,
            kind: DecodeErrorKind::InvalidLength(text.to_string()),
        })
    }

    fn read_float(&mut self) -> Result<f64, DecodeError> {
        let offset = self.pos;
        let text = self.read_until(b';')?;
        match text {
            "INF" => Ok(f64::INFINITY),
            "-INF" => Ok(f64::NEG_INFINITY),
            "NAN" => Ok(f64::NAN),
            _ => text.parse().map_err(|_| DecodeError {
                offset,
                kind: DecodeErrorKind::InvalidNumber(text.to_string()),
            }),
        }
    }

    /// Read `<len>:"<bytes>"`.
    fn read_quoted(&mut self) -> Result<String, DecodeError> {
        let len = self.read_length(b':')?;
        self.expect(b'"')?;

        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|&end| end <= self.input.len())
            .ok_or(DecodeError {
                offset: self.input.len(),
                kind: DecodeErrorKind::UnexpectedEof,
            })?;
        let text = String::from_utf8_lossy(&self.input[start..end]).into_owned();
        self.pos = end;

        self.expect(b'"')?;
        Ok(text)
    }

    /// Read `<count>:{<key><value>...}`.
    fn read_entries(&mut self, depth: usize) -> Result<Vec<(PhpKey, PhpValue)>, DecodeError> {
        let count = self.read_length(b':')?;
        self.expect(b'{')?;

        // The declared count is untrusted, so cap the preallocation.
        let mut entries = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            let key = self.read_key()?;
            let value = self.read_value(depth + 1)?;
            entries.push((key, value));
        }

        self.expect(b'}')?;
        Ok(entries)
    }

    fn read_key(&mut self) -> Result<PhpKey, DecodeError> {
        let offset = self.pos;
        match self.next_byte()? {
            b'i' => {
                self.expect(b':')?;
                Ok(PhpKey::Int(self.read_number(b';')?))
            }
            b's' => {
                self.expect(b':')?;
                let key = self.read_quoted()?;
                self.expect(b';')?;
                Ok(PhpKey::String(key))
            }
            other => Err(DecodeError {
                offset,
                kind: DecodeErrorKind::InvalidKey(char::from(other)),
            }),
        }
    }

    fn read_value(&mut self, depth: usize) -> Result<PhpValue, DecodeError> {
        if depth > MAX_DECODE_DEPTH {
            return Err(self.error(DecodeErrorKind::DepthExceeded(MAX_DECODE_DEPTH)));
        }

        let offset = self.pos;
        let marker = self.next_byte()?;
        if marker == b'N' {
            self.expect(b';')?;
            return Ok(PhpValue::Null);
        }
        self.expect(b':')?;

        match marker {
            b'b' => {
                let offset = self.pos;
                match self.read_until(b';')? {
                    "0" => Ok(PhpValue::Bool(false)),
                    "1" => Ok(PhpValue::Bool(true)),
                    other => Err(DecodeError {
                        offset,
                        kind: DecodeErrorKind::InvalidNumber(other.to_string()),
                    }),
                }
            }
            b'i' => Ok(PhpValue::Int(self.read_number(b';')?)),
            b'd' => Ok(PhpValue::Float(self.read_float()?)),
            b's' => {
                let text = self.read_quoted()?;
                self.expect(b';')?;
                Ok(PhpValue::String(text))
            }
            b'a' => Ok(PhpValue::Array(self.read_entries(depth)?)),
            b'O' => {
                let class = self.read_quoted()?;
                self.expect(b':')?;
                let properties = self.read_entries(depth)?;
                Ok(PhpValue::Object { class, properties })
            }
            b'r' | b'R' => Ok(PhpValue::Reference(self.read_number(b';')?)),
            other => Err(DecodeError {
                offset,
                kind: DecodeErrorKind::UnknownType(char::from(other)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ATTACHMENT_METADATA: &str = concat!(
        r#"a:5:{s:5:"width";i:1200;s:6:"height";i:630;s:4:"file";s:14:"logo-promo.png";"#,
        r#"s:5:"sizes";a:1:{s:9:"thumbnail";a:4:{s:4:"file";s:22:"logo-promo-150x150.png";"#,
        r#"s:5:"width";i:150;s:6:"height";i:150;s:9:"mime-type";s:9:"image/png";}}"#,
        r#"s:10:"image_meta";a:2:{s:8:"aperture";s:1:"0";s:6:"credit";s:0:"";}}"#,
    );

    fn kind_of(input: &str) -> DecodeErrorKind {
        unserialize(input).unwrap_err().kind
    }

    #[test]
    fn test_scalars() {
        assert_eq!(unserialize("N;").unwrap(), PhpValue::Null);
        assert_eq!(unserialize("b:0;").unwrap(), PhpValue::Bool(false));
        assert_eq!(unserialize("b:1;").unwrap(), PhpValue::Bool(true));
        assert_eq!(unserialize("i:-42;").unwrap(), PhpValue::Int(-42));
        assert_eq!(unserialize("d:0.5;").unwrap(), PhpValue::Float(0.5));
        assert_eq!(unserialize("d:1.0E+25;").unwrap(), PhpValue::Float(1.0e25));
        assert_eq!(
            unserialize(r#"s:5:"hello";"#).unwrap(),
            PhpValue::String("hello".to_string())
        );
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(unserialize("d:INF;").unwrap(), PhpValue::Float(f64::INFINITY));
        assert_eq!(
            unserialize("d:-INF;").unwrap(),
            PhpValue::Float(f64::NEG_INFINITY)
        );
        assert!(unserialize("d:NAN;")
            .unwrap()
            .as_f64()
            .is_some_and(f64::is_nan));
    }

    #[test]
    fn test_string_with_delimiters() {
        let value = unserialize(r#"s:7:"a;b:"c}";"#).unwrap();
        assert_eq!(value, PhpValue::String(r#"a;b:"c}"#.to_string()));
    }

    #[test]
    fn test_string_length_is_in_bytes() {
        let value = unserialize("s:2:\"é\";").unwrap();
        assert_eq!(value.as_str(), Some("é"));
    }

    #[test]
    fn test_attachment_metadata() {
        let value = unserialize(ATTACHMENT_METADATA).unwrap();

        assert!(value.is_structured());
        assert_eq!(value.get("width").and_then(PhpValue::as_i64), Some(1200));
        assert_eq!(
            value.get("file").and_then(PhpValue::as_str),
            Some("logo-promo.png")
        );

        let thumbnail = value
            .get("sizes")
            .and_then(|s| s.get("thumbnail"))
            .unwrap();
        assert_eq!(
            thumbnail.get("mime-type").and_then(PhpValue::as_str),
            Some("image/png")
        );
        assert_eq!(
            value
                .get("image_meta")
                .and_then(|m| m.get("credit"))
                .and_then(PhpValue::as_str),
            Some("")
        );
    }

    #[test]
    fn test_array_preserves_order() {
        let value = unserialize(r#"a:3:{s:1:"z";i:1;i:5;i:2;s:1:"a";i:3;}"#).unwrap();
        let keys: Vec<String> = value
            .entries()
            .unwrap()
            .iter()
            .map(|(k, _)| k.to_string())
            .collect();
        assert_eq!(keys, vec!["z", "5", "a"]);
    }

    #[test]
    fn test_object() {
        let value = unserialize(r#"O:8:"stdClass":1:{s:4:"name";s:3:"Bob";}"#).unwrap();
        let PhpValue::Object { class, properties } = &value else {
            panic!("expected object, got {value:?}");
        };
        assert_eq!(class, "stdClass");
        assert_eq!(properties.len(), 1);
        assert_eq!(value.get("name").and_then(PhpValue::as_str), Some("Bob"));
    }

    #[test]
    fn test_reference() {
        let value = unserialize(r#"a:2:{i:0;a:0:{}i:1;R:2;}"#).unwrap();
        assert_eq!(value.get("1"), Some(&PhpValue::Reference(2)));
    }

    #[test]
    fn test_trailing_data_ignored() {
        assert_eq!(unserialize("i:1;\n").unwrap(), PhpValue::Int(1));
        assert_eq!(unserialize("i:1;garbage").unwrap(), PhpValue::Int(1));
        assert_eq!(unserialize("i:1;i:2;").unwrap(), PhpValue::Int(1));
        assert_eq!(
            unserialize(r#"a:1:{i:0;b:1;}}"#).unwrap(),
            PhpValue::Array(vec![(PhpKey::Int(0), PhpValue::Bool(true))])
        );
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(kind_of(""), DecodeErrorKind::UnexpectedEof);
        assert_eq!(kind_of("a:2:{i:0;i:1;"), DecodeErrorKind::UnexpectedEof);
        assert_eq!(kind_of(r#"s:10:"short";"#), DecodeErrorKind::UnexpectedEof);
        assert_eq!(kind_of("i:12"), DecodeErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(kind_of("x:1;"), DecodeErrorKind::UnknownType('x'));
        assert_eq!(
            kind_of("i:abc;"),
            DecodeErrorKind::InvalidNumber("abc".to_string())
        );
        assert_eq!(
            kind_of(r#"s:-1:"";"#),
            DecodeErrorKind::InvalidLength("-1".to_string())
        );
        assert_eq!(
            kind_of("b:2;"),
            DecodeErrorKind::InvalidNumber("2".to_string())
        );
        assert_eq!(kind_of("a:1:{b:1;i:1;}"), DecodeErrorKind::InvalidKey('b'));
        assert_eq!(
            kind_of(r#"s:3:"abc"x"#),
            DecodeErrorKind::UnexpectedByte {
                expected: ';',
                found: 'x'
            }
        );
    }

    #[test]
    fn test_error_offset() {
        let err = unserialize(r#"a:1:{s:1:"k";q:1;}"#).unwrap_err();
        assert_eq!(err.offset, 13);
        assert_eq!(err.to_string(), "unknown type marker 'q' at byte 13");
    }

    #[test]
    fn test_depth_limit() {
        let depth = MAX_DECODE_DEPTH + 2;
        let input = format!("{}N;{}", "a:1:{i:0;".repeat(depth), "}".repeat(depth));
        assert_eq!(
            kind_of(&input),
            DecodeErrorKind::DepthExceeded(MAX_DECODE_DEPTH)
        );
    }

    #[test]
    fn test_non_utf8_string_bytes() {
        let value = unserialize_bytes(b"s:2:\"\xff\xfe\";").unwrap();
        assert_eq!(value.as_str(), Some("\u{fffd}\u{fffd}"));
    }
}
