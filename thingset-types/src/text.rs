//! Hand-rolled text tokenizer and serializer (§4.2).
//!
//! Deliberately not `serde_json`: this grammar is a strict, bounded subset
//! (no nested structured values beyond one array/object level deep, no
//! arbitrary-precision numbers), hand-rolled the same way `opcua-types`'s
//! own binary codec is, in `opcua-types::basic_types`, despite `serde`
//! being available in the same workspace.

use crate::error::CodecError;
use crate::value::{ScalarType, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A number, `true`, `false`, or `null` span (unquoted).
    Primitive,
    /// A quoted string span, including the surrounding quotes.
    String,
    ArrayOpen,
    ArrayClose,
    ObjectOpen,
    ObjectClose,
    Colon,
    Comma,
}

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
    pub depth: u16,
}

impl Token {
    pub fn raw<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.start + self.len]
    }
}

fn push(
    tokens: &mut Vec<Token>,
    max_tokens: usize,
    kind: TokenKind,
    start: usize,
    len: usize,
    depth: u16,
) -> Result<(), CodecError> {
    if tokens.len() >= max_tokens {
        return Err(CodecError::Malformed("too many tokens"));
    }
    tokens.push(Token { kind, start, len, depth });
    Ok(())
}

/// Splits `input` into a bounded token stream. Unterminated strings,
/// unbalanced brackets, or a token count beyond `max_tokens` all fail with
/// `Malformed` (surfaced to the caller as `wrong-format`).
pub fn tokenize(input: &str, max_tokens: usize) -> Result<Vec<Token>, CodecError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;
    let mut depth: u16 = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'{' => {
                push(&mut tokens, max_tokens, TokenKind::ObjectOpen, i, 1, depth)?;
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth = depth.checked_sub(1).ok_or(CodecError::Malformed("unbalanced '}'"))?;
                push(&mut tokens, max_tokens, TokenKind::ObjectClose, i, 1, depth)?;
                i += 1;
            }
            b'[' => {
                push(&mut tokens, max_tokens, TokenKind::ArrayOpen, i, 1, depth)?;
                depth += 1;
                i += 1;
            }
            b']' => {
                depth = depth.checked_sub(1).ok_or(CodecError::Malformed("unbalanced ']'"))?;
                push(&mut tokens, max_tokens, TokenKind::ArrayClose, i, 1, depth)?;
                i += 1;
            }
            b':' => {
                push(&mut tokens, max_tokens, TokenKind::Colon, i, 1, depth)?;
                i += 1;
            }
            b',' => {
                push(&mut tokens, max_tokens, TokenKind::Comma, i, 1, depth)?;
                i += 1;
            }
            b'"' => {
                let start = i;
                i += 1;
                let mut escaped = false;
                loop {
                    if i >= bytes.len() {
                        return Err(CodecError::Malformed("unterminated string"));
                    }
                    match bytes[i] {
                        b'\\' if !escaped => escaped = true,
                        b'"' if !escaped => {
                            i += 1;
                            break;
                        }
                        _ => escaped = false,
                    }
                    i += 1;
                }
                push(&mut tokens, max_tokens, TokenKind::String, start, i - start, depth)?;
            }
            _ => {
                let start = i;
                while i < bytes.len()
                    && !matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}' | b':')
                {
                    i += 1;
                }
                if i == start {
                    return Err(CodecError::Malformed("unexpected character"));
                }
                push(&mut tokens, max_tokens, TokenKind::Primitive, start, i - start, depth)?;
            }
        }
    }
    if depth != 0 {
        return Err(CodecError::Malformed("unterminated structure"));
    }
    Ok(tokens)
}

/// Strips the surrounding quotes from a `String` token's raw span and
/// un-escapes `\"` and `\\`.
pub fn unescape_string(raw: &str) -> Result<String, CodecError> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(CodecError::Malformed("expected a quoted string"))?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => return Err(CodecError::Malformed("trailing backslash in string")),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

fn checked_range(v: f64, min: f64, max: f64) -> Result<f64, CodecError> {
    if v < min || v > max || v.is_nan() {
        Err(CodecError::OutOfRange)
    } else {
        Ok(v)
    }
}

fn int_from_f64(scalar: ScalarType, v: f64) -> Result<Value, CodecError> {
    Ok(match scalar {
        ScalarType::I16 => Value::I16(checked_range(v, i16::MIN as f64, i16::MAX as f64)? as i16),
        ScalarType::U16 => Value::U16(checked_range(v, 0.0, u16::MAX as f64)? as u16),
        ScalarType::I32 => Value::I32(checked_range(v, i32::MIN as f64, i32::MAX as f64)? as i32),
        ScalarType::U32 => Value::U32(checked_range(v, 0.0, u32::MAX as f64)? as u32),
        ScalarType::I64 => Value::I64(checked_range(v, i64::MIN as f64, i64::MAX as f64)? as i64),
        ScalarType::U64 => Value::U64(checked_range(v, 0.0, u64::MAX as f64)? as u64),
        _ => unreachable!("int_from_f64 called with a non-integer scalar type"),
    })
}

/// Parses a plain decimal literal (`"52.8"`) into a `Value::Decimal`, with
/// the exponent derived from the literal's own fractional digit count.
fn parse_decimal_literal(raw: &str) -> Result<Value, CodecError> {
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw, ""));
    let exponent = -(frac_part.len() as i32);
    if exponent < i8::MIN as i32 {
        return Err(CodecError::OutOfRange);
    }
    let digits = format!("{int_part}{frac_part}");
    let mantissa: i64 = digits
        .parse()
        .map_err(|_| CodecError::Malformed("expected a decimal number"))?;
    Ok(Value::Decimal { mantissa, exponent: exponent as i8 })
}

/// Parses a primitive token's raw text into a value of the declared scalar
/// type, applying the text-write coercion rules of §4.6: integers coerce
/// into float slots, and non-integer literals truncate toward zero into
/// integer slots (range-checked against the declared width).
pub fn parse_scalar(scalar: ScalarType, raw: &str) -> Result<Value, CodecError> {
    match scalar {
        ScalarType::Bool => match raw {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(CodecError::Malformed("expected true or false")),
        },
        ScalarType::Text => Err(CodecError::TypeMismatch {
            expected: crate::value::TypeTag::Scalar(ScalarType::Text),
        }),
        ScalarType::F32 => {
            let n: f64 = raw.parse().map_err(|_| CodecError::Malformed("expected a number"))?;
            Ok(Value::F32(n as f32))
        }
        ScalarType::Decimal => parse_decimal_literal(raw),
        ScalarType::I16 | ScalarType::U16 | ScalarType::I32 | ScalarType::U32 | ScalarType::I64 | ScalarType::U64 => {
            let n: f64 = raw.parse().map_err(|_| CodecError::Malformed("expected a number"))?;
            int_from_f64(scalar, n.trunc())
        }
    }
}

/// Renders a value back to text, using `detail` as the float/decimal
/// fractional-digit count (§4.2).
pub fn render_value(value: &Value, detail: u8) -> String {
    match value {
        Value::Bool(b) => if *b { "true" } else { "false" }.to_string(),
        Value::I16(v) => v.to_string(),
        Value::U16(v) => v.to_string(),
        Value::I32(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::I64(v) => v.to_string(),
        Value::U64(v) => v.to_string(),
        Value::F32(v) => render_float(*v as f64, detail),
        Value::Text(s) => quote_string(s),
        Value::Decimal { mantissa, exponent } => {
            render_float((*mantissa as f64) * 10f64.powi(*exponent as i32), detail)
        }
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(|v| render_value(v, detail)).collect();
            format!("[{}]", rendered.join(","))
        }
    }
}

fn render_float(v: f64, detail: u8) -> String {
    if detail == 0 {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.*}", detail as usize, v)
    }
}

pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_flat_object() {
        let tokens = tokenize(r#"{"f32":52.8,"i32":50.6}"#, 32).unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::ObjectOpen,
                TokenKind::String,
                TokenKind::Colon,
                TokenKind::Primitive,
                TokenKind::Comma,
                TokenKind::String,
                TokenKind::Colon,
                TokenKind::Primitive,
                TokenKind::ObjectClose,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_wrong_format() {
        assert!(tokenize(r#"{"f32":"#, 32).is_ok());
        assert!(matches!(tokenize(r#""unterminated"#, 32), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn unbalanced_brackets_are_wrong_format() {
        assert!(matches!(tokenize("[1,2", 32), Err(CodecError::Malformed(_))));
        assert!(matches!(tokenize("1]", 32), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn too_many_tokens_is_rejected() {
        assert!(matches!(tokenize("[1,2,3]", 3), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn escaped_quotes_round_trip() {
        let raw = r#""a \"quoted\" word""#;
        let unescaped = unescape_string(raw).unwrap();
        assert_eq!(unescaped, r#"a "quoted" word"#);
        assert_eq!(quote_string(&unescaped), raw);
    }

    #[test]
    fn integer_write_truncates_toward_zero() {
        assert_eq!(parse_scalar(ScalarType::I32, "50.6").unwrap(), Value::I32(50));
        assert_eq!(parse_scalar(ScalarType::I32, "-50.6").unwrap(), Value::I32(-50));
    }

    #[test]
    fn float_render_uses_detail_digits() {
        assert_eq!(render_value(&Value::F32(52.8), 2), "52.80");
        assert_eq!(render_value(&Value::F32(52.6), 0), "53");
    }

    #[test]
    fn array_renders_bracketed() {
        let v = Value::Array(vec![Value::I32(4), Value::I32(2), Value::I32(8), Value::I32(4)]);
        assert_eq!(render_value(&v, 0), "[4,2,8,4]");
    }
}
