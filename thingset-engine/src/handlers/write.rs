//! Write handler (§4.6 Write): applies each id/value or name/value pair in
//! request order, stopping at the first failure without rolling back
//! pairs already applied — no rollback, fail-fast.

use thingset_core::{EngineError, EngineLimits};
use thingset_nodes::{Category, ObjectTable};
use thingset_types::{binary, text, CodecError, ScalarType, StatusCode, TypeTag, Value};

use crate::access::{check_access, Operation};
use crate::session::AuthLevel;

pub fn write_binary(
    table: &ObjectTable,
    argument: &[u8],
    level: AuthLevel,
    category: Category,
    conf_callback: &Option<Box<dyn Fn()>>,
    limits: &EngineLimits,
    out: &mut [u8],
) -> Result<usize, EngineError> {
    let (count, mut off) = binary::decode_map_header(argument)?;
    for _ in 0..count {
        let (id, len) = binary::decode_uint16(&argument[off..])?;
        off += len;
        let obj = table.by_id(id).ok_or(EngineError::UnknownDataObject)?;
        if !check_access(obj.access, Operation::Write, level) {
            return Err(EngineError::Unauthorized);
        }
        let (value, len) = binary::decode_value_as(obj.type_tag, &argument[off..], limits.max_array_elements)?;
        off += len;
        obj.write(value)?;
    }
    run_conf_callback(category, conf_callback);
    crate::wire::write_status_byte(out, StatusCode::Changed)
}

fn run_conf_callback(category: Category, conf_callback: &Option<Box<dyn Fn()>>) {
    if category == Category::Conf {
        if let Some(callback) = conf_callback {
            callback();
        }
    }
}

/// Parses the value starting at `tokens[idx]` against `type_tag`, recursing
/// one level for an array of scalars. Returns the index just past the
/// value consumed.
fn parse_value_at(
    tokens: &[text::Token],
    payload: &str,
    idx: usize,
    type_tag: TypeTag,
) -> Result<(Value, usize), EngineError> {
    let token = tokens.get(idx).ok_or(CodecError::Malformed("expected a value"))?;
    match (token.kind, type_tag) {
        (text::TokenKind::String, TypeTag::Scalar(ScalarType::Text)) => {
            Ok((Value::Text(text::unescape_string(token.raw(payload))?), idx + 1))
        }
        (text::TokenKind::Primitive, TypeTag::Scalar(scalar)) => {
            Ok((text::parse_scalar(scalar, token.raw(payload))?, idx + 1))
        }
        (text::TokenKind::ArrayOpen, TypeTag::Array(elem)) => {
            let mut items = Vec::new();
            let mut i = idx + 1;
            loop {
                match tokens.get(i).map(|t| t.kind) {
                    Some(text::TokenKind::ArrayClose) => {
                        i += 1;
                        break;
                    }
                    Some(text::TokenKind::Comma) => i += 1,
                    Some(_) => {
                        let (value, next) = parse_value_at(tokens, payload, i, TypeTag::Scalar(elem))?;
                        items.push(value);
                        i = next;
                    }
                    None => return Err(CodecError::Malformed("unterminated array").into()),
                }
            }
            Ok((Value::Array(items), i))
        }
        _ => Err(CodecError::TypeMismatch { expected: type_tag }.into()),
    }
}

pub fn write_text(
    table: &ObjectTable,
    payload: &str,
    level: AuthLevel,
    category: Category,
    conf_callback: &Option<Box<dyn Fn()>>,
    limits: &EngineLimits,
    out: &mut [u8],
) -> Result<usize, EngineError> {
    let tokens = text::tokenize(payload, limits.max_text_tokens)?;
    let mut i = 0;
    if tokens.first().map(|t| t.kind) != Some(text::TokenKind::ObjectOpen) {
        return Err(CodecError::Malformed("expected an object").into());
    }
    i += 1;
    while tokens.get(i).map(|t| t.kind) == Some(text::TokenKind::String) {
        let name = text::unescape_string(tokens[i].raw(payload))?;
        if name.len() > limits.max_name_len {
            return Err(CodecError::OutOfRange.into());
        }
        i += 1;
        if tokens.get(i).map(|t| t.kind) != Some(text::TokenKind::Colon) {
            return Err(CodecError::Malformed("expected ':'").into());
        }
        i += 1;
        let obj = table.by_name(&name).ok_or(EngineError::UnknownDataObject)?;
        if !check_access(obj.access, Operation::Write, level) {
            return Err(EngineError::Unauthorized);
        }
        let (value, next) = parse_value_at(&tokens, payload, i, obj.type_tag)?;
        i = next;
        obj.write(value)?;
        if tokens.get(i).map(|t| t.kind) == Some(text::TokenKind::Comma) {
            i += 1;
        }
    }
    if tokens.get(i).map(|t| t.kind) != Some(text::TokenKind::ObjectClose) {
        return Err(CodecError::Malformed("expected '}'").into());
    }
    run_conf_callback(category, conf_callback);
    crate::wire::write_text_response(out, &StatusCode::Changed.text_line())
}
