//! Read handler (§4.6 Read): a single id/name or an array of them.

use thingset_core::{EngineError, EngineLimits};
use thingset_nodes::{ObjectDescriptor, ObjectTable};
use thingset_types::{binary, text, CodecError, StatusCode, Value};

use crate::access::{check_access, Operation};
use crate::session::AuthLevel;

fn read_one(table: &ObjectTable, id: u16, level: AuthLevel) -> Result<Value, EngineError> {
    let obj = table.by_id(id).ok_or(EngineError::UnknownDataObject)?;
    read_checked(obj, level)
}

fn read_checked(obj: &ObjectDescriptor, level: AuthLevel) -> Result<Value, EngineError> {
    if !check_access(obj.access, Operation::Read, level) {
        return Err(EngineError::Unauthorized);
    }
    obj.read()
}

fn decode_id_or_array(argument: &[u8], max_elements: usize) -> Result<Vec<u16>, EngineError> {
    match binary::peek_major(argument) {
        Some(binary::MAJOR_ARRAY) => {
            let (count, mut off) = binary::decode_array_header(argument)?;
            if count as usize > max_elements {
                return Err(EngineError::RequestTooLong);
            }
            let mut ids = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let (id, len) = binary::decode_uint16(&argument[off..])?;
                ids.push(id);
                off += len;
            }
            Ok(ids)
        }
        _ => {
            let (id, _) = binary::decode_uint16(argument)?;
            Ok(vec![id])
        }
    }
}

pub fn read_binary(
    table: &ObjectTable,
    argument: &[u8],
    level: AuthLevel,
    limits: &EngineLimits,
    out: &mut [u8],
) -> Result<usize, EngineError> {
    let ids = decode_id_or_array(argument, limits.max_array_elements)?;
    let mut off = crate::wire::write_status_byte(out, StatusCode::Content)?;
    if ids.len() == 1 {
        let value = read_one(table, ids[0], level)?;
        off += binary::encode_value(&mut out[off..], &value)?;
    } else {
        off += binary::encode_array_header(&mut out[off..], ids.len() as u64)?;
        for id in ids {
            let value = read_one(table, id, level)?;
            off += binary::encode_value(&mut out[off..], &value)?;
        }
    }
    Ok(off)
}

/// Parses a single quoted name or a bracketed array of quoted names.
fn parse_name_list(payload: &str, limits: &EngineLimits) -> Result<Vec<String>, EngineError> {
    let tokens = text::tokenize(payload, limits.max_text_tokens)?;
    let names = match tokens.first().map(|t| t.kind) {
        Some(text::TokenKind::String) => vec![text::unescape_string(tokens[0].raw(payload))?],
        Some(text::TokenKind::ArrayOpen) => {
            let mut names = Vec::new();
            for tok in &tokens[1..] {
                match tok.kind {
                    text::TokenKind::String => names.push(text::unescape_string(tok.raw(payload))?),
                    text::TokenKind::Comma | text::TokenKind::ArrayClose => {}
                    _ => return Err(CodecError::Malformed("expected a name in the array").into()),
                }
            }
            names
        }
        _ => return Err(CodecError::Malformed("expected a name or an array of names").into()),
    };
    if names.iter().any(|name| name.len() > limits.max_name_len) {
        return Err(CodecError::OutOfRange.into());
    }
    Ok(names)
}

pub fn read_text(
    table: &ObjectTable,
    payload: &str,
    level: AuthLevel,
    limits: &EngineLimits,
    out: &mut [u8],
) -> Result<usize, EngineError> {
    let names = parse_name_list(payload, limits)?;
    let mut rendered = Vec::with_capacity(names.len());
    for name in &names {
        let obj = table.by_name(name).ok_or(EngineError::UnknownDataObject)?;
        let value = read_checked(obj, level)?;
        rendered.push(text::render_value(&value, obj.detail));
    }
    let body = if rendered.len() == 1 {
        rendered.into_iter().next().unwrap()
    } else {
        format!("[{}]", rendered.join(","))
    };
    let line = format!("{} {}", StatusCode::Content.text_line(), body);
    crate::wire::write_text_response(out, &line)
}
