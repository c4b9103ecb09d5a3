//! List handler (§4.6 List): the readable objects of a category, as ids,
//! names, or a name-to-rendered-value map depending on the request style.

use thingset_core::EngineError;
use thingset_nodes::{Category, ObjectTable};
use thingset_types::{binary, text, StatusCode};

use crate::access::{check_access, Operation};
use crate::session::AuthLevel;

pub fn list_binary(
    table: &ObjectTable,
    category: Category,
    style: binary::ListStyle,
    level: AuthLevel,
    out: &mut [u8],
) -> Result<usize, EngineError> {
    let readable: Vec<_> = table
        .in_category(category)
        .filter(|o| check_access(o.access, Operation::Read, level))
        .collect();

    let mut off = crate::wire::write_status_byte(out, StatusCode::Content)?;
    match style {
        binary::ListStyle::Ids => {
            off += binary::encode_array_header(&mut out[off..], readable.len() as u64)?;
            for obj in &readable {
                off += binary::encode_uint(&mut out[off..], obj.id as u64)?;
            }
        }
        binary::ListStyle::Names => {
            off += binary::encode_array_header(&mut out[off..], readable.len() as u64)?;
            for obj in &readable {
                off += binary::encode_text(&mut out[off..], obj.name)?;
            }
        }
        binary::ListStyle::NameValueMap => {
            off += binary::encode_map_header(&mut out[off..], readable.len() as u64)?;
            for obj in &readable {
                off += binary::encode_text(&mut out[off..], obj.name)?;
                let value = obj.read()?;
                off += binary::encode_value(&mut out[off..], &value)?;
            }
        }
    }
    Ok(off)
}

enum TextListStyle {
    Names,
    NameValueMap,
}

pub fn list_text(
    table: &ObjectTable,
    category: Category,
    payload: &str,
    level: AuthLevel,
    out: &mut [u8],
) -> Result<usize, EngineError> {
    let style = if payload == "/" { TextListStyle::Names } else { TextListStyle::NameValueMap };
    let readable: Vec<_> = table
        .in_category(category)
        .filter(|o| check_access(o.access, Operation::Read, level))
        .collect();

    let body = match style {
        TextListStyle::Names => {
            let names: Vec<String> = readable.iter().map(|o| text::quote_string(o.name)).collect();
            format!("[{}]", names.join(","))
        }
        TextListStyle::NameValueMap => {
            let mut pairs = Vec::with_capacity(readable.len());
            for obj in &readable {
                let value = obj.read()?;
                pairs.push(format!("{}:{}", text::quote_string(obj.name), text::render_value(&value, obj.detail)));
            }
            format!("{{{}}}", pairs.join(","))
        }
    };
    let line = format!("{} {}", StatusCode::Content.text_line(), body);
    crate::wire::write_text_response(out, &line)
}

/// The `!pub` channel-name listing: always by name, never by id (channels
/// have no numeric address in this engine).
pub fn list_pub_channels(names: &[&str], out: &mut [u8]) -> Result<usize, EngineError> {
    let rendered: Vec<String> = names.iter().map(|n| text::quote_string(n)).collect();
    let line = format!("{} [{}]", StatusCode::Content.text_line(), rendered.join(","));
    crate::wire::write_text_response(out, &line)
}
