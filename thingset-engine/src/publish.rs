//! Publication emission (§4.7): a transport calls this on its own cadence,
//! outside the request/response cycle — unreadable objects are skipped
//! silently rather than failing the whole message, and overflow or an
//! out-of-range channel index yields an empty message (length 0) rather
//! than an error reply.

use thingset_nodes::ObjectTable;
use thingset_types::{binary, text, Value};

use crate::access::{check_access, Operation};
use crate::classify::Encoding;
use crate::session::AuthLevel;

const PUBMSG_BINARY_MARKER: u8 = 0x1F;

fn readable_pairs(table: &ObjectTable, ids: &[u16], level: AuthLevel) -> Vec<(u16, Value)> {
    ids.iter()
        .filter_map(|&id| {
            let obj = table.by_id(id)?;
            if !check_access(obj.access, Operation::Read, level) {
                return None;
            }
            obj.read().ok().map(|v| (id, v))
        })
        .collect()
}

pub fn publish_ids(table: &ObjectTable, ids: &[u16], level: AuthLevel, encoding: Encoding, out: &mut [u8]) -> usize {
    match encoding {
        Encoding::Binary => publish_binary(table, ids, level, out).unwrap_or(0),
        Encoding::Text => publish_text(table, ids, level, out).unwrap_or(0),
    }
}

fn publish_binary(table: &ObjectTable, ids: &[u16], level: AuthLevel, out: &mut [u8]) -> Option<usize> {
    let pairs = readable_pairs(table, ids, level);
    let mut off = 1;
    *out.get_mut(0)? = PUBMSG_BINARY_MARKER;
    off += binary::encode_map_header(&mut out[off..], pairs.len() as u64).ok()?;
    for (id, value) in &pairs {
        off += binary::encode_uint(&mut out[off..], *id as u64).ok()?;
        off += binary::encode_value(&mut out[off..], value).ok()?;
    }
    Some(off)
}

fn publish_text(table: &ObjectTable, ids: &[u16], level: AuthLevel, out: &mut [u8]) -> Option<usize> {
    let pairs = readable_pairs(table, ids, level);
    let rendered: Vec<String> = pairs
        .iter()
        .filter_map(|(id, value)| {
            let obj = table.by_id(*id)?;
            Some(format!("{}:{}", text::quote_string(obj.name), text::render_value(value, obj.detail)))
        })
        .collect();
    let body = format!("# {{{}}}", rendered.join(","));
    let bytes = body.as_bytes();
    if bytes.len() > out.len() {
        return None;
    }
    out[..bytes.len()].copy_from_slice(bytes);
    Some(bytes.len())
}
