//! Execute handler (§4.6 Execute): invokes a named or id-addressed exec
//! object's callback exactly once.

use thingset_core::{EngineError, EngineLimits};
use thingset_nodes::{Category, ObjectDescriptor, ObjectTable};
use thingset_types::{binary, text, CodecError, StatusCode};

use crate::access::{check_access, Operation};
use crate::session::AuthLevel;

fn invoke_checked(obj: &ObjectDescriptor, level: AuthLevel) -> Result<(), EngineError> {
    if obj.category != Category::Exec || !obj.is_exec() {
        return Err(EngineError::WrongCategory);
    }
    if !check_access(obj.access, Operation::Exec, level) {
        return Err(EngineError::Unauthorized);
    }
    obj.invoke()
}

pub fn execute_binary(table: &ObjectTable, argument: &[u8], level: AuthLevel, out: &mut [u8]) -> Result<usize, EngineError> {
    let (id, _) = binary::decode_uint16(argument)?;
    let obj = table.by_id(id).ok_or(EngineError::UnknownDataObject)?;
    invoke_checked(obj, level)?;
    crate::wire::write_status_byte(out, StatusCode::Valid)
}

pub fn execute_text(
    table: &ObjectTable,
    payload: &str,
    level: AuthLevel,
    limits: &EngineLimits,
    out: &mut [u8],
) -> Result<usize, EngineError> {
    let name = text::unescape_string(payload.trim())?;
    if name.len() > limits.max_name_len {
        return Err(CodecError::OutOfRange.into());
    }
    let obj = table.by_name(&name).ok_or(EngineError::UnknownDataObject)?;
    invoke_checked(obj, level)?;
    crate::wire::write_text_response(out, &StatusCode::Valid.text_line())
}
