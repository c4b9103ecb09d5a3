//! Authenticate handler (§4.6 Authenticate): text-only, per §6 "External
//! interfaces" (auth has no binary function code in this engine).

use thingset_core::{EngineError, EngineLimits};
use thingset_types::{text, StatusCode};

use crate::session::Session;

pub fn auth_text(session: &Session, payload: &str, limits: &EngineLimits, out: &mut [u8]) -> Result<usize, EngineError> {
    let password = if payload.is_empty() { String::new() } else { text::unescape_string(payload.trim())? };
    session.authenticate(&password, limits)?;
    crate::wire::write_text_response(out, &StatusCode::Valid.text_line())
}
