//! The `!pub` request handler (§4.6): lists channel names, or flips their
//! `enabled` flags. Distinct from `crate::publish`, which is the emission
//! path a transport calls on its own schedule rather than in response to
//! a request.

use thingset_core::EngineError;
use thingset_nodes::PublicationChannel;
use thingset_types::{text, CodecError, StatusCode};

pub fn pub_text(channels: &[PublicationChannel], payload: &str, max_tokens: usize, out: &mut [u8]) -> Result<usize, EngineError> {
    if payload.is_empty() || payload == "/" {
        let names: Vec<String> = channels.iter().map(|c| text::quote_string(c.name)).collect();
        let line = format!("{} [{}]", StatusCode::Content.text_line(), names.join(","));
        return crate::wire::write_text_response(out, &line);
    }

    if !payload.starts_with('{') {
        return Err(CodecError::Malformed("expected '/' or an object").into());
    }

    let tokens = text::tokenize(payload, max_tokens)?;
    let mut i = 0;
    if tokens.first().map(|t| t.kind) != Some(text::TokenKind::ObjectOpen) {
        return Err(CodecError::Malformed("expected an object").into());
    }
    i += 1;
    while tokens.get(i).map(|t| t.kind) == Some(text::TokenKind::String) {
        let name = text::unescape_string(tokens[i].raw(payload))?;
        i += 1;
        if tokens.get(i).map(|t| t.kind) != Some(text::TokenKind::Colon) {
            return Err(CodecError::Malformed("expected ':'").into());
        }
        i += 1;
        let value_token = tokens.get(i).ok_or(CodecError::Malformed("expected true or false"))?;
        let enabled = match value_token.raw(payload) {
            "true" => true,
            "false" => false,
            _ => return Err(CodecError::Malformed("expected true or false").into()),
        };
        i += 1;
        let channel = channels.iter().find(|c| c.name == name).ok_or(EngineError::UnknownDataObject)?;
        channel.set_enabled(enabled);
        if tokens.get(i).map(|t| t.kind) == Some(text::TokenKind::Comma) {
            i += 1;
        }
    }
    if tokens.get(i).map(|t| t.kind) != Some(text::TokenKind::ObjectClose) {
        return Err(CodecError::Malformed("expected '}'").into());
    }
    crate::wire::write_text_response(out, &StatusCode::Changed.text_line())
}
