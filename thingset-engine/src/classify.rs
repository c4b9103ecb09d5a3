//! Request classification (§4.5): tells binary from text, and tells list,
//! read, write, execute, authenticate, and publish requests apart before
//! any handler looks at the argument payload.

use thingset_core::EngineError;
use thingset_nodes::Category;
use thingset_types::binary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Binary,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    List,
    Read,
    Write,
    Execute,
    Authenticate,
    Publish,
}

/// Only categories with a binary code at or below `exec` are binary
/// addressable (§6 "External interfaces"); `auth`, `pub`, `name`, and `log`
/// are reachable only through the text word form.
pub fn classify_binary(req: &[u8]) -> Result<(Category, OperationKind), EngineError> {
    let code = *req.first().ok_or(EngineError::UnknownFunction)?;
    let category = Category::from_binary_code(code).ok_or(EngineError::UnknownFunction)?;
    let argument = &req[1..];

    if req.len() == 2 && binary::decode_list_marker(argument).is_some() {
        return Ok((category, OperationKind::List));
    }
    if binary::peek_is_map(argument) {
        return Ok((category, OperationKind::Write));
    }
    if category == Category::Exec {
        return Ok((category, OperationKind::Execute));
    }
    Ok((category, OperationKind::Read))
}

/// Splits a `!category[/ |space]argument` text request into its category
/// word, the operation it implies, and the remaining payload.
pub fn classify_text(req: &str) -> Result<(Category, OperationKind, &str), EngineError> {
    let after_bang = req.strip_prefix('!').ok_or(EngineError::UnknownFunction)?;
    let word_end = after_bang.find(|c: char| c == '/' || c == ' ').unwrap_or(after_bang.len());
    let word = &after_bang[..word_end];
    let category = Category::from_text_word(word).ok_or(EngineError::UnknownFunction)?;
    let after_word = &after_bang[word_end..];

    if category == Category::Auth {
        return Ok((category, OperationKind::Authenticate, after_word.trim_start()));
    }
    if category == Category::Pub {
        return Ok((category, OperationKind::Publish, after_word.trim_start()));
    }

    if after_word.is_empty() {
        return Ok((category, OperationKind::List, ""));
    }
    if after_word == "/" {
        return Ok((category, OperationKind::List, "/"));
    }

    let payload = after_word.strip_prefix(' ').unwrap_or(after_word).trim_start();
    if payload == "{}" {
        return Ok((category, OperationKind::List, payload));
    }
    if payload.starts_with('{') {
        return Ok((category, OperationKind::Write, payload));
    }
    if category == Category::Exec {
        return Ok((category, OperationKind::Execute, payload));
    }
    Ok((category, OperationKind::Read, payload))
}
