//! Engine construction-time capacity limits (§10.3), mirroring
//! `opcua_server::config::limits::Limits`: serde-backed fields with
//! per-field defaults and a hand-written `Default` impl.

use serde::{Deserialize, Serialize};

mod defaults {
    pub fn max_text_tokens() -> usize {
        64
    }
    pub fn max_password_len() -> usize {
        30
    }
    pub fn max_array_elements() -> usize {
        32
    }
    pub fn max_name_len() -> usize {
        32
    }
}

/// Fixed capacities standing in for the source's "small fixed-size scratch
/// area" (spec.md §5 Memory). Not loaded from a file by the engine itself —
/// persistence is the embedder's job (spec.md §1 Out of scope).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineLimits {
    /// Maximum tokens the text tokenizer will produce for one request.
    #[serde(default = "defaults::max_text_tokens")]
    pub max_text_tokens: usize,
    /// Maximum accepted length of an `auth` password argument.
    #[serde(default = "defaults::max_password_len")]
    pub max_password_len: usize,
    /// Maximum element count accepted for an array-typed value.
    #[serde(default = "defaults::max_array_elements")]
    pub max_array_elements: usize,
    /// Maximum accepted length of a data-object name on lookup.
    #[serde(default = "defaults::max_name_len")]
    pub max_name_len: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        EngineLimits {
            max_text_tokens: defaults::max_text_tokens(),
            max_password_len: defaults::max_password_len(),
            max_array_elements: defaults::max_array_elements(),
            max_name_len: defaults::max_name_len(),
        }
    }
}
