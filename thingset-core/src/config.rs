//! Embedder-facing persistence for `EngineLimits`, mirroring
//! `opcua_core::config::Config`. The engine core never calls `save`/`load`
//! itself; this exists so an embedder can round-trip the struct with
//! `serde_yaml`, the same way server configuration gets round-tripped
//! elsewhere in this workspace.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::limits::EngineLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0:?}")]
    Invalid(Vec<String>),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub trait Config: Serialize + DeserializeOwned + Sized {
    fn validate(&self) -> Result<(), Vec<String>>;

    fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate().map_err(ConfigError::Invalid)?;
        let file = File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let value: Self = serde_yaml::from_reader(file)?;
        value.validate().map_err(ConfigError::Invalid)?;
        Ok(value)
    }
}

impl Config for EngineLimits {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.max_text_tokens == 0 {
            errors.push("max_text_tokens must be greater than zero".to_string());
        }
        if self.max_password_len == 0 {
            errors.push("max_password_len must be greater than zero".to_string());
        }
        if self.max_array_elements == 0 {
            errors.push("max_array_elements must be greater than zero".to_string());
        }
        if self.max_name_len == 0 {
            errors.push("max_name_len must be greater than zero".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_limits_fail_validation() {
        let limits = EngineLimits {
            max_text_tokens: 0,
            max_password_len: 0,
            max_array_elements: 1,
            max_name_len: 1,
        };
        assert!(limits.validate().is_err());
    }
}
