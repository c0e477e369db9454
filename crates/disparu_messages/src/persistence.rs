//! Storage keys and the JSON blob format of each record.

use disparu_storage::{DurableStoreConfig, DEFAULT_NAMESPACE_PREFIX};
use serde_json::Value;

use crate::{
    error::{ParseFailure, PersistFailure},
    model::{Message, Settings, SettingsPatch},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fixed keys the two records are stored under.
pub struct StorageKeys {
    /// Key of the message array.
    pub messages: String,
    /// Key of the settings object.
    pub settings: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_NAMESPACE_PREFIX)
    }
}

impl StorageKeys {
    /// Builds keys under `prefix`.
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            messages: format!("{prefix}messages"),
            settings: format!("{prefix}settings"),
        }
    }

    /// Builds keys under the namespace of `config`, so they take part in primary-medium cleanup.
    pub fn for_config(config: &DurableStoreConfig) -> Self {
        Self {
            messages: config.namespaced_key("messages"),
            settings: config.namespaced_key("settings"),
        }
    }
}

/// Serializes the message sequence as a JSON array.
///
/// # Errors
///
/// Returns [`PersistFailure::Encode`] when serialization fails.
pub fn encode_messages(key: &str, messages: &[Message]) -> Result<String, PersistFailure> {
    serde_json::to_string(messages).map_err(|source| PersistFailure::Encode {
        key: key.to_string(),
        source,
    })
}

/// Serializes settings as a JSON object.
///
/// # Errors
///
/// Returns [`PersistFailure::Encode`] when serialization fails.
pub fn encode_settings(key: &str, settings: &Settings) -> Result<String, PersistFailure> {
    serde_json::to_string(settings).map_err(|source| PersistFailure::Encode {
        key: key.to_string(),
        source,
    })
}

/// Parses a stored message array. Any invalid element rejects the whole blob.
///
/// # Errors
///
/// Returns [`ParseFailure::Malformed`] when `raw` is not an array of messages.
pub fn decode_messages(key: &str, raw: &str) -> Result<Vec<Message>, ParseFailure> {
    serde_json::from_str(raw).map_err(|source| ParseFailure::Malformed {
        key: key.to_string(),
        source,
    })
}

/// Parses stored settings and merges them over the defaults field by field.
///
/// Records written by older versions that lack a field, or hold a field of the wrong type, still
/// yield valid settings: each such field keeps its default. The stored limit is clamped.
///
/// # Errors
///
/// Returns [`ParseFailure`] when `raw` is not a JSON object.
pub fn decode_settings(key: &str, raw: &str) -> Result<Settings, ParseFailure> {
    let value: Value = serde_json::from_str(raw).map_err(|source| ParseFailure::Malformed {
        key: key.to_string(),
        source,
    })?;
    let Value::Object(fields) = value else {
        return Err(ParseFailure::NotAnObject {
            key: key.to_string(),
        });
    };
    let mut settings = Settings::default();
    settings.apply(SettingsPatch::from_stored_fields(&fields));
    Ok(settings)
}
