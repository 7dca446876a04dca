use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sync::Direction;
use crate::EscapifyError;

/// Text shown on the escaped side when a session starts.
pub const DEMO_ESCAPED: &str = r##""# Hello\n\nEdit **either** side: the other one follows.""##;

/// Initial state and behavior of a sync session.
///
/// Every field has a default, so an empty JSON object `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Escaped buffer contents at session start. The raw buffer always
    /// starts empty.
    pub initial_escaped: String,

    /// Which side is authoritative before the first focus event.
    pub initial_direction: Direction,

    /// Re-derive the dependent buffer as soon as a side gains focus instead
    /// of waiting for the next edit.
    pub resync_on_focus: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            initial_escaped: DEMO_ESCAPED.to_string(),
            initial_direction: Direction::LeftToRight,
            resync_on_focus: false,
        }
    }
}

impl SyncConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EscapifyError> {
        serde_json::from_str(json).map_err(|e| EscapifyError::Config {
            message: format!("Invalid config: {}", e),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EscapifyError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EscapifyError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        tracing::debug!(path = %path.display(), "loaded sync config");
        Self::from_json_str(&content)
    }
}
