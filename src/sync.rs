//! Two-way synchronization between the escaped and raw buffers.
//!
//! The controller is a two-state machine. Whichever side last received focus
//! is authoritative: its edits re-derive the other buffer, while edits on the
//! other side are stored but go nowhere until focus comes back to it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{self, DecodeError, DecodeErrorKind};
use crate::config::SyncConfig;

/// The one message shown for any escaped text that cannot be decoded.
pub const INVALID_INPUT_MESSAGE: &str = "input must be a valid JSON-encoded string";

/// Which buffer drives the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Escaped text is authoritative; raw text is derived by decoding.
    #[default]
    LeftToRight,
    /// Raw text is authoritative; escaped text is derived by encoding.
    RightToLeft,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "left_to_right",
            Direction::RightToLeft => "right_to_left",
        }
    }

    /// The side whose edits are live in this direction.
    pub fn source(&self) -> Side {
        match self {
            Direction::LeftToRight => Side::Escaped,
            Direction::RightToLeft => Side::Raw,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two input surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Escaped,
    Raw,
}

impl Side {
    /// Direction that becomes active when this side gains focus.
    pub fn direction(&self) -> Direction {
        match self {
            Side::Escaped => Direction::LeftToRight,
            Side::Raw => Direction::RightToLeft,
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "escaped" | "left" => Ok(Side::Escaped),
            "raw" | "right" => Ok(Side::Raw),
            other => Err(format!("Unknown side '{}': expected 'escaped' or 'raw'", other)),
        }
    }
}

/// A failed decode as the controller reports it.
///
/// Every cause renders as [`INVALID_INPUT_MESSAGE`]; the underlying
/// [`DecodeError`] stays reachable through [`ConversionError::cause`] and
/// [`std::error::Error::source`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", INVALID_INPUT_MESSAGE)]
pub struct ConversionError {
    #[source]
    cause: DecodeError,
}

impl ConversionError {
    pub fn new(cause: DecodeError) -> Self {
        Self { cause }
    }

    pub fn message(&self) -> &'static str {
        INVALID_INPUT_MESSAGE
    }

    pub fn cause(&self) -> &DecodeError {
        &self.cause
    }

    pub fn kind(&self) -> DecodeErrorKind {
        self.cause.kind()
    }

    /// Diagnostic text of the underlying cause, e.g. the parser's position.
    pub fn detail(&self) -> String {
        self.cause.to_string()
    }
}

/// Read-only view of the controller for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    pub escaped_text: String,
    pub raw_text: String,
    pub direction: Direction,
    pub error_message: Option<String>,
}

/// A single discrete input from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    EscapedChanged(String),
    RawChanged(String),
    Focus(Side),
}

impl SyncEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SyncEvent::EscapedChanged(_) => "escaped_changed",
            SyncEvent::RawChanged(_) => "raw_changed",
            SyncEvent::Focus(_) => "focus",
        }
    }
}

/// Owns both buffers, the active direction and the last conversion error.
#[derive(Debug, Clone)]
pub struct SyncController {
    config: SyncConfig,
    direction: Direction,
    escaped: String,
    raw: String,
    error: Option<ConversionError>,
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncController {
    /// Start a session with the demonstration text on the escaped side.
    pub fn new() -> Self {
        Self::with_config(&SyncConfig::default())
    }

    /// Start a session from `config`.
    ///
    /// Nothing is derived at construction: the raw buffer starts empty even
    /// though the escaped buffer holds text, and stays that way until the
    /// first edit on the authoritative side.
    pub fn with_config(config: &SyncConfig) -> Self {
        Self {
            config: config.clone(),
            direction: config.initial_direction,
            escaped: config.initial_escaped.clone(),
            raw: String::new(),
            error: None,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn escaped(&self) -> &str {
        &self.escaped
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn error(&self) -> Option<&ConversionError> {
        self.error.as_ref()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn state(&self) -> SyncSnapshot {
        SyncSnapshot {
            escaped_text: self.escaped.clone(),
            raw_text: self.raw.clone(),
            direction: self.direction,
            error_message: self.error.as_ref().map(|e| e.message().to_string()),
        }
    }

    /// Route one event to its handler.
    pub fn apply(&mut self, event: SyncEvent) {
        tracing::debug!(event = event.name(), direction = %self.direction, "dispatching event");
        match event {
            SyncEvent::EscapedChanged(text) => self.on_escaped_changed(text),
            SyncEvent::RawChanged(text) => self.on_raw_changed(text),
            SyncEvent::Focus(side) => self.on_focus(side),
        }
    }

    /// Store new escaped text; decode it into the raw buffer when the escaped
    /// side is authoritative.
    pub fn on_escaped_changed(&mut self, text: impl Into<String>) {
        self.escaped = text.into();
        if self.direction != Direction::LeftToRight {
            tracing::debug!("escaped edit ignored while raw side is authoritative");
            return;
        }
        self.derive_raw();
    }

    /// Store new raw text; encode it into the escaped buffer when the raw side
    /// is authoritative.
    pub fn on_raw_changed(&mut self, text: impl Into<String>) {
        self.raw = text.into();
        if self.direction != Direction::RightToLeft {
            tracing::debug!("raw edit ignored while escaped side is authoritative");
            return;
        }
        self.derive_escaped();
    }

    /// Make `side` authoritative.
    ///
    /// Unless `resync_on_focus` is configured, the other buffer is left as it
    /// is, even when it no longer matches the newly authoritative one.
    pub fn on_focus(&mut self, side: Side) {
        let direction = side.direction();
        if direction != self.direction {
            tracing::debug!(from = %self.direction, to = %direction, "direction changed");
            self.direction = direction;
        }

        if self.config.resync_on_focus {
            match direction {
                Direction::LeftToRight => self.derive_raw(),
                Direction::RightToLeft => self.derive_escaped(),
            }
        }
    }

    /// Throw away the session and start over from the configured initial state.
    pub fn reset(&mut self) {
        tracing::debug!("session reset");
        *self = Self::with_config(&self.config);
    }

    fn derive_raw(&mut self) {
        if self.escaped.trim().is_empty() {
            self.raw.clear();
            self.error = None;
            return;
        }

        match codec::decode(&self.escaped) {
            Ok(raw) => {
                self.raw = raw;
                self.error = None;
            }
            Err(cause) => {
                // raw keeps its last good value
                tracing::debug!(error = %cause, "escaped text did not decode");
                self.error = Some(ConversionError::new(cause));
            }
        }
    }

    fn derive_escaped(&mut self) {
        self.escaped = codec::encode(&self.raw);
        self.error = None;
    }
}
