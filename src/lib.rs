pub mod codec;
pub mod config;
pub mod sync;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use codec::{decode, encode, DecodeError, DecodeErrorKind};
pub use config::SyncConfig;
pub use sync::{
    ConversionError, Direction, Side, SyncController, SyncEvent, SyncSnapshot,
    INVALID_INPUT_MESSAGE,
};

/// Error type for escapify operations
#[derive(Debug, thiserror::Error)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum EscapifyError {
    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Config error: {message}")]
    Config { message: String },
}

impl From<DecodeError> for EscapifyError {
    fn from(err: DecodeError) -> Self {
        EscapifyError::Decode { message: err.to_string() }
    }
}

impl From<serde_json::Error> for EscapifyError {
    fn from(err: serde_json::Error) -> Self {
        EscapifyError::Config { message: err.to_string() }
    }
}

/// Decode a JSON string literal into raw text
///
/// # Arguments
/// * `escaped` - A JSON string literal, quotes included
///
/// # Returns
/// * `Ok(String)` - The decoded text
/// * `Err(EscapifyError)` - If the input is not valid JSON or not a string
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn decode_json_string(escaped: String) -> Result<String, EscapifyError> {
    Ok(codec::decode(&escaped)?)
}

/// Encode raw text as a JSON string literal
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn encode_json_string(raw: String) -> String {
    codec::encode(&raw)
}

// Generate the UniFFI scaffolding (0.29+ uses proc-macros)
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
