//! Speech synthesis boundary.
//!
//! One text segment in, one audio clip out. Each segment gets exactly one
//! synthesis attempt; failures are reported to the caller and never
//! retried here. Calls for different segments may run concurrently;
//! ordering is the playback sequencer's job, not this crate's.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub mod google;

pub use crate::google::{DEFAULT_ENDPOINT, GoogleTts};

#[derive(Debug, Error)]
pub enum TtsError {
    /// No credential configured; synthesis is skipped without a request.
    #[error("no API key configured")]
    MissingApiKey,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("synthesis request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid audio payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, TtsError>;

/// Voice gender as the synthesis API spells it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlGender {
    #[default]
    Female,
    Male,
}

impl FromStr for SsmlGender {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            other => Err(format!("unknown gender: {other}")),
        }
    }
}

/// Voice selection passed through to the synthesis backend.
#[derive(Debug, Clone, Default)]
pub struct VoiceConfig {
    /// BCP-47 language code, e.g. `en-US`.
    pub language_code: String,
    /// Backend voice name; empty lets the backend pick.
    pub voice_name: String,
    pub gender: SsmlGender,
}

/// Text-to-speech engine interface.
#[async_trait]
pub trait Tts: Send + Sync {
    /// Synthesize `text` into one audio clip.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}
