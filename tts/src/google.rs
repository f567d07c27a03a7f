//! Client for the Google Cloud Text-to-Speech REST API.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, Tts, TtsError, VoiceConfig};

/// Default API base. Overridable for proxies and tests.
pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com/v1/";

/// Google Cloud TTS client for one session's voice configuration.
#[derive(Clone)]
pub struct GoogleTts {
    endpoint: String,
    api_key: String,
    voice: VoiceConfig,
    client: Client,
}

impl GoogleTts {
    /// Create a client targeting `endpoint` (e.g. [`DEFAULT_ENDPOINT`]).
    ///
    /// An empty `api_key` is allowed; synthesis then fails with
    /// [`TtsError::MissingApiKey`] without touching the network, so a
    /// session without a credential degrades to silence instead of
    /// crashing.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, voice: VoiceConfig) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            voice,
            client: Client::new(),
        }
    }
}

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    input: TextInput<'a>,
    voice: VoiceSelection<'a>,
    #[serde(rename = "audioConfig")]
    audio_config: AudioConfig<'a>,
}

#[derive(Serialize)]
struct TextInput<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: &'a str,
    name: &'a str,
    ssml_gender: crate::SsmlGender,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig<'a> {
    audio_encoding: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    audio_content: String,
}

#[async_trait]
impl Tts for GoogleTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if self.api_key.is_empty() {
            return Err(TtsError::MissingApiKey);
        }

        let url = format!("{}text:synthesize", self.endpoint);
        let body = SynthesizeRequest {
            input: TextInput { text },
            voice: VoiceSelection {
                language_code: &self.voice.language_code,
                name: &self.voice.voice_name,
                ssml_gender: self.voice.gender,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };
        debug!(%text, language = %self.voice.language_code, "requesting synthesis");

        let resp = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TtsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: SynthesizeResponse = resp.json().await?;
        let audio = general_purpose::STANDARD.decode(data.audio_content)?;
        debug!(bytes = audio.len(), "synthesis complete");
        Ok(audio)
    }
}
