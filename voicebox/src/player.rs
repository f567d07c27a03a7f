//! The playback boundary.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use tokio::sync::broadcast;
use tracing::error;

use crate::Event;

/// Plays one decoded audio clip.
///
/// The returned future resolves when playback ends; an error is the
/// playback-errored event. Implementations must be `Send + Sync` so the
/// sequencer can drive them from its worker task.
#[async_trait]
pub trait Player: Send + Sync {
    async fn play(&self, audio: Vec<u8>) -> anyhow::Result<()>;
}

/// [`Player`] that forwards clips as base64 [`Event::Speech`] messages
/// instead of playing them locally. Useful when a UI on the other side of
/// a socket owns the audio element.
#[derive(Clone)]
pub struct ChannelPlayer {
    events: broadcast::Sender<Event>,
}

impl ChannelPlayer {
    pub fn new(events: broadcast::Sender<Event>) -> Self {
        Self { events }
    }
}

#[async_trait]
impl Player for ChannelPlayer {
    async fn play(&self, audio: Vec<u8>) -> anyhow::Result<()> {
        let b64 = general_purpose::STANDARD.encode(audio);
        if self.events.send(Event::Speech { audio: b64 }).is_err() {
            error!("failed sending speech clip; no listeners");
        }
        Ok(())
    }
}

/// [`Player`] for the local default output device.
#[cfg(feature = "audio")]
pub struct RodioPlayer;

#[cfg(feature = "audio")]
impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "audio")]
impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "audio")]
#[async_trait]
impl Player for RodioPlayer {
    async fn play(&self, audio: Vec<u8>) -> anyhow::Result<()> {
        // rodio wants a blocking context; the stream handle must outlive
        // the sink.
        tokio::task::spawn_blocking(move || -> anyhow::Result<()> {
            let (_stream, handle) = rodio::OutputStream::try_default()?;
            let sink = rodio::Sink::try_new(&handle)?;
            let source = rodio::Decoder::new(std::io::Cursor::new(audio))?;
            sink.append(source);
            sink.sleep_until_end();
            Ok(())
        })
        .await?
    }
}
