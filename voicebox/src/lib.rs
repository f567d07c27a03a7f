//! Typed-text-to-speech pipeline.
//!
//! Keystrokes go in one end; ordered, non-overlapping audio comes out the
//! other. The pieces, in flow order:
//!
//! 1. [`Pipeline::push_input`] appends each input mutation to a capped
//!    buffer and runs segment detection on its tail.
//! 2. A finished segment is normalized against the delimiter auto-append
//!    quirk and, when chord coalescing is on, held back for a few
//!    milliseconds so a burst of near-simultaneous characters lands in one
//!    segment.
//! 3. The segment is handed to a [`tts::Tts`] backend; calls may race.
//! 4. The [`Sequencer`] restores emission order: clips start in the order
//!    their segments were produced and, in smooth mode, never overlap.
//!
//! Everything is constructed explicitly per session; there is no global
//! state.

use serde::{Deserialize, Serialize};

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod player;
pub mod sequencer;

pub use crate::config::{Config, PARALLEL_CONCURRENCY};
pub use crate::logging::init_logging;
pub use crate::pipeline::Pipeline;
pub use crate::player::{ChannelPlayer, Player};
pub use crate::sequencer::{PlaybackTask, Sequencer};

#[cfg(feature = "audio")]
pub use crate::player::RodioPlayer;

/// Pipeline notifications for transcript displays and other listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "PascalCase", content = "data")]
pub enum Event {
    /// A segment was emitted and sent for synthesis.
    SegmentRead { seq: u64, text: String },
    /// One synthesized clip, base64-encoded, from [`ChannelPlayer`].
    Speech { audio: String },
}
