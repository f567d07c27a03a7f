//! Per-session configuration.

use segment::ReadOnSet;
use std::time::Duration;
use tts::{SsmlGender, VoiceConfig};

/// Playback concurrency when smooth read is off. Trades strict ordering
/// for lower latency.
pub const PARALLEL_CONCURRENCY: usize = 3;

/// Everything the pipeline needs to know about a session.
///
/// Constructed once, passed by reference, never mutated. The one runtime
/// toggle (smooth read) goes through [`Pipeline::set_smooth_read`]
/// because it acts on the live sequencer, not on this struct.
///
/// [`Pipeline::set_smooth_read`]: crate::Pipeline::set_smooth_read
#[derive(Debug, Clone)]
pub struct Config {
    /// Characters that end a segment, besides newline.
    pub read_on: ReadOnSet,
    pub language_code: String,
    /// Backend voice name; empty lets the backend pick.
    pub voice_name: String,
    pub gender: SsmlGender,
    /// Hold each finished segment briefly so a chord burst coalesces into
    /// one segment.
    pub no_break_phrases: bool,
    /// Strictly serialized playback (concurrency 1).
    pub smooth_read: bool,
    /// Rewrite the `<term><space>` auto-append artifact before speaking.
    pub fix_punctuation_autoappend: bool,
    /// Input buffer cap, in characters.
    pub max_input_length: usize,
    /// Chord coalescing window.
    pub chord_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_on: ReadOnSet::default(),
            language_code: "en-US".into(),
            voice_name: String::new(),
            gender: SsmlGender::default(),
            no_break_phrases: true,
            smooth_read: true,
            fix_punctuation_autoappend: true,
            max_input_length: 500,
            chord_delay: Duration::from_millis(10),
        }
    }
}

impl Config {
    /// Initial sequencer concurrency for this session.
    pub fn concurrency(&self) -> usize {
        if self.smooth_read {
            1
        } else {
            PARALLEL_CONCURRENCY
        }
    }

    /// The voice selection handed to the synthesis client.
    pub fn voice(&self) -> VoiceConfig {
        VoiceConfig {
            language_code: self.language_code.clone(),
            voice_name: self.voice_name.clone(),
            gender: self.gender,
        }
    }
}
