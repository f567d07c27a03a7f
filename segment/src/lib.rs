//! Text segmentation for typed speech input.
//!
//! This crate decides when a stream of keystrokes has produced a finished
//! segment of text, and cleans the segment up before it is handed to a
//! speech synthesizer. It knows nothing about networking or audio; callers
//! feed it text and read text back.

pub mod buffer;
pub mod detect;
pub mod normalize;
pub mod read_on;

pub use crate::buffer::InputBuffer;
pub use crate::detect::segment_ready;
pub use crate::normalize::fix_autoappend;
pub use crate::read_on::{DEFAULT_READ_ON, ReadOnSet};
