//! The segmentation-and-playback pipeline.

use segment::{InputBuffer, fix_autoappend, segment_ready};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};
use tts::Tts;

use crate::Event;
use crate::config::{Config, PARALLEL_CONCURRENCY};
use crate::player::Player;
use crate::sequencer::{PlaybackTask, Sequencer};

/// One session's worth of pipeline state.
///
/// All handles are passed in at construction; nothing reaches for globals.
/// Input arrives through [`push_input`](Pipeline::push_input), which runs
/// on the caller's task. Only the chord timer, synthesis calls, and
/// playback are asynchronous.
pub struct Pipeline {
    config: Config,
    buffer: Mutex<InputBuffer>,
    timer_running: AtomicBool,
    next_seq: AtomicU64,
    tts: Arc<dyn Tts>,
    sequencer: Sequencer,
    events: broadcast::Sender<Event>,
}

impl Pipeline {
    /// Wire up a session. Transcript events go out over `events`.
    pub fn new(
        config: Config,
        tts: Arc<dyn Tts>,
        player: Arc<dyn Player>,
        events: broadcast::Sender<Event>,
    ) -> Arc<Self> {
        let sequencer = Sequencer::start(player, config.concurrency());
        let buffer = Mutex::new(InputBuffer::new(config.max_input_length));
        Arc::new(Self {
            config,
            buffer,
            timer_running: AtomicBool::new(false),
            next_seq: AtomicU64::new(1),
            tts,
            sequencer,
            events,
        })
    }

    /// Listen for transcript and speech events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    /// Feed one input mutation.
    ///
    /// The chunk is appended to the buffer (which caps itself) before
    /// anything else, so keystrokes arriving while a chord timer is
    /// pending still land in the segment the timer will emit. Detection
    /// itself is suppressed while the timer runs.
    pub fn push_input(self: &Arc<Self>, chunk: &str) {
        let ready = {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.push_str(chunk);
            segment_ready(buffer.as_str(), &self.config.read_on)
        };
        if self.timer_running.load(Ordering::SeqCst) || !ready {
            return;
        }

        if self.config.no_break_phrases {
            self.timer_running.store(true, Ordering::SeqCst);
            let pipeline = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(pipeline.config.chord_delay).await;
                pipeline.emit();
                pipeline.timer_running.store(false, Ordering::SeqCst);
            });
        } else {
            self.emit();
        }
    }

    /// Emit whatever the buffer holds right now.
    ///
    /// No-op when normalization leaves nothing speakable, including the
    /// case where the buffer was cleared while a chord timer was pending.
    fn emit(self: &Arc<Self>) {
        let raw = self.buffer.lock().unwrap().take();
        let text = if self.config.fix_punctuation_autoappend {
            fix_autoappend(&raw, &self.config.read_on)
        } else {
            raw
        };
        if text.trim().is_empty() {
            debug!("segment empty after normalization; skipping");
            return;
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        info!(seq, %text, "segment emitted");
        let _ = self.events.send(Event::SegmentRead {
            seq,
            text: text.clone(),
        });

        // Enqueue before the synthesis call is spawned so queue order is
        // emission order. The task resolves the clip lazily.
        let (task, resolve) = PlaybackTask::new(seq, text.clone());
        self.sequencer.enqueue(task);
        let tts = self.tts.clone();
        tokio::spawn(async move {
            // A dropped receiver just means the task was abandoned.
            let _ = resolve.send(tts.synthesize(&text).await);
        });
    }

    /// Toggle smooth read at runtime. Takes effect for clips started
    /// after the call.
    pub fn set_smooth_read(&self, smooth: bool) {
        let concurrency = if smooth { 1 } else { PARALLEL_CONCURRENCY };
        self.sequencer.set_concurrency(concurrency);
    }

    /// Reset the input buffer. A pending chord timer then emits nothing.
    pub fn clear(&self) {
        self.buffer.lock().unwrap().clear();
    }

    /// Wait for a pending chord timer and all queued playback to finish.
    pub async fn drain(&self) {
        while self.timer_running.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        self.sequencer.drain().await;
    }
}
