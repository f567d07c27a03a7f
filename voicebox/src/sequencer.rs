//! Ordered playback of synthesized clips.
//!
//! Synthesis calls race each other over the network, so clips can arrive
//! in any order. The sequencer restores the order their segments were
//! produced in: tasks enter a FIFO queue at emission time and are started
//! strictly in queue order as concurrency slots free up. With one slot
//! (smooth mode) playback is fully serialized and never overlaps; with
//! more slots tasks still *start* in order but may finish out of it.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, warn};

use crate::player::Player;

/// One clip waiting for its turn at the speaker.
///
/// The audio itself is deferred: the task carries the receiving end of a
/// oneshot that the synthesis call resolves whenever it finishes. The
/// sequencer only waits on it once the task reaches the front of the
/// queue and a slot is free.
pub struct PlaybackTask {
    /// Position in emission order, assigned when the segment is emitted.
    pub seq: u64,
    /// The segment text, kept for logging.
    pub text: String,
    audio: oneshot::Receiver<tts::Result<Vec<u8>>>,
}

impl PlaybackTask {
    /// Create a task plus the resolver the synthesis side completes.
    pub fn new(seq: u64, text: String) -> (Self, oneshot::Sender<tts::Result<Vec<u8>>>) {
        let (tx, rx) = oneshot::channel();
        (Self { seq, text, audio: rx }, tx)
    }
}

/// FIFO playback queue with a runtime-adjustable concurrency limit.
pub struct Sequencer {
    queue: mpsc::UnboundedSender<PlaybackTask>,
    limit: Arc<AtomicUsize>,
    outstanding: Arc<AtomicUsize>,
    worker: JoinHandle<()>,
}

impl Sequencer {
    /// Spawn the worker. `concurrency` is clamped to at least 1.
    pub fn start(player: Arc<dyn Player>, concurrency: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let limit = Arc::new(AtomicUsize::new(concurrency.max(1)));
        let outstanding = Arc::new(AtomicUsize::new(0));
        let worker = tokio::spawn(run(rx, player, limit.clone(), outstanding.clone()));
        Self {
            queue: tx,
            limit,
            outstanding,
            worker,
        }
    }

    /// Queue a task. Tasks start in enqueue order.
    pub fn enqueue(&self, task: PlaybackTask) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        if self.queue.send(task).is_err() {
            self.outstanding.fetch_sub(1, Ordering::SeqCst);
            warn!("sequencer is closed; dropping clip");
        }
    }

    /// Change the concurrency limit. Applies to tasks started after the
    /// call; running tasks are not interrupted.
    pub fn set_concurrency(&self, concurrency: usize) {
        self.limit.store(concurrency.max(1), Ordering::SeqCst);
    }

    /// Wait until nothing is queued or playing.
    pub async fn drain(&self) {
        while self.outstanding.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Tear the sequencer down, letting queued and running tasks finish.
    pub async fn close(self) {
        let Self { queue, worker, .. } = self;
        drop(queue);
        if let Err(e) = worker.await {
            warn!(?e, "sequencer worker failed");
        }
    }
}

async fn run(
    mut queue: mpsc::UnboundedReceiver<PlaybackTask>,
    player: Arc<dyn Player>,
    limit: Arc<AtomicUsize>,
    outstanding: Arc<AtomicUsize>,
) {
    let mut playing = JoinSet::new();
    loop {
        let cap = limit.load(Ordering::SeqCst);
        tokio::select! {
            task = queue.recv(), if playing.len() < cap => {
                let Some(task) = task else { break };
                let player = player.clone();
                let outstanding = outstanding.clone();
                playing.spawn(async move {
                    start(task, player.as_ref()).await;
                    outstanding.fetch_sub(1, Ordering::SeqCst);
                });
            }
            Some(_) = playing.join_next(), if !playing.is_empty() => {}
        }
    }
    // Queue closed; let running clips finish.
    while playing.join_next().await.is_some() {}
}

/// Resolve one task's synthesis result and play it. Any failure frees the
/// slot and the queue moves on.
async fn start(task: PlaybackTask, player: &dyn Player) {
    let PlaybackTask { seq, text, audio } = task;
    let clip = match audio.await {
        Ok(Ok(clip)) => clip,
        Ok(Err(e)) => {
            warn!(seq, %text, error = %e, "synthesis failed; dropping clip");
            return;
        }
        Err(_) => {
            debug!(seq, "synthesis was abandoned before completing");
            return;
        }
    };
    debug!(seq, bytes = clip.len(), "playback starting");
    if let Err(e) = player.play(clip).await {
        warn!(seq, %text, error = %e, "playback failed");
    }
}
