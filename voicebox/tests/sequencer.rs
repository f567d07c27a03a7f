use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tts::TtsError;
use voicebox::{PlaybackTask, Player, Sequencer};

/// Records the first byte of each clip in the order playback starts.
#[derive(Clone, Default)]
struct RecordingPlayer {
    starts: Arc<Mutex<Vec<u8>>>,
    hold: Duration,
}

#[async_trait]
impl Player for RecordingPlayer {
    async fn play(&self, audio: Vec<u8>) -> anyhow::Result<()> {
        self.starts.lock().unwrap().push(audio[0]);
        tokio::time::sleep(self.hold).await;
        Ok(())
    }
}

#[tokio::test]
async fn smooth_mode_starts_clips_in_emission_order() {
    let player = Arc::new(RecordingPlayer::default());
    let sequencer = Sequencer::start(player.clone(), 1);

    let mut resolvers = Vec::new();
    for i in 1..=4u8 {
        let (task, resolve) = PlaybackTask::new(u64::from(i), format!("segment {i}"));
        sequencer.enqueue(task);
        resolvers.push((i, resolve));
    }

    // Synthesis completes in reverse order: 4 first, 1 last.
    for (i, resolve) in resolvers.into_iter().rev() {
        resolve.send(Ok(vec![i])).unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    sequencer.close().await;
    assert_eq!(*player.starts.lock().unwrap(), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn failed_synthesis_frees_the_slot() {
    let player = Arc::new(RecordingPlayer::default());
    let sequencer = Sequencer::start(player.clone(), 1);

    let (t1, r1) = PlaybackTask::new(1, "one".into());
    let (t2, r2) = PlaybackTask::new(2, "two".into());
    let (t3, r3) = PlaybackTask::new(3, "three".into());
    sequencer.enqueue(t1);
    sequencer.enqueue(t2);
    sequencer.enqueue(t3);

    r1.send(Ok(vec![1])).unwrap();
    r2.send(Err(TtsError::MissingApiKey)).unwrap();
    r3.send(Ok(vec![3])).unwrap();

    sequencer.close().await;
    assert_eq!(*player.starts.lock().unwrap(), vec![1, 3]);
}

#[tokio::test]
async fn abandoned_synthesis_frees_the_slot() {
    let player = Arc::new(RecordingPlayer::default());
    let sequencer = Sequencer::start(player.clone(), 1);

    let (t1, r1) = PlaybackTask::new(1, "one".into());
    let (t2, r2) = PlaybackTask::new(2, "two".into());
    sequencer.enqueue(t1);
    sequencer.enqueue(t2);

    drop(r1);
    r2.send(Ok(vec![2])).unwrap();

    sequencer.close().await;
    assert_eq!(*player.starts.lock().unwrap(), vec![2]);
}

/// Fails playback of one clip and records every start.
struct FlakyPlayer {
    starts: Arc<Mutex<Vec<u8>>>,
    fail_on: u8,
}

#[async_trait]
impl Player for FlakyPlayer {
    async fn play(&self, audio: Vec<u8>) -> anyhow::Result<()> {
        self.starts.lock().unwrap().push(audio[0]);
        if audio[0] == self.fail_on {
            anyhow::bail!("clip refused to play");
        }
        Ok(())
    }
}

#[tokio::test]
async fn playback_failure_does_not_stall_the_queue() {
    let starts = Arc::new(Mutex::new(Vec::new()));
    let player = Arc::new(FlakyPlayer {
        starts: starts.clone(),
        fail_on: 2,
    });
    let sequencer = Sequencer::start(player, 1);

    for i in 1..=3u8 {
        let (task, resolve) = PlaybackTask::new(u64::from(i), format!("segment {i}"));
        resolve.send(Ok(vec![i])).unwrap();
        sequencer.enqueue(task);
    }

    sequencer.close().await;
    assert_eq!(*starts.lock().unwrap(), vec![1, 2, 3]);
}

/// Tracks how many clips play at once.
#[derive(Clone, Default)]
struct GaugePlayer {
    current: Arc<AtomicUsize>,
    max: Arc<AtomicUsize>,
}

#[async_trait]
impl Player for GaugePlayer {
    async fn play(&self, _audio: Vec<u8>) -> anyhow::Result<()> {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        self.current.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

fn resolved_task(seq: u64) -> PlaybackTask {
    let (task, resolve) = PlaybackTask::new(seq, format!("segment {seq}"));
    resolve.send(Ok(vec![seq as u8])).unwrap();
    task
}

#[tokio::test]
async fn smooth_mode_never_overlaps() {
    let player = Arc::new(GaugePlayer::default());
    let sequencer = Sequencer::start(player.clone(), 1);
    for seq in 1..=3 {
        sequencer.enqueue(resolved_task(seq));
    }
    sequencer.close().await;
    assert_eq!(player.max.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn parallel_mode_respects_the_limit() {
    let player = Arc::new(GaugePlayer::default());
    let sequencer = Sequencer::start(player.clone(), 2);
    for seq in 1..=4 {
        sequencer.enqueue(resolved_task(seq));
    }
    sequencer.close().await;
    assert_eq!(player.max.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn concurrency_change_applies_to_later_clips() {
    let player = Arc::new(GaugePlayer::default());
    let sequencer = Sequencer::start(player.clone(), 1);

    sequencer.enqueue(resolved_task(1));
    sequencer.enqueue(resolved_task(2));
    sequencer.drain().await;
    assert_eq!(player.max.load(Ordering::SeqCst), 1);

    sequencer.set_concurrency(2);
    sequencer.enqueue(resolved_task(3));
    sequencer.enqueue(resolved_task(4));
    sequencer.close().await;
    assert_eq!(player.max.load(Ordering::SeqCst), 2);
}
