use clap::Parser;
use segment::ReadOnSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::broadcast;
use tts::{GoogleTts, SsmlGender};
use voicebox::{Config, Event, Pipeline, Player, init_logging};

/// Read typed text aloud, segment by segment.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Google Cloud API key
    #[arg(long, env = "VOICEBOX_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// Synthesis API base URL
    #[arg(long, env = "VOICEBOX_TTS_ENDPOINT", default_value = tts::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// BCP-47 language code
    #[arg(long, default_value = "en-US")]
    language: String,

    /// Voice name; empty lets the backend pick
    #[arg(long, default_value = "")]
    voice: String,

    /// Voice gender: female or male
    #[arg(long, default_value = "female")]
    gender: SsmlGender,

    /// Characters that end a segment (newline always does)
    #[arg(long, default_value = segment::DEFAULT_READ_ON)]
    read_on: String,

    /// Emit segments immediately instead of coalescing chord bursts
    #[arg(long)]
    break_phrases: bool,

    /// Allow clips to play concurrently instead of strictly in order
    #[arg(long)]
    no_smooth: bool,

    /// Skip the punctuation auto-append fix
    #[arg(long)]
    raw_punctuation: bool,

    /// Input buffer cap, in characters
    #[arg(long, default_value_t = 500)]
    max_input_length: usize,

    /// Chord coalescing window, in milliseconds
    #[arg(long, default_value_t = 10)]
    chord_delay_ms: u64,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    let config = Config {
        read_on: ReadOnSet::new(&cli.read_on),
        language_code: cli.language,
        voice_name: cli.voice,
        gender: cli.gender,
        no_break_phrases: !cli.break_phrases,
        smooth_read: !cli.no_smooth,
        fix_punctuation_autoappend: !cli.raw_punctuation,
        max_input_length: cli.max_input_length,
        chord_delay: Duration::from_millis(cli.chord_delay_ms),
    };

    let tts = Arc::new(GoogleTts::new(cli.endpoint, cli.api_key, config.voice()));
    let (events, _) = broadcast::channel(64);

    #[cfg(feature = "audio")]
    let player: Arc<dyn Player> = Arc::new(voicebox::RodioPlayer::new());
    #[cfg(not(feature = "audio"))]
    let player: Arc<dyn Player> = Arc::new(voicebox::ChannelPlayer::new(events.clone()));

    let pipeline = Pipeline::new(config, tts, player, events.clone());

    // Transcript: echo each spoken segment on its own line.
    let mut transcript = events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = transcript.recv().await {
            if let Event::SegmentRead { text, .. } = event {
                println!("{}", text.trim_end());
            }
        }
    });

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        pipeline.push_input(&format!("{line}\n"));
    }

    pipeline.drain().await;
    Ok(())
}
