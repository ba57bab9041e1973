/// Melody Console - headless music player driven from the terminal
use clap::Parser;
use melody_console::{
    config::ConsoleConfig, demo::demo_tracks, media, monitor, MediaClock, Shell, SimulatedMedia,
};
use melody_playback::{PlaybackController, PlayerSession};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melody-console")]
#[command(about = "Melody Player in the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (default: melody.toml if present)
    #[arg(short, long, env = "MELODY_CONFIG")]
    config: Option<PathBuf>,

    /// Start with the demo tracks in the track list
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr, so command output stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "melody_console=info,melody_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = ConsoleConfig::load(cli.config.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Melody Console");
    tracing::debug!(?config, "Configuration loaded");

    // Media element and the clock that drives it
    let clock = MediaClock::new(config.media.track_seconds);
    let element = SimulatedMedia::new(clock.clone(), &config.media.accepted_extensions);
    let controller = PlaybackController::with_media(config.playback.clone(), Box::new(element));

    let (player, session) = PlayerSession::spawn(controller);
    let clock_task = media::spawn_clock(clock, player.clone(), config.media.tick_interval());
    let event_log = monitor::spawn_event_log(&player);

    if cli.demo || config.library.demo_tracks {
        player.set_current_playlist(demo_tracks(), 0).await?;
        tracing::info!("Loaded demo tracks");
    }

    println!("Type 'help' for commands.");
    let mut shell = Shell::new(player.clone());
    let mut stdout = std::io::stdout();
    let result = shell
        .run(BufReader::new(tokio::io::stdin()), &mut stdout)
        .await;

    // Shut down
    clock_task.abort();
    if !player.is_closed() {
        player.shutdown().await?;
    }
    session.await?;
    event_log.abort();

    tracing::info!("Melody Console stopped");
    result.map_err(Into::into)
}
