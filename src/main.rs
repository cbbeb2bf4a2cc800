use anyhow::{Context, Result};
use clap::Parser;
use snake_odyssey::audio::TerminalBell;
use snake_odyssey::game::GameConfig;
use snake_odyssey::modes::HumanMode;
use snake_odyssey::storage::open_store;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_odyssey")]
#[command(version, about = "Snake on a wraparound grid, in your terminal")]
struct Cli {
    /// JSON game configuration; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Where the best score is kept (defaults to the platform data directory)
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Start with sound off (toggle in game with M)
    #[arg(long)]
    mute: bool,

    /// Write diagnostics to this file; RUST_LOG adjusts the filter
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    snake_odyssey::logging::init(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let store = open_store(cli.high_score_file.as_deref());
    tracing::info!(
        "Starting on a {}x{} grid",
        config.grid_width,
        config.grid_height
    );

    let mut human_mode = HumanMode::new(config, store, TerminalBell, !cli.mute);
    human_mode.run().await?;

    Ok(())
}
