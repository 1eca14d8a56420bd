use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::storage::default_high_score_path;

/// Turret shooter for the terminal.  Aim with the mouse, click or press
/// Space to fire, keep your balance above zero.
#[derive(Parser, Debug, Clone)]
#[command(name = "money_shooter", version)]
pub struct Config {
    /// Target frames per second.  Speeds are per frame, so this is also the
    /// game speed.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Seed for enemy spawns; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where the high score is kept.
    #[arg(long, value_name = "PATH")]
    pub high_score_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long)]
    pub no_save: bool,

    /// Disable the terminal bell.
    #[arg(long)]
    pub mute: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info").
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file
            .clone()
            .unwrap_or_else(default_high_score_path)
    }
}
