use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use clap::Parser;

use money_shooter::audio::{dispatch, AudioSink, Silent, TerminalBell};
use money_shooter::config::Config;
use money_shooter::entities::{GameEvent, Sound};
use money_shooter::error::{GameError, Result};
use money_shooter::popups::{PopupBoard, POPUP_LIFETIME};
use money_shooter::storage::{persist, FileHighScore, HighScoreStore, MemoryHighScore};

fn mixed_events() -> Vec<GameEvent> {
    vec![
        GameEvent::Sound(Sound::Fire),
        GameEvent::ScoreDelta { amount: 50, x: 100.0, y: 200.0 },
        GameEvent::Sound(Sound::Kill),
        GameEvent::HighScore(50),
        GameEvent::ScoreDelta { amount: -10, x: 500.0, y: 460.0 },
        GameEvent::Sound(Sound::GameOver),
    ]
}

// ── Popups ────────────────────────────────────────────────────────────────────

#[test]
fn popups_take_only_score_deltas() {
    let now = Instant::now();
    let mut board = PopupBoard::new();
    board.absorb(&mixed_events(), now);
    let labels: Vec<String> = board.iter().map(|p| p.label()).collect();
    assert_eq!(labels, vec!["+50", "-10"]);
    assert!(board.iter().next().unwrap().is_positive());
    assert!(!board.iter().nth(1).unwrap().is_positive());
}

#[test]
fn popups_expire_after_lifetime() {
    let now = Instant::now();
    let mut board = PopupBoard::new();
    board.absorb(&mixed_events(), now);
    board.prune(now + POPUP_LIFETIME - Duration::from_millis(1));
    assert_eq!(board.len(), 2);
    board.prune(now + POPUP_LIFETIME);
    assert!(board.is_empty());
}

#[test]
fn popups_drift_upward() {
    let now = Instant::now();
    let mut board = PopupBoard::new();
    board.absorb(&[GameEvent::ScoreDelta { amount: 5, x: 100.0, y: 200.0 }], now);
    let popup = board.iter().next().unwrap();
    assert_eq!(popup.position_at(now), (100.0, 200.0));
    let (_, y) = popup.position_at(now + POPUP_LIFETIME / 2);
    assert_relative_eq!(y, 180.0, epsilon = 1e-3);
    let (_, y) = popup.position_at(now + POPUP_LIFETIME * 3);
    assert_relative_eq!(y, 160.0);
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct BrokenSpeaker {
    attempts: usize,
}

impl AudioSink for BrokenSpeaker {
    fn play(&mut self, _sound: Sound) -> Result<()> {
        self.attempts += 1;
        Err(GameError::Audio("no device".into()))
    }
}

#[test]
fn dispatch_survives_failing_sink() {
    let mut sink = BrokenSpeaker::default();
    dispatch(&mut sink, &mixed_events());
    assert_eq!(sink.attempts, 3);
}

#[test]
fn bell_rings_for_kill_and_game_over_only() {
    let mut bell = TerminalBell::new(Vec::new());
    dispatch(&mut bell, &mixed_events());
    assert_eq!(bell.into_inner(), b"\x07\x07".to_vec());
}

#[test]
fn silent_sink_accepts_everything() {
    let mut sink = Silent;
    assert!(sink.play(Sound::GameOver).is_ok());
}

// ── Storage ───────────────────────────────────────────────────────────────────

#[test]
fn missing_file_loads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHighScore::new(dir.path().join("score"));
    assert_eq!(store.load(), 0);
}

#[test]
fn malformed_file_loads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    std::fs::write(&path, "lots of money").unwrap();
    assert_eq!(FileHighScore::new(&path).load(), 0);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("score");
    std::fs::write(&path, "  1234\n").unwrap();
    assert_eq!(FileHighScore::new(&path).load(), 1234);
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileHighScore::new(dir.path().join("score"));
    store.save(777).unwrap();
    assert_eq!(store.load(), 777);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "777");
}

#[test]
fn persist_saves_only_high_scores() {
    let mut store = MemoryHighScore::default();
    persist(&mut store, &mixed_events());
    assert_eq!(store.saves, 1);
    assert_eq!(store.load(), 50);
}

#[test]
fn persist_survives_unwritable_path() {
    let dir = tempfile::tempdir().unwrap();
    // A directory can't be overwritten with a file.
    let mut store = FileHighScore::new(dir.path());
    assert!(store.save(1).is_err());
    persist(&mut store, &[GameEvent::HighScore(10)]);
}

// ── Config ────────────────────────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = Config::try_parse_from(["money_shooter"]).unwrap();
    assert_eq!(config.fps, 60);
    assert_eq!(config.seed, None);
    assert!(!config.mute);
    assert!(!config.no_save);
    assert_eq!(config.frame_duration(), Duration::from_secs(1) / 60);
    assert!(config.high_score_path().ends_with(".money_shooter_score"));
}

#[test]
fn config_flags() {
    let config = Config::try_parse_from([
        "money_shooter",
        "--fps",
        "30",
        "--seed",
        "7",
        "--mute",
        "--no-save",
        "--high-score-file",
        "/tmp/best",
        "--log-file",
        "/tmp/game.log",
    ])
    .unwrap();
    assert_eq!(config.fps, 30);
    assert_eq!(config.seed, Some(7));
    assert!(config.mute);
    assert!(config.no_save);
    assert_eq!(config.high_score_path(), std::path::PathBuf::from("/tmp/best"));
    assert_eq!(config.log_file.as_deref(), Some(std::path::Path::new("/tmp/game.log")));
}

#[test]
fn config_rejects_zero_fps() {
    assert!(Config::try_parse_from(["money_shooter", "--fps", "0"]).is_err());
}
