/// All game entity types — pure data, no simulation logic.

use std::collections::BTreeMap;

// ── Enemy templates ───────────────────────────────────────────────────────────

/// Immutable template for one money denomination.
#[derive(Debug, PartialEq)]
pub struct EnemyArchetype {
    pub name: &'static str,
    /// Amount earned when shot, lost when it reaches the player.
    pub value: u32,
    /// World units per frame.
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    /// Independent chance out of 100 to be eligible on each spawn attempt.
    pub spawn_weight: u32,
}

// ── Round status ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Active,
    Over,
}

// ── Events emitted by state transitions ───────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Fire,
    Kill,
    GameOver,
}

/// Side effects requested by a transition.  The simulation never acts on
/// these itself; the game loop routes them to popups, audio and storage.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Floating score indicator.  Positive for kills, negative for hits.
    ScoreDelta { amount: i64, x: f32, y: f32 },
    Sound(Sound),
    /// A new best score was reached and should be persisted.
    HighScore(i64),
}

// ── Moving entities ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub archetype: &'static EnemyArchetype,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub value: u32,
}

impl Enemy {
    /// Place a fresh enemy of the given archetype at `(x, y)`.
    pub fn spawn(archetype: &'static EnemyArchetype, x: f32, y: f32) -> Self {
        Enemy {
            x,
            y,
            archetype,
            width: archetype.width,
            height: archetype.height,
            speed: archetype.speed,
            value: archetype.value,
        }
    }
}

/// The turret.  Sits at the playfield centre and only rotates.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Aim in radians, measured like `atan2` (0 = right, y grows downward).
    pub angle: f32,
    pub width: f32,
    pub height: f32,
}

// ── Per-round kill statistics ─────────────────────────────────────────────────

/// Kill counts keyed by denomination.  The key set is fixed when the
/// stats are created; every key stays present even at zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HitStats {
    counts: BTreeMap<u32, u32>,
}

impl HitStats {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        HitStats {
            counts: values.into_iter().map(|v| (v, 0)).collect(),
        }
    }

    /// Count one kill.  Values outside the key set are ignored.
    pub fn record(&mut self, value: u32) {
        if let Some(count) = self.counts.get_mut(&value) {
            *count += 1;
        }
    }

    pub fn get(&self, value: u32) -> Option<u32> {
        self.counts.get(&value).copied()
    }

    /// `(value, count)` pairs in ascending denomination order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.counts.iter().map(|(&v, &c)| (v, c))
    }

    pub fn total_kills(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Sum of value × count over all denominations.
    pub fn total_earned(&self) -> i64 {
        self.counts
            .iter()
            .map(|(&v, &c)| i64::from(v) * i64::from(c))
            .sum()
    }

    pub fn clear(&mut self) {
        self.counts.values_mut().for_each(|c| *c = 0);
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation owns.  Cloneable so the update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Current balance.  Goes negative exactly once per round, which ends it.
    pub score: i64,
    /// Best score across rounds; survives `new_round`.
    pub high_score: i64,
    pub hit_stats: HitStats,
    pub status: RoundStatus,
    /// Playfield size in world units.
    pub width: f32,
    pub height: f32,
}

impl RoundState {
    pub fn is_over(&self) -> bool {
        self.status == RoundStatus::Over
    }
}
