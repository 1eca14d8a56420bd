/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `RoundState` (and, where needed, an RNG handle) and returns a brand-new
/// `RoundState`, together with the `GameEvent`s the caller should act on.
/// Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::{debug, info, trace};

use crate::catalog;
use crate::entities::{
    Enemy, GameEvent, HitStats, Player, Projectile, RoundState, RoundStatus, Sound,
};

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Two entities closer than this (centre to centre) have collided.
pub const CONTACT_RADIUS: f32 = 60.0;

/// Projectile speed in world units per frame.
pub const PROJECTILE_SPEED: f32 = 8.0;

/// Muzzle position relative to the turret centre at angle 0.
/// Rotates with the turret.
pub const MUZZLE_OFFSET: (f32, f32) = (-40.0, 0.0);

/// How far outside the playfield new enemies appear.
pub const SPAWN_MARGIN: f32 = 60.0;

/// Every this many points of balance adds one spawn attempt per wave.
pub const SCORE_PER_EXTRA_SPAWN: i64 = 500;

pub const PLAYER_WIDTH: f32 = 140.0;
pub const PLAYER_HEIGHT: f32 = 90.0;

/// Player-hit indicators are shown this far above the turret centre.
const HIT_POPUP_RISE: f32 = 40.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state for a playfield of the given size (world units).
pub fn init_state(width: f32, height: f32, high_score: i64) -> RoundState {
    RoundState {
        player: Player {
            x: width / 2.0,
            y: height / 2.0,
            angle: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
        },
        enemies: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        high_score,
        hit_stats: HitStats::new(catalog::values()),
        status: RoundStatus::Active,
        width,
        height,
    }
}

// ── Round lifecycle ───────────────────────────────────────────────────────────

/// Start over: balance, entities and kill stats are reset.  Aim, viewport
/// and the high score carry over.
pub fn new_round(state: &RoundState) -> RoundState {
    if state.is_over() {
        info!(score = state.score, "starting a new round");
    }
    let mut hit_stats = state.hit_stats.clone();
    hit_stats.clear();
    RoundState {
        enemies: Vec::new(),
        projectiles: Vec::new(),
        score: 0,
        hit_stats,
        status: RoundStatus::Active,
        ..state.clone()
    }
}

/// Adopt a new viewport and recentre the turret.  The round keeps going.
pub fn resize(state: &RoundState, width: f32, height: f32) -> RoundState {
    debug!(width, height, "viewport resized");
    RoundState {
        player: Player {
            x: width / 2.0,
            y: height / 2.0,
            ..state.player.clone()
        },
        width,
        height,
        ..state.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Turn the turret toward `(target_x, target_y)`.  Works in every state.
pub fn set_aim(state: &RoundState, target_x: f32, target_y: f32) -> RoundState {
    let angle = (target_y - state.player.y).atan2(target_x - state.player.x);
    RoundState {
        player: Player {
            angle,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Fire one projectile from the muzzle along the current aim.
pub fn fire(state: &RoundState) -> (RoundState, Vec<GameEvent>) {
    if state.is_over() {
        return (state.clone(), Vec::new());
    }
    let p = &state.player;
    let (sin, cos) = p.angle.sin_cos();
    let (ox, oy) = MUZZLE_OFFSET;
    let projectile = Projectile {
        x: p.x + ox * cos - oy * sin,
        y: p.y + ox * sin + oy * cos,
        vx: cos * PROJECTILE_SPEED,
        vy: sin * PROJECTILE_SPEED,
    };
    let mut projectiles = state.projectiles.clone();
    projectiles.push(projectile);
    (
        RoundState {
            projectiles,
            ..state.clone()
        },
        vec![GameEvent::Sound(Sound::Fire)],
    )
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Spawn attempts per wave: one, plus one per full `SCORE_PER_EXTRA_SPAWN`.
///
/// Uses floor division, so a negative balance lowers the count; it never
/// drops below zero.
pub fn spawn_count(score: i64) -> u32 {
    let count = 1 + score.div_euclid(SCORE_PER_EXTRA_SPAWN);
    count.clamp(0, i64::from(u32::MAX)) as u32
}

/// A point just outside `edge`, uniformly spread along it.
pub fn spawn_position(edge: Edge, width: f32, height: f32, rng: &mut impl Rng) -> (f32, f32) {
    match edge {
        Edge::Top => (rng.gen::<f32>() * width, -SPAWN_MARGIN),
        Edge::Right => (width + SPAWN_MARGIN, rng.gen::<f32>() * height),
        Edge::Bottom => (rng.gen::<f32>() * width, height + SPAWN_MARGIN),
        Edge::Left => (-SPAWN_MARGIN, rng.gen::<f32>() * height),
    }
}

/// One firing of the spawn timer.  Runs `spawn_count(score)` independent
/// attempts; each successful one drops an enemy behind a random edge.
pub fn spawn_wave(state: &RoundState, rng: &mut impl Rng) -> RoundState {
    if state.is_over() {
        return state.clone();
    }
    let attempts = spawn_count(state.score);
    let mut enemies = state.enemies.clone();
    for _ in 0..attempts {
        let Some(archetype) = catalog::pick_archetype(rng) else {
            continue;
        };
        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        let (x, y) = spawn_position(edge, state.width, state.height, rng);
        enemies.push(Enemy::spawn(archetype, x, y));
    }
    trace!(
        attempts,
        spawned = enemies.len() - state.enemies.len(),
        "spawn wave"
    );
    RoundState {
        enemies,
        ..state.clone()
    }
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  A finished round is left as is.
pub fn tick(state: &RoundState) -> (RoundState, Vec<GameEvent>) {
    if state.is_over() {
        return (state.clone(), Vec::new());
    }
    let mut events = Vec::new();
    let mut score = state.score;
    let player = &state.player;

    // ── 1. Move projectiles, drop the ones that left the playfield ───────────
    let projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .map(|p| Projectile {
            x: p.x + p.vx,
            y: p.y + p.vy,
            ..p.clone()
        })
        .filter(|p| p.x >= 0.0 && p.y >= 0.0 && p.x <= state.width && p.y <= state.height)
        .collect();

    // ── 2. Home enemies on the player; contact costs their value ─────────────
    let mut enemies: Vec<Enemy> = Vec::with_capacity(state.enemies.len());
    for e in &state.enemies {
        let dx = player.x - e.x;
        let dy = player.y - e.y;
        let dist = dx.hypot(dy);
        // Checked before normalising, so a zero distance is a hit, not a NaN.
        if dist < CONTACT_RADIUS {
            score -= i64::from(e.value);
            debug!(value = e.value, score, "player hit");
            events.push(GameEvent::ScoreDelta {
                amount: -i64::from(e.value),
                x: player.x,
                y: player.y - HIT_POPUP_RISE,
            });
            continue;
        }
        enemies.push(Enemy {
            x: e.x + dx / dist * e.speed,
            y: e.y + dy / dist * e.speed,
            ..e.clone()
        });
    }

    // ── 3. Projectiles ↔ enemies ─────────────────────────────────────────────
    let mut hit_stats = state.hit_stats.clone();
    let mut killed_enemies: Vec<usize> = Vec::new();
    let mut used_projectiles: Vec<usize> = Vec::new();

    for (ei, enemy) in enemies.iter().enumerate() {
        let hit = projectiles.iter().enumerate().find(|(pi, p)| {
            !used_projectiles.contains(pi) && (enemy.x - p.x).hypot(enemy.y - p.y) < CONTACT_RADIUS
        });
        if let Some((pi, _)) = hit {
            killed_enemies.push(ei);
            used_projectiles.push(pi);
            score += i64::from(enemy.value);
            hit_stats.record(enemy.value);
            debug!(value = enemy.value, score, "enemy shot down");
            events.push(GameEvent::ScoreDelta {
                amount: i64::from(enemy.value),
                x: enemy.x,
                y: enemy.y,
            });
            events.push(GameEvent::Sound(Sound::Kill));
        }
    }

    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !killed_enemies.contains(i))
        .map(|(_, e)| e)
        .collect();

    let projectiles: Vec<Projectile> = projectiles
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !used_projectiles.contains(i))
        .map(|(_, p)| p)
        .collect();

    // ── 4. High score ────────────────────────────────────────────────────────
    let mut high_score = state.high_score;
    if score > high_score {
        high_score = score;
        debug!(high_score, "new high score");
        events.push(GameEvent::HighScore(high_score));
    }

    // ── 5. Terminal check ────────────────────────────────────────────────────
    let status = if score < 0 {
        info!(score, kills = hit_stats.total_kills(), "round over");
        events.push(GameEvent::Sound(Sound::GameOver));
        RoundStatus::Over
    } else {
        RoundStatus::Active
    };

    (
        RoundState {
            enemies,
            projectiles,
            score,
            high_score,
            hit_stats,
            status,
            ..state.clone()
        },
        events,
    )
}
