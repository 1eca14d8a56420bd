/// The fixed table of enemy denominations and the spawn lottery over it.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::EnemyArchetype;

const fn coin(name: &'static str, value: u32, speed: f32) -> EnemyArchetype {
    EnemyArchetype { name, value, speed, width: 60.0, height: 60.0, spawn_weight: 50 }
}

const fn note(name: &'static str, value: u32, speed: f32, spawn_weight: u32) -> EnemyArchetype {
    EnemyArchetype { name, value, speed, width: 120.0, height: 80.0, spawn_weight }
}

/// Coins are small and common, notes are bigger, faster and rarer.
pub static ARCHETYPES: [EnemyArchetype; 9] = [
    coin("krona1", 1, 1.5),
    coin("krona2", 2, 1.7),
    coin("krona5", 5, 2.0),
    coin("krona10", 10, 2.2),
    note("krona20", 20, 2.4, 30),
    note("krona50", 50, 2.6, 30),
    note("krona100", 100, 3.0, 20),
    note("krona200", 200, 3.2, 20),
    note("krona500", 500, 3.6, 20),
];

/// Denominations in table order.
pub fn values() -> impl Iterator<Item = u32> {
    ARCHETYPES.iter().map(|a| a.value)
}

pub fn find_by_value(value: u32) -> Option<&'static EnemyArchetype> {
    ARCHETYPES.iter().find(|a| a.value == value)
}

/// Roll every archetype's weight independently; return the ones that pass.
///
/// This is not a weighted draw: any number of archetypes (including none)
/// can pass in one call.
pub fn eligible_archetypes(rng: &mut impl Rng) -> Vec<&'static EnemyArchetype> {
    ARCHETYPES
        .iter()
        .filter(|a| rng.gen_range(0.0..100.0) < a.spawn_weight as f64)
        .collect()
}

/// One spawn attempt: roll eligibility, then choose uniformly among the
/// survivors.  `None` means this attempt spawns nothing.
pub fn pick_archetype(rng: &mut impl Rng) -> Option<&'static EnemyArchetype> {
    let eligible = eligible_archetypes(rng);
    eligible.choose(rng).copied()
}
