//! One-shot resolution for non-boss encounters.
//!
//! Trash fights never suspend the action: the whole exchange is computed
//! in a single evaluation and the player eats the total damage at once.

use rand::Rng;

use crate::constants::{CRIT_CHANCE, CRIT_MULTIPLIER};
use crate::data::{ContentData, MonsterTemplate};

/// Everything a resolved trash fight produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatReport {
    pub monster: String,
    pub crit: bool,
    pub damage_to_monster: i32,
    pub damage_per_round: i32,
    pub rounds: i32,
    pub total_damage_taken: i32,
    pub gold_reward: i64,
    pub xp_reward: i32,
}

/// Pick a monster eligible for the given depth, uniformly at random.
pub fn pick_monster<'a, R: Rng>(
    depth: i32,
    content: &'a ContentData,
    rng: &mut R,
) -> Option<&'a MonsterTemplate> {
    let candidates = content.monsters_at(depth);
    if candidates.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..candidates.len());
    Some(candidates[idx])
}

/// Resolve a full trash fight in one evaluation.
///
/// Both damage figures are floored at 1 regardless of stat disparity, so
/// every fight ends and every round costs something.
pub fn resolve_trash_combat<R: Rng>(
    player_attack: i32,
    player_defense: i32,
    monster: &MonsterTemplate,
    rng: &mut R,
) -> CombatReport {
    let crit = rng.random::<f32>() < CRIT_CHANCE;
    let crit_multiplier = if crit { CRIT_MULTIPLIER } else { 1 };

    let damage_to_monster = ((player_attack - monster.defense) * crit_multiplier).max(1);
    let damage_per_round = (monster.attack - player_defense).max(1);
    let rounds = monster.hp.max(1).div_ceil(damage_to_monster);
    let total_damage_taken = rounds * damage_per_round;

    CombatReport {
        monster: monster.name.clone(),
        crit,
        damage_to_monster,
        damage_per_round,
        rounds,
        total_damage_taken,
        gold_reward: monster.gold_reward,
        xp_reward: monster.xp_reward,
    }
}
