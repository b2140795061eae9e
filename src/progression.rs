//! Gold crediting, experience, level-ups, and stat purchases.

use crate::constants::{
    AETHER_GOLD_BONUS_PER_POINT, LEVEL_CAP, STAT_POINTS_PER_LEVEL, TRAINING_COST_STEP,
    VIGOR_STAMINA_BONUS, XP_PER_LEVEL_STEP,
};
use crate::numbers::{floor_f64_to_i64, i64_to_f64};
use crate::state::{PlayerState, StatKind};

/// Gold-find multiplier from effective aether: `1 + aether * 0.05`.
#[must_use]
pub fn gold_multiplier(effective_aether: i32) -> f64 {
    1.0 + f64::from(effective_aether) * AETHER_GOLD_BONUS_PER_POINT
}

/// Amount actually credited for a base gold reward, floored after the
/// multiplier, and the bonus portion on top of the base.
#[must_use]
pub fn scaled_gold(base: i64, effective_aether: i32) -> (i64, i64) {
    let credited = floor_f64_to_i64(i64_to_f64(base) * gold_multiplier(effective_aether));
    let credited = credited.max(base);
    (credited, credited - base)
}

/// XP needed to leave the given level.
#[must_use]
pub const fn xp_requirement(level: i32) -> i32 {
    level * XP_PER_LEVEL_STEP
}

/// Add xp and consume it into level-ups while it suffices. Each level grants
/// stat points and a full vital refill. Returns the number of levels gained.
pub fn grant_xp(player: &mut PlayerState, amount: i32) -> i32 {
    player.xp += amount;
    let mut gained = 0;
    while player.level < LEVEL_CAP && player.xp >= xp_requirement(player.level) {
        player.xp -= xp_requirement(player.level);
        player.level += 1;
        player.stat_points += STAT_POINTS_PER_LEVEL;
        player.health = player.max_health;
        player.current_stamina = player.max_stamina;
        gained += 1;
    }
    gained
}

/// Spend one earned stat point. Returns `false` without mutating when
/// the player has none.
pub fn spend_stat_point(player: &mut PlayerState, kind: StatKind) -> bool {
    if player.stat_points <= 0 {
        return false;
    }
    player.stat_points -= 1;
    apply_stat_gain(player, kind);
    true
}

/// Gold price of the next training purchase. Strictly increasing.
#[must_use]
pub fn training_cost(stats_bought: i32) -> i64 {
    TRAINING_COST_STEP * (i64::from(stats_bought) + 1)
}

/// Buy a stat with gold at the escalating training price. Vigor purchases
/// also refill health and stamina. Returns `false` without mutating when
/// gold is short.
pub fn train_stat(player: &mut PlayerState, kind: StatKind) -> bool {
    let cost = training_cost(player.stats_bought);
    if player.gold < cost {
        return false;
    }
    player.gold -= cost;
    player.stats_bought += 1;
    apply_stat_gain(player, kind);
    if kind == StatKind::Vigor {
        player.health = player.max_health;
        player.current_stamina = player.max_stamina;
    }
    true
}

fn apply_stat_gain(player: &mut PlayerState, kind: StatKind) {
    *player.stat_mut(kind) += 1;
    if kind == StatKind::Vigor {
        player.max_stamina += VIGOR_STAMINA_BONUS;
    }
}
