//! Centralized balance and tuning constants for Abyssal game logic.
//!
//! These values define the deterministic math for the descent loop. Keeping
//! them together ensures that gameplay can only be adjusted via code changes
//! reviewed in version control, rather than through external JSON assets.

// Debug logging ------------------------------------------------------------
pub(crate) const DEBUG_ENV_VAR: &str = "ABYSSAL_DEBUG_LOGS";

// Action economy -----------------------------------------------------------
pub(crate) const DESCEND_STAMINA_COST: i32 = 1;
pub(crate) const EXHAUSTION_DAMAGE: i32 = 10;
pub(crate) const EXPLORE_COST_DEPTH_DIVISOR: i32 = 1_000;

// Outcome table ------------------------------------------------------------
pub(crate) const DESCEND_ATMOSPHERE_MAX: u32 = 40;
pub(crate) const DESCEND_GOLD_MAX: u32 = 70;
pub(crate) const DESCEND_SCAVENGE_MAX: u32 = 85;
pub(crate) const DESCEND_TREASURE_MAX: u32 = 90;
pub(crate) const EXPLORE_LOOT_MAX: u32 = 60;
pub(crate) const EXPLORE_NOTHING_MAX: u32 = 80;

// Combat tuning ------------------------------------------------------------
pub(crate) const CRIT_CHANCE: f32 = 0.10;
pub(crate) const CRIT_MULTIPLIER: i32 = 2;
pub(crate) const BOSS_HEAVY_CHANCE: f32 = 0.30;
pub(crate) const BOSS_HEAVY_MULTIPLIER: f64 = 1.5;
pub(crate) const HEAL_FALLBACK_AMOUNT: i32 = 20;

// Rewards ------------------------------------------------------------------
pub(crate) const GOLD_VEIN_MIN: i64 = 5;
pub(crate) const GOLD_VEIN_MAX: i64 = 14;
pub(crate) const GOLD_VEIN_DEPTH_DIVISOR: i64 = 25;
pub(crate) const AETHER_GOLD_BONUS_PER_POINT: f64 = 0.05;

// Progression --------------------------------------------------------------
pub(crate) const XP_PER_LEVEL_STEP: i32 = 100;
pub(crate) const LEVEL_CAP: i32 = 50;
pub(crate) const STAT_POINTS_PER_LEVEL: i32 = 3;
pub(crate) const VIGOR_STAMINA_BONUS: i32 = 5;
pub(crate) const TRAINING_COST_STEP: i64 = 100;

// Death and recovery -------------------------------------------------------
pub(crate) const FALLBACK_ITEM_ID: &str = "rusty-shiv";

// Achievement thresholds ---------------------------------------------------
pub(crate) const ACHIEVEMENT_DEPTH_SURVIVOR: i32 = 10;
pub(crate) const ACHIEVEMENT_DEPTH_DEEP_DIVER: i32 = 100;
pub(crate) const ACHIEVEMENT_DEPTH_ABYSS_WALKER: i32 = 500;
pub(crate) const ACHIEVEMENT_GOLD_HOARD: i64 = 1_000;
pub(crate) const ACHIEVEMENT_LEVEL_LEGEND: i32 = 25;

// Session ------------------------------------------------------------------
pub(crate) const SESSION_LOG_CAP: usize = 50;
