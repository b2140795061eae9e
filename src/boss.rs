//! Turn-based boss encounters.
//!
//! Unlike trash combat, boss fights suspend the action loop: the encounter
//! holds an explicit state machine and the caller drives it one move at a
//! time. The encounter owns the boss side only; the player record stays in
//! the session, which applies strike damage and decides defeat.

use rand::Rng;

use crate::constants::{BOSS_HEAVY_CHANCE, BOSS_HEAVY_MULTIPLIER, HEAL_FALLBACK_AMOUNT};
use crate::data::{ContentData, ItemKind, ItemTemplate, MonsterTemplate};
use crate::numbers::floor_f64_to_i32;
use crate::state::InventoryEntry;

/// Where the encounter currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    PlayerTurn,
    BossTurn,
    Victory,
    Defeat,
}

/// Moves the player may take on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMove {
    Attack,
    Defend,
    Heal,
    Special,
}

/// What one boss strike did. Produced by [`BossEncounter::apply_strike`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeOutcome {
    /// Damage the session should deduct from the player.
    pub damage: i32,
    pub heavy: bool,
    /// The armed artifact absorbed a heavy strike.
    pub negated: bool,
    /// A pending defend halved the strike.
    pub halved: bool,
}

/// A suspended boss fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossEncounter {
    pub boss: MonsterTemplate,
    pub boss_hp: i32,
    pub phase: BossPhase,
    /// Next incoming strike is halved, then the guard drops.
    defending: bool,
    /// A counter-artifact stands ready to negate one heavy strike.
    artifact_armed: bool,
    special_spent: bool,
}

impl BossEncounter {
    #[must_use]
    pub fn new(boss: &MonsterTemplate) -> Self {
        Self {
            boss: boss.clone(),
            boss_hp: boss.hp,
            phase: BossPhase::PlayerTurn,
            defending: false,
            artifact_armed: false,
            special_spent: false,
        }
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, BossPhase::Victory | BossPhase::Defeat)
    }

    /// Whether the player holds an unequipped relic whose description names
    /// this boss's special-effect tag. Gates the Special move.
    #[must_use]
    pub fn counter_artifact<'a>(
        &self,
        inventory: &'a [InventoryEntry],
        content: &'a ContentData,
    ) -> Option<&'a ItemTemplate> {
        let tag = self.boss.special_effect.as_deref()?;
        inventory
            .iter()
            .filter(|entry| !entry.is_equipped)
            .filter_map(|entry| content.item(&entry.item_id))
            .find(|item| item.kind == ItemKind::Relic && item.counters(tag))
    }

    /// Strike the boss. Damage floors at 1; victory ends the fight, anything
    /// else hands the turn to the boss.
    pub fn player_attack(&mut self, player_attack: i32) -> i32 {
        let damage = (player_attack - self.boss.defense).max(1);
        self.boss_hp -= damage;
        self.phase = if self.boss_hp <= 0 {
            BossPhase::Victory
        } else {
            BossPhase::BossTurn
        };
        damage
    }

    /// Brace for the next strike. The halving applies once.
    pub fn player_defend(&mut self) {
        self.defending = true;
        self.phase = BossPhase::BossTurn;
    }

    /// Heal amount for a consumable template, using its `heal` stat with a
    /// fixed fallback when the author left it off.
    #[must_use]
    pub fn heal_amount(consumable: &ItemTemplate) -> i32 {
        match consumable.stat("heal") {
            0 => HEAL_FALLBACK_AMOUNT,
            amount => amount,
        }
    }

    /// Drink: the session has already consumed the item; this just yields
    /// the turn.
    pub fn player_heal(&mut self) {
        self.phase = BossPhase::BossTurn;
    }

    /// Arm the counter-artifact. Once per encounter; returns `false` when
    /// already spent.
    pub fn player_special(&mut self) -> bool {
        if self.special_spent {
            return false;
        }
        self.special_spent = true;
        self.artifact_armed = true;
        self.phase = BossPhase::BossTurn;
        true
    }

    /// Roll whether the boss winds up a heavy strike. Only bosses with a
    /// special-effect tag ever do.
    pub fn roll_heavy<R: Rng>(&self, rng: &mut R) -> bool {
        self.boss.special_effect.is_some() && rng.random::<f32>() < BOSS_HEAVY_CHANCE
    }

    /// Resolve the boss strike and hand the turn back. The caller deducts
    /// `damage` from the player and flips the phase to Defeat if that kills.
    pub fn apply_strike(&mut self, heavy: bool, player_defense: i32) -> StrikeOutcome {
        let base = (self.boss.attack - player_defense).max(1);
        let mut damage = if heavy {
            floor_f64_to_i32(f64::from(base) * BOSS_HEAVY_MULTIPLIER).max(1)
        } else {
            base
        };

        let negated = heavy && self.artifact_armed;
        if negated {
            self.artifact_armed = false;
            damage = 0;
        }

        let halved = !negated && self.defending;
        if halved {
            damage /= 2;
        }
        self.defending = false;

        self.phase = BossPhase::PlayerTurn;
        StrikeOutcome {
            damage,
            heavy,
            negated,
            halved,
        }
    }

    /// Roll and resolve the boss turn in one call.
    pub fn boss_turn<R: Rng>(&mut self, player_defense: i32, rng: &mut R) -> StrikeOutcome {
        let heavy = self.roll_heavy(rng);
        self.apply_strike(heavy, player_defense)
    }
}
