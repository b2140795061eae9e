//! Player record, inventory rows, and grave snapshots.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::data::Slot;

/// The three trainable stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Vigor,
    Precision,
    Aether,
}

impl StatKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vigor => "vigor",
            Self::Precision => "precision",
            Self::Aether => "aether",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vigor" => Ok(Self::Vigor),
            "precision" => Ok(Self::Precision),
            "aether" => Ok(Self::Aether),
            _ => Err(()),
        }
    }
}

/// What killed the player. Carried into death recovery and surfaced in logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeathCause {
    Exhaustion,
    Combat { monster: String },
}

/// The persisted player record. Field names match the external store contract:
/// `depth, max_depth, gold, bank_gold, current_stamina, max_stamina, health,
/// max_health, vigor, precision, aether, xp, level, stat_points, stats_bought`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub depth: i32,
    /// Best-ever depth. Monotonic; survives death.
    #[serde(default)]
    pub max_depth: i32,
    #[serde(default)]
    pub gold: i64,
    /// Banked gold, untouched by death recovery.
    #[serde(default)]
    pub bank_gold: i64,
    pub current_stamina: i32,
    pub max_stamina: i32,
    pub health: i32,
    pub max_health: i32,
    pub vigor: i32,
    pub precision: i32,
    pub aether: i32,
    #[serde(default)]
    pub xp: i32,
    #[serde(default = "default_level")]
    pub level: i32,
    #[serde(default)]
    pub stat_points: i32,
    /// Purchase counter driving the escalating training cost.
    #[serde(default)]
    pub stats_bought: i32,
}

fn default_level() -> i32 {
    1
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            id: String::new(),
            username: String::from("wanderer"),
            depth: 0,
            max_depth: 0,
            gold: 0,
            bank_gold: 0,
            current_stamina: 20,
            max_stamina: 20,
            health: 100,
            max_health: 100,
            vigor: 5,
            precision: 5,
            aether: 0,
            xp: 0,
            level: 1,
            stat_points: 0,
            stats_bought: 0,
        }
    }
}

impl PlayerState {
    /// Fresh record for a new user id.
    #[must_use]
    pub fn new(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            ..Self::default()
        }
    }

    /// Clamp health and stamina into `[0, max]`.
    pub fn clamp_vitals(&mut self) {
        self.health = self.health.clamp(0, self.max_health);
        self.current_stamina = self.current_stamina.clamp(0, self.max_stamina);
    }

    /// Fold the current depth into the best-ever record.
    pub fn record_depth(&mut self) {
        if self.depth > self.max_depth {
            self.max_depth = self.depth;
        }
    }

    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }

    #[must_use]
    pub const fn stat(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Vigor => self.vigor,
            StatKind::Precision => self.precision,
            StatKind::Aether => self.aether,
        }
    }

    pub(crate) const fn stat_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Vigor => &mut self.vigor,
            StatKind::Precision => &mut self.precision,
            StatKind::Aether => &mut self.aether,
        }
    }
}

fn default_quantity() -> i32 {
    1
}

/// One owned inventory row. Affixed drops carry their procedural name and
/// merged stats in the override fields; plain rows leave them empty and the
/// template's base values apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    #[serde(default)]
    pub id: i64,
    pub user_id: String,
    pub item_id: String,
    #[serde(default)]
    pub is_equipped: bool,
    #[serde(default)]
    pub slot: Option<Slot>,
    #[serde(default)]
    pub name_override: Option<String>,
    #[serde(default)]
    pub stats_override: Option<HashMap<String, i32>>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

impl InventoryEntry {
    /// Plain unequipped row for a template.
    #[must_use]
    pub fn plain(user_id: &str, item_id: &str) -> Self {
        Self {
            id: 0,
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            is_equipped: false,
            slot: None,
            name_override: None,
            stats_override: None,
            quantity: 1,
        }
    }
}

/// A snapshotted inventory row inside a grave. Serialized into the grave
/// record's `items_json` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraveItem {
    pub item_id: String,
    #[serde(default)]
    pub is_equipped: bool,
    #[serde(default)]
    pub slot: Option<Slot>,
    #[serde(default)]
    pub name_override: Option<String>,
    #[serde(default)]
    pub stats_override: Option<HashMap<String, i32>>,
}

impl From<&InventoryEntry> for GraveItem {
    fn from(entry: &InventoryEntry) -> Self {
        Self {
            item_id: entry.item_id.clone(),
            is_equipped: entry.is_equipped,
            slot: entry.slot,
            name_override: entry.name_override.clone(),
            stats_override: entry.stats_override.clone(),
        }
    }
}

/// Singleton per-player snapshot of what death took. Created atomically on
/// death (replacing any prior grave) and consumed exactly once on retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grave {
    pub user_id: String,
    pub depth: i32,
    pub gold_lost: i64,
    pub items: Vec<GraveItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitals_clamp_to_bounds() {
        let mut player = PlayerState::default();
        player.health = -5;
        player.current_stamina = 99;
        player.clamp_vitals();
        assert_eq!(player.health, 0);
        assert_eq!(player.current_stamina, player.max_stamina);
    }

    #[test]
    fn max_depth_is_monotonic() {
        let mut player = PlayerState::default();
        player.depth = 12;
        player.record_depth();
        assert_eq!(player.max_depth, 12);
        player.depth = 3;
        player.record_depth();
        assert_eq!(player.max_depth, 12);
    }

    #[test]
    fn stat_kind_roundtrips_strings() {
        for kind in [StatKind::Vigor, StatKind::Precision, StatKind::Aether] {
            assert_eq!(kind.as_str().parse::<StatKind>(), Ok(kind));
        }
        assert!("luck".parse::<StatKind>().is_err());
    }

    #[test]
    fn grave_item_snapshot_preserves_overrides() {
        let mut entry = InventoryEntry::plain("u1", "iron-blade");
        entry.is_equipped = true;
        entry.slot = Some(Slot::MainHand);
        entry.name_override = Some("Gleaming Iron Blade of Echoes".into());
        let snap = GraveItem::from(&entry);
        assert!(snap.is_equipped);
        assert_eq!(snap.slot, Some(Slot::MainHand));
        assert_eq!(snap.name_override.as_deref(), Some("Gleaming Iron Blade of Echoes"));
    }
}
