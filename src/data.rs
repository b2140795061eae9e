//! Content templates: items, monsters, and set bonus tables.
//!
//! Templates are read-only inputs authored outside the engine. The engine
//! never mutates them; procedural drops reference a template by id and carry
//! their own overrides.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Broad item classification driving drop categories and equip rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
    Material,
    Relic,
    Junk,
}

impl ItemKind {
    /// Whether drops of this kind receive procedural affixes.
    #[must_use]
    pub const fn takes_affixes(self) -> bool {
        matches!(self, Self::Weapon | Self::Armor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Equipment slots a row can occupy. At most one equipped entry per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Head,
    Chest,
    Legs,
    MainHand,
    OffHand,
}

impl Slot {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Chest => "chest",
            Self::Legs => "legs",
            Self::MainHand => "main_hand",
            Self::OffHand => "off_hand",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head" => Ok(Self::Head),
            "chest" => Ok(Self::Chest),
            "legs" => Ok(Self::Legs),
            "main_hand" => Ok(Self::MainHand),
            "off_hand" => Ok(Self::OffHand),
            _ => Err(()),
        }
    }
}

fn default_max_depth() -> i32 {
    i32::MAX
}

/// An authored item definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub valid_slot: Option<Slot>,
    #[serde(default)]
    pub stats: HashMap<String, i32>,
    #[serde(default)]
    pub min_depth: i32,
    #[serde(default = "default_max_depth")]
    pub max_depth: i32,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub scrap_value: i64,
}

impl ItemTemplate {
    /// Whether this template is eligible to drop at the given depth.
    #[must_use]
    pub const fn drops_at(&self, depth: i32) -> bool {
        depth >= self.min_depth && depth <= self.max_depth
    }

    #[must_use]
    pub fn stat(&self, key: &str) -> i32 {
        self.stats.get(key).copied().unwrap_or(0)
    }

    /// Whether the item's description names the given special-effect tag.
    /// Used for boss counter-artifact matching.
    #[must_use]
    pub fn counters(&self, tag: &str) -> bool {
        self.desc
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&tag.to_lowercase()))
    }
}

/// An authored monster definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterTemplate {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default)]
    pub gold_reward: i64,
    #[serde(default)]
    pub xp_reward: i32,
    #[serde(default)]
    pub min_depth: i32,
    #[serde(default = "default_max_depth")]
    pub max_depth: i32,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub special_effect: Option<String>,
    /// Item id guaranteed to drop on victory (named bosses only).
    #[serde(default)]
    pub guaranteed_drop: Option<String>,
}

impl MonsterTemplate {
    #[must_use]
    pub const fn roams_at(&self, depth: i32) -> bool {
        depth >= self.min_depth && depth <= self.max_depth
    }
}

/// One tier of a multi-piece set bonus. Tiers are not cumulative; the
/// highest `pieces` threshold met wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTier {
    pub pieces: u32,
    #[serde(default)]
    pub vigor: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub aether: i32,
}

/// Container for all authored content the engine reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentData {
    #[serde(default)]
    pub items: Vec<ItemTemplate>,
    #[serde(default)]
    pub monsters: Vec<MonsterTemplate>,
    #[serde(default)]
    pub set_bonuses: HashMap<String, Vec<SetTier>>,
}

impl ContentData {
    /// Create empty content data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load content data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid content data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn item(&self, id: &str) -> Option<&ItemTemplate> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn monster(&self, id: &str) -> Option<&MonsterTemplate> {
        self.monsters.iter().find(|monster| monster.id == id)
    }

    /// Monsters whose depth range contains the given depth.
    #[must_use]
    pub fn monsters_at(&self, depth: i32) -> Vec<&MonsterTemplate> {
        self.monsters
            .iter()
            .filter(|monster| monster.roams_at(depth))
            .collect()
    }

    /// Bonus tiers for a set, sorted ascending by piece count.
    #[must_use]
    pub fn set_tiers(&self, set_name: &str) -> &[SetTier] {
        self.set_bonuses
            .get(set_name)
            .map_or(&[], Vec::as_slice)
    }
}
