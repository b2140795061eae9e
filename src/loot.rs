//! Procedural drops: depth-eligible template selection and affix rolling.

use rand::Rng;
use std::collections::HashMap;

use crate::data::{ContentData, ItemKind, ItemTemplate};
use crate::state::InventoryEntry;

/// Which shelf of the item tables a roll draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropCategory {
    /// Materials, junk, and consumables.
    Scraps,
    /// Weapons, armor, and relics.
    Equipment,
    /// Any eligible template.
    Any,
}

impl DropCategory {
    const fn allows(self, kind: ItemKind) -> bool {
        match self {
            Self::Scraps => matches!(
                kind,
                ItemKind::Material | ItemKind::Junk | ItemKind::Consumable
            ),
            Self::Equipment => {
                matches!(kind, ItemKind::Weapon | ItemKind::Armor | ItemKind::Relic)
            }
            Self::Any => true,
        }
    }
}

/// One affix word and the stat delta it carries.
struct Affix {
    word: &'static str,
    stat: &'static str,
    delta: i32,
}

const PREFIXES: [Affix; 8] = [
    Affix { word: "Gleaming", stat: "damage", delta: 2 },
    Affix { word: "Cruel", stat: "damage", delta: 3 },
    Affix { word: "Ancient", stat: "defense", delta: 2 },
    Affix { word: "Barbed", stat: "damage", delta: 1 },
    Affix { word: "Warded", stat: "defense", delta: 3 },
    Affix { word: "Drowned", stat: "defense", delta: 1 },
    Affix { word: "Howling", stat: "damage", delta: 2 },
    Affix { word: "Leaden", stat: "defense", delta: 2 },
];

const SUFFIXES: [Affix; 8] = [
    Affix { word: "of Echoes", stat: "damage", delta: 1 },
    Affix { word: "of the Deep", stat: "defense", delta: 2 },
    Affix { word: "of Embers", stat: "damage", delta: 2 },
    Affix { word: "of the Tide", stat: "defense", delta: 1 },
    Affix { word: "of Hunger", stat: "damage", delta: 3 },
    Affix { word: "of Stillness", stat: "defense", delta: 3 },
    Affix { word: "of the Pale Court", stat: "damage", delta: 2 },
    Affix { word: "of Old Bone", stat: "defense", delta: 2 },
];

/// A rolled drop, ready to be inserted as an inventory row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootDrop {
    pub template_id: String,
    /// Name shown in logs; the override name for affixed gear, the template
    /// name otherwise.
    pub display_name: String,
    pub name_override: Option<String>,
    pub stats_override: Option<HashMap<String, i32>>,
}

impl LootDrop {
    /// Materialize the drop as an unequipped inventory row for a user.
    #[must_use]
    pub fn into_entry(self, user_id: &str) -> InventoryEntry {
        let mut entry = InventoryEntry::plain(user_id, &self.template_id);
        entry.name_override = self.name_override;
        entry.stats_override = self.stats_override;
        entry
    }
}

/// Roll a drop from the templates in `category` eligible at `depth`, or
/// `None` when no template qualifies. Weapons and armor always receive
/// exactly one prefix and one suffix; everything else drops plain.
pub fn generate_drop<R: Rng>(
    depth: i32,
    category: DropCategory,
    content: &ContentData,
    rng: &mut R,
) -> Option<LootDrop> {
    let candidates: Vec<&ItemTemplate> = content
        .items
        .iter()
        .filter(|item| item.drops_at(depth) && category.allows(item.kind))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    let template = candidates[rng.random_range(0..candidates.len())];
    Some(roll_drop(template, rng))
}

fn roll_drop<R: Rng>(template: &ItemTemplate, rng: &mut R) -> LootDrop {
    if !template.kind.takes_affixes() {
        return LootDrop {
            template_id: template.id.clone(),
            display_name: template.name.clone(),
            name_override: None,
            stats_override: None,
        };
    }

    let prefix = &PREFIXES[rng.random_range(0..PREFIXES.len())];
    let suffix = &SUFFIXES[rng.random_range(0..SUFFIXES.len())];
    apply_affixes(template, prefix, suffix)
}

fn apply_affixes(template: &ItemTemplate, prefix: &Affix, suffix: &Affix) -> LootDrop {
    let mut stats = template.stats.clone();
    *stats.entry(prefix.stat.to_string()).or_insert(0) += prefix.delta;
    *stats.entry(suffix.stat.to_string()).or_insert(0) += suffix.delta;

    let name = format!("{} {} {}", prefix.word, template.name, suffix.word);
    LootDrop {
        template_id: template.id.clone(),
        display_name: name.clone(),
        name_override: Some(name),
        stats_override: Some(stats),
    }
}
