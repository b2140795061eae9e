//! Equipment aggregation: flat stat sums plus tiered set bonuses.

use std::collections::HashMap;

use crate::data::ContentData;
use crate::state::{InventoryEntry, PlayerState};

/// Combined contribution of everything the player has equipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GearSummary {
    /// Summed `damage` stats from equipped gear.
    pub attack_bonus: i32,
    /// Summed `defense` stats from equipped gear, including set bonuses.
    pub defense: i32,
    /// Set-bonus vigor, exposed for display.
    pub set_vigor: i32,
    /// Set-bonus aether; feeds the gold-find multiplier.
    pub set_aether: i32,
}

/// Sum stat contributions from every equipped row, preferring each row's
/// override over the template's base stats, then fold in the highest set
/// tier met for each equipped set. Tiers are not cumulative.
#[must_use]
pub fn aggregate_equipment(entries: &[InventoryEntry], content: &ContentData) -> GearSummary {
    let mut summary = GearSummary::default();
    let mut set_counts: HashMap<&str, u32> = HashMap::new();

    for entry in entries.iter().filter(|entry| entry.is_equipped) {
        let template = content.item(&entry.item_id);
        let stats = entry
            .stats_override
            .as_ref()
            .or_else(|| template.map(|t| &t.stats));
        if let Some(stats) = stats {
            summary.attack_bonus += stats.get("damage").copied().unwrap_or(0);
            summary.defense += stats.get("defense").copied().unwrap_or(0);
        }
        if let Some(set_name) = template.and_then(|t| t.set_name.as_deref()) {
            *set_counts.entry(set_name).or_insert(0) += 1;
        }
    }

    for (set_name, count) in set_counts {
        // Highest threshold met wins; lower tiers do not stack on top.
        let tier = content
            .set_tiers(set_name)
            .iter()
            .filter(|tier| tier.pieces <= count)
            .max_by_key(|tier| tier.pieces);
        if let Some(tier) = tier {
            summary.set_vigor += tier.vigor;
            summary.defense += tier.defense;
            summary.set_aether += tier.aether;
        }
    }

    summary
}

/// Effective attack: precision stat plus summed weapon damage.
#[must_use]
pub const fn effective_attack(player: &PlayerState, gear: &GearSummary) -> i32 {
    player.precision + gear.attack_bonus
}

/// Effective defense comes from equipment and set bonuses only; the vigor
/// stat contributes nothing here.
#[must_use]
pub const fn effective_defense(gear: &GearSummary) -> i32 {
    gear.defense
}

/// Effective aether for reward scaling: trained stat plus set bonus.
#[must_use]
pub const fn effective_aether(player: &PlayerState, gear: &GearSummary) -> i32 {
    player.aether + gear.set_aether
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ItemKind, ItemTemplate, Rarity, SetTier, Slot};
    use std::collections::HashMap;

    fn template(id: &str, damage: i32, defense: i32, set_name: Option<&str>) -> ItemTemplate {
        let mut stats = HashMap::new();
        if damage != 0 {
            stats.insert("damage".to_string(), damage);
        }
        if defense != 0 {
            stats.insert("defense".to_string(), defense);
        }
        ItemTemplate {
            id: id.to_string(),
            name: id.to_string(),
            desc: None,
            kind: if damage > 0 { ItemKind::Weapon } else { ItemKind::Armor },
            rarity: Rarity::Common,
            valid_slot: Some(Slot::Chest),
            stats,
            min_depth: 0,
            max_depth: i32::MAX,
            set_name: set_name.map(String::from),
            value: 0,
            scrap_value: 0,
        }
    }

    fn equipped(item_id: &str) -> InventoryEntry {
        let mut entry = InventoryEntry::plain("u1", item_id);
        entry.is_equipped = true;
        entry
    }

    fn content_with_drowned_set() -> ContentData {
        let mut content = ContentData::empty();
        content.items = vec![
            template("blade", 6, 0, None),
            template("cuirass", 0, 4, Some("drowned")),
            template("greaves", 0, 3, Some("drowned")),
            template("helm", 0, 2, Some("drowned")),
        ];
        content.set_bonuses.insert(
            "drowned".to_string(),
            vec![
                SetTier { pieces: 2, vigor: 0, defense: 3, aether: 0 },
                SetTier { pieces: 3, vigor: 2, defense: 6, aether: 1 },
            ],
        );
        content
    }

    #[test]
    fn sums_only_equipped_rows() {
        let content = content_with_drowned_set();
        let mut unequipped = InventoryEntry::plain("u1", "cuirass");
        unequipped.is_equipped = false;
        let gear = aggregate_equipment(&[equipped("blade"), unequipped], &content);
        assert_eq!(gear.attack_bonus, 6);
        assert_eq!(gear.defense, 0);
    }

    #[test]
    fn override_stats_win_over_template() {
        let content = content_with_drowned_set();
        let mut entry = equipped("blade");
        entry.stats_override = Some(HashMap::from([("damage".to_string(), 9)]));
        let gear = aggregate_equipment(&[entry], &content);
        assert_eq!(gear.attack_bonus, 9);
    }

    #[test]
    fn set_bonus_takes_highest_tier_only() {
        let content = content_with_drowned_set();

        let two_pieces = [equipped("cuirass"), equipped("greaves")];
        let gear = aggregate_equipment(&two_pieces, &content);
        // 4 + 3 item defense, +3 from the two-piece tier, not +3+6.
        assert_eq!(gear.defense, 10);
        assert_eq!(gear.set_vigor, 0);

        let three_pieces = [equipped("cuirass"), equipped("greaves"), equipped("helm")];
        let gear = aggregate_equipment(&three_pieces, &content);
        assert_eq!(gear.defense, 4 + 3 + 2 + 6);
        assert_eq!(gear.set_vigor, 2);
        assert_eq!(gear.set_aether, 1);
    }

    #[test]
    fn effective_stats_compose_as_specified() {
        let content = content_with_drowned_set();
        let gear = aggregate_equipment(&[equipped("blade"), equipped("cuirass")], &content);
        let mut player = PlayerState::default();
        player.precision = 4;
        player.vigor = 50; // must not leak into defense
        player.aether = 2;
        assert_eq!(effective_attack(&player, &gear), 10);
        assert_eq!(effective_defense(&gear), 4);
        assert_eq!(effective_aether(&player, &gear), 2);
    }
}
