//! Death recovery and grave retrieval.
//!
//! Death snapshots everything the player carried into a singleton grave,
//! wipes the live inventory, and resets the run. Retrieval consumes the
//! grave exactly once. A second death before retrieval replaces the old
//! grave outright; whatever it held is gone.

use crate::constants::FALLBACK_ITEM_ID;
use crate::events::ActionResult;
use crate::repo::Repository;
use crate::state::{DeathCause, Grave, GraveItem, InventoryEntry, PlayerState};

/// What grave retrieval accomplished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalOutcome {
    /// No grave exists for this user.
    NoGrave,
    /// Inventory is already at capacity; nothing was touched.
    NoRoom,
    Retrieved { gold: i64, restored: usize, dropped: usize },
}

/// Resolve a death: bury the inventory and gold, wipe the run, hand back the
/// fallback starter item.
///
/// Snapshot and grave-write failures are logged and swallowed so the wipe
/// still happens; a player must never keep their gear because the grave
/// table was unavailable. Failures wiping or restocking the live inventory
/// do propagate.
///
/// # Errors
///
/// Returns the repository error when the inventory wipe or the fallback
/// insert fails.
pub fn resolve_death<R: Repository>(
    repo: &mut R,
    player: &mut PlayerState,
    cause: &DeathCause,
    result: &mut ActionResult,
) -> Result<(), R::Error> {
    match cause {
        DeathCause::Exhaustion => {
            result.push_log("Your body gives out. The dark claims you.");
        }
        DeathCause::Combat { monster } => {
            result.push_log(format!("You were slain by {monster}."));
        }
    }

    let items: Vec<GraveItem> = match repo.list_inventory(&player.id) {
        Ok(entries) => entries.iter().map(GraveItem::from).collect(),
        Err(_) => {
            result.push_log("Your belongings scatter into the dark, unmarked.");
            Vec::new()
        }
    };

    let grave = Grave {
        user_id: player.id.clone(),
        depth: player.depth,
        gold_lost: player.gold,
        items,
    };

    // Singleton grave: any prior, unretrieved grave is replaced and lost.
    let buried = repo
        .delete_grave(&player.id)
        .and_then(|()| repo.insert_grave(&grave));
    match buried {
        Ok(()) => {
            result.push_log(format!(
                "Your belongings rest in a grave at depth {}.",
                grave.depth
            ));
        }
        Err(_) => {
            result.push_log("No grave could be dug. What you carried is gone.");
        }
    }

    repo.clear_inventory(&player.id)?;
    repo.insert_inventory(InventoryEntry::plain(&player.id, FALLBACK_ITEM_ID))?;

    player.depth = 0;
    player.gold = 0;
    player.health = player.max_health;
    player.current_stamina = player.max_stamina;
    repo.save_player(player)?;

    result.push_log("You wake at the surface, clutching a rusty shiv.");
    result.death = Some(cause.clone());
    Ok(())
}

/// Consume the user's grave: credit its gold and restore as many items as
/// the inventory cap allows. The grave row is deleted before anything is
/// credited so a replayed call can never pay out twice.
///
/// # Errors
///
/// Returns the repository error when any read or write fails.
pub fn retrieve_grave<R: Repository>(
    repo: &mut R,
    player: &mut PlayerState,
    inventory_cap: usize,
    result: &mut ActionResult,
) -> Result<RetrievalOutcome, R::Error> {
    let Some(grave) = repo.load_grave(&player.id)? else {
        result.push_log("There is no grave here to reclaim.");
        return Ok(RetrievalOutcome::NoGrave);
    };

    let held = repo.list_inventory(&player.id)?.len();
    if held >= inventory_cap {
        result.push_log("Your pack is full. The grave keeps its hoard for now.");
        return Ok(RetrievalOutcome::NoRoom);
    }

    repo.delete_grave(&player.id)?;

    player.gold += grave.gold_lost;

    let room = inventory_cap - held;
    let mut restored = 0;
    for item in grave.items.iter().take(room) {
        // Restored gear comes back unequipped so slot uniqueness holds.
        let mut entry = InventoryEntry::plain(&player.id, &item.item_id);
        entry.name_override = item.name_override.clone();
        entry.stats_override = item.stats_override.clone();
        repo.insert_inventory(entry)?;
        restored += 1;
    }
    let dropped = grave.items.len() - restored;

    repo.save_player(player)?;

    result.push_log(format!(
        "You reclaim your grave: {} gold and {restored} items returned.",
        grave.gold_lost
    ));
    if dropped > 0 {
        result.push_log(format!("{dropped} items would not fit and are lost."));
    }
    Ok(RetrievalOutcome::Retrieved {
        gold: grave.gold_lost,
        restored,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryRepo;

    fn seeded_player(repo: &mut MemoryRepo) -> PlayerState {
        let mut player = PlayerState::new("u1");
        player.depth = 42;
        player.max_depth = 42;
        player.gold = 300;
        player.bank_gold = 50;
        player.health = 0;
        repo.put_player(player.clone());
        player
    }

    #[test]
    fn death_buries_wipes_and_resets() {
        let mut repo = MemoryRepo::new();
        let mut player = seeded_player(&mut repo);
        repo.insert_inventory(InventoryEntry::plain("u1", "iron-blade"))
            .unwrap();

        let mut result = ActionResult::new();
        let cause = DeathCause::Combat {
            monster: "Pale Crawler".to_string(),
        };
        resolve_death(&mut repo, &mut player, &cause, &mut result).unwrap();

        let grave = repo.load_grave("u1").unwrap().unwrap();
        assert_eq!(grave.depth, 42);
        assert_eq!(grave.gold_lost, 300);
        assert_eq!(grave.items.len(), 1);

        assert_eq!(player.depth, 0);
        assert_eq!(player.gold, 0);
        assert_eq!(player.health, player.max_health);
        assert_eq!(player.max_depth, 42, "best depth survives death");
        assert_eq!(player.bank_gold, 50, "banked gold survives death");

        let inventory = repo.list_inventory("u1").unwrap();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].item_id, FALLBACK_ITEM_ID);
        assert_eq!(result.death, Some(cause));
    }

    #[test]
    fn second_death_replaces_the_grave() {
        let mut repo = MemoryRepo::new();
        let mut player = seeded_player(&mut repo);
        let mut result = ActionResult::new();
        resolve_death(&mut repo, &mut player, &DeathCause::Exhaustion, &mut result).unwrap();

        player.depth = 7;
        player.gold = 25;
        let mut result = ActionResult::new();
        resolve_death(&mut repo, &mut player, &DeathCause::Exhaustion, &mut result).unwrap();

        let grave = repo.load_grave("u1").unwrap().unwrap();
        assert_eq!(grave.depth, 7);
        assert_eq!(grave.gold_lost, 25);
        // First grave's shiv snapshot replaced the buried blade for good.
        assert_eq!(grave.items.len(), 1);
        assert_eq!(grave.items[0].item_id, FALLBACK_ITEM_ID);
    }

    #[test]
    fn retrieval_is_exactly_once() {
        let mut repo = MemoryRepo::new();
        let mut player = seeded_player(&mut repo);
        repo.insert_inventory(InventoryEntry::plain("u1", "iron-blade"))
            .unwrap();
        let mut result = ActionResult::new();
        resolve_death(&mut repo, &mut player, &DeathCause::Exhaustion, &mut result).unwrap();

        let mut result = ActionResult::new();
        let outcome = retrieve_grave(&mut repo, &mut player, 60, &mut result).unwrap();
        assert_eq!(
            outcome,
            RetrievalOutcome::Retrieved {
                gold: 300,
                restored: 1,
                dropped: 0
            }
        );
        assert_eq!(player.gold, 300);
        assert!(repo.load_grave("u1").unwrap().is_none());

        let mut result = ActionResult::new();
        let outcome = retrieve_grave(&mut repo, &mut player, 60, &mut result).unwrap();
        assert_eq!(outcome, RetrievalOutcome::NoGrave);
        assert_eq!(player.gold, 300, "no double credit");
    }

    #[test]
    fn retrieval_refuses_at_capacity_and_drops_overflow() {
        let mut repo = MemoryRepo::new();
        let mut player = seeded_player(&mut repo);
        for i in 0..3 {
            repo.insert_inventory(InventoryEntry::plain("u1", &format!("trinket-{i}")))
                .unwrap();
        }
        let mut result = ActionResult::new();
        resolve_death(&mut repo, &mut player, &DeathCause::Exhaustion, &mut result).unwrap();
        // Live inventory now holds one fallback item; the grave holds three.

        let mut result = ActionResult::new();
        let outcome = retrieve_grave(&mut repo, &mut player, 1, &mut result).unwrap();
        assert_eq!(outcome, RetrievalOutcome::NoRoom);
        assert!(repo.load_grave("u1").unwrap().is_some(), "grave untouched");

        let mut result = ActionResult::new();
        let outcome = retrieve_grave(&mut repo, &mut player, 3, &mut result).unwrap();
        assert_eq!(
            outcome,
            RetrievalOutcome::Retrieved {
                gold: 300,
                restored: 2,
                dropped: 1
            }
        );
        assert_eq!(repo.inventory_count("u1"), 3);
    }

    #[test]
    fn restored_gear_comes_back_unequipped() {
        let mut repo = MemoryRepo::new();
        let mut player = seeded_player(&mut repo);
        let mut entry = InventoryEntry::plain("u1", "iron-blade");
        entry.is_equipped = true;
        entry.slot = Some(crate::data::Slot::MainHand);
        repo.insert_inventory(entry).unwrap();

        let mut result = ActionResult::new();
        resolve_death(&mut repo, &mut player, &DeathCause::Exhaustion, &mut result).unwrap();
        let mut result = ActionResult::new();
        retrieve_grave(&mut repo, &mut player, 60, &mut result).unwrap();

        let restored = repo.list_inventory("u1").unwrap();
        assert!(restored.iter().all(|row| !row.is_equipped));
    }
}
