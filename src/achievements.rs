//! Idempotent achievement unlocks.
//!
//! A session-lifetime cache of unlocked ids keeps the common case free of
//! store reads; the store's uniqueness check backs it up so an id can only
//! ever produce one stored row and one fired effect, even across sessions.

use std::collections::HashSet;

use crate::constants::{
    ACHIEVEMENT_DEPTH_ABYSS_WALKER, ACHIEVEMENT_DEPTH_DEEP_DIVER, ACHIEVEMENT_DEPTH_SURVIVOR,
    ACHIEVEMENT_GOLD_HOARD, ACHIEVEMENT_LEVEL_LEGEND,
};
use crate::events::{ActionResult, Effect};
use crate::repo::Repository;
use crate::state::PlayerState;

/// Facts the predicates judge after each action.
#[derive(Debug, Clone, Copy)]
pub struct AchievementContext<'a> {
    pub player: &'a PlayerState,
    /// Set for the action that felled a boss.
    pub boss_defeated: bool,
}

/// One achievement definition.
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    check: fn(&AchievementContext<'_>) -> bool,
}

pub const CATALOG: [AchievementDef; 6] = [
    AchievementDef {
        id: "survivor",
        title: "Survivor",
        description: "Reach depth 10.",
        check: |ctx| ctx.player.max_depth >= ACHIEVEMENT_DEPTH_SURVIVOR,
    },
    AchievementDef {
        id: "deep-diver",
        title: "Deep Diver",
        description: "Reach depth 100.",
        check: |ctx| ctx.player.max_depth >= ACHIEVEMENT_DEPTH_DEEP_DIVER,
    },
    AchievementDef {
        id: "abyss-walker",
        title: "Abyss Walker",
        description: "Reach depth 500.",
        check: |ctx| ctx.player.max_depth >= ACHIEVEMENT_DEPTH_ABYSS_WALKER,
    },
    AchievementDef {
        id: "hoarder",
        title: "Hoarder",
        description: "Hold 1,000 gold at once.",
        check: |ctx| ctx.player.gold >= ACHIEVEMENT_GOLD_HOARD,
    },
    AchievementDef {
        id: "beast-slayer",
        title: "Beast Slayer",
        description: "Defeat a named boss.",
        check: |ctx| ctx.boss_defeated,
    },
    AchievementDef {
        id: "legend",
        title: "LEGEND",
        description: "Reach level 25.",
        check: |ctx| ctx.player.level >= ACHIEVEMENT_LEVEL_LEGEND,
    },
];

/// Session cache of unlocked achievement ids.
#[derive(Debug, Clone, Default)]
pub struct AchievementCache {
    unlocked: HashSet<String>,
}

impl AchievementCache {
    /// Hydrate from the ids already stored for this user.
    #[must_use]
    pub fn hydrate(ids: Vec<String>) -> Self {
        Self {
            unlocked: ids.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.contains(id)
    }

    /// Evaluate every predicate and unlock whatever newly holds. Each unlock
    /// stores one row, fires one effect, and logs one line.
    ///
    /// # Errors
    ///
    /// Returns the repository error when an unlock row cannot be written.
    pub fn check_all<R: Repository>(
        &mut self,
        repo: &mut R,
        ctx: &AchievementContext<'_>,
        result: &mut ActionResult,
    ) -> Result<(), R::Error> {
        for def in &CATALOG {
            if self.unlocked.contains(def.id) || !(def.check)(ctx) {
                continue;
            }
            // The store may know of an unlock this cache missed; trust it.
            let newly = repo.insert_achievement(&ctx.player.id, def.id)?;
            self.unlocked.insert(def.id.to_string());
            if newly {
                result.push_log(format!("Achievement unlocked: {}", def.title));
                result.push_effect(Effect::Achievement {
                    title: def.title.to_string(),
                    description: def.description.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MemoryRepo;

    fn ctx(player: &PlayerState) -> AchievementContext<'_> {
        AchievementContext {
            player,
            boss_defeated: false,
        }
    }

    #[test]
    fn unlocks_fire_once_ever() {
        let mut repo = MemoryRepo::new();
        let mut cache = AchievementCache::default();
        let mut player = PlayerState::new("u1");
        player.max_depth = 12;

        let mut result = ActionResult::new();
        cache.check_all(&mut repo, &ctx(&player), &mut result).unwrap();
        assert_eq!(result.effects.len(), 1);
        assert!(cache.is_unlocked("survivor"));

        let mut result = ActionResult::new();
        cache.check_all(&mut repo, &ctx(&player), &mut result).unwrap();
        assert!(result.effects.is_empty(), "no refire on later checks");
    }

    #[test]
    fn store_rows_suppress_refire_across_sessions() {
        let mut repo = MemoryRepo::new();
        repo.insert_achievement("u1", "survivor").unwrap();

        let mut cache = AchievementCache::hydrate(repo.list_achievements("u1").unwrap());
        let mut player = PlayerState::new("u1");
        player.max_depth = 12;

        let mut result = ActionResult::new();
        cache.check_all(&mut repo, &ctx(&player), &mut result).unwrap();
        assert!(result.effects.is_empty());
    }

    #[test]
    fn thresholds_gate_each_predicate() {
        let mut repo = MemoryRepo::new();
        let mut cache = AchievementCache::default();
        let mut player = PlayerState::new("u1");
        player.max_depth = 500;
        player.gold = 1_000;
        player.level = 25;

        let mut result = ActionResult::new();
        let context = AchievementContext {
            player: &player,
            boss_defeated: true,
        };
        cache.check_all(&mut repo, &context, &mut result).unwrap();
        assert_eq!(result.effects.len(), CATALOG.len());
    }

    #[test]
    fn boss_flag_only_counts_on_the_killing_action() {
        let mut repo = MemoryRepo::new();
        let mut cache = AchievementCache::default();
        let player = PlayerState::new("u1");

        let mut result = ActionResult::new();
        cache.check_all(&mut repo, &ctx(&player), &mut result).unwrap();
        assert!(!cache.is_unlocked("beast-slayer"));

        let mut result = ActionResult::new();
        let context = AchievementContext {
            player: &player,
            boss_defeated: true,
        };
        cache.check_all(&mut repo, &context, &mut result).unwrap();
        assert!(cache.is_unlocked("beast-slayer"));
    }
}
