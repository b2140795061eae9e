#![feature(int_roundings)]
//! Abyssal Game Engine
//!
//! Platform-agnostic core game logic for the Abyssal depth-descent roguelike.
//! This crate provides all game mechanics without UI or platform-specific
//! dependencies.

pub mod achievements;
pub mod boss;
pub mod combat;
pub mod constants;
pub mod data;
pub mod equipment;
pub mod errors;
pub mod events;
pub mod grave;
pub mod loot;
pub mod numbers;
pub mod outcome;
pub mod progression;
pub mod repo;
pub mod rng;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use achievements::{AchievementCache, AchievementContext, AchievementDef, CATALOG};
pub use boss::{BossEncounter, BossPhase, PlayerMove, StrikeOutcome};
pub use combat::{CombatReport, pick_monster, resolve_trash_combat};
pub use data::{ContentData, ItemKind, ItemTemplate, MonsterTemplate, Rarity, SetTier, Slot};
pub use equipment::{
    GearSummary, aggregate_equipment, effective_aether, effective_attack, effective_defense,
};
pub use errors::EngineError;
pub use events::{ActionResult, Effect, EffectSet};
pub use grave::{RetrievalOutcome, resolve_death, retrieve_grave};
pub use loot::{DropCategory, LootDrop, generate_drop};
pub use outcome::{DescendOutcome, ExploreOutcome, explore_cost, roll_descend, roll_explore};
pub use progression::{
    gold_multiplier, grant_xp, scaled_gold, spend_stat_point, train_stat, training_cost,
    xp_requirement,
};
pub use repo::{MemoryRepo, Repository};
pub use rng::{CountingRng, RngBundle};
pub use session::{GameSession, SessionConfig};
pub use state::{DeathCause, Grave, GraveItem, InventoryEntry, PlayerState, StatKind};

/// Trait for abstracting content loading
/// Platform-specific implementations should provide this
pub trait ContentLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the item, monster, and set-bonus tables from the
    /// platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be loaded.
    fn load_content(&self) -> Result<ContentData, Self::Error>;
}

/// Main engine for starting play sessions
pub struct GameEngine<L>
where
    L: ContentLoader,
{
    loader: L,
}

impl<L> GameEngine<L>
where
    L: ContentLoader,
{
    /// Create a new engine with the provided content loader
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Start a session for a user: load content, read or create the player
    /// record, hydrate the achievement cache, and seed the RNG streams.
    ///
    /// # Errors
    ///
    /// Returns an error if content cannot be loaded or the player record
    /// cannot be read or created.
    pub fn start_session<R>(
        &self,
        mut repo: R,
        user_id: &str,
        seed: u64,
        config: SessionConfig,
    ) -> Result<GameSession<R>, anyhow::Error>
    where
        R: Repository,
        L::Error: Into<anyhow::Error>,
    {
        let content = self.loader.load_content().map_err(Into::into)?;

        let player = match repo.load_player(user_id)? {
            Some(player) => player,
            None => {
                let fresh = PlayerState::new(user_id);
                repo.save_player(&fresh)?;
                fresh
            }
        };
        let achievements = AchievementCache::hydrate(repo.list_achievements(user_id)?);

        Ok(GameSession::new(
            repo,
            content,
            config,
            player,
            achievements,
            seed,
        ))
    }
}
