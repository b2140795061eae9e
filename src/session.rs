//! The action orchestrator.
//!
//! A [`GameSession`] owns the player record, the content tables, the RNG
//! bundle, and the repository handle, and sequences every action the same
//! way: resource check, outcome roll, branch resolution, progression and
//! death checks, then a single player save. Each action returns an
//! [`ActionResult`] of log lines and typed effects for the caller to render.

use rand::Rng;

#[cfg(debug_assertions)]
use crate::constants::DEBUG_ENV_VAR;
use crate::constants::{
    DESCEND_STAMINA_COST, EXHAUSTION_DAMAGE, GOLD_VEIN_DEPTH_DIVISOR, GOLD_VEIN_MAX, GOLD_VEIN_MIN,
    SESSION_LOG_CAP,
};
use crate::achievements::{AchievementCache, AchievementContext};
use crate::boss::{BossEncounter, BossPhase, PlayerMove};
use crate::combat::{pick_monster, resolve_trash_combat};
use crate::data::{ContentData, ItemKind};
use crate::equipment::{aggregate_equipment, effective_aether, effective_attack, effective_defense, GearSummary};
use crate::errors::EngineError;
use crate::events::{ActionResult, Effect};
use crate::grave::{resolve_death, retrieve_grave, RetrievalOutcome};
use crate::loot::{generate_drop, DropCategory};
use crate::outcome::{
    atmosphere_line, explore_cost, percentile_roll, roll_descend, roll_explore, DescendOutcome,
    ExploreOutcome,
};
use crate::progression::{grant_xp, scaled_gold, spend_stat_point, train_stat, training_cost};
use crate::repo::Repository;
use crate::rng::RngBundle;
use crate::state::{DeathCause, InventoryEntry, PlayerState, StatKind};

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// Session tuning the host decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum inventory rows per player.
    pub inventory_cap: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { inventory_cap: 60 }
    }
}

/// A live play session for one user.
pub struct GameSession<R: Repository> {
    repo: R,
    content: ContentData,
    config: SessionConfig,
    player: PlayerState,
    rng: RngBundle,
    achievements: AchievementCache,
    boss: Option<BossEncounter>,
    busy: bool,
    logs: Vec<String>,
}

type ActionOutcome<R> = Result<ActionResult, EngineError<<R as Repository>::Error>>;

impl<R: Repository> GameSession<R> {
    /// Assemble a session from already-loaded parts. Hosts normally go
    /// through [`crate::GameEngine::start_session`] instead.
    #[must_use]
    pub fn new(
        repo: R,
        content: ContentData,
        config: SessionConfig,
        player: PlayerState,
        achievements: AchievementCache,
        seed: u64,
    ) -> Self {
        Self {
            repo,
            content,
            config,
            player,
            rng: RngBundle::from_user_seed(seed),
            achievements,
            boss: None,
            busy: false,
            logs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn player(&self) -> &PlayerState {
        &self.player
    }

    #[must_use]
    pub const fn boss(&self) -> Option<&BossEncounter> {
        self.boss.as_ref()
    }

    /// Rolling log of recent lines, newest last.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    #[must_use]
    pub const fn repo(&self) -> &R {
        &self.repo
    }

    pub const fn repo_mut(&mut self) -> &mut R {
        &mut self.repo
    }

    fn absorb(&mut self, result: &ActionResult) {
        self.logs.extend(result.log.iter().cloned());
        if self.logs.len() > SESSION_LOG_CAP {
            let excess = self.logs.len() - SESSION_LOG_CAP;
            self.logs.drain(..excess);
        }
    }

    fn refusal(&mut self, line: &str) -> ActionResult {
        let mut result = ActionResult::new();
        result.push_log(line);
        self.absorb(&result);
        result
    }

    /// A pending boss encounter blocks every action except boss moves.
    fn blocked(&mut self) -> Option<ActionResult> {
        if self.busy {
            return Some(self.refusal("You are already mid-action."));
        }
        if self.boss.is_some() {
            return Some(self.refusal("Something vast blocks the way. Deal with it first."));
        }
        None
    }

    fn gear(&self) -> Result<GearSummary, EngineError<R::Error>> {
        let rows = self
            .repo
            .list_inventory(&self.player.id)
            .map_err(EngineError::repo)?;
        Ok(aggregate_equipment(&rows, &self.content))
    }

    fn save(&mut self) -> Result<(), EngineError<R::Error>> {
        self.player.clamp_vitals();
        self.repo
            .save_player(&self.player)
            .map_err(EngineError::repo)
    }

    fn check_achievements(
        &mut self,
        boss_defeated: bool,
        result: &mut ActionResult,
    ) -> Result<(), EngineError<R::Error>> {
        let ctx = AchievementContext {
            player: &self.player,
            boss_defeated,
        };
        self.achievements
            .check_all(&mut self.repo, &ctx, result)
            .map_err(EngineError::repo)
    }

    /// The primary action: step one level deeper and resolve a single
    /// outcome branch. At zero stamina the step still happens, paid for in
    /// flesh instead.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn descend(&mut self) -> ActionOutcome<R> {
        if let Some(refused) = self.blocked() {
            return Ok(refused);
        }
        self.busy = true;
        let out = self.descend_inner();
        self.busy = false;
        out
    }

    fn descend_inner(&mut self) -> ActionOutcome<R> {
        let mut result = ActionResult::new();

        if self.player.current_stamina >= DESCEND_STAMINA_COST {
            self.player.current_stamina -= DESCEND_STAMINA_COST;
        } else {
            self.player.health -= EXHAUSTION_DAMAGE;
            result.push_log(format!(
                "Exhausted, you stumble downward. The strain tears at you. (-{EXHAUSTION_DAMAGE} HP)"
            ));
            result.push_effect(Effect::Damage {
                amount: EXHAUSTION_DAMAGE,
            });
            if self.player.is_dead() {
                resolve_death(
                    &mut self.repo,
                    &mut self.player,
                    &DeathCause::Exhaustion,
                    &mut result,
                )
                .map_err(EngineError::repo)?;
                self.absorb(&result);
                return Ok(result);
            }
        }

        self.player.depth += 1;
        self.player.record_depth();
        result.push_log(format!("You descend to depth {}.", self.player.depth));

        self.ghost_check(&mut result)?;

        let roll = percentile_roll(&mut *self.rng.outcome());
        let outcome = roll_descend(roll);
        if debug_log_enabled() {
            println!(
                "Descend outcome | depth:{} roll:{roll} branch:{outcome:?}",
                self.player.depth
            );
        }

        match outcome {
            DescendOutcome::Atmosphere => {
                let line = atmosphere_line(&mut *self.rng.outcome());
                result.push_log(line);
            }
            DescendOutcome::Gold => self.resolve_gold_vein(&mut result)?,
            DescendOutcome::Scavenge => self.resolve_loot(DropCategory::Scraps, &mut result)?,
            DescendOutcome::Treasure => self.resolve_loot(DropCategory::Equipment, &mut result)?,
            DescendOutcome::Combat => {
                if self.resolve_combat(&mut result)? {
                    return Ok(result);
                }
            }
        }

        self.check_achievements(false, &mut result)?;
        self.save()?;
        self.absorb(&result);
        Ok(result)
    }

    /// The secondary action: search the current level without descending.
    /// Costs stamina scaled by depth and refuses outright when the player
    /// cannot pay.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn explore(&mut self) -> ActionOutcome<R> {
        if let Some(refused) = self.blocked() {
            return Ok(refused);
        }
        self.busy = true;
        let out = self.explore_inner();
        self.busy = false;
        out
    }

    fn explore_inner(&mut self) -> ActionOutcome<R> {
        let cost = explore_cost(self.player.depth);
        if self.player.current_stamina < cost {
            return Ok(self.refusal("You are too exhausted to search here."));
        }

        let mut result = ActionResult::new();
        self.player.current_stamina -= cost;

        let roll = percentile_roll(&mut *self.rng.outcome());
        let outcome = roll_explore(roll);
        if debug_log_enabled() {
            println!(
                "Explore outcome | depth:{} cost:{cost} roll:{roll} branch:{outcome:?}",
                self.player.depth
            );
        }

        match outcome {
            ExploreOutcome::Loot => self.resolve_loot(DropCategory::Any, &mut result)?,
            ExploreOutcome::Nothing => {
                result.push_log("You search the level and find nothing.");
            }
            ExploreOutcome::Combat => {
                if self.resolve_combat(&mut result)? {
                    return Ok(result);
                }
            }
        }

        self.check_achievements(false, &mut result)?;
        self.save()?;
        self.absorb(&result);
        Ok(result)
    }

    /// Flavor line when standing where one's own unretrieved grave lies.
    fn ghost_check(&mut self, result: &mut ActionResult) -> Result<(), EngineError<R::Error>> {
        let grave = self
            .repo
            .load_grave(&self.player.id)
            .map_err(EngineError::repo)?;
        if grave.is_some_and(|grave| grave.depth == self.player.depth) {
            result.push_log("A cold presence lingers here. Your own ghost watches from the dark.");
        }
        Ok(())
    }

    fn resolve_gold_vein(&mut self, result: &mut ActionResult) -> Result<(), EngineError<R::Error>> {
        let base = {
            let mut rng = self.rng.loot();
            rng.random_range(GOLD_VEIN_MIN..=GOLD_VEIN_MAX)
        } + i64::from(self.player.depth) / GOLD_VEIN_DEPTH_DIVISOR;

        let gear = self.gear()?;
        let (credited, bonus) = scaled_gold(base, effective_aether(&self.player, &gear));
        self.player.gold += credited;
        result.push_log(format!("You found a vein of gold! (+{credited} Gold)"));
        if bonus > 0 {
            result.push_log(format!("Your aether hums. (+{bonus} bonus Gold)"));
        }
        result.push_effect(Effect::Gold { amount: credited });
        Ok(())
    }

    fn resolve_loot(
        &mut self,
        category: DropCategory,
        result: &mut ActionResult,
    ) -> Result<(), EngineError<R::Error>> {
        let drop = {
            let mut rng = self.rng.loot();
            generate_drop(self.player.depth, category, &self.content, &mut *rng)
        };
        let Some(drop) = drop else {
            result.push_log("You sift through the debris and find nothing of use.");
            return Ok(());
        };

        let held = self
            .repo
            .list_inventory(&self.player.id)
            .map_err(EngineError::repo)?
            .len();
        if held >= self.config.inventory_cap {
            result.push_log(format!(
                "Your pack is full. You leave the {} behind.",
                drop.display_name
            ));
            return Ok(());
        }

        let name = drop.display_name.clone();
        self.repo
            .insert_inventory(drop.into_entry(&self.player.id))
            .map_err(EngineError::repo)?;
        result.push_log(format!("You found: {name}!"));
        result.push_effect(Effect::Item);
        Ok(())
    }

    /// Resolve the combat branch. Returns `true` when the action is already
    /// finished (death, or a boss encounter was armed) and the caller should
    /// return without the usual epilogue.
    fn resolve_combat(&mut self, result: &mut ActionResult) -> Result<bool, EngineError<R::Error>> {
        let monster = {
            let mut rng = self.rng.combat();
            pick_monster(self.player.depth, &self.content, &mut *rng).cloned()
        };
        let Some(monster) = monster else {
            let line = atmosphere_line(&mut *self.rng.outcome());
            result.push_log(line);
            return Ok(false);
        };

        if monster.is_boss {
            result.push_log(format!(
                "{} blocks your path. There is no slipping past.",
                monster.name
            ));
            self.boss = Some(BossEncounter::new(&monster));
            result.boss_started = true;
            self.save()?;
            self.absorb(result);
            return Ok(true);
        }

        let gear = self.gear()?;
        let attack = effective_attack(&self.player, &gear);
        let defense = effective_defense(&gear);
        let report = {
            let mut rng = self.rng.combat();
            resolve_trash_combat(attack, defense, &monster, &mut *rng)
        };

        result.push_log(format!("A {} lunges from the dark!", report.monster));
        if report.crit {
            result.push_log("A perfect strike! (critical, x2 damage)");
        }
        result.push_log(format!(
            "You cut it down in {} rounds, taking {} damage.",
            report.rounds, report.total_damage_taken
        ));
        self.player.health -= report.total_damage_taken;
        result.push_effect(Effect::Damage {
            amount: report.total_damage_taken,
        });

        if self.player.is_dead() {
            let cause = DeathCause::Combat {
                monster: report.monster,
            };
            resolve_death(&mut self.repo, &mut self.player, &cause, result)
                .map_err(EngineError::repo)?;
            self.absorb(result);
            return Ok(true);
        }

        self.credit_victory(report.gold_reward, report.xp_reward, &gear, result);
        Ok(false)
    }

    fn credit_victory(
        &mut self,
        base_gold: i64,
        xp: i32,
        gear: &GearSummary,
        result: &mut ActionResult,
    ) {
        let (credited, bonus) = scaled_gold(base_gold, effective_aether(&self.player, gear));
        self.player.gold += credited;
        result.push_log(format!("You loot {credited} gold from the remains."));
        if bonus > 0 {
            result.push_log(format!("Your aether hums. (+{bonus} bonus Gold)"));
        }
        result.push_effect(Effect::Gold { amount: credited });

        result.push_log(format!("+{xp} XP"));
        result.push_effect(Effect::Xp { amount: xp });
        let gained = grant_xp(&mut self.player, xp);
        if gained > 0 {
            result.push_log(format!(
                "You are stronger. Welcome to level {}.",
                self.player.level
            ));
        }
    }

    /// Drive the pending boss encounter one player move forward, then the
    /// boss's reply. Refused when no encounter is pending.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn boss_move(&mut self, mv: PlayerMove) -> ActionOutcome<R> {
        if self.busy {
            return Ok(self.refusal("You are already mid-action."));
        }
        let Some(mut encounter) = self.boss.take() else {
            return Ok(self.refusal("There is no monster before you."));
        };
        if encounter.phase != BossPhase::PlayerTurn {
            self.boss = Some(encounter);
            return Ok(self.refusal("It is not your turn."));
        }

        self.busy = true;
        let out = self.boss_move_inner(&mut encounter, mv);
        self.busy = false;
        if !encounter.is_over() {
            self.boss = Some(encounter);
        }
        out
    }

    fn boss_move_inner(
        &mut self,
        encounter: &mut BossEncounter,
        mv: PlayerMove,
    ) -> ActionOutcome<R> {
        let mut result = ActionResult::new();
        let gear = self.gear()?;

        match mv {
            PlayerMove::Attack => {
                let damage = encounter.player_attack(effective_attack(&self.player, &gear));
                result.push_log(format!(
                    "You strike the {} for {damage}.",
                    encounter.boss.name
                ));
            }
            PlayerMove::Defend => {
                encounter.player_defend();
                result.push_log("You raise your guard against the next blow.");
            }
            PlayerMove::Heal => {
                if !self.drink_consumable(&mut result)? {
                    self.absorb(&result);
                    return Ok(result);
                }
                encounter.player_heal();
            }
            PlayerMove::Special => {
                let rows = self
                    .repo
                    .list_inventory(&self.player.id)
                    .map_err(EngineError::repo)?;
                let Some(artifact) = encounter.counter_artifact(&rows, &self.content) else {
                    result.push_log("Nothing you carry answers this creature.");
                    self.absorb(&result);
                    return Ok(result);
                };
                let name = artifact.name.clone();
                if encounter.player_special() {
                    result.push_log(format!("The {name} flares with cold light."));
                } else {
                    result.push_log(format!("The {name} is spent and dark."));
                    self.absorb(&result);
                    return Ok(result);
                }
            }
        }

        if encounter.phase == BossPhase::Victory {
            result.push_log(format!("The {} collapses!", encounter.boss.name));
            self.credit_victory(
                encounter.boss.gold_reward,
                encounter.boss.xp_reward,
                &gear,
                &mut result,
            );
            self.award_guaranteed_drop(encounter, &mut result)?;
            self.check_achievements(true, &mut result)?;
            self.save()?;
            self.absorb(&result);
            return Ok(result);
        }

        if encounter.phase == BossPhase::BossTurn {
            let strike = {
                let mut rng = self.rng.boss();
                encounter.boss_turn(effective_defense(&gear), &mut *rng)
            };
            if strike.heavy {
                result.push_log(format!(
                    "The {} rears back for a crushing blow!",
                    encounter.boss.name
                ));
            }
            if strike.negated {
                result.push_log("Your artifact drinks the blow. Nothing lands.");
            } else if strike.damage > 0 {
                if strike.halved {
                    result.push_log("You brace, and the blow is halved.");
                }
                result.push_log(format!(
                    "The {} hits you for {}.",
                    encounter.boss.name, strike.damage
                ));
                self.player.health -= strike.damage;
                result.push_effect(Effect::Damage {
                    amount: strike.damage,
                });
            }

            if self.player.is_dead() {
                encounter.phase = BossPhase::Defeat;
                let cause = DeathCause::Combat {
                    monster: encounter.boss.name.clone(),
                };
                resolve_death(&mut self.repo, &mut self.player, &cause, &mut result)
                    .map_err(EngineError::repo)?;
                self.absorb(&result);
                return Ok(result);
            }
        }

        self.save()?;
        self.absorb(&result);
        Ok(result)
    }

    /// Walking away from a boss is not retreat, it is death.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn abandon_boss(&mut self) -> ActionOutcome<R> {
        let Some(encounter) = self.boss.take() else {
            return Ok(self.refusal("There is no monster before you."));
        };
        let mut result = ActionResult::new();
        result.push_log(format!(
            "You turn your back on the {}. It does not let you leave.",
            encounter.boss.name
        ));
        let cause = DeathCause::Combat {
            monster: encounter.boss.name.clone(),
        };
        resolve_death(&mut self.repo, &mut self.player, &cause, &mut result)
            .map_err(EngineError::repo)?;
        self.absorb(&result);
        Ok(result)
    }

    fn drink_consumable(
        &mut self,
        result: &mut ActionResult,
    ) -> Result<bool, EngineError<R::Error>> {
        let rows = self
            .repo
            .list_inventory(&self.player.id)
            .map_err(EngineError::repo)?;
        let found = rows.iter().find_map(|row| {
            let item = self.content.item(&row.item_id)?;
            (!row.is_equipped && item.kind == ItemKind::Consumable).then(|| (row.clone(), item))
        });
        let Some((row, item)) = found else {
            result.push_log("You have nothing left to drink.");
            return Ok(false);
        };

        let amount = BossEncounter::heal_amount(item);
        let name = item.name.clone();
        if row.quantity > 1 {
            let mut updated = row.clone();
            updated.quantity -= 1;
            self.repo
                .update_inventory(&updated)
                .map_err(EngineError::repo)?;
        } else {
            self.repo
                .delete_inventory(&self.player.id, row.id)
                .map_err(EngineError::repo)?;
        }

        self.player.health = (self.player.health + amount).min(self.player.max_health);
        result.push_log(format!("You down the {name}. (+{amount} HP)"));
        Ok(true)
    }

    fn award_guaranteed_drop(
        &mut self,
        encounter: &BossEncounter,
        result: &mut ActionResult,
    ) -> Result<(), EngineError<R::Error>> {
        let Some(item_id) = encounter.boss.guaranteed_drop.as_deref() else {
            return Ok(());
        };
        let Some(item) = self.content.item(item_id) else {
            result.push_log("It clutched something, but whatever it was crumbles to dust.");
            return Ok(());
        };
        let held = self
            .repo
            .list_inventory(&self.player.id)
            .map_err(EngineError::repo)?
            .len();
        if held >= self.config.inventory_cap {
            result.push_log(format!(
                "Your pack is full. The {} stays with the corpse.",
                item.name
            ));
            return Ok(());
        }
        let name = item.name.clone();
        self.repo
            .insert_inventory(InventoryEntry::plain(&self.player.id, item_id))
            .map_err(EngineError::repo)?;
        result.push_log(format!("It drops: {name}!"));
        result.push_effect(Effect::Item);
        Ok(())
    }

    /// Reclaim the player's grave, if one exists and the pack has room.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn reclaim_grave(&mut self) -> ActionOutcome<R> {
        if let Some(refused) = self.blocked() {
            return Ok(refused);
        }
        self.busy = true;
        let mut result = ActionResult::new();
        let outcome = retrieve_grave(
            &mut self.repo,
            &mut self.player,
            self.config.inventory_cap,
            &mut result,
        )
        .map_err(EngineError::repo);
        self.busy = false;
        if let RetrievalOutcome::Retrieved { gold, .. } = outcome? {
            result.push_effect(Effect::Gold { amount: gold });
            self.check_achievements(false, &mut result)?;
        }
        self.absorb(&result);
        Ok(result)
    }

    /// Equip an owned row into its template's slot, unequipping whatever
    /// currently holds that slot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn equip(&mut self, entry_id: i64) -> ActionOutcome<R> {
        if let Some(refused) = self.blocked() {
            return Ok(refused);
        }
        let rows = self
            .repo
            .list_inventory(&self.player.id)
            .map_err(EngineError::repo)?;
        let Some(row) = rows.iter().find(|row| row.id == entry_id) else {
            return Ok(self.refusal("You do not carry that."));
        };
        let slot = self
            .content
            .item(&row.item_id)
            .and_then(|item| item.valid_slot);
        let Some(slot) = slot else {
            return Ok(self.refusal("That cannot be worn or wielded."));
        };

        let mut result = ActionResult::new();
        if let Some(holder) = rows
            .iter()
            .find(|other| other.is_equipped && other.slot == Some(slot) && other.id != entry_id)
        {
            let mut freed = holder.clone();
            freed.is_equipped = false;
            freed.slot = None;
            self.repo
                .update_inventory(&freed)
                .map_err(EngineError::repo)?;
            result.push_log("You stow what you had there.");
        }

        let mut equipped = row.clone();
        equipped.is_equipped = true;
        equipped.slot = Some(slot);
        self.repo
            .update_inventory(&equipped)
            .map_err(EngineError::repo)?;
        let name = equipped
            .name_override
            .clone()
            .or_else(|| self.content.item(&equipped.item_id).map(|i| i.name.clone()))
            .unwrap_or_else(|| equipped.item_id.clone());
        result.push_log(format!("You equip the {name}."));
        self.absorb(&result);
        Ok(result)
    }

    /// Unequip an equipped row.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn unequip(&mut self, entry_id: i64) -> ActionOutcome<R> {
        if let Some(refused) = self.blocked() {
            return Ok(refused);
        }
        let rows = self
            .repo
            .list_inventory(&self.player.id)
            .map_err(EngineError::repo)?;
        let Some(row) = rows.iter().find(|row| row.id == entry_id && row.is_equipped) else {
            return Ok(self.refusal("Nothing of yours is equipped there."));
        };
        let mut freed = row.clone();
        freed.is_equipped = false;
        freed.slot = None;
        self.repo
            .update_inventory(&freed)
            .map_err(EngineError::repo)?;
        let mut result = ActionResult::new();
        result.push_log("You stow it away.");
        self.absorb(&result);
        Ok(result)
    }

    /// Spend one earned stat point.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn spend_point(&mut self, kind: StatKind) -> ActionOutcome<R> {
        if let Some(refused) = self.blocked() {
            return Ok(refused);
        }
        let mut result = ActionResult::new();
        if spend_stat_point(&mut self.player, kind) {
            result.push_log(format!(
                "{kind} rises to {}.",
                self.player.stat(kind)
            ));
            self.save()?;
        } else {
            result.push_log("You have no stat points to spend.");
        }
        self.absorb(&result);
        Ok(result)
    }

    /// Buy a stat with gold at the escalating training price.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Repository`] when persistence fails.
    pub fn train(&mut self, kind: StatKind) -> ActionOutcome<R> {
        if let Some(refused) = self.blocked() {
            return Ok(refused);
        }
        let cost = training_cost(self.player.stats_bought);
        let mut result = ActionResult::new();
        if train_stat(&mut self.player, kind) {
            result.push_log(format!(
                "You pay {cost} gold. {kind} rises to {}.",
                self.player.stat(kind)
            ));
            self.check_achievements(false, &mut result)?;
            self.save()?;
        } else {
            result.push_log(format!("Training costs {cost} gold. You cannot pay."));
        }
        self.absorb(&result);
        Ok(result)
    }
}
