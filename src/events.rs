//! Typed effect events emitted per action for the presentation layer.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::state::DeathCause;

/// A visual-effect event. The engine only emits these; rendering them is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Damage { amount: i32 },
    Gold { amount: i64 },
    Xp { amount: i32 },
    Item,
    Achievement { title: String, description: String },
}

pub type EffectSet = SmallVec<[Effect; 4]>;

/// What one action produced: human-readable log lines plus typed effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResult {
    pub log: Vec<String>,
    pub effects: EffectSet,
    /// Set when the action ended in the player's death.
    pub death: Option<DeathCause>,
    /// Set when the action armed a boss encounter instead of auto-resolving.
    pub boss_started: bool,
}

impl ActionResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    pub fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}
