//! Persistence seam.
//!
//! The engine never talks to a concrete store; it goes through [`Repository`]
//! so the resolution logic stays persistence-agnostic and testable with the
//! in-memory implementation below.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;

use crate::state::{Grave, InventoryEntry, PlayerState};

/// Narrow contract the engine needs from a persistent record store.
/// Implementations map these onto whatever backend they have.
pub trait Repository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a player record, `None` when the user has none yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read.
    fn load_player(&self, user_id: &str) -> Result<Option<PlayerState>, Self::Error>;

    /// Write the player record back.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_player(&mut self, player: &PlayerState) -> Result<(), Self::Error>;

    /// All inventory rows for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be read.
    fn list_inventory(&self, user_id: &str) -> Result<Vec<InventoryEntry>, Self::Error>;

    /// Insert a row; the returned entry carries the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be inserted.
    fn insert_inventory(&mut self, entry: InventoryEntry) -> Result<InventoryEntry, Self::Error>;

    /// Rewrite an existing row (equip flag, slot, overrides).
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be updated.
    fn update_inventory(&mut self, entry: &InventoryEntry) -> Result<(), Self::Error>;

    /// Delete one row by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be deleted.
    fn delete_inventory(&mut self, user_id: &str, entry_id: i64) -> Result<(), Self::Error>;

    /// Delete every row the user owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be deleted.
    fn clear_inventory(&mut self, user_id: &str) -> Result<(), Self::Error>;

    /// The user's grave, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the grave cannot be read.
    fn load_grave(&self, user_id: &str) -> Result<Option<Grave>, Self::Error>;

    /// Insert a grave record. The singleton rule is the caller's to enforce
    /// by deleting first; the store is not expected to constrain it.
    ///
    /// # Errors
    ///
    /// Returns an error if the grave cannot be inserted.
    fn insert_grave(&mut self, grave: &Grave) -> Result<(), Self::Error>;

    /// Delete the user's grave. Deleting a missing grave is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete cannot be issued.
    fn delete_grave(&mut self, user_id: &str) -> Result<(), Self::Error>;

    /// Ids of every achievement the user has unlocked.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows cannot be read.
    fn list_achievements(&self, user_id: &str) -> Result<Vec<String>, Self::Error>;

    /// Insert an unlock row; returns `false` when the pair already existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be inserted.
    fn insert_achievement(&mut self, user_id: &str, achievement_id: &str)
    -> Result<bool, Self::Error>;
}

/// In-memory repository for tests and offline harnesses.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepo {
    players: HashMap<String, PlayerState>,
    inventory: Vec<InventoryEntry>,
    graves: HashMap<String, Grave>,
    achievements: HashSet<(String, String)>,
    next_entry_id: i64,
}

impl MemoryRepo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a player record directly (test convenience).
    pub fn put_player(&mut self, player: PlayerState) {
        self.players.insert(player.id.clone(), player);
    }

    #[must_use]
    pub fn inventory_count(&self, user_id: &str) -> usize {
        self.inventory
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .count()
    }
}

impl Repository for MemoryRepo {
    type Error = Infallible;

    fn load_player(&self, user_id: &str) -> Result<Option<PlayerState>, Self::Error> {
        Ok(self.players.get(user_id).cloned())
    }

    fn save_player(&mut self, player: &PlayerState) -> Result<(), Self::Error> {
        self.players.insert(player.id.clone(), player.clone());
        Ok(())
    }

    fn list_inventory(&self, user_id: &str) -> Result<Vec<InventoryEntry>, Self::Error> {
        Ok(self
            .inventory
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect())
    }

    fn insert_inventory(&mut self, mut entry: InventoryEntry) -> Result<InventoryEntry, Self::Error> {
        self.next_entry_id += 1;
        entry.id = self.next_entry_id;
        self.inventory.push(entry.clone());
        Ok(entry)
    }

    fn update_inventory(&mut self, entry: &InventoryEntry) -> Result<(), Self::Error> {
        if let Some(row) = self.inventory.iter_mut().find(|row| row.id == entry.id) {
            *row = entry.clone();
        }
        Ok(())
    }

    fn delete_inventory(&mut self, user_id: &str, entry_id: i64) -> Result<(), Self::Error> {
        self.inventory
            .retain(|entry| !(entry.user_id == user_id && entry.id == entry_id));
        Ok(())
    }

    fn clear_inventory(&mut self, user_id: &str) -> Result<(), Self::Error> {
        self.inventory.retain(|entry| entry.user_id != user_id);
        Ok(())
    }

    fn load_grave(&self, user_id: &str) -> Result<Option<Grave>, Self::Error> {
        Ok(self.graves.get(user_id).cloned())
    }

    fn insert_grave(&mut self, grave: &Grave) -> Result<(), Self::Error> {
        self.graves.insert(grave.user_id.clone(), grave.clone());
        Ok(())
    }

    fn delete_grave(&mut self, user_id: &str) -> Result<(), Self::Error> {
        self.graves.remove(user_id);
        Ok(())
    }

    fn list_achievements(&self, user_id: &str) -> Result<Vec<String>, Self::Error> {
        Ok(self
            .achievements
            .iter()
            .filter(|(user, _)| user == user_id)
            .map(|(_, id)| id.clone())
            .collect())
    }

    fn insert_achievement(
        &mut self,
        user_id: &str,
        achievement_id: &str,
    ) -> Result<bool, Self::Error> {
        Ok(self
            .achievements
            .insert((user_id.to_string(), achievement_id.to_string())))
    }
}
