//! Player state: position, progression, inventory, cooldowns and status effects.
//!
//! This module contains:
//! - Player struct with movement counters and progression
//! - Leveling with cascading thresholds
//! - Inventory and equipment management
//! - Ability cooldown bookkeeping
//! - Timed status effects

use crate::board::{Position, START};
use crate::catalog::{AbilityId, ItemId};
use crate::effects::Effect;
use crate::game::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Player identifier, equal to the player's index in turn order
pub type PlayerId = u8;

/// Experience needed to leave level 1
pub const STARTING_XP_THRESHOLD: u32 = 100;

/// Default inventory capacity
pub const DEFAULT_INVENTORY_LIMIT: usize = 3;

/// A timed modifier applied once per turn until it runs out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// What happens each turn
    pub effect: Effect,
    /// Turns left, always positive while the status is held
    pub remaining: u32,
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (turn order index)
    pub id: PlayerId,
    /// Display name, unique within a game
    pub name: String,
    /// Current square
    pub position: Position,
    /// Moves that actually advanced the token
    pub total_moves: u32,
    /// Cancels the next move attempt
    pub is_immune: bool,
    pub level: u32,
    /// Experience towards the next level
    pub experience: u32,
    /// Experience needed for the next level
    pub xp_threshold: u32,
    pub bonus_points: u32,
    /// Pending additional moves this turn
    pub extra_turns: u32,
    /// Unequipped items, oldest first
    pub inventory: Vec<ItemId>,
    /// Maximum number of unequipped items
    pub inventory_limit: usize,
    /// Equipped items, ready to use
    pub equipped: Vec<ItemId>,
    /// Abilities this player can activate
    pub abilities: Vec<AbilityId>,
    /// Turns remaining before each ability can be used again
    pub cooldowns: BTreeMap<AbilityId, u32>,
    /// Active status effects in the order they were applied
    pub status_effects: Vec<StatusEffect>,
}

impl Player {
    /// Create a new player with zeroed stats
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            position: START,
            total_moves: 0,
            is_immune: false,
            level: 1,
            experience: 0,
            xp_threshold: STARTING_XP_THRESHOLD,
            bonus_points: 0,
            extra_turns: 0,
            inventory: Vec::new(),
            inventory_limit: DEFAULT_INVENTORY_LIMIT,
            equipped: Vec::new(),
            abilities: Vec::new(),
            cooldowns: BTreeMap::new(),
            status_effects: Vec::new(),
        }
    }

    /// Builder-style inventory capacity
    pub fn with_inventory_limit(mut self, limit: usize) -> Self {
        self.inventory_limit = limit;
        self
    }

    /// Builder-style ability list
    pub fn with_abilities(mut self, abilities: Vec<AbilityId>) -> Self {
        self.abilities = abilities;
        self
    }

    // ==================== Progression ====================

    /// Add experience, levelling up as many times as the total allows.
    ///
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while self.experience >= self.xp_threshold {
            self.experience -= self.xp_threshold;
            self.level += 1;
            self.xp_threshold = next_threshold(self.xp_threshold);
            gained += 1;
        }
        gained
    }

    // ==================== Inventory ====================

    /// Add an item to the inventory, failing when it is full
    pub fn add_item(&mut self, item: ItemId) -> Result<(), GameError> {
        if self.inventory.len() >= self.inventory_limit {
            return Err(GameError::InventoryFull {
                limit: self.inventory_limit,
            });
        }
        self.inventory.push(item);
        Ok(())
    }

    /// Move an item from the inventory to the equipped set
    pub fn equip_item(&mut self, item: ItemId) -> Result<(), GameError> {
        let index = self
            .inventory
            .iter()
            .position(|i| *i == item)
            .ok_or(GameError::ItemNotInInventory(item))?;
        self.inventory.remove(index);
        self.equipped.push(item);
        Ok(())
    }

    /// Remove an equipped item so its effect can be applied
    pub fn consume_equipped(&mut self, item: ItemId) -> Result<(), GameError> {
        let index = self
            .equipped
            .iter()
            .position(|i| *i == item)
            .ok_or(GameError::ItemNotEquipped(item))?;
        self.equipped.remove(index);
        Ok(())
    }

    // ==================== Cooldowns ====================

    /// Turns before an ability is ready again (0 = ready)
    pub fn cooldown_remaining(&self, ability: AbilityId) -> u32 {
        self.cooldowns.get(&ability).copied().unwrap_or(0)
    }

    pub fn is_ability_ready(&self, ability: AbilityId) -> bool {
        self.cooldown_remaining(ability) == 0
    }

    /// Put an ability on cooldown
    pub fn start_cooldown(&mut self, ability: AbilityId, turns: u32) {
        self.cooldowns.insert(ability, turns);
    }

    /// Tick every running cooldown down by one
    pub fn decrement_cooldowns(&mut self) {
        for remaining in self.cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }

    // ==================== Status Effects ====================

    /// Start a timed status effect. A zero duration is ignored.
    pub fn add_status(&mut self, effect: Effect, duration: u32) {
        if duration > 0 {
            self.status_effects.push(StatusEffect {
                effect,
                remaining: duration,
            });
        }
    }

    /// Collect this turn's status effects, in application order, and age them.
    ///
    /// Expired statuses are removed. The returned effects still have to be
    /// run through the effect interpreter.
    pub fn tick_status_effects(&mut self) -> Vec<Effect> {
        let due = self
            .status_effects
            .iter()
            .filter(|s| s.remaining > 0)
            .map(|s| s.effect.clone())
            .collect();

        for status in &mut self.status_effects {
            status.remaining = status.remaining.saturating_sub(1);
        }
        self.status_effects.retain(|s| s.remaining > 0);

        due
    }

    /// Drop every active status, returning how many were removed
    pub fn clear_status_effects(&mut self) -> usize {
        let count = self.status_effects.len();
        self.status_effects.clear();
        count
    }
}

/// Threshold after a level-up: x1.5, rounded down
fn next_threshold(current: u32) -> u32 {
    current.saturating_mul(3) / 2
}
