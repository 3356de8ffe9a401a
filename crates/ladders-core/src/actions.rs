//! Game actions that players can take.
//!
//! This module defines all possible actions in the game, the events that
//! result from those actions, and parsing of the ability prompt.

use crate::catalog::{AbilityId, ItemId};
use crate::effects::EffectOutcome;
use crate::engine::MoveOutcome;
use crate::game::GameError;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// All possible actions a player can take
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    // ==================== Ability Phase ====================
    /// Activate one of the player's abilities, by index into their ability list
    UseAbility(usize),
    /// Move an item from the inventory to the equipped set
    EquipItem(ItemId),
    /// Use (and consume) an equipped item
    UseItem(ItemId),

    // ==================== Movement ====================
    /// Roll and resolve the move, ending the ability phase
    RollDice,
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An ability was activated
    AbilityUsed {
        player: PlayerId,
        ability: AbilityId,
        outcome: EffectOutcome,
    },

    /// An item was equipped
    ItemEquipped { player: PlayerId, item: ItemId },

    /// An equipped item was used up
    ItemUsed {
        player: PlayerId,
        item: ItemId,
        outcome: EffectOutcome,
    },

    /// An item was added to the inventory as a level reward
    ItemAwarded { player: PlayerId, item: ItemId },

    /// A reward item was lost because the inventory was full
    InventoryFull { player: PlayerId, item: ItemId },

    /// The die was rolled
    DiceRolled { player: PlayerId, roll: u8 },

    /// A roll was resolved (including rolls cancelled by immunity)
    PlayerMoved {
        player: PlayerId,
        outcome: MoveOutcome,
    },

    /// The player resolves another move before the turn passes
    ExtraTurn { player: PlayerId, remaining: u32 },

    /// The player reached a new level
    LeveledUp { player: PlayerId, level: u32 },

    /// A status effect fired during the decay phase
    StatusTriggered {
        player: PlayerId,
        outcome: EffectOutcome,
    },

    /// Turn ended
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
        round: u32,
    },

    /// A player reached the finish
    GameWon { player: PlayerId },

    /// The move ceiling was hit without a winner
    MovesExhausted { rounds: u32 },
}

/// A parsed answer to the ability prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityChoice {
    Skip,
    /// Zero-based index into the player's ability list
    Use(usize),
}

impl AbilityChoice {
    /// Parse a 1-based ability number typed by a player.
    ///
    /// Blank input skips; anything else must be a number between 1 and
    /// `available`.
    pub fn parse(input: &str, available: usize) -> Result<Self, GameError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(AbilityChoice::Skip);
        }

        let number: usize = input
            .parse()
            .map_err(|_| GameError::InvalidInput(input.to_string()))?;

        if number == 0 || number > available {
            return Err(GameError::InvalidAbilityIndex {
                index: number,
                available,
            });
        }

        Ok(AbilityChoice::Use(number - 1))
    }
}
