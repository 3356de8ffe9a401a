//! Computer players for Ladders.
//!
//! This module provides two difficulty levels:
//! - Easy: Random valid actions
//! - Medium: Scores every ability and item by what its effect would do right now

use crate::actions::GameAction;
use crate::board::{Board, Position};
use crate::dice::DIE_FACES;
use crate::effects::Effect;
use crate::game::GameState;
use crate::player::{Player, PlayerId};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Medium,
}

/// A bot player that can decide on actions
#[derive(Debug)]
pub struct Bot {
    pub player_id: PlayerId,
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(player_id: PlayerId, difficulty: BotDifficulty) -> Self {
        Self {
            player_id,
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(player_id: PlayerId, difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            player_id,
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose an action from the valid actions.
    ///
    /// Every sequence of choices ends in `RollDice`: equipping and using
    /// items consumes them, and only one ability fits in a turn.
    pub fn choose_action(&mut self, game: &GameState) -> Option<GameAction> {
        let valid_actions = game.valid_actions(self.player_id);
        if valid_actions.is_empty() {
            return None;
        }

        match self.difficulty {
            BotDifficulty::Easy => self.choose_easy(&valid_actions),
            BotDifficulty::Medium => self.choose_medium(game, &valid_actions),
        }
    }

    /// Easy: Just pick a random valid action
    fn choose_easy(&mut self, actions: &[GameAction]) -> Option<GameAction> {
        actions.choose(&mut self.rng).cloned()
    }

    /// Medium: Use basic heuristics
    fn choose_medium(&mut self, game: &GameState, actions: &[GameAction]) -> Option<GameAction> {
        // Priority order for medium bot:
        // 1. Equip everything picked up
        // 2. Use the most useful equipped item
        // 3. Use the most useful ready ability
        // 4. Roll

        if let Some(equip) = actions
            .iter()
            .find(|a| matches!(a, GameAction::EquipItem(_)))
        {
            return Some(equip.clone());
        }

        let player = game.get_player(self.player_id)?;

        let best_item = actions
            .iter()
            .filter_map(|a| match a {
                GameAction::UseItem(item) => game
                    .catalog
                    .item(*item)
                    .map(|def| (a, effect_value(&def.effect, game, player))),
                _ => None,
            })
            .filter(|(_, value)| *value > 0)
            .max_by_key(|(_, value)| *value);
        if let Some((action, _)) = best_item {
            return Some(action.clone());
        }

        let best_ability = actions
            .iter()
            .filter_map(|a| match a {
                GameAction::UseAbility(index) => player
                    .abilities
                    .get(*index)
                    .and_then(|id| game.catalog.ability(*id))
                    .map(|def| (a, effect_value(&def.effect, game, player))),
                _ => None,
            })
            .filter(|(_, value)| *value > 0)
            .max_by_key(|(_, value)| *value);
        if let Some((action, _)) = best_ability {
            // Keep some unpredictability between equally matched bots
            if self.rng.gen_bool(0.9) {
                return Some(action.clone());
            }
        }

        Some(GameAction::RollDice)
    }
}

/// Rough worth of applying an effect to `player` right now, in squares
fn effect_value(effect: &Effect, game: &GameState, player: &Player) -> i32 {
    let board = &game.board;
    let pos = i32::from(player.position);

    match effect {
        Effect::GrantImmunity => {
            if player.is_immune {
                0
            } else {
                // Worth skipping the roll only when the average roll loses ground
                (-expected_gain(board, player.position)).max(0)
            }
        }
        Effect::GrantExtraTurns(n) => 8 * *n as i32,
        Effect::GainExperience(n) => (*n as i32 / 10).max(1),
        Effect::BonusPoints(_) => 1,
        Effect::Advance(n) => {
            let landing = board.redirect(Board::reflect(u16::from(player.position) + u16::from(*n)));
            i32::from(landing) - pos
        }
        Effect::Retreat(_) => -1,
        Effect::TeleportToNextLadder => board
            .next_ladder_after(player.position)
            .map_or(0, |(_, top)| i32::from(top) - pos),
        Effect::SwapWithLeader => game
            .players
            .iter()
            .filter(|p| p.id != player.id)
            .map(|p| i32::from(p.position) - pos)
            .max()
            .filter(|gap| *gap > 10)
            .unwrap_or(0),
        Effect::ClearStatusEffects => player
            .status_effects
            .iter()
            .map(|s| -effect_value(&s.effect, game, player) * s.remaining as i32)
            .sum::<i32>()
            .max(0),
        Effect::ApplyStatus { effect, duration } => {
            effect_value(effect, game, player) * *duration as i32 / 2
        }
    }
}

/// Sum over every die face of the squares gained by rolling it
fn expected_gain(board: &Board, position: Position) -> i32 {
    DIE_FACES
        .map(|roll| {
            let landing = board.redirect(Board::reflect(u16::from(position) + u16::from(roll)));
            i32::from(landing) - i32::from(position)
        })
        .sum()
}
