//! Core game state machine.
//!
//! This module contains the main `GameState` struct and the round
//! controller: ability phase, move resolution with chained extra turns,
//! status and cooldown decay, and rotation.

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, BoardError, FINISH};
use crate::catalog::{AbilityId, Catalog, ItemId};
use crate::config::{GameConfig, PlayerConfig};
use crate::dice::Dice;
use crate::effects::{self, Effect, EffectContext, EffectOutcome};
use crate::engine;
use crate::history::HistoryEntry;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Most players a single game can seat
pub const MAX_PLAYERS: usize = 8;

/// Game phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before rolling: the current player may use one ability and any items
    AbilityPhase {
        /// Whether this turn's ability has been spent
        ability_used: bool,
    },

    /// A player reached the finish
    Finished { winner: PlayerId },

    /// The move ceiling was reached
    Exhausted,
}

/// Errors that can occur when setting up a game or applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Game is over")]
    GameOver,

    #[error("Already used an ability this turn")]
    AbilityAlreadyUsed,

    #[error("There is no ability {index} (choose 1-{available})")]
    InvalidAbilityIndex { index: usize, available: usize },

    #[error("{ability} is on cooldown for {remaining} more turn(s)")]
    AbilityOnCooldown { ability: String, remaining: u32 },

    #[error("Inventory full (limit {limit})")]
    InventoryFull { limit: usize },

    #[error("{0} is not in the inventory")]
    ItemNotInInventory(ItemId),

    #[error("{0} is not equipped")]
    ItemNotEquipped(ItemId),

    #[error("Unknown ability: {0}")]
    UnknownAbility(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),

    #[error("No player with id {0}")]
    NoSuchPlayer(PlayerId),

    #[error("Not a number: {0:?}")]
    InvalidInput(String),

    #[error("A game needs at least one player")]
    NoPlayers,

    #[error("Too many players: {0} (max {max})", max = MAX_PLAYERS)]
    TooManyPlayers(usize),

    #[error("Duplicate player name: {0}")]
    DuplicatePlayerName(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// Ability and item definitions
    pub catalog: Catalog,
    /// All players, in turn order
    pub players: Vec<Player>,
    /// Current player index
    pub current_player: PlayerId,
    /// Current game phase
    pub phase: GamePhase,
    /// Turn number (starts at 1)
    pub round: u32,
    /// Turns allowed before the game is declared exhausted
    pub max_moves: u32,
    /// Every resolved move, oldest first
    pub history: Vec<HistoryEntry>,
    /// Items handed out on level-up, cycled by level
    level_rewards: Vec<ItemId>,
}

impl GameState {
    /// Create a game on the standard board with the standard catalog.
    ///
    /// Every player starts with the catalog's full ability list.
    pub fn new(player_names: Vec<String>) -> Result<Self, GameError> {
        let catalog = Catalog::standard();
        let abilities: Vec<String> = catalog.abilities().iter().map(|a| a.name.clone()).collect();

        let config = GameConfig {
            players: player_names
                .into_iter()
                .map(|name| PlayerConfig {
                    abilities: abilities.clone(),
                    ..PlayerConfig::human(name)
                })
                .collect(),
            ..GameConfig::default()
        };

        Self::from_config(&config, catalog)
    }

    /// Build a game from configuration, resolving every name against `catalog`
    pub fn from_config(config: &GameConfig, catalog: Catalog) -> Result<Self, GameError> {
        if config.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if config.players.len() > MAX_PLAYERS {
            return Err(GameError::TooManyPlayers(config.players.len()));
        }

        let mut seen = HashSet::new();
        let mut players = Vec::with_capacity(config.players.len());

        for (i, seat) in config.players.iter().enumerate() {
            if !seen.insert(seat.name.as_str()) {
                return Err(GameError::DuplicatePlayerName(seat.name.clone()));
            }

            let abilities = seat
                .abilities
                .iter()
                .map(|name| {
                    catalog
                        .ability_by_name(name)
                        .ok_or_else(|| GameError::UnknownAbility(name.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let mut player = Player::new(i as PlayerId, seat.name.clone())
                .with_inventory_limit(config.inventory_limit)
                .with_abilities(abilities);

            for name in &seat.starting_items {
                let item = catalog
                    .item_by_name(name)
                    .ok_or_else(|| GameError::UnknownItem(name.clone()))?;
                player.add_item(item)?;
            }

            players.push(player);
        }

        let level_rewards = config
            .level_rewards
            .iter()
            .map(|name| {
                catalog
                    .item_by_name(name)
                    .ok_or_else(|| GameError::UnknownItem(name.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            board: config.board.clone(),
            catalog,
            players,
            current_player: 0,
            phase: GamePhase::AbilityPhase {
                ability_used: false,
            },
            round: 1,
            max_moves: config.max_moves,
            history: Vec::new(),
            level_rewards,
        })
    }

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    fn get_player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .get_mut(id as usize)
            .ok_or(GameError::NoSuchPlayer(id))
    }

    /// The player whose turn it is
    pub fn current(&self) -> Option<&Player> {
        self.get_player(self.current_player)
    }

    /// Check if the game has ended either way
    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. } | GamePhase::Exhausted)
    }

    /// Get the winner if the game is finished
    pub fn get_winner(&self) -> Option<PlayerId> {
        if let GamePhase::Finished { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// Players ranked by position, then level, then bonus points
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| {
            b.position
                .cmp(&a.position)
                .then(b.level.cmp(&a.level))
                .then(b.bonus_points.cmp(&a.bonus_points))
                .then(a.id.cmp(&b.id))
        });
        ranked
    }

    /// Get all currently valid actions for a player
    pub fn valid_actions(&self, player: PlayerId) -> Vec<GameAction> {
        let mut actions = Vec::new();

        let GamePhase::AbilityPhase { ability_used } = self.phase else {
            return actions;
        };
        if player != self.current_player {
            return actions;
        }
        let Some(p) = self.get_player(player) else {
            return actions;
        };

        if !ability_used {
            for (index, &ability) in p.abilities.iter().enumerate() {
                if p.is_ability_ready(ability) && self.catalog.ability(ability).is_some() {
                    actions.push(GameAction::UseAbility(index));
                }
            }
        }

        let mut seen = HashSet::new();
        for &item in &p.inventory {
            if seen.insert(item) {
                actions.push(GameAction::EquipItem(item));
            }
        }

        let mut seen = HashSet::new();
        for &item in &p.equipped {
            if seen.insert(item) && self.catalog.item(item).is_some() {
                actions.push(GameAction::UseItem(item));
            }
        }

        actions.push(GameAction::RollDice);
        actions
    }

    /// Apply an action to the game state
    pub fn apply_action<D: Dice + ?Sized>(
        &mut self,
        player: PlayerId,
        action: GameAction,
        dice: &mut D,
    ) -> Result<Vec<GameEvent>, GameError> {
        let GamePhase::AbilityPhase { ability_used } = self.phase else {
            return Err(GameError::GameOver);
        };
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        match action {
            GameAction::UseAbility(index) => {
                if ability_used {
                    return Err(GameError::AbilityAlreadyUsed);
                }
                self.use_ability(player, index)
            }
            GameAction::EquipItem(item) => {
                self.get_player_mut(player)?.equip_item(item)?;
                Ok(vec![GameEvent::ItemEquipped { player, item }])
            }
            GameAction::UseItem(item) => self.use_item(player, item),
            GameAction::RollDice => self.play_turn(player, dice),
        }
    }

    // ==================== Ability Phase ====================

    fn use_ability(&mut self, player: PlayerId, index: usize) -> Result<Vec<GameEvent>, GameError> {
        let p = self.get_player_mut(player)?;
        let ability = p
            .abilities
            .get(index)
            .copied()
            .ok_or_else(|| GameError::InvalidAbilityIndex {
                index: index.saturating_add(1),
                available: p.abilities.len(),
            })?;
        let remaining = p.cooldown_remaining(ability);
        let level_before = p.level;

        let def = self
            .catalog
            .ability(ability)
            .ok_or_else(|| GameError::UnknownAbility(ability.to_string()))?;
        if remaining > 0 {
            return Err(GameError::AbilityOnCooldown {
                ability: def.name.clone(),
                remaining,
            });
        }
        let (effect, cooldown) = (def.effect.clone(), def.cooldown);

        let outcome = self.run_effect(&effect, player)?;
        self.get_player_mut(player)?.start_cooldown(ability, cooldown);
        self.phase = GamePhase::AbilityPhase { ability_used: true };

        debug!(player, ability = %self.catalog.ability_name(ability), ?outcome, "ability used");

        let mut events = vec![GameEvent::AbilityUsed {
            player,
            ability,
            outcome,
        }];
        events.extend(self.grant_level_rewards(player, level_before));
        events.extend(self.check_win_condition());
        Ok(events)
    }

    fn use_item(&mut self, player: PlayerId, item: ItemId) -> Result<Vec<GameEvent>, GameError> {
        let effect = self
            .catalog
            .item(item)
            .map(|def| def.effect.clone())
            .ok_or_else(|| GameError::UnknownItem(item.to_string()))?;

        let p = self.get_player_mut(player)?;
        p.consume_equipped(item)?;
        let level_before = p.level;

        let outcome = self.run_effect(&effect, player)?;
        debug!(player, item = %self.catalog.item_name(item), ?outcome, "item used");

        let mut events = vec![GameEvent::ItemUsed {
            player,
            item,
            outcome,
        }];
        events.extend(self.grant_level_rewards(player, level_before));
        events.extend(self.check_win_condition());
        Ok(events)
    }

    fn run_effect(&mut self, effect: &Effect, target: PlayerId) -> Result<EffectOutcome, GameError> {
        let mut ctx = EffectContext::new(&self.board, &mut self.players);
        effects::apply_effect(effect, target, &mut ctx)
    }

    // ==================== Move Resolution ====================

    fn play_turn<D: Dice + ?Sized>(
        &mut self,
        player: PlayerId,
        dice: &mut D,
    ) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        loop {
            let roll = dice.roll();
            events.push(GameEvent::DiceRolled { player, roll });

            let p = self
                .players
                .get_mut(player as usize)
                .ok_or(GameError::NoSuchPlayer(player))?;
            let level_before = p.level;
            let outcome = engine::resolve_move(p, roll, &self.board);
            let remaining_extra = p.extra_turns;

            debug!(
                player = %p.name,
                roll,
                from = outcome.from,
                to = outcome.new_position,
                moved = outcome.moved,
                "move resolved"
            );

            self.history.push(HistoryEntry {
                player: p.name.clone(),
                position: outcome.new_position,
                roll,
            });
            events.push(GameEvent::PlayerMoved { player, outcome });
            events.extend(self.grant_level_rewards(player, level_before));

            if outcome.won {
                info!(player, round = self.round, "game won");
                self.phase = GamePhase::Finished { winner: player };
                events.push(GameEvent::GameWon { player });
                return Ok(events);
            }

            if !outcome.triggers_extra_turn {
                break;
            }
            events.push(GameEvent::ExtraTurn {
                player,
                remaining: remaining_extra,
            });
        }

        events.extend(self.decay_phase()?);
        if self.is_over() {
            return Ok(events);
        }

        events.extend(self.rotate(player));
        Ok(events)
    }

    // ==================== Status Decay ====================

    /// Fire status effects for every player in turn order, then tick all cooldowns
    fn decay_phase(&mut self) -> Result<Vec<GameEvent>, GameError> {
        let mut events = Vec::new();

        for index in 0..self.players.len() {
            let id = index as PlayerId;
            let due = self.players[index].tick_status_effects();

            for effect in due {
                let level_before = self.players[index].level;
                let outcome = self.run_effect(&effect, id)?;
                events.push(GameEvent::StatusTriggered {
                    player: id,
                    outcome,
                });
                events.extend(self.grant_level_rewards(id, level_before));
                events.extend(self.check_win_condition());
                if self.is_over() {
                    return Ok(events);
                }
            }
        }

        for player in &mut self.players {
            player.decrement_cooldowns();
        }

        Ok(events)
    }

    // ==================== Rotation ====================

    fn rotate(&mut self, player: PlayerId) -> Vec<GameEvent> {
        let next_player = ((self.current_player as usize + 1) % self.player_count()) as PlayerId;
        self.current_player = next_player;
        self.round += 1;

        let mut events = vec![GameEvent::TurnEnded {
            player,
            next_player,
            round: self.round,
        }];

        if self.round > self.max_moves {
            info!(rounds = self.max_moves, "maximum moves reached");
            self.phase = GamePhase::Exhausted;
            events.push(GameEvent::MovesExhausted {
                rounds: self.max_moves,
            });
        } else {
            self.phase = GamePhase::AbilityPhase {
                ability_used: false,
            };
        }

        events
    }

    // ==================== Helper Methods ====================

    /// Announce new levels and hand out reward items for each of them
    fn grant_level_rewards(&mut self, player: PlayerId, level_before: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let Some(p) = self.players.get_mut(player as usize) else {
            return events;
        };

        for level in level_before + 1..=p.level {
            info!(player = %p.name, level, "level up");
            events.push(GameEvent::LeveledUp { player, level });

            if self.level_rewards.is_empty() {
                continue;
            }
            let item = self.level_rewards[(level as usize - 2) % self.level_rewards.len()];
            match p.add_item(item) {
                Ok(()) => events.push(GameEvent::ItemAwarded { player, item }),
                Err(_) => events.push(GameEvent::InventoryFull { player, item }),
            }
        }

        events
    }

    /// Finish the game if anyone stands on the last square
    fn check_win_condition(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.is_over() {
            return events;
        }

        if let Some(winner) = self.players.iter().find(|p| p.position == FINISH).map(|p| p.id) {
            info!(player = winner, round = self.round, "game won");
            self.phase = GamePhase::Finished { winner };
            events.push(GameEvent::GameWon { player: winner });
        }

        events
    }

    /// Ability ids owned by a player together with their remaining cooldowns
    pub fn ability_status(&self, player: PlayerId) -> Vec<(AbilityId, u32)> {
        self.get_player(player)
            .map(|p| {
                p.abilities
                    .iter()
                    .map(|&a| (a, p.cooldown_remaining(a)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::FixedDice;
    use std::collections::BTreeMap;

    fn two_player_game() -> GameState {
        let mut game = GameState::new(vec!["A".into(), "B".into()]).unwrap();
        game.board = Board::new(10, BTreeMap::from([(16, 6)]), BTreeMap::from([(4, 14)])).unwrap();
        game
    }

    fn ability_index(game: &GameState, player: PlayerId, name: &str) -> usize {
        let id = game.catalog.ability_by_name(name).unwrap();
        game.players[player as usize]
            .abilities
            .iter()
            .position(|&a| a == id)
            .unwrap()
    }

    #[test]
    fn test_new_game_starts_in_ability_phase() {
        let game = two_player_game();
        assert_eq!(
            game.phase,
            GamePhase::AbilityPhase {
                ability_used: false
            }
        );
        assert_eq!(game.round, 1);
        assert_eq!(game.current_player, 0);
        assert_eq!(game.players[0].abilities.len(), game.catalog.abilities().len());
    }

    #[test]
    fn test_setup_rejects_bad_configs() {
        assert_eq!(GameState::new(vec![]).unwrap_err(), GameError::NoPlayers);
        assert_eq!(
            GameState::new(vec!["A".into(), "A".into()]).unwrap_err(),
            GameError::DuplicatePlayerName("A".into())
        );
        let names = (0..9).map(|i| format!("P{i}")).collect();
        assert_eq!(GameState::new(names).unwrap_err(), GameError::TooManyPlayers(9));

        let mut config = GameConfig::default();
        config.players[0].abilities = vec!["Fireball".into()];
        assert_eq!(
            GameState::from_config(&config, Catalog::standard()).unwrap_err(),
            GameError::UnknownAbility("Fireball".into())
        );
    }

    #[test]
    fn test_roll_rotates_and_records_history() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([2]);

        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert!(events.contains(&GameEvent::TurnEnded {
            player: 0,
            next_player: 1,
            round: 2
        }));
        assert_eq!(game.players[0].position, 2);
        assert_eq!(game.current_player, 1);
        assert_eq!(game.history.len(), 1);
        assert_eq!(game.history[0].to_string(), "A moved to 2 after rolling 2");
    }

    #[test]
    fn test_not_your_turn() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        assert_eq!(
            game.apply_action(1, GameAction::RollDice, &mut dice).unwrap_err(),
            GameError::NotYourTurn
        );
    }

    #[test]
    fn test_one_ability_per_turn() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        let study = ability_index(&game, 0, "Study");
        let blink = ability_index(&game, 0, "Blink");

        game.apply_action(0, GameAction::UseAbility(study), &mut dice).unwrap();
        assert_eq!(game.players[0].experience, 25);
        assert_eq!(
            game.apply_action(0, GameAction::UseAbility(blink), &mut dice).unwrap_err(),
            GameError::AbilityAlreadyUsed
        );
        assert!(!game
            .valid_actions(0)
            .iter()
            .any(|a| matches!(a, GameAction::UseAbility(_))));
    }

    #[test]
    fn test_ability_cooldown_blocks_reuse() {
        let mut game = two_player_game();
        game.players.truncate(1);
        let mut dice = FixedDice::new([1]);
        let study = ability_index(&game, 0, "Study");

        game.apply_action(0, GameAction::UseAbility(study), &mut dice).unwrap();
        game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();

        // Cooldown 3, ticked once after the move
        let err = game
            .apply_action(0, GameAction::UseAbility(study), &mut dice)
            .unwrap_err();
        assert_eq!(
            err,
            GameError::AbilityOnCooldown {
                ability: "Study".into(),
                remaining: 2
            }
        );

        game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert!(game
            .apply_action(0, GameAction::UseAbility(study), &mut dice)
            .is_ok());
    }

    #[test]
    fn test_invalid_ability_index_is_reported() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        let available = game.players[0].abilities.len();

        assert_eq!(
            game.apply_action(0, GameAction::UseAbility(available), &mut dice)
                .unwrap_err(),
            GameError::InvalidAbilityIndex {
                index: available + 1,
                available
            }
        );
        // Still able to roll
        assert!(game.apply_action(0, GameAction::RollDice, &mut dice).is_ok());
    }

    #[test]
    fn test_huge_ability_index_is_rejected() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        let available = game.players[0].abilities.len();

        assert_eq!(
            game.apply_action(0, GameAction::UseAbility(usize::MAX), &mut dice)
                .unwrap_err(),
            GameError::InvalidAbilityIndex {
                index: usize::MAX,
                available
            }
        );
        assert_eq!(
            game.phase,
            GamePhase::AbilityPhase {
                ability_used: false
            }
        );
    }

    #[test]
    fn test_immune_roll_keeps_extra_turn_for_later() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        game.players[0].is_immune = true;
        game.players[0].extra_turns = 1;

        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        let rolls = events
            .iter()
            .filter(|e| matches!(e, GameEvent::DiceRolled { player: 0, .. }))
            .count();
        assert_eq!(rolls, 1);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::ExtraTurn { .. })));
        assert_eq!(game.players[0].position, 0);
        assert_eq!(game.players[0].extra_turns, 1);
        assert_eq!(game.current_player, 1);

        game.apply_action(1, GameAction::RollDice, &mut dice).unwrap();

        // The pending turn chains on the next real move
        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert!(events.contains(&GameEvent::ExtraTurn {
            player: 0,
            remaining: 0
        }));
        assert_eq!(game.players[0].position, 2);
        assert_eq!(game.players[0].extra_turns, 0);
        assert_eq!(game.current_player, 1);
    }

    #[test]
    fn test_cooldowns_recharge_for_idle_players() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        let study = game.catalog.ability_by_name("Study").unwrap();
        game.players[1].start_cooldown(study, 2);

        game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert_eq!(game.players[1].cooldown_remaining(study), 1);
    }

    #[test]
    fn test_extra_turn_chains_before_rotation() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1, 2]);
        game.players[0].extra_turns = 1;

        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        let moves = events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerMoved { player: 0, .. }))
            .count();

        assert_eq!(moves, 2);
        assert_eq!(game.players[0].extra_turns, 0);
        // 0 + 1 + 2 = 3
        assert_eq!(game.players[0].position, 3);
        assert_eq!(game.current_player, 1);
        assert_eq!(game.round, 2);
    }

    #[test]
    fn test_immune_roll_is_recorded() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([5]);
        game.players[0].position = 7;
        game.players[0].is_immune = true;

        game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert_eq!(game.players[0].position, 7);
        assert_eq!(game.history[0].position, 7);
        assert_eq!(game.history[0].roll, 5);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([3]);
        game.players[0].position = 97;

        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert_eq!(events.last(), Some(&GameEvent::GameWon { player: 0 }));
        assert_eq!(game.get_winner(), Some(0));
        assert!(game.valid_actions(1).is_empty());
        assert_eq!(
            game.apply_action(1, GameAction::RollDice, &mut dice).unwrap_err(),
            GameError::GameOver
        );
    }

    #[test]
    fn test_move_ceiling() {
        let mut game = two_player_game();
        game.max_moves = 3;
        let mut dice = FixedDice::new([1]);

        for _ in 0..3 {
            let player = game.current_player;
            game.apply_action(player, GameAction::RollDice, &mut dice).unwrap();
        }

        assert_eq!(game.phase, GamePhase::Exhausted);
        assert_eq!(game.history.len(), 3);
        assert!(game.is_over());
        assert_eq!(game.get_winner(), None);
    }

    #[test]
    fn test_item_equip_and_use() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        let hourglass = game.catalog.item_by_name("Hourglass").unwrap();
        game.players[0].add_item(hourglass).unwrap();

        assert_eq!(
            game.apply_action(0, GameAction::UseItem(hourglass), &mut dice)
                .unwrap_err(),
            GameError::ItemNotEquipped(hourglass)
        );

        game.apply_action(0, GameAction::EquipItem(hourglass), &mut dice).unwrap();
        let events = game.apply_action(0, GameAction::UseItem(hourglass), &mut dice).unwrap();

        assert_eq!(
            events[0],
            GameEvent::ItemUsed {
                player: 0,
                item: hourglass,
                outcome: EffectOutcome::ExtraTurnsGranted { pending: 1 }
            }
        );
        assert!(game.players[0].equipped.is_empty());
    }

    #[test]
    fn test_level_up_awards_item() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        game.players[0].experience = 95;

        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        let charm = game.catalog.item_by_name("Lucky Charm").unwrap();
        assert!(events.contains(&GameEvent::LeveledUp { player: 0, level: 2 }));
        assert!(events.contains(&GameEvent::ItemAwarded {
            player: 0,
            item: charm
        }));
        assert_eq!(game.players[0].inventory, vec![charm]);
    }

    #[test]
    fn test_level_reward_with_full_inventory() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        let elixir = game.catalog.item_by_name("Elixir").unwrap();
        game.players[0].inventory_limit = 1;
        game.players[0].add_item(elixir).unwrap();
        game.players[0].experience = 95;

        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::InventoryFull { player: 0, .. })));
        assert_eq!(game.players[0].inventory, vec![elixir]);
        assert_eq!(game.current_player, 1);
    }

    #[test]
    fn test_status_effects_fire_for_all_players() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        game.players[1].add_status(Effect::BonusPoints(2), 2);

        let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert!(events.contains(&GameEvent::StatusTriggered {
            player: 1,
            outcome: EffectOutcome::BonusPointsGained { total: 2 }
        }));

        game.apply_action(1, GameAction::RollDice, &mut dice).unwrap();
        assert_eq!(game.players[1].bonus_points, 4);
        assert!(game.players[1].status_effects.is_empty());
    }

    #[test]
    fn test_status_effect_can_win() {
        let mut game = two_player_game();
        let mut dice = FixedDice::new([1]);
        game.players[1].position = 99;
        game.players[1].add_status(Effect::Advance(1), 1);

        game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
        assert_eq!(game.get_winner(), Some(1));
    }

    #[test]
    fn test_standings() {
        let mut game = two_player_game();
        game.players[0].position = 10;
        game.players[1].position = 40;
        let ranked: Vec<PlayerId> = game.standings().iter().map(|p| p.id).collect();
        assert_eq!(ranked, vec![1, 0]);
    }
}
