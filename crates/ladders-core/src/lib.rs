//! Ladders - a snakes and ladders engine with levels, items and abilities
//!
//! This crate provides the core game logic for Ladders, including:
//! - The 100-square track with snake and ladder redirection
//! - Player state: experience, levels, inventory, cooldowns, status effects
//! - A catalog of abilities and items whose effects are plain data
//! - The turn engine and the round controller
//!
//! # Architecture
//!
//! The engine is deterministic given its dice. Randomness enters only
//! through the [`Dice`] trait, so a game can be replayed from a seed or
//! scripted roll by roll in tests.
//!
//! # Modules
//!
//! - [`board`]: Track positions, snakes, ladders, the overshoot rule
//! - [`player`]: Player state, leveling, inventory, cooldowns
//! - [`catalog`]: Ability and item definitions
//! - [`effects`]: Effect kinds and their interpreter
//! - [`engine`]: Resolution of a single roll
//! - [`game`]: Round controller state machine
//! - [`history`]: Move log and its file format

pub mod actions;
pub mod board;
pub mod bot;
pub mod catalog;
pub mod config;
pub mod dice;
pub mod effects;
pub mod engine;
pub mod game;
pub mod history;
pub mod player;

// Re-export commonly used types
pub use actions::{AbilityChoice, GameAction, GameEvent};
pub use board::{Board, BoardConfig, BoardError, Position, Redirect, FINISH, START};
pub use bot::{Bot, BotDifficulty};
pub use catalog::{AbilityDef, AbilityId, Catalog, ItemDef, ItemId};
pub use config::{ConfigError, GameConfig, PlayerConfig};
pub use dice::{Dice, FixedDice, RandomDice};
pub use effects::{Effect, EffectOutcome};
pub use engine::{resolve_move, MoveOutcome};
pub use game::{GameError, GamePhase, GameState};
pub use history::{HistoryEntry, HistoryError};
pub use player::{Player, PlayerId, StatusEffect};
