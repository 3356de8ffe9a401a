//! Game setup loaded from JSON.

use crate::board::Board;
use crate::bot::BotDifficulty;
use crate::player::DEFAULT_INVENTORY_LIMIT;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Turn ceiling of the classic game
pub const DEFAULT_MAX_MOVES: u32 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid game config: {0}")]
    Json(#[from] serde_json::Error),
}

/// One seat at the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// Ability names, resolved against the catalog at setup
    #[serde(default = "default_abilities")]
    pub abilities: Vec<String>,
    /// Item names placed in the inventory at setup
    #[serde(default)]
    pub starting_items: Vec<String>,
    /// Computer-controlled when set
    #[serde(default)]
    pub bot: Option<BotDifficulty>,
}

impl PlayerConfig {
    /// A human player with the default ability set
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abilities: default_abilities(),
            starting_items: Vec::new(),
            bot: None,
        }
    }

    /// A bot player with the default ability set
    pub fn bot(name: impl Into<String>, difficulty: BotDifficulty) -> Self {
        Self {
            bot: Some(difficulty),
            ..Self::human(name)
        }
    }
}

/// Everything needed to start a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub board: Board,
    /// Turns before the game ends without a winner
    #[serde(default = "default_max_moves")]
    pub max_moves: u32,
    #[serde(default = "default_inventory_limit")]
    pub inventory_limit: usize,
    /// Item awarded on reaching level 2, 3, ... (cycled)
    #[serde(default = "default_level_rewards")]
    pub level_rewards: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            board: Board::standard(),
            max_moves: DEFAULT_MAX_MOVES,
            inventory_limit: DEFAULT_INVENTORY_LIMIT,
            level_rewards: default_level_rewards(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_players() -> Vec<PlayerConfig> {
    vec![PlayerConfig::human("Player 1"), PlayerConfig::human("Player 2")]
}

fn default_abilities() -> Vec<String> {
    ["Iron Skin", "Second Wind", "Study", "Blink"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_moves() -> u32 {
    DEFAULT_MAX_MOVES
}

fn default_inventory_limit() -> usize {
    DEFAULT_INVENTORY_LIMIT
}

fn default_level_rewards() -> Vec<String> {
    ["Lucky Charm", "Shield Potion", "Hourglass", "Tome of Insight"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let json = r#"{
            "players": [
                {"name": "Ana", "abilities": ["Blink"], "starting_items": ["Elixir"]},
                {"name": "Bot", "bot": "Medium"}
            ],
            "board": {"size": 10, "snakes": {"40": 2}, "ladders": {"3": 70}},
            "max_moves": 50
        }"#;
        let config = GameConfig::from_json(json).unwrap();

        assert_eq!(config.players.len(), 2);
        assert_eq!(config.players[0].abilities, vec!["Blink".to_string()]);
        assert_eq!(config.players[1].bot, Some(BotDifficulty::Medium));
        assert_eq!(config.players[1].abilities, default_abilities());
        assert_eq!(config.board.redirect(3), 70);
        assert_eq!(config.max_moves, 50);
        assert_eq!(config.inventory_limit, DEFAULT_INVENTORY_LIMIT);
    }

    #[test]
    fn test_invalid_board_rejected() {
        let json = r#"{"board": {"snakes": {"10": 90}}}"#;
        assert!(matches!(GameConfig::from_json(json), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_json_round_trip_keeps_board() {
        let config = GameConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}
