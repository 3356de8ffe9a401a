//! Board representation: the linear track, snakes and ladders.
//!
//! This module contains:
//! - Position constants for the 0..=100 track
//! - The snake and ladder tables with load-time validation
//! - Redirection (applied once per move) and the overshoot rule
//! - Grid coordinates for display

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// A square on the track. 0 means the player has not entered the board yet.
pub type Position = u8;

/// Where every player starts, off the board
pub const START: Position = 0;

/// The winning square
pub const FINISH: Position = 100;

/// Default display width of the grid
pub const DEFAULT_SIZE: u8 = 10;

/// Errors raised while validating snake and ladder tables
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Board size must be at least 1")]
    InvalidSize,

    #[error("Square {0} cannot start a snake or ladder (must be 1-99)")]
    InvalidStart(Position),

    #[error("Square {0} is not on the board (must be 1-100)")]
    InvalidTarget(Position),

    #[error("Snake at {head} must lead down, not to {tail}")]
    SnakeLeadsUp { head: Position, tail: Position },

    #[error("Ladder at {foot} must lead up, not to {top}")]
    LadderLeadsDown { foot: Position, top: Position },
}

/// What happened to a player who landed on a special square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Redirect {
    /// Slid down a snake
    Snake { from: Position, to: Position },
    /// Climbed a ladder
    Ladder { from: Position, to: Position },
}

impl Redirect {
    /// Destination square
    pub fn destination(&self) -> Position {
        match self {
            Redirect::Snake { to, .. } | Redirect::Ladder { to, .. } => *to,
        }
    }
}

/// Raw board tables as they appear in configuration files.
///
/// Converted into a [`Board`] through `TryFrom`, which enforces every table
/// invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_size")]
    pub size: u8,
    #[serde(default)]
    pub snakes: BTreeMap<Position, Position>,
    #[serde(default)]
    pub ladders: BTreeMap<Position, Position>,
}

fn default_size() -> u8 {
    DEFAULT_SIZE
}

impl Default for BoardConfig {
    fn default() -> Self {
        Board::standard().into()
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardConfig", into = "BoardConfig")]
pub struct Board {
    size: u8,
    snakes: BTreeMap<Position, Position>,
    ladders: BTreeMap<Position, Position>,
}

impl Board {
    /// Build a board from snake and ladder tables.
    ///
    /// A square configured as both a snake head and a ladder foot keeps the
    /// snake; the ladder entry is dropped.
    pub fn new(
        size: u8,
        snakes: BTreeMap<Position, Position>,
        mut ladders: BTreeMap<Position, Position>,
    ) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize);
        }

        for (&head, &tail) in &snakes {
            validate_squares(head, tail)?;
            if tail >= head {
                return Err(BoardError::SnakeLeadsUp { head, tail });
            }
        }

        for (&foot, &top) in &ladders {
            validate_squares(foot, top)?;
            if top <= foot {
                return Err(BoardError::LadderLeadsDown { foot, top });
            }
        }

        ladders.retain(|foot, top| {
            let conflict = snakes.contains_key(foot);
            if conflict {
                warn!(square = *foot, ladder_top = *top, "snake head shadows ladder; ladder dropped");
            }
            !conflict
        });

        Ok(Self {
            size,
            snakes,
            ladders,
        })
    }

    /// The classic 10x10 board
    pub fn standard() -> Self {
        let snakes = BTreeMap::from([
            (16, 6),
            (47, 26),
            (49, 11),
            (56, 53),
            (62, 19),
            (64, 60),
            (87, 24),
            (93, 73),
            (95, 75),
            (98, 78),
        ]);
        let ladders = BTreeMap::from([
            (1, 38),
            (4, 14),
            (9, 31),
            (21, 42),
            (28, 84),
            (36, 44),
            (51, 67),
            (71, 91),
            (80, 100),
        ]);

        Self {
            size: DEFAULT_SIZE,
            snakes,
            ladders,
        }
    }

    /// Grid width used for display
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Snake heads and tails, ordered by head
    pub fn snakes(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.snakes.iter().map(|(&k, &v)| (k, v))
    }

    /// Ladder feet and tops, ordered by foot
    pub fn ladders(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.ladders.iter().map(|(&k, &v)| (k, v))
    }

    /// The snake or ladder starting at this square, if any
    pub fn redirection(&self, position: Position) -> Option<Redirect> {
        if let Some(&to) = self.snakes.get(&position) {
            return Some(Redirect::Snake { from: position, to });
        }
        self.ladders
            .get(&position)
            .map(|&to| Redirect::Ladder { from: position, to })
    }

    /// Final square after landing on `position`. Never chains a second hop.
    pub fn redirect(&self, position: Position) -> Position {
        self.redirection(position)
            .map_or(position, |r| r.destination())
    }

    /// Bounce a candidate square that overshoots the finish back onto the board.
    pub fn reflect(candidate: u16) -> Position {
        let finish = u16::from(FINISH);
        if candidate > finish {
            let overshoot = (candidate - finish).min(finish);
            (finish - overshoot) as Position
        } else {
            candidate as Position
        }
    }

    /// First ladder whose foot lies beyond `position`
    pub fn next_ladder_after(&self, position: Position) -> Option<(Position, Position)> {
        self.ladders
            .range(position.saturating_add(1)..)
            .next()
            .map(|(&foot, &top)| (foot, top))
    }

    /// Zero-indexed (row, col) of a square for display. `None` before the start.
    pub fn grid_cell(&self, position: Position) -> Option<(u8, u8)> {
        if position == START {
            return None;
        }
        let index = position - 1;
        Some((index / self.size, index % self.size))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<BoardConfig> for Board {
    type Error = BoardError;

    fn try_from(config: BoardConfig) -> Result<Self, Self::Error> {
        Board::new(config.size, config.snakes, config.ladders)
    }
}

impl From<Board> for BoardConfig {
    fn from(board: Board) -> Self {
        Self {
            size: board.size,
            snakes: board.snakes,
            ladders: board.ladders,
        }
    }
}

fn validate_squares(start: Position, end: Position) -> Result<(), BoardError> {
    if start == START || start >= FINISH {
        return Err(BoardError::InvalidStart(start));
    }
    if end == START || end > FINISH {
        return Err(BoardError::InvalidTarget(end));
    }
    Ok(())
}
