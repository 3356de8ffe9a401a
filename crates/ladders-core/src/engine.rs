//! Turn resolution: one die roll applied to one player.

use crate::board::{Board, Position, Redirect, FINISH};
use crate::player::Player;
use serde::{Deserialize, Serialize};

/// Experience granted for every completed move
pub const MOVE_EXPERIENCE: u32 = 10;

/// Result of resolving a single roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub roll: u8,
    /// Square before the move
    pub from: Position,
    /// Square after bouncing and redirection
    pub new_position: Position,
    /// False when immunity cancelled the move
    pub moved: bool,
    /// Snake or ladder taken, if any
    pub redirect: Option<Redirect>,
    /// The same player resolves another move before the turn passes
    pub triggers_extra_turn: bool,
    pub won: bool,
    pub levels_gained: u32,
}

/// Resolve one roll for `player`.
///
/// Immunity is checked first and cancels the move outright. Otherwise the
/// token advances, bounces back off the finish by the overshoot, and takes at
/// most one snake or ladder. A pending extra turn is consumed only by a move
/// that did not win.
pub fn resolve_move(player: &mut Player, roll: u8, board: &Board) -> MoveOutcome {
    let from = player.position;

    if player.is_immune {
        player.is_immune = false;
        return MoveOutcome {
            roll,
            from,
            new_position: from,
            moved: false,
            redirect: None,
            triggers_extra_turn: false,
            won: false,
            levels_gained: 0,
        };
    }

    let candidate = Board::reflect(u16::from(from) + u16::from(roll));
    let redirect = board.redirection(candidate);
    let new_position = redirect.map_or(candidate, |r| r.destination());

    player.position = new_position;
    player.total_moves += 1;
    let levels_gained = player.gain_experience(MOVE_EXPERIENCE);

    let won = new_position == FINISH;

    let triggers_extra_turn = !won && player.extra_turns > 0;
    if triggers_extra_turn {
        player.extra_turns -= 1;
    }

    MoveOutcome {
        roll,
        from,
        new_position,
        moved: true,
        redirect,
        triggers_extra_turn,
        won,
        levels_gained,
    }
}
