//! Effect kinds and their interpreter.
//!
//! Abilities, items and status effects all carry an [`Effect`]. Effects are
//! plain data; [`apply_effect`] is the only place that turns them into state
//! changes, given an explicit [`EffectContext`].

use crate::board::{Board, Position, Redirect, START};
use crate::game::GameError;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Everything an ability, item or status effect can do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Cancel the target's next move attempt
    GrantImmunity,
    /// Additional moves after the next one
    GrantExtraTurns(u32),
    GainExperience(u32),
    BonusPoints(u32),
    /// Step forward, bouncing off the finish and taking one snake or ladder
    Advance(u8),
    /// Step back (never below the start), taking one snake or ladder
    Retreat(u8),
    /// Jump to the top of the next ladder ahead
    TeleportToNextLadder,
    /// Trade squares with the opponent furthest ahead
    SwapWithLeader,
    /// Remove every active status effect
    ClearStatusEffects,
    /// Repeat an effect once per turn for `duration` turns
    ApplyStatus { effect: Box<Effect>, duration: u32 },
}

/// What an effect actually did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    ImmunityGranted,
    ExtraTurnsGranted {
        pending: u32,
    },
    ExperienceGained {
        amount: u32,
        levels_gained: u32,
    },
    BonusPointsGained {
        total: u32,
    },
    Moved {
        from: Position,
        to: Position,
        redirect: Option<Redirect>,
    },
    Teleported {
        from: Position,
        to: Position,
    },
    Swapped {
        with: PlayerId,
        from: Position,
        to: Position,
    },
    StatusCleared {
        count: usize,
    },
    StatusApplied {
        duration: u32,
    },
    /// Nothing to act on (no ladder ahead, nobody ahead)
    NoEffect,
}

/// Shared game state an effect may read or change
pub struct EffectContext<'a> {
    pub board: &'a Board,
    pub players: &'a mut [Player],
}

impl<'a> EffectContext<'a> {
    pub fn new(board: &'a Board, players: &'a mut [Player]) -> Self {
        Self { board, players }
    }

    fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players
            .get_mut(id as usize)
            .ok_or(GameError::NoSuchPlayer(id))
    }
}

/// Apply an effect to `target`
pub fn apply_effect(
    effect: &Effect,
    target: PlayerId,
    ctx: &mut EffectContext<'_>,
) -> Result<EffectOutcome, GameError> {
    let board = ctx.board;

    let outcome = match effect {
        Effect::GrantImmunity => {
            ctx.player_mut(target)?.is_immune = true;
            EffectOutcome::ImmunityGranted
        }

        Effect::GrantExtraTurns(count) => {
            let player = ctx.player_mut(target)?;
            player.extra_turns = player.extra_turns.saturating_add(*count);
            EffectOutcome::ExtraTurnsGranted {
                pending: player.extra_turns,
            }
        }

        Effect::GainExperience(amount) => {
            let levels_gained = ctx.player_mut(target)?.gain_experience(*amount);
            EffectOutcome::ExperienceGained {
                amount: *amount,
                levels_gained,
            }
        }

        Effect::BonusPoints(amount) => {
            let player = ctx.player_mut(target)?;
            player.bonus_points = player.bonus_points.saturating_add(*amount);
            EffectOutcome::BonusPointsGained {
                total: player.bonus_points,
            }
        }

        Effect::Advance(steps) => {
            let player = ctx.player_mut(target)?;
            let from = player.position;
            let landing = Board::reflect(u16::from(from) + u16::from(*steps));
            step_to(player, board, from, landing)
        }

        Effect::Retreat(steps) => {
            let player = ctx.player_mut(target)?;
            let from = player.position;
            let landing = from.saturating_sub(*steps);
            step_to(player, board, from, landing)
        }

        Effect::TeleportToNextLadder => {
            let player = ctx.player_mut(target)?;
            let from = player.position;
            match board.next_ladder_after(from) {
                Some((_, top)) => {
                    player.position = top;
                    EffectOutcome::Teleported { from, to: top }
                }
                None => EffectOutcome::NoEffect,
            }
        }

        Effect::SwapWithLeader => swap_with_leader(target, ctx)?,

        Effect::ClearStatusEffects => {
            let count = ctx.player_mut(target)?.clear_status_effects();
            EffectOutcome::StatusCleared { count }
        }

        Effect::ApplyStatus { effect, duration } => {
            ctx.player_mut(target)?
                .add_status(effect.as_ref().clone(), *duration);
            EffectOutcome::StatusApplied {
                duration: *duration,
            }
        }
    };

    Ok(outcome)
}

fn step_to(player: &mut Player, board: &Board, from: Position, landing: Position) -> EffectOutcome {
    let redirect = if landing == START {
        None
    } else {
        board.redirection(landing)
    };
    let to = redirect.map_or(landing, |r| r.destination());
    player.position = to;
    EffectOutcome::Moved { from, to, redirect }
}

fn swap_with_leader(target: PlayerId, ctx: &mut EffectContext<'_>) -> Result<EffectOutcome, GameError> {
    let from = ctx.player_mut(target)?.position;

    // Furthest ahead; ties go to the earliest player in turn order
    let leader = ctx
        .players
        .iter()
        .filter(|p| p.id != target && p.position > from)
        .fold(None::<&Player>, |best, p| match best {
            Some(b) if b.position >= p.position => Some(b),
            _ => Some(p),
        })
        .map(|p| (p.id, p.position));

    let Some((leader_id, to)) = leader else {
        return Ok(EffectOutcome::NoEffect);
    };

    ctx.player_mut(leader_id)?.position = from;
    ctx.player_mut(target)?.position = to;

    Ok(EffectOutcome::Swapped {
        with: leader_id,
        from,
        to,
    })
}
