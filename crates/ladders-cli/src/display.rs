//! Text rendering of the board, game events and standings.

use ladders_core::{
    Board, EffectOutcome, GameEvent, GameState, HistoryEntry, MoveOutcome, PlayerId, Redirect,
};

/// The N×N grid of square numbers, highest row first, followed by the
/// snake and ladder tables. Snake heads are marked `v`, ladder feet `^`.
pub fn render_board(board: &Board) -> String {
    let size = u16::from(board.size());
    let mut out = String::new();

    for row in (0..size).rev() {
        let cells: String = (0..size)
            .map(|col| render_cell(board, row * size + col + 1))
            .collect();
        out.push_str(&cells);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_table("Snakes", board.snakes()));
    out.push_str(&render_table("Ladders", board.ladders()));
    out
}

fn render_cell(board: &Board, square: u16) -> String {
    let marker = match u8::try_from(square).ok().and_then(|s| board.redirection(s)) {
        Some(Redirect::Snake { .. }) => 'v',
        Some(Redirect::Ladder { .. }) => '^',
        None => ' ',
    };
    format!("{square:>4}{marker}")
}

fn render_table(title: &str, entries: impl Iterator<Item = (u8, u8)>) -> String {
    let pairs: Vec<String> = entries.map(|(from, to)| format!("{from} -> {to}")).collect();
    if pairs.is_empty() {
        format!("{title}: none\n")
    } else {
        format!("{title}: {}\n", pairs.join(", "))
    }
}

fn name(game: &GameState, player: PlayerId) -> &str {
    game.get_player(player).map_or("?", |p| p.name.as_str())
}

pub fn describe_move(game: &GameState, player: PlayerId, outcome: &MoveOutcome) -> String {
    let who = name(game, player);
    if !outcome.moved {
        return format!("{who} is immune and stays on {}", outcome.from);
    }

    let via = match outcome.redirect {
        Some(Redirect::Snake { from, to }) => format!(" (snake at {from}, down to {to})"),
        Some(Redirect::Ladder { from, to }) => format!(" (ladder at {from}, up to {to})"),
        None => String::new(),
    };
    format!(
        "{who} moves from {} to {}{via}",
        outcome.from, outcome.new_position
    )
}

pub fn describe_outcome(game: &GameState, outcome: &EffectOutcome) -> String {
    match outcome {
        EffectOutcome::ImmunityGranted => "immune to the next move".into(),
        EffectOutcome::ExtraTurnsGranted { pending } => format!("{pending} extra turn(s) pending"),
        EffectOutcome::ExperienceGained {
            amount,
            levels_gained,
        } => {
            if *levels_gained > 0 {
                format!("+{amount} xp, {levels_gained} level(s) gained")
            } else {
                format!("+{amount} xp")
            }
        }
        EffectOutcome::BonusPointsGained { total } => format!("bonus points now {total}"),
        EffectOutcome::Moved { from, to, redirect } => match redirect {
            Some(Redirect::Snake { .. }) => format!("moved {from} -> {to} via a snake"),
            Some(Redirect::Ladder { .. }) => format!("moved {from} -> {to} via a ladder"),
            None => format!("moved {from} -> {to}"),
        },
        EffectOutcome::Teleported { from, to } => format!("teleported {from} -> {to}"),
        EffectOutcome::Swapped { with, from, to } => {
            format!("swapped places with {} ({from} -> {to})", name(game, *with))
        }
        EffectOutcome::StatusCleared { count } => format!("{count} status effect(s) cleared"),
        EffectOutcome::StatusApplied { duration } => format!("status active for {duration} turn(s)"),
        EffectOutcome::NoEffect => "no effect".into(),
    }
}

/// One transcript line per event. Turn bookkeeping events print nothing.
pub fn describe_event(game: &GameState, event: &GameEvent) -> Option<String> {
    let line = match event {
        GameEvent::AbilityUsed {
            player,
            ability,
            outcome,
        } => format!(
            "{} uses {}: {}",
            name(game, *player),
            game.catalog.ability_name(*ability),
            describe_outcome(game, outcome)
        ),
        GameEvent::ItemEquipped { player, item } => {
            format!("{} equips {}", name(game, *player), game.catalog.item_name(*item))
        }
        GameEvent::ItemUsed {
            player,
            item,
            outcome,
        } => format!(
            "{} uses {}: {}",
            name(game, *player),
            game.catalog.item_name(*item),
            describe_outcome(game, outcome)
        ),
        GameEvent::ItemAwarded { player, item } => {
            format!("{} receives {}", name(game, *player), game.catalog.item_name(*item))
        }
        GameEvent::InventoryFull { player, item } => format!(
            "{}'s inventory is full; {} is lost",
            name(game, *player),
            game.catalog.item_name(*item)
        ),
        GameEvent::DiceRolled { player, roll } => format!("{} rolls a {roll}", name(game, *player)),
        GameEvent::PlayerMoved { player, outcome } => describe_move(game, *player, outcome),
        GameEvent::ExtraTurn { player, remaining } => format!(
            "{} takes an extra turn ({remaining} more pending)",
            name(game, *player)
        ),
        GameEvent::LeveledUp { player, level } => {
            format!("{} reaches level {level}", name(game, *player))
        }
        GameEvent::StatusTriggered { player, outcome } => format!(
            "Status effect on {}: {}",
            name(game, *player),
            describe_outcome(game, outcome)
        ),
        GameEvent::TurnEnded { .. } => return None,
        GameEvent::GameWon { player } => format!("{} wins the game!", name(game, *player)),
        GameEvent::MovesExhausted { rounds } => format!("Turn limit of {rounds} reached"),
    };
    Some(line)
}

pub fn render_standings(game: &GameState) -> String {
    let rows: String = game
        .standings()
        .iter()
        .enumerate()
        .map(|(rank, p)| {
            format!(
                "{:>2}. {:<16} square {:>3}  level {:>2}  bonus {:>3}\n",
                rank + 1,
                p.name,
                p.position,
                p.level,
                p.bonus_points
            )
        })
        .collect();
    format!("Standings:\n{rows}")
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    entries.iter().map(|entry| format!("{entry}\n")).collect()
}
