//! Interactive game loop.
//!
//! Generic over the input and output streams so whole sessions can be
//! scripted in tests.

use crate::display;
use anyhow::Result;
use ladders_core::{AbilityChoice, Bot, Dice, GameAction, GameError, GameEvent, GameState, PlayerId};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Bot actions tried in one turn before the bot is made to roll
const MAX_BOT_ACTIONS: usize = 32;

/// Who makes the decisions for a seat
pub enum Controller {
    Human,
    Bot(Bot),
}

pub struct Session<'a, R, W, D: ?Sized> {
    game: &'a mut GameState,
    controllers: Vec<Controller>,
    dice: &'a mut D,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write, D: Dice + ?Sized> Session<'a, R, W, D> {
    pub fn new(
        game: &'a mut GameState,
        controllers: Vec<Controller>,
        dice: &'a mut D,
        input: R,
        out: W,
    ) -> Self {
        Self {
            game,
            controllers,
            dice,
            input,
            out,
        }
    }

    /// Play until someone wins or the move ceiling is hit
    pub fn run(&mut self) -> Result<()> {
        while !self.game.is_over() {
            let player = self.game.current_player;
            self.print_turn_header(player)?;

            let is_bot = matches!(
                self.controllers.get(player as usize),
                Some(Controller::Bot(_))
            );
            if is_bot {
                self.bot_turn(player)?;
            } else {
                self.human_turn(player)?;
            }
        }

        self.print_result()
    }

    fn print_turn_header(&mut self, player: PlayerId) -> Result<()> {
        let Some(p) = self.game.get_player(player) else {
            return Ok(());
        };
        writeln!(
            self.out,
            "\n--- Turn {}: {} (square {}, level {}, xp {}/{}) ---",
            self.game.round, p.name, p.position, p.level, p.experience, p.xp_threshold
        )?;
        Ok(())
    }

    fn human_turn(&mut self, player: PlayerId) -> Result<()> {
        self.ability_prompt(player)?;
        if !self.game.is_over() {
            self.item_prompt(player)?;
        }
        if !self.game.is_over() {
            self.act(player, GameAction::RollDice)?;
        }
        Ok(())
    }

    fn ability_prompt(&mut self, player: PlayerId) -> Result<()> {
        let status = self.game.ability_status(player);
        if status.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "Abilities:")?;
        for (i, (ability, remaining)) in status.iter().enumerate() {
            let state = if *remaining == 0 {
                "ready".to_string()
            } else {
                format!("cooldown {remaining}")
            };
            writeln!(
                self.out,
                "  {}. {} ({state})",
                i + 1,
                self.game.catalog.ability_name(*ability)
            )?;
        }
        write!(self.out, "Choose an ability (1-{}, Enter to skip): ", status.len())?;
        self.out.flush()?;

        let line = self.read_line()?;
        match AbilityChoice::parse(&line, status.len()) {
            Ok(AbilityChoice::Skip) => {}
            Ok(AbilityChoice::Use(index)) => {
                self.act(player, GameAction::UseAbility(index))?;
            }
            Err(e) => writeln!(self.out, "{e}; no ability this turn")?,
        }
        Ok(())
    }

    /// Offer one item by name. Inventory items are equipped on the way.
    fn item_prompt(&mut self, player: PlayerId) -> Result<()> {
        let Some(p) = self.game.get_player(player) else {
            return Ok(());
        };
        if p.inventory.is_empty() && p.equipped.is_empty() {
            return Ok(());
        }

        let names = |items: &[ladders_core::ItemId]| {
            items
                .iter()
                .map(|&i| self.game.catalog.item_name(i))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let inventory = names(&p.inventory);
        let equipped = names(&p.equipped);
        let in_inventory = p.inventory.clone();
        let in_hand = p.equipped.clone();

        writeln!(self.out, "Inventory: [{inventory}]  Equipped: [{equipped}]")?;
        write!(self.out, "Use an item (name, Enter to skip): ")?;
        self.out.flush()?;

        let line = self.read_line()?;
        let name = line.trim();
        if name.is_empty() {
            return Ok(());
        }

        let Some(item) = self.game.catalog.item_by_name(name) else {
            writeln!(self.out, "{}", GameError::UnknownItem(name.to_string()))?;
            return Ok(());
        };

        if !in_hand.contains(&item) {
            if !in_inventory.contains(&item) {
                writeln!(self.out, "{}", GameError::ItemNotInInventory(item))?;
                return Ok(());
            }
            if !self.act(player, GameAction::EquipItem(item))? {
                return Ok(());
            }
        }
        self.act(player, GameAction::UseItem(item))?;
        Ok(())
    }

    fn bot_turn(&mut self, player: PlayerId) -> Result<()> {
        for _ in 0..MAX_BOT_ACTIONS {
            if self.game.is_over() {
                return Ok(());
            }
            let action = match self.controllers.get_mut(player as usize) {
                Some(Controller::Bot(bot)) => bot.choose_action(self.game),
                _ => None,
            };
            let Some(action) = action else {
                break;
            };

            let rolled = action == GameAction::RollDice;
            self.act(player, action)?;
            if rolled {
                return Ok(());
            }
        }

        if !self.game.is_over() {
            debug!(player, "bot out of actions; rolling");
            self.act(player, GameAction::RollDice)?;
        }
        Ok(())
    }

    /// Apply an action and print what happened. Rule violations are reported,
    /// not fatal. Returns whether the action was accepted.
    fn act(&mut self, player: PlayerId, action: GameAction) -> Result<bool> {
        match self.game.apply_action(player, action, &mut *self.dice) {
            Ok(events) => {
                self.print_events(&events)?;
                Ok(true)
            }
            Err(e) => {
                warn!(player, error = %e, "action rejected");
                writeln!(self.out, "{e}")?;
                Ok(false)
            }
        }
    }

    fn print_events(&mut self, events: &[GameEvent]) -> Result<()> {
        for event in events {
            if let Some(line) = display::describe_event(self.game, event) {
                writeln!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    fn print_result(&mut self) -> Result<()> {
        writeln!(self.out)?;
        match self.game.get_winner().and_then(|id| self.game.get_player(id)) {
            Some(winner) => writeln!(
                self.out,
                "{} wins after {} moves!",
                winner.name, winner.total_moves
            )?,
            None => {
                writeln!(self.out, "Maximum moves reached")?;
                write!(self.out, "{}", display::render_standings(self.game))?;
            }
        }
        Ok(())
    }

    /// Read one line; end of input reads as an empty answer
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line)
    }
}
