//! Integration tests for the Ladders game engine.
//!
//! These tests drive complete games through the public API with scripted dice.

use ladders_core::*;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

/// Two players on a board with one snake {16:6} and one ladder {4:14}
fn small_game() -> GameState {
    let config = GameConfig {
        board: Board::new(10, BTreeMap::from([(16, 6)]), BTreeMap::from([(4, 14)])).unwrap(),
        ..GameConfig::default()
    };
    GameState::from_config(&config, Catalog::standard()).unwrap()
}

/// Roll for whoever is up until the game ends or `turns` run out
fn roll_turns(game: &mut GameState, dice: &mut impl Dice, turns: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..turns {
        if game.is_over() {
            break;
        }
        let player = game.current_player;
        events.extend(game.apply_action(player, GameAction::RollDice, dice).unwrap());
    }
    events
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
fn test_ladder_then_overshoot() {
    let mut game = small_game();
    game.players[0].position = 2;
    game.players[1].position = 98;
    let mut dice = FixedDice::new([2, 5]);

    roll_turns(&mut game, &mut dice, 2);

    assert_eq!(game.players[0].position, 14);
    assert_eq!(game.players[1].position, 97);
    assert_eq!(
        game.history.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        vec![
            "Player 1 moved to 14 after rolling 2".to_string(),
            "Player 2 moved to 97 after rolling 5".to_string(),
        ]
    );
}

#[test]
fn test_full_game_to_victory() {
    let mut game = small_game();
    // Multiples of 5 miss both 4 and 16, so the first player lands on 100 first
    let mut dice = FixedDice::new([5]);

    let events = roll_turns(&mut game, &mut dice, 200);

    assert_eq!(game.get_winner(), Some(0));
    assert_eq!(game.players[0].position, FINISH);
    assert_eq!(game.players[0].total_moves, 20);
    assert_eq!(events.last(), Some(&GameEvent::GameWon { player: 0 }));
    assert_eq!(game.history.len(), 39);
    assert_eq!(game.history.last().map(|e| e.position), Some(FINISH));
}

#[test]
fn test_game_exhausts_without_winner() {
    let config = GameConfig {
        board: Board::new(10, BTreeMap::new(), BTreeMap::new()).unwrap(),
        max_moves: 10,
        ..GameConfig::default()
    };
    let mut game = GameState::from_config(&config, Catalog::standard()).unwrap();
    let mut dice = FixedDice::new([1]);

    let events = roll_turns(&mut game, &mut dice, 100);

    assert_eq!(game.phase, GamePhase::Exhausted);
    assert_eq!(game.history.len(), 10);
    assert!(events.contains(&GameEvent::MovesExhausted { rounds: 10 }));
    assert!(game.apply_action(game.current_player, GameAction::RollDice, &mut dice).is_err());
}

#[test]
fn test_immunity_ability_skips_next_move() {
    let mut game = small_game();
    let mut dice = FixedDice::new([3]);
    let iron_skin = ability_index(&game, 0, "Iron Skin");

    game.apply_action(0, GameAction::UseAbility(iron_skin), &mut dice).unwrap();
    let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();

    let moved = events.iter().find_map(|e| match e {
        GameEvent::PlayerMoved { outcome, .. } => Some(*outcome),
        _ => None,
    });
    let outcome = moved.expect("move should be reported");
    assert!(!outcome.moved);
    assert_eq!(game.players[0].position, START);
    assert_eq!(game.players[0].total_moves, 0);
    assert!(!game.players[0].is_immune);
    assert_eq!(game.history.len(), 1);
}

#[test]
fn test_second_wind_grants_exactly_one_extra_move() {
    let mut game = small_game();
    let mut dice = FixedDice::new([1]);
    let second_wind = ability_index(&game, 0, "Second Wind");

    game.apply_action(0, GameAction::UseAbility(second_wind), &mut dice).unwrap();
    let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();

    let rolls = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DiceRolled { player: 0, .. }))
        .count();
    assert_eq!(rolls, 2);
    assert_eq!(game.players[0].extra_turns, 0);
    assert_eq!(game.current_player, 1);
}

#[test]
fn test_inventory_limit_is_not_fatal() {
    let config = GameConfig {
        inventory_limit: 2,
        level_rewards: vec!["Elixir".into()],
        ..GameConfig::default()
    };
    let mut game = GameState::from_config(&config, Catalog::standard()).unwrap();
    let charm = game.catalog.item_by_name("Lucky Charm").unwrap();

    game.players[0].add_item(charm).unwrap();
    game.players[0].add_item(charm).unwrap();
    assert_eq!(
        game.players[0].add_item(charm),
        Err(GameError::InventoryFull { limit: 2 })
    );
    assert_eq!(game.players[0].inventory.len(), 2);

    // A level-up reward bounces off the full inventory and play continues
    game.players[0].experience = 99;
    let mut dice = FixedDice::new([2]);
    let events = game.apply_action(0, GameAction::RollDice, &mut dice).unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::InventoryFull { player: 0, .. })));
    assert_eq!(game.players[0].inventory.len(), 2);
    assert_eq!(game.current_player, 1);
}

#[test]
fn test_starting_items_from_config() {
    let json = r#"{
        "players": [
            {"name": "Ana", "abilities": ["Blink", "Purify"], "starting_items": ["Boots of Haste"]},
            {"name": "Bo", "abilities": []}
        ]
    }"#;
    let config = GameConfig::from_json(json).unwrap();
    let mut game = GameState::from_config(&config, Catalog::standard()).unwrap();
    let boots = game.catalog.item_by_name("Boots of Haste").unwrap();
    let mut dice = FixedDice::new([1]);

    assert_eq!(game.players[0].inventory, vec![boots]);
    assert_eq!(game.players[1].abilities, Vec::<AbilityId>::new());

    game.apply_action(0, GameAction::EquipItem(boots), &mut dice).unwrap();
    game.apply_action(0, GameAction::UseItem(boots), &mut dice).unwrap();
    // 0 + 3 = 3 on the standard board
    assert_eq!(game.players[0].position, 3);
}

#[test]
fn test_unknown_starting_item() {
    let json = r#"{"players": [{"name": "Ana", "starting_items": ["Sword"]}]}"#;
    let config = GameConfig::from_json(json).unwrap();
    assert_eq!(
        GameState::from_config(&config, Catalog::standard()).unwrap_err(),
        GameError::UnknownItem("Sword".into())
    );
}

#[test]
fn test_meditate_ticks_each_turn() {
    // Every player holds the whole standard ability list here
    let mut game = GameState::new(vec!["A".into(), "B".into()]).unwrap();
    game.board = Board::new(10, BTreeMap::new(), BTreeMap::new()).unwrap();
    let mut dice = FixedDice::new([1]);
    let meditate = ability_index(&game, 0, "Meditate");

    game.apply_action(0, GameAction::UseAbility(meditate), &mut dice).unwrap();
    roll_turns(&mut game, &mut dice, 6);

    // 3 moves (10 each) and 3 status ticks (5 each)
    assert_eq!(game.players[0].experience, 45);
    assert!(game.players[0].status_effects.is_empty());
}

#[test]
fn test_history_file_round_trip() {
    let mut game = small_game();
    let mut dice = FixedDice::new([5]);
    roll_turns(&mut game, &mut dice, 200);
    assert!(game.is_over());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.txt");
    history::write_history(&path, &game.history).unwrap();

    assert_eq!(history::read_history(&path).unwrap(), game.history);
}

#[test]
fn test_seeded_games_are_reproducible() {
    let play = |seed| {
        let mut game = GameState::new(vec!["A".into(), "B".into()]).unwrap();
        let mut dice = RandomDice::with_seed(seed);
        roll_turns(&mut game, &mut dice, 2000);
        game.history
    };

    assert_eq!(play(99), play(99));
}
