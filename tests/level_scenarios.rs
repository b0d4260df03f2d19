//! Scenario tests for traversal, removal and loot completion on hand-built levels.

use huepath::{
    Colour, Direction, Entity, GameState, HuepathError, Item, Level, LossReason, Npc, Player,
    Position, Tile,
};

/// 5x5 of colour A (red) with a single colour B (blue) tile at (3, 2).
fn striped_tiles() -> Vec<Vec<Tile>> {
    (0..5)
        .map(|y| {
            (0..5)
                .map(|x| {
                    let colour = if (x, y) == (3, 2) {
                        Colour::Blue
                    } else {
                        Colour::Red
                    };
                    Tile::new(x, y, colour)
                })
                .collect()
        })
        .collect()
}

fn empty_level(tiles: Vec<Vec<Tile>>) -> Level {
    Level::new(tiles, 100, 1, None, Vec::new(), Vec::new()).expect("valid level")
}

#[test]
fn test_adjacent_same_colour_matches_immediately() {
    let level = empty_level(striped_tiles());
    let origin = level.get_tile_at(0, 2).expect("origin on grid");

    let next = level
        .next_tile_in_direction(origin, Direction::Right)
        .expect("adjacent red tile");
    assert_eq!((next.x(), next.y()), (1, 2));
}

#[test]
fn test_scan_through_mismatch_reaches_edge() {
    let level = empty_level(striped_tiles());
    let origin = level.get_tile_at(2, 2).expect("origin on grid");

    assert!(level
        .next_tile_in_direction(origin, Direction::Right)
        .is_none());
}

#[test]
fn test_scan_from_edge_tile_outwards() {
    let level = empty_level(striped_tiles());
    for (x, y, direction) in [
        (0, 0, Direction::Up),
        (0, 0, Direction::Left),
        (4, 4, Direction::Down),
        (4, 4, Direction::Right),
    ] {
        let origin = level.get_tile_at(x, y).expect("origin on grid");
        assert!(level.next_tile_in_direction(origin, direction).is_none());
    }
}

#[test]
fn test_npc_blocks_scan() {
    let guard = Npc::new("Guard".to_string(), Position::new(3, 0));
    let level = Level::new(striped_tiles(), 100, 1, None, vec![Some(guard)], Vec::new())
        .expect("valid level");

    // The first step from (4, 0) lands on the guard.
    let origin = level.get_tile_at(4, 0).expect("origin on grid");
    assert!(level
        .next_tile_in_direction(origin, Direction::Left)
        .is_none());

    // Scans that never reach the guard are unaffected.
    let origin = level.get_tile_at(0, 0).expect("origin on grid");
    let next = level
        .next_tile_in_direction(origin, Direction::Right)
        .expect("adjacent red tile");
    assert_eq!(next.position(), Position::new(1, 0));
}

#[test]
fn test_removing_guard_clears_the_way() {
    let guard = Npc::new("Guard".to_string(), Position::new(3, 0));
    let mut level = Level::new(
        striped_tiles(),
        100,
        1,
        None,
        vec![Some(guard.clone())],
        Vec::new(),
    )
    .expect("valid level");

    assert!(level.remove_character(&guard));
    let origin = level.get_tile_at(4, 0).expect("origin on grid");
    let next = level
        .next_tile_in_direction(origin, Direction::Left)
        .expect("guard tile is free again");
    assert_eq!(next.position(), Position::new(3, 0));
}

#[test]
fn test_loot_completion_with_three_items() {
    let coin = Item::new("Coin".to_string(), Position::new(0, 0), true);
    let gem = Item::new("Gem".to_string(), Position::new(1, 0), true);
    let rubble = Item::new("Rubble".to_string(), Position::new(2, 0), false);
    let mut level = Level::new(
        striped_tiles(),
        100,
        1,
        Some(Player::new("Hero".to_string(), Position::new(4, 4))),
        Vec::new(),
        vec![Some(coin.clone()), Some(gem.clone()), Some(rubble)],
    )
    .expect("valid level");

    assert!(!level.all_loot_collected());
    assert_eq!(level.collectable_items().len(), 2);

    assert!(level.remove_item(&coin));
    assert!(!level.all_loot_collected());

    assert!(level.remove_item(&gem));
    assert!(level.all_loot_collected());
    assert!(level.collectable_items().is_empty());

    assert_eq!(level.update(), GameState::Won);
}

#[test]
fn test_removal_twice_leaves_same_state() {
    let coin = Item::new("Coin".to_string(), Position::new(0, 0), true);
    let guard = Npc::new("Guard".to_string(), Position::new(1, 1));
    let hero = Player::new("Hero".to_string(), Position::new(2, 2));
    let mut level = Level::new(
        striped_tiles(),
        100,
        1,
        Some(hero.clone()),
        vec![Some(guard.clone())],
        vec![Some(coin.clone())],
    )
    .expect("valid level");

    assert!(level.remove_item(&coin));
    assert!(level.remove_character(&guard));
    assert!(level.remove_character(&hero));
    let items_after_first = level.items().clone();
    let npcs_after_first = level.npcs().clone();
    let grid_after_first = level.grid().clone();

    assert!(!level.remove_item(&coin));
    assert!(!level.remove_character(&guard));
    assert!(!level.remove_character(&hero));

    assert_eq!(level.items(), &items_after_first);
    assert_eq!(level.npcs(), &npcs_after_first);
    assert_eq!(level.grid(), &grid_after_first);
    assert!(level.player().is_none());
}

#[test]
fn test_player_removal_loses_level() {
    let hero = Player::new("Hero".to_string(), Position::new(2, 2));
    let mut level = Level::new(
        striped_tiles(),
        100,
        1,
        Some(hero.clone()),
        Vec::new(),
        vec![Some(Item::new("Coin".to_string(), Position::new(0, 0), true))],
    )
    .expect("valid level");

    assert_eq!(level.update(), GameState::Ongoing);
    assert!(level.remove_character(&hero));
    assert_eq!(
        level.update(),
        GameState::Lost {
            reason: LossReason::PlayerRemoved
        }
    );
}

#[test]
fn test_player_walks_and_collects() {
    let coin = Item::new("Coin".to_string(), Position::new(4, 2), true);
    let mut level = Level::new(
        striped_tiles(),
        100,
        1,
        Some(Player::new("Hero".to_string(), Position::new(4, 0))),
        Vec::new(),
        vec![Some(coin)],
    )
    .expect("valid level");

    assert_eq!(level.move_player(Direction::Down), Some(Position::new(4, 1)));
    assert_eq!(level.move_player(Direction::Down), Some(Position::new(4, 2)));
    assert!(level.all_loot_collected());
    assert_eq!(level.statistics().items_collected, 1);
    assert_eq!(level.update(), GameState::Won);
}

#[test]
fn test_malformed_grid_is_distinguishable() {
    let mut tiles = striped_tiles();
    tiles[4].truncate(2);

    match Level::new(tiles, 100, 1, None, Vec::new(), Vec::new()) {
        Err(HuepathError::MalformedGrid(message)) => assert!(message.contains("row 4")),
        other => panic!("expected a malformed grid error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_player_position_tracks_tile() {
    let mut level = Level::new(
        striped_tiles(),
        100,
        1,
        Some(Player::new("Hero".to_string(), Position::new(0, 4))),
        Vec::new(),
        Vec::new(),
    )
    .expect("valid level");

    let to = level.move_player(Direction::Up).expect("red above");
    let player = level.player().expect("player present");
    assert_eq!(player.position(), to);
    assert!(level.get_tile_at(to.x, to.y).expect("on grid").is_occupied());
    assert!(!level.get_tile_at(0, 4).expect("on grid").is_occupied());
}
