//! # Level Module
//!
//! A single playable level: the grid, its characters and items, the
//! countdown and the per-tick update.
//!
//! A level is built once, fully formed, and then driven by an outside loop
//! that calls [`Level::update`] once per tick and issues moves and removals
//! in between.

use crate::config::{MAX_ITEMS_PER_LEVEL, MAX_NPCS_PER_LEVEL};
use crate::game::{
    next_tile_in_direction, Character, Direction, Entity, EntityRegistry, GameState, Grid, Item,
    LevelStatistics, LossReason, Npc, Player, Position, SlotIndex, Slots, Tile,
};
use crate::{HuepathError, HuepathResult};
use log::{debug, info, warn};
use std::collections::HashSet;

/// One level of the game.
#[derive(Debug, Clone)]
pub struct Level {
    grid: Grid,
    time_remaining: u32,
    level_number: u32,
    registry: EntityRegistry,
    tick: u64,
    outcome: GameState,
    statistics: LevelStatistics,
}

impl Level {
    /// Builds a level from a pre-built tile matrix.
    ///
    /// Fails with [`HuepathError::MalformedGrid`] when the matrix is not a
    /// proper rectangle. See [`Level::with_grid`] for the remaining checks.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{Colour, Level, Player, Position, Tile};
    ///
    /// let tiles = (0..3)
    ///     .map(|y| (0..3).map(|x| Tile::new(x, y, Colour::Red)).collect())
    ///     .collect();
    /// let player = Player::new("Hero".to_string(), Position::new(1, 1));
    /// let level = Level::new(tiles, 60, 1, Some(player), Vec::new(), Vec::new()).unwrap();
    ///
    /// assert_eq!(level.time_remaining(), 60);
    /// assert!(level.get_tile_at(1, 1).unwrap().is_occupied());
    /// ```
    pub fn new(
        tiles: Vec<Vec<Tile>>,
        time: u32,
        level_number: u32,
        player: Option<Player>,
        npcs: Vec<Option<Npc>>,
        items: Vec<Option<Item>>,
    ) -> HuepathResult<Self> {
        let grid = Grid::new(tiles).map_err(|error| {
            warn!("Rejected level {}: {}", level_number, error);
            error
        })?;
        Self::with_grid(grid, time, level_number, player, npcs, items)
    }

    /// Builds a level around an already validated grid.
    ///
    /// Every character and item must be on the grid with its own identifier,
    /// no two characters may share a tile, and the slot counts must fit the
    /// configured maximums.
    /// Tile occupancy is recomputed from the characters.
    pub fn with_grid(
        mut grid: Grid,
        time: u32,
        level_number: u32,
        player: Option<Player>,
        npcs: Vec<Option<Npc>>,
        items: Vec<Option<Item>>,
    ) -> HuepathResult<Self> {
        if npcs.len() > MAX_NPCS_PER_LEVEL {
            return Err(HuepathError::InvalidState(format!(
                "{} NPC slots exceeds the maximum of {}",
                npcs.len(),
                MAX_NPCS_PER_LEVEL
            )));
        }
        if items.len() > MAX_ITEMS_PER_LEVEL {
            return Err(HuepathError::InvalidState(format!(
                "{} item slots exceeds the maximum of {}",
                items.len(),
                MAX_ITEMS_PER_LEVEL
            )));
        }

        let registry = EntityRegistry::new(player, Slots::new(npcs), Slots::new(items));

        let mut seen = HashSet::new();
        let ids = registry
            .player()
            .map(|player| player.id())
            .into_iter()
            .chain(registry.npcs().ids())
            .chain(registry.items().ids());
        for id in ids {
            if !seen.insert(id) {
                return Err(HuepathError::InvalidState(format!(
                    "entity {} is placed more than once",
                    id
                )));
            }
        }

        for item in registry.items().iter() {
            ensure_in_bounds(&grid, item.position())?;
        }

        grid.clear_occupancy();
        for position in registry.character_positions() {
            ensure_in_bounds(&grid, position)?;
            if let Some(tile) = grid.get_tile_mut(position) {
                if tile.is_occupied() {
                    return Err(HuepathError::InvalidState(format!(
                        "more than one character placed at {}",
                        position
                    )));
                }
                tile.set_occupied(true);
            }
        }

        debug!(
            "Built level {} ({}x{}) with {} NPCs and {} items",
            level_number,
            grid.width(),
            grid.height(),
            registry.npcs().occupied_count(),
            registry.items().occupied_count()
        );

        Ok(Self {
            grid,
            time_remaining: time,
            level_number,
            registry,
            tick: 0,
            outcome: GameState::Ongoing,
            statistics: LevelStatistics::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Checks if the given coordinates are on the level.
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        self.grid.is_valid_position(x, y)
    }

    /// Gets the tile at the given coordinates, or `None` when out of bounds.
    pub fn get_tile_at(&self, x: i32, y: i32) -> Option<&Tile> {
        self.grid.get_tile_at(x, y)
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    /// Number of ticks processed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// The latest outcome reported by [`Level::update`].
    pub fn outcome(&self) -> GameState {
        self.outcome
    }

    pub fn statistics(&self) -> &LevelStatistics {
        &self.statistics
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn player(&self) -> Option<&Player> {
        self.registry.player()
    }

    pub fn npcs(&self) -> &Slots<Npc> {
        self.registry.npcs()
    }

    pub fn items(&self) -> &Slots<Item> {
        self.registry.items()
    }

    /// Finds the next colour-matching tile from `origin` in `direction`.
    ///
    /// See [`next_tile_in_direction`] for the scan rules.
    pub fn next_tile_in_direction(&self, origin: &Tile, direction: Direction) -> Option<&Tile> {
        next_tile_in_direction(&self.grid, origin, direction)
    }

    /// Removes a character and frees the tile it stood on.
    ///
    /// Returns `false` if the character was not on the level.
    pub fn remove_character(&mut self, character: &dyn Character) -> bool {
        match self.registry.remove_character(character) {
            Some(position) => {
                if let Some(tile) = self.grid.get_tile_mut(position) {
                    tile.set_occupied(false);
                }
                self.statistics.characters_removed += 1;
                true
            }
            None => false,
        }
    }

    /// Removes an item. Returns `false` if it was already gone.
    pub fn remove_item(&mut self, item: &Item) -> bool {
        self.registry.remove_item(item).is_some()
    }

    /// Snapshot of every remaining collectable item, in slot order.
    pub fn collectable_items(&self) -> Vec<&Item> {
        self.registry.collectable_items()
    }

    /// True once no remaining item is collectable.
    pub fn all_loot_collected(&self) -> bool {
        self.registry.all_loot_collected()
    }

    /// Moves the player along the tile chain in `direction`.
    ///
    /// On success the player lands on the traversal destination and picks up
    /// every collectable item lying there. Returns the new position, or
    /// `None` when there is no player, no legal destination, or the level
    /// has already ended.
    pub fn move_player(&mut self, direction: Direction) -> Option<Position> {
        if self.outcome.is_terminal() {
            return None;
        }
        let from = self.registry.player()?.position();

        let to = match self.relocate(from, direction) {
            Some(to) => to,
            None => {
                self.statistics.blocked_moves += 1;
                debug!("Player move {:?} from {} has no destination", direction, from);
                return None;
            }
        };

        if let Some(player) = self.registry.player_mut() {
            player.set_position(to);
        }
        self.statistics.player_moves += 1;
        debug!("Player moved {:?} from {} to {}", direction, from, to);

        let loot: Vec<Item> = self
            .registry
            .collectable_items_at(to)
            .into_iter()
            .cloned()
            .collect();
        for item in &loot {
            if self.registry.remove_item(item).is_some() {
                self.statistics.items_collected += 1;
            }
        }

        Some(to)
    }

    /// Advances the level by one tick and reports the outcome.
    ///
    /// A level that has already been won or lost is left untouched and keeps
    /// returning the same outcome. Otherwise the player and loot are checked
    /// first, then the clock runs down by one and each NPC takes a patrol
    /// step. Running out of time loses the level.
    pub fn update(&mut self) -> GameState {
        if self.outcome.is_terminal() {
            return self.outcome;
        }

        if self.registry.player().is_none() {
            return self.finish(GameState::Lost {
                reason: LossReason::PlayerRemoved,
            });
        }

        if self.registry.all_loot_collected() {
            return self.finish(GameState::Won);
        }

        self.tick += 1;
        self.time_remaining = self.time_remaining.saturating_sub(1);
        self.advance_npcs();

        if self.time_remaining == 0 {
            return self.finish(GameState::Lost {
                reason: LossReason::TimeExpired,
            });
        }

        GameState::Ongoing
    }

    /// Takes one patrol step for every NPC still on the level.
    fn advance_npcs(&mut self) {
        let handles: Vec<SlotIndex> = self
            .registry
            .npcs()
            .indexed()
            .map(|(handle, _)| handle)
            .collect();

        for handle in handles {
            let (from, direction) = match self.registry.npcs_mut().get_mut(handle) {
                Some(npc) => match npc.next_direction() {
                    Some(direction) => (npc.position(), direction),
                    None => continue,
                },
                None => continue,
            };

            if let Some(to) = self.relocate(from, direction) {
                if let Some(npc) = self.registry.npcs_mut().get_mut(handle) {
                    npc.set_position(to);
                }
                self.statistics.npc_steps += 1;
            }
        }
    }

    /// Moves occupancy from `from` to the traversal destination, if any.
    fn relocate(&mut self, from: Position, direction: Direction) -> Option<Position> {
        let to = {
            let origin = self.grid.get_tile(from)?;
            next_tile_in_direction(&self.grid, origin, direction)?.position()
        };

        if let Some(tile) = self.grid.get_tile_mut(from) {
            tile.set_occupied(false);
        }
        if let Some(tile) = self.grid.get_tile_mut(to) {
            tile.set_occupied(true);
        }
        Some(to)
    }

    fn finish(&mut self, outcome: GameState) -> GameState {
        info!(
            "Level {} {} after {} ticks with {} time remaining",
            self.level_number, outcome, self.tick, self.time_remaining
        );
        self.outcome = outcome;
        outcome
    }
}

fn ensure_in_bounds(grid: &Grid, position: Position) -> HuepathResult<()> {
    if grid.is_valid_position(position.x, position.y) {
        Ok(())
    } else {
        Err(HuepathError::EntityOutOfBounds {
            x: position.x,
            y: position.y,
        })
    }
}
