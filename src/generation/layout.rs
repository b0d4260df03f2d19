//! # Level Layout Generation
//!
//! Random colour layouts with the player, NPCs and loot scattered on top.
//!
//! Colours are drawn row by row. Each tile either repeats its left
//! neighbour's colour (with probability `run_bias`) or draws a fresh colour
//! from the palette, so higher bias gives longer same-colour runs and
//! therefore shorter moves.

use crate::game::{Direction, Entity, Grid, Item, Level, Npc, Player, Position};
use crate::{GenerationConfig, Generator, HuepathError, HuepathResult};
use log::info;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

const LOOT_NAMES: [&str; 4] = ["Gem", "Coin", "Key", "Scroll"];

/// Generator producing complete, validated levels.
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    /// Probability that a tile repeats the colour to its left (0.0 to 1.0)
    pub run_bias: f64,
}

impl LevelGenerator {
    /// Creates a new generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{generation::utils, GenerationConfig, Generator, LevelGenerator};
    ///
    /// let config = GenerationConfig::for_testing(3);
    /// let mut rng = utils::create_rng(&config);
    /// let level = LevelGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(level.grid().width(), config.width);
    /// assert!(level.player().is_some());
    /// ```
    pub fn new() -> Self {
        Self { run_bias: 0.35 }
    }

    /// Creates a generator for testing with long colour runs.
    pub fn for_testing() -> Self {
        Self { run_bias: 0.5 }
    }

    fn paint_grid(&self, config: &GenerationConfig, rng: &mut StdRng) -> HuepathResult<Grid> {
        let rows = (0..config.height)
            .map(|_| {
                let mut row = Vec::with_capacity(config.width as usize);
                for _ in 0..config.width {
                    let colour = match row.last() {
                        Some(&previous) if rng.gen_bool(self.run_bias) => previous,
                        _ => config.palette[rng.gen_range(0..config.palette.len())],
                    };
                    row.push(colour);
                }
                row
            })
            .collect();
        Grid::from_colours(rows)
    }

    fn random_patrol(&self, config: &GenerationConfig, rng: &mut StdRng) -> Vec<Direction> {
        let directions = Direction::all();
        (0..config.patrol_length)
            .map(|_| directions[rng.gen_range(0..directions.len())])
            .collect()
    }

    /// Places items on tiles no character starts on.
    fn place_items(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
        free_tiles: &[Position],
    ) -> HuepathResult<Vec<Option<Item>>> {
        let mut flags: Vec<bool> = (0..config.item_count)
            .map(|_| rng.gen_bool(config.collectable_chance))
            .collect();
        if !flags.iter().any(|&collectable| collectable) {
            if let Some(first) = flags.first_mut() {
                *first = true;
            }
        }

        flags
            .into_iter()
            .map(|collectable| -> HuepathResult<Option<Item>> {
                let position = free_tiles.choose(rng).copied().ok_or_else(|| {
                    HuepathError::GenerationFailed("no free tile left for items".to_string())
                })?;
                let name = if collectable {
                    LOOT_NAMES[rng.gen_range(0..LOOT_NAMES.len())]
                } else {
                    "Rubble"
                };
                Ok(Some(Item::new(name.to_string(), position, collectable)))
            })
            .collect()
    }
}

impl Generator<Level> for LevelGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> HuepathResult<Level> {
        config.validate()?;
        if !(0.0..=1.0).contains(&self.run_bias) {
            return Err(HuepathError::InvalidConfig(format!(
                "run_bias {} is outside 0.0..=1.0",
                self.run_bias
            )));
        }

        let grid = self.paint_grid(config, rng)?;

        let mut positions: Vec<Position> = grid.tiles().map(|tile| tile.position()).collect();
        positions.shuffle(rng);

        let (player_position, others) = positions.split_first().ok_or_else(|| {
            HuepathError::GenerationFailed("grid has no tiles to place the player on".to_string())
        })?;
        let player = Player::new("Player".to_string(), *player_position);

        let (npc_positions, free_tiles) =
            others.split_at((config.npc_count as usize).min(others.len()));

        let npcs: Vec<Option<Npc>> = npc_positions
            .iter()
            .enumerate()
            .map(|(index, &position)| {
                let patrol = self.random_patrol(config, rng);
                Some(Npc::with_patrol(format!("Npc {}", index + 1), position, patrol))
            })
            .collect();

        let items = self.place_items(config, rng, free_tiles)?;

        let level = Level::with_grid(
            grid,
            config.time_limit,
            config.level_number,
            Some(player),
            npcs,
            items,
        )?;

        self.validate(&level, config)?;

        info!(
            "{} built level {} ({}x{}, seed {}) with {} collectable items",
            self.generator_type(),
            level.level_number(),
            config.width,
            config.height,
            config.seed,
            level.collectable_items().len()
        );

        Ok(level)
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> HuepathResult<()> {
        if level.grid().width() != config.width || level.grid().height() != config.height {
            return Err(HuepathError::GenerationFailed(format!(
                "level is {}x{}, expected {}x{}",
                level.grid().width(),
                level.grid().height(),
                config.width,
                config.height
            )));
        }
        if level.player().is_none() {
            return Err(HuepathError::GenerationFailed(
                "level has no player".to_string(),
            ));
        }
        if config.item_count > 0 && level.all_loot_collected() {
            return Err(HuepathError::GenerationFailed(
                "level has items but nothing to collect".to_string(),
            ));
        }
        let character_positions: Vec<Position> = level.registry().character_positions().collect();
        if let Some(item) = level
            .collectable_items()
            .into_iter()
            .find(|item| character_positions.contains(&item.position()))
        {
            return Err(HuepathError::GenerationFailed(format!(
                "loot '{}' at {} sits under a character",
                item.name,
                item.position()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "LevelGenerator"
    }
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new()
    }
}
