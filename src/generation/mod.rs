//! # Generation Module
//!
//! Seeded construction of playable levels.
//!
//! Levels are normally handed to the core fully built. This module is the
//! stock builder: it lays out a colour grid, places the player, NPCs and
//! loot, and hands the result to [`Level::with_grid`](crate::Level::with_grid)
//! for validation. Output is reproducible for a given seed.

pub mod layout;

pub use layout::*;

use crate::config::{
    DEFAULT_LEVEL_HEIGHT, DEFAULT_LEVEL_WIDTH, DEFAULT_TIME_LIMIT, MAX_ITEMS_PER_LEVEL,
    MAX_NPCS_PER_LEVEL,
};
use crate::game::Colour;
use crate::{HuepathError, HuepathResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for level generation.
///
/// Missing fields fall back to [`GenerationConfig::default`] when loaded
/// from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Ticks available before the level is lost
    pub time_limit: u32,
    /// Identifier stamped on the generated level
    pub level_number: u32,
    /// Colours tiles are drawn from
    pub palette: Vec<Colour>,
    /// Number of NPCs to place
    pub npc_count: u32,
    /// Number of items to place
    pub item_count: u32,
    /// Probability that an item is collectable (0.0 to 1.0)
    pub collectable_chance: f64,
    /// Number of directions in each NPC patrol
    pub patrol_length: u32,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: DEFAULT_LEVEL_WIDTH,
            height: DEFAULT_LEVEL_HEIGHT,
            time_limit: DEFAULT_TIME_LIMIT,
            level_number: 1,
            palette: Colour::all().to_vec(),
            npc_count: 4,
            item_count: 6,
            collectable_chance: 0.7,
            patrol_length: 4,
        }
    }

    /// Creates a configuration for testing with a small, low-variety level.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 6,
            height: 6,
            time_limit: 50,
            level_number: 1,
            palette: vec![Colour::Red, Colour::Blue, Colour::Green],
            npc_count: 2,
            item_count: 3,
            collectable_chance: 0.5,
            patrol_length: 2,
        }
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> HuepathResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that a level can actually be built from this configuration.
    pub fn validate(&self) -> HuepathResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HuepathError::InvalidConfig(format!(
                "level must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.palette.is_empty() {
            return Err(HuepathError::InvalidConfig(
                "palette must contain at least one colour".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.collectable_chance) {
            return Err(HuepathError::InvalidConfig(format!(
                "collectable_chance {} is outside 0.0..=1.0",
                self.collectable_chance
            )));
        }
        if self.npc_count as usize > MAX_NPCS_PER_LEVEL {
            return Err(HuepathError::InvalidConfig(format!(
                "npc_count {} exceeds the maximum of {}",
                self.npc_count, MAX_NPCS_PER_LEVEL
            )));
        }
        if self.item_count as usize > MAX_ITEMS_PER_LEVEL {
            return Err(HuepathError::InvalidConfig(format!(
                "item_count {} exceeds the maximum of {}",
                self.item_count, MAX_ITEMS_PER_LEVEL
            )));
        }
        let tiles = self.width as u64 * self.height as u64;
        if self.npc_count as u64 + 1 > tiles {
            return Err(HuepathError::InvalidConfig(format!(
                "{} characters do not fit on {} tiles",
                self.npc_count + 1,
                tiles
            )));
        }
        // Items need at least one tile no character starts on.
        if self.item_count > 0 && self.npc_count as u64 + 1 == tiles {
            return Err(HuepathError::InvalidConfig(format!(
                "{} characters leave no free tile for items on {} tiles",
                self.npc_count + 1,
                tiles
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> HuepathResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> HuepathResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
