//! # Huepath
//!
//! Simulation core for a single level of a tile-based colour-chain puzzle game.
//!
//! ## Architecture Overview
//!
//! A level is a fixed grid of coloured tiles populated by a player, a handful
//! of NPCs and some loot. The pieces fit together as follows:
//!
//! - **World**: tiles, colours and the rectangular grid that owns bounds checking
//! - **Traversal**: the directional scan that finds the next colour-matching tile
//! - **Entities**: the player, NPCs and items, addressed by stable identifiers
//! - **Registry**: slot storage for NPCs and items where removal never compacts
//! - **Level**: composition of the above plus the per-tick update boundary
//! - **Generation**: seeded construction of playable levels from a config
//!
//! Everything is single-threaded and tick-driven. Lookups that can miss
//! (out-of-bounds coordinates, blocked traversals) return `Option`, while
//! malformed construction input is rejected with [`HuepathError`].

pub mod game;
pub mod generation;

// Core module re-exports
pub use game::*;
pub use generation::*;

// Explicit re-exports for commonly used types
pub use game::{
    // From entities
    Character,
    CharacterRole,
    // From world
    Colour,
    Direction,
    EntityId,
    // From registry
    EntityRegistry,
    // From state
    GameState,
    Grid,
    Item,
    // From level
    Level,
    LossReason,
    Npc,
    Player,
    Position,
    SlotIndex,
    Slots,
    Tile,
};

pub use generation::{GenerationConfig, Generator, LevelGenerator};

/// Core error type for the Huepath engine.
#[derive(thiserror::Error, Debug)]
pub enum HuepathError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Tile matrix is empty, ragged, or has tiles at the wrong coordinates
    #[error("Malformed grid: {0}")]
    MalformedGrid(String),

    /// An entity was placed outside the grid
    #[error("Entity out of bounds at ({x}, {y})")]
    EntityOutOfBounds { x: i32, y: i32 },

    /// Level state is inconsistent
    #[error("Invalid level state: {0}")]
    InvalidState(String),

    /// Generation configuration cannot be satisfied
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Huepath codebase.
pub type HuepathResult<T> = Result<T, HuepathError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default level width in tiles
    pub const DEFAULT_LEVEL_WIDTH: u32 = 12;

    /// Default level height in tiles
    pub const DEFAULT_LEVEL_HEIGHT: u32 = 12;

    /// Default number of ticks a level can run before time expires
    pub const DEFAULT_TIME_LIMIT: u32 = 200;

    /// Maximum number of NPC slots per level
    pub const MAX_NPCS_PER_LEVEL: usize = 64;

    /// Maximum number of item slots per level
    pub const MAX_ITEMS_PER_LEVEL: usize = 128;
}
