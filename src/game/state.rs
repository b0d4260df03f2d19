//! # Game State Module
//!
//! Outcome of a level tick and the running statistics a level keeps.

use serde::{Deserialize, Serialize};

/// Result of advancing a level by one tick.
///
/// Once a level reports `Won` or `Lost` it keeps reporting the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    /// Level is still in progress
    Ongoing,
    /// Every collectable item was picked up
    Won,
    /// The level ended without collecting the loot
    Lost { reason: LossReason },
}

/// Why a level was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossReason {
    /// The countdown reached zero
    TimeExpired,
    /// The player was removed from the level
    PlayerRemoved,
}

impl GameState {
    /// True for `Won` and `Lost`.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{GameState, LossReason};
    ///
    /// assert!(!GameState::Ongoing.is_terminal());
    /// assert!(GameState::Won.is_terminal());
    /// assert!(GameState::Lost { reason: LossReason::TimeExpired }.is_terminal());
    /// ```
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Ongoing)
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Ongoing
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "ongoing"),
            GameState::Won => write!(f, "won"),
            GameState::Lost {
                reason: LossReason::TimeExpired,
            } => write!(f, "lost (time expired)"),
            GameState::Lost {
                reason: LossReason::PlayerRemoved,
            } => write!(f, "lost (player removed)"),
        }
    }
}

/// Counters tracking what happened on a level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStatistics {
    /// Successful player moves
    pub player_moves: u32,
    /// Player moves that found no destination
    pub blocked_moves: u32,
    /// Collectable items picked up by the player
    pub items_collected: u32,
    /// Successful NPC patrol steps
    pub npc_steps: u32,
    /// Characters removed from the level
    pub characters_removed: u32,
}

impl LevelStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}
