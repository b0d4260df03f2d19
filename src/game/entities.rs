//! # Entities Module
//!
//! The player, NPCs and items that live on a level.
//!
//! Entities are identified by an [`EntityId`] assigned at creation. Removal
//! and lookup compare identifiers, never field values, so two NPCs with the
//! same name and position are still distinct.

use crate::game::{new_entity_id, Direction, EntityId, Position};

/// Anything placed on the grid with a stable identity.
pub trait Entity {
    /// Gets the entity's unique identifier.
    fn id(&self) -> EntityId;

    /// Gets the entity's current grid position.
    fn position(&self) -> Position;

    /// Moves the entity to a new position. Occupancy bookkeeping is the
    /// caller's job.
    fn set_position(&mut self, position: Position);
}

/// Which collection a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterRole {
    Player,
    Npc,
}

/// Entities that occupy the tile they stand on.
pub trait Character: Entity {
    /// Discriminant used to route removal to the right collection.
    fn role(&self) -> CharacterRole;
}

/// The player-controlled character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    id: EntityId,
    pub name: String,
    position: Position,
}

impl Player {
    /// Creates a new player with a fresh identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{Entity, Player, Position};
    ///
    /// let player = Player::new("Hero".to_string(), Position::new(1, 2));
    /// assert_eq!(player.name, "Hero");
    /// assert_eq!(player.position(), Position::new(1, 2));
    /// ```
    pub fn new(name: String, position: Position) -> Self {
        Self {
            id: new_entity_id(),
            name,
            position,
        }
    }
}

impl Entity for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Character for Player {
    fn role(&self) -> CharacterRole {
        CharacterRole::Player
    }
}

/// A non-player character that walks a fixed patrol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Npc {
    id: EntityId,
    pub name: String,
    position: Position,
    /// Directions tried in order, one per tick, wrapping around.
    patrol: Vec<Direction>,
    patrol_index: usize,
}

impl Npc {
    /// Creates a stationary NPC.
    pub fn new(name: String, position: Position) -> Self {
        Self::with_patrol(name, position, Vec::new())
    }

    /// Creates an NPC that cycles through `patrol`.
    pub fn with_patrol(name: String, position: Position, patrol: Vec<Direction>) -> Self {
        Self {
            id: new_entity_id(),
            name,
            position,
            patrol,
            patrol_index: 0,
        }
    }

    pub fn patrol(&self) -> &[Direction] {
        &self.patrol
    }

    /// Returns the next patrol direction and advances the cursor.
    ///
    /// The cursor advances whether or not the step succeeds, so a blocked
    /// NPC tries the following direction on the next tick.
    ///
    /// # Examples
    ///
    /// ```
    /// use huepath::{Direction, Npc, Position};
    ///
    /// let mut npc = Npc::with_patrol(
    ///     "Guard".to_string(),
    ///     Position::new(0, 0),
    ///     vec![Direction::Left, Direction::Right],
    /// );
    /// assert_eq!(npc.next_direction(), Some(Direction::Left));
    /// assert_eq!(npc.next_direction(), Some(Direction::Right));
    /// assert_eq!(npc.next_direction(), Some(Direction::Left));
    /// ```
    pub fn next_direction(&mut self) -> Option<Direction> {
        let direction = *self.patrol.get(self.patrol_index)?;
        self.patrol_index = (self.patrol_index + 1) % self.patrol.len();
        Some(direction)
    }
}

impl Entity for Npc {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

impl Character for Npc {
    fn role(&self) -> CharacterRole {
        CharacterRole::Npc
    }
}

/// A piece of loot or scenery lying on a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: EntityId,
    pub name: String,
    position: Position,
    collectable: bool,
}

impl Item {
    pub fn new(name: String, position: Position, collectable: bool) -> Self {
        Self {
            id: new_entity_id(),
            name,
            position,
            collectable,
        }
    }

    /// Whether this item counts towards the level's loot.
    pub fn is_collectable(&self) -> bool {
        self.collectable
    }
}

impl Entity for Item {
    fn id(&self) -> EntityId {
        self.id
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}
