//! # Registry Module
//!
//! Storage for the level's player, NPCs and items.
//!
//! NPCs and items live in fixed slots. Removing an entity empties its slot
//! and leaves every other slot where it was, so a [`SlotIndex`] handed out
//! earlier keeps pointing at the same entity (or at nothing) for the life of
//! the level.

use crate::game::{Character, CharacterRole, Entity, EntityId, Item, Npc, Player, Position};
use log::info;

/// Stable handle to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity sequence of optional entities. Never compacted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slots<T> {
    slots: Vec<Option<T>>,
}

impl<T: Entity> Slots<T> {
    /// Wraps pre-filled slots. Empty entries stay empty.
    pub fn new(slots: Vec<Option<T>>) -> Self {
        Self { slots }
    }

    /// Total number of slots, filled or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots that still hold an entity.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn get(&self, index: SlotIndex) -> Option<&T> {
        self.slots.get(index.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: SlotIndex) -> Option<&mut T> {
        self.slots.get_mut(index.0).and_then(Option::as_mut)
    }

    /// Finds the slot holding the entity with the given identifier.
    pub fn find_by_id(&self, id: EntityId) -> Option<SlotIndex> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().map(|entity| entity.id()) == Some(id))
            .map(SlotIndex)
    }

    /// Empties every slot holding `id` and returns the first entity found.
    ///
    /// Returns `None` when no slot holds that identifier, which makes a
    /// repeated removal a no-op.
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let mut removed = None;
        for slot in self.slots.iter_mut() {
            if slot.as_ref().map(|entity| entity.id()) == Some(id) {
                let entity = slot.take();
                if removed.is_none() {
                    removed = entity;
                }
            }
        }
        removed
    }

    /// Iterates the identifiers of filled slots in slot order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.iter().map(|entity| entity.id())
    }

    /// Iterates filled slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().flatten()
    }

    /// Iterates filled slots mutably in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().flatten()
    }

    /// Iterates filled slots together with their handles.
    pub fn indexed(&self) -> impl Iterator<Item = (SlotIndex, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|entity| (SlotIndex(index), entity)))
    }
}

impl<T: Entity> FromIterator<T> for Slots<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Some).collect())
    }
}

/// The level's characters and items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRegistry {
    player: Option<Player>,
    npcs: Slots<Npc>,
    items: Slots<Item>,
}

impl EntityRegistry {
    pub fn new(player: Option<Player>, npcs: Slots<Npc>, items: Slots<Item>) -> Self {
        Self {
            player,
            npcs,
            items,
        }
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn npcs(&self) -> &Slots<Npc> {
        &self.npcs
    }

    pub fn npcs_mut(&mut self) -> &mut Slots<Npc> {
        &mut self.npcs
    }

    pub fn items(&self) -> &Slots<Item> {
        &self.items
    }

    /// Iterates the positions of every character still on the level.
    pub fn character_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.player
            .iter()
            .map(|player| player.position())
            .chain(self.npcs.iter().map(|npc| npc.position()))
    }

    /// Removes a character, routing on its role.
    ///
    /// The player reference is cleared only when `character` is the current
    /// player. An NPC's slot is emptied in place. Returns the position the
    /// removed character was registered at, or `None` if it was not present.
    pub fn remove_character(&mut self, character: &dyn Character) -> Option<Position> {
        let id = character.id();
        let removed = match character.role() {
            CharacterRole::Player => {
                if self.player.as_ref().map(|player| player.id()) == Some(id) {
                    self.player.take().map(|player| player.position())
                } else {
                    None
                }
            }
            CharacterRole::Npc => self.npcs.remove(id).map(|npc| npc.position()),
        };

        if let Some(position) = removed {
            info!(
                "Removed {:?} {} from {}",
                character.role(),
                id,
                position
            );
        }
        removed
    }

    /// Removes an item by identity. Repeated removal is a no-op.
    pub fn remove_item(&mut self, item: &Item) -> Option<Item> {
        let removed = self.items.remove(item.id());
        if let Some(item) = &removed {
            info!("Removed item '{}' from {}", item.name, item.position());
        }
        removed
    }

    /// Snapshot of every remaining collectable item, in slot order.
    pub fn collectable_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.is_collectable())
            .collect()
    }

    /// Collectable items lying on `position`.
    pub fn collectable_items_at(&self, position: Position) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.is_collectable() && item.position() == position)
            .collect()
    }

    /// True once no remaining item is collectable. Empty slots are skipped.
    pub fn all_loot_collected(&self) -> bool {
        !self.items.iter().any(|item| item.is_collectable())
    }
}
