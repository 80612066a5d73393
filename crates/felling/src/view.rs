//! Collaborator interfaces the felling core is driven through.
//!
//! The core never touches chunks, entities or inventories directly. Hosts expose
//! their world through [`VoxelWorldView`] and the acting entity through
//! [`ActorHandle`].

use crate::coord::Coordinate;
use treefell_core::{EnchantmentType, ItemStack};

/// Classification of a block for tree discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Trunk or branch material.
    Log,
    /// Canopy material. Only decayable (tree-grown) foliage belongs to a tree.
    Foliage { decayable: bool },
    /// Anything else, including unloaded or out-of-range cells.
    Other,
}

impl BlockKind {
    #[inline]
    pub fn is_log(self) -> bool {
        self == BlockKind::Log
    }

    /// Decayable foliage, i.e. leaves that are felled together with their tree.
    #[inline]
    pub fn is_tree_foliage(self) -> bool {
        self == BlockKind::Foliage { decayable: true }
    }
}

/// Read/write access to the voxel grid.
pub trait VoxelWorldView {
    /// Classify the block at `coord`. Unresolvable locations report [`BlockKind::Other`].
    fn classify(&self, coord: Coordinate) -> BlockKind;

    /// Item form of the block at `coord`, if breaking it drops anything.
    fn drop_for(&self, coord: Coordinate) -> Option<ItemStack>;

    /// Spawn a collectible drop at `coord`, caused by actor `cause`.
    fn spawn_drop(&mut self, coord: Coordinate, drop: ItemStack, cause: u64);

    /// Replace the block at `coord` with air.
    fn remove_block(&mut self, coord: Coordinate);

    /// Audible cue for a tool breaking in `cause`'s hand.
    fn tool_break_cue(&mut self, _cause: u64) {}
}

/// The entity performing the felling.
pub trait ActorHandle {
    /// Stable identifier used as the cause of spawned drops.
    fn id(&self) -> u64;

    /// Snapshot of the item currently held.
    fn held_tool(&self) -> Option<ItemStack>;

    /// Replace (or clear, with `None`) the held item.
    fn set_held_tool(&mut self, tool: Option<ItemStack>);

    /// Current health, or `None` for actors without a health pool.
    fn health(&self) -> Option<f32>;

    fn set_health(&mut self, health: f32);

    /// Durability mitigation granted by `tool` (its Unbreaking level).
    fn mitigation_level(&self, tool: &ItemStack) -> u8 {
        tool.enchantment_level(EnchantmentType::Unbreaking)
    }

    /// Subtract `amount` from health, never going below zero.
    fn apply_damage(&mut self, amount: f32) {
        if let Some(health) = self.health() {
            self.set_health((health - amount).max(0.0));
        }
    }
}
