//! Hash-map backed world and actor for hosts without a chunk store, and for tests.

use crate::coord::Coordinate;
use crate::view::{ActorHandle, BlockKind, VoxelWorldView};
use std::collections::HashMap;
use treefell_core::ItemStack;

/// Item id dropped by [`SparseWorld`] logs.
pub const SPARSE_LOG_ITEM: u16 = 1;
/// Item id dropped by [`SparseWorld`] foliage.
pub const SPARSE_FOLIAGE_ITEM: u16 = 2;

/// A drop spawned into a [`SparseWorld`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedDrop {
    pub at: Coordinate,
    pub item: ItemStack,
    pub cause: u64,
}

/// Sparse voxel world: every unset cell is [`BlockKind::Other`].
///
/// Records removals, drops and break cues in the order they happen.
#[derive(Debug, Default)]
pub struct SparseWorld {
    blocks: HashMap<Coordinate, BlockKind>,
    removed: Vec<Coordinate>,
    drops: Vec<SpawnedDrop>,
    break_cues: Vec<u64>,
}

impl SparseWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, coord: Coordinate, kind: BlockKind) {
        match kind {
            BlockKind::Other => {
                self.blocks.remove(&coord);
            }
            kind => {
                self.blocks.insert(coord, kind);
            }
        }
    }

    /// Place a vertical run of `height` logs starting at `base`.
    pub fn set_column(&mut self, base: Coordinate, height: i32) {
        for dy in 0..height {
            self.set(base.offset(0, dy, 0), BlockKind::Log);
        }
    }

    /// Number of cells holding `kind`.
    pub fn count(&self, kind: BlockKind) -> usize {
        self.blocks.values().filter(|k| **k == kind).count()
    }

    /// Removed coordinates, in removal order.
    pub fn removed(&self) -> &[Coordinate] {
        &self.removed
    }

    pub fn drops(&self) -> &[SpawnedDrop] {
        &self.drops
    }

    pub fn break_cues(&self) -> &[u64] {
        &self.break_cues
    }
}

impl VoxelWorldView for SparseWorld {
    fn classify(&self, coord: Coordinate) -> BlockKind {
        self.blocks.get(&coord).copied().unwrap_or(BlockKind::Other)
    }

    fn drop_for(&self, coord: Coordinate) -> Option<ItemStack> {
        match self.classify(coord) {
            BlockKind::Log => Some(ItemStack::block(SPARSE_LOG_ITEM)),
            BlockKind::Foliage { .. } => Some(ItemStack::block(SPARSE_FOLIAGE_ITEM)),
            BlockKind::Other => None,
        }
    }

    fn spawn_drop(&mut self, coord: Coordinate, drop: ItemStack, cause: u64) {
        self.drops.push(SpawnedDrop {
            at: coord,
            item: drop,
            cause,
        });
    }

    fn remove_block(&mut self, coord: Coordinate) {
        self.blocks.remove(&coord);
        self.removed.push(coord);
    }

    fn tool_break_cue(&mut self, cause: u64) {
        self.break_cues.push(cause);
    }
}

/// Minimal [`ActorHandle`] with an optional health pool and a single hand slot.
#[derive(Debug, Clone, PartialEq)]
pub struct TestActor {
    pub id: u64,
    pub health: Option<f32>,
    pub hand: Option<ItemStack>,
}

impl TestActor {
    pub fn new(id: u64, health: f32, hand: Option<ItemStack>) -> Self {
        Self {
            id,
            health: Some(health),
            hand,
        }
    }
}

impl ActorHandle for TestActor {
    fn id(&self) -> u64 {
        self.id
    }

    fn held_tool(&self) -> Option<ItemStack> {
        self.hand.clone()
    }

    fn set_held_tool(&mut self, tool: Option<ItemStack>) {
        self.hand = tool;
    }

    fn health(&self) -> Option<f32> {
        self.health
    }

    fn set_health(&mut self, health: f32) {
        if self.health.is_some() {
            self.health = Some(health);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_cells_are_other() {
        let mut world = SparseWorld::new();
        let at = Coordinate::new(1, 2, 3);
        assert_eq!(world.classify(at), BlockKind::Other);
        world.set(at, BlockKind::Log);
        assert_eq!(world.classify(at), BlockKind::Log);
        world.set(at, BlockKind::Other);
        assert_eq!(world.count(BlockKind::Log), 0);
    }

    #[test]
    fn removal_is_recorded_in_order() {
        let mut world = SparseWorld::new();
        world.set_column(Coordinate::new(0, 0, 0), 2);
        world.remove_block(Coordinate::new(0, 1, 0));
        world.remove_block(Coordinate::new(0, 0, 0));
        assert_eq!(
            world.removed(),
            &[Coordinate::new(0, 1, 0), Coordinate::new(0, 0, 0)]
        );
        assert_eq!(world.count(BlockKind::Log), 0);
    }

    #[test]
    fn actor_damage_clamps_at_zero() {
        let mut actor = TestActor::new(1, 2.0, None);
        actor.apply_damage(5.0);
        assert_eq!(actor.health, Some(0.0));
    }

    #[test]
    fn actor_without_health_ignores_damage() {
        let mut actor = TestActor {
            id: 1,
            health: None,
            hand: None,
        };
        actor.apply_damage(5.0);
        assert_eq!(actor.health, None);
    }
}
