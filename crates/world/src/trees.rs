//! Tree generation.
//!
//! Writes oak, birch and pine trees, plus large oaks with side branches, into
//! a [`VoxelWorld`]. Generated leaves are decayable, so they fall with their tree.

use serde::{Deserialize, Serialize};
use treefell_felling::Coordinate;

use crate::blocks;
use crate::chunk::BlockId;
use crate::world::VoxelWorld;

/// Tree type variations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeType {
    Oak,
    Birch,
    Pine,
    /// Tall oak with two horizontal branches, each carrying its own leaf cluster.
    LargeOak,
}

impl TreeType {
    pub const ALL: [TreeType; 4] = [
        TreeType::Oak,
        TreeType::Birch,
        TreeType::Pine,
        TreeType::LargeOak,
    ];

    /// Get log block ID for this tree type.
    pub fn log_block(&self) -> BlockId {
        match self {
            TreeType::Oak | TreeType::LargeOak => blocks::LOG,
            TreeType::Birch => blocks::BIRCH_LOG,
            TreeType::Pine => blocks::PINE_LOG,
        }
    }

    /// Get leaves block ID for this tree type.
    pub fn leaves_block(&self) -> BlockId {
        match self {
            TreeType::Oak | TreeType::LargeOak => blocks::LEAVES,
            TreeType::Birch => blocks::BIRCH_LEAVES,
            TreeType::Pine => blocks::PINE_LEAVES,
        }
    }

    /// Get trunk height for this tree type.
    pub fn trunk_height(&self) -> i32 {
        match self {
            TreeType::Oak => 5,
            TreeType::Birch => 6,
            TreeType::Pine => 8,
            TreeType::LargeOak => 7,
        }
    }
}

/// Tree structure with position and type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tree {
    /// Bottom log of the trunk.
    pub base: Coordinate,
    pub tree_type: TreeType,
}

impl Tree {
    pub fn new(base: Coordinate, tree_type: TreeType) -> Self {
        Self { base, tree_type }
    }

    /// Top log of the trunk.
    pub fn top(&self) -> Coordinate {
        self.base.offset(0, self.tree_type.trunk_height() - 1, 0)
    }

    /// Write the tree into `world`.
    ///
    /// Logs go in first; leaves only fill air, so they never replace wood or
    /// terrain. Returns the number of blocks placed.
    pub fn generate_into_world(&self, world: &mut VoxelWorld) -> usize {
        let log = self.tree_type.log_block();
        let leaves = self.tree_type.leaves_block();
        let trunk_height = self.tree_type.trunk_height();
        let mut placed = 0;

        for dy in 0..trunk_height {
            placed += self.place(world, 0, dy, 0, log, false);
        }

        match self.tree_type {
            TreeType::Oak => placed += self.generate_oak_canopy(world, trunk_height, leaves),
            TreeType::Birch => {
                // Narrow 3x3x2 crown
                let canopy_y = trunk_height - 1;
                placed += self.leaf_box(world, 0, canopy_y, 0, 1, 2, leaves);
                placed += self.place(world, 0, canopy_y + 2, 0, leaves, true);
            }
            TreeType::Pine => {
                // Conical canopy: wide skirt, narrow tip
                let canopy_start = trunk_height - 3;
                placed += self.leaf_box(world, 0, canopy_start, 0, 1, 4, leaves);
                placed += self.place(world, 0, canopy_start + 4, 0, leaves, true);
                placed += self.place(world, 0, canopy_start + 5, 0, leaves, true);
            }
            TreeType::LargeOak => {
                let branch_y = trunk_height - 3;
                for dir in [1, -1] {
                    for step in 1..=2 {
                        placed += self.place(world, dir * step, branch_y, 0, log, false);
                    }
                    placed += self.leaf_box(world, dir * 2, branch_y + 1, 0, 1, 2, leaves);
                }
                placed += self.generate_oak_canopy(world, trunk_height, leaves);
            }
        }

        placed
    }

    /// Round 3x3x3 canopy with the bottom corners cut, plus a top leaf.
    fn generate_oak_canopy(
        &self,
        world: &mut VoxelWorld,
        trunk_height: i32,
        leaves: BlockId,
    ) -> usize {
        let canopy_y = trunk_height - 1;
        let mut placed = 0;
        for dy in 0..3 {
            for dx in -1..=1 {
                for dz in -1..=1 {
                    if dy == 0 && dx != 0 && dz != 0 {
                        continue;
                    }
                    placed += self.place(world, dx, canopy_y + dy, dz, leaves, true);
                }
            }
        }
        placed + self.place(world, 0, canopy_y + 3, 0, leaves, true)
    }

    /// Square leaf slab `height` layers tall centred on (`cx`, `cz`).
    #[allow(clippy::too_many_arguments)]
    fn leaf_box(
        &self,
        world: &mut VoxelWorld,
        cx: i32,
        y: i32,
        cz: i32,
        radius: i32,
        height: i32,
        leaves: BlockId,
    ) -> usize {
        let mut placed = 0;
        for dy in 0..height {
            for dx in -radius..=radius {
                for dz in -radius..=radius {
                    placed += self.place(world, cx + dx, y + dy, cz + dz, leaves, true);
                }
            }
        }
        placed
    }

    /// Place a block relative to the base. Returns 1 if something was written.
    fn place(
        &self,
        world: &mut VoxelWorld,
        dx: i32,
        dy: i32,
        dz: i32,
        block: BlockId,
        only_into_air: bool,
    ) -> usize {
        let at = self.base.offset(dx, dy, dz);
        if only_into_air && world.voxel(at).is_some_and(|v| !v.is_air()) {
            return 0;
        }
        usize::from(world.set_block(at, block))
    }
}
