//! Block ids and block state bits understood by the felling host.

use crate::chunk::{BlockId, BlockState, Voxel};

pub const STONE: BlockId = 1;
pub const DIRT: BlockId = 2;
pub const GRASS: BlockId = 3;
pub const LOG: BlockId = 11;
pub const LEAVES: BlockId = 12;
pub const BIRCH_LOG: BlockId = 13;
pub const BIRCH_LEAVES: BlockId = 14;
pub const PINE_LOG: BlockId = 15;
pub const PINE_LEAVES: BlockId = 16;

bitflags::bitflags! {
    /// State bits carried by leaf voxels.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct LeafFlags: BlockState {
        /// Placed by a player; never decays and is not part of any tree.
        const PERSISTENT = 0b0000_0001;
    }
}

#[inline]
pub fn is_log(id: BlockId) -> bool {
    matches!(id, LOG | BIRCH_LOG | PINE_LOG)
}

#[inline]
pub fn is_leaves(id: BlockId) -> bool {
    matches!(id, LEAVES | BIRCH_LEAVES | PINE_LEAVES)
}

/// Leaves of `id` as a player would place them.
pub fn persistent_leaves(id: BlockId) -> Voxel {
    Voxel::block(id).with_state(LeafFlags::PERSISTENT.bits())
}

/// Whether a leaf voxel decays once its tree is gone.
pub fn is_decayable(voxel: Voxel) -> bool {
    !LeafFlags::from_bits_truncate(voxel.state).contains(LeafFlags::PERSISTENT)
}
