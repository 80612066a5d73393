//! Chunked voxel world hosting whole-tree felling.

pub mod blocks;
mod chunk;
mod drop_item;
mod player;
mod trees;
mod world;

pub use chunk::{
    BlockId, BlockState, Chunk, ChunkPos, DirtyFlags, LocalPos, Voxel, BLOCK_AIR, CHUNK_SIZE_X,
    CHUNK_SIZE_Y, CHUNK_SIZE_Z, CHUNK_VOLUME,
};
pub use drop_item::{DroppedItem, ItemManager, ITEM_DESPAWN_TICKS, PICKUP_RADIUS};
pub use player::{Player, PLAYER_MAX_HEALTH};
pub use trees::{Tree, TreeType};
pub use world::{VoxelWorld, WorldEvent};
