//! Chunked voxel world exposed to the felling core.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::trace;
use treefell_core::ItemStack;
use treefell_felling::{BlockKind, Coordinate, VoxelWorldView};

use crate::blocks;
use crate::chunk::{BlockId, Chunk, ChunkPos, Voxel, BLOCK_AIR, CHUNK_SIZE_Y};
use crate::drop_item::ItemManager;

/// Something observable that happened in the world.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum WorldEvent {
    /// A block was broken and replaced with air.
    BlockBroken { at: Coordinate, block: BlockId },
    /// The tool in `actor`'s hand broke; hosts play the break sound.
    ToolBroke { actor: u64 },
}

/// Chunks plus the dropped items living in them.
/// Uses BTreeMap so chunk iteration is deterministic.
#[derive(Default)]
pub struct VoxelWorld {
    chunks: BTreeMap<ChunkPos, Chunk>,
    items: ItemManager,
    events: Vec<WorldEvent>,
}

impl VoxelWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of resident chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Obtain mutable access to a chunk, creating it if necessary.
    pub fn ensure_chunk(&mut self, pos: ChunkPos) -> &mut Chunk {
        self.chunks.entry(pos).or_insert_with(|| Chunk::new(pos))
    }

    pub fn chunk(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunks.get(&pos)
    }

    pub fn chunk_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        self.chunks.get_mut(&pos)
    }

    /// Voxel at `coord`, or `None` when its chunk is not loaded or `y` is out of range.
    pub fn voxel(&self, coord: Coordinate) -> Option<Voxel> {
        let (pos, local) = ChunkPos::split(coord.x, coord.y, coord.z)?;
        self.chunks.get(&pos).map(|chunk| chunk.voxel(local))
    }

    /// Block id at `coord`; unloaded and out-of-range cells read as air.
    pub fn block_id(&self, coord: Coordinate) -> BlockId {
        self.voxel(coord).map_or(BLOCK_AIR, |v| v.id)
    }

    /// Write a voxel, loading its chunk on demand. Returns false if `y` is out of range.
    pub fn set_voxel(&mut self, coord: Coordinate, voxel: Voxel) -> bool {
        let Some((pos, local)) = ChunkPos::split(coord.x, coord.y, coord.z) else {
            return false;
        };
        self.ensure_chunk(pos).set_voxel(local, voxel);
        true
    }

    pub fn set_block(&mut self, coord: Coordinate, id: BlockId) -> bool {
        self.set_voxel(coord, Voxel::block(id))
    }

    /// Lay a square platform of `id` at height `y`, `radius` blocks around (`x`, `z`).
    pub fn fill_ground(&mut self, x: i32, y: i32, z: i32, radius: i32, id: BlockId) {
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                self.set_block(Coordinate::new(x + dx, y, z + dz), id);
            }
        }
    }

    /// Top face of the highest solid block in column (`x`, `z`), or 0 for an empty column.
    pub fn ground_height(&self, x: i32, z: i32) -> i32 {
        column_top(&self.chunks, x, z)
    }

    pub fn items(&self) -> &ItemManager {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemManager {
        &mut self.items
    }

    /// Advance dropped item physics by one tick. Returns the number despawned.
    pub fn tick_items(&mut self) -> usize {
        let chunks = &self.chunks;
        self.items.update(|x, z| {
            f64::from(column_top(chunks, x.floor() as i32, z.floor() as i32))
        })
    }

    /// Events recorded since the last drain, oldest first.
    pub fn events(&self) -> &[WorldEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }
}

fn column_top(chunks: &BTreeMap<ChunkPos, Chunk>, x: i32, z: i32) -> i32 {
    let Some(chunk) = chunks.get(&ChunkPos::containing(x, z)) else {
        return 0;
    };
    (0..CHUNK_SIZE_Y as i32)
        .rev()
        .find(|&y| {
            ChunkPos::split(x, y, z).is_some_and(|(_, local)| !chunk.voxel(local).is_air())
        })
        .map_or(0, |y| y + 1)
}

impl VoxelWorldView for VoxelWorld {
    fn classify(&self, coord: Coordinate) -> BlockKind {
        match self.voxel(coord) {
            Some(voxel) if blocks::is_log(voxel.id) => BlockKind::Log,
            Some(voxel) if blocks::is_leaves(voxel.id) => BlockKind::Foliage {
                decayable: blocks::is_decayable(voxel),
            },
            _ => BlockKind::Other,
        }
    }

    fn drop_for(&self, coord: Coordinate) -> Option<ItemStack> {
        self.voxel(coord)
            .filter(|voxel| !voxel.is_air())
            .map(|voxel| ItemStack::block(voxel.id))
    }

    fn spawn_drop(&mut self, coord: Coordinate, drop: ItemStack, cause: u64) {
        let id = self.items.spawn_item(
            f64::from(coord.x) + 0.5,
            f64::from(coord.y) + 0.5,
            f64::from(coord.z) + 0.5,
            drop,
            cause,
        );
        trace!(item = id, at = %coord, cause, "drop spawned");
    }

    fn remove_block(&mut self, coord: Coordinate) {
        let block = self.block_id(coord);
        if block == BLOCK_AIR {
            return;
        }
        self.set_block(coord, BLOCK_AIR);
        self.events.push(WorldEvent::BlockBroken { at: coord, block });
    }

    fn tool_break_cue(&mut self, cause: u64) {
        self.events.push(WorldEvent::ToolBroke { actor: cause });
    }
}
