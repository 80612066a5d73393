use std::fmt;

/// Chunk width (X axis) in voxels.
pub const CHUNK_SIZE_X: usize = 16;
/// Chunk height (Y axis) in voxels.
pub const CHUNK_SIZE_Y: usize = 256;
/// Chunk depth (Z axis) in voxels.
pub const CHUNK_SIZE_Z: usize = 16;
/// Total voxel count per chunk.
pub const CHUNK_VOLUME: usize = CHUNK_SIZE_X * CHUNK_SIZE_Y * CHUNK_SIZE_Z;

/// Block identifier, see [`crate::blocks`].
pub type BlockId = u16;
/// Block state metadata bits.
pub type BlockState = u16;

/// Reserved ID for air.
pub const BLOCK_AIR: BlockId = 0;

/// Chunk-local position (X, Y, Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    /// Convert to a linear index within the voxel array.
    pub fn index(self) -> usize {
        debug_assert!(self.x < CHUNK_SIZE_X);
        debug_assert!(self.y < CHUNK_SIZE_Y);
        debug_assert!(self.z < CHUNK_SIZE_Z);
        (self.y * CHUNK_SIZE_Z + self.z) * CHUNK_SIZE_X + self.x
    }
}

/// Chunk coordinate (X,Z) in chunk space.
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Chunk holding world column (`x`, `z`).
    pub fn containing(x: i32, z: i32) -> Self {
        Self::new(
            x.div_euclid(CHUNK_SIZE_X as i32),
            z.div_euclid(CHUNK_SIZE_Z as i32),
        )
    }

    /// Split a world position into its chunk and chunk-local position.
    ///
    /// Returns `None` when `y` lies outside the world's vertical range.
    pub fn split(x: i32, y: i32, z: i32) -> Option<(Self, LocalPos)> {
        let y = usize::try_from(y).ok().filter(|y| *y < CHUNK_SIZE_Y)?;
        let local = LocalPos {
            x: x.rem_euclid(CHUNK_SIZE_X as i32) as usize,
            y,
            z: z.rem_euclid(CHUNK_SIZE_Z as i32) as usize,
        };
        Some((Self::containing(x, z), local))
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Per-voxel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Voxel {
    pub id: BlockId,
    pub state: BlockState,
}

impl Voxel {
    /// A block with no state bits set.
    pub const fn block(id: BlockId) -> Self {
        Self { id, state: 0 }
    }

    pub const fn with_state(self, state: BlockState) -> Self {
        Self { state, ..self }
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == BLOCK_AIR
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Dirty flags set whenever chunk data changes.
    pub struct DirtyFlags: u8 {
        const MESH = 0b0000_0001;
        const LIGHT = 0b0000_0010;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// Chunk storing voxel data plus dirty flags.
pub struct Chunk {
    position: ChunkPos,
    voxels: Vec<Voxel>,
    dirty: DirtyFlags,
}

impl Chunk {
    /// Allocate a fresh chunk filled with air.
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            voxels: vec![Voxel::default(); CHUNK_VOLUME],
            dirty: DirtyFlags::all(),
        }
    }

    #[inline]
    pub fn position(&self) -> ChunkPos {
        self.position
    }

    /// Fetch a voxel copy.
    pub fn voxel(&self, pos: LocalPos) -> Voxel {
        self.voxels[pos.index()]
    }

    /// Set a voxel and mark the relevant dirty flags.
    pub fn set_voxel(&mut self, pos: LocalPos, voxel: Voxel) {
        let idx = pos.index();
        if self.voxels[idx] != voxel {
            self.voxels[idx] = voxel;
            self.dirty.insert(DirtyFlags::MESH | DirtyFlags::LIGHT);
        }
    }

    /// Number of non-air voxels.
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|v| !v.is_air()).count()
    }

    /// Consume and return the current dirty flags.
    pub fn take_dirty_flags(&mut self) -> DirtyFlags {
        let flags = self.dirty;
        self.dirty = DirtyFlags::empty();
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(x: usize, y: usize, z: usize) -> LocalPos {
        LocalPos { x, y, z }
    }

    #[test]
    fn set_and_get_voxel_marks_dirty() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        assert!(chunk.take_dirty_flags().contains(DirtyFlags::MESH));
        chunk.set_voxel(local(1, 2, 3), Voxel::block(5).with_state(1));
        assert_eq!(chunk.voxel(local(1, 2, 3)).id, 5);
        assert_eq!(chunk.voxel(local(1, 2, 3)).state, 1);
        assert!(chunk.take_dirty_flags().contains(DirtyFlags::MESH));
    }

    #[test]
    fn test_local_pos_index() {
        assert_eq!(local(0, 0, 0).index(), 0);
        assert_eq!(local(15, 0, 0).index(), 15);
        assert_eq!(local(0, 1, 0).index(), CHUNK_SIZE_Z * CHUNK_SIZE_X);
    }

    #[test]
    fn test_set_same_voxel_no_dirty() {
        let mut chunk = Chunk::new(ChunkPos::new(0, 0));
        chunk.take_dirty_flags();

        chunk.set_voxel(local(0, 0, 0), Voxel::default());
        assert!(chunk.take_dirty_flags().is_empty());
        assert_eq!(chunk.solid_count(), 0);
    }

    #[test]
    fn split_handles_negative_coordinates() {
        let (pos, at) = ChunkPos::split(-1, 70, -17).expect("in range");
        assert_eq!(pos, ChunkPos::new(-1, -2));
        assert_eq!(at, local(15, 70, 15));

        let (pos, at) = ChunkPos::split(16, 0, 15).expect("in range");
        assert_eq!(pos, ChunkPos::new(1, 0));
        assert_eq!(at, local(0, 0, 15));
    }

    #[test]
    fn split_rejects_out_of_range_heights() {
        assert!(ChunkPos::split(0, -1, 0).is_none());
        assert!(ChunkPos::split(0, CHUNK_SIZE_Y as i32, 0).is_none());
        assert!(ChunkPos::split(0, CHUNK_SIZE_Y as i32 - 1, 0).is_some());
    }

    #[test]
    fn test_chunk_pos_ordering() {
        // ChunkPos implements Ord for BTreeMap determinism
        assert!(ChunkPos::new(0, 0) < ChunkPos::new(1, 0));
        assert!(ChunkPos::new(0, 0) < ChunkPos::new(0, 1));
    }

    #[test]
    fn test_chunk_pos_display() {
        assert_eq!(format!("{}", ChunkPos::new(5, -3)), "(5, -3)");
    }
}
