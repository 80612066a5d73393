#![warn(missing_docs)]
//! Core primitives shared across the workspace: items, tools and enchantments.

pub mod enchantment;
pub mod item;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use enchantment::{Enchantment, EnchantmentType};
pub use item::{ItemStack, ItemType, ToolMaterial, ToolType};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Helper to derive a reproducible RNG for one actor's felling rolls at a given tick.
pub fn scoped_rng(world_seed: u64, actor_id: u64, tick: SimTick) -> StdRng {
    let seed = world_seed ^ actor_id.rotate_left(32) ^ tick.0;
    StdRng::seed_from_u64(seed)
}
