//! Dropped item entities with physics and lifecycle management.
//!
//! Felled logs and leaves turn into dropped items. Each remembers the actor
//! whose action spawned it, falls to the ground, can be picked up, merges with
//! nearby identical stacks and despawns after 5 minutes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use treefell_core::ItemStack;

/// Maximum lifetime for dropped items (5 minutes = 6000 ticks at 20 TPS).
pub const ITEM_DESPAWN_TICKS: u32 = 6000;

/// Pickup radius in blocks.
pub const PICKUP_RADIUS: f64 = 1.5;

/// A dropped item entity in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedItem {
    /// Unique ID for this dropped item.
    pub id: u64,
    /// World X position.
    pub x: f64,
    /// World Y position.
    pub y: f64,
    /// World Z position.
    pub z: f64,
    /// Velocity in X direction.
    pub vel_x: f64,
    /// Velocity in Y direction.
    pub vel_y: f64,
    /// Velocity in Z direction.
    pub vel_z: f64,
    /// The dropped stack.
    pub stack: ItemStack,
    /// Actor whose action spawned this drop.
    pub cause: u64,
    /// Ticks remaining before despawn.
    pub lifetime_ticks: u32,
    /// Whether the item is on the ground (no longer falling).
    pub on_ground: bool,
}

impl DroppedItem {
    /// Create a new dropped item at the given position.
    ///
    /// Items spawn with small pseudo-random horizontal velocity derived from
    /// their id, so the scatter is deterministic.
    pub fn new(id: u64, x: f64, y: f64, z: f64, stack: ItemStack, cause: u64) -> Self {
        let vel_x = ((id % 100) as f64 - 50.0) / 200.0; // -0.25 to 0.25
        let vel_z = (((id / 100) % 100) as f64 - 50.0) / 200.0;

        Self {
            id,
            x,
            y,
            z,
            vel_x,
            vel_y: 0.2,
            vel_z,
            stack,
            cause,
            lifetime_ticks: ITEM_DESPAWN_TICKS,
            on_ground: false,
        }
    }

    /// Update the item's physics and lifetime.
    ///
    /// Returns `true` if the item should be removed (despawned).
    pub fn update(&mut self, ground_height: f64) -> bool {
        if self.lifetime_ticks > 0 {
            self.lifetime_ticks -= 1;
        } else {
            return true;
        }

        if !self.on_ground {
            self.vel_y -= 0.04;

            // Air resistance
            self.vel_x *= 0.98;
            self.vel_y *= 0.98;
            self.vel_z *= 0.98;

            self.x += self.vel_x;
            self.y += self.vel_y;
            self.z += self.vel_z;

            // Items float slightly above ground
            let item_ground_level = ground_height + 0.25;
            if self.y <= item_ground_level {
                self.y = item_ground_level;
                self.vel_y = 0.0;
                self.vel_x *= 0.5;
                self.vel_z *= 0.5;

                if self.vel_x.abs() < 0.01 && self.vel_z.abs() < 0.01 {
                    self.on_ground = true;
                }
            }
        }

        false
    }

    /// Check if an entity at the given position is within pickup range.
    pub fn can_pickup(&self, px: f64, py: f64, pz: f64) -> bool {
        let dx = self.x - px;
        let dy = self.y - py;
        let dz = self.z - pz;
        dx * dx + dy * dy + dz * dz <= PICKUP_RADIUS * PICKUP_RADIUS
    }

    /// Merge another dropped stack into this one if possible.
    ///
    /// Returns the number of items moved (may be less than `other`'s count
    /// once the stack limit is reached). Tools never merge.
    pub fn try_merge(&mut self, other: &DroppedItem) -> u32 {
        if self.stack.item_type != other.stack.item_type || self.stack.durability.is_some() {
            return 0;
        }

        let available_space = self.stack.max_stack_size().saturating_sub(self.stack.count);
        let merge_amount = available_space.min(other.stack.count);

        self.stack.count += merge_amount;
        merge_amount
    }
}

/// Manages all dropped items in the world.
#[derive(Debug)]
pub struct ItemManager {
    items: BTreeMap<u64, DroppedItem>,
    next_id: u64,
}

impl ItemManager {
    /// Create a new empty item manager.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Spawn a new dropped item and return its id.
    pub fn spawn_item(&mut self, x: f64, y: f64, z: f64, stack: ItemStack, cause: u64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.items
            .insert(id, DroppedItem::new(id, x, y, z, stack, cause));
        id
    }

    /// Update all items (physics and lifetime).
    ///
    /// `get_ground_height` maps an (x, z) position to the ground's Y coordinate.
    /// Returns the number of items that despawned this tick.
    pub fn update<F>(&mut self, get_ground_height: F) -> usize
    where
        F: Fn(f64, f64) -> f64,
    {
        let before = self.items.len();
        self.items
            .retain(|_, item| !item.update(get_ground_height(item.x, item.z)));
        before - self.items.len()
    }

    /// Pick up every item within range of the given position.
    pub fn pickup_items(&mut self, x: f64, y: f64, z: f64) -> Vec<ItemStack> {
        let in_range: Vec<u64> = self
            .items
            .values()
            .filter(|item| item.can_pickup(x, y, z))
            .map(|item| item.id)
            .collect();

        in_range
            .into_iter()
            .filter_map(|id| self.items.remove(&id))
            .map(|item| item.stack)
            .collect()
    }

    /// Get the number of active dropped items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Get a reference to a specific item by ID.
    pub fn get(&self, id: u64) -> Option<&DroppedItem> {
        self.items.get(&id)
    }

    /// All items in spawn order.
    pub fn items(&self) -> impl Iterator<Item = &DroppedItem> {
        self.items.values()
    }

    /// Merge items of the same type lying within one block of each other.
    ///
    /// Returns the number of items merged away.
    pub fn merge_nearby_items(&mut self) -> usize {
        const MERGE_RADIUS: f64 = 1.0;
        let ids: Vec<u64> = self.items.keys().copied().collect();
        let mut removed = Vec::new();

        for (i, &id_a) in ids.iter().enumerate() {
            if removed.contains(&id_a) {
                continue;
            }
            for &id_b in &ids[i + 1..] {
                if removed.contains(&id_b) {
                    continue;
                }
                let Some(item_b) = self.items.get(&id_b).cloned() else {
                    continue;
                };
                let Some(item_a) = self.items.get_mut(&id_a) else {
                    continue;
                };

                let dx = item_a.x - item_b.x;
                let dy = item_a.y - item_b.y;
                let dz = item_a.z - item_b.z;
                if dx * dx + dy * dy + dz * dz > MERGE_RADIUS * MERGE_RADIUS {
                    continue;
                }

                let moved = item_a.try_merge(&item_b);
                if moved == item_b.stack.count {
                    removed.push(id_b);
                } else if let Some(rest) = self.items.get_mut(&id_b) {
                    rest.stack.count -= moved;
                }
            }
        }

        for id in &removed {
            self.items.remove(id);
        }
        removed.len()
    }
}

impl Default for ItemManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks;
    use treefell_core::{ToolMaterial, ToolType};

    fn logs(count: u32) -> ItemStack {
        ItemStack::new(treefell_core::ItemType::Block(blocks::LOG), count)
    }

    #[test]
    fn test_dropped_item_creation() {
        let item = DroppedItem::new(1, 10.0, 64.0, 20.0, logs(5), 9);

        assert_eq!(item.id, 1);
        assert_eq!(item.stack.count, 5);
        assert_eq!(item.cause, 9);
        assert_eq!(item.lifetime_ticks, ITEM_DESPAWN_TICKS);
        assert!(!item.on_ground);
    }

    #[test]
    fn test_dropped_item_physics() {
        let mut item = DroppedItem::new(1, 10.0, 70.0, 20.0, logs(1), 0);
        let ground_height = 64.0;

        for _ in 0..100 {
            if item.update(ground_height) {
                break;
            }
        }

        assert!(item.on_ground);
        assert!((item.y - (ground_height + 0.25)).abs() < 0.1);
    }

    #[test]
    fn test_dropped_item_lifetime() {
        let mut item = DroppedItem::new(1, 10.0, 64.25, 20.0, logs(1), 0);
        item.on_ground = true;
        item.lifetime_ticks = 2;

        assert!(!item.update(64.0));
        assert!(!item.update(64.0));
        assert!(item.update(64.0));
    }

    #[test]
    fn test_item_pickup_radius() {
        let item = DroppedItem::new(1, 10.0, 64.0, 20.0, logs(1), 0);

        assert!(item.can_pickup(10.5, 64.0, 20.0));
        assert!(!item.can_pickup(12.0, 64.0, 20.0));
        assert!(!item.can_pickup(10.0, 70.0, 20.0));
    }

    #[test]
    fn test_item_merge_stack_limit() {
        let mut item1 = DroppedItem::new(1, 10.0, 64.0, 20.0, logs(62), 0);
        let item2 = DroppedItem::new(2, 10.5, 64.0, 20.0, logs(5), 0);

        assert_eq!(item1.try_merge(&item2), 2);
        assert_eq!(item1.stack.count, 64);
    }

    #[test]
    fn tools_never_merge() {
        let axe = ItemStack::tool(ToolType::Axe, ToolMaterial::Iron);
        let mut item1 = DroppedItem::new(1, 10.0, 64.0, 20.0, axe.clone(), 0);
        let item2 = DroppedItem::new(2, 10.0, 64.0, 20.0, axe, 0);

        assert_eq!(item1.try_merge(&item2), 0);
    }

    #[test]
    fn test_item_manager_despawn() {
        let mut manager = ItemManager::new();
        let id = manager.spawn_item(10.0, 64.25, 20.0, logs(1), 0);
        if let Some(item) = manager.items.get_mut(&id) {
            item.on_ground = true;
            item.lifetime_ticks = 1;
        }

        let ground_height = |_x: f64, _z: f64| 64.0;
        assert_eq!(manager.update(ground_height), 0);
        assert_eq!(manager.update(ground_height), 1);
        assert_eq!(manager.count(), 0);
    }

    #[test]
    fn test_item_manager_pickup() {
        let mut manager = ItemManager::new();
        manager.spawn_item(10.0, 64.0, 20.0, logs(5), 0);
        manager.spawn_item(15.0, 64.0, 25.0, ItemStack::block(blocks::LEAVES), 0);

        let picked_up = manager.pickup_items(10.0, 64.0, 20.0);
        assert_eq!(picked_up, vec![logs(5)]);
        assert_eq!(manager.count(), 1);
    }

    #[test]
    fn test_item_manager_merge() {
        let mut manager = ItemManager::new();
        manager.spawn_item(10.0, 64.0, 20.0, logs(5), 0);
        manager.spawn_item(10.5, 64.0, 20.0, logs(3), 0);
        manager.spawn_item(10.2, 64.0, 20.0, ItemStack::block(blocks::LEAVES), 0);

        assert_eq!(manager.merge_nearby_items(), 1);
        assert_eq!(manager.count(), 2);
        let first = manager.items().next().expect("first item kept");
        assert_eq!(first.stack.count, 8);
    }
}
