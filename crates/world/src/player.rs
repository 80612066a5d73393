//! The player actor: a health pool and the item in hand.

use serde::{Deserialize, Serialize};
use treefell_core::ItemStack;
use treefell_felling::ActorHandle;

/// Full health, in half-hearts.
pub const PLAYER_MAX_HEALTH: f32 = 20.0;

/// A player standing in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u64,
    /// Feet position.
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub health: f32,
    pub max_health: f32,
    /// Item in the main hand.
    pub main_hand: Option<ItemStack>,
}

impl Player {
    /// Spawn a player at full health with an empty hand.
    pub fn new(id: u64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            x,
            y,
            z,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            main_hand: None,
        }
    }

    pub fn holding(mut self, item: ItemStack) -> Self {
        self.main_hand = Some(item);
        self
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Restore health, capped at the maximum.
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }
}

impl ActorHandle for Player {
    fn id(&self) -> u64 {
        self.id
    }

    fn held_tool(&self) -> Option<ItemStack> {
        self.main_hand.clone()
    }

    fn set_held_tool(&mut self, tool: Option<ItemStack>) {
        self.main_hand = tool;
    }

    fn health(&self) -> Option<f32> {
        Some(self.health)
    }

    fn set_health(&mut self, health: f32) {
        self.health = health.clamp(0.0, self.max_health);
    }
}
