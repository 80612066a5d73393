//! Tool enchantments.

use serde::{Deserialize, Serialize};

/// Types of enchantments that can be applied to tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnchantmentType {
    /// Increases mining speed
    Efficiency,
    /// Allows silk touch harvesting of blocks
    SilkTouch,
    /// Increases block drop amounts
    Fortune,
    /// Reduces durability loss
    Unbreaking,
    /// Repairs item using XP
    Mending,
}

impl EnchantmentType {
    /// Get the maximum level for this enchantment
    pub fn max_level(&self) -> u8 {
        match self {
            EnchantmentType::Efficiency => 5,
            EnchantmentType::SilkTouch => 1,
            EnchantmentType::Fortune => 3,
            EnchantmentType::Unbreaking => 3,
            EnchantmentType::Mending => 1,
        }
    }

    /// Check if this enchantment is compatible with another
    pub fn is_compatible_with(&self, other: &EnchantmentType) -> bool {
        !matches!(
            (self, other),
            (EnchantmentType::SilkTouch, EnchantmentType::Fortune)
                | (EnchantmentType::Fortune, EnchantmentType::SilkTouch)
        )
    }
}

/// An enchantment with a specific level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enchantment {
    /// The type of enchantment
    pub enchantment_type: EnchantmentType,
    /// The level of the enchantment (1 to max_level)
    pub level: u8,
}

impl Enchantment {
    /// Create a new enchantment, clamping the level to the type's maximum
    pub fn new(enchantment_type: EnchantmentType, level: u8) -> Self {
        Self {
            enchantment_type,
            level: level.min(enchantment_type.max_level()),
        }
    }
}
