//! Item system - tools and block items

use crate::enchantment::{Enchantment, EnchantmentType};
use serde::{Deserialize, Serialize};

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    /// A tool (axe, pickaxe, ...)
    Tool(ToolType, ToolMaterial),
    /// A placeable block
    Block(u16), // BlockId
}

/// Tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolType {
    /// Axe - chops wood, fells whole trees
    Axe,
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Shovel - digs dirt, sand, gravel
    Shovel,
    /// Sword - combat weapon
    Sword,
    /// Hoe - tills farmland
    Hoe,
}

/// Tool material tiers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ToolMaterial {
    /// Wooden tools (tier 0)
    Wood = 0,
    /// Stone tools (tier 1)
    Stone = 1,
    /// Iron tools (tier 2)
    Iron = 2,
    /// Diamond tools (tier 3)
    Diamond = 3,
    /// Gold tools (fragile)
    Gold = 4,
}

impl ToolMaterial {
    /// Every material, in tier order.
    pub const ALL: [ToolMaterial; 5] = [
        ToolMaterial::Wood,
        ToolMaterial::Stone,
        ToolMaterial::Iron,
        ToolMaterial::Diamond,
        ToolMaterial::Gold,
    ];

    /// Get the maximum durability for tools of this material
    pub fn durability(self, tool_type: ToolType) -> u32 {
        let base = match self {
            ToolMaterial::Wood => 59,
            ToolMaterial::Stone => 131,
            ToolMaterial::Iron => 250,
            ToolMaterial::Diamond => 1561,
            ToolMaterial::Gold => 32,
        };

        // Swords have different durability
        if tool_type == ToolType::Sword {
            base + 1
        } else {
            base
        }
    }
}

/// An item stack in inventory or on the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack
    pub count: u32,
    /// Remaining durability for tools (None for non-tools)
    pub durability: Option<u32>,
    /// Enchantments applied to this item (None for non-enchantable items)
    pub enchantments: Option<Vec<Enchantment>>,
}

impl ItemStack {
    /// Create a new item stack; tools start at full durability.
    pub fn new(item_type: ItemType, count: u32) -> Self {
        let durability = match item_type {
            ItemType::Tool(tool_type, material) => Some(material.durability(tool_type)),
            _ => None,
        };

        Self {
            item_type,
            count,
            durability,
            enchantments: None,
        }
    }

    /// A single tool of the given kind.
    pub fn tool(tool_type: ToolType, material: ToolMaterial) -> Self {
        Self::new(ItemType::Tool(tool_type, material), 1)
    }

    /// A single block item, as dropped by a broken block.
    pub fn block(block_id: u16) -> Self {
        Self::new(ItemType::Block(block_id), 1)
    }

    /// Override the remaining durability, capped at the material maximum.
    pub fn with_durability(mut self, remaining: u32) -> Self {
        if let Some(max) = self.max_durability() {
            self.durability = Some(remaining.min(max));
        }
        self
    }

    /// Maximum stack size for this item type
    pub fn max_stack_size(&self) -> u32 {
        match self.item_type {
            ItemType::Tool(_, _) => 1, // Tools don't stack
            ItemType::Block(_) => 64,
        }
    }

    /// Check if this stack can accept more items
    pub fn can_add(&self, count: u32) -> bool {
        self.count + count <= self.max_stack_size()
    }

    /// The axe material, if this item is an axe.
    pub fn axe_material(&self) -> Option<ToolMaterial> {
        match self.item_type {
            ItemType::Tool(ToolType::Axe, material) => Some(material),
            _ => None,
        }
    }

    /// Damage durability by a given amount (for tools)
    pub fn damage_durability(&mut self, amount: u32) {
        if let Some(ref mut durability) = self.durability {
            *durability = durability.saturating_sub(amount);
        }
    }

    /// Check if tool is broken (durability = 0)
    pub fn is_broken(&self) -> bool {
        self.durability.map(|d| d == 0).unwrap_or(false)
    }

    /// Get maximum durability for this item
    pub fn max_durability(&self) -> Option<u32> {
        match self.item_type {
            ItemType::Tool(tool_type, material) => Some(material.durability(tool_type)),
            _ => None,
        }
    }

    /// Check if this item can be enchanted
    pub fn is_enchantable(&self) -> bool {
        matches!(self.item_type, ItemType::Tool(_, _))
    }

    /// Add an enchantment to this item
    /// Returns true if the enchantment was added successfully
    pub fn add_enchantment(&mut self, enchantment: Enchantment) -> bool {
        if !self.is_enchantable() {
            return false;
        }

        let enchants = self.enchantments.get_or_insert_with(Vec::new);

        if enchants
            .iter()
            .any(|existing| !existing.enchantment_type.is_compatible_with(&enchantment.enchantment_type))
        {
            return false;
        }

        // Same type already present: keep the higher level
        if let Some(existing) = enchants
            .iter_mut()
            .find(|e| e.enchantment_type == enchantment.enchantment_type)
        {
            existing.level = existing.level.max(enchantment.level);
            return true;
        }

        enchants.push(enchantment);
        true
    }

    /// Builder form of [`ItemStack::add_enchantment`].
    pub fn enchanted(mut self, enchantment: Enchantment) -> Self {
        self.add_enchantment(enchantment);
        self
    }

    /// Get all enchantments on this item
    pub fn get_enchantments(&self) -> &[Enchantment] {
        self.enchantments.as_deref().unwrap_or(&[])
    }

    /// Get the level of a specific enchantment, or 0 if not present
    pub fn enchantment_level(&self, enchant_type: EnchantmentType) -> u8 {
        self.get_enchantments()
            .iter()
            .find(|e| e.enchantment_type == enchant_type)
            .map(|e| e.level)
            .unwrap_or(0)
    }
}
