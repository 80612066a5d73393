//! Felling configuration, read from TOML.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use tracing::warn;
use treefell_core::{ItemStack, ToolMaterial};

/// Default location of the felling config.
pub const DEFAULT_CONFIG_PATH: &str = "config/treefell.toml";

/// Errors produced while parsing a felling config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid felling config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("damage_per_block must be a positive finite number, got {0}")]
    DamagePerBlock(f32),
    #[error("axe_materials must list at least one material")]
    NoEligibleTools,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FellingConfig {
    /// Master switch; when false every destroyed block is left to the host.
    pub enabled: bool,
    /// Axe materials that fell whole trees.
    pub axe_materials: Vec<ToolMaterial>,
    /// Whether the felling pass also removes and drops the destroyed base log.
    /// Hosts that already drop the base block set this to false.
    pub fell_base_block: bool,
    /// Health lost per trunk or branch block felled after the tool broke.
    pub damage_per_block: f32,
}

impl Default for FellingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            axe_materials: ToolMaterial::ALL.to_vec(),
            fell_base_block: true,
            damage_per_block: 1.0,
        }
    }
}

impl FellingConfig {
    /// Strict parse: syntax errors and invalid values are reported.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: FellingConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Strict load from `path`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(config) => config,
            Err(ConfigError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                warn!(
                    "Felling config not found at {}. Using defaults",
                    path.display()
                );
                FellingConfig::default()
            }
            Err(err) => {
                warn!("{err}. Using defaults");
                FellingConfig::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.damage_per_block.is_finite() && self.damage_per_block > 0.0) {
            return Err(ConfigError::DamagePerBlock(self.damage_per_block));
        }
        if self.axe_materials.is_empty() {
            return Err(ConfigError::NoEligibleTools);
        }
        Ok(())
    }

    /// Whether `item` is an axe allowed to fell trees.
    pub fn is_eligible_tool(&self, item: &ItemStack) -> bool {
        item.axe_material()
            .is_some_and(|material| self.axe_materials.contains(&material))
    }
}
