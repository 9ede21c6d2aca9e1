// Mon Oct 19 2026 - Alex

use crate::error::{HotplugError, Result};
use crate::field_path::FieldPath;
use crate::quantity::Quantity;
use crate::validation::MEMORY_HOTPLUG_BLOCK_ALIGNMENT_BYTES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU64;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub block_alignment_bytes: u64,
    pub field_root: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            block_alignment_bytes: MEMORY_HOTPLUG_BLOCK_ALIGNMENT_BYTES,
            field_root: FieldPath::template_spec().segments().to_vec(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_block_alignment(mut self, bytes: u64) -> Self {
        self.block_alignment_bytes = bytes;
        self
    }

    /// Overrides the block size from a quantity string such as `"2Mi"`.
    pub fn with_block_alignment_quantity(self, raw: &str) -> Result<Self> {
        let quantity = Quantity::parse(raw)?;
        let bytes = u64::try_from(quantity.value()).map_err(|_| {
            HotplugError::InvalidConfig(format!("block alignment too large: {}", raw))
        })?;
        let config = self.with_block_alignment(bytes);
        config.validate()?;
        Ok(config)
    }

    pub fn with_field_root(mut self, root: &[&str]) -> Self {
        self.field_root = root.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.block_alignment()?;
        self.root_path()?;
        Ok(())
    }

    /// Hotplug blocks are page-granular, so the size must be a power of two.
    pub fn block_alignment(&self) -> Result<NonZeroU64> {
        match NonZeroU64::new(self.block_alignment_bytes) {
            Some(bytes) if bytes.is_power_of_two() => Ok(bytes),
            _ => Err(HotplugError::InvalidConfig(format!(
                "block_alignment_bytes must be a non-zero power of two, got {}",
                self.block_alignment_bytes
            ))),
        }
    }

    pub fn root_path(&self) -> Result<FieldPath> {
        FieldPath::from_segments(self.field_root.iter().cloned()).ok_or_else(|| {
            HotplugError::InvalidConfig("field_root must contain non-empty segments".to_string())
        })
    }
}
