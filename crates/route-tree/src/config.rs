//! Editor configuration
//!
//! Loaded from a JSON file by the host; every field has a default so a
//! missing file or a partial file both work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::undo::DEFAULT_SNAPSHOT_LEVEL;

/// Which slot a "nest" move lands in when a kind has several
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "slot", rename_all = "snake_case")]
pub enum NestSlotRule {
    /// First multi-valued slot in declaration order
    #[default]
    FirstMulti,
    /// This slot if the kind has it as a multi-valued slot, else first multi-valued
    Named(String),
}

/// Settings for an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Kind used when paste has to wrap an entry node in a new flow
    pub flow_kind: String,
    /// Number of undo snapshots to keep
    pub undo_depth: usize,
    /// zstd level for undo snapshots
    pub snapshot_level: i32,
    /// Target slot rule for nest moves
    pub nest_slot: NestSlotRule,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            flow_kind: "route".to_string(),
            undo_depth: 100,
            snapshot_level: DEFAULT_SNAPSHOT_LEVEL,
            nest_slot: NestSlotRule::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: EditorConfig = serde_json::from_str(json)?;
        config.undo_depth = config.undo_depth.max(1);
        Ok(config)
    }

    /// Load configuration from disk, falling back to defaults if the file is missing
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No editor config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded editor config from {:?}", path);
        Ok(config)
    }
}
