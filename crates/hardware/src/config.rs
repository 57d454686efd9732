//! Configuration system for the simulator.
//!
//! This module defines the configuration structures used to parameterize a run:
//! 1. **Defaults:** Baseline constants (load address, memory sizing).
//! 2. **Structures:** General run settings and memory sizing.
//!
//! Configuration is supplied as JSON by a front end, or built with `Config::default()`.
//! Every field is optional in JSON; missing fields take their default.

use serde::Deserialize;

use crate::common::Result;

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants::DEFAULT_BASE_ADDRESS;

    /// Program load address and default start PC.
    pub const BASE_ADDRESS: u32 = DEFAULT_BASE_ADDRESS;

    /// Memory allocated (and zero filled) on construction (4 KiB).
    pub const INITIAL_BYTES: u32 = 4096;

    /// Upper bound memory may grow to on stores (16 MiB).
    pub const MAX_BYTES: u32 = 16 * 1024 * 1024;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use mipsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_pipeline": true, "max_cycles": 10000 },
///     "memory": { "initial_bytes": 8192 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_pipeline);
/// assert_eq!(config.general.base_address, 0x1000);
/// assert_eq!(config.general.max_cycles, Some(10000));
/// assert_eq!(config.memory.initial_bytes, 8192);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General simulation settings
    pub general: GeneralConfig,
    /// Memory sizing
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the text is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Address the program image is loaded at, and the default start PC.
    pub base_address: u32,

    /// Emit the per-cycle pipeline snapshot at `info` level instead of `trace`.
    pub trace_pipeline: bool,

    /// Abort a run that takes more cycles than this.
    pub max_cycles: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            base_address: defaults::BASE_ADDRESS,
            trace_pipeline: false,
            max_cycles: None,
        }
    }
}

/// Flat memory sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Bytes allocated and zero filled on construction.
    pub initial_bytes: u32,
    /// Stores beyond this many bytes fault instead of growing memory.
    pub max_bytes: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            initial_bytes: defaults::INITIAL_BYTES,
            max_bytes: defaults::MAX_BYTES,
        }
    }
}
