//! Loader of `keypad.toml`, the file describing a keypad and how to scan it.
//!
//! ```toml
//! [matrix]
//! rows = ["PD1", "PD3", "PD5", "PD7"]
//! cols = ["PD9", "PD11", "PD13", "PD15"]
//! low_active = false
//!
//! [symbols]
//! short = ["1", "2", "3", "A", ...]
//! long = ["m", "n", "o", "a", ...]
//!
//! [scan]
//! long_keypress_count = 20  # 0 disables long press
//! channel_capacity = 0      # 0 is the single-slot overwrite channel
//! tick_hz = 100
//! cycle_budget_ms = 40
//! ```
//!
//! Every key is optional, the defaults describe the reference 4x4 keypad.

use std::path::Path;

use kscan::config::KeypadConfig;
use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

pub mod default_config;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::validate_config;

/// Configurations of a keypad.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeypadTomlConfig {
    /// Row and column lines
    pub matrix: MatrixConfig,
    /// Decoded symbols
    pub symbols: SymbolConfig,
    /// Scan timings and event channel
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Matrix wiring, lines are named after their pins
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixConfig {
    pub rows: Vec<String>,
    pub cols: Vec<String>,
    /// Rows are driven low and closed keys read low
    #[serde(default)]
    pub low_active: bool,
}

/// Symbol tables, row-major, one single-character string per key
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolConfig {
    pub short: Vec<String>,
    #[serde(default)]
    pub long: Vec<String>,
}

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Held samples before a long press, 0 disables long press
    #[serde_inline_default(defaults::LONG_KEYPRESS_COUNT)]
    pub long_keypress_count: u16,
    /// Event channel capacity, 0 selects the overwrite channel
    #[serde_inline_default(defaults::CHANNEL_CAPACITY)]
    pub channel_capacity: usize,
    /// Tick rate of the interrupt scanner
    #[serde_inline_default(defaults::TICK_HZ)]
    pub tick_hz: u32,
    /// Duration of a full cooperative scan cycle
    #[serde_inline_default(defaults::CYCLE_BUDGET_MS)]
    pub cycle_budget_ms: u64,
}

/// This separate Default impl is needed when `[scan]` section is not set in keypad.toml
impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            long_keypress_count: defaults::LONG_KEYPRESS_COUNT,
            channel_capacity: defaults::CHANNEL_CAPACITY,
            tick_hz: defaults::TICK_HZ,
            cycle_budget_ms: defaults::CYCLE_BUDGET_MS,
        }
    }
}

/// Decoded symbol tables, borrowed by [`KeypadConfig`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolTables {
    pub short: Vec<char>,
    pub long: Vec<char>,
}

impl KeypadTomlConfig {
    /// Load and validate `keypad.toml`, see [`ConfigLoader::load`]
    pub fn new_from_toml_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        ConfigLoader::load(path)
    }

    /// Load and validate a configuration from TOML text
    pub fn new_from_toml_str(content: &str) -> ConfigResult<Self> {
        ConfigLoader::load_str(content)
    }

    pub fn key_count(&self) -> usize {
        self.matrix.rows.len() * self.matrix.cols.len()
    }

    /// Check that the file describes a `ROW` x `COL` matrix
    pub fn check_geometry<const ROW: usize, const COL: usize>(&self) -> ConfigResult<()> {
        let (rows, cols) = (self.matrix.rows.len(), self.matrix.cols.len());
        if (rows, cols) != (ROW, COL) {
            return Err(ConfigError::InvalidValue {
                field: "matrix".to_string(),
                value: format!("{}x{}", rows, cols),
                expected: format!("{}x{}", ROW, COL),
            });
        }
        Ok(())
    }

    /// Decode the symbol strings. The long table is left empty when long press is disabled.
    pub fn symbol_tables(&self) -> SymbolTables {
        let decode = |symbols: &[String]| -> Vec<char> { symbols.iter().filter_map(|s| s.chars().next()).collect() };
        SymbolTables {
            short: decode(&self.symbols.short),
            long: if self.scan.long_keypress_count > 0 {
                decode(&self.symbols.long)
            } else {
                Vec::new()
            },
        }
    }

    /// The core scanner configuration, borrowing `tables`
    pub fn to_keypad_config<'a>(&self, tables: &'a SymbolTables) -> KeypadConfig<'a> {
        KeypadConfig {
            short_symbols: &tables.short,
            long_symbols: &tables.long,
            long_keypress_count: (self.scan.long_keypress_count > 0).then_some(self.scan.long_keypress_count),
            channel_capacity: self.scan.channel_capacity,
            tick_hz: self.scan.tick_hz,
            cycle_budget_ms: self.scan.cycle_budget_ms,
            low_active: self.matrix.low_active,
        }
    }
}
