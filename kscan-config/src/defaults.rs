//! Centralized default values of the keypad configuration
//!
//! Scan timings come from the core crate, so that a `keypad.toml` without a `[scan]` section
//! behaves exactly like `KeypadConfig::default()`.

use kscan::config;

/// Default number of held samples before a long press, 0 disables long press
pub const LONG_KEYPRESS_COUNT: u16 = config::DEFAULT_LONG_KEYPRESS_COUNT;

/// Default event channel capacity, 0 is the single-slot overwrite channel
pub const CHANNEL_CAPACITY: usize = 0;

/// Default tick rate of the interrupt scanner
pub const TICK_HZ: u32 = config::DEFAULT_TICK_HZ;

/// Default duration of a full cooperative scan cycle
pub const CYCLE_BUDGET_MS: u64 = config::DEFAULT_CYCLE_BUDGET_MS;

/// Prefix of the environment variables overriding the file, e.g. `KSCAN_SCAN__TICK_HZ`
pub const ENV_PREFIX: &str = "KSCAN";

/// Separator between the nested keys of an environment override
pub const ENV_SEPARATOR: &str = "__";

/// Sections of `keypad.toml` that environment variables may override
pub const ENV_SECTIONS: [&str; 3] = ["MATRIX", "SYMBOLS", "SCAN"];
