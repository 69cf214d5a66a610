//! Centralized validation of the keypad configuration
//!
//! Checks run in file order: `[matrix]`, then `[symbols]`, then `[scan]`. The first problem found
//! is reported.

use std::collections::HashSet;

use crate::KeypadTomlConfig;
use crate::error::{ConfigError, ConfigResult};

/// Validates the entire keypad configuration
pub fn validate_config(config: &KeypadTomlConfig) -> ConfigResult<()> {
    validate_matrix_section(config)?;
    validate_symbols_section(config)?;
    validate_scan_section(config)?;
    Ok(())
}

/// Validates the [matrix] section
fn validate_matrix_section(config: &KeypadTomlConfig) -> ConfigResult<()> {
    let matrix = &config.matrix;
    if matrix.rows.is_empty() {
        return Err(ConfigError::Validation {
            field: "matrix.rows".to_string(),
            message: "at least one row pin is required".to_string(),
        });
    }
    if matrix.cols.is_empty() {
        return Err(ConfigError::Validation {
            field: "matrix.cols".to_string(),
            message: "at least one column pin is required".to_string(),
        });
    }

    // A pin drives one line only
    let mut seen = HashSet::new();
    for (field, pin) in matrix
        .rows
        .iter()
        .map(|p| ("matrix.rows", p))
        .chain(matrix.cols.iter().map(|p| ("matrix.cols", p)))
    {
        if !is_pin_name(pin) {
            return Err(ConfigError::InvalidPin {
                field: field.to_string(),
                pin: pin.clone(),
            });
        }
        if !seen.insert(pin.as_str()) {
            return Err(ConfigError::Validation {
                field: field.to_string(),
                message: format!("pin {} is used more than once", pin),
            });
        }
    }

    let keys = config.key_count();
    if keys > u16::MAX as usize {
        return Err(ConfigError::InvalidValue {
            field: "matrix".to_string(),
            value: format!("{}x{}", matrix.rows.len(), matrix.cols.len()),
            expected: format!("at most {} keys", u16::MAX),
        });
    }
    Ok(())
}

/// Pin names are used as identifiers by board code, e.g. `PD1` or `GPIO_12`
fn is_pin_name(pin: &str) -> bool {
    !pin.is_empty() && pin.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validates the [symbols] section
fn validate_symbols_section(config: &KeypadTomlConfig) -> ConfigResult<()> {
    let keys = config.key_count();
    validate_symbol_table("symbols.short", &config.symbols.short, keys)?;
    // The long table is only used with long press enabled
    if config.scan.long_keypress_count > 0 {
        validate_symbol_table("symbols.long", &config.symbols.long, keys)?;
    }
    Ok(())
}

fn validate_symbol_table(field: &str, symbols: &[String], keys: usize) -> ConfigResult<()> {
    if symbols.len() != keys {
        return Err(ConfigError::Validation {
            field: field.to_string(),
            message: format!("expected {} symbols (one per key), got {}", keys, symbols.len()),
        });
    }
    if let Some((i, symbol)) = symbols.iter().enumerate().find(|(_, s)| s.chars().count() != 1) {
        return Err(ConfigError::InvalidValue {
            field: format!("{}[{}]", field, i),
            value: symbol.clone(),
            expected: "a single character".to_string(),
        });
    }
    Ok(())
}

/// Validates the [scan] section
fn validate_scan_section(config: &KeypadTomlConfig) -> ConfigResult<()> {
    let scan = &config.scan;
    if scan.tick_hz == 0 {
        return Err(ConfigError::InvalidValue {
            field: "scan.tick_hz".to_string(),
            value: scan.tick_hz.to_string(),
            expected: "at least 1".to_string(),
        });
    }

    let rows = config.matrix.rows.len() as u64;
    if scan.cycle_budget_ms < rows.max(1) {
        return Err(ConfigError::InvalidValue {
            field: "scan.cycle_budget_ms".to_string(),
            value: scan.cycle_budget_ms.to_string(),
            expected: format!("at least 1 ms per row ({} rows)", rows),
        });
    }
    Ok(())
}
