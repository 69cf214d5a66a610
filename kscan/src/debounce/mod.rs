//! Per-key press decoding.
//!
//! Each key runs the small state machine in [`Key::sample`]: a press is reported when the key
//! is released, unless it was held long enough to be reported as a long press while still down.
//! The [`KeyStateTable`] holds one [`Key`] per matrix position, indexed by key code
//! (`row * COL + col`), in a fixed array so that it can be updated from an interrupt handler.

use core::num::NonZeroU16;

pub use long_press::{Key, KeyState};

use crate::config::KeypadConfig;
use crate::error::KeypadError;
use crate::event::{KeyEvent, PressKind};

pub mod long_press;

/// Key code of the key at `(row, col)` in a matrix with `cols` columns
pub const fn key_code(row: usize, col: usize, cols: usize) -> u16 {
    (row * cols + col) as u16
}

/// State of every key of a `ROW` x `COL` matrix
pub struct KeyStateTable<const ROW: usize, const COL: usize> {
    keys: [[Key; COL]; ROW],
    long_press_threshold: Option<NonZeroU16>,
}

impl<const ROW: usize, const COL: usize> KeyStateTable<ROW, COL> {
    /// Build the table from the symbol tables of `config`, every key starts released.
    pub fn new(config: &KeypadConfig<'_>) -> Result<Self, KeypadError> {
        config.validate::<ROW, COL>()?;

        let mut keys = [[Key::new(' ', ' '); COL]; ROW];
        for (row_idx, row) in keys.iter_mut().enumerate() {
            for (col_idx, key) in row.iter_mut().enumerate() {
                let code = row_idx * COL + col_idx;
                let short = config.short_symbols[code];
                // Without a long-press threshold the long symbol is never emitted
                let long = config.long_symbols.get(code).copied().unwrap_or(short);
                *key = Key::new(short, long);
            }
        }

        Ok(Self {
            keys,
            long_press_threshold: config.long_press_threshold(),
        })
    }

    /// Feed the sampled state of the key at `(row, col)`, returns the event to publish, if any.
    pub fn update(&mut self, row: usize, col: usize, pressed: bool) -> Option<KeyEvent> {
        let key = &mut self.keys[row][col];
        let kind = key.sample(pressed, self.long_press_threshold)?;
        let code = key_code(row, col, COL);
        let symbol = key.symbol(kind);
        if kind == PressKind::Long {
            debug!("Long press on key {}: {}", code, symbol);
        }
        Some(KeyEvent { key_code: code, symbol, kind })
    }

    /// Return every key to the released state without emitting anything
    pub fn reset(&mut self) {
        self.keys.iter_mut().flatten().for_each(Key::release);
    }

    pub fn state(&self, row: usize, col: usize) -> KeyState {
        self.keys[row][col].state()
    }

    /// Look a key up by its key code
    pub fn key(&self, key_code: u16) -> Option<&Key> {
        let code = key_code as usize;
        self.keys.get(code / COL)?.get(code % COL)
    }

    pub fn long_press_threshold(&self) -> Option<NonZeroU16> {
        self.long_press_threshold
    }

    /// Whether any key is currently held
    pub fn any_pressed(&self) -> bool {
        self.keys.iter().flatten().any(|k| k.state() != KeyState::Up)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::{DEFAULT_LONG_SYMBOLS, DEFAULT_SHORT_SYMBOLS};

    #[ctor::ctor]
    fn init_log() {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();
    }

    #[test]
    fn test_table_maps_symbols_row_major() {
        let table: KeyStateTable<4, 4> = KeyStateTable::new(&KeypadConfig::default()).unwrap();
        for code in 0..16u16 {
            let key = table.key(code).unwrap();
            assert_eq!(key.short_symbol(), DEFAULT_SHORT_SYMBOLS[code as usize]);
            assert_eq!(key.long_symbol(), DEFAULT_LONG_SYMBOLS[code as usize]);
            assert_eq!(key.state(), KeyState::Up);
        }
        assert!(table.key(16).is_none());
        assert_eq!(key_code(3, 2, 4), 14);
        assert_eq!(table.key(key_code(3, 2, 4)).unwrap().short_symbol(), '#');
    }

    #[test]
    fn test_update_produces_events_with_key_code() {
        let mut table: KeyStateTable<4, 4> = KeyStateTable::new(&KeypadConfig::default()).unwrap();
        assert_eq!(table.update(2, 1, true), None);
        assert_eq!(table.state(2, 1), KeyState::Down);
        assert!(table.any_pressed());
        assert_eq!(table.update(2, 1, false), Some(KeyEvent::short(9, '8')));
        assert!(!table.any_pressed());
    }

    #[test]
    fn test_long_press_uses_long_symbol() {
        let config = KeypadConfig {
            long_keypress_count: Some(2),
            ..Default::default()
        };
        let mut table: KeyStateTable<4, 4> = KeyStateTable::new(&config).unwrap();
        assert_eq!(table.update(0, 3, true), None);
        assert_eq!(table.update(0, 3, true), None);
        assert_eq!(table.update(0, 3, true), Some(KeyEvent::long(3, 'a')));
        assert_eq!(table.state(0, 3), KeyState::DownLong);
        assert_eq!(table.update(0, 3, false), None);
    }

    #[test]
    fn test_reset_releases_silently() {
        let mut table: KeyStateTable<4, 4> = KeyStateTable::new(&KeypadConfig::default()).unwrap();
        table.update(1, 1, true);
        table.update(1, 1, true);
        table.reset();
        assert_eq!(table.state(1, 1), KeyState::Up);
        assert_eq!(table.key(5).unwrap().assert_count(), 0);
        assert_eq!(table.update(1, 1, false), None);
    }

    #[test]
    fn test_misconfigured_table_is_rejected() {
        let config = KeypadConfig {
            short_symbols: &DEFAULT_SHORT_SYMBOLS[..15],
            ..Default::default()
        };
        assert!(matches!(
            KeyStateTable::<4, 4>::new(&config),
            Err(KeypadError::ShortSymbolCount { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_disabled_long_press_without_long_table() {
        let config = KeypadConfig {
            long_symbols: &[],
            long_keypress_count: None,
            ..Default::default()
        };
        let mut table: KeyStateTable<4, 4> = KeyStateTable::new(&config).unwrap();
        assert_eq!(table.long_press_threshold(), None);
        for _ in 0..100 {
            assert_eq!(table.update(3, 3, true), None);
        }
        assert_eq!(table.update(3, 3, false), Some(KeyEvent::short(15, 'D')));
    }
}
