//! Runtime configuration of the keypad scanner.
//!
//! The matrix geometry is fixed at compile time by the `ROW`/`COL` const generics of the
//! scanner, everything else lives in [`KeypadConfig`] and is validated against that
//! geometry before scanning starts.

use core::num::NonZeroU16;

use embassy_time::Duration;

use crate::error::KeypadError;

/// Short symbols of the reference 4x4 membrane keypad, row-major.
#[rustfmt::skip]
pub const DEFAULT_SHORT_SYMBOLS: [char; 16] = [
    '1', '2', '3', 'A',
    '4', '5', '6', 'B',
    '7', '8', '9', 'C',
    '*', '0', '#', 'D',
];

/// Long-press symbols of the reference 4x4 keypad.
///
/// Letter keys map to their lower case, the others take the next free letter from `m`.
#[rustfmt::skip]
pub const DEFAULT_LONG_SYMBOLS: [char; 16] = [
    'm', 'n', 'o', 'a',
    'p', 'q', 'r', 'b',
    's', 't', 'u', 'c',
    'v', 'w', 'x', 'd',
];

/// Default number of held samples before a key press turns into a long press
pub const DEFAULT_LONG_KEYPRESS_COUNT: u16 = 20;

/// Default periodic tick rate of the interrupt scanner
pub const DEFAULT_TICK_HZ: u32 = 100;

/// Default duration of one full cooperative scan cycle, shared by all rows
pub const DEFAULT_CYCLE_BUDGET_MS: u64 = 40;

/// Tunable configuration of a keypad scanner.
#[derive(Clone, Copy, Debug)]
pub struct KeypadConfig<'a> {
    /// Symbol emitted on a short press, indexed by key code
    pub short_symbols: &'a [char],
    /// Symbol emitted on a long press, indexed by key code.
    ///
    /// May be empty when long press is disabled.
    pub long_symbols: &'a [char],
    /// Held samples before a long press, `None` disables long press
    pub long_keypress_count: Option<u16>,
    /// Capacity of the event channel, 0 selects the single-slot overwrite channel
    pub channel_capacity: usize,
    /// Tick rate of the interrupt scanner
    pub tick_hz: u32,
    /// Duration of one full cooperative scan cycle
    pub cycle_budget_ms: u64,
    /// Rows are driven low and closed keys read low
    pub low_active: bool,
}

impl Default for KeypadConfig<'static> {
    fn default() -> Self {
        Self {
            short_symbols: &DEFAULT_SHORT_SYMBOLS,
            long_symbols: &DEFAULT_LONG_SYMBOLS,
            long_keypress_count: Some(DEFAULT_LONG_KEYPRESS_COUNT),
            channel_capacity: 0,
            tick_hz: DEFAULT_TICK_HZ,
            cycle_budget_ms: DEFAULT_CYCLE_BUDGET_MS,
            low_active: false,
        }
    }
}

impl KeypadConfig<'_> {
    /// Check the configuration against a `ROW` x `COL` matrix.
    pub fn validate<const ROW: usize, const COL: usize>(&self) -> Result<(), KeypadError> {
        if ROW == 0 || COL == 0 {
            return Err(KeypadError::EmptyMatrix);
        }
        let keys = ROW * COL;
        if keys > u16::MAX as usize {
            return Err(KeypadError::TooManyKeys(keys));
        }
        if self.short_symbols.len() != keys {
            return Err(KeypadError::ShortSymbolCount {
                expected: keys,
                actual: self.short_symbols.len(),
            });
        }
        match self.long_keypress_count {
            Some(0) => return Err(KeypadError::ZeroLongPressThreshold),
            Some(_) if self.long_symbols.len() != keys => {
                return Err(KeypadError::LongSymbolCount {
                    expected: keys,
                    actual: self.long_symbols.len(),
                });
            }
            // Long symbols are never looked up without a threshold, but a table that's
            // there must still cover every key.
            None if !self.long_symbols.is_empty() && self.long_symbols.len() != keys => {
                return Err(KeypadError::LongSymbolCount {
                    expected: keys,
                    actual: self.long_symbols.len(),
                });
            }
            _ => {}
        }
        if self.tick_hz == 0 {
            return Err(KeypadError::ZeroTickRate);
        }
        if self.cycle_budget_ms == 0 {
            return Err(KeypadError::ZeroCycleBudget);
        }
        Ok(())
    }

    pub fn long_press_threshold(&self) -> Option<NonZeroU16> {
        self.long_keypress_count.and_then(NonZeroU16::new)
    }

    /// Settle delay of a single row, so that a full cycle always takes `cycle_budget_ms`
    pub fn row_settle_time<const ROW: usize>(&self) -> Duration {
        Duration::from_millis(self.cycle_budget_ms) / ROW.max(1) as u32
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_hz(self.tick_hz.max(1) as u64)
    }
}
