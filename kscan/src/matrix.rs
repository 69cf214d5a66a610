//! Matrix scanning.
//!
//! [`ScanEngine`] owns the keypad lines and the key state table, and knows how to scan a single
//! row. It has no notion of time: the two adapters built on top of it decide when rows are
//! scanned.
//!
//! - [`InterruptScanner`] advances one row per periodic tick and publishes through the
//!   overwrite channel, so the tick can run in interrupt context.
//! - [`CooperativeScanner`] scans every row in turn, waiting between rows so that one full
//!   cycle takes the configured budget, and yields to other tasks while it waits.

use heapless::Vec;

pub use cooperative::CooperativeScanner;
pub use interrupt_step::InterruptScanner;

use crate::config::KeypadConfig;
use crate::debounce::KeyStateTable;
use crate::error::KeypadError;
use crate::event::KeyEvent;
use crate::lines::KeypadLines;

pub mod cooperative;
pub mod interrupt_step;

/// Scan state of a `ROW` x `COL` keypad.
pub struct ScanEngine<L: KeypadLines<ROW, COL>, const ROW: usize, const COL: usize> {
    lines: L,
    keys: KeyStateTable<ROW, COL>,
}

impl<L: KeypadLines<ROW, COL>, const ROW: usize, const COL: usize> ScanEngine<L, ROW, COL> {
    /// Validate `config` and take the lines over, with every row deasserted.
    pub fn new(mut lines: L, config: &KeypadConfig<'_>) -> Result<Self, KeypadError> {
        let keys = KeyStateTable::new(config)?;
        lines.deassert_all();
        Ok(Self { lines, keys })
    }

    pub fn assert_row(&mut self, row: usize) {
        self.lines.assert_row(row);
    }

    pub fn deassert_row(&mut self, row: usize) {
        self.lines.deassert_row(row);
    }

    /// Sample every column of `row`, which must be asserted, and collect the events it produces.
    pub fn scan_row(&mut self, row: usize) -> Vec<KeyEvent, COL> {
        let mut events = Vec::new();
        for col in 0..COL {
            let pressed = self.lines.read_col(col);
            if let Some(event) = self.keys.update(row, col, pressed) {
                // At most one event per column
                events.push(event).ok();
            }
        }
        events
    }

    /// Deassert every row
    pub fn release_lines(&mut self) {
        self.lines.deassert_all();
    }

    /// Forget every key press in progress
    pub fn reset_keys(&mut self) {
        self.keys.reset();
    }

    pub fn keys(&self) -> &KeyStateTable<ROW, COL> {
        &self.keys
    }

    /// Give the lines back
    pub fn into_lines(mut self) -> L {
        self.lines.deassert_all();
        self.lines
    }
}
