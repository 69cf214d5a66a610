//! Simulated keypad for host tests and demos.
//!
//! [`SimulatedKeypad`] holds the physical state of the keys. [`SimulatedLines`] borrows it and
//! implements [`KeypadLines`]: a column reads as active only while the row of a held key is the
//! one asserted, like a real passive matrix. The simulated keypad also records how the scanner
//! drives the rows, so that tests can check that no two rows are ever asserted together.

use core::cell::Cell;

use crate::lines::KeypadLines;

/// Physical state of a `ROW` x `COL` keypad
pub struct SimulatedKeypad<const ROW: usize, const COL: usize> {
    held: [[Cell<bool>; COL]; ROW],
    asserted: [Cell<bool>; ROW],
    row_assertions: [Cell<u32>; ROW],
    max_asserted: Cell<usize>,
    samples: Cell<u32>,
}

impl<const ROW: usize, const COL: usize> Default for SimulatedKeypad<ROW, COL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROW: usize, const COL: usize> SimulatedKeypad<ROW, COL> {
    pub fn new() -> Self {
        Self {
            held: core::array::from_fn(|_| core::array::from_fn(|_| Cell::new(false))),
            asserted: core::array::from_fn(|_| Cell::new(false)),
            row_assertions: core::array::from_fn(|_| Cell::new(0)),
            max_asserted: Cell::new(0),
            samples: Cell::new(0),
        }
    }

    /// Lines for the scanner, reading this keypad
    pub fn lines(&self) -> SimulatedLines<'_, ROW, COL> {
        SimulatedLines { keypad: self }
    }

    pub fn press(&self, row: usize, col: usize) {
        self.held[row][col].set(true);
    }

    pub fn release(&self, row: usize, col: usize) {
        self.held[row][col].set(false);
    }

    pub fn release_all(&self) {
        self.held.iter().flatten().for_each(|k| k.set(false));
    }

    pub fn is_held(&self, row: usize, col: usize) -> bool {
        self.held[row][col].get()
    }

    /// Whether row `row` is currently asserted
    pub fn is_asserted(&self, row: usize) -> bool {
        self.asserted[row].get()
    }

    /// Number of rows currently asserted
    pub fn asserted_rows(&self) -> usize {
        self.asserted.iter().filter(|r| r.get()).count()
    }

    /// How many times row `row` went from idle to asserted
    pub fn row_assertions(&self, row: usize) -> u32 {
        self.row_assertions[row].get()
    }

    /// Largest number of rows that were asserted together at any point
    pub fn max_asserted_rows(&self) -> usize {
        self.max_asserted.get()
    }

    /// Number of column reads so far
    pub fn samples(&self) -> u32 {
        self.samples.get()
    }
}

/// [`KeypadLines`] over a [`SimulatedKeypad`]
pub struct SimulatedLines<'a, const ROW: usize, const COL: usize> {
    keypad: &'a SimulatedKeypad<ROW, COL>,
}

impl<const ROW: usize, const COL: usize> KeypadLines<ROW, COL> for SimulatedLines<'_, ROW, COL> {
    fn assert_row(&mut self, row: usize) {
        let Some(line) = self.keypad.asserted.get(row) else {
            return;
        };
        if !line.replace(true) {
            let count = &self.keypad.row_assertions[row];
            count.set(count.get() + 1);
        }
        let asserted = self.keypad.asserted_rows();
        if asserted > self.keypad.max_asserted.get() {
            self.keypad.max_asserted.set(asserted);
        }
    }

    fn deassert_row(&mut self, row: usize) {
        if let Some(line) = self.keypad.asserted.get(row) {
            line.set(false);
        }
    }

    fn read_col(&mut self, col: usize) -> bool {
        if col >= COL {
            return false;
        }
        self.keypad.samples.set(self.keypad.samples.get() + 1);
        (0..ROW).any(|row| self.keypad.asserted[row].get() && self.keypad.held[row][col].get())
    }
}
