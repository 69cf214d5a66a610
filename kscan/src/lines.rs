//! Row and column lines of the keypad matrix.
//!
//! The scanner only ever talks to the hardware through [`KeypadLines`]: it asserts one row,
//! reads the columns, and deasserts the row again. [`PinLines`] implements it on top of
//! `embedded-hal` pins, [`crate::sim::SimulatedLines`] on top of a simulated keypad.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::driver::gpio::{InputSense, OutputController};

/// Row outputs and column inputs of a `ROW` x `COL` matrix.
///
/// The scanner asserts at most one row at a time, and samples the columns only while that row
/// is asserted. Implementations have no side effects beyond the line levels. A line that can't
/// be driven or read is a construction-time problem: per-call failures read as "not pressed".
pub trait KeypadLines<const ROW: usize, const COL: usize> {
    /// Drive row `row` to its active level
    fn assert_row(&mut self, row: usize);

    /// Return row `row` to its idle level
    fn deassert_row(&mut self, row: usize);

    /// Whether column `col` is at its active level, i.e. the key at the crossing of the
    /// asserted row and `col` is closed
    fn read_col(&mut self, col: usize) -> bool;

    /// Return every row to its idle level
    fn deassert_all(&mut self) {
        for row in 0..ROW {
            self.deassert_row(row);
        }
    }
}

/// Keypad lines backed by `embedded-hal` pins.
///
/// Rows are outputs, columns are inputs. With `low_active`, rows are driven low when asserted and
/// a closed key pulls its column low (pull-up inputs); otherwise rows are driven high and closed
/// keys read high (pull-down inputs).
pub struct PinLines<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> {
    rows: [OutputController<Out>; ROW],
    cols: [InputSense<In>; COL],
}

impl<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> PinLines<In, Out, ROW, COL> {
    /// Take ownership of the row and column pins, leaving every row deasserted.
    pub fn new(row_pins: [Out; ROW], col_pins: [In; COL], low_active: bool) -> Self {
        let mut lines = Self {
            rows: row_pins.map(|pin| OutputController::new(pin, low_active)),
            cols: col_pins.map(|pin| InputSense::new(pin, low_active)),
        };
        lines.deassert_all();
        lines
    }

    /// Give the pins back
    pub fn release(self) -> ([Out; ROW], [In; COL]) {
        (
            self.rows.map(OutputController::into_inner),
            self.cols.map(InputSense::into_inner),
        )
    }
}

impl<In: InputPin, Out: OutputPin, const ROW: usize, const COL: usize> KeypadLines<ROW, COL>
    for PinLines<In, Out, ROW, COL>
{
    fn assert_row(&mut self, row: usize) {
        if let Some(pin) = self.rows.get_mut(row) {
            pin.activate();
        }
    }

    fn deassert_row(&mut self, row: usize) {
        if let Some(pin) = self.rows.get_mut(row) {
            pin.deactivate();
        }
    }

    fn read_col(&mut self, col: usize) -> bool {
        self.cols.get_mut(col).is_some_and(|pin| pin.is_active())
    }
}
