use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::{Duration, Ticker};

use super::ScanEngine;
use crate::channel::{EventChannel, OverwriteChannel};
use crate::config::KeypadConfig;
use crate::error::KeypadError;
use crate::lines::KeypadLines;

/// Scanner driven by a periodic tick, one row per tick.
///
/// [`InterruptScanner::tick`] never blocks and never allocates, so it can be called straight from
/// a hardware timer interrupt. Every tick samples the row asserted by the previous tick, then
/// moves the assertion on to the next row: a full pass over the matrix takes `ROW` ticks. Events
/// are published to an [`OverwriteChannel`], a press the consumer hasn't picked up yet is
/// replaced by the next one.
///
/// The scanner is created stopped, call [`InterruptScanner::start`] to arm it.
pub struct InterruptScanner<'a, L: KeypadLines<ROW, COL>, const ROW: usize, const COL: usize> {
    engine: ScanEngine<L, ROW, COL>,
    channel: &'a OverwriteChannel,
    running: AtomicBool,
    /// Set by `start`, consumed by the next tick
    rearm: AtomicBool,
    /// Row asserted by the last tick
    row: usize,
    row_asserted: bool,
    tick_period: Duration,
}

impl<'a, L: KeypadLines<ROW, COL>, const ROW: usize, const COL: usize> InterruptScanner<'a, L, ROW, COL> {
    /// Create a stopped scanner.
    ///
    /// The configuration must select the overwrite channel (capacity 0).
    pub fn new(lines: L, channel: &'a OverwriteChannel, config: &KeypadConfig<'_>) -> Result<Self, KeypadError> {
        if config.channel_capacity != <OverwriteChannel as EventChannel>::CAPACITY {
            return Err(KeypadError::OverwriteChannelRequired);
        }
        let engine = ScanEngine::new(lines, config)?;
        info!(
            "Interrupt scanner for {}x{} keypad, {} Hz, long press after {:?} samples",
            ROW, COL, config.tick_hz, config.long_keypress_count
        );
        Ok(Self {
            engine,
            channel,
            running: AtomicBool::new(false),
            rearm: AtomicBool::new(false),
            row: 0,
            row_asserted: false,
            tick_period: config.tick_period(),
        })
    }

    /// Arm scanning, it begins on the next tick with every key released.
    pub fn start(&self) {
        if !self.running.load(Ordering::Acquire) {
            self.rearm.store(true, Ordering::Release);
            self.running.store(true, Ordering::Release);
            info!("Keypad scanning started");
        }
    }

    /// Disarm scanning. The next tick releases the asserted row, events already published stay
    /// in the channel.
    pub fn stop(&self) {
        if self.running.load(Ordering::Acquire) {
            self.running.store(false, Ordering::Release);
            info!("Keypad scanning stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// One periodic step of the scanner.
    pub fn tick(&mut self) {
        if !self.running.load(Ordering::Acquire) {
            if self.row_asserted {
                self.engine.deassert_row(self.row);
                self.row_asserted = false;
            }
            return;
        }

        if self.rearm.load(Ordering::Acquire) || !self.row_asserted {
            // First tick after (re)arming: start over from row 0, nothing has been sampled yet
            self.rearm.store(false, Ordering::Release);
            if self.row_asserted {
                self.engine.deassert_row(self.row);
            }
            self.engine.reset_keys();
            self.row = 0;
            self.engine.assert_row(self.row);
            self.row_asserted = true;
            return;
        }

        for event in self.engine.scan_row(self.row) {
            self.channel.put_now(event);
        }
        self.engine.deassert_row(self.row);
        self.row = (self.row + 1) % ROW;
        self.engine.assert_row(self.row);
    }

    /// Call [`InterruptScanner::tick`] at the configured tick rate, for targets where an async
    /// executor stands in for the timer interrupt.
    pub async fn run(&mut self) -> ! {
        let mut ticker = Ticker::every(self.tick_period);
        loop {
            ticker.next().await;
            self.tick();
        }
    }

    /// Row asserted by the last tick, if any
    pub fn asserted_row(&self) -> Option<usize> {
        self.row_asserted.then_some(self.row)
    }

    pub fn engine(&self) -> &ScanEngine<L, ROW, COL> {
        &self.engine
    }

    pub fn channel(&self) -> &'a OverwriteChannel {
        self.channel
    }
}
