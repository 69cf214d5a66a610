use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_time::{Duration, Timer};

use super::ScanEngine;
use crate::channel::EventChannel;
use crate::config::KeypadConfig;
use crate::debounce::KeyState;
use crate::error::KeypadError;
use crate::lines::KeypadLines;

/// Scanner task for an async executor.
///
/// Every scan cycle walks the rows in order. Each row is asserted, left to settle for its share
/// of the cycle budget, sampled, and deasserted again, so a full cycle lasts the configured budget
/// whatever the number of rows. Events are published with [`EventChannel::put`]: with a FIFO
/// channel, a full queue holds the scanner until the consumer catches up.
///
/// Scanning and control both go through `&self`, so [`CooperativeScanner::stop`] can be called by
/// another task while [`CooperativeScanner::run`] is in progress. Stopping takes effect at the end
/// of the cycle in flight.
pub struct CooperativeScanner<'a, L: KeypadLines<ROW, COL>, C: EventChannel, const ROW: usize, const COL: usize> {
    engine: RefCell<ScanEngine<L, ROW, COL>>,
    channel: &'a C,
    running: AtomicBool,
    rearm: AtomicBool,
    row_settle: Duration,
}

impl<'a, L: KeypadLines<ROW, COL>, C: EventChannel, const ROW: usize, const COL: usize>
    CooperativeScanner<'a, L, C, ROW, COL>
{
    /// Create a stopped scanner publishing to `channel`, whose capacity must be the configured one.
    pub fn new(lines: L, channel: &'a C, config: &KeypadConfig<'_>) -> Result<Self, KeypadError> {
        if C::CAPACITY != config.channel_capacity {
            return Err(KeypadError::ChannelCapacityMismatch {
                configured: config.channel_capacity,
                actual: C::CAPACITY,
            });
        }
        let engine = ScanEngine::new(lines, config)?;
        let row_settle = config.row_settle_time::<ROW>();
        info!(
            "Cooperative scanner for {}x{} keypad, {} ms per cycle, channel capacity {}",
            ROW, COL, config.cycle_budget_ms, C::CAPACITY
        );
        Ok(Self {
            engine: RefCell::new(engine),
            channel,
            running: AtomicBool::new(false),
            rearm: AtomicBool::new(false),
            row_settle,
        })
    }

    /// Arm scanning. [`CooperativeScanner::run`] returns right away on a stopped scanner.
    pub fn start(&self) {
        if !self.running.load(Ordering::Acquire) {
            self.rearm.store(true, Ordering::Release);
            self.running.store(true, Ordering::Release);
            info!("Keypad scanning started");
        }
    }

    /// Ask [`CooperativeScanner::run`] to return once the current cycle completes
    pub fn stop(&self) {
        if self.running.load(Ordering::Acquire) {
            self.running.store(false, Ordering::Release);
            info!("Keypad scanning stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Scan the keypad cycle after cycle until stopped.
    pub async fn run(&self) {
        while self.running.load(Ordering::Acquire) {
            if self.rearm.load(Ordering::Acquire) {
                self.rearm.store(false, Ordering::Release);
                self.engine.borrow_mut().reset_keys();
            }
            self.scan_cycle().await;
        }
        self.engine.borrow_mut().release_lines();
    }

    /// One pass over every row of the matrix.
    pub async fn scan_cycle(&self) {
        for row in 0..ROW {
            self.engine.borrow_mut().assert_row(row);
            Timer::after(self.row_settle).await;

            let events = self.engine.borrow_mut().scan_row(row);
            for event in events {
                self.channel.put(event).await;
            }

            self.engine.borrow_mut().deassert_row(row);
        }
    }

    /// Per-row settle delay, `cycle_budget_ms / ROW`
    pub fn row_settle_time(&self) -> Duration {
        self.row_settle
    }

    pub fn key_state(&self, row: usize, col: usize) -> KeyState {
        self.engine.borrow().keys().state(row, col)
    }

    pub fn channel(&self) -> &'a C {
        self.channel
    }
}
