use core::future::Future;
use core::pin::pin;
use core::task::{Context, Poll};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Wake, Waker};

use embassy_time::{Duration, MockDriver};
use kscan::config::{DEFAULT_LONG_SYMBOLS, DEFAULT_SHORT_SYMBOLS};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Simulated time step between polls of a pending test future
pub const TIME_STEP: Duration = Duration::from_millis(1);

/// Give up after this much simulated time
const MAX_TEST_TIME: Duration = Duration::from_secs(600);

/// Polls without a wakeup in between before the clock moves on anyway
const MAX_POLLS_PER_STEP: usize = 1000;

// The mock clock is global, tests using it run one at a time
static MOCK_CLOCK: Mutex<()> = Mutex::new(());

struct WakeFlag(AtomicBool);

impl Wake for WakeFlag {
    fn wake(self: Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Run `fut` to completion on the `embassy-time` mock clock, starting at time zero.
///
/// The future is polled again right away when it woke itself, otherwise the clock is advanced by
/// [`TIME_STEP`] first. A timer fires on the first step at or after its deadline, so elapsed
/// simulated time is exact for whole-millisecond delays and rounded up to the next step otherwise.
pub fn test_block_on<F: Future>(fut: F) -> F::Output {
    let _clock = MOCK_CLOCK.lock().unwrap_or_else(|e| e.into_inner());
    let driver = MockDriver::get();
    driver.reset();

    let flag = Arc::new(WakeFlag(AtomicBool::new(false)));
    let waker = Waker::from(flag.clone());
    let mut cx = Context::from_waker(&waker);
    let mut fut = pin!(fut);

    let max_steps = MAX_TEST_TIME.as_ticks() / TIME_STEP.as_ticks();
    for _ in 0..max_steps {
        for _ in 0..MAX_POLLS_PER_STEP {
            flag.0.store(false, Ordering::SeqCst);
            if let Poll::Ready(output) = fut.as_mut().poll(&mut cx) {
                return output;
            }
            if !flag.0.load(Ordering::SeqCst) {
                break;
            }
        }
        driver.advance(TIME_STEP);
    }
    panic!("Test timeout reached");
}

/// Keypad symbols of a 5x4 matrix: the reference 4x4 layout plus an extra row
pub const SHORT_SYMBOLS_5X4: [char; 20] = extend_symbols(&DEFAULT_SHORT_SYMBOLS, ['E', 'F', 'G', 'H']);

pub const LONG_SYMBOLS_5X4: [char; 20] = extend_symbols(&DEFAULT_LONG_SYMBOLS, ['e', 'f', 'g', 'h']);

const fn extend_symbols(symbols: &[char; 16], extra_row: [char; 4]) -> [char; 20] {
    let mut extended = [' '; 20];
    let mut i = 0;
    while i < 20 {
        extended[i] = if i < 16 { symbols[i] } else { extra_row[i - 16] };
        i += 1;
    }
    extended
}
