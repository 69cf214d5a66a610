use core::num::NonZeroU16;

use crate::event::PressKind;

/// Debounce state of a single key
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    /// Released
    #[default]
    Up,
    /// Pressed, waiting for either a release (short press) or the long-press threshold
    Down,
    /// Held past the long-press threshold, the long symbol has been emitted
    DownLong,
}

/// A single key of the matrix: its symbols and its press state.
#[derive(Copy, Clone, Debug)]
pub struct Key {
    short_symbol: char,
    long_symbol: char,
    state: KeyState,
    /// Consecutive pressed samples since the press was registered
    assert_count: u16,
}

impl Key {
    pub const fn new(short_symbol: char, long_symbol: char) -> Self {
        Self {
            short_symbol,
            long_symbol,
            state: KeyState::Up,
            assert_count: 0,
        }
    }

    pub fn state(&self) -> KeyState {
        self.state
    }

    pub fn assert_count(&self) -> u16 {
        self.assert_count
    }

    pub fn short_symbol(&self) -> char {
        self.short_symbol
    }

    pub fn long_symbol(&self) -> char {
        self.long_symbol
    }

    pub fn symbol(&self, kind: PressKind) -> char {
        match kind {
            PressKind::Short => self.short_symbol,
            PressKind::Long => self.long_symbol,
        }
    }

    /// Feed one sample of the key into the state machine.
    ///
    /// Returns the kind of press to publish, if this sample completes one. `threshold` is the
    /// number of held samples after which the press becomes a long press, `None` disables long
    /// press entirely.
    ///
    /// A release observed on the very sample that would have reached the threshold counts as a
    /// long press: the key escalates and is treated as already released, so exactly one long
    /// press is reported and nothing else.
    pub fn sample(&mut self, pressed: bool, threshold: Option<NonZeroU16>) -> Option<PressKind> {
        match (self.state, pressed) {
            (KeyState::Up, false) => None,
            (KeyState::Up, true) => {
                self.state = KeyState::Down;
                self.assert_count = 0;
                None
            }
            (KeyState::Down, true) => {
                self.assert_count = self.assert_count.saturating_add(1);
                if reached(threshold, self.assert_count) {
                    self.state = KeyState::DownLong;
                    Some(PressKind::Long)
                } else {
                    None
                }
            }
            (KeyState::Down, false) => {
                let kind = if reached(threshold, self.assert_count.saturating_add(1)) {
                    PressKind::Long
                } else {
                    PressKind::Short
                };
                self.release();
                Some(kind)
            }
            (KeyState::DownLong, true) => None,
            // The long symbol went out on escalation
            (KeyState::DownLong, false) => {
                self.release();
                None
            }
        }
    }

    pub fn release(&mut self) {
        self.state = KeyState::Up;
        self.assert_count = 0;
    }
}

fn reached(threshold: Option<NonZeroU16>, count: u16) -> bool {
    threshold.is_some_and(|t| count >= t.get())
}

#[cfg(test)]
mod test {
    use super::*;

    fn threshold(n: u16) -> Option<NonZeroU16> {
        NonZeroU16::new(n)
    }

    /// Samples `held` pressed cycles followed by one released cycle, collecting every press.
    fn hold_and_release(key: &mut Key, held: usize, threshold: Option<NonZeroU16>) -> heapless::Vec<PressKind, 4> {
        let mut presses = heapless::Vec::new();
        for _ in 0..held {
            if let Some(kind) = key.sample(true, threshold) {
                presses.push(kind).unwrap();
            }
        }
        if let Some(kind) = key.sample(false, threshold) {
            presses.push(kind).unwrap();
        }
        presses
    }

    #[test]
    fn test_press_is_reported_on_release() {
        let mut key = Key::new('1', 'm');
        assert_eq!(key.sample(true, threshold(20)), None);
        assert_eq!(key.state(), KeyState::Down);
        assert_eq!(key.assert_count(), 0);
        assert_eq!(key.sample(true, threshold(20)), None);
        assert_eq!(key.assert_count(), 1);
        assert_eq!(key.sample(false, threshold(20)), Some(PressKind::Short));
        assert_eq!(key.state(), KeyState::Up);
        assert_eq!(key.assert_count(), 0);
    }

    #[test]
    fn test_idle_key_stays_up() {
        let mut key = Key::new('1', 'm');
        for _ in 0..50 {
            assert_eq!(key.sample(false, threshold(20)), None);
        }
        assert_eq!(key.state(), KeyState::Up);
    }

    #[test]
    fn test_long_press_is_reported_while_held() {
        let mut key = Key::new('1', 'm');
        let t = threshold(3);
        assert_eq!(key.sample(true, t), None);
        assert_eq!(key.sample(true, t), None);
        assert_eq!(key.sample(true, t), None);
        assert_eq!(key.sample(true, t), Some(PressKind::Long));
        assert_eq!(key.state(), KeyState::DownLong);
        for _ in 0..10 {
            assert_eq!(key.sample(true, t), None);
        }
        assert_eq!(key.sample(false, t), None);
        assert_eq!(key.state(), KeyState::Up);
        assert_eq!(key.assert_count(), 0);
    }

    #[test]
    fn test_release_on_threshold_sample_counts_as_long() {
        // Held for 3 samples, the release is the sample that reaches the threshold of 3
        let mut key = Key::new('1', 'm');
        assert_eq!(hold_and_release(&mut key, 3, threshold(3)).as_slice(), &[PressKind::Long]);
        assert_eq!(key.state(), KeyState::Up);

        // One sample earlier it's still a short press
        assert_eq!(hold_and_release(&mut key, 2, threshold(3)).as_slice(), &[PressKind::Short]);
    }

    #[test]
    fn test_hold_durations_against_reference_threshold() {
        let t = threshold(20);
        let mut key = Key::new('1', 'm');
        for held in 1..20 {
            assert_eq!(hold_and_release(&mut key, held, t).as_slice(), &[PressKind::Short], "held {}", held);
        }
        for held in 20..40 {
            assert_eq!(hold_and_release(&mut key, held, t).as_slice(), &[PressKind::Long], "held {}", held);
        }
    }

    #[test]
    fn test_without_threshold_presses_are_always_short() {
        let mut key = Key::new('1', 'm');
        assert_eq!(hold_and_release(&mut key, 1, None).as_slice(), &[PressKind::Short]);
        assert_eq!(hold_and_release(&mut key, 5000, None).as_slice(), &[PressKind::Short]);
    }

    #[test]
    fn test_threshold_of_one_makes_every_press_long() {
        let mut key = Key::new('1', 'm');
        assert_eq!(hold_and_release(&mut key, 1, threshold(1)).as_slice(), &[PressKind::Long]);
        assert_eq!(hold_and_release(&mut key, 2, threshold(1)).as_slice(), &[PressKind::Long]);
    }

    #[test]
    fn test_every_press_returns_to_up_before_the_next() {
        // Every 12-sample pattern: a press is reported at most once per trip through Down
        let t = threshold(3);
        for pattern in 0u16..(1 << 12) {
            let mut key = Key::new('1', 'm');
            let mut reported = false;
            for bit in 0..12 {
                let pressed = pattern & (1 << bit) != 0;
                let before = key.state();
                let press = key.sample(pressed, t);
                if before == KeyState::Up {
                    reported = false;
                }
                if press.is_some() {
                    assert!(!reported, "pattern {:012b}: two presses without a release", pattern);
                    reported = true;
                }
            }
        }
    }
}
