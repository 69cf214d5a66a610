//! Consumer side of the event channel.
//!
//! [`get_key`] and [`try_get_key`] hand out decoded characters one at a time. [`forward_keys`] is
//! a ready-made consumer task that writes every decoded character to a [`CharSink`], typically a
//! character display.

use crate::channel::EventChannel;

/// Something that displays or stores characters, one at a time
pub trait CharSink {
    fn write_char(&mut self, c: char);
}

impl<const N: usize> CharSink for heapless::String<N> {
    /// Characters that don't fit are dropped
    fn write_char(&mut self, c: char) {
        if self.push(c).is_err() {
            warn!("Character sink full, dropping {}", c);
        }
    }
}

/// Wait for the next decoded character
pub async fn get_key<C: EventChannel>(channel: &C) -> char {
    channel.get().await.symbol
}

/// The next decoded character, or `None` if no key press is pending
pub fn try_get_key<C: EventChannel>(channel: &C) -> Option<char> {
    channel.try_get().map(|event| event.symbol)
}

/// Write every decoded character to `sink`, forever.
pub async fn forward_keys<C: EventChannel, S: CharSink>(channel: &C, sink: &mut S) -> ! {
    loop {
        let event = channel.get().await;
        debug!("Key {} decoded as {}", event.key_code, event.symbol);
        sink.write_char(event.symbol);
    }
}
