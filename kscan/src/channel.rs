//! Channels carrying decoded key presses from the scanner to the consumer.
//!
//! Two flavours exist, picked by the configured channel capacity:
//!
//! - capacity 0: [`OverwriteChannel`], a single slot where a new event replaces an unread one.
//!   Publishing never blocks, so this is the channel used from interrupt context.
//! - capacity N: [`FifoChannel`], a bounded FIFO. Publishing waits while the queue is full,
//!   which applies backpressure to the cooperative scanner.

use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use crate::RawMutex;
use crate::event::KeyEvent;

/// A channel that key events are published to and consumed from.
pub trait EventChannel {
    /// Configured capacity of the channel, 0 for the overwrite slot
    const CAPACITY: usize;

    /// Publish an event. Returns once the event is stored.
    async fn put(&self, event: KeyEvent);

    /// Wait for the next event
    async fn get(&self) -> KeyEvent;

    /// Take the next event if one is available
    fn try_get(&self) -> Option<KeyEvent>;

    /// Drop every pending event
    fn clear(&self);
}

/// Bounded FIFO of `N` key events.
pub struct FifoChannel<const N: usize> {
    inner: Channel<RawMutex, KeyEvent, N>,
}

impl<const N: usize> Default for FifoChannel<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FifoChannel<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "a FIFO channel needs room for at least one event") };
        Self { inner: Channel::new() }
    }

    /// Publish without waiting, the event is handed back if the queue is full
    pub fn try_put(&self, event: KeyEvent) -> Result<(), KeyEvent> {
        self.inner.try_send(event).map_err(|e| match e {
            embassy_sync::channel::TrySendError::Full(event) => event,
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }
}

impl<const N: usize> EventChannel for FifoChannel<N> {
    const CAPACITY: usize = N;

    async fn put(&self, event: KeyEvent) {
        self.inner.send(event).await
    }

    async fn get(&self) -> KeyEvent {
        self.inner.receive().await
    }

    fn try_get(&self) -> Option<KeyEvent> {
        self.inner.try_receive().ok()
    }

    fn clear(&self) {
        self.inner.clear();
    }
}

/// Single-slot channel, a new event overwrites the one not yet consumed.
///
/// It's safe to publish from an interrupt handler: [`OverwriteChannel::put_now`] only takes a
/// critical section and never waits.
pub struct OverwriteChannel {
    slot: Signal<RawMutex, KeyEvent>,
}

impl Default for OverwriteChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl OverwriteChannel {
    pub const fn new() -> Self {
        Self { slot: Signal::new() }
    }

    /// Store `event`, replacing any unread event
    pub fn put_now(&self, event: KeyEvent) {
        if self.slot.signaled() {
            debug!("Unread key event overwritten by {:?}", event);
        }
        self.slot.signal(event);
    }

    /// Whether an event is waiting to be consumed
    pub fn has_event(&self) -> bool {
        self.slot.signaled()
    }
}

impl EventChannel for OverwriteChannel {
    const CAPACITY: usize = 0;

    async fn put(&self, event: KeyEvent) {
        self.put_now(event)
    }

    async fn get(&self) -> KeyEvent {
        self.slot.wait().await
    }

    fn try_get(&self) -> Option<KeyEvent> {
        self.slot.try_take()
    }

    fn clear(&self) {
        self.slot.reset();
    }
}

#[cfg(test)]
mod test {
    use core::pin::pin;

    use embassy_futures::block_on;
    use embassy_futures::poll_once;

    use super::*;

    #[test]
    fn test_fifo_keeps_order() {
        let channel: FifoChannel<4> = FifoChannel::new();
        block_on(async {
            channel.put(KeyEvent::short(0, '1')).await;
            channel.put(KeyEvent::long(1, 'n')).await;
            channel.put(KeyEvent::short(2, '3')).await;
            assert_eq!(channel.len(), 3);
            assert_eq!(channel.get().await, KeyEvent::short(0, '1'));
            assert_eq!(channel.get().await, KeyEvent::long(1, 'n'));
            assert_eq!(channel.try_get(), Some(KeyEvent::short(2, '3')));
            assert_eq!(channel.try_get(), None);
        });
    }

    #[test]
    fn test_fifo_put_waits_when_full() {
        let channel: FifoChannel<1> = FifoChannel::new();
        assert_eq!(channel.try_put(KeyEvent::short(0, '1')), Ok(()));
        assert!(channel.is_full());
        assert_eq!(channel.try_put(KeyEvent::short(1, '2')), Err(KeyEvent::short(1, '2')));

        let mut put = pin!(channel.put(KeyEvent::short(2, '3')));
        assert!(poll_once(put.as_mut()).is_pending());

        assert_eq!(channel.try_get(), Some(KeyEvent::short(0, '1')));
        assert!(poll_once(put.as_mut()).is_ready());
        assert_eq!(channel.try_get(), Some(KeyEvent::short(2, '3')));
    }

    #[test]
    fn test_fifo_clear() {
        let channel: FifoChannel<2> = FifoChannel::new();
        channel.try_put(KeyEvent::short(0, '1')).unwrap();
        channel.clear();
        assert!(channel.is_empty());
        assert_eq!(channel.try_get(), None);
    }

    #[test]
    fn test_overwrite_keeps_latest() {
        let channel = OverwriteChannel::new();
        assert_eq!(channel.try_get(), None);
        channel.put_now(KeyEvent::short(0, '1'));
        channel.put_now(KeyEvent::short(1, '2'));
        assert!(channel.has_event());
        assert_eq!(channel.try_get(), Some(KeyEvent::short(1, '2')));
        assert_eq!(channel.try_get(), None);
        assert!(!channel.has_event());
    }

    #[test]
    fn test_overwrite_get_waits_for_event() {
        let channel = OverwriteChannel::new();
        let mut get = pin!(channel.get());
        assert!(poll_once(get.as_mut()).is_pending());
        block_on(channel.put(KeyEvent::long(5, 'q')));
        match poll_once(get.as_mut()) {
            core::task::Poll::Ready(event) => assert_eq!(event, KeyEvent::long(5, 'q')),
            core::task::Poll::Pending => panic!("event not delivered"),
        }
        channel.put_now(KeyEvent::short(5, '6'));
        channel.clear();
        assert_eq!(channel.try_get(), None);
    }

    #[test]
    fn test_capacities() {
        assert_eq!(<OverwriteChannel as EventChannel>::CAPACITY, 0);
        assert_eq!(<FifoChannel<8> as EventChannel>::CAPACITY, 8);
    }
}
