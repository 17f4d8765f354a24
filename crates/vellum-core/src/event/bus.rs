// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Mutex;

/// Manages a generic, thread-safe publish/subscribe channel.
///
/// This EventBus is generic over the type `T` of event it transports. Each call to
/// [`EventBus::subscribe`] opens a new unbounded `flume` channel; publishing clones
/// the event into every live channel. Subscribers whose receiver has been dropped
/// are pruned on the next publish.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    subscribers: Mutex<Vec<flume::Sender<T>>>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Creates a new EventBus with no subscribers.
    ///
    /// ## Returns
    /// A new instance of the EventBus struct.
    pub fn new() -> Self {
        log::trace!("Generic EventBus initialized.");
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Registers a new observer.
    ///
    /// Events published before this call are not replayed.
    ///
    /// ## Returns
    /// The receiving end of a channel dedicated to this observer.
    pub fn subscribe(&self) -> flume::Receiver<T> {
        let (sender, receiver) = flume::unbounded();
        self.lock().push(sender);
        receiver
    }

    /// Delivers an event to every live subscriber.
    ///
    /// ## Arguments
    /// * `event` - The event to be broadcast.
    ///
    /// ## Returns
    /// The number of subscribers the event was delivered to.
    pub fn publish(&self, event: T) -> usize {
        log::trace!("Publishing an event.");

        let mut subscribers = self.lock();
        subscribers.retain(|sender| {
            if sender.send(event.clone()).is_ok() {
                true
            } else {
                log::debug!("Dropping disconnected event subscriber.");
                false
            }
        });
        subscribers.len()
    }

    /// Returns the number of subscribers currently registered.
    ///
    /// Disconnected subscribers are only noticed on publish, so they may still be counted here.
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<flume::Sender<T>>> {
        // A panic while holding the lock cannot leave the sender list half-written.
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone + Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flume::TryRecvError;
    use std::{sync::Arc, thread, time::Duration};

    /// A local, self-contained event enum for testing purposes.
    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Started { id: u32 },
        Finished { id: u32 },
    }

    #[test]
    fn event_bus_creation() {
        let bus = EventBus::<TestEvent>::new();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(TestEvent::Started { id: 0 }), 0);
    }

    #[test]
    fn every_subscriber_receives_every_event() {
        let bus = EventBus::<TestEvent>::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        assert_eq!(bus.publish(TestEvent::Started { id: 1 }), 2);
        assert_eq!(bus.publish(TestEvent::Finished { id: 1 }), 2);

        for receiver in [&first, &second] {
            assert_eq!(receiver.try_recv(), Ok(TestEvent::Started { id: 1 }));
            assert_eq!(receiver.try_recv(), Ok(TestEvent::Finished { id: 1 }));
            assert_eq!(receiver.try_recv(), Err(TryRecvError::Empty));
        }
    }

    #[test]
    fn late_subscriber_misses_earlier_events() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::Started { id: 2 });

        let late = bus.subscribe();
        assert_eq!(late.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let bus = EventBus::<TestEvent>::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        assert_eq!(bus.publish(TestEvent::Finished { id: 3 }), 1);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Ok(TestEvent::Finished { id: 3 }));
    }

    #[test]
    fn publish_from_thread() {
        let bus = Arc::new(EventBus::<TestEvent>::new());
        let receiver = bus.subscribe();
        let publisher = Arc::clone(&bus);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            publisher.publish(TestEvent::Finished { id: 4 });
        });

        match receiver.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => assert_eq!(event, TestEvent::Finished { id: 4 }),
            Err(e) => panic!("Failed to receive event from thread: {e:?}"),
        }

        handle.join().expect("Thread join failed");
    }
}
