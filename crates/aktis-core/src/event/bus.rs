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

use log;

/// Manages a generic event channel.
///
/// The bus is generic over the event type `T` it transports, so `aktis-core`
/// stays decoupled from the concrete notifications higher-level crates
/// define. Publishing is synchronous and never blocks; observers drain the
/// receiver at their own pace.
#[derive(Debug)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    /// Creates a new EventBus with an unbounded channel for a specific event type.
    pub fn new() -> Self {
        let (sender, receiver) = flume::unbounded();
        Self { sender, receiver }
    }

    /// Attempts to send an event, logging an error if every receiver is gone.
    ///
    /// ## Arguments
    /// * `event` - The event to be sent over the channel.
    pub fn publish(&self, event: T) {
        if let Err(e) = self.sender.send(event) {
            log::error!("Failed to send event: {e}. Receiver likely disconnected.");
        }
    }

    /// Returns a clone of the sender end of the channel.
    /// Use this to allow other parts of the system to send events.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    /// Returns a reference to the receiver end of the channel.
    /// Intended for observers to drain published events.
    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
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

    /// A local, self-contained event enum for testing purposes.
    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        SelectionChanged { selected: bool },
        PassComplete,
    }

    #[test]
    fn bus_starts_empty() {
        let bus = EventBus::<TestEvent>::new();
        assert!(bus.receiver().is_empty());
        assert_eq!(bus.receiver().try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn publish_then_drain_preserves_order() {
        let bus = EventBus::<TestEvent>::new();
        bus.publish(TestEvent::SelectionChanged { selected: true });
        bus.publish(TestEvent::PassComplete);
        bus.publish(TestEvent::SelectionChanged { selected: false });

        let drained: Vec<_> = bus.receiver().try_iter().collect();
        assert_eq!(
            drained,
            vec![
                TestEvent::SelectionChanged { selected: true },
                TestEvent::PassComplete,
                TestEvent::SelectionChanged { selected: false },
            ]
        );
        assert!(bus.receiver().is_empty());
    }

    #[test]
    fn detached_sender_still_reaches_the_bus() {
        let bus = EventBus::<TestEvent>::new();
        let sender = bus.sender();
        sender.send(TestEvent::PassComplete).expect("send");
        assert_eq!(bus.receiver().try_recv(), Ok(TestEvent::PassComplete));
    }
}
