//! Channel Event Sink
//!
//! Fans compile events out to any number of subscribers, e.g. a UI thread
//! that renders them.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

use crate::domain::ports::{CompileEvent, CompileEventSink};

#[derive(Default)]
pub struct ChannelEventSink {
    subscribers: Mutex<Vec<Sender<CompileEvent>>>,
}

impl ChannelEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// New stream receiving every event emitted from now on
    pub fn subscribe(&self) -> Receiver<CompileEvent> {
        let (tx, rx) = channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|s| s.len()).unwrap_or(0)
    }
}

impl CompileEventSink for ChannelEventSink {
    fn on_event(&self, event: CompileEvent) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            // Dropped receivers unsubscribe
            subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_sees_every_event() {
        let sink = ChannelEventSink::new();
        let a = sink.subscribe();
        let b = sink.subscribe();

        sink.on_event(CompileEvent::Shutdown);

        assert_eq!(a.try_recv().unwrap(), CompileEvent::Shutdown);
        assert_eq!(b.try_recv().unwrap(), CompileEvent::Shutdown);
    }

    #[test]
    fn dropped_subscriber_is_removed() {
        let sink = ChannelEventSink::new();
        let kept = sink.subscribe();
        drop(sink.subscribe());

        sink.on_event(CompileEvent::Shutdown);

        assert_eq!(sink.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }
}
