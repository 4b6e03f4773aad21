//! Bounded record of recent events.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::Serialize;

use super::bus::{EventBus, SubscriptionId};
use super::types::Event;

/// One recorded event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Monotonic sequence number across the log's lifetime.
    pub seq: u64,
    /// `namespace:name` of the event.
    pub kind: String,
    pub event: Event,
}

/// Ring buffer of the most recent events published on a bus.
#[derive(Clone, Debug, Serialize)]
pub struct ActivityLog {
    capacity: usize,
    next_seq: u64,
    entries: VecDeque<LogEntry>,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            next_seq: 0,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Creates a shared log fed by the bus's wildcard channel.
    pub fn attach(bus: &mut EventBus, capacity: usize) -> (Rc<RefCell<Self>>, SubscriptionId) {
        let log = Rc::new(RefCell::new(Self::new(capacity)));
        let sink = Rc::clone(&log);
        let id = bus.subscribe_all(move |_, event| sink.borrow_mut().record(event.clone()));
        (log, id)
    }

    pub fn record(&mut self, event: Event) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            kind: event.kind().to_string(),
            event,
        });
        self.next_seq += 1;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ObserverEvent;

    fn settled(success: bool) -> Event {
        Event::from(ObserverEvent::CommitSettled { success })
    }

    #[test]
    fn drops_oldest_entries_past_capacity() {
        let mut log = ActivityLog::new(2);
        log.record(settled(true));
        log.record(settled(false));
        log.record(settled(true));

        let seqs: Vec<u64> = log.entries().map(|entry| entry.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
        assert_eq!(
            log.last().map(|entry| entry.kind.as_str()),
            Some("observer:commitSettled")
        );
    }

    #[test]
    fn attached_log_records_every_published_event() {
        let mut bus = EventBus::new();
        let (log, _) = ActivityLog::attach(&mut bus, 8);

        bus.publish(&settled(true));
        bus.publish(&settled(false));

        assert_eq!(log.borrow().len(), 2);
        let json = log.borrow().to_json().unwrap();
        assert!(json.contains("commitSettled"));
    }
}
