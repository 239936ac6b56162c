use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use ss_common::OrderReadyEvent;

/// One delivered webhook, as the receiver saw it.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedNotification {
    pub event: OrderReadyEvent,
    pub received_at: DateTime<Utc>,
}

/// An append-only, in-memory record of every notification that has arrived since the process started. Clones
/// share the same underlying log, so one instance can be handed to every server worker.
#[derive(Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<ReceivedNotification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the event and returns the running total of stored notifications.
    pub fn record(&self, event: OrderReadyEvent) -> usize {
        let entry = ReceivedNotification { event, received_at: Utc::now() };
        let mut entries = self.entries.lock().unwrap();
        entries.push(entry);
        entries.len()
    }

    pub fn all(&self) -> Vec<ReceivedNotification> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[cfg(test)]
mod test {
    use ss_common::Centavos;

    use super::*;

    #[test]
    fn the_log_preserves_arrival_order() {
        let log = NotificationLog::new();
        assert_eq!(log.count(), 0);
        assert_eq!(log.record(OrderReadyEvent::new("a-1", "Rosa", Centavos::from_pesos(10))), 1);
        assert_eq!(log.record(OrderReadyEvent::new("a-2", "Marta", Centavos::from_pesos(20))), 2);
        let entries = log.all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].event.order_id, "a-1");
        assert_eq!(entries[1].event.order_id, "a-2");
    }

    #[test]
    fn clones_share_the_same_log() {
        let log = NotificationLog::new();
        let shared = log.clone();
        shared.record(OrderReadyEvent::new("a-1", "Rosa", Centavos::from_pesos(10)));
        assert_eq!(log.count(), 1);
    }
}
