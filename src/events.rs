//! Platform bus events
//!
//! Stateless inputs (rocker switches) surface as events on the platform bus
//! rather than as entity state. Event types are deterministic strings scoped
//! by gateway and source address so automations can match on them directly.

use crate::address::DeviceAddress;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Event id for rocker button activity
pub const EVENT_BUTTON_PRESSED: &str = "btn_pressed";

/// Build the bus event type for a device event, e.g.
/// `"enocean.gw_123.btn_pressed.sid_FE-DB-B6-40"`.
pub fn bus_event_type(gateway_id: u32, event_id: &str, address: &DeviceAddress) -> String {
    format!(
        "{}.gw_{}.{}.sid_{}",
        crate::DOMAIN,
        gateway_id,
        event_id,
        address.plain()
    )
}

/// An event published to the platform bus
#[derive(Debug, Clone, Serialize)]
pub struct PlatformEvent {
    /// Deterministic event type string
    pub event_type: String,

    /// Event payload
    pub data: serde_json::Value,

    /// Publication time
    pub timestamp: DateTime<Utc>,
}

/// Broadcast fan-out for platform events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event; delivery is best-effort when nobody subscribes
    pub fn publish(&self, event_type: String, data: serde_json::Value) {
        let _ = self.tx.send(PlatformEvent {
            event_type,
            data,
            timestamp: Utc::now(),
        });
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_format() {
        let addr = DeviceAddress::parse("FE-DB-B6-40").unwrap();
        assert_eq!(
            bus_event_type(123, EVENT_BUTTON_PRESSED, &addr),
            "enocean.gw_123.btn_pressed.sid_FE-DB-B6-40"
        );
    }

    #[test]
    fn publish_reaches_subscribers() {
        let bus = EventBus::new(8);
        let mut rx = bus.subscribe();
        bus.publish("test.event".to_string(), serde_json::json!({"x": 1}));
        let event = rx.try_recv().unwrap();
        assert_eq!(event.event_type, "test.event");
        assert_eq!(event.data["x"], 1);
    }
}
