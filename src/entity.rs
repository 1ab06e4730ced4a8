//! Platform entity adapters
//!
//! Each adapter owns one device address and one equipment profile, maps
//! decoded telegrams onto platform attributes and platform commands onto
//! encoded telegrams. The host platform consumes entities through the
//! [`Entity`] trait as JSON state snapshots.

pub mod binary_sensor;
pub mod climate;
pub mod cover;

pub use binary_sensor::BinarySensor;
pub use climate::{Climate, HvacAction};
pub use cover::Cover;

use crate::address::DeviceAddress;
use crate::telegram::Telegram;

/// Host platform entity classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    BinarySensor,
    Climate,
    Cover,
}

impl Platform {
    /// Platform name as used in entity ids and snapshots
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::BinarySensor => "binary_sensor",
            Platform::Climate => "climate",
            Platform::Cover => "cover",
        }
    }
}

/// Base surface all entities implement
pub trait Entity: Send {
    /// Stable unique id, scoped by gateway and device address
    fn unique_id(&self) -> &str;

    /// Display name from configuration
    fn name(&self) -> &str;

    /// Platform this entity belongs to
    fn platform(&self) -> Platform;

    /// Address of the backing device
    fn device_address(&self) -> &DeviceAddress;

    /// Serialize current attributes for the host platform
    fn state_json(&self) -> serde_json::Value;

    /// Update internal state from an inbound telegram. Decode failures are
    /// logged and dropped; the entity keeps its prior state.
    fn value_changed(&mut self, telegram: &Telegram);
}

/// Build the unique entity id for a device behind a gateway. The address
/// qualifier keeps logical endpoints sharing one physical address distinct.
pub fn unique_entity_id(gateway_id: u32, address: &DeviceAddress) -> String {
    let mut id = format!("{}_gw{}_{}", crate::DOMAIN, gateway_id, address.hex_id());
    if let Some(q) = address.qualifier() {
        id.push('_');
        id.push_str(&q.to_lowercase().replace(' ', "_"));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_include_qualifier() {
        let plain = DeviceAddress::parse("00-00-00-01").unwrap();
        let left = DeviceAddress::parse("00-00-00-01 left").unwrap();
        let multi = DeviceAddress::parse("00-00-00-01 LT RB").unwrap();
        assert_eq!(unique_entity_id(123, &plain), "enocean_gw123_00000001");
        assert_eq!(unique_entity_id(123, &left), "enocean_gw123_00000001_left");
        assert_eq!(unique_entity_id(123, &multi), "enocean_gw123_00000001_lt_rb");
    }
}
