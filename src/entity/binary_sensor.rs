//! Binary sensor adapter for rocker switches and contacts
//!
//! Rocker switches are stateless inputs: every telegram is turned into
//! platform bus events so automations can react to individual buttons.
//! Contacts carry state and update `is_on`, with optional polarity
//! inversion for normally-closed wiring.

use crate::address::DeviceAddress;
use crate::entity::{Entity, Platform, unique_entity_id};
use crate::events::{EVENT_BUTTON_PRESSED, EventBus, bus_event_type};
use crate::logging::{StructuredLogger, get_logger};
use crate::profile::{ContactReading, Profile, Reading, RockerReading};
use crate::telegram::Telegram;

/// A binary sensor entity backed by a switch or contact
pub struct BinarySensor {
    unique_id: String,
    name: String,
    address: DeviceAddress,
    profile: Profile,
    device_class: Option<String>,
    invert_signal: bool,
    gateway_id: u32,
    events: EventBus,
    logger: StructuredLogger,

    is_on: Option<bool>,
}

impl BinarySensor {
    /// Create a binary sensor adapter; `is_on` stays unknown until the first
    /// state-carrying telegram arrives.
    pub fn new(
        gateway_id: u32,
        events: EventBus,
        name: String,
        address: DeviceAddress,
        profile: Profile,
        device_class: Option<String>,
        invert_signal: bool,
    ) -> Self {
        let unique_id = unique_entity_id(gateway_id, &address);
        Self {
            unique_id,
            name,
            address,
            profile,
            device_class,
            invert_signal,
            gateway_id,
            events,
            logger: get_logger("binary_sensor"),
            is_on: None,
        }
    }

    pub fn is_on(&self) -> Option<bool> {
        self.is_on
    }

    fn fire_rocker_events(&self, source: [u8; 4], data: u8, reading: &RockerReading) {
        let switch_address = DeviceAddress::from_bytes(source);
        let event_type = bus_event_type(self.gateway_id, EVENT_BUTTON_PRESSED, &switch_address);
        let buttons = reading.pressed_buttons();

        let payload = serde_json::json!({
            "id": event_type,
            "data": data,
            "switch_address": switch_address.plain(),
            "pressed_buttons": buttons,
            "pressed": reading.energy_bow_pressed,
            "two_buttons_pressed": buttons.len() == 2,
            "rocker_first_action": reading.first_action,
            "rocker_second_action": reading.second_action,
        });

        self.events.publish(event_type.clone(), payload.clone());
        if !buttons.is_empty() {
            let per_button = format!("{}.d_{}", event_type, buttons.join("_"));
            self.events.publish(per_button, payload);
        }
    }

    fn apply_contact(&mut self, reading: ContactReading) {
        if reading.teach_in {
            self.logger.debug("Ignoring teach-in telegram");
            return;
        }
        self.is_on = Some(if self.invert_signal {
            reading.contact_closed
        } else {
            !reading.contact_closed
        });
    }
}

impl Entity for BinarySensor {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn platform(&self) -> Platform {
        Platform::BinarySensor
    }

    fn device_address(&self) -> &DeviceAddress {
        &self.address
    }

    fn state_json(&self) -> serde_json::Value {
        serde_json::json!({
            "is_on": self.is_on,
            "device_class": self.device_class,
        })
    }

    fn value_changed(&mut self, telegram: &Telegram) {
        match self.profile.decode(telegram) {
            Ok(Reading::Rocker(reading)) => {
                let data = match telegram {
                    Telegram::Rps { data, .. } => *data,
                    _ => 0,
                };
                self.fire_rocker_events(telegram.address(), data, &reading);
                self.is_on = Some(reading.energy_bow_pressed);
            }
            Ok(Reading::Contact(reading)) => self.apply_contact(reading),
            Ok(_) => self
                .logger
                .warn("Unexpected reading type for binary sensor"),
            Err(e) => self
                .logger
                .warn(&format!("Could not decode message: {}", e)),
        }
    }
}
