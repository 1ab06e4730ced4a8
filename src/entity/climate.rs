//! Climate adapter for heating/cooling controllers

use crate::address::DeviceAddress;
use crate::entity::{Entity, Platform, unique_entity_id};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::logging::{StructuredLogger, get_logger};
use crate::profile::{HeaterMode, Profile, Reading};
use crate::telegram::Telegram;

/// Lowest accepted target set-point in degrees Celsius
pub const TARGET_TEMPERATURE_MIN: f32 = 8.0;

/// Highest accepted target set-point in degrees Celsius
pub const TARGET_TEMPERATURE_MAX: f32 = 25.0;

/// Current HVAC activity as shown by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HvacAction {
    Off,
    Heating,
    Idle,
}

impl HvacAction {
    /// Platform representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HvacAction::Off => "off",
            HvacAction::Heating => "heating",
            HvacAction::Idle => "idle",
        }
    }
}

/// A climate entity backed by a temperature controller.
///
/// The sender block is kept for the day set-point forwarding lands; today
/// the adapter is read-only towards the bus.
pub struct Climate {
    unique_id: String,
    name: String,
    address: DeviceAddress,
    profile: Profile,
    sender_address: DeviceAddress,
    sender_profile: Profile,
    logger: StructuredLogger,

    current_temperature: Option<f32>,
    target_temperature: Option<f32>,
    hvac_action: HvacAction,
}

impl Climate {
    /// Create a climate adapter
    pub fn new(
        gateway: &Gateway,
        name: String,
        address: DeviceAddress,
        profile: Profile,
        sender_address: DeviceAddress,
        sender_profile: Profile,
    ) -> Self {
        let unique_id = unique_entity_id(gateway.id(), &address);
        Self {
            unique_id,
            name,
            address,
            profile,
            sender_address,
            sender_profile,
            logger: get_logger("climate"),
            current_temperature: None,
            target_temperature: None,
            hvac_action: HvacAction::Heating,
        }
    }

    pub fn current_temperature(&self) -> Option<f32> {
        self.current_temperature
    }

    pub fn target_temperature(&self) -> Option<f32> {
        self.target_temperature
    }

    pub fn hvac_action(&self) -> HvacAction {
        self.hvac_action
    }

    /// Sender address used for outbound set-point commands
    pub fn sender_address(&self) -> &DeviceAddress {
        &self.sender_address
    }

    /// Accept a new target set-point. Forwarding the set-point to the
    /// controller is not implemented; the accepted value is only logged.
    pub fn set_temperature(&mut self, target: f32) -> Result<()> {
        let clamped = target.clamp(TARGET_TEMPERATURE_MIN, TARGET_TEMPERATURE_MAX);
        self.logger.debug(&format!(
            "Set temperature {:.1} via {} ({}) not forwarded to the controller",
            clamped,
            self.sender_address,
            self.sender_profile.id()
        ));
        Ok(())
    }

    fn apply_mode(&mut self, mode: HeaterMode) {
        self.hvac_action = match mode {
            HeaterMode::Off => HvacAction::Off,
            HeaterMode::Normal => HvacAction::Heating,
            HeaterMode::Standby | HeaterMode::NightSetback => HvacAction::Idle,
        };
    }
}

impl Entity for Climate {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn platform(&self) -> Platform {
        Platform::Climate
    }

    fn device_address(&self) -> &DeviceAddress {
        &self.address
    }

    fn state_json(&self) -> serde_json::Value {
        serde_json::json!({
            "current_temperature": self.current_temperature,
            "target_temperature": self.target_temperature,
            "hvac_action": self.hvac_action.as_str(),
            "target_temperature_min": TARGET_TEMPERATURE_MIN,
            "target_temperature_max": TARGET_TEMPERATURE_MAX,
        })
    }

    fn value_changed(&mut self, telegram: &Telegram) {
        match self.profile.decode(telegram) {
            Ok(Reading::Hvac(reading)) => {
                self.current_temperature = Some(reading.current_temperature);
                self.target_temperature = Some(reading.target_temperature);
                self.apply_mode(reading.mode);
            }
            Ok(_) => self
                .logger
                .warn("Unexpected reading type for climate device"),
            Err(e) => self
                .logger
                .warn(&format!("Could not decode message: {}", e)),
        }
    }
}
