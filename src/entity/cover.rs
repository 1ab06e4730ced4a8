//! Cover adapter for shutter/blind actuators
//!
//! Receives status telegrams through the device profile and issues
//! directional command telegrams through the sender profile. Position is an
//! open-loop estimate from configured travel times; discrete end-position
//! telegrams override it.

use crate::address::DeviceAddress;
use crate::entity::{Entity, Platform, unique_entity_id};
use crate::error::Result;
use crate::gateway::Gateway;
use crate::logging::{StructuredLogger, get_logger};
use crate::profile::{
    Profile, Reading, ShutterCommand, ShutterReading, ShutterState, TravelDirection, shutter,
};
use crate::telegram::Telegram;
use crate::travel::TravelTimes;

/// A cover entity backed by a shutter actuator
pub struct Cover {
    unique_id: String,
    name: String,
    address: DeviceAddress,
    profile: Profile,
    sender_address: DeviceAddress,
    sender_profile: Profile,
    device_class: Option<String>,
    travel: TravelTimes,
    gateway: Gateway,
    logger: StructuredLogger,

    position: u8,
    is_opening: bool,
    is_closing: bool,
    is_closed: bool,
}

impl Cover {
    /// Create a cover adapter; the initial estimate assumes a fully open cover
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gateway: Gateway,
        name: String,
        address: DeviceAddress,
        profile: Profile,
        sender_address: DeviceAddress,
        sender_profile: Profile,
        device_class: Option<String>,
        travel: TravelTimes,
    ) -> Self {
        let unique_id = unique_entity_id(gateway.id(), &address);
        Self {
            unique_id,
            name,
            address,
            profile,
            sender_address,
            sender_profile,
            device_class,
            travel,
            gateway,
            logger: get_logger("cover"),
            position: 100,
            is_opening: false,
            is_closing: false,
            is_closed: false,
        }
    }

    /// Whether set-position commands are available
    pub fn supports_set_position(&self) -> bool {
        self.travel.supports_position()
    }

    /// Sender address used for outbound commands
    pub fn sender_address(&self) -> &DeviceAddress {
        &self.sender_address
    }

    /// Current position estimate, 0 closed to 100 open
    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn is_opening(&self) -> bool {
        self.is_opening
    }

    pub fn is_closing(&self) -> bool {
        self.is_closing
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Open the cover
    pub fn open_cover(&mut self) -> Result<()> {
        let seconds = self.travel.command_seconds(TravelDirection::Up);
        self.send_command(seconds, ShutterCommand::Up)?;
        self.is_opening = true;
        self.is_closing = false;
        Ok(())
    }

    /// Close the cover
    pub fn close_cover(&mut self) -> Result<()> {
        let seconds = self.travel.command_seconds(TravelDirection::Down);
        self.send_command(seconds, ShutterCommand::Down)?;
        self.is_closing = true;
        self.is_opening = false;
        Ok(())
    }

    /// Stop a running travel
    pub fn stop_cover(&mut self) -> Result<()> {
        self.send_command(0, ShutterCommand::Stop)?;
        self.is_closing = false;
        self.is_opening = false;
        Ok(())
    }

    /// Move the cover to a specific position (0 closed, 100 open). Requires
    /// both travel times; otherwise the command is ignored.
    pub fn set_cover_position(&mut self, target: u8) -> Result<()> {
        let target = target.min(100);
        let Some((direction, seconds)) = self.travel.seconds_for_span(self.position, target)
        else {
            if !self.travel.supports_position() {
                self.logger
                    .debug("Set position ignored, travel times not configured");
            }
            return Ok(());
        };

        let command = match direction {
            TravelDirection::Up => ShutterCommand::Up,
            TravelDirection::Down => ShutterCommand::Down,
        };
        self.send_command(seconds, command)?;
        match direction {
            TravelDirection::Up => {
                self.is_opening = true;
                self.is_closing = false;
            }
            TravelDirection::Down => {
                self.is_closing = true;
                self.is_opening = false;
            }
        }
        Ok(())
    }

    fn send_command(&self, seconds: u16, command: ShutterCommand) -> Result<()> {
        if self.sender_profile != Profile::ShutterCommand {
            self.logger.debug(&format!(
                "Sender profile {} cannot encode shutter commands",
                self.sender_profile.id()
            ));
            return Ok(());
        }
        let telegram = shutter::encode_command(self.sender_address.bytes(), seconds, command);
        self.gateway.send_message(telegram)
    }

    fn apply_reading(&mut self, reading: ShutterReading) {
        match reading {
            ShutterReading::State(ShutterState::MovingDown) => {
                self.is_closing = true;
                self.is_opening = false;
            }
            ShutterReading::State(ShutterState::MovingUp) => {
                self.is_opening = true;
                self.is_closing = false;
                self.is_closed = false;
            }
            ShutterReading::State(ShutterState::Closed) => {
                self.is_opening = false;
                self.is_closing = false;
                self.is_closed = true;
                self.position = 0;
            }
            ShutterReading::State(ShutterState::Open) => {
                self.is_opening = false;
                self.is_closing = false;
                self.is_closed = false;
                self.position = 100;
            }
            ShutterReading::Travel { tenths, direction } => {
                if let Some(new_position) =
                    self.travel.position_after_travel(self.position, tenths, direction)
                {
                    self.position = new_position;
                    self.is_closed = self.position == 0;
                }
                self.is_opening = false;
                self.is_closing = false;
            }
        }
    }
}

impl Entity for Cover {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn platform(&self) -> Platform {
        Platform::Cover
    }

    fn device_address(&self) -> &DeviceAddress {
        &self.address
    }

    fn state_json(&self) -> serde_json::Value {
        serde_json::json!({
            "position": self.position,
            "is_opening": self.is_opening,
            "is_closing": self.is_closing,
            "is_closed": self.is_closed,
            "device_class": self.device_class,
            "supports_set_position": self.supports_set_position(),
        })
    }

    fn value_changed(&mut self, telegram: &Telegram) {
        match self.profile.decode(telegram) {
            Ok(Reading::Shutter(reading)) => self.apply_reading(reading),
            Ok(_) => self
                .logger
                .warn("Unexpected reading type for cover device"),
            Err(e) => self
                .logger
                .warn(&format!("Could not decode message: {}", e)),
        }
    }
}
