//! Core bridge orchestration
//!
//! The bridge builds the configured entities, then runs the main loop:
//! inbound telegrams are dispatched to every entity whose device address
//! matches, platform commands are routed to the addressed entity, and each
//! update is published as a JSON state snapshot for the host platform.

use crate::address::DeviceAddress;
use crate::config::{BinarySensorConfig, ClimateConfig, Config, CoverConfig};
use crate::entity::{BinarySensor, Climate, Cover, Entity};
use crate::error::{Result, SiroccoError};
use crate::events::{EventBus, PlatformEvent};
use crate::gateway::Gateway;
use crate::logging::{StructuredLogger, get_logger};
use crate::profile::{Profile, ProfileId};
use crate::telegram::Telegram;
use crate::travel::TravelTimes;
use std::collections::HashMap;
use tokio::sync::{broadcast, mpsc};

/// Commands accepted by the bridge from the host platform
#[derive(Debug, Clone)]
pub enum BridgeCommand {
    OpenCover { entity_id: String },
    CloseCover { entity_id: String },
    StopCover { entity_id: String },
    SetCoverPosition { entity_id: String, position: u8 },
    SetTemperature { entity_id: String, target: f32 },
}

/// Main bridge between the bus gateway and the platform entity model
pub struct EnoceanBridge {
    /// Configuration
    config: Config,

    /// Gateway handle for outbound telegrams
    gateway: Gateway,

    /// Entity adapters per platform
    covers: Vec<Cover>,
    climates: Vec<Climate>,
    binary_sensors: Vec<BinarySensor>,

    /// Platform event fan-out
    events: EventBus,

    /// Logger with context
    logger: StructuredLogger,

    /// Inbound telegrams from the transport
    telegrams_rx: mpsc::UnboundedReceiver<Telegram>,

    /// Command receiver for platform control
    commands_rx: mpsc::UnboundedReceiver<BridgeCommand>,

    /// Command sender (fan-out to other subsystems)
    commands_tx: mpsc::UnboundedSender<BridgeCommand>,

    /// Broadcast channel for streaming entity state snapshots
    state_tx: broadcast::Sender<String>,

    /// Shutdown signal
    shutdown_tx: mpsc::UnboundedSender<()>,
    shutdown_rx: mpsc::UnboundedReceiver<()>,
}

impl EnoceanBridge {
    /// Create a bridge from validated configuration and the channel seams to
    /// the transport and the host platform.
    pub fn new(
        config: Config,
        telegrams_rx: mpsc::UnboundedReceiver<Telegram>,
        commands_rx: mpsc::UnboundedReceiver<BridgeCommand>,
        commands_tx: mpsc::UnboundedSender<BridgeCommand>,
        outbound_tx: mpsc::UnboundedSender<Telegram>,
    ) -> Result<Self> {
        config.validate()?;

        let logger = get_logger("bridge");
        let gateway = Gateway::new(
            config.gateway.id,
            config.gateway.name.clone(),
            outbound_tx,
        );
        let (state_tx, _) = broadcast::channel::<String>(100);
        let (shutdown_tx, shutdown_rx) = mpsc::unbounded_channel();

        let mut bridge = Self {
            config,
            gateway,
            covers: Vec::new(),
            climates: Vec::new(),
            binary_sensors: Vec::new(),
            events: EventBus::default(),
            logger,
            telegrams_rx,
            commands_rx,
            commands_tx,
            state_tx,
            shutdown_tx,
            shutdown_rx,
        };
        bridge.setup_platforms();
        Ok(bridge)
    }

    /// Build entities from the configured device lists. Unresolvable entries
    /// are logged and skipped, they never abort setup.
    fn setup_platforms(&mut self) {
        for entry in self.config.covers.clone() {
            match Self::build_cover(&self.gateway, &entry) {
                Ok(cover) => self.covers.push(cover),
                Err(e) => self.logger.warn(&format!(
                    "[cover] Could not load configuration for '{}': {}",
                    entry.name, e
                )),
            }
        }

        for entry in self.config.climate.clone() {
            match Self::build_climate(&self.gateway, &entry) {
                Ok(climate) => self.climates.push(climate),
                Err(e) => self.logger.warn(&format!(
                    "[climate] Could not load configuration for '{}': {}",
                    entry.name, e
                )),
            }
        }

        for entry in self.config.binary_sensors.clone() {
            match Self::build_binary_sensor(self.gateway.id(), &self.events, &entry) {
                Ok(sensor) => self.binary_sensors.push(sensor),
                Err(e) => self.logger.warn(&format!(
                    "[binary_sensor] Could not load configuration for '{}': {}",
                    entry.name, e
                )),
            }
        }

        self.check_sender_collisions();

        self.logger.info(&format!(
            "Adding entities: {} covers, {} climate controllers, {} binary sensors",
            self.covers.len(),
            self.climates.len(),
            self.binary_sensors.len()
        ));
    }

    fn build_cover(gateway: &Gateway, entry: &CoverConfig) -> Result<Cover> {
        let address = DeviceAddress::parse(&entry.id)?;
        let profile = Profile::find(&ProfileId::parse(&entry.eep)?)?;
        let sender_address = DeviceAddress::parse(&entry.sender.id)?;
        let sender_profile = Profile::find(&ProfileId::parse(&entry.sender.eep)?)?;
        Ok(Cover::new(
            gateway.clone(),
            entry.name.clone(),
            address,
            profile,
            sender_address,
            sender_profile,
            entry.device_class.clone(),
            TravelTimes::new(entry.time_opens, entry.time_closes),
        ))
    }

    fn build_climate(gateway: &Gateway, entry: &ClimateConfig) -> Result<Climate> {
        let address = DeviceAddress::parse(&entry.id)?;
        let profile = Profile::find(&ProfileId::parse(&entry.eep)?)?;
        let sender_address = DeviceAddress::parse(&entry.sender.id)?;
        let sender_profile = Profile::find(&ProfileId::parse(&entry.sender.eep)?)?;
        Ok(Climate::new(
            gateway,
            entry.name.clone(),
            address,
            profile,
            sender_address,
            sender_profile,
        ))
    }

    fn build_binary_sensor(
        gateway_id: u32,
        events: &EventBus,
        entry: &BinarySensorConfig,
    ) -> Result<BinarySensor> {
        let address = DeviceAddress::parse(&entry.id)?;
        let profile = Profile::find(&ProfileId::parse(&entry.eep)?)?;
        Ok(BinarySensor::new(
            gateway_id,
            events.clone(),
            entry.name.clone(),
            address,
            profile,
            entry.device_class.clone(),
            entry.invert_signal,
        ))
    }

    /// Two actuators driven by the same sender address shadow each other;
    /// worth a warning, not an error.
    fn check_sender_collisions(&self) {
        let mut seen: HashMap<[u8; 4], &str> = HashMap::new();
        let senders = self
            .covers
            .iter()
            .map(|c| (c.sender_address().bytes(), c.name()))
            .chain(
                self.climates
                    .iter()
                    .map(|c| (c.sender_address().bytes(), c.name())),
            );
        for (sender, name) in senders {
            if let Some(other) = seen.insert(sender, name) {
                self.logger.warn(&format!(
                    "Sender address {} is shared by '{}' and '{}'",
                    DeviceAddress::from_bytes(sender),
                    other,
                    name
                ));
            }
        }
    }

    /// Run the bridge main loop
    pub async fn run(&mut self) -> Result<()> {
        self.logger.info("Starting EnOcean bridge main loop");

        loop {
            tokio::select! {
                maybe_telegram = self.telegrams_rx.recv() => {
                    match maybe_telegram {
                        Some(telegram) => self.dispatch_telegram(&telegram),
                        None => {
                            self.logger.info("Telegram channel closed by transport");
                            break;
                        }
                    }
                }
                Some(cmd) = self.commands_rx.recv() => {
                    self.handle_command(cmd);
                }
                _ = self.shutdown_rx.recv() => {
                    self.logger.info("Shutdown signal received");
                    break;
                }
            }
        }

        self.logger.info("Bridge shutdown complete");
        Ok(())
    }

    /// Route an inbound telegram to every entity with a matching address.
    /// The qualifier is not part of the match: telegrams carry no qualifier,
    /// entities sharing an address each get the update.
    fn dispatch_telegram(&mut self, telegram: &Telegram) {
        let source = telegram.address();
        let mut matched = false;

        for cover in &mut self.covers {
            if cover.device_address().bytes() == source {
                cover.value_changed(telegram);
                publish_state(&self.state_tx, cover);
                matched = true;
            }
        }
        for climate in &mut self.climates {
            if climate.device_address().bytes() == source {
                climate.value_changed(telegram);
                publish_state(&self.state_tx, climate);
                matched = true;
            }
        }
        for sensor in &mut self.binary_sensors {
            if sensor.device_address().bytes() == source {
                sensor.value_changed(telegram);
                publish_state(&self.state_tx, sensor);
                matched = true;
            }
        }

        if !matched {
            self.logger.debug(&format!(
                "No entity for {} telegram from {}",
                telegram.org(),
                DeviceAddress::from_bytes(source)
            ));
        }
    }

    /// Handle a platform command
    fn handle_command(&mut self, cmd: BridgeCommand) {
        let result = match cmd {
            BridgeCommand::OpenCover { entity_id } => {
                self.with_cover(&entity_id, Cover::open_cover)
            }
            BridgeCommand::CloseCover { entity_id } => {
                self.with_cover(&entity_id, Cover::close_cover)
            }
            BridgeCommand::StopCover { entity_id } => {
                self.with_cover(&entity_id, Cover::stop_cover)
            }
            BridgeCommand::SetCoverPosition {
                entity_id,
                position,
            } => self.with_cover(&entity_id, |c| c.set_cover_position(position)),
            BridgeCommand::SetTemperature { entity_id, target } => {
                self.with_climate(&entity_id, |c| c.set_temperature(target))
            }
        };

        if let Err(e) = result {
            self.logger.warn(&format!("Command failed: {}", e));
        }
    }

    fn with_cover(
        &mut self,
        entity_id: &str,
        f: impl FnOnce(&mut Cover) -> Result<()>,
    ) -> Result<()> {
        let Some(cover) = self
            .covers
            .iter_mut()
            .find(|c| c.unique_id() == entity_id)
        else {
            return Err(SiroccoError::generic(format!(
                "unknown cover '{}'",
                entity_id
            )));
        };
        f(cover)?;
        publish_state(&self.state_tx, cover);
        Ok(())
    }

    fn with_climate(
        &mut self,
        entity_id: &str,
        f: impl FnOnce(&mut Climate) -> Result<()>,
    ) -> Result<()> {
        let Some(climate) = self
            .climates
            .iter_mut()
            .find(|c| c.unique_id() == entity_id)
        else {
            return Err(SiroccoError::generic(format!(
                "unknown climate controller '{}'",
                entity_id
            )));
        };
        f(climate)?;
        publish_state(&self.state_tx, climate);
        Ok(())
    }

    /// All entities as trait objects, covers first
    pub fn entities(&self) -> impl Iterator<Item = &dyn Entity> {
        self.covers
            .iter()
            .map(|c| c as &dyn Entity)
            .chain(self.climates.iter().map(|c| c as &dyn Entity))
            .chain(self.binary_sensors.iter().map(|s| s as &dyn Entity))
    }

    /// Snapshot of every entity's state keyed by unique id
    pub fn snapshot(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        for entity in self.entities() {
            root.insert(
                entity.unique_id().to_string(),
                serde_json::json!({
                    "name": entity.name(),
                    "platform": entity.platform().as_str(),
                    "state": entity.state_json(),
                }),
            );
        }
        serde_json::Value::Object(root)
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sender half of the command channel for other subsystems
    pub fn command_sender(&self) -> mpsc::UnboundedSender<BridgeCommand> {
        self.commands_tx.clone()
    }

    /// Handle that stops the main loop when signalled
    pub fn shutdown_handle(&self) -> mpsc::UnboundedSender<()> {
        self.shutdown_tx.clone()
    }

    /// Subscribe to entity state snapshots
    pub fn subscribe_state(&self) -> broadcast::Receiver<String> {
        self.state_tx.subscribe()
    }

    /// Subscribe to platform bus events
    pub fn subscribe_events(&self) -> broadcast::Receiver<PlatformEvent> {
        self.events.subscribe()
    }
}

/// Publish one entity's state snapshot for host-platform consumers
fn publish_state(state_tx: &broadcast::Sender<String>, entity: &dyn Entity) {
    let snapshot = serde_json::json!({
        "unique_id": entity.unique_id(),
        "platform": entity.platform().as_str(),
        "state": entity.state_json(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    let _ = state_tx.send(snapshot.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GatewayConfig, SenderConfig};

    fn test_config() -> Config {
        Config {
            gateway: GatewayConfig {
                id: 123,
                name: "test gateway".to_string(),
                base_id: "FF-80-00-00".to_string(),
            },
            covers: vec![CoverConfig {
                id: "00-00-00-04".to_string(),
                name: "Shutter".to_string(),
                eep: "G5-3F-7F".to_string(),
                sender: SenderConfig {
                    id: "FF-80-00-04".to_string(),
                    eep: "H5-3F-7F".to_string(),
                },
                device_class: Some("shutter".to_string()),
                time_closes: Some(24),
                time_opens: Some(25),
            }],
            binary_sensors: vec![BinarySensorConfig {
                id: "00-00-00-01 left".to_string(),
                name: "Wall switch".to_string(),
                eep: "F6-02-01".to_string(),
                device_class: None,
                invert_signal: false,
            }],
            ..Default::default()
        }
    }

    fn build_bridge(config: Config) -> (EnoceanBridge, mpsc::UnboundedReceiver<Telegram>) {
        let (_telegram_tx, telegram_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let bridge = EnoceanBridge::new(config, telegram_rx, cmd_rx, cmd_tx, outbound_tx).unwrap();
        (bridge, outbound_rx)
    }

    #[test]
    fn setup_builds_configured_entities() {
        let (bridge, _outbound) = build_bridge(test_config());
        assert_eq!(bridge.entities().count(), 2);
        let snapshot = bridge.snapshot();
        assert!(snapshot.get("enocean_gw123_00000004").is_some());
        assert!(snapshot.get("enocean_gw123_00000001_left").is_some());
    }

    #[test]
    fn setup_skips_unknown_profile() {
        let mut config = test_config();
        config.binary_sensors[0].eep = "F6-99-01".to_string();
        let (bridge, _outbound) = build_bridge(config);
        assert_eq!(bridge.entities().count(), 1);
    }

    #[test]
    fn dispatch_updates_matching_entity() {
        let (mut bridge, _outbound) = build_bridge(test_config());
        let mut state_rx = bridge.subscribe_state();

        bridge.dispatch_telegram(&Telegram::FourBs {
            address: [0, 0, 0, 4],
            data: [0, 0, 0x50, 0x08],
        });

        assert!(bridge.covers[0].is_closed());
        assert_eq!(bridge.covers[0].position(), 0);

        let snapshot = state_rx.try_recv().unwrap();
        assert!(snapshot.contains("enocean_gw123_00000004"));
    }

    #[test]
    fn command_routes_to_cover_by_unique_id() {
        let (mut bridge, mut outbound_rx) = build_bridge(test_config());
        bridge.handle_command(BridgeCommand::CloseCover {
            entity_id: "enocean_gw123_00000004".to_string(),
        });
        assert!(bridge.covers[0].is_closing());
        // 24 s configured closing time plus 1 s overrun, downwards
        assert_eq!(
            outbound_rx.try_recv().unwrap(),
            Telegram::FourBs {
                address: [0xFF, 0x80, 0x00, 0x04],
                data: [0, 25, 0x02, 0x08],
            }
        );
    }

    #[test]
    fn unknown_command_target_is_not_fatal() {
        let (mut bridge, _outbound) = build_bridge(test_config());
        bridge.handle_command(BridgeCommand::OpenCover {
            entity_id: "enocean_gw123_deadbeef".to_string(),
        });
    }
}
