//! # Sirocco - EnOcean Bus Bridge for Smart Home Platforms
//!
//! A Rust bridge daemon connecting an EnOcean-style serial/radio bus to a
//! smart-home platform's entity model, exposing covers, climate controllers
//! and binary sensors backed by physical bus devices.
//!
//! ## Features
//!
//! - **Async-first**: Tokio runtime with channel seams to the transport
//! - **Equipment profiles**: codec registry for the shipped device profiles
//! - **Covers**: open/close/stop/set-position with travel-time estimation
//! - **Climate**: temperature and HVAC action from controller telegrams
//! - **Binary sensors**: rocker events and contact state with inversion
//! - **Configuration**: YAML-based configuration with validation
//!
//! ## Architecture
//!
//! The application follows a modular architecture with clear separation of concerns:
//!
//! - `config`: Configuration management and validation
//! - `logging`: Structured logging and tracing
//! - `address`: Device address parsing and formatting
//! - `telegram`: Bus message units (RPS/1BS/4BS)
//! - `profile`: Equipment-profile codecs and registry
//! - `travel`: Cover travel-time position estimation
//! - `entity`: Cover, climate and binary-sensor adapters
//! - `events`: Platform bus events for stateless inputs
//! - `gateway`: Handle for the external transport collaborator
//! - `bridge`: Orchestration loop dispatching telegrams and commands

pub mod address;
pub mod bridge;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod gateway;
pub mod logging;
pub mod profile;
pub mod telegram;
pub mod travel;

/// Platform domain prefix used for entity ids and bus event types
pub const DOMAIN: &str = "enocean";

// Re-export commonly used types
pub use bridge::EnoceanBridge;
pub use config::Config;
pub use error::{Result, SiroccoError};
