//! Equipment-profile codecs and registry
//!
//! An equipment profile (EEP) describes how a device encodes its readings and
//! commands inside a telegram. Profiles are identified by a dashed triple
//! such as `"F6-02-01"`; [`Profile::find`] resolves an identifier to a codec
//! or fails, which callers treat as a per-device, non-fatal setup error.
//!
//! Only the profiles consumed by the shipped platforms are implemented:
//!
//! - `F6-02-01` rocker switch (RPS, decode)
//! - `D5-00-01` single contact (1BS, decode)
//! - `A5-10-06` temperature controller (4BS, decode)
//! - `G5-3F-7F` shutter status (4BS, decode)
//! - `H5-3F-7F` shutter command (4BS, encode)

pub mod contact;
pub mod hvac;
pub mod rocker;
pub mod shutter;

use crate::error::{Result, SiroccoError};
use crate::telegram::Telegram;
use std::fmt;
use std::str::FromStr;

pub use contact::ContactReading;
pub use hvac::{HeaterMode, HvacReading};
pub use rocker::RockerReading;
pub use shutter::{ShutterCommand, ShutterReading, ShutterState, TravelDirection};

/// Equipment-profile identifier in canonical dashed form, e.g. `"G5-3F-7F"`.
///
/// The first group may carry a manufacturer pseudo-RORG letter (Eltako's G5
/// and H5), so groups are validated as two alphanumeric characters rather
/// than parsed as hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileId(String);

impl ProfileId {
    /// Parse and canonicalize a dashed identifier such as `"f6-02-01"`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();
        if parts.len() != 3 {
            return Err(SiroccoError::profile(format!(
                "profile id '{}' must have 3 groups",
                input
            )));
        }
        for part in &parts {
            if part.len() != 2 || !part.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(SiroccoError::profile(format!(
                    "invalid group '{}' in profile id '{}'",
                    part, input
                )));
            }
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Canonical dashed upper-case form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProfileId {
    type Err = SiroccoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A resolved equipment-profile codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// F6-02-01 two-rocker switch
    RockerSwitch,
    /// D5-00-01 single input contact
    SingleContact,
    /// A5-10-06 temperature controller
    TemperatureController,
    /// G5-3F-7F shutter actuator status
    ShutterStatus,
    /// H5-3F-7F shutter actuator command (encode-only)
    ShutterCommand,
}

/// A decoded telegram, structured per profile family
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    Rocker(RockerReading),
    Contact(ContactReading),
    Hvac(HvacReading),
    Shutter(ShutterReading),
}

impl Profile {
    /// Resolve a profile identifier to a codec
    pub fn find(id: &ProfileId) -> Result<Self> {
        match id.as_str() {
            "F6-02-01" => Ok(Profile::RockerSwitch),
            "D5-00-01" => Ok(Profile::SingleContact),
            "A5-10-06" => Ok(Profile::TemperatureController),
            "G5-3F-7F" => Ok(Profile::ShutterStatus),
            "H5-3F-7F" => Ok(Profile::ShutterCommand),
            other => Err(SiroccoError::profile(format!(
                "unknown profile '{}'",
                other
            ))),
        }
    }

    /// Identifier of this profile
    pub fn id(&self) -> ProfileId {
        let text = match self {
            Profile::RockerSwitch => "F6-02-01",
            Profile::SingleContact => "D5-00-01",
            Profile::TemperatureController => "A5-10-06",
            Profile::ShutterStatus => "G5-3F-7F",
            Profile::ShutterCommand => "H5-3F-7F",
        };
        ProfileId(text.to_string())
    }

    /// Decode a telegram into a structured reading
    pub fn decode(&self, telegram: &Telegram) -> Result<Reading> {
        match self {
            Profile::RockerSwitch => match telegram {
                Telegram::Rps { data, .. } => Ok(Reading::Rocker(rocker::decode(*data))),
                other => Err(SiroccoError::decode(format!(
                    "rocker switch expects RPS, got {}",
                    other.org()
                ))),
            },
            Profile::SingleContact => match telegram {
                Telegram::OneBs { data, .. } => Ok(Reading::Contact(contact::decode(*data))),
                other => Err(SiroccoError::decode(format!(
                    "contact expects 1BS, got {}",
                    other.org()
                ))),
            },
            Profile::TemperatureController => match telegram {
                Telegram::FourBs { data, .. } => Ok(Reading::Hvac(hvac::decode(*data)?)),
                other => Err(SiroccoError::decode(format!(
                    "temperature controller expects 4BS, got {}",
                    other.org()
                ))),
            },
            Profile::ShutterStatus => match telegram {
                Telegram::FourBs { data, .. } => Ok(Reading::Shutter(shutter::decode(*data)?)),
                other => Err(SiroccoError::decode(format!(
                    "shutter status expects 4BS, got {}",
                    other.org()
                ))),
            },
            Profile::ShutterCommand => Err(SiroccoError::decode(
                "shutter command profile is encode-only",
            )),
        }
    }
}
