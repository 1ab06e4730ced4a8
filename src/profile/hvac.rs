//! A5-10-06 temperature controller decoding
//!
//! 4BS layout (DB3..DB0): DB3 carries the heater mode byte, DB2 the target
//! set-point scaled 0..=255 over 0..=40 degrees, DB1 the measured room
//! temperature on the inverse scale (255 = 0 degrees). DB0 bit 3 clear marks
//! a teach-in telegram.

use crate::error::{Result, SiroccoError};

/// Heater operating mode as reported by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterMode {
    /// Regular heating operation
    Normal,
    /// Stand-by, set-point lowered by 2 degrees
    Standby,
    /// Night set-back, set-point lowered by 4 degrees
    NightSetback,
    /// Controller off
    Off,
}

impl HeaterMode {
    fn from_code(code: u8) -> Result<Self> {
        match code {
            0x70 => Ok(HeaterMode::Normal),
            0x30 => Ok(HeaterMode::Standby),
            0x50 => Ok(HeaterMode::NightSetback),
            0x10 => Ok(HeaterMode::Off),
            other => Err(SiroccoError::decode(format!(
                "unknown heater mode code 0x{:02X}",
                other
            ))),
        }
    }
}

/// Decoded temperature controller telegram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HvacReading {
    /// Measured room temperature in degrees Celsius
    pub current_temperature: f32,

    /// Target set-point in degrees Celsius
    pub target_temperature: f32,

    /// Reported operating mode
    pub mode: HeaterMode,
}

const TEMPERATURE_SPAN: f32 = 40.0;

/// Decode the 4BS data bytes
pub fn decode(data: [u8; 4]) -> Result<HvacReading> {
    if data[3] & 0x08 == 0 {
        return Err(SiroccoError::decode("teach-in telegram"));
    }
    Ok(HvacReading {
        current_temperature: f32::from(255 - data[2]) / 255.0 * TEMPERATURE_SPAN,
        target_temperature: f32::from(data[1]) / 255.0 * TEMPERATURE_SPAN,
        mode: HeaterMode::from_code(data[0])?,
    })
}
