//! Shutter actuator profiles
//!
//! G5-3F-7F status decoding and H5-3F-7F command encoding, both 4BS with
//! bytes ordered DB3..DB0.
//!
//! Status telegrams come in two shapes. With DB3/DB2 zero, DB1 carries a
//! discrete state code; otherwise DB3..DB2 is the big-endian elapsed travel
//! time in tenths of a second and DB1 the travel direction. Command
//! telegrams carry the runtime in whole seconds in DB3..DB2 and the command
//! code in DB1.

use crate::error::{Result, SiroccoError};
use crate::telegram::Telegram;

/// Discrete shutter state codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterState {
    /// Actuator started moving up
    MovingUp,
    /// Actuator started moving down
    MovingDown,
    /// Upper end position reached
    Open,
    /// Lower end position reached
    Closed,
}

/// Travel direction reported alongside an elapsed travel time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    Up,
    Down,
}

/// Decoded shutter status telegram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterReading {
    /// Discrete state change
    State(ShutterState),

    /// Completed travel: elapsed time in tenths of a second plus direction
    Travel {
        tenths: u16,
        direction: TravelDirection,
    },
}

/// Command codes accepted by the actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterCommand {
    Stop,
    Up,
    Down,
}

impl ShutterCommand {
    fn code(self) -> u8 {
        match self {
            ShutterCommand::Stop => 0x00,
            ShutterCommand::Up => 0x01,
            ShutterCommand::Down => 0x02,
        }
    }
}

/// Decode a G5-3F-7F status telegram from its 4BS data bytes
pub fn decode(data: [u8; 4]) -> Result<ShutterReading> {
    if data[3] & 0x08 == 0 {
        return Err(SiroccoError::decode("teach-in telegram"));
    }

    if data[0] == 0 && data[1] == 0 {
        let state = match data[2] {
            0x01 => ShutterState::MovingUp,
            0x02 => ShutterState::MovingDown,
            0x70 => ShutterState::Open,
            0x50 => ShutterState::Closed,
            other => {
                return Err(SiroccoError::decode(format!(
                    "unknown shutter state code 0x{:02X}",
                    other
                )));
            }
        };
        return Ok(ShutterReading::State(state));
    }

    let direction = match data[2] {
        0x01 => TravelDirection::Up,
        0x02 => TravelDirection::Down,
        other => {
            return Err(SiroccoError::decode(format!(
                "unknown travel direction 0x{:02X}",
                other
            )));
        }
    };
    Ok(ShutterReading::Travel {
        tenths: u16::from_be_bytes([data[0], data[1]]),
        direction,
    })
}

/// Encode an H5-3F-7F command telegram.
///
/// `seconds` is the runtime the actuator should drive for; the actuator
/// stops on its own at an end position.
pub fn encode_command(sender: [u8; 4], seconds: u16, command: ShutterCommand) -> Telegram {
    let [msb, lsb] = seconds.to_be_bytes();
    Telegram::FourBs {
        address: sender,
        data: [msb, lsb, command.code(), 0x08],
    }
}
