//! Cover travel-time estimation
//!
//! Shutter actuators report elapsed travel rather than absolute position, so
//! the position is estimated open-loop from the configured full-travel
//! durations. Drift against the physical position is expected and only
//! corrected when the actuator reports an end position.

use crate::profile::TravelDirection;

/// Runtime sentinel sent when no travel duration is configured; long enough
/// to reach an end position from anywhere.
pub const MAX_RUNTIME_SECONDS: u16 = 255;

/// Configured full-travel durations in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TravelTimes {
    /// Seconds for a full travel from closed to open
    pub opens: Option<u16>,

    /// Seconds for a full travel from open to closed
    pub closes: Option<u16>,
}

impl TravelTimes {
    /// Create from optional configured durations
    pub fn new(opens: Option<u16>, closes: Option<u16>) -> Self {
        Self { opens, closes }
    }

    fn both(&self) -> Option<(u16, u16)> {
        match (self.opens, self.closes) {
            (Some(o), Some(c)) if o > 0 && c > 0 => Some((o, c)),
            _ => None,
        }
    }

    /// Whether position estimation and set-position are available
    pub fn supports_position(&self) -> bool {
        self.both().is_some()
    }

    /// Runtime for a full open or close command: the configured duration plus
    /// one second of overrun, or the sentinel when unconfigured.
    pub fn command_seconds(&self, direction: TravelDirection) -> u16 {
        let configured = match direction {
            TravelDirection::Up => self.opens,
            TravelDirection::Down => self.closes,
        };
        configured
            .map(|t| t.saturating_add(1))
            .unwrap_or(MAX_RUNTIME_SECONDS)
    }

    /// Direction and runtime to move from `current` to `target` (both 0-100,
    /// 100 = fully open). Returns `None` when no movement is needed or when
    /// the travel durations are not configured.
    pub fn seconds_for_span(&self, current: u8, target: u8) -> Option<(TravelDirection, u16)> {
        let (opens, closes) = self.both()?;
        if target == current {
            return None;
        }
        if target >= 100 {
            return Some((TravelDirection::Up, opens.saturating_add(1)));
        }
        if target == 0 {
            return Some((TravelDirection::Down, closes.saturating_add(1)));
        }

        let (direction, span, full) = if target > current {
            (TravelDirection::Up, target - current, opens)
        } else {
            (TravelDirection::Down, current - target, closes)
        };
        let seconds = (f64::from(span) / 100.0 * f64::from(full)) as u16;
        Some((direction, seconds.min(MAX_RUNTIME_SECONDS)))
    }

    /// New position estimate after a reported travel of `tenths` tenths of a
    /// second. Returns `None` when the travel durations are not configured.
    pub fn position_after_travel(
        &self,
        position: u8,
        tenths: u16,
        direction: TravelDirection,
    ) -> Option<u8> {
        let (opens, closes) = self.both()?;
        let seconds = f64::from(tenths) / 10.0;
        let new_position = match direction {
            TravelDirection::Up => {
                let delta = (seconds / f64::from(opens) * 100.0) as u16;
                u16::from(position).saturating_add(delta).min(100)
            }
            TravelDirection::Down => {
                let delta = (seconds / f64::from(closes) * 100.0) as u16;
                u16::from(position).saturating_sub(delta)
            }
        };
        Some(new_position as u8)
    }
}
