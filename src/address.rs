//! Device address parsing and formatting
//!
//! Bus devices are identified by a 4-byte address written as dash-separated
//! hex byte pairs, optionally followed by a free-text qualifier that
//! disambiguates logical endpoints sharing one physical address (for example
//! the left and right halves of a rocker switch): `"FF-00-00-01 left"`.

use crate::error::{Result, SiroccoError};
use std::fmt;
use std::str::FromStr;

/// A parsed device address: 4 raw bytes plus an optional qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    bytes: [u8; 4],
    qualifier: Option<String>,
}

impl DeviceAddress {
    /// Build an address from raw bytes without a qualifier
    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            bytes,
            qualifier: None,
        }
    }

    /// Parse a textual address, e.g. `"00-00-00-01"` or `"00-00-00-01 left"`.
    ///
    /// Everything after the first whitespace is kept verbatim as the
    /// qualifier, so multi-word qualifiers like `"LT RB"` survive.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SiroccoError::address("empty address"));
        }

        let (addr_part, qualifier) = match trimmed.split_once(char::is_whitespace) {
            Some((head, rest)) => {
                let q = rest.trim();
                (head, (!q.is_empty()).then(|| q.to_string()))
            }
            None => (trimmed, None),
        };

        let mut bytes = [0u8; 4];
        let mut count = 0;
        for part in addr_part.split('-') {
            if count >= 4 {
                return Err(SiroccoError::address(format!(
                    "too many byte groups in '{}'",
                    addr_part
                )));
            }
            if part.len() != 2 {
                return Err(SiroccoError::address(format!(
                    "byte group '{}' must be two hex digits",
                    part
                )));
            }
            bytes[count] = u8::from_str_radix(part, 16).map_err(|_| {
                SiroccoError::address(format!("invalid hex byte '{}' in '{}'", part, addr_part))
            })?;
            count += 1;
        }
        if count != 4 {
            return Err(SiroccoError::address(format!(
                "address '{}' must have 4 byte groups",
                addr_part
            )));
        }

        Ok(Self { bytes, qualifier })
    }

    /// Raw address bytes
    pub fn bytes(&self) -> [u8; 4] {
        self.bytes
    }

    /// Optional qualifier, e.g. `"left"` or `"LT RB"`
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// Dash-separated upper-hex rendering without the qualifier, e.g. `"FE-DB-B6-40"`
    pub fn plain(&self) -> String {
        format!(
            "{:02X}-{:02X}-{:02X}-{:02X}",
            self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]
        )
    }

    /// Contiguous lower-hex rendering used in entity ids, e.g. `"fedbb640"`
    pub fn hex_id(&self) -> String {
        self.bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.plain())?;
        if let Some(q) = &self.qualifier {
            write!(f, " {}", q)?;
        }
        Ok(())
    }
}

impl FromStr for DeviceAddress {
    type Err = SiroccoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_qualifier() {
        let addr = DeviceAddress::parse("FE-DB-B6-40").unwrap();
        assert_eq!(addr.bytes(), [0xFE, 0xDB, 0xB6, 0x40]);
        assert_eq!(addr.qualifier(), None);
        assert_eq!(addr.plain(), "FE-DB-B6-40");
    }

    #[test]
    fn parse_with_qualifier() {
        let addr = DeviceAddress::parse("00-00-00-01 left").unwrap();
        assert_eq!(addr.bytes(), [0x00, 0x00, 0x00, 0x01]);
        assert_eq!(addr.qualifier(), Some("left"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(DeviceAddress::parse("").is_err());
        assert!(DeviceAddress::parse("00-00-00").is_err());
        assert!(DeviceAddress::parse("00-00-00-GG").is_err());
        assert!(DeviceAddress::parse("00-00-00-00-00").is_err());
        assert!(DeviceAddress::parse("0-00-00-01").is_err());
    }

    #[test]
    fn display_round_trip() {
        let addr = DeviceAddress::parse("ff-00-00-01 LT RB").unwrap();
        assert_eq!(addr.to_string(), "FF-00-00-01 LT RB");
        let again = DeviceAddress::parse(&addr.to_string()).unwrap();
        assert_eq!(addr, again);
    }

    #[test]
    fn hex_id_is_contiguous_lowercase() {
        let addr = DeviceAddress::parse("FE-DB-B6-40").unwrap();
        assert_eq!(addr.hex_id(), "fedbb640");
    }
}
