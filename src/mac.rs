use std::fmt;
use std::str::FromStr;

use crate::error::DeauthError;

/// Length of the canonical `XX:XX:XX:XX:XX:XX` representation.
const MAC_STR_LEN: usize = 17;

/// A six byte hardware address.
///
/// ```
/// use deauth_oxide::mac::MacAddress;
///
/// let address: MacAddress = "aa:bb:cc:dd:ee:ff".parse().unwrap();
/// assert_eq!(address.to_string(), "AA:BB:CC:DD:EE:FF");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub fn broadcast() -> Self {
        MacAddress([255, 255, 255, 255, 255, 255])
    }

    /// Encode mac address for network.
    pub fn encode(&self) -> [u8; 6] {
        self.0
    }

    /// Generate string with delimitters.
    pub fn to_long_string(&self) -> String {
        format!(
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5],
        )
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_long_string())
    }
}

impl FromStr for MacAddress {
    type Err = DeauthError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || DeauthError::InvalidAddress(input.to_string());

        if input.len() != MAC_STR_LEN {
            return Err(invalid());
        }

        let mut array = [0u8; 6];
        let mut octets = input.split(':');
        for place in array.iter_mut() {
            let octet = octets.next().ok_or_else(invalid)?;
            // from_str_radix alone would let "+f" through
            if octet.len() != 2 || !octet.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            *place = u8::from_str_radix(octet, 16).map_err(|_| invalid())?;
        }

        if octets.next().is_some() {
            return Err(invalid());
        }

        Ok(MacAddress(array))
    }
}

impl TryFrom<&str> for MacAddress {
    type Error = DeauthError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

pub fn validate_mac_address(input: &str) -> Result<(), DeauthError> {
    input.parse::<MacAddress>().map(|_| ())
}
