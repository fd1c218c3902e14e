use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::api::InvalidValue;

/// An IPv4 network mask, such as `255.255.255.0`.
///
/// Parses from dotted-decimal or eight hex digits (`ffffff00`), and renders as dotted-decimal.
/// Non-contiguous masks are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpMask(Ipv4Addr);

impl Default for IpMask {
    fn default() -> Self {
        Self(Ipv4Addr::UNSPECIFIED)
    }
}

impl IpMask {
    /// Create a mask from its address form.
    pub fn new(mask: Ipv4Addr) -> Self {
        Self(mask)
    }

    /// Create the contiguous mask with `length` leading one bits.
    /// Returns `None` when `length` exceeds 32.
    pub fn from_prefix(length: u8) -> Option<Self> {
        match length {
            0 => Some(Self(Ipv4Addr::from(0))),
            1..=32 => Some(Self(Ipv4Addr::from(u32::MAX << (32 - length)))),
            _ => None,
        }
    }

    /// The prefix length, or `None` for a non-contiguous mask.
    pub fn prefix_len(&self) -> Option<u8> {
        let bits = u32::from(self.0);
        let ones = bits.leading_ones();
        let contiguous = if ones == 0 { 0 } else { u32::MAX << (32 - ones) };

        if bits == contiguous {
            // At most 32.
            Some(ones as u8)
        } else {
            None
        }
    }

    /// The mask in address form.
    pub fn addr(&self) -> Ipv4Addr {
        self.0
    }
}

impl From<Ipv4Addr> for IpMask {
    fn from(value: Ipv4Addr) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for IpMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IpMask {
    type Err = InvalidValue;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();

        if trimmed.len() == 8 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            if let Ok(bits) = u32::from_str_radix(trimmed, 16) {
                return Ok(Self(Ipv4Addr::from(bits)));
            }
        }

        trimmed.parse::<Ipv4Addr>().map(Self).map_err(|_| {
            InvalidValue::conversion(value, "ipMask", "expected a dotted-decimal or hex mask")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("255.255.255.0", [255, 255, 255, 0])]
    #[case(" 255.255.0.0 ", [255, 255, 0, 0])]
    #[case("ffffff00", [255, 255, 255, 0])]
    #[case("FFFFFFFF", [255, 255, 255, 255])]
    #[case("255.0.255.0", [255, 0, 255, 0])]
    fn parse(#[case] text: &str, #[case] octets: [u8; 4]) {
        assert_eq!(IpMask::from_str(text).unwrap(), IpMask::from(Ipv4Addr::from(octets)));
    }

    #[rstest]
    #[case("")]
    #[case("255.255.255")]
    #[case("ffff")]
    #[case("255.255.255.0/24")]
    #[case("fffffg00")]
    fn parse_invalid(#[case] text: &str) {
        assert_matches!(
            IpMask::from_str(text),
            Err(InvalidValue::InvalidConversion { token, .. }) if token == text
        );
    }

    #[rstest]
    #[case(0, "0.0.0.0")]
    #[case(8, "255.0.0.0")]
    #[case(20, "255.255.240.0")]
    #[case(32, "255.255.255.255")]
    fn prefix(#[case] length: u8, #[case] expected: &str) {
        let mask = IpMask::from_prefix(length).unwrap();
        assert_eq!(mask.to_string(), expected);
        assert_eq!(mask.prefix_len(), Some(length));
    }

    #[test]
    fn default_is_empty_mask() {
        assert_eq!(IpMask::default().to_string(), "0.0.0.0");
        assert_eq!(IpMask::default().prefix_len(), Some(0));
    }

    #[test]
    fn prefix_invalid() {
        assert_eq!(IpMask::from_prefix(33), None);
        assert_eq!(
            IpMask::new(Ipv4Addr::new(255, 0, 255, 0)).prefix_len(),
            None
        );
    }
}
