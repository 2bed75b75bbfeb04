//! Converts dotted-quad addresses to their integer form and back, and
//! expands inclusive address ranges into successive hosts.

use std::net::Ipv4Addr;

use crate::error::ScanError;

/// Parses a dotted-quad address into its packed big-endian integer form.
///
/// Exactly four `.`-separated segments are required, each a decimal
/// integer in `0..=255`. The first segment lands in the most significant
/// byte, so `"1.0.0.0" > "0.255.255.255"` numerically.
///
/// ```rust
/// # use portsweep::address::parse_address;
/// assert_eq!(parse_address("127.0.0.1").unwrap(), 0x7f00_0001);
/// assert!(parse_address("999.1.1.1").is_err());
/// ```
pub fn parse_address(text: &str) -> Result<u32, ScanError> {
    let err = || ScanError::InvalidAddressFormat(text.to_owned());

    let mut segments = text.split('.');
    let mut packed = 0u32;
    for _ in 0..4 {
        let octet: u8 = segments
            .next()
            .ok_or_else(err)?
            .parse()
            .map_err(|_| err())?;
        packed = (packed << 8) | u32::from(octet);
    }
    if segments.next().is_some() {
        return Err(err());
    }

    Ok(packed)
}

/// Renders a packed address back to dotted-quad text. Total inverse of
/// [`parse_address`] up to canonical decimal formatting.
#[must_use]
pub fn format_address(value: u32) -> String {
    Ipv4Addr::from(value).to_string()
}

/// An inclusive range of IPv4 addresses in packed integer form.
///
/// Construction normalizes reversed input by swapping the two ends, so
/// `low <= high` always holds afterwards. The range is immutable once
/// built and only ever consumed through [`AddressRange::iter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    low: u32,
    high: u32,
}

impl AddressRange {
    /// Builds a range from the two textual ends, parsing each
    /// independently. Supplying the ends in reverse order is fine; they
    /// are swapped into ascending order rather than rejected.
    pub fn new(start: &str, end: &str) -> Result<Self, ScanError> {
        let start = parse_address(start)?;
        let end = parse_address(end)?;
        let (low, high) = if start > end { (end, start) } else { (start, end) };
        Ok(Self { low, high })
    }

    /// Number of addresses covered, counting both ends.
    #[must_use]
    pub fn count(&self) -> u64 {
        u64::from(self.high - self.low) + 1
    }

    /// Lazy ascending sequence of every address in the range. Restartable:
    /// each call yields a fresh iterator starting at the low end.
    pub fn iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        (self.low..=self.high).map(Ipv4Addr::from)
    }
}

#[cfg(test)]
mod tests {
    use super::{format_address, parse_address, AddressRange};
    use crate::error::ScanError;
    use std::net::Ipv4Addr;

    #[test]
    fn parse_packs_big_endian() {
        assert_eq!(parse_address("0.0.0.0").unwrap(), 0);
        assert_eq!(parse_address("255.255.255.255").unwrap(), u32::MAX);
        assert_eq!(parse_address("10.0.0.1").unwrap(), 0x0a00_0001);
        assert_eq!(parse_address("192.168.1.254").unwrap(), 0xc0a8_01fe);
    }

    #[test]
    fn parse_rejects_out_of_range_segment() {
        for bad in ["999.1.1.1", "1.256.1.1", "1.1.1.300", "-1.0.0.0"] {
            assert_eq!(
                parse_address(bad),
                Err(ScanError::InvalidAddressFormat(bad.to_owned()))
            );
        }
    }

    #[test]
    fn parse_rejects_wrong_segment_count() {
        for bad in ["1.2.3", "1.2.3.4.5", "1", "", "1.2.3."] {
            assert!(parse_address(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn parse_rejects_non_numeric_segments() {
        for bad in ["a.b.c.d", "1.2.x.4", "1..3.4", "localhost"] {
            assert!(parse_address(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn format_round_trips() {
        for text in ["0.0.0.0", "127.0.0.1", "10.20.30.40", "255.255.255.255"] {
            assert_eq!(format_address(parse_address(text).unwrap()), text);
        }
    }

    #[test]
    fn range_iterates_every_address_in_order() {
        let range = AddressRange::new("10.0.0.254", "10.0.1.2").unwrap();
        let hosts: Vec<Ipv4Addr> = range.iter().collect();

        assert_eq!(range.count(), 5);
        assert_eq!(
            hosts,
            [
                Ipv4Addr::new(10, 0, 0, 254),
                Ipv4Addr::new(10, 0, 0, 255),
                Ipv4Addr::new(10, 0, 1, 0),
                Ipv4Addr::new(10, 0, 1, 1),
                Ipv4Addr::new(10, 0, 1, 2),
            ]
        );
    }

    #[test]
    fn reversed_ends_are_swapped_not_rejected() {
        let range = AddressRange::new("10.0.0.5", "10.0.0.1").unwrap();
        let hosts: Vec<Ipv4Addr> = range.iter().collect();

        assert_eq!(range.count(), 5);
        assert_eq!(hosts.first(), Some(&Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(hosts.last(), Some(&Ipv4Addr::new(10, 0, 0, 5)));
    }

    #[test]
    fn single_address_range() {
        let range = AddressRange::new("127.0.0.1", "127.0.0.1").unwrap();
        assert_eq!(range.count(), 1);
        assert_eq!(
            range.iter().collect::<Vec<_>>(),
            [Ipv4Addr::new(127, 0, 0, 1)]
        );
    }

    #[test]
    fn iter_is_restartable() {
        let range = AddressRange::new("192.168.0.1", "192.168.0.3").unwrap();
        let first: Vec<Ipv4Addr> = range.iter().collect();
        let second: Vec<Ipv4Addr> = range.iter().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn bad_end_address_fails_range_construction() {
        assert!(AddressRange::new("127.0.0.1", "not-an-address").is_err());
        assert!(AddressRange::new("300.0.0.1", "127.0.0.1").is_err());
    }
}
