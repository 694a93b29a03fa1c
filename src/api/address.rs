//! Address parsing and family checks.
//!
//! The router validates configuration itself, but a malformed address in a
//! batch can leave earlier actions applied. These helpers reject bad input
//! before anything is sent.

use std::fmt;
use std::net::IpAddr;

use ipnetwork::{IpNetwork, Ipv4Network};

use super::ValidationError;

/// IP address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpVersion {
    /// IPv4
    V4,
    /// IPv6
    V6,
}

impl IpVersion {
    /// Returns the static route node used for this family.
    #[must_use]
    pub const fn route_node(self) -> &'static str {
        match self {
            Self::V4 => "route",
            Self::V6 => "route6",
        }
    }
}

impl TryFrom<u8> for IpVersion {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(ValidationError::UnsupportedVersion(other)),
        }
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Returns the family of an address.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) count as IPv4.
#[must_use]
pub fn family_of(ip: IpAddr) -> IpVersion {
    match ip.to_canonical() {
        IpAddr::V4(_) => IpVersion::V4,
        IpAddr::V6(_) => IpVersion::V6,
    }
}

/// Parses an IP address.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidIp`] naming `field` if `value` is not
/// an IPv4 or IPv6 address.
pub fn parse_ip(field: &'static str, value: &str) -> Result<IpAddr, ValidationError> {
    value.parse().map_err(|_| ValidationError::InvalidIp {
        field,
        value: value.to_string(),
    })
}

/// Parses an address in `ip/prefix` notation.
///
/// The host bits are kept: `192.168.1.5/24` yields a network whose `ip()` is
/// `192.168.1.5`. Use [`IpNetwork::network`] to get the network address.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCidr`] naming `field` if the prefix is
/// missing, not a decimal number, or too long for the address family.
pub fn parse_cidr(field: &'static str, value: &str) -> Result<IpNetwork, ValidationError> {
    let invalid = || ValidationError::InvalidCidr {
        field,
        value: value.to_string(),
    };

    let (addr, prefix) = value.split_once('/').ok_or_else(invalid)?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let ip: IpAddr = addr.parse().map_err(|_| invalid())?;
    let prefix: u8 = prefix.parse().map_err(|_| invalid())?;

    IpNetwork::new(ip, prefix).map_err(|_| invalid())
}

/// Parses a CIDR and clears its host bits.
///
/// An IPv4-mapped IPv6 network is turned into the IPv4 network it maps, so
/// `::ffff:192.168.1.5/120` yields `192.168.1.0/24`. Its prefix must cover
/// the 96-bit mapping prefix.
pub(crate) fn parse_network(field: &'static str, value: &str) -> Result<IpNetwork, ValidationError> {
    let invalid = || ValidationError::InvalidCidr {
        field,
        value: value.to_string(),
    };

    let net = match parse_cidr(field, value)? {
        IpNetwork::V6(net) => match net.ip().to_ipv4_mapped() {
            Some(ip) => {
                let prefix = net.prefix().checked_sub(96).ok_or_else(invalid)?;
                IpNetwork::V4(Ipv4Network::new(ip, prefix).map_err(|_| invalid())?)
            }
            None => IpNetwork::V6(net),
        },
        net @ IpNetwork::V4(_) => net,
    };

    IpNetwork::new(net.network(), net.prefix()).map_err(|_| invalid())
}

/// Checks that two parsed addresses belong to the same family.
pub(crate) fn ensure_same_family(
    (left, left_ip): (&str, IpAddr),
    (right, right_ip): (&str, IpAddr),
) -> Result<IpVersion, ValidationError> {
    let left_version = family_of(left_ip);
    let right_version = family_of(right_ip);
    if left_version != right_version {
        return Err(ValidationError::FamilyMismatch {
            left: left.to_string(),
            left_version,
            right: right.to_string(),
            right_version,
        });
    }
    Ok(left_version)
}

/// Checks that an address belongs to the expected family.
pub(crate) fn ensure_version(
    field: &'static str,
    value: &str,
    ip: IpAddr,
    expected: IpVersion,
) -> Result<(), ValidationError> {
    if family_of(ip) == expected {
        Ok(())
    } else {
        Err(ValidationError::VersionMismatch {
            field,
            value: value.to_string(),
            expected,
        })
    }
}
