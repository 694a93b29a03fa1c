//! Tests for address parsing and family checks.

use std::net::IpAddr;

use super::address::{ensure_same_family, ensure_version, parse_network};
use super::{IpVersion, ValidationError, family_of, parse_cidr, parse_ip};

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

mod ip_version {
    use super::*;

    #[test]
    fn try_from_accepts_4_and_6() {
        assert_eq!(IpVersion::try_from(4).unwrap(), IpVersion::V4);
        assert_eq!(IpVersion::try_from(6).unwrap(), IpVersion::V6);
    }

    #[test]
    fn try_from_rejects_other_numbers() {
        assert_eq!(
            IpVersion::try_from(5),
            Err(ValidationError::UnsupportedVersion(5))
        );
    }

    #[test]
    fn route_node_depends_on_family() {
        assert_eq!(IpVersion::V4.route_node(), "route");
        assert_eq!(IpVersion::V6.route_node(), "route6");
    }

    #[test]
    fn display_names_family() {
        assert_eq!(IpVersion::V4.to_string(), "IPv4");
        assert_eq!(IpVersion::V6.to_string(), "IPv6");
    }
}

mod parsing {
    use super::*;

    #[test]
    fn parse_ip_accepts_both_families() {
        assert_eq!(parse_ip("next hop", "10.0.0.1").unwrap(), ip("10.0.0.1"));
        assert_eq!(parse_ip("next hop", "2001:db8::1").unwrap(), ip("2001:db8::1"));
    }

    #[test]
    fn parse_ip_rejects_garbage_and_cidr() {
        for value in ["", "10.0.0", "10.0.0.256", "10.0.0.1/24", "eth0"] {
            assert_eq!(
                parse_ip("next hop", value),
                Err(ValidationError::InvalidIp {
                    field: "next hop",
                    value: value.to_string(),
                }),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn parse_cidr_keeps_host_bits() {
        let net = parse_cidr("address", "192.168.1.5/24").unwrap();

        assert_eq!(net.ip(), ip("192.168.1.5"));
        assert_eq!(net.prefix(), 24);
    }

    #[test]
    fn parse_cidr_accepts_ipv6() {
        let net = parse_cidr("address", "2001:db8::1/64").unwrap();
        assert_eq!(net.prefix(), 64);
    }

    #[test]
    fn parse_cidr_rejects_malformed_values() {
        for value in [
            "192.168.1.1",
            "192.168.1.1/",
            "192.168.1.1/33",
            "192.168.1.1/-1",
            "192.168.1.1/+8",
            "2001:db8::/129",
            "/24",
            "not-an-ip/24",
        ] {
            assert!(
                matches!(
                    parse_cidr("address", value),
                    Err(ValidationError::InvalidCidr { field: "address", .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn parse_network_clears_host_bits() {
        let net = parse_network("destination", "192.168.1.5/24").unwrap();
        assert_eq!(net.to_string(), "192.168.1.0/24");

        let net = parse_network("destination", "2001:db8::abcd/32").unwrap();
        assert_eq!(net.to_string(), "2001:db8::/32");
    }

    #[test]
    fn parse_cidr_accepts_leading_zeros_in_prefix() {
        let net = parse_cidr("address", "192.168.1.1/024").unwrap();
        assert_eq!(net.prefix(), 24);
        assert_eq!(net.ip(), ip("192.168.1.1"));
    }

    #[test]
    fn parse_network_unmaps_ipv4_mapped_network() {
        let net = parse_network("destination", "::ffff:192.168.1.5/120").unwrap();
        assert_eq!(net.to_string(), "192.168.1.0/24");
        assert!(net.ip().is_ipv4());
    }

    #[test]
    fn parse_network_rejects_mapped_prefix_shorter_than_mapping() {
        assert_eq!(
            parse_network("destination", "::ffff:192.168.1.5/64"),
            Err(ValidationError::InvalidCidr {
                field: "destination",
                value: "::ffff:192.168.1.5/64".to_string(),
            })
        );
    }
}

mod families {
    use super::*;

    #[test]
    fn family_of_treats_mapped_ipv6_as_ipv4() {
        assert_eq!(family_of(ip("10.0.0.1")), IpVersion::V4);
        assert_eq!(family_of(ip("::ffff:10.0.0.1")), IpVersion::V4);
        assert_eq!(family_of(ip("2001:db8::1")), IpVersion::V6);
    }

    #[test]
    fn ensure_same_family_accepts_matching_pair() {
        let version =
            ensure_same_family(("10.0.0.1", ip("10.0.0.1")), ("8.8.8.8", ip("8.8.8.8"))).unwrap();
        assert_eq!(version, IpVersion::V4);
    }

    #[test]
    fn ensure_same_family_rejects_mixed_pair() {
        let err = ensure_same_family(
            ("10.0.0.1", ip("10.0.0.1")),
            ("2001:db8::1", ip("2001:db8::1")),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ValidationError::FamilyMismatch {
                left_version: IpVersion::V4,
                right_version: IpVersion::V6,
                ..
            }
        ));
        assert!(err.to_string().contains("2001:db8::1"));
    }

    #[test]
    fn ensure_version_rejects_wrong_family() {
        let err = ensure_version("next hop", "10.0.0.1", ip("10.0.0.1"), IpVersion::V6)
            .unwrap_err();

        assert_eq!(err.to_string(), "next hop '10.0.0.1' is not an IPv6 address");
    }
}
