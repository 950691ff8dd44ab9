use crate::ConfigError;
use core::fmt;
use core::str::FromStr;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// The address of one agent, an IPv4 host and a UDP port.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AgentAddress(SocketAddrV4);

impl AgentAddress {
    pub const fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self(SocketAddrV4::new(ip, port))
    }

    pub const fn ip(&self) -> &Ipv4Addr {
        self.0.ip()
    }

    pub const fn port(&self) -> u16 {
        self.0.port()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(self.0)
    }

    /// Parses a comma-separated list of `ip:port` entries.
    ///
    /// Surrounding whitespace on each entry is ignored. A single bad entry
    /// rejects the whole list, so callers never see a partial set.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoAgents`] if the list is blank
    /// - [`ConfigError::EmptyEntry`] for an empty item such as `a:1,,b:2`
    /// - [`ConfigError::MissingPort`], [`ConfigError::InvalidIp`] or
    ///   [`ConfigError::InvalidPort`] for a malformed entry
    ///
    /// # Example
    ///
    /// ```
    /// use uniqid::AgentAddress;
    ///
    /// let agents = AgentAddress::parse_list("127.0.0.1:6200, 10.0.0.2:6200").unwrap();
    /// assert_eq!(agents.len(), 2);
    /// assert_eq!(agents[1].port(), 6200);
    /// ```
    pub fn parse_list(list: &str) -> Result<Vec<Self>, ConfigError> {
        if list.trim().is_empty() {
            return Err(ConfigError::NoAgents);
        }

        list.split(',')
            .enumerate()
            .map(|(index, entry)| {
                let entry = entry.trim();
                if entry.is_empty() {
                    return Err(ConfigError::EmptyEntry { index });
                }
                entry.parse()
            })
            .collect()
    }
}

impl FromStr for AgentAddress {
    type Err = ConfigError;

    fn from_str(entry: &str) -> Result<Self, Self::Err> {
        let (ip, port) = entry
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::MissingPort {
                entry: entry.to_owned(),
            })?;

        let ip = ip.trim().parse::<Ipv4Addr>().map_err(|_| ConfigError::InvalidIp {
            entry: entry.to_owned(),
        })?;

        // Port 0 cannot be a datagram destination.
        let port = port
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|port| *port != 0)
            .ok_or_else(|| ConfigError::InvalidPort {
                entry: entry.to_owned(),
            })?;

        Ok(Self::new(ip, port))
    }
}

impl From<SocketAddrV4> for AgentAddress {
    fn from(addr: SocketAddrV4) -> Self {
        Self(addr)
    }
}

impl fmt::Display for AgentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_entry() {
        let agents = AgentAddress::parse_list("192.168.1.10:6200").unwrap();
        assert_eq!(
            agents,
            vec![AgentAddress::new(Ipv4Addr::new(192, 168, 1, 10), 6200)]
        );
        assert_eq!(agents[0].to_string(), "192.168.1.10:6200");
    }

    #[test]
    fn parses_list_with_whitespace_and_duplicates() {
        let agents = AgentAddress::parse_list(" 10.0.0.1:1 ,10.0.0.2:65535, 10.0.0.1:1").unwrap();
        assert_eq!(agents.len(), 3);
        assert_eq!(agents[0], agents[2]);
        assert_eq!(agents[1].port(), 65535);
    }

    #[test]
    fn rejects_blank_list() {
        assert_eq!(AgentAddress::parse_list(""), Err(ConfigError::NoAgents));
        assert_eq!(AgentAddress::parse_list("  "), Err(ConfigError::NoAgents));
    }

    #[test]
    fn one_bad_entry_fails_the_whole_list() {
        assert_eq!(
            AgentAddress::parse_list("10.0.0.1:80,10.0.0.300:80"),
            Err(ConfigError::InvalidIp {
                entry: "10.0.0.300:80".into()
            })
        );
        assert_eq!(
            AgentAddress::parse_list("10.0.0.1:80,,10.0.0.2:80"),
            Err(ConfigError::EmptyEntry { index: 1 })
        );
        assert_eq!(
            AgentAddress::parse_list("10.0.0.1:80,10.0.0.2"),
            Err(ConfigError::MissingPort {
                entry: "10.0.0.2".into()
            })
        );
    }

    #[test]
    fn rejects_bad_ports() {
        for entry in ["1.2.3.4:0", "1.2.3.4:65536", "1.2.3.4:-1", "1.2.3.4:http", "1.2.3.4:"] {
            assert_eq!(
                entry.parse::<AgentAddress>(),
                Err(ConfigError::InvalidPort {
                    entry: entry.into()
                }),
                "{entry}"
            );
        }
    }

    #[test]
    fn rejects_non_dotted_quad_hosts() {
        for entry in ["localhost:80", "1.2.3:80", "::1:80", ":80", "1.2.3.4.5:80"] {
            assert!(
                matches!(
                    entry.parse::<AgentAddress>(),
                    Err(ConfigError::InvalidIp { .. })
                ),
                "{entry}"
            );
        }
    }
}
