use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// The port assumed when a host is written without one.
pub const DEFAULT_PORT: u16 = 27017;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// How the host portion of a [`ServerAddress`] was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HostKind {
    /// A DNS hostname.
    Dns,
    /// A dotted-quad IPv4 literal.
    Ipv4,
    /// A bracketed IPv6 literal.
    Ipv6,
}

/// One member of the host list: a hostname or IP literal plus an optional port.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct ServerAddress {
    host: String,
    port: Option<u16>,
    kind: HostKind,
}

impl ServerAddress {
    /// Parses a single `host[:port]` token. IPv6 literals must be bracketed.
    pub fn parse(address: impl AsRef<str>) -> Result<Self> {
        let address = address.as_ref();
        let invalid = || Error::invalid_host(address);

        let (host, port) = if address.starts_with('[') {
            let end = address.find(']').ok_or_else(invalid)?;
            let (host, rest) = address.split_at(end + 1);
            let port = match rest {
                "" => None,
                _ => Some(rest.strip_prefix(':').ok_or_else(invalid)?),
            };
            (host, port)
        } else {
            match address.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (address, None),
            }
        };

        let kind = classify_host(host).ok_or_else(invalid)?;
        let port = port
            .map(|port| parse_port(port).ok_or_else(invalid))
            .transpose()?;

        Ok(Self {
            host: host.to_string(),
            port,
            kind,
        })
    }

    /// The host as written, including brackets for IPv6 literals.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port, if one was written.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The port, or 27017 if none was given.
    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Whether the host is a DNS name or an IP literal.
    pub fn kind(&self) -> HostKind {
        self.kind
    }
}

fn classify_host(host: &str) -> Option<HostKind> {
    if let Some(inner) = host.strip_prefix('[') {
        let inner = inner.strip_suffix(']')?;
        return inner.parse::<Ipv6Addr>().ok().map(|_| HostKind::Ipv6);
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return host.parse::<Ipv4Addr>().ok().map(|_| HostKind::Ipv4);
    }

    is_valid_hostname(host).then_some(HostKind::Dns)
}

fn is_valid_hostname(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

fn parse_port(port: &str) -> Option<u16> {
    if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    port.parse::<u16>().ok().filter(|p| *p != 0)
}

impl FromStr for ServerAddress {
    type Err = Error;

    fn from_str(address: &str) -> Result<Self> {
        ServerAddress::parse(address)
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self.port {
            Some(port) => write!(fmt, "{}:{}", self.host, port),
            None => write!(fmt, "{}", self.host),
        }
    }
}

impl Serialize for ServerAddress {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ServerAddress {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        Self::parse(s.as_str()).map_err(|e| D::Error::custom(format!("{}", e)))
    }
}
