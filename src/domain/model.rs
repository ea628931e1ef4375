use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Literal used for wildcard IP and port fields.
pub const WILDCARD: &str = "ANY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Udp,
    Any,
}

impl Protocol {
    /// Case-insensitive lookup of a protocol name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "tcp" => Some(Protocol::Tcp),
            "udp" => Some(Protocol::Udp),
            "any" => Some(Protocol::Any),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Udp => "udp",
            Protocol::Any => "any",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port component of a [`PortSpec`]. Values are compared as the tokens they
/// were read from, so `080` and `80` are different ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Port {
    Any,
    Token(String),
}

impl Port {
    pub fn from_token(token: &str) -> Self {
        if token == WILDCARD {
            Port::Any
        } else {
            Port::Token(token.to_string())
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Any => f.write_str(WILDCARD),
            Port::Token(token) => f.write_str(token),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortSpec {
    pub protocol: Protocol,
    pub port: Port,
}

impl PortSpec {
    pub fn new(protocol: Protocol, port: Port) -> Self {
        Self { protocol, port }
    }

    /// `any/ANY`, accepted by every port criterion.
    pub fn wildcard() -> Self {
        Self::new(Protocol::Any, Port::Any)
    }

    /// Whether a log port satisfies this rule port.
    ///
    /// The relation is asymmetric: wildcards only count on the rule side, so a
    /// log port of `any/80` does not satisfy a rule port of `tcp/80`.
    pub fn accepts(&self, log_port: &PortSpec) -> bool {
        (self.protocol == Protocol::Any || self.protocol == log_port.protocol)
            && (self.port == Port::Any || self.port == log_port.port)
    }
}

/// Always rendered as `protocol/port`, so a bare `8080` becomes `any/8080`.
impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.protocol, self.port)
    }
}

/// IP criterion of an exception rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressPattern {
    Any,
    Exact(String),
}

impl AddressPattern {
    pub fn matches(&self, address: &str) -> bool {
        match self {
            AddressPattern::Any => true,
            AddressPattern::Exact(expected) => expected == address,
        }
    }
}

impl fmt::Display for AddressPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressPattern::Any => f.write_str(WILDCARD),
            AddressPattern::Exact(address) => f.write_str(address),
        }
    }
}

/// One firewall event line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub source_ip: String,
    pub destination_ip: String,
    pub source_port: PortSpec,
    pub destination_port: PortSpec,
    pub timestamp: NaiveDateTime,
}

impl LogRecord {
    /// Output row in input column order.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.source_ip.clone(),
            self.destination_ip.clone(),
            self.source_port.to_string(),
            self.destination_port.to_string(),
            self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ]
    }
}

/// Which side of a connection a port criterion applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Source,
    Destination,
}

/// A time-bounded allow rule. A record matching it is suppressed from the
/// output as long as the record's date is not after `expiry_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionRule {
    pub source_ip: AddressPattern,
    pub destination_ip: AddressPattern,
    source_ports: Vec<PortSpec>,
    destination_ports: Vec<PortSpec>,
    pub expiry_date: NaiveDate,
}

impl ExceptionRule {
    /// Fails with the side whose port list is empty; a rule without a port
    /// criterion is not a valid rule.
    pub fn new(
        source_ip: AddressPattern,
        destination_ip: AddressPattern,
        source_ports: Vec<PortSpec>,
        destination_ports: Vec<PortSpec>,
        expiry_date: NaiveDate,
    ) -> Result<Self, PortDirection> {
        if source_ports.is_empty() {
            return Err(PortDirection::Source);
        }
        if destination_ports.is_empty() {
            return Err(PortDirection::Destination);
        }
        Ok(Self {
            source_ip,
            destination_ip,
            source_ports,
            destination_ports,
            expiry_date,
        })
    }

    pub fn source_ports(&self) -> &[PortSpec] {
        &self.source_ports
    }

    pub fn destination_ports(&self) -> &[PortSpec] {
        &self.destination_ports
    }
}

impl fmt::Display for ExceptionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ports: &[PortSpec]| {
            ports
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        write!(
            f,
            "{} -> {} [{}] -> [{}] until {}",
            self.source_ip,
            self.destination_ip,
            join(&self.source_ports),
            join(&self.destination_ports),
            self.expiry_date.format(EXPIRY_DATE_FORMAT)
        )
    }
}

/// Counters reported at the end of a filtering run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub records_read: usize,
    pub records_kept: usize,
    pub records_dropped: usize,
    pub batches_flushed: usize,
    pub output_path: String,
}
