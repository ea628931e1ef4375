use crate::domain::model::{
    AddressPattern, ExceptionRule, LogRecord, Port, PortDirection, PortSpec, Protocol,
    EXPIRY_DATE_FORMAT, TIMESTAMP_FORMAT, WILDCARD,
};
use crate::utils::error::{FilterError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const FIELD_COUNT: usize = 5;

pub(crate) const LOG_FIELDS: [&str; FIELD_COUNT] = [
    "source_ip",
    "destination_ip",
    "source_port",
    "destination_port",
    "timestamp",
];

pub(crate) const EXCEPTION_FIELDS: [&str; FIELD_COUNT] = [
    "source_ip",
    "destination_ip",
    "source_ports",
    "destination_ports",
    "expiry_date",
];

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})$").expect("valid IPv4 pattern")
});

static PORT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:([A-Za-z]+)/)?(\d{1,5}|ANY)$").expect("valid port pattern")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// How strictly log-file ports are checked. Exception ports are always
/// checked strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum PortValidation {
    /// Same grammar and range checks as exception ports.
    #[default]
    Strict,
    /// Any port value is accepted as long as the protocol is known.
    Lenient,
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(FilterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_field_count(row: usize, record: &StringRecord) -> Result<()> {
    if record.len() != FIELD_COUNT {
        return Err(FilterError::MalformedRow {
            row,
            expected: FIELD_COUNT,
            found: record.len(),
        });
    }
    Ok(())
}

/// Dotted-quad check; every octet must be in `0..=255`.
pub fn validate_ipv4(row: usize, field: &str, value: &str) -> Result<()> {
    let valid = IPV4
        .captures(value)
        .map(|caps| (1..=4).all(|i| caps[i].parse::<u8>().is_ok()))
        .unwrap_or(false);

    if !valid {
        return Err(FilterError::MalformedIp {
            row,
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(())
}

fn malformed_port(row: usize, field: &str, value: &str, reason: impl Into<String>) -> FilterError {
    FilterError::MalformedPort {
        row,
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Validating port parse: `ANY`, a bare `0..=65535` number, or
/// `<tcp|udp|any>/<0..=65535|ANY>`.
pub fn parse_port_strict(row: usize, field: &str, token: &str) -> Result<PortSpec> {
    let caps = PORT_TOKEN.captures(token).ok_or_else(|| {
        malformed_port(row, field, token, "expected ANY, <port> or <protocol>/<port>")
    })?;

    let protocol = match caps.get(1) {
        Some(name) => Protocol::from_name(name.as_str()).ok_or_else(|| {
            malformed_port(
                row,
                field,
                token,
                format!("unknown protocol '{}'", name.as_str()),
            )
        })?,
        None => Protocol::Any,
    };

    let port = &caps[2];
    if port != WILDCARD && port.parse::<u16>().is_err() {
        return Err(malformed_port(
            row,
            field,
            token,
            "port must be between 0 and 65535",
        ));
    }

    Ok(PortSpec::new(protocol, Port::from_token(port)))
}

/// Non-validating port parse used for raw log ingestion. The port value is
/// taken verbatim; only the protocol has to be one of tcp, udp or any, and the
/// token may hold at most one `/`.
pub fn parse_port_lenient(row: usize, field: &str, token: &str) -> Result<PortSpec> {
    let (protocol, port) = match token.split_once('/') {
        Some((name, port)) => {
            let protocol = Protocol::from_name(name).ok_or_else(|| {
                malformed_port(row, field, token, format!("unknown protocol '{}'", name))
            })?;
            if port.contains('/') {
                return Err(malformed_port(row, field, token, "expected protocol/port"));
            }
            (protocol, port)
        }
        None => (Protocol::Any, token),
    };

    Ok(PortSpec::new(protocol, Port::from_token(port)))
}

/// Comma-separated port list from an exception row. Tokens are trimmed.
pub fn parse_port_list(row: usize, field: &str, value: &str) -> Result<Vec<PortSpec>> {
    if value.trim().is_empty() {
        return Err(FilterError::EmptyPortList {
            row,
            field: field.to_string(),
        });
    }

    value
        .split(',')
        .map(|token| parse_port_strict(row, field, token.trim()))
        .collect()
}

pub fn parse_timestamp(row: usize, field: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        FilterError::MalformedTimestamp {
            row,
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

pub fn parse_expiry_date(row: usize, field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, EXPIRY_DATE_FORMAT).map_err(|e| {
        FilterError::MalformedTimestamp {
            row,
            field: field.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        }
    })
}

fn parse_address_pattern(row: usize, field: &str, value: &str) -> Result<AddressPattern> {
    if value == WILDCARD {
        return Ok(AddressPattern::Any);
    }
    validate_ipv4(row, field, value)?;
    Ok(AddressPattern::Exact(value.to_string()))
}

/// Turns one raw log row into a [`LogRecord`]. `row` is 1-based.
pub fn parse_log_row(
    row: usize,
    record: &StringRecord,
    port_validation: PortValidation,
) -> Result<LogRecord> {
    validate_field_count(row, record)?;

    validate_ipv4(row, LOG_FIELDS[0], &record[0])?;
    validate_ipv4(row, LOG_FIELDS[1], &record[1])?;

    let parse_port = match port_validation {
        PortValidation::Strict => parse_port_strict,
        PortValidation::Lenient => parse_port_lenient,
    };
    let source_port = parse_port(row, LOG_FIELDS[2], &record[2])?;
    let destination_port = parse_port(row, LOG_FIELDS[3], &record[3])?;
    let timestamp = parse_timestamp(row, LOG_FIELDS[4], &record[4])?;

    Ok(LogRecord {
        source_ip: record[0].to_string(),
        destination_ip: record[1].to_string(),
        source_port,
        destination_port,
        timestamp,
    })
}

/// Turns one raw exception-definition row into an [`ExceptionRule`].
pub fn parse_exception_row(row: usize, record: &StringRecord) -> Result<ExceptionRule> {
    validate_field_count(row, record)?;

    let source_ip = parse_address_pattern(row, EXCEPTION_FIELDS[0], &record[0])?;
    let destination_ip = parse_address_pattern(row, EXCEPTION_FIELDS[1], &record[1])?;
    let source_ports = parse_port_list(row, EXCEPTION_FIELDS[2], &record[2])?;
    let destination_ports = parse_port_list(row, EXCEPTION_FIELDS[3], &record[3])?;
    let expiry_date = parse_expiry_date(row, EXCEPTION_FIELDS[4], &record[4])?;

    ExceptionRule::new(
        source_ip,
        destination_ip,
        source_ports,
        destination_ports,
        expiry_date,
    )
    .map_err(|direction| FilterError::EmptyPortList {
        row,
        field: match direction {
            PortDirection::Source => EXCEPTION_FIELDS[2],
            PortDirection::Destination => EXCEPTION_FIELDS[3],
        }
        .to_string(),
    })
}
