use crate::domain::model::{ExceptionRule, LogRecord, PortSpec};

/// True when at least one rule port accepts the log port.
pub fn port_compatible(log_port: &PortSpec, rule_ports: &[PortSpec]) -> bool {
    rule_ports.iter().any(|rule_port| rule_port.accepts(log_port))
}

/// Whether `rule` excepts `record`: both addresses, both ports and the expiry
/// date must all be satisfied. Expiry is inclusive of `expiry_date`.
pub fn matches(record: &LogRecord, rule: &ExceptionRule) -> bool {
    rule.source_ip.matches(&record.source_ip)
        && rule.destination_ip.matches(&record.destination_ip)
        && port_compatible(&record.source_port, rule.source_ports())
        && port_compatible(&record.destination_port, rule.destination_ports())
        && record.timestamp.date() <= rule.expiry_date
}
