use crate::adapters::{open_input, read_row};
use crate::core::ExceptionSet;
use crate::utils::error::Result;
use crate::utils::validation::{parse_exception_row, EXCEPTION_FIELDS};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

/// Reads exception-definition rows. All rows are validated before the set is
/// returned; the first bad row fails the whole load.
pub fn read_exceptions<R: Read>(reader: R) -> Result<ExceptionSet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rules = Vec::new();
    while let Some((row, record)) = read_row(&mut reader, &EXCEPTION_FIELDS, rules.len() + 1)? {
        let rule = parse_exception_row(row, &record)?;
        tracing::debug!("Exception rule {}: {}", row, rule);
        rules.push(rule);
    }

    Ok(ExceptionSet::new(rules))
}

pub fn load_exceptions<P: AsRef<Path>>(path: P) -> Result<ExceptionSet> {
    let file = open_input(path.as_ref())?;
    read_exceptions(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AddressPattern, Port, PortSpec, Protocol};
    use crate::utils::error::FilterError;
    use chrono::NaiveDate;

    #[test]
    fn test_read_exceptions() {
        let data = "192.168.1.1,ANY,\"tcp/80, udp/53\",tcp/443,2023-12-31\n\
                    ANY,10.0.0.2,any/ANY,udp/53,2024-01-15\n";
        let exceptions = read_exceptions(data.as_bytes()).unwrap();

        assert_eq!(exceptions.len(), 2);
        let first = &exceptions.rules()[0];
        assert_eq!(first.source_ip, AddressPattern::Exact("192.168.1.1".to_string()));
        assert_eq!(first.destination_ip, AddressPattern::Any);
        assert_eq!(
            first.source_ports(),
            &[
                PortSpec::new(Protocol::Tcp, Port::from_token("80")),
                PortSpec::new(Protocol::Udp, Port::from_token("53")),
            ]
        );
        assert_eq!(first.expiry_date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());

        let second = &exceptions.rules()[1];
        assert_eq!(second.source_ports(), &[PortSpec::wildcard()]);
    }

    #[test]
    fn test_bad_rule_fails_whole_load() {
        let data = "192.168.1.1,ANY,tcp/80,tcp/443,2023-12-31\n\
                    192.168.1.1,ANY,tcp/80,tcp/443,31/12/2023\n";
        let err = read_exceptions(data.as_bytes()).unwrap_err();
        assert!(matches!(err, FilterError::MalformedTimestamp { row: 2, .. }));
    }

    #[test]
    fn test_invalid_utf8_names_row_and_field() {
        let data = b"192.168.1.1,ANY,tcp/80,\xfe443,2023-12-31\n";
        let err = read_exceptions(&data[..]).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidEncoding { row: 1, ref field } if field == "destination_ports"
        ));
    }

    #[test]
    fn test_empty_definition_file() {
        let exceptions = read_exceptions("".as_bytes()).unwrap();
        assert!(exceptions.is_empty());
    }

    #[test]
    fn test_missing_exception_file() {
        let err = load_exceptions("/definitely/not/exceptions.csv").unwrap_err();
        assert!(matches!(err, FilterError::ResourceNotFound { .. }));
    }
}
