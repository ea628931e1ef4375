use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Malformed port in row {row}, field '{field}': '{value}' ({reason})")]
    MalformedPort {
        row: usize,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed IP address in row {row}, field '{field}': '{value}'")]
    MalformedIp {
        row: usize,
        field: String,
        value: String,
    },

    #[error("Malformed row {row}: expected {expected} fields, found {found}")]
    MalformedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Malformed timestamp in row {row}, field '{field}': '{value}' ({reason})")]
    MalformedTimestamp {
        row: usize,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Empty port list in row {row}, field '{field}'")]
    EmptyPortList { row: usize, field: String },

    #[error("Invalid UTF-8 in row {row}, field '{field}'")]
    InvalidEncoding { row: usize, field: String },

    #[error("Resource not found: {path}")]
    ResourceNotFound { path: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Resource,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FilterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FilterError::MalformedPort { .. }
            | FilterError::MalformedIp { .. }
            | FilterError::MalformedRow { .. }
            | FilterError::MalformedTimestamp { .. }
            | FilterError::EmptyPortList { .. }
            | FilterError::InvalidEncoding { .. } => ErrorCategory::Validation,
            FilterError::ResourceNotFound { .. } => ErrorCategory::Resource,
            FilterError::CsvError(_) | FilterError::IoError(_) => ErrorCategory::Io,
            FilterError::ConfigValidationError { .. }
            | FilterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Resource => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Row number the error points at, for input validation failures.
    pub fn row(&self) -> Option<usize> {
        match self {
            FilterError::MalformedPort { row, .. }
            | FilterError::MalformedIp { row, .. }
            | FilterError::MalformedRow { row, .. }
            | FilterError::MalformedTimestamp { row, .. }
            | FilterError::EmptyPortList { row, .. }
            | FilterError::InvalidEncoding { row, .. } => Some(*row),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FilterError::ResourceNotFound { path } => {
                format!("Cannot open '{}': file does not exist", path)
            }
            FilterError::MalformedRow {
                row,
                expected,
                found,
            } => format!(
                "Row {} has {} fields but {} are required",
                row, found, expected
            ),
            FilterError::ConfigValidationError { field, message } => {
                format!("Invalid configuration ({}): {}", field, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FilterError::MalformedPort { .. } | FilterError::EmptyPortList { .. } => {
                "Ports must be ANY, a number between 0 and 65535, or protocol/port with protocol tcp, udp or any"
            }
            FilterError::MalformedIp { .. } => {
                "IP addresses must be dotted quads with every octet between 0 and 255 (or ANY in exception rules)"
            }
            FilterError::MalformedRow { .. } => {
                "Every row needs exactly five comma-separated fields; quote port lists that contain commas"
            }
            FilterError::MalformedTimestamp { .. } => {
                "Log timestamps use YYYY-MM-DD HH:MM:SS and expiry dates use YYYY-MM-DD"
            }
            FilterError::InvalidEncoding { .. } => "Input files must be UTF-8 encoded text",
            FilterError::ResourceNotFound { .. } => {
                "Check the --input and --exceptions paths"
            }
            FilterError::CsvError(_) | FilterError::IoError(_) => {
                "Check file permissions and available disk space"
            }
            FilterError::ConfigValidationError { .. }
            | FilterError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_carry_row() {
        let err = FilterError::MalformedIp {
            row: 7,
            field: "source_ip".to_string(),
            value: "999.1.1.1".to_string(),
        };
        assert_eq!(err.row(), Some(7));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("row 7"));
        assert!(err.to_string().contains("999.1.1.1"));
    }

    #[test]
    fn test_missing_resource_is_medium_severity() {
        let err = FilterError::ResourceNotFound {
            path: "exceptions.csv".to_string(),
        };
        assert_eq!(err.row(), None);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("exceptions.csv"));
    }

    #[test]
    fn test_invalid_encoding_is_a_validation_error() {
        let err = FilterError::InvalidEncoding {
            row: 2,
            field: "destination_ip".to_string(),
        };
        assert_eq!(err.row(), Some(2));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("destination_ip"));
    }
}
