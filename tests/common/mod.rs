#![allow(dead_code)]

use fwlog_filter::core::ConfigProvider;
use fwlog_filter::PortValidation;
use std::path::Path;
use tempfile::TempDir;

pub struct TestConfig {
    pub log_path: String,
    pub exceptions_path: String,
    pub output_path: String,
    pub chunk_size: usize,
    pub port_validation: PortValidation,
}

impl TestConfig {
    /// Writes both input files into `dir` and points the output next to them.
    pub fn with_files(dir: &TempDir, logs: &str, exceptions: &str) -> Self {
        let log_path = dir.path().join("firewall_logs.csv");
        let exceptions_path = dir.path().join("exceptions.csv");
        std::fs::write(&log_path, logs).unwrap();
        std::fs::write(&exceptions_path, exceptions).unwrap();

        Self {
            log_path: path_string(&log_path),
            exceptions_path: path_string(&exceptions_path),
            output_path: path_string(&dir.path().join("filtered_logs.csv")),
            chunk_size: 10_000,
            port_validation: PortValidation::Strict,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_output(mut self, path: &Path) -> Self {
        self.output_path = path_string(path);
        self
    }

    pub fn read_output(&self) -> String {
        std::fs::read_to_string(&self.output_path).unwrap()
    }
}

impl ConfigProvider for TestConfig {
    fn log_path(&self) -> &str {
        &self.log_path
    }

    fn exceptions_path(&self) -> &str {
        &self.exceptions_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn port_validation(&self) -> PortValidation {
        self.port_validation
    }

    fn monitoring_enabled(&self) -> bool {
        false
    }
}

pub fn path_string(path: &Path) -> String {
    path.to_str().unwrap().to_string()
}

pub const SAMPLE_EXCEPTIONS: &str = "\
192.168.1.1,ANY,tcp/80,tcp/443,2023-12-31
ANY,10.0.0.2,any/ANY,udp/53,2023-12-31
";

pub const SAMPLE_LOGS: &str = "\
192.168.1.1,10.0.0.1,tcp/80,tcp/443,2023-01-01 12:00:00
192.168.1.1,10.0.0.1,tcp/81,tcp/443,2023-01-01 12:00:00
192.168.1.2,10.0.0.2,udp/53,udp/53,2023-01-02 12:00:00
192.168.1.3,10.0.0.3,tcp/22,tcp/22,2023-01-03 12:00:00
192.168.1.1,10.0.0.9,tcp/80,tcp/443,2024-01-01 00:00:00
10.1.1.1,10.0.0.2,8080,UDP/53,2023-12-31 23:59:59
10.1.1.1,10.0.0.2,8080,53,2023-06-01 08:00:00
";

/// Rows of `SAMPLE_LOGS` that survive `SAMPLE_EXCEPTIONS`, as written out.
pub const SAMPLE_EXPECTED: &str = "\
192.168.1.1,10.0.0.1,tcp/81,tcp/443,2023-01-01 12:00:00
192.168.1.3,10.0.0.3,tcp/22,tcp/22,2023-01-03 12:00:00
192.168.1.1,10.0.0.9,tcp/80,tcp/443,2024-01-01 00:00:00
10.1.1.1,10.0.0.2,any/8080,any/53,2023-06-01 08:00:00
";
