use crate::core::{ConfigProvider, DEFAULT_CHUNK_SIZE};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_number, PortValidation, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "fwlog-filter")]
#[command(about = "Drops firewall log records covered by time-bounded exception rules")]
pub struct CliConfig {
    /// Firewall log to filter (no header row)
    #[arg(long, default_value = "firewall_logs.csv")]
    pub input: String,

    /// Exception definitions (no header row)
    #[arg(long, default_value = "exceptions.csv")]
    pub exceptions: String,

    /// Where surviving log rows are written
    #[arg(long, default_value = "filtered_logs.csv")]
    pub output: String,

    /// Records buffered and filtered per batch
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// How strictly ports in the log file are checked
    #[arg(long, value_enum, default_value_t = PortValidation::Strict)]
    pub port_validation: PortValidation,

    /// TOML configuration file; replaces the path and processing flags above
    #[arg(long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn log_path(&self) -> &str {
        &self.input
    }

    fn exceptions_path(&self) -> &str {
        &self.exceptions
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn port_validation(&self) -> PortValidation {
        self.port_validation
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("exceptions", &self.exceptions)?;
        validate_path("output", &self.output)?;
        validate_positive_number("chunk_size", self.chunk_size, 1)?;
        if let Some(config) = &self.config {
            validate_path("config", config)?;
        }
        Ok(())
    }
}
