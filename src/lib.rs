pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{load_exceptions, read_exceptions, read_log_file, write_log_file};
pub use app::pipelines::FilePipeline;
pub use crate::core::{
    engine::FilterEngine, filter_records, matches, port_compatible, should_keep,
    ChunkedFilterPipeline, ExceptionSet, PipelineState,
};
pub use domain::model::{
    AddressPattern, ExceptionRule, FilterSummary, LogRecord, Port, PortDirection, PortSpec,
    Protocol,
};
pub use utils::error::{FilterError, Result};
pub use utils::validation::PortValidation;
