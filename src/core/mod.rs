pub mod engine;
pub mod exception_set;
pub mod matcher;
pub mod pipeline;

pub use crate::domain::model::{ExceptionRule, FilterSummary, LogRecord, PortSpec};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSink, RecordSource};
pub use crate::utils::error::Result;
pub use exception_set::{filter_records, should_keep, ExceptionSet};
pub use matcher::{matches, port_compatible};
pub use pipeline::{ChunkedFilterPipeline, PipelineState, DEFAULT_CHUNK_SIZE};
