use crate::core::ExceptionSet;
use crate::domain::model::{FilterSummary, LogRecord};
use crate::utils::error::Result;
use crate::utils::validation::PortValidation;
use async_trait::async_trait;

/// Pull-based supplier of validated log records.
pub trait RecordSource {
    /// `Ok(None)` once the input is exhausted.
    fn next_record(&mut self) -> Result<Option<LogRecord>>;
}

/// Destination for records that survive filtering.
pub trait RecordSink {
    fn write_record(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

impl<T: RecordSource + ?Sized> RecordSource for &mut T {
    fn next_record(&mut self) -> Result<Option<LogRecord>> {
        (**self).next_record()
    }
}

impl<T: RecordSink + ?Sized> RecordSink for &mut T {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        (**self).write_record(record)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

pub trait ConfigProvider: Send + Sync {
    fn log_path(&self) -> &str;
    fn exceptions_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn chunk_size(&self) -> usize;
    fn port_validation(&self) -> PortValidation;
    fn monitoring_enabled(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn load_exceptions(&self) -> Result<ExceptionSet>;
    async fn filter(&self, exceptions: &ExceptionSet) -> Result<FilterSummary>;
}
