use crate::adapters::{load_exceptions, CsvLogSink, CsvLogSource};
use crate::core::{ChunkedFilterPipeline, ConfigProvider, ExceptionSet, FilterSummary, Pipeline};
use crate::utils::error::Result;

/// Filters a log file on disk against an exception-definition file on disk.
///
/// Each file handle is opened once per call and closed when the call returns,
/// whether it succeeds or not. The output file is created before the first
/// log row is read, so a validation failure part-way through leaves the
/// batches completed before the bad row in it.
pub struct FilePipeline<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> FilePipeline<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> Pipeline for FilePipeline<C> {
    async fn load_exceptions(&self) -> Result<ExceptionSet> {
        tracing::debug!(
            "Reading exception rules from: {}",
            self.config.exceptions_path()
        );
        load_exceptions(self.config.exceptions_path())
    }

    async fn filter(&self, exceptions: &ExceptionSet) -> Result<FilterSummary> {
        tracing::debug!(
            "Streaming {} -> {} (chunk size {}, {:?} port validation)",
            self.config.log_path(),
            self.config.output_path(),
            self.config.chunk_size(),
            self.config.port_validation()
        );

        let source = CsvLogSource::open(self.config.log_path(), self.config.port_validation())?;
        let sink = CsvLogSink::create(self.config.output_path())?;

        let mut summary =
            ChunkedFilterPipeline::new(source, sink, exceptions, self.config.chunk_size()).run()?;
        summary.output_path = self.config.output_path().to_string();
        Ok(summary)
    }
}
