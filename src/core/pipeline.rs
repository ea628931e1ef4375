use crate::core::ExceptionSet;
use crate::domain::model::{FilterSummary, LogRecord};
use crate::domain::ports::{RecordSink, RecordSource};
use crate::utils::error::Result;

pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Reading,
    Flushing,
    Done,
}

/// Streams records from a source to a sink in bounded batches, dropping every
/// record the exception set excepts.
///
/// At most `chunk_size` records are buffered at a time. Survivors are written
/// in input order and the sink is flushed after every batch, so a failure on
/// row N leaves the output of all batches completed before N in place.
pub struct ChunkedFilterPipeline<'a, R: RecordSource, W: RecordSink> {
    source: R,
    sink: W,
    exceptions: &'a ExceptionSet,
    chunk_size: usize,
    batch: Vec<LogRecord>,
    state: PipelineState,
    summary: FilterSummary,
}

impl<'a, R: RecordSource, W: RecordSink> ChunkedFilterPipeline<'a, R, W> {
    /// A `chunk_size` of 0 is treated as 1.
    pub fn new(source: R, sink: W, exceptions: &'a ExceptionSet, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            source,
            sink,
            exceptions,
            chunk_size,
            batch: Vec::with_capacity(chunk_size.min(DEFAULT_CHUNK_SIZE)),
            state: PipelineState::Reading,
            summary: FilterSummary::default(),
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn summary(&self) -> &FilterSummary {
        &self.summary
    }

    /// Advances the state machine by one record (or one final flush).
    pub fn step(&mut self) -> Result<PipelineState> {
        match self.state {
            PipelineState::Reading => match self.source.next_record()? {
                Some(record) => {
                    self.summary.records_read += 1;
                    self.batch.push(record);
                    if self.batch.len() >= self.chunk_size {
                        self.flush_batch()?;
                    }
                }
                None => self.state = PipelineState::Flushing,
            },
            PipelineState::Flushing => {
                if !self.batch.is_empty() {
                    self.flush_batch()?;
                }
                self.state = PipelineState::Done;
            }
            PipelineState::Done => {}
        }
        Ok(self.state)
    }

    pub fn run(mut self) -> Result<FilterSummary> {
        while self.step()? != PipelineState::Done {}

        tracing::debug!(
            "Pipeline done: {} read, {} kept, {} dropped in {} batches",
            self.summary.records_read,
            self.summary.records_kept,
            self.summary.records_dropped,
            self.summary.batches_flushed
        );
        Ok(self.summary)
    }

    /// Shared by full and partial batches.
    fn flush_batch(&mut self) -> Result<()> {
        let batch_number = self.summary.batches_flushed + 1;
        let batch_len = self.batch.len();
        let mut kept = 0;

        for record in self.batch.drain(..) {
            match self.exceptions.first_match(&record) {
                None => {
                    self.sink.write_record(&record)?;
                    kept += 1;
                }
                Some(rule) => {
                    tracing::trace!("Dropping {:?}: excepted by {}", record, rule);
                }
            }
        }
        self.sink.flush()?;

        let dropped = batch_len - kept;
        self.summary.records_kept += kept;
        self.summary.records_dropped += dropped;
        self.summary.batches_flushed = batch_number;

        tracing::debug!(
            "Batch {} flushed: {} kept, {} dropped",
            batch_number,
            kept,
            dropped
        );
        Ok(())
    }
}
