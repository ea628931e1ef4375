use crate::adapters::{create_output, open_input, read_row};
use crate::domain::model::LogRecord;
use crate::domain::ports::{RecordSink, RecordSource};
use crate::utils::error::{FilterError, Result};
use crate::utils::validation::{parse_log_row, PortValidation, LOG_FIELDS};
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Reads and validates firewall log rows one at a time. The file has no
/// header row; every row is checked as it is pulled.
pub struct CsvLogSource<R: Read> {
    reader: csv::Reader<R>,
    rows_read: usize,
    port_validation: PortValidation,
}

impl CsvLogSource<File> {
    pub fn open<P: AsRef<Path>>(path: P, port_validation: PortValidation) -> Result<Self> {
        let file = open_input(path.as_ref())?;
        Ok(Self::from_reader(file, port_validation))
    }
}

impl<R: Read> CsvLogSource<R> {
    pub fn from_reader(reader: R, port_validation: PortValidation) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Self {
            reader,
            rows_read: 0,
            port_validation,
        }
    }

    /// Drains the source into memory.
    pub fn read_all(mut self) -> Result<Vec<LogRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next_record()? {
            records.push(record);
        }
        Ok(records)
    }
}

impl<R: Read> RecordSource for CsvLogSource<R> {
    fn next_record(&mut self) -> Result<Option<LogRecord>> {
        // Blank lines are skipped by the reader, so the line number is what
        // points the user at the offending row.
        let Some((row, record)) = read_row(&mut self.reader, &LOG_FIELDS, self.rows_read + 1)?
        else {
            return Ok(None);
        };
        self.rows_read += 1;

        parse_log_row(row, &record, self.port_validation).map(Some)
    }
}

/// Writes surviving records in the input layout, ports as `protocol/port`.
pub struct CsvLogSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvLogSink<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = create_output(path.as_ref())?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvLogSink<W> {
    pub fn from_writer(writer: W) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);
        Self { writer }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| FilterError::IoError(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvLogSink<W> {
    fn write_record(&mut self, record: &LogRecord) -> Result<()> {
        self.writer.write_record(record.to_row())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Loads a whole log file into memory.
pub fn read_log_file<P: AsRef<Path>>(
    path: P,
    port_validation: PortValidation,
) -> Result<Vec<LogRecord>> {
    CsvLogSource::open(path, port_validation)?.read_all()
}

/// Writes `records` to `path`, replacing any existing file.
pub fn write_log_file<P: AsRef<Path>>(path: P, records: &[LogRecord]) -> Result<()> {
    let mut sink = CsvLogSink::create(path)?;
    for record in records {
        sink.write_record(record)?;
    }
    sink.flush()
}
