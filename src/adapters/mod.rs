// Adapters layer: concrete sources and sinks for the filter pipeline.

pub mod csv_log;
pub mod exceptions;

use crate::utils::error::{FilterError, Result};
use csv::{ByteRecord, Reader, StringRecord};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

pub use csv_log::{read_log_file, write_log_file, CsvLogSink, CsvLogSource};
pub use exceptions::{load_exceptions, read_exceptions};

/// Opens an input file, reporting a missing file as `ResourceNotFound`.
pub(crate) fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FilterError::ResourceNotFound {
            path: path.display().to_string(),
        },
        _ => FilterError::IoError(e),
    })
}

/// Creates (truncates) an output file, creating missing parent directories.
pub(crate) fn create_output(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(File::create(path)?)
}

/// Pulls the next raw row and decodes it as UTF-8. Returns the row's 1-based
/// line number alongside it, falling back to `fallback_row` when the reader
/// has no position. A row that is not valid UTF-8 is reported against the
/// field holding the bad bytes.
pub(crate) fn read_row<R: Read>(
    reader: &mut Reader<R>,
    field_names: &[&str],
    fallback_row: usize,
) -> Result<Option<(usize, StringRecord)>> {
    let mut raw = ByteRecord::new();
    if !reader.read_byte_record(&mut raw)? {
        return Ok(None);
    }

    let row = raw
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback_row);

    let record = StringRecord::from_byte_record(raw).map_err(|e| {
        let index = e.utf8_error().field();
        FilterError::InvalidEncoding {
            row,
            field: field_names
                .get(index)
                .map(|name| name.to_string())
                .unwrap_or_else(|| format!("field {}", index + 1)),
        }
    })?;

    Ok(Some((row, record)))
}
