mod common;

use anyhow::Result;
use common::{TestConfig, SAMPLE_EXCEPTIONS, SAMPLE_EXPECTED, SAMPLE_LOGS};
use fwlog_filter::{
    filter_records, load_exceptions, read_log_file, write_log_file, FilePipeline, FilterEngine,
    PortValidation,
};
use tempfile::TempDir;

async fn filtered_with_chunk_size(chunk_size: usize) -> Result<(String, usize)> {
    let temp_dir = TempDir::new()?;
    let config =
        TestConfig::with_files(&temp_dir, SAMPLE_LOGS, SAMPLE_EXCEPTIONS).with_chunk_size(chunk_size);
    let output_path = config.output_path.clone();

    let summary = FilterEngine::new(FilePipeline::new(config)).run().await?;
    Ok((std::fs::read_to_string(output_path)?, summary.batches_flushed))
}

#[tokio::test]
async fn test_output_is_identical_for_every_chunk_size() -> Result<()> {
    let line_count = SAMPLE_LOGS.lines().count();

    let (one, batches_of_one) = filtered_with_chunk_size(1).await?;
    let (three, batches_of_three) = filtered_with_chunk_size(3).await?;
    let (whole, batches_of_whole) = filtered_with_chunk_size(line_count).await?;

    assert_eq!(one, SAMPLE_EXPECTED);
    assert_eq!(three, SAMPLE_EXPECTED);
    assert_eq!(whole, SAMPLE_EXPECTED);

    assert_eq!(batches_of_one, line_count);
    assert_eq!(batches_of_three, line_count.div_ceil(3));
    assert_eq!(batches_of_whole, 1);
    Ok(())
}

#[tokio::test]
async fn test_large_input_streams_in_bounded_batches() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let logs: String = (0..2_500)
        .map(|i| {
            format!(
                "10.0.{}.{},10.0.0.2,tcp/{},udp/53,2023-03-01 10:00:00\n",
                i / 256,
                i % 256,
                1024 + i
            )
        })
        .collect();
    // The exception only covers the first two source ports.
    let config = TestConfig::with_files(
        &temp_dir,
        &logs,
        "ANY,10.0.0.2,\"tcp/1024, tcp/1025\",udp/53,2023-12-31\n",
    )
    .with_chunk_size(1_000);
    let output_path = config.output_path.clone();

    let summary = FilterEngine::new(FilePipeline::new(config)).run().await?;

    assert_eq!(summary.records_read, 2_500);
    assert_eq!(summary.records_dropped, 2);
    assert_eq!(summary.records_kept, 2_498);
    assert_eq!(summary.batches_flushed, 3);
    assert_eq!(std::fs::read_to_string(output_path)?.lines().count(), 2_498);
    Ok(())
}

#[test]
fn test_whole_file_api_matches_streaming_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = TestConfig::with_files(&temp_dir, SAMPLE_LOGS, SAMPLE_EXCEPTIONS);

    let records = read_log_file(&config.log_path, PortValidation::Strict)?;
    let exceptions = load_exceptions(&config.exceptions_path)?;
    let kept = filter_records(&records, &exceptions);
    write_log_file(&config.output_path, &kept)?;

    assert_eq!(records.len(), 7);
    assert_eq!(kept.len(), 4);
    assert_eq!(config.read_output(), SAMPLE_EXPECTED);
    Ok(())
}
