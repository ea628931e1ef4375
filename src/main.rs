use clap::Parser;
use fwlog_filter::core::ConfigProvider;
use fwlog_filter::utils::error::{ErrorSeverity, FilterError};
use fwlog_filter::utils::{logger, validation::Validate};
use fwlog_filter::{CliConfig, FilePipeline, FilterEngine, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting fwlog-filter");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let outcome = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(config, args.monitor).await,
                Err(e) => Err(e),
            }
        }
        None => run(args.clone(), args.monitor).await,
    };

    if let Err(e) = outcome {
        std::process::exit(report_failure(&e));
    }

    Ok(())
}

/// 驗證配置並執行過濾
async fn run<C: ConfigProvider + Validate>(
    config: C,
    monitor_flag: bool,
) -> fwlog_filter::Result<()> {
    config.validate()?;

    let monitor_enabled = monitor_flag || config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = FilterEngine::new_with_monitoring(FilePipeline::new(config), monitor_enabled);
    let summary = engine.run().await?;

    tracing::info!("✅ Filtering completed successfully!");
    tracing::info!("📁 Output saved to: {}", summary.output_path);
    println!(
        "Filtering complete. Filtered logs exported to: {}",
        summary.output_path
    );
    println!(
        "{} records read, {} kept, {} dropped",
        summary.records_read, summary.records_kept, summary.records_dropped
    );
    Ok(())
}

/// Logs the failure and returns the exit code for its severity.
fn report_failure(e: &FilterError) -> i32 {
    tracing::error!(
        "❌ Filtering failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
