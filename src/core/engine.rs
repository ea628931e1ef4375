use crate::core::Pipeline;
use crate::domain::model::FilterSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct FilterEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> FilterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Loads every exception rule, then streams the log through them.
    pub async fn run(&self) -> Result<FilterSummary> {
        tracing::info!("Loading exception rules...");
        let exceptions = self.pipeline.load_exceptions().await?;
        tracing::info!("Loaded {} exception rules", exceptions.len());
        self.monitor.log_stats("Exceptions loaded");

        tracing::info!("Filtering log records...");
        let summary = self.pipeline.filter(&exceptions).await?;
        tracing::info!(
            "Filtered {} records: {} kept, {} dropped",
            summary.records_read,
            summary.records_kept,
            summary.records_dropped
        );
        self.monitor.log_stats("Filtering finished");
        self.monitor.log_final_stats();

        Ok(summary)
    }
}
