use crate::core::{Pipeline, SmokeSummary, TestReport};
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;

pub struct SmokeEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> SmokeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs device acquisition, setup and testing, then always cleans up.
    /// The device is released only when it was acquired.
    pub async fn run(&self) -> Result<SmokeSummary> {
        tracing::info!("🚀 Starting smoke test run");

        let device = match self.pipeline.acquire_device().await {
            Ok(device) => device,
            Err(e) => {
                self.pipeline.cleanup().await;
                return Err(e);
            }
        };
        if device.is_some() {
            self.monitor.mark("device");
        }

        let outcome = self.setup_and_test().await;

        self.pipeline.cleanup().await;
        self.monitor.mark("cleanup");

        let released = match &device {
            Some(device) => self.pipeline.release_device(device).await,
            None => Ok(()),
        };

        let report = match (outcome, released) {
            (Ok(report), Ok(())) => report,
            (Err(e), Ok(())) => return Err(e),
            (Ok(_), Err(release_err)) => return Err(release_err),
            (Err(e), Err(release_err)) => {
                tracing::warn!("⚠️ Releasing the device failed as well: {}", release_err);
                return Err(e);
            }
        };

        self.monitor.log_final_stats();

        Ok(SmokeSummary {
            report,
            started_at: self.monitor.started_at(),
            elapsed: self.monitor.elapsed(),
        })
    }

    async fn setup_and_test(&self) -> Result<TestReport> {
        tracing::info!("🔧 Preparing the harness...");
        self.pipeline.setup().await?;
        self.monitor.mark("setup");

        tracing::info!("🧪 Testing APKs...");
        let report = self.pipeline.test().await?;
        self.monitor.mark("test");
        tracing::info!(
            "Tested {} APKs ({} coverage runs)",
            report.tested_apks.len(),
            report.coverage_runs
        );

        Ok(report)
    }
}
