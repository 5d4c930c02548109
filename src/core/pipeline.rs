use crate::core::harness;
use crate::core::layout::HarnessLayout;
use crate::core::staging::{remove_dir_quietly, stage_apk};
use crate::core::{CommandRunner, CommandSpec, ConfigProvider, Pipeline, TestArtifacts, TestReport};
use crate::utils::error::Result;
use crate::utils::validation::redact_credentials;

/// Clones the testing repository, builds DroidMate with Gradle and runs it
/// once per APK of the test set.
pub struct HarnessPipeline<R: CommandRunner, C: ConfigProvider> {
    pub(crate) runner: R,
    pub(crate) config: C,
    pub(crate) layout: HarnessLayout,
}

impl<R: CommandRunner, C: ConfigProvider> HarnessPipeline<R, C> {
    pub fn new(runner: R, config: C) -> Result<Self> {
        let layout = HarnessLayout::resolve(&config)?;
        Ok(Self {
            runner,
            config,
            layout,
        })
    }

    pub fn layout(&self) -> &HarnessLayout {
        &self.layout
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Commands run before the first APK, in order.
    pub fn setup_commands(&self) -> Vec<CommandSpec> {
        let mut commands = vec![harness::git_clone(
            self.config.git(),
            self.config.testing_repo(),
            &self.layout.clone_dir,
            &self.layout.project_dir,
        )];

        if !self.config.skip_build() {
            commands.extend(harness::gradle_build_steps(
                self.config.gradle(),
                &self.layout.project_dir,
            ));
        }

        commands
    }

    fn run_harness(&self, extra_args: &str) -> CommandSpec {
        harness::gradle_run(
            self.config.gradle(),
            &self.layout.project_dir,
            &self.layout.staging_dir,
            &self.layout.output_dir,
            extra_args,
        )
    }
}

#[async_trait::async_trait]
impl<R: CommandRunner, C: ConfigProvider> Pipeline for HarnessPipeline<R, C> {
    async fn acquire_device(&self) -> Result<Option<String>> {
        let Some(device) = self.config.testing_device() else {
            return Ok(None);
        };

        tracing::info!("📱 Connecting to device {}", device);
        self.runner
            .run(&harness::adb_connect(self.config.adb(), device))
            .await?;
        Ok(Some(device.to_string()))
    }

    async fn setup(&self) -> Result<()> {
        remove_dir_quietly(&self.layout.clone_dir);

        tracing::info!(
            "📥 Cloning {} into {}",
            redact_credentials(self.config.testing_repo()),
            self.layout.clone_dir.display()
        );
        if self.config.skip_build() {
            tracing::info!("⏭️ Skipping the Gradle build");
        }

        for command in self.setup_commands() {
            self.runner.run(&command).await?;
        }
        Ok(())
    }

    async fn test(&self) -> Result<TestReport> {
        let test_dir = &self.layout.test_set_dir;
        let artifacts = TestArtifacts::scan(test_dir)?;
        let mut report = TestReport::default();

        if artifacts.apks.is_empty() {
            tracing::warn!("No APKs found in {}", test_dir.display());
        }

        for apk in &artifacts.apks {
            let case = artifacts.test_case(test_dir, apk)?;

            // 每個 APK 都使用全新的暫存目錄
            stage_apk(&self.layout.staging_dir, &case.apk_path)?;

            if let Some(coverage_args) = &case.coverage_args {
                tracing::info!("Do coverage instrumentation for {}", apk);
                self.runner.run(&self.run_harness(coverage_args)).await?;
                report.coverage_runs += 1;
            }

            tracing::info!("Test {}", apk);
            self.runner.run(&self.run_harness(&case.args)).await?;
            report.tested_apks.push(apk.clone());
        }

        Ok(report)
    }

    async fn cleanup(&self) {
        tracing::debug!("Cleaning up {}", self.layout.clone_dir.display());
        remove_dir_quietly(&self.layout.clone_dir);

        if self.config.keep_output() {
            tracing::info!("📁 Harness output kept at {}", self.layout.output_dir.display());
        } else {
            remove_dir_quietly(&self.layout.output_dir);
        }
    }

    async fn release_device(&self, device: &str) -> Result<()> {
        tracing::info!("📱 Disconnecting device {}", device);
        self.runner
            .run(&harness::adb_disconnect(self.config.adb(), device))
            .await
    }
}
