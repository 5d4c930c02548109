use anyhow::Context;
use clap::Parser;
use smoke_tester::core::{harness, ConfigProvider};
use smoke_tester::utils::validation::{redact_credentials, Validate};
use smoke_tester::utils::logger;
use smoke_tester::{CliConfig, HarnessPipeline, ProcessRunner, SmokeConfig, SmokeEngine, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(args.log_format, args.verbose);

    tracing::info!(
        "Tester was called with: TESTING_REPO: {}, TESTING_SET: {}, TESTING_DEVICE: {}",
        redact_credentials(&args.testing_repo),
        args.testing_set,
        args.testing_device.as_deref().unwrap_or("None")
    );

    // 載入 TOML 配置
    let file = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            Some(
                TomlConfig::from_file(path)
                    .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
            )
        }
        None => None,
    };
    let config = args.resolve(file.as_ref());

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 Phase timing enabled");
    }

    let pipeline = match HarnessPipeline::new(ProcessRunner::new(), config.clone()) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No commands will be executed");
        print_plan(&config, &pipeline);
        return Ok(());
    }

    let engine = SmokeEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ Smoke test finished: {} APKs tested, {} coverage runs",
                summary.report.tested_apks.len(),
                summary.report.coverage_runs
            );
            println!("The testing took: {} sec", summary.elapsed.as_secs());
        }
        Err(e) => {
            tracing::error!(
                "❌ Smoke test failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn print_plan(config: &SmokeConfig, pipeline: &HarnessPipeline<ProcessRunner, SmokeConfig>) {
    let layout = pipeline.layout();

    println!("📋 Smoke test plan:");
    println!("  Repository: {}", redact_credentials(config.testing_repo()));
    println!("  Test set:   {}", layout.test_set_dir.display());
    println!("  Staging:    {}", layout.staging_dir.display());
    println!(
        "  Output:     {}{}",
        layout.output_dir.display(),
        if config.keep_output() { " (kept)" } else { "" }
    );
    println!();

    println!("⚙️ Commands:");
    if let Some(device) = config.testing_device() {
        println!("  {}", harness::adb_connect(config.adb(), device));
    }
    for command in pipeline.setup_commands() {
        println!("  {}", command);
    }
    println!(
        "  {} run --args=... (once per APK, twice with a coverage argument file)",
        config.gradle()
    );
    if let Some(device) = config.testing_device() {
        println!("  {}", harness::adb_disconnect(config.adb(), device));
    }
    println!();
    println!("✅ Dry run complete.");
}
