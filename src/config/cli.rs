use crate::config::toml_config::TomlConfig;
use crate::config::SmokeConfig;
use crate::utils::logger::LogFormat;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "smoke-tester")]
#[command(about = "Smoke-test DroidMate against every APK of a testing repository")]
pub struct CliConfig {
    /// Repository with the APK test sets (anything `git clone` accepts)
    pub testing_repo: String,

    /// Directory inside the repository whose APKs are tested
    pub testing_set: String,

    /// Device to connect through adb before testing
    pub testing_device: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the Gradle wrapper; builds run here
    #[arg(long)]
    pub project_dir: Option<PathBuf>,

    #[arg(long, help = "Gradle wrapper to invoke [default: ./gradlew]")]
    pub gradle: Option<String>,

    #[arg(long, help = "git executable [default: git]")]
    pub git: Option<String>,

    #[arg(long, help = "adb executable [default: adb]")]
    pub adb: Option<String>,

    /// Harness output directory [default: <clone>/droidmateout]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Keep the harness output directory after the run
    #[arg(long, overrides_with = "no_keep_output")]
    pub keep_output: bool,

    /// Remove the harness output directory even if the config file keeps it
    #[arg(long, overrides_with = "keep_output")]
    pub no_keep_output: bool,

    /// Skip `gradlew clean build` and `gradlew build -x test`
    #[arg(long, overrides_with = "no_skip_build")]
    pub skip_build: bool,

    /// Run the Gradle build even if the config file skips it
    #[arg(long, overrides_with = "skip_build")]
    pub no_skip_build: bool,

    /// Show what would run without executing anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log the duration of every phase
    #[arg(long)]
    pub monitor: bool,
}

impl CliConfig {
    /// Merges defaults, the optional configuration file and the command line,
    /// in increasing order of precedence.
    pub fn resolve(&self, file: Option<&TomlConfig>) -> SmokeConfig {
        let mut config = SmokeConfig::new(
            self.testing_repo.clone(),
            self.testing_set.clone(),
            None,
        );

        if let Some(file) = file {
            file.apply_to(&mut config);
        }

        // 應用命令列覆蓋設定
        if let Some(device) = &self.testing_device {
            config.testing_device = Some(device.clone());
        }
        if let Some(dir) = &self.project_dir {
            config.project_dir = dir.clone();
        }
        if let Some(gradle) = &self.gradle {
            config.gradle = gradle.clone();
        }
        if let Some(git) = &self.git {
            config.git = git.clone();
        }
        if let Some(adb) = &self.adb {
            config.adb = adb.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = Some(output_dir.clone());
        }
        if let Some(keep) = switch(self.keep_output, self.no_keep_output) {
            config.keep_output = keep;
        }
        if let Some(skip) = switch(self.skip_build, self.no_skip_build) {
            config.skip_build = skip;
        }
        config.monitor |= self.monitor;

        config
    }
}

/// `--flag` / `--no-flag` pair; `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
