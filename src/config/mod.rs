#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_relative_path, validate_repository_url,
    validate_subdirectory, Validate,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_CLONE_DIR: &str = "APKResources";
pub const DEFAULT_STAGING_DIR: &str = "tmp";
pub const DEFAULT_GRADLE: &str = "./gradlew";
pub const DEFAULT_GIT: &str = "git";
pub const DEFAULT_ADB: &str = "adb";

/// Fully resolved settings of one smoke run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    pub testing_repo: String,
    pub testing_set: String,
    pub testing_device: Option<String>,
    pub project_dir: PathBuf,
    pub clone_dir: String,
    pub staging_dir: String,
    pub output_dir: Option<PathBuf>,
    pub keep_output: bool,
    pub skip_build: bool,
    pub gradle: String,
    pub git: String,
    pub adb: String,
    pub monitor: bool,
}

impl SmokeConfig {
    pub fn new(
        testing_repo: impl Into<String>,
        testing_set: impl Into<String>,
        testing_device: Option<String>,
    ) -> Self {
        Self {
            testing_repo: testing_repo.into(),
            testing_set: testing_set.into(),
            testing_device,
            project_dir: PathBuf::from("."),
            clone_dir: DEFAULT_CLONE_DIR.to_string(),
            staging_dir: DEFAULT_STAGING_DIR.to_string(),
            output_dir: None,
            keep_output: false,
            skip_build: false,
            gradle: DEFAULT_GRADLE.to_string(),
            git: DEFAULT_GIT.to_string(),
            adb: DEFAULT_ADB.to_string(),
            monitor: false,
        }
    }
}

impl ConfigProvider for SmokeConfig {
    fn testing_repo(&self) -> &str {
        &self.testing_repo
    }

    fn testing_set(&self) -> &str {
        &self.testing_set
    }

    fn testing_device(&self) -> Option<&str> {
        self.testing_device.as_deref()
    }

    fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    fn clone_dir(&self) -> &str {
        &self.clone_dir
    }

    fn staging_dir(&self) -> &str {
        &self.staging_dir
    }

    fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    fn keep_output(&self) -> bool {
        self.keep_output
    }

    fn skip_build(&self) -> bool {
        self.skip_build
    }

    fn gradle(&self) -> &str {
        &self.gradle
    }

    fn git(&self) -> &str {
        &self.git
    }

    fn adb(&self) -> &str {
        &self.adb
    }
}

impl Validate for SmokeConfig {
    fn validate(&self) -> Result<()> {
        validate_repository_url("testing_repo", &self.testing_repo)?;
        validate_relative_path("testing_set", &self.testing_set)?;

        if let Some(device) = &self.testing_device {
            validate_non_empty_string("testing_device", device)?;
        }

        validate_path("project_dir", &self.project_dir.to_string_lossy())?;
        validate_subdirectory("clone_dir", &self.clone_dir)?;
        validate_subdirectory("staging_dir", &self.staging_dir)?;
        if let Some(output_dir) = &self.output_dir {
            validate_path("output_dir", &output_dir.to_string_lossy())?;
        }

        validate_non_empty_string("gradle", &self.gradle)?;
        validate_non_empty_string("git", &self.git)?;
        validate_non_empty_string("adb", &self.adb)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SmokeError;

    #[test]
    fn test_defaults() {
        let config = SmokeConfig::new("https://example.com/apks.git", "smoke", None);
        assert_eq!(config.clone_dir(), "APKResources");
        assert_eq!(config.staging_dir(), "tmp");
        assert_eq!(config.gradle(), "./gradlew");
        assert_eq!(config.testing_device(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_escaping_testing_set() {
        let config = SmokeConfig::new("https://example.com/apks.git", "../etc", None);
        assert!(matches!(
            config.validate(),
            Err(SmokeError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_rejects_current_directory_as_clone_or_staging() {
        let mut config = SmokeConfig::new("https://example.com/apks.git", "smoke", None);
        config.clone_dir = ".".to_string();
        assert!(config.validate().is_err());

        let mut config = SmokeConfig::new("https://example.com/apks.git", "smoke", None);
        config.staging_dir = "./".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_device() {
        let config =
            SmokeConfig::new("https://example.com/apks.git", "smoke", Some("  ".to_string()));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unsupported_repository_scheme() {
        let config = SmokeConfig::new("ftp://example.com/apks", "smoke", None);
        assert!(config.validate().is_err());
    }
}
