use crate::config::SmokeConfig;
use crate::utils::error::{Result, SmokeError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional settings file; every field may be left out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub repository: Option<RepositoryConfig>,
    pub device: Option<DeviceConfig>,
    pub harness: Option<HarnessConfig>,
    pub tools: Option<ToolsConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub clone_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub project_dir: Option<PathBuf>,
    pub gradle: Option<String>,
    pub staging_dir: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub keep_output: Option<bool>,
    pub skip_build: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub git: Option<String>,
    pub adb: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SmokeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SmokeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ADB_SERIAL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SmokeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Fills every setting the file provides into `config`.
    pub fn apply_to(&self, config: &mut SmokeConfig) {
        if let Some(clone_dir) = self.repository.as_ref().and_then(|r| r.clone_dir.clone()) {
            config.clone_dir = clone_dir;
        }

        if let Some(serial) = self.device.as_ref().and_then(|d| d.serial.clone()) {
            config.testing_device = Some(serial);
        }

        if let Some(harness) = &self.harness {
            if let Some(dir) = &harness.project_dir {
                config.project_dir = dir.clone();
            }
            if let Some(gradle) = &harness.gradle {
                config.gradle = gradle.clone();
            }
            if let Some(staging_dir) = &harness.staging_dir {
                config.staging_dir = staging_dir.clone();
            }
            if let Some(output_dir) = &harness.output_dir {
                config.output_dir = Some(output_dir.clone());
            }
            if let Some(keep_output) = harness.keep_output {
                config.keep_output = keep_output;
            }
            if let Some(skip_build) = harness.skip_build {
                config.skip_build = skip_build;
            }
        }

        if let Some(tools) = &self.tools {
            if let Some(git) = &tools.git {
                config.git = git.clone();
            }
            if let Some(adb) = &tools.adb {
                config.adb = adb.clone();
            }
        }

        if let Some(monitoring) = &self.monitoring {
            config.monitor = monitoring.enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[repository]
clone_dir = "apk-clone"

[device]
serial = "192.168.56.101:5555"

[harness]
project_dir = "/opt/droidmate"
gradle = "gradle"
output_dir = "/var/smoke/out"
keep_output = true

[tools]
adb = "/opt/android/platform-tools/adb"

[monitoring]
enabled = true
"#;

        let file = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut config = SmokeConfig::new("https://example.com/apks.git", "smoke", None);
        file.apply_to(&mut config);

        assert_eq!(config.clone_dir, "apk-clone");
        assert_eq!(config.testing_device.as_deref(), Some("192.168.56.101:5555"));
        assert_eq!(config.project_dir, PathBuf::from("/opt/droidmate"));
        assert_eq!(config.gradle, "gradle");
        assert_eq!(config.output_dir, Some(PathBuf::from("/var/smoke/out")));
        assert!(config.keep_output);
        assert!(!config.skip_build);
        assert_eq!(config.git, "git");
        assert_eq!(config.adb, "/opt/android/platform-tools/adb");
        assert!(config.monitor);
    }

    #[test]
    fn test_empty_config_changes_nothing() {
        let file = TomlConfig::from_toml_str("").unwrap();
        let mut config = SmokeConfig::new("https://example.com/apks.git", "smoke", None);
        let before = config.clone();
        file.apply_to(&mut config);
        assert_eq!(config, before);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMOKE_TEST_ADB_SERIAL", "emulator-5556");

        let file = TomlConfig::from_toml_str(
            r#"
[device]
serial = "${SMOKE_TEST_ADB_SERIAL}"
"#,
        )
        .unwrap();
        assert_eq!(
            file.device.and_then(|d| d.serial).as_deref(),
            Some("emulator-5556")
        );

        std::env::remove_var("SMOKE_TEST_ADB_SERIAL");
    }

    #[test]
    fn test_unset_variable_is_left_alone() {
        let file = TomlConfig::from_toml_str(
            r#"
[tools]
git = "${SMOKE_TEST_SURELY_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert_eq!(
            file.tools.and_then(|t| t.git).as_deref(),
            Some("${SMOKE_TEST_SURELY_UNSET_VARIABLE}")
        );
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[harness\nproject_dir = 1");
        assert!(matches!(
            result,
            Err(SmokeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[harness]\nskip_build = true\n")
            .unwrap();

        let file = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(file.harness.and_then(|h| h.skip_build), Some(true));
    }
}
