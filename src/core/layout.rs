use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SmokeError};
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "droidmateout";

/// Absolute locations used by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessLayout {
    pub project_dir: PathBuf,
    pub clone_dir: PathBuf,
    pub test_set_dir: PathBuf,
    pub staging_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl HarnessLayout {
    pub fn resolve<C: ConfigProvider>(config: &C) -> Result<Self> {
        let project_dir = normalize(&std::path::absolute(config.project_dir())?);
        let clone_dir = normalize(&project_dir.join(config.clone_dir()));
        let test_set_dir = normalize(&clone_dir.join(config.testing_set()));
        let staging_dir = normalize(&test_set_dir.join(config.staging_dir()));

        let output_dir = match config.output_dir() {
            Some(dir) => normalize(&anchor(&project_dir, dir)),
            None => clone_dir.join(DEFAULT_OUTPUT_DIR),
        };

        // 這些目錄在執行期間會被整個刪除
        ensure_strictly_below("clone_dir", &clone_dir, &project_dir)?;
        ensure_strictly_below("staging_dir", &staging_dir, &test_set_dir)?;
        if project_dir.starts_with(&output_dir) {
            return Err(SmokeError::ConfigValidationError {
                field: "output_dir".to_string(),
                message: format!(
                    "{} would remove the project directory {} during cleanup",
                    output_dir.display(),
                    project_dir.display()
                ),
            });
        }

        if config.keep_output() && output_dir.starts_with(&clone_dir) {
            return Err(SmokeError::ConfigValidationError {
                field: "output_dir".to_string(),
                message: format!(
                    "{} is inside the clone directory, which is always removed; \
                     choose an output directory outside {} to keep the output",
                    output_dir.display(),
                    clone_dir.display()
                ),
            });
        }

        Ok(Self {
            project_dir,
            clone_dir,
            test_set_dir,
            staging_dir,
            output_dir,
        })
    }

    pub fn output_inside_clone(&self) -> bool {
        self.output_dir.starts_with(&self.clone_dir)
    }
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Lexically drops `.` and folds `..` of an absolute path. Symlinks are not
/// resolved.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn ensure_strictly_below(field: &str, dir: &Path, parent: &Path) -> Result<()> {
    if dir.starts_with(parent) && dir != parent {
        Ok(())
    } else {
        Err(SmokeError::ConfigValidationError {
            field: field.to_string(),
            message: format!(
                "{} must be a subdirectory of {}",
                dir.display(),
                parent.display()
            ),
        })
    }
}
