use crate::utils::error::{Result, SmokeError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Removes a directory tree, ignoring failures. Returns whether anything was removed.
pub fn remove_dir_quietly(path: &Path) -> bool {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            tracing::debug!("Removed {}", path.display());
            true
        }
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!("⚠️ Could not remove {}: {}", path.display(), e);
            false
        }
    }
}

/// Recreates `staging_dir` so it holds exactly one copy of `apk`.
pub fn stage_apk(staging_dir: &Path, apk: &Path) -> Result<PathBuf> {
    remove_dir_quietly(staging_dir);

    fs::create_dir(staging_dir).map_err(|e| SmokeError::StagingError {
        path: staging_dir.display().to_string(),
        message: format!("cannot create staging directory: {}", e),
    })?;

    let file_name = apk.file_name().ok_or_else(|| SmokeError::StagingError {
        path: apk.display().to_string(),
        message: "not a file".to_string(),
    })?;
    let target = staging_dir.join(file_name);

    fs::copy(apk, &target).map_err(|e| SmokeError::StagingError {
        path: apk.display().to_string(),
        message: format!("cannot copy into {}: {}", staging_dir.display(), e),
    })?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stage_replaces_previous_apk() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.apk");
        let second = dir.path().join("second.apk");
        fs::write(&first, b"one").unwrap();
        fs::write(&second, b"two").unwrap();
        let staging = dir.path().join("tmp");

        stage_apk(&staging, &first).unwrap();
        let staged = stage_apk(&staging, &second).unwrap();

        let entries: Vec<_> = fs::read_dir(&staging).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(staged, staging.join("second.apk"));
        assert_eq!(fs::read(&staged).unwrap(), b"two");
    }

    #[test]
    fn test_stage_missing_apk() {
        let dir = TempDir::new().unwrap();
        let result = stage_apk(&dir.path().join("tmp"), &dir.path().join("nope.apk"));
        assert!(matches!(result, Err(SmokeError::StagingError { .. })));
    }

    #[test]
    fn test_remove_dir_quietly() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("clone");
        fs::create_dir_all(target.join("nested")).unwrap();

        assert!(remove_dir_quietly(&target));
        assert!(!target.exists());
        assert!(!remove_dir_quietly(&target));
    }
}
