use crate::domain::model::{ApkTestCase, TestArtifacts};
use crate::utils::error::{Result, SmokeError};
use std::fs;
use std::path::Path;

pub const APK_SUFFIX: &str = ".apk";
pub const ARGS_SUFFIX: &str = ".txt";
pub const COVERAGE_SUFFIX: &str = "-coverage.txt";

/// Case-insensitive suffix match.
pub fn has_suffix(file_name: &str, suffix: &str) -> bool {
    file_name.to_lowercase().ends_with(suffix)
}

impl TestArtifacts {
    pub fn from_file_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut artifacts = TestArtifacts::default();

        for name in names.into_iter().map(Into::into) {
            if has_suffix(&name, APK_SUFFIX) {
                artifacts.apks.push(name.clone());
            }
            // "-coverage.txt" also ends in ".txt"; lookups are exact, so keep both.
            if has_suffix(&name, ARGS_SUFFIX) {
                artifacts.args_files.insert(name.clone());
            }
            if has_suffix(&name, COVERAGE_SUFFIX) {
                artifacts.coverage_files.insert(name);
            }
        }

        artifacts.apks.sort();
        artifacts
    }

    /// Lists the regular files of `dir`.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(SmokeError::TestSetNotFound {
                path: dir.display().to_string(),
            });
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.path().is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => tracing::warn!("Skipping non UTF-8 file name: {:?}", raw),
            }
        }

        let artifacts = Self::from_file_names(names);
        tracing::debug!(
            "Found {} APKs, {} argument files, {} coverage argument files in {}",
            artifacts.apks.len(),
            artifacts.args_files.len(),
            artifacts.coverage_files.len(),
            dir.display()
        );
        Ok(artifacts)
    }

    pub fn args_file_for(&self, apk: &str) -> Option<String> {
        let name = format!("{}{}", apk, ARGS_SUFFIX);
        self.args_files.contains(&name).then_some(name)
    }

    pub fn coverage_file_for(&self, apk: &str) -> Option<String> {
        let name = format!("{}{}", apk, COVERAGE_SUFFIX);
        self.coverage_files.contains(&name).then_some(name)
    }

    /// Resolves the arguments of one APK, reading its argument files from `dir`.
    pub fn test_case(&self, dir: &Path, apk: &str) -> Result<ApkTestCase> {
        let args = match self.args_file_for(apk) {
            Some(name) => read_argument_file(&dir.join(name))?,
            None => String::new(),
        };

        let coverage_args = match self.coverage_file_for(apk) {
            Some(name) => Some(read_argument_file(&dir.join(name))?),
            None => None,
        };

        Ok(ApkTestCase {
            apk: apk.to_string(),
            apk_path: dir.join(apk),
            args,
            coverage_args,
        })
    }
}

fn read_argument_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SmokeError::ArgumentFileError {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partition_by_suffix() {
        let artifacts = TestArtifacts::from_file_names([
            "b.apk",
            "A.APK",
            "b.apk.txt",
            "b.apk-coverage.txt",
            "README.md",
            "notes.TXT",
        ]);

        assert_eq!(artifacts.apks, vec!["A.APK", "b.apk"]);
        assert!(artifacts.args_files.contains("b.apk.txt"));
        assert!(artifacts.args_files.contains("notes.TXT"));
        assert!(artifacts.args_files.contains("b.apk-coverage.txt"));
        assert_eq!(artifacts.coverage_files.len(), 1);
        assert!(artifacts.coverage_files.contains("b.apk-coverage.txt"));
    }

    #[test]
    fn test_lookup_uses_exact_names() {
        let artifacts = TestArtifacts::from_file_names(["app.apk", "app.apk.txt"]);
        assert_eq!(artifacts.args_file_for("app.apk"), Some("app.apk.txt".to_string()));
        assert_eq!(artifacts.coverage_file_for("app.apk"), None);
        assert_eq!(artifacts.args_file_for("other.apk"), None);
    }

    #[test]
    fn test_scan_skips_directories_and_reads_args() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("one.apk"), b"apk").unwrap();
        fs::write(dir.path().join("two.apk"), b"apk").unwrap();
        fs::write(dir.path().join("one.apk.txt"), "--Selectors-actionLimit=10\n").unwrap();
        fs::write(dir.path().join("two.apk-coverage.txt"), "--ExecutionMode-coverage=true").unwrap();
        fs::create_dir(dir.path().join("dir.apk")).unwrap();

        let artifacts = TestArtifacts::scan(dir.path()).unwrap();
        assert_eq!(artifacts.apks, vec!["one.apk", "two.apk"]);

        let one = artifacts.test_case(dir.path(), "one.apk").unwrap();
        assert_eq!(one.args, "--Selectors-actionLimit=10\n");
        assert_eq!(one.coverage_args, None);
        assert_eq!(one.apk_path, dir.path().join("one.apk"));

        let two = artifacts.test_case(dir.path(), "two.apk").unwrap();
        assert_eq!(two.args, "");
        assert_eq!(two.coverage_args.as_deref(), Some("--ExecutionMode-coverage=true"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = TestArtifacts::scan(&dir.path().join("missing"));
        assert!(matches!(result, Err(SmokeError::TestSetNotFound { .. })));
    }
}
