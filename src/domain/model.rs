use crate::utils::validation::redact_credentials;
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = redact_credentials(arg);
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// File names of a test-set directory, partitioned by suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestArtifacts {
    pub apks: Vec<String>,
    pub args_files: BTreeSet<String>,
    pub coverage_files: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApkTestCase {
    pub apk: String,
    pub apk_path: PathBuf,
    pub args: String,
    pub coverage_args: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestReport {
    pub tested_apks: Vec<String>,
    pub coverage_runs: usize,
}

#[derive(Debug, Clone)]
pub struct SmokeSummary {
    pub report: TestReport,
    pub started_at: DateTime<Local>,
    pub elapsed: Duration,
}
