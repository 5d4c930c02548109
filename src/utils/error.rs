use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmokeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Expected return value to be equal 0 instead it was {code} for the command: {command}")]
    CommandFailed { command: String, code: i32 },

    #[error("Command was terminated by a signal: {command}")]
    CommandTerminated { command: String },

    #[error("Failed to start command '{command}': {source}")]
    CommandSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Test set directory not found: {path}")]
    TestSetNotFound { path: String },

    #[error("Failed to read argument file {path}: {source}")]
    ArgumentFileError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stage {path}: {message}")]
    StagingError { path: String, message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ExternalCommand,
    FileSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SmokeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SmokeError::CommandFailed { .. }
            | SmokeError::CommandTerminated { .. }
            | SmokeError::CommandSpawnError { .. } => ErrorCategory::ExternalCommand,
            SmokeError::ConfigValidationError { .. }
            | SmokeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SmokeError::IoError(_)
            | SmokeError::TestSetNotFound { .. }
            | SmokeError::ArgumentFileError { .. }
            | SmokeError::StagingError { .. } => ErrorCategory::FileSystem,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::ExternalCommand => ErrorSeverity::Medium,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SmokeError::CommandFailed { command, .. } if command.contains(" clone ") => {
                "Check that the testing repository URL is reachable and credentials are available"
                    .to_string()
            }
            SmokeError::CommandFailed { command, .. }
                if command.contains(" connect ") || command.contains(" disconnect ") =>
            {
                "Check that the device is reachable and the adb server is running".to_string()
            }
            SmokeError::CommandFailed { .. } => {
                "Inspect the command output above; the harness or build reported a failure"
                    .to_string()
            }
            SmokeError::CommandTerminated { .. } => {
                "The command was interrupted; re-run the smoke test".to_string()
            }
            SmokeError::CommandSpawnError { .. } => {
                "Make sure the tool is installed and on PATH, or override it with the matching flag"
                    .to_string()
            }
            SmokeError::TestSetNotFound { .. } => {
                "Check the TESTING_SET name against the directories of the testing repository"
                    .to_string()
            }
            SmokeError::ArgumentFileError { .. } => {
                "Make sure argument files are readable UTF-8 text".to_string()
            }
            SmokeError::StagingError { .. } | SmokeError::IoError(_) => {
                "Check disk space and permissions of the project directory".to_string()
            }
            SmokeError::ConfigValidationError { .. } | SmokeError::InvalidConfigValueError { .. } => {
                "Fix the command-line arguments or the configuration file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::ExternalCommand => format!("Smoke test aborted: {}", self),
            ErrorCategory::FileSystem => format!("Filesystem step failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SmokeError>;
