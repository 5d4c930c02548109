use crate::core::{CommandRunner, CommandSpec};
use crate::utils::error::{Result, SmokeError};
use tokio::process::Command;

/// Runs commands as child processes that share this process' stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<()> {
        let rendered = command.to_string();
        tracing::debug!("$ {}", rendered);

        let mut child = Command::new(&command.program);
        child.args(&command.args).kill_on_drop(true);
        if let Some(dir) = &command.current_dir {
            child.current_dir(dir);
        }

        let status = child
            .status()
            .await
            .map_err(|source| SmokeError::CommandSpawnError {
                command: rendered.clone(),
                source,
            })?;

        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(SmokeError::CommandFailed {
                command: rendered,
                code,
            }),
            None => Err(SmokeError::CommandTerminated { command: rendered }),
        }
    }
}
