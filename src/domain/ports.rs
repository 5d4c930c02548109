use crate::domain::model::{CommandSpec, TestReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Runs an external command to completion; any non-zero exit is an error.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn testing_repo(&self) -> &str;
    fn testing_set(&self) -> &str;
    fn testing_device(&self) -> Option<&str>;
    fn project_dir(&self) -> &Path;
    fn clone_dir(&self) -> &str;
    fn staging_dir(&self) -> &str;
    /// `None` places the harness output inside the clone.
    fn output_dir(&self) -> Option<&Path>;
    fn keep_output(&self) -> bool;
    fn skip_build(&self) -> bool;
    fn gradle(&self) -> &str;
    fn git(&self) -> &str;
    fn adb(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Returns the device that was connected, if one was configured.
    async fn acquire_device(&self) -> Result<Option<String>>;
    async fn setup(&self) -> Result<()>;
    async fn test(&self) -> Result<TestReport>;
    /// Best effort; failures are logged, never returned.
    async fn cleanup(&self);
    async fn release_device(&self, device: &str) -> Result<()>;
}
