pub mod artifacts;
pub mod engine;
pub mod harness;
pub mod layout;
pub mod pipeline;
pub mod staging;

pub use crate::domain::model::{ApkTestCase, CommandSpec, SmokeSummary, TestArtifacts, TestReport};
pub use crate::domain::ports::{CommandRunner, ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
