pub mod adb;
pub mod archive;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;

#[cfg(test)]
mod test_support;

pub use config::ToolConfig;
pub use error::{BackupError, BackupResult};
pub use pipeline::{BackupRequest, Orchestrator, PipelineEvent, create_pipeline_channel, spawn_pipeline};
pub use process::ProcessRunner;
