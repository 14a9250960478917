// Types and enums for the backup pipeline
use serde::Serialize;
use std::path::PathBuf;

/// Fixed text of the terminal signal, sent whether or not earlier stages failed.
pub const COMPLETION_MESSAGE: &str = "Backup process completed.";

/// What the caller asks for. Immutable once handed to the worker.
#[derive(Debug, Clone, PartialEq)]
pub struct BackupRequest {
    pub backup_directory: PathBuf,
    pub convert_to_archive: bool,
    pub extract_archive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discover,
    SelectDevice,
    Backup,
    Convert,
    Extract,
    Pull,
    Terminal,
}

impl Stage {
    /// Progress checkpoint reached when the stage finishes, if it has one.
    pub fn checkpoint(self) -> Option<u8> {
        match self {
            Stage::Discover => Some(10),
            Stage::SelectDevice => Some(20),
            Stage::Backup => Some(50),
            Stage::Convert => Some(75),
            Stage::Extract => Some(100),
            Stage::Pull | Stage::Terminal => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum PipelineEvent {
    Progress(u8),
    Log(String),
    Completed(String),
}
