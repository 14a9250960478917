// Pipeline module
// Runs the backup stages on a worker task and reports progress and log lines
// to a single listener over a channel.

pub mod channels;
pub mod orchestrator;
pub mod types;


// Re-export the main types and functions for easy access
pub use channels::{PipelineEvents, create_pipeline_channel};
pub use orchestrator::{Orchestrator, spawn_pipeline};
pub use types::{BackupRequest, COMPLETION_MESSAGE, PipelineEvent, Stage};
