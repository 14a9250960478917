use super::shell::AdbShell;
use super::types::Device;
use crate::error::BackupResult;
use crate::pipeline::PipelineEvents;
use crate::process::CommandRunner;
use std::path::Path;
use std::sync::Arc;

/// Copies the device's shared storage next to the backup.
pub struct SdcardFetcher<R> {
    adb: Arc<AdbShell<R>>,
    remote_path: String,
    events: PipelineEvents,
}

impl<R: CommandRunner> SdcardFetcher<R> {
    pub fn new(adb: Arc<AdbShell<R>>, remote_path: impl Into<String>, events: PipelineEvents) -> Self {
        Self {
            adb,
            remote_path: remote_path.into(),
            events,
        }
    }

    pub async fn pull(&self, device: &Device, backup_directory: &Path) -> BackupResult<()> {
        self.events
            .log(format!(
                "Fetching files from {} on the device to {}.",
                self.remote_path,
                backup_directory.display()
            ))
            .await;
        self.adb
            .pull(device, &self.remote_path, backup_directory)
            .await?;
        self.events
            .log(format!(
                "Files retrieved successfully from {} on the device to {}.",
                self.remote_path,
                backup_directory.display()
            ))
            .await;
        Ok(())
    }
}
