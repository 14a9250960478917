use super::shell::AdbShell;
use super::types::Device;
use crate::archive::format::CONTAINER_FILE_NAME;
use crate::error::BackupResult;
use crate::pipeline::PipelineEvents;
use crate::process::CommandRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Runs the full-device `adb backup` into `backup.ab`.
pub struct BackupInvoker<R> {
    adb: Arc<AdbShell<R>>,
    events: PipelineEvents,
}

impl<R: CommandRunner> BackupInvoker<R> {
    pub fn new(adb: Arc<AdbShell<R>>, events: PipelineEvents) -> Self {
        Self { adb, events }
    }

    /// Returns the container path once adb exits successfully. There is no
    /// timeout: the phone shows a confirmation dialog and adb waits on it.
    pub async fn invoke(&self, device: &Device, backup_directory: &Path) -> BackupResult<PathBuf> {
        let backup_file = backup_directory.join(CONTAINER_FILE_NAME);
        self.events
            .log("Please unlock your phone and confirm the backup operation.")
            .await;
        self.adb.backup_all(device, &backup_file).await?;
        self.events
            .log(format!(
                "Backup completed successfully. File saved as {}",
                backup_file.display()
            ))
            .await;
        Ok(backup_file)
    }
}
