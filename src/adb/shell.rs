use super::types::Device;
use crate::error::{BackupError, BackupResult};
use crate::process::{CommandOutput, CommandRunner};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Wrapper around the `adb` binary. Every call goes through the injected runner.
pub struct AdbShell<R> {
    program: PathBuf,
    runner: Arc<R>,
}

impl<R: CommandRunner> AdbShell<R> {
    pub fn new(program: impl Into<PathBuf>, runner: Arc<R>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    async fn run(&self, args: Vec<OsString>) -> BackupResult<CommandOutput> {
        self.runner
            .run(&self.program, &args)
            .await
            .map_err(|source| BackupError::CommandSpawnFailed {
                program: self.program.display().to_string(),
                source,
            })
    }

    /// Raw `adb devices` output.
    pub async fn devices(&self) -> BackupResult<String> {
        let output = self.run(vec!["devices".into()]).await?;
        if !output.success() {
            return Err(BackupError::DeviceCommandFailed {
                exit_code: output.exit_code,
                stderr: output.stderr_lossy(),
            });
        }
        Ok(output.stdout_lossy())
    }

    /// `adb -s <serial> backup -all -f <file>`. Blocks until the user confirms
    /// or rejects the backup on the device.
    pub async fn backup_all(&self, device: &Device, file: &Path) -> BackupResult<()> {
        let args: Vec<OsString> = vec![
            "-s".into(),
            device.serial.clone().into(),
            "backup".into(),
            "-all".into(),
            "-f".into(),
            file.as_os_str().to_owned(),
        ];
        let output = self.run(args).await?;
        if !output.success() {
            return Err(BackupError::BackupFailed {
                exit_code: output.exit_code,
                stderr: output.stderr_lossy(),
            });
        }
        Ok(())
    }

    /// `adb -s <serial> pull <remote> <local>`, recursive for directories.
    pub async fn pull(&self, device: &Device, remote: &str, local: &Path) -> BackupResult<()> {
        let args: Vec<OsString> = vec![
            "-s".into(),
            device.serial.clone().into(),
            "pull".into(),
            remote.into(),
            local.as_os_str().to_owned(),
        ];
        let output = self.run(args).await?;
        if !output.success() {
            return Err(BackupError::PullFailed {
                exit_code: output.exit_code,
                stderr: output.stderr_lossy(),
            });
        }
        Ok(())
    }
}

/// Attached devices from `adb devices` output. The header line and devices
/// in any state other than `device` (offline, unauthorized) are dropped.
pub fn parse_devices(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter(|line| !line.starts_with("List of devices"))
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() >= 2 && parts[1] == "device" {
                Some(Device::new(parts[0]))
            } else {
                None
            }
        })
        .collect()
}
