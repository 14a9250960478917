use super::shell::{AdbShell, parse_devices};
use super::types::{Device, DeviceSelectionPolicy};
use crate::error::{BackupError, BackupResult};
use crate::pipeline::PipelineEvents;
use crate::process::CommandRunner;
use std::sync::Arc;

/// Enumerates attached devices and picks the one to back up.
pub struct DeviceManager<R> {
    adb: Arc<AdbShell<R>>,
    policy: Box<dyn DeviceSelectionPolicy>,
    events: PipelineEvents,
}

impl<R: CommandRunner> DeviceManager<R> {
    pub fn new(
        adb: Arc<AdbShell<R>>,
        policy: Box<dyn DeviceSelectionPolicy>,
        events: PipelineEvents,
    ) -> Self {
        Self {
            adb,
            policy,
            events,
        }
    }

    pub async fn list_devices(&self) -> BackupResult<Vec<Device>> {
        let stdout = self.adb.devices().await?;
        let devices = parse_devices(&stdout);
        if devices.is_empty() {
            return Err(BackupError::NoDeviceFound);
        }
        self.events.log("Connected devices:").await;
        for device in &devices {
            self.events.log(device.serial.clone()).await;
        }
        Ok(devices)
    }

    pub fn select_device(&self, devices: &[Device]) -> BackupResult<Device> {
        match self.policy.select(devices) {
            Some(device) => {
                log::info!("📱 Selected {} ({})", device.serial, self.policy.describe());
                Ok(device.clone())
            }
            None => Err(BackupError::DeviceNotSelected {
                policy: self.policy.describe(),
            }),
        }
    }
}
