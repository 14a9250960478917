// Core device types and the device selection seam
use serde::Serialize;

#[derive(Debug, PartialEq, Eq, Serialize, Clone)]
pub struct Device {
    pub serial: String,
}

impl Device {
    pub fn new(serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
        }
    }
}

/// Chooses the target device from the enumerated list.
pub trait DeviceSelectionPolicy: Send + Sync {
    fn select<'a>(&self, devices: &'a [Device]) -> Option<&'a Device>;

    /// Human readable name used in log lines
    fn describe(&self) -> String;
}

/// Single-device policy: the first device adb lists wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstDevice;

impl DeviceSelectionPolicy for FirstDevice {
    fn select<'a>(&self, devices: &'a [Device]) -> Option<&'a Device> {
        devices.first()
    }

    fn describe(&self) -> String {
        "first connected device".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct BySerial(pub String);

impl DeviceSelectionPolicy for BySerial {
    fn select<'a>(&self, devices: &'a [Device]) -> Option<&'a Device> {
        devices.iter().find(|d| d.serial == self.0)
    }

    fn describe(&self) -> String {
        format!("device with serial '{}'", self.0)
    }
}
