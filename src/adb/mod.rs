// ADB module - device discovery, full backup and storage pull through the `adb` binary.

pub mod backup;
pub mod device_manager;
pub mod sdcard;
pub mod shell;
pub mod types;


// Re-export the main types for easy access
pub use backup::BackupInvoker;
pub use device_manager::DeviceManager;
pub use sdcard::SdcardFetcher;
pub use shell::{AdbShell, parse_devices};
pub use types::{BySerial, Device, DeviceSelectionPolicy, FirstDevice};
