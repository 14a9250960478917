//! Configuration for the external tools the pipeline drives

use std::path::PathBuf;

/// Default device storage location copied by the sdcard pull stage.
pub const DEFAULT_REMOTE_STORAGE: &str = "/sdcard/";

#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    /// Path or name of the Android device bridge binary
    pub adb: PathBuf,
    /// Path or name of the tar binary used for extraction
    pub tar: PathBuf,
    /// Remote directory pulled recursively after the backup
    pub remote_storage: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            adb: PathBuf::from("adb"),
            tar: PathBuf::from("tar"),
            remote_storage: DEFAULT_REMOTE_STORAGE.to_string(),
        }
    }
}
