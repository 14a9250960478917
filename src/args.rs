use android_backup_run::ToolConfig;
use android_backup_run::adb::{BySerial, DeviceSelectionPolicy, FirstDevice};
use android_backup_run::config::DEFAULT_REMOTE_STORAGE;
use clap::Parser;
use std::path::PathBuf;

/// Name of the directory created under the home directory when none is given.
const DEFAULT_BACKUP_DIR_NAME: &str = "android-backups";

#[derive(Debug, Parser)]
#[command(
    name = "android-backup-run",
    version = env!("APP_VERSION_DISPLAY"),
    long_version = concat!(env!("APP_VERSION_DISPLAY"), " (built ", env!("APP_BUILD_YEAR"), ")"),
    about = "🤖 Android backup tool: adb backup, .ab to tar conversion, extraction and sdcard pull",
    after_help = "EXAMPLES:\n    android-backup-run ~/phone --convert --extract\n    android-backup-run --serial 1d36d8f1 --json\n    ADB_PATH=/opt/platform-tools/adb android-backup-run /mnt/usb/backup"
)]
pub struct Args {
    /// Directory receiving backup.ab, backup.tar and the pulled files
    /// (default: ~/android-backups)
    pub backup_dir: Option<PathBuf>,

    /// Convert backup.ab into backup.tar
    #[arg(long)]
    pub convert: bool,

    /// Extract backup.tar into <BACKUP_DIR>/backup (only after a successful conversion)
    #[arg(long)]
    pub extract: bool,

    /// Back up this device instead of the first one listed by adb
    #[arg(long, short = 's')]
    pub serial: Option<String>,

    /// adb binary to use
    #[arg(long, env = "ADB_PATH", default_value = "adb")]
    pub adb: PathBuf,

    /// tar binary to use for extraction
    #[arg(long, env = "TAR_PATH", default_value = "tar")]
    pub tar: PathBuf,

    /// Device directory pulled after the backup
    #[arg(long, default_value = DEFAULT_REMOTE_STORAGE)]
    pub remote_path: String,

    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            adb: self.adb.clone(),
            tar: self.tar.clone(),
            remote_storage: self.remote_path.clone(),
        }
    }

    pub fn selection_policy(&self) -> Box<dyn DeviceSelectionPolicy> {
        match &self.serial {
            Some(serial) => Box::new(BySerial(serial.clone())),
            None => Box::new(FirstDevice),
        }
    }

    /// Explicit directories must already exist; the home default is created.
    pub fn resolve_backup_dir(&self) -> Result<PathBuf, String> {
        if let Some(dir) = &self.backup_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "Backup directory {} does not exist. Please select a backup directory.",
                    dir.display()
                ));
            }
            return Ok(dir.clone());
        }
        let home = homedir::my_home()
            .ok()
            .flatten()
            .ok_or("Failed to determine home directory. Please select a backup directory.")?;
        let dir = home.join(DEFAULT_BACKUP_DIR_NAME);
        std::fs::create_dir_all(&dir)
            .map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        Ok(dir)
    }
}
