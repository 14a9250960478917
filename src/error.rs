use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for backup pipeline operations.
pub type BackupResult<T> = Result<T, BackupError>;

/// The error type for every stage of the backup pipeline.
#[derive(Debug, Error)]
pub enum BackupError {
    #[error("No devices found. Please connect a device and try again.")]
    NoDeviceFound,

    #[error("No connected device matches the {policy}")]
    DeviceNotSelected { policy: String },

    #[error("adb devices failed ({}): {stderr}", exit_label(.exit_code))]
    DeviceCommandFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("adb backup failed ({}): {stderr}", exit_label(.exit_code))]
    BackupFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Unable to open file at {path:?}: {source}")]
    FileOpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("AB Header not found; is it definitely the right file?")]
    InvalidHeader,

    #[error("Converted archive failed verification: {reason}")]
    ArchiveValidationFailed { reason: String },

    #[error("tar extraction failed ({}): {stderr}", exit_label(.exit_code))]
    ExtractionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("adb pull failed ({}): {stderr}", exit_label(.exit_code))]
    PullFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to invoke '{program}': {source}. Verify the tool is installed and on PATH.")]
    CommandSpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Task failed to complete: {source}")]
    JoinError {
        #[from]
        source: tokio::task::JoinError,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_in_message() {
        let err = BackupError::PullFailed {
            exit_code: Some(1),
            stderr: "remote object '/sdcard/' does not exist".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "adb pull failed (exit code 1): remote object '/sdcard/' does not exist"
        );
    }

    #[test]
    fn test_signal_termination_message() {
        let err = BackupError::ExtractionFailed {
            exit_code: None,
            stderr: String::new(),
        };
        assert!(err.to_string().contains("terminated by signal"));
    }
}
