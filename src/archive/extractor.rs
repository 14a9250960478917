use crate::error::{BackupError, BackupResult};
use crate::pipeline::PipelineEvents;
use crate::process::CommandRunner;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Wrapper around the `tar` binary.
pub struct TarShell<R> {
    program: PathBuf,
    runner: Arc<R>,
}

impl<R: CommandRunner> TarShell<R> {
    pub fn new(program: impl Into<PathBuf>, runner: Arc<R>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    /// `tar -xvf <archive> -C <directory>`
    pub async fn extract_verbose(&self, archive: &Path, directory: &Path) -> BackupResult<()> {
        let args: Vec<OsString> = vec![
            "-xvf".into(),
            archive.as_os_str().to_owned(),
            "-C".into(),
            directory.as_os_str().to_owned(),
        ];
        let output = self
            .runner
            .run(&self.program, &args)
            .await
            .map_err(|source| BackupError::CommandSpawnFailed {
                program: self.program.display().to_string(),
                source,
            })?;
        if !output.success() {
            return Err(BackupError::ExtractionFailed {
                exit_code: output.exit_code,
                stderr: output.stderr_lossy(),
            });
        }
        for line in output.stdout_lossy().lines() {
            log::debug!("tar: {line}");
        }
        Ok(())
    }
}

/// Unpacks the converted archive into a directory named after it.
pub struct ArchiveExtractor<R> {
    tar: TarShell<R>,
    events: PipelineEvents,
}

impl<R: CommandRunner> ArchiveExtractor<R> {
    pub fn new(tar: TarShell<R>, events: PipelineEvents) -> Self {
        Self { tar, events }
    }

    /// Extracts into `<output_directory>/<archive stem>` and returns that directory.
    /// An existing directory from an earlier run is reused.
    pub async fn extract(&self, archive: &Path, output_directory: &Path) -> BackupResult<PathBuf> {
        let extract_dir = extraction_dir(archive, output_directory);
        tokio::fs::create_dir_all(&extract_dir).await?;

        self.tar.extract_verbose(archive, &extract_dir).await?;
        self.events
            .log(format!(
                "Extraction of {} completed successfully to {}.",
                archive.display(),
                extract_dir.display()
            ))
            .await;
        Ok(extract_dir)
    }
}

/// `backup.tar` in `/x` extracts to `/x/backup`.
pub fn extraction_dir(archive: &Path, output_directory: &Path) -> PathBuf {
    let stem = archive
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("extracted"));
    output_directory.join(stem)
}
