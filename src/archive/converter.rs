use super::format::{ARCHIVE_FILE_NAME, ARCHIVE_PREFIX, HEADER_LEN, has_container_magic};
use super::validate::{ArchiveValidator, TarSniffer};
use crate::error::{BackupError, BackupResult};
use crate::pipeline::PipelineEvents;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};

/// Rewrites an `adb backup` container into `backup.tar`.
///
/// The 24-byte container header is replaced by [`ARCHIVE_PREFIX`] and the
/// payload is copied byte for byte. The payload is never inflated or
/// recompressed. The result is then checked as a tar stream, read through
/// gzip when it carries the gzip magic.
pub struct ArchiveConverter {
    validator: Arc<dyn ArchiveValidator>,
    events: PipelineEvents,
}

impl ArchiveConverter {
    pub fn new(events: PipelineEvents) -> Self {
        Self::with_validator(Arc::new(TarSniffer), events)
    }

    pub fn with_validator(validator: Arc<dyn ArchiveValidator>, events: PipelineEvents) -> Self {
        Self { validator, events }
    }

    pub async fn convert(&self, container: &Path, output_directory: &Path) -> BackupResult<PathBuf> {
        let input = File::open(container)
            .await
            .map_err(|source| BackupError::FileOpenFailed {
                path: container.to_path_buf(),
                source,
            })?;
        let mut input = BufReader::new(input);

        // Header is checked before anything is written
        let header = read_header(&mut input).await?;
        if !has_container_magic(&header) {
            return Err(BackupError::InvalidHeader);
        }
        self.events.log("AB Header checked and intact").await;

        let output_path = output_directory.join(ARCHIVE_FILE_NAME);
        self.events
            .log(format!("Output filename: {ARCHIVE_FILE_NAME}"))
            .await;

        let output = File::create(&output_path)
            .await
            .map_err(|source| BackupError::FileOpenFailed {
                path: output_path.clone(),
                source,
            })?;
        let mut output = BufWriter::new(output);

        self.events.log("Writing tar header..").await;
        output.write_all(&ARCHIVE_PREFIX).await?;

        self.events.log("Writing rest of AB file..").await;
        let copied = tokio::io::copy(&mut input, &mut output).await?;
        log::debug!("Copied {copied} payload bytes into {}", output_path.display());
        self.events.log("..done.").await;

        self.events.log("Closing files..").await;
        output.flush().await?;
        output.into_inner().sync_all().await?;
        drop(input);

        let validator = self.validator.clone();
        let check_path = output_path.clone();
        let verdict = tokio::task::spawn_blocking(move || validator.validate(&check_path)).await?;
        match verdict {
            Ok(()) => {
                self.events.log("Output verified OK").await;
                Ok(output_path)
            }
            Err(reason) => {
                log::warn!("Archive check failed for {}: {reason}", output_path.display());
                self.events
                    .log("Verification failed; maybe it's encrypted?")
                    .await;
                Err(BackupError::ArchiveValidationFailed { reason })
            }
        }
    }
}

/// Reads up to [`HEADER_LEN`] bytes. A shorter file returns what it has.
async fn read_header<R: AsyncRead + Unpin>(input: &mut R) -> BackupResult<Vec<u8>> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    input.take(HEADER_LEN as u64).read_to_end(&mut header).await?;
    Ok(header)
}
