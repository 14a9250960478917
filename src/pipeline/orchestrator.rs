// Sequencing of the backup stages, progress checkpoints and failure containment
use super::channels::PipelineEvents;
use super::types::{BackupRequest, Stage};
use crate::adb::{AdbShell, BackupInvoker, Device, DeviceManager, DeviceSelectionPolicy, SdcardFetcher};
use crate::archive::{ArchiveConverter, ArchiveExtractor, TarShell};
use crate::config::ToolConfig;
use crate::process::CommandRunner;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Drives one backup run:
///
/// `Discover → SelectDevice → Backup → [Convert → [Extract]] → Pull → Terminal`
///
/// Discover, device selection and Backup failures end the run early. Convert
/// and Extract failures are only logged, Pull runs whenever Backup succeeded.
/// Every run ends with exactly one completion event carrying the same text,
/// so a listener tells success from failure only through the log lines and
/// the last progress value.
pub struct Orchestrator<R> {
    devices: DeviceManager<R>,
    invoker: BackupInvoker<R>,
    converter: ArchiveConverter,
    extractor: ArchiveExtractor<R>,
    fetcher: SdcardFetcher<R>,
    events: PipelineEvents,
}

impl<R: CommandRunner + 'static> Orchestrator<R> {
    pub fn new(
        config: &ToolConfig,
        runner: Arc<R>,
        policy: Box<dyn DeviceSelectionPolicy>,
        events: PipelineEvents,
    ) -> Self {
        let adb = Arc::new(AdbShell::new(config.adb.clone(), runner.clone()));
        let tar = TarShell::new(config.tar.clone(), runner);
        Self {
            devices: DeviceManager::new(adb.clone(), policy, events.clone()),
            invoker: BackupInvoker::new(adb.clone(), events.clone()),
            converter: ArchiveConverter::new(events.clone()),
            extractor: ArchiveExtractor::new(tar, events.clone()),
            fetcher: SdcardFetcher::new(adb, config.remote_storage.clone(), events.clone()),
            events,
        }
    }

    /// Swaps the converter, e.g. to plug in a different archive check.
    pub fn with_converter(mut self, converter: ArchiveConverter) -> Self {
        self.converter = converter;
        self
    }

    /// Runs every stage in order on the calling task and emits the terminal event.
    pub async fn run(&self, request: &BackupRequest) {
        log::info!(
            "🚀 Starting backup into {} (convert={}, extract={})",
            request.backup_directory.display(),
            request.convert_to_archive,
            request.extract_archive
        );
        if let Some(device) = self.acquire_device().await {
            self.backup_and_collect(&device, request).await;
        }
        self.events.completed().await;
    }

    /// Discover and SelectDevice. `None` means the run is over.
    async fn acquire_device(&self) -> Option<Device> {
        let discovered = self.devices.list_devices().await;
        self.events.checkpoint(Stage::Discover).await;
        let devices = match discovered {
            Ok(devices) => devices,
            Err(e) => {
                self.fail(Stage::Discover, e.to_string()).await;
                return None;
            }
        };

        match self.devices.select_device(&devices) {
            Ok(device) => {
                self.events.checkpoint(Stage::SelectDevice).await;
                Some(device)
            }
            Err(e) => {
                self.fail(Stage::SelectDevice, e.to_string()).await;
                None
            }
        }
    }

    async fn backup_and_collect(&self, device: &Device, request: &BackupRequest) {
        let directory = &request.backup_directory;
        let container = match self.invoker.invoke(device, directory).await {
            Ok(path) => path,
            Err(e) => {
                self.fail(Stage::Backup, format!("Error occurred: {e}")).await;
                return;
            }
        };
        self.events.checkpoint(Stage::Backup).await;

        if request.convert_to_archive {
            let archive = self.convert_stage(&container, request).await;
            self.events.checkpoint(Stage::Convert).await;
            if let Some(archive) = archive
                && request.extract_archive
            {
                if let Err(e) = self.extractor.extract(&archive, directory).await {
                    self.events
                        .log(format!("Error occurred during extraction: {e}"))
                        .await;
                }
                self.events.checkpoint(Stage::Extract).await;
            }
        }

        if let Err(e) = self.fetcher.pull(device, directory).await {
            log::error!("❌ {:?} stage failed: {e}", Stage::Pull);
            self.events
                .log(format!(
                    "Error occurred during file retrieval from device: {e}"
                ))
                .await;
        }
    }

    async fn convert_stage(&self, container: &Path, request: &BackupRequest) -> Option<PathBuf> {
        match self
            .converter
            .convert(container, &request.backup_directory)
            .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("⚠️ {:?} stage failed: {e}", Stage::Convert);
                self.events.log(format!("Conversion to tar failed: {e}")).await;
                None
            }
        }
    }

    /// Fatal stage failure: log it and reset progress.
    async fn fail(&self, stage: Stage, message: String) {
        log::error!("❌ {stage:?} stage failed: {message}");
        self.events.log(message).await;
        self.events.progress(0).await;
    }
}

/// Runs the pipeline on a dedicated worker task.
///
/// A panic inside the run is contained: progress is reset to 0 and the
/// completion event is still sent. The channel closes when the returned
/// handle finishes.
pub fn spawn_pipeline<R: CommandRunner + 'static>(
    orchestrator: Orchestrator<R>,
    request: BackupRequest,
) -> JoinHandle<()> {
    let events = orchestrator.events.clone();
    tokio::spawn(async move {
        let worker = tokio::spawn(async move { orchestrator.run(&request).await });
        if let Err(e) = worker.await {
            log::error!("❌ Backup worker aborted: {e}");
            events.log(format!("Error: {e}")).await;
            events.progress(0).await;
            events.completed().await;
        }
    })
}
