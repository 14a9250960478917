// Communication channel between the pipeline worker and its single listener
use super::types::{COMPLETION_MESSAGE, PipelineEvent, Stage};
use tokio::sync::mpsc;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Helper function to create the pipeline event channel
pub fn create_pipeline_channel() -> (PipelineEvents, mpsc::Receiver<PipelineEvent>) {
    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    (PipelineEvents { event_tx }, event_rx)
}

/// Sending half handed to every pipeline component.
///
/// Events are pushed in emission order. A dropped listener is not an error:
/// the run carries on and the lines still reach the `log` facade.
#[derive(Debug, Clone)]
pub struct PipelineEvents {
    event_tx: mpsc::Sender<PipelineEvent>,
}

impl PipelineEvents {
    pub async fn log(&self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        self.send(PipelineEvent::Log(message)).await;
    }

    pub async fn progress(&self, percent: u8) {
        self.send(PipelineEvent::Progress(percent.min(100))).await;
    }

    pub async fn checkpoint(&self, stage: Stage) {
        if let Some(percent) = stage.checkpoint() {
            self.progress(percent).await;
        }
    }

    pub async fn completed(&self) {
        self.send(PipelineEvent::Completed(COMPLETION_MESSAGE.to_string()))
            .await;
    }

    async fn send(&self, event: PipelineEvent) {
        if self.event_tx.send(event).await.is_err() {
            log::debug!("Pipeline listener dropped, event discarded");
        }
    }
}
