use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use summarizer_core::{SubmissionId, UploadRequest};
use summarizer_logging::{log_error, log_info, log_warn};

use crate::{AtomicFileWriter, EngineEvent, SummarizeClient};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        request: UploadRequest,
    },
    DownloadReport {
        url: String,
    },
}

/// Sending half of the engine: queues requests for the IO thread.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving half of the engine: completed requests, in completion order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Starts the IO thread. It exits once the handle is dropped.
    pub fn new(
        client: Arc<dyn SummarizeClient>,
        writer: AtomicFileWriter,
    ) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let writer = writer.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(client.as_ref(), &writer, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn submit(&self, submission_id: SubmissionId, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            submission_id,
            request,
        });
    }

    pub fn download_report(&self, url: impl Into<String>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::DownloadReport { url: url.into() });
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

async fn handle_command(
    client: &dyn SummarizeClient,
    writer: &AtomicFileWriter,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Submit {
            submission_id,
            request,
        } => {
            let result = client.summarize(&request).await;
            match &result {
                Ok(_) => log_info!(
                    "submission {} ({}) summarized",
                    submission_id,
                    request.file_name
                ),
                Err(err) => log_warn!(
                    "submission {} ({}) failed: {} [{}]",
                    submission_id,
                    request.file_name,
                    err.kind,
                    err.detail.as_deref().unwrap_or("-")
                ),
            }
            EngineEvent::SummarizeCompleted {
                submission_id,
                result,
            }
        }
        EngineCommand::DownloadReport { url } => {
            let result = download_report(client, writer, &url).await;
            if let Err(reason) = &result {
                log_error!("report download from {} failed: {}", url, reason);
            }
            EngineEvent::ReportCompleted { url, result }
        }
    }
}

async fn download_report(
    client: &dyn SummarizeClient,
    writer: &AtomicFileWriter,
    url: &str,
) -> Result<PathBuf, String> {
    let report = client.fetch_report(url).await.map_err(|err| err.message)?;
    let size = report.bytes.len();
    let writer = writer.clone();
    let path = tokio::task::spawn_blocking(move || writer.write(&report.file_name, &report.bytes))
        .await
        .map_err(|err| format!("report writer stopped: {err}"))?
        .map_err(|err| err.to_string())?;
    log_info!("saved report {} ({} bytes)", path.display(), size);
    Ok(path)
}
