//! Background upload worker. Sends the whole selection as one multipart
//! POST and reports byte progress and the terminal outcome over a channel.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use futures::StreamExt;
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::upload::types::{SelectedFile, UploadEvent, UploadOutcome};

/// Fixed target. The response body is ignored, only the status code matters.
pub const UPLOAD_ENDPOINT: &str = "https://httpbin.org/post";

const USER_AGENT: &str = concat!("image_uploader/", env!("CARGO_PKG_VERSION"));

/// How often the emitter samples the byte counter.
const PROGRESS_EMIT_INTERVAL_MS: u64 = 50;

/// Chunk size for the counting request body streams.
const STREAM_CHUNK_SIZE: usize = 64 * 1024;

#[derive(Debug, Error)]
enum UploadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub struct UploadJob {
    endpoint: String,
    files: Vec<SelectedFile>,
}

impl UploadJob {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self {
            endpoint: UPLOAD_ENDPOINT.to_string(),
            files,
        }
    }

    /// Runs the upload on its own thread with its own runtime. Exactly one
    /// `Done` event is sent, and it is sent after the last `Progress`
    /// event.
    pub fn spawn(self, events: Sender<UploadEvent>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            let runtime = match Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracing::error!(error = %err, "failed to build upload runtime");
                    let _ = events.send(UploadEvent::Done(UploadOutcome::Error));
                    return;
                }
            };
            runtime.block_on(self.run(events));
        })
    }

    async fn run(self, events: Sender<UploadEvent>) {
        let outcome = match self.send(&events).await {
            Ok(200) => UploadOutcome::Success,
            Ok(status) => {
                tracing::warn!(status, "upload rejected by server");
                UploadOutcome::Error
            }
            Err(err) => {
                tracing::error!(error = %err, "upload failed");
                UploadOutcome::Error
            }
        };
        let _ = events.send(UploadEvent::Done(outcome));
    }

    async fn send(&self, events: &Sender<UploadEvent>) -> Result<u16, UploadError> {
        let mut payloads = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let data = std::fs::read(&file.path).map_err(|source| UploadError::Read {
                path: file.path.clone(),
                source,
            })?;
            payloads.push((file, data));
        }
        let total: u64 = payloads.iter().map(|(_, data)| data.len() as u64).sum();

        let sent = Arc::new(AtomicU64::new(0));
        let finished = Arc::new(AtomicBool::new(false));
        let emitter = spawn_emitter(events.clone(), sent.clone(), finished.clone(), total);

        let result = self.post_form(payloads, &sent).await;

        finished.store(true, Ordering::Release);
        let _ = emitter.await;
        result
    }

    async fn post_form(
        &self,
        payloads: Vec<(&SelectedFile, Vec<u8>)>,
        sent: &Arc<AtomicU64>,
    ) -> Result<u16, UploadError> {
        let mut form = reqwest::multipart::Form::new();
        for (file, data) in payloads {
            form = form.part("file", counting_part(file, data, sent.clone())?);
        }

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let response = client.post(&self.endpoint).multipart(form).send().await?;
        Ok(response.status().as_u16())
    }
}

/// One multipart part whose body bumps the shared byte counter as hyper
/// pulls chunks onto the wire.
fn counting_part(
    file: &SelectedFile,
    data: Vec<u8>,
    sent: Arc<AtomicU64>,
) -> Result<reqwest::multipart::Part, UploadError> {
    let length = data.len() as u64;
    let body = reqwest::Body::wrap_stream(counting_stream(data, sent));
    let part = reqwest::multipart::Part::stream_with_length(body, length)
        .file_name(file.name.clone())
        .mime_str(&file.mime_type)?;
    Ok(part)
}

fn counting_stream(
    data: Vec<u8>,
    sent: Arc<AtomicU64>,
) -> impl futures::Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + Sync + 'static {
    let chunks: Vec<Result<Vec<u8>, std::io::Error>> = data
        .chunks(STREAM_CHUNK_SIZE)
        .map(|chunk| Ok(chunk.to_vec()))
        .collect();
    futures::stream::iter(chunks).inspect(move |chunk| {
        if let Ok(chunk) = chunk {
            sent.fetch_add(chunk.len() as u64, Ordering::Relaxed);
        }
    })
}

/// Samples the counter on a fixed interval and reports changes. One more
/// sample runs after the request finishes; the final count always goes out
/// before the task exits.
fn spawn_emitter(
    events: Sender<UploadEvent>,
    sent: Arc<AtomicU64>,
    finished: Arc<AtomicBool>,
    total: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut last_sent = 0u64;
        loop {
            tokio::time::sleep(Duration::from_millis(PROGRESS_EMIT_INTERVAL_MS)).await;
            let now = sent.load(Ordering::Relaxed);
            if now != last_sent {
                last_sent = now;
                let _ = events.send(UploadEvent::Progress { sent: now, total });
            }
            if finished.load(Ordering::Acquire) {
                break;
            }
        }
    })
}
