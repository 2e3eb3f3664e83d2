//! Background work for the UI thread
//!
//! Image decoding and board export run on tokio's blocking pool. Results are
//! sent back over an unbounded channel which the UI drains once per frame, so
//! the board is only ever mutated from the UI thread.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, error, info};

use crate::board::ImageTicket;
use crate::export::{Capture, ExportOptions, export_scene};
use crate::image::{ImageError, ImageRef, load_image_file};
use crate::scene::Scene;

/// A picked image file waiting to be decoded
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub ticket: ImageTicket,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum JobResult {
    Image {
        request: ImageRequest,
        result: Result<ImageRef, ImageError>,
    },
    Export(Result<PathBuf>),
}

pub struct JobRunner {
    runtime: Runtime,
    tx: UnboundedSender<JobResult>,
    rx: UnboundedReceiver<JobResult>,
    capture: Arc<dyn Capture + Send + Sync>,
}

impl JobRunner {
    pub fn new(capture: Arc<dyn Capture + Send + Sync>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("roster-board-jobs")
            .build()
            .context("Failed to start background job runtime")?;
        let (tx, rx) = unbounded_channel();
        Ok(Self { runtime, tx, rx, capture })
    }

    pub fn decode_image(&self, request: ImageRequest, max_bytes: u64) {
        info!(
            image_target = ?request.ticket.target,
            path = %request.path.display(),
            requested_at = request.ticket.requested_at,
            "Queued image decode"
        );
        let tx = self.tx.clone();
        self.runtime.spawn_blocking(move || {
            let result = load_image_file(&request.path, max_bytes);
            if tx.send(JobResult::Image { request, result }).is_err() {
                debug!("Job receiver dropped, discarding image result");
            }
        });
    }

    pub fn export(&self, scene: Scene, options: ExportOptions, dir: PathBuf, roster_name: String) {
        let tx = self.tx.clone();
        let capture = Arc::clone(&self.capture);
        self.runtime.spawn_blocking(move || {
            let result = export_scene(capture.as_ref(), &scene, &options, &dir, &roster_name, Local::now());
            if let Err(e) = &result {
                error!(error = ?e, "Board export failed");
            }
            if tx.send(JobResult::Export(result)).is_err() {
                debug!("Job receiver dropped, discarding export result");
            }
        });
    }

    /// Next finished job, if any
    pub fn poll(&mut self) -> Option<JobResult> {
        self.rx.try_recv().ok()
    }
}
