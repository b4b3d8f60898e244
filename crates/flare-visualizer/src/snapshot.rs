use crossbeam::channel::{self, Receiver, Sender};
use image::RgbaImage;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::error::Result;

/// A captured viewport waiting to be written to disk.
pub struct SnapshotJob {
    pub image: RgbaImage,
    pub path: PathBuf,
}

/// Outcome of one snapshot write, reported back to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotResult {
    Saved(PathBuf),
    Failed { path: PathBuf, reason: String },
}

/// Background PNG writer so encoding never stalls the render loop.
pub struct SnapshotWriter {
    job_tx: Option<Sender<SnapshotJob>>,
    result_rx: Receiver<SnapshotResult>,
    thread: Option<JoinHandle<()>>,
}

impl SnapshotWriter {
    /// Spawn the writer thread.
    pub fn start() -> Result<Self> {
        let (job_tx, job_rx) = channel::bounded::<SnapshotJob>(4);
        let (result_tx, result_rx) = channel::unbounded();

        let thread = thread::Builder::new()
            .name("flare-snapshot".to_string())
            .spawn(move || write_loop(job_rx, result_tx))?;

        Ok(Self {
            job_tx: Some(job_tx),
            result_rx,
            thread: Some(thread),
        })
    }

    /// Queue an image. Returns `false` if the queue is full or the writer stopped.
    pub fn submit(&self, job: SnapshotJob) -> bool {
        match &self.job_tx {
            Some(tx) => tx.try_send(job).is_ok(),
            None => false,
        }
    }

    /// Results finished since the last call.
    pub fn drain_results(&self) -> Vec<SnapshotResult> {
        self.result_rx.try_iter().collect()
    }

    /// Finish queued writes and join the thread.
    pub fn stop(&mut self) {
        // Dropping the sender ends the write loop.
        self.job_tx.take();
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("snapshot writer thread panicked");
            }
        }
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        self.stop();
    }
}

fn write_loop(jobs: Receiver<SnapshotJob>, results: Sender<SnapshotResult>) {
    for job in jobs {
        let result = match job.image.save(&job.path) {
            Ok(()) => {
                log::info!("snapshot saved to {}", job.path.display());
                SnapshotResult::Saved(job.path)
            }
            Err(e) => {
                log::warn!("snapshot {} failed: {}", job.path.display(), e);
                SnapshotResult::Failed { path: job.path, reason: e.to_string() }
            }
        };
        if results.send(result).is_err() {
            break;
        }
    }
}
