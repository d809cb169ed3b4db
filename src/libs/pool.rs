//! Fan-out workflow for fleet-wide archive analysis.
//!
//! Runs one fragment fetch + analysis per camera across a fixed-size worker
//! pool. Only the fetch is wrapped in the retry policy; the analyzer is pure
//! and never retried. A cooperative [`CancelToken`] is checked before every
//! fetch attempt and honored mid-backoff, so an interrupt drains in-flight
//! work instead of killing it. Results flow to a single collector over a
//! channel and come back ordered by the input camera order; the collector
//! owns all progress output, workers share no counters.

use crate::api::client::{ApiError, CameraClient};
use crate::api::models::Camera;
use crate::libs::analyzer::{analyze, ArchiveReport, Fragment};
use crate::libs::config::ReportConfig;
use crate::libs::messages::Message;
use crate::msg_error;
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};

/// Cooperative cancellation signal shared by the pool's workers.
///
/// Cloned into each worker task rather than living in process-wide state;
/// anything holding a clone can observe (or trigger) cancellation.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

#[derive(Default)]
struct CancelInner {
    flag: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.flag.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        // Register before checking the flag so a cancel between the check
        // and the await cannot be missed.
        let notified = self.inner.notify.notified();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

/// Analysis outcome for one camera.
#[derive(Debug, Serialize)]
pub struct CameraArchive {
    pub camera: Camera,
    pub report: ArchiveReport,
    /// Set when every fetch attempt failed; the report is then all-zero.
    pub fetch_error: Option<String>,
}

/// Everything the pool produced, in input camera order. Cameras skipped due
/// to cancellation are absent.
pub struct PoolOutcome {
    pub results: Vec<CameraArchive>,
    pub errors: usize,
    pub cancelled: bool,
}

struct WorkerResult {
    idx: usize,
    archive: CameraArchive,
}

/// Fetches fragments for one camera with bounded retries and exponential
/// backoff. Cancellation, before an attempt or during backoff, yields an
/// empty fragment list rather than an error.
pub async fn fetch_fragments_with_retry(
    client: &CameraClient,
    token: &CancelToken,
    uid: &str,
    since: i64,
    till: i64,
    config: &ReportConfig,
) -> Result<Vec<Fragment>, ApiError> {
    let mut delay = Duration::from_secs(config.retry_delay_secs);
    let attempts = config.max_retries.max(1);

    for attempt in 1..=attempts {
        if token.is_cancelled() {
            return Ok(Vec::new());
        }
        match client.get_camera_fragments(uid, since, till).await {
            Ok(fragments) => return Ok(fragments),
            Err(e) if attempt == attempts => return Err(e),
            Err(e) => {
                tracing::debug!(uid, attempt, error = %e, "fragment fetch failed, backing off");
                tokio::select! {
                    _ = token.cancelled() => return Ok(Vec::new()),
                    _ = tokio::time::sleep(delay) => {}
                }
                delay *= 2;
            }
        }
    }
    unreachable!("retry loop returns on the last attempt")
}

/// Analyzes the whole fleet: `workers` tasks drain the camera queue, each
/// fetching `[since, now]` fragments and running the analyzer; the collector
/// assembles ordered results and renders the progress line.
pub async fn analyze_fleet(
    client: Arc<CameraClient>,
    cameras: Vec<Camera>,
    now: i64,
    config: &ReportConfig,
    token: CancelToken,
) -> PoolOutcome {
    let total = cameras.len();
    let since = now - config.period_days as i64 * 86400;
    let cameras = Arc::new(cameras);
    let next = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::channel::<WorkerResult>(config.workers.max(1) * 2);

    let mut handles = Vec::new();
    for _ in 0..config.workers.max(1) {
        let client = client.clone();
        let cameras = cameras.clone();
        let next = next.clone();
        let token = token.clone();
        let tx = tx.clone();
        let config = config.clone();

        handles.push(tokio::spawn(async move {
            loop {
                if token.is_cancelled() {
                    break;
                }
                let idx = next.fetch_add(1, Ordering::Relaxed);
                if idx >= cameras.len() {
                    break;
                }
                let camera = cameras[idx].clone();

                let (fragments, fetch_error) =
                    match fetch_fragments_with_retry(&client, &token, &camera.uid, since, now, &config).await {
                        Ok(fragments) => (fragments, None),
                        // Retries exhausted: analyze an empty batch so the
                        // camera still gets a valid zero-metric report.
                        Err(e) => (Vec::new(), Some(e.to_string())),
                    };
                let report = analyze(&fragments, now);

                let result = WorkerResult {
                    idx,
                    archive: CameraArchive { camera, report, fetch_error },
                };
                if tx.send(result).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx);

    let mut slots: Vec<Option<CameraArchive>> = (0..total).map(|_| None).collect();
    let mut done = 0usize;
    let mut errors = 0usize;

    while let Some(result) = rx.recv().await {
        done += 1;
        if let Some(error) = &result.archive.fetch_error {
            errors += 1;
            println!();
            msg_error!(Message::ReportFetchError(result.archive.camera.uid.clone(), error.clone()));
        }
        print_progress(done, total, errors, &result.archive.camera.display_name());
        slots[result.idx] = Some(result.archive);
    }
    println!();

    for handle in handles {
        let _ = handle.await;
    }

    PoolOutcome {
        results: slots.into_iter().flatten().collect(),
        errors,
        cancelled: token.is_cancelled(),
    }
}

fn print_progress(done: usize, total: usize, errors: usize, last_name: &str) {
    let pct = if total > 0 { done as f64 / total as f64 * 100.0 } else { 100.0 };
    let name: String = last_name.chars().take(40).collect();
    print!("\r  [{}/{}] ({:.0}%) errors: {}  last: {:<40}", done, total, pct, errors, name);
    let _ = std::io::stdout().flush();
}
