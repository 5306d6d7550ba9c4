use std::sync::Arc;

use tokio::sync::mpsc;

use super::snapshot::{Snapshot, SnapshotError};
use crate::draw::RasterData;

/// A decode job for one history entry.
#[derive(Debug)]
struct RestoreRequest {
    generation: u64,
    index: usize,
    snapshot: Arc<Snapshot>,
}

/// Result of decoding a history entry off the caller's thread.
#[derive(Debug)]
pub struct RestoreCompletion {
    /// Request counter value this completion answers.
    pub generation: u64,
    /// History index that was decoded.
    pub index: usize,
    pub result: Result<RasterData, SnapshotError>,
}

/// Decodes history snapshots asynchronously and hands back only the newest result.
///
/// Requests are processed in submission order by a single background task.
/// Every request gets a generation number; completions for anything but the
/// most recent request are dropped when they arrive, so an older decode
/// finishing late can never overwrite a newer one.
pub struct RestoreQueue {
    /// Channel for sending decode requests.
    request_tx: mpsc::UnboundedSender<RestoreRequest>,
    /// Channel the worker reports finished decodes on.
    completion_rx: mpsc::UnboundedReceiver<RestoreCompletion>,
    /// Generation of the most recent request.
    latest: u64,
    /// Requests submitted but not yet answered.
    in_flight: usize,
}

impl RestoreQueue {
    /// Create a restore queue.
    ///
    /// This spawns a background task that decodes snapshots on the blocking pool.
    ///
    /// # Arguments
    /// * `runtime_handle` - Tokio runtime handle for spawning async tasks
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        let (request_tx, mut request_rx) = mpsc::unbounded_channel::<RestoreRequest>();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel::<RestoreCompletion>();

        runtime_handle.spawn(async move {
            while let Some(request) = request_rx.recv().await {
                let RestoreRequest {
                    generation,
                    index,
                    snapshot,
                } = request;
                log::debug!(
                    "Decoding history entry {} (generation {})",
                    index,
                    generation
                );

                let result = match tokio::task::spawn_blocking(move || snapshot.decode()).await {
                    Ok(result) => result,
                    Err(e) => Err(SnapshotError::Corrupt(format!("decode task failed: {}", e))),
                };

                if completion_tx
                    .send(RestoreCompletion {
                        generation,
                        index,
                        result,
                    })
                    .is_err()
                {
                    log::debug!("Restore queue dropped; stopping worker");
                    break;
                }
            }
        });

        Self {
            request_tx,
            completion_rx,
            latest: 0,
            in_flight: 0,
        }
    }

    /// Queue a snapshot for decoding and return its generation.
    ///
    /// This is non-blocking; the result is picked up with [`Self::poll`] or
    /// [`Self::settle`].
    pub fn submit(&mut self, index: usize, snapshot: Arc<Snapshot>) -> Result<u64, SnapshotError> {
        let generation = self.latest + 1;
        self.request_tx
            .send(RestoreRequest {
                generation,
                index,
                snapshot,
            })
            .map_err(|_| SnapshotError::WorkerUnavailable)?;
        self.latest = generation;
        self.in_flight += 1;
        Ok(generation)
    }

    /// Whether any submitted decode has not been answered yet.
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    /// Generation of the most recent request (0 before any request).
    pub fn latest_generation(&self) -> u64 {
        self.latest
    }

    /// Drain finished decodes without waiting.
    ///
    /// Returns the completion for the latest request if it has arrived.
    pub fn poll(&mut self) -> Option<RestoreCompletion> {
        let mut current = None;
        while self.in_flight > 0 {
            match self.completion_rx.try_recv() {
                Ok(completion) => {
                    if let Some(completion) = self.accept(completion) {
                        current = Some(completion);
                    }
                }
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    return self.worker_lost().or(current);
                }
            }
        }
        current
    }

    /// Wait until every submitted decode has been answered.
    ///
    /// Returns the completion for the latest request, if one was outstanding.
    /// Must not be called from inside the async runtime.
    pub fn settle(&mut self) -> Option<RestoreCompletion> {
        let mut current = None;
        while self.in_flight > 0 {
            match self.completion_rx.blocking_recv() {
                Some(completion) => {
                    if let Some(completion) = self.accept(completion) {
                        current = Some(completion);
                    }
                }
                None => return self.worker_lost().or(current),
            }
        }
        current
    }

    fn accept(&mut self, completion: RestoreCompletion) -> Option<RestoreCompletion> {
        self.in_flight = self.in_flight.saturating_sub(1);
        if completion.generation == self.latest {
            Some(completion)
        } else {
            log::debug!(
                "Discarding stale restore of entry {} (generation {}, latest {})",
                completion.index,
                completion.generation,
                self.latest
            );
            None
        }
    }

    /// The worker went away with requests outstanding; answer the latest with an error.
    fn worker_lost(&mut self) -> Option<RestoreCompletion> {
        log::error!("Snapshot restore worker stopped unexpectedly");
        self.in_flight = 0;
        Some(RestoreCompletion {
            generation: self.latest,
            index: usize::MAX,
            result: Err(SnapshotError::WorkerUnavailable),
        })
    }
}

#[cfg(test)]
impl RestoreQueue {
    pub(crate) fn with_closed_channel_for_test() -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<RestoreRequest>();
        drop(rx);
        let (_completion_tx, completion_rx) = mpsc::unbounded_channel::<RestoreCompletion>();
        Self {
            request_tx: tx,
            completion_rx,
            latest: 0,
            in_flight: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(fill: u8) -> Arc<Snapshot> {
        let raster = RasterData {
            width: 2,
            height: 2,
            stride: 8,
            data: vec![fill; 16],
        };
        Arc::new(Snapshot::encode(&raster, 1).unwrap())
    }

    #[test]
    fn settle_returns_latest_completion() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut queue = RestoreQueue::new(runtime.handle());

        let first = queue.submit(0, snapshot(1)).unwrap();
        let second = queue.submit(1, snapshot(2)).unwrap();
        assert!(second > first);
        assert!(queue.is_pending());

        let completion = queue.settle().expect("latest completion");
        assert_eq!(completion.generation, second);
        assert_eq!(completion.index, 1);
        assert_eq!(completion.result.unwrap().data, vec![2; 16]);
        assert!(!queue.is_pending());
    }

    #[test]
    fn settle_without_requests_returns_none() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut queue = RestoreQueue::new(runtime.handle());
        assert!(queue.settle().is_none());
        assert!(queue.poll().is_none());
    }

    #[test]
    fn poll_eventually_delivers_without_blocking() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut queue = RestoreQueue::new(runtime.handle());
        let generation = queue.submit(0, snapshot(9)).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        let completion = loop {
            if let Some(completion) = queue.poll() {
                break completion;
            }
            assert!(std::time::Instant::now() < deadline, "restore never completed");
            std::thread::sleep(std::time::Duration::from_millis(2));
        };
        assert_eq!(completion.generation, generation);
        assert!(completion.result.is_ok());
    }

    #[test]
    fn decode_errors_are_reported() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut queue = RestoreQueue::new(runtime.handle());
        queue
            .submit(3, Arc::new(Snapshot::from_parts(2, 2, 8, vec![1, 2, 3])))
            .unwrap();
        let completion = queue.settle().unwrap();
        assert_eq!(completion.index, 3);
        assert!(matches!(completion.result, Err(SnapshotError::Corrupt(_))));
    }

    #[test]
    fn submit_fails_when_worker_is_gone() {
        let mut queue = RestoreQueue::with_closed_channel_for_test();
        let err = queue.submit(0, snapshot(0)).unwrap_err();
        assert!(matches!(err, SnapshotError::WorkerUnavailable));
        assert!(!queue.is_pending());
    }
}
