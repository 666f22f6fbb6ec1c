// ── Refresh coordination ──
//
// Owns the single canonical status slot. At most one fetch is in flight
// per coordinator: concurrent refresh requests join the in-flight
// outcome instead of issuing a second vendor call. A failed refresh
// keeps the previous status (stale data beats no data for display) and
// flips the failure flag so consumers can report unavailability.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use trydan_api::{ChargerClient, ChargerStatus};

use crate::config::ChargerConfig;
use crate::error::CoreError;

/// Where the coordinator is in its refresh lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPhase {
    /// No refresh attempted yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Refreshing,
    /// The last refresh succeeded.
    Ready,
    /// The last refresh failed. `RefreshState::status` retains the
    /// previous snapshot, if any.
    Failed,
}

/// Coordinator state observable by subscribers.
///
/// Failures are data at this boundary, not control flow: subscribers are
/// never handed an error, they see `last_update_ok` go false.
#[derive(Debug, Clone, Default)]
pub struct RefreshState {
    pub phase: RefreshPhase,
    /// Last successfully fetched status. Retained across failed
    /// refreshes.
    pub status: Option<Arc<ChargerStatus>>,
    /// Whether the most recent completed refresh succeeded.
    pub last_update_ok: bool,
    /// Human-readable cause of the most recent failure.
    pub last_error: Option<String>,
}

/// Owns the canonical status slot and the polling task for one charger.
///
/// Cheaply cloneable; all clones share state.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    client: ChargerClient,
    poll_interval: Duration,
    state: watch::Sender<RefreshState>,
    /// Serializes fetches. Holders of this lock are the single in-flight
    /// refresh; waiters join its outcome via the generation check.
    refresh_gate: Mutex<()>,
    /// Bumped after every completed fetch, success or failure.
    generation: AtomicU64,
    cancel: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    /// Create a coordinator. Does not fetch -- call
    /// [`start()`](Self::start) or [`request_refresh()`](Self::request_refresh).
    pub fn new(config: &ChargerConfig) -> Result<Self, CoreError> {
        let client = ChargerClient::new(&config.client_config())?;
        let (state, _) = watch::channel(RefreshState::default());

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                client,
                poll_interval: config.poll_interval(),
                state,
                refresh_gate: Mutex::new(()),
                generation: AtomicU64::new(0),
                cancel: CancellationToken::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        })
    }

    /// The underlying device client, for write commands.
    pub fn client(&self) -> &ChargerClient {
        &self.inner.client
    }

    /// Start polling.
    ///
    /// The first refresh runs inline: if it fails, the poll task is not
    /// spawned and the error is returned -- the integration must not come
    /// up in an unknown state.
    pub async fn start(&self) -> Result<(), CoreError> {
        self.request_refresh().await?;

        let coordinator = self.clone();
        let cancel = self.inner.cancel.clone();
        self.inner
            .tasks
            .lock()
            .await
            .push(tokio::spawn(poll_task(coordinator, cancel)));

        info!(
            interval_secs = self.inner.poll_interval.as_secs(),
            device_id = self.inner.client.device_id(),
            "coordinator started"
        );
        Ok(())
    }

    /// Stop the poll task and wait for it to finish. An in-flight poll
    /// fetch is abandoned rather than waited out.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut tasks = self.inner.tasks.lock().await;
        for handle in tasks.drain(..) {
            let _ = handle.await;
        }
        debug!("coordinator stopped");
    }

    /// Refresh now, or join a refresh already in flight.
    ///
    /// If another caller is mid-fetch, this waits for that fetch and
    /// adopts its outcome rather than issuing a second vendor call.
    pub async fn request_refresh(&self) -> Result<Arc<ChargerStatus>, CoreError> {
        let joined_at = self.inner.generation.load(Ordering::Acquire);
        let _gate = self.inner.refresh_gate.lock().await;
        if self.inner.generation.load(Ordering::Acquire) != joined_at {
            // A refresh completed while we waited for the gate.
            return self.last_outcome();
        }

        self.inner
            .state
            .send_modify(|s| s.phase = RefreshPhase::Refreshing);

        let result = self.inner.client.fetch_status().await;
        self.inner.generation.fetch_add(1, Ordering::AcqRel);

        match result {
            Ok(status) => {
                let status = Arc::new(status);
                self.inner.state.send_modify(|s| {
                    s.phase = RefreshPhase::Ready;
                    s.status = Some(Arc::clone(&status));
                    s.last_update_ok = true;
                    s.last_error = None;
                });
                debug!(
                    state = %status.charge_state,
                    power_w = status.charge_power,
                    "status refreshed"
                );
                Ok(status)
            }
            Err(err) => {
                warn!(error = %err, "status refresh failed");
                let core_err = CoreError::from(err);
                self.inner.state.send_modify(|s| {
                    s.phase = RefreshPhase::Failed;
                    // s.status is deliberately left alone: stale beats none.
                    s.last_update_ok = false;
                    s.last_error = Some(core_err.to_string());
                });
                Err(core_err)
            }
        }
    }

    fn last_outcome(&self) -> Result<Arc<ChargerStatus>, CoreError> {
        let state = self.inner.state.borrow().clone();
        match (state.last_update_ok, state.status) {
            (true, Some(status)) => Ok(status),
            _ => Err(CoreError::RefreshFailed {
                message: state
                    .last_error
                    .unwrap_or_else(|| "refresh failed".to_owned()),
            }),
        }
    }

    /// The last successfully fetched status, if any. Survives failed
    /// refreshes.
    pub fn current_status(&self) -> Option<Arc<ChargerStatus>> {
        self.inner.state.borrow().status.clone()
    }

    /// Whether the most recent completed refresh succeeded.
    pub fn last_update_succeeded(&self) -> bool {
        self.inner.state.borrow().last_update_ok
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<RefreshState> {
        self.inner.state.subscribe()
    }
}

// ── Background task ──────────────────────────────────────────────────

/// Periodically refresh until cancelled. Failures are recorded in the
/// coordinator state by `request_refresh`; the task itself never exits
/// on error.
async fn poll_task(coordinator: Coordinator, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(coordinator.inner.poll_interval);
    interval.tick().await; // consume the immediate first tick; start() already refreshed

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                // Cancellation mid-fetch drops the request future; shutdown
                // never waits out a slow vendor.
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    result = coordinator.request_refresh() => {
                        if let Err(e) = result {
                            warn!(error = %e, "periodic refresh failed");
                        }
                    }
                }
            }
        }
    }
}
