use crate::cluster::snapshot::ClusterSnapshot;
use crate::events::LogEntry;
use crate::orchestrator::{Command, CommandOutcome, ControlState, Orchestrator};

use std::sync::Arc;
use tokio::sync::{Mutex, Notify, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Runs the orchestrator against real time.
///
/// Commands and the background driver share the orchestrator behind a mutex;
/// every published snapshot is also pushed to a `watch` channel so readers can
/// grab the current collection without touching the lock.
pub struct ScalingService {
    orchestrator: Mutex<Orchestrator>,
    /// Origin of the orchestrator's virtual clock.
    started: Instant,
    wake: Notify,
    snapshots: watch::Sender<ClusterSnapshot>,
}

impl ScalingService {
    pub fn new() -> Arc<Self> {
        let orchestrator = Orchestrator::new();
        let (snapshots, _) = watch::channel(orchestrator.snapshot().clone());

        Arc::new(Self {
            orchestrator: Mutex::new(orchestrator),
            started: Instant::now(),
            wake: Notify::new(),
            snapshots,
        })
    }

    /// Spawns the driver loop and returns immediately.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        tracing::info!("Starting scaling driver...");

        tokio::spawn(async move {
            self.drive_loop().await;
        })
    }

    pub async fn scale_out_storage(&self) -> CommandOutcome {
        self.dispatch(Command::ScaleOutStorage).await
    }

    pub async fn scale_in_storage(&self) -> CommandOutcome {
        self.dispatch(Command::ScaleInStorage).await
    }

    pub async fn scale_out_compute(&self) -> CommandOutcome {
        self.dispatch(Command::ScaleOutCompute).await
    }

    pub async fn scale_in_compute(&self) -> CommandOutcome {
        self.dispatch(Command::ScaleInCompute).await
    }

    pub async fn reset(&self) -> CommandOutcome {
        self.dispatch(Command::Reset).await
    }

    /// Catches the clock up to now, runs `command`, publishes, and wakes the
    /// driver if a new operation was scheduled.
    pub async fn dispatch(&self, command: Command) -> CommandOutcome {
        let outcome = {
            let mut orchestrator = self.orchestrator.lock().await;
            orchestrator.advance_to(self.started.elapsed());
            let outcome = orchestrator.execute(command);
            self.publish(&orchestrator);
            outcome
        };

        tracing::debug!("Command {:?} -> {:?}", command, outcome);

        if matches!(outcome, CommandOutcome::Started(_)) {
            self.wake.notify_one();
        }

        outcome
    }

    /// The latest published node collection.
    pub fn snapshot(&self) -> ClusterSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ClusterSnapshot> {
        self.snapshots.subscribe()
    }

    pub async fn log_after(&self, after: Option<u64>) -> Vec<LogEntry> {
        self.orchestrator.lock().await.log().after(after).to_vec()
    }

    pub async fn control_state(&self) -> ControlState {
        self.orchestrator.lock().await.control_state()
    }

    pub async fn is_busy(&self) -> bool {
        self.orchestrator.lock().await.is_busy()
    }

    /// Sleeps until the next step is due (or a new operation is scheduled),
    /// then advances the orchestrator to the current elapsed time.
    async fn drive_loop(self: Arc<Self>) {
        loop {
            let deadline = self.orchestrator.lock().await.next_deadline();

            match deadline {
                Some(at) => {
                    tokio::select! {
                        _ = tokio::time::sleep_until(self.started + at) => {}
                        _ = self.wake.notified() => continue,
                    }
                }
                None => {
                    self.wake.notified().await;
                    continue;
                }
            }

            let mut orchestrator = self.orchestrator.lock().await;
            let executed = orchestrator.advance_to(self.started.elapsed());
            self.publish(&orchestrator);

            tracing::trace!("Driver executed {} step(s)", executed);
        }
    }

    fn publish(&self, orchestrator: &Orchestrator) {
        let latest = orchestrator.snapshot();
        self.snapshots.send_if_modified(|current| {
            if current.version() == latest.version() {
                return false;
            }
            *current = latest.clone();
            true
        });
    }
}
