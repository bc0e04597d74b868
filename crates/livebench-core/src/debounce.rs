//! Debounced text input.
//!
//! [`DebouncedInput`] keeps two values: an immediate echo of every keystroke
//! and a committed value that is published only once the input has been
//! quiet for the configured period. At most one commit timer is pending at a
//! time; each keystroke cancels the previous one before scheduling its own.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Quiet period used by the leaderboard search box.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(200);

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A cancellable timer facility.
pub trait Scheduler {
    type Handle;

    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;

    /// Cancel a scheduled task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Schedules tasks on the current Tokio runtime.
///
/// Must be used from within a runtime context.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}

/// Keystroke buffer with a debounced committed value.
pub struct DebouncedInput<S: Scheduler = TokioScheduler> {
    scheduler: S,
    quiet_period: Duration,
    echo: String,
    pending: Option<S::Handle>,
    // Bumped on every keystroke and on cancel; a timer commits only if the
    // generation it was scheduled under is still current.
    generation: Arc<AtomicU64>,
    commits: Arc<AtomicU64>,
    committed: Arc<watch::Sender<String>>,
}

impl DebouncedInput<TokioScheduler> {
    pub fn new(quiet_period: Duration) -> Self {
        Self::with_scheduler(TokioScheduler, quiet_period)
    }
}

impl<S: Scheduler> DebouncedInput<S> {
    pub fn with_scheduler(scheduler: S, quiet_period: Duration) -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self {
            scheduler,
            quiet_period,
            echo: String::new(),
            pending: None,
            generation: Arc::new(AtomicU64::new(0)),
            commits: Arc::new(AtomicU64::new(0)),
            committed: Arc::new(tx),
        }
    }

    /// Record a keystroke and (re)schedule its commit.
    pub fn on_keystroke(&mut self, raw: impl Into<String>) {
        let raw = raw.into();
        self.echo.clone_from(&raw);
        self.cancel_pending();

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let current = Arc::clone(&self.generation);
        let commits = Arc::clone(&self.commits);
        let committed = Arc::clone(&self.committed);
        let handle = self.scheduler.schedule(
            self.quiet_period,
            Box::new(move || {
                if current.load(Ordering::SeqCst) == generation {
                    tracing::debug!(term = %raw, "search term committed");
                    commits.fetch_add(1, Ordering::SeqCst);
                    committed.send_replace(raw);
                }
            }),
        );
        self.pending = Some(handle);
    }

    /// What the input box shows right now.
    pub fn echo(&self) -> &str {
        &self.echo
    }

    /// The last committed value.
    pub fn committed(&self) -> String {
        self.committed.borrow().clone()
    }

    /// Watch committed values.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.committed.subscribe()
    }

    /// Number of values committed so far.
    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    /// Drop any pending commit. The echo is left as is.
    pub fn cancel(&mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> Drop for DebouncedInput<S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
