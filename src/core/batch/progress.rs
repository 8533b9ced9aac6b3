//! Batch state and progress reporting
//!
//! The worker is the only writer. Observers hold a `watch` receiver and always
//! see a complete [`ProgressSnapshot`].

use std::fmt;
use tokio::sync::watch;

/// Lifecycle of a batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchState {
    /// Not started
    #[default]
    Idle,
    /// Processing rows
    Running,
    /// Every row written
    Completed,
    /// Aborted at the first failure
    Failed,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BatchState::Idle => "idle",
            BatchState::Running => "running",
            BatchState::Completed => "completed",
            BatchState::Failed => "failed",
        };
        write!(f, "{name}")
    }
}

/// Point-in-time view of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    /// Current state
    pub state: BatchState,
    /// Percentage in [0, 100]; never decreases
    pub percent: u8,
    /// Rows fully written so far
    pub rows_written: usize,
    /// Rows in the dataset (0 until the dataset is loaded)
    pub total_rows: usize,
}

/// `round(100 * done / total)`, clamped to 100
pub fn percent_complete(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total) as u128;
    let total = total as u128;
    ((200 * done + total) / (2 * total)) as u8
}

/// Publishes batch state and progress to observers
#[derive(Debug)]
pub struct ProgressTracker {
    tx: watch::Sender<ProgressSnapshot>,
}

impl ProgressTracker {
    /// Creates an idle tracker and its first receiver
    pub fn channel() -> (Self, watch::Receiver<ProgressSnapshot>) {
        let (tx, rx) = watch::channel(ProgressSnapshot::default());
        (Self { tx }, rx)
    }

    /// Adds another observer
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.tx.subscribe()
    }

    /// Current snapshot
    pub fn snapshot(&self) -> ProgressSnapshot {
        *self.tx.borrow()
    }

    /// `Idle -> Running`
    pub fn begin(&self) {
        self.tx.send_modify(|s| {
            if s.state == BatchState::Idle {
                s.state = BatchState::Running;
            }
        });
    }

    /// Records the dataset size once it is known
    pub fn set_total_rows(&self, total_rows: usize) {
        self.tx.send_if_modified(|s| {
            if s.state != BatchState::Running {
                return false;
            }
            s.total_rows = total_rows;
            true
        });
    }

    /// Advances progress after a row is fully written
    ///
    /// Ignored outside `Running`.
    pub fn row_written(&self) {
        self.tx.send_if_modified(|s| {
            if s.state != BatchState::Running {
                return false;
            }
            s.rows_written += 1;
            s.percent = s.percent.max(percent_complete(s.rows_written, s.total_rows));
            true
        });
    }

    /// `Running -> Completed`
    pub fn complete(&self) {
        self.finish(BatchState::Completed);
    }

    /// `Running -> Failed`; progress is kept as it was
    pub fn fail(&self) {
        self.finish(BatchState::Failed);
    }

    fn finish(&self, state: BatchState) {
        self.tx.send_if_modified(|s| {
            if s.state != BatchState::Running {
                return false;
            }
            s.state = state;
            true
        });
    }
}
