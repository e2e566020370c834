//! Fetch and batch state tracking.

use fanout_data::{FailureKind, FetchResult};

/// Status of a single fetch.
///
/// `Pending` moves to exactly one terminal state; there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Request in flight.
    Pending,
    /// Body received and parsed.
    Succeeded,
    /// Failed with the given class of error.
    Failed(FailureKind),
}

impl FetchStatus {
    /// Check if this status is terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Succeeded => "succeeded",
            Self::Failed(kind) => kind.name(),
        }
    }
}

impl From<&FetchResult> for FetchStatus {
    fn from(result: &FetchResult) -> Self {
        match result {
            FetchResult::Success { .. } => Self::Succeeded,
            FetchResult::Failure { error } => Self::Failed(error.kind()),
        }
    }
}

/// Status of a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// At least one fetch is still in flight.
    Pending,
    /// Every fetch reached a terminal state.
    Complete,
}

/// Tracks the status of every fetch in a batch by input position.
#[derive(Debug, Clone)]
pub struct BatchTracker {
    statuses: Vec<FetchStatus>,
    completed: usize,
}

impl BatchTracker {
    /// Create a tracker with `len` pending fetches.
    pub fn new(len: usize) -> Self {
        Self {
            statuses: vec![FetchStatus::Pending; len],
            completed: 0,
        }
    }

    /// Move the fetch at `index` to a terminal status.
    ///
    /// Returns `false` (and changes nothing) if `index` is out of range, the
    /// fetch is already terminal, or `status` is `Pending`.
    pub fn complete(&mut self, index: usize, status: FetchStatus) -> bool {
        if !status.is_terminal() {
            return false;
        }
        match self.statuses.get_mut(index) {
            Some(current) if !current.is_terminal() => {
                *current = status;
                self.completed += 1;
                true
            }
            _ => false,
        }
    }

    /// Get the status at `index`.
    pub fn status(&self, index: usize) -> Option<FetchStatus> {
        self.statuses.get(index).copied()
    }

    /// Number of fetches that reached a terminal state.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Number of fetches tracked.
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    /// Check if the batch has no fetches.
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Status of the batch as a whole.
    pub fn batch_status(&self) -> BatchStatus {
        if self.completed == self.statuses.len() {
            BatchStatus::Complete
        } else {
            BatchStatus::Pending
        }
    }

    /// Check if every fetch is terminal.
    pub fn is_complete(&self) -> bool {
        self.batch_status() == BatchStatus::Complete
    }
}
