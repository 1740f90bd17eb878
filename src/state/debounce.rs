//! Debounced synchronization between edited filters and committed parameters.
//!
//! Time is passed in by the caller so that windows are deterministic. A
//! driver calls [`DebouncedParams::poll`] (or checks
//! [`DebouncedParams::pending_deadline`]) to learn when a settled edit should
//! be committed.
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::domain::query::{QueryError, ResourceQuery};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Which edits wait for the debounce window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Free-text fields are debounced; any other edit commits immediately and
    /// carries pending text with it.
    #[default]
    DebounceText,
    /// Every edit waits for the window.
    DebounceAll,
}

#[derive(Clone, Debug)]
pub struct DebouncedParams<Q> {
    committed: Q,
    local: Q,
    delay: Duration,
    policy: CommitPolicy,
    deadline: Option<Instant>,
}

impl<Q: ResourceQuery> DebouncedParams<Q> {
    /// Starts in sync with `committed`. Nothing is committed on construction.
    pub fn new(committed: Q, delay: Duration, policy: CommitPolicy) -> Self {
        Self {
            local: committed.clone(),
            committed,
            delay,
            policy,
            deadline: None,
        }
    }

    pub fn local_params(&self) -> &Q {
        &self.local
    }

    pub fn committed_params(&self) -> &Q {
        &self.committed
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// When the pending window settles, if an edit is waiting.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn has_pending_changes(&self) -> bool {
        self.local != self.committed
    }

    /// Adopts an externally committed value, discarding local edits.
    pub fn sync_committed(&mut self, committed: Q) {
        if committed != self.committed {
            self.local = committed.clone();
            self.committed = committed;
            self.deadline = None;
        }
    }

    /// Edits one field of the local snapshot and resets `page` to 1.
    ///
    /// Returns the value to commit when the edit is not debounced.
    pub fn update_local_param(
        &mut self,
        key: &str,
        raw: &str,
        now: Instant,
    ) -> Result<Option<Q>, QueryError> {
        let mut next = self.local.clone();
        next.set_param(key, raw)?;
        next.base_mut().page = 1;
        self.local = next;

        if self.policy == CommitPolicy::DebounceAll || Q::is_debounced(key) {
            self.deadline = Some(now + self.delay);
            Ok(None)
        } else {
            Ok(self.flush())
        }
    }

    /// Replaces the whole local snapshot.
    pub fn set_local_params(&mut self, params: Q, now: Instant) -> Option<Q> {
        self.local = params;
        match self.policy {
            CommitPolicy::DebounceAll => {
                self.deadline = Some(now + self.delay);
                None
            }
            CommitPolicy::DebounceText => self.flush(),
        }
    }

    /// Commits the local snapshot once the window has settled.
    pub fn poll(&mut self, now: Instant) -> Option<Q> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Commits immediately. Returns `None` when nothing changed.
    pub fn flush(&mut self) -> Option<Q> {
        self.deadline = None;
        if self.local == self.committed {
            return None;
        }
        self.committed = self.local.clone();
        Some(self.committed.clone())
    }
}
