use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use super::engine::{AppliedTransition, TransitionHook};

/// Audit entry for one committed transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub applied: AppliedTransition,
    pub timestamp: DateTime<Utc>,
}

/// Hook that keeps an in-memory trail of applied transitions.
///
/// Clones share the same trail, so one handle can be registered on several
/// workflows while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct TransitionHistory {
    records: Arc<Mutex<Vec<TransitionRecord>>>,
}

impl TransitionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TransitionRecord> {
        self.lock().clone()
    }

    pub fn for_workflow(&self, workflow: &str) -> Vec<TransitionRecord> {
        self.lock()
            .iter()
            .filter(|r| r.applied.workflow == workflow)
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<TransitionRecord> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written record behind.
    fn lock(&self) -> MutexGuard<'_, Vec<TransitionRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E> TransitionHook<E> for TransitionHistory {
    fn on_transition(&self, _entity: &E, applied: &AppliedTransition) -> anyhow::Result<()> {
        self.lock().push(TransitionRecord {
            applied: applied.clone(),
            timestamp: Utc::now(),
        });
        Ok(())
    }
}
