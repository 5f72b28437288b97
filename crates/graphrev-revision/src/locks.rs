//! Per-record serialization of lifecycle transitions and deletes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One mutex per canonical record URI, created on demand.
#[derive(Debug, Default)]
pub struct RecordLocks {
    handles: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl RecordLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for `record`. Lock it with [`hold`].
    pub fn handle(&self, record: &str) -> Arc<Mutex<()>> {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|_, handle| Arc::strong_count(handle) > 1);
        handles
            .entry(record.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Records with a live handle.
    pub fn active(&self) -> usize {
        let handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles
            .values()
            .filter(|handle| Arc::strong_count(handle) > 1)
            .count()
    }
}

/// Block until `handle` is free. A panic in a previous holder does not
/// leave the record locked forever.
pub fn hold(handle: &Mutex<()>) -> MutexGuard<'_, ()> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
