//! Multi-step cascades with compensation.
//!
//! The store has no transactions spanning statements. A cascade records an
//! undo action after each committed step; when a later step fails the undo
//! actions run newest first. An undo that fails leaves the record in the
//! [`RepairLedger`].

use crate::error::RevisionError;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};

/// A record left partially updated by a failed cascade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepairEntry {
    pub record: String,
    pub cascade: &'static str,
    pub failed_step: &'static str,
    pub compensation: &'static str,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RepairLedger {
    entries: Mutex<Vec<RepairEntry>>,
}

impl RepairLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<RepairEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn needs_repair(&self, record: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|entry| entry.record == record)
    }

    /// Forget entries for `record` once it has been repaired by hand.
    pub fn resolve(&self, record: &str) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|entry| entry.record != record);
        before - entries.len()
    }

    fn push(&self, entry: RepairEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

type Compensation<'a> = Box<dyn FnOnce() -> Result<(), RevisionError> + 'a>;

pub(crate) struct Cascade<'a> {
    name: &'static str,
    record: String,
    ledger: &'a RepairLedger,
    undo: Vec<(&'static str, Compensation<'a>)>,
}

impl<'a> Cascade<'a> {
    pub(crate) fn new(name: &'static str, record: &str, ledger: &'a RepairLedger) -> Self {
        Self {
            name,
            record: record.to_string(),
            ledger,
            undo: Vec::new(),
        }
    }

    /// Run one step. On failure, unwind everything committed so far and
    /// return the step's own error.
    pub(crate) fn step<T>(
        &mut self,
        step: &'static str,
        action: impl FnOnce() -> Result<T, RevisionError>,
    ) -> Result<T, RevisionError> {
        match action() {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::warn!(
                    cascade = self.name,
                    record = %self.record,
                    step,
                    error = %err,
                    "cascade step failed, compensating"
                );
                self.unwind(step);
                Err(err)
            }
        }
    }

    /// Register how to undo the step that just committed.
    pub(crate) fn on_rollback(
        &mut self,
        step: &'static str,
        compensation: impl FnOnce() -> Result<(), RevisionError> + 'a,
    ) {
        self.undo.push((step, Box::new(compensation)));
    }

    fn unwind(&mut self, failed_step: &'static str) {
        while let Some((step, compensation)) = self.undo.pop() {
            match compensation() {
                Ok(()) => {
                    tracing::warn!(cascade = self.name, record = %self.record, step, "compensated");
                }
                Err(err) => {
                    tracing::error!(
                        cascade = self.name,
                        record = %self.record,
                        step,
                        error = %err,
                        "compensation failed; record needs repair"
                    );
                    self.ledger.push(RepairEntry {
                        record: self.record.clone(),
                        cascade: self.name,
                        failed_step,
                        compensation: step,
                        error: err.to_string(),
                    });
                }
            }
        }
    }
}
