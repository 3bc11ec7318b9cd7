//! Append-only, newest-first report history owned by a single session.

use super::ReportRecord;
use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct SessionLedger {
    records: VecDeque<ReportRecord>,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend; no deduplication and no cap.
    pub fn append(&mut self, record: ReportRecord) {
        self.records.push_front(record);
    }

    /// At most `n` records, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&ReportRecord> {
        self.records.iter().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
