//! Append-only audit trail.

use hustings_types::AuditEntry;

/// The audit trail: one entry per successful vote, in arrival order.
///
/// Entries are never edited or removed. Together with the ledger invariant
/// that the trail's length equals the sum of all candidate counters, this is
/// what makes the trail tamper-evident.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append one entry. The only mutation this type supports.
    pub fn append(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
