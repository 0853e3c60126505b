//! Point-in-time tally snapshots.

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;

/// Read-only summary of election totals.
///
/// Computed on demand from ledger state, never stored. Always reflects a
/// state that existed at a single point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySnapshot {
    /// All candidates with their live counts, in roster order.
    pub candidates: Vec<Candidate>,
    /// Sum of all candidate counters.
    pub total_votes: u64,
    /// Number of registered voters, voted or not.
    pub registered_voters: u64,
    /// Number of registered voters who have voted.
    pub voters_who_voted: u64,
}
