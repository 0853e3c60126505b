//! Candidate records.

use serde::{Deserialize, Serialize};

use crate::id::CandidateId;

/// A candidate in the election.
///
/// The candidate set is fixed at process start. Only the vote counter
/// changes, and it only ever increases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub votes: u64,
}

impl Candidate {
    /// Create a candidate with a zeroed counter.
    pub fn new(id: CandidateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            votes: 0,
        }
    }
}
