//! Voter records.

use serde::{Deserialize, Serialize};

use crate::handle::VoterHandle;
use crate::id::VoterId;
use crate::time::Timestamp;

/// A registered voter.
///
/// Created on registration and mutated exactly once, when the voter casts
/// their vote (`has_voted` and `voted_at` are set together). Never deleted
/// for the lifetime of the election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    /// Raw caller-supplied identifier. Sensitive; only the audit view may
    /// expose it.
    pub id: VoterId,
    /// Display name.
    pub name: String,
    /// Pseudonymous handle derived from `id`.
    pub handle: VoterHandle,
    /// Whether this voter has cast their vote. Once true, never reverts.
    pub has_voted: bool,
    /// When the vote was cast. `None` until `has_voted` is set.
    pub voted_at: Option<Timestamp>,
}

impl Voter {
    /// Create a freshly registered voter who has not voted yet.
    pub fn register(id: VoterId, name: impl Into<String>) -> Self {
        let handle = VoterHandle::derive(&id);
        Self {
            id,
            name: name.into(),
            handle,
            has_voted: false,
            voted_at: None,
        }
    }

    /// Mark the voter as having voted at `now`. The caller is responsible
    /// for rejecting double votes before this point.
    pub fn mark_voted(&mut self, now: Timestamp) {
        self.has_voted = true;
        self.voted_at = Some(now);
    }
}
