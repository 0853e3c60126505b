//! Audit trail entries.

use serde::{Deserialize, Serialize};

use crate::handle::VoterHandle;
use crate::id::{CandidateId, VoterId};
use crate::time::Timestamp;

/// One record per successful vote, in arrival order.
///
/// Carries both the pseudonymous handle and the raw voter identity. The raw
/// fields are sensitive and intended only for the privileged audit view;
/// field names match the wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub hashed_voter: VoterHandle,
    pub real_voter_id: VoterId,
    pub voter_name: String,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub timestamp: Timestamp,
}
