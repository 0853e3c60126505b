use thiserror::Error;

use hustings_types::{CandidateId, VoterId};

/// Expected, user-facing failures of ledger operations.
///
/// Every variant is recoverable: it is reported back to the requesting
/// session as a structured failure result and never terminates the session
/// or the process.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("voter {0} is already registered")]
    AlreadyRegistered(VoterId),

    #[error("voter {0} is not registered")]
    NotRegistered(VoterId),

    #[error("voter {0} has already voted")]
    AlreadyVoted(VoterId),

    #[error("candidate {0} does not exist")]
    InvalidCandidate(CandidateId),
}
