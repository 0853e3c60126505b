//! The election state machine.
//!
//! Four operations: `register`, `vote`, `snapshot`, `audit_log`. Votes are
//! processed strictly in the order the mutating call is made; there is no
//! reordering or batching.

use std::collections::HashMap;

use hustings_types::{
    AuditEntry, Candidate, CandidateId, TallySnapshot, Timestamp, Voter, VoterId,
};

use crate::audit::AuditLog;
use crate::error::LedgerError;

/// Authoritative in-memory state for one election.
///
/// All state-changing fields are mutated only through `&mut self` methods,
/// so wrapping the ledger in a single lock linearizes every register/vote
/// relative to each other, and no reader can observe a half-applied vote.
#[derive(Clone, Debug)]
pub struct ElectionLedger {
    /// Registered voters, keyed by their caller-supplied id.
    voters: HashMap<VoterId, Voter>,
    /// Candidate roster in announcement order. Fixed for the lifetime of
    /// the election; only the counters change.
    candidates: Vec<Candidate>,
    /// One entry per successful vote, in arrival order.
    audit: AuditLog,
}

impl ElectionLedger {
    /// Create a ledger with the given fixed candidate roster.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            voters: HashMap::new(),
            candidates,
            audit: AuditLog::new(),
        }
    }

    /// Register a new voter.
    ///
    /// Rejects ids that already have a record; registration never
    /// overwrites. The pseudonymous handle is derived here and fixed for
    /// the voter's lifetime.
    pub fn register(&mut self, voter_id: VoterId, name: &str) -> Result<String, LedgerError> {
        if self.voters.contains_key(&voter_id) {
            return Err(LedgerError::AlreadyRegistered(voter_id));
        }
        let voter = Voter::register(voter_id.clone(), name);
        self.voters.insert(voter_id, voter);
        Ok("registered successfully".to_string())
    }

    /// Cast a vote.
    ///
    /// On success, all four effects happen before this method returns: the
    /// candidate counter increments, the voter's `has_voted` flag and
    /// timestamp are set, and one audit entry is appended.
    pub fn vote(
        &mut self,
        voter_id: &VoterId,
        candidate_id: &CandidateId,
        now: Timestamp,
    ) -> Result<String, LedgerError> {
        let voter = self
            .voters
            .get_mut(voter_id)
            .ok_or_else(|| LedgerError::NotRegistered(voter_id.clone()))?;
        if voter.has_voted {
            return Err(LedgerError::AlreadyVoted(voter_id.clone()));
        }
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| &c.id == candidate_id)
            .ok_or_else(|| LedgerError::InvalidCandidate(candidate_id.clone()))?;

        candidate.votes += 1;
        voter.mark_voted(now);
        self.audit.append(AuditEntry {
            hashed_voter: voter.handle.clone(),
            real_voter_id: voter.id.clone(),
            voter_name: voter.name.clone(),
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            timestamp: now,
        });
        Ok("vote recorded".to_string())
    }

    /// Point-in-time summary of the tally.
    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            candidates: self.candidates.clone(),
            total_votes: self.candidates.iter().map(|c| c.votes).sum(),
            registered_voters: self.voters.len() as u64,
            voters_who_voted: self.voters.values().filter(|v| v.has_voted).count() as u64,
        }
    }

    /// The full audit trail in arrival order.
    ///
    /// Entries carry raw voter identifiers; this accessor backs the
    /// privileged audit view only.
    pub fn audit_log(&self) -> &[AuditEntry] {
        self.audit.entries()
    }

    /// Look up a registered voter.
    pub fn voter(&self, voter_id: &VoterId) -> Option<&Voter> {
        self.voters.get(voter_id)
    }

    /// The candidate roster with live counters.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }
}
