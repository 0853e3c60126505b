//! Wire protocol for observer sessions.
//!
//! Inbound frames carry an `action` tag, outbound frames a `type` tag. Both
//! directions are modeled as tagged serde enums, so a malformed envelope or
//! an unrecognized action fails at the deserialization boundary and gets an
//! explicit error reply instead of being silently dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

use hustings_ledger::LedgerError;
use hustings_types::{AuditEntry, CandidateId, TallySnapshot, VoterId};

/// A request from a connected session.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ClientRequest {
    /// Register a voter.
    Register { voter_id: VoterId, name: String },
    /// Cast a vote.
    Vote {
        voter_id: VoterId,
        candidate_id: CandidateId,
    },
    /// Read the full audit trail (privileged: includes raw voter ids).
    GetAudit,
}

/// A message pushed to a session.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, immediately after connect.
    InitialState(TallySnapshot),
    /// Reply to a `register` request, to the requesting session only.
    RegisterResult(ActionResult),
    /// Reply to a `vote` request, to the requesting session only.
    VoteResult(ActionResult),
    /// Broadcast to every session after each successful vote.
    ResultsUpdate(TallySnapshot),
    /// Reply to `get_audit`: the full trail, raw voter ids included.
    Audit(Vec<AuditEntry>),
    /// Explicit rejection of a malformed or unsupported request.
    Error { message: String },
}

impl ServerMessage {
    /// Render to the JSON wire form.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("ServerMessage always serializes to JSON")
    }
}

/// Outcome of a state-changing request, in the shape clients expect:
/// `{"success": true, "message": ...}` or `{"success": false, "error": ...}`.
#[derive(Clone, Debug, Serialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn err(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<String, LedgerError>> for ActionResult {
    fn from(result: Result<String, LedgerError>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(e) => Self::err(e),
        }
    }
}
