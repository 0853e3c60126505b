//! In-memory election ledger.
//!
//! The ledger is the sole owner of authoritative election state: the voter
//! map, the fixed candidate roster, and the append-only audit trail. Every
//! mutation goes through `ElectionLedger`. Callers that share a ledger
//! across tasks wrap it in a single lock, which linearizes register/vote
//! operations and keeps readers from observing a half-applied vote.

pub mod audit;
pub mod error;
pub mod ledger;

pub use audit::AuditLog;
pub use error::LedgerError;
pub use ledger::ElectionLedger;
