//! Fundamental types for the hustings election coordinator.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: voter and candidate identifiers, the pseudonymous voter handle,
//! timestamps, and the records that make up election state.

pub mod audit;
pub mod candidate;
pub mod handle;
pub mod id;
pub mod tally;
pub mod time;
pub mod voter;

pub use audit::AuditEntry;
pub use candidate::Candidate;
pub use handle::{VoterHandle, HANDLE_LEN};
pub use id::{CandidateId, VoterId};
pub use tally::TallySnapshot;
pub use time::Timestamp;
pub use voter::Voter;
