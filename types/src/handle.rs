//! Pseudonymous voter handles.
//!
//! A handle is a deterministic one-way digest of the raw voter identifier:
//! lowercase hex of SHA-256 over the id, truncated to a fixed length. The
//! same id always yields the same handle, and the handle cannot be inverted
//! by inspection. Non-privileged views reference voters only by handle.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::id::VoterId;

/// Length of a rendered handle, in hex characters.
pub const HANDLE_LEN: usize = 16;

/// A pseudonymous, fixed-length reference to a voter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterHandle(String);

impl VoterHandle {
    /// Derive the handle for a voter id.
    pub fn derive(id: &VoterId) -> Self {
        let digest = Sha256::digest(id.as_str().as_bytes());
        let mut rendered = hex::encode(digest.as_slice());
        rendered.truncate(HANDLE_LEN);
        Self(rendered)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Inline hex rendering so `types` stays free of the `hex` dependency.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_same_handle() {
        let id = VoterId::new("TEST123");
        assert_eq!(VoterHandle::derive(&id), VoterHandle::derive(&id));
    }

    #[test]
    fn distinct_ids_distinct_handles() {
        let a = VoterHandle::derive(&VoterId::new("alice"));
        let b = VoterHandle::derive(&VoterId::new("bob"));
        assert_ne!(a, b);
    }

    #[test]
    fn handle_is_truncated_lowercase_hex() {
        let handle = VoterHandle::derive(&VoterId::new("TEST123"));
        assert_eq!(handle.as_str().len(), HANDLE_LEN);
        assert!(handle
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn handle_does_not_echo_the_id() {
        // Not a security proof, but the obvious failure mode: the raw id
        // must never appear inside its own handle.
        let handle = VoterHandle::derive(&VoterId::new("abc"));
        assert!(!handle.as_str().contains("abc"));
    }
}
