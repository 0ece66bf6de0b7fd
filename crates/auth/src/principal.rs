//! Session principal claims model
//!
//! A principal is the read-only bundle of claims representing the
//! authenticated actor for the life of an interactive session. It is
//! issued by the sign-in layer and never mutated here.

use serde::{Deserialize, Serialize};

/// Claim kind carrying the user identifier
pub const SUBJECT_CLAIM: &str = "sub";

/// A single identity assertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub kind: String,
    pub value: String,
}

impl Claim {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Claims bundle for an authenticated actor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPrincipal {
    claims: Vec<Claim>,
}

impl SessionPrincipal {
    pub fn new(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    /// Append a claim, builder-style
    pub fn with_claim(mut self, kind: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.push(Claim::new(kind, value));
        self
    }

    /// First claim value of the given kind, if present
    pub fn find_first(&self, kind: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.value.as_str())
    }

    /// The `sub` claim value identifying the user
    pub fn subject(&self) -> Option<&str> {
        self.find_first(SUBJECT_CLAIM)
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_returns_first_match() {
        let principal = SessionPrincipal::default()
            .with_claim("role", "admin")
            .with_claim("role", "viewer");

        assert_eq!(principal.find_first("role"), Some("admin"));
        assert_eq!(principal.find_first("missing"), None);
    }

    #[test]
    fn test_subject_reads_sub_claim() {
        let principal = SessionPrincipal::default().with_claim(SUBJECT_CLAIM, "u-123");

        assert_eq!(principal.subject(), Some("u-123"));
        assert_eq!(SessionPrincipal::default().subject(), None);
    }

    #[test]
    fn test_principal_serde_roundtrip() {
        let principal = SessionPrincipal::default()
            .with_claim(SUBJECT_CLAIM, "u-123")
            .with_claim("email", "user@example.com");

        let json = serde_json::to_string(&principal).unwrap();
        let decoded: SessionPrincipal = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, principal);
    }
}
