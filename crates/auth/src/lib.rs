//! Session revalidation plumbing for Stampguard
//!
//! Provides the security-stamp revalidator, the session principal claims
//! model, the user-store scope abstraction, and the host-side revalidation
//! worker that periodically re-checks an authenticated session against the
//! identity store.

mod backend;
mod error;
mod options;
mod principal;
mod revalidator;
mod store;
mod worker;

pub use backend::{IdentityUserRow, PgScopeFactory, PgUserScope, PgUserStore};
pub use error::AuthError;
pub use options::{
    IdentityOptions, DEFAULT_REVALIDATION_INTERVAL, DEFAULT_SECURITY_STAMP_CLAIM,
};
pub use principal::{Claim, SessionPrincipal, SUBJECT_CLAIM};
pub use revalidator::StampRevalidator;
pub use store::{ScopeFactory, SecurityStampUser, UserScope, UserStore};
pub use worker::{AuthState, AuthStateHandle, RevalidationWorker};
