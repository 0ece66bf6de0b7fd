//! Security-stamp revalidator
//!
//! Re-checks an authenticated session principal against the live user
//! record: the stamp claim embedded in the principal must still match the
//! stamp stored with the user. A mismatch or a missing user means the
//! credentials or security-relevant settings changed since the principal
//! was issued and the session should end.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::AuthError;
use crate::options::IdentityOptions;
use crate::principal::SessionPrincipal;
use crate::store::{ScopeFactory, SecurityStampUser, UserScope, UserStore};

/// Periodic session validity check against the identity store.
///
/// Holds no per-session state; the host invokes [`validate`] on its timer,
/// one invocation in flight per session at a time. Reports validity only —
/// ending the session on an invalid outcome is the caller's job.
///
/// [`validate`]: StampRevalidator::validate
pub struct StampRevalidator<F: ScopeFactory> {
    scopes: F,
    options: IdentityOptions,
}

impl<F: ScopeFactory> StampRevalidator<F> {
    pub fn new(scopes: F, options: IdentityOptions) -> Self {
        Self { scopes, options }
    }

    /// Period the host should wait between revalidation passes
    pub fn revalidation_interval(&self) -> Duration {
        self.options.revalidation_interval
    }

    /// Check whether the session behind `principal` is still valid.
    ///
    /// Acquires a fresh store scope so the lookup reflects current storage
    /// state; the scope is released when it drops, on every exit path
    /// including lookup failure and cancellation. On cancellation no outcome
    /// is produced and [`AuthError::Cancelled`] is returned.
    pub async fn validate(
        &self,
        principal: &SessionPrincipal,
        cancel: CancellationToken,
    ) -> Result<bool, AuthError> {
        let mut scope = self.scopes.create_scope().await?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AuthError::Cancelled),
            outcome = self.validate_security_stamp(scope.store(), principal) => outcome,
        }
    }

    async fn validate_security_stamp(
        &self,
        store: &mut <F::Scope as UserScope>::Store,
        principal: &SessionPrincipal,
    ) -> Result<bool, AuthError> {
        // A principal with no resolvable user id behaves like a deleted
        // user: there is no record to validate against.
        let Some(user_id) = principal
            .subject()
            .and_then(|s| Uuid::parse_str(s).ok())
        else {
            return Ok(false);
        };

        let Some(user) = store.find_user(user_id).await? else {
            // User deleted or deactivated since the session started
            return Ok(false);
        };

        if !store.supports_security_stamp() {
            // Stamps are not persisted by this backend, so a stale stamp
            // can never be the reason to invalidate.
            return Ok(true);
        }

        let principal_stamp = principal.find_first(&self.options.security_stamp_claim);
        Ok(principal_stamp == user.security_stamp())
    }
}
