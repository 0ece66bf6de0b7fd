//! Host-side revalidation loop
//!
//! Owns the timer that drives [`StampRevalidator`] for one interactive
//! session and the watch channel the session observes its authentication
//! state through. The revalidator only reports validity; this worker is the
//! piece that actually signs the session out on an invalid outcome.

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::AuthError;
use crate::principal::SessionPrincipal;
use crate::revalidator::StampRevalidator;
use crate::store::ScopeFactory;

/// Authentication state of one interactive session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(SessionPrincipal),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn principal(&self) -> Option<&SessionPrincipal> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(principal) => Some(principal),
        }
    }
}

/// Shared handle to a session's authentication state.
///
/// Session code subscribes to observe sign-outs; the sign-in layer sets the
/// principal once the user authenticates.
#[derive(Debug, Clone)]
pub struct AuthStateHandle {
    tx: watch::Sender<AuthState>,
}

impl AuthStateHandle {
    pub fn new(initial: AuthState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    pub fn set_authenticated(&self, principal: SessionPrincipal) {
        self.tx.send_replace(AuthState::Authenticated(principal));
    }

    /// End the authenticated session, forcing re-authentication
    pub fn force_sign_out(&self) {
        self.tx.send_replace(AuthState::Anonymous);
    }
}

impl Default for AuthStateHandle {
    fn default() -> Self {
        Self::new(AuthState::Anonymous)
    }
}

/// Per-session revalidation loop.
///
/// Runs one pass per interval, sequentially, so at most one revalidation is
/// in flight for the session at any time. Outcomes:
/// - valid: keep the session
/// - invalid: force sign-out
/// - lookup error: fail closed and force sign-out; storage comes back on a
///   later pass only after the user signs in again
/// - shutdown token cancelled: exit without producing an outcome
pub struct RevalidationWorker<F: ScopeFactory> {
    revalidator: StampRevalidator<F>,
    handle: AuthStateHandle,
    shutdown: CancellationToken,
}

impl<F: ScopeFactory> RevalidationWorker<F> {
    pub fn new(
        revalidator: StampRevalidator<F>,
        handle: AuthStateHandle,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            revalidator,
            handle,
            shutdown,
        }
    }

    #[mutants::skip] // Loop runs until cancellation; mutated bodies stall the paused-time tests
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.revalidator.revalidation_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the first
        // revalidation happens one full interval after session start.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let AuthState::Authenticated(principal) = self.handle.current() else {
                continue;
            };

            match self
                .revalidator
                .validate(&principal, self.shutdown.child_token())
                .await
            {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!("Security stamp no longer matches, signing session out");
                    self.handle.force_sign_out();
                }
                Err(AuthError::Cancelled) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Revalidation failed, signing session out");
                    self.handle.force_sign_out();
                }
            }
        }
    }
}
