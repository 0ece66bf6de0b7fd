//! Stampguard application composition root
//!
//! Wires the identity storage backend and the security-stamp revalidator
//! into an axum application, and owns the per-session revalidation worker
//! lifecycle.

use axum::extract::FromRef;
use axum::Router;
use sqlx::PgPool;
use stampguard_auth::{
    AuthStateHandle, IdentityOptions, PgScopeFactory, RevalidationWorker, StampRevalidator,
};
use stampguard_common::Config;
use tokio_util::sync::CancellationToken;

/// Identity plumbing shared by routers and interactive sessions
#[derive(Clone)]
pub struct IdentityState {
    pub scopes: PgScopeFactory,
    pub options: IdentityOptions,
}

impl FromRef<IdentityState> for PgScopeFactory {
    fn from_ref(state: &IdentityState) -> Self {
        state.scopes.clone()
    }
}

/// Map recognized configuration onto identity options
pub fn identity_options(config: &Config) -> IdentityOptions {
    let mut options = IdentityOptions::default();
    if let Some(claim) = &config.security_stamp_claim {
        options.security_stamp_claim = claim.clone();
    }
    options.require_confirmed_account = config.require_confirmed_account;
    options.password_require_nonalphanumeric = config.password_require_nonalphanumeric;
    options
}

/// Plug the identity storage backend and revalidator into application state
pub fn register_identity(config: &Config, pool: PgPool) -> IdentityState {
    IdentityState {
        scopes: PgScopeFactory::new(pool),
        options: identity_options(config),
    }
}

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let identity = register_identity(&config, pool);

    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Stampguard API v0.1.0" }),
        )
        .with_state(identity);

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Handle to one session's running revalidation loop.
///
/// Closing (or dropping) the handle cancels the worker; any in-flight
/// lookup is cancelled and its store scope released.
pub struct SessionRevalidation {
    shutdown: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl SessionRevalidation {
    /// Stop the worker and wait for it to exit
    pub async fn close(mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SessionRevalidation {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Spawn the revalidation worker for one interactive session.
///
/// The worker re-checks the session's security stamp against the identity
/// store on the configured interval and forces sign-out through `handle`
/// when the session is no longer valid.
pub fn spawn_session_revalidation(
    identity: &IdentityState,
    handle: AuthStateHandle,
) -> SessionRevalidation {
    let shutdown = CancellationToken::new();
    let revalidator = StampRevalidator::new(identity.scopes.clone(), identity.options.clone());
    let worker = RevalidationWorker::new(revalidator, handle, shutdown.clone());
    let task = tokio::spawn(worker.run());

    SessionRevalidation {
        shutdown,
        task: Some(task),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            database_url: "postgres://localhost/stampguard_test".to_string(),
            security_stamp_claim: None,
            require_confirmed_account: true,
            password_require_nonalphanumeric: false,
            log_level: "info".to_string(),
            port: 3000,
        }
    }

    fn lazy_pool() -> PgPool {
        // No connection is established until a query runs
        PgPoolOptions::new()
            .connect_lazy("postgres://localhost/stampguard_test")
            .expect("lazy pool")
    }

    #[test]
    fn test_identity_options_defaults_from_config() {
        let options = identity_options(&test_config());
        assert_eq!(
            options.security_stamp_claim,
            stampguard_auth::DEFAULT_SECURITY_STAMP_CLAIM
        );
        assert!(options.require_confirmed_account);
        assert!(!options.password_require_nonalphanumeric);
    }

    #[test]
    fn test_identity_options_claim_override() {
        let config = Config {
            security_stamp_claim: Some("custom.stamp".to_string()),
            password_require_nonalphanumeric: true,
            ..test_config()
        };

        let options = identity_options(&config);
        assert_eq!(options.security_stamp_claim, "custom.stamp");
        assert!(options.password_require_nonalphanumeric);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_app(test_config(), lazy_pool()).await.unwrap();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session_revalidation_close_is_idempotent_with_drop() {
        let identity = register_identity(&test_config(), lazy_pool());
        let handle = AuthStateHandle::default();

        let revalidation = spawn_session_revalidation(&identity, handle);
        revalidation.close().await;
    }
}
