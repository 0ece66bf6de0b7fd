//! Postgres-backed identity store
//!
//! Wraps `PgPool` and owns the auth-path SQL. Uses runtime `sqlx::query_as`
//! (not macros) so the read model stays decoupled from any domain-owned
//! schema definitions. Each scope checks a dedicated connection out of the
//! pool; dropping the scope returns it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::error::AuthError;
use crate::store::{ScopeFactory, SecurityStampUser, UserScope, UserStore};

/// Identity read model for revalidation (lightweight subset of the user row)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IdentityUserRow {
    pub id: Uuid,
    pub email: String,
    pub email_confirmed: bool,
    pub security_stamp: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SecurityStampUser for IdentityUserRow {
    fn id(&self) -> Uuid {
        self.id
    }

    fn security_stamp(&self) -> Option<&str> {
        self.security_stamp.as_deref()
    }
}

/// Store bound to one pooled connection for the life of a scope
pub struct PgUserStore {
    conn: PoolConnection<Postgres>,
}

#[async_trait]
impl UserStore for PgUserStore {
    type User = IdentityUserRow;

    fn supports_security_stamp(&self) -> bool {
        true
    }

    async fn find_user(&mut self, id: Uuid) -> Result<Option<IdentityUserRow>, AuthError> {
        let user: Option<IdentityUserRow> = sqlx::query_as(
            r#"
            SELECT id, email, email_confirmed, security_stamp,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }
}

/// Scope over a checked-out connection; the connection returns to the pool
/// when the scope drops, whatever the outcome of the lookup.
pub struct PgUserScope {
    store: PgUserStore,
}

impl UserScope for PgUserScope {
    type Store = PgUserStore;

    fn store(&mut self) -> &mut PgUserStore {
        &mut self.store
    }
}

/// Creates one scope per revalidation pass from a shared pool
#[derive(Clone)]
pub struct PgScopeFactory {
    pool: PgPool,
}

impl PgScopeFactory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScopeFactory for PgScopeFactory {
    type Scope = PgUserScope;

    async fn create_scope(&self) -> Result<PgUserScope, AuthError> {
        let conn = self.pool.acquire().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to acquire identity store connection");
            AuthError::ScopeUnavailable
        })?;

        Ok(PgUserScope {
            store: PgUserStore { conn },
        })
    }
}
