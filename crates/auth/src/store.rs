//! User-store and resolution-scope abstractions
//!
//! The revalidator is generic over the concrete user-record shape through
//! these capability traits rather than a fixed entity type. A scope is a
//! short-lived, isolated acquisition of the store so each lookup reflects
//! current storage state instead of a longer-lived cached instance; release
//! happens in `Drop`, on every exit path.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AuthError;

/// Capability set a user record must expose for stamp revalidation
pub trait SecurityStampUser {
    fn id(&self) -> Uuid;
    /// Current stamp value, regenerated whenever security-sensitive
    /// attributes change
    fn security_stamp(&self) -> Option<&str>;
}

/// Identity store lookup surface
#[async_trait]
pub trait UserStore: Send {
    type User: SecurityStampUser + Send + Sync;

    /// Whether this backend persists security stamps at all. When it does
    /// not, a stamp mismatch can never be the reason to invalidate.
    fn supports_security_stamp(&self) -> bool;

    /// Load the current user record. `Ok(None)` means the user no longer
    /// exists; storage failures propagate unchanged.
    async fn find_user(&mut self, id: Uuid) -> Result<Option<Self::User>, AuthError>;
}

/// One isolated acquisition of a [`UserStore`]. Dropping the scope releases
/// whatever the acquisition holds (e.g. a pooled connection).
pub trait UserScope: Send {
    type Store: UserStore;

    fn store(&mut self) -> &mut Self::Store;
}

/// Produces a fresh [`UserScope`] per revalidation pass
#[async_trait]
pub trait ScopeFactory: Send + Sync {
    type Scope: UserScope;

    async fn create_scope(&self) -> Result<Self::Scope, AuthError>;
}
