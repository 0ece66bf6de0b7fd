//! Identity configuration

use std::time::Duration;

/// Default claim kind carrying the security-stamp assertion
pub const DEFAULT_SECURITY_STAMP_CLAIM: &str = "stampguard.security_stamp";

/// Period between automatic re-checks of session validity
pub const DEFAULT_REVALIDATION_INTERVAL: Duration = Duration::from_secs(30 * 60);

/// Recognized identity configuration
#[derive(Debug, Clone)]
pub struct IdentityOptions {
    /// Claim kind holding the stamp value embedded in the session principal
    pub security_stamp_claim: String,
    /// Period between revalidation passes for a session
    pub revalidation_interval: Duration,
    /// Sign-in policy: require a confirmed account
    pub require_confirmed_account: bool,
    /// Password policy: require a non-alphanumeric character
    pub password_require_nonalphanumeric: bool,
}

impl Default for IdentityOptions {
    fn default() -> Self {
        Self {
            security_stamp_claim: DEFAULT_SECURITY_STAMP_CLAIM.to_string(),
            revalidation_interval: DEFAULT_REVALIDATION_INTERVAL,
            require_confirmed_account: true,
            password_require_nonalphanumeric: false,
        }
    }
}
