//! Admin session gate.

use tracing::{info, warn};

use super::store::CredentialStore;
use crate::errors::AuthError;
use crate::models::Principal;

/// Per-client admin session. Logged in exactly when a principal is held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    principal: Option<Principal>,
}

impl AdminSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Restores a session from an already verified principal, e.g. one
    /// carried by a session token.
    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.principal.is_some()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Checks the credentials and, on success, attaches the principal.
    ///
    /// A failed attempt leaves the session logged out.
    pub async fn login(
        &mut self,
        store: &dyn CredentialStore,
        username: &str,
        password: &str,
    ) -> Result<&Principal, AuthError> {
        self.principal = None;
        let principal = authenticate(store, username, password).await?;
        Ok(self.principal.insert(principal))
    }

    pub fn logout(&mut self) {
        self.principal = None;
    }
}

/// Verifies a username and password against the credential store.
///
/// Unknown users and wrong passwords are indistinguishable to the caller.
pub async fn authenticate(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
) -> Result<Principal, AuthError> {
    let Some(user) = store.find_by_username(username).await? else {
        warn!(username = %username, "Admin login failed: unknown user");
        return Err(AuthError::InvalidCredentials);
    };

    let valid = shared::password::verify_password(password, &user.password_hash)
        .map_err(|e| AuthError::Persistence(e.to_string()))?;
    if !valid {
        warn!(username = %username, "Admin login failed: wrong password");
        return Err(AuthError::InvalidCredentials);
    }

    info!(admin_id = user.id, username = %user.username, "Admin logged in");
    Ok(Principal::from(&user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdminRole;
    use crate::services::memory::InMemoryCredentialStore;

    fn store() -> InMemoryCredentialStore {
        InMemoryCredentialStore::with_admin("admin", "admin123", AdminRole::SuperAdmin).unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let store = store();
        let mut session = AdminSession::anonymous();
        assert!(!session.is_logged_in());

        let principal = session.login(&store, "admin", "admin123").await.unwrap();
        assert_eq!(principal.username, "admin");
        assert_eq!(principal.role, AdminRole::SuperAdmin);
        assert!(session.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_failures_leave_session_logged_out() {
        let store = store();
        for (user, pass) in [("admin", "wrong"), ("nobody", "admin123"), ("", "")] {
            let mut session = AdminSession::anonymous();
            let err = session.login(&store, user, pass).await.unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials));
            assert!(!session.is_logged_in());
            assert!(session.principal().is_none());
        }
    }

    #[tokio::test]
    async fn test_failed_relogin_drops_previous_principal() {
        let store = store();
        let mut session = AdminSession::anonymous();
        session.login(&store, "admin", "admin123").await.unwrap();
        assert!(session.login(&store, "admin", "nope").await.is_err());
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn test_logout() {
        let store = store();
        let mut session = AdminSession::anonymous();
        session.login(&store, "admin", "admin123").await.unwrap();
        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.principal().is_none());
    }

    #[tokio::test]
    async fn test_plaintext_stored_password_is_an_error() {
        let store = InMemoryCredentialStore::new();
        store
            .create_admin("legacy", "admin123", AdminRole::Admin)
            .await
            .unwrap();
        let err = authenticate(&store, "legacy", "admin123").await.unwrap_err();
        assert!(matches!(err, AuthError::Persistence(_)));
    }
}
