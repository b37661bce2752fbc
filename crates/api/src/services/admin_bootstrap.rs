//! Admin bootstrap service for initial setup.
//!
//! Creates the configured admin account on startup when it does not exist.

use domain::errors::AuthError;
use domain::models::AdminRole;
use domain::services::CredentialStore;
use shared::password::{hash_password, PasswordError};
use tracing::{info, warn};

use crate::config::AdminBootstrapConfig;

/// Error types for admin bootstrap.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Credential store error: {0}")]
    Store(#[from] AuthError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// What the bootstrap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Disabled,
    AlreadyPresent,
    Created,
}

/// Bootstrap the admin account if configured and not already present.
///
/// Idempotent: an existing account with the configured username is left
/// untouched, including its password.
pub async fn bootstrap_admin(
    store: &dyn CredentialStore,
    config: &AdminBootstrapConfig,
) -> Result<BootstrapOutcome, BootstrapError> {
    if config.bootstrap_username.trim().is_empty() {
        return Ok(BootstrapOutcome::Disabled);
    }

    if config.bootstrap_password.is_empty() {
        warn!(
            username = %config.bootstrap_username,
            "FD__ADMIN__BOOTSTRAP_PASSWORD is empty - skipping admin bootstrap"
        );
        return Ok(BootstrapOutcome::Disabled);
    }

    let role: AdminRole = config
        .bootstrap_role
        .parse()
        .map_err(BootstrapError::Config)?;

    if store
        .find_by_username(&config.bootstrap_username)
        .await?
        .is_some()
    {
        info!(
            username = %config.bootstrap_username,
            "Admin account already exists - skipping bootstrap"
        );
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let password_hash = hash_password(&config.bootstrap_password)?;
    let admin = store
        .create_admin(&config.bootstrap_username, &password_hash, role)
        .await?;

    info!(
        admin_id = admin.id,
        username = %admin.username,
        role = %admin.role,
        "Bootstrap admin account created"
    );
    warn!(
        "SECURITY: change the bootstrap admin password and remove \
         FD__ADMIN__BOOTSTRAP_PASSWORD from configuration after initial setup"
    );

    Ok(BootstrapOutcome::Created)
}
