//! Admin account repository.

use domain::errors::AuthError;
use domain::models::{AdminRole, AdminUser};
use domain::services::CredentialStore;
use sqlx::PgPool;
use tracing::error;

use crate::entities::AdminUserEntity;
use crate::metrics::QueryTimer;

/// Repository for admin accounts.
#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(e: sqlx::Error) -> AuthError {
    error!(error = %e, "Admin user query failed");
    AuthError::Persistence(e.to_string())
}

#[async_trait::async_trait]
impl CredentialStore for AdminUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, AuthError> {
        let timer = QueryTimer::new("find_admin_by_username");
        let row = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM admin_users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        row.map_err(db_error)?
            .map(|entity| AdminUser::try_from(entity).map_err(AuthError::Persistence))
            .transpose()
    }

    async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
        role: AdminRole,
    ) -> Result<AdminUser, AuthError> {
        let timer = QueryTimer::new("insert_admin_user");
        let row = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            INSERT INTO admin_users (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await;
        timer.record();

        AdminUser::try_from(row.map_err(db_error)?).map_err(AuthError::Persistence)
    }
}
