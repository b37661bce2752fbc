//! Admin account entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::AdminUser;
use sqlx::FromRow;

/// Database row mapping for the admin_users table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUserEntity {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AdminUserEntity> for AdminUser {
    type Error = String;

    fn try_from(entity: AdminUserEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entity.id,
            username: entity.username,
            password_hash: entity.password_hash,
            role: entity.role.parse()?,
            created_at: entity.created_at,
        })
    }
}
