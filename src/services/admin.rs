use sqlx::PgPool;
use uuid::Uuid;

use crate::db::user_repo;
use crate::error::{AppError, Result};

/// Authorization context for admin-only operations.
///
/// Built once per request from the authenticated caller; the admin flag is
/// read from the database on every load, never cached across requests.
#[derive(Debug, Clone, Copy)]
pub struct AdminContext {
    pub admin_id: Uuid,
}

impl AdminContext {
    pub async fn load(pool: &PgPool, user_id: Uuid) -> Result<Self> {
        match user_repo::is_admin(pool, user_id).await? {
            Some(true) => Ok(Self { admin_id: user_id }),
            _ => Err(AppError::Authorization("admin access required".to_string())),
        }
    }
}
