use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::AuthUser;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::user;

/// SeaORM-backed repository implementation.
pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_auth_user(m: &user::Model) -> AuthUser {
    AuthUser { id: m.id, username: m.username.clone() }
}

#[async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
        let found = user::find_by_username(&self.db, username).await?;
        Ok(found.as_ref().map(to_auth_user))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
        let created = user::create(&self.db, username, password_hash).await?;
        Ok(to_auth_user(&created))
    }

    async fn get_password_hash(&self, user_id: Uuid) -> Result<Option<String>, AuthError> {
        let found = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Db(e.to_string()))?;
        Ok(found.map(|m| m.password_hash))
    }
}
