use async_trait::async_trait;
use uuid::Uuid;

use super::domain::AuthUser;
use super::errors::AuthError;

/// Account lookup/creation seam so the auth service stays independent of
/// the web framework and the concrete store.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError>;
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<AuthUser, AuthError>;
    async fn get_password_hash(&self, user_id: Uuid) -> Result<Option<String>, AuthError>;
}

pub mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::super::domain::AuthUser;
    use super::super::errors::AuthError;
    use super::AuthRepository;

    /// In-memory repository for unit tests and doctests.
    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, (AuthUser, String)>>,
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().expect("mock lock");
            Ok(users.get(username).map(|(u, _)| u.clone()))
        }

        async fn create_user(&self, username: &str, password_hash: &str) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().expect("mock lock");
            let user = AuthUser { id: Uuid::new_v4(), username: username.to_string() };
            users.insert(username.to_string(), (user.clone(), password_hash.to_string()));
            Ok(user)
        }

        async fn get_password_hash(&self, user_id: Uuid) -> Result<Option<String>, AuthError> {
            let users = self.users.lock().expect("mock lock");
            Ok(users.values().find(|(u, _)| u.id == user_id).map(|(_, h)| h.clone()))
        }
    }
}
