use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use tokio::sync::RwLock;

use inkpress_core::{
    Email, NewUser, Password, User, UserId, UserStore, UserStoreError, UserUpdate, Username,
};

/// In-memory user store, shared via internal `Arc<RwLock<..>>`.
///
/// Holds the raw password instead of a hash; a stand-in for tests and
/// store-agnostic embeddings, not for production traffic.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Username, (User, Password)>>>,
    next_id: Arc<AtomicI64>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.username) {
            return Err(UserStoreError::UsernameTaken);
        }
        if users.values().any(|(u, _)| u.email == new_user.email) {
            return Err(UserStoreError::EmailTaken);
        }
        let user = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            username: new_user.username.clone(),
            full_name: new_user.full_name,
            email: new_user.email,
            is_active: true,
        };
        users.insert(new_user.username, (user.clone(), new_user.password));
        Ok(user)
    }

    async fn get_by_username(&self, username: &Username) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(username)
            .map(|(user, _)| user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|(user, _)| &user.email == email)
            .map(|(user, _)| user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn authenticate(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let (user, stored) = users.get(username).ok_or(UserStoreError::UserNotFound)?;
        if stored != password {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(user.clone())
    }

    async fn update_user(
        &self,
        username: &Username,
        update: UserUpdate,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(new_email) = &update.email {
            let taken = users
                .values()
                .any(|(u, _)| &u.email == new_email && &u.username != username);
            if taken {
                return Err(UserStoreError::EmailTaken);
            }
        }
        let (user, _) = users.get_mut(username).ok_or(UserStoreError::UserNotFound)?;
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(is_active) = update.is_active {
            user.is_active = is_active;
        }
        Ok(user.clone())
    }

    async fn set_password(
        &self,
        username: &Username,
        new_password: Password,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let (_, stored) = users.get_mut(username).ok_or(UserStoreError::UserNotFound)?;
        *stored = new_password;
        Ok(())
    }

    async fn delete_user(&self, username: &Username) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .remove(username)
            .map(|_| ())
            .ok_or(UserStoreError::UserNotFound)
    }
}
