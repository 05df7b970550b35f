use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::auth::{hash_password, verify_password};
use crate::database::models::{User, UserRole};
use crate::database::repository::UserStore;

const MIN_PASSWORD_LENGTH: usize = 8;

/// At least eight characters with one digit and one uppercase letter
pub fn check_password_policy(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::invalid(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ServiceError::invalid("Password must contain a digit"));
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(ServiceError::invalid("Password must contain an uppercase letter"));
    }
    Ok(())
}

pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn get_user(&self, id: Uuid) -> ServiceResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .map(|record| record.user)
            .ok_or_else(|| ServiceError::NotFound(format!("User {} not found", id)))
    }

    pub async fn change_password(&self, user_id: Uuid, old_password: &str, new_password: &str) -> ServiceResult<()> {
        check_password_policy(new_password)?;
        if old_password == new_password {
            return Err(ServiceError::invalid("New password must differ from the current one"));
        }

        let record = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::invalid(format!("User {} not found", user_id)))?;

        if !verify_password(old_password, &record.password)? {
            return Err(ServiceError::invalid("Current password does not match"));
        }

        let hash = hash_password(new_password)?;
        self.users.update_password(user_id, &hash).await?;
        info!("User {} changed their password", user_id);
        Ok(())
    }
}

pub struct UserAdminService {
    users: Arc<dyn UserStore>,
}

impl UserAdminService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn change_user_role(&self, user_id: Uuid, role: UserRole) -> ServiceResult<()> {
        if !self.users.update_role(user_id, role).await? {
            return Err(ServiceError::invalid(format!("User {} not found", user_id)));
        }
        info!("User {} is now {}", user_id, role);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::testing::MemoryStore;

    async fn seeded() -> (Arc<MemoryStore>, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let hash = hash_password("Secret123").unwrap();
        let user = UserStore::insert(
            store.as_ref(),
            NewUser::new("ada@example.com".into(), hash, "ada".into(), UserRole::User),
        )
        .await
        .unwrap();
        (store, user.id)
    }

    #[test]
    fn password_policy() {
        assert!(check_password_policy("Secret123").is_ok());
        assert!(check_password_policy("Sec123").is_err());
        assert!(check_password_policy("Secretttt").is_err());
        assert!(check_password_policy("secret123").is_err());
    }

    #[tokio::test]
    async fn change_password_replaces_hash() {
        let (store, id) = seeded().await;
        let users = UserService::new(store.clone());
        users.change_password(id, "Secret123", "Better456").await.unwrap();

        let record = UserStore::find_by_id(store.as_ref(), id).await.unwrap().unwrap();
        assert!(verify_password("Better456", &record.password).unwrap());
    }

    #[tokio::test]
    async fn change_password_rejections() {
        let (store, id) = seeded().await;
        let users = UserService::new(store);

        let same = users.change_password(id, "Secret123", "Secret123").await.unwrap_err();
        assert!(matches!(same, ServiceError::InvalidRequest(_)));

        let wrong_old = users.change_password(id, "Wrong1234", "Better456").await.unwrap_err();
        assert!(matches!(wrong_old, ServiceError::InvalidRequest(_)));

        let weak = users.change_password(id, "Secret123", "weak").await.unwrap_err();
        assert!(matches!(weak, ServiceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn admin_changes_role_of_existing_user_only() {
        let (store, id) = seeded().await;
        let admin = UserAdminService::new(store.clone());
        admin.change_user_role(id, UserRole::Admin).await.unwrap();

        let user = UserService::new(store).get_user(id).await.unwrap();
        assert_eq!(user.user_role, UserRole::Admin);

        let missing = admin.change_user_role(Uuid::new_v4(), UserRole::Admin).await.unwrap_err();
        assert!(matches!(missing, ServiceError::InvalidRequest(_)));
    }
}
