use std::sync::Arc;

use tracing::info;

use super::error::{ServiceError, ServiceResult};
use crate::auth::{generate_jwt, hash_password, verify_password, Claims};
use crate::database::models::{NewUser, UserRole};
use crate::database::repository::UserStore;

pub struct AuthService {
    users: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Registers a user and returns a bearer token for them
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        nickname: &str,
        role: UserRole,
    ) -> ServiceResult<String> {
        if self.users.exists_by_email(email).await? {
            return Err(ServiceError::invalid(format!("Email already registered: {}", email)));
        }

        let hash = hash_password(password)?;
        let user = self
            .users
            .insert(NewUser::new(email.to_string(), hash, nickname.to_string(), role))
            .await?;

        info!("Registered user {} ({}) as {}", user.id, user.email, user.user_role);
        Ok(generate_jwt(&Claims::for_user(&user)?)?)
    }

    pub async fn signin(&self, email: &str, password: &str) -> ServiceResult<String> {
        let record = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::invalid(format!("No user registered with email {}", email)))?;

        if !verify_password(password, &record.password)? {
            return Err(ServiceError::Unauthorized("Password does not match".to_string()));
        }

        Ok(generate_jwt(&Claims::for_user(&record.user)?)?)
    }
}
