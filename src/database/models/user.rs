use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Columns of the `users` table aliased with a `user_` prefix, for joins on `u`
pub const JOINED_USER_COLUMNS: &str =
    r#"u."id" AS user_id, u."email" AS user_email, u."nickname" AS user_nickname, u."user_role" AS user_role"#;

#[derive(Debug, Error)]
#[error("Unknown user role: {0}")]
pub struct UserRoleError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::User => "USER",
        }
    }
}

impl FromStr for UserRole {
    type Err = UserRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("admin") {
            Ok(UserRole::Admin)
        } else if s.eq_ignore_ascii_case("user") {
            Ok(UserRole::User)
        } else {
            Err(UserRoleError(s.to_string()))
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = UserRoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
    #[sqlx(try_from = "String")]
    pub user_role: UserRole,
}

/// Full `users` row, including the password hash
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    #[sqlx(flatten)]
    pub user: User,
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub user_role: UserRole,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl NewUser {
    /// `password_hash` must already be hashed
    pub fn new(email: String, password_hash: String, nickname: String, user_role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password: password_hash,
            nickname,
            user_role,
            created_at: now,
            modified_at: now,
        }
    }

    pub fn into_record(self) -> UserRecord {
        UserRecord {
            user: User {
                id: self.id,
                email: self.email,
                nickname: self.nickname,
                user_role: self.user_role,
            },
            password: self.password,
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}
