use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::auth::AuthUser;
use crate::database::models::{Comment, NewComment};
use crate::database::repository::{CommentStore, TodoStore};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentResponse {
    pub id: Uuid,
    pub todo_id: Uuid,
    pub contents: String,
    pub user_id: Uuid,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            todo_id: comment.todo_id,
            contents: comment.contents,
            user_id: comment.user.id,
            nickname: comment.user.nickname,
            created_at: comment.created_at,
        }
    }
}

pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    todos: Arc<dyn TodoStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, todos: Arc<dyn TodoStore>) -> Self {
        Self { comments, todos }
    }

    pub async fn save_comment(&self, auth: &AuthUser, todo_id: Uuid, contents: &str) -> ServiceResult<CommentResponse> {
        if self.todos.find_by_id_with_user(todo_id).await?.is_none() {
            return Err(ServiceError::invalid(format!("Todo {} not found", todo_id)));
        }
        let comment = self
            .comments
            .insert(NewComment::new(contents.to_string(), todo_id, auth.id))
            .await?;
        Ok(comment.into())
    }

    /// Authors are joined in; an unknown todo simply has no comments
    pub async fn get_comments(&self, todo_id: Uuid) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.comments.find_by_todo_id_with_user(todo_id).await?;
        Ok(comments.into_iter().map(CommentResponse::from).collect())
    }
}

pub struct CommentAdminService {
    comments: Arc<dyn CommentStore>,
}

impl CommentAdminService {
    pub fn new(comments: Arc<dyn CommentStore>) -> Self {
        Self { comments }
    }

    pub async fn delete_comment(&self, comment_id: Uuid) -> ServiceResult<()> {
        if !self.comments.delete(comment_id).await? {
            return Err(ServiceError::invalid(format!("Comment {} not found", comment_id)));
        }
        info!("Deleted comment {}", comment_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewUser, UserRole};
    use crate::database::repository::UserStore;
    use crate::testing::MemoryStore;

    async fn user(store: &MemoryStore, nickname: &str) -> AuthUser {
        let user = UserStore::insert(
            store,
            NewUser::new(format!("{}@example.com", nickname), "hash".into(), nickname.into(), UserRole::User),
        )
        .await
        .unwrap();
        AuthUser {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            role: user.user_role,
        }
    }

    #[tokio::test]
    async fn comments_carry_their_authors_in_order() {
        let store = Arc::new(MemoryStore::new());
        let ada = user(&store, "ada").await;
        let bob = user(&store, "bob").await;
        let todo_id = store.seed_todo("t", "Sunny", ada.id, Utc::now());

        let service = CommentService::new(store.clone(), store.clone());
        service.save_comment(&ada, todo_id, "first").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        service.save_comment(&bob, todo_id, "second").await.unwrap();

        let comments = service.get_comments(todo_id).await.unwrap();
        let authors: Vec<_> = comments.iter().map(|c| c.nickname.as_str()).collect();
        assert_eq!(authors, vec!["ada", "bob"]);
    }

    #[tokio::test]
    async fn comment_on_unknown_todo_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let ada = user(&store, "ada").await;
        let service = CommentService::new(store.clone(), store.clone());
        let err = service.save_comment(&ada, Uuid::new_v4(), "hi").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn admin_delete_removes_once() {
        let store = Arc::new(MemoryStore::new());
        let ada = user(&store, "ada").await;
        let todo_id = store.seed_todo("t", "Sunny", ada.id, Utc::now());
        let comment = CommentService::new(store.clone(), store.clone())
            .save_comment(&ada, todo_id, "bye")
            .await
            .unwrap();

        let admin = CommentAdminService::new(store.clone());
        admin.delete_comment(comment.id).await.unwrap();
        assert!(matches!(
            admin.delete_comment(comment.id).await,
            Err(ServiceError::InvalidRequest(_))
        ));
    }
}
