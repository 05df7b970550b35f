use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::error::{ServiceError, ServiceResult};
use crate::auth::AuthUser;
use crate::client::WeatherProvider;
use crate::database::models::{NewTodo, Todo};
use crate::database::repository::TodoStore;
use crate::filter::TodoFilter;

/// Search criteria for a page of todos; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub weather: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TodoQuery {
    pub fn to_filter(&self) -> ServiceResult<TodoFilter> {
        let page = self.page.unwrap_or(1);
        let size = self.size.unwrap_or(crate::config::config().filter.default_page_size);
        let filter = TodoFilter::new()
            .weather(self.weather.clone())
            .modified_from(self.start)
            .modified_until(self.end)
            .newest_first()
            .page(page, size)?;
        Ok(filter)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoSaveResponse {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

impl From<Todo> for TodoSaveResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            nickname: todo.user.nickname,
            created_at: todo.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoResponse {
    pub id: Uuid,
    pub title: String,
    pub contents: String,
    pub weather: String,
    pub user_id: Uuid,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            contents: todo.contents,
            weather: todo.weather,
            user_id: todo.user.id,
            nickname: todo.user.nickname,
            created_at: todo.created_at,
            modified_at: todo.modified_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// 1-based
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = if size > 0 { (total_elements + size - 1) / size } else { 0 };
        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
        }
    }
}

pub struct TodoService {
    todos: Arc<dyn TodoStore>,
    weather: Arc<dyn WeatherProvider>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoStore>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { todos, weather }
    }

    /// Stamps today's weather and enrols the caller as the first manager
    pub async fn save_todo(&self, auth: &AuthUser, title: &str, contents: &str) -> ServiceResult<TodoSaveResponse> {
        let weather = self.weather.today().await?;
        let todo = self
            .todos
            .insert_with_owner(NewTodo::new(title.to_string(), contents.to_string(), weather, auth.id))
            .await?;
        info!("User {} created todo {}", auth.id, todo.id);
        Ok(todo.into())
    }

    pub async fn get_todos(&self, query: &TodoQuery) -> ServiceResult<Page<TodoResponse>> {
        let filter = query.to_filter()?;
        let todos = self.todos.search(&filter).await?;
        let total = self.todos.count(&filter).await?;

        let size = filter.limit().unwrap_or(total);
        let page = query.page.unwrap_or(1);
        Ok(Page::new(
            todos.into_iter().map(TodoResponse::from).collect(),
            page,
            size,
            total,
        ))
    }

    pub async fn get_todo(&self, id: Uuid) -> ServiceResult<TodoResponse> {
        self.todos
            .find_by_id_with_user(id)
            .await?
            .map(TodoResponse::from)
            .ok_or_else(|| ServiceError::NotFound(format!("Todo {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FixedWeather;
    use crate::database::models::{NewUser, UserRole};
    use crate::database::repository::{ManagerStore, UserStore};
    use crate::testing::MemoryStore;
    use chrono::TimeZone;

    async fn setup() -> (Arc<MemoryStore>, TodoService, AuthUser) {
        let store = Arc::new(MemoryStore::new());
        let user = UserStore::insert(
            store.as_ref(),
            NewUser::new("ada@example.com".into(), "hash".into(), "ada".into(), UserRole::User),
        )
        .await
        .unwrap();
        let service = TodoService::new(store.clone(), Arc::new(FixedWeather::new("Sunny")));
        let auth = AuthUser {
            id: user.id,
            email: user.email,
            nickname: user.nickname,
            role: user.user_role,
        };
        (store, service, auth)
    }

    #[tokio::test]
    async fn saved_todo_has_weather_owner_and_owner_as_manager() {
        let (store, service, auth) = setup().await;
        let saved = service.save_todo(&auth, "Groceries", "milk").await.unwrap();
        assert_eq!(saved.weather, "Sunny");
        assert_eq!(saved.nickname, "ada");

        let managers = ManagerStore::find_by_todo_id_with_user(store.as_ref(), saved.id).await.unwrap();
        assert_eq!(managers.len(), 1);
        assert_eq!(managers[0].user.id, auth.id);
    }

    #[tokio::test]
    async fn get_todo_resolves_owner_or_reports_not_found() {
        let (_store, service, auth) = setup().await;
        let saved = service.save_todo(&auth, "Groceries", "milk").await.unwrap();

        let found = service.get_todo(saved.id).await.unwrap();
        assert_eq!(found.user_id, auth.id);
        assert_eq!(found.nickname, "ada");

        let missing = service.get_todo(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_todos_pages_newest_first_with_totals() {
        let (store, service, auth) = setup().await;
        for day in 1..=5 {
            let at = Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
            store.seed_todo(&format!("day {}", day), if day % 2 == 0 { "Rainy" } else { "Sunny" }, auth.id, at);
        }

        let first = service
            .get_todos(&TodoQuery { page: Some(1), size: Some(2), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(first.total_elements, 5);
        assert_eq!(first.total_pages, 3);
        let titles: Vec<_> = first.content.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["day 5", "day 4"]);

        let rainy = service
            .get_todos(&TodoQuery { weather: Some("Rainy".into()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(rainy.total_elements, 2);
        assert!(rainy.content.iter().all(|t| t.weather == "Rainy"));
    }

    #[tokio::test]
    async fn inverted_range_yields_empty_page() {
        let (store, service, auth) = setup().await;
        store.seed_todo("x", "Sunny", auth.id, Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap());

        let page = service
            .get_todos(&TodoQuery {
                start: Some(Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap()),
                end: Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 0);
    }

    #[tokio::test]
    async fn invalid_page_is_rejected() {
        let (_store, service, _auth) = setup().await;
        let err = service
            .get_todos(&TodoQuery { page: Some(0), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Filter(_)));
    }
}
