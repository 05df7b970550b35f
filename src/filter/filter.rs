use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{Column, FilterOp, FilterOrderInfo, SortDirection, SqlResult};
use crate::database::models::{Todo, JOINED_USER_COLUMNS};

const TODO_ID: Column = Column::new("t", "id");
const TODO_WEATHER: Column = Column::new("t", "weather");
const TODO_MODIFIED_AT: Column = Column::new("t", "modified_at");

const TODO_COLUMNS: &str =
    r#"t."id", t."title", t."contents", t."weather", t."created_at", t."modified_at""#;

/// Search over todos where every criterion is optional.
///
/// Only criteria that are present contribute a predicate; with none present
/// every todo matches. The owning user is selected through an inner join in
/// the same statement, so reading `todo.user` never needs another query.
///
/// `start > end` is not an error: both bounds apply and nothing matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoFilter {
    weather: Option<String>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    order: Option<SortDirection>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl TodoFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some("")` filters on the empty string; only `None` disables the criterion
    pub fn weather(mut self, weather: Option<String>) -> Self {
        self.weather = weather;
        self
    }

    /// Inclusive lower bound on `modified_at`
    pub fn modified_from(mut self, start: Option<DateTime<Utc>>) -> Self {
        self.start = start;
        self
    }

    /// Inclusive upper bound on `modified_at`
    pub fn modified_until(mut self, end: Option<DateTime<Utc>>) -> Self {
        self.end = end;
        self
    }

    /// Most recently modified first, ties broken by id
    pub fn newest_first(mut self) -> Self {
        self.order = Some(SortDirection::Desc);
        self
    }

    /// 1-based page; `size` above the configured maximum is capped
    pub fn page(self, page: i64, size: i64) -> Result<Self, FilterError> {
        let max = crate::config::CONFIG.filter.max_page_size;
        self.page_capped(page, size, max)
    }

    fn page_capped(mut self, page: i64, size: i64, max_size: i64) -> Result<Self, FilterError> {
        if page < 1 {
            return Err(FilterError::InvalidPage(format!("page must be at least 1, got {}", page)));
        }
        if size < 1 {
            return Err(FilterError::InvalidPageSize(format!("size must be at least 1, got {}", size)));
        }

        let applied_size = if size > max_size {
            if crate::config::CONFIG.filter.debug_logging {
                tracing::warn!("Page size {} exceeds max {}, capping to max", size, max_size);
            }
            max_size
        } else {
            size
        };

        self.limit = Some(applied_size);
        self.offset = Some((page - 1).saturating_mul(applied_size));
        Ok(self)
    }

    pub fn order(&self) -> Option<SortDirection> {
        self.order
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    pub fn to_where(&self) -> FilterWhere {
        let mut filter_where = FilterWhere::new(0);
        filter_where
            .push_optional(TODO_WEATHER, FilterOp::Eq, self.weather.clone())
            .push_optional(TODO_MODIFIED_AT, FilterOp::Gte, self.start)
            .push_optional(TODO_MODIFIED_AT, FilterOp::Lte, self.end);
        filter_where
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = self.to_where().generate();
        let order_clause = FilterOrder::generate(&self.order_infos());
        let limit_clause = self.build_limit_clause();

        let query = [
            Self::select_clause(),
            format!("WHERE {}", where_clause),
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    /// Same predicates as [`to_sql`](Self::to_sql) without the join, order or window
    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = self.to_where().generate();
        SqlResult {
            query: format!("SELECT COUNT(*) AS count FROM \"todos\" t WHERE {}", where_clause),
            params,
        }
    }

    /// Single-key lookup with the owning user joined in
    pub fn by_id_sql(id: Uuid) -> SqlResult {
        let mut filter_where = FilterWhere::new(0);
        filter_where.push(TODO_ID, FilterOp::Eq, id);
        let (where_clause, params) = filter_where.generate();
        SqlResult {
            query: format!("{} WHERE {}", Self::select_clause(), where_clause),
            params,
        }
    }

    /// Evaluates the present criteria against an already loaded todo
    pub fn matches(&self, todo: &Todo) -> bool {
        self.predicates().iter().all(|predicate| predicate(todo))
    }

    fn predicates(&self) -> Vec<Box<dyn Fn(&Todo) -> bool + '_>> {
        let mut predicates: Vec<Box<dyn Fn(&Todo) -> bool + '_>> = Vec::new();
        if let Some(weather) = self.weather.as_deref() {
            predicates.push(Box::new(move |todo: &Todo| todo.weather == weather));
        }
        if let Some(start) = self.start {
            predicates.push(Box::new(move |todo: &Todo| todo.modified_at >= start));
        }
        if let Some(end) = self.end {
            predicates.push(Box::new(move |todo: &Todo| todo.modified_at <= end));
        }
        predicates
    }

    fn select_clause() -> String {
        format!(
            "SELECT {}, {} FROM \"todos\" t INNER JOIN \"users\" u ON u.\"id\" = t.\"user_id\"",
            TODO_COLUMNS, JOINED_USER_COLUMNS
        )
    }

    fn order_infos(&self) -> Vec<FilterOrderInfo> {
        match self.order {
            Some(sort) => vec![
                FilterOrderInfo { column: TODO_MODIFIED_AT, sort },
                FilterOrderInfo { column: TODO_ID, sort },
            ],
            None => vec![],
        }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }
}
