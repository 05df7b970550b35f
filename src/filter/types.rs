use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A value bound to a positional placeholder; never interpolated into SQL text
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    BigInt(i64),
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for SqlParam {
    fn from(v: DateTime<Utc>) -> Self {
        SqlParam::Timestamp(v)
    }
}

impl From<Uuid> for SqlParam {
    fn from(v: Uuid) -> Self {
        SqlParam::Uuid(v)
    }
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::BigInt(v)
    }
}

/// A column reference qualified by its table alias, rendered as `t."name"`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub alias: &'static str,
    pub name: &'static str,
}

impl Column {
    pub const fn new(alias: &'static str, name: &'static str) -> Self {
        Self { alias, name }
    }

    pub fn to_sql(&self) -> String {
        format!("{}.\"{}\"", self.alias, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

impl FilterOp {
    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Gte => ">=",
            FilterOp::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhereInfo {
    pub column: Column,
    pub operator: FilterOp,
    pub data: SqlParam,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: Column,
    pub sort: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
