use super::types::{Column, FilterOp, FilterWhereInfo, SqlParam};

/// Collects predicates and renders them as an AND-joined WHERE body with
/// `$n` placeholders numbered from `starting_param_index + 1`.
#[derive(Debug, Clone, Default)]
pub struct FilterWhere {
    param_index: usize,
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    pub fn push(&mut self, column: Column, operator: FilterOp, data: impl Into<SqlParam>) -> &mut Self {
        self.conditions.push(FilterWhereInfo {
            column,
            operator,
            data: data.into(),
        });
        self
    }

    /// Adds the predicate only when `data` is present
    pub fn push_optional<V: Into<SqlParam>>(&mut self, column: Column, operator: FilterOp, data: Option<V>) -> &mut Self {
        if let Some(value) = data {
            self.push(column, operator, value);
        }
        self
    }

    /// `1=1` when no predicate was pushed
    pub fn generate(&self) -> (String, Vec<SqlParam>) {
        if self.conditions.is_empty() {
            return ("1=1".to_string(), vec![]);
        }

        let mut sql_conditions = Vec::with_capacity(self.conditions.len());
        let mut params = Vec::with_capacity(self.conditions.len());
        for (offset, condition) in self.conditions.iter().enumerate() {
            sql_conditions.push(format!(
                "{} {} ${}",
                condition.column.to_sql(),
                condition.operator.to_sql(),
                self.param_index + offset + 1
            ));
            params.push(condition.data.clone());
        }

        (sql_conditions.join(" AND "), params)
    }
}
