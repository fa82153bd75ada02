//! Row-query builder.
//!
//! Builds the query-string pairs the backend's row endpoints understand:
//! column projection via `select=`, filters as `column=op.value`, ordering as
//! `order=column.direction`, and `limit=`. Rendering is deterministic —
//! pairs appear in the order they were added — so queries are easy to assert
//! on in tests.

/// Sort direction for [`SelectQuery::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// A row query against one table, at most one level of embedded relation
/// expansion deep (expressed through the column projection).
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: Option<String>,
    filters: Vec<(String, String)>,
    order: Option<(String, Order)>,
    limit: Option<u32>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: None,
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Column projection, e.g. `"id,role_name,user_roles(role_name)"`.
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn neq(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), format!("neq.{}", value.to_string())));
        self
    }

    pub fn gte(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), format!("gte.{}", value.to_string())));
        self
    }

    pub fn lte(mut self, column: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((column.into(), format!("lte.{}", value.to_string())));
        self
    }

    /// Membership filter, rendered as `column=in.(a,b,c)`.
    pub fn in_<V: ToString>(mut self, column: impl Into<String>, values: &[V]) -> Self {
        let list = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.filters.push((column.into(), format!("in.({})", list)));
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Order) -> Self {
        self.order = Some((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the query-string pairs in insertion order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 3);
        if let Some(columns) = &self.columns {
            pairs.push(("select".to_string(), columns.clone()));
        }
        pairs.extend(self.filters.iter().cloned());
        if let Some((column, direction)) = &self.order {
            pairs.push(("order".to_string(), format!("{}.{}", column, direction.suffix())));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}
