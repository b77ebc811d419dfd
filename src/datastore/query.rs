use std::fmt::Display;

/// Fluent read-query builder for the hosted datastore.
///
/// Renders to the provider's filter syntax as URL query parameters:
/// `select=a,b`, `col=eq.value`, `or=(a.ilike.*t*,b.ilike.*t*)`,
/// `order=a.asc,b.asc`, `limit=n`.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    table: String,
    columns: Vec<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<u32>,
}

impl SelectQuery {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: name.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Exact-match filter on one column.
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    /// Case-insensitive substring match across several columns, combined
    /// with logical OR.
    pub fn ilike_any(mut self, columns: &[&str], term: &str) -> Self {
        let pattern = sanitize_pattern(term);
        let clauses = columns
            .iter()
            .map(|c| format!("{}.ilike.*{}*", c, pattern))
            .collect::<Vec<_>>()
            .join(",");
        self.filters.push(("or".to_string(), format!("({})", clauses)));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push(format!("{}.asc", column));
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn table_name(&self) -> &str {
        &self.table
    }

    pub(crate) fn into_params(self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if !self.columns.is_empty() {
            params.push(("select".to_string(), self.columns.join(",")));
        }
        params.extend(self.filters);
        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

// The provider's or=() grouping cannot carry unquoted commas, parens or
// wildcards inside a pattern.
fn sanitize_pattern(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '*' | '\\'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_select_filter_and_order() {
        let params = SelectQuery::table("article_lines")
            .columns(&["line_index", "word_index"])
            .eq("article_id", 12)
            .order_asc("line_index")
            .order_asc("word_index")
            .into_params();

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "line_index,word_index".to_string()),
                ("article_id".to_string(), "eq.12".to_string()),
                ("order".to_string(), "line_index.asc,word_index.asc".to_string()),
            ]
        );
    }

    #[test]
    fn renders_or_ilike_group() {
        let params = SelectQuery::table("dictionary_entries")
            .ilike_any(&["translation", "shoresh"], "ktb")
            .into_params();

        assert_eq!(params.len(), 1);
        assert_eq!(params[0].0, "or");
        assert_eq!(params[0].1, "(translation.ilike.*ktb*,shoresh.ilike.*ktb*)");
    }

    #[test]
    fn strips_reserved_characters_from_patterns() {
        let params = SelectQuery::table("dictionary_entries")
            .ilike_any(&["translation"], "a,b(c)*")
            .into_params();

        assert_eq!(params[0].1, "(translation.ilike.*abc*)");
    }

    #[test]
    fn renders_limit() {
        let params = SelectQuery::table("user_preferences")
            .eq("user_id", "u1")
            .limit(1)
            .into_params();

        assert_eq!(params.last().unwrap(), &("limit".to_string(), "1".to_string()));
    }
}
