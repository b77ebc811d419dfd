pub mod article;
pub mod dictionary;
pub mod info;
pub mod verb_tables;

pub use article::article_get;
pub use dictionary::{dictionary_entry_get, dictionary_list_get};
pub use info::{arabic_taatic_map_get, arabic_vowels_get};
pub use verb_tables::{binyan_lists_get, conjugation_table_get};

use crate::error::ApiError;

/// Validate a path/query id before touching the datastore.
pub(crate) fn parse_numeric_id(raw: &str, what: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation(format!("Invalid {}", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_numeric_id("12", "article ID").unwrap(), 12);
        assert_eq!(parse_numeric_id(" 7 ", "article ID").unwrap(), 7);
    }

    #[test]
    fn non_numeric_ids_are_validation_errors() {
        let err = parse_numeric_id("abc", "article ID").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid article ID");
    }
}
