use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::datastore::{DataClient, DataError, Row, SelectQuery};

const USER_PREFERENCES: &str = "user_preferences";

/// User-scoped preference storage: starred dictionary items and custom video
/// ordering, one row per user in the `user_preferences` collection.
///
/// Each preference is independently get/replace. Replace is a whole-value
/// overwrite upserted on `user_id`, never a merge, so writing the same value
/// twice stores the same state as writing it once. A missing row is a
/// defined empty state, not an error.
#[derive(Clone)]
pub struct PreferenceService {
    data: Arc<DataClient>,
}

impl PreferenceService {
    pub fn new(data: Arc<DataClient>) -> Self {
        Self { data }
    }

    /// Starred items for a user; `[]` when no preference row exists.
    pub async fn starred_items(&self, user_id: Uuid) -> Result<Vec<Value>, DataError> {
        let query = SelectQuery::table(USER_PREFERENCES)
            .columns(&["starred_items"])
            .eq("user_id", user_id);

        let row = self.data.fetch_optional(query).await?;
        Ok(items_from_row(row))
    }

    /// Replace the full starred-items list.
    pub async fn replace_starred_items(
        &self,
        user_id: Uuid,
        items: Vec<Value>,
    ) -> Result<(), DataError> {
        let record = json!({
            "user_id": user_id,
            "starred_items": items,
            "updated_at": Utc::now(),
        });
        self.data.upsert(USER_PREFERENCES, record, "user_id").await
    }

    /// Custom video order for a user; `None` when the user has never set one.
    pub async fn video_order(&self, user_id: Uuid) -> Result<Option<Vec<i64>>, DataError> {
        let query = SelectQuery::table(USER_PREFERENCES)
            .columns(&["video_order"])
            .eq("user_id", user_id);

        let row = self.data.fetch_optional(query).await?;
        Ok(order_from_row(row))
    }

    /// Replace the full video order (a list of article ids).
    pub async fn replace_video_order(
        &self,
        user_id: Uuid,
        order: Vec<i64>,
    ) -> Result<(), DataError> {
        let record = json!({
            "user_id": user_id,
            "video_order": order,
            "updated_at": Utc::now(),
        });
        self.data.upsert(USER_PREFERENCES, record, "user_id").await
    }
}

fn items_from_row(row: Option<Row>) -> Vec<Value> {
    match row.and_then(|mut r| r.remove("starred_items")) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn order_from_row(row: Option<Row>) -> Option<Vec<i64>> {
    match row.and_then(|mut r| r.remove("video_order")) {
        Some(Value::Array(ids)) => Some(ids.iter().filter_map(Value::as_i64).collect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(value: Value) -> Option<Row> {
        match value {
            Value::Object(map) => Some(map),
            _ => panic!("test rows must be objects"),
        }
    }

    #[test]
    fn missing_row_is_an_empty_starred_list() {
        assert!(items_from_row(None).is_empty());
    }

    #[test]
    fn null_starred_column_is_an_empty_list() {
        assert!(items_from_row(row(json!({ "starred_items": null }))).is_empty());
    }

    #[test]
    fn stored_starred_items_come_back_as_is() {
        let items = items_from_row(row(json!({
            "starred_items": [{ "id": 3, "note": "root" }]
        })));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], 3);
    }

    #[test]
    fn missing_row_is_a_null_video_order() {
        assert_eq!(order_from_row(None), None);
        assert_eq!(order_from_row(row(json!({ "video_order": null }))), None);
    }

    #[test]
    fn stored_video_order_comes_back_in_order() {
        let order = order_from_row(row(json!({ "video_order": [3, 1, 2] })));
        assert_eq!(order, Some(vec![3, 1, 2]));
    }
}
