//! Record submission through the remote mutations.

use crate::QueryExecutor;
use lorebot_error::{JsonError, LorebotResult, QueryError, QueryErrorKind};
use lorebot_ingest::{EquipmentRecord, LookInput, LoreRecord};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Upserts one item's lore.
pub const ADD_OR_UPDATE_LORE: &str = r#"mutation AddOrUpdateLore($input: LoreInput!) {
  addOrUpdateLore(input: $input) {
    LORE_ID
    OBJECT_NAME
    ITEM_TYPE
    ITEM_IS
    SUBMITTER
    AFFECTS
    APPLY
    RESTRICTS
    CREATE_DATE
    CLASS
    MAT_CLASS
    MATERIAL
    ITEM_VALUE
    IMMUNE
    EFFECTS
    WEIGHT
    CAPACITY
    ITEM_LEVEL
    CONTAINER_SIZE
    CHARGES
    SPEED
    ACCURACY
    POWER
    DAMAGE
  }
}"#;

/// Upserts one character's equipment.
pub const ADD_OR_UPDATE_LOOK: &str = r#"mutation AddOrUpdateLook($input: LookInput!) {
  addOrUpdateLook(input: $input) {
    LOOK_ID
    CHARACTER_NAME
    SUBMITTER
    CREATE_DATE
  }
}"#;

/// Sends built records to the store.
#[derive(Clone)]
pub struct RecordSubmitter {
    executor: Arc<dyn QueryExecutor>,
}

impl RecordSubmitter {
    /// Submit through `executor`.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self { executor }
    }

    /// Upsert a lore record and return the stored object.
    ///
    /// # Errors
    ///
    /// Fails if the call fails or the result has no stored object.
    #[instrument(skip(self, record), fields(object = %record.object_name()))]
    pub async fn submit_lore(&self, record: &LoreRecord) -> LorebotResult<JsonValue> {
        self.submit(ADD_OR_UPDATE_LORE, "addOrUpdateLore", record).await
    }

    /// Upsert an equipment record and return the stored object.
    ///
    /// # Errors
    ///
    /// Fails if the call fails or the result has no stored object.
    #[instrument(skip(self, record), fields(character = %record.character_name()))]
    pub async fn submit_look(&self, record: &EquipmentRecord) -> LorebotResult<JsonValue> {
        self.submit(ADD_OR_UPDATE_LOOK, "addOrUpdateLook", &LookInput::from(record))
            .await
    }

    async fn submit<T: Serialize + ?Sized>(
        &self,
        document: &str,
        field: &str,
        input: &T,
    ) -> LorebotResult<JsonValue> {
        let input = serde_json::to_value(input).map_err(|e| JsonError::new(field, e.to_string()))?;
        let mut variables = Map::new();
        variables.insert("input".to_string(), input);

        let data = self
            .executor
            .execute(document, JsonValue::Object(variables))
            .await?;
        let stored = stored_object(&data, field)?;
        debug!(field, "Record stored");
        Ok(stored)
    }
}

/// The non-null object under `field`, or a missing-data error.
fn stored_object(data: &JsonValue, field: &str) -> LorebotResult<JsonValue> {
    match data.get(field) {
        Some(object @ JsonValue::Object(_)) => Ok(object.clone()),
        _ => Err(QueryError::new(QueryErrorKind::MissingData(field.to_string())).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_object_requires_object() {
        let data = json!({"addOrUpdateLore": {"LORE_ID": 4}});
        assert_eq!(stored_object(&data, "addOrUpdateLore").unwrap()["LORE_ID"], 4);

        assert!(stored_object(&json!({"addOrUpdateLore": null}), "addOrUpdateLore").is_err());
        assert!(stored_object(&json!({}), "addOrUpdateLore").is_err());
    }
}
