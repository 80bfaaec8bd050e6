//! Item model shared by the HTTP layer and the repository

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single entry in the list.
///
/// Missing or `null` JSON fields decode to their zero value, so an item posted
/// without a `uuid` is stored under the nil identifier. The server never
/// generates or validates identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: Uuid,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    pub fn new(description: impl Into<String>, uuid: Uuid, completed: bool) -> Self {
        Self {
            description: description.into(),
            uuid,
            completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_wire_field_names() {
        let id = Uuid::parse_str("6f1c2a0e-7d35-4b8e-9c41-2f0a5e7b9d13").unwrap();
        let item = Item::new("buy milk", id, true);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "description": "buy milk",
                "uuid": "6f1c2a0e-7d35-4b8e-9c41-2f0a5e7b9d13",
                "completed": true
            })
        );
    }

    #[test]
    fn missing_fields_use_zero_values() {
        let item: Item = serde_json::from_str(r#"{"description": "no id"}"#).unwrap();
        assert_eq!(item.description, "no id");
        assert!(item.uuid.is_nil());
        assert!(!item.completed);
    }

    #[test]
    fn null_fields_use_zero_values() {
        let item: Item =
            serde_json::from_str(r#"{"description": null, "uuid": null, "completed": null}"#)
                .unwrap();
        assert_eq!(item, Item::default());
        assert!(item.uuid.is_nil());
    }

    #[test]
    fn rejects_malformed_uuid() {
        let result: Result<Item, _> =
            serde_json::from_str(r#"{"description": "x", "uuid": "not-a-uuid"}"#);
        assert!(result.is_err());
    }
}
