use serde::{Deserialize, Serialize};

use crate::Item;

/// Which attributes a write returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnValues {
    #[default]
    None,
    AllOld,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    pub table_name: String,
    pub key: Item,
    #[serde(default)]
    pub consistent_read: bool,
}

impl GetItemInput {
    pub fn new(table_name: impl Into<String>, key: Item) -> Self {
        Self {
            table_name: table_name.into(),
            key,
            consistent_read: false,
        }
    }

    pub fn consistent(mut self) -> Self {
        self.consistent_read = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Item>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemInput {
    pub table_name: String,
    pub item: Item,
    /// `ALL_OLD` returns the attributes the item had before it was replaced.
    #[serde(default)]
    pub return_values: ReturnValues,
}

impl PutItemInput {
    pub fn new(table_name: impl Into<String>, item: Item) -> Self {
        Self {
            table_name: table_name.into(),
            item,
            return_values: ReturnValues::None,
        }
    }

    pub fn returning_old(mut self) -> Self {
        self.return_values = ReturnValues::AllOld;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemInput {
    pub table_name: String,
    pub key: Item,
    /// `ALL_OLD` returns the attributes of the deleted item.
    #[serde(default)]
    pub return_values: ReturnValues,
}

impl DeleteItemInput {
    pub fn new(table_name: impl Into<String>, key: Item) -> Self {
        Self {
            table_name: table_name.into(),
            key,
            return_values: ReturnValues::None,
        }
    }

    pub fn returning_old(mut self) -> Self {
        self.return_values = ReturnValues::AllOld;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Item>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        item, AttributeValue, DeleteItemInput, GetItemInput, GetItemOutput, PutItemInput,
    };

    #[test]
    fn get_item_input_uses_store_json_shape() {
        let input = GetItemInput::new("users", item([("pk", "user#1")])).consistent();
        let encoded = serde_json::to_value(&input).expect("input must serialize");

        assert_eq!(
            encoded,
            json!({
                "TableName": "users",
                "Key": { "pk": { "S": "user#1" } },
                "ConsistentRead": true
            })
        );
    }

    #[test]
    fn returning_old_maps_to_return_values_all_old() {
        let put = PutItemInput::new("users", item([("pk", "user#1")])).returning_old();
        assert_eq!(
            serde_json::to_value(&put).expect("input must serialize"),
            json!({
                "TableName": "users",
                "Item": { "pk": { "S": "user#1" } },
                "ReturnValues": "ALL_OLD"
            })
        );

        let delete = DeleteItemInput::new("users", item([("pk", "user#1")]));
        let encoded = serde_json::to_value(&delete).expect("input must serialize");
        assert_eq!(encoded["ReturnValues"], json!("NONE"));
        assert!(encoded.get("ReturnOld").is_none());
    }

    #[test]
    fn get_item_output_decodes_nested_attributes() {
        let body = json!({
            "Item": {
                "pk": { "S": "user#1" },
                "visits": { "N": "3" },
                "tags": { "SS": ["a", "b"] },
                "profile": { "M": { "active": { "BOOL": true } } }
            }
        });
        let output: GetItemOutput = serde_json::from_value(body).expect("output must decode");
        let item = output.item.expect("item must be present");

        assert_eq!(item["visits"], AttributeValue::N("3".to_owned()));
        assert!(matches!(item["profile"], AttributeValue::M(_)));
    }

    #[test]
    fn empty_get_item_output_omits_item() {
        let encoded = serde_json::to_value(GetItemOutput::default()).expect("must serialize");
        assert_eq!(encoded, json!({}));
    }
}
