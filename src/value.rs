use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A stored item: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;

/// A single attribute value in the store's JSON shape, e.g. `{"S": "Kit"}`.
///
/// Numbers are carried as decimal strings, binary data as base64 text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    #[serde(rename = "S")]
    S(String),
    #[serde(rename = "N")]
    N(String),
    #[serde(rename = "B")]
    B(String),
    #[serde(rename = "BOOL")]
    Bool(bool),
    #[serde(rename = "NULL")]
    Null(bool),
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    #[serde(rename = "M")]
    M(HashMap<String, AttributeValue>),
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    #[serde(rename = "NS")]
    Ns(Vec<String>),
}

impl AttributeValue {
    pub fn null() -> Self {
        Self::Null(true)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::S(value.into())
    }

    pub fn number(value: impl ToString) -> Self {
        Self::N(value.to_string())
    }

    pub fn binary_base64(value: impl Into<String>) -> Self {
        Self::B(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::S(value) => Some(value),
            _ => None,
        }
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::S(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::S(value.to_owned())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::N(value.to_string())
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::N(value.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Builds an [`Item`] from name/value pairs.
pub fn item<I, K, V>(pairs: I) -> Item
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeValue>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{item, AttributeValue};

    #[test]
    fn helper_constructors() {
        assert_eq!(AttributeValue::null(), AttributeValue::Null(true));
        assert_eq!(AttributeValue::number(42), AttributeValue::N("42".to_owned()));
        assert_eq!(AttributeValue::string("abc"), AttributeValue::S("abc".to_owned()));
        assert_eq!(
            AttributeValue::binary_base64("AQID"),
            AttributeValue::B("AQID".to_owned())
        );
        assert_eq!(AttributeValue::from(7), AttributeValue::N("7".to_owned()));
        assert_eq!(AttributeValue::string("x").as_str(), Some("x"));
        assert_eq!(AttributeValue::from(true).as_str(), None);
    }

    #[test]
    fn item_builder_converts_names_and_values() {
        let built = item([("pk", "user#1"), ("name", "Kit")]);
        assert_eq!(built.len(), 2);
        assert_eq!(built["pk"], AttributeValue::S("user#1".to_owned()));
    }
}
