//! In-process item store.
//!
//! Useful as a stand-in for a real store in tests and demos. Throttling is
//! not simulated; wrap the store to inject rejections.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    AttributeValue, CallOptions, DeleteItemInput, DeleteItemOutput, GetItemInput, GetItemOutput,
    Item, ItemStore, PutItemInput, PutItemOutput, ReturnValues, StoreError,
};

type Key = Vec<(String, AttributeValue)>;

struct Table {
    key_attributes: Vec<String>,
    items: Vec<(Key, Item)>,
}

impl Table {
    fn position(&self, key: &Key) -> Option<usize> {
        self.items.iter().position(|(stored, _)| stored == key)
    }

    /// Validates a request key: exactly the table's key attributes.
    fn key_of_request(&self, key: &Item) -> Result<Key, StoreError> {
        if let Some(extra) = key
            .keys()
            .find(|name| !self.key_attributes.contains(*name))
        {
            return Err(StoreError::Validation(format!(
                "attribute '{extra}' is not part of the key"
            )));
        }
        self.project_key(key)
    }

    fn project_key(&self, attributes: &Item) -> Result<Key, StoreError> {
        self.key_attributes
            .iter()
            .map(|name| {
                attributes
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
                    .ok_or_else(|| {
                        StoreError::Validation(format!("missing key attribute '{name}'"))
                    })
            })
            .collect()
    }
}

/// Tables of items held in memory behind a lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read();
        let mut names: Vec<&String> = tables.keys().collect();
        names.sort();
        f.debug_struct("MemoryStore").field("tables", &names).finish()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) an empty table keyed by `key_attributes`.
    pub fn create_table<I, S>(&self, name: impl Into<String>, key_attributes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut key_attributes: Vec<String> = key_attributes.into_iter().map(Into::into).collect();
        key_attributes.sort();
        key_attributes.dedup();
        self.tables.write().insert(
            name.into(),
            Table {
                key_attributes,
                items: Vec::new(),
            },
        );
    }

    /// Number of items in `table`, or `None` if it does not exist.
    pub fn item_count(&self, table: &str) -> Option<usize> {
        self.tables.read().get(table).map(|table| table.items.len())
    }

    fn not_found(table: &str) -> StoreError {
        StoreError::ResourceNotFound {
            table: table.to_owned(),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn get_item(
        &self,
        input: &GetItemInput,
        _options: &CallOptions,
    ) -> Result<GetItemOutput, StoreError> {
        let tables = self.tables.read();
        let table = tables
            .get(&input.table_name)
            .ok_or_else(|| Self::not_found(&input.table_name))?;
        let key = table.key_of_request(&input.key)?;

        Ok(GetItemOutput {
            item: table.position(&key).map(|index| table.items[index].1.clone()),
        })
    }

    async fn delete_item(
        &self,
        input: &DeleteItemInput,
        _options: &CallOptions,
    ) -> Result<DeleteItemOutput, StoreError> {
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(&input.table_name)
            .ok_or_else(|| Self::not_found(&input.table_name))?;
        let key = table.key_of_request(&input.key)?;

        let old = table
            .position(&key)
            .map(|index| table.items.swap_remove(index).1);
        Ok(DeleteItemOutput {
            attributes: old.filter(|_| input.return_values == ReturnValues::AllOld),
        })
    }

    async fn put_item(
        &self,
        input: &PutItemInput,
        _options: &CallOptions,
    ) -> Result<PutItemOutput, StoreError> {
        let mut tables = self.tables.write();
        let table = tables
            .get_mut(&input.table_name)
            .ok_or_else(|| Self::not_found(&input.table_name))?;
        let key = table.project_key(&input.item)?;

        let old = match table.position(&key) {
            Some(index) => Some(std::mem::replace(&mut table.items[index].1, input.item.clone())),
            None => {
                table.items.push((key, input.item.clone()));
                None
            }
        };
        Ok(PutItemOutput {
            attributes: old.filter(|_| input.return_values == ReturnValues::AllOld),
        })
    }
}
