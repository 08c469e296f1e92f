use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use ddb_retry::{
    item, CallOptions, DeleteItemInput, DeleteItemOutput, GetItemInput, GetItemOutput, ItemStore,
    MemoryStore, PutItemInput, PutItemOutput, RetryPolicy, RetryingClient, StoreError,
};

/// Rejects every other request, like a table running near its capacity.
struct Busy {
    store: MemoryStore,
    calls: AtomicUsize,
}

impl Busy {
    fn throttle(&self) -> Result<(), StoreError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            Err(StoreError::throughput_exceeded())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ItemStore for Busy {
    async fn get_item(
        &self,
        input: &GetItemInput,
        options: &CallOptions,
    ) -> Result<GetItemOutput, StoreError> {
        self.throttle()?;
        self.store.get_item(input, options).await
    }

    async fn delete_item(
        &self,
        input: &DeleteItemInput,
        options: &CallOptions,
    ) -> Result<DeleteItemOutput, StoreError> {
        self.throttle()?;
        self.store.delete_item(input, options).await
    }

    async fn put_item(
        &self,
        input: &PutItemInput,
        options: &CallOptions,
    ) -> Result<PutItemOutput, StoreError> {
        self.throttle()?;
        self.store.put_item(input, options).await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = MemoryStore::new();
    store.create_table("users", ["pk"]);

    let policy = RetryPolicy::from_env_or(RetryPolicy::new(3, Duration::from_millis(100)))
        .map_err(anyhow::Error::msg)?;
    let busy = Busy {
        store: store.clone(),
        calls: AtomicUsize::new(0),
    };
    let db = RetryingClient::with_policy(busy, policy);
    let opts = CallOptions::default();

    db.put_item(
        &PutItemInput::new("users", item([("pk", "user#1"), ("name", "Kit")])),
        &opts,
    )
    .await?;

    let result = db
        .get_item(&GetItemInput::new("users", item([("pk", "user#1")])), &opts)
        .await?;
    println!("{:?}", result.item);

    db.delete_item(&DeleteItemInput::new("users", item([("pk", "user#1")])), &opts)
        .await?;
    println!("items left: {:?}", store.item_count("users"));

    Ok(())
}
