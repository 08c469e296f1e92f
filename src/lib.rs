//! `ddb-retry` wraps a DynamoDB-style item store client and retries requests
//! the store rejects with a throughput-exceeded error.
//!
//! The decorator exposes the same operations as the store it wraps:
//! - [`RetryingClient::get_item`]
//! - [`RetryingClient::delete_item`]
//! - [`RetryingClient::put_item`]
//!
//! Only [`StoreError::ThroughputExceeded`] is retried, with a fixed
//! [`RetryPolicy::backoff`] between attempts. Every other error is returned
//! unchanged on first sight.

mod client;
mod error;
mod options;
mod store;
mod types;
mod value;

pub mod memory;

pub use client::RetryingClient;
pub use error::{
    is_invalid_retry_error, is_throughput_exceeded, Error, InvalidRetryError,
    ProvisionedThroughputExceeded, StoreError,
};
pub use memory::MemoryStore;
pub use options::{CallOptions, RetryBudget, RetryPolicy};
pub use store::ItemStore;
pub use types::{
    DeleteItemInput, DeleteItemOutput, GetItemInput, GetItemOutput, PutItemInput, PutItemOutput,
    ReturnValues,
};
pub use value::{item, AttributeValue, Item};

pub type Result<T> = std::result::Result<T, Error>;
