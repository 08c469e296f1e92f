use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    CallOptions, DeleteItemInput, DeleteItemOutput, GetItemInput, GetItemOutput, PutItemInput,
    PutItemOutput, StoreError,
};

/// The item operations a store client exposes.
///
/// Implementations map their own failures onto [`StoreError`]; a throttled
/// request must surface as [`StoreError::ThroughputExceeded`] to be retried.
///
/// [`RetryingClient`](crate::RetryingClient) consumes any implementation and
/// implements the trait itself, so real clients, test doubles and decorators
/// are interchangeable.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn get_item(
        &self,
        input: &GetItemInput,
        options: &CallOptions,
    ) -> Result<GetItemOutput, StoreError>;

    async fn delete_item(
        &self,
        input: &DeleteItemInput,
        options: &CallOptions,
    ) -> Result<DeleteItemOutput, StoreError>;

    async fn put_item(
        &self,
        input: &PutItemInput,
        options: &CallOptions,
    ) -> Result<PutItemOutput, StoreError>;
}

macro_rules! forward_item_store {
    ($($ty:ty),*) => {$(
        #[async_trait]
        impl<S: ItemStore + ?Sized> ItemStore for $ty {
            async fn get_item(
                &self,
                input: &GetItemInput,
                options: &CallOptions,
            ) -> Result<GetItemOutput, StoreError> {
                (**self).get_item(input, options).await
            }

            async fn delete_item(
                &self,
                input: &DeleteItemInput,
                options: &CallOptions,
            ) -> Result<DeleteItemOutput, StoreError> {
                (**self).delete_item(input, options).await
            }

            async fn put_item(
                &self,
                input: &PutItemInput,
                options: &CallOptions,
            ) -> Result<PutItemOutput, StoreError> {
                (**self).put_item(input, options).await
            }
        }
    )*};
}

forward_item_store!(&S, Arc<S>, Box<S>);
