use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::{
    error::is_throughput_exceeded, CallOptions, DeleteItemInput, DeleteItemOutput, Error,
    GetItemInput, GetItemOutput, InvalidRetryError, ItemStore, PutItemInput, PutItemOutput,
    Result, RetryBudget, RetryPolicy, StoreError,
};

/// Item store client that retries throughput-exceeded rejections.
///
/// Every operation is forwarded to the wrapped client. When the store
/// answers with [`StoreError::ThroughputExceeded`], the call sleeps for the
/// policy's backoff and tries again until the retry budget runs out. Any
/// other failure is returned as soon as it is seen.
///
/// The retry counter lives on the stack of each call, so one client can be
/// shared between concurrent tasks.
#[derive(Clone)]
pub struct RetryingClient<C> {
    inner: C,
    policy: RetryPolicy,
}

impl<C> fmt::Debug for RetryingClient<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingClient")
            .field("inner", &std::any::type_name::<C>())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<C: ItemStore> RetryingClient<C> {
    /// Wraps `inner`, retrying up to `retries` times with a fixed `backoff`.
    ///
    /// `retries == -1` retries without limit. Values below `-1` are not
    /// rejected here; every call then fails with [`Error::InvalidRetry`]
    /// without reaching the store.
    pub fn new(inner: C, retries: i64, backoff: Duration) -> Self {
        Self::with_policy(inner, RetryPolicy::new(retries, backoff))
    }

    pub fn with_policy(inner: C, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Borrows the wrapped client, e.g. to reach operations this layer does
    /// not retry.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Reads an item, retrying throttled attempts.
    pub async fn get_item(
        &self,
        input: &GetItemInput,
        options: &CallOptions,
    ) -> Result<GetItemOutput> {
        self.with_retry("get_item", || self.inner.get_item(input, options))
            .await
    }

    /// Deletes an item, retrying throttled attempts.
    pub async fn delete_item(
        &self,
        input: &DeleteItemInput,
        options: &CallOptions,
    ) -> Result<DeleteItemOutput> {
        self.with_retry("delete_item", || self.inner.delete_item(input, options))
            .await
    }

    /// Writes an item, retrying throttled attempts.
    pub async fn put_item(
        &self,
        input: &PutItemInput,
        options: &CallOptions,
    ) -> Result<PutItemOutput> {
        self.with_retry("put_item", || self.inner.put_item(input, options))
            .await
    }

    async fn with_retry<T, F, Fut>(&self, operation: &'static str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, StoreError>>,
    {
        let mut budget = self.policy.budget();
        if let RetryBudget::Invalid(retries) = budget {
            #[cfg(feature = "tracing")]
            tracing::debug!(operation, retries, "invalid retry count");
            return Err(InvalidRetryError::new(retries).into());
        }

        loop {
            let err = match attempt().await {
                Ok(output) => return Ok(output),
                Err(err) => err,
            };
            if !is_throughput_exceeded(&err) {
                return Err(Error::Store(err));
            }

            match budget {
                RetryBudget::Unlimited => {}
                RetryBudget::Limited(0) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(operation, "retry budget exhausted");
                    return Err(Error::Store(err));
                }
                RetryBudget::Limited(remaining) => budget = RetryBudget::Limited(remaining - 1),
                RetryBudget::Invalid(retries) => return Err(InvalidRetryError::new(retries).into()),
            }

            self.wait_before_retry(operation).await;
        }
    }

    async fn wait_before_retry(&self, operation: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            operation,
            "throughput exceeded, retrying after {} ms",
            self.policy.backoff.as_millis()
        );
        #[cfg(not(feature = "tracing"))]
        let _ = operation;

        sleep(self.policy.backoff).await;
    }
}

/// Lets a retrying client stand in wherever a plain store is expected.
///
/// Errors are flattened back to [`StoreError`]; an invalid retry count is
/// reported as [`StoreError::Validation`].
#[async_trait]
impl<C: ItemStore> ItemStore for RetryingClient<C> {
    async fn get_item(
        &self,
        input: &GetItemInput,
        options: &CallOptions,
    ) -> std::result::Result<GetItemOutput, StoreError> {
        RetryingClient::get_item(self, input, options)
            .await
            .map_err(into_store_error)
    }

    async fn delete_item(
        &self,
        input: &DeleteItemInput,
        options: &CallOptions,
    ) -> std::result::Result<DeleteItemOutput, StoreError> {
        RetryingClient::delete_item(self, input, options)
            .await
            .map_err(into_store_error)
    }

    async fn put_item(
        &self,
        input: &PutItemInput,
        options: &CallOptions,
    ) -> std::result::Result<PutItemOutput, StoreError> {
        RetryingClient::put_item(self, input, options)
            .await
            .map_err(into_store_error)
    }
}

fn into_store_error(err: Error) -> StoreError {
    match err {
        Error::Store(err) => err,
        Error::InvalidRetry(err) => StoreError::Validation(err.to_string()),
    }
}
