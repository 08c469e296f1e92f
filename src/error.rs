use std::error::Error as StdError;

/// The store rejected a request because the table's provisioned throughput
/// was exceeded.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("provisioned throughput exceeded{}", detail(.message))]
pub struct ProvisionedThroughputExceeded {
    pub message: Option<String>,
}

impl ProvisionedThroughputExceeded {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

/// Failure reported by an underlying item store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Request rate exceeded the table's provisioned capacity. Transient.
    #[error(transparent)]
    ThroughputExceeded(ProvisionedThroughputExceeded),
    /// The named table does not exist.
    #[error("table not found: {table}")]
    ResourceNotFound { table: String },
    /// A conditional write did not match the stored item.
    #[error("conditional check failed")]
    ConditionalCheckFailed,
    /// The request was rejected as malformed.
    #[error("validation error: {0}")]
    Validation(String),
    /// Any other service-side error.
    #[error("service error {code}: {message}")]
    Service { code: String, message: String },
    /// Network or request execution failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl StoreError {
    pub fn throughput_exceeded() -> Self {
        Self::ThroughputExceeded(ProvisionedThroughputExceeded::default())
    }

    pub fn is_throughput_exceeded(&self) -> bool {
        matches!(self, Self::ThroughputExceeded(_))
    }
}

impl From<ProvisionedThroughputExceeded> for StoreError {
    fn from(err: ProvisionedThroughputExceeded) -> Self {
        Self::ThroughputExceeded(err)
    }
}

/// The configured retry count is neither `-1` nor non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for retries: {retries}")]
pub struct InvalidRetryError {
    pub retries: i64,
}

impl InvalidRetryError {
    pub fn new(retries: i64) -> Self {
        Self { retries }
    }
}

/// Error type returned by [`RetryingClient`](crate::RetryingClient).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Error from the underlying store, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A retry was needed but the policy's retry count is invalid.
    #[error(transparent)]
    InvalidRetry(#[from] InvalidRetryError),
}

impl Error {
    pub fn is_throughput_exceeded(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_throughput_exceeded())
    }

    pub fn is_invalid_retry(&self) -> bool {
        matches!(self, Self::InvalidRetry(_))
    }
}

/// Reports whether `err`, or any error in its source chain, is a
/// throughput-exceeded rejection.
pub fn is_throughput_exceeded(err: &(dyn StdError + 'static)) -> bool {
    chain(err).any(|err| {
        err.is::<ProvisionedThroughputExceeded>()
            || err
                .downcast_ref::<StoreError>()
                .is_some_and(StoreError::is_throughput_exceeded)
            || err
                .downcast_ref::<Error>()
                .is_some_and(Error::is_throughput_exceeded)
    })
}

/// Reports whether `err`, or any error in its source chain, is an
/// [`InvalidRetryError`].
pub fn is_invalid_retry_error(err: &(dyn StdError + 'static)) -> bool {
    chain(err).any(|err| {
        err.is::<InvalidRetryError>()
            || err.downcast_ref::<Error>().is_some_and(Error::is_invalid_retry)
    })
}

fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&err| err.source())
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::{
        is_invalid_retry_error, is_throughput_exceeded, Error, InvalidRetryError,
        ProvisionedThroughputExceeded, StoreError,
    };

    #[derive(Debug)]
    struct Wrapped(Box<dyn std::error::Error + Send + Sync>);

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "wrapped: {}", self.0)
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(self.0.as_ref())
        }
    }

    #[test]
    fn throughput_exceeded_is_recognized_in_every_form() {
        let bare = ProvisionedThroughputExceeded::default();
        let store = StoreError::throughput_exceeded();
        let decorated = Error::Store(StoreError::throughput_exceeded());
        let wrapped = Wrapped(Box::new(StoreError::throughput_exceeded()));
        let wrapped_bare = Wrapped(Box::new(ProvisionedThroughputExceeded::new("slow down")));

        assert!(is_throughput_exceeded(&bare));
        assert!(is_throughput_exceeded(&store));
        assert!(is_throughput_exceeded(&decorated));
        assert!(is_throughput_exceeded(&wrapped));
        assert!(is_throughput_exceeded(&wrapped_bare));
    }

    #[test]
    fn other_errors_are_not_throughput_exceeded() {
        let io = std::io::Error::other("foo");
        let not_found = StoreError::ResourceNotFound {
            table: "users".to_owned(),
        };
        let conditional = Error::Store(StoreError::ConditionalCheckFailed);
        let invalid = Error::InvalidRetry(InvalidRetryError::new(-2));

        assert!(!is_throughput_exceeded(&io));
        assert!(!is_throughput_exceeded(&not_found));
        assert!(!is_throughput_exceeded(&conditional));
        assert!(!is_throughput_exceeded(&invalid));
        assert!(!is_throughput_exceeded(&Wrapped(Box::new(io))));
    }

    #[test]
    fn invalid_retry_error_is_recognized() {
        let bare = InvalidRetryError::new(-3);
        let decorated = Error::from(InvalidRetryError::new(-3));
        let wrapped = Wrapped(Box::new(InvalidRetryError::new(-3)));

        assert!(is_invalid_retry_error(&bare));
        assert!(is_invalid_retry_error(&decorated));
        assert!(is_invalid_retry_error(&wrapped));
        assert!(!is_invalid_retry_error(&StoreError::throughput_exceeded()));
        assert!(!is_invalid_retry_error(&std::io::Error::other("foo")));
    }

    #[test]
    fn invalid_retry_errors_compare_by_value() {
        assert_eq!(InvalidRetryError::new(-2), InvalidRetryError::new(-2));
        assert_ne!(InvalidRetryError::new(-2), InvalidRetryError::new(-5));
        assert_eq!(
            InvalidRetryError::new(-2).to_string(),
            "invalid value for retries: -2"
        );
    }

    #[test]
    fn throughput_exceeded_is_reported_once_in_a_chain() {
        use std::error::Error as _;

        let err = StoreError::from(ProvisionedThroughputExceeded::new("rate too high"));
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "provisioned throughput exceeded: rate too high");
    }

    #[test]
    fn messages_are_passed_through() {
        assert_eq!(
            StoreError::throughput_exceeded().to_string(),
            "provisioned throughput exceeded"
        );
        assert_eq!(
            Error::Store(ProvisionedThroughputExceeded::new("rate too high").into()).to_string(),
            "provisioned throughput exceeded: rate too high"
        );
    }
}
