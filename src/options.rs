use std::time::Duration;

/// Configures how many throughput-exceeded rejections are retried and how
/// long to wait between attempts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt. `-1` retries without limit; any
    /// other negative value makes every call fail with an invalid retry error.
    pub retries: i64,
    /// Fixed delay before each retry.
    pub backoff: Duration,
}

/// How a [`RetryPolicy::retries`] value is interpreted by the retry loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryBudget {
    Unlimited,
    Limited(u64),
    Invalid(i64),
}

impl RetryPolicy {
    /// Raw `retries` value meaning "retry forever".
    pub const UNLIMITED: i64 = -1;

    pub fn new(retries: i64, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    pub fn unlimited(backoff: Duration) -> Self {
        Self::new(Self::UNLIMITED, backoff)
    }

    pub fn budget(&self) -> RetryBudget {
        match self.retries {
            Self::UNLIMITED => RetryBudget::Unlimited,
            n if n >= 0 => RetryBudget::Limited(n.unsigned_abs()),
            n => RetryBudget::Invalid(n),
        }
    }

    /// Reads a policy from the environment.
    ///
    /// Reads:
    /// - `DDB_RETRY_RETRIES` — retry count (`-1` for unlimited)
    /// - `DDB_RETRY_BACKOFF_MS` — backoff delay in milliseconds
    ///
    /// Unset variables keep their [`Default`] values. The retry count is not
    /// range-checked here; an invalid count surfaces on the first call.
    pub fn from_env() -> Result<Self, String> {
        Self::from_env_or(Self::default())
    }

    /// Like [`RetryPolicy::from_env`], but unset variables keep the values
    /// of `fallback`.
    pub fn from_env_or(fallback: Self) -> Result<Self, String> {
        Self::from_lookup(fallback, |name| std::env::var(name).ok())
    }

    fn from_lookup(
        fallback: Self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let mut policy = fallback;

        if let Some(raw) = lookup("DDB_RETRY_RETRIES") {
            policy.retries = raw
                .trim()
                .parse()
                .map_err(|_| format!("DDB_RETRY_RETRIES is not an integer: {raw:?}"))?;
        }
        if let Some(raw) = lookup("DDB_RETRY_BACKOFF_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .map_err(|_| format!("DDB_RETRY_BACKOFF_MS is not a millisecond count: {raw:?}"))?;
            policy.backoff = Duration::from_millis(millis);
        }

        Ok(policy)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 0,
            backoff: Duration::from_millis(100),
        }
    }
}

/// Per-call transport options handed to the underlying store untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CallOptions {
    /// Per-attempt timeout enforced by the store client, if it supports one.
    pub timeout: Option<Duration>,
    /// Endpoint override for this call.
    pub endpoint: Option<String>,
    /// Free-form label for request tracing.
    pub tag: Option<String>,
}

impl CallOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}
