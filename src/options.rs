use std::time::Duration;

/// Delay between two consecutive attempts of the same lookup.
pub const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Configures request timeout and retry budget.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds, applied to every remote call.
    pub timeout_ms: u64,
    /// Total number of attempts per lookup, including the first one.
    ///
    /// `0` behaves like `1`.
    pub max_attempts: usize,
}

impl ClientOptions {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn attempt_budget(&self) -> usize {
        self.max_attempts.max(1)
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            max_attempts: 3,
        }
    }
}
