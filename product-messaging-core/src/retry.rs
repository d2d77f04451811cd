// product-messaging-core/src/retry.rs

/// What a bus does with a delivery whose handler returned `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Dead-letter into `<queue>.retry`; it comes back after the retry TTL.
    Retry,
    /// Park in `<queue>.dlq` and stop redelivering.
    Park,
}

/// Bounded redelivery shared by every [`crate::MessageBus`] implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// `death_count` is how many times the delivery was already rejected
    /// from its queue before this attempt.
    pub fn on_failure(&self, death_count: u32) -> FailureAction {
        if death_count >= self.max_retries {
            FailureAction::Park
        } else {
            FailureAction::Retry
        }
    }
}
