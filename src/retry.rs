//! Retries around a [`ChatProvider`] for transient failures.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, Tool};
use crate::error::LLMError;

/// How often and how patiently a model call is retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Attempts including the first; zero is treated as one.
    pub max_attempts: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Shorten each delay by a random amount of up to half.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 200,
            max_delay_ms: 2_000,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (0-based): doubling from the base,
    /// capped at `max_delay_ms`.
    pub fn delay(&self, retry: usize) -> Duration {
        let doubled = self
            .base_delay_ms
            .saturating_mul(1u64 << retry.min(16))
            .min(self.max_delay_ms);
        let delay = if self.jitter && doubled > 1 {
            let spread = doubled / 2;
            doubled - (Uuid::new_v4().as_u128() % u128::from(spread + 1)) as u64
        } else {
            doubled
        };
        Duration::from_millis(delay)
    }
}

/// Provider wrapper that resends a request while it fails transiently.
pub struct RetryingProvider {
    inner: Arc<dyn ChatProvider>,
    policy: RetryPolicy,
}

impl RetryingProvider {
    pub fn new(inner: Arc<dyn ChatProvider>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }
}

#[async_trait]
impl ChatProvider for RetryingProvider {
    async fn chat_with_tools(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[Tool]>,
    ) -> Result<Box<dyn ChatResponse>, LLMError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut last_error = None;
        for attempt in 1..=attempts {
            match self.inner.chat_with_tools(messages, tools).await {
                Ok(response) => return Ok(response),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) => {
                    log::warn!("model call attempt {attempt}/{attempts} failed: {err}");
                    last_error = Some(err);
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.policy.delay(attempt - 1)).await;
            }
        }
        Err(LLMError::RetryExceeded {
            attempts,
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rstest::rstest;

    use super::*;
    use crate::ToolCall;

    #[derive(Debug)]
    struct Text(&'static str);

    impl ChatResponse for Text {
        fn text(&self) -> Option<String> {
            Some(self.0.to_string())
        }

        fn tool_calls(&self) -> Option<Vec<ToolCall>> {
            None
        }
    }

    /// Fails `failures` times with `error`, then answers "ok".
    struct Flaky {
        failures: usize,
        calls: AtomicUsize,
        error: fn() -> LLMError,
    }

    #[async_trait]
    impl ChatProvider for Flaky {
        async fn chat_with_tools(
            &self,
            _messages: &[ChatMessage],
            _tools: Option<&[Tool]>,
        ) -> Result<Box<dyn ChatResponse>, LLMError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                Err((self.error)())
            } else {
                Ok(Box::new(Text("ok")))
            }
        }
    }

    fn retrying(
        failures: usize,
        max_attempts: usize,
        error: fn() -> LLMError,
    ) -> (RetryingProvider, Arc<Flaky>) {
        let flaky = Arc::new(Flaky {
            failures,
            calls: AtomicUsize::new(0),
            error,
        });
        let policy = RetryPolicy {
            max_attempts,
            base_delay_ms: 1,
            max_delay_ms: 2,
            jitter: false,
        };
        let inner: Arc<dyn ChatProvider> = flaky.clone();
        (RetryingProvider::new(inner, policy), flaky)
    }

    #[tokio::test]
    async fn recovers_from_transient_failures() {
        let (provider, flaky) = retrying(2, 3, || LLMError::Http("503".into()));
        let response = provider.chat(&[]).await.expect("third attempt succeeds");
        assert_eq!(response.text().as_deref(), Some("ok"));
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let (provider, flaky) = retrying(10, 2, || LLMError::Provider("overloaded".into()));
        let err = provider.chat(&[]).await.unwrap_err();
        assert!(matches!(err, LLMError::RetryExceeded { attempts: 2, .. }));
        assert!(err.to_string().contains("overloaded"));
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn permanent_errors_pass_through() {
        let (provider, flaky) = retrying(10, 5, || LLMError::Auth("bad key".into()));
        let err = provider.chat(&[]).await.unwrap_err();
        assert!(matches!(err, LLMError::Auth(_)));
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_attempts_still_calls_once() {
        let (provider, flaky) = retrying(0, 0, || LLMError::Http("unused".into()));
        assert!(provider.chat(&[]).await.is_ok());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[case(0, 100)]
    #[case(1, 200)]
    #[case(3, 800)]
    #[case(10, 1_000)]
    fn delay_doubles_up_to_the_cap(#[case] retry: usize, #[case] expected_ms: u64) {
        let policy = RetryPolicy {
            max_attempts: 5,
            base_delay_ms: 100,
            max_delay_ms: 1_000,
            jitter: false,
        };
        assert_eq!(policy.delay(retry), Duration::from_millis(expected_ms));
    }

    #[test]
    fn jitter_stays_within_half_the_delay() {
        let policy = RetryPolicy {
            base_delay_ms: 400,
            ..RetryPolicy::default()
        };
        for _ in 0..50 {
            let delay = policy.delay(0);
            assert!(delay >= Duration::from_millis(200) && delay <= Duration::from_millis(400));
        }
    }
}
