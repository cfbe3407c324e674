//! Command handler decorators
//!
//! Cross-cutting behaviour wrapped around a handler when `Messages` is built:
//! - `AuditLoggingDecorator`: logs the serialized command before delegating
//! - `DatabaseRetryDecorator`: re-runs the handler on transient database faults

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;

use super::commands::CommandHandler;
use crate::error::DomainError;

/// Logs every command it sees as JSON, then delegates unchanged
pub struct AuditLoggingDecorator<H> {
    inner: H,
}

impl<H> AuditLoggingDecorator<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for AuditLoggingDecorator<H>
where
    C: Serialize + Send + Sync,
    H: CommandHandler<C>,
{
    async fn handle(&self, command: &C) -> Result<(), DomainError> {
        tracing::info!(
            command = command_name::<C>(),
            payload = %audit_payload(command),
            "Command received"
        );

        self.inner.handle(command).await
    }
}

/// The command as a single line of JSON
fn audit_payload<C: Serialize>(command: &C) -> String {
    serde_json::to_string(command).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}

/// Short type name, e.g. `RegisterCommand`
fn command_name<C>() -> &'static str {
    let full = std::any::type_name::<C>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Attempt budget and backoff for `DatabaseRetryDecorator`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first call
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Exponential delay before retry number `attempt` (1-based), capped
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_backoff
            .saturating_mul(1u32 << exponent)
            .min(self.max_backoff)
    }

    /// Base delay plus up to 25% random jitter
    fn jittered_delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay(attempt);
        let max_extra = u64::try_from(base.as_millis() / 4).unwrap_or(u64::MAX);
        let extra = rand::thread_rng().gen_range(0..=max_extra);
        base.saturating_add(Duration::from_millis(extra))
    }
}

/// Retries the wrapped handler when it fails with a transient database error.
///
/// Each attempt runs the whole handler, so it opens a fresh unit of work.
pub struct DatabaseRetryDecorator<H> {
    inner: H,
    policy: RetryPolicy,
}

impl<H> DatabaseRetryDecorator<H> {
    pub fn new(inner: H, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<C, H> CommandHandler<C> for DatabaseRetryDecorator<H>
where
    C: Send + Sync,
    H: CommandHandler<C>,
{
    async fn handle(&self, command: &C) -> Result<(), DomainError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.inner.handle(command).await {
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = self.policy.jittered_delay(attempt);
                    tracing::warn!(
                        command = command_name::<C>(),
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient database failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}
