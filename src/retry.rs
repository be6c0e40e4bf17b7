//! # Bounded Exponential Retry
//!
//! Wraps a single remote call in a loop of at most `max_retries + 1`
//! attempts. After failed attempt `i` (0-indexed) the executor sleeps
//! `backoff_factor^i` seconds before trying again, so a factor of 2 waits
//! 1, 2, 4, 8, ... seconds.
//!
//! What counts as a failure worth retrying is decided by the caller through
//! a classification function; the executor itself never inspects errors.

use std::fmt::Display;
use std::time::Duration;

use crate::error::UsageError;

/// Number of retries and exponential base used by [`Retrier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. (5 = 6 attempts in total)
    pub max_retries: u32,
    /// Base of the wait-time function, in seconds. Always >= 1.
    pub backoff_factor: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            backoff_factor: 2,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_factor: u64) -> Result<Self, UsageError> {
        if backoff_factor == 0 {
            return Err(UsageError::ZeroBackoffFactor);
        }
        Ok(Self {
            max_retries,
            backoff_factor,
        })
    }

    /// Total number of attempts the executor may make.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait after failed attempt `attempt` (0-indexed): `backoff_factor^attempt` seconds.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        Duration::from_secs(self.backoff_factor.saturating_pow(attempt))
    }
}

/// How a failed attempt should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The requested end state already holds; stop and report success.
    AlreadySatisfied,
    /// Transient; try again while the budget lasts.
    Retryable,
    /// Give up immediately.
    Fatal,
}

/// Successful result of [`Retrier::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The call itself succeeded.
    Completed(T),
    /// The call failed with an error classified as
    /// [`Classification::AlreadySatisfied`].
    AlreadySatisfied,
}

/// Suspends the current thread between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocking [`Sleeper`] backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// The retrying action executor.
#[derive(Debug, Clone)]
pub struct Retrier<S = ThreadSleeper> {
    policy: RetryPolicy,
    sleeper: S,
}

impl Retrier<ThreadSleeper> {
    pub fn new(policy: RetryPolicy) -> Self {
        Self::with_sleeper(policy, ThreadSleeper)
    }
}

impl<S: Sleeper> Retrier<S> {
    pub fn with_sleeper(policy: RetryPolicy, sleeper: S) -> Self {
        Self { policy, sleeper }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `call` until it succeeds, its error is classified as
    /// already-satisfied or fatal, or the attempt budget is spent.
    ///
    /// `waiting_for` describes the transient condition in the per-attempt
    /// log line, e.g. `"Instance i-0abc not yet ready"`.
    ///
    /// The error of the last attempt is returned when a retryable failure
    /// exhausts the budget.
    pub fn run<T, E, F, C>(&self, waiting_for: &str, mut call: F, classify: C) -> Result<Outcome<T>, E>
    where
        E: Display,
        F: FnMut() -> Result<T, E>,
        C: Fn(&E) -> Classification,
    {
        let total = self.policy.total_attempts();
        let mut attempt = 0u32;
        loop {
            let number = attempt_number(attempt);
            tracing::info!("Attempt {} of {}", number, total);
            let err = match call() {
                Ok(value) => return Ok(Outcome::Completed(value)),
                Err(err) => err,
            };
            match classify(&err) {
                Classification::AlreadySatisfied => return Ok(Outcome::AlreadySatisfied),
                Classification::Fatal => return Err(err),
                Classification::Retryable if attempt >= self.policy.max_retries => {
                    tracing::warn!("Attempt {} of {}: giving up: {}", number, total, err);
                    return Err(err);
                }
                Classification::Retryable => {
                    let wait = self.policy.delay_after(attempt);
                    tracing::info!(
                        "Attempt {} of {}: {}, waiting {} seconds",
                        number,
                        total,
                        waiting_for,
                        wait.as_secs()
                    );
                    tracing::debug!("retryable error: {}", err);
                    self.sleeper.sleep(wait);
                }
            }
            attempt = attempt.saturating_add(1);
        }
    }
}

/// 1-based attempt number for log lines.
fn attempt_number(attempt: u32) -> u32 {
    attempt.saturating_add(1)
}
