//! Failed-login tracking with temporary lockout.

use std::sync::Arc;

use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};
use crate::config::GuardConfig;

const MS_PER_MINUTE: u64 = 60_000;

/// Per-identifier failure state.
#[derive(Debug, Clone)]
struct AttemptRecord {
    failures: u32,
    last_failure_at_ms: u64,
}

/// Counts consecutive failed login attempts per identifier and rejects
/// further attempts once too many pile up, until a block window has elapsed
/// since the most recent failure.
///
/// The identifier is any stable, caller-normalized key (typically a
/// lower-cased email or username). The guard does no normalization and no
/// validation; the empty string is an ordinary key.
///
/// Expected call pattern from an authentication flow:
///
/// 1. Call [`is_blocked`] first. If `true`, reject the attempt without
///    checking credentials; [`remaining_block_minutes`] gives a wait time
///    suitable for a user-facing message.
/// 2. Otherwise verify credentials, then call exactly one of [`reset`]
///    (success) or [`increment`] (failure).
///
/// A failure recorded while an identifier is already over threshold refreshes
/// its failure timestamp, restarting the block window. State is held in
/// memory only; a restart clears all counters.
///
/// All methods take `&self` and are safe to call from concurrent request
/// handlers. Construct the guard once at startup and share it behind an
/// [`Arc`].
///
/// [`is_blocked`]: LoginAttemptGuard::is_blocked
/// [`remaining_block_minutes`]: LoginAttemptGuard::remaining_block_minutes
/// [`reset`]: LoginAttemptGuard::reset
/// [`increment`]: LoginAttemptGuard::increment
pub struct LoginAttemptGuard {
    records: DashMap<String, AttemptRecord>,
    max_retries: u32,
    block_duration_ms: u64,
    clock: Arc<dyn Clock>,
}

impl LoginAttemptGuard {
    /// Creates a guard reading time from the system clock.
    ///
    /// Zero config values are clamped to 1; use [`GuardConfig::validate`] to
    /// reject them at config-load time instead.
    pub fn new(config: GuardConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a guard with an explicit time source.
    ///
    /// Tests pass a [`ManualClock`] to step time deterministically.
    ///
    /// [`ManualClock`]: crate::clock::ManualClock
    pub fn with_clock(config: GuardConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: DashMap::new(),
            max_retries: config.max_retries.max(1),
            block_duration_ms: config.block_duration_ms.max(1),
            clock,
        }
    }

    /// Returns `true` if `identifier` is currently locked out.
    ///
    /// An over-threshold record whose block window has elapsed is removed
    /// here, as a side effect of the query; there is no background sweep.
    pub fn is_blocked(&self, identifier: &str) -> bool {
        let Some(record) = self.records.get(identifier) else {
            return false;
        };
        if record.failures < self.max_retries {
            return false;
        }

        let now = self.clock.now_ms();
        if now.saturating_sub(record.last_failure_at_ms) < self.block_duration_ms {
            return true;
        }

        // Lockout expired. The read guard must be released before removal,
        // and the predicate re-checks under the shard lock so a concurrent
        // increment that refreshed the timestamp is not clobbered.
        drop(record);
        let removed = self.records.remove_if(identifier, |_, r| {
            r.failures >= self.max_retries
                && now.saturating_sub(r.last_failure_at_ms) >= self.block_duration_ms
        });
        if removed.is_some() {
            tracing::debug!("Lockout expired: identifier={identifier}");
        }
        false
    }

    /// Records a failed attempt for `identifier`.
    ///
    /// Creates the record on first failure; always stamps it with the
    /// current time, so failures recorded while already over threshold
    /// restart the block window.
    pub fn increment(&self, identifier: &str) {
        let now = self.clock.now_ms();
        let mut record = self
            .records
            .entry(identifier.to_string())
            .or_insert(AttemptRecord {
                failures: 0,
                last_failure_at_ms: now,
            });
        record.failures += 1;
        record.last_failure_at_ms = now;

        if record.failures == self.max_retries {
            tracing::warn!(
                "Locked out after too many failed attempts: identifier={identifier}, failures={}",
                record.failures
            );
        } else {
            tracing::debug!(
                "Failed attempt recorded: identifier={identifier}, failures={}",
                record.failures
            );
        }
    }

    /// Clears all failure state for `identifier`. No-op if none exists.
    pub fn reset(&self, identifier: &str) {
        if self.records.remove(identifier).is_some() {
            tracing::debug!("Failed attempts cleared: identifier={identifier}");
        }
    }

    /// Remaining lockout time for `identifier`, rounded up to whole minutes.
    ///
    /// Returns 0 when the identifier is not locked out. Rounding up means a
    /// blocked identifier never sees a zero-minute wait. Unlike
    /// [`is_blocked`], this is a pure read: an expired record is reported as
    /// 0 but left in place for the next [`is_blocked`] call to clean up.
    ///
    /// [`is_blocked`]: LoginAttemptGuard::is_blocked
    pub fn remaining_block_minutes(&self, identifier: &str) -> u64 {
        let Some(record) = self.records.get(identifier) else {
            return 0;
        };
        if record.failures < self.max_retries {
            return 0;
        }

        let elapsed = self.clock.now_ms().saturating_sub(record.last_failure_at_ms);
        self.block_duration_ms
            .saturating_sub(elapsed)
            .div_ceil(MS_PER_MINUTE)
    }

    /// Removes every record whose lockout has expired.
    ///
    /// Applies the same predicate [`is_blocked`] applies lazily, so calling
    /// this never changes blocking decisions. Records still under threshold
    /// are kept regardless of age (only a success clears them). Intended for
    /// a periodic cleanup task in the embedding application.
    ///
    /// [`is_blocked`]: LoginAttemptGuard::is_blocked
    pub fn purge_expired(&self) {
        let now = self.clock.now_ms();
        self.records.retain(|_, record| {
            record.failures < self.max_retries
                || now.saturating_sub(record.last_failure_at_ms) < self.block_duration_ms
        });
    }
}
