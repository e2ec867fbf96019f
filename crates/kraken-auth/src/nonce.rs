//! Nonce generation for private requests
//!
//! Kraken rejects any private call whose nonce is not strictly greater than
//! the last one it saw for the same API key.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of nonces for signed requests
pub trait NonceSource: Send + Sync + Debug {
    /// Produce the nonce for the next request
    fn next_nonce(&self) -> u64;
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Wall-clock millisecond nonce
///
/// Two requests issued within the same millisecond get the same nonce and
/// the later one will be rejected by the server. Use [`IncreasingNonce`] when
/// calls may be issued that quickly.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClockNonce;

impl NonceSource for SystemClockNonce {
    fn next_nonce(&self) -> u64 {
        unix_millis()
    }
}

/// Millisecond nonce that never repeats or goes backwards
///
/// Returns `max(now_ms, last + 1)`. Safe to share between threads.
#[derive(Debug, Default)]
pub struct IncreasingNonce {
    last: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce source
    pub fn new() -> Self {
        Self::default()
    }

    /// Last nonce handed out (0 if none yet)
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::SeqCst)
    }
}

impl NonceSource for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = unix_millis();
        let prev = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(prev.saturating_add(1))
    }
}
