use tokio::time::Instant;

/// Delay requested by every `Loop` signal.
pub const LOOP_DELAY_MS: u64 = 50;

/// Millisecond time source for the tick loop.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Milliseconds since construction. Built on tokio's `Instant` so paused
/// runtimes (tests) advance it together with `sleep`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Absolute expiry of a wait. `None` waits forever.
///
/// **INVARIANT**: computed once at task start, never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline {
    expires_at: Option<u64>,
}

impl Deadline {
    pub fn never() -> Self {
        Self { expires_at: None }
    }

    /// Non-positive offsets disable the deadline.
    pub fn start(relative_ms: i64, now: u64) -> Self {
        if relative_ms <= 0 {
            return Self::never();
        }
        Self {
            expires_at: Some(now.saturating_add(relative_ms as u64)),
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        matches!(self.expires_at, Some(at) if now >= at)
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    pub fn is_set(&self) -> bool {
        self.expires_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_offset_never_expires() {
        for offset in [0, -1, -500] {
            let d = Deadline::start(offset, 1_000);
            assert!(!d.is_set());
            assert!(!d.is_expired(u64::MAX));
        }
    }

    #[test]
    fn expires_at_the_boundary() {
        let d = Deadline::start(100, 1_000);
        assert_eq!(d.expires_at(), Some(1_100));
        assert!(!d.is_expired(1_099));
        assert!(d.is_expired(1_100));
        assert!(d.is_expired(5_000));
    }

    #[test]
    fn offset_saturates_instead_of_wrapping() {
        let d = Deadline::start(i64::MAX, u64::MAX - 1);
        assert_eq!(d.expires_at(), Some(u64::MAX));
    }
}
