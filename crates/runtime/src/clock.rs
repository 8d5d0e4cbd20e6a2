//! Clock port. The engine never reads time itself; the service asks a
//! [`Clock`] once per call and hands the value down.

use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};

use chrono::{Local, TimeZone, Utc};
use vpet_core::EpochMs;

pub trait Clock: Send + Sync {
    /// Current wall-clock time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> EpochMs;

    /// Local UTC offset in minutes at `at`, used for midnight detection.
    fn utc_offset_minutes(&self, at: EpochMs) -> i32;
}

/// Wall clock. The offset follows the host time zone unless pinned.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock {
    fixed_offset_minutes: Option<i32>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(minutes: i32) -> Self {
        Self {
            fixed_offset_minutes: Some(minutes),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> EpochMs {
        Utc::now().timestamp_millis()
    }

    fn utc_offset_minutes(&self, at: EpochMs) -> i32 {
        if let Some(minutes) = self.fixed_offset_minutes {
            return minutes;
        }
        Local
            .timestamp_millis_opt(at)
            .single()
            .map_or(0, |local| local.offset().local_minus_utc() / 60)
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
    offset_minutes: AtomicI32,
}

impl FixedClock {
    pub fn new(now: EpochMs) -> Self {
        Self {
            now: AtomicI64::new(now),
            offset_minutes: AtomicI32::new(0),
        }
    }

    pub fn set(&self, now: EpochMs) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set_offset(&self, minutes: i32) {
        self.offset_minutes.store(minutes, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> EpochMs {
        self.now.load(Ordering::SeqCst)
    }

    fn utc_offset_minutes(&self, _at: EpochMs) -> i32 {
        self.offset_minutes.load(Ordering::SeqCst)
    }
}
