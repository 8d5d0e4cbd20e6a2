//! Closed-form cycle arithmetic shared by every decaying meter.

use crate::snapshot::EpochMs;

/// Result of running one countdown over an elapsed span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CycleRun {
    /// Countdown before the span started.
    pub start: i64,
    pub cycle: i64,
    /// Number of times the countdown expired.
    pub ticks: u64,
    /// Countdown after the span, in `1..=cycle` (or unchanged if disabled).
    pub remaining: i64,
}

impl CycleRun {
    /// Runs `countdown` down by `elapsed` seconds, refilling by `cycle` each
    /// time it reaches zero. A non-positive `cycle` disables the meter.
    pub fn over(countdown: i64, cycle: i64, elapsed: i64) -> Self {
        if cycle <= 0 {
            return Self {
                start: countdown,
                cycle,
                ticks: 0,
                remaining: countdown,
            };
        }

        let after = countdown - elapsed;
        if after > 0 {
            return Self {
                start: countdown,
                cycle,
                ticks: 0,
                remaining: after,
            };
        }

        let ticks = 1 + (-after) / cycle;
        Self {
            start: countdown,
            cycle,
            ticks: ticks as u64,
            remaining: after + ticks * cycle,
        }
    }

    /// Instant of the `n`-th expiry (1-based), measured from `origin`.
    pub fn tick_instant(&self, origin: EpochMs, n: u64) -> EpochMs {
        debug_assert!(n >= 1 && n <= self.ticks);
        let offset_secs = self.start + (n as i64 - 1) * self.cycle;
        origin + offset_secs * 1_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Literal countdown loop used as the reference model.
    fn reference(countdown: i64, cycle: i64, elapsed: i64) -> (u64, i64) {
        let mut countdown = countdown - elapsed;
        let mut ticks = 0;
        while countdown <= 0 {
            ticks += 1;
            countdown += cycle;
        }
        (ticks, countdown)
    }

    #[test]
    fn matches_reference_loop() {
        for cycle in [1, 7, 180, 3_600] {
            for start in [1, cycle / 2 + 1, cycle] {
                for elapsed in [0, 1, start - 1, start, start + 1, cycle * 3, 86_400 * 3 + 17] {
                    let run = CycleRun::over(start, cycle, elapsed);
                    assert_eq!(
                        (run.ticks, run.remaining),
                        reference(start, cycle, elapsed),
                        "cycle={cycle} start={start} elapsed={elapsed}"
                    );
                }
            }
        }
    }

    #[test]
    fn disabled_cycle_never_ticks() {
        let run = CycleRun::over(0, 0, 1_000_000);
        assert_eq!(run.ticks, 0);
        assert_eq!(run.remaining, 0);
    }

    #[test]
    fn tick_instants_follow_the_countdown() {
        let run = CycleRun::over(30, 180, 400);
        assert_eq!(run.ticks, 3);
        assert_eq!(run.tick_instant(10_000, 1), 10_000 + 30_000);
        assert_eq!(run.tick_instant(10_000, 3), 10_000 + 390_000);
    }
}
