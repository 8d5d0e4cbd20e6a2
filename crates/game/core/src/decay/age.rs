use crate::snapshot::EpochMs;

const DAY_MS: i64 = 86_400_000;

/// Local midnights in `(from, to]` for a fixed UTC offset.
pub fn midnights_between(from: EpochMs, to: EpochMs, utc_offset_minutes: i32) -> u32 {
    if to <= from {
        return 0;
    }
    let offset = i64::from(utc_offset_minutes) * 60_000;
    let days = (to + offset).div_euclid(DAY_MS) - (from + offset).div_euclid(DAY_MS);
    u32::try_from(days).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600_000;

    #[test]
    fn counts_every_midnight_of_a_long_absence() {
        // 23:00 UTC day 0 -> 01:00 UTC day 4 crosses four midnights.
        assert_eq!(midnights_between(23 * HOUR, 4 * DAY_MS + HOUR, 0), 4);
    }

    #[test]
    fn same_local_day_counts_nothing() {
        assert_eq!(midnights_between(HOUR, 23 * HOUR, 0), 0);
        assert_eq!(midnights_between(5 * HOUR, 5 * HOUR, 0), 0);
    }

    #[test]
    fn offset_shifts_the_boundary() {
        // 14:00 -> 16:00 UTC crosses local midnight at UTC+9.
        assert_eq!(midnights_between(14 * HOUR, 16 * HOUR, 9 * 60), 1);
        assert_eq!(midnights_between(14 * HOUR, 16 * HOUR, 0), 0);
        // Negative offsets work across the epoch.
        assert_eq!(midnights_between(-2 * HOUR, 2 * HOUR, -5 * 60), 0);
        assert_eq!(midnights_between(4 * HOUR, 6 * HOUR, -5 * 60), 1);
    }

    #[test]
    fn landing_on_midnight_counts() {
        assert_eq!(midnights_between(DAY_MS - 1, DAY_MS, 0), 1);
        assert_eq!(midnights_between(DAY_MS, DAY_MS + 1, 0), 0);
    }
}
