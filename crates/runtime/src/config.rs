//! Runtime configuration structures and loaders.

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use vpet_core::{EpochMs, SpeciesId};

const HOUR_MS: i64 = 60 * 60 * 1_000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Configuration for a [`CreatureService`](crate::CreatureService) host.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Directory with `config.toml`, `species.ron` and `quests.ron`.
    pub data_dir: PathBuf,
    /// Directory holding one JSON file per creature.
    pub save_dir: PathBuf,
    /// Pins the local UTC offset; `None` follows the host time zone.
    pub utc_offset_minutes: Option<i32>,
    /// Species every new creature (and every reincarnation) starts as.
    pub egg_species: SpeciesId,
    pub sleep: SleepSchedule,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(vpet_content::BUNDLED_DATA_DIR),
            save_dir: default_save_dir(),
            utc_offset_minutes: None,
            egg_species: SpeciesId::new(Self::DEFAULT_EGG_SPECIES),
            sleep: SleepSchedule::default(),
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_EGG_SPECIES: &'static str = "Digitama";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `VPET_DATA_DIR` - Content directory (default: data bundled with `vpet-content`)
    /// - `VPET_SAVE_DIR` - Save directory (default: platform data dir)
    /// - `VPET_UTC_OFFSET_MINUTES` - Fixed local offset (default: host time zone)
    /// - `VPET_EGG_SPECIES` - Species id new creatures hatch from (default: Digitama)
    /// - `VPET_BEDTIME_HOUR` / `VPET_WAKE_HOUR` - Lights-out window (default: 20 / 8)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("VPET_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("VPET_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }

        config.utc_offset_minutes = read_env::<i32>("VPET_UTC_OFFSET_MINUTES")
            .map(|minutes| minutes.clamp(-14 * 60, 14 * 60));

        if let Ok(egg) = env::var("VPET_EGG_SPECIES") {
            config.egg_species = SpeciesId::new(egg);
        }

        if let Some(hour) = read_env::<u32>("VPET_BEDTIME_HOUR") {
            config.sleep.bedtime_hour = hour % 24;
        }
        if let Some(hour) = read_env::<u32>("VPET_WAKE_HOUR") {
            config.sleep.wake_hour = hour % 24;
        }

        config
    }
}

/// Local hours during which a creature sleeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SleepSchedule {
    pub bedtime_hour: u32,
    pub wake_hour: u32,
}

impl Default for SleepSchedule {
    fn default() -> Self {
        Self {
            bedtime_hour: 20,
            wake_hour: 8,
        }
    }
}

impl SleepSchedule {
    /// Whether `now` falls inside the sleep window in local time.
    /// Equal bedtime and wake hours disable sleep.
    pub fn is_asleep(&self, now: EpochMs, utc_offset_minutes: i32) -> bool {
        let local = now + i64::from(utc_offset_minutes) * 60_000;
        let hour = (local.rem_euclid(DAY_MS) / HOUR_MS) as u32;
        let (bed, wake) = (self.bedtime_hour, self.wake_hour);
        if bed < wake {
            (bed..wake).contains(&hour)
        } else if bed > wake {
            hour >= bed || hour < wake
        } else {
            false
        }
    }
}

fn default_save_dir() -> PathBuf {
    ProjectDirs::from("", "", "vpet")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from(".vpet/saves"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
