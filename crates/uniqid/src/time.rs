use crate::{Error, Result};
use chrono::{Datelike, Local, TimeZone, Timelike};
use std::time::{SystemTime, UNIX_EPOCH};

/// A trait for time sources that return the current wall-clock time.
///
/// This abstraction allows you to plug in the system clock or a mocked time
/// source in tests. The unit is **seconds** since the Unix epoch.
///
/// # Example
///
/// ```
/// use uniqid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_seconds(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_seconds(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in seconds since the Unix epoch.
    fn current_seconds(&self) -> u64;
}

/// The system wall clock.
///
/// A clock set before 1970 reads as `0`.
#[derive(Default, Clone, Copy, Debug)]
pub struct WallClock;

impl TimeSource for WallClock {
    fn current_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs())
    }
}

/// The calendar fields a [`crate::UniqueId`] carries, in local time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CalendarTime {
    /// Full year, e.g. `2024`.
    pub year: u16,
    /// 1-12.
    pub month: u8,
    /// 1-31.
    pub day: u8,
    /// 0-23.
    pub hour: u8,
}

impl CalendarTime {
    /// Resolves Unix epoch seconds to local calendar fields.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTimestamp`] if `seconds` falls outside the range the
    /// local time zone can represent.
    pub fn from_epoch_seconds(seconds: u64) -> Result<Self> {
        let invalid = || Error::InvalidTimestamp { seconds };
        let secs = i64::try_from(seconds).map_err(|_| invalid())?;
        let local = Local.timestamp_opt(secs, 0).earliest().ok_or_else(invalid)?;
        let year = u16::try_from(local.year()).map_err(|_| invalid())?;

        // chrono guarantees month in 1..=12, day in 1..=31, hour in 0..=23.
        Ok(Self {
            year,
            month: local.month() as u8,
            day: local.day() as u8,
            hour: local.hour() as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(WallClock.current_seconds() > 1_577_836_800);
    }

    #[test]
    fn resolves_against_local_zone() {
        // 2024-03-15T09:00:00Z
        let seconds = 1_710_493_200;
        let expected = Local.timestamp_opt(seconds as i64, 0).unwrap();
        let cal = CalendarTime::from_epoch_seconds(seconds).unwrap();
        assert_eq!(i32::from(cal.year), expected.year());
        assert_eq!(u32::from(cal.month), expected.month());
        assert_eq!(u32::from(cal.day), expected.day());
        assert_eq!(u32::from(cal.hour), expected.hour());
    }

    #[test]
    fn rejects_unrepresentable_seconds() {
        assert!(matches!(
            CalendarTime::from_epoch_seconds(u64::MAX),
            Err(Error::InvalidTimestamp { seconds: u64::MAX })
        ));
    }
}
