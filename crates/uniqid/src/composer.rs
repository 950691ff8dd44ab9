use crate::{CalendarTime, Result, TimeSource, UniqueId, WallClock};

/// Builds [`UniqueId`]s locally from an agent-assigned label and sequence.
///
/// Calendar fields come from the local time zone. A timestamp of `0` means
/// "now" according to the composer's [`TimeSource`].
#[derive(Clone, Debug, Default)]
pub struct IdComposer<C = WallClock>
where
    C: TimeSource,
{
    clock: C,
}

impl<C> IdComposer<C>
where
    C: TimeSource,
{
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Resolves `seconds` (or the clock, when `0`) to local calendar fields.
    ///
    /// # Errors
    ///
    /// [`crate::Error::InvalidTimestamp`] for seconds outside the local
    /// calendar's range.
    pub fn resolve(&self, seconds: u64) -> Result<CalendarTime> {
        let seconds = if seconds == 0 {
            self.clock.current_seconds()
        } else {
            seconds
        };
        CalendarTime::from_epoch_seconds(seconds)
    }

    /// Packs `user`, `label`, the calendar hour of `seconds` and `sequence`.
    ///
    /// # Errors
    ///
    /// See [`Self::resolve`].
    pub fn compose(&self, user: u8, label: u8, seconds: u64, sequence: u32) -> Result<UniqueId> {
        let at = self.resolve(seconds)?;
        Ok(UniqueId::from_calendar(user, label, at, sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTime(u64);

    impl TimeSource for FixedTime {
        fn current_seconds(&self) -> u64 {
            self.0
        }
    }

    // 2024-03-15T09:00:00Z
    const MARCH_15_2024: u64 = 1_710_493_200;

    #[test]
    fn zero_seconds_reads_the_clock() {
        let composer = IdComposer::new(FixedTime(MARCH_15_2024));
        let now = composer.compose(7, 42, 0, 123_456).unwrap();
        let explicit = composer.compose(7, 42, MARCH_15_2024, 123_456).unwrap();
        assert_eq!(now, explicit);
    }

    #[test]
    fn explicit_seconds_ignore_the_clock() {
        let composer = IdComposer::new(FixedTime(1));
        let id = composer.compose(1, 2, MARCH_15_2024, 3).unwrap();
        let at = CalendarTime::from_epoch_seconds(MARCH_15_2024).unwrap();
        assert_eq!(id.calendar(), at);
        assert_eq!((id.user(), id.label(), id.sequence()), (1, 2, 3));
    }

    #[test]
    fn full_width_sequence_is_masked() {
        let composer = IdComposer::new(FixedTime(MARCH_15_2024));
        let id = composer.compose(0, 0, 0, u32::MAX).unwrap();
        assert_eq!(id.sequence(), UniqueId::max_sequence());
    }

    #[test]
    fn wall_clock_composer_lands_in_this_century() {
        let id = IdComposer::<WallClock>::default().compose(0, 0, 0, 0).unwrap();
        assert!(id.year() >= 2024);
    }
}
