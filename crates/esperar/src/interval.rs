//! Poll interval and timeout values.
//!
//! An [`Interval`] is an immutable amount-plus-unit pair used wherever a
//! poll interval or timeout is configured. Comparison, equality, and
//! hashing go through the canonical nanosecond form, so one second equals
//! one thousand milliseconds.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::Duration;

// =============================================================================
// TIME UNIT
// =============================================================================

/// Time units for interval construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Nanoseconds
    Nanos,
    /// Microseconds
    Micros,
    /// Milliseconds
    Millis,
    /// Seconds
    Seconds,
    /// Minutes
    Minutes,
    /// Hours
    Hours,
}

impl TimeUnit {
    /// Nanoseconds contained in one of this unit
    #[must_use]
    pub const fn nanos_per_unit(&self) -> u128 {
        match self {
            Self::Nanos => 1,
            Self::Micros => 1_000,
            Self::Millis => 1_000_000,
            Self::Seconds => 1_000_000_000,
            Self::Minutes => 60_000_000_000,
            Self::Hours => 3_600_000_000_000,
        }
    }

    /// Short suffix used in messages and logs
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Nanos => "ns",
            Self::Micros => "us",
            Self::Millis => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "h",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

// =============================================================================
// INTERVAL
// =============================================================================

/// An immutable amount-plus-unit pair for poll intervals and timeouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Interval {
    amount: u64,
    unit: TimeUnit,
}

impl Interval {
    /// Fifty milliseconds
    pub const FIFTY_MILLISECONDS: Self = Self::of(50, TimeUnit::Millis);
    /// One hundred milliseconds
    pub const ONE_HUNDRED_MILLISECONDS: Self = Self::of(100, TimeUnit::Millis);
    /// Two hundred milliseconds
    pub const TWO_HUNDRED_MILLISECONDS: Self = Self::of(200, TimeUnit::Millis);
    /// Five hundred milliseconds
    pub const FIVE_HUNDRED_MILLISECONDS: Self = Self::of(500, TimeUnit::Millis);
    /// One second
    pub const ONE_SECOND: Self = Self::of(1, TimeUnit::Seconds);
    /// Two seconds
    pub const TWO_SECONDS: Self = Self::of(2, TimeUnit::Seconds);
    /// Five seconds
    pub const FIVE_SECONDS: Self = Self::of(5, TimeUnit::Seconds);
    /// Ten seconds
    pub const TEN_SECONDS: Self = Self::of(10, TimeUnit::Seconds);
    /// One minute
    pub const ONE_MINUTE: Self = Self::of(1, TimeUnit::Minutes);
    /// A practically unbounded timeout
    pub const FOREVER: Self = Self::of(u64::MAX, TimeUnit::Seconds);

    /// Create an interval from an amount and a unit
    #[must_use]
    pub const fn of(amount: u64, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    /// The raw amount
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// The time unit
    #[must_use]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Whether this interval represents an unbounded wait
    #[must_use]
    pub const fn is_forever(&self) -> bool {
        self.amount == u64::MAX
    }

    /// Canonical nanosecond count used for comparison
    #[must_use]
    pub const fn as_nanos(&self) -> u128 {
        self.amount as u128 * self.unit.nanos_per_unit()
    }

    /// Convert to a std duration, saturating for unbounded intervals
    #[must_use]
    pub fn to_duration(&self) -> Duration {
        if self.is_forever() {
            return Duration::MAX;
        }
        let nanos = self.as_nanos();
        if nanos >= u128::from(u64::MAX) {
            Duration::MAX
        } else {
            Duration::from_nanos(nanos as u64)
        }
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.as_nanos() == other.as_nanos()
    }
}

impl Eq for Interval {}

impl Hash for Interval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_nanos().hash(state);
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_nanos().cmp(&other.as_nanos())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_forever() {
            write!(f, "forever")
        } else {
            write!(f, "{} {}", self.amount, self.unit.suffix())
        }
    }
}

impl From<(u64, TimeUnit)> for Interval {
    fn from((amount, unit): (u64, TimeUnit)) -> Self {
        Self::of(amount, unit)
    }
}

impl From<Duration> for Interval {
    fn from(duration: Duration) -> Self {
        let nanos = duration.as_nanos();
        if nanos >= u128::from(u64::MAX) {
            return Self::FOREVER;
        }
        let nanos = nanos as u64;
        // Whole-unit durations keep a readable unit
        if nanos % 1_000_000_000 == 0 {
            Self::of(nanos / 1_000_000_000, TimeUnit::Seconds)
        } else if nanos % 1_000_000 == 0 {
            Self::of(nanos / 1_000_000, TimeUnit::Millis)
        } else {
            Self::of(nanos, TimeUnit::Nanos)
        }
    }
}

impl From<Interval> for Duration {
    fn from(interval: Interval) -> Self {
        interval.to_duration()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod time_unit_tests {
        use super::*;

        #[test]
        fn test_nanos_per_unit() {
            assert_eq!(TimeUnit::Nanos.nanos_per_unit(), 1);
            assert_eq!(TimeUnit::Micros.nanos_per_unit(), 1_000);
            assert_eq!(TimeUnit::Millis.nanos_per_unit(), 1_000_000);
            assert_eq!(TimeUnit::Seconds.nanos_per_unit(), 1_000_000_000);
            assert_eq!(TimeUnit::Minutes.nanos_per_unit(), 60_000_000_000);
            assert_eq!(TimeUnit::Hours.nanos_per_unit(), 3_600_000_000_000);
        }

        #[test]
        fn test_suffixes() {
            assert_eq!(TimeUnit::Millis.suffix(), "ms");
            assert_eq!(TimeUnit::Seconds.suffix(), "s");
            assert_eq!(TimeUnit::Minutes.suffix(), "min");
        }

        #[test]
        fn test_display() {
            assert_eq!(format!("{}", TimeUnit::Millis), "ms");
            assert_eq!(format!("{}", TimeUnit::Hours), "h");
        }
    }

    mod interval_tests {
        use super::*;

        #[test]
        fn test_presets() {
            assert_eq!(Interval::ONE_HUNDRED_MILLISECONDS.amount(), 100);
            assert_eq!(Interval::ONE_HUNDRED_MILLISECONDS.unit(), TimeUnit::Millis);
            assert_eq!(Interval::ONE_SECOND.as_nanos(), 1_000_000_000);
            assert_eq!(Interval::ONE_MINUTE.as_nanos(), 60_000_000_000);
        }

        #[test]
        fn test_equality_across_units() {
            assert_eq!(
                Interval::of(1, TimeUnit::Seconds),
                Interval::of(1_000, TimeUnit::Millis)
            );
            assert_eq!(Interval::ONE_MINUTE, Interval::of(60, TimeUnit::Seconds));
            assert_ne!(Interval::ONE_SECOND, Interval::TWO_SECONDS);
        }

        #[test]
        fn test_ordering_across_units() {
            assert!(Interval::of(999, TimeUnit::Millis) < Interval::ONE_SECOND);
            assert!(Interval::of(2, TimeUnit::Minutes) > Interval::ONE_MINUTE);
        }

        #[test]
        fn test_hash_matches_equality() {
            use std::collections::HashSet;
            let mut set = HashSet::new();
            set.insert(Interval::ONE_SECOND);
            assert!(set.contains(&Interval::of(1_000, TimeUnit::Millis)));
        }

        #[test]
        fn test_forever() {
            assert!(Interval::FOREVER.is_forever());
            assert!(!Interval::ONE_SECOND.is_forever());
            assert_eq!(Interval::FOREVER.to_duration(), Duration::MAX);
        }

        #[test]
        fn test_to_duration() {
            assert_eq!(
                Interval::TWO_HUNDRED_MILLISECONDS.to_duration(),
                Duration::from_millis(200)
            );
            assert_eq!(Interval::ONE_SECOND.to_duration(), Duration::from_secs(1));
        }

        #[test]
        fn test_display() {
            assert_eq!(
                format!("{}", Interval::ONE_HUNDRED_MILLISECONDS),
                "100 ms"
            );
            assert_eq!(format!("{}", Interval::ONE_SECOND), "1 s");
            assert_eq!(format!("{}", Interval::FOREVER), "forever");
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_from_amount_and_unit() {
            let interval: Interval = (20, TimeUnit::Millis).into();
            assert_eq!(interval, Interval::of(20, TimeUnit::Millis));
        }

        #[test]
        fn test_from_duration_normalizes_unit() {
            let interval: Interval = Duration::from_millis(1_500).into();
            assert_eq!(interval.unit(), TimeUnit::Millis);
            assert_eq!(interval.amount(), 1_500);

            let interval: Interval = Duration::from_secs(3).into();
            assert_eq!(interval.unit(), TimeUnit::Seconds);
            assert_eq!(interval.amount(), 3);
        }

        #[test]
        fn test_into_duration() {
            let duration: Duration = Interval::FIFTY_MILLISECONDS.into();
            assert_eq!(duration, Duration::from_millis(50));
        }

        #[test]
        fn test_serde_round_trip() {
            let interval = Interval::of(250, TimeUnit::Millis);
            let json = serde_json::to_string(&interval).unwrap();
            let back: Interval = serde_json::from_str(&json).unwrap();
            assert_eq!(back, interval);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn canonical_nanos_scale_with_amount(amount in 0u64..1_000_000) {
                let interval = Interval::of(amount, TimeUnit::Millis);
                prop_assert_eq!(interval.as_nanos(), u128::from(amount) * 1_000_000);
            }

            #[test]
            fn whole_unit_conversions_agree(amount in 0u64..10_000) {
                prop_assert_eq!(
                    Interval::of(amount, TimeUnit::Seconds),
                    Interval::of(amount * 1_000, TimeUnit::Millis)
                );
                prop_assert_eq!(
                    Interval::of(amount, TimeUnit::Minutes),
                    Interval::of(amount * 60, TimeUnit::Seconds)
                );
            }

            #[test]
            fn std_durations_round_trip(ms in 0u64..1_000_000) {
                let duration = Duration::from_millis(ms);
                let interval: Interval = duration.into();
                prop_assert_eq!(interval.to_duration(), duration);
            }
        }
    }
}
