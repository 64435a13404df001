//! iCalendar DURATION value type (RFC 5545 §3.3.6).

use std::fmt;

/// Duration value (RFC 5545 §3.3.6).
///
/// Represents a nominal duration of time. iCalendar durations can be either:
/// - Week-based: `P1W` (1 week)
/// - Day/time-based: `P1DT2H30M` (1 day, 2 hours, 30 minutes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    /// Whether this duration is negative.
    pub negative: bool,
    /// Number of weeks (mutually exclusive with days/hours/minutes/seconds).
    pub weeks: u32,
    /// Number of days.
    pub days: u32,
    /// Number of hours.
    pub hours: u32,
    /// Number of minutes.
    pub minutes: u32,
    /// Number of seconds.
    pub seconds: u32,
}

impl Duration {
    /// Creates a new zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self::builder().build()
    }

    /// Creates a duration from hours.
    #[must_use]
    pub const fn hours(hours: u32) -> Self {
        Self::builder().hours(hours).build()
    }

    /// Creates a duration from minutes.
    #[must_use]
    pub const fn minutes(minutes: u32) -> Self {
        Self::builder().minutes(minutes).build()
    }

    /// Creates a new duration builder.
    #[must_use]
    pub const fn builder() -> DurationBuilder {
        DurationBuilder::new()
    }

    /// Negates this duration.
    #[must_use]
    pub const fn negate(mut self) -> Self {
        self.negative = !self.negative;
        self
    }

    /// ## Summary
    /// Converts to an exact `chrono::TimeDelta`, treating days as 24 hours.
    #[must_use]
    pub fn to_chrono(&self) -> chrono::TimeDelta {
        let total = chrono::TimeDelta::weeks(i64::from(self.weeks))
            + chrono::TimeDelta::days(i64::from(self.days))
            + chrono::TimeDelta::hours(i64::from(self.hours))
            + chrono::TimeDelta::minutes(i64::from(self.minutes))
            + chrono::TimeDelta::seconds(i64::from(self.seconds));

        if self.negative { -total } else { total }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.weeks > 0 {
            return write!(f, "{}W", self.weeks);
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 {
                write!(f, "{}S", self.seconds)?;
            }
        } else if self.days == 0 {
            write!(f, "0D")?;
        }
        Ok(())
    }
}

/// Builder for constructing `Duration` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationBuilder {
    inner: Duration,
}

impl DurationBuilder {
    /// Creates a new duration builder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Duration {
                negative: false,
                weeks: 0,
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0,
            },
        }
    }

    /// Sets the duration as negative.
    #[must_use]
    pub const fn negative(mut self) -> Self {
        self.inner.negative = true;
        self
    }

    /// Sets the weeks component.
    #[must_use]
    pub const fn weeks(mut self, weeks: u32) -> Self {
        self.inner.weeks = weeks;
        self
    }

    /// Sets the days component.
    #[must_use]
    pub const fn days(mut self, days: u32) -> Self {
        self.inner.days = days;
        self
    }

    /// Sets the hours component.
    #[must_use]
    pub const fn hours(mut self, hours: u32) -> Self {
        self.inner.hours = hours;
        self
    }

    /// Sets the minutes component.
    #[must_use]
    pub const fn minutes(mut self, minutes: u32) -> Self {
        self.inner.minutes = minutes;
        self
    }

    /// Sets the seconds component.
    #[must_use]
    pub const fn seconds(mut self, seconds: u32) -> Self {
        self.inner.seconds = seconds;
        self
    }

    /// Builds the duration.
    #[must_use]
    pub const fn build(self) -> Duration {
        self.inner
    }
}
