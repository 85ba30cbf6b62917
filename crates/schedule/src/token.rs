//! Recurrence descriptors (schedule tokens).
//!
//! One closed enum, one variant per recurrence kind. The kinds carry
//! non-overlapping field sets, so a weekly schedule cannot smuggle in a
//! `week_order` and a monthly one cannot claim a `for_number_of_weeks` —
//! illegal combinations are unrepresentable rather than merely
//! unchecked. Construction goes through the validating constructors,
//! which reject any out-of-range field before a token exists.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use sw_domain::error::{Error, Result};
use sw_store::ManagedObject;

use crate::timestamp;

// ── remote class names ───────────────────────────────────────────────

pub const CLASS_NON_RECURRING: &str = "ScheduleNonRecurring";
pub const CLASS_INTERVAL: &str = "ScheduleInterval";
pub const CLASS_MONTHLY_BY_DATE: &str = "ScheduleMonthlyByDate";
pub const CLASS_MONTHLY_BY_WEEKDAY: &str = "ScheduleMonthlyByWeekday";
pub const CLASS_WEEKLY: &str = "ScheduleWeekly";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Token
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A validated descriptor of a one-time or recurring time window.
///
/// Tokens are transient: built in memory, written into one store
/// instance, then dropped. The store owns the durable copy. Durations
/// say how long the window stays open from `start_time`; spans and
/// counts say how often it reopens. `day` is 1–7 starting Sunday;
/// `month_day = 0` and `week_order = 0` mean "last" (last day of the
/// month, last week of the month) per the provider's convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleToken {
    /// A single window that never reopens.
    NonRecurring {
        day_duration: u32,
        hour_duration: u32,
        minute_duration: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    },
    /// Reopens every `day_span` days / `hour_span` hours / `minute_span`
    /// minutes.
    RecurInterval {
        day_duration: u32,
        day_span: u32,
        hour_duration: u32,
        hour_span: u32,
        minute_duration: u32,
        minute_span: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    },
    /// Reopens on a fixed day of the month, every N months.
    RecurMonthlyByDate {
        day_duration: u32,
        for_number_of_months: u32,
        hour_duration: u32,
        minute_duration: u32,
        month_day: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    },
    /// Reopens on the Nth weekday of the month, every N months.
    RecurMonthlyByWeekday {
        day: u32,
        day_duration: u32,
        for_number_of_months: u32,
        hour_duration: u32,
        minute_duration: u32,
        week_order: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    },
    /// Reopens on a fixed weekday, every N weeks.
    RecurWeekly {
        day: u32,
        day_duration: u32,
        for_number_of_weeks: u32,
        hour_duration: u32,
        minute_duration: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    },
}

// ── field validation helpers ─────────────────────────────────────────

fn in_range(field: &'static str, value: u32, lo: u32, hi: u32, expected: &'static str) -> Result<()> {
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(Error::Validation {
            field,
            value: i64::from(value),
            expected,
        })
    }
}

fn positive(field: &'static str, value: u32) -> Result<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(Error::Validation {
            field,
            value: i64::from(value),
            expected: ">= 1",
        })
    }
}

fn representable(start_time: DateTime<FixedOffset>) -> Result<()> {
    timestamp::to_store_timestamp(start_time).map(|_| ())
}

impl ScheduleToken {
    /// A one-shot window open for `day_duration` days plus
    /// `hour_duration` hours plus `minute_duration` minutes.
    pub fn non_recurring(
        day_duration: u32,
        hour_duration: u32,
        minute_duration: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<Self> {
        let token = Self::NonRecurring {
            day_duration,
            hour_duration,
            minute_duration,
            is_gmt,
            start_time,
        };
        token.validate()?;
        Ok(token)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn recur_interval(
        day_duration: u32,
        day_span: u32,
        hour_duration: u32,
        hour_span: u32,
        minute_duration: u32,
        minute_span: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<Self> {
        let token = Self::RecurInterval {
            day_duration,
            day_span,
            hour_duration,
            hour_span,
            minute_duration,
            minute_span,
            is_gmt,
            start_time,
        };
        token.validate()?;
        Ok(token)
    }

    /// `month_day = 0` selects the last day of each month.
    pub fn recur_monthly_by_date(
        day_duration: u32,
        for_number_of_months: u32,
        hour_duration: u32,
        minute_duration: u32,
        month_day: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<Self> {
        let token = Self::RecurMonthlyByDate {
            day_duration,
            for_number_of_months,
            hour_duration,
            minute_duration,
            month_day,
            is_gmt,
            start_time,
        };
        token.validate()?;
        Ok(token)
    }

    /// `week_order = 0` selects the last week of each month.
    #[allow(clippy::too_many_arguments)]
    pub fn recur_monthly_by_weekday(
        day: u32,
        day_duration: u32,
        for_number_of_months: u32,
        hour_duration: u32,
        minute_duration: u32,
        week_order: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<Self> {
        let token = Self::RecurMonthlyByWeekday {
            day,
            day_duration,
            for_number_of_months,
            hour_duration,
            minute_duration,
            week_order,
            is_gmt,
            start_time,
        };
        token.validate()?;
        Ok(token)
    }

    pub fn recur_weekly(
        day: u32,
        day_duration: u32,
        for_number_of_weeks: u32,
        hour_duration: u32,
        minute_duration: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<Self> {
        let token = Self::RecurWeekly {
            day,
            day_duration,
            for_number_of_weeks,
            hour_duration,
            minute_duration,
            is_gmt,
            start_time,
        };
        token.validate()?;
        Ok(token)
    }

    /// Re-check every range rule for this variant.
    ///
    /// Constructed tokens are valid by construction; this exists for
    /// tokens that arrived through deserialization, which maps raw data
    /// without applying the rules. Anything that hands a token to the
    /// store must call it first.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::NonRecurring {
                day_duration,
                hour_duration,
                minute_duration,
                start_time,
                ..
            } => {
                positive("day_duration", day_duration)?;
                in_range("hour_duration", hour_duration, 0, 23, "0..=23")?;
                in_range("minute_duration", minute_duration, 0, 59, "0..=59")?;
                representable(start_time)
            }
            Self::RecurInterval {
                day_duration,
                day_span,
                hour_duration,
                hour_span,
                minute_duration,
                minute_span,
                start_time,
                ..
            } => {
                positive("day_duration", day_duration)?;
                in_range("day_span", day_span, 0, 31, "0..=31")?;
                in_range("hour_duration", hour_duration, 0, 23, "0..=23")?;
                in_range("hour_span", hour_span, 0, 23, "0..=23")?;
                in_range("minute_duration", minute_duration, 0, 59, "0..=59")?;
                in_range("minute_span", minute_span, 0, 59, "0..=59")?;
                representable(start_time)
            }
            Self::RecurMonthlyByDate {
                day_duration,
                for_number_of_months,
                hour_duration,
                minute_duration,
                month_day,
                start_time,
                ..
            } => {
                positive("day_duration", day_duration)?;
                in_range("for_number_of_months", for_number_of_months, 1, 12, "1..=12")?;
                in_range("hour_duration", hour_duration, 0, 23, "0..=23")?;
                in_range("minute_duration", minute_duration, 0, 59, "0..=59")?;
                in_range("month_day", month_day, 0, 31, "0..=31")?;
                representable(start_time)
            }
            Self::RecurMonthlyByWeekday {
                day,
                day_duration,
                for_number_of_months,
                hour_duration,
                minute_duration,
                week_order,
                start_time,
                ..
            } => {
                in_range("day", day, 1, 7, "1..=7")?;
                positive("day_duration", day_duration)?;
                in_range("for_number_of_months", for_number_of_months, 1, 12, "1..=12")?;
                in_range("hour_duration", hour_duration, 0, 23, "0..=23")?;
                in_range("minute_duration", minute_duration, 0, 59, "0..=59")?;
                in_range("week_order", week_order, 0, 4, "0..=4")?;
                representable(start_time)
            }
            Self::RecurWeekly {
                day,
                day_duration,
                for_number_of_weeks,
                hour_duration,
                minute_duration,
                start_time,
                ..
            } => {
                in_range("day", day, 1, 7, "1..=7")?;
                positive("day_duration", day_duration)?;
                in_range("for_number_of_weeks", for_number_of_weeks, 1, 4, "1..=4")?;
                in_range("hour_duration", hour_duration, 0, 23, "0..=23")?;
                in_range("minute_duration", minute_duration, 0, 59, "0..=59")?;
                representable(start_time)
            }
        }
    }

    // ── accessors ────────────────────────────────────────────────────

    /// The serde tag for this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NonRecurring { .. } => "non_recurring",
            Self::RecurInterval { .. } => "recur_interval",
            Self::RecurMonthlyByDate { .. } => "recur_monthly_by_date",
            Self::RecurMonthlyByWeekday { .. } => "recur_monthly_by_weekday",
            Self::RecurWeekly { .. } => "recur_weekly",
        }
    }

    /// The remote class this variant instantiates.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::NonRecurring { .. } => CLASS_NON_RECURRING,
            Self::RecurInterval { .. } => CLASS_INTERVAL,
            Self::RecurMonthlyByDate { .. } => CLASS_MONTHLY_BY_DATE,
            Self::RecurMonthlyByWeekday { .. } => CLASS_MONTHLY_BY_WEEKDAY,
            Self::RecurWeekly { .. } => CLASS_WEEKLY,
        }
    }

    pub fn start_time(&self) -> DateTime<FixedOffset> {
        match self {
            Self::NonRecurring { start_time, .. }
            | Self::RecurInterval { start_time, .. }
            | Self::RecurMonthlyByDate { start_time, .. }
            | Self::RecurMonthlyByWeekday { start_time, .. }
            | Self::RecurWeekly { start_time, .. } => *start_time,
        }
    }

    pub fn is_gmt(&self) -> bool {
        match self {
            Self::NonRecurring { is_gmt, .. }
            | Self::RecurInterval { is_gmt, .. }
            | Self::RecurMonthlyByDate { is_gmt, .. }
            | Self::RecurMonthlyByWeekday { is_gmt, .. }
            | Self::RecurWeekly { is_gmt, .. } => *is_gmt,
        }
    }

    /// Write this token into a store instance's property bag.
    ///
    /// Property names are the provider's PascalCase vocabulary;
    /// `StartTime` carries the store-timestamp encoding of
    /// [`start_time`](Self::start_time).
    pub fn write_properties(&self, obj: &mut ManagedObject) -> Result<()> {
        obj.set("StartTime", timestamp::to_store_timestamp(self.start_time())?);
        obj.set("IsGMT", self.is_gmt());
        match *self {
            Self::NonRecurring {
                day_duration,
                hour_duration,
                minute_duration,
                ..
            } => {
                obj.set("DayDuration", day_duration);
                obj.set("HourDuration", hour_duration);
                obj.set("MinuteDuration", minute_duration);
            }
            Self::RecurInterval {
                day_duration,
                day_span,
                hour_duration,
                hour_span,
                minute_duration,
                minute_span,
                ..
            } => {
                obj.set("DayDuration", day_duration);
                obj.set("DaySpan", day_span);
                obj.set("HourDuration", hour_duration);
                obj.set("HourSpan", hour_span);
                obj.set("MinuteDuration", minute_duration);
                obj.set("MinuteSpan", minute_span);
            }
            Self::RecurMonthlyByDate {
                day_duration,
                for_number_of_months,
                hour_duration,
                minute_duration,
                month_day,
                ..
            } => {
                obj.set("DayDuration", day_duration);
                obj.set("ForNumberOfMonths", for_number_of_months);
                obj.set("HourDuration", hour_duration);
                obj.set("MinuteDuration", minute_duration);
                obj.set("MonthDay", month_day);
            }
            Self::RecurMonthlyByWeekday {
                day,
                day_duration,
                for_number_of_months,
                hour_duration,
                minute_duration,
                week_order,
                ..
            } => {
                obj.set("Day", day);
                obj.set("DayDuration", day_duration);
                obj.set("ForNumberOfMonths", for_number_of_months);
                obj.set("HourDuration", hour_duration);
                obj.set("MinuteDuration", minute_duration);
                obj.set("WeekOrder", week_order);
            }
            Self::RecurWeekly {
                day,
                day_duration,
                for_number_of_weeks,
                hour_duration,
                minute_duration,
                ..
            } => {
                obj.set("Day", day);
                obj.set("DayDuration", day_duration);
                obj.set("ForNumberOfWeeks", for_number_of_weeks);
                obj.set("HourDuration", hour_duration);
                obj.set("MinuteDuration", minute_duration);
            }
        }
        Ok(())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
