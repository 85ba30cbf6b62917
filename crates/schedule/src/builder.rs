//! Builder that turns recurrence parameters into populated, un-persisted
//! store instances.
//!
//! Validation runs strictly before the store is asked for anything: an
//! out-of-range parameter never causes a remote call, and a store
//! failure never yields a partially populated instance. The builder has
//! no side effect beyond instance creation — persisting the returned
//! object (or embedding it in an enclosing save) is the caller's job.
//! Calling the same operation twice with identical inputs produces two
//! independent instances; nothing is cached or interned.

use chrono::{DateTime, FixedOffset};

use sw_domain::error::Result;
use sw_store::{ManagedObject, ManagementStore};

use crate::token::ScheduleToken;

pub struct ScheduleBuilder<'a> {
    store: &'a dyn ManagementStore,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(store: &'a dyn ManagementStore) -> Self {
        Self { store }
    }

    /// Build a one-shot schedule instance.
    pub async fn non_recurring(
        &self,
        day_duration: u32,
        hour_duration: u32,
        minute_duration: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<ManagedObject> {
        let token = ScheduleToken::non_recurring(
            day_duration,
            hour_duration,
            minute_duration,
            is_gmt,
            start_time,
        )?;
        self.instantiate(&token).await
    }

    /// Build a fixed-interval schedule instance.
    #[allow(clippy::too_many_arguments)]
    pub async fn recur_interval(
        &self,
        day_duration: u32,
        day_span: u32,
        hour_duration: u32,
        hour_span: u32,
        minute_duration: u32,
        minute_span: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<ManagedObject> {
        let token = ScheduleToken::recur_interval(
            day_duration,
            day_span,
            hour_duration,
            hour_span,
            minute_duration,
            minute_span,
            is_gmt,
            start_time,
        )?;
        self.instantiate(&token).await
    }

    /// Build a monthly-by-date schedule instance (`month_day = 0` means
    /// the last day of the month).
    pub async fn recur_monthly_by_date(
        &self,
        day_duration: u32,
        for_number_of_months: u32,
        hour_duration: u32,
        minute_duration: u32,
        month_day: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<ManagedObject> {
        let token = ScheduleToken::recur_monthly_by_date(
            day_duration,
            for_number_of_months,
            hour_duration,
            minute_duration,
            month_day,
            is_gmt,
            start_time,
        )?;
        self.instantiate(&token).await
    }

    /// Build a monthly-by-weekday schedule instance (`week_order = 0`
    /// means the last week of the month).
    #[allow(clippy::too_many_arguments)]
    pub async fn recur_monthly_by_weekday(
        &self,
        day: u32,
        day_duration: u32,
        for_number_of_months: u32,
        hour_duration: u32,
        minute_duration: u32,
        week_order: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<ManagedObject> {
        let token = ScheduleToken::recur_monthly_by_weekday(
            day,
            day_duration,
            for_number_of_months,
            hour_duration,
            minute_duration,
            week_order,
            is_gmt,
            start_time,
        )?;
        self.instantiate(&token).await
    }

    /// Build a weekly schedule instance.
    pub async fn recur_weekly(
        &self,
        day: u32,
        day_duration: u32,
        for_number_of_weeks: u32,
        hour_duration: u32,
        minute_duration: u32,
        is_gmt: bool,
        start_time: DateTime<FixedOffset>,
    ) -> Result<ManagedObject> {
        let token = ScheduleToken::recur_weekly(
            day,
            day_duration,
            for_number_of_weeks,
            hour_duration,
            minute_duration,
            is_gmt,
            start_time,
        )?;
        self.instantiate(&token).await
    }

    /// Materialize a token as a populated, un-persisted store instance.
    ///
    /// Tokens from the constructors are already valid; deserialized ones
    /// get their ranges re-checked here, so the store is never asked to
    /// instantiate an out-of-range descriptor.
    pub async fn instantiate(&self, token: &ScheduleToken) -> Result<ManagedObject> {
        token.validate()?;
        let mut obj = self.store.create_instance(token.class_name()).await?;
        token.write_properties(&mut obj)?;
        tracing::debug!(class = token.class_name(), kind = token.kind(), "schedule instance populated");
        Ok(obj)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
