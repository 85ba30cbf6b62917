//! `sitewrench schedule` — build recurrence tokens without touching a
//! live hierarchy object.
//!
//! Each variant validates its flags into a token and prints it as JSON,
//! ready to be piped into `advert create --schedule -`. With
//! `--instantiate` the token is additionally materialized through the
//! provider and the populated instance is printed instead.

use sw_schedule::{ScheduleBuilder, ScheduleToken};

use crate::cli::{print_json, ScheduleCommand};
use crate::context::CliContext;

pub async fn run(ctx: &CliContext, cmd: &ScheduleCommand) -> anyhow::Result<()> {
    match cmd {
        ScheduleCommand::NonRecurring {
            day_duration,
            hour_duration,
            minute_duration,
            gmt,
            start,
            instantiate,
        } => {
            let token = ScheduleToken::non_recurring(
                *day_duration,
                *hour_duration,
                *minute_duration,
                *gmt,
                *start,
            )?;
            emit(ctx, &token, *instantiate).await
        }
        ScheduleCommand::Interval {
            day_duration,
            day_span,
            hour_duration,
            hour_span,
            minute_duration,
            minute_span,
            gmt,
            start,
            instantiate,
        } => {
            let token = ScheduleToken::recur_interval(
                *day_duration,
                *day_span,
                *hour_duration,
                *hour_span,
                *minute_duration,
                *minute_span,
                *gmt,
                *start,
            )?;
            emit(ctx, &token, *instantiate).await
        }
        ScheduleCommand::MonthlyByDate {
            day_duration,
            for_months,
            hour_duration,
            minute_duration,
            month_day,
            gmt,
            start,
            instantiate,
        } => {
            let token = ScheduleToken::recur_monthly_by_date(
                *day_duration,
                *for_months,
                *hour_duration,
                *minute_duration,
                *month_day,
                *gmt,
                *start,
            )?;
            emit(ctx, &token, *instantiate).await
        }
        ScheduleCommand::MonthlyByWeekday {
            day,
            day_duration,
            for_months,
            hour_duration,
            minute_duration,
            week_order,
            gmt,
            start,
            instantiate,
        } => {
            let token = ScheduleToken::recur_monthly_by_weekday(
                *day,
                *day_duration,
                *for_months,
                *hour_duration,
                *minute_duration,
                *week_order,
                *gmt,
                *start,
            )?;
            emit(ctx, &token, *instantiate).await
        }
        ScheduleCommand::Weekly {
            day,
            day_duration,
            for_weeks,
            hour_duration,
            minute_duration,
            gmt,
            start,
            instantiate,
        } => {
            let token = ScheduleToken::recur_weekly(
                *day,
                *day_duration,
                *for_weeks,
                *hour_duration,
                *minute_duration,
                *gmt,
                *start,
            )?;
            emit(ctx, &token, *instantiate).await
        }
    }
}

async fn emit(ctx: &CliContext, token: &ScheduleToken, instantiate: bool) -> anyhow::Result<()> {
    if instantiate {
        let store = ctx.store()?;
        let instance = ScheduleBuilder::new(store.as_ref()).instantiate(token).await?;
        return print_json(&instance);
    }
    print_json(token)
}
