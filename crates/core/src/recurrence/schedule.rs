//! Next-due-date computation.

use chrono::{Datelike, Days, NaiveDate};

use super::error::RecurrenceError;
use super::types::Frequency;

/// Computes the next due date for a recurring obligation.
///
/// The result is strictly in the future relative to `from`:
///
/// - **Weekly**: the next occurrence of `day_of_week`; if `from` already
///   falls on that weekday, the occurrence a full 7 days later.
/// - **Monthly**: `day_of_month` in `from`'s month, or the same day next
///   month when that lands on or before `from`.
/// - **Yearly**: `month_of_year`/`day_of_month` in `from`'s year, or next
///   year when on or before `from`.
///
/// Day-of-month anchors beyond the days in a month clamp to the last day of
/// that month (Feb 29 anchors become Feb 28 in non-leap years) rather than
/// rolling over into the next month.
///
/// # Errors
///
/// Returns a field-level `RecurrenceError` when an anchor required by the
/// frequency is missing or out of range.
pub fn next_due_date(
    frequency: Frequency,
    day_of_week: Option<u8>,
    day_of_month: Option<u8>,
    month_of_year: Option<u8>,
    from: NaiveDate,
) -> Result<NaiveDate, RecurrenceError> {
    match frequency {
        Frequency::Weekly => {
            let dow = day_of_week.ok_or(RecurrenceError::MissingDayOfWeek)?;
            if dow > 6 {
                return Err(RecurrenceError::DayOfWeekOutOfRange(dow));
            }
            Ok(next_weekday(from, u32::from(dow)))
        }
        Frequency::Monthly => {
            let dom = require_day_of_month(day_of_month, frequency)?;
            let candidate = clamp_to_month(from.year(), from.month(), u32::from(dom));
            if candidate > from {
                Ok(candidate)
            } else {
                let (year, month) = next_month(from.year(), from.month());
                Ok(clamp_to_month(year, month, u32::from(dom)))
            }
        }
        Frequency::Yearly => {
            let dom = require_day_of_month(day_of_month, frequency)?;
            let moy = month_of_year.ok_or(RecurrenceError::MissingMonthOfYear)?;
            if !(1..=12).contains(&moy) {
                return Err(RecurrenceError::MonthOfYearOutOfRange(moy));
            }
            let candidate = clamp_to_month(from.year(), u32::from(moy), u32::from(dom));
            if candidate > from {
                Ok(candidate)
            } else {
                Ok(clamp_to_month(
                    from.year() + 1,
                    u32::from(moy),
                    u32::from(dom),
                ))
            }
        }
    }
}

fn require_day_of_month(
    day_of_month: Option<u8>,
    frequency: Frequency,
) -> Result<u8, RecurrenceError> {
    let dom = day_of_month.ok_or(RecurrenceError::MissingDayOfMonth {
        frequency: frequency.name(),
    })?;
    if !(1..=31).contains(&dom) {
        return Err(RecurrenceError::DayOfMonthOutOfRange(dom));
    }
    Ok(dom)
}

/// The next occurrence of `target` (0=Sunday) strictly after `from`.
fn next_weekday(from: NaiveDate, target: u32) -> NaiveDate {
    let current = from.weekday().num_days_from_sunday();
    let mut delta = (target + 7 - current) % 7;
    if delta == 0 {
        // Anchor day itself does not count as "next due": jump a full week.
        delta = 7;
    }
    from + Days::new(u64::from(delta))
}

/// `day` in the given month, clamped to the month's last day.
fn clamp_to_month(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
        .expect("day clamped to month length is always valid")
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = next_month(year, month);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(28, |d| d.day())
}

const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
