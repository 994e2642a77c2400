use std::fmt;
use std::str::FromStr;

use flowcast_core::FlowError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

/// Fixed calendar step used to bucket throughput.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    Daily,
    #[default]
    Weekly,
    #[serde(rename = "biweekly", alias = "bi-weekly", alias = "bi_weekly")]
    BiWeekly,
    Monthly,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::BiWeekly => "biweekly",
            Interval::Monthly => "monthly",
        }
    }

    /// Start of the bucket containing `date`. Weeks start on Sunday.
    pub fn floor(&self, date: Date) -> Date {
        match self {
            Interval::Daily => date,
            Interval::Weekly | Interval::BiWeekly => {
                let back = i64::from(date.weekday().number_days_from_sunday());
                date.checked_sub(Duration::days(back)).unwrap_or(date)
            }
            Interval::Monthly => date.replace_day(1).unwrap_or(date),
        }
    }

    /// Move `n` steps forward from `date`. `None` past the calendar limits.
    pub fn offset(&self, date: Date, n: i32) -> Option<Date> {
        match self {
            Interval::Daily => date.checked_add(Duration::days(i64::from(n))),
            Interval::Weekly => date.checked_add(Duration::weeks(i64::from(n))),
            Interval::BiWeekly => date.checked_add(Duration::weeks(2 * i64::from(n))),
            Interval::Monthly => add_months(date, n),
        }
    }

    /// Bucket starts `s` with `floor(from) <= s < to`.
    pub fn range(&self, from: Date, to: Date) -> Vec<Date> {
        self.starts_while(from, |s| s < to)
    }

    /// Bucket boundaries covering `[from, to)`.
    ///
    /// Every start up to and including `to`, plus one extra step when the
    /// last boundary falls short of `to`, so consecutive pairs always cover
    /// the whole span.
    pub fn boundaries(&self, from: Date, to: Date) -> Vec<Date> {
        let mut out = self.starts_while(from, |s| s <= to);
        if let Some(&last) = out.last() {
            if last < to {
                if let Some(next) = self.offset(last, 1) {
                    out.push(next);
                }
            }
        }
        out
    }

    fn starts_while(&self, from: Date, keep: impl Fn(Date) -> bool) -> Vec<Date> {
        let mut out = Vec::new();
        let mut cursor = Some(self.floor(from));
        while let Some(s) = cursor {
            if !keep(s) {
                break;
            }
            out.push(s);
            cursor = self.offset(s, 1);
        }
        out
    }
}

fn add_months(date: Date, n: i32) -> Option<Date> {
    let index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + n;
    let year = index.div_euclid(12);
    let month = Month::try_from(index.rem_euclid(12) as u8 + 1).ok()?;
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, FlowError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Interval::Daily),
            "weekly" | "week" => Ok(Interval::Weekly),
            "biweekly" | "bi-weekly" | "bi_weekly" => Ok(Interval::BiWeekly),
            "monthly" | "month" => Ok(Interval::Monthly),
            _ => Err(FlowError::validation(format!(
                "unknown interval {s:?} (expected daily, weekly, biweekly, monthly)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn weekly_floor_lands_on_sunday() {
        // 2024-01-10 is a Wednesday.
        assert_eq!(Interval::Weekly.floor(date!(2024 - 01 - 10)), date!(2024 - 01 - 07));
        assert_eq!(Interval::Weekly.floor(date!(2024 - 01 - 07)), date!(2024 - 01 - 07));
    }

    #[test]
    fn monthly_offset_wraps_years() {
        assert_eq!(
            Interval::Monthly.offset(date!(2023 - 11 - 01), 3),
            Some(date!(2024 - 02 - 01))
        );
        assert_eq!(
            Interval::Monthly.offset(date!(2024 - 01 - 31), 1),
            Some(date!(2024 - 02 - 29))
        );
    }

    #[test]
    fn range_excludes_end() {
        let days = Interval::Daily.range(date!(2024 - 01 - 01), date!(2024 - 01 - 04));
        assert_eq!(
            days,
            vec![date!(2024 - 01 - 01), date!(2024 - 01 - 02), date!(2024 - 01 - 03)]
        );
    }

    #[test]
    fn boundaries_extend_past_unaligned_end() {
        let weeks = Interval::Weekly.boundaries(date!(2024 - 01 - 07), date!(2024 - 01 - 17));
        assert_eq!(
            weeks,
            vec![date!(2024 - 01 - 07), date!(2024 - 01 - 14), date!(2024 - 01 - 21)]
        );
    }

    #[test]
    fn boundaries_stop_on_aligned_end() {
        let weeks = Interval::Weekly.boundaries(date!(2024 - 01 - 07), date!(2024 - 01 - 21));
        assert_eq!(
            weeks,
            vec![date!(2024 - 01 - 07), date!(2024 - 01 - 14), date!(2024 - 01 - 21)]
        );
        let fortnights =
            Interval::BiWeekly.boundaries(date!(2024 - 01 - 10), date!(2024 - 02 - 01));
        assert_eq!(
            fortnights,
            vec![date!(2024 - 01 - 07), date!(2024 - 01 - 21), date!(2024 - 02 - 04)]
        );
    }

    #[test]
    fn parses_names() {
        assert_eq!("Bi-Weekly".parse::<Interval>().unwrap(), Interval::BiWeekly);
        assert_eq!("monthly".parse::<Interval>().unwrap(), Interval::Monthly);
        assert!("hourly".parse::<Interval>().is_err());
    }
}
