use chrono::{DateTime, Days, Months, NaiveDate};
use crate::error::{Result, SheetError};
use crate::model::{CommitInfo, WeekKey};

pub fn week_key(date: NaiveDate) -> WeekKey {
    WeekKey::from_date(date)
}

pub fn hours(minutes: u64) -> f64 {
    minutes as f64 / 60.0
}

/// Hours as a report cell. Always carries a fractional part (`1.0`, `0.5`).
pub fn hours_cell(minutes: u64) -> String {
    format!("{:?}", hours(minutes))
}

/// Case-insensitive substring match against message, author name and email.
/// `needle` must already be lowercased; an empty needle matches everything.
pub fn matches_filter(commit: &CommitInfo, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    commit.message.to_lowercase().contains(needle)
        || commit.author_email.to_lowercase().contains(needle)
        || commit.author_name.to_lowercase().contains(needle)
}

/// Parse a start/end bound. Relative forms are resolved against `today`.
pub fn parse_date_bound(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    // YY-MM-DD
    if input.len() == 8 {
        if let Ok(date) = NaiveDate::parse_from_str(input, "%y-%m-%d") {
            return Ok(date);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }

    if let Some(ago) = parse_natural_ago(input) {
        let date = match ago {
            Ago::Days(n) => today.checked_sub_days(Days::new(n)),
            Ago::Months(n) => u32::try_from(n)
                .ok()
                .and_then(|n| today.checked_sub_months(Months::new(n))),
        };
        return date.ok_or_else(|| SheetError::InvalidDate(format!("Date overflow for '{input}'")));
    }

    Err(SheetError::InvalidDate(format!(
        "'{input}' is not a date (expected YYYY-MM-DD, YY-MM-DD, RFC3339 or 'N days ago')"
    )))
}

#[derive(Debug, PartialEq, Eq)]
enum Ago {
    Days(u64),
    Months(u64),
}

fn parse_natural_ago(input: &str) -> Option<Ago> {
    let input = input.trim().to_lowercase();

    if let Some(days) = input.strip_suffix(" days ago") {
        if let Ok(n) = days.trim().parse::<u64>() {
            return Some(Ago::Days(n));
        }
    }

    if let Some(weeks) = input.strip_suffix(" weeks ago") {
        if let Ok(n) = weeks.trim().parse::<u64>() {
            return n.checked_mul(7).map(Ago::Days);
        }
    }

    if let Some(months) = input.strip_suffix(" months ago") {
        if let Ok(n) = months.trim().parse::<u64>() {
            return Some(Ago::Months(n));
        }
    }

    None
}

/// A bare integer is minutes; anything else goes through humantime (`90m`, `1h 30m`).
pub fn parse_minutes(input: &str) -> Result<u32> {
    let input = input.trim();
    if let Ok(n) = input.parse::<u32>() {
        return positive(n, input);
    }

    let duration = humantime::parse_duration(input)
        .map_err(|e| SheetError::Config(format!("Invalid duration '{input}': {e}")))?;
    let secs = duration.as_secs();
    if secs % 60 != 0 || duration.subsec_nanos() != 0 {
        return Err(SheetError::Config(format!(
            "Duration '{input}' is not a whole number of minutes"
        )));
    }
    let minutes = u32::try_from(secs / 60)
        .map_err(|_| SheetError::Config(format!("Duration '{input}' is too large")))?;
    positive(minutes, input)
}

fn positive(minutes: u32, input: &str) -> Result<u32> {
    if minutes == 0 {
        return Err(SheetError::Config(format!("Duration '{input}' must be positive")));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_long_and_short_dates() {
        let today = day(2024, 6, 1);
        assert_eq!(parse_date_bound("2022-01-01", today).unwrap(), day(2022, 1, 1));
        assert_eq!(parse_date_bound("22-01-31", today).unwrap(), day(2022, 1, 31));
        assert_eq!(
            parse_date_bound("2022-03-04T23:30:00+02:00", today).unwrap(),
            day(2022, 3, 4)
        );
    }

    #[test]
    fn parses_relative_dates() {
        let today = day(2024, 6, 15);
        assert_eq!(parse_date_bound("10 days ago", today).unwrap(), day(2024, 6, 5));
        assert_eq!(parse_date_bound("2 weeks ago", today).unwrap(), day(2024, 6, 1));
        assert_eq!(parse_date_bound("3 months ago", today).unwrap(), day(2024, 3, 15));
    }

    #[test]
    fn rejects_garbage_dates() {
        let today = day(2024, 6, 15);
        assert!(matches!(
            parse_date_bound("last tuesday", today),
            Err(SheetError::InvalidDate(_))
        ));
        assert!(parse_date_bound("2022-13-01", today).is_err());
    }

    #[test]
    fn parses_minutes_and_durations() {
        assert_eq!(parse_minutes("45").unwrap(), 45);
        assert_eq!(parse_minutes("90m").unwrap(), 90);
        assert_eq!(parse_minutes("1h 30m").unwrap(), 90);
        assert_eq!(parse_minutes("2h").unwrap(), 120);
    }

    #[test]
    fn rejects_non_positive_or_fractional_minutes() {
        assert!(matches!(parse_minutes("0"), Err(SheetError::Config(_))));
        assert!(matches!(parse_minutes("90s"), Err(SheetError::Config(_))));
        assert!(matches!(parse_minutes("soon"), Err(SheetError::Config(_))));
    }

    #[test]
    fn hours_cell_keeps_a_fraction() {
        assert_eq!(hours_cell(120), "2.0");
        assert_eq!(hours_cell(30), "0.5");
        assert_eq!(hours_cell(0), "0.0");
    }

    #[test]
    fn week_key_uses_iso_year() {
        // Friday 2021-01-01 still belongs to 2020-W53
        assert_eq!(week_key(day(2021, 1, 1)), WeekKey { year: 2020, week: 53 });
        assert_eq!(week_key(day(2022, 1, 3)), WeekKey { year: 2022, week: 1 });
        assert_eq!(week_key(day(2022, 1, 3)).to_string(), "2022-W01");
    }
}
