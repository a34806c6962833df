//! Toy production calendar used to answer `getdata`, `today` and `tomorrow`.
//!
//! The rules are the same for every country: weekends off (Saturday works in
//! six-day mode), January 1 off, December 31 shortened when asked for, and
//! weekdays of April 2020 marked as pandemic working days when asked for.

use chrono::{Datelike, Months, NaiveDate, Weekday};

/// The `pre`, `covid` and `sd` switches of a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rules {
    pub pre: bool,
    pub covid: bool,
    pub six_day_week: bool,
}

pub fn classify(date: NaiveDate, rules: Rules) -> char {
    if date.month() == 1 && date.day() == 1 {
        return '1';
    }
    let off = match date.weekday() {
        Weekday::Sun => true,
        Weekday::Sat => !rules.six_day_week,
        _ => false,
    };
    if off {
        return '1';
    }
    if rules.pre && date.month() == 12 && date.day() == 31 {
        return '2';
    }
    if rules.covid && date.year() == 2020 && date.month() == 4 {
        return '4';
    }
    '0'
}

/// One code per day of `first..=last`.
pub fn codes(first: NaiveDate, last: NaiveDate, rules: Rules) -> String {
    first
        .iter_days()
        .take_while(|d| *d <= last)
        .map(|d| classify(d, rules))
        .collect()
}

/// First and last day of a whole year, a month, or a single day.
pub fn span(year: i32, month: Option<u32>, day: Option<u32>) -> Option<(NaiveDate, NaiveDate)> {
    match (month, day) {
        (None, None) => Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        )),
        (Some(m), None) => {
            let first = NaiveDate::from_ymd_opt(year, m, 1)?;
            let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
            Some((first, last))
        }
        (Some(m), Some(d)) => {
            let date = NaiveDate::from_ymd_opt(year, m, d)?;
            Some((date, date))
        }
        (None, Some(_)) => None,
    }
}

/// Parse an eight-digit `YYYYMMDD` date.
pub fn parse_compact(s: &str) -> Option<NaiveDate> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[0..4].parse().ok()?;
    let month = s[4..6].parse().ok()?;
    let day = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
