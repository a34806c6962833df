//! Request filters and their query-string encoding.
//!
//! # Design
//! Every optional field of `Filter` maps to exactly one query key, and only
//! when it is `Some`. The service treats a missing parameter differently from
//! an explicit `0` in some modes, so `None` must never be encoded as a
//! default. Keys come out in a fixed order to keep URLs reproducible.

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::CountryCode;

/// Query pairs in the order they are appended to the URL.
pub type QueryPairs = Vec<(&'static str, String)>;

/// Optional request filters shared by every operation.
///
/// Which fields an operation reads is documented on the operation itself:
/// `get_by` reads all of them, `get_by_period` ignores the date fields and
/// `tz`, and `today`/`tomorrow` ignore the date fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<Month>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryCode>,
    /// Mark shortened pre-holiday days with `2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre: Option<bool>,
    /// Mark pandemic-mandated working days with `4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub six_day_week: Option<bool>,
    /// IANA time zone name, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tz: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn country(mut self, country: CountryCode) -> Self {
        self.country = Some(country);
        self
    }

    pub fn pre(mut self, pre: bool) -> Self {
        self.pre = Some(pre);
        self
    }

    pub fn covid(mut self, covid: bool) -> Self {
        self.covid = Some(covid);
        self
    }

    pub fn six_day_week(mut self, six_day_week: bool) -> Self {
        self.six_day_week = Some(six_day_week);
        self
    }

    pub fn tz(mut self, tz: impl Into<String>) -> Self {
        self.tz = Some(tz.into());
        self
    }

    fn push_options(&self, pairs: &mut QueryPairs) {
        if let Some(cc) = self.country {
            pairs.push(("cc", cc.as_str().to_string()));
        }
        if let Some(pre) = self.pre {
            pairs.push(("pre", flag(pre).to_string()));
        }
        if let Some(covid) = self.covid {
            pairs.push(("covid", flag(covid).to_string()));
        }
        if let Some(sd) = self.six_day_week {
            pairs.push(("sd", flag(sd).to_string()));
        }
    }
}

/// Boolean flags travel as `0`/`1`.
pub fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// `YYYYMMDD`, the form `date1`/`date2` expect.
pub fn period_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Pairs for a year, month or single-day query.
pub fn date_query(filter: &Filter) -> Result<QueryPairs, Error> {
    let year = filter.year.ok_or(Error::MissingYear)?;
    let mut pairs = vec![("year", year.to_string())];
    if let Some(month) = filter.month {
        pairs.push(("month", format!("{:02}", month.number_from_month())));
    }
    if let Some(day) = filter.day {
        pairs.push(("day", format!("{day:02}")));
    }
    filter.push_options(&mut pairs);
    if let Some(tz) = &filter.tz {
        pairs.push(("tz", tz.clone()));
    }
    Ok(pairs)
}

/// Pairs for an inclusive `date1..=date2` query. Date fields and `tz` of the
/// filter are not sent.
pub fn period_query(date1: &str, date2: &str, filter: &Filter) -> QueryPairs {
    let mut pairs = vec![("date1", date1.to_string()), ("date2", date2.to_string())];
    filter.push_options(&mut pairs);
    pairs
}

/// Pairs for the `today`/`tomorrow` aliases.
pub fn relative_query(filter: &Filter) -> QueryPairs {
    let mut pairs = QueryPairs::new();
    filter.push_options(&mut pairs);
    if let Some(tz) = &filter.tz {
        pairs.push(("tz", tz.clone()));
    }
    pairs
}
