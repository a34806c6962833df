//! In-process stand-in for the isdayoff.ru service.
//!
//! Serves the same four endpoints with the same plain-text wire format so the
//! client can be exercised over real HTTP without leaving the machine.

pub mod calendar;

use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Datelike, Days, NaiveDate, Utc};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::debug;

use calendar::Rules;

/// Longest `date1..=date2` span the service answers.
pub const MAX_PERIOD_DAYS: i64 = 366;

/// Years the calendar has data for.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1800..=2199;

const COUNTRIES: [&str; 7] = ["by", "kz", "ru", "ua", "us", "uz", "tr"];

/// Error replies, written to the body as bare codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceError {
    WrongDate,
    NotFound,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::WrongDate => (StatusCode::BAD_REQUEST, "100").into_response(),
            ServiceError::NotFound => (StatusCode::NOT_FOUND, "101").into_response(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LeapQuery {
    pub year: Option<String>,
}

/// Every parameter `getdata`, `today` and `tomorrow` understand, unparsed.
#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub date1: Option<String>,
    pub date2: Option<String>,
    pub cc: Option<String>,
    pub pre: Option<String>,
    pub covid: Option<String>,
    pub sd: Option<String>,
    pub tz: Option<String>,
}

impl DataQuery {
    fn rules(&self) -> Result<Rules, ServiceError> {
        if let Some(cc) = &self.cc {
            if !COUNTRIES.contains(&cc.as_str()) {
                return Err(ServiceError::WrongDate);
            }
        }
        Ok(Rules {
            pre: flag(self.pre.as_deref())?,
            covid: flag(self.covid.as_deref())?,
            six_day_week: flag(self.sd.as_deref())?,
        })
    }
}

fn flag(value: Option<&str>) -> Result<bool, ServiceError> {
    match value {
        None | Some("0") => Ok(false),
        Some("1") => Ok(true),
        Some(_) => Err(ServiceError::WrongDate),
    }
}

fn number<T: std::str::FromStr>(value: &str) -> Result<T, ServiceError> {
    value.parse().map_err(|_| ServiceError::WrongDate)
}

fn check_year(year: i32) -> Result<(), ServiceError> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(ServiceError::NotFound)
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/api/isleap", get(is_leap))
        .route("/api/getdata", get(get_data))
        .route("/today", get(today))
        .route("/tomorrow", get(tomorrow))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn is_leap(Query(q): Query<LeapQuery>) -> Result<&'static str, ServiceError> {
    let year: i32 = number(q.year.as_deref().ok_or(ServiceError::WrongDate)?)?;
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    debug!(year, leap, "isleap");
    Ok(if leap { "1" } else { "0" })
}

async fn get_data(Query(q): Query<DataQuery>) -> Result<String, ServiceError> {
    let rules = q.rules()?;
    let (first, last) = match (&q.date1, &q.date2) {
        (Some(d1), Some(d2)) => period(d1, d2)?,
        (None, None) => {
            let year: i32 = number(q.year.as_deref().ok_or(ServiceError::WrongDate)?)?;
            let month = q.month.as_deref().map(number::<u32>).transpose()?;
            let day = q.day.as_deref().map(number::<u32>).transpose()?;
            check_year(year)?;
            calendar::span(year, month, day).ok_or(ServiceError::WrongDate)?
        }
        _ => return Err(ServiceError::WrongDate),
    };
    debug!(%first, %last, "getdata");
    Ok(calendar::codes(first, last, rules))
}

fn period(date1: &str, date2: &str) -> Result<(NaiveDate, NaiveDate), ServiceError> {
    let first = calendar::parse_compact(date1).ok_or(ServiceError::WrongDate)?;
    let last = calendar::parse_compact(date2).ok_or(ServiceError::WrongDate)?;
    let span = (last - first).num_days() + 1;
    if span < 1 || span > MAX_PERIOD_DAYS {
        return Err(ServiceError::WrongDate);
    }
    check_year(first.year())?;
    check_year(last.year())?;
    Ok((first, last))
}

/// `today`/`tomorrow` use the server clock in UTC; `tz` is accepted and
/// ignored.
async fn today(Query(q): Query<DataQuery>) -> Result<String, ServiceError> {
    relative(&q, 0)
}

async fn tomorrow(Query(q): Query<DataQuery>) -> Result<String, ServiceError> {
    relative(&q, 1)
}

fn relative(q: &DataQuery, offset: u64) -> Result<String, ServiceError> {
    let rules = q.rules()?;
    let date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(offset))
        .ok_or(ServiceError::NotFound)?;
    Ok(format!("{}\n", calendar::classify(date, rules)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_only_zero_and_one() {
        assert_eq!(flag(None), Ok(false));
        assert_eq!(flag(Some("0")), Ok(false));
        assert_eq!(flag(Some("1")), Ok(true));
        assert_eq!(flag(Some("yes")), Err(ServiceError::WrongDate));
    }

    #[test]
    fn unknown_country_is_rejected() {
        let q = DataQuery {
            cc: Some("de".to_string()),
            ..DataQuery::default()
        };
        assert!(matches!(q.rules(), Err(ServiceError::WrongDate)));
    }

    #[test]
    fn period_limits() {
        assert!(period("20240101", "20241231").is_ok());
        assert_eq!(period("20240101", "20250101"), Err(ServiceError::WrongDate));
        assert_eq!(period("20240107", "20240101"), Err(ServiceError::WrongDate));
        assert_eq!(period("17000101", "17000102"), Err(ServiceError::NotFound));
        assert!(period("19000101", "19001231").is_ok());
    }
}
