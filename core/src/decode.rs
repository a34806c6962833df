//! Decoding of the service's plain-text bodies.
//!
//! Success bodies are bare digit codes: one character for the leap-year and
//! today/tomorrow endpoints, one character per day with no separator for
//! `getdata`. Any status other than 200 is an error whose body is one of the
//! `ErrorCode`s, or free text when something upstream failed.

use tracing::debug;

use crate::error::{ApiError, Error};
use crate::http::HttpResponse;
use crate::types::{DayType, ErrorCode, YearType};

/// Map a non-200 response to a typed API error or a generic status error.
pub fn decode_error(status: u16, body: &str) -> Error {
    let body = body.trim();
    match ErrorCode::from_code(body) {
        Some(code) => {
            debug!(status, code = %code, "service reported an error");
            Error::Api(ApiError::new(code, status))
        }
        None => {
            debug!(status, body, "unexpected response from service");
            Error::UnexpectedStatus {
                status,
                body: body.to_string(),
            }
        }
    }
}

fn check_status(response: &HttpResponse) -> Result<(), Error> {
    if response.is_success() {
        Ok(())
    } else {
        Err(decode_error(response.status, &response.body))
    }
}

/// Leap-year answer compared against the `Leap` code; the body is not
/// trimmed and anything else reads as "not leap".
pub fn decode_leap(response: &HttpResponse) -> Result<bool, Error> {
    check_status(response)?;
    Ok(response.body == YearType::Leap.as_str())
}

/// Strict counterpart of `decode_leap`: the body must be a known `YearType`.
pub fn decode_year_type(response: &HttpResponse) -> Result<YearType, Error> {
    check_status(response)?;
    YearType::from_code(&response.body)
        .ok_or_else(|| Error::Decode(format!("expected year code, got {:?}", response.body)))
}

/// Single day code, surrounding whitespace ignored.
pub fn decode_day(response: &HttpResponse) -> Result<DayType, Error> {
    check_status(response)?;
    let body = response.body.trim();
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(DayType::from_code(c)),
        _ => Err(Error::Decode(format!(
            "expected a single day code, got {body:?}"
        ))),
    }
}

/// One day code per character in chronological order. Nothing is trimmed:
/// stray whitespace shows up as `DayType::Unknown` at its position.
pub fn decode_days(response: &HttpResponse) -> Result<Vec<DayType>, Error> {
    check_status(response)?;
    Ok(response.body.chars().map(DayType::from_code).collect())
}

/// Reject the first `DayType::Unknown`, reporting its position.
pub fn ensure_known(days: &[DayType]) -> Result<(), Error> {
    match days.iter().position(|d| !d.is_known()) {
        Some(index) => Err(Error::UnknownDayCode {
            code: days[index].code(),
            index,
        }),
        None => Ok(()),
    }
}
