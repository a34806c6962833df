//! Client for the day-off service.
//!
//! # Design
//! `DayOffClient` holds a transport plus immutable settings and carries no
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`; the composed operations (`is_leap`, `get_by`, ...) just run
//! build, transport, parse in sequence. No retries, no caching.

use tracing::debug;
use url::Url;

use crate::decode;
use crate::error::Error;
use crate::http::{HttpRequest, HttpResponse};
use crate::params::{self, Filter, QueryPairs};
use crate::transport::Transport;
use crate::types::{DayType, YearType};

pub const DEFAULT_BASE_URL: &str = "https://isdayoff.ru";
pub const DEFAULT_USER_AGENT: &str = concat!("dayoff-rs/", env!("CARGO_PKG_VERSION"));

const ISLEAP_PATH: &str = "/api/isleap";
const GETDATA_PATH: &str = "/api/getdata";
const TODAY_PATH: &str = "/today";
const TOMORROW_PATH: &str = "/tomorrow";

/// Synchronous, stateless client for the day-off service.
///
/// Safe to share between threads whenever the transport is.
#[derive(Debug, Clone)]
pub struct DayOffClient<T> {
    transport: T,
    base_url: String,
    user_agent: String,
    strict: bool,
}

#[cfg(feature = "ureq")]
impl Default for DayOffClient<crate::transport::UreqTransport> {
    fn default() -> Self {
        Self::new(crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> DayOffClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_base_url(transport, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(transport: T, base_url: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            strict: false,
        }
    }

    /// Override the `User-Agent` sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// In strict mode unknown day codes and leap answers fail instead of
    /// passing through.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Request building
    // -----------------------------------------------------------------------

    /// The year is sent as-is; range checks are the service's job.
    pub fn build_is_leap(&self, year: i32) -> Result<HttpRequest, Error> {
        self.request(ISLEAP_PATH, vec![("year", year.to_string())])
    }

    pub fn build_get_by(&self, filter: &Filter) -> Result<HttpRequest, Error> {
        self.request(GETDATA_PATH, params::date_query(filter)?)
    }

    /// `date1` and `date2` are inclusive `YYYYMMDD` dates. The service caps
    /// the span at 366 days and rejects longer ones itself.
    pub fn build_get_by_period(
        &self,
        date1: &str,
        date2: &str,
        filter: &Filter,
    ) -> Result<HttpRequest, Error> {
        self.request(GETDATA_PATH, params::period_query(date1, date2, filter))
    }

    pub fn build_today(&self, filter: &Filter) -> Result<HttpRequest, Error> {
        self.request(TODAY_PATH, params::relative_query(filter))
    }

    pub fn build_tomorrow(&self, filter: &Filter) -> Result<HttpRequest, Error> {
        self.request(TOMORROW_PATH, params::relative_query(filter))
    }

    fn request(&self, path: &str, pairs: QueryPairs) -> Result<HttpRequest, Error> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))?;
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(HttpRequest {
            url: url.into(),
            headers: vec![("User-Agent".to_string(), self.user_agent.clone())],
        })
    }

    // -----------------------------------------------------------------------
    // Response parsing
    // -----------------------------------------------------------------------

    pub fn parse_is_leap(&self, response: &HttpResponse) -> Result<bool, Error> {
        if self.strict {
            let year_type = decode::decode_year_type(response)?;
            return Ok(year_type == YearType::Leap);
        }
        decode::decode_leap(response)
    }

    /// Days in chronological order, one per calendar day requested.
    pub fn parse_days(&self, response: &HttpResponse) -> Result<Vec<DayType>, Error> {
        let days = decode::decode_days(response)?;
        if self.strict {
            decode::ensure_known(&days)?;
        }
        debug!(count = days.len(), "decoded days");
        Ok(days)
    }

    pub fn parse_day(&self, response: &HttpResponse) -> Result<DayType, Error> {
        let day = decode::decode_day(response)?;
        if self.strict {
            decode::ensure_known(&[day])?;
        }
        Ok(day)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn is_leap(&self, year: i32) -> Result<bool, Error> {
        let response = self.send(&self.build_is_leap(year)?)?;
        self.parse_is_leap(&response)
    }

    /// Year, month or single-day query; `filter.year` is required.
    pub fn get_by(&self, filter: &Filter) -> Result<Vec<DayType>, Error> {
        let response = self.send(&self.build_get_by(filter)?)?;
        self.parse_days(&response)
    }

    /// Inclusive range query. Date fields and `tz` of `filter` are ignored.
    pub fn get_by_period(
        &self,
        date1: &str,
        date2: &str,
        filter: &Filter,
    ) -> Result<Vec<DayType>, Error> {
        let response = self.send(&self.build_get_by_period(date1, date2, filter)?)?;
        self.parse_days(&response)
    }

    /// Today according to the service's clock, in `filter.tz` if given.
    pub fn today(&self, filter: &Filter) -> Result<DayType, Error> {
        let response = self.send(&self.build_today(filter)?)?;
        self.parse_day(&response)
    }

    pub fn tomorrow(&self, filter: &Filter) -> Result<DayType, Error> {
        let response = self.send(&self.build_tomorrow(filter)?)?;
        self.parse_day(&response)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        debug!(url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, len = response.body.len(), "received response");
        Ok(response)
    }
}
