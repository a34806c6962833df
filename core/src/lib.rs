//! Client for the isdayoff.ru production-calendar service.
//!
//! # Overview
//! Given a date, a month, a year or a date range, the service answers with
//! one digit per day: working, non-working, shortened or pandemic working.
//! This crate builds the requests, runs them through an injectable
//! `Transport`, and decodes the terse plain-text replies into typed values.
//!
//! # Design
//! - `DayOffClient` is stateless apart from its transport and settings.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), with a composed method on top that does
//!   the round-trip, so the I/O boundary stays explicit.
//! - Service failures embedded in response bodies become `Error::Api`;
//!   transport failures stay `Error::Transport`.
//!
//! ```no_run
//! use chrono::Month;
//! use dayoff_core::{CountryCode, DayOffClient, Filter, UreqTransport};
//!
//! # fn main() -> Result<(), dayoff_core::Error> {
//! let client = DayOffClient::new(UreqTransport::new());
//! let days = client.get_by(
//!     &Filter::year(2024)
//!         .month(Month::January)
//!         .country(CountryCode::Kazakhstan),
//! )?;
//! let working = days.iter().filter(|d| d.is_working()).count();
//! println!("{working} working days in January 2024");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod decode;
pub mod error;
pub mod http;
pub mod params;
pub mod transport;
pub mod types;

pub use client::{DayOffClient, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ApiError, Error, TransportError};
pub use http::{HttpRequest, HttpResponse};
pub use params::{period_date, Filter};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{CountryCode, DayType, ErrorCode, ParseCountryCodeError, YearType};
