//! End-to-end tests against the mock service over real HTTP.
//!
//! # Design
//! Starts the mock server on a random port, then drives every client
//! operation through `UreqTransport`, so URL encoding, headers and body
//! decoding are all exercised on the wire.

use std::net::SocketAddr;
use std::sync::Once;

use chrono::{Month, NaiveDate};
use dayoff_core::{
    period_date, CountryCode, DayOffClient, DayType, Error, ErrorCode, Filter, HttpRequest,
    Transport, UreqTransport,
};

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("dayoff_core=debug"))
            .with_test_writer()
            .try_init();
    });
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client() -> DayOffClient<UreqTransport> {
    init_tracing();
    let addr = start_server();
    DayOffClient::with_base_url(UreqTransport::new(), &format!("http://{addr}"))
}

fn all_known(days: &[DayType]) -> bool {
    days.iter().all(|d| d.is_known())
}

#[test]
fn is_leap_matches_known_years() {
    let c = client();
    for (year, expected) in [(2020, true), (2021, false), (2024, true), (1900, false), (2000, true)] {
        assert_eq!(c.is_leap(year).unwrap(), expected, "year {year}");
    }
}

#[test]
fn whole_year_has_one_entry_per_day() {
    let c = client();
    for (year, expected) in [(2020, 366), (2021, 365), (2024, 366), (2000, 366), (1900, 365)] {
        let days = c.get_by(&Filter::year(year)).unwrap();
        assert_eq!(days.len(), expected, "year {year}");
        assert!(all_known(&days));
    }
}

#[test]
fn month_matches_calendar_length() {
    let c = client().strict(true);
    let cases = [
        (2020, Month::January, CountryCode::Kazakhstan, 31),
        (2020, Month::February, CountryCode::Russia, 29),
        (2021, Month::February, CountryCode::Russia, 28),
    ];
    for (year, month, cc, expected) in cases {
        let days = c
            .get_by(&Filter::year(year).month(month).country(cc))
            .unwrap();
        assert_eq!(days.len(), expected, "{month:?} {year}");
    }
}

#[test]
fn single_day_returns_one_entry() {
    let c = client();
    let filter = Filter::year(2024)
        .month(Month::May)
        .day(1)
        .country(CountryCode::Belarus)
        .pre(false)
        .covid(false);
    let days = c.get_by(&filter).unwrap();
    assert_eq!(days, vec![DayType::Working]);
}

#[test]
fn flags_change_the_answer() {
    let c = client();
    let eve = Filter::year(2024).month(Month::December).day(31);
    assert_eq!(c.get_by(&eve).unwrap(), vec![DayType::Working]);
    assert_eq!(c.get_by(&eve.clone().pre(true)).unwrap(), vec![DayType::HalfHoliday]);

    let saturday = Filter::year(2024).month(Month::January).day(6);
    assert_eq!(c.get_by(&saturday).unwrap(), vec![DayType::NonWorking]);
    assert_eq!(
        c.get_by(&saturday.clone().six_day_week(true)).unwrap(),
        vec![DayType::Working]
    );

    let april = Filter::year(2020).month(Month::April).covid(true);
    let days = c.get_by(&april).unwrap();
    assert!(days.contains(&DayType::WorkingCovid));
}

#[test]
fn period_is_inclusive() {
    let c = client();
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    let cases = [
        (date(2024, 1, 1), date(2024, 1, 7), CountryCode::Russia),
        (date(2024, 1, 1), date(2024, 1, 31), CountryCode::Kazakhstan),
        (date(2024, 2, 1), date(2024, 2, 5), CountryCode::Belarus),
    ];
    for (first, last, cc) in cases {
        let filter = Filter::new()
            .country(cc)
            .pre(false)
            .covid(false)
            .six_day_week(false);
        let days = c
            .get_by_period(&period_date(first), &period_date(last), &filter)
            .unwrap();
        assert_eq!(days.len() as i64, (last - first).num_days() + 1, "{first}..{last}");
        assert!(all_known(&days));
    }
}

#[test]
fn new_year_week_has_four_working_days() {
    let c = client();
    let days = c
        .get_by_period("20240101", "20240107", &Filter::new())
        .unwrap();
    let working = days.iter().filter(|d| d.is_working()).count();
    assert_eq!(working, 4);
}

#[test]
fn today_and_tomorrow_return_known_day() {
    let c = client().strict(true);
    for cc in [CountryCode::Kazakhstan, CountryCode::Russia, CountryCode::Ukraine] {
        let filter = Filter::new().country(cc).pre(false).covid(false);
        assert!(c.today(&filter).unwrap().is_known());
        assert!(c.tomorrow(&filter).unwrap().is_known());
    }
    let with_tz = Filter::new().tz("Europe/Moscow");
    assert!(c.today(&with_tz).unwrap().is_known());
}

#[test]
fn impossible_date_is_a_typed_api_error() {
    let c = client();
    let err = c
        .get_by_period("20240230", "20240228", &Filter::new())
        .unwrap_err();
    match err {
        Error::Api(api) => {
            assert_eq!(api.code, ErrorCode::WrongDate);
            assert_eq!(api.status, 400);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn unsupported_year_is_not_found() {
    let c = client();
    let err = c.get_by(&Filter::year(1700)).unwrap_err();
    assert_eq!(err.api_code(), Some(ErrorCode::NotFound));
}

#[test]
fn transport_returns_error_status_and_body_as_data() {
    init_tracing();
    let addr = start_server();
    let req = HttpRequest {
        url: format!("http://{addr}/api/isleap"),
        headers: Vec::new(),
    };
    let resp = UreqTransport::new().execute(&req).unwrap();
    assert_eq!(resp.status, 400);
    assert_eq!(resp.body, "100");
}

#[test]
fn unknown_route_is_an_unexpected_status() {
    init_tracing();
    let addr = start_server();
    let c = DayOffClient::with_base_url(UreqTransport::new(), &format!("http://{addr}/missing"));
    let err = c.today(&Filter::new()).unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
}

#[test]
fn closed_port_is_a_transport_error() {
    init_tracing();
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let c = DayOffClient::with_base_url(UreqTransport::new(), &format!("http://{addr}"));
    let err = c.is_leap(2024).unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}
