//! Domain vocabulary for the day-off service.
//!
//! # Design
//! Every code the service speaks is a closed enum with an explicit parse
//! function. `DayType` is the one exception to "closed": unrecognized day
//! characters decode to `DayType::Unknown` so that a new code added by the
//! service is flagged rather than silently folded into a known variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Country whose production calendar the service consults.
///
/// The service falls back to Russia when no country is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    #[serde(rename = "by")]
    Belarus,
    #[serde(rename = "kz")]
    Kazakhstan,
    #[serde(rename = "ru")]
    Russia,
    #[serde(rename = "ua")]
    Ukraine,
    #[serde(rename = "us")]
    Usa,
    #[serde(rename = "uz")]
    Uzbekistan,
    #[serde(rename = "tr")]
    Turkey,
}

impl CountryCode {
    pub const ALL: [CountryCode; 7] = [
        CountryCode::Belarus,
        CountryCode::Kazakhstan,
        CountryCode::Russia,
        CountryCode::Ukraine,
        CountryCode::Usa,
        CountryCode::Uzbekistan,
        CountryCode::Turkey,
    ];

    /// Lowercase two-letter tag sent as the `cc` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            CountryCode::Belarus => "by",
            CountryCode::Kazakhstan => "kz",
            CountryCode::Russia => "ru",
            CountryCode::Ukraine => "ua",
            CountryCode::Usa => "us",
            CountryCode::Uzbekistan => "uz",
            CountryCode::Turkey => "tr",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the supported country tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown country code: {0:?}")]
pub struct ParseCountryCodeError(pub String);

impl FromStr for CountryCode {
    type Err = ParseCountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountryCode::ALL
            .into_iter()
            .find(|cc| cc.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCountryCodeError(s.to_string()))
    }
}

/// Classification of a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    /// `0`
    Working,
    /// `1`
    NonWorking,
    /// `2`, only sent when the `pre` flag is set.
    HalfHoliday,
    /// `4`, only sent when the `covid` flag is set.
    WorkingCovid,
    /// Any character the service sent that is not one of the codes above.
    Unknown(char),
}

impl DayType {
    pub fn from_code(code: char) -> Self {
        match code {
            '0' => DayType::Working,
            '1' => DayType::NonWorking,
            '2' => DayType::HalfHoliday,
            '4' => DayType::WorkingCovid,
            other => DayType::Unknown(other),
        }
    }

    pub fn code(self) -> char {
        match self {
            DayType::Working => '0',
            DayType::NonWorking => '1',
            DayType::HalfHoliday => '2',
            DayType::WorkingCovid => '4',
            DayType::Unknown(c) => c,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, DayType::Unknown(_))
    }

    /// True for every kind of day people go to work on, shortened and
    /// pandemic-mandated days included.
    pub fn is_working(self) -> bool {
        matches!(
            self,
            DayType::Working | DayType::HalfHoliday | DayType::WorkingCovid
        )
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Answer of the leap-year endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearType {
    #[serde(rename = "0")]
    NotLeap,
    #[serde(rename = "1")]
    Leap,
}

impl YearType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(YearType::NotLeap),
            "1" => Some(YearType::Leap),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YearType::NotLeap => "0",
            YearType::Leap => "1",
        }
    }
}

impl fmt::Display for YearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure codes the service writes into the body of non-200 responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "100")]
    WrongDate,
    #[serde(rename = "101")]
    NotFound,
    #[serde(rename = "199")]
    InternalError,
}

impl ErrorCode {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "100" => Some(ErrorCode::WrongDate),
            "101" => Some(ErrorCode::NotFound),
            "199" => Some(ErrorCode::InternalError),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::WrongDate => "100",
            ErrorCode::NotFound => "101",
            ErrorCode::InternalError => "199",
        }
    }

    /// Fixed English text for the code. The service itself answers in
    /// Russian ("Ошибка в дате", "Данные не найдены", "Ошибка сервиса");
    /// callers should branch on the code, not on this text.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::WrongDate => "wrong date",
            ErrorCode::NotFound => "data not found",
            ErrorCode::InternalError => "internal service error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_codes_are_lowercase_two_letter_tags() {
        for cc in CountryCode::ALL {
            let tag = cc.as_str();
            assert_eq!(tag.len(), 2, "{cc:?}");
            assert_eq!(tag, tag.to_ascii_lowercase(), "{cc:?}");
        }
    }

    #[test]
    fn country_code_parses_case_insensitively() {
        assert_eq!("KZ".parse::<CountryCode>().unwrap(), CountryCode::Kazakhstan);
        assert_eq!("us".parse::<CountryCode>().unwrap(), CountryCode::Usa);
        let err = "de".parse::<CountryCode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown country code: \"de\"");
    }

    #[test]
    fn country_code_serde_uses_tag() {
        let json = serde_json::to_string(&CountryCode::Turkey).unwrap();
        assert_eq!(json, "\"tr\"");
        let back: CountryCode = serde_json::from_str("\"by\"").unwrap();
        assert_eq!(back, CountryCode::Belarus);
    }

    #[test]
    fn day_type_codes() {
        assert_eq!(DayType::from_code('0'), DayType::Working);
        assert_eq!(DayType::from_code('1'), DayType::NonWorking);
        assert_eq!(DayType::from_code('2'), DayType::HalfHoliday);
        assert_eq!(DayType::from_code('4'), DayType::WorkingCovid);
        for c in ['0', '1', '2', '4'] {
            assert_eq!(DayType::from_code(c).code(), c);
        }
    }

    #[test]
    fn unrecognized_day_character_is_flagged() {
        let day = DayType::from_code('3');
        assert_eq!(day, DayType::Unknown('3'));
        assert!(!day.is_known());
        assert!(!day.is_working());
        assert_eq!(day.to_string(), "3");
    }

    #[test]
    fn working_days_include_shortened_and_covid() {
        assert!(DayType::Working.is_working());
        assert!(DayType::HalfHoliday.is_working());
        assert!(DayType::WorkingCovid.is_working());
        assert!(!DayType::NonWorking.is_working());
    }

    #[test]
    fn year_type_rejects_anything_but_codes() {
        assert_eq!(YearType::from_code("1"), Some(YearType::Leap));
        assert_eq!(YearType::from_code("0"), Some(YearType::NotLeap));
        assert_eq!(YearType::from_code("2"), None);
        assert_eq!(YearType::from_code(" 1"), None);
    }

    #[test]
    fn error_codes_round_trip_through_wire_form() {
        for code in [ErrorCode::WrongDate, ErrorCode::NotFound, ErrorCode::InternalError] {
            assert_eq!(ErrorCode::from_code(code.as_str()), Some(code));
        }
        assert_eq!(ErrorCode::from_code("999"), None);
    }

    #[test]
    fn error_code_messages_are_fixed() {
        assert_eq!(ErrorCode::WrongDate.message(), "wrong date");
        assert_eq!(ErrorCode::NotFound.message(), "data not found");
        assert_eq!(ErrorCode::InternalError.message(), "internal service error");
    }
}
