//! Document dates recovered from file names, URLs and free-form strings.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static COMPACT_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"((?:19|20)\d{2})(\d{2})(\d{2})").unwrap());
static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:19|20)\d{2}").unwrap());

const FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"];

/// Date of a source document.
///
/// Dates are best-effort: a reference that only carries a year yields
/// [`DocumentDate::YearOnly`], and one with no date at all yields
/// [`DocumentDate::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DocumentDate {
    /// Full calendar date.
    Exact(NaiveDate),
    /// Only the year is known; rendered as January 1st.
    YearOnly(i32),
    /// No date could be recovered.
    #[default]
    Unknown,
}

impl DocumentDate {
    /// Extracts a date from a file name or URL.
    ///
    /// The first valid `YYYYMMDD` run wins; otherwise the first `19xx`/`20xx`
    /// year is used.
    pub fn from_reference(reference: &str) -> Self {
        for caps in COMPACT_DATE.captures_iter(reference) {
            let year = caps[1].parse::<i32>();
            let month = caps[2].parse::<u32>();
            let day = caps[3].parse::<u32>();
            if let (Ok(year), Ok(month), Ok(day)) = (year, month, day) {
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    return DocumentDate::Exact(date);
                }
            }
        }

        YEAR.find(reference)
            .and_then(|m| m.as_str().parse().ok())
            .map(DocumentDate::YearOnly)
            .unwrap_or(DocumentDate::Unknown)
    }

    /// Parses a free-form date string.
    ///
    /// Accepts `2023-03-22`, `03/22/2023`, `March 22, 2023` and `Mar 22, 2023`,
    /// then falls back to [`from_reference`](Self::from_reference).
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case("unknown") {
            return DocumentDate::Unknown;
        }

        FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
            .map(DocumentDate::Exact)
            .unwrap_or_else(|| Self::from_reference(text))
    }

    /// Returns the year, if known.
    pub fn year(&self) -> Option<i32> {
        match self {
            DocumentDate::Exact(date) => Some(date.year()),
            DocumentDate::YearOnly(year) => Some(*year),
            DocumentDate::Unknown => None,
        }
    }

    /// Returns the calendar day the date stands for; year-only dates map
    /// to January 1st.
    pub fn first_day(&self) -> Option<NaiveDate> {
        match self {
            DocumentDate::Exact(date) => Some(*date),
            DocumentDate::YearOnly(year) => NaiveDate::from_ymd_opt(*year, 1, 1),
            DocumentDate::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentDate::Unknown)
    }
}

impl fmt::Display for DocumentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentDate::Exact(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            DocumentDate::YearOnly(year) => write!(f, "{:04}-01-01", year),
            DocumentDate::Unknown => f.write_str("Unknown"),
        }
    }
}

impl From<DocumentDate> for String {
    fn from(date: DocumentDate) -> Self {
        date.to_string()
    }
}

impl From<String> for DocumentDate {
    fn from(text: String) -> Self {
        DocumentDate::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DocumentDate {
        DocumentDate::Exact(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_from_file_name() {
        assert_eq!(DocumentDate::from_reference("FOMCpresconf20230322.txt"), ymd(2023, 3, 22));
        assert_eq!(DocumentDate::from_reference("fomc20200315confcall.txt"), ymd(2020, 3, 15));
    }

    #[test]
    fn test_from_url() {
        let url = "https://www.federalreserve.gov/monetarypolicy/fomcminutes20221214.htm";
        assert_eq!(DocumentDate::from_reference(url), ymd(2022, 12, 14));
    }

    #[test]
    fn test_invalid_compact_date_falls_back_to_year() {
        assert_eq!(DocumentDate::from_reference("report-20231399.pdf"), DocumentDate::YearOnly(2023));
    }

    #[test]
    fn test_year_only_and_unknown() {
        assert_eq!(DocumentDate::from_reference("speech/powell2019a.htm"), DocumentDate::YearOnly(2019));
        assert_eq!(DocumentDate::from_reference("statement.htm"), DocumentDate::Unknown);
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(DocumentDate::parse("2023-03-22"), ymd(2023, 3, 22));
        assert_eq!(DocumentDate::parse("03/22/2023"), ymd(2023, 3, 22));
        assert_eq!(DocumentDate::parse("March 22, 2023"), ymd(2023, 3, 22));
        assert_eq!(DocumentDate::parse("Mar 22, 2023"), ymd(2023, 3, 22));
        assert_eq!(DocumentDate::parse(""), DocumentDate::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(ymd(2023, 3, 2).to_string(), "2023-03-02");
        assert_eq!(DocumentDate::YearOnly(2019).to_string(), "2019-01-01");
        assert_eq!(DocumentDate::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_display_parse_roundtrip() {
        for date in [ymd(2021, 11, 3), DocumentDate::Unknown] {
            assert_eq!(DocumentDate::parse(&date.to_string()), date);
        }
        // Year-only dates render as a full date.
        assert_eq!(DocumentDate::parse(&DocumentDate::YearOnly(2019).to_string()), ymd(2019, 1, 1));
    }

    #[test]
    fn test_year_and_first_day() {
        assert_eq!(ymd(2023, 3, 22).year(), Some(2023));
        assert_eq!(DocumentDate::YearOnly(2019).year(), Some(2019));
        assert_eq!(DocumentDate::Unknown.year(), None);

        assert_eq!(DocumentDate::YearOnly(2019).first_day(), NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(DocumentDate::Unknown.first_day(), None);

        assert!(DocumentDate::YearOnly(2019).is_known());
        assert!(!DocumentDate::Unknown.is_known());
    }

    #[test]
    fn test_ordering_places_unknown_last() {
        let mut dates = vec![DocumentDate::Unknown, ymd(2023, 1, 1), ymd(2020, 6, 1)];
        dates.sort();
        assert_eq!(dates[0], ymd(2020, 6, 1));
        assert_eq!(dates[2], DocumentDate::Unknown);
    }
}
