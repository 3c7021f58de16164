//! Statement period detection and output file naming.
//!
//! Statements usually print their period in the header:
//!   Transactions from June 1, 2021 to June 30, 2021
//!
//! The start month names the CSV. Without a period, a text that opens with an
//! `MM-DD` row borrows that month and the current year; anything else gets
//! the fixed fallback name.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::types::{FallbackReason, NameSource, OutputName, StatementPeriod};

/// Name used when nothing in the text hints at the statement month.
pub const FALLBACK_FILE_NAME: &str = "2020_2021_June_transactions.csv";

static MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

lazy_static! {
    static ref PERIOD_PHRASE: Regex =
        Regex::new(r"(\w+ \d{1,2}, \d{4}) to (\w+ \d{1,2}, \d{4})").unwrap();
    // Not multi-line: only the very start of the text counts. ASCII digits
    // only, so the month always parses.
    static ref LEADING_DATE: Regex = Regex::new(r"^([0-9]{2})-([0-9]{2})").unwrap();
}

/// Find the first "<Month> <D>, <YYYY> to <Month> <D>, <YYYY>" phrase and
/// return its two date strings.
pub fn find_period_phrase(text: &str) -> Option<(&str, &str)> {
    let caps = PERIOD_PHRASE.captures(text)?;
    let start = caps.get(1)?.as_str();
    let end = caps.get(2)?.as_str();
    Some((start, end))
}

/// Month spellings seen on statements that chrono's `%B` does not know.
static MONTH_ALIASES: [(&str, &str); 1] = [("sept", "Sep")];

/// Parse "June 1, 2021" (abbreviated month names are accepted too).
pub fn parse_statement_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    let s = s.trim();
    let (month, rest) = s.split_once(' ').unwrap_or((s, ""));
    match MONTH_ALIASES
        .iter()
        .find(|(alias, _)| month.eq_ignore_ascii_case(alias))
    {
        Some((_, canonical)) => NaiveDate::parse_from_str(&format!("{canonical} {rest}"), "%B %d, %Y"),
        None => NaiveDate::parse_from_str(s, "%B %d, %Y"),
    }
}

/// The statement period, when the phrase exists and both ends parse.
pub fn detect_period(text: &str) -> Option<StatementPeriod> {
    let (start, end) = find_period_phrase(text)?;
    Some(StatementPeriod {
        start: parse_statement_date(start).ok()?,
        end: parse_statement_date(end).ok()?,
    })
}

/// Month number of the `MM-DD` date the text opens with, if any.
pub fn leading_month(text: &str) -> Option<u32> {
    LEADING_DATE.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Three-letter English abbreviation for a 1-based month.
pub fn month_abbreviation(month: u32) -> Result<&'static str> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_ABBREVIATIONS.get(i as usize))
        .copied()
        .ok_or(IngestError::MonthOutOfRange { month })
}

/// Derive the CSV file name for a statement.
///
/// `today` supplies the year for the leading-date path. A period whose start
/// date does not parse falls back to [`FALLBACK_FILE_NAME`]; a leading date
/// with an impossible month is an error.
pub fn derive_output_name(text: &str, today: NaiveDate) -> Result<OutputName> {
    let name = if let Some((start_text, _)) = find_period_phrase(text) {
        match parse_statement_date(start_text) {
            Ok(start) => OutputName {
                file_name: format!("{}_{}_transactions.csv", start.format("%B"), start.year()),
                source: NameSource::Period { start },
            },
            Err(e) => fallback(FallbackReason::PeriodUnparseable {
                text: start_text.to_string(),
                error: e.to_string(),
            }),
        }
    } else if let Some(month) = leading_month(text) {
        let abbrev = month_abbreviation(month)?;
        let year = today.year();
        OutputName {
            file_name: format!("{abbrev}_{year}_transactions.csv"),
            source: NameSource::LeadingDate { month, year },
        }
    } else {
        fallback(FallbackReason::NoDateFound)
    };

    debug!(file_name = %name.file_name, source = %name.source, "derived output name");
    Ok(name)
}

fn fallback(reason: FallbackReason) -> OutputName {
    OutputName {
        file_name: FALLBACK_FILE_NAME.to_string(),
        source: NameSource::Fallback { reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_name_from_period() {
        let text = "ACME BANK\nTransactions from June 1, 2021 to June 30, 2021\n05-02 1.00 x\n";
        let name = derive_output_name(text, today()).unwrap();
        assert_eq!(name.file_name, "June_2021_transactions.csv");
        assert_eq!(
            name.source,
            NameSource::Period { start: NaiveDate::from_ymd_opt(2021, 6, 1).unwrap() }
        );
    }

    #[test]
    fn test_period_with_abbreviated_and_padded_start() {
        let name = derive_output_name("Sep 09, 2023 to Oct 8, 2023", today()).unwrap();
        assert_eq!(name.file_name, "September_2023_transactions.csv");
    }

    #[test]
    fn test_period_with_sept_spelling() {
        let name = derive_output_name("Statement Sept 1, 2021 to Sept 30, 2021", today()).unwrap();
        assert_eq!(name.file_name, "September_2021_transactions.csv");
        assert_eq!(
            name.source,
            NameSource::Period { start: NaiveDate::from_ymd_opt(2021, 9, 1).unwrap() }
        );

        let period = detect_period("SEPT 1, 2021 to sept 30, 2021").unwrap();
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2021, 9, 30).unwrap());
    }

    #[test]
    fn test_unparseable_period_falls_back() {
        let name = derive_output_name("Statement Smarch 1, 2021 to June 30, 2021", today()).unwrap();
        assert_eq!(name.file_name, FALLBACK_FILE_NAME);
        match name.source {
            NameSource::Fallback { reason: FallbackReason::PeriodUnparseable { text, .. } } => {
                assert_eq!(text, "Smarch 1, 2021");
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_impossible_start_day_falls_back() {
        let name = derive_output_name("February 30, 2021 to March 29, 2021", today()).unwrap();
        assert_eq!(name.file_name, FALLBACK_FILE_NAME);
        assert!(name.source.is_fallback());
    }

    #[test]
    fn test_name_from_leading_date_uses_injected_year() {
        let text = "03-15 03-15 120.50 880.00 GROCERY\n03-16 5.00 COFFEE\n";
        let name = derive_output_name(text, today()).unwrap();
        assert_eq!(name.file_name, "Mar_2026_transactions.csv");
        assert_eq!(name.source, NameSource::LeadingDate { month: 3, year: 2026 });

        let earlier = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        assert_eq!(derive_output_name(text, earlier).unwrap().file_name, "Mar_2019_transactions.csv");
    }

    #[test]
    fn test_leading_date_is_anchored_to_whole_text() {
        // A transaction line further down does not count.
        let name = derive_output_name("Header\n03-15 120.50 GROCERY\n", today()).unwrap();
        assert_eq!(name.file_name, FALLBACK_FILE_NAME);
        assert_eq!(name.source, NameSource::Fallback { reason: FallbackReason::NoDateFound });

        // Nor does one preceded by whitespace.
        let name = derive_output_name("  03-15 120.50 GROCERY\n", today()).unwrap();
        assert_eq!(name.file_name, FALLBACK_FILE_NAME);
    }

    #[test]
    fn test_period_wins_over_leading_date() {
        let text = "03-15 1.00 x\nJuly 1, 2022 to July 31, 2022\n";
        assert_eq!(derive_output_name(text, today()).unwrap().file_name, "July_2022_transactions.csv");
    }

    #[test]
    fn test_month_out_of_range_is_fatal() {
        let err = derive_output_name("13-01 1.00 x", today()).unwrap_err();
        assert!(matches!(err, IngestError::MonthOutOfRange { month: 13 }));

        let err = derive_output_name("00-01 1.00 x", today()).unwrap_err();
        assert!(matches!(err, IngestError::MonthOutOfRange { month: 0 }));
    }

    #[test]
    fn test_month_abbreviations() {
        assert_eq!(month_abbreviation(1).unwrap(), "Jan");
        assert_eq!(month_abbreviation(12).unwrap(), "Dec");
    }

    #[test]
    fn test_detect_period_needs_both_ends() {
        let period = detect_period("from June 1, 2021 to June 30, 2021").unwrap();
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2021, 6, 30).unwrap());
        assert_eq!(detect_period("from June 1, 2021 to Junk 30, 2021"), None);
    }
}
