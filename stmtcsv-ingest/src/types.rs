use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parsers::line::LineFields;

/// One statement row, ready for the CSV table.
///
/// Amount and balance stay as printed (minus thousands separators); they are
/// never converted to numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Post Date")]
    pub post_date: String,
    #[serde(rename = "Transaction Date")]
    pub trans_date: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Balance")]
    pub balance: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl TransactionRecord {
    /// Build a record from parsed line fields.
    ///
    /// Fails with [`LineReject::NoAmountOrBalance`] when the line carries no
    /// numeric column at all; such lines are headings or notes, not transactions.
    pub fn from_fields(fields: &LineFields<'_>) -> Result<Self, LineReject> {
        let amount = fields.amount.map(strip_thousands).unwrap_or_default();
        let balance = fields.balance.map(strip_thousands).unwrap_or_default();
        if amount.is_empty() && balance.is_empty() {
            return Err(LineReject::NoAmountOrBalance);
        }

        Ok(Self {
            post_date: fields.post_date.to_string(),
            trans_date: fields.trans_date.unwrap_or(fields.post_date).to_string(),
            amount,
            balance,
            description: fields.description.to_string(),
        })
    }
}

fn strip_thousands(s: &str) -> String {
    s.replace(',', "")
}

/// Why a normalized line did not become a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineReject {
    /// The line does not open with a `DD-DD` token.
    NoPostDate,
    /// Nothing is left over for the description.
    NoDescription,
    /// The line parsed but has neither amount nor balance.
    NoAmountOrBalance,
}

/// Date range printed in the statement header ("June 1, 2021 to June 30, 2021").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Derived CSV file name together with the path that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputName {
    pub file_name: String,
    pub source: NameSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum NameSource {
    /// Start date of the statement period.
    Period { start: NaiveDate },
    /// Month of the `MM-DD` date opening the text, with the injected current year.
    LeadingDate { month: u32, year: i32 },
    /// Fixed fallback name.
    Fallback { reason: FallbackReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum FallbackReason {
    /// A period phrase was found but its start date did not parse.
    PeriodUnparseable { text: String, error: String },
    /// Neither a period phrase nor a leading date exists.
    NoDateFound,
}

impl NameSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, NameSource::Fallback { .. })
    }
}

impl std::fmt::Display for NameSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameSource::Period { start } => write!(f, "statement period starting {start}"),
            NameSource::LeadingDate { month, year } => {
                write!(f, "leading date (month {month:02}, year {year})")
            }
            NameSource::Fallback { reason: FallbackReason::NoDateFound } => {
                write!(f, "fallback (no date found)")
            }
            NameSource::Fallback {
                reason: FallbackReason::PeriodUnparseable { text, error },
            } => write!(f, "fallback (could not parse '{text}': {error})"),
        }
    }
}
