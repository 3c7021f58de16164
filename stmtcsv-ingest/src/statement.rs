//! Whole-statement extraction: normalized lines in, record table and file name out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::Result;
use crate::parsers::line::parse_line;
use crate::parsers::period::{derive_output_name, detect_period};
use crate::types::{LineReject, OutputName, StatementPeriod, TransactionRecord};

/// Tally of how the normalized lines of a statement were handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub lines: usize,
    pub kept: usize,
    pub no_post_date: usize,
    pub no_description: usize,
    pub no_amount_or_balance: usize,
}

impl ExtractionReport {
    fn reject(&mut self, reason: LineReject) {
        match reason {
            LineReject::NoPostDate => self.no_post_date += 1,
            LineReject::NoDescription => self.no_description += 1,
            LineReject::NoAmountOrBalance => self.no_amount_or_balance += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.no_post_date + self.no_description + self.no_amount_or_balance
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub records: Vec<TransactionRecord>,
    pub output_name: OutputName,
    pub period: Option<StatementPeriod>,
    pub report: ExtractionReport,
}

impl Statement {
    /// Extract records and derive the output name from raw statement text.
    ///
    /// `today` is only consulted when the name comes from a leading `MM-DD`
    /// date, which carries no year.
    pub fn from_text(text: &str, today: NaiveDate) -> Result<Self> {
        let output_name = derive_output_name(text, today)?;
        let (records, report) = extract_transactions(text);

        debug!(
            lines = report.lines,
            kept = report.kept,
            rejected = report.rejected(),
            "extracted statement"
        );

        Ok(Self {
            records,
            output_name,
            period: detect_period(text),
            report,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.output_name.file_name
    }
}

/// Split on newlines, trim, and drop blank lines.
pub fn normalize_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Parse every normalized line, keeping records in line order.
pub fn extract_transactions(text: &str) -> (Vec<TransactionRecord>, ExtractionReport) {
    let mut report = ExtractionReport::default();
    let mut out = Vec::new();

    for line in normalize_lines(text) {
        report.lines += 1;

        let parsed = parse_line(line).and_then(|fields| TransactionRecord::from_fields(&fields));
        match parsed {
            Ok(record) => {
                report.kept += 1;
                out.push(record);
            }
            Err(reason) => {
                trace!(?reason, "skipped line: {line:?}");
                report.reject(reason);
            }
        }
    }

    (out, report)
}
