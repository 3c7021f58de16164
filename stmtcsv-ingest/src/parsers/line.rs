//! Transaction line grammar.
//!
//! Expected rows after text extraction:
//!   05-02       05-03       1,234.56     9,000.00     Coffee Shop
//!   POST DATE  [TRANS DATE] [AMOUNT]     [BALANCE]    DESCRIPTION
//!
//! Fields may be separated by any amount of whitespace, including none.
//! Optional fields are taken greedily; when that would leave nothing for the
//! description the parser backs off, dropping the latest optional field first.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::types::LineReject;

lazy_static! {
    static ref DATE_TOKEN: Regex = Regex::new(r"^\d{2}-\d{2}").unwrap();
    static ref MONEY_TOKEN: Regex = Regex::new(r"^-?\d+(?:,\d{3})*\.\d{2}").unwrap();
}

/// Raw fields of one matched line, borrowed from the line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFields<'a> {
    pub post_date: &'a str,
    pub trans_date: Option<&'a str>,
    pub amount: Option<&'a str>,
    pub balance: Option<&'a str>,
    pub description: &'a str,
}

/// Take `token` at the start of `input`, returning it and the rest with
/// leading whitespace skipped.
fn take<'a>(token: &Regex, input: &'a str) -> Option<(&'a str, &'a str)> {
    token
        .find(input)
        .map(|m| (m.as_str(), input[m.end()..].trim_start()))
}

/// Candidates for an optional field: present (if it matches) before absent.
fn optional<'a>(token: &Regex, input: &'a str) -> impl Iterator<Item = (Option<&'a str>, &'a str)> {
    take(token, input)
        .map(|(tok, rest)| (Some(tok), rest))
        .into_iter()
        .chain(std::iter::once((None, input)))
}

/// Parse one trimmed, non-empty statement line.
pub fn parse_line(line: &str) -> Result<LineFields<'_>, LineReject> {
    let (post_date, rest) = take(&DATE_TOKEN, line).ok_or(LineReject::NoPostDate)?;

    for (trans_date, after_trans) in optional(&DATE_TOKEN, rest) {
        for (amount, after_amount) in optional(&MONEY_TOKEN, after_trans) {
            for (balance, description) in optional(&MONEY_TOKEN, after_amount) {
                if !description.is_empty() {
                    return Ok(LineFields {
                        post_date,
                        trans_date,
                        amount,
                        balance,
                        description,
                    });
                }
            }
        }
    }

    trace!("no description left after post date: {line:?}");
    Err(LineReject::NoDescription)
}
