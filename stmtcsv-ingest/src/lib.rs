//! stmtcsv-ingest: turn loosely structured bank-statement text into a CSV table.

pub mod error;
pub mod parsers;
pub mod statement;
pub mod types;
pub mod writer;

pub use error::{IngestError, Result};
pub use parsers::period::{FALLBACK_FILE_NAME, derive_output_name};
pub use statement::{ExtractionReport, Statement, extract_transactions, normalize_lines};
pub use types::{
    FallbackReason, LineReject, NameSource, OutputName, StatementPeriod, TransactionRecord,
};
pub use writer::{convert_file, write_csv, write_statement};
