//! CSV output for extracted statements.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::{IngestError, Result};
use crate::statement::Statement;
use crate::types::TransactionRecord;

pub const HEADER: [&str; 5] = ["Post Date", "Transaction Date", "Amount", "Balance", "Description"];

/// Write the header and one row per record. The header is written even for
/// an empty table.
pub fn write_csv<W: Write>(records: &[TransactionRecord], writer: W) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `statement` into `output_dir` under its derived file name,
/// creating the directory if needed. Returns the full path written.
pub fn write_statement(statement: &Statement, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = output_dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| IngestError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(statement.file_name());
    let file = File::create(&path).map_err(|source| IngestError::CreateFile {
        path: path.clone(),
        source,
    })?;
    write_csv(&statement.records, file).map_err(|source| IngestError::Write {
        path: path.clone(),
        source,
    })?;

    info!(
        path = %path.display(),
        records = statement.records.len(),
        "wrote transactions"
    );
    Ok(path)
}

/// Read a statement text file, extract it, and write the CSV into `output_dir`.
pub fn convert_file(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    today: NaiveDate,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let text = fs::read_to_string(input).map_err(|source| IngestError::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let statement = Statement::from_text(&text, today)?;
    write_statement(&statement, output_dir)
}
