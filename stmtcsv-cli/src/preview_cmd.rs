use anyhow::{Context, Result};
use clap::ValueEnum;
use stmtcsv_ingest::{Statement, write_csv};
use std::io;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PreviewFormat {
    /// Summary plus an aligned table
    Text,
    /// The whole extraction as JSON
    Json,
    /// The CSV that `convert` would write
    Csv,
}

pub fn print_preview(statement: &Statement, format: PreviewFormat, limit: Option<usize>) -> Result<()> {
    let shown = limit.unwrap_or(usize::MAX);

    match format {
        PreviewFormat::Text => print_text(statement, shown),
        PreviewFormat::Json => {
            let mut st = statement.clone();
            st.records.truncate(shown);
            println!("{}", serde_json::to_string_pretty(&st)?);
        }
        PreviewFormat::Csv => {
            let records = &statement.records[..shown.min(statement.records.len())];
            write_csv(records, io::stdout().lock()).context("write CSV to stdout")?;
        }
    }

    Ok(())
}

fn print_text(statement: &Statement, shown: usize) {
    let report = &statement.report;

    println!("File name: {}", statement.file_name());
    println!("Named from: {}", statement.output_name.source);
    if let Some(period) = &statement.period {
        println!("Period: {} to {}", period.start, period.end);
    }
    println!(
        "Lines: {} | kept: {} | skipped: {} (no post date: {}, no description: {}, no amount/balance: {})\n",
        report.lines,
        report.kept,
        report.rejected(),
        report.no_post_date,
        report.no_description,
        report.no_amount_or_balance
    );

    println!(
        "{:<9} {:<9} {:>12} {:>12}  {}",
        "Post", "Trans", "Amount", "Balance", "Description"
    );
    for r in statement.records.iter().take(shown) {
        println!(
            "{:<9} {:<9} {:>12} {:>12}  {}",
            r.post_date, r.trans_date, r.amount, r.balance, r.description
        );
    }

    if statement.records.len() > shown {
        println!("... {} more", statement.records.len() - shown);
    }
}
