use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use stmtcsv_ingest::{NameSource, Statement, convert_file};
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[test]
fn test_convert_june_statement_to_csv() {
    let out = tempfile::tempdir().unwrap();
    let out_dir = out.path().join("nested").join("csv");

    let path = convert_file(fixture_path("june_2021.txt"), &out_dir, today()).unwrap();
    assert_eq!(path, out_dir.join("June_2021_transactions.csv"));

    let written = fs::read_to_string(&path).unwrap();
    let expected = "\
Post Date,Transaction Date,Amount,Balance,Description
06-01,06-01,3210.44,,Beginning Balance
06-01,05-30,-54.21,3156.23,H-E-B #455 SAN MARCOS TX
06-02,06-01,-1125.00,2031.23,RENT PAYMENT ONLINE TRANSFER
06-04,06-04,2450.00,4481.23,DIRECT DEP ACME CORP PAYROLL
06-07,06-05,-12.99,,\"NETFLIX.COM, LOS GATOS CA\"
06-15,06-14,-88.40,4379.84,SHELL OIL 57444
06-30,06-30,4379.84,,Ending Balance
";
    assert_eq!(written, expected);
}

#[test]
fn test_written_csv_reads_back_with_headers() {
    let out = tempfile::tempdir().unwrap();
    let path = convert_file(fixture_path("june_2021.txt"), out.path(), today()).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["Post Date", "Transaction Date", "Amount", "Balance", "Description"]
    );
    assert_eq!(rdr.records().count(), 7);
}

#[test]
fn test_report_counts_skipped_lines() {
    let text = fs::read_to_string(fixture_path("june_2021.txt")).unwrap();
    let st = Statement::from_text(&text, today()).unwrap();

    assert_eq!(st.report.lines, 14);
    assert_eq!(st.report.kept, 7);
    assert_eq!(st.report.no_amount_or_balance, 1);
    assert_eq!(st.report.rejected(), 7);
    assert!(matches!(st.output_name.source, NameSource::Period { .. }));
}

#[test]
fn test_leading_date_statement_lands_in_current_year() {
    let out = tempfile::tempdir().unwrap();
    let input = out.path().join("paste.txt");
    fs::write(&input, "03-15 03-14 120.50 880.00 GROCERY OUTLET\n03-16 5.25 BLUE BOTTLE\n").unwrap();

    let path = convert_file(&input, out.path(), today()).unwrap();
    assert_eq!(path.file_name().unwrap(), "Mar_2026_transactions.csv");
}

#[test]
fn test_no_date_hint_uses_fallback_name() {
    let out = tempfile::tempdir().unwrap();
    let input = out.path().join("notes.txt");
    fs::write(&input, "Nothing to see here\n").unwrap();

    let path = convert_file(&input, out.path(), today()).unwrap();
    assert_eq!(path.file_name().unwrap(), "2020_2021_June_transactions.csv");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Post Date,Transaction Date,Amount,Balance,Description\n"
    );
}
