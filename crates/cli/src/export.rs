//! Table writers for `rolescout run`.
//!
//! - `tsv` (default) and `csv` via the `csv` crate, header always written
//! - `json` as an array of objects keyed by column name, in column order

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use rolescout_ranker::Table;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Tsv,
    Csv,
    Json,
}

/// Write `table` to `out`, or stdout when `None`. Returns the destination label.
pub fn write_table(table: &Table, format: OutputFormat, out: Option<&Path>) -> Result<String, CliError> {
    let out_label = out
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());

    let writer: Box<dyn Write> = match out {
        Some(path) => {
            let f = std::fs::File::create(path).map_err(|e| {
                CliError::io(format!("cannot create {}: {}", path.display(), e))
            })?;
            Box::new(std::io::BufWriter::new(f))
        }
        None => Box::new(std::io::BufWriter::new(std::io::stdout().lock())),
    };

    match format {
        OutputFormat::Tsv => write_delimited(table, b'\t', writer),
        OutputFormat::Csv => write_delimited(table, b',', writer),
        OutputFormat::Json => write_json(table, writer),
    }
    .map_err(|e| CliError::io(format!("failed to write {out_label}: {e}")))?;

    Ok(out_label)
}

fn write_delimited(table: &Table, delimiter: u8, writer: impl Write) -> std::io::Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(table.header())?;
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()
}

fn write_json(table: &Table, mut writer: impl Write) -> std::io::Result<()> {
    let objects: Vec<serde_json::Map<String, serde_json::Value>> = table
        .rows()
        .iter()
        .map(|row| {
            table
                .header()
                .iter()
                .zip(row)
                .map(|(col, cell)| (col.clone(), serde_json::Value::String(cell.clone())))
                .collect()
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &objects)?;
    writeln!(writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolescout_ranker::{NameFormat, OrgReport, OrgStatus, Rank, ScoredCandidate};
    use rolescout_ranker::shaper::shape;

    fn table() -> Table {
        let ok = OrgReport {
            domain: "acme.test".into(),
            status: OrgStatus::Success,
            contacts: vec![ScoredCandidate {
                id: Some("p1".into()),
                first: "Ana".into(),
                last: "Lima, Jr".into(),
                full: "Ana Lima, Jr".into(),
                title: "CEO".into(),
                email: None,
                rank: Rank::Ranked(0),
            }],
        };
        let failed = OrgReport::failed("empty.test", "No contacts found");
        Table::from_rows(&[shape(&ok, NameFormat::Combined), shape(&failed, NameFormat::Combined)])
    }

    fn render(format: OutputFormat) -> String {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        write_table(&table(), format, Some(&path)).unwrap();
        std::fs::read_to_string(&path).unwrap()
    }

    #[test]
    fn test_tsv() {
        assert_eq!(
            render(OutputFormat::Tsv),
            "Status\tClean Domain\tName_1\tTitle_1\tEmail_1\n\
             Success\tacme.test\tAna Lima, Jr\tCEO\tN/A\n\
             No contacts found\tempty.test\t\t\t\n"
        );
    }

    #[test]
    fn test_csv_quotes_commas() {
        let text = render(OutputFormat::Csv);
        assert!(text.starts_with("Status,Clean Domain,Name_1,Title_1,Email_1\n"));
        assert!(text.contains("Success,acme.test,\"Ana Lima, Jr\",CEO,N/A\n"));
    }

    #[test]
    fn test_json_keeps_column_order() {
        let text = render(OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let first = value[0].as_object().unwrap();
        let keys: Vec<&str> = first.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Status", "Clean Domain", "Name_1", "Title_1", "Email_1"]);
        assert_eq!(value[1]["Status"], "No contacts found");
        assert_eq!(value[1]["Email_1"], "");
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.tsv");
        let err = write_table(&table(), OutputFormat::Tsv, Some(&path)).unwrap_err();
        assert!(err.message.contains("cannot create"));
    }
}
