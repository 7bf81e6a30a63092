//! Flatten per-organization results into wide positional rows.
//!
//! Each selected contact `i` (1-based) contributes a fixed group of columns:
//! its name field(s), `Title_i` and `Email_i`. Columns are ordered by
//! position first and by field within a position, so contact 1's fields all
//! come before contact 2's.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::model::{NameFormat, OrgReport, OrgStatus};

pub const STATUS_COLUMN: &str = "Status";
pub const DOMAIN_COLUMN: &str = "Clean Domain";
/// Rendered in `Email_i` when no email is known.
pub const MISSING_EMAIL: &str = "N/A";

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    FirstName,
    LastName,
    Name,
    Title,
    Email,
}

impl FieldKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Name => "Name",
            Self::Title => "Title",
            Self::Email => "Email",
        }
    }

    /// Position of the field within one contact's column group.
    fn slot(self) -> u8 {
        match self {
            Self::FirstName | Self::Name => 1,
            Self::LastName => 2,
            Self::Title => 3,
            Self::Email => 4,
        }
    }
}

/// A positional column such as `Title_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub position: usize,
    pub kind: FieldKind,
}

impl Column {
    pub fn name(&self) -> String {
        format!("{}_{}", self.kind.prefix(), self.position)
    }
}

/// Display order for dynamic columns: position, then field slot.
pub fn column_order(a: &Column, b: &Column) -> Ordering {
    a.position
        .cmp(&b.position)
        .then_with(|| a.kind.slot().cmp(&b.kind.slot()))
        .then_with(|| a.kind.prefix().cmp(b.kind.prefix()))
}

impl Ord for Column {
    fn cmp(&self, other: &Self) -> Ordering {
        column_order(self, other)
    }
}

impl PartialOrd for Column {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub column: Column,
    pub value: String,
}

/// One organization's output: status plus ordered contact fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedRow {
    pub domain: String,
    pub status: String,
    pub fields: Vec<Field>,
}

impl ShapedRow {
    pub fn get(&self, column_name: &str) -> Option<&str> {
        match column_name {
            STATUS_COLUMN => Some(&self.status),
            DOMAIN_COLUMN => Some(&self.domain),
            _ => self
                .fields
                .iter()
                .find(|f| f.column.name() == column_name)
                .map(|f| f.value.as_str()),
        }
    }
}

pub fn shape(report: &OrgReport, format: NameFormat) -> ShapedRow {
    let mut fields = Vec::new();

    if report.status == OrgStatus::Success {
        for (idx, c) in report.contacts.iter().enumerate() {
            let position = idx + 1;
            let mut push = |kind: FieldKind, value: &str| {
                fields.push(Field {
                    column: Column { position, kind },
                    value: value.to_string(),
                });
            };

            push(FieldKind::Title, &c.title);
            push(FieldKind::Email, c.email.as_deref().unwrap_or(MISSING_EMAIL));
            match format {
                NameFormat::Separate => {
                    push(FieldKind::FirstName, &c.first);
                    push(FieldKind::LastName, &c.last);
                }
                NameFormat::Combined => push(FieldKind::Name, &c.full),
            }
        }
        fields.sort_by(|a, b| column_order(&a.column, &b.column));
    }

    ShapedRow {
        domain: report.domain.clone(),
        status: report.status.to_string(),
        fields,
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// Export-ready grid: `Status`, `Clean Domain`, then every dynamic column
/// used by any row. Cells a row does not have are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows(rows: &[ShapedRow]) -> Self {
        let columns: BTreeSet<Column> = rows
            .iter()
            .flat_map(|r| r.fields.iter().map(|f| f.column))
            .collect();

        let mut header = vec![STATUS_COLUMN.to_string(), DOMAIN_COLUMN.to_string()];
        header.extend(columns.iter().map(Column::name));

        let rows = rows
            .iter()
            .map(|r| {
                let mut cells = vec![r.status.clone(), r.domain.clone()];
                cells.extend(columns.iter().map(|col| {
                    r.fields
                        .iter()
                        .find(|f| f.column == *col)
                        .map(|f| f.value.clone())
                        .unwrap_or_default()
                }));
                cells
            })
            .collect();

        Self { header, rows }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rank, ScoredCandidate};

    fn contact(first: &str, last: &str, title: &str, email: Option<&str>) -> ScoredCandidate {
        ScoredCandidate {
            id: None,
            first: first.into(),
            last: last.into(),
            full: format!("{first} {last}").trim().to_string(),
            title: title.into(),
            email: email.map(String::from),
            rank: Rank::Ranked(0),
        }
    }

    fn success(domain: &str, contacts: Vec<ScoredCandidate>) -> OrgReport {
        OrgReport { domain: domain.into(), status: OrgStatus::Success, contacts }
    }

    fn names(row: &ShapedRow) -> Vec<String> {
        row.fields.iter().map(|f| f.column.name()).collect()
    }

    #[test]
    fn separate_names_grouped_by_position() {
        let report = success(
            "acme.com",
            vec![
                contact("Ann", "Lee", "CEO", Some("ann@acme.com")),
                contact("Bo", "Kim", "CFO", None),
            ],
        );
        let row = shape(&report, NameFormat::Separate);
        assert_eq!(
            names(&row),
            vec![
                "First Name_1", "Last Name_1", "Title_1", "Email_1",
                "First Name_2", "Last Name_2", "Title_2", "Email_2",
            ]
        );
        assert_eq!(row.get("Email_2"), Some(MISSING_EMAIL));
        assert_eq!(row.get("Status"), Some("Success"));
        assert_eq!(row.get("Clean Domain"), Some("acme.com"));
    }

    #[test]
    fn combined_names() {
        let report = success("acme.com", vec![contact("Ann", "Lee", "CEO", None)]);
        let row = shape(&report, NameFormat::Combined);
        assert_eq!(names(&row), vec!["Name_1", "Title_1", "Email_1"]);
        assert_eq!(row.get("Name_1"), Some("Ann Lee"));
    }

    #[test]
    fn failed_reports_have_no_fields() {
        let report = OrgReport::failed("x.com", "No contacts found");
        let row = shape(&report, NameFormat::Separate);
        assert!(row.fields.is_empty());
        assert_eq!(row.status, "No contacts found");
    }

    #[test]
    fn position_outranks_field() {
        let a = Column { position: 1, kind: FieldKind::Email };
        let b = Column { position: 2, kind: FieldKind::FirstName };
        assert_eq!(column_order(&a, &b), Ordering::Less);
        let c = Column { position: 10, kind: FieldKind::FirstName };
        assert_eq!(column_order(&b, &c), Ordering::Less);
    }

    #[test]
    fn table_unions_columns_and_pads_cells() {
        let rows = vec![
            shape(&success("a.com", vec![contact("Ann", "Lee", "CEO", None)]), NameFormat::Combined),
            shape(
                &success(
                    "b.com",
                    vec![
                        contact("Bo", "Kim", "CFO", Some("bo@b.com")),
                        contact("Cy", "Ng", "COO", None),
                    ],
                ),
                NameFormat::Combined,
            ),
            shape(&OrgReport::failed("c.com", "Search Error (500)"), NameFormat::Combined),
        ];
        let table = Table::from_rows(&rows);
        assert_eq!(
            table.header(),
            &[
                "Status", "Clean Domain", "Name_1", "Title_1", "Email_1", "Name_2", "Title_2",
                "Email_2"
            ]
        );
        assert_eq!(table.rows()[0], vec!["Success", "a.com", "Ann Lee", "CEO", "N/A", "", "", ""]);
        assert_eq!(table.rows()[1][5], "Cy Ng");
        assert_eq!(table.rows()[2], vec!["Search Error (500)", "c.com", "", "", "", "", "", ""]);
    }
}
