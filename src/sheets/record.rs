use chrono::{SecondsFormat, Utc};

use crate::schema::Submission;

/// One row bound for the sheet: server-generated ISO-8601 timestamp first,
/// then the submission fields in declared column order. Built once per
/// append; never persisted locally.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    cells: Vec<String>,
}

/// Header tuple for row 1. Must stay in lockstep with the cells
/// `StoredRecord::new` produces for the same variant; the tests below pin
/// both lengths and order.
pub fn header_row(collect_phone: bool) -> Vec<&'static str> {
    let mut headers = vec!["Timestamp", "Name"];
    if collect_phone {
        headers.push("Phone");
    }
    headers.extend([
        "College",
        "Year",
        "Preference 1",
        "Preference 2",
        "About Yourself",
        "Why Join",
        "Resume Link",
    ]);
    headers
}

/// Letter of the last populated column, for building A1-notation ranges.
pub fn last_column(collect_phone: bool) -> char {
    if collect_phone {
        'J'
    } else {
        'I'
    }
}

impl StoredRecord {
    /// Capture the append timestamp now and lay the submission out in
    /// column order. When the form does not collect a phone number the
    /// column is omitted entirely (9-column layout), even if the payload
    /// carried one.
    pub fn new(submission: &Submission, collect_phone: bool) -> Self {
        let mut cells = vec![
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            submission.name.clone(),
        ];
        if collect_phone {
            cells.push(submission.phone.clone().unwrap_or_default());
        }
        cells.extend([
            submission.college.clone(),
            submission.year.clone(),
            submission.preference1.clone(),
            submission.preference2.clone(),
            submission.about_yourself.clone(),
            submission.why_join.clone(),
            submission.resume_link.clone(),
        ]);
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}
