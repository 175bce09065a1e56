use chrono::{Datelike, NaiveDate};
use csv::StringRecord;
use log::debug;
use thiserror::Error;

use super::loader::RawTable;
use super::model::{Paper, PaperSet};

// ---------------------------------------------------------------------------
// Column projection
// ---------------------------------------------------------------------------

/// Source columns the pipeline knows about; anything else in the input is
/// ignored.  Only `title` and `publish_time` are mandatory.
pub const RECOGNIZED_COLUMNS: [&str; 7] = [
    "title",
    "abstract",
    "publish_time",
    "journal",
    "authors",
    "doi",
    "source_x",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CleanError {
    #[error("required column '{0}' is missing from the input")]
    MissingColumn(&'static str),
}

/// Positions of the recognized columns within the raw header.
struct ColumnIndex {
    title: usize,
    publish_time: usize,
    abstract_text: Option<usize>,
    journal: Option<usize>,
    authors: Option<usize>,
    doi: Option<usize>,
    source: Option<usize>,
}

impl ColumnIndex {
    fn locate(table: &RawTable) -> Result<Self, CleanError> {
        Ok(ColumnIndex {
            title: table
                .column("title")
                .ok_or(CleanError::MissingColumn("title"))?,
            publish_time: table
                .column("publish_time")
                .ok_or(CleanError::MissingColumn("publish_time"))?,
            abstract_text: table.column("abstract"),
            journal: table.column("journal"),
            authors: table.column("authors"),
            doi: table.column("doi"),
            source: table.column("source_x"),
        })
    }
}

// ---------------------------------------------------------------------------
// Cleaning pipeline
// ---------------------------------------------------------------------------

/// Turn a raw table into the cleaned record set.
///
/// Rows without a title are dropped, then rows whose `publish_time` does not
/// parse as a calendar date.  Every surviving row gets its derived fields
/// (`year`, word counts) computed in the same pass.
pub fn clean(table: &RawTable) -> Result<PaperSet, CleanError> {
    let cols = ColumnIndex::locate(table)?;

    let mut papers = Vec::with_capacity(table.rows.len());
    let mut dropped_no_title = 0usize;
    let mut dropped_bad_date = 0usize;

    for row in &table.rows {
        let Some(title) = field(row, Some(cols.title)) else {
            dropped_no_title += 1;
            continue;
        };
        let date = field(row, Some(cols.publish_time));
        let Some(publish_time) = date.as_deref().and_then(parse_publish_date) else {
            dropped_bad_date += 1;
            continue;
        };

        let abstract_text = field(row, cols.abstract_text);
        let title_words = word_count(&title);
        let abstract_words = abstract_text.as_deref().map(word_count).unwrap_or(0);

        papers.push(Paper {
            title,
            abstract_text,
            publish_time,
            journal: field(row, cols.journal),
            authors: field(row, cols.authors),
            doi: field(row, cols.doi),
            source: field(row, cols.source),
            year: publish_time.year(),
            title_words,
            abstract_words,
        });
    }

    debug!(
        "Cleaned {} rows: kept {}, dropped {} without title, {} without a valid date",
        table.rows.len(),
        papers.len(),
        dropped_no_title,
        dropped_bad_date
    );

    Ok(PaperSet::from_papers(papers))
}

/// Fetch a cell, treating empty (or whitespace-only) fields as absent.
fn field(row: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Whitespace-separated token count.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

/// Parse the free-text `publish_time` column.
///
/// CORD-19 carries several shapes: full dates (`2020-03-15`, `2020 Apr 17`),
/// month precision (`2020-03`, `2020 Apr`, pinned to the first of the
/// month), and bare years (pinned to January 1).  Anything else is absent.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%Y %b %d", "%b %d %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Month precision: pin to the first of the month.
    for (suffix, fmt) in [("-01", "%Y-%m-%d"), (" 1", "%Y %b %d")] {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}{suffix}"), fmt) {
            return Some(date);
        }
    }

    // Bare year: pin to January 1.  Out-of-range numbers (page counts,
    // ids) are not dates.
    s.parse::<i32>()
        .ok()
        .filter(|year| (1800..=2100).contains(year))
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    fn raw(csv: &str) -> RawTable {
        load_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn keeps_only_rows_with_title_and_valid_date() {
        let table = raw(
            "title,abstract,publish_time\n\
             X,a b c,2020-01-01\n\
             ,,2020-02-01\n\
             Y,,not-a-date\n",
        );
        let set = clean(&table).unwrap();
        assert_eq!(set.len(), 1);

        let paper = &set.papers[0];
        assert_eq!(paper.title, "X");
        assert_eq!(paper.year, 2020);
        assert_eq!(paper.abstract_words, 3);
        assert_eq!(paper.title_words, 1);
    }

    #[test]
    fn missing_title_column_is_an_explicit_error() {
        let table = raw("abstract,publish_time\na b,2020-01-01\n");
        assert_eq!(
            clean(&table).unwrap_err(),
            CleanError::MissingColumn("title")
        );
    }

    #[test]
    fn missing_date_column_is_an_explicit_error() {
        let table = raw("title,abstract\nX,a b\n");
        assert_eq!(
            clean(&table).unwrap_err(),
            CleanError::MissingColumn("publish_time")
        );
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let table = raw("title,publish_time\nX,2020-01-01\n");
        let set = clean(&table).unwrap();
        let paper = &set.papers[0];
        assert_eq!(paper.abstract_text, None);
        assert_eq!(paper.abstract_words, 0);
        assert_eq!(paper.journal, None);
        assert_eq!(paper.journal_display(), "unknown");
    }

    #[test]
    fn unique_years_and_journals_are_collected() {
        let table = raw(
            "title,publish_time,journal\n\
             X,2020-01-01,J2\n\
             Y,2019-05-02,J1\n\
             Z,2020-07-03,J2\n",
        );
        let set = clean(&table).unwrap();
        assert_eq!(set.years, vec![2019, 2020]);
        assert_eq!(set.journals, vec!["J2", "J1"]);
    }

    #[test]
    fn word_counts_split_on_any_whitespace() {
        assert_eq!(word_count("a b c"), 3);
        assert_eq!(word_count("  a\t b \n c  "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn publish_date_shapes() {
        let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(parse_publish_date("2020-03-15"), Some(d(2020, 3, 15)));
        assert_eq!(parse_publish_date("2020/03/15"), Some(d(2020, 3, 15)));
        assert_eq!(parse_publish_date("2020 Apr 17"), Some(d(2020, 4, 17)));
        assert_eq!(parse_publish_date("2020-03"), Some(d(2020, 3, 1)));
        assert_eq!(parse_publish_date("2020 Apr"), Some(d(2020, 4, 1)));
        assert_eq!(parse_publish_date("2020"), Some(d(2020, 1, 1)));
        assert_eq!(parse_publish_date("not-a-date"), None);
        assert_eq!(parse_publish_date("2020-13-01"), None);
        assert_eq!(parse_publish_date(""), None);
        assert_eq!(parse_publish_date("42"), None);
    }
}
