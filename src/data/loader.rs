use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info, warn};
use thiserror::Error;

// ---------------------------------------------------------------------------
// RawTable – untyped rows straight out of the CSV parser
// ---------------------------------------------------------------------------

/// The raw parsed table before any cleaning.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header row, in file order.
    pub headers: Vec<String>,
    /// Data rows; in permissive mode every row has `headers.len()` fields.
    pub rows: Vec<StringRecord>,
    /// Rows dropped by the permissive fallback (0 for a strict parse).
    pub skipped_rows: usize,
}

impl RawTable {
    /// Index of a named column, if present.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse CSV even with the permissive fallback")]
    Parse(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a CSV file from disk.
///
/// Two-tier parse policy: a strict parse first (any structurally malformed
/// row fails the whole read), then a permissive retry that drops malformed
/// rows instead.  There is no further fallback beyond the second attempt.
pub fn load_path(path: &Path) -> Result<RawTable, LoadError> {
    let table = match read_strict(BufReader::new(open(path)?)) {
        Ok(table) => {
            info!("Loaded {} with the strict parser.", path.display());
            table
        }
        Err(err) => {
            warn!(
                "Strict parse of {} failed ({err}); retrying with the permissive parser.",
                path.display()
            );
            read_permissive(BufReader::new(open(path)?))?
        }
    };
    Ok(table)
}

/// Load a CSV from an in-memory byte slice (uploads, tests).
pub fn load_bytes(bytes: &[u8]) -> Result<RawTable, LoadError> {
    match read_strict(bytes) {
        Ok(table) => Ok(table),
        Err(err) => {
            warn!("Strict parse failed ({err}); retrying with the permissive parser.");
            Ok(read_permissive(bytes)?)
        }
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}

// ---------------------------------------------------------------------------
// Parse tiers
// ---------------------------------------------------------------------------

/// First attempt: the default reader errors out on any row whose field
/// count differs from the header.
fn read_strict<R: Read>(input: R) -> Result<RawTable, csv::Error> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = header_row(&mut reader)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result?);
    }

    Ok(RawTable {
        headers,
        rows,
        skipped_rows: 0,
    })
}

/// Second attempt: a flexible reader that keeps going past bad rows.  A row
/// is dropped when it fails to decode or its field count does not match the
/// header, mirroring a "skip bad lines" parse.
fn read_permissive<R: Read>(input: R) -> Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = header_row(&mut reader)?;

    let mut rows = Vec::new();
    let mut skipped_rows = 0;
    for result in reader.records() {
        match result {
            Ok(record) if record.len() == headers.len() => rows.push(record),
            Ok(record) => {
                debug!(
                    "Dropping row with {} fields (expected {})",
                    record.len(),
                    headers.len()
                );
                skipped_rows += 1;
            }
            Err(err) => {
                debug!("Dropping undecodable row: {err}");
                skipped_rows += 1;
            }
        }
    }

    if skipped_rows > 0 {
        warn!("Permissive parser dropped {skipped_rows} malformed row(s).");
    }

    Ok(RawTable {
        headers,
        rows,
        skipped_rows,
    })
}

fn header_row<R: Read>(reader: &mut csv::Reader<R>) -> Result<Vec<String>, csv::Error> {
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_parse_keeps_all_rows() {
        let csv = b"title,journal\nA,J1\nB,J2\n";
        let table = load_bytes(csv).unwrap();
        assert_eq!(table.headers, vec!["title", "journal"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_rows, 0);
    }

    #[test]
    fn ragged_rows_trigger_fallback_and_are_dropped() {
        let csv = b"title,journal\nA,J1\nB,J2,extra-field\nC,J3\n";
        let table = load_bytes(csv).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_rows, 1);
        assert_eq!(table.rows[0].get(0), Some("A"));
        assert_eq!(table.rows[1].get(0), Some("C"));
    }

    #[test]
    fn short_rows_are_dropped_too() {
        let csv = b"title,journal,doi\nA,J1,d1\nB\n";
        let table = load_bytes(csv).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.skipped_rows, 1);
    }

    #[test]
    fn missing_file_reports_not_found() {
        let err = load_path(Path::new("definitely-not-here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn quoted_commas_survive_the_strict_parse() {
        let csv = b"title,journal\n\"A, with comma\",J1\n";
        let table = load_bytes(csv).unwrap();
        assert_eq!(table.rows[0].get(0), Some("A, with comma"));
        assert_eq!(table.skipped_rows, 0);
    }
}
