use std::collections::HashSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Paper – one cleaned row of publication metadata
// ---------------------------------------------------------------------------

/// A single publication record after cleaning.
///
/// Only `title` and `publish_time` are guaranteed present; every other
/// source column is dataset-dependent and stays `Option`.  Absent values are
/// defaulted at the point of display, never here.  The derived fields
/// (`year`, word counts) are computed by the cleaner together with their
/// sources and are never updated independently.
#[derive(Debug, Clone)]
pub struct Paper {
    pub title: String,
    pub abstract_text: Option<String>,
    pub publish_time: NaiveDate,
    pub journal: Option<String>,
    pub authors: Option<String>,
    pub doi: Option<String>,
    /// The `source_x` tag of the CORD-19 metadata (PMC, Elsevier, …).
    pub source: Option<String>,

    /// Calendar year of `publish_time`.
    pub year: i32,
    /// Whitespace-separated token count of `title`.
    pub title_words: u32,
    /// Whitespace-separated token count of `abstract_text` (0 when absent).
    pub abstract_words: u32,
}

impl Paper {
    /// Journal name for display; the field is noisy and often empty.
    pub fn journal_display(&self) -> &str {
        self.journal.as_deref().unwrap_or("unknown")
    }

    /// Authors for display.
    pub fn authors_display(&self) -> &str {
        self.authors.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// PaperSet – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with pre-computed lookup lists for the UI.
#[derive(Debug, Clone, Default)]
pub struct PaperSet {
    /// All cleaned records.
    pub papers: Vec<Paper>,
    /// Unique publication years, ascending.
    pub years: Vec<i32>,
    /// Unique journal names in first-appearance order.
    pub journals: Vec<String>,
}

impl PaperSet {
    /// Build the lookup lists from the cleaned records.
    pub fn from_papers(papers: Vec<Paper>) -> Self {
        let mut years: Vec<i32> = papers.iter().map(|p| p.year).collect();
        years.sort_unstable();
        years.dedup();

        let mut seen: HashSet<&str> = HashSet::new();
        let mut journals: Vec<String> = Vec::new();
        for paper in &papers {
            if let Some(journal) = &paper.journal {
                if seen.insert(journal.as_str()) {
                    journals.push(journal.clone());
                }
            }
        }

        PaperSet {
            papers,
            years,
            journals,
        }
    }

    /// Number of cleaned records.
    pub fn len(&self) -> usize {
        self.papers.len()
    }

    /// Whether the cleaned set is empty.
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}
