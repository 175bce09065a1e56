use super::model::{Paper, PaperSet};

// ---------------------------------------------------------------------------
// Equality filters (year / journal)
// ---------------------------------------------------------------------------

/// Explorer filter state.  `None` means "all" for either axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperFilter {
    pub year: Option<i32>,
    pub journal: Option<String>,
}

impl PaperFilter {
    /// Whether a record passes both active filters.
    pub fn matches(&self, paper: &Paper) -> bool {
        if let Some(year) = self.year {
            if paper.year != year {
                return false;
            }
        }
        if let Some(journal) = &self.journal {
            if paper.journal.as_deref() != Some(journal.as_str()) {
                return false;
            }
        }
        true
    }

    pub fn is_active(&self) -> bool {
        self.year.is_some() || self.journal.is_some()
    }
}

/// Indices of records passing the filter, in dataset order.
pub fn filtered_indices(dataset: &PaperSet, filter: &PaperFilter) -> Vec<usize> {
    dataset
        .papers
        .iter()
        .enumerate()
        .filter(|(_, paper)| filter.matches(paper))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Free-text search
// ---------------------------------------------------------------------------

/// Indices of records whose title or abstract contains `query` as a
/// case-insensitive substring.  Always runs over the full dataset, not the
/// filtered subset.
pub fn search_indices(dataset: &PaperSet, query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    dataset
        .papers
        .iter()
        .enumerate()
        .filter(|(_, paper)| {
            paper.title.to_lowercase().contains(&needle)
                || paper
                    .abstract_text
                    .as_ref()
                    .is_some_and(|a| a.to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
    use crate::data::loader::load_bytes;

    fn dataset() -> PaperSet {
        let csv = "title,abstract,publish_time,journal\n\
                   X,a b c,2020-01-01,\n\
                   Z,covid vaccine trial,2021-03-01,J1\n\
                   W,another covid study,2021-06-01,J2\n";
        clean(&load_bytes(csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn year_filter_selects_matching_rows() {
        let set = dataset();
        let filter = PaperFilter {
            year: Some(2021),
            journal: None,
        };
        assert_eq!(filtered_indices(&set, &filter), vec![1, 2]);
    }

    #[test]
    fn year_filter_is_idempotent() {
        let set = dataset();
        let filter = PaperFilter {
            year: Some(2021),
            journal: None,
        };
        let once = filtered_indices(&set, &filter);
        let twice = filtered_indices(&set, &filter);
        assert_eq!(once, twice);
    }

    #[test]
    fn journal_filter_combines_with_year() {
        let set = dataset();
        let filter = PaperFilter {
            year: Some(2021),
            journal: Some("J1".to_string()),
        };
        assert_eq!(filtered_indices(&set, &filter), vec![1]);
    }

    #[test]
    fn absent_journal_never_matches_a_journal_filter() {
        let set = dataset();
        let filter = PaperFilter {
            year: None,
            journal: Some("J9".to_string()),
        };
        assert!(filtered_indices(&set, &filter).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_abstract() {
        let set = dataset();
        assert_eq!(search_indices(&set, "COVID"), vec![1, 2]);
        assert_eq!(search_indices(&set, "x"), vec![0]);
    }

    #[test]
    fn search_with_no_hits_returns_empty() {
        let set = dataset();
        assert!(search_indices(&set, "quantum chromodynamics").is_empty());
    }
}
