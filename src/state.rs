use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::data::filter::{filtered_indices, search_indices, PaperFilter};
use crate::data::model::PaperSet;
use crate::data::{clean, loader};
use crate::stats::{self, Histogram};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Rows shown in the preview and search tables.
pub const TABLE_ROW_LIMIT: usize = 200;
/// Journals offered in the filter dropdown.
pub const JOURNAL_CHOICE_LIMIT: usize = 50;

const TOP_JOURNALS: usize = 15;
const HISTOGRAM_BINS: usize = 40;

/// The full UI state, independent of rendering.
///
/// The per-year and top-journal aggregates are always computed over the
/// whole dataset while the abstract-length histogram follows the filtered
/// subset; the dashboard shows the global trend next to a focused
/// distribution on purpose.
pub struct AppState {
    /// Loaded dataset (None until a file is opened).
    pub dataset: Option<PaperSet>,

    /// Where `dataset` came from; re-opening the same path is a no-op.
    pub source: Option<PathBuf>,

    /// Active year/journal filters.
    pub filter: PaperFilter,

    /// Free-text search term (title/abstract substring).
    pub search: String,

    /// Indices of records passing the current filters (cached).
    pub filtered: Vec<usize>,

    /// Indices of search hits over the full dataset (cached).
    pub search_hits: Vec<usize>,

    /// Publications per year over the full dataset.
    pub pubs_per_year: BTreeMap<i32, u64>,

    /// Top journals over the full dataset.
    pub top_journals: Vec<(String, u64)>,

    /// Abstract-length histogram over the filtered subset.
    pub abstract_hist: Histogram,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source: None,
            filter: PaperFilter::default(),
            search: String::new(),
            filtered: Vec::new(),
            search_hits: Vec::new(),
            pubs_per_year: BTreeMap::new(),
            top_journals: Vec::new(),
            abstract_hist: Histogram::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly cleaned dataset: reset filters and search, compute the
    /// global aggregates once.
    pub fn set_dataset(&mut self, dataset: PaperSet, source: Option<PathBuf>) {
        self.pubs_per_year = stats::publications_per_year(&dataset.papers);
        self.top_journals = stats::journal_counts(&dataset.papers, TOP_JOURNALS);
        self.filter = PaperFilter::default();
        self.search.clear();
        self.search_hits.clear();
        self.dataset = Some(dataset);
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Load and clean a CSV, reusing the in-memory dataset when the path is
    /// the one already loaded this session.
    pub fn load_file(&mut self, path: &Path) {
        if self.dataset.is_some() && self.source.as_deref() == Some(path) {
            log::debug!(
                "{} is already loaded; reusing the in-memory dataset",
                path.display()
            );
            return;
        }

        let result: anyhow::Result<(PaperSet, usize)> = (|| {
            let raw = loader::load_path(path)?;
            let dataset = clean::clean(&raw)?;
            Ok((dataset, raw.skipped_rows))
        })();

        match result {
            Ok((dataset, skipped_rows)) => {
                log::info!(
                    "Loaded {} cleaned records from {}",
                    dataset.len(),
                    path.display()
                );
                self.set_dataset(dataset, Some(path.to_path_buf()));
                if skipped_rows > 0 {
                    self.status_message = Some(format!(
                        "Loaded with fallback: skipped {skipped_rows} malformed row(s)."
                    ));
                }
            }
            Err(err) => {
                log::error!("Failed to load {}: {err:#}", path.display());
                self.status_message = Some(format!("Error: {err:#}"));
            }
        }
    }

    /// Recompute the filtered subset and its histogram after a filter change.
    pub fn refilter(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        self.filtered = filtered_indices(dataset, &self.filter);
        let lengths: Vec<u32> = self
            .filtered
            .iter()
            .map(|&i| dataset.papers[i].abstract_words)
            .collect();
        self.abstract_hist = stats::histogram(&lengths, HISTOGRAM_BINS);
    }

    /// Recompute search hits after the search term changed.  The search runs
    /// over the full dataset, not the filtered subset.
    pub fn update_search(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let query = self.search.trim();
        self.search_hits = if query.is_empty() {
            Vec::new()
        } else {
            search_indices(dataset, query)
        };
    }
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
                   X,a b c,2020-01-01,J1\n\
                   Z,covid vaccine,2021-03-01,J1\n\
                   W,covid spread,2021-06-01,J2\n";
        clean(&load_bytes(csv.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn set_dataset_computes_global_aggregates_and_clears_filters() {
        let mut state = AppState::default();
        state.filter.year = Some(1999);
        state.set_dataset(dataset(), None);

        assert_eq!(state.filter, PaperFilter::default());
        assert_eq!(state.filtered.len(), 3);
        assert_eq!(state.pubs_per_year.get(&2021), Some(&2));
        assert_eq!(state.top_journals[0], ("J1".to_string(), 2));
    }

    #[test]
    fn refilter_narrows_histogram_to_the_filtered_subset() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), None);

        state.filter.year = Some(2021);
        state.refilter();
        assert_eq!(state.filtered, vec![1, 2]);
        assert_eq!(state.abstract_hist.counts.iter().sum::<u64>(), 2);

        // Global aggregates are untouched by filtering.
        assert_eq!(state.pubs_per_year.get(&2020), Some(&1));
    }

    #[test]
    fn search_runs_over_the_unfiltered_set() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), None);
        state.filter.year = Some(2020);
        state.refilter();

        state.search = "covid".to_string();
        state.update_search();
        // Both 2021 records hit even though the year filter excludes them.
        assert_eq!(state.search_hits, vec![1, 2]);

        state.search = "  ".to_string();
        state.update_search();
        assert!(state.search_hits.is_empty());
    }

    #[test]
    fn empty_filter_result_is_a_valid_state() {
        let mut state = AppState::default();
        state.set_dataset(dataset(), None);
        state.filter.year = Some(1980);
        state.refilter();
        assert!(state.filtered.is_empty());
        assert!(state.abstract_hist.is_empty());
    }
}
