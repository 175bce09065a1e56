use std::collections::{BTreeMap, HashMap};

use crate::data::model::Paper;

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); NaN below two values.
    pub std_dev: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Compute count / mean / std / min / quartiles / max for a column.
/// An empty input yields count 0 and NaN everywhere else.
pub fn describe(values: &[f64]) -> Describe {
    let count = values.len();
    if count == 0 {
        return Describe {
            count: 0,
            mean: f64::NAN,
            std_dev: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let mean = sorted.iter().sum::<f64>() / count as f64;
    let std_dev = if count < 2 {
        f64::NAN
    } else {
        let sum_sq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (count - 1) as f64).sqrt()
    };

    Describe {
        count,
        mean,
        std_dev,
        min: sorted[0],
        q25: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q75: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    }
}

/// Linear-interpolation percentile over a sorted slice, `p` in [0, 1].
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Frequency counts
// ---------------------------------------------------------------------------

/// Publication counts per year, ascending by year.
pub fn publications_per_year(papers: &[Paper]) -> BTreeMap<i32, u64> {
    let mut counts = BTreeMap::new();
    for paper in papers {
        *counts.entry(paper.year).or_insert(0u64) += 1;
    }
    counts
}

/// The `top` most frequent journals, descending by count (ties broken by
/// name so the ordering is stable).  Records without a journal are ignored.
pub fn journal_counts(papers: &[Paper], top: usize) -> Vec<(String, u64)> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for paper in papers {
        if let Some(journal) = paper.journal.as_deref() {
            *counts.entry(journal).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top);
    ranked
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Fixed-width histogram; bin `i` covers `[i * bin_width, (i + 1) * bin_width)`.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub bin_width: u32,
    pub counts: Vec<u64>,
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram {
            bin_width: 1,
            counts: Vec::new(),
        }
    }
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Inclusive-exclusive value range of bin `i`.
    pub fn bin_range(&self, i: usize) -> (u32, u32) {
        let lo = i as u32 * self.bin_width;
        (lo, lo + self.bin_width)
    }
}

/// Bucket values into at most `bins` fixed-width bins covering `0..=max`.
pub fn histogram(values: &[u32], bins: usize) -> Histogram {
    let Some(max) = values.iter().copied().max() else {
        return Histogram::default();
    };
    let bin_width = (max + 1).div_ceil(bins.max(1) as u32).max(1);

    let used_bins = (max / bin_width) as usize + 1;
    let mut counts = vec![0u64; used_bins];
    for &value in values {
        counts[(value / bin_width) as usize] += 1;
    }

    Histogram { bin_width, counts }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
    use crate::data::loader::load_bytes;

    #[test]
    fn describe_matches_hand_computed_values() {
        let d = describe(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(d.count, 4);
        assert!((d.mean - 2.5).abs() < 1e-12);
        assert!((d.std_dev - 1.2909944487358056).abs() < 1e-12);
        assert_eq!(d.min, 1.0);
        assert!((d.q25 - 1.75).abs() < 1e-12);
        assert!((d.median - 2.5).abs() < 1e-12);
        assert!((d.q75 - 3.25).abs() < 1e-12);
        assert_eq!(d.max, 4.0);
    }

    #[test]
    fn describe_of_empty_input_has_zero_count() {
        let d = describe(&[]);
        assert_eq!(d.count, 0);
        assert!(d.mean.is_nan());
    }

    #[test]
    fn describe_of_single_value_has_nan_std() {
        let d = describe(&[7.0]);
        assert_eq!(d.count, 1);
        assert_eq!(d.median, 7.0);
        assert!(d.std_dev.is_nan());
    }

    #[test]
    fn per_year_and_journal_counts() {
        let csv = "title,abstract,publish_time,journal\n\
                   X,a b c,2020-01-01,\n\
                   Z,,2021-03-01,J1\n";
        let set = clean(&load_bytes(csv.as_bytes()).unwrap()).unwrap();

        let per_year = publications_per_year(&set.papers);
        assert_eq!(per_year.get(&2020), Some(&1));
        assert_eq!(per_year.get(&2021), Some(&1));
        assert_eq!(per_year.len(), 2);

        let journals = journal_counts(&set.papers, 15);
        assert_eq!(journals, vec![("J1".to_string(), 1)]);
    }

    #[test]
    fn journal_counts_rank_by_frequency_then_name() {
        let csv = "title,publish_time,journal\n\
                   A,2020-01-01,J2\n\
                   B,2020-01-02,J2\n\
                   C,2020-01-03,J1\n\
                   D,2020-01-04,J3\n";
        let set = clean(&load_bytes(csv.as_bytes()).unwrap()).unwrap();
        let ranked = journal_counts(&set.papers, 2);
        assert_eq!(
            ranked,
            vec![("J2".to_string(), 2), ("J1".to_string(), 1)]
        );
    }

    #[test]
    fn histogram_buckets_cover_every_value() {
        let hist = histogram(&[0, 1, 2, 3, 99], 10);
        assert_eq!(hist.bin_width, 10);
        assert_eq!(hist.counts.len(), 10);
        assert_eq!(hist.counts.iter().sum::<u64>(), 5);
        assert_eq!(hist.counts[0], 4);
        assert_eq!(hist.counts[9], 1);
        assert_eq!(hist.bin_range(9), (90, 100));
    }

    #[test]
    fn histogram_of_empty_input_is_empty() {
        assert!(histogram(&[], 50).is_empty());
    }
}
