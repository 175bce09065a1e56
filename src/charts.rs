use std::path::Path;

use anyhow::{Context, Result};
use log::{info, warn};
use plotters::prelude::*;

use crate::color::year_color;
use crate::data::model::PaperSet;
use crate::sample::{sample_indices, SimpleRng};
use crate::stats;

// ---------------------------------------------------------------------------
// Fixed artifact names
// ---------------------------------------------------------------------------

pub const PUBLICATIONS_PER_YEAR_PNG: &str = "publications_per_year.png";
pub const TOP_JOURNALS_PNG: &str = "top_journals.png";
pub const ABSTRACT_LENGTH_PNG: &str = "abstract_length_distribution.png";
pub const TITLE_VS_ABSTRACT_PNG: &str = "title_vs_abstract.png";

/// Cap on scatter points; sampled when the dataset is larger.
const SCATTER_SAMPLE_LIMIT: usize = 5000;
/// Seed for the scatter sample; repeated runs draw the same points.
const SCATTER_SEED: u64 = 1;

const TOP_JOURNALS: usize = 15;
const HISTOGRAM_BINS: usize = 50;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Render the four report charts into `out_dir`.
pub fn render_all(dataset: &PaperSet, out_dir: &Path) -> Result<()> {
    if dataset.is_empty() {
        warn!("No cleaned records; skipping chart output.");
        return Ok(());
    }
    publications_per_year(dataset, &out_dir.join(PUBLICATIONS_PER_YEAR_PNG))?;
    top_journals(dataset, &out_dir.join(TOP_JOURNALS_PNG))?;
    abstract_length_distribution(dataset, &out_dir.join(ABSTRACT_LENGTH_PNG))?;
    title_vs_abstract(dataset, &out_dir.join(TITLE_VS_ABSTRACT_PNG))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// 1. Publications over time (line)
// ---------------------------------------------------------------------------

pub fn publications_per_year(dataset: &PaperSet, path: &Path) -> Result<()> {
    let pubs = stats::publications_per_year(&dataset.papers);
    let (Some((&first_year, _)), Some((&last_year, _))) =
        (pubs.first_key_value(), pubs.last_key_value())
    else {
        warn!("No records to chart; skipping {}", path.display());
        return Ok(());
    };
    let max_count = pubs.values().copied().max().unwrap_or(1);

    let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Publications per Year (CORD-19 metadata)", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first_year..last_year + 1, 0u64..headroom(max_count))?;
    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Publications")
        .draw()?;

    let points: Vec<(i32, u64)> = pubs.iter().map(|(&year, &count)| (year, count)).collect();
    chart.draw_series(LineSeries::new(points.clone(), &BLUE))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())),
    )?;

    present(&root, path)
}

// ---------------------------------------------------------------------------
// 2. Top journals (horizontal bars)
// ---------------------------------------------------------------------------

pub fn top_journals(dataset: &PaperSet, path: &Path) -> Result<()> {
    let ranked = stats::journal_counts(&dataset.papers, TOP_JOURNALS);
    if ranked.is_empty() {
        warn!("No journal information; skipping {}", path.display());
        return Ok(());
    }

    // Bottom-up drawing order: reverse so the biggest journal lands on top.
    let rows: Vec<(String, u64)> = ranked.into_iter().rev().collect();
    let max_count = rows.iter().map(|(_, c)| *c).max().unwrap_or(1);

    let root = BitMapBackend::new(path, (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top 15 Journals (by count)", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(280)
        .build_cartesian_2d(0u64..headroom(max_count), (0..rows.len()).into_segmented())?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Number of Papers")
        .y_labels(rows.len())
        .y_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => rows
                .get(*i)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(i, (_, count))| {
        Rectangle::new(
            [
                (0, SegmentValue::Exact(i)),
                (*count, SegmentValue::Exact(i + 1)),
            ],
            BLUE.mix(0.6).filled(),
        )
    }))?;

    present(&root, path)
}

// ---------------------------------------------------------------------------
// 3. Abstract length distribution (histogram)
// ---------------------------------------------------------------------------

pub fn abstract_length_distribution(dataset: &PaperSet, path: &Path) -> Result<()> {
    let lengths: Vec<u32> = dataset.papers.iter().map(|p| p.abstract_words).collect();
    let hist = stats::histogram(&lengths, HISTOGRAM_BINS);
    if hist.is_empty() {
        warn!("No records to chart; skipping {}", path.display());
        return Ok(());
    }

    let max_count = hist.counts.iter().copied().max().unwrap_or(1);
    let x_max = hist.bin_width * hist.counts.len() as u32;

    let root = BitMapBackend::new(path, (1000, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Abstract Lengths (words)", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..x_max, 0u64..headroom(max_count))?;
    chart
        .configure_mesh()
        .x_desc("Abstract length (words)")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(
        hist.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(i, &count)| {
                let (lo, hi) = hist.bin_range(i);
                Rectangle::new([(lo, 0), (hi, count)], BLUE.mix(0.5).filled())
            }),
    )?;

    present(&root, path)
}

// ---------------------------------------------------------------------------
// 4. Title length vs abstract length (sampled scatter, coloured by year)
// ---------------------------------------------------------------------------

pub fn title_vs_abstract(dataset: &PaperSet, path: &Path) -> Result<()> {
    if dataset.is_empty() {
        warn!("No records to chart; skipping {}", path.display());
        return Ok(());
    }

    let mut rng = SimpleRng::new(SCATTER_SEED);
    let picked = sample_indices(&mut rng, dataset.len(), SCATTER_SAMPLE_LIMIT);

    let min_year = dataset.years.first().copied().unwrap_or(0);
    let max_year = dataset.years.last().copied().unwrap_or(min_year);
    let max_title = picked
        .iter()
        .map(|&i| dataset.papers[i].title_words)
        .max()
        .unwrap_or(1);
    let max_abstract = picked
        .iter()
        .map(|&i| dataset.papers[i].abstract_words)
        .max()
        .unwrap_or(1);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Title length vs Abstract length (sample)", ("sans-serif", 28))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..max_title + 1, 0u32..max_abstract + 1)?;
    chart
        .configure_mesh()
        .x_desc("Title length (words)")
        .y_desc("Abstract length (words)")
        .draw()?;

    chart.draw_series(picked.iter().map(|&i| {
        let paper = &dataset.papers[i];
        let (r, g, b) = year_color(paper.year, min_year, max_year);
        Circle::new(
            (paper.title_words, paper.abstract_words),
            2,
            RGBColor(r, g, b).mix(0.6).filled(),
        )
    }))?;

    present(&root, path)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Upper axis bound with ~10% headroom above the data.
fn headroom(max: u64) -> u64 {
    max + max / 10 + 1
}

fn present(root: &DrawingArea<BitMapBackend, plotters::coord::Shift>, path: &Path) -> Result<()> {
    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Saved plot: {}", path.display());
    Ok(())
}
