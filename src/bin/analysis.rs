//! Batch exploration of the CORD-19 metadata CSV: console statistics plus
//! four PNG charts in the working directory.
//!
//! Run: `cargo run --bin analysis [path/to/metadata.csv]`

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use env_logger::Env;

use cord_explorer::charts;
use cord_explorer::data::model::PaperSet;
use cord_explorer::data::{clean, loader, DEFAULT_CSV};
use cord_explorer::stats;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV));

    if !path.exists() {
        let cwd = env::current_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string());
        eprintln!("Error: {} not found in current directory: {cwd}", path.display());
        eprintln!("Place {DEFAULT_CSV} in this folder or pass a path as the first argument.");
        process::exit(1);
    }

    let raw = loader::load_path(&path).with_context(|| format!("loading {}", path.display()))?;
    let dataset = clean::clean(&raw).context("cleaning metadata")?;

    println!("\nCleaned dataset: {} records", dataset.len());
    if raw.skipped_rows > 0 {
        println!("(permissive fallback skipped {} malformed rows)", raw.skipped_rows);
    }

    print_basic_stats(&dataset);
    print_top_journals(&dataset);
    print_publications_per_year(&dataset);

    charts::render_all(&dataset, Path::new(".")).context("rendering charts")?;

    println!("\nDone. Plots saved as PNG files in the current directory.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Console report
// ---------------------------------------------------------------------------

fn print_basic_stats(dataset: &PaperSet) {
    let abstracts: Vec<f64> = dataset
        .papers
        .iter()
        .map(|p| p.abstract_words as f64)
        .collect();
    let titles: Vec<f64> = dataset
        .papers
        .iter()
        .map(|p| p.title_words as f64)
        .collect();
    let a = stats::describe(&abstracts);
    let t = stats::describe(&titles);

    println!("\n--- Basic stats for derived numeric columns ---");
    println!("{:>8}  {:>16}  {:>14}", "", "abstract_length", "title_length");
    let rows = [
        ("count", a.count as f64, t.count as f64),
        ("mean", a.mean, t.mean),
        ("std", a.std_dev, t.std_dev),
        ("min", a.min, t.min),
        ("25%", a.q25, t.q25),
        ("50%", a.median, t.median),
        ("75%", a.q75, t.q75),
        ("max", a.max, t.max),
    ];
    for (label, abstract_value, title_value) in rows {
        println!("{label:>8}  {abstract_value:>16.2}  {title_value:>14.2}");
    }
}

fn print_top_journals(dataset: &PaperSet) {
    println!("\n--- Top journals ---");
    let ranked = stats::journal_counts(&dataset.papers, 15);
    if ranked.is_empty() {
        println!("(no journal information)");
        return;
    }
    for (journal, count) in ranked {
        println!("{count:>8}  {journal}");
    }
}

fn print_publications_per_year(dataset: &PaperSet) {
    println!("\n--- Publications per year ---");
    for (year, count) in stats::publications_per_year(&dataset.papers) {
        println!("{year}  {count:>8}");
    }
}
