//! Generate a synthetic `metadata.csv` for trying out the explorer without
//! the real CORD-19 download.  The output deliberately contains the warts
//! the pipeline has to cope with: missing titles, missing abstracts and
//! journals, unparsable dates, and a few structurally malformed rows that
//! force the permissive parser fallback.
//!
//! Run: `cargo run --bin generate_sample`

use chrono::{Days, NaiveDate};
use serde::Serialize;

use cord_explorer::sample::SimpleRng;

const OUTPUT_PATH: &str = "metadata.csv";
const ROWS: usize = 600;

const TOPICS: [&str; 12] = [
    "SARS-CoV-2",
    "COVID-19",
    "coronavirus",
    "vaccine",
    "transmission",
    "antibody",
    "pneumonia",
    "outbreak",
    "respiratory",
    "epidemiology",
    "immunity",
    "variant",
];

const FILLER: [&str; 16] = [
    "analysis", "of", "in", "patients", "clinical", "study", "response", "during", "the",
    "dynamics", "infection", "model", "data", "evidence", "from", "cohort",
];

const JOURNALS: [&str; 12] = [
    "bioRxiv",
    "medRxiv",
    "The Lancet",
    "Nature Medicine",
    "PLOS ONE",
    "BMJ",
    "Journal of Virology",
    "Emerging Infectious Diseases",
    "Science",
    "Cell",
    "Viruses",
    "Eurosurveillance",
];

const SURNAMES: [&str; 10] = [
    "Smith", "Chen", "Garcia", "Müller", "Tanaka", "Okafor", "Ivanova", "Silva", "Kumar", "Olsen",
];

const SOURCES: [&str; 5] = ["PMC", "Elsevier", "WHO", "medrxiv", "biorxiv"];

const BAD_DATES: [&str; 3] = ["n.d.", "in press", "forthcoming"];

#[derive(Serialize)]
struct SampleRow {
    title: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    publish_time: String,
    journal: String,
    authors: String,
    doi: String,
    source_x: String,
}

fn words(rng: &mut SimpleRng, count: usize) -> String {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        // Sprinkle a topic word roughly every fourth token.
        if i % 4 == 0 {
            out.push(*rng.pick(&TOPICS));
        } else {
            out.push(*rng.pick(&FILLER));
        }
    }
    out.join(" ")
}

fn publish_time(rng: &mut SimpleRng) -> String {
    let base = NaiveDate::from_ymd_opt(2019, 12, 1).expect("valid base date");
    let date = base
        .checked_add_days(Days::new(rng.range(940)))
        .expect("date in range");

    if rng.chance(0.05) {
        return date.format("%Y-%m").to_string();
    }
    if rng.chance(0.03) {
        return date.format("%Y").to_string();
    }
    if rng.chance(0.03) {
        return (*rng.pick(&BAD_DATES)).to_string();
    }
    if rng.chance(0.02) {
        return String::new();
    }
    date.format("%Y-%m-%d").to_string()
}

fn authors(rng: &mut SimpleRng) -> String {
    let n = 1 + rng.range(4) as usize;
    let mut list = Vec::with_capacity(n);
    for _ in 0..n {
        let initial = (b'A' + rng.range(26) as u8) as char;
        list.push(format!("{}, {initial}.", rng.pick(&SURNAMES)));
    }
    list.join("; ")
}

fn sample_row(rng: &mut SimpleRng) -> SampleRow {
    let title = if rng.chance(0.02) {
        String::new()
    } else {
        words(rng, 4 + rng.range(9) as usize)
    };

    let abstract_text = if rng.chance(0.15) {
        String::new()
    } else {
        let length = rng.gauss(120.0, 50.0).clamp(25.0, 320.0) as usize;
        words(rng, length)
    };

    let journal = if rng.chance(0.12) {
        String::new()
    } else {
        (*rng.pick(&JOURNALS)).to_string()
    };

    SampleRow {
        title,
        abstract_text,
        publish_time: publish_time(rng),
        journal,
        authors: if rng.chance(0.05) { String::new() } else { authors(rng) },
        doi: format!("10.1101/2020.{:02}.{:06}", 1 + rng.range(12), rng.range(1_000_000)),
        source_x: (*rng.pick(&SOURCES)).to_string(),
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(OUTPUT_PATH)
        .expect("Failed to create output file");

    writer
        .write_record([
            "title",
            "abstract",
            "publish_time",
            "journal",
            "authors",
            "doi",
            "source_x",
        ])
        .expect("Failed to write header");

    let mut malformed_rows = 0;
    for _ in 0..ROWS {
        if rng.chance(0.015) {
            // Structurally malformed: one field too many.  These rows force
            // the strict parse to fail and the permissive retry to drop them.
            malformed_rows += 1;
            writer
                .write_record([
                    words(&mut rng, 5).as_str(),
                    "broken",
                    "2020-01-01",
                    "bioRxiv",
                    "Smith, J.",
                    "10.1101/2020.01.000001",
                    "PMC",
                    "stray-field",
                ])
                .expect("Failed to write malformed row");
            continue;
        }

        let row = sample_row(&mut rng);
        writer.serialize(row).expect("Failed to write row");
    }

    writer.flush().expect("Failed to flush output");
    println!(
        "Wrote {ROWS} rows to {OUTPUT_PATH} ({malformed_rows} malformed on purpose)"
    );
}
