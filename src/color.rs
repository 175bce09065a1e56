use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color generation
// ---------------------------------------------------------------------------

/// 8-bit RGB triple; converted to the backend color type at the call site
/// (`egui::Color32` in the dashboard, `plotters::RGBColor` in the report).
pub type Rgb8 = (u8, u8, u8);

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb8> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            to_rgb8(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Map a year onto a violet→yellow ramp across the dataset's year span,
/// darker for early years.  Used to colour the title/abstract scatter.
pub fn year_color(year: i32, min_year: i32, max_year: i32) -> Rgb8 {
    let span = (max_year - min_year).max(1) as f32;
    let t = ((year - min_year) as f32 / span).clamp(0.0, 1.0);
    let hue = 270.0 - t * 210.0;
    to_rgb8(Hsl::new(hue, 0.7, 0.35 + 0.25 * t))
}

fn to_rgb8(hsl: Hsl) -> Rgb8 {
    let rgb: Srgb = hsl.into_color();
    (
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        let palette = generate_palette(15);
        assert_eq!(palette.len(), 15);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn year_color_handles_degenerate_span() {
        // Equal min and max must not divide by zero.
        let single = year_color(2020, 2020, 2020);
        let low = year_color(2019, 2019, 2022);
        let high = year_color(2022, 2019, 2022);
        assert_ne!(low, high);
        let _ = single;
    }
}
