use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: artist → Color32
// ---------------------------------------------------------------------------

/// Assigns each artist in the top chart a distinct colour, so every bar and
/// legend entry for the same artist match.
#[derive(Debug, Clone, Default)]
pub struct ArtistColors {
    mapping: BTreeMap<String, Color32>,
}

impl ArtistColors {
    /// Build a colour map for the given artists. Duplicates collapse; the
    /// assignment is deterministic for a given artist set.
    pub fn new<'a>(artists: impl IntoIterator<Item = &'a str>) -> Self {
        let unique: std::collections::BTreeSet<&str> = artists.into_iter().collect();
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(artist, color)| (artist.to_string(), color))
            .collect();
        ArtistColors { mapping }
    }

    /// Look up the colour for an artist.
    pub fn color_for(&self, artist: &str) -> Color32 {
        self.mapping.get(artist).copied().unwrap_or(Color32::GRAY)
    }
}
