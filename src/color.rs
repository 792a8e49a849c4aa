use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SampleCategory;

// ---------------------------------------------------------------------------
// Per-sample palette (tensile curves)
// ---------------------------------------------------------------------------

/// `n` dark, well separated colours with evenly spaced hues, readable on a
/// light plot background.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 160.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.40);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed colours per coating category (thermal curves)
// ---------------------------------------------------------------------------

/// Used for samples whose category has no assigned colour.
pub const FALLBACK_COLOR: Color32 = Color32::BLACK;

/// Colour of a thermal sample, keyed by its coating category.
pub fn category_color(category: SampleCategory) -> Color32 {
    match category {
        SampleCategory::Uncoated => Color32::from_rgb(0xb0, 0xc4, 0xb1),
        SampleCategory::CoatedLaser => Color32::from_rgb(0x3a, 0x5a, 0x40),
        SampleCategory::CoatedOven => Color32::from_rgb(0xf7, 0x7f, 0x00),
        SampleCategory::Unrecognized => FALLBACK_COLOR,
    }
}
