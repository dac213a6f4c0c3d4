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
// Trace colours
// ---------------------------------------------------------------------------

/// Colours for the series drawn on the waveform chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceColors {
    pub voltage: Color32,
    pub power: Color32,
    pub peaks: Color32,
}

impl Default for TraceColors {
    fn default() -> Self {
        let palette = generate_palette(3);
        Self {
            voltage: palette[2],
            power: palette[1],
            peaks: palette[0],
        }
    }
}
