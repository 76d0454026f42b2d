use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `start_hue` degrees.
pub fn generate_palette(n: usize, start_hue: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (start_hue + (i as f32 / n as f32) * 360.0) % 360.0;
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
// Plot colours
// ---------------------------------------------------------------------------

/// Colours for the measured points and the fitted line.
#[derive(Debug, Clone, Copy)]
pub struct PlotColors {
    pub points: Color32,
    pub fit_line: Color32,
}

impl Default for PlotColors {
    /// Blue points, orange line: complementary hues 180° apart.
    fn default() -> Self {
        let palette = generate_palette(2, 210.0);
        Self {
            points: palette[0],
            fit_line: palette[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0, 0.0).is_empty());
        assert_eq!(generate_palette(5, 0.0).len(), 5);
    }

    #[test]
    fn plot_colors_are_blue_and_orange() {
        let c = PlotColors::default();
        assert_ne!(c.points, c.fit_line);
        assert!(c.points.b() > c.points.r());
        assert!(c.fit_line.r() > c.fit_line.b());
    }
}
