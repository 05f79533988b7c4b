use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Fill of every bar.
pub const BAR_COLOR: Color32 = Color32::from_rgb(135, 206, 235);
/// Fill of every scatter point.
pub const POINT_COLOR: Color32 = Color32::from_rgb(0, 128, 0);

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
            let hsl = Hsl::new(hue, 0.75, 0.45);
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
// Player → Color32
// ---------------------------------------------------------------------------

/// One hue per player, shared by the chart labels and the ranking panel.
#[derive(Debug, Clone)]
pub struct PlayerColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl PlayerColors {
    /// Assign hues in first-seen order; repeated names keep their first hue.
    pub fn new<'a>(players: impl IntoIterator<Item = &'a str>) -> Self {
        let mut unique: Vec<&str> = Vec::new();
        for player in players {
            if !unique.contains(&player) {
                unique.push(player);
            }
        }
        let palette = generate_palette(unique.len());
        let mapping = unique
            .into_iter()
            .zip(palette)
            .map(|(p, c)| (p.to_string(), c))
            .collect();

        PlayerColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, player: &str) -> Color32 {
        self.mapping
            .get(player)
            .copied()
            .unwrap_or(self.default_color)
    }
}
