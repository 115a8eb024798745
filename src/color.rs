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
// Team colours
// ---------------------------------------------------------------------------

/// One stable colour per team, so a team keeps its colour across panels.
#[derive(Debug, Clone)]
pub struct TeamColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl TeamColors {
    pub fn new<'a>(teams: impl IntoIterator<Item = &'a str>) -> Self {
        let teams: Vec<&str> = teams.into_iter().collect();
        let palette = generate_palette(teams.len());
        let mapping = teams
            .into_iter()
            .zip(palette)
            .map(|(team, c)| (team.to_string(), c))
            .collect();

        TeamColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, team: &str) -> Color32 {
        self.mapping
            .get(team)
            .copied()
            .unwrap_or(self.default_color)
    }
}
