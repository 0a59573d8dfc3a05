use eframe::egui::Color32;

pub trait ColorExt {
    fn from_hex(hex: &str) -> Option<Self>
    where
        Self: Sized;
}

impl ColorExt for Color32 {
    fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Color32::from_rgb(r, g, b))
    }
}

/// Fill color for the confidence bar: green for high, amber for middling,
/// red for low scores.
pub fn confidence_color(score: f32) -> Color32 {
    if score >= 70.0 {
        Color32::from_rgb(0, 180, 0)
    } else if score >= 40.0 {
        Color32::from_rgb(230, 160, 0)
    } else {
        Color32::from_rgb(220, 50, 50)
    }
}
