//! Theme definition data model.
//!
//! Every visual parameter of the planner is captured in [`ThemeDefinition`].
//! Themes are serialised as JSON with `#RRGGBB` / `#RRGGBBAA` colour strings
//! so that end-users can hand-edit them.
//!
//! All fields carry `#[serde(default)]` so that a partial JSON file is valid:
//! missing keys silently fall back to the built-in defaults.

use egui::Color32;
use serde::{Deserialize, Serialize};

// ─── Hex-colour serde helper ────────────────────────────────────────────────

pub mod hex_color {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serializer};

    /// Colours are written from and read back into egui's premultiplied
    /// representation, so a serialise/parse cycle is exact.
    pub fn to_hex(color: &Color32) -> String {
        let [r, g, b, a] = color.to_array();
        match a {
            255 => format!("#{:02X}{:02X}{:02X}", r, g, b),
            _ => format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a),
        }
    }

    pub fn parse_hex_color(s: &str) -> Result<Color32, String> {
        let digits = s.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(format!(
                "Invalid hex color '{}': expected 6 or 8 hex digits",
                s
            ));
        }
        let mut channels = [0u8; 4];
        channels[3] = 255;
        for (i, chunk) in digits.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(chunk).map_err(|e| e.to_string())?;
            channels[i] = u8::from_str_radix(pair, 16).map_err(|e| e.to_string())?;
        }
        let [r, g, b, a] = channels;
        if digits.len() == 6 {
            Ok(Color32::from_rgb(r, g, b))
        } else {
            Ok(Color32::from_rgba_premultiplied(r, g, b, a))
        }
    }

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&to_hex(color))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex_color(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde helper for `Vec<Color32>` stored as an array of hex strings.
mod hex_color_vec {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(colors: &Vec<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let strings: Vec<String> = colors.iter().map(super::hex_color::to_hex).collect();
        strings.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings: Vec<String> = Vec::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| super::hex_color::parse_hex_color(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

// ─── Top-level definition ───────────────────────────────────────────────────

/// Complete theme definition. Every visual knob in the app lives here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeDefinition {
    pub meta: ThemeMeta,
    pub colors: ThemeColors,
    pub typography: ThemeTypography,
    pub sizing: ThemeSizing,
    pub layout: ThemeLayout,
}

// ─── Meta ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeMeta {
    pub name: String,
    pub author: String,
    pub description: String,
    /// "dark" or "light" — controls whether egui starts from Visuals::dark() or light().
    pub variant: String,
}

impl Default for ThemeMeta {
    fn default() -> Self {
        Self {
            name: "Default Dark".into(),
            author: "Built-in".into(),
            description: "The default dark theme.".into(),
            variant: "dark".into(),
        }
    }
}

// ─── Colors ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    // Backgrounds
    #[serde(with = "hex_color")]
    pub bg_dark: Color32,
    #[serde(with = "hex_color")]
    pub bg_panel: Color32,
    #[serde(with = "hex_color")]
    pub bg_gutter: Color32,
    #[serde(with = "hex_color")]
    pub bg_selected: Color32,

    // Borders
    #[serde(with = "hex_color")]
    pub border_subtle: Color32,
    #[serde(with = "hex_color")]
    pub border_accent: Color32,

    // Text
    #[serde(with = "hex_color")]
    pub text_primary: Color32,
    #[serde(with = "hex_color")]
    pub text_secondary: Color32,
    #[serde(with = "hex_color")]
    pub text_dim: Color32,
    #[serde(with = "hex_color")]
    pub text_on_block: Color32,

    // Semantic
    #[serde(with = "hex_color")]
    pub accent: Color32,
    #[serde(with = "hex_color")]
    pub now_line: Color32,
    #[serde(with = "hex_color")]
    pub hour_line: Color32,
    #[serde(with = "hex_color")]
    pub half_hour_line: Color32,
    #[serde(with = "hex_color")]
    pub handle_color: Color32,

    // Widget colors (egui Visuals overrides)
    #[serde(with = "hex_color")]
    pub widget_bg_inactive: Color32,
    #[serde(with = "hex_color")]
    pub widget_bg_hovered: Color32,
    #[serde(with = "hex_color")]
    pub widget_bg_active: Color32,
    #[serde(with = "hex_color")]
    pub widget_bg_open: Color32,
    #[serde(with = "hex_color")]
    pub faint_bg: Color32,
    #[serde(with = "hex_color")]
    pub extreme_bg: Color32,

    // Status bar
    #[serde(with = "hex_color")]
    pub status_bar_bg: Color32,

    // Block palette (cycled through as selections are created)
    #[serde(with = "hex_color_vec")]
    pub block_palette: Vec<Color32>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg_dark: Color32::from_rgb(24, 24, 32),
            bg_panel: Color32::from_rgb(27, 30, 39),
            bg_gutter: Color32::from_rgb(31, 35, 46),
            bg_selected: Color32::from_rgba_unmultiplied(95, 145, 220, 34),

            border_subtle: Color32::from_rgb(47, 51, 63),
            border_accent: Color32::from_rgb(90, 140, 220),

            text_primary: Color32::from_rgb(230, 232, 240),
            text_secondary: Color32::from_rgb(162, 168, 186),
            text_dim: Color32::from_rgb(111, 118, 136),
            text_on_block: Color32::from_rgb(255, 255, 255),

            accent: Color32::from_rgb(80, 140, 220),
            now_line: Color32::from_rgb(240, 75, 75),
            hour_line: Color32::from_rgb(44, 48, 60),
            half_hour_line: Color32::from_rgb(34, 37, 47),
            handle_color: Color32::from_rgb(255, 255, 255),

            widget_bg_inactive: Color32::from_rgb(38, 42, 54),
            widget_bg_hovered: Color32::from_rgb(48, 53, 67),
            widget_bg_active: Color32::from_rgb(57, 62, 78),
            widget_bg_open: Color32::from_rgb(46, 50, 64),
            faint_bg: Color32::from_rgb(30, 30, 40),
            extreme_bg: Color32::from_rgb(19, 21, 29),

            status_bar_bg: Color32::from_rgb(26, 26, 36),

            block_palette: vec![
                Color32::from_rgb(66, 133, 244),  // Google blue
                Color32::from_rgb(52, 168, 83),   // Green
                Color32::from_rgb(171, 71, 188),  // Purple
                Color32::from_rgb(251, 140, 0),   // Orange
                Color32::from_rgb(3, 169, 244),   // Light blue
                Color32::from_rgb(229, 57, 53),   // Red
                Color32::from_rgb(0, 188, 212),   // Cyan
                Color32::from_rgb(255, 193, 7),   // Amber
            ],
        }
    }
}

// ─── Typography ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeTypography {
    /// Hour labels in the gutter
    pub font_hour_size: f32,
    /// Text on selection blocks
    pub font_block_size: f32,
    pub font_small_size: f32,
    /// Menu / toolbar button text
    pub font_menu_size: f32,
    /// Status bar text size
    pub font_status_size: f32,
}

impl Default for ThemeTypography {
    fn default() -> Self {
        Self {
            font_hour_size: 10.5,
            font_block_size: 11.5,
            font_small_size: 9.5,
            font_menu_size: 12.0,
            font_status_size: 11.0,
        }
    }
}

// ─── Sizing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSizing {
    pub block_rounding: f32,
    /// Horizontal inset so blocks don't touch the gutter or the right edge.
    pub block_inset: f32,
    pub widget_rounding: f32,
    pub window_rounding: f32,
    pub status_bar_height: f32,
    pub side_panel_default_width: f32,
    pub side_panel_min_width: f32,
}

impl Default for ThemeSizing {
    fn default() -> Self {
        Self {
            block_rounding: 5.0,
            block_inset: 6.0,
            widget_rounding: 6.0,
            window_rounding: 8.0,
            status_bar_height: 24.0,
            side_panel_default_width: 260.0,
            side_panel_min_width: 200.0,
        }
    }
}

// ─── Layout ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeLayout {
    pub panel_inner_margin: f32,
    /// Width of the hour-label gutter on the left of the day column.
    pub hour_gutter_width: f32,
    pub dialog_width: f32,
    pub about_dialog_width: f32,
    pub about_dialog_height: f32,
}

impl Default for ThemeLayout {
    fn default() -> Self {
        Self {
            panel_inner_margin: 10.0,
            hour_gutter_width: 52.0,
            dialog_width: 320.0,
            about_dialog_width: 300.0,
            about_dialog_height: 160.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_round_trip() {
        for color in [
            Color32::from_rgb(24, 24, 32),
            Color32::from_rgba_unmultiplied(95, 145, 220, 34),
        ] {
            let s = hex_color::to_hex(&color);
            assert_eq!(hex_color::parse_hex_color(&s).unwrap(), color);
        }
    }

    #[test]
    fn short_hex_without_alpha_is_opaque() {
        assert_eq!(
            hex_color::parse_hex_color("#5A8CDC").unwrap(),
            Color32::from_rgb(0x5A, 0x8C, 0xDC)
        );
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(hex_color::parse_hex_color("#123").is_err());
        assert!(hex_color::parse_hex_color("#GGGGGG").is_err());
    }

    #[test]
    fn partial_theme_json_falls_back_to_defaults() {
        let def: ThemeDefinition =
            serde_json::from_str(r##"{"meta": {"name": "Test"}, "colors": {"accent": "#FF0000"}}"##)
                .unwrap();
        assert_eq!(def.meta.name, "Test");
        assert_eq!(def.meta.variant, "dark");
        assert_eq!(def.colors.accent, Color32::from_rgb(255, 0, 0));
        assert_eq!(def.colors.bg_dark, ThemeColors::default().bg_dark);
    }
}
