//! Theme manager — loads, saves, switches, and enumerates themes, and holds
//! the persisted application settings (active theme + day scale).

use std::path::PathBuf;

use crate::model::DayScale;
use crate::ui::theme_def::ThemeDefinition;

/// Persisted user settings (lives in the OS config directory).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub active_theme: String,
    /// Vertical scale and snapping constants; read once at startup.
    pub scale: DayScale,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            active_theme: "Default Dark".into(),
            scale: DayScale::default(),
        }
    }
}

/// Manages all available themes and the active selection.
pub struct ThemeManager {
    /// All loaded themes, keyed by `meta.name`.
    themes: Vec<ThemeDefinition>,
    /// Index into `themes` for the currently active theme.
    active_index: usize,
    /// Day scale loaded from settings, already sanitised.
    scale: DayScale,
    /// Path to the user themes directory.
    themes_dir: PathBuf,
    /// Path to the settings file.
    settings_path: PathBuf,
}

impl ThemeManager {
    /// Initialise the theme manager: discover config dir, load built-in +
    /// user themes, apply persisted preference.
    pub fn new() -> Self {
        let (themes_dir, settings_path) = Self::config_paths();

        let _ = std::fs::create_dir_all(&themes_dir);

        let settings = Self::load_settings(&settings_path);

        let mut themes = builtin_themes();

        // Load user themes from disk
        if let Ok(entries) = std::fs::read_dir(&themes_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                    if let Ok(contents) = std::fs::read_to_string(&path) {
                        match serde_json::from_str::<ThemeDefinition>(&contents) {
                            Ok(def) => {
                                // Don't add if name collides with existing
                                if !themes.iter().any(|t| t.meta.name == def.meta.name) {
                                    themes.push(def);
                                }
                            }
                            Err(e) => {
                                log::warn!("failed to parse theme {:?}: {}", path, e);
                            }
                        }
                    }
                }
            }
        }

        // Write reference theme on first run (so users have an example to copy)
        let reference_path = themes_dir.join("_reference_default.json");
        if !reference_path.exists() {
            let reference = ThemeDefinition::default();
            if let Ok(json) = serde_json::to_string_pretty(&reference) {
                let _ = std::fs::write(&reference_path, json);
            }
        }

        // Resolve active theme
        let active_index = themes
            .iter()
            .position(|t| t.meta.name == settings.active_theme)
            .unwrap_or(0);

        Self {
            themes,
            active_index,
            scale: settings.scale.sanitized(),
            themes_dir,
            settings_path,
        }
    }

    // ── Getters ─────────────────────────────────────────────────

    /// The currently active theme.
    pub fn active(&self) -> &ThemeDefinition {
        &self.themes[self.active_index]
    }

    /// List of (index, name) for all themes.
    pub fn list(&self) -> Vec<(usize, String)> {
        self.themes
            .iter()
            .enumerate()
            .map(|(i, t)| (i, t.meta.name.clone()))
            .collect()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn themes_dir(&self) -> &PathBuf {
        &self.themes_dir
    }

    /// The day scale from settings (sanitised at load).
    pub fn day_scale(&self) -> DayScale {
        self.scale
    }

    // ── Switching ───────────────────────────────────────────────

    /// Switch to a theme by index.
    pub fn set_active(&mut self, index: usize) {
        if index < self.themes.len() {
            self.active_index = index;
            self.save_settings();
        }
    }

    /// Reload user themes from disk (e.g. after the user edits a JSON file).
    pub fn reload_user_themes(&mut self) {
        let active_name = self.themes[self.active_index].meta.name.clone();

        // Keep only builtins
        self.themes = builtin_themes();

        // Re-scan user dir
        if let Ok(entries) = std::fs::read_dir(&self.themes_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                    if let Ok(contents) = std::fs::read_to_string(&path) {
                        if let Ok(def) = serde_json::from_str::<ThemeDefinition>(&contents) {
                            if !self.themes.iter().any(|t| t.meta.name == def.meta.name) {
                                self.themes.push(def);
                            }
                        }
                    }
                }
            }
        }

        // Restore selection
        self.active_index = self
            .themes
            .iter()
            .position(|t| t.meta.name == active_name)
            .unwrap_or(0);
    }

    // ── Persistence helpers ─────────────────────────────────────

    fn config_paths() -> (PathBuf, PathBuf) {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "RustDayPlanner") {
            let config = proj_dirs.config_dir().to_path_buf();
            let themes = config.join("themes");
            let settings = config.join("settings.json");
            (themes, settings)
        } else {
            // Fallback
            let dir = PathBuf::from(".");
            (dir.join("themes"), dir.join("settings.json"))
        }
    }

    fn load_settings(path: &PathBuf) -> AppSettings {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn save_settings(&self) {
        let settings = AppSettings {
            active_theme: self.themes[self.active_index].meta.name.clone(),
            scale: self.scale,
        };
        if let Ok(json) = serde_json::to_string_pretty(&settings) {
            let _ = std::fs::create_dir_all(
                self.settings_path.parent().unwrap_or(&self.settings_path),
            );
            let _ = std::fs::write(&self.settings_path, json);
        }
    }
}

// ─── Built-in preset themes ────────────────────────────────────────────────

fn builtin_themes() -> Vec<ThemeDefinition> {
    vec![default_dark(), midnight_theme(), clean_light_theme()]
}

/// The default dark theme (matches the hard-coded defaults).
fn default_dark() -> ThemeDefinition {
    ThemeDefinition::default()
}

/// A deep midnight blue theme.
fn midnight_theme() -> ThemeDefinition {
    use egui::Color32;
    let mut t = ThemeDefinition::default();
    t.meta = crate::ui::theme_def::ThemeMeta {
        name: "Midnight".into(),
        author: "Built-in".into(),
        description: "Deep midnight blue tones.".into(),
        variant: "dark".into(),
    };
    t.colors.bg_dark = Color32::from_rgb(12, 14, 24);
    t.colors.bg_panel = Color32::from_rgb(16, 20, 34);
    t.colors.bg_gutter = Color32::from_rgb(20, 26, 44);
    t.colors.border_subtle = Color32::from_rgb(34, 40, 62);
    t.colors.border_accent = Color32::from_rgb(70, 120, 210);
    t.colors.accent = Color32::from_rgb(60, 120, 220);
    t.colors.hour_line = Color32::from_rgb(30, 36, 56);
    t.colors.half_hour_line = Color32::from_rgb(22, 27, 44);
    t.colors.widget_bg_inactive = Color32::from_rgb(24, 30, 48);
    t.colors.widget_bg_hovered = Color32::from_rgb(34, 42, 66);
    t.colors.widget_bg_active = Color32::from_rgb(42, 50, 76);
    t.colors.widget_bg_open = Color32::from_rgb(30, 38, 60);
    t.colors.faint_bg = Color32::from_rgb(16, 18, 30);
    t.colors.extreme_bg = Color32::from_rgb(10, 12, 20);
    t.colors.status_bar_bg = Color32::from_rgb(14, 16, 28);
    t.colors.block_palette = vec![
        Color32::from_rgb(50, 120, 240),
        Color32::from_rgb(40, 160, 90),
        Color32::from_rgb(160, 60, 200),
        Color32::from_rgb(240, 130, 20),
        Color32::from_rgb(20, 160, 240),
        Color32::from_rgb(220, 50, 60),
        Color32::from_rgb(0, 180, 200),
        Color32::from_rgb(245, 185, 10),
    ];
    t
}

/// A clean light theme.
fn clean_light_theme() -> ThemeDefinition {
    use egui::Color32;
    let mut t = ThemeDefinition::default();
    t.meta = crate::ui::theme_def::ThemeMeta {
        name: "Clean Light".into(),
        author: "Built-in".into(),
        description: "A bright, clean light theme.".into(),
        variant: "light".into(),
    };
    t.colors.bg_dark = Color32::from_rgb(240, 242, 246);
    t.colors.bg_panel = Color32::from_rgb(248, 249, 252);
    t.colors.bg_gutter = Color32::from_rgb(235, 238, 244);
    t.colors.bg_selected = Color32::from_rgba_unmultiplied(60, 120, 220, 30);

    t.colors.border_subtle = Color32::from_rgb(210, 214, 222);
    t.colors.border_accent = Color32::from_rgb(60, 120, 220);

    t.colors.text_primary = Color32::from_rgb(30, 32, 40);
    t.colors.text_secondary = Color32::from_rgb(80, 86, 100);
    t.colors.text_dim = Color32::from_rgb(140, 146, 158);
    t.colors.text_on_block = Color32::from_rgb(255, 255, 255);

    t.colors.accent = Color32::from_rgb(50, 110, 210);
    t.colors.now_line = Color32::from_rgb(220, 50, 50);
    t.colors.hour_line = Color32::from_rgb(214, 218, 226);
    t.colors.half_hour_line = Color32::from_rgb(226, 229, 236);
    t.colors.handle_color = Color32::from_rgb(60, 60, 70);

    t.colors.widget_bg_inactive = Color32::from_rgb(232, 235, 240);
    t.colors.widget_bg_hovered = Color32::from_rgb(220, 224, 232);
    t.colors.widget_bg_active = Color32::from_rgb(208, 212, 222);
    t.colors.widget_bg_open = Color32::from_rgb(225, 228, 236);
    t.colors.faint_bg = Color32::from_rgb(244, 246, 250);
    t.colors.extreme_bg = Color32::from_rgb(255, 255, 255);

    t.colors.status_bar_bg = Color32::from_rgb(235, 237, 242);

    t.colors.block_palette = vec![
        Color32::from_rgb(50, 110, 220),
        Color32::from_rgb(40, 150, 70),
        Color32::from_rgb(150, 50, 180),
        Color32::from_rgb(230, 120, 10),
        Color32::from_rgb(10, 150, 230),
        Color32::from_rgb(210, 40, 50),
        Color32::from_rgb(0, 170, 190),
        Color32::from_rgb(240, 180, 10),
    ];
    t
}
