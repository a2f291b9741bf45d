use crate::class_colors::{ClassPalette, HexColor};
use crate::errors::{Result, ViewerError};
use crate::viewer::transform::ZoomLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    // Appearance
    pub background_color: HexColor,
    pub palette: ClassPalette,
    /// Box outline width in backing-store pixels at scale 1
    pub stroke_width: f32,
    pub show_loading_badge: bool,

    // Zoom behavior
    pub zoom: ZoomLimits,

    // Sources
    /// Prefix for relative image URLs such as `/media/originals/12.jpg`
    pub asset_base_url: Option<String>,

    // Window state
    pub window_size: (f32, f32),

    // Session
    pub last_record: Option<PathBuf>,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            background_color: HexColor(egui::Color32::from_rgb(24, 24, 28)),
            palette: ClassPalette::default(),
            stroke_width: 20.0,
            show_loading_badge: true,

            zoom: ZoomLimits::default(),

            asset_base_url: None,

            window_size: (1400.0, 900.0),

            last_record: None,
        }
    }
}

impl ViewerSettings {
    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "annoview", "annoview")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load from the platform config directory, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Best-effort save to the platform config directory.
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            log::warn!("Failed to save settings to {}: {}", path.display(), e);
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        if !(zoom.min > 0.0 && zoom.min <= 1.0 && zoom.max >= 1.0 && zoom.step > 0.0) {
            return Err(ViewerError::SettingsError {
                message: format!(
                    "zoom limits must satisfy 0 < min <= 1 <= max and step > 0 (got {:?})",
                    zoom
                ),
            });
        }
        if self.stroke_width <= 0.0 {
            return Err(ViewerError::SettingsError {
                message: format!("stroke_width must be positive (got {})", self.stroke_width),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_keeps_custom_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let mut settings = ViewerSettings::default();
        settings.stroke_width = 6.0;
        settings.asset_base_url = Some("http://localhost:28088".to_string());
        settings.save_to(&path).unwrap();

        let loaded = ViewerSettings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"stroke_width": 3.0}"#).unwrap();

        let loaded = ViewerSettings::load_from(&path).unwrap();
        assert_eq!(loaded.stroke_width, 3.0);
        assert_eq!(loaded.zoom, ZoomLimits::default());
        assert_eq!(loaded.palette, ClassPalette::default());
    }

    #[test]
    fn rejects_inverted_zoom_limits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"zoom": {"min": 2.0, "max": 0.5, "step": 0.1}}"#).unwrap();

        let err = ViewerSettings::load_from(&path).unwrap_err();
        assert_eq!(err.error_code(), "SETTINGS_ERROR");
    }

    #[test]
    fn malformed_background_color_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r##"{"background_color": "#aébcd"}"##).unwrap();

        let err = ViewerSettings::load_from(&path).unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }
}
