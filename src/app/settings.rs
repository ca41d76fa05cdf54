use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub glyph_palette: Vec<String>,
    pub color_palette: Vec<String>,
    pub show_grid: bool,
    pub grid_size: f32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            glyph_palette: ["💡", "🌟", "🚀", "🎯", "📌", "🔥", "🌱", "🎵"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            color_palette: [
                "#3b82f6", "#ef4444", "#22c55e", "#f59e0b", "#8b5cf6", "#ec4899", "#14b8a6",
                "#64748b",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            show_grid: true,
            grid_size: 64.0,
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), String> {
    if path.ends_with(".toml") {
        let toml = toml::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, toml).map_err(|e| e.to_string())
    } else {
        let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}
