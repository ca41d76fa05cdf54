use crate::interaction::Controller;
use crate::model::{MindMap, Point, Rgba};
use rand::SeedableRng;
use rand::rngs::SmallRng;

mod actions;
mod command_palette;
mod help;
mod render;
mod settings;
mod update;

pub struct MindMapApp {
    map: MindMap,
    controller: Controller,
    rng: SmallRng,
    glyph_palette: Vec<String>,
    color_palette: Vec<Rgba>,
    active: Option<u64>,
    status: Option<String>,
    confirm_reset: bool,
    show_help: bool,
    show_grid: bool,
    grid_size: f32,
    settings_path: String,
    command_palette: command_palette::CommandPalette,
    focus_label_editor: bool,
    canvas_anchor: Option<Point>,
}

impl MindMapApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home).join(".config").join("gaji.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path).unwrap_or_default();

        let color_palette = settings
            .color_palette
            .iter()
            .filter_map(|hex| Rgba::from_hex(hex))
            .collect();

        Self {
            map: MindMap::new(),
            controller: Controller::new(),
            rng: SmallRng::from_entropy(),
            glyph_palette: settings.glyph_palette,
            color_palette,
            active: None,
            status: None,
            confirm_reset: false,
            show_help: false,
            show_grid: settings.show_grid,
            grid_size: settings.grid_size,
            settings_path,
            command_palette: command_palette::CommandPalette::default(),
            focus_label_editor: false,
            canvas_anchor: None,
        }
    }
}
