mod app;
mod interaction;
mod model;

fn main() -> eframe::Result<()> {
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Gaji",
        native_options,
        Box::new(|cc| Ok(Box::new(app::MindMapApp::new(cc)))),
    )
}
