use eframe::egui;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help & Commands")
        .open(open)
        .resizable(true)
        .default_width(460.0)
        .default_height(400.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Keyboard Shortcuts");
                ui.separator();

                ui.label("General");
                help_row(ui, "Space", "Open command palette");
                help_row(ui, "⌘⇧P", "Open command palette");
                help_row(ui, "F1", "Show this window");
                help_row(ui, "Escape", "Cancel connect mode / close dialogs");

                ui.add_space(10.0);
                ui.label("Nodes");
                help_row(ui, "Click", "Pick a node");
                help_row(ui, "Drag", "Move a node (it follows the pointer)");
                help_row(ui, "Double-click", "Edit the label inline");
                help_row(ui, "Right-click", "Start connect mode from a node");
                help_row(ui, "Tab", "Add a child to the picked node");
                help_row(ui, "C", "Start connect mode from the picked node");
                help_row(ui, "F2", "Rename the picked node");
                help_row(ui, "Delete / Backspace", "Delete the picked node");

                ui.add_space(10.0);
                ui.label("Connecting");
                ui.label("With connect mode armed, click another node to add an edge,");
                ui.label("or click empty background to cancel. Click an edge's style");
                ui.label("button in the side panel to flip it between solid and dashed.");

                ui.add_space(20.0);
                ui.heading("Command Palette");
                ui.separator();
                ui.label("Press Space or ⌘⇧P to open the command palette.");
                ui.label("Type to search for commands, use arrow keys to navigate, Enter to execute.");

                ui.add_space(20.0);
                ui.heading("Palettes");
                ui.separator();
                ui.label("Customize glyphs and colors in settings.toml:");
                ui.add_space(5.0);
                ui.code(r##"glyph_palette = ["💡", "🌟", "🚀"]
color_palette = ["#3b82f6", "#ef4444", "#22c55e"]"##);
                ui.add_space(5.0);
                ui.label("Settings are stored in ~/.config/gaji.toml or ./settings.toml");
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized([130.0, 16.0], egui::Label::new(
            egui::RichText::new(shortcut).monospace().strong()
        ));
        ui.label(description);
    });
}
