use crate::interaction::Interaction;
use crate::model::{NODE_HALF_EXTENT, NodePatch, NodeShape, Point, ROOT_POS, Rgba};

use super::{MindMapApp, settings};

impl MindMapApp {
    pub(super) fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub(super) fn state_name(&self) -> &'static str {
        match self.controller.state() {
            Interaction::Idle => "Idle",
            Interaction::Dragging(_) => "Dragging",
            Interaction::ConnectSource(_) => "Connecting",
            Interaction::EditingLabel(_) => "Editing",
        }
    }

    pub(super) fn add_child_of_active(&mut self) {
        let Some(parent) = self.active else {
            return;
        };
        let spawned = self.map.spawn_child(
            parent,
            NodePatch::default(),
            &self.glyph_palette,
            &mut self.rng,
        );
        let Some(id) = spawned else {
            return;
        };
        self.active = Some(id);
        // new ideas want a name right away
        self.controller.start_label_edit(&self.map, id);
        self.focus_label_editor = true;
    }

    pub(super) fn connect_from_active(&mut self) {
        let Some(id) = self.active else {
            return;
        };
        self.controller.start_connect(&self.map, id);
        self.set_status("Click another node to connect, or the background to cancel");
    }

    pub(super) fn rename_active(&mut self) {
        let Some(id) = self.active else {
            return;
        };
        self.controller.start_label_edit(&self.map, id);
        self.focus_label_editor = true;
    }

    pub(super) fn delete_active(&mut self) {
        let Some(id) = self.active else {
            return;
        };
        if self.map.nodes().len() <= 1 {
            self.set_status("The last node stays");
            return;
        }
        let entangled = match self.controller.state() {
            Interaction::Dragging(n) | Interaction::ConnectSource(n) => *n == id,
            Interaction::EditingLabel(session) => session.node_id() == id,
            Interaction::Idle => false,
        };
        if entangled {
            self.controller.cancel();
        }
        self.map.remove_node(id);
        self.active = None;
    }

    pub(super) fn apply_color_to_active(&mut self, color: Rgba) {
        let Some(id) = self.active else {
            return;
        };
        self.map.update_node(id, NodePatch {
            color: Some(color),
            ..NodePatch::default()
        });
    }

    pub(super) fn apply_glyph_to_active(&mut self, glyph: &str) {
        let Some(id) = self.active else {
            return;
        };
        self.map.update_node(id, NodePatch {
            glyph: Some(glyph.to_string()),
            ..NodePatch::default()
        });
    }

    pub(super) fn set_active_shape(&mut self, shape: NodeShape) {
        let Some(id) = self.active else {
            return;
        };
        self.map.update_node(id, NodePatch {
            shape: Some(shape),
            ..NodePatch::default()
        });
    }

    /// Pull the root (and everything hanging off it) back to the middle of
    /// the canvas, or to the default anchor before the first frame.
    pub(super) fn recenter_layout(&mut self) {
        let anchor = self
            .canvas_anchor
            .map(|c| c.offset(-NODE_HALF_EXTENT, -NODE_HALF_EXTENT))
            .unwrap_or(ROOT_POS);
        self.map.recenter(anchor);
        self.set_status("Recentered");
    }

    pub(super) fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    pub(super) fn do_reset(&mut self) {
        self.map.reset();
        self.controller.cancel();
        self.active = None;
        self.confirm_reset = false;
        self.set_status("Started over");
    }

    pub(super) fn persist_settings(&mut self) {
        let settings = settings::AppSettings {
            glyph_palette: self.glyph_palette.clone(),
            color_palette: self.color_palette.iter().map(|c| hex(*c)).collect(),
            show_grid: self.show_grid,
            grid_size: self.grid_size,
        };
        if let Err(e) = settings::save_settings(&self.settings_path, &settings) {
            self.set_status(format!("Failed to save settings: {}", e));
        }
    }

    pub(super) fn remember_canvas_anchor(&mut self, center: Point) {
        self.canvas_anchor = Some(center);
    }
}

fn hex(c: Rgba) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}
