use crate::model::{NODE_EXTENT, NodeShape, Point};
use eframe::egui;

use super::command_palette::{CommandContext, CommandPalette};
use super::render::{draw_background, draw_connect_hint, draw_edges, draw_nodes, to_screen};
use super::{MindMapApp, help};

impl eframe::App for MindMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        let editing_label = self.controller.editing().is_some();

        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = true;
            }
            let skip_shortcuts = wants_keyboard || editing_label || self.command_palette.open;
            if !skip_shortcuts {
                if i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::P)
                    || i.consume_key(egui::Modifiers::NONE, egui::Key::Space)
                {
                    self.command_palette.open("");
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                    self.confirm_reset = false;
                    self.controller.cancel();
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Tab) {
                    self.add_child_of_active();
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::C) {
                    self.connect_from_active();
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::F2) {
                    self.rename_active();
                }
                if i.consume_key(egui::Modifiers::NONE, egui::Key::Delete)
                    || i.consume_key(egui::Modifiers::NONE, egui::Key::Backspace)
                {
                    self.delete_active();
                }
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Gaji");
                ui.separator();
                let has_active = self.active.is_some();
                if ui
                    .add_enabled(has_active, egui::Button::new("Add child (Tab)"))
                    .clicked()
                {
                    self.add_child_of_active();
                }
                if ui
                    .add_enabled(has_active, egui::Button::new("Connect (C)"))
                    .clicked()
                {
                    self.connect_from_active();
                }
                if ui
                    .add_enabled(has_active, egui::Button::new("Rename (F2)"))
                    .clicked()
                {
                    self.rename_active();
                }
                let can_delete = has_active && self.map.nodes().len() > 1;
                if ui.add_enabled(can_delete, egui::Button::new("Delete")).clicked() {
                    self.delete_active();
                }
                ui.separator();
                if ui.button("Recenter").clicked() {
                    self.recenter_layout();
                }
                if ui.button("Start over…").clicked() {
                    self.request_reset();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Help (F1)").clicked() {
                        self.show_help = true;
                    }
                });
            });
        });

        egui::SidePanel::right("side_panel")
            .default_width(230.0)
            .show(ctx, |ui| {
                ui.heading("Node");
                let picked = self.active.and_then(|id| self.map.node(id)).cloned();
                if let Some(node) = picked {
                    if node.label.is_empty() {
                        ui.label(format!("Picked: node {}", node.id));
                    } else {
                        ui.label(format!("Picked: {}", node.label));
                    }
                    ui.add_space(4.0);
                    ui.label("Color");
                    ui.horizontal_wrapped(|ui| {
                        let colors = self.color_palette.clone();
                        for color in colors {
                            if ui
                                .add_sized([20.0, 20.0], egui::Button::new("").fill(color.to_color32()))
                                .clicked()
                            {
                                self.apply_color_to_active(color);
                            }
                        }
                    });
                    ui.label("Glyph");
                    ui.horizontal_wrapped(|ui| {
                        let glyphs = self.glyph_palette.clone();
                        for glyph in &glyphs {
                            if ui.button(glyph).clicked() {
                                self.apply_glyph_to_active(glyph);
                            }
                        }
                    });
                    ui.label("Shape");
                    ui.horizontal(|ui| {
                        if ui
                            .selectable_label(node.shape == NodeShape::Circle, "Circle")
                            .clicked()
                        {
                            self.set_active_shape(NodeShape::Circle);
                        }
                        if ui
                            .selectable_label(node.shape == NodeShape::Rect, "Rect")
                            .clicked()
                        {
                            self.set_active_shape(NodeShape::Rect);
                        }
                    });
                } else {
                    ui.label("Click a node to pick it.");
                }

                ui.separator();
                ui.heading("Edges");
                let rows: Vec<(usize, String, &'static str)> = self
                    .map
                    .edges()
                    .iter()
                    .enumerate()
                    .map(|(i, e)| {
                        let name = |id: u64| {
                            self.map
                                .node(id)
                                .map(|n| {
                                    if n.label.is_empty() {
                                        format!("#{}", n.id)
                                    } else {
                                        n.label.clone()
                                    }
                                })
                                .unwrap_or_else(|| format!("#{}", id))
                        };
                        let style = match e.style {
                            crate::model::EdgeStyle::Solid => "solid",
                            crate::model::EdgeStyle::Dashed => "dashed",
                        };
                        (i, format!("{} → {}", name(e.source), name(e.target)), style)
                    })
                    .collect();
                if rows.is_empty() {
                    ui.label("No edges yet.");
                }
                for (i, label, style) in rows {
                    ui.horizontal(|ui| {
                        ui.label(label);
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button(style).clicked() {
                                self.map.toggle_edge_style(i);
                            }
                        });
                    });
                }

                ui.separator();
                ui.heading("Canvas");
                if ui.checkbox(&mut self.show_grid, "Show grid").changed() {
                    self.persist_settings();
                }
                if ui
                    .add(egui::Slider::new(&mut self.grid_size, 8.0..=128.0).text("Grid size"))
                    .changed()
                {
                    self.persist_settings();
                }
            });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(status) = &self.status {
                    ui.label(status);
                } else {
                    ui.label("Ready");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.state_name());
                    ui.separator();
                    ui.label(format!("Edges: {}", self.map.edges().len()));
                    ui.separator();
                    ui.label(format!("Nodes: {}", self.map.nodes().len()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let origin = rect.min;
            let origin_pt = Point::from_pos2(origin);
            self.remember_canvas_anchor(Point::new(
                rect.center().x - origin.x,
                rect.center().y - origin.y,
            ));

            let painter = ui.painter_at(rect);
            let pointer_pos = ctx.input(|i| i.pointer.interact_pos());

            let mut handled_double_click = false;
            if response.double_clicked() {
                if let Some(p) = pointer_pos {
                    let model_pos = self
                        .controller
                        .space()
                        .to_model(Point::from_pos2(p), origin_pt);
                    if let Some(id) = self.map.node_at(model_pos) {
                        self.active = Some(id);
                        self.controller.start_label_edit(&self.map, id);
                        self.focus_label_editor = true;
                        handled_double_click = true;
                    }
                }
            }

            let pressed = response.drag_started() || response.clicked();
            if pressed && !handled_double_click {
                if let Some(p) = pointer_pos {
                    let pointer = Point::from_pos2(p);
                    // the host resolves the target up front; the controller
                    // would hit-test the same way if it didn't
                    let hit = self
                        .map
                        .node_at(self.controller.space().to_model(pointer, origin_pt));
                    self.controller
                        .pointer_down(&mut self.map, pointer, Some(origin_pt), hit);
                    self.active = hit;
                    self.status = None;
                }
            }

            if response.dragged() && !handled_double_click {
                if let Some(p) = pointer_pos {
                    self.controller
                        .pointer_move(&mut self.map, Point::from_pos2(p), Some(origin_pt));
                }
            }
            // a click is a press and release in one frame
            if response.drag_stopped() || response.clicked() {
                self.controller.pointer_up();
            }

            if response.secondary_clicked() {
                if let Some(p) = pointer_pos {
                    let model_pos = self
                        .controller
                        .space()
                        .to_model(Point::from_pos2(p), origin_pt);
                    if let Some(id) = self.map.node_at(model_pos) {
                        self.active = Some(id);
                        self.connect_from_active();
                    }
                }
            }

            draw_background(&painter, rect, self.show_grid, self.grid_size);
            draw_edges(&painter, origin, &self.map);
            if let Some(source) = self.controller.connect_source() {
                draw_connect_hint(&painter, origin, &self.map, source, pointer_pos);
            }
            draw_nodes(&painter, origin, &self.map, self.active);

            let editing = self
                .controller
                .editing()
                .map(|s| (s.node_id(), s.text().to_string()));
            if let Some((id, text)) = editing {
                match self.map.node(id) {
                    Some(node) => {
                        let pos = to_screen(origin, node.pos) + egui::vec2(0.0, NODE_EXTENT + 6.0);
                        egui::Area::new(egui::Id::new("label_editor"))
                            .fixed_pos(pos)
                            .order(egui::Order::Foreground)
                            .show(ctx, |ui| {
                                let mut buf = text;
                                let resp = ui.add(
                                    egui::TextEdit::singleline(&mut buf)
                                        .desired_width(180.0)
                                        .hint_text("Label"),
                                );
                                if self.focus_label_editor {
                                    resp.request_focus();
                                    self.focus_label_editor = false;
                                }
                                if resp.changed() {
                                    self.controller.label_input(&mut self.map, buf);
                                }
                                if resp.lost_focus() {
                                    self.controller.end_label_edit();
                                }
                            });
                    }
                    None => self.controller.end_label_edit(),
                }
            }
        });

        if self.confirm_reset {
            egui::Window::new("Start over?")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label("This discards every node and edge except a fresh root.");
                    ui.horizontal(|ui| {
                        if ui.button("Start over").clicked() {
                            self.do_reset();
                        }
                        if ui.button("Keep my map").clicked() {
                            self.confirm_reset = false;
                        }
                    });
                });
        }

        let cx = CommandContext {
            has_active: self.active.is_some(),
            node_count: self.map.nodes().len(),
        };
        if let Some(cmd) = self.command_palette.ui(ctx, cx) {
            CommandPalette::execute(self, ctx, cmd);
        }

        help::draw_help_window(ctx, &mut self.show_help);
    }
}
