use crate::model::{EdgeStyle, MindMap, NODE_EXTENT, NODE_HALF_EXTENT, Node, NodeShape, Point};
use eframe::egui;

pub(super) fn to_screen(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    origin + p.to_pos2().to_vec2()
}

pub(super) fn draw_background(
    painter: &egui::Painter,
    rect: egui::Rect,
    show_grid: bool,
    grid_size: f32,
) {
    let bg = painter.ctx().style().visuals.extreme_bg_color;
    painter.rect_filled(rect, 0.0, bg);
    if !show_grid || grid_size < 8.0 {
        return;
    }
    let grid_color = egui::Color32::from_gray(60);
    let mut x = rect.min.x;
    while x < rect.max.x {
        painter.line_segment(
            [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
            egui::Stroke::new(1.0, grid_color),
        );
        x += grid_size;
    }
    let mut y = rect.min.y;
    while y < rect.max.y {
        painter.line_segment(
            [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
            egui::Stroke::new(1.0, grid_color),
        );
        y += grid_size;
    }
}

pub(super) fn draw_edges(painter: &egui::Painter, origin: egui::Pos2, map: &MindMap) {
    let stroke = egui::Stroke::new(2.0, egui::Color32::from_gray(150));
    for edge in map.edges() {
        let (Some(source), Some(target)) = (map.node(edge.source), map.node(edge.target)) else {
            continue;
        };
        let a = to_screen(origin, source.center());
        let b = to_screen(origin, target.center());
        match edge.style {
            EdgeStyle::Solid => {
                painter.line_segment([a, b], stroke);
            }
            EdgeStyle::Dashed => draw_dashed_line(painter, a, b, stroke, 10.0, 5.0),
        }
    }
}

pub(super) fn draw_connect_hint(
    painter: &egui::Painter,
    origin: egui::Pos2,
    map: &MindMap,
    source_id: u64,
    pointer: Option<egui::Pos2>,
) {
    let Some(source) = map.node(source_id) else {
        return;
    };
    let from = to_screen(origin, source.center());
    let hint = egui::Stroke::new(1.5, egui::Color32::from_rgb(240, 170, 60));
    if let Some(to) = pointer {
        draw_dashed_line(painter, from, to, hint, 6.0, 4.0);
    }
    painter.circle_stroke(from, NODE_HALF_EXTENT + 4.0, hint);
}

pub(super) fn draw_nodes(
    painter: &egui::Painter,
    origin: egui::Pos2,
    map: &MindMap,
    active: Option<u64>,
) {
    for node in map.nodes() {
        draw_node(painter, origin, node, active == Some(node.id));
    }
}

fn draw_node(painter: &egui::Painter, origin: egui::Pos2, node: &Node, is_active: bool) {
    let center = to_screen(origin, node.center());
    let fill = node.color.to_color32();
    let outline = egui::Stroke::new(1.0, fill.gamma_multiply(0.6));
    match node.shape {
        NodeShape::Circle => {
            painter.circle_filled(center, NODE_HALF_EXTENT, fill);
            painter.circle_stroke(center, NODE_HALF_EXTENT, outline);
        }
        NodeShape::Rect => {
            let rect = egui::Rect::from_center_size(center, egui::vec2(NODE_EXTENT, NODE_EXTENT));
            painter.rect_filled(rect, 12.0, fill);
            painter.rect_stroke(rect, 12.0, outline, egui::StrokeKind::Middle);
        }
    }

    if !node.glyph.is_empty() {
        painter.text(
            center - egui::vec2(0.0, 16.0),
            egui::Align2::CENTER_CENTER,
            &node.glyph,
            egui::FontId::proportional(22.0),
            egui::Color32::WHITE,
        );
    }
    if !node.label.is_empty() {
        painter.text(
            center + egui::vec2(0.0, 16.0),
            egui::Align2::CENTER_CENTER,
            &node.label,
            egui::FontId::proportional(13.0),
            egui::Color32::WHITE,
        );
    }

    if is_active {
        let stroke = egui::Stroke::new(2.0, egui::Color32::from_rgb(90, 160, 255));
        match node.shape {
            NodeShape::Circle => {
                painter.circle_stroke(center, NODE_HALF_EXTENT + 3.0, stroke);
            }
            NodeShape::Rect => {
                let rect = egui::Rect::from_center_size(
                    center,
                    egui::vec2(NODE_EXTENT + 6.0, NODE_EXTENT + 6.0),
                );
                painter.rect_stroke(rect, 12.0, stroke, egui::StrokeKind::Middle);
            }
        }
    }
}

fn draw_dashed_line(
    painter: &egui::Painter,
    a: egui::Pos2,
    b: egui::Pos2,
    stroke: egui::Stroke,
    dash_len: f32,
    gap_len: f32,
) {
    let v = b - a;
    let len = v.length();
    if len <= f32::EPSILON {
        return;
    }
    let dir = v / len;
    let mut pos = 0.0;
    let mut drawing = true;
    while pos < len {
        let seg_len = if drawing { dash_len } else { gap_len };
        let next_pos = (pos + seg_len).min(len);
        if drawing {
            let start = a + dir * pos;
            let end = a + dir * next_pos;
            painter.line_segment([start, end], stroke);
        }
        pos = next_pos;
        drawing = !drawing;
    }
}
