use eframe::egui;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const NODE_EXTENT: f32 = 100.0;
pub const NODE_HALF_EXTENT: f32 = NODE_EXTENT * 0.5;

pub const ROOT_POS: Point = Point { x: 200.0, y: 200.0 };
pub const ROOT_COLOR: Rgba = Rgba { r: 59, g: 130, b: 246, a: 255 };
pub const ROOT_LABEL: &str = "Main idea";
pub const DEFAULT_GLYPH: &str = "💡";

pub const CHILD_OFFSET_X: f32 = 150.0;
pub const CHILD_SCATTER_Y: f32 = 50.0;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_pos2(p: egui::Pos2) -> Self {
        Self { x: p.x, y: p.y }
    }

    pub fn to_pos2(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_premultiplied(self.r, self.g, self.b, self.a)
    }

    pub fn from_color32(c: egui::Color32) -> Self {
        let [r, g, b, a] = c.to_array();
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() < 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self { r, g, b, a: 255 })
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NodeShape {
    #[default]
    Circle,
    Rect,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
}

impl EdgeStyle {
    pub fn toggled(self) -> Self {
        match self {
            EdgeStyle::Solid => EdgeStyle::Dashed,
            EdgeStyle::Dashed => EdgeStyle::Solid,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: u64,
    pub label: String,
    pub pos: Point,
    pub color: Rgba,
    pub shape: NodeShape,
    pub glyph: String,
}

impl Node {
    pub fn center(&self) -> Point {
        self.pos.offset(NODE_HALF_EXTENT, NODE_HALF_EXTENT)
    }

    fn apply(&mut self, patch: NodePatch) -> bool {
        let mut changed = false;
        if let Some(label) = patch.label {
            self.label = label;
            changed = true;
        }
        if let Some(pos) = patch.pos {
            self.pos = pos;
            changed = true;
        }
        if let Some(color) = patch.color {
            self.color = color;
            changed = true;
        }
        if let Some(shape) = patch.shape {
            self.shape = shape;
            changed = true;
        }
        if let Some(glyph) = patch.glyph {
            self.glyph = glyph;
            changed = true;
        }
        changed
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub source: u64,
    pub target: u64,
    pub style: EdgeStyle,
}

#[derive(Clone, Debug, Default)]
pub struct NodePatch {
    pub label: Option<String>,
    pub pos: Option<Point>,
    pub color: Option<Rgba>,
    pub shape: Option<NodeShape>,
    pub glyph: Option<String>,
}

/// The mind-map graph. Mutation goes through the operations below, which
/// keep three invariants: node ids are unique, every edge endpoint names a
/// live node, and at least one node always exists.
pub struct MindMap {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    root_id: u64,
    next_id: u64,
    version: u64,
}

impl Default for MindMap {
    fn default() -> Self {
        Self::new()
    }
}

impl MindMap {
    pub fn new() -> Self {
        let root = Node {
            id: 1,
            label: ROOT_LABEL.to_string(),
            pos: ROOT_POS,
            color: ROOT_COLOR,
            shape: NodeShape::Circle,
            glyph: DEFAULT_GLYPH.to_string(),
        };
        Self {
            nodes: vec![root],
            edges: Vec::new(),
            root_id: 1,
            next_id: 2,
            version: 0,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn root_id(&self) -> u64 {
        self.root_id
    }

    /// Bumped on every call that actually changes state; hosts poll this
    /// instead of receiving change events.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn node(&self, id: u64) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.node(id).is_some()
    }

    /// Topmost node whose footprint contains `pos`, where the footprint is
    /// a NODE_EXTENT square (Rect) or its inscribed circle (Circle).
    pub fn node_at(&self, pos: Point) -> Option<u64> {
        for node in self.nodes.iter().rev() {
            let hit = match node.shape {
                NodeShape::Rect => {
                    pos.x >= node.pos.x
                        && pos.x <= node.pos.x + NODE_EXTENT
                        && pos.y >= node.pos.y
                        && pos.y <= node.pos.y + NODE_EXTENT
                }
                NodeShape::Circle => {
                    let c = node.center();
                    let dx = pos.x - c.x;
                    let dy = pos.y - c.y;
                    dx * dx + dy * dy <= NODE_HALF_EXTENT * NODE_HALF_EXTENT
                }
            };
            if hit {
                return Some(node.id);
            }
        }
        None
    }

    fn bump(&mut self) {
        self.version += 1;
    }

    /// Create a child of `parent_id` offset to the right with a random
    /// vertical scatter, inheriting the parent color. The glyph comes from
    /// the injected palette via the injected rng unless `overrides` names
    /// one. Returns the new id, or None if the parent is unknown.
    pub fn spawn_child<R: Rng>(
        &mut self,
        parent_id: u64,
        overrides: NodePatch,
        glyphs: &[String],
        rng: &mut R,
    ) -> Option<u64> {
        let (parent_pos, parent_color) = {
            let parent = self.node(parent_id)?;
            (parent.pos, parent.color)
        };
        let id = self.next_id;
        self.next_id += 1;

        let scatter = rng.gen_range(-CHILD_SCATTER_Y..=CHILD_SCATTER_Y);
        let glyph = if glyphs.is_empty() {
            DEFAULT_GLYPH.to_string()
        } else {
            glyphs[rng.gen_range(0..glyphs.len())].clone()
        };
        let mut child = Node {
            id,
            label: String::new(),
            pos: parent_pos.offset(CHILD_OFFSET_X, scatter),
            color: parent_color,
            shape: NodeShape::Rect,
            glyph,
        };
        child.apply(overrides);

        self.nodes.push(child);
        self.edges.push(Edge {
            source: parent_id,
            target: id,
            style: EdgeStyle::Solid,
        });
        self.bump();
        Some(id)
    }

    /// Remove a node and every edge touching it in one step. The last
    /// remaining node is never removed.
    pub fn remove_node(&mut self, id: u64) {
        if self.nodes.len() <= 1 {
            return;
        }
        let Some(idx) = self.nodes.iter().position(|n| n.id == id) else {
            return;
        };
        self.nodes.remove(idx);
        self.edges.retain(|e| e.source != id && e.target != id);
        self.bump();
    }

    /// Connect two existing, distinct nodes. Parallel edges between the
    /// same pair are allowed.
    pub fn add_edge(&mut self, source: u64, target: u64, style: EdgeStyle) {
        if source == target || !self.contains(source) || !self.contains(target) {
            return;
        }
        self.edges.push(Edge {
            source,
            target,
            style,
        });
        self.bump();
    }

    pub fn toggle_edge_style(&mut self, index: usize) {
        let Some(edge) = self.edges.get_mut(index) else {
            return;
        };
        edge.style = edge.style.toggled();
        self.bump();
    }

    pub fn update_node(&mut self, id: u64, patch: NodePatch) {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return;
        };
        if node.apply(patch) {
            self.bump();
        }
    }

    /// Back to the single-root construction contract. The version counter
    /// keeps counting so pollers still observe the change.
    pub fn reset(&mut self) {
        let version = self.version;
        *self = Self::new();
        self.version = version + 1;
    }

    /// Translate the whole layout so the root node lands on `anchor`,
    /// preserving every relative offset. The root is the first-created
    /// node; if it has since been removed this is a no-op.
    pub fn recenter(&mut self, anchor: Point) {
        let Some(root) = self.node(self.root_id) else {
            return;
        };
        let dx = anchor.x - root.pos.x;
        let dy = anchor.y - root.pos.y;
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        for node in &mut self.nodes {
            node.pos = node.pos.offset(dx, dy);
        }
        self.bump();
    }
}
