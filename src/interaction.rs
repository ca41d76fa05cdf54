use crate::model::{EdgeStyle, MindMap, NODE_HALF_EXTENT, NodePatch, Point};

/// Converts host pointer positions into model-space node positions. The
/// half-extent offset keeps the node centered under the pointer instead of
/// hanging off its top-left corner.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateSpace {
    half_extent: f32,
}

impl CoordinateSpace {
    pub fn new(half_extent: f32) -> Self {
        Self { half_extent }
    }

    pub fn to_model(&self, pointer: Point, container_origin: Point) -> Point {
        Point {
            x: pointer.x - container_origin.x - self.half_extent,
            y: pointer.y - container_origin.y - self.half_extent,
        }
    }
}

impl Default for CoordinateSpace {
    fn default() -> Self {
        Self::new(NODE_HALF_EXTENT)
    }
}

/// A text edit scoped to one node. Every keystroke is applied to the model
/// immediately, so there is nothing to flush when the session ends.
#[derive(Clone, Debug)]
pub struct LabelEditSession {
    node_id: u64,
    text: String,
}

impl LabelEditSession {
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn apply(&mut self, map: &mut MindMap, text: String) {
        self.text = text.clone();
        map.update_node(self.node_id, NodePatch {
            label: Some(text),
            ..NodePatch::default()
        });
    }
}

#[derive(Clone, Debug, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(u64),
    ConnectSource(u64),
    EditingLabel(LabelEditSession),
}

/// Interprets host pointer/gesture events and drives the graph. Events
/// carry a raw pointer position plus an optional pre-resolved target node;
/// when the host has no container origin for the event, the whole event is
/// dropped rather than partially applied.
pub struct Controller {
    state: Interaction,
    space: CoordinateSpace,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            state: Interaction::Idle,
            space: CoordinateSpace::default(),
        }
    }

    pub fn state(&self) -> &Interaction {
        &self.state
    }

    pub fn space(&self) -> &CoordinateSpace {
        &self.space
    }

    pub fn connect_source(&self) -> Option<u64> {
        match self.state {
            Interaction::ConnectSource(id) => Some(id),
            _ => None,
        }
    }

    pub fn dragging(&self) -> Option<u64> {
        match self.state {
            Interaction::Dragging(id) => Some(id),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<&LabelEditSession> {
        match &self.state {
            Interaction::EditingLabel(session) => Some(session),
            _ => None,
        }
    }

    pub fn pointer_down(
        &mut self,
        map: &mut MindMap,
        pointer: Point,
        origin: Option<Point>,
        target: Option<u64>,
    ) {
        let Some(origin) = origin else {
            return;
        };
        let pos = self.space.to_model(pointer, origin);
        let target = target.or_else(|| map.node_at(pos));

        // A press always blurs a live label session before it does anything
        // else; the label was applied keystroke by keystroke already.
        let state = std::mem::take(&mut self.state);
        self.state = match (state, target) {
            (Interaction::ConnectSource(source), Some(target)) => {
                if target == source {
                    // self-target is ignored, connect mode stays armed
                    Interaction::ConnectSource(source)
                } else {
                    map.add_edge(source, target, EdgeStyle::Solid);
                    Interaction::Idle
                }
            }
            // pressing empty background cancels connect mode
            (Interaction::ConnectSource(_), None) => Interaction::Idle,
            (_, Some(target)) => Interaction::Dragging(target),
            (_, None) => Interaction::Idle,
        };
    }

    pub fn pointer_move(&mut self, map: &mut MindMap, pointer: Point, origin: Option<Point>) {
        let Interaction::Dragging(id) = self.state else {
            return;
        };
        // no origin, no move; the drag stays armed for the next event
        let Some(origin) = origin else {
            return;
        };
        let pos = self.space.to_model(pointer, origin);
        map.update_node(id, NodePatch {
            pos: Some(pos),
            ..NodePatch::default()
        });
    }

    pub fn pointer_up(&mut self) {
        if matches!(self.state, Interaction::Dragging(_)) {
            self.state = Interaction::Idle;
        }
    }

    /// Arm connect mode on `id`. A second call replaces the pending source
    /// (last writer wins); unknown ids are ignored.
    pub fn start_connect(&mut self, map: &MindMap, id: u64) {
        if map.contains(id) {
            self.state = Interaction::ConnectSource(id);
        }
    }

    pub fn start_label_edit(&mut self, map: &MindMap, id: u64) {
        let Some(node) = map.node(id) else {
            return;
        };
        self.state = Interaction::EditingLabel(LabelEditSession {
            node_id: id,
            text: node.label.clone(),
        });
    }

    pub fn label_input(&mut self, map: &mut MindMap, text: String) {
        if let Interaction::EditingLabel(session) = &mut self.state {
            session.apply(map, text);
        }
    }

    /// Blur or confirm-key; the session's edits are already live.
    pub fn end_label_edit(&mut self) {
        if matches!(self.state, Interaction::EditingLabel(_)) {
            self.state = Interaction::Idle;
        }
    }

    /// Host-level escape hatch: abandon whatever is in flight.
    pub fn cancel(&mut self) {
        self.state = Interaction::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    fn glyphs() -> Vec<String> {
        vec!["🌟".to_string()]
    }

    fn spawn(map: &mut MindMap, parent: u64) -> u64 {
        let mut rng = StdRng::seed_from_u64(3);
        map.spawn_child(parent, NodePatch::default(), &glyphs(), &mut rng)
            .unwrap()
    }

    /// Pointer position that lands on the node's center after conversion.
    fn press_point(map: &MindMap, id: u64) -> Point {
        map.node(id)
            .unwrap()
            .center()
            .offset(NODE_HALF_EXTENT, NODE_HALF_EXTENT)
    }

    #[test]
    fn to_model_subtracts_origin_and_half_extent() {
        let space = CoordinateSpace::new(50.0);
        let p = space.to_model(Point::new(300.0, 300.0), Point::new(10.0, 10.0));
        assert_eq!(p, Point::new(240.0, 240.0));
    }

    #[test]
    fn drag_updates_the_model_on_every_move() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();

        let press = press_point(&map, 1);
        ctl.pointer_down(&mut map, press, Some(ORIGIN), None);
        assert_eq!(ctl.dragging(), Some(1));

        ctl.pointer_move(&mut map, Point::new(400.0, 120.0), Some(ORIGIN));
        assert_eq!(map.node(1).unwrap().pos, Point::new(350.0, 70.0));

        ctl.pointer_move(&mut map, Point::new(410.0, 130.0), Some(ORIGIN));
        assert_eq!(map.node(1).unwrap().pos, Point::new(360.0, 80.0));

        ctl.pointer_up();
        assert!(matches!(ctl.state(), Interaction::Idle));
    }

    #[test]
    fn press_on_background_stays_idle() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        let version = map.version();
        ctl.pointer_down(&mut map, Point::new(900.0, 900.0), Some(ORIGIN), None);
        assert!(matches!(ctl.state(), Interaction::Idle));
        assert_eq!(map.version(), version);
    }

    #[test]
    fn events_without_an_origin_are_dropped() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();

        let press = press_point(&map, 1);
        ctl.pointer_down(&mut map, press, None, None);
        assert!(matches!(ctl.state(), Interaction::Idle));

        // arm a drag, then lose the origin mid-drag
        ctl.pointer_down(&mut map, press, Some(ORIGIN), None);
        let pos = map.node(1).unwrap().pos;
        ctl.pointer_move(&mut map, Point::new(999.0, 999.0), None);
        assert_eq!(map.node(1).unwrap().pos, pos);
        assert_eq!(ctl.dragging(), Some(1));
    }

    #[test]
    fn connect_completes_on_a_second_node() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        let child = spawn(&mut map, 1);
        assert_eq!(map.edges().len(), 1);

        ctl.start_connect(&map, 1);
        assert_eq!(ctl.connect_source(), Some(1));

        let press = press_point(&map, child);
        ctl.pointer_down(&mut map, press, Some(ORIGIN), None);
        assert_eq!(map.edges().len(), 2);
        let added = map.edges()[1];
        assert_eq!((added.source, added.target), (1, child));
        assert_eq!(added.style, EdgeStyle::Solid);
        assert!(matches!(ctl.state(), Interaction::Idle));
    }

    #[test]
    fn connect_ignores_the_source_itself() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        spawn(&mut map, 1);

        ctl.start_connect(&map, 1);
        let press = press_point(&map, 1);
        ctl.pointer_down(&mut map, press, Some(ORIGIN), None);
        assert_eq!(ctl.connect_source(), Some(1));
        assert_eq!(map.edges().len(), 1);
    }

    #[test]
    fn connect_cancels_on_background_press() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        ctl.start_connect(&map, 1);
        ctl.pointer_down(&mut map, Point::new(900.0, 900.0), Some(ORIGIN), None);
        assert!(matches!(ctl.state(), Interaction::Idle));
        assert!(map.edges().is_empty());
    }

    #[test]
    fn connect_source_is_last_writer_wins() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        let child = spawn(&mut map, 1);

        ctl.start_connect(&map, 1);
        ctl.start_connect(&map, child);
        assert_eq!(ctl.connect_source(), Some(child));

        ctl.start_connect(&map, 999);
        // unknown node leaves the armed source alone
        assert_eq!(ctl.connect_source(), Some(child));
    }

    #[test]
    fn label_edits_apply_on_every_keystroke() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();

        ctl.start_label_edit(&map, 1);
        let session = ctl.editing().unwrap();
        assert_eq!(session.node_id(), 1);
        assert_eq!(session.text(), "Main idea");

        ctl.label_input(&mut map, "P".to_string());
        assert_eq!(map.node(1).unwrap().label, "P");
        ctl.label_input(&mut map, "Pl".to_string());
        assert_eq!(map.node(1).unwrap().label, "Pl");

        ctl.end_label_edit();
        assert!(matches!(ctl.state(), Interaction::Idle));
        assert_eq!(map.node(1).unwrap().label, "Pl");
    }

    #[test]
    fn empty_labels_are_permitted() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        ctl.start_label_edit(&map, 1);
        ctl.label_input(&mut map, String::new());
        ctl.end_label_edit();
        assert_eq!(map.node(1).unwrap().label, "");
    }

    #[test]
    fn label_edit_on_unknown_node_is_a_noop() {
        let map = MindMap::new();
        let mut ctl = Controller::new();
        ctl.start_label_edit(&map, 404);
        assert!(matches!(ctl.state(), Interaction::Idle));
    }

    #[test]
    fn a_press_blurs_the_label_session() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        let child = spawn(&mut map, 1);

        ctl.start_label_edit(&map, 1);
        ctl.label_input(&mut map, "kept".to_string());
        let press = press_point(&map, child);
        ctl.pointer_down(&mut map, press, Some(ORIGIN), None);

        // session gone, its edit kept, and the press acted normally
        assert_eq!(map.node(1).unwrap().label, "kept");
        assert_eq!(ctl.dragging(), Some(child));
    }

    #[test]
    fn cancel_returns_to_idle_from_any_state() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();

        ctl.start_connect(&map, 1);
        ctl.cancel();
        assert!(matches!(ctl.state(), Interaction::Idle));

        let press = press_point(&map, 1);
        ctl.pointer_down(&mut map, press, Some(ORIGIN), None);
        ctl.cancel();
        assert!(matches!(ctl.state(), Interaction::Idle));
    }

    #[test]
    fn pre_resolved_targets_skip_hit_testing() {
        let mut map = MindMap::new();
        let mut ctl = Controller::new();
        let child = spawn(&mut map, 1);

        // pointer is nowhere near the child, but the host already resolved it
        ctl.pointer_down(&mut map, Point::new(0.0, 0.0), Some(ORIGIN), Some(child));
        assert_eq!(ctl.dragging(), Some(child));
    }
}
