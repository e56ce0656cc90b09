//! Retained model of the page's visual tree.
//!
//! The presenter and its engines only ever read and write a [`Stage`]; the
//! browser driver measures the DOM into one and mirrors dirty nodes back.

use indextree::{Arena, NodeId};
use std::collections::{BTreeMap, HashMap};

/// Layout box, unaffected by transforms. Document coordinates, or viewport
/// coordinates for nodes inside a fixed subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Animatable visual properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prop {
    Opacity,
    X,
    Y,
    YPercent,
    Scale,
    RotateX,
    RotateY,
    /// `clip-path: inset(0 N% 0 0)`
    ClipRight,
    /// `clip-path: inset(0 0 N% 0)`
    ClipBottom,
    /// `width: N%`
    Width,
    /// `filter: grayscale(N%)`
    Grayscale,
}

impl Prop {
    const ALL: [Prop; 11] = [
        Prop::Opacity,
        Prop::X,
        Prop::Y,
        Prop::YPercent,
        Prop::Scale,
        Prop::RotateX,
        Prop::RotateY,
        Prop::ClipRight,
        Prop::ClipBottom,
        Prop::Width,
        Prop::Grayscale,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    fn is_transform(self) -> bool {
        matches!(
            self,
            Prop::X | Prop::Y | Prop::YPercent | Prop::Scale | Prop::RotateX | Prop::RotateY
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub y_percent: f64,
    pub scale: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub clip_right: f64,
    pub clip_bottom: f64,
    pub width: f64,
    pub grayscale: f64,
    touched: u16,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            y_percent: 0.0,
            scale: 1.0,
            rotate_x: 0.0,
            rotate_y: 0.0,
            clip_right: 0.0,
            clip_bottom: 0.0,
            width: 100.0,
            grayscale: 0.0,
            touched: 0,
        }
    }
}

impl Style {
    pub fn get(&self, prop: Prop) -> f64 {
        match prop {
            Prop::Opacity => self.opacity,
            Prop::X => self.x,
            Prop::Y => self.y,
            Prop::YPercent => self.y_percent,
            Prop::Scale => self.scale,
            Prop::RotateX => self.rotate_x,
            Prop::RotateY => self.rotate_y,
            Prop::ClipRight => self.clip_right,
            Prop::ClipBottom => self.clip_bottom,
            Prop::Width => self.width,
            Prop::Grayscale => self.grayscale,
        }
    }

    pub fn set(&mut self, prop: Prop, value: f64) {
        let slot = match prop {
            Prop::Opacity => &mut self.opacity,
            Prop::X => &mut self.x,
            Prop::Y => &mut self.y,
            Prop::YPercent => &mut self.y_percent,
            Prop::Scale => &mut self.scale,
            Prop::RotateX => &mut self.rotate_x,
            Prop::RotateY => &mut self.rotate_y,
            Prop::ClipRight => &mut self.clip_right,
            Prop::ClipBottom => &mut self.clip_bottom,
            Prop::Width => &mut self.width,
            Prop::Grayscale => &mut self.grayscale,
        };
        *slot = value;
        self.touched |= prop.bit();
    }

    pub fn is_touched(&self, prop: Prop) -> bool {
        self.touched & prop.bit() != 0
    }

    /// CSS declarations for every property that has been written at least once.
    pub fn css(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        if self.is_touched(Prop::Opacity) {
            out.push(("opacity", format!("{:.4}", self.opacity)));
        }
        if Prop::ALL
            .iter()
            .any(|p| p.is_transform() && self.is_touched(*p))
        {
            out.push((
                "transform",
                format!(
                    "translate({:.2}px, calc({:.2}px + {:.2}%)) scale({:.4}) rotateX({:.2}deg) rotateY({:.2}deg)",
                    self.x, self.y, self.y_percent, self.scale, self.rotate_x, self.rotate_y
                ),
            ));
        }
        if self.is_touched(Prop::ClipRight) || self.is_touched(Prop::ClipBottom) {
            out.push((
                "clip-path",
                format!(
                    "inset(0 {:.2}% {:.2}% 0)",
                    self.clip_right, self.clip_bottom
                ),
            ));
        }
        if self.is_touched(Prop::Width) {
            out.push(("width", format!("{:.2}%", self.width)));
        }
        if self.is_touched(Prop::Grayscale) {
            out.push(("filter", format!("grayscale({:.2}%)", self.grayscale)));
        }
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct StageNode {
    /// Lowercase tag name.
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub rect: Rect,
    pub style: Style,
    pub text: Option<String>,
    pub rich: bool,
    style_dirty: bool,
    text_dirty: bool,
    detached: bool,
}

impl StageNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// What the driver has to write back for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Flush {
    pub node: NodeId,
    pub css: Vec<(&'static str, String)>,
    pub text: Option<(String, bool)>,
}

pub struct Stage {
    arena: Arena<StageNode>,
    root: NodeId,
    ids: HashMap<String, NodeId>,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(StageNode::new().with_id("body"));
        let mut ids = HashMap::new();
        ids.insert("body".to_string(), root);
        Self { arena, root, ids }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn insert(&mut self, parent: NodeId, node: StageNode) -> NodeId {
        let key = node.id.clone();
        let id = self.arena.new_node(node);
        parent.append(id, &mut self.arena);
        if let Some(key) = key {
            self.ids.insert(key, id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&StageNode> {
        self.arena.get(id).map(|n| n.get())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut StageNode> {
        self.arena.get_mut(id).map(|n| n.get_mut())
    }

    /// Looks up an attached node by element id.
    pub fn by_id(&self, key: &str) -> Option<NodeId> {
        self.ids
            .get(key)
            .copied()
            .filter(|id| self.is_attached(*id))
    }

    /// Attached nodes carrying `class`, in document order.
    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.root
            .descendants(&self.arena)
            .filter(|id| self.node(*id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    /// Attached nodes carrying `class` somewhere below `ancestor`.
    pub fn by_class_within(&self, ancestor: NodeId, class: &str) -> Vec<NodeId> {
        ancestor
            .descendants(&self.arena)
            .skip(1)
            .filter(|id| self.node(*id).is_some_and(|n| n.has_class(class)))
            .collect()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        id.children(&self.arena).collect()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            match self.node(current) {
                Some(node) if node.detached => return false,
                Some(_) => {}
                None => return false,
            }
            if current == self.root {
                return true;
            }
            match self.arena[current].parent() {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Removes a node (and its subtree) from the visible tree. The node data is kept.
    pub fn detach(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        if let Some(node) = self.node_mut(id) {
            node.detached = true;
        }
        id.detach(&mut self.arena);
    }

    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.node(id).map(|n| n.rect)
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = rect;
        }
    }

    pub fn style(&self, id: NodeId) -> Option<Style> {
        self.node(id).map(|n| n.style)
    }

    pub fn get(&self, id: NodeId, prop: Prop) -> Option<f64> {
        self.node(id).map(|n| n.style.get(prop))
    }

    pub fn set(&mut self, id: NodeId, prop: Prop, value: f64) {
        if let Some(node) = self.node_mut(id) {
            if node.style.get(prop) != value || !node.style.is_touched(prop) {
                node.style.set(prop, value);
                node.style_dirty = true;
            }
        }
    }

    pub fn attr(&self, id: NodeId, key: &str) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.attrs.get(key))
            .map(String::as_str)
    }

    /// Whether `id` or one of its ancestors carries `key`.
    pub fn inherits_attr(&self, id: NodeId, key: &str) -> bool {
        id.ancestors(&self.arena)
            .any(|node| self.attr(node, key).is_some())
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.tag.as_deref())
    }

    /// Attached nodes, in document order.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.arena)
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|n| n.text.as_deref())
    }

    /// Overwrites text content. Returns `false` if nothing changed.
    pub fn set_text(&mut self, id: NodeId, text: &str, rich: bool) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.text.as_deref() == Some(text) && node.rich == rich {
            return false;
        }
        node.text = Some(text.to_string());
        node.rich = rich;
        node.text_dirty = true;
        true
    }

    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|n| n.style_dirty || n.text_dirty)
    }

    /// Collects and clears everything written since the last flush. Detached
    /// nodes are skipped.
    pub fn drain_dirty(&mut self) -> Vec<Flush> {
        let dirty: Vec<NodeId> = self
            .root
            .descendants(&self.arena)
            .filter(|id| self.is_dirty(*id))
            .collect();
        let mut out = Vec::with_capacity(dirty.len());
        for id in dirty {
            let Some(node) = self.node_mut(id) else {
                continue;
            };
            let css = if node.style_dirty {
                node.style.css()
            } else {
                Vec::new()
            };
            let text = if node.text_dirty {
                node.text.clone().map(|t| (t, node.rich))
            } else {
                None
            };
            node.style_dirty = false;
            node.text_dirty = false;
            out.push(Flush { node: id, css, text });
        }
        out
    }
}
