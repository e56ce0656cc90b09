//! Pointer and scroll driven effects that run for the whole session once the
//! content is visible.

use indextree::NodeId;

use super::Viewport;
use crate::config::MotionConfig;
use crate::motion::{Ease, Props, TweenOptions, Tweener};
use crate::stage::{Rect, Stage};

/// Section ids, in page order.
pub const SECTIONS: [&str; 7] = [
    "home",
    "about",
    "skills",
    "experience",
    "education",
    "projects",
    "contact",
];

/// (class, multiplier, duration ms)
const PARALLAX_LAYERS: [(&str, f64, f64); 4] = [
    ("bg-gradient-1", 20.0, 2000.0),
    ("bg-gradient-2", -15.0, 2500.0),
    ("bg-gradient-3", 10.0, 3000.0),
    ("bg-particles", 8.0, 1500.0),
];

const HERO_WRAPPER: &str = "hero-image-wrapper";
const HERO_IMAGE: &str = "hero-image";
const DOCK: &str = "nav-dock";
const DOCK_ITEM: &str = "dock-item";
const DOCK_RANGE: f64 = 150.0;
const SCROLL_TOP: &str = "scroll-to-top";
const PROJECT_OVERLAY: &str = "project-overlay";
pub const CURSOR_ID: &str = "custom-cursor";
const CURSOR_TAGS: [&str; 2] = ["a", "button"];
const CURSOR_CLASSES: [&str; 2] = ["skill-card", "project-card"];

/// Elements with this attribute are `position: fixed`; they and their
/// descendants are measured in viewport coordinates.
pub const FIXED_ATTR: &str = "data-fixed";

fn client_rect(stage: &Stage, node: NodeId, viewport: &Viewport) -> Option<Rect> {
    let rect = stage.rect(node)?;
    if stage.inherits_attr(node, FIXED_ATTR) {
        Some(rect)
    } else {
        Some(Rect {
            top: rect.top - viewport.scroll_y,
            ..rect
        })
    }
}

fn contains(rect: &Rect, x: f64, y: f64) -> bool {
    x >= rect.left && x < rect.left + rect.width && y >= rect.top && y < rect.bottom()
}

fn is_cursor_target(stage: &Stage, node: NodeId) -> bool {
    stage.tag(node).is_some_and(|tag| CURSOR_TAGS.contains(&tag))
        || stage
            .node(node)
            .is_some_and(|n| CURSOR_CLASSES.iter().any(|c| n.has_class(c)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Card {
    Skill,
    Project,
}

#[derive(Debug, Default)]
pub struct Effects {
    hero_hover: bool,
    dock_hover: bool,
    cursor_hover: bool,
    hovered: Option<(NodeId, Card)>,
    last_scroll: Option<f64>,
    scrolling_up: bool,
    scroll_progress: Option<f64>,
    active_section: Option<&'static str>,
    navbar_scrolled: bool,
    scroll_top_visible: bool,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_section(&self) -> Option<&'static str> {
        self.active_section
    }

    pub fn set_active_section(&mut self, id: &str) {
        if let Some(section) = SECTIONS.iter().find(|s| **s == id) {
            self.active_section = Some(*section);
        }
    }

    pub fn navbar_scrolled(&self) -> bool {
        self.navbar_scrolled
    }

    pub fn scroll_top_visible(&self) -> bool {
        self.scroll_top_visible
    }

    /// Writes the resting state the markup starts hover and scroll driven
    /// elements in, so their first transition starts from it.
    pub fn arm(&mut self, stage: &mut Stage, tweens: &mut Tweener) {
        let hidden = Props::new().opacity(0.0);
        for overlay in stage.by_class(PROJECT_OVERLAY) {
            tweens.set(stage, overlay, &hidden);
        }
        if let Some(button) = stage.by_id(SCROLL_TOP) {
            tweens.set(stage, button, &Props::new().opacity(0.0).y(100.0));
        }
    }

    /// `x`/`y` are client (viewport) coordinates.
    pub fn pointer_move(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        config: &MotionConfig,
        viewport: &Viewport,
        x: f64,
        y: f64,
        now: f64,
    ) {
        if viewport.width > config.mobile_breakpoint && viewport.height > 0.0 {
            self.parallax(stage, tweens, viewport, x, y, now);
            self.cursor(stage, tweens, viewport, x, y, now);
        }
        self.hero_tilt(stage, tweens, viewport, x, y, now);
        self.dock(stage, tweens, viewport, x, y, now);
        self.card_hover(stage, tweens, viewport, x, y, now);
    }

    /// The pointer left the window.
    pub fn pointer_leave(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) {
        if self.hero_hover {
            self.hero_leave(stage, tweens, now);
        }
        if self.dock_hover {
            self.dock_leave(stage, tweens, now);
        }
        if let Some((card, kind)) = self.hovered.take() {
            hover_card(stage, tweens, card, kind, false, now);
        }
    }

    fn parallax(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        x: f64,
        y: f64,
        now: f64,
    ) {
        let mx = (x / viewport.width - 0.5) * 2.0;
        let my = (y / viewport.height - 0.5) * 2.0;
        for (class, multiplier, duration) in PARALLAX_LAYERS {
            let opts = TweenOptions::new(duration, Ease::Power2Out);
            for layer in stage.by_class(class) {
                tweens.to(
                    layer,
                    Props::new().x(mx * multiplier).y(my * multiplier),
                    opts,
                    now,
                );
            }
        }
    }

    fn cursor(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        x: f64,
        y: f64,
        now: f64,
    ) {
        let Some(cursor) = stage.by_id(CURSOR_ID) else {
            return;
        };
        tweens.to(
            cursor,
            Props::new().x(x).y(y),
            TweenOptions::new(100.0, Ease::Power2Out),
            now,
        );
        let page: &Stage = stage;
        let hovering = page.descendants().any(|node| {
            node != cursor
                && is_cursor_target(page, node)
                && client_rect(page, node, viewport).is_some_and(|r| contains(&r, x, y))
        });
        if hovering != self.cursor_hover {
            self.cursor_hover = hovering;
            let scale = if hovering { 1.5 } else { 1.0 };
            tweens.to(
                cursor,
                Props::new().scale(scale),
                TweenOptions::new(200.0, Ease::Power2Out),
                now,
            );
        }
    }

    fn hero_tilt(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        x: f64,
        y: f64,
        now: f64,
    ) {
        let (Some(wrapper), Some(image)) = (stage.by_id(HERO_WRAPPER), stage.by_id(HERO_IMAGE))
        else {
            return;
        };
        let Some(rect) = client_rect(stage, wrapper, viewport) else {
            return;
        };
        if !contains(&rect, x, y) {
            if self.hero_hover {
                self.hero_leave(stage, tweens, now);
            }
            return;
        }
        self.hero_hover = true;
        let dx = (x - rect.center_x()) / 25.0;
        let dy = (y - rect.center_y()) / 25.0;
        tweens.to(
            image,
            Props::new().rotate_y(dx).rotate_x(-dy).scale(1.05),
            TweenOptions::new(400.0, Ease::Power2Out),
            now,
        );
    }

    fn hero_leave(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) {
        self.hero_hover = false;
        if let Some(image) = stage.by_id(HERO_IMAGE) {
            tweens.to(
                image,
                Props::new().rotate_y(0.0).rotate_x(0.0).scale(1.0),
                TweenOptions::new(700.0, Ease::ELASTIC),
                now,
            );
        }
    }

    fn dock(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        x: f64,
        y: f64,
        now: f64,
    ) {
        let Some(dock) = stage.by_id(DOCK) else {
            return;
        };
        let inside = client_rect(stage, dock, viewport).is_some_and(|r| contains(&r, x, y));
        if !inside {
            if self.dock_hover {
                self.dock_leave(stage, tweens, now);
            }
            return;
        }
        self.dock_hover = true;
        let opts = TweenOptions::new(200.0, Ease::Power2Out);
        for item in stage.by_class_within(dock, DOCK_ITEM) {
            let Some(rect) = client_rect(stage, item, viewport) else {
                continue;
            };
            tweens.to(item, Props::new().scale(magnify(x, rect.center_x())), opts, now);
        }
    }

    fn dock_leave(&mut self, stage: &mut Stage, tweens: &mut Tweener, now: f64) {
        self.dock_hover = false;
        let Some(dock) = stage.by_id(DOCK) else {
            return;
        };
        let opts = TweenOptions::new(400.0, Ease::ELASTIC);
        for item in stage.by_class_within(dock, DOCK_ITEM) {
            tweens.to(item, Props::new().scale(1.0), opts, now);
        }
    }

    fn card_hover(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        x: f64,
        y: f64,
        now: f64,
    ) {
        let under = [("skill-card", Card::Skill), ("project-card", Card::Project)]
            .into_iter()
            .flat_map(|(class, kind)| stage.by_class(class).into_iter().map(move |n| (n, kind)))
            .find(|(node, _)| {
                client_rect(stage, *node, viewport).is_some_and(|r| contains(&r, x, y))
            });
        if under.map(|(n, _)| n) == self.hovered.map(|(n, _)| n) {
            return;
        }
        if let Some((card, kind)) = self.hovered.take() {
            hover_card(stage, tweens, card, kind, false, now);
        }
        if let Some((card, kind)) = under {
            hover_card(stage, tweens, card, kind, true, now);
            self.hovered = Some((card, kind));
        }
    }

    /// Background scrub, section highlight, navbar and scroll-to-top state.
    pub fn on_scroll(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        config: &MotionConfig,
        viewport: &Viewport,
        now: f64,
    ) {
        let scroll = viewport.scroll_y;
        if self.last_scroll == Some(scroll) {
            return;
        }
        if let Some(last) = self.last_scroll {
            self.scrolling_up = scroll < last;
        }
        self.last_scroll = Some(scroll);

        self.scrub_background(stage, tweens, viewport, now);

        let reference = scroll + config.nav_reference_offset;
        if let Some(section) = SECTIONS.iter().rev().find(|id| {
            stage
                .by_id(id)
                .and_then(|node| stage.rect(node))
                .is_some_and(|r| reference >= r.top && reference < r.bottom())
        }) {
            self.active_section = Some(*section);
        }

        self.navbar_scrolled = scroll > config.navbar_scrolled_after;

        let visible = scroll > config.scroll_top_after && self.scrolling_up;
        if visible != self.scroll_top_visible {
            self.scroll_top_visible = visible;
            if let Some(button) = stage.by_id(SCROLL_TOP) {
                let props = if visible {
                    Props::new().opacity(1.0).y(0.0)
                } else {
                    Props::new().opacity(0.0).y(100.0)
                };
                tweens.to(button, props, TweenOptions::new(300.0, Ease::Power2Out), now);
            }
        }
    }

    fn scrub_background(
        &mut self,
        stage: &mut Stage,
        tweens: &mut Tweener,
        viewport: &Viewport,
        now: f64,
    ) {
        let page = stage.rect(stage.root()).map(|r| r.height).unwrap_or(0.0);
        let progress = if page > 0.0 {
            ((viewport.scroll_y + viewport.height) / (page + viewport.height)).clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.scroll_progress == Some(progress) {
            return;
        }
        self.scroll_progress = Some(progress);
        let opts = TweenOptions::new(1000.0, Ease::Linear);
        for (i, layer) in stage.by_class("bg-layer").into_iter().enumerate() {
            let shift = -(20.0 + 5.0 * i as f64) * progress;
            tweens.to(layer, Props::new().y_percent(shift), opts, now);
        }
    }
}

/// Dock item scale for a pointer at `x`.
pub fn magnify(x: f64, center: f64) -> f64 {
    let distance = (x - center).abs();
    if distance < DOCK_RANGE {
        1.0 + (1.0 - distance / DOCK_RANGE) * 0.5
    } else {
        1.0
    }
}

fn hover_card(
    stage: &mut Stage,
    tweens: &mut Tweener,
    card: NodeId,
    kind: Card,
    entering: bool,
    now: f64,
) {
    match kind {
        Card::Skill => {
            let props = if entering {
                Props::new().scale(1.05).y(-10.0)
            } else {
                Props::new().scale(1.0).y(0.0)
            };
            tweens.to(card, props, TweenOptions::new(300.0, Ease::Power2Out), now);
        }
        Card::Project => {
            let props = if entering {
                Props::new().scale(1.02).y(-5.0)
            } else {
                Props::new().scale(1.0).y(0.0)
            };
            tweens.to(card, props, TweenOptions::new(400.0, Ease::Power2Out), now);
            let opacity = if entering { 1.0 } else { 0.0 };
            for overlay in stage.by_class_within(card, PROJECT_OVERLAY) {
                tweens.to(
                    overlay,
                    Props::new().opacity(opacity),
                    TweenOptions::new(300.0, Ease::Power2Out),
                    now,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{Prop, StageNode};

    const DESKTOP: Viewport = Viewport {
        scroll_y: 0.0,
        width: 1280.0,
        height: 800.0,
    };

    fn page() -> Stage {
        let mut stage = Stage::new();
        let root = stage.root();
        stage.set_rect(root, Rect::new(0.0, 0.0, 1280.0, 5000.0));
        let bg = stage.insert(root, StageNode::new().with_class("animated-background"));
        stage.insert(bg, StageNode::new().with_class("bg-layer").with_class("bg-gradient-1"));
        stage.insert(bg, StageNode::new().with_class("bg-layer").with_class("bg-gradient-2"));
        for (i, id) in SECTIONS.iter().enumerate() {
            let section = stage.insert(
                root,
                StageNode::new()
                    .with_id(*id)
                    .with_rect(Rect::new(i as f64 * 700.0, 0.0, 1280.0, 700.0)),
            );
            match *id {
                "home" => {
                    let wrapper = stage.insert(
                        section,
                        StageNode::new()
                            .with_id(HERO_WRAPPER)
                            .with_rect(Rect::new(100.0, 700.0, 400.0, 400.0)),
                    );
                    stage.insert(wrapper, StageNode::new().with_id(HERO_IMAGE));
                }
                "about" => {
                    stage.insert(
                        section,
                        StageNode::new()
                            .with_tag("a")
                            .with_rect(Rect::new(800.0, 100.0, 200.0, 40.0)),
                    );
                }
                "skills" => {
                    stage.insert(
                        section,
                        StageNode::new()
                            .with_class("skill-card")
                            .with_rect(Rect::new(1500.0, 100.0, 300.0, 200.0)),
                    );
                }
                "projects" => {
                    let card = stage.insert(
                        section,
                        StageNode::new()
                            .with_class("project-card")
                            .with_rect(Rect::new(3600.0, 100.0, 400.0, 300.0)),
                    );
                    stage.insert(card, StageNode::new().with_class(PROJECT_OVERLAY));
                }
                _ => {}
            }
        }
        stage.insert(
            root,
            StageNode::new().with_id(SCROLL_TOP).with_attr(FIXED_ATTR, ""),
        );
        stage.insert(
            root,
            StageNode::new()
                .with_id(CURSOR_ID)
                .with_attr(FIXED_ATTR, "")
                .with_rect(Rect::new(0.0, 0.0, 20.0, 20.0)),
        );
        let dock = stage.insert(
            root,
            StageNode::new()
                .with_id(DOCK)
                .with_attr(FIXED_ATTR, "")
                .with_rect(Rect::new(720.0, 400.0, 480.0, 60.0)),
        );
        for i in 0..4 {
            stage.insert(
                dock,
                StageNode::new()
                    .with_class(DOCK_ITEM)
                    .with_attr(FIXED_ATTR, "")
                    .with_rect(Rect::new(730.0, 410.0 + i as f64 * 120.0, 40.0, 40.0)),
            );
        }
        stage
    }

    fn at(scroll_y: f64) -> Viewport {
        Viewport { scroll_y, ..DESKTOP }
    }

    #[test]
    fn test_single_active_section() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();

        effects.on_scroll(&mut stage, &mut tweens, &config, &at(0.0), 0.0);
        assert_eq!(effects.active_section(), Some("home"));
        // 650 + 100 falls in about
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(650.0), 10.0);
        assert_eq!(effects.active_section(), Some("about"));
        // past the last section keeps the previous one
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(9000.0), 20.0);
        assert_eq!(effects.active_section(), Some("about"));
        effects.set_active_section("nowhere");
        assert_eq!(effects.active_section(), Some("about"));
        effects.set_active_section("contact");
        assert_eq!(effects.active_section(), Some("contact"));
    }

    #[test]
    fn test_navbar_and_scroll_to_top_state() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();

        effects.on_scroll(&mut stage, &mut tweens, &config, &at(40.0), 0.0);
        assert!(!effects.navbar_scrolled());
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(600.0), 10.0);
        assert!(effects.navbar_scrolled());
        assert!(!effects.scroll_top_visible());
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(500.0), 20.0);
        assert!(effects.scroll_top_visible());
        // same position doesn't flip direction
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(500.0), 30.0);
        assert!(effects.scroll_top_visible());
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(100.0), 40.0);
        assert!(!effects.scroll_top_visible());
    }

    #[test]
    fn test_background_scrub() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(5000.0), 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 1000.0);
        let layers = stage.by_class("bg-layer");
        assert_eq!(stage.get(layers[0], Prop::YPercent), Some(-20.0));
        assert_eq!(stage.get(layers[1], Prop::YPercent), Some(-25.0));
    }

    #[test]
    fn test_parallax_only_on_desktop() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        let layer = stage.by_class("bg-gradient-2")[0];

        let mobile = Viewport {
            width: 768.0,
            ..DESKTOP
        };
        effects.pointer_move(&mut stage, &mut tweens, &config, &mobile, 0.0, 0.0, 0.0);
        assert!(!tweens.is_active(layer));

        effects.pointer_move(&mut stage, &mut tweens, &config, &DESKTOP, 1280.0, 0.0, 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 2500.0);
        assert_eq!(stage.get(layer, Prop::X), Some(-15.0));
        assert_eq!(stage.get(layer, Prop::Y), Some(15.0));
    }

    #[test]
    fn test_dock_magnification() {
        assert_eq!(magnify(100.0, 100.0), 1.5);
        assert_eq!(magnify(175.0, 100.0), 1.25);
        assert_eq!(magnify(250.0, 100.0), 1.0);

        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        let items = stage.by_class(DOCK_ITEM);
        // over the first item's centre, the dock is fixed so scroll is ignored
        effects.pointer_move(&mut stage, &mut tweens, &config, &at(3000.0), 430.0, 750.0, 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 200.0);
        assert_eq!(stage.get(items[0], Prop::Scale), Some(1.5));
        assert_eq!(stage.get(items[3], Prop::Scale), Some(1.0));

        effects.pointer_move(&mut stage, &mut tweens, &config, &at(3000.0), 430.0, 100.0, 300.0);
        tweens.tick(&mut stage, 300.0);
        tweens.tick(&mut stage, 700.0);
        assert_eq!(stage.get(items[0], Prop::Scale), Some(1.0));
    }

    #[test]
    fn test_card_hover_in_and_out() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        let card = stage.by_class("skill-card")[0];
        let view = at(1400.0);

        effects.pointer_move(&mut stage, &mut tweens, &config, &view, 200.0, 150.0, 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 300.0);
        assert_eq!(stage.get(card, Prop::Scale), Some(1.05));
        assert_eq!(stage.get(card, Prop::Y), Some(-10.0));

        effects.pointer_move(&mut stage, &mut tweens, &config, &view, 900.0, 150.0, 400.0);
        tweens.tick(&mut stage, 400.0);
        tweens.tick(&mut stage, 700.0);
        assert_eq!(stage.get(card, Prop::Scale), Some(1.0));
        assert_eq!(stage.get(card, Prop::Y), Some(0.0));
    }

    #[test]
    fn test_hero_tilt_and_elastic_return() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        let image = stage.by_id(HERO_IMAGE).unwrap();

        // 50 px right of and above the wrapper centre (900, 300)
        effects.pointer_move(&mut stage, &mut tweens, &config, &DESKTOP, 950.0, 250.0, 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 400.0);
        assert_eq!(stage.get(image, Prop::RotateY), Some(2.0));
        assert_eq!(stage.get(image, Prop::RotateX), Some(2.0));
        assert_eq!(stage.get(image, Prop::Scale), Some(1.05));

        effects.pointer_move(&mut stage, &mut tweens, &config, &DESKTOP, 100.0, 700.0, 500.0);
        tweens.tick(&mut stage, 500.0);
        // elastic overshoots past the rest position
        tweens.tick(&mut stage, 640.0);
        assert!(stage.get(image, Prop::RotateY).unwrap() < 0.0);
        tweens.tick(&mut stage, 1200.0);
        assert_eq!(stage.get(image, Prop::RotateY), Some(0.0));
        assert_eq!(stage.get(image, Prop::RotateX), Some(0.0));
        assert_eq!(stage.get(image, Prop::Scale), Some(1.0));
        assert!(!tweens.is_active(image));
    }

    #[test]
    fn test_pointer_leave_settles_dock() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        let item = stage.by_class(DOCK_ITEM)[0];

        effects.pointer_move(&mut stage, &mut tweens, &config, &DESKTOP, 430.0, 750.0, 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 200.0);
        assert_eq!(stage.get(item, Prop::Scale), Some(1.5));

        effects.pointer_leave(&mut stage, &mut tweens, 300.0);
        tweens.tick(&mut stage, 300.0);
        tweens.tick(&mut stage, 380.0);
        assert!(stage.get(item, Prop::Scale).unwrap() < 1.0);
        tweens.tick(&mut stage, 700.0);
        assert_eq!(stage.get(item, Prop::Scale), Some(1.0));

        // nothing left to undo
        effects.pointer_leave(&mut stage, &mut tweens, 800.0);
        assert!(!tweens.is_active(item));
    }

    #[test]
    fn test_project_overlay_fades() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        effects.arm(&mut stage, &mut tweens);
        let card = stage.by_class("project-card")[0];
        let overlay = stage.by_class(PROJECT_OVERLAY)[0];
        assert_eq!(stage.get(overlay, Prop::Opacity), Some(0.0));
        let view = at(3500.0);

        effects.pointer_move(&mut stage, &mut tweens, &config, &view, 300.0, 200.0, 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 150.0);
        assert_eq!(stage.get(overlay, Prop::Opacity), Some(0.75));
        tweens.tick(&mut stage, 400.0);
        assert_eq!(stage.get(overlay, Prop::Opacity), Some(1.0));
        assert_eq!(stage.get(card, Prop::Scale), Some(1.02));
        assert_eq!(stage.get(card, Prop::Y), Some(-5.0));

        effects.pointer_move(&mut stage, &mut tweens, &config, &view, 900.0, 200.0, 500.0);
        tweens.tick(&mut stage, 500.0);
        tweens.tick(&mut stage, 650.0);
        assert_eq!(stage.get(overlay, Prop::Opacity), Some(0.25));
        tweens.tick(&mut stage, 900.0);
        assert_eq!(stage.get(overlay, Prop::Opacity), Some(0.0));
        assert_eq!(stage.get(card, Prop::Scale), Some(1.0));
    }

    #[test]
    fn test_scroll_to_top_fades_in_from_its_resting_state() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        effects.arm(&mut stage, &mut tweens);
        let button = stage.by_id(SCROLL_TOP).unwrap();
        assert_eq!(stage.get(button, Prop::Y), Some(100.0));

        effects.on_scroll(&mut stage, &mut tweens, &config, &at(600.0), 0.0);
        effects.on_scroll(&mut stage, &mut tweens, &config, &at(500.0), 20.0);
        tweens.tick(&mut stage, 20.0);
        tweens.tick(&mut stage, 170.0);
        assert_eq!(stage.get(button, Prop::Opacity), Some(0.75));
        assert_eq!(stage.get(button, Prop::Y), Some(25.0));
    }

    #[test]
    fn test_cursor_follows_and_grows_over_links() {
        let mut stage = page();
        let mut tweens = Tweener::new();
        let config = MotionConfig::default();
        let mut effects = Effects::new();
        let cursor = stage.by_id(CURSOR_ID).unwrap();

        let mobile = Viewport {
            width: 768.0,
            ..DESKTOP
        };
        effects.pointer_move(&mut stage, &mut tweens, &config, &mobile, 50.0, 50.0, 0.0);
        assert!(!tweens.is_active(cursor));

        // over the link in the about section
        let view = at(700.0);
        effects.pointer_move(&mut stage, &mut tweens, &config, &view, 150.0, 120.0, 0.0);
        tweens.tick(&mut stage, 0.0);
        tweens.tick(&mut stage, 200.0);
        assert_eq!(stage.get(cursor, Prop::X), Some(150.0));
        assert_eq!(stage.get(cursor, Prop::Y), Some(120.0));
        assert_eq!(stage.get(cursor, Prop::Scale), Some(1.5));

        effects.pointer_move(&mut stage, &mut tweens, &config, &view, 900.0, 500.0, 300.0);
        tweens.tick(&mut stage, 300.0);
        tweens.tick(&mut stage, 500.0);
        assert_eq!(stage.get(cursor, Prop::X), Some(900.0));
        assert_eq!(stage.get(cursor, Prop::Scale), Some(1.0));
    }
}
