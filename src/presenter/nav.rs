use crate::config::MotionConfig;
use crate::motion::easing::lerp;
use crate::motion::Ease;
use crate::stage::Stage;

pub const NAVBAR_ID: &str = "navbar";

/// One animated window scroll.
#[derive(Debug, Clone, PartialEq)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    started_at: f64,
    duration: f64,
    ease: Ease,
    /// Section to mark active once settled.
    section: Option<String>,
}

/// Where the window should be this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollStep {
    pub scroll_y: f64,
    /// Set on the final step of a navigation.
    pub settled_on: Option<String>,
    pub done: bool,
}

/// Internal link navigation with a fixed-header offset.
#[derive(Debug, Default)]
pub struct NavController {
    current: Option<ScrollAnimation>,
}

impl NavController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scrolling(&self) -> bool {
        self.current.is_some()
    }

    /// Resolves `#section` to the scroll position that puts the section just
    /// under the navbar.
    pub fn resolve(href: &str, stage: &Stage, config: &MotionConfig) -> Option<(String, f64)> {
        let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
        let section = stage.by_id(id)?;
        let top = stage.rect(section)?.top;
        let header = stage
            .by_id(NAVBAR_ID)
            .and_then(|navbar| stage.rect(navbar))
            .map(|rect| rect.height)
            .filter(|height| *height > 0.0)
            .unwrap_or(config.header_fallback_height);
        Some((id.to_string(), (top - header - config.nav_margin).max(0.0)))
    }

    /// Starts scrolling to the section `href` points at. Returns `false` when
    /// the link isn't an internal one this controller handles.
    pub fn activate(
        &mut self,
        href: &str,
        highlight: bool,
        stage: &Stage,
        config: &MotionConfig,
        scroll_y: f64,
        now: f64,
    ) -> bool {
        let Some((id, target)) = Self::resolve(href, stage, config) else {
            log::debug!("not intercepting {href}");
            return false;
        };
        let distance = target - scroll_y;
        let duration = if distance.abs() > 1000.0 { 1000.0 } else { 600.0 };
        self.current = Some(ScrollAnimation {
            from: scroll_y,
            to: target,
            started_at: now,
            duration,
            ease: Ease::CubicInOut,
            section: highlight.then_some(id),
        });
        true
    }

    pub fn scroll_to_top(&mut self, scroll_y: f64, now: f64) {
        self.current = Some(ScrollAnimation {
            from: scroll_y,
            to: 0.0,
            started_at: now,
            duration: 1500.0,
            ease: Ease::Power3InOut,
            section: None,
        });
    }

    pub fn tick(&mut self, now: f64) -> Option<ScrollStep> {
        let anim = self.current.as_ref()?;
        let progress = if anim.duration <= 0.0 {
            1.0
        } else {
            ((now - anim.started_at) / anim.duration).clamp(0.0, 1.0)
        };
        if progress < 1.0 {
            return Some(ScrollStep {
                scroll_y: lerp(anim.from, anim.to, anim.ease.apply(progress)),
                settled_on: None,
                done: false,
            });
        }
        let anim = self.current.take()?;
        Some(ScrollStep {
            scroll_y: anim.to,
            settled_on: anim.section,
            done: true,
        })
    }
}
