//! The single owner of presentation state.
//!
//! The browser driver forwards events and animation frames to a
//! [`Presenter`]; the presenter mutates its [`Stage`] and reports what the
//! window itself has to do. Everything the markup renders declaratively is
//! exposed as a [`ViewState`] snapshot.

pub mod ambient;
pub mod effects;
pub mod form;
pub mod loader;
pub mod nav;
pub mod notify;
pub mod reveal;

use crate::config::MotionConfig;
use crate::content::load_dictionary;
use crate::i18n::{Language, TextSwapper};
use crate::motion::Tweener;
use crate::stage::{Flush, Stage};

use ambient::Ambient;
use effects::Effects;
use form::{ContactForm, Field, FormError, FormFields};
use loader::{Handoff, Loader};
use nav::NavController;
use notify::{NoticeKind, NoticeView, Notifier};
use reveal::RevealEngine;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, width: f64, height: f64) -> Self {
        Self {
            scroll_y,
            width,
            height,
        }
    }
}

/// What the window has to do after a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutput {
    pub scroll_to: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub language: Language,
    pub loader_present: bool,
    pub content_ready: bool,
    pub active_section: Option<&'static str>,
    pub menu_open: bool,
    pub navbar_scrolled: bool,
    pub scroll_top_visible: bool,
    pub form: FormFields,
    pub sending: bool,
    pub submit_label: String,
    pub notice: Option<NoticeView>,
}

pub struct Presenter {
    config: MotionConfig,
    stage: Stage,
    tweens: Tweener,
    swapper: TextSwapper,
    reveal: RevealEngine,
    loader: Loader,
    effects: Effects,
    ambient: Ambient,
    nav: NavController,
    form: ContactForm,
    notices: Notifier,
    viewport: Viewport,
    menu_open: bool,
    armed: bool,
    now: f64,
}

impl Presenter {
    pub fn new(config: MotionConfig, stage: Stage) -> Self {
        Self {
            loader: Loader::new(&config),
            form: ContactForm::new(config.form_delay_ms),
            notices: Notifier::new(config.notification_hold_ms),
            config,
            stage,
            tweens: Tweener::new(),
            swapper: TextSwapper::new(),
            reveal: RevealEngine::new(),
            effects: Effects::new(),
            ambient: Ambient::new(),
            nav: NavController::new(),
            viewport: Viewport::default(),
            menu_open: false,
            armed: false,
            now: 0.0,
        }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// For the driver to update layout after re-measuring.
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Milliseconds after which [`Presenter::watchdog`] should be called.
    pub fn watchdog_after(&self) -> f64 {
        self.loader.duration() + self.config.loader_grace_ms
    }

    /// Applies the initial language and starts the loader.
    pub fn start(&mut self, viewport: Viewport, now: f64) {
        self.viewport = viewport;
        self.now = now;
        self.set_language(self.swapper.language());
        if let Some(handoff) = self.loader.start(&mut self.stage, &mut self.tweens, now) {
            self.arm(handoff);
        }
    }

    pub fn frame(&mut self, now: f64, viewport: Viewport) -> FrameOutput {
        self.now = now;
        self.viewport = viewport;

        if let Some(handoff) = self.loader.tick(&mut self.stage, &mut self.tweens, now) {
            self.arm(handoff);
        }
        if let Some(handoff) = self.loader.watchdog(&mut self.stage, &mut self.tweens, now) {
            self.arm(handoff);
        }

        let mut output = FrameOutput::default();
        if let Some(step) = self.nav.tick(now) {
            output.scroll_to = Some(step.scroll_y);
            if let Some(section) = step.settled_on {
                self.effects.set_active_section(&section);
            }
        }

        if self.armed {
            self.effects.on_scroll(
                &mut self.stage,
                &mut self.tweens,
                &self.config,
                &self.viewport,
                now,
            );
            self.ambient
                .on_scroll(&mut self.stage, &mut self.tweens, &self.viewport);
            self.reveal
                .on_scroll_frame(&mut self.stage, &mut self.tweens, &self.viewport, now);
        }

        if self.form.tick(now) {
            let message = self.translate("form.success");
            self.notices.show(NoticeKind::Success, message, now);
        }
        self.notices.tick(now);
        self.tweens.tick(&mut self.stage, now);
        output
    }

    /// Forces the content gate open if the loader stalled.
    pub fn watchdog(&mut self, now: f64) {
        if let Some(handoff) = self.loader.watchdog(&mut self.stage, &mut self.tweens, now) {
            self.arm(handoff);
        }
    }

    fn arm(&mut self, handoff: Handoff) {
        if self.armed {
            return;
        }
        self.armed = true;
        self.effects.arm(&mut self.stage, &mut self.tweens);
        self.ambient.start(&mut self.stage, &mut self.tweens, self.now);
        let mut registered = 0;
        for spec in reveal::default_specs() {
            registered += self.reveal.register(
                spec,
                &mut self.stage,
                &mut self.tweens,
                &self.viewport,
                self.now,
            );
        }
        log::info!("content ready ({handoff:?}), {registered} reveal targets");
    }

    /// Re-evaluates scroll state after the driver re-measured the layout.
    pub fn relayout(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.armed {
            self.reveal
                .on_scroll_frame(&mut self.stage, &mut self.tweens, &viewport, self.now);
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now: f64) {
        if !self.armed {
            return;
        }
        self.effects.pointer_move(
            &mut self.stage,
            &mut self.tweens,
            &self.config,
            &self.viewport,
            x,
            y,
            now,
        );
    }

    pub fn pointer_leave(&mut self, now: f64) {
        if self.armed {
            self.effects
                .pointer_leave(&mut self.stage, &mut self.tweens, now);
        }
    }

    /// Handles an in-page link. Returns `true` when the default navigation
    /// should be prevented.
    pub fn click_link(&mut self, href: &str, highlight: bool, now: f64) -> bool {
        if !self.armed {
            return false;
        }
        let handled = self.nav.activate(
            href,
            highlight,
            &self.stage,
            &self.config,
            self.viewport.scroll_y,
            now,
        );
        if handled {
            self.menu_open = false;
        }
        handled
    }

    pub fn scroll_to_top(&mut self, now: f64) {
        self.nav.scroll_to_top(self.viewport.scroll_y, now);
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn language(&self) -> Language {
        self.swapper.language()
    }

    pub fn toggle_language(&mut self) {
        self.set_language(self.swapper.language().other());
    }

    pub fn set_language(&mut self, language: Language) {
        if let Err(e) = self.swapper.apply_language(language, &mut self.stage) {
            log::error!("couldn't switch to {language}: {e}");
        }
    }

    fn translate(&self, path: &str) -> String {
        match load_dictionary(self.swapper.language()) {
            Ok(dict) => dict.text(path).to_string(),
            Err(e) => {
                log::error!("{e}");
                path.to_string()
            }
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn submit_form(&mut self, now: f64) -> Result<(), FormError> {
        match self.form.submit(now) {
            Err(FormError::Missing(field)) => {
                log::debug!("form rejected, {} is empty", field.name());
                let message = self.translate("form.missing");
                self.notices.show(NoticeKind::Error, message, now);
                Err(FormError::Missing(field))
            }
            other => other,
        }
    }

    pub fn drain_dirty(&mut self) -> Vec<Flush> {
        self.stage.drain_dirty()
    }

    pub fn view(&self) -> ViewState {
        let sending = self.form.is_sending();
        ViewState {
            language: self.swapper.language(),
            loader_present: self.stage.by_id(loader::LOADER_ID).is_some(),
            content_ready: self.armed,
            active_section: self.effects.active_section(),
            menu_open: self.menu_open,
            navbar_scrolled: self.effects.navbar_scrolled(),
            scroll_top_visible: self.effects.scroll_top_visible(),
            form: self.form.fields().clone(),
            sending,
            submit_label: self.translate(if sending { "form.sending" } else { "form.send" }),
            notice: self.notices.view(self.now),
        }
    }
}
