#[cfg(feature = "hydrate")]
mod driver;
mod loader;
mod navbar;
mod notifications;
mod sections;

use std::sync::{Arc, Mutex};

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{components::*, path};

use crate::config::MotionConfig;
use crate::content::load_dictionary;
use crate::i18n::Language;
use crate::presenter::{Presenter, ViewState};
use crate::stage::Stage;

use loader::Loader;
use navbar::Navbar;
use notifications::Notifications;
use sections::{
    About, Background, Contact, Cursor, Education, Experience, Footer, Hero, Projects,
    ScrollToTop, Skills,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <meta name="color-scheme" content="dark" />
                <link rel="shortcut icon" type="image/ico" href="/favicon.ico" />
                <link rel="stylesheet" id="leptos" href="/pkg/portfolio-site.css" />
                <MetaTags />
            </head>
            <body class="bg-gray-900 text-gray-100 font-sans overflow-x-hidden">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Alberto Fernández | Portfolio" />
        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=path!("/") view=PortfolioPage />
            </Routes>
        </Router>
    }
}

/// Display string in the initial language. Server and client render the
/// same text so hydration matches; later swaps go through the presenter.
pub fn initial_text(path: &str) -> String {
    match load_dictionary(Language::default()) {
        Ok(dict) => dict.text(path).to_string(),
        Err(e) => {
            log::error!("{e}");
            path.to_string()
        }
    }
}

pub(crate) fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        window()
            .performance()
            .map(|p| p.now())
            .unwrap_or_default()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Shared handle to the presenter plus the view snapshot components render.
#[derive(Clone, Copy)]
pub struct Portfolio {
    presenter: StoredValue<Arc<Mutex<Presenter>>>,
    pub view: RwSignal<ViewState>,
}

impl Portfolio {
    fn new() -> Self {
        let presenter = Presenter::new(MotionConfig::load_or_default(), Stage::new());
        let view = ViewState {
            loader_present: true,
            submit_label: initial_text("form.send"),
            ..Default::default()
        };
        Self {
            presenter: StoredValue::new(Arc::new(Mutex::new(presenter))),
            view: RwSignal::new(view),
        }
    }

    /// Runs `f` against the presenter and republishes the view if it changed.
    pub fn update<T>(&self, f: impl FnOnce(&mut Presenter, f64) -> T) -> Option<T> {
        let now = now_ms();
        let (out, view) = self.presenter.with_value(|p| {
            let mut p = match p.lock() {
                Ok(p) => p,
                Err(e) => {
                    log::error!("presenter unavailable: {e}");
                    return None;
                }
            };
            let out = f(&mut p, now);
            Some((out, p.view()))
        })?;
        self.publish(view);
        Some(out)
    }

    fn publish(&self, view: ViewState) {
        if self.view.with_untracked(|current| *current != view) {
            self.view.set(view);
        }
    }

    /// Handler for in-page anchors; falls through to the browser otherwise.
    pub fn on_link(self, href: &'static str, highlight: bool) -> impl Fn(leptos::ev::MouseEvent) {
        move |ev| {
            if self.update(|p, now| p.click_link(href, highlight, now)) == Some(true) {
                ev.prevent_default();
            }
        }
    }
}

pub fn use_portfolio() -> Portfolio {
    expect_context::<Portfolio>()
}

#[component]
fn PortfolioPage() -> impl IntoView {
    let portfolio = Portfolio::new();
    provide_context(portfolio);

    #[cfg(feature = "hydrate")]
    driver::use_stage_driver(portfolio);

    let lang = move || portfolio.view.with(|v| v.language.code());

    view! {
        <Html {..} lang=lang />
        <Show when=move || portfolio.view.with(|v| v.loader_present)>
            <Loader />
        </Show>
        <Background />
        <Navbar />
        <main id="main" class="relative z-10">
            <Hero />
            <About />
            <Skills />
            <Experience />
            <Education />
            <Projects />
            <Contact />
        </main>
        <Footer />
        <ScrollToTop />
        <Notifications />
        <Cursor />
    }
}
