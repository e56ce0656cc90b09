use serde_json::Value;
use std::fmt;

use crate::content::{load_dictionary, ContentError};
use crate::stage::Stage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    pub fn all() -> [Language; 2] {
        [Language::Es, Language::En]
    }

    pub fn other(self) -> Self {
        match self {
            Language::Es => Language::En,
            Language::En => Language::Es,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Display strings for one language, addressed by dotted path.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    language: Language,
    root: Value,
}

impl Dictionary {
    pub fn new(language: Language, root: Value) -> Self {
        Self { language, root }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Resolves `a.b.0.c`; numeric segments index into arrays.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        current.as_str()
    }

    /// Like [`Dictionary::lookup`], falling back to the path itself.
    pub fn text<'a>(&'a self, path: &'a str) -> &'a str {
        self.lookup(path).unwrap_or_else(|| {
            log::warn!("no {} string for {path}", self.language);
            path
        })
    }
}

/// One translatable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub element: &'static str,
    pub path: &'static str,
    /// The string contains markup.
    pub rich: bool,
}

const fn plain(element: &'static str, path: &'static str) -> Binding {
    Binding {
        element,
        path,
        rich: false,
    }
}

pub const BINDINGS: &[Binding] = &[
    plain("language-toggle", "language.toggle"),
    plain("nav-home", "nav.home"),
    plain("nav-about", "nav.about"),
    plain("nav-skills", "nav.skills"),
    plain("nav-experience", "nav.experience"),
    plain("nav-education", "nav.education"),
    plain("nav-projects", "nav.projects"),
    plain("nav-contact", "nav.contact"),
    plain("loader-loading", "loader.loading"),
    plain("hero-greeting", "hero.greeting"),
    plain("hero-role", "hero.role"),
    plain("hero-description", "hero.description"),
    plain("hero-view-projects", "hero.viewProjects"),
    plain("hero-download-cv", "hero.downloadCV"),
    plain("about-title", "about.title"),
    plain("about-p1", "about.p1"),
    plain("about-p2", "about.p2"),
    plain("about-quote", "about.quote"),
    plain("skills-title", "skills.title"),
    plain("experience-title", "experience.title"),
    plain("experience-0-title", "experience.items.0.title"),
    plain("experience-0-company", "experience.items.0.company"),
    plain("experience-0-period", "experience.items.0.period"),
    plain("experience-0-description", "experience.items.0.description"),
    plain("experience-1-title", "experience.items.1.title"),
    plain("experience-1-company", "experience.items.1.company"),
    plain("experience-1-period", "experience.items.1.period"),
    plain("experience-1-description", "experience.items.1.description"),
    plain("education-title", "education.title"),
    plain("education-0-degree", "education.items.0.degree"),
    plain("education-0-school", "education.items.0.school"),
    plain("education-0-period", "education.items.0.period"),
    plain("education-0-description", "education.items.0.description"),
    plain("education-1-degree", "education.items.1.degree"),
    plain("education-1-school", "education.items.1.school"),
    plain("education-1-period", "education.items.1.period"),
    plain("education-1-description", "education.items.1.description"),
    plain("projects-title", "projects.title"),
    plain("projects-0-title", "projects.items.0.title"),
    plain("projects-0-description", "projects.items.0.description"),
    plain("projects-1-title", "projects.items.1.title"),
    plain("projects-1-description", "projects.items.1.description"),
    plain("contact-title", "contact.title"),
    plain("contact-subtitle", "contact.subtitle"),
    plain("contact-description", "contact.description"),
    plain("contact-location", "contact.location"),
    plain("contact-location-value", "contact.locationValue"),
    plain("contact-phone", "contact.phone"),
    plain("contact-social", "contact.social"),
    plain("form-name-label", "form.name"),
    plain("form-email-label", "form.email"),
    plain("form-subject-label", "form.subject"),
    plain("form-message-label", "form.message"),
    Binding {
        element: "footer-credits",
        path: "footer.credits",
        rich: true,
    },
];

/// Owns the active language and rewrites every bound element on change.
#[derive(Debug, Default)]
pub struct TextSwapper {
    language: Language,
}

impl TextSwapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Loads `language` and applies it; returns the number of elements whose
    /// text changed.
    pub fn apply_language(
        &mut self,
        language: Language,
        stage: &mut Stage,
    ) -> Result<usize, ContentError> {
        let dict = load_dictionary(language)?;
        Ok(self.apply_dictionary(&dict, stage))
    }

    pub fn toggle(&mut self, stage: &mut Stage) -> Result<usize, ContentError> {
        self.apply_language(self.language.other(), stage)
    }

    pub fn apply_dictionary(&mut self, dict: &Dictionary, stage: &mut Stage) -> usize {
        let mut changed = 0;
        for binding in BINDINGS {
            let Some(node) = stage.by_id(binding.element) else {
                continue;
            };
            let Some(text) = dict.lookup(binding.path) else {
                log::warn!("missing {} string {}", dict.language(), binding.path);
                continue;
            };
            if stage.set_text(node, text, binding.rich) {
                changed += 1;
            }
        }
        self.language = dict.language();
        log::debug!("language set to {}, {changed} elements updated", self.language);
        changed
    }
}
