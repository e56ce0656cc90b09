use chrono::{DateTime, Datelike};
use leptos::prelude::*;

use super::{initial_text, use_portfolio};
use crate::presenter::ambient::{particles, HERO_BACKDROP, PARTICLE_CLASS, PARTICLE_OPACITY};
use crate::presenter::effects::CURSOR_ID;
use crate::presenter::form::Field;

const OWNER: &str = "Alberto Fernández";
const EMAIL: &str = "contacto@example.com";
const PHONE: &str = "+34 600 000 000";
const GITHUB: &str = "https://github.com/alberfdez1523";
const LINKEDIN: &str = "https://www.linkedin.com/in/alberto-fern%C3%A1ndez-palomo-38a583267/";

/// (name, level %, category)
const SKILLS: [(&str, u32, &str); 9] = [
    ("Python", 90, "Programming"),
    ("R", 80, "Programming"),
    ("Java", 50, "Programming"),
    ("C++", 50, "Programming"),
    ("React", 75, "Frontend"),
    ("HTML/CSS", 90, "Frontend"),
    ("SQL", 90, "Database"),
    ("PennyLane", 75, "Quantum"),
    ("Qiskit", 65, "Quantum"),
];

struct Project {
    tags: &'static [&'static str],
    repo: &'static str,
}

static PROJECTS: [Project; 2] = [
    Project {
        tags: &["Python", "Qiskit", "Pennylane", "Machine Learning"],
        repo: "https://github.com/alberfdez1523/QMLvsML",
    },
    Project {
        tags: &["Rust", "Leptos", "WebAssembly", "Tailwind"],
        repo: "https://github.com/alberfdez1523/Portfolio",
    },
];

fn build_year() -> Option<i32> {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .ok()
        .map(|time| time.year())
}

/// Text bound to a dictionary path; the presenter rewrites it on language change.
#[component]
fn BoundText(id: String, path: String) -> impl IntoView {
    view! { <span id=id>{initial_text(&path)}</span> }
}

#[component]
fn SectionTitle(id: &'static str, path: &'static str) -> impl IntoView {
    view! {
        <div class="text-center mb-16">
            <h2 id=id class="section-title text-3xl md:text-4xl font-bold text-white mb-4">
                {initial_text(path)}
            </h2>
            <div class="w-20 h-1 bg-blue-500 mx-auto rounded-full"></div>
        </div>
    }
}

#[component]
pub fn Background() -> impl IntoView {
    view! {
        <div
            data-fixed=""
            class="animated-background fixed inset-0 -z-10 pointer-events-none overflow-hidden"
        >
            <div class="bg-layer bg-gradient-1 absolute -top-1/4 -left-1/4 w-3/4 h-3/4 rounded-full bg-blue-600/20 blur-3xl"></div>
            <div class="bg-layer bg-gradient-2 absolute top-1/3 -right-1/4 w-2/3 h-2/3 rounded-full bg-purple-600/20 blur-3xl"></div>
            <div class="bg-layer bg-gradient-3 absolute -bottom-1/4 left-1/4 w-1/2 h-1/2 rounded-full bg-cyan-500/10 blur-3xl"></div>
            <div class="bg-layer bg-grid absolute inset-0"></div>
            <div class="bg-layer bg-particles absolute inset-0">
                {particles()
                    .into_iter()
                    .map(|p| {
                        view! {
                            <div
                                class=format!("{PARTICLE_CLASS} absolute w-1 h-1 rounded-full bg-blue-300")
                                style=format!(
                                    "left: {:.3}%; top: {:.3}%; opacity: {PARTICLE_OPACITY}",
                                    p.left,
                                    p.top,
                                )
                            ></div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn Hero() -> impl IntoView {
    let portfolio = use_portfolio();
    view! {
        <section id="home" class="relative overflow-hidden min-h-screen flex items-center pt-16">
            <div
                id=HERO_BACKDROP
                class="absolute inset-x-0 top-0 h-[150%] -z-10 bg-gradient-to-b from-blue-950/40 via-transparent to-transparent"
            ></div>
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 grid md:grid-cols-2 gap-12 items-center">
                <div id="hero-text" class="space-y-6">
                    <p id="hero-greeting" class="text-blue-400 text-lg font-medium">
                        {initial_text("hero.greeting")}
                    </p>
                    <h1 class="text-5xl md:text-6xl font-bold text-white">{OWNER}</h1>
                    <p id="hero-role" class="text-2xl text-gray-300">
                        {initial_text("hero.role")}
                    </p>
                    <p id="hero-description" class="text-gray-400 max-w-xl leading-relaxed">
                        {initial_text("hero.description")}
                    </p>
                    <div class="flex flex-wrap gap-4">
                        <a
                            href="#projects"
                            class="px-6 py-3 rounded-lg bg-blue-600 hover:bg-blue-500 text-white font-medium"
                            on:click=portfolio.on_link("#projects", false)
                        >
                            <BoundText id="hero-view-projects".into() path="hero.viewProjects".into() />
                            " →"
                        </a>
                        <a
                            href="/cv.pdf"
                            download=""
                            class="px-6 py-3 rounded-lg border border-gray-600 hover:border-blue-500 text-gray-200 font-medium"
                        >
                            <BoundText id="hero-download-cv".into() path="hero.downloadCV".into() />
                            " ↓"
                        </a>
                    </div>
                </div>
                <div class="relative flex justify-center">
                    <div
                        id="hero-blob"
                        class="absolute inset-0 m-auto w-80 h-80 rounded-full bg-gradient-to-tr from-blue-600/40 to-purple-600/40 blur-2xl"
                    ></div>
                    <div
                        id="hero-image-wrapper"
                        class="relative w-72 h-72 md:w-96 md:h-96 rounded-2xl overflow-hidden [perspective:1000px]"
                    >
                        <img
                            id="hero-image"
                            src="/assets/profile-photo.jpg"
                            alt=OWNER
                            class="w-full h-full object-cover"
                        />
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn About() -> impl IntoView {
    view! {
        <section id="about" class="py-24">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <SectionTitle id="about-title" path="about.title" />
                <div class="grid md:grid-cols-2 gap-12 items-center">
                    <div class="about-image rounded-2xl overflow-hidden shadow-xl">
                        <img src="/assets/about.jpg" alt=OWNER class="w-full h-full object-cover" />
                    </div>
                    <div class="about-text space-y-6 text-gray-300 leading-relaxed">
                        <p id="about-p1">{initial_text("about.p1")}</p>
                        <p id="about-p2">{initial_text("about.p2")}</p>
                        <blockquote
                            id="about-quote"
                            class="border-l-4 border-blue-500 pl-4 italic text-gray-400"
                        >
                            {initial_text("about.quote")}
                        </blockquote>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Skills() -> impl IntoView {
    view! {
        <section id="skills" class="py-24">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <SectionTitle id="skills-title" path="skills.title" />
                <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-6">
                    {SKILLS
                        .into_iter()
                        .map(|(name, level, category)| {
                            view! {
                                <div class="skill-card p-6 rounded-xl bg-gray-800/60 border border-gray-700">
                                    <div class="flex justify-between mb-1">
                                        <span class="font-semibold text-white">{name}</span>
                                        <span class="text-blue-400">{format!("{level}%")}</span>
                                    </div>
                                    <span class="text-xs uppercase tracking-wide text-gray-500">
                                        {category}
                                    </span>
                                    <div class="mt-3 h-2 rounded-full bg-gray-700 overflow-hidden">
                                        <div
                                            class="skill-progress h-full rounded-full bg-gradient-to-r from-blue-500 to-purple-500"
                                            data-level=level.to_string()
                                            style=format!("width: {level}%")
                                        ></div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Experience() -> impl IntoView {
    view! {
        <section id="experience" class="py-24">
            <div class="max-w-4xl mx-auto px-4 sm:px-6 lg:px-8">
                <SectionTitle id="experience-title" path="experience.title" />
                <div class="relative border-l-2 border-gray-700 ml-4 space-y-12">
                    {(0..2)
                        .map(|i| {
                            let key = |field: &str| {
                                (format!("experience-{i}-{field}"), format!("experience.items.{i}.{field}"))
                            };
                            let (title_id, title) = key("title");
                            let (company_id, company) = key("company");
                            let (period_id, period) = key("period");
                            let (description_id, description) = key("description");
                            view! {
                                <div class="timeline-item relative pl-8">
                                    <span class="absolute -left-[9px] top-1 w-4 h-4 rounded-full bg-blue-500"></span>
                                    <h3 class="text-xl font-semibold text-white">
                                        <BoundText id=title_id path=title />
                                    </h3>
                                    <p class="text-blue-400">
                                        <BoundText id=company_id path=company />
                                    </p>
                                    <p class="text-sm text-gray-500 mb-2">
                                        <BoundText id=period_id path=period />
                                    </p>
                                    <p class="text-gray-400 leading-relaxed">
                                        <BoundText id=description_id path=description />
                                    </p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Education() -> impl IntoView {
    view! {
        <section id="education" class="py-24">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <SectionTitle id="education-title" path="education.title" />
                <div class="grid md:grid-cols-2 gap-8">
                    {(0..2)
                        .map(|i| {
                            let key = |field: &str| {
                                (format!("education-{i}-{field}"), format!("education.items.{i}.{field}"))
                            };
                            let (degree_id, degree) = key("degree");
                            let (school_id, school) = key("school");
                            let (period_id, period) = key("period");
                            let (description_id, description) = key("description");
                            view! {
                                <div class="education-card p-8 rounded-2xl bg-gray-800/60 border border-gray-700">
                                    <h3 class="text-xl font-semibold text-white mb-2">
                                        <BoundText id=degree_id path=degree />
                                    </h3>
                                    <p class="text-blue-400">
                                        <BoundText id=school_id path=school />
                                    </p>
                                    <p class="text-sm text-gray-500 mb-4">
                                        <BoundText id=period_id path=period />
                                    </p>
                                    <p class="text-gray-400 leading-relaxed">
                                        <BoundText id=description_id path=description />
                                    </p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Projects() -> impl IntoView {
    view! {
        <section id="projects" class="py-24">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <SectionTitle id="projects-title" path="projects.title" />
                <div class="grid md:grid-cols-2 gap-8">
                    {PROJECTS
                        .iter()
                        .enumerate()
                        .map(|(i, project)| {
                            view! {
                                <div class="project-card rounded-2xl overflow-hidden bg-gray-800/60 border border-gray-700">
                                    <div class="relative h-48 bg-gradient-to-br from-blue-900 to-purple-900">
                                        <div class="project-overlay absolute inset-0 flex items-center justify-center bg-black/60 opacity-0">
                                            <a
                                                href=project.repo
                                                target="_blank"
                                                rel="noopener noreferrer"
                                                class="px-4 py-2 rounded-lg bg-white/10 text-white"
                                            >
                                                "GitHub ↗"
                                            </a>
                                        </div>
                                    </div>
                                    <div class="p-6">
                                        <h3 class="text-xl font-semibold text-white mb-2">
                                            <BoundText
                                                id=format!("projects-{i}-title")
                                                path=format!("projects.items.{i}.title")
                                            />
                                        </h3>
                                        <p class="text-gray-400 mb-4">
                                            <BoundText
                                                id=format!("projects-{i}-description")
                                                path=format!("projects.items.{i}.description")
                                            />
                                        </p>
                                        <div class="flex flex-wrap gap-2">
                                            {project
                                                .tags
                                                .iter()
                                                .map(|tag| {
                                                    view! {
                                                        <span class="px-3 py-1 text-xs rounded-full bg-blue-900/40 text-blue-300">
                                                            {*tag}
                                                        </span>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
fn FormField(field: Field) -> impl IntoView {
    let portfolio = use_portfolio();
    let name = field.name();
    let value = move || portfolio.view.with(|v| v.form.get(field).to_string());
    let on_input = move |ev: leptos::ev::Event| {
        portfolio.update(|p, _| p.set_field(field, event_target_value(&ev)));
    };
    let kind = if field == Field::Email { "email" } else { "text" };
    let input_class = "w-full px-4 py-3 rounded-lg bg-gray-800 border border-gray-700 text-white focus:outline-none focus:ring-2 focus:ring-blue-500";

    view! {
        <div>
            <label for=name class="block text-sm text-gray-400 mb-1">
                <BoundText id=format!("form-{name}-label") path=format!("form.{name}") />
            </label>
            {match field {
                Field::Message => {
                    view! {
                        <textarea
                            id=name
                            name=name
                            rows="5"
                            class=input_class
                            prop:value=value
                            on:input=on_input
                        ></textarea>
                    }
                        .into_any()
                }
                _ => {
                    view! {
                        <input
                            id=name
                            name=name
                            type=kind
                            class=input_class
                            prop:value=value
                            on:input=on_input
                        />
                    }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
pub fn Contact() -> impl IntoView {
    let portfolio = use_portfolio();
    let sending = move || portfolio.view.with(|v| v.sending);

    view! {
        <section id="contact" class="py-24">
            <div class="max-w-5xl mx-auto px-4 sm:px-6 lg:px-8">
                <SectionTitle id="contact-title" path="contact.title" />
                <div class="grid md:grid-cols-2 gap-8">
                    <div class="contact-card space-y-6 p-8 rounded-2xl bg-gray-900 border border-gray-700">
                        <h3 id="contact-subtitle" class="text-2xl font-bold text-white">
                            {initial_text("contact.subtitle")}
                        </h3>
                        <p id="contact-description" class="text-gray-400">
                            {initial_text("contact.description")}
                        </p>
                        <div>
                            <h4 class="text-white font-medium">"Email"</h4>
                            <a href=format!("mailto:{EMAIL}") class="text-gray-400 hover:text-blue-400">
                                {EMAIL}
                            </a>
                        </div>
                        <div>
                            <h4 id="contact-location" class="text-white font-medium">
                                {initial_text("contact.location")}
                            </h4>
                            <p id="contact-location-value" class="text-gray-400">
                                {initial_text("contact.locationValue")}
                            </p>
                        </div>
                        <div>
                            <h4 id="contact-phone" class="text-white font-medium">
                                {initial_text("contact.phone")}
                            </h4>
                            <p class="text-gray-400">{PHONE}</p>
                        </div>
                        <div>
                            <h4 id="contact-social" class="text-white font-medium mb-2">
                                {initial_text("contact.social")}
                            </h4>
                            <div class="flex gap-4">
                                <a href=LINKEDIN target="_blank" rel="noopener noreferrer" class="px-4 py-2 rounded-full bg-gray-700 hover:bg-blue-600">
                                    "LinkedIn"
                                </a>
                                <a href=GITHUB target="_blank" rel="noopener noreferrer" class="px-4 py-2 rounded-full bg-gray-700 hover:bg-gray-600">
                                    "GitHub"
                                </a>
                            </div>
                        </div>
                    </div>
                    <form
                        class="contact-card space-y-4 p-8 rounded-2xl bg-gray-900 border border-gray-700"
                        novalidate=""
                        on:submit=move |ev| {
                            ev.prevent_default();
                            if let Some(Err(e)) = portfolio.update(|p, now| p.submit_form(now)) {
                                log::debug!("contact form: {e}");
                            }
                        }
                    >
                        {Field::ALL.into_iter().map(|field| view! { <FormField field=field /> }).collect_view()}
                        <button
                            type="submit"
                            class="w-full py-3 rounded-lg bg-blue-600 hover:bg-blue-500 disabled:opacity-60 text-white font-medium"
                            disabled=sending
                        >
                            {move || portfolio.view.with(|v| v.submit_label.clone())}
                        </button>
                    </form>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = build_year().map(|year| format!("© {year} {OWNER}."));
    view! {
        <footer class="footer relative z-10 border-t border-gray-800 py-8">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 flex flex-col md:flex-row justify-between items-center gap-4">
                <span class="text-2xl font-bold text-blue-500">{OWNER}</span>
                <div class="text-gray-400 text-center md:text-right">
                    <p>{year}</p>
                    <p id="footer-credits" class="mt-1" inner_html=initial_text("footer.credits")></p>
                </div>
            </div>
        </footer>
    }
}

#[component]
pub fn ScrollToTop() -> impl IntoView {
    let portfolio = use_portfolio();
    view! {
        <div data-fixed="" class="fixed bottom-8 right-8 z-40">
            <button
                id="scroll-to-top"
                data-fixed=""
                type="button"
                aria-label="Scroll to top"
                class="w-12 h-12 rounded-full bg-blue-600 text-white shadow-lg"
                style="opacity: 0; transform: translateY(100px)"
                on:click=move |_| {
                    portfolio.update(|p, now| p.scroll_to_top(now));
                }
            >
                "↑"
            </button>
        </div>
    }
}

/// Pointer follower, shown on wide screens only.
#[component]
pub fn Cursor() -> impl IntoView {
    view! {
        <div data-fixed="" class="fixed inset-0 z-[9999] pointer-events-none">
            <div
                id=CURSOR_ID
                class="hidden min-[769px]:block absolute top-0 left-0 -ml-2.5 -mt-2.5 w-5 h-5 rounded-full bg-[#044348]"
            ></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::BINDINGS;

    #[test]
    fn test_build_year() {
        assert!(build_year().is_some_and(|year| year >= 2024));
    }

    #[test]
    fn test_list_bindings_exist() {
        let ids: Vec<&str> = BINDINGS.iter().map(|b| b.element).collect();
        for i in 0..2 {
            for field in ["title", "company", "period", "description"] {
                assert!(ids.contains(&format!("experience-{i}-{field}").as_str()));
            }
            for field in ["degree", "school", "period", "description"] {
                assert!(ids.contains(&format!("education-{i}-{field}").as_str()));
            }
            assert!(ids.contains(&format!("projects-{i}-title").as_str()));
        }
        for field in Field::ALL {
            assert!(ids.contains(&format!("form-{}-label", field.name()).as_str()));
        }
        assert_eq!(PROJECTS.len(), 2);
    }
}
