use leptos::prelude::*;

use super::{initial_text, use_portfolio};
use crate::presenter::effects::SECTIONS;
use crate::presenter::nav::NAVBAR_ID;

/// Section id and the glyph shown for it in the dock.
const DOCK_ICONS: [(&str, &str); 7] = [
    ("home", "⌂"),
    ("about", "☺"),
    ("skills", "⚙"),
    ("experience", "★"),
    ("education", "✎"),
    ("projects", "◆"),
    ("contact", "✉"),
];

fn href(section: &'static str) -> &'static str {
    match section {
        "home" => "#home",
        "about" => "#about",
        "skills" => "#skills",
        "experience" => "#experience",
        "education" => "#education",
        "projects" => "#projects",
        _ => "#contact",
    }
}

#[component]
fn NavLink(section: &'static str) -> impl IntoView {
    let portfolio = use_portfolio();
    let active = move || portfolio.view.with(|v| v.active_section == Some(section));
    view! {
        <a
            id=format!("nav-{section}")
            href=href(section)
            class=move || {
                if active() {
                    "nav-link block px-3 py-2 text-blue-400"
                } else {
                    "nav-link block px-3 py-2 text-gray-300 hover:text-white"
                }
            }
            on:click=portfolio.on_link(href(section), true)
        >
            {initial_text(&format!("nav.{section}"))}
        </a>
    }
}

#[component]
pub fn Navbar() -> impl IntoView {
    let portfolio = use_portfolio();
    let menu_open = move || portfolio.view.with(|v| v.menu_open);

    view! {
        <nav
            id=NAVBAR_ID
            data-fixed=""
            class=move || {
                let scrolled = portfolio.view.with(|v| v.navbar_scrolled);
                if scrolled {
                    "fixed top-0 inset-x-0 z-40 bg-gray-900/90 backdrop-blur shadow-lg transition-colors"
                } else {
                    "fixed top-0 inset-x-0 z-40 bg-transparent transition-colors"
                }
            }
        >
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 flex items-center justify-between h-16">
                <a
                    href="#home"
                    class="text-xl font-bold text-blue-500"
                    on:click=portfolio.on_link("#home", true)
                >
                    "AF"
                </a>
                <div class=move || {
                    if menu_open() {
                        "nav-menu open absolute top-16 inset-x-0 bg-gray-900 md:static md:flex md:bg-transparent"
                    } else {
                        "nav-menu hidden md:flex"
                    }
                }>
                    {SECTIONS.into_iter().map(|section| view! { <NavLink section=section /> }).collect_view()}
                </div>
                <div class="flex items-center gap-2">
                    <button
                        id="language-toggle"
                        type="button"
                        class="px-3 py-1 rounded-md border border-gray-600 text-sm hover:bg-gray-800"
                        on:click=move |_| {
                            portfolio.update(|p, _| p.toggle_language());
                        }
                    >
                        {initial_text("language.toggle")}
                    </button>
                    <button
                        type="button"
                        class="hamburger md:hidden p-2"
                        aria-label="Menu"
                        aria-expanded=move || menu_open().to_string()
                        on:click=move |_| {
                            portfolio.update(|p, _| p.toggle_menu());
                        }
                    >
                        {move || if menu_open() { "✕" } else { "☰" }}
                    </button>
                </div>
            </div>
        </nav>
        <div data-fixed="" class="fixed bottom-4 inset-x-0 z-40 flex justify-center pointer-events-none">
            <div
                id="nav-dock"
                data-fixed=""
                class="hidden md:flex gap-2 px-3 py-2 rounded-2xl bg-gray-800/70 backdrop-blur pointer-events-auto"
            >
                {DOCK_ICONS
                    .into_iter()
                    .map(|(section, icon)| {
                        view! {
                            <a
                                href=href(section)
                                title=section
                                data-fixed=""
                                class="dock-item flex items-center justify-center w-10 h-10 rounded-xl bg-gray-700 text-lg"
                                on:click=portfolio.on_link(href(section), true)
                            >
                                {icon}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_is_linkable() {
        for section in SECTIONS {
            assert_eq!(href(section), format!("#{section}"));
        }
        for (section, _) in DOCK_ICONS {
            assert!(SECTIONS.contains(&section));
        }
    }
}
