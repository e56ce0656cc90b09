use leptos::prelude::*;

use super::initial_text;
use crate::presenter::loader::{LOADER_ID, PERCENT_ID};

const FIRST_NAME: &str = "ALBERTO";
const SURNAME: &str = "FERNÁNDEZ";
const SHAPES: [&str; 4] = [
    "shape-circle top-1/4 left-1/5 w-32 h-32 rounded-full border border-blue-500/40",
    "shape-square bottom-1/4 right-1/5 w-24 h-24 rotate-45 border border-purple-500/40",
    "shape-triangle top-1/3 right-1/4 w-16 h-16 border border-cyan-400/40",
    "shape-ring bottom-1/3 left-1/4 w-40 h-40 rounded-full border-2 border-blue-400/20",
];

/// Each letter carries a coloured copy that the loader sweeps in.
#[component]
fn Letters(word: &'static str) -> impl IntoView {
    word.chars()
        .map(|c| {
            let letter = c.to_string();
            let data_letter = letter.clone();
            let text_letter = letter.clone();
            view! {
                <span class="logo-letter relative inline-block" data-letter=data_letter>
                    {text_letter}
                    <span class="logo-letter-fill absolute inset-0 text-blue-500">{letter}</span>
                </span>
            }
        })
        .collect_view()
}

#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div
            id=LOADER_ID
            class="fixed inset-0 z-50 flex flex-col items-center justify-center bg-gray-950 overflow-hidden"
        >
            <div class="grid-pattern absolute inset-0 opacity-0"></div>
            <div class="geometric-shapes absolute inset-0 opacity-0">
                {SHAPES
                    .into_iter()
                    .map(|shape| view! { <div class=format!("shape absolute {shape}")></div> })
                    .collect_view()}
            </div>
            <div class="relative z-10 text-center font-bold">
                <div class="text-5xl md:text-7xl tracking-widest">
                    <Letters word=FIRST_NAME />
                </div>
                <div class="mt-2 text-3xl md:text-5xl tracking-[0.3em] text-gray-300">
                    <Letters word=SURNAME />
                </div>
            </div>
            <div class="loading-animation relative z-10 mt-10 flex items-center gap-2 text-sm uppercase tracking-widest text-gray-400 opacity-0">
                <span id="loader-loading">{initial_text("loader.loading")}</span>
                <span class="loading-dots"></span>
            </div>
            <div class="progress-container relative z-10 mt-6 w-64 opacity-0">
                <div class="h-1 rounded bg-gray-800 overflow-hidden">
                    <div class="progress-fill h-full w-0 bg-gradient-to-r from-blue-500 to-purple-500"></div>
                </div>
                <span id=PERCENT_ID class="block mt-2 text-center text-xs font-mono text-gray-400">
                    "0%"
                </span>
            </div>
        </div>
    }
}
