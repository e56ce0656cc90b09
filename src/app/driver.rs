//! Browser side of the presenter: mirrors the rendered page into a [`Stage`],
//! forwards window events, and writes stage changes back to the DOM once per
//! animation frame.

use std::collections::HashMap;
use std::time::Duration;

use indextree::NodeId;
use leptos::prelude::*;
use leptos_use::{use_document, use_event_listener, use_raf_fn, use_window};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use super::Portfolio;
use crate::presenter::effects::FIXED_ATTR;
use crate::presenter::Viewport;
use crate::stage::{Flush, Rect, Stage, StageNode};

const MIRRORED_ATTRS: [&str; 2] = ["data-level", FIXED_ATTR];
const SKIPPED_TAGS: [&str; 4] = ["SCRIPT", "STYLE", "LINK", "TEMPLATE"];

type Elements = HashMap<NodeId, Element>;

fn viewport() -> Viewport {
    let window = window();
    let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or_default();
    Viewport::new(
        window.scroll_y().unwrap_or_default(),
        size(window.inner_width()),
        size(window.inner_height()),
    )
}

fn page_height() -> f64 {
    document()
        .document_element()
        .map(|html| html.scroll_height() as f64)
        .unwrap_or_default()
}

/// Layout rect before transforms. The offset chain ends at `<body>` for
/// flowing content and at the fixed ancestor otherwise, so this is
/// page-space or viewport-space to match the stage.
fn measure(element: &Element, scroll_y: f64) -> Rect {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        // SVG has no offsets
        let r = element.get_bounding_client_rect();
        let fixed = matches!(element.closest(&format!("[{FIXED_ATTR}]")), Ok(Some(_)));
        let top = if fixed { r.top() } else { r.top() + scroll_y };
        return Rect::new(top, r.left(), r.width(), r.height());
    };
    let (mut top, mut left) = (0.0, 0.0);
    let mut current = Some(html.clone());
    while let Some(el) = current {
        top += el.offset_top() as f64;
        left += el.offset_left() as f64;
        current = el
            .offset_parent()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());
    }
    Rect::new(top, left, html.offset_width() as f64, html.offset_height() as f64)
}

fn describe(element: &Element, scroll_y: f64) -> StageNode {
    let mut node = StageNode::new()
        .with_tag(element.tag_name().to_lowercase())
        .with_rect(measure(element, scroll_y));
    let id = element.id();
    if !id.is_empty() {
        node = node.with_id(id);
    }
    // className is not a string on SVG elements
    let classes = element.get_attribute("class").unwrap_or_default();
    for class in classes.split_whitespace() {
        node = node.with_class(class);
    }
    for attr in MIRRORED_ATTRS {
        if let Some(value) = element.get_attribute(attr) {
            node = node.with_attr(attr, value);
        }
    }
    node
}

fn mirror(body: &Element, scroll_y: f64) -> (Stage, Elements) {
    let mut stage = Stage::new();
    let mut elements = Elements::new();
    let mut pending = vec![(stage.root(), body.clone())];
    while let Some((parent, element)) = pending.pop() {
        let children = element.children();
        for i in 0..children.length() {
            let Some(child) = children.item(i) else {
                continue;
            };
            if SKIPPED_TAGS.contains(&child.tag_name().as_str()) {
                continue;
            }
            let node = stage.insert(parent, describe(&child, scroll_y));
            elements.insert(node, child.clone());
            pending.push((node, child));
        }
    }
    (stage, elements)
}

fn flush(elements: &Elements, batch: Vec<Flush>) {
    for Flush { node, css, text } in batch {
        let Some(element) = elements.get(&node) else {
            continue;
        };
        if let Some(html) = element.dyn_ref::<HtmlElement>() {
            let style = html.style();
            for (name, value) in css {
                if let Err(e) = style.set_property(name, &value) {
                    log::warn!("couldn't set {name} on <{}>: {e:?}", element.tag_name());
                }
            }
        }
        match text {
            Some((text, true)) => element.set_inner_html(&text),
            Some((text, false)) => element.set_text_content(Some(&text)),
            None => {}
        }
    }
}

fn remeasure(portfolio: Portfolio, elements: &Elements) {
    let viewport = viewport();
    let rects: Vec<(NodeId, Rect)> = elements
        .iter()
        .map(|(node, element)| (*node, measure(element, viewport.scroll_y)))
        .collect();
    let height = page_height();
    portfolio.update(|p, _| {
        let stage = p.stage_mut();
        for (node, rect) in rects {
            stage.set_rect(node, rect);
        }
        let root = stage.root();
        stage.set_rect(root, Rect::new(0.0, 0.0, viewport.width, height));
        p.relayout(viewport);
    });
}

pub fn use_stage_driver(portfolio: Portfolio) {
    let elements = StoredValue::new_local(Elements::new());
    let ready = StoredValue::new(false);
    let stale = StoredValue::new(false);

    Effect::new(move |_| {
        let Some(body) = document().body() else {
            log::error!("no <body> to drive");
            return;
        };
        let viewport = viewport();
        let (mut stage, mirrored) = mirror(&body, viewport.scroll_y);
        let root = stage.root();
        stage.set_rect(root, Rect::new(0.0, 0.0, viewport.width, page_height()));
        log::debug!("mirrored {} elements", mirrored.len());
        elements.set_value(mirrored);

        let watchdog_after = portfolio.update(|p, now| {
            *p.stage_mut() = stage;
            p.start(viewport, now);
            p.watchdog_after()
        });
        if let Some(after) = watchdog_after {
            set_timeout(
                move || {
                    portfolio.update(|p, now| p.watchdog(now));
                },
                Duration::from_millis(after as u64),
            );
        }
        ready.set_value(true);
    });

    // swapped text reflows the page
    Effect::watch(
        move || portfolio.view.with(|v| v.language),
        move |_, _, _| stale.set_value(true),
        false,
    );

    let _ = use_raf_fn(move |_| {
        if !ready.get_value() {
            return;
        }
        let viewport = viewport();
        let batch = portfolio.update(|p, now| {
            if let Some(y) = p.frame(now, viewport).scroll_to {
                window().scroll_to_with_x_and_y(0.0, y);
            }
            p.drain_dirty()
        });
        elements.with_value(|elements| {
            if let Some(batch) = batch {
                flush(elements, batch);
            }
            if stale.get_value() {
                stale.set_value(false);
                remeasure(portfolio, elements);
            }
        });
    });

    let _ = use_event_listener(use_window(), leptos::ev::resize, move |_| {
        stale.set_value(true);
    });
    let _ = use_event_listener(use_window(), leptos::ev::mousemove, move |ev| {
        portfolio.update(|p, now| p.pointer_move(ev.client_x() as f64, ev.client_y() as f64, now));
    });
    let _ = use_event_listener(use_document(), leptos::ev::mouseleave, move |_| {
        portfolio.update(|p, now| p.pointer_leave(now));
    });
}
