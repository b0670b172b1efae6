// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Context-menu and drag suppression for gallery media.

use alloc::boxed::Box;

use glint_core::config::GuardConfig;
use glint_core::guard::{ContextTarget, should_block_drag};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

fn target_element(e: &Event) -> Option<Element> {
    e.target().and_then(|t| t.dyn_into::<Element>().ok())
}

fn inside(el: &Element, selector: &str) -> bool {
    el.closest(selector).ok().flatten().is_some()
}

/// Classifies a context-menu target against `guard`.
#[must_use]
pub fn classify(document: &Document, guard: &GuardConfig, target: &Element) -> ContextTarget {
    let lightbox_open = document
        .query_selector(guard.lightbox)
        .ok()
        .flatten()
        .is_some_and(|lb| lb.class_list().contains(guard.lightbox_open_class));
    ContextTarget {
        lightbox_open,
        in_lightbox: inside(target, guard.lightbox),
        in_protect_zone: inside(target, guard.protect_zone),
        on_image: inside(target, guard.context_media),
    }
}

/// Installs the document-level `contextmenu` and `dragstart` listeners.
pub fn install(document: &Document, guard: GuardConfig) -> Result<(), JsValue> {
    let doc = document.clone();
    let on_context = Closure::wrap(Box::new(move |e: Event| {
        let Some(target) = target_element(&e) else {
            return;
        };
        if classify(&doc, &guard, &target).should_block() {
            e.prevent_default();
        }
    }) as Box<dyn FnMut(Event)>);
    document
        .add_event_listener_with_callback("contextmenu", on_context.as_ref().unchecked_ref())?;
    on_context.forget();

    let on_drag = Closure::wrap(Box::new(move |e: Event| {
        let on_media = target_element(&e).is_some_and(|t| inside(&t, guard.drag_media));
        if should_block_drag(on_media) {
            e.prevent_default();
        }
    }) as Box<dyn FnMut(Event)>);
    document.add_event_listener_with_callback("dragstart", on_drag.as_ref().unchecked_ref())?;
    on_drag.forget();
    Ok(())
}
