// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header navigation: burger menu, submenu toggle and active-link marking.
//!
//! Both run after the header partial is injected. Listeners live for the
//! whole page, so their closures are leaked with [`Closure::forget`].

use alloc::boxed::Box;
use alloc::format;

use glint_core::config::NavConfig;
use glint_core::nav::{is_active, page_name};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, Node};

/// `dataset` key marking a burger whose listeners are installed.
const BOUND_KEY: &str = "bound";

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn set_expanded(el: &Element, expanded: bool) {
    let _ = el.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
}

/// The burger button and the menu it controls.
#[derive(Clone)]
struct Menu {
    burger: Element,
    menu: Element,
    open_class: &'static str,
}

impl Menu {
    fn is_open(&self) -> bool {
        self.menu.class_list().contains(self.open_class)
    }

    fn open(&self) {
        let _ = self.menu.class_list().add_1(self.open_class);
        set_expanded(&self.burger, true);
    }

    fn close(&self) {
        let _ = self.menu.class_list().remove_1(self.open_class);
        set_expanded(&self.burger, false);
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.menu.contains(target) || self.burger.contains(target)
    }
}

/// Wires the burger menu and the submenu toggle.
///
/// Returns `Ok(false)` if the header markup is missing or the burger was
/// already bound.
pub fn bind_menu(document: &Document, nav: &NavConfig) -> Result<bool, JsValue> {
    let (Some(burger), Some(menu)) = (
        document.query_selector(nav.burger)?,
        document.query_selector(nav.menu)?,
    ) else {
        return Ok(false);
    };
    let dataset = burger.dyn_ref::<HtmlElement>().map(HtmlElement::dataset);
    if let Some(ref dataset) = dataset {
        if dataset.get(BOUND_KEY).is_some() {
            return Ok(false);
        }
        dataset.set(BOUND_KEY, "1")?;
    }

    let state = Menu {
        burger: burger.clone(),
        menu: menu.clone(),
        open_class: nav.open_class,
    };

    let toggle = state.clone();
    listen(&burger, "click", move |e| {
        e.stop_propagation();
        if toggle.is_open() {
            toggle.close();
        } else {
            toggle.open();
        }
    })?;

    let outside = state.clone();
    listen(document, "click", move |e| {
        let target = e.target();
        let node = target.as_ref().and_then(|t| t.dyn_ref::<Node>());
        if outside.is_open() && !outside.contains(node) {
            outside.close();
        }
    })?;

    let escape = state.clone();
    listen(document, "keydown", move |e| {
        if e.dyn_ref::<KeyboardEvent>().is_some_and(|k| k.key() == "Escape") {
            escape.close();
        }
    })?;

    let links = menu.query_selector_all("a")?;
    for i in 0..links.length() {
        if let Some(link) = links.get(i) {
            let tapped = state.clone();
            listen(&link, "click", move |_| tapped.close())?;
        }
    }

    if let (Some(button), Some(submenu)) = (
        menu.query_selector(nav.group_button)?,
        menu.query_selector(nav.submenu)?,
    ) {
        let open_class = nav.open_class;
        let target = button.clone();
        listen(&button, "click", move |e| {
            e.stop_propagation();
            if let Ok(open) = submenu.class_list().toggle(open_class) {
                set_expanded(&target, open);
            }
        })?;
    }
    Ok(true)
}

/// Marks links to the page at `pathname` with the active class and
/// `aria-current="page"`, clearing both elsewhere.
///
/// A submenu holding the active link is opened. Returns the number of
/// links marked.
pub fn highlight_active(
    document: &Document,
    nav: &NavConfig,
    pathname: &str,
) -> Result<u32, JsValue> {
    let page = page_name(pathname);
    let links = document.query_selector_all(&format!("{} a, {} a", nav.menu, nav.submenu))?;
    let mut marked = 0;
    for i in 0..links.length() {
        let Some(link) = links.get(i) else {
            continue;
        };
        let link: &Element = link.unchecked_ref();
        let href = link.get_attribute("href").unwrap_or_default();
        if is_active(&href, page) {
            link.class_list().add_1(nav.active_class)?;
            link.set_attribute("aria-current", "page")?;
            marked += 1;
        } else {
            link.class_list().remove_1(nav.active_class)?;
            link.remove_attribute("aria-current")?;
        }
    }

    let active = document.query_selector(&format!("{} a.{}", nav.submenu, nav.active_class))?;
    if let Some(link) = active
        && let Some(submenu) = link.closest(nav.submenu)?
        && let Some(button) = submenu.previous_element_sibling()
    {
        submenu.class_list().add_1(nav.open_class)?;
        set_expanded(&button, true);
    }
    Ok(marked)
}
