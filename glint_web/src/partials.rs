// Copyright 2026 the Glint Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared header and footer fragments.
//!
//! Each page carries empty placeholders that are filled from HTML partials
//! on load. A placeholder is filled at most once; `data-loaded` marks it.

use alloc::format;
use alloc::string::ToString as _;

use glint_core::config::{PartialSlot, SiteConfig};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, RequestCache, RequestInit, Response, Window};

/// `dataset` key marking a filled placeholder.
const LOADED_KEY: &str = "loaded";

/// Fetches `slot.url` into the placeholder with `slot.target_id`.
///
/// Returns `Ok(false)` if the placeholder is missing or already filled.
/// The request bypasses the HTTP cache; a non-2xx status is an error.
pub async fn load_into(
    window: &Window,
    document: &Document,
    slot: &PartialSlot,
) -> Result<bool, JsValue> {
    let Some(target) = document.get_element_by_id(slot.target_id) else {
        return Ok(false);
    };
    let target: HtmlElement = target.dyn_into()?;
    if target.dataset().get(LOADED_KEY).is_some() {
        return Ok(false);
    }

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoStore);
    let response: Response = JsFuture::from(window.fetch_with_str_and_init(slot.url, &init))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "{} responded {}",
            slot.url,
            response.status()
        )));
    }
    let html = JsFuture::from(response.text()?).await?;

    target.set_inner_html(&html.as_string().unwrap_or_default());
    target.dataset().set(LOADED_KEY, "1")?;
    Ok(true)
}

/// Fills every partial slot in order, stopping at the first failure.
pub async fn load_all(
    window: &Window,
    document: &Document,
    site: &SiteConfig,
) -> Result<(), JsValue> {
    for slot in &site.partials {
        load_into(window, document, slot).await?;
    }
    Ok(())
}

/// Writes the current year into the element with `id`, if present.
pub fn stamp_year(document: &Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}
