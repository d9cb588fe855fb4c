// src/browser.rs
//
// web-sys implementations of the address bar and document head interfaces.

use crate::seo::{AddressBar, DocumentHead, PageMeta};
use gloo_utils::{document, window};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

pub struct BrowserLocation;

impl AddressBar for BrowserLocation {
    fn search(&self) -> String {
        window().location().search().unwrap_or_default()
    }

    fn replace_search(&mut self, query: &str) {
        let location = window().location();
        let path = location.pathname().unwrap_or_default();
        let hash = location.hash().unwrap_or_default();
        let url = format!("{}{}{}", path, query, hash);

        let result = window()
            .history()
            .and_then(|h| h.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
        if let Err(e) = result {
            log::warn!("Failed to update address bar to {}: {:?}", url, e);
        }
    }
}

pub struct BrowserHead;

impl DocumentHead for BrowserHead {
    fn apply(&mut self, meta: &PageMeta) {
        if let Err(e) = apply_meta(&document(), meta) {
            log::warn!("Failed to update page metadata: {:?}", e);
        }
    }
}

fn apply_meta(document: &Document, meta: &PageMeta) -> Result<(), JsValue> {
    document.set_title(&meta.title);
    if let Some(root) = document.document_element() {
        root.set_attribute("lang", meta.lang)?;
    }

    set_meta(document, "name", "description", &meta.description)?;
    set_meta(document, "property", "og:type", "website")?;
    set_meta(document, "property", "og:site_name", &meta.site_name)?;
    set_meta(document, "property", "og:title", &meta.title)?;
    set_meta(document, "property", "og:description", &meta.description)?;
    set_meta(document, "property", "og:url", &meta.canonical)?;
    set_meta(document, "property", "og:image", &meta.image)?;
    set_meta(document, "property", "og:locale", meta.locale)?;
    set_meta(document, "name", "twitter:card", "summary_large_image")?;
    set_meta(document, "name", "twitter:title", &meta.title)?;
    set_meta(document, "name", "twitter:description", &meta.description)?;
    set_meta(document, "name", "twitter:image", &meta.image)?;

    set_link(document, "link[rel=\"canonical\"]", &[("rel", "canonical")], &meta.canonical)?;
    for alternate in &meta.alternates {
        let selector = format!(
            "link[rel=\"alternate\"][hreflang=\"{}\"]",
            alternate.hreflang
        );
        set_link(
            document,
            &selector,
            &[("rel", "alternate"), ("hreflang", alternate.hreflang)],
            &alternate.href,
        )?;
    }
    Ok(())
}

fn head_element(
    document: &Document,
    selector: &str,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<Element, JsValue> {
    if let Some(existing) = document.query_selector(selector)? {
        return Ok(existing);
    }
    let element = document.create_element(tag)?;
    for (name, value) in attrs {
        element.set_attribute(name, value)?;
    }
    match document.head() {
        Some(head) => {
            head.append_child(&element)?;
        }
        None => log::warn!("Document has no <head>; {} not attached", selector),
    }
    Ok(element)
}

fn set_meta(document: &Document, attr: &str, key: &str, content: &str) -> Result<(), JsValue> {
    let selector = format!("meta[{}=\"{}\"]", attr, key);
    let element = head_element(document, &selector, "meta", &[(attr, key)])?;
    element.set_attribute("content", content)
}

fn set_link(
    document: &Document,
    selector: &str,
    attrs: &[(&str, &str)],
    href: &str,
) -> Result<(), JsValue> {
    let element = head_element(document, selector, "link", attrs)?;
    element.set_attribute("href", href)
}
