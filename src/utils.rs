// src/utils.rs
use web_sys::window;

/// Get the base path the application is served from, without a trailing
/// slash. Works for a root deployment as well as a sub-directory one.
pub fn get_base_url() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .map(|pathname| base_from_pathname(&pathname))
        .unwrap_or_default()
}

/// Origin of the current page, e.g. `https://example.org`.
pub fn get_origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Directory part of a page pathname: `/folio/index.html` and `/folio/`
/// both give `/folio`.
pub fn base_from_pathname(pathname: &str) -> String {
    match pathname.rfind('/') {
        Some(i) => pathname[..i].to_string(),
        None => String::new(),
    }
}

/// Build a resource URL with the correct base path
pub fn resource_url(path: &str) -> String {
    join_base(&get_base_url(), path)
}

fn join_base(base: &str, path: &str) -> String {
    let clean_path = path.trim_start_matches('/');

    if base.is_empty() {
        format!("/{}", clean_path)
    } else {
        format!("{}/{}", base, clean_path)
    }
}
