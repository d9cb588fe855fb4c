// src/links.rs
use url::{ParseError, Url};

const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

/// A destination that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTarget {
    pub href: String,
    /// Open in a new browsing context without an opener reference.
    pub new_context: bool,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnsafeLink {
    #[error("empty url")]
    Empty,
    #[error("scheme `{0}` is not allowed")]
    Scheme(String),
    #[error("unparsable url: {0}")]
    Invalid(ParseError),
}

impl LinkTarget {
    pub fn target(&self) -> Option<&'static str> {
        self.new_context.then_some("_blank")
    }

    pub fn rel(&self) -> Option<&'static str> {
        self.new_context.then_some("noopener noreferrer")
    }
}

/// Validate a link destination against the scheme allowlist. Relative
/// references are resolved against `site`: same-origin ones stay as written,
/// anything landing on another origin is treated as external.
pub fn sanitize(raw: &str, site: &Url) -> Result<LinkTarget, UnsafeLink> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UnsafeLink::Empty);
    }

    match Url::parse(raw) {
        Ok(url) => absolute(url),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let resolved = site.join(raw).map_err(UnsafeLink::Invalid)?;
            if resolved.origin() == site.origin() {
                Ok(LinkTarget {
                    href: raw.to_string(),
                    new_context: false,
                })
            } else {
                absolute(resolved)
            }
        }
        Err(e) => Err(UnsafeLink::Invalid(e)),
    }
}

fn absolute(url: Url) -> Result<LinkTarget, UnsafeLink> {
    let scheme = url.scheme();
    if !ALLOWED_SCHEMES.contains(&scheme) {
        return Err(UnsafeLink::Scheme(scheme.to_string()));
    }
    Ok(LinkTarget {
        new_context: matches!(scheme, "http" | "https"),
        href: url.into(),
    })
}

/// Like [`sanitize`], logging and discarding rejected links.
pub fn sanitize_or_warn(raw: &str, site: &Url) -> Option<LinkTarget> {
    match sanitize(raw, site) {
        Ok(target) => Some(target),
        Err(e) => {
            log::warn!("Dropping link `{}`: {}", raw, e);
            None
        }
    }
}
