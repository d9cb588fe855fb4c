// src/config.rs
use crate::i18n::Lang;
use serde::Deserialize;

/// Site-wide settings. Every field has a default so a partial override
/// document deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub data_url: String,
    pub site_name: String,
    /// Absolute URL of the deployment root, always ending in `/`.
    pub site_url: String,
    pub default_slug: String,
    pub default_lang: Lang,
    pub default_image: String,
    pub settle_ms: u32,
    pub description_max: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_url: String::from("data.json"),
            site_name: String::from("Portfolio"),
            site_url: String::from("http://localhost/"),
            default_slug: String::from("about"),
            default_lang: Lang::Cat,
            default_image: String::from("img/og-default.jpg"),
            settle_ms: 300,
            description_max: 160,
        }
    }
}

impl SiteConfig {
    /// Point the config at the origin/base path the page is actually served from.
    pub fn with_site_url(mut self, origin: &str, base_path: &str) -> Self {
        self.site_url = join_site_url(origin, base_path);
        self
    }

    pub fn is_default_slug(&self, slug: &str) -> bool {
        self.default_slug == slug
    }
}

fn join_site_url(origin: &str, base_path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let base = base_path.trim_matches('/');
    if base.is_empty() {
        format!("{}/", origin)
    } else {
        format!("{}/{}/", origin, base)
    }
}
