// src/content.rs
//
// The project -> slides document. Loaded once at startup, read-only after.

use crate::i18n::{self, Lang, Localized};
use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{Map, Value};

const DEFAULT_GROUP: u8 = 2;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: gloo_net::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("invalid content document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid slides for project `{slug}`: {source}")]
    Project {
        slug: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("content document has no project with slides")]
    NoProjects,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub url: String,
    /// `text_<lang>` variants and the legacy `text`.
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Slide {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    links: Option<Vec<Link>>,
    #[serde(default)]
    footer: Option<Link>,
    #[serde(default)]
    group: Option<Value>,
    /// `title_*` / `text_*` variants and their legacy bare forms.
    #[serde(flatten)]
    fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub slug: String,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentStore {
    projects: Vec<Project>,
}

impl Localized for Link {
    fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl Localized for Slide {
    fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl Link {
    pub fn text(&self, lang: Lang) -> String {
        i18n::resolve_text(self, "text", lang).unwrap_or_default()
    }
}

impl Slide {
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    pub fn links(&self) -> &[Link] {
        self.links.as_deref().unwrap_or_default()
    }

    pub fn footer(&self) -> Option<&Link> {
        self.footer.as_ref()
    }

    pub fn title(&self, lang: Lang) -> Option<String> {
        i18n::resolve_text(self, "title", lang)
    }

    pub fn paragraphs(&self, lang: Lang) -> Vec<String> {
        i18n::resolve_paragraphs(self, "text", lang)
    }

    /// Navigation group in 1..=3; anything else counts as the default group.
    pub fn group(&self) -> u8 {
        self.group
            .as_ref()
            .and_then(Value::as_u64)
            .filter(|g| (1..=3).contains(g))
            .map(|g| g as u8)
            .unwrap_or(DEFAULT_GROUP)
    }
}

impl Project {
    fn first(&self) -> Option<&Slide> {
        self.slides.first()
    }

    /// Display title, taken from the first slide and falling back to the slug.
    pub fn title(&self, lang: Lang) -> String {
        self.first()
            .and_then(|s| s.title(lang))
            .unwrap_or_else(|| self.slug.clone())
    }

    pub fn group(&self) -> u8 {
        self.first().map(Slide::group).unwrap_or(DEFAULT_GROUP)
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.first().and_then(Slide::image)
    }
}

impl ContentStore {
    /// Parse the content document. Key order in the document is traversal order.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let document: Map<String, Value> = serde_json::from_str(json)?;
        let mut projects = Vec::with_capacity(document.len());

        for (slug, value) in document {
            let slides: Vec<Slide> = serde_json::from_value(value).map_err(|source| {
                LoadError::Project {
                    slug: slug.clone(),
                    source,
                }
            })?;
            if slides.is_empty() {
                log::warn!("Skipping project `{}`: it has no slides", slug);
                continue;
            }
            projects.push(Project { slug, slides });
        }

        if projects.is_empty() {
            return Err(LoadError::NoProjects);
        }
        Ok(Self { projects })
    }

    /// Fetch and parse the content document. There is no retry path.
    pub async fn load(url: &str) -> Result<Self, LoadError> {
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|source| LoadError::Network {
                url: url.to_string(),
                source,
            })?;
        if !resp.ok() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }
        let body = resp.text().await.map_err(|source| LoadError::Network {
            url: url.to_string(),
            source,
        })?;

        let store = Self::from_json(&body)?;
        log::info!("Loaded {} projects from {}", store.len(), url);
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    pub fn project_slugs(&self) -> impl Iterator<Item = &str> + '_ {
        self.projects.iter().map(|p| p.slug.as_str())
    }

    pub fn slides(&self, slug: &str) -> Option<&[Slide]> {
        self.projects
            .iter()
            .find(|p| p.slug == slug)
            .map(|p| p.slides.as_slice())
    }

    pub fn index_of(&self, slug: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.slug == slug)
    }

    pub fn slide_count(&self, index: usize) -> usize {
        self.project(index).map_or(0, |p| p.slides.len())
    }

    pub fn slide(&self, project: usize, slide: usize) -> Option<&Slide> {
        self.project(project).and_then(|p| p.slides.get(slide))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "about": [
            {
                "title_cat": "Sobre mi",
                "title_en": "About",
                "text_cat": ["Hola, soc <em>dissenyadora</em>.", "Segon paràgraf"],
                "text_en": "Hi, I am a <b>designer</b>.",
                "links": [
                    {"url": "mailto:hola@example.org", "text": "Email"},
                    {"url": "javascript:alert(1)", "text_en": "Bad"}
                ],
                "footer": {"url": "https://studio.example", "text": "web by studio"}
            }
        ],
        "p1": [
            {"image": "img/p1-a.jpg", "title_cat": "Cartells", "title_en": "Posters", "group": 1},
            {"image": "img/p1-b.jpg", "text_cat": "Detall"}
        ],
        "empty": [],
        "p2": [
            {"title_en": "Books", "group": 7, "text_en": "Only english"},
            {"image": "img/p2-b.jpg"},
            {"image": "img/p2-c.jpg", "links": [{"url": "?slug=about", "text_cat": "Tornar"}]}
        ]
    }"#;

    pub(crate) fn sample_store() -> ContentStore {
        ContentStore::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_declaration_order_kept() {
        let store = sample_store();
        let slugs: Vec<&str> = store.project_slugs().collect();
        assert_eq!(slugs, vec!["about", "p1", "p2"]);
        assert_eq!(store.index_of("p2"), Some(2));
        assert_eq!(store.index_of("nope"), None);
    }

    #[test]
    fn test_empty_project_skipped() {
        let store = sample_store();
        assert!(store.slides("empty").is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_only_empty_projects_fails() {
        let err = ContentStore::from_json(r#"{"a": [], "b": []}"#).unwrap_err();
        assert!(matches!(err, LoadError::NoProjects));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(
            ContentStore::from_json("not json"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            ContentStore::from_json("[1, 2]"),
            Err(LoadError::Parse(_))
        ));
        match ContentStore::from_json(r#"{"p": "oops"}"#) {
            Err(LoadError::Project { slug, .. }) => assert_eq!(slug, "p"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_slide_lookups() {
        let store = sample_store();
        assert_eq!(store.slide_count(2), 3);
        assert_eq!(store.slide_count(9), 0);
        let slides = store.slides("p1").unwrap();
        assert_eq!(slides[0].image(), Some("img/p1-a.jpg"));
        assert_eq!(store.slide(0, 0).and_then(Slide::image), None);
        assert_eq!(store.slide(0, 0).unwrap().links().len(), 2);
        assert!(store.slide(1, 1).unwrap().links().is_empty());
        assert!(store.slide(0, 0).unwrap().footer().is_some());
    }

    #[test]
    fn test_project_title_and_group() {
        let store = sample_store();
        let p1 = store.project(1).unwrap();
        assert_eq!(p1.title(Lang::En), "Posters");
        assert_eq!(p1.title(Lang::Cat), "Cartells");
        assert_eq!(p1.group(), 1);

        let p2 = store.project(2).unwrap();
        assert_eq!(p2.title(Lang::Cat), "Books");
        // out of range falls back to the default group
        assert_eq!(p2.group(), 2);
        assert_eq!(p2.cover_image(), None);

        let bare = ContentStore::from_json(r#"{"untitled": [{}]}"#).unwrap();
        assert_eq!(bare.project(0).unwrap().title(Lang::En), "untitled");
    }

    #[test]
    fn test_link_text() {
        let store = sample_store();
        let links = store.slide(0, 0).unwrap().links();
        assert_eq!(links[0].text(Lang::Cat), "Email");
        assert_eq!(links[1].text(Lang::Cat), "Bad");
    }
}
