// src/seo.rs
//
// Address bar and document metadata, both derived from the cursor. Nothing
// here is independently settable.

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::cursor::Cursor;
use crate::i18n::Lang;
use crate::rich_text;
use url::form_urlencoded;
use url::Url;

const ELLIPSIS: char = '\u{2026}';

/// Narrow view of the browser location/history.
pub trait AddressBar {
    /// Current query string, `""` or starting with `?`.
    fn search(&self) -> String;
    /// Replace the query in place, without adding a history entry.
    fn replace_search(&mut self, query: &str);
}

pub trait DocumentHead {
    fn apply(&mut self, meta: &PageMeta);
}

/// Start position requested by the address bar. Unknown values are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartState {
    pub project: Option<usize>,
    pub lang: Option<Lang>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Alternate {
    pub hreflang: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub lang: &'static str,
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub alternates: Vec<Alternate>,
    pub image: String,
    pub locale: &'static str,
    pub site_name: String,
}

pub fn parse_query(search: &str, store: &ContentStore) -> StartState {
    let query = search.trim_start_matches('?');
    let first = |key: &str| {
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };

    let project = first("slug").and_then(|slug| {
        let index = store.index_of(&slug);
        if index.is_none() {
            log::debug!("Ignoring unknown slug `{}` in address bar", slug);
        }
        index
    });
    let lang = first("lang").and_then(|code| Lang::parse(&code));
    StartState { project, lang }
}

/// Query for a (project, language) pair: the default project and the default
/// language are left implicit.
pub fn query_for(slug: &str, lang: Lang, config: &SiteConfig) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !config.is_default_slug(slug) {
        serializer.append_pair("slug", slug);
    }
    if lang != config.default_lang {
        serializer.append_pair("lang", lang.code());
    }
    let query = serializer.finish();
    if query.is_empty() {
        query
    } else {
        format!("?{}", query)
    }
}

pub fn canonical_query(store: &ContentStore, cursor: &Cursor, config: &SiteConfig) -> String {
    match store.project(cursor.project()) {
        Some(project) => query_for(&project.slug, cursor.lang(), config),
        None => String::new(),
    }
}

/// Rewrite the address bar only when it differs from `query`.
pub fn sync_address<A: AddressBar + ?Sized>(bar: &mut A, query: &str) -> bool {
    if bar.search() == query {
        return false;
    }
    bar.replace_search(query);
    true
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shorten `text` to at most `max` characters, cutting at a word boundary
/// and ending in an ellipsis.
pub fn truncate_description(text: &str, max: usize) -> String {
    let text = collapse_whitespace(text);
    if text.chars().count() <= max {
        return text;
    }

    let budget = max.saturating_sub(1);
    let head: String = text.chars().take(budget).collect();
    let at_boundary = text.chars().nth(budget).map_or(true, char::is_whitespace);
    let head = if at_boundary {
        head.as_str()
    } else {
        // a single word longer than the budget gets cut mid-word
        head.rfind(' ').map_or(head.as_str(), |i| &head[..i])
    };
    let head = head.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '.' | '-'));

    let mut out = String::with_capacity(head.len() + ELLIPSIS.len_utf8());
    out.push_str(head);
    out.push(ELLIPSIS);
    out
}

fn absolute(site: &Url, path: &str) -> Option<String> {
    site.join(path).ok().map(String::from)
}

impl PageMeta {
    pub fn derive(store: &ContentStore, cursor: &Cursor, config: &SiteConfig, site: &Url) -> Option<Self> {
        let project = store.project(cursor.project())?;
        let lang = cursor.lang();
        let project_title = project.title(lang);

        let title = if config.is_default_slug(&project.slug) {
            config.site_name.clone()
        } else {
            format!("{} \u{b7} {}", project_title, config.site_name)
        };

        let description = project
            .slides
            .iter()
            .flat_map(|s| s.paragraphs(lang))
            .map(|p| collapse_whitespace(&rich_text::strip_tags(&p)))
            .find(|p| !p.is_empty())
            .map(|p| truncate_description(&p, config.description_max))
            .unwrap_or(project_title);

        let page_url = |l: Lang| format!("{}{}", site, query_for(&project.slug, l, config));
        let mut alternates: Vec<Alternate> = Lang::ALL
            .iter()
            .map(|&l| Alternate {
                hreflang: l.hreflang(),
                href: page_url(l),
            })
            .collect();
        alternates.push(Alternate {
            hreflang: "x-default",
            href: page_url(config.default_lang),
        });

        let image = store
            .slide(cursor.project(), cursor.slide())
            .and_then(|s| s.image())
            .and_then(|img| absolute(site, img))
            .or_else(|| absolute(site, &config.default_image))
            .unwrap_or_else(|| config.default_image.clone());

        Some(Self {
            lang: lang.hreflang(),
            title,
            description,
            canonical: page_url(lang),
            alternates,
            image,
            locale: lang.locale(),
            site_name: config.site_name.clone(),
        })
    }
}

/// Mirror the cursor into the address bar and the document head.
pub fn sync<A, H>(store: &ContentStore, cursor: &Cursor, config: &SiteConfig, site: &Url, bar: &mut A, head: &mut H)
where
    A: AddressBar + ?Sized,
    H: DocumentHead + ?Sized,
{
    if let Some(meta) = PageMeta::derive(store, cursor, config, site) {
        head.apply(&meta);
    }
    sync_address(bar, &canonical_query(store, cursor, config));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::tests::sample_store;

    #[derive(Default)]
    pub(crate) struct FakeBar {
        pub search: String,
        pub replaced: Vec<String>,
    }

    impl AddressBar for FakeBar {
        fn search(&self) -> String {
            self.search.clone()
        }

        fn replace_search(&mut self, query: &str) {
            self.search = query.to_string();
            self.replaced.push(query.to_string());
        }
    }

    #[derive(Default)]
    pub(crate) struct FakeHead {
        pub applied: Vec<PageMeta>,
    }

    impl DocumentHead for FakeHead {
        fn apply(&mut self, meta: &PageMeta) {
            self.applied.push(meta.clone());
        }
    }

    fn site() -> Url {
        Url::parse("https://folio.example/").unwrap()
    }

    fn cursor_at(project: usize, lang: Lang) -> Cursor {
        let mut cursor = Cursor::new(Lang::Cat);
        cursor.seed(Some(project), Some(lang), &sample_store());
        cursor
    }

    #[test]
    fn test_parse_query() {
        let store = sample_store();
        assert_eq!(
            parse_query("?slug=p1&lang=en", &store),
            StartState {
                project: Some(1),
                lang: Some(Lang::En)
            }
        );
        assert_eq!(parse_query("", &store), StartState::default());
        assert_eq!(
            parse_query("?slug=missing&lang=fr", &store),
            StartState::default()
        );
        assert_eq!(parse_query("lang=cat", &store).lang, Some(Lang::Cat));
        // first occurrence wins, like URLSearchParams.get
        assert_eq!(parse_query("?slug=nope&slug=p2", &store).project, None);
    }

    #[test]
    fn test_query_for() {
        let config = SiteConfig::default();
        assert_eq!(query_for("about", Lang::Cat, &config), "");
        assert_eq!(query_for("about", Lang::En, &config), "?lang=en");
        assert_eq!(query_for("p1", Lang::Cat, &config), "?slug=p1");
        assert_eq!(query_for("p1", Lang::En, &config), "?slug=p1&lang=en");
        assert_eq!(query_for("a b", Lang::Cat, &config), "?slug=a+b");
    }

    #[test]
    fn test_sync_address_only_on_change() {
        let mut bar = FakeBar {
            search: "?slug=p1".into(),
            ..Default::default()
        };
        assert!(!sync_address(&mut bar, "?slug=p1"));
        assert!(bar.replaced.is_empty());
        assert!(sync_address(&mut bar, ""));
        assert_eq!(bar.replaced, vec![String::new()]);
    }

    #[test]
    fn test_truncate_on_word_boundary() {
        let words = ["lorem", "ipsum", "dolor", "sit", "amet", "consectetur"];
        let mut paragraph = String::new();
        let mut i = 0;
        while paragraph.chars().count() < 200 {
            if !paragraph.is_empty() {
                paragraph.push(' ');
            }
            paragraph.push_str(words[i % words.len()]);
            i += 1;
        }
        let paragraph: String = paragraph.chars().take(200).collect();
        assert_eq!(paragraph.chars().count(), 200);

        let out = truncate_description(&paragraph, 160);
        assert!(out.chars().count() <= 160);
        assert!(out.ends_with(ELLIPSIS));

        let kept = out.trim_end_matches(ELLIPSIS);
        assert!(paragraph.starts_with(kept));
        let next = paragraph[kept.len()..].chars().next();
        assert_eq!(next, Some(' '));
    }

    #[test]
    fn test_truncate_short_and_long_word() {
        assert_eq!(truncate_description("  short   text ", 160), "short text");
        let long = "x".repeat(50);
        let out = truncate_description(&long, 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_page_meta_for_project() {
        let store = sample_store();
        let config = SiteConfig::default();
        let meta = PageMeta::derive(&store, &cursor_at(1, Lang::En), &config, &site()).unwrap();
        assert_eq!(meta.lang, "en");
        assert_eq!(meta.title, "Posters \u{b7} Portfolio");
        // p1 has no English text; the Catalan paragraph is used
        assert_eq!(meta.description, "Detall");
        assert_eq!(meta.canonical, "https://folio.example/?slug=p1&lang=en");
        assert_eq!(meta.image, "https://folio.example/img/p1-a.jpg");
        assert_eq!(meta.locale, "en_GB");
        let hreflangs: Vec<&str> = meta.alternates.iter().map(|a| a.hreflang).collect();
        assert_eq!(hreflangs, vec!["ca", "en", "x-default"]);
        assert_eq!(meta.alternates[0].href, "https://folio.example/?slug=p1");
    }

    #[test]
    fn test_page_meta_for_default_project() {
        let store = sample_store();
        let config = SiteConfig::default();
        let meta = PageMeta::derive(&store, &cursor_at(0, Lang::Cat), &config, &site()).unwrap();
        assert_eq!(meta.title, "Portfolio");
        assert_eq!(meta.description, "Hola, soc dissenyadora.");
        assert_eq!(meta.canonical, "https://folio.example/");
        assert_eq!(meta.image, "https://folio.example/img/og-default.jpg");
    }

    #[test]
    fn test_sync() {
        let store = sample_store();
        let config = SiteConfig::default();
        let mut bar = FakeBar::default();
        let mut head = FakeHead::default();
        sync(&store, &cursor_at(2, Lang::Cat), &config, &site(), &mut bar, &mut head);
        assert_eq!(bar.replaced, vec!["?slug=p2".to_string()]);
        assert_eq!(head.applied.len(), 1);
        assert_eq!(head.applied[0].description, "Only english");

        sync(&store, &cursor_at(2, Lang::Cat), &config, &site(), &mut bar, &mut head);
        assert_eq!(bar.replaced.len(), 1);
    }
}
