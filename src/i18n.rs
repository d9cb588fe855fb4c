// src/i18n.rs
//
// Language handling: the `<prefix>_<lang>` field lookup shared by slide
// titles, body text and link text, plus the static UI labels.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    Cat,
    En,
}

/// Languages consulted, in order, when the active one has no content.
pub const FALLBACK_ORDER: [Lang; 2] = [Lang::Cat, Lang::En];

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::Cat, Lang::En];

    /// Code used in data field suffixes and in the `lang` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Cat => "cat",
            Lang::En => "en",
        }
    }

    /// BCP 47 tag for `<html lang>` and `hreflang`.
    pub fn hreflang(self) -> &'static str {
        match self {
            Lang::Cat => "ca",
            Lang::En => "en",
        }
    }

    pub fn locale(self) -> &'static str {
        match self {
            Lang::Cat => "ca_ES",
            Lang::En => "en_GB",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Lang::Cat => "CA",
            Lang::En => "EN",
        }
    }

    pub fn parse(code: &str) -> Option<Lang> {
        Lang::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Anything carrying loosely-typed, string-keyed localized fields.
pub trait Localized {
    fn field(&self, key: &str) -> Option<&Value>;
}

fn has_content(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// Walk the fallback chain for `prefix`: the active language, then each of
/// `fallbacks`, then the bare legacy field. Empty values are skipped.
pub fn resolve<'a, R>(record: &'a R, prefix: &str, lang: Lang, fallbacks: &[Lang]) -> Option<&'a Value>
where
    R: Localized + ?Sized,
{
    std::iter::once(lang)
        .chain(fallbacks.iter().copied())
        .map(|l| format!("{}_{}", prefix, l.code()))
        .chain(std::iter::once(prefix.to_string()))
        .find_map(|key| record.field(&key).filter(|v| has_content(v)))
}

/// Resolve a single display string; arrays are joined with spaces.
pub fn resolve_text<R>(record: &R, prefix: &str, lang: Lang) -> Option<String>
where
    R: Localized + ?Sized,
{
    match resolve(record, prefix, lang, &FALLBACK_ORDER)? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            (!joined.is_empty()).then_some(joined)
        }
        _ => None,
    }
}

/// Resolve body text as an ordered list of paragraphs. A single string
/// becomes a one-element list; a missing field yields no paragraphs.
pub fn resolve_paragraphs<R>(record: &R, prefix: &str, lang: Lang) -> Vec<String>
where
    R: Localized + ?Sized,
{
    match resolve(record, prefix, lang, &FALLBACK_ORDER) {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Fixed interface strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Previous,
    Next,
    Loading,
    LoadFailed,
    CloseZoom,
    Projects,
}

impl Label {
    pub fn text(self, lang: Lang) -> &'static str {
        match lang {
            Lang::Cat => self.catalan(),
            Lang::En => self.english(),
        }
    }

    fn english(self) -> &'static str {
        match self {
            Label::Previous => "Previous",
            Label::Next => "Next",
            Label::Loading => "Loading...",
            Label::LoadFailed => "The content could not be loaded.",
            Label::CloseZoom => "Close",
            Label::Projects => "Projects",
        }
    }

    fn catalan(self) -> &'static str {
        match self {
            Label::Previous => "Anterior",
            Label::Next => "Següent",
            Label::Loading => "Carregant...",
            Label::LoadFailed => "No s'ha pogut carregar el contingut.",
            Label::CloseZoom => "Tancar",
            Label::Projects => "Projectes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    struct Record(Map<String, Value>);

    impl Localized for Record {
        fn field(&self, key: &str) -> Option<&Value> {
            self.0.get(key)
        }
    }

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => Record(map),
            _ => panic!("record must be an object"),
        }
    }

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::parse("cat"), Some(Lang::Cat));
        assert_eq!(Lang::parse("en"), Some(Lang::En));
        assert_eq!(Lang::parse("es"), None);
        assert_eq!(Lang::parse("EN"), None);
        assert_eq!(Lang::Cat.hreflang(), "ca");
        assert_eq!(Lang::En.to_string(), "en");
    }

    #[test]
    fn test_active_language_wins() {
        let r = record(json!({"title_cat": "Hola", "title_en": "Hello", "title": "Hi"}));
        assert_eq!(resolve_text(&r, "title", Lang::En).as_deref(), Some("Hello"));
        assert_eq!(resolve_text(&r, "title", Lang::Cat).as_deref(), Some("Hola"));
    }

    #[test]
    fn test_fallback_chain_order() {
        let r = record(json!({"title_cat": "", "title_en": "Hello", "title": "Hi"}));
        assert_eq!(resolve_text(&r, "title", Lang::Cat).as_deref(), Some("Hello"));

        let r = record(json!({"title_cat": "Hola", "title": "Hi"}));
        assert_eq!(resolve_text(&r, "title", Lang::En).as_deref(), Some("Hola"));

        let r = record(json!({"text": "legacy"}));
        assert_eq!(resolve_text(&r, "text", Lang::En).as_deref(), Some("legacy"));
    }

    #[test]
    fn test_resolution_is_total() {
        let candidates = ["title_cat", "title_en", "title"];
        for present in candidates {
            for lang in Lang::ALL {
                let mut map = Map::new();
                map.insert(present.to_string(), json!("x"));
                let r = Record(map);
                assert!(resolve(&r, "title", lang, &FALLBACK_ORDER).is_some());
            }
        }

        let empty = record(json!({"title_cat": "", "title_en": [], "title": null}));
        for lang in Lang::ALL {
            assert!(resolve(&empty, "title", lang, &FALLBACK_ORDER).is_none());
        }
    }

    #[test]
    fn test_custom_fallback_order() {
        let r = record(json!({"title_cat": "Hola", "title_en": "Hello"}));
        let found = resolve(&r, "title", Lang::En, &[Lang::Cat]).and_then(Value::as_str);
        assert_eq!(found, Some("Hello"));
        let r = record(json!({"title_en": "Hello"}));
        assert!(resolve(&r, "title", Lang::Cat, &[]).is_none());
    }

    #[test]
    fn test_paragraph_normalization() {
        let single = record(json!({"text_en": "one"}));
        assert_eq!(resolve_paragraphs(&single, "text", Lang::En), vec!["one"]);

        let many = record(json!({"text_cat": ["a", "b", "c"]}));
        assert_eq!(resolve_paragraphs(&many, "text", Lang::En), vec!["a", "b", "c"]);

        let none = record(json!({"image": "x.jpg"}));
        assert!(resolve_paragraphs(&none, "text", Lang::Cat).is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Label::Next.text(Lang::Cat), "Següent");
        assert_eq!(Label::Next.text(Lang::En), "Next");
    }

    #[test]
    fn test_every_label_translated() {
        let all = [
            Label::Previous,
            Label::Next,
            Label::Loading,
            Label::LoadFailed,
            Label::CloseZoom,
            Label::Projects,
        ];
        for label in all {
            assert_ne!(label.text(Lang::Cat), label.text(Lang::En), "{:?}", label);
        }
    }
}
