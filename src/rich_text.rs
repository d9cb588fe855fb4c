// src/rich_text.rs
//
// Paragraph markup. Only anchors, emphasis, strong and line breaks survive;
// every other element is unwrapped so its text still shows.

use crate::links::{self, LinkTarget};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Link {
        target: LinkTarget,
        children: Vec<Inline>,
    },
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    LineBreak,
}

pub type Paragraph = Vec<Inline>;

enum Frame {
    /// `block` elements still separate the words on either side.
    Unwrapped { block: bool },
    Link(Option<LinkTarget>),
    Emphasis,
    Strong,
}

/// Parse one paragraph of restricted inline markup. Anchors are validated
/// against `site`; a rejected anchor is unwrapped like an unknown tag.
/// Markup the reader cannot make sense of degrades to its plain text.
pub fn parse(html: &str, site: &Url) -> Paragraph {
    if !html.contains('<') && !html.contains('&') {
        return vec![Inline::Text(html.to_string())];
    }

    let source = format!("<p>{}</p>", normalize_markup(html));
    let mut reader = Reader::from_str(&source);
    reader.check_end_names(false);

    let mut root: Vec<Inline> = Vec::new();
    let mut stack: Vec<(Frame, Vec<Inline>)> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = tag_name(e);
                let frame = match name.as_str() {
                    "a" => Frame::Link(href(e).and_then(|h| links::sanitize_or_warn(&h, site))),
                    "em" | "i" => Frame::Emphasis,
                    "strong" | "b" => Frame::Strong,
                    _ => Frame::Unwrapped { block: is_block(&name) },
                };
                if matches!(frame, Frame::Unwrapped { block: true }) {
                    separate(stack.last_mut().map_or(&mut root, |(_, c)| c));
                }
                stack.push((frame, Vec::new()));
            }
            Ok(Event::End(_)) => {
                if let Some((frame, children)) = stack.pop() {
                    let parent = stack.last_mut().map_or(&mut root, |(_, c)| c);
                    close(frame, children, parent);
                }
            }
            Ok(Event::Empty(ref e)) => {
                if tag_name(e) == "br" {
                    let parent = stack.last_mut().map_or(&mut root, |(_, c)| c);
                    parent.push(Inline::LineBreak);
                }
            }
            Ok(Event::Text(ref t)) => {
                let parent = stack.last_mut().map_or(&mut root, |(_, c)| c);
                push_text(parent, &unescape(t));
            }
            Ok(Event::CData(ref c)) => {
                let parent = stack.last_mut().map_or(&mut root, |(_, c)| c);
                push_text(parent, &String::from_utf8_lossy(c));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                log::debug!("Falling back to plain text for paragraph: {}", e);
                return vec![Inline::Text(strip_tags(html))];
            }
            _ => {}
        }
    }

    // Unclosed elements at the end of input
    while let Some((frame, children)) = stack.pop() {
        let parent = stack.last_mut().map_or(&mut root, |(_, c)| c);
        close(frame, children, parent);
    }
    trim_edges(&mut root);
    root
}

fn close(frame: Frame, children: Vec<Inline>, parent: &mut Vec<Inline>) {
    match frame {
        Frame::Link(Some(target)) => parent.push(Inline::Link { target, children }),
        Frame::Emphasis => parent.push(Inline::Emphasis(children)),
        Frame::Strong => parent.push(Inline::Strong(children)),
        Frame::Link(None) | Frame::Unwrapped { .. } => {
            for child in children {
                match child {
                    Inline::Text(text) => push_text(parent, &text),
                    other => parent.push(other),
                }
            }
            if let Frame::Unwrapped { block: true } = frame {
                separate(parent);
            }
        }
    }
}

fn push_text(nodes: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Inline::Text(text.to_string()));
    }
}

fn is_block(name: &str) -> bool {
    matches!(
        name,
        "p" | "div" | "li" | "ul" | "ol" | "blockquote" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

/// Space between the content before and after a block boundary, unless
/// there is nothing before it or it already ends in whitespace.
fn separate(nodes: &mut Vec<Inline>) {
    let ends_in_space = match nodes.last() {
        None => true,
        Some(Inline::Text(t)) => t.ends_with(char::is_whitespace),
        Some(Inline::LineBreak) => true,
        Some(_) => false,
    };
    if !ends_in_space {
        push_text(nodes, " ");
    }
}

/// Drop the separators left at either end of the paragraph.
fn trim_edges(nodes: &mut Vec<Inline>) {
    if let Some(Inline::Text(last)) = nodes.last_mut() {
        let trimmed = last.trim_end().len();
        last.truncate(trimmed);
        if last.is_empty() {
            nodes.pop();
        }
    }
    if let Some(Inline::Text(first)) = nodes.first_mut() {
        *first = first.trim_start().to_string();
        if first.is_empty() {
            nodes.remove(0);
        }
    }
}

/// Whether `rest`, which starts at a `<`, opens a tag rather than being a
/// literal less-than sign in the prose.
fn opens_tag(rest: &str) -> bool {
    let mut chars = rest.chars().skip(1);
    chars
        .next()
        .is_some_and(|n| n.is_ascii_alphabetic() || n == '/' || n == '!')
        && rest.contains('>')
}

fn tag_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase()
}

fn href(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(b"href"))
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.into_owned()))
}

fn html_entity(name: &str) -> Option<&'static str> {
    match name {
        "nbsp" => Some("\u{a0}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "hellip" => Some("\u{2026}"),
        "laquo" => Some("\u{ab}"),
        "raquo" => Some("\u{bb}"),
        "middot" => Some("\u{b7}"),
        "copy" => Some("\u{a9}"),
        _ => None,
    }
}

fn unescape(t: &BytesText) -> String {
    t.unescape_with(html_entity)
        .map(|c| c.into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(t).into_owned())
}

/// Make HTML-ish input readable as XML: `<br>` gets closed and a `<` that
/// does not open a tag is escaped.
fn normalize_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if !opens_tag(rest) {
            out.push_str("&lt;");
            rest = &rest[1..];
            continue;
        }
        let tag_end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        let inner = tag
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim_end_matches('/')
            .trim();
        if inner.eq_ignore_ascii_case("br") {
            out.push_str("<br/>");
        } else {
            out.push_str(tag);
        }
        rest = &rest[tag_end..];
    }
    out.push_str(rest);
    out
}

/// Plain text of a markup fragment: tags removed, common entities decoded.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(pos) = rest.find('<') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if !opens_tag(rest) {
            out.push('<');
            rest = &rest[1..];
            continue;
        }
        let tag_end = rest.find('>').map_or(rest.len(), |i| i + 1);
        let name = rest[1..tag_end]
            .trim_start_matches('/')
            .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        // line breaks and block boundaries still separate words
        if (name == "br" || is_block(&name)) && !out.is_empty() && !out.ends_with(char::is_whitespace) {
            out.push(' ');
        }
        rest = &rest[tag_end..];
    }
    out.push_str(rest);
    decode_entities(out.trim_end())
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let decoded = rest.find(';').and_then(|end| {
            let name = &rest[1..end];
            let value = match name {
                "amp" => Some("&"),
                "lt" => Some("<"),
                "gt" => Some(">"),
                "quot" => Some("\""),
                "apos" | "#39" => Some("'"),
                other => html_entity(other),
            };
            value.map(|v| (v, end + 1))
        });
        match decoded {
            Some((value, consumed)) => {
                out.push_str(value);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Concatenated visible text of a parsed paragraph.
#[cfg(test)]
pub fn plain_text(nodes: &[Inline]) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Inline::Text(t) => out.push_str(t),
            Inline::LineBreak => out.push(' '),
            Inline::Link { children, .. } | Inline::Emphasis(children) | Inline::Strong(children) => {
                out.push_str(&plain_text(children))
            }
        }
    }
    out
}
