// src/render.rs
//
// Projection of (cursor, content) onto a presentation surface. The surface is
// a capability trait so the same projection drives the yew view and the tests.

use crate::config::SiteConfig;
use crate::content::{ContentStore, Link};
use crate::cursor::Cursor;
use crate::i18n::Lang;
use crate::links::{self, LinkTarget};
use crate::rich_text::{self, Paragraph};
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkView {
    pub text: String,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub project: usize,
    pub src: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThumbGrid {
    pub columns: usize,
    pub items: Vec<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub index: usize,
    pub title: String,
    pub group: u8,
    /// Set on the first item of a run whose group differs from the previous item.
    pub gap_before: bool,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    pub items: Vec<NavItem>,
    pub active: usize,
    pub lang: Lang,
}

pub trait Surface {
    /// `None` hides the image block entirely.
    fn set_image(&mut self, image: Option<ImageView>);
    /// An empty list hides the text block.
    fn set_text(&mut self, paragraphs: Vec<Paragraph>);
    fn set_links(&mut self, links: Vec<LinkView>);
    fn set_footer(&mut self, footer: Option<LinkView>);
    fn set_thumbnails(&mut self, grid: Option<ThumbGrid>);
    fn set_nav(&mut self, nav: NavState);
    fn set_fading(&mut self, fading: bool);
    /// Ask the presentation side to re-measure layout (centering, nav indicator).
    fn request_measure(&mut self);
}

pub struct Renderer<'a> {
    store: &'a ContentStore,
    config: &'a SiteConfig,
    site: &'a Url,
}

impl<'a> Renderer<'a> {
    pub fn new(store: &'a ContentStore, config: &'a SiteConfig, site: &'a Url) -> Self {
        Self {
            store,
            config,
            site,
        }
    }

    /// Push the slide under `cursor` to `surface`. Returns the image shown, if any.
    pub fn render<S: Surface + ?Sized>(&self, cursor: &Cursor, surface: &mut S) -> Option<ImageView> {
        let lang = cursor.lang();
        let Some(project) = self.store.project(cursor.project()) else {
            log::error!("Cursor points past the last project ({})", cursor.project());
            return None;
        };
        let Some(slide) = project.slides.get(cursor.slide()) else {
            log::error!(
                "Cursor points past the last slide of `{}` ({})",
                project.slug,
                cursor.slide()
            );
            return None;
        };

        let image = slide.image().map(|src| ImageView {
            src: src.to_string(),
            alt: project.title(lang),
        });
        surface.set_image(image.clone());

        let paragraphs = slide
            .paragraphs(lang)
            .iter()
            .map(|p| rich_text::parse(p, self.site))
            .filter(|p| !p.is_empty())
            .collect();
        surface.set_text(paragraphs);

        let links = slide
            .links()
            .iter()
            .filter_map(|link| self.link_view(link, lang))
            .collect();
        surface.set_links(links);

        surface.set_footer(slide.footer().and_then(|f| self.link_view(f, lang)));
        surface.set_thumbnails(self.thumbnails(&project.slug, lang));
        surface.set_nav(self.nav(cursor));
        surface.request_measure();

        image
    }

    fn link_view(&self, link: &Link, lang: Lang) -> Option<LinkView> {
        let target = links::sanitize_or_warn(&link.url, self.site)?;
        let text = link.text(lang);
        let text = if text.is_empty() {
            target.href.clone()
        } else {
            text
        };
        Some(LinkView { text, target })
    }

    /// Cover images of every other project, shown only on the default project.
    pub fn thumbnails(&self, slug: &str, lang: Lang) -> Option<ThumbGrid> {
        if !self.config.is_default_slug(slug) {
            return None;
        }
        let others: Vec<_> = self
            .store
            .projects()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.slug != slug)
            .collect();
        let columns = others.len().div_ceil(2).max(1);
        let items: Vec<Thumbnail> = others
            .into_iter()
            .filter_map(|(index, p)| {
                p.cover_image().map(|src| Thumbnail {
                    project: index,
                    src: src.to_string(),
                    label: p.title(lang),
                })
            })
            .collect();

        (!items.is_empty()).then_some(ThumbGrid { columns, items })
    }

    pub fn nav(&self, cursor: &Cursor) -> NavState {
        let mut previous_group = None;
        let items = self
            .store
            .projects()
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let group = p.group();
                let gap_before = previous_group.is_some_and(|g| g != group);
                previous_group = Some(group);
                NavItem {
                    index,
                    title: p.title(cursor.lang()),
                    group,
                    gap_before,
                    active: index == cursor.project(),
                }
            })
            .collect();
        NavState {
            items,
            active: cursor.project(),
            lang: cursor.lang(),
        }
    }
}

/// Retained presentation state: what is on screen right now. The yew view
/// draws from it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stage {
    pub image: Option<ImageView>,
    pub paragraphs: Vec<Paragraph>,
    pub links: Vec<LinkView>,
    pub footer: Option<LinkView>,
    pub thumbnails: Option<ThumbGrid>,
    pub nav: Option<NavState>,
    pub fading: bool,
    /// Content fits without scrolling, so it is centred vertically.
    pub centered: bool,
    pub measure_pending: bool,
    /// Bumped by every render, so the nav re-centres its active item even
    /// when the project stays the same.
    pub revision: u64,
}

impl Surface for Stage {
    fn set_image(&mut self, image: Option<ImageView>) {
        self.image = image;
    }

    fn set_text(&mut self, paragraphs: Vec<Paragraph>) {
        self.paragraphs = paragraphs;
    }

    fn set_links(&mut self, links: Vec<LinkView>) {
        self.links = links;
    }

    fn set_footer(&mut self, footer: Option<LinkView>) {
        self.footer = footer;
    }

    fn set_thumbnails(&mut self, grid: Option<ThumbGrid>) {
        self.thumbnails = grid;
    }

    fn set_nav(&mut self, nav: NavState) {
        self.nav = Some(nav);
    }

    fn set_fading(&mut self, fading: bool) {
        self.fading = fading;
    }

    fn request_measure(&mut self) {
        self.measure_pending = true;
        self.revision += 1;
    }
}

impl Stage {
    /// Record a layout measurement. Returns whether the centering flag changed.
    pub fn measured(&mut self, content_height: f64, container_height: f64) -> bool {
        self.measure_pending = false;
        let fits = content_height < container_height;
        let changed = fits != self.centered;
        self.centered = fits;
        changed
    }
}
