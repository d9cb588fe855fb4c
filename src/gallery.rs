// src/gallery.rs
//
// Application state, built once the content has loaded and owned by the root
// component. Commands move the cursor and start a fade; `settle` lands the
// new slide once the fade-out has elapsed.

use crate::config::SiteConfig;
use crate::content::ContentStore;
use crate::cursor::{Cursor, Transition};
use crate::input::Command;
use crate::render::{ImageView, Renderer, Surface};
use crate::seo::{self, AddressBar, DocumentHead};
use url::Url;

pub struct Gallery {
    config: SiteConfig,
    site: Url,
    store: ContentStore,
    cursor: Cursor,
    shown_image: Option<ImageView>,
    zoom: Option<ImageView>,
}

impl Gallery {
    pub fn new(config: SiteConfig, store: ContentStore) -> Result<Self, url::ParseError> {
        let site = Url::parse(&config.site_url)?;
        let cursor = Cursor::new(config.default_lang);
        Ok(Self {
            config,
            site,
            store,
            cursor,
            shown_image: None,
            zoom: None,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Image shown in the zoom overlay, if it is open.
    pub fn zoom(&self) -> Option<&ImageView> {
        self.zoom.as_ref()
    }

    /// Seed the cursor from the address bar query.
    pub fn start(&mut self, search: &str) {
        let start = seo::parse_query(search, &self.store);
        self.cursor.seed(start.project, start.lang, &self.store);
    }

    /// First render: nothing to fade from, so no transition.
    pub fn render_initial<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.shown_image =
            Renderer::new(&self.store, &self.config, &self.site).render(&self.cursor, surface);
    }

    /// Apply a command. An accepted move starts the fade-out and returns the
    /// ticket the caller must hand to [`Gallery::settle`] after `settle_ms`.
    pub fn dispatch<S: Surface + ?Sized>(&mut self, command: Command, surface: &mut S) -> Option<Transition> {
        let transition = match command {
            Command::Prev => self.cursor.go_prev(&self.store),
            Command::Next => self.cursor.go_next(&self.store),
            Command::GoTo(index) => self.cursor.go_to_project(&self.store, index),
            Command::ChangeLang(lang) => {
                let transition = self.cursor.change_lang(lang);
                if transition.is_some() {
                    // project names switch right away, the slide after the fade
                    let renderer = Renderer::new(&self.store, &self.config, &self.site);
                    surface.set_nav(renderer.nav(&self.cursor));
                }
                transition
            }
            Command::OpenZoom => {
                self.zoom = self.shown_image.clone();
                return None;
            }
            Command::CloseZoom => {
                self.zoom = None;
                return None;
            }
        };

        match transition {
            Some(t) => {
                surface.set_fading(true);
                Some(t)
            }
            None => {
                log::debug!(
                    "Ignoring {:?} (transitioning: {})",
                    command,
                    self.cursor.is_transitioning()
                );
                None
            }
        }
    }

    /// Second half of a transition: render, fade back in, unlock.
    pub fn settle<S: Surface + ?Sized>(&mut self, transition: Transition, surface: &mut S) {
        self.shown_image =
            Renderer::new(&self.store, &self.config, &self.site).render(&self.cursor, surface);
        surface.set_fading(false);
        self.cursor.finish(transition);
    }

    pub fn sync<A, H>(&self, bar: &mut A, head: &mut H)
    where
        A: AddressBar + ?Sized,
        H: DocumentHead + ?Sized,
    {
        seo::sync(&self.store, &self.cursor, &self.config, &self.site, bar, head);
    }
}
