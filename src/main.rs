// src/main.rs
mod browser;
mod components;
mod config;
mod content;
mod cursor;
mod gallery;
mod i18n;
mod input;
mod links;
mod render;
mod rich_text;
mod seo;
mod utils;

use browser::{BrowserHead, BrowserLocation};
use components::controls::{Controls, Placement};
use components::image_zoom::ImageZoom;
use components::project_nav::ProjectNav;
use components::slide_view::SlideView;
use config::SiteConfig;
use content::{ContentStore, LoadError};
use cursor::Transition;
use gallery::Gallery;
use gloo::timers::future::TimeoutFuture;
use gloo_events::EventListener;
use i18n::Label;
use input::Command;
use render::Stage;
use seo::AddressBar;
use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};
use yew::prelude::*;

pub enum AppMsg {
    Loaded(Result<ContentStore, LoadError>),
    Command(Command),
    Key(String),
    Settled(Transition),
    Measure,
}

enum LoadState {
    Loading,
    Failed,
    Ready(Gallery),
}

pub struct App {
    config: SiteConfig,
    state: LoadState,
    stage: Stage,
    container_ref: NodeRef,
    content_ref: NodeRef,
    _keydown: EventListener,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let config = SiteConfig::default()
            .with_site_url(&utils::get_origin(), &utils::get_base_url());

        // Start loading content; nothing is shown until it resolves
        let data_url = utils::resource_url(&config.data_url);
        ctx.link().send_future(async move {
            AppMsg::Loaded(ContentStore::load(&data_url).await)
        });

        let link = ctx.link().clone();
        let keydown = EventListener::new(&gloo_utils::window(), "keydown", move |event| {
            if let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() {
                link.send_message(AppMsg::Key(keyboard_event.key()));
            }
        });

        Self {
            config,
            state: LoadState::Loading,
            stage: Stage::default(),
            container_ref: NodeRef::default(),
            content_ref: NodeRef::default(),
            _keydown: keydown,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Loaded(Ok(store)) => {
                let slugs: Vec<&str> = store.project_slugs().collect();
                log::info!("Projects: {}", slugs.join(", "));

                match Gallery::new(self.config.clone(), store) {
                    Ok(mut gallery) => {
                        gallery.start(&BrowserLocation.search());
                        gallery.render_initial(&mut self.stage);
                        gallery.sync(&mut BrowserLocation, &mut BrowserHead);
                        self.state = LoadState::Ready(gallery);
                    }
                    Err(e) => {
                        log::error!("Invalid site url {}: {}", self.config.site_url, e);
                        self.state = LoadState::Failed;
                    }
                }
                true
            }
            AppMsg::Loaded(Err(error)) => {
                log::error!("Failed to load content: {}", error);
                self.state = LoadState::Failed;
                true
            }
            AppMsg::Command(command) => {
                let LoadState::Ready(gallery) = &mut self.state else {
                    return false;
                };
                if let Some(transition) = gallery.dispatch(command, &mut self.stage) {
                    let settle_ms = gallery.config().settle_ms;
                    ctx.link().send_future(async move {
                        TimeoutFuture::new(settle_ms).await;
                        AppMsg::Settled(transition)
                    });
                }
                true
            }
            AppMsg::Key(key) => {
                let LoadState::Ready(gallery) = &self.state else {
                    return false;
                };
                if let Some(command) = input::key_command(&key, gallery.zoom().is_some()) {
                    ctx.link().send_message(AppMsg::Command(command));
                }
                false
            }
            AppMsg::Settled(transition) => {
                let LoadState::Ready(gallery) = &mut self.state else {
                    return false;
                };
                gallery.settle(transition, &mut self.stage);
                gallery.sync(&mut BrowserLocation, &mut BrowserHead);
                true
            }
            AppMsg::Measure => {
                let container = self.container_ref.cast::<Element>();
                let content = self.content_ref.cast::<Element>();
                match (container, content) {
                    (Some(container), Some(content)) => self.stage.measured(
                        content.scroll_height() as f64,
                        container.client_height() as f64,
                    ),
                    _ => false,
                }
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if self.stage.measure_pending {
            ctx.link().send_message(AppMsg::Measure);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let lang = self.config.default_lang;
        let gallery = match &self.state {
            LoadState::Loading => {
                return html! {
                    <div class="app-container">
                        <div class="loading">{Label::Loading.text(lang)}</div>
                    </div>
                };
            }
            LoadState::Failed => {
                return html! {
                    <div class="app-container">
                        <div class="error">{Label::LoadFailed.text(lang)}</div>
                    </div>
                };
            }
            LoadState::Ready(gallery) => gallery,
        };

        let lang = gallery.cursor().lang();
        let on_command = ctx.link().callback(AppMsg::Command);
        let on_select = ctx.link().callback(|index: usize| AppMsg::Command(Command::GoTo(index)));
        let on_image_click = ctx.link().callback(|_: ()| AppMsg::Command(Command::OpenZoom));
        let on_close = ctx.link().callback(|_: ()| AppMsg::Command(Command::CloseZoom));
        let on_image_load = ctx.link().callback(|_: ()| AppMsg::Measure);

        html! {
            <div class="app-container">
                <aside class="sidebar" aria-label={Label::Projects.text(lang)}>
                    if let Some(nav) = &self.stage.nav {
                        <ProjectNav nav={nav.clone()} revision={self.stage.revision} on_select={on_select.clone()}/>
                    }
                    <Controls {lang} placement={Placement::Sidebar} on_command={on_command.clone()}/>
                </aside>

                <main class="app-main">
                    <SlideView
                        stage={self.stage.clone()}
                        container_ref={self.container_ref.clone()}
                        content_ref={self.content_ref.clone()}
                        {on_image_click}
                        {on_image_load}
                        on_thumb={on_select}
                    />
                </main>

                <footer class="mobile-footer">
                    <Controls {lang} placement={Placement::Footer} {on_command}/>
                </footer>

                <ImageZoom image={gallery.zoom().cloned()} {lang} {on_close}/>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
