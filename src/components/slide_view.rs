// src/components/slide_view.rs
use crate::render::{LinkView, Stage};
use crate::rich_text::Inline;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SlideViewProps {
    pub stage: Stage,
    pub container_ref: NodeRef,
    pub content_ref: NodeRef,
    pub on_image_click: Callback<()>,
    pub on_image_load: Callback<()>,
    pub on_thumb: Callback<usize>,
}

fn render_inline(node: &Inline) -> Html {
    match node {
        Inline::Text(text) => html! { {text.clone()} },
        Inline::LineBreak => html! { <br/> },
        Inline::Emphasis(children) => html! { <em>{for children.iter().map(render_inline)}</em> },
        Inline::Strong(children) => html! { <strong>{for children.iter().map(render_inline)}</strong> },
        Inline::Link { target, children } => html! {
            <a href={target.href.clone()} target={target.target()} rel={target.rel()}>
                {for children.iter().map(render_inline)}
            </a>
        },
    }
}

fn render_link(link: &LinkView) -> Html {
    html! {
        <a href={link.target.href.clone()} target={link.target.target()} rel={link.target.rel()}>
            {link.text.clone()}
        </a>
    }
}

#[function_component(SlideView)]
pub fn slide_view(props: &SlideViewProps) -> Html {
    let stage = &props.stage;

    let onclick_image = {
        let on_image_click = props.on_image_click.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_image_click.emit(());
        })
    };
    let onload_image = {
        let on_image_load = props.on_image_load.clone();
        Callback::from(move |_: Event| on_image_load.emit(()))
    };

    html! {
        <div
            id="slide-container"
            ref={props.container_ref.clone()}
            class={classes!("slide-container", stage.centered.then_some("centered"))}
        >
            <div
                ref={props.content_ref.clone()}
                class={classes!("slide-content", stage.fading.then_some("transitioning"))}
            >
                if let Some(image) = &stage.image {
                    <div class="slide-image-wrap">
                        <img
                            id="slide-image"
                            src={image.src.clone()}
                            alt={image.alt.clone()}
                            onclick={onclick_image}
                            onload={onload_image}
                        />
                    </div>
                }

                if !stage.paragraphs.is_empty() {
                    <div id="slide-text" class="slide-text">
                        {for stage.paragraphs.iter().map(|p| html! {
                            <p>{for p.iter().map(render_inline)}</p>
                        })}
                    </div>
                }

                if !stage.links.is_empty() {
                    <div id="slide-links" class="slide-links">
                        {for stage.links.iter().map(render_link)}
                    </div>
                }

                if let Some(footer) = &stage.footer {
                    <div id="slide-footer" class="slide-footer">{render_link(footer)}</div>
                }

                if let Some(grid) = &stage.thumbnails {
                    <div
                        id="slide-thumbs"
                        class="slide-thumbs"
                        style={format!("--thumb-columns: {};", grid.columns)}
                    >
                        {for grid.items.iter().map(|thumb| {
                            let on_thumb = props.on_thumb.clone();
                            let project = thumb.project;
                            html! {
                                <button
                                    class="slide-thumb"
                                    aria-label={thumb.label.clone()}
                                    onclick={Callback::from(move |_: MouseEvent| on_thumb.emit(project))}
                                >
                                    <img src={thumb.src.clone()} alt={thumb.label.clone()}/>
                                </button>
                            }
                        })}
                    </div>
                }
            </div>
        </div>
    }
}
