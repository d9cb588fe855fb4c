// src/components/image_zoom.rs
use crate::i18n::{Label, Lang};
use crate::render::ImageView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ImageZoomProps {
    pub image: Option<ImageView>,
    pub lang: Lang,
    pub on_close: Callback<()>,
}

/// Full-size overlay of the displayed image. A click anywhere closes it;
/// Escape is handled by the global key listener.
#[function_component(ImageZoom)]
pub fn image_zoom(props: &ImageZoomProps) -> Html {
    let onclick = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div
            class={classes!("image-modal", props.image.is_some().then_some("open"))}
            title={Label::CloseZoom.text(props.lang)}
            {onclick}
        >
            if let Some(image) = &props.image {
                <img src={image.src.clone()} alt={image.alt.clone()}/>
            }
        </div>
    }
}
