// src/components/controls.rs
use crate::i18n::{Label, Lang};
use crate::input::Command;
use yew::prelude::*;

/// The prev/next + language controls exist twice: in the sidebar on desktop
/// and in the footer on mobile.
#[derive(Clone, Copy, PartialEq)]
pub enum Placement {
    Sidebar,
    Footer,
}

impl Placement {
    fn suffix(self) -> &'static str {
        match self {
            Placement::Sidebar => "",
            Placement::Footer => "-mobile",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ControlsProps {
    pub lang: Lang,
    pub placement: Placement,
    pub on_command: Callback<Command>,
}

#[function_component(Controls)]
pub fn controls(props: &ControlsProps) -> Html {
    let suffix = props.placement.suffix();
    let emit = |command: Command| {
        let on_command = props.on_command.clone();
        Callback::from(move |_: MouseEvent| on_command.emit(command))
    };

    html! {
        <div class={format!("controls{}", suffix)}>
            <div class="slide-arrows">
                <button id={format!("prev-btn{}", suffix)} onclick={emit(Command::Prev)}>
                    {Label::Previous.text(props.lang)}
                </button>
                <button id={format!("next-btn{}", suffix)} onclick={emit(Command::Next)}>
                    {Label::Next.text(props.lang)}
                </button>
            </div>
            <div class="lang-switch">
                {for Lang::ALL.iter().map(|&lang| html! {
                    <button
                        class={classes!(format!("lang-btn{}", suffix), (lang == props.lang).then_some("active"))}
                        data-lang={lang.code()}
                        onclick={emit(Command::ChangeLang(lang))}
                    >
                        {lang.toggle_label()}
                    </button>
                })}
            </div>
        </div>
    }
}
