// src/components/project_nav.rs
use crate::render::NavState;
use web_sys::{Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

/// Half the height of the arrow marker, in px.
const INDICATOR_HALF_HEIGHT: f64 = 4.0;

#[derive(Properties, PartialEq)]
pub struct ProjectNavProps {
    pub nav: NavState,
    /// Changes on every slide render.
    pub revision: u64,
    pub on_select: Callback<usize>,
}

/// Vertical offset of the indicator inside the scrollable nav, so that it
/// sits at the centre of the active item.
pub fn indicator_top(link_top: f64, nav_top: f64, scroll_top: f64, link_height: f64) -> f64 {
    link_top - nav_top + scroll_top + link_height / 2.0 - INDICATOR_HALF_HEIGHT
}

fn place_indicator(nav_ref: &NodeRef, scroll_into_view: bool) -> Option<f64> {
    let nav = nav_ref.cast::<Element>()?;
    let active = nav.query_selector(".project-link.active").ok().flatten()?;

    if scroll_into_view {
        let options = ScrollIntoViewOptions::new();
        options.set_block(ScrollLogicalPosition::Center);
        options.set_behavior(ScrollBehavior::Smooth);
        active.scroll_into_view_with_scroll_into_view_options(&options);
    }

    let nav_rect = nav.get_bounding_client_rect();
    let link_rect = active.get_bounding_client_rect();
    Some(indicator_top(
        link_rect.top(),
        nav_rect.top(),
        nav.scroll_top() as f64,
        link_rect.height(),
    ))
}

#[function_component(ProjectNav)]
pub fn project_nav(props: &ProjectNavProps) -> Html {
    let nav_ref = use_node_ref();
    let indicator = use_state(|| None::<f64>);

    // ------ FOLLOW THE ACTIVE ITEM ------
    {
        let nav_ref = nav_ref.clone();
        let indicator = indicator.clone();
        use_effect_with((props.revision, props.nav.lang), move |_| {
            if let Some(top) = place_indicator(&nav_ref, true) {
                indicator.set(Some(top));
            }
        });
    }

    // ------ KEEP IN SYNC WHILE SCROLLING ------
    let onscroll = {
        let nav_ref = nav_ref.clone();
        let indicator = indicator.clone();
        Callback::from(move |_: Event| {
            if let Some(top) = place_indicator(&nav_ref, false) {
                indicator.set(Some(top));
            }
        })
    };

    html! {
        <nav id="project-nav" class="project-nav" ref={nav_ref} {onscroll}>
            {for props.nav.items.iter().map(|item| {
                let on_select = props.on_select.clone();
                let index = item.index;
                html! {
                    <button
                        class={classes!(
                            "project-link",
                            item.active.then_some("active"),
                            item.gap_before.then_some("group-gap"),
                        )}
                        data-group={item.group.to_string()}
                        onclick={Callback::from(move |_: MouseEvent| on_select.emit(index))}
                    >
                        {item.title.clone()}
                    </button>
                }
            })}
            if let Some(top) = *indicator {
                <div class="nav-indicator" style={format!("top: {}px;", top)}></div>
            }
        </nav>
    }
}
