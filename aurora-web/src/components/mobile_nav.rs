use crate::components::header::NAV_LINKS;
use crate::focus::ModalIds;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub on_link: Callback<()>,
    pub on_close: Callback<()>,
}

/// Navigation drawer for narrow viewports. Visibility is owned by the focus
/// trap, so the markup always renders closed.
#[function_component(MobileNav)]
pub fn mobile_nav(p: &Props) -> Html {
    let close = {
        let cb = p.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_link = {
        let cb = p.on_link.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div
            id={ModalIds::MOBILE_NAV.container}
            class="mobile-nav"
            role="dialog"
            aria-label="Site navigation"
            hidden={true}
        >
            <button type="button" class="mobile-nav__close" aria-label="Close menu" onclick={close}>
                { "×" }
            </button>
            <nav aria-label="Mobile">
                <ul>
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <li><a href={*href} onclick={on_link.clone()}>{ *label }</a></li>
                    }) }
                </ul>
            </nav>
        </div>
    }
}
