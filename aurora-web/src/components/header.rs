use crate::focus::ModalIds;
use yew::prelude::*;

/// In-page anchors shared by the desktop nav and the mobile drawer.
pub const NAV_LINKS: [(&str, &str); 4] = [
    ("#features", "Features"),
    ("#specs", "Specs"),
    ("#reviews", "Reviews"),
    ("#buy", "Buy"),
];

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub product_name: AttrValue,
    pub cart_count: u64,
    pub on_toggle_cart: Callback<()>,
    pub on_toggle_nav: Callback<()>,
}

#[function_component(Header)]
pub fn header(p: &Props) -> Html {
    let toggle_cart = {
        let cb = p.on_toggle_cart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_nav = {
        let cb = p.on_toggle_nav.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let count_label = match p.cart_count {
        1 => String::from("1 item in cart"),
        n => format!("{n} items in cart"),
    };

    html! {
        <header role="banner" class="site-header">
            <a href="#main" class="sr-only">{ "Skip to content" }</a>
            <div class="header-content">
                <a class="brand" href="#top">{ p.product_name.clone() }</a>
                <nav aria-label="Primary" class="header-nav">
                    <ul>
                        { for NAV_LINKS.iter().map(|(href, label)| html! {
                            <li><a href={*href}>{ *label }</a></li>
                        }) }
                    </ul>
                </nav>
                <div class="header-actions">
                    <button
                        id={ModalIds::MOBILE_NAV.trigger}
                        class="nav-toggle"
                        type="button"
                        aria-controls={ModalIds::MOBILE_NAV.container}
                        aria-expanded="false"
                        aria-label="Open menu"
                        onclick={toggle_nav}
                    >
                        <span aria-hidden="true">{ "☰" }</span>
                    </button>
                    <button
                        id={ModalIds::CART_PANEL.trigger}
                        class="cart-button"
                        type="button"
                        aria-controls={ModalIds::CART_PANEL.container}
                        aria-expanded="false"
                        aria-label={count_label}
                        onclick={toggle_cart}
                    >
                        { "Cart" }
                        <span class="cart-count" aria-hidden="true">{ p.cart_count.to_string() }</span>
                    </button>
                </div>
            </div>
        </header>
    }
}
