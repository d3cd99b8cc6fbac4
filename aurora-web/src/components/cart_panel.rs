use crate::focus::ModalIds;
use aurora_core::{CartRow, CartSnapshot};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub snapshot: CartSnapshot,
    pub on_remove: Callback<String>,
    pub on_close: Callback<()>,
    pub on_checkout: Callback<()>,
}

fn cart_row(row: &CartRow, on_remove: &Callback<String>) -> Html {
    let remove = {
        let cb = on_remove.clone();
        let id = row.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    html! {
        <li class="cart-row" key={row.id.clone()} data-line={row.id.clone()}>
            <div class="cart-row__info">
                <span class="cart-row__variant">{ row.variant_label.clone() }</span>
                <span class="cart-row__color">{ row.color_label.clone() }</span>
                <span class="cart-row__qty">{ row.summary.clone() }</span>
            </div>
            <button
                type="button"
                class="cart-row__remove"
                aria-label={format!("Remove {} {}", row.variant_label, row.color_label)}
                onclick={remove}
            >
                { "Remove" }
            </button>
        </li>
    }
}

/// Slide-over cart. Visibility is owned by the focus trap, so the markup
/// always renders closed.
#[function_component(CartPanel)]
pub fn cart_panel(p: &Props) -> Html {
    let close = {
        let cb = p.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let checkout = {
        let cb = p.on_checkout.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let body = if p.snapshot.is_empty() {
        html! { <p class="cart-empty">{ "Your cart is empty." }</p> }
    } else {
        html! {
            <ul id="cart-list" class="cart-list">
                { for p.snapshot.rows.iter().map(|row| cart_row(row, &p.on_remove)) }
            </ul>
        }
    };

    html! {
        <aside
            id={ModalIds::CART_PANEL.container}
            class="cart-panel"
            role="dialog"
            aria-labelledby="cart-title"
            hidden={true}
        >
            <div class="cart-panel__header">
                <h2 id="cart-title">{ "Your cart" }</h2>
                <button type="button" class="cart-panel__close" aria-label="Close cart" onclick={close}>
                    { "×" }
                </button>
            </div>
            { body }
            <div class="cart-panel__footer">
                <p class="cart-total">
                    <span>{ "Total" }</span>
                    <strong id="cart-total">{ p.snapshot.formatted_total.clone() }</strong>
                </p>
                <button
                    id="checkout"
                    type="button"
                    class="checkout"
                    disabled={p.snapshot.is_empty()}
                    onclick={checkout}
                >
                    { "Checkout" }
                </button>
            </div>
        </aside>
    }
}
