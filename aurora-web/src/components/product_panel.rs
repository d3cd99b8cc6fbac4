use crate::views::{ImageFrame, SelectionDisplay};
use aurora_core::{Catalog, Variant};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub catalog: Rc<Catalog>,
    pub display: SelectionDisplay,
    pub image: ImageFrame,
    /// "Added ✓" confirmation showing on the add-to-cart control
    #[prop_or_default]
    pub confirmed: bool,
    pub on_variant: Callback<Variant>,
    pub on_color: Callback<String>,
    pub on_add: Callback<()>,
}

#[function_component(ProductPanel)]
pub fn product_panel(p: &Props) -> Html {
    let catalog = &p.catalog;
    let color_label = catalog.color_label(&p.display.color);
    let image_classes = classes!("product-image", p.image.fading.then_some("is-fading"));
    let image_style = format!("background-image: url('{}')", p.image.src);

    let variant_buttons = catalog.variants.iter().map(|spec| {
        let active = spec.id == p.display.variant;
        let onclick = {
            let cb = p.on_variant.clone();
            let variant = spec.id;
            Callback::from(move |_| cb.emit(variant))
        };
        html! {
            <button
                type="button"
                class={classes!("variant-option", active.then_some("is-active"))}
                data-variant={spec.id.key()}
                aria-pressed={if active { "true" } else { "false" }}
                {onclick}
            >
                <span class="variant-option__label">{ spec.label.clone() }</span>
                <span class="variant-option__price">{ catalog.format_price(u64::from(spec.price)) }</span>
            </button>
        }
    });

    let swatches = catalog.colors.iter().map(|spec| {
        let selected = spec.id == p.display.color;
        let onclick = {
            let cb = p.on_color.clone();
            let color = spec.id.clone();
            Callback::from(move |_| cb.emit(color.clone()))
        };
        html! {
            <button
                type="button"
                class={classes!("swatch", selected.then_some("is-selected"))}
                data-color={spec.id.clone()}
                style={format!("--swatch: {}", spec.swatch)}
                aria-label={spec.label.clone()}
                aria-pressed={if selected { "true" } else { "false" }}
                {onclick}
            />
        }
    });

    let on_add = {
        let cb = p.on_add.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section id="buy" class="product" aria-labelledby="product-title">
            <div
                id="product-image"
                class={image_classes}
                style={image_style}
                role="img"
                aria-label={format!("{} in {color_label}", catalog.variant_label(p.display.variant))}
            />
            <div class="product__details">
                <h1 id="product-title">{ catalog.product_name.clone() }</h1>
                <div class="variant-options" role="group" aria-label="Model">
                    { for variant_buttons }
                </div>
                <p class="product__price" aria-live="polite">{ p.display.price.clone() }</p>
                <p class="upgrade-note" hidden={!p.display.upgrade_note}>
                    { format!(
                        "Upgrade to {} for {} more.",
                        catalog.variant_label(Variant::Pro),
                        catalog.format_price(u64::from(
                            catalog
                                .price_of(Variant::Pro)
                                .saturating_sub(catalog.price_of(Variant::Standard))
                        ))
                    ) }
                </p>
                <div class="swatches" role="group" aria-label="Colour">
                    { for swatches }
                </div>
                <p class="swatch-label">{ color_label.clone() }</p>
                <button
                    id="add-to-cart"
                    type="button"
                    class={classes!("add-to-cart", p.confirmed.then_some("is-confirmed"))}
                    onclick={on_add}
                >
                    { if p.confirmed { "Added ✓" } else { "Add to cart" } }
                </button>
            </div>
        </section>
    }
}
