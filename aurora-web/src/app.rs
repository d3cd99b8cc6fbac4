use crate::a11y::{STATUS_REGION_ID, visible_focus_css};
use crate::components::{CartPanel, Footer, Header, MobileNav, ProductPanel};
use crate::focus::{ModalHandle, ModalIds, PointerListener};
use crate::paths::asset_path;
use crate::storage::BrowserCartStore;
use crate::views::{CartPanelView, ImageFrame, PendingTimer, SelectionDisplay, SelectionPanelView};
use aurora_core::{
    CartEngine, CartSnapshot, Catalog, Checkout, EffectSlot, ImageSelector, ProductSelection,
    TrapOptions, Variant,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use yew::prelude::*;

/// Long-lived page controllers. Yew state only mirrors what they decide.
pub struct Controllers {
    pub engine: CartEngine<BrowserCartStore>,
    pub selection: ProductSelection,
    pub images: ImageSelector,
    pub confirmation: EffectSlot,
    fade_timer: PendingTimer,
    confirm_timer: PendingTimer,
}

impl Controllers {
    #[must_use]
    pub fn new(catalog: &Catalog) -> Self {
        let initial = catalog
            .image_for(&catalog.default_selection.color)
            .unwrap_or_default();
        Self {
            engine: CartEngine::new(BrowserCartStore, catalog.clone()),
            selection: ProductSelection::new(catalog.clone()),
            images: ImageSelector::showing(initial, catalog.timings.crossfade_ms),
            confirmation: EffectSlot::new(),
            fade_timer: PendingTimer::default(),
            confirm_timer: PendingTimer::default(),
        }
    }

    fn cancel_timers(&mut self) {
        self.fade_timer.cancel();
        self.confirm_timer.cancel();
        self.confirmation.cancel();
    }
}

#[derive(Clone)]
pub struct StoreState {
    pub snapshot: UseStateHandle<CartSnapshot>,
    pub count: UseStateHandle<u64>,
    pub display: UseStateHandle<SelectionDisplay>,
    pub image: UseStateHandle<ImageFrame>,
    pub confirmed: UseStateHandle<bool>,
}

impl StoreState {
    fn cart_view(&self) -> CartPanelView {
        CartPanelView::new(&self.snapshot, &self.count)
    }
}

#[hook]
pub fn use_store_state(catalog: Rc<Catalog>) -> StoreState {
    let display_catalog = catalog.clone();
    StoreState {
        snapshot: use_state(CartSnapshot::default),
        count: use_state(|| 0_u64),
        display: use_state(move || {
            SelectionDisplay::of(&ProductSelection::new((*display_catalog).clone()))
        }),
        image: use_state(move || ImageFrame {
            src: asset_path(
                catalog
                    .image_for(&catalog.default_selection.color)
                    .unwrap_or_default(),
            ),
            fading: false,
        }),
        confirmed: use_state(|| false),
    }
}

type SharedControllers = Rc<RefCell<Controllers>>;

fn on_color_selected(controllers: &SharedControllers, state: &StoreState, color: &str) {
    let Ok(mut guard) = controllers.try_borrow_mut() else {
        return;
    };
    let ctl = &mut *guard;
    let mut view = SelectionPanelView::new(&state.display);
    let fade = ctl.selection.set_color(color, &mut view, &mut ctl.images);
    view.commit();
    let Some(fade) = fade else {
        return;
    };

    state.image.set(ImageFrame {
        src: state.image.src.clone(),
        fading: true,
    });
    let weak: Weak<RefCell<Controllers>> = Rc::downgrade(controllers);
    let image = state.image.clone();
    ctl.fade_timer.schedule(fade.fade_ms, move || {
        let Some(controllers) = weak.upgrade() else {
            return;
        };
        let Ok(mut ctl) = controllers.try_borrow_mut() else {
            return;
        };
        if ctl.images.complete(&fade) {
            image.set(ImageFrame {
                src: asset_path(&fade.to),
                fading: false,
            });
        }
    });
}

fn on_add_selected(controllers: &SharedControllers, state: &StoreState) {
    let Ok(mut guard) = controllers.try_borrow_mut() else {
        return;
    };
    let ctl = &mut *guard;
    let mut view = state.cart_view();
    let token =
        ctl.selection
            .add_current_selection_to_cart(&mut ctl.engine, &mut view, &mut ctl.confirmation);
    state.confirmed.set(true);

    let weak = Rc::downgrade(controllers);
    let confirmed = state.confirmed.clone();
    let confirm_ms = ctl.engine.catalog().timings.confirm_ms;
    ctl.confirm_timer.schedule(confirm_ms, move || {
        let Some(controllers) = weak.upgrade() else {
            return;
        };
        let Ok(mut ctl) = controllers.try_borrow_mut() else {
            return;
        };
        if ctl.confirmation.finish(token) {
            confirmed.set(false);
        }
    });
}

/// Product page shell: header, product panel, cart panel and mobile nav.
///
/// Nothing here touches the DOM while rendering; storage and focus handling
/// start in the mount effect and in event callbacks.
#[function_component(App)]
pub fn app() -> Html {
    let catalog = use_memo((), |_| Catalog::default_catalog().clone());
    let state = use_store_state(catalog.clone());
    let controllers = {
        let catalog = catalog.clone();
        use_mut_ref(move || Controllers::new(&catalog))
    };
    let cart_modal = use_memo((), |_| {
        ModalHandle::new(ModalIds::CART_PANEL, TrapOptions::cart_panel())
    });
    let nav_modal = use_memo((), |_| {
        ModalHandle::new(ModalIds::MOBILE_NAV, TrapOptions::mobile_nav())
    });

    {
        let controllers = controllers.clone();
        let state = state.clone();
        let cart_modal = cart_modal.clone();
        use_effect_with((), move |_| {
            if let Ok(ctl) = controllers.try_borrow() {
                ctl.engine.render_view(&mut state.cart_view());
                let mut view = SelectionPanelView::new(&state.display);
                ctl.selection.sync(&mut view);
                view.commit();
            }
            let outside_clicks = PointerListener::install((*cart_modal).clone());
            log::debug!("storefront mounted");
            move || {
                drop(outside_clicks);
                if let Ok(mut ctl) = controllers.try_borrow_mut() {
                    ctl.cancel_timers();
                }
            }
        });
    }

    {
        // removing a row unmounts the focused Remove button
        let cart_modal = cart_modal.clone();
        use_effect_with((*state.snapshot).clone(), move |_| {
            cart_modal.retain_focus();
            || ()
        });
    }

    let on_variant = {
        let controllers = controllers.clone();
        let state = state.clone();
        Callback::from(move |variant: Variant| {
            if let Ok(mut ctl) = controllers.try_borrow_mut() {
                let mut view = SelectionPanelView::new(&state.display);
                ctl.selection.set_variant(variant, &mut view);
                view.commit();
            }
        })
    };

    let on_color = {
        let controllers = controllers.clone();
        let state = state.clone();
        Callback::from(move |color: String| on_color_selected(&controllers, &state, &color))
    };

    let on_add = {
        let controllers = controllers.clone();
        let state = state.clone();
        Callback::from(move |()| on_add_selected(&controllers, &state))
    };

    let on_toggle_cart = {
        let controllers = controllers.clone();
        let state = state.clone();
        let cart_modal = cart_modal.clone();
        let nav_modal = nav_modal.clone();
        Callback::from(move |()| {
            // one drawer at a time
            nav_modal.close();
            if !cart_modal.is_open()
                && let Ok(ctl) = controllers.try_borrow()
            {
                ctl.engine.render_view(&mut state.cart_view());
            }
            cart_modal.toggle();
        })
    };

    let on_close_cart = {
        let cart_modal = cart_modal.clone();
        Callback::from(move |()| cart_modal.close())
    };

    let on_toggle_nav = {
        let cart_modal = cart_modal.clone();
        let nav_modal = nav_modal.clone();
        Callback::from(move |()| {
            cart_modal.close();
            nav_modal.toggle();
        })
    };

    let on_close_nav = {
        let nav_modal = nav_modal.clone();
        Callback::from(move |()| nav_modal.close())
    };

    let on_nav_link = {
        let nav_modal = nav_modal.clone();
        Callback::from(move |()| nav_modal.link_selected())
    };

    let on_remove = {
        let controllers = controllers.clone();
        let state = state.clone();
        Callback::from(move |id: String| {
            if let Ok(mut ctl) = controllers.try_borrow_mut() {
                ctl.engine.remove_item(&id, &mut state.cart_view());
            }
        })
    };

    let on_checkout = {
        let controllers = controllers.clone();
        let state = state.clone();
        Callback::from(move |()| {
            let Ok(ctl) = controllers.try_borrow() else {
                return;
            };
            match ctl.engine.checkout(&mut state.cart_view()) {
                Checkout::Empty => log::info!("checkout requested with an empty cart"),
                Checkout::Simulated { count, total } => {
                    log::info!("simulated checkout of {count} items for {total}");
                }
            }
        })
    };

    let product_name = AttrValue::from(catalog.product_name.clone());

    html! {
        <>
            <style>{ visible_focus_css() }</style>
            <Header
                product_name={product_name.clone()}
                cart_count={*state.count}
                {on_toggle_cart}
                {on_toggle_nav}
            />
            <MobileNav on_link={on_nav_link} on_close={on_close_nav} />
            <main id="main" tabindex="-1">
                <ProductPanel
                    catalog={catalog.clone()}
                    display={(*state.display).clone()}
                    image={(*state.image).clone()}
                    confirmed={*state.confirmed}
                    {on_variant}
                    {on_color}
                    {on_add}
                />
            </main>
            <CartPanel
                snapshot={(*state.snapshot).clone()}
                {on_remove}
                on_close={on_close_cart}
                {on_checkout}
            />
            <p id={STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></p>
            <Footer {product_name} />
        </>
    }
}
