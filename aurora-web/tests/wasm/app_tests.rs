use aurora_core::{Cart, Catalog};
use aurora_web::app::App;
use aurora_web::dom;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, KeyboardEvent, KeyboardEventInit, Node};
use yew::Renderer;

fn storage_key() -> String {
    Catalog::default_catalog().storage_key.clone()
}

fn mount_app() {
    let doc = dom::document().expect("document");
    if let Some(old) = doc.get_element_by_id("app") {
        old.remove();
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    Renderer::<App>::with_root(root).render();
}

/// Let pending renders and effects run.
async fn settle() {
    TimeoutFuture::new(0).await;
}

fn element(id: &str) -> HtmlElement {
    dom::html_by_id(id).unwrap_or_else(|| panic!("#{id} rendered"))
}

fn press(key: &str, shift: bool) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_shift_key(shift);
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event =
        KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("keyboard event");
    dom::document()
        .expect("document")
        .dispatch_event(&event)
        .expect("dispatch keydown");
}

fn active_element() -> Option<web_sys::Element> {
    dom::document().and_then(|doc| doc.active_element())
}

fn active_id() -> String {
    active_element().map(|el| el.id()).unwrap_or_default()
}

fn focus_is_inside(container: &HtmlElement) -> bool {
    active_element().is_some_and(|active| {
        let node: &Node = &active;
        container.contains(Some(node))
    })
}

#[wasm_bindgen_test]
fn cart_panel_traps_focus_and_restores_trigger() {
    LocalStorage::delete(storage_key());
    mount_app();
    let trigger = element("cart-button");
    let panel = element("cart-panel");
    assert!(panel.hidden());

    trigger.focus().expect("focus trigger");
    trigger.click();
    assert!(!panel.hidden());
    assert_eq!(trigger.get_attribute("aria-expanded").as_deref(), Some("true"));
    assert!(focus_is_inside(&panel), "focus moved into the panel");

    press("Escape", false);
    assert!(panel.hidden());
    assert_eq!(trigger.get_attribute("aria-expanded").as_deref(), Some("false"));
    assert_eq!(active_id(), "cart-button");
}

#[wasm_bindgen_test]
fn outside_click_closes_cart_panel() {
    mount_app();
    let trigger = element("cart-button");
    let panel = element("cart-panel");
    trigger.click();
    assert!(!panel.hidden());

    element("product-title").click();
    assert!(panel.hidden());
}

#[wasm_bindgen_test]
fn opening_nav_over_cart_keeps_focus_in_nav() {
    mount_app();
    let cart_button = element("cart-button");
    let panel = element("cart-panel");
    let nav = element("mobile-nav");
    cart_button.focus().expect("focus cart trigger");
    cart_button.click();
    assert!(!panel.hidden());

    let toggle = element("nav-toggle");
    toggle.focus().expect("focus nav toggle");
    toggle.click();
    assert!(panel.hidden());
    assert!(!nav.hidden());
    assert!(focus_is_inside(&nav), "focus stays in the open drawer");

    press("Escape", false);
    assert!(nav.hidden());
    assert_eq!(active_id(), "nav-toggle");
}

#[wasm_bindgen_test]
fn mobile_nav_closes_on_link_and_unlocks_scroll() {
    mount_app();
    let toggle = element("nav-toggle");
    let nav = element("mobile-nav");
    toggle.focus().expect("focus toggle");
    toggle.click();
    assert!(!nav.hidden());
    let body = dom::document().and_then(|doc| doc.body()).expect("body");
    assert_eq!(
        body.style().get_property_value("overflow").unwrap_or_default(),
        "hidden"
    );

    let link = nav
        .query_selector("a[href='#specs']")
        .expect("query link")
        .expect("link exists")
        .dyn_into::<HtmlElement>()
        .expect("anchor is an html element");
    link.click();
    assert!(nav.hidden());
    assert_eq!(
        body.style().get_property_value("overflow").unwrap_or_default(),
        ""
    );
    assert_eq!(active_id(), "nav-toggle");
}

#[wasm_bindgen_test]
fn add_to_cart_persists_merged_line() {
    LocalStorage::delete(storage_key());
    mount_app();
    let add = element("add-to-cart");
    add.click();
    add.click();

    let cart: Cart = LocalStorage::get(storage_key()).expect("cart persisted");
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].id, "standard-matte-black");
    assert_eq!(cart.items[0].qty, 2);
    assert_eq!(cart.total(), 298);
    LocalStorage::delete(storage_key());
}

#[wasm_bindgen_test]
async fn removing_focused_row_keeps_focus_in_panel() {
    LocalStorage::delete(storage_key());
    mount_app();
    element("add-to-cart").click();
    let trigger = element("cart-button");
    let panel = element("cart-panel");
    trigger.focus().expect("focus trigger");
    trigger.click();
    settle().await;

    let remove = panel
        .query_selector(".cart-row__remove")
        .expect("query remove")
        .expect("row rendered")
        .dyn_into::<HtmlElement>()
        .expect("button is an html element");
    remove.focus().expect("focus remove");
    remove.click();
    settle().await;

    assert!(!panel.hidden(), "panel stays open");
    assert!(panel.query_selector(".cart-row").expect("query rows").is_none());
    assert!(focus_is_inside(&panel), "focus pulled back into the panel");

    press("Tab", false);
    assert!(focus_is_inside(&panel), "Tab stays in the panel");

    press("Escape", false);
    assert!(panel.hidden());
    assert_eq!(active_id(), "cart-button");
    LocalStorage::delete(storage_key());
}
