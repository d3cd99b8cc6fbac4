//! DOM side of the modal focus trap
//!
//! [`DomFocusHost`] resolves the container and trigger by id on every call, so a
//! missing element turns each operation into a no-op.

use crate::dom;
use aurora_core::{
    FOCUSABLE_SELECTOR, FocusHost, FocusTrap, Key, KeyPress, PointerTarget, TrapOptions,
    is_rendered,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, EventTarget, HtmlElement, KeyboardEvent, Node};

type SharedTrap = Rc<RefCell<FocusTrap<DomFocusHost>>>;
type WeakTrap = Weak<RefCell<FocusTrap<DomFocusHost>>>;

/// Element ids a trap instance is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalIds {
    pub container: &'static str,
    pub trigger: &'static str,
}

impl ModalIds {
    pub const CART_PANEL: Self = Self {
        container: "cart-panel",
        trigger: "cart-button",
    };
    pub const MOBILE_NAV: Self = Self {
        container: "mobile-nav",
        trigger: "nav-toggle",
    };
}

pub struct DomFocusHost {
    ids: ModalIds,
    trap: WeakTrap,
}

impl DomFocusHost {
    fn container_el(&self) -> Option<HtmlElement> {
        dom::html_by_id(self.ids.container)
    }

    fn trigger_el(&self) -> Option<HtmlElement> {
        dom::html_by_id(self.ids.trigger)
    }
}

fn visible(el: &HtmlElement) -> bool {
    let rect = el.get_bounding_client_rect();
    is_rendered(rect.width(), rect.height(), el.get_client_rects().length())
}

impl FocusHost for DomFocusHost {
    type Element = HtmlElement;
    type Listener = KeyListener;

    fn active_element(&self) -> Option<HtmlElement> {
        let doc = dom::document()?;
        let active = doc.active_element()?.dyn_into::<HtmlElement>().ok()?;
        // focus parked on <body> means nothing is focused
        if doc.body().is_some_and(|body| body == active) {
            None
        } else {
            Some(active)
        }
    }

    fn focusable(&self) -> Vec<HtmlElement> {
        let Some(container) = self.container_el() else {
            return Vec::new();
        };
        let Ok(nodes) = container.query_selector_all(FOCUSABLE_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|idx| nodes.get(idx))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .filter(visible)
            .collect()
    }

    fn container(&self) -> Option<HtmlElement> {
        self.container_el()
    }

    fn contains(&self, element: &HtmlElement) -> bool {
        let node: &Node = element;
        self.container_el()
            .is_some_and(|container| container.contains(Some(node)))
    }

    fn focus(&self, element: &HtmlElement) {
        let _ = element.focus();
    }

    fn can_focus(&self, element: &HtmlElement) -> bool {
        element.is_connected() && !element.has_attribute("disabled")
    }

    fn set_open(&mut self, open: bool) {
        if let Some(container) = self.container_el() {
            let _ = if open {
                container.class_list().add_1("is-open")
            } else {
                container.class_list().remove_1("is-open")
            };
            container.set_hidden(!open);
            if open {
                let _ = container.set_attribute("aria-modal", "true");
                if !container.has_attribute("tabindex") {
                    let _ = container.set_attribute("tabindex", "-1");
                }
            } else {
                let _ = container.remove_attribute("aria-modal");
            }
        }
        if let Some(trigger) = self.trigger_el() {
            let _ = trigger.set_attribute("aria-expanded", if open { "true" } else { "false" });
        }
    }

    fn listen_keys(&mut self) -> KeyListener {
        KeyListener::install(self.trap.clone())
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = dom::document().and_then(|doc| doc.body()) else {
            return;
        };
        let style = body.style();
        let _ = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
    }
}

/// Document `keydown` listener routed to one trap; removed on drop.
pub struct KeyListener {
    registration: Option<(Document, Closure<dyn FnMut(KeyboardEvent)>)>,
}

impl KeyListener {
    fn install(trap: WeakTrap) -> Self {
        let Some(document) = dom::document() else {
            return Self { registration: None };
        };
        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let Some(trap) = trap.upgrade() else {
                return;
            };
            let Ok(mut trap) = trap.try_borrow_mut() else {
                return;
            };
            let press = KeyPress::new(Key::from_dom(&event.key()), event.shift_key());
            if trap.handle_key(press).prevents_default() {
                event.prevent_default();
            }
        });
        if let Err(err) =
            document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
        {
            log::warn!(
                "could not install focus trap key listener: {}",
                dom::js_error_message(&err)
            );
            return Self { registration: None };
        }
        Self {
            registration: Some((document, closure)),
        }
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Some((document, closure)) = self.registration.take() {
            let _ = document
                .remove_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        }
    }
}

/// Shared handle to one focus trap bound to DOM ids.
#[derive(Clone)]
pub struct ModalHandle {
    ids: ModalIds,
    trap: SharedTrap,
}

impl PartialEq for ModalHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.trap, &other.trap)
    }
}

impl ModalHandle {
    #[must_use]
    pub fn new(ids: ModalIds, options: TrapOptions) -> Self {
        let trap = Rc::new_cyclic(|weak: &WeakTrap| {
            RefCell::new(FocusTrap::new(
                DomFocusHost {
                    ids,
                    trap: weak.clone(),
                },
                options,
            ))
        });
        Self { ids, trap }
    }

    #[must_use]
    pub const fn ids(&self) -> ModalIds {
        self.ids
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.trap.try_borrow().is_ok_and(|trap| trap.is_open())
    }

    fn with_trap(&self, f: impl FnOnce(&mut FocusTrap<DomFocusHost>)) {
        if let Ok(mut trap) = self.trap.try_borrow_mut() {
            f(&mut *trap);
        }
    }

    pub fn open(&self) {
        self.with_trap(FocusTrap::open);
    }

    pub fn close(&self) {
        self.with_trap(FocusTrap::close);
    }

    pub fn toggle(&self) {
        self.with_trap(FocusTrap::toggle);
    }

    /// Refocus inside the container if a re-render took focus away.
    pub fn retain_focus(&self) {
        self.with_trap(|trap| trap.retain_focus());
    }

    pub fn link_selected(&self) {
        self.with_trap(FocusTrap::link_selected);
    }

    /// Route a document-level pointer event. The composed path is captured at
    /// dispatch, so targets detached by a re-render still count as inside.
    pub fn pointer(&self, event: &Event) {
        let target = self.classify(event);
        self.with_trap(|trap| trap.handle_pointer(target));
    }

    fn classify(&self, event: &Event) -> PointerTarget {
        let container = dom::by_id(self.ids.container).map(Node::from);
        let trigger = dom::by_id(self.ids.trigger).map(Node::from);
        let path = event.composed_path();
        let in_path = |node: &Option<Node>| {
            node.as_ref().is_some_and(|node| {
                path.iter()
                    .filter_map(|value| value.dyn_into::<Node>().ok())
                    .any(|hop| hop.is_same_node(Some(node)))
            })
        };
        if in_path(&trigger) {
            PointerTarget::Trigger
        } else if in_path(&container) {
            PointerTarget::Container
        } else {
            PointerTarget::Outside
        }
    }
}

/// Document `click` listener feeding a trap's outside-pointer rule.
pub struct PointerListener {
    registration: Option<(EventTarget, Closure<dyn FnMut(Event)>)>,
}

impl PointerListener {
    #[must_use]
    pub fn install(handle: ModalHandle) -> Self {
        let Some(document) = dom::document() else {
            return Self { registration: None };
        };
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handle.pointer(&event));
        let target: EventTarget = document.into();
        if target
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .is_err()
        {
            return Self { registration: None };
        }
        Self {
            registration: Some((target, closure)),
        }
    }
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        if let Some((target, closure)) = self.registration.take() {
            let _ =
                target.remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
    }
}
