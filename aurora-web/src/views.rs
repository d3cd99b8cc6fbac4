//! Yew-backed implementations of the core render seams, plus the timers that
//! drive transient effects.

use aurora_core::{CartSnapshot, CartView, ProductSelection, SelectionView, Variant};
use gloo_timers::callback::Timeout;
use yew::UseStateHandle;

/// Cart list, total and count badge.
pub struct CartPanelView {
    snapshot: UseStateHandle<CartSnapshot>,
    count: UseStateHandle<u64>,
}

impl CartPanelView {
    #[must_use]
    pub fn new(snapshot: &UseStateHandle<CartSnapshot>, count: &UseStateHandle<u64>) -> Self {
        Self {
            snapshot: snapshot.clone(),
            count: count.clone(),
        }
    }
}

impl CartView for CartPanelView {
    fn render_cart(&mut self, snapshot: &CartSnapshot) {
        self.snapshot.set(snapshot.clone());
    }

    fn show_count(&mut self, count: u64) {
        self.count.set(count);
    }

    fn announce(&mut self, message: &str) {
        crate::a11y::set_status(message);
    }
}

/// What the product panel shows for the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDisplay {
    pub variant: Variant,
    pub color: String,
    pub price: String,
    pub upgrade_note: bool,
}

impl SelectionDisplay {
    #[must_use]
    pub fn of(selection: &ProductSelection) -> Self {
        let current = selection.selection();
        Self {
            variant: current.variant,
            color: current.color.clone(),
            price: selection
                .catalog()
                .format_price(u64::from(selection.price())),
            upgrade_note: current.variant == Variant::Standard,
        }
    }
}

/// Collects selection updates and publishes them in one state change.
pub struct SelectionPanelView {
    handle: UseStateHandle<SelectionDisplay>,
    draft: SelectionDisplay,
}

impl SelectionPanelView {
    #[must_use]
    pub fn new(handle: &UseStateHandle<SelectionDisplay>) -> Self {
        Self {
            draft: (**handle).clone(),
            handle: handle.clone(),
        }
    }

    pub fn commit(self) {
        if *self.handle != self.draft {
            self.handle.set(self.draft);
        }
    }
}

impl SelectionView for SelectionPanelView {
    fn mark_variant(&mut self, variant: Variant) {
        self.draft.variant = variant;
    }

    fn show_price(&mut self, _price: u32, formatted: &str) {
        self.draft.price = formatted.to_string();
    }

    fn show_upgrade_note(&mut self, visible: bool) {
        self.draft.upgrade_note = visible;
    }

    fn mark_color(&mut self, color: &str) {
        self.draft.color = color.to_string();
    }
}

/// Background image currently painted, and whether it is faded out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFrame {
    pub src: String,
    pub fading: bool,
}

/// A single pending timer. Scheduling again drops, and so cancels, the
/// previous one.
#[derive(Default)]
pub struct PendingTimer(Option<Timeout>);

impl PendingTimer {
    pub fn schedule(&mut self, millis: u32, callback: impl FnOnce() + 'static) {
        self.0 = Some(Timeout::new(millis, callback));
    }

    pub fn cancel(&mut self) {
        if let Some(timeout) = self.0.take() {
            timeout.cancel();
        }
    }
}
