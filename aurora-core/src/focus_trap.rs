//! Modal focus trap shared by the cart panel and the mobile navigation drawer.
//!
//! The trap is a two-state machine (Closed, Open) over a [`FocusHost`], which
//! owns the actual elements. While open exactly one key listener is held;
//! dropping it uninstalls it.

/// Selector for candidate focusable descendants, before the visibility filter.
pub const FOCUSABLE_SELECTOR: &str = "a[href], button:not([disabled]), textarea, input, select, [tabindex]:not([tabindex^='-'])";

/// Visibility rule applied on top of [`FOCUSABLE_SELECTOR`].
#[must_use]
pub fn is_rendered(width: f64, height: f64, rect_count: u32) -> bool {
    width > 0.0 || height > 0.0 || rect_count > 0
}

/// Element access the trap needs from its environment.
pub trait FocusHost {
    type Element: Clone + PartialEq;
    /// Uninstalls the key listener when dropped.
    type Listener;

    /// Focused element, or `None` when focus rests on the document itself.
    fn active_element(&self) -> Option<Self::Element>;

    /// Visible focusable descendants of the container, in document order.
    fn focusable(&self) -> Vec<Self::Element>;

    fn container(&self) -> Option<Self::Element>;

    /// Whether `element` is the container or one of its descendants.
    fn contains(&self, element: &Self::Element) -> bool;

    fn focus(&self, element: &Self::Element);

    /// Whether the element can still take focus (attached, not disabled).
    fn can_focus(&self, element: &Self::Element) -> bool;

    /// Toggle container visibility and its modal semantics.
    fn set_open(&mut self, open: bool);

    fn listen_keys(&mut self) -> Self::Listener;

    fn set_scroll_locked(&mut self, locked: bool) {
        let _ = locked;
    }
}

/// Per-instance behaviour on top of the shared trap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrapOptions {
    pub lock_scroll: bool,
    pub close_on_outside_pointer: bool,
    pub close_on_link: bool,
}

impl TrapOptions {
    #[must_use]
    pub const fn cart_panel() -> Self {
        Self {
            lock_scroll: false,
            close_on_outside_pointer: true,
            close_on_link: false,
        }
    }

    #[must_use]
    pub const fn mobile_nav() -> Self {
        Self {
            lock_scroll: true,
            close_on_outside_pointer: false,
            close_on_link: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    #[must_use]
    pub const fn new(key: Key, shift: bool) -> Self {
        Self { key, shift }
    }
}

/// What the trap did with a key press. Anything but `Ignored` should
/// suppress the browser default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Wrapped,
    Closed,
}

impl KeyOutcome {
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Where a pointer interaction landed relative to the trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Container,
    Trigger,
    Outside,
}

pub struct FocusTrap<H: FocusHost> {
    host: H,
    options: TrapOptions,
    open: bool,
    trigger: Option<H::Element>,
    key_listener: Option<H::Listener>,
}

impl<H: FocusHost> FocusTrap<H> {
    pub const fn new(host: H, options: TrapOptions) -> Self {
        Self {
            host,
            options,
            open: false,
            trigger: None,
            key_listener: None,
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn has_key_listener(&self) -> bool {
        self.key_listener.is_some()
    }

    #[must_use]
    pub const fn options(&self) -> TrapOptions {
        self.options
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    pub fn open(&mut self) {
        if self.open {
            self.focus_first();
            return;
        }
        self.trigger = self.host.active_element();
        self.open = true;
        self.host.set_open(true);
        if self.options.lock_scroll {
            self.host.set_scroll_locked(true);
        }
        self.focus_first();
        if self.key_listener.is_none() {
            self.key_listener = Some(self.host.listen_keys());
        }
    }

    /// Close and hand focus back to the trigger, unless the user already
    /// moved it to something outside the container.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        let restore = self
            .host
            .active_element()
            .is_none_or(|active| self.host.contains(&active));
        self.open = false;
        self.host.set_open(false);
        self.key_listener = None;
        if self.options.lock_scroll {
            self.host.set_scroll_locked(false);
        }
        let trigger = self.trigger.take();
        if restore
            && let Some(trigger) = trigger
            && self.host.can_focus(&trigger)
        {
            self.host.focus(&trigger);
        }
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        if !self.open {
            return KeyOutcome::Ignored;
        }
        match press.key {
            Key::Escape => {
                self.close();
                KeyOutcome::Closed
            }
            Key::Tab => self.cycle(press.shift),
            Key::Other => KeyOutcome::Ignored,
        }
    }

    pub fn handle_pointer(&mut self, target: PointerTarget) {
        if self.open && target == PointerTarget::Outside && self.options.close_on_outside_pointer {
            self.close();
        }
    }

    /// A navigation link inside the container was chosen.
    pub fn link_selected(&mut self) {
        if self.options.close_on_link {
            self.close();
        }
    }

    /// Pull focus back inside after the container's content changed, e.g.
    /// when the focused element was removed.
    pub fn retain_focus(&self) {
        if self.open && !self.focus_inside() {
            self.focus_first();
        }
    }

    fn focus_inside(&self) -> bool {
        self.host
            .active_element()
            .is_some_and(|active| self.host.contains(&active))
    }

    fn focus_first(&self) {
        if let Some(first) = self.host.focusable().into_iter().next() {
            self.host.focus(&first);
        } else if let Some(container) = self.host.container() {
            self.host.focus(&container);
        }
    }

    fn cycle(&self, backwards: bool) -> KeyOutcome {
        let focusable = self.host.focusable();
        let (Some(first), Some(last)) = (focusable.first(), focusable.last()) else {
            return KeyOutcome::Ignored;
        };
        let Some(active) = self
            .host
            .active_element()
            .filter(|active| self.host.contains(active))
        else {
            self.host.focus(if backwards { last } else { first });
            return KeyOutcome::Wrapped;
        };
        if !backwards && active == *last {
            self.host.focus(first);
            KeyOutcome::Wrapped
        } else if backwards && active == *first {
            self.host.focus(last);
            KeyOutcome::Wrapped
        } else {
            KeyOutcome::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const CONTAINER: u32 = 100;

    #[derive(Default)]
    struct Page {
        focused: Cell<Option<u32>>,
        detached: RefCell<Vec<u32>>,
        listeners: Cell<usize>,
        scroll_locked: Cell<bool>,
        visible: Cell<bool>,
    }

    struct Listener(Rc<Page>);

    impl Drop for Listener {
        fn drop(&mut self) {
            self.0.listeners.set(self.0.listeners.get() - 1);
        }
    }

    struct FakeHost {
        page: Rc<Page>,
        container: u32,
        focusable: Vec<u32>,
        shown: bool,
    }

    impl FocusHost for FakeHost {
        type Element = u32;
        type Listener = Listener;

        fn active_element(&self) -> Option<u32> {
            self.page.focused.get()
        }

        fn focusable(&self) -> Vec<u32> {
            if self.shown {
                self.focusable.clone()
            } else {
                Vec::new()
            }
        }

        fn container(&self) -> Option<u32> {
            Some(self.container)
        }

        fn contains(&self, element: &u32) -> bool {
            *element == self.container || self.focusable.contains(element)
        }

        fn focus(&self, element: &u32) {
            self.page.focused.set(Some(*element));
        }

        fn can_focus(&self, element: &u32) -> bool {
            !self.page.detached.borrow().contains(element)
        }

        fn set_open(&mut self, open: bool) {
            self.shown = open;
            self.page.visible.set(open);
        }

        fn listen_keys(&mut self) -> Listener {
            self.page.listeners.set(self.page.listeners.get() + 1);
            Listener(self.page.clone())
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.page.scroll_locked.set(locked);
        }
    }

    fn trap(focusable: &[u32], options: TrapOptions) -> (FocusTrap<FakeHost>, Rc<Page>) {
        let page = Rc::new(Page::default());
        page.focused.set(Some(1));
        (trap_on(&page, CONTAINER, focusable, options), page)
    }

    fn trap_on(
        page: &Rc<Page>,
        container: u32,
        focusable: &[u32],
        options: TrapOptions,
    ) -> FocusTrap<FakeHost> {
        let host = FakeHost {
            page: page.clone(),
            container,
            focusable: focusable.to_vec(),
            shown: false,
        };
        FocusTrap::new(host, options)
    }

    const TAB: KeyPress = KeyPress::new(Key::Tab, false);
    const SHIFT_TAB: KeyPress = KeyPress::new(Key::Tab, true);

    #[test]
    fn open_focuses_first_descendant_and_listens() {
        let (mut trap, page) = trap(&[10, 11, 12], TrapOptions::cart_panel());
        trap.open();
        assert!(trap.is_open());
        assert!(page.visible.get());
        assert_eq!(page.focused.get(), Some(10));
        assert_eq!(page.listeners.get(), 1);
    }

    #[test]
    fn opening_twice_keeps_single_listener() {
        let (mut trap, page) = trap(&[10, 11], TrapOptions::cart_panel());
        trap.open();
        page.focused.set(Some(11));
        trap.open();
        assert_eq!(page.listeners.get(), 1);
        assert_eq!(page.focused.get(), Some(10));
        trap.close();
        assert_eq!(page.focused.get(), Some(1), "trigger from first open is kept");
    }

    #[test]
    fn open_without_focusable_focuses_container() {
        let (mut trap, page) = trap(&[], TrapOptions::cart_panel());
        trap.open();
        assert_eq!(page.focused.get(), Some(CONTAINER));
    }

    #[test]
    fn close_restores_focus_and_drops_listener() {
        let (mut trap, page) = trap(&[10, 11], TrapOptions::cart_panel());
        trap.open();
        trap.close();
        assert!(!trap.is_open());
        assert!(!page.visible.get());
        assert_eq!(page.listeners.get(), 0);
        assert!(!trap.has_key_listener());
        assert_eq!(page.focused.get(), Some(1));
    }

    #[test]
    fn close_skips_detached_trigger() {
        let (mut trap, page) = trap(&[10, 11], TrapOptions::cart_panel());
        trap.open();
        page.detached.borrow_mut().push(1);
        trap.close();
        assert_eq!(page.focused.get(), Some(10));
    }

    #[test]
    fn tab_wraps_forward_from_last() {
        let (mut trap, page) = trap(&[10, 11, 12], TrapOptions::cart_panel());
        trap.open();
        page.focused.set(Some(12));
        assert_eq!(trap.handle_key(TAB), KeyOutcome::Wrapped);
        assert_eq!(page.focused.get(), Some(10));
    }

    #[test]
    fn shift_tab_wraps_backward_from_first() {
        let (mut trap, page) = trap(&[10, 11, 12], TrapOptions::cart_panel());
        trap.open();
        assert_eq!(trap.handle_key(SHIFT_TAB), KeyOutcome::Wrapped);
        assert_eq!(page.focused.get(), Some(12));
    }

    #[test]
    fn interior_tabs_use_browser_default() {
        let (mut trap, page) = trap(&[10, 11, 12], TrapOptions::cart_panel());
        trap.open();
        page.focused.set(Some(11));
        assert_eq!(trap.handle_key(TAB), KeyOutcome::Ignored);
        assert_eq!(trap.handle_key(SHIFT_TAB), KeyOutcome::Ignored);
        page.focused.set(Some(10));
        assert_eq!(trap.handle_key(TAB), KeyOutcome::Ignored);
        assert_eq!(
            trap.handle_key(KeyPress::new(Key::Other, false)),
            KeyOutcome::Ignored
        );
    }

    #[test]
    fn escape_closes() {
        let (mut trap, page) = trap(&[10], TrapOptions::mobile_nav());
        trap.open();
        let outcome = trap.handle_key(KeyPress::new(Key::Escape, false));
        assert_eq!(outcome, KeyOutcome::Closed);
        assert!(outcome.prevents_default());
        assert!(!trap.is_open());
        assert_eq!(page.focused.get(), Some(1));
    }

    #[test]
    fn keys_while_closed_are_ignored() {
        let (mut trap, _page) = trap(&[10], TrapOptions::cart_panel());
        assert_eq!(
            trap.handle_key(KeyPress::new(Key::Escape, false)),
            KeyOutcome::Ignored
        );
        assert_eq!(trap.handle_key(TAB), KeyOutcome::Ignored);
    }

    #[test]
    fn outside_pointer_closes_cart_panel_only() {
        let (mut cart, _) = trap(&[10], TrapOptions::cart_panel());
        cart.open();
        cart.handle_pointer(PointerTarget::Container);
        cart.handle_pointer(PointerTarget::Trigger);
        assert!(cart.is_open());
        cart.handle_pointer(PointerTarget::Outside);
        assert!(!cart.is_open());

        let (mut nav, _) = trap(&[10], TrapOptions::mobile_nav());
        nav.open();
        nav.handle_pointer(PointerTarget::Outside);
        assert!(nav.is_open());
    }

    #[test]
    fn mobile_nav_locks_scroll_and_closes_on_link() {
        let (mut nav, page) = trap(&[10, 11], TrapOptions::mobile_nav());
        nav.open();
        assert!(page.scroll_locked.get());
        nav.link_selected();
        assert!(!nav.is_open());
        assert!(!page.scroll_locked.get());

        let (mut cart, _) = trap(&[10], TrapOptions::cart_panel());
        cart.open();
        cart.link_selected();
        assert!(cart.is_open());
    }

    #[test]
    fn outside_close_leaves_focus_with_another_drawer() {
        let page = Rc::new(Page::default());
        page.focused.set(Some(1));
        let mut cart = trap_on(&page, CONTAINER, &[10, 11], TrapOptions::cart_panel());
        let mut nav = trap_on(&page, 200, &[20, 21], TrapOptions::mobile_nav());

        cart.open();
        page.focused.set(Some(2));
        nav.open();
        assert_eq!(page.focused.get(), Some(20));
        cart.handle_pointer(PointerTarget::Outside);

        assert!(!cart.is_open());
        assert!(nav.is_open());
        assert_eq!(page.focused.get(), Some(20));
        page.focused.set(Some(21));
        assert_eq!(nav.handle_key(TAB), KeyOutcome::Wrapped);
        assert_eq!(page.focused.get(), Some(20));
    }

    #[test]
    fn close_restores_trigger_when_focus_was_lost() {
        let (mut trap, page) = trap(&[10, 11], TrapOptions::cart_panel());
        trap.open();
        page.focused.set(None);
        trap.close();
        assert_eq!(page.focused.get(), Some(1));
    }

    #[test]
    fn tab_recovers_focus_that_left_the_container() {
        let (mut trap, page) = trap(&[10, 11, 12], TrapOptions::cart_panel());
        trap.open();
        page.focused.set(None);
        assert_eq!(trap.handle_key(TAB), KeyOutcome::Wrapped);
        assert_eq!(page.focused.get(), Some(10));

        page.focused.set(Some(1));
        assert_eq!(trap.handle_key(SHIFT_TAB), KeyOutcome::Wrapped);
        assert_eq!(page.focused.get(), Some(12));
    }

    #[test]
    fn retain_focus_refocuses_only_when_focus_escaped() {
        let (mut trap, page) = trap(&[10, 11], TrapOptions::cart_panel());
        trap.retain_focus();
        assert_eq!(page.focused.get(), Some(1), "closed trap leaves focus alone");

        trap.open();
        page.focused.set(Some(11));
        trap.retain_focus();
        assert_eq!(page.focused.get(), Some(11));

        page.focused.set(None);
        trap.retain_focus();
        assert_eq!(page.focused.get(), Some(10));
    }

    #[test]
    fn toggle_flips_state() {
        let (mut trap, page) = trap(&[10], TrapOptions::cart_panel());
        trap.toggle();
        assert!(trap.is_open());
        trap.toggle();
        assert!(!trap.is_open());
        assert_eq!(page.listeners.get(), 0);
    }

    #[test]
    fn visibility_rule_requires_size_or_rects() {
        assert!(!is_rendered(0.0, 0.0, 0));
        assert!(is_rendered(0.0, 0.0, 1));
        assert!(is_rendered(12.0, 0.0, 0));
        assert!(Key::from_dom("Esc") == Key::Escape);
        assert!(Key::from_dom("a") == Key::Other);
    }
}
