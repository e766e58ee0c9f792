//! The context menu controller.
//!
//! A [`ContextMenu`] owns its entries, builds its popup lazily, and turns
//! row activations into results for the caller. Results are delivered three
//! ways, in this order, after the popup chain has closed:
//!
//! 1. subscribers registered with [`ContextMenu::subscribe`] are notified,
//! 2. the item's callback runs,
//! 3. the [`ItemHandle`] returned by `add_item` reflects the new check state.
//!
//! Submenus are child controllers owned by their parent entry. Only one
//! child per menu is open at a time; input is routed down the open chain.

use crate::host::{ContextTarget, Env, TargetId};
use crate::icon::Icon;
use crate::item::{ItemHandle, ItemOptions, MenuEntry};
use crate::popup::{CloseReason, Popup, PopupMessage};
use crate::theme::Theme;
use fluent_menu_core::{Canvas, Event, Point, Widget};
use std::fmt;
use std::sync::Arc;

/// Payload passed to subscribers when an action item is selected.
#[derive(Debug, Clone, Copy)]
pub struct ActionTriggered<'a> {
    /// Item label
    pub text: &'a str,
    /// The selected item
    pub item: &'a ItemHandle,
}

/// Token for removing a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ActionTriggered<'_>)>;

/// Outcome of [`ContextMenu::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// No popup was open; the host should process the event itself.
    Ignored,
    /// The menu consumed the event and is still open.
    Handled,
    /// The menu consumed the event and every popup is now closed.
    Closed(CloseReason),
}

impl EventResponse {
    /// Whether the menu consumed the event.
    #[must_use]
    pub const fn is_consumed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

enum Routed {
    Ignored,
    Handled,
    Closed(CloseReason),
    // Entry indices from the receiving menu down to the activated row
    Activate(Vec<usize>),
}

/// A custom-drawn context menu.
///
/// # Examples
///
/// ```
/// use fluent_menu::{ContextMenu, Env, EventResponse, ItemOptions, StaticScreens};
/// use fluent_menu_core::{Event, FixedWidthMetrics, Key, Point, Rect};
///
/// let screens = StaticScreens::single(Rect::new(0.0, 0.0, 1920.0, 1080.0));
/// let text = FixedWidthMetrics::default();
/// let env = Env::new(&screens, &text);
///
/// let mut menu = ContextMenu::new(true);
/// let grid = menu.add_item(
///     "Show Grid",
///     ItemOptions::default().checkable(true).checked(true),
/// );
/// menu.show_at(Point::new(200.0, 150.0), env);
/// assert!(menu.is_open());
///
/// menu.handle_event(&Event::KeyDown { key: Key::Down }, env);
/// let response = menu.handle_event(&Event::KeyDown { key: Key::Enter }, env);
/// assert!(matches!(response, EventResponse::Closed(_)));
/// assert!(grid.checked());
/// ```
pub struct ContextMenu {
    entries: Vec<MenuEntry>,
    theme: Arc<Theme>,
    popup: Option<Popup>,
    attached: Vec<TargetId>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    open_child: Option<usize>,
}

impl ContextMenu {
    /// Create an empty menu with the built-in light or dark theme.
    #[must_use]
    pub fn new(dark_mode: bool) -> Self {
        Self::with_theme(Theme::for_mode(dark_mode))
    }

    /// Create an empty menu with a specific theme.
    #[must_use]
    pub fn with_theme(theme: Arc<Theme>) -> Self {
        Self {
            entries: Vec::new(),
            theme,
            popup: None,
            attached: Vec::new(),
            subscribers: Vec::new(),
            next_subscription: 0,
            open_child: None,
        }
    }

    // =========================================================================
    // Theme
    // =========================================================================

    /// Whether the dark palette is in use.
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.theme.is_dark()
    }

    /// Switch between the built-in light and dark themes.
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        if self.dark_mode() != dark_mode {
            self.set_theme(Theme::for_mode(dark_mode));
        }
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Apply a theme to this menu and every submenu.
    ///
    /// A cached popup is re-themed in place when the metrics match; otherwise
    /// it is discarded and rebuilt on the next show.
    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        if let Some(popup) = &mut self.popup {
            if !popup.set_theme(Arc::clone(&theme)) {
                self.invalidate();
            }
        }
        for entry in &mut self.entries {
            if let MenuEntry::Submenu { menu, .. } = entry {
                menu.set_theme(Arc::clone(&theme));
            }
        }
        self.theme = theme;
    }

    // =========================================================================
    // Building
    // =========================================================================

    /// Append an action item and return a handle to its state.
    pub fn add_item(&mut self, text: impl Into<String>, mut options: ItemOptions) -> ItemHandle {
        let item = ItemHandle::new(text, &options);
        self.entries.push(MenuEntry::Action {
            item: item.clone(),
            callback: options.callback.take(),
        });
        self.invalidate();
        item
    }

    /// Append a separator.
    pub fn add_separator(&mut self) {
        self.entries.push(MenuEntry::Separator);
        self.invalidate();
    }

    /// Append a submenu entry and return the child menu to populate.
    ///
    /// The child starts with this menu's theme and is owned by this menu.
    pub fn add_submenu(&mut self, text: impl Into<String>, icon: Option<Icon>) -> &mut Self {
        self.entries.push(MenuEntry::Submenu {
            item: ItemHandle::submenu(text, icon),
            menu: Box::new(Self::with_theme(Arc::clone(&self.theme))),
        });
        self.invalidate();
        match self.entries.last_mut() {
            Some(MenuEntry::Submenu { menu, .. }) => &mut **menu,
            _ => unreachable!("submenu entry was just pushed"),
        }
    }

    /// Remove every entry, dropping submenus with them.
    pub fn clear(&mut self) {
        self.invalidate();
        self.entries.clear();
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Number of entries, separators included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the menu has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item at `index`, unless it is a separator.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&ItemHandle> {
        self.entries.get(index).and_then(MenuEntry::item)
    }

    /// Child menu of the submenu entry at `index`.
    #[must_use]
    pub fn submenu(&self, index: usize) -> Option<&Self> {
        match self.entries.get(index)? {
            MenuEntry::Submenu { menu, .. } => Some(&**menu),
            _ => None,
        }
    }

    /// Mutable child menu of the submenu entry at `index`.
    pub fn submenu_mut(&mut self, index: usize) -> Option<&mut Self> {
        match self.entries.get_mut(index)? {
            MenuEntry::Submenu { menu, .. } => Some(&mut **menu),
            _ => None,
        }
    }

    // =========================================================================
    // Notification
    // =========================================================================

    /// Register a listener for selected action items.
    pub fn subscribe(&mut self, listener: impl FnMut(&ActionTriggered<'_>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    // =========================================================================
    // Attach / detach
    // =========================================================================

    /// Open this menu when `target` requests a context menu. Idempotent.
    pub fn attach(&mut self, target: &dyn ContextTarget) {
        let id = target.id();
        if !self.attached.contains(&id) {
            log::debug!("menu attached to {id}");
            self.attached.push(id);
        }
    }

    /// Stop reacting to `target`. Does nothing if it was not attached.
    pub fn detach(&mut self, target: &dyn ContextTarget) {
        let id = target.id();
        self.attached.retain(|t| *t != id);
    }

    /// Whether `target` is attached.
    #[must_use]
    pub fn is_attached(&self, target: &dyn ContextTarget) -> bool {
        self.attached.contains(&target.id())
    }

    /// Forward a context request from `target` at its local point `local`.
    ///
    /// Returns true if the menu was shown.
    pub fn context_requested(
        &mut self,
        target: &dyn ContextTarget,
        local: Point,
        env: Env<'_>,
    ) -> bool {
        if !self.is_attached(target) {
            return false;
        }
        self.show_at(target.map_to_global(local), env);
        true
    }

    // =========================================================================
    // Showing
    // =========================================================================

    /// Show the menu at a screen position.
    pub fn show_at(&mut self, point: Point, env: Env<'_>) {
        self.close_children();
        self.ensure_popup(env).show_at(point, env.screens);
    }

    /// Close this menu and any open submenus.
    pub fn close(&mut self) {
        if let Some(popup) = &mut self.popup {
            popup.hide();
        }
        self.close_children();
    }

    /// Whether the popup is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.popup.as_ref().is_some_and(Popup::is_visible)
    }

    /// The cached popup, visible or not.
    #[must_use]
    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    /// The submenu currently open from this menu.
    #[must_use]
    pub fn open_submenu(&self) -> Option<&Self> {
        self.open_child.and_then(|i| self.submenu(i))
    }

    /// Paint every open popup, parent before child.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        if let Some(popup) = self.popup.as_ref().filter(|p| p.is_visible()) {
            popup.paint(canvas);
        }
        if let Some(child) = self.open_submenu() {
            child.paint(canvas);
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed one host event, in screen coordinates, to the open menu chain.
    pub fn handle_event(&mut self, event: &Event, env: Env<'_>) -> EventResponse {
        match self.route(event) {
            Routed::Ignored => EventResponse::Ignored,
            Routed::Handled => EventResponse::Handled,
            Routed::Closed(reason) => {
                self.close_children();
                EventResponse::Closed(reason)
            }
            Routed::Activate(path) => self.resolve(&path, env),
        }
    }

    fn route(&mut self, event: &Event) -> Routed {
        if !self.is_open() {
            return Routed::Ignored;
        }

        if let Some(index) = self.open_child {
            if let Some(child) = self.submenu_mut(index).filter(|c| c.is_open()) {
                let inside = event.position().is_some_and(|p| child.chain_contains(p));
                if event.is_keyboard() || inside {
                    return match child.route(event) {
                        Routed::Closed(_) => {
                            self.open_child = None;
                            if let Some(popup) = &mut self.popup {
                                popup.event(&Event::FocusIn);
                            }
                            Routed::Handled
                        }
                        Routed::Activate(mut path) => {
                            path.insert(0, index);
                            Routed::Activate(path)
                        }
                        other => other,
                    };
                }
                if matches!(event, Event::MouseDown { .. }) {
                    self.close_children();
                }
            } else {
                self.open_child = None;
            }
        }

        let Some(popup) = &mut self.popup else {
            return Routed::Ignored;
        };
        match popup.event(event) {
            Some(PopupMessage::Selected(index)) => Routed::Activate(vec![index]),
            Some(PopupMessage::Closed(reason)) => {
                self.close_children();
                Routed::Closed(reason)
            }
            None => Routed::Handled,
        }
    }

    fn resolve(&mut self, path: &[usize], env: Env<'_>) -> EventResponse {
        let Some((&index, parents)) = path.split_last() else {
            return EventResponse::Handled;
        };
        let Some(target) = self.menu_at_mut(parents) else {
            return EventResponse::Handled;
        };

        if target.entries.get(index).is_some_and(MenuEntry::is_submenu) {
            target.open_submenu_at(index, env);
            return EventResponse::Handled;
        }

        self.close();
        if let Some(target) = self.menu_at_mut(parents) {
            target.trigger(index);
        }
        EventResponse::Closed(CloseReason::Selection)
    }

    fn open_submenu_at(&mut self, index: usize, env: Env<'_>) {
        let Some(anchor) = self.popup.as_ref().map(Popup::submenu_anchor) else {
            return;
        };
        if self.open_child != Some(index) {
            self.close_children();
        }
        let Some(child) = self.submenu_mut(index) else {
            return;
        };
        child.show_at(anchor, env);
        self.open_child = Some(index);
        if let Some(popup) = &mut self.popup {
            popup.event(&Event::FocusOut);
        }
        log::debug!("opened submenu at entry {index}");
    }

    fn trigger(&mut self, index: usize) {
        let Self {
            entries,
            subscribers,
            ..
        } = self;
        let Some(MenuEntry::Action { item, callback }) = entries.get_mut(index) else {
            return;
        };

        log::debug!("triggered {:?}", item.text());
        let event = ActionTriggered {
            text: item.text(),
            item,
        };
        for (_, listener) in subscribers.iter_mut() {
            listener(&event);
        }
        if let Some(callback) = callback {
            callback();
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_popup(&mut self, env: Env<'_>) -> &mut Popup {
        let stale = self
            .popup
            .as_mut()
            .is_some_and(|p| !p.set_theme(Arc::clone(&self.theme)));
        if stale {
            self.popup = None;
        }
        self.popup
            .get_or_insert_with(|| Popup::build(&self.entries, Arc::clone(&self.theme), env.metrics))
    }

    fn invalidate(&mut self) {
        self.close_children();
        if self.popup.take().is_some() {
            log::debug!("popup invalidated");
        }
    }

    fn close_children(&mut self) {
        if let Some(index) = self.open_child.take() {
            if let Some(child) = self.submenu_mut(index) {
                child.close();
            }
        }
    }

    fn chain_contains(&self, point: Point) -> bool {
        self.popup.as_ref().is_some_and(|p| p.contains(point))
            || self.open_submenu().is_some_and(|c| c.chain_contains(point))
    }

    fn menu_at_mut(&mut self, path: &[usize]) -> Option<&mut Self> {
        match path.split_first() {
            None => Some(self),
            Some((&index, rest)) => self.submenu_mut(index)?.menu_at_mut(rest),
        }
    }
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self::new(false)
    }
}

impl fmt::Debug for ContextMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenu")
            .field("entries", &self.entries)
            .field("variant", &self.theme.variant)
            .field("open", &self.is_open())
            .field("attached", &self.attached)
            .field("subscribers", &self.subscribers.len())
            .field("open_child", &self.open_child)
            .finish_non_exhaustive()
    }
}
