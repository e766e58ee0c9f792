//! Menu entries and the shared item record.

use crate::controller::ContextMenu;
use crate::icon::Icon;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Action callback, invoked after the popup closes.
pub type Callback = Box<dyn FnMut()>;

#[derive(Debug)]
struct ItemState {
    text: String,
    shortcut: Option<String>,
    icon: Icon,
    enabled: Cell<bool>,
    // None: not checkable
    check: Option<Cell<bool>>,
}

/// Shared handle to an item's state.
///
/// Returned by [`ContextMenu::add_item`] and passed to subscribers. Clones
/// refer to the same item, so `checked` and `enabled` can be read or changed
/// from anywhere at any time.
///
/// # Examples
///
/// ```
/// use fluent_menu::{ContextMenu, ItemOptions};
///
/// let mut menu = ContextMenu::new(false);
/// let wrap = menu.add_item("Word Wrap", ItemOptions::default().checkable(true));
/// wrap.set_checked(true);
/// assert!(menu.item(0).map_or(false, |item| item.checked()));
/// ```
#[derive(Clone)]
pub struct ItemHandle(Rc<ItemState>);

impl ItemHandle {
    pub(crate) fn new(text: impl Into<String>, options: &ItemOptions) -> Self {
        Self(Rc::new(ItemState {
            text: text.into(),
            shortcut: options.shortcut.clone(),
            icon: options.icon.clone().unwrap_or_default(),
            enabled: Cell::new(options.enabled),
            check: options.checkable.then(|| Cell::new(options.checked)),
        }))
    }

    pub(crate) fn submenu(text: impl Into<String>, icon: Option<Icon>) -> Self {
        Self::new(
            text,
            &ItemOptions {
                icon,
                ..ItemOptions::default()
            },
        )
    }

    /// Label text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Shortcut label, display only.
    #[must_use]
    pub fn shortcut(&self) -> Option<&str> {
        self.0.shortcut.as_deref()
    }

    /// Icon; the null icon when none was given.
    #[must_use]
    pub fn icon(&self) -> &Icon {
        &self.0.icon
    }

    /// Whether the item has a non-null icon.
    #[must_use]
    pub fn has_icon(&self) -> bool {
        !self.0.icon.is_null()
    }

    /// Whether the item reacts to input.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.0.enabled.get()
    }

    /// Enable or disable the item.
    pub fn set_enabled(&self, enabled: bool) {
        self.0.enabled.set(enabled);
    }

    /// Whether the item carries a check state.
    #[must_use]
    pub fn is_checkable(&self) -> bool {
        self.0.check.is_some()
    }

    /// Current check state; always false for non-checkable items.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.0.check.as_ref().is_some_and(Cell::get)
    }

    /// Set the check state. Ignored for non-checkable items.
    pub fn set_checked(&self, checked: bool) {
        match &self.0.check {
            Some(cell) => cell.set(checked),
            None => log::debug!("set_checked ignored on non-checkable item {:?}", self.0.text),
        }
    }

    /// Flip the check state of a checkable item.
    pub(crate) fn toggle(&self) {
        if let Some(cell) = &self.0.check {
            cell.set(!cell.get());
        }
    }

    /// True if both handles refer to the same item.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("text", &self.0.text)
            .field("shortcut", &self.0.shortcut)
            .field("enabled", &self.is_enabled())
            .field("checked", &self.0.check.as_ref().map(Cell::get))
            .finish_non_exhaustive()
    }
}

/// Options for [`ContextMenu::add_item`].
///
/// ```
/// use fluent_menu::ItemOptions;
///
/// let opts = ItemOptions::default().shortcut("Ctrl+C").enabled(false);
/// assert_eq!(opts.shortcut.as_deref(), Some("Ctrl+C"));
/// assert!(!opts.enabled);
/// ```
pub struct ItemOptions {
    /// Invoked when the item is selected
    pub callback: Option<Callback>,
    /// Leading icon
    pub icon: Option<Icon>,
    /// Right-aligned shortcut label
    pub shortcut: Option<String>,
    /// Initial enabled state
    pub enabled: bool,
    /// Whether the item toggles a check mark
    pub checkable: bool,
    /// Initial check state; ignored unless `checkable`
    pub checked: bool,
}

impl Default for ItemOptions {
    fn default() -> Self {
        Self {
            callback: None,
            icon: None,
            shortcut: None,
            enabled: true,
            checkable: false,
            checked: false,
        }
    }
}

impl ItemOptions {
    /// Set the selection callback.
    #[must_use]
    pub fn callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Set the icon.
    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the shortcut label.
    #[must_use]
    pub fn shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Set the initial enabled state.
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Make the item checkable.
    #[must_use]
    pub fn checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    /// Set the initial check state.
    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

impl fmt::Debug for ItemOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemOptions")
            .field("callback", &self.callback.is_some())
            .field("icon", &self.icon)
            .field("shortcut", &self.shortcut)
            .field("enabled", &self.enabled)
            .field("checkable", &self.checkable)
            .field("checked", &self.checked)
            .finish()
    }
}

/// One entry in a menu, in display order.
pub enum MenuEntry {
    /// A selectable item
    Action {
        /// Shared item state
        item: ItemHandle,
        /// Invoked after the popup closes and subscribers are notified
        callback: Option<Callback>,
    },
    /// A horizontal divider
    Separator,
    /// An item that opens a nested menu
    Submenu {
        /// Shared item state
        item: ItemHandle,
        /// The nested menu, owned by this entry
        menu: Box<ContextMenu>,
    },
}

impl MenuEntry {
    /// The item record, unless this is a separator.
    #[must_use]
    pub const fn item(&self) -> Option<&ItemHandle> {
        match self {
            Self::Action { item, .. } | Self::Submenu { item, .. } => Some(item),
            Self::Separator => None,
        }
    }

    /// Check if this is a separator.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }

    /// Check if this opens a submenu.
    #[must_use]
    pub const fn is_submenu(&self) -> bool {
        matches!(self, Self::Submenu { .. })
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Action { item, callback } => f
                .debug_struct("Action")
                .field("item", item)
                .field("callback", &callback.is_some())
                .finish(),
            Self::Separator => f.write_str("Separator"),
            Self::Submenu { item, menu } => f
                .debug_struct("Submenu")
                .field("item", item)
                .field("entries", &menu.len())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // ItemHandle Tests
    // =========================================================================

    #[test]
    fn test_defaults() {
        let item = ItemHandle::new("Copy", &ItemOptions::default());
        assert_eq!(item.text(), "Copy");
        assert_eq!(item.shortcut(), None);
        assert!(!item.has_icon());
        assert!(item.is_enabled());
        assert!(!item.is_checkable());
        assert!(!item.checked());
    }

    #[test]
    fn test_checked_requires_checkable() {
        let plain = ItemHandle::new("Plain", &ItemOptions::default().checked(true));
        assert!(!plain.checked());
        plain.set_checked(true);
        assert!(!plain.checked());
        plain.toggle();
        assert!(!plain.checked());

        let check = ItemHandle::new(
            "Check",
            &ItemOptions::default().checkable(true).checked(true),
        );
        assert!(check.checked());
        check.toggle();
        assert!(!check.checked());
        check.set_checked(true);
        assert!(check.checked());
    }

    #[test]
    fn test_clones_share_state() {
        let a = ItemHandle::new("Bold", &ItemOptions::default().checkable(true));
        let b = a.clone();
        b.set_checked(true);
        b.set_enabled(false);
        assert!(a.checked());
        assert!(!a.is_enabled());
        assert!(a.ptr_eq(&b));

        let other = ItemHandle::new("Bold", &ItemOptions::default().checkable(true));
        assert!(!a.ptr_eq(&other));
    }

    #[test]
    fn test_null_icon_is_no_icon() {
        let item = ItemHandle::new("X", &ItemOptions::default().icon(Icon::null()));
        assert!(!item.has_icon());
        assert!(item.icon().is_null());
    }

    #[test]
    fn test_submenu_record() {
        let item = ItemHandle::submenu("More", None);
        assert_eq!(item.text(), "More");
        assert!(item.is_enabled());
        assert!(!item.is_checkable());
    }

    // =========================================================================
    // ItemOptions Tests
    // =========================================================================

    #[test]
    fn test_options_builder() {
        let opts = ItemOptions::default()
            .shortcut("Ctrl+B")
            .checkable(true)
            .checked(true)
            .enabled(false)
            .callback(|| {});
        assert!(opts.callback.is_some());
        assert_eq!(opts.shortcut.as_deref(), Some("Ctrl+B"));
        assert!(opts.checkable && opts.checked && !opts.enabled);

        let debug = format!("{opts:?}");
        assert!(debug.contains("callback: true"));
    }

    // =========================================================================
    // MenuEntry Tests
    // =========================================================================

    #[test]
    fn test_entry_accessors() {
        let action = MenuEntry::Action {
            item: ItemHandle::new("Cut", &ItemOptions::default()),
            callback: None,
        };
        assert_eq!(action.item().map(ItemHandle::text), Some("Cut"));
        assert!(!action.is_separator());
        assert!(!action.is_submenu());

        assert!(MenuEntry::Separator.item().is_none());
        assert!(MenuEntry::Separator.is_separator());

        let sub = MenuEntry::Submenu {
            item: ItemHandle::submenu("More", None),
            menu: Box::new(ContextMenu::new(false)),
        };
        assert!(sub.is_submenu());
        assert!(format!("{sub:?}").contains("More"));
    }
}
