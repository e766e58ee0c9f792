//! Custom-drawn context menus.
//!
//! A [`ContextMenu`] is built from action items, separators and submenus,
//! then shown as a borderless popup with rounded corners, a soft drop shadow,
//! optional icons, check marks and shortcut labels. Painting goes through the
//! [`fluent_menu_core::Canvas`] trait and input arrives as
//! [`fluent_menu_core::Event`]s, so any host that can draw rectangles, lines,
//! text and bitmaps can embed it.
//!
//! - Styling: [`Theme`] with built-in light and dark palettes, or TOML overrides
//! - Items: [`ItemOptions`] and the shared [`ItemHandle`]
//! - Icons: [`svg_to_icon`] rasterizes recolorable SVG markup
//! - Host capabilities: [`Screens`], [`ContextTarget`], [`Env`]
//!
//! # Examples
//!
//! ```
//! use fluent_menu::{ContextMenu, Env, ItemOptions, StaticScreens};
//! use fluent_menu_core::{FixedWidthMetrics, Point, Rect, RecordingCanvas};
//!
//! let mut menu = ContextMenu::new(false);
//! menu.add_item("Copy", ItemOptions::default().shortcut("Ctrl+C"));
//! menu.add_separator();
//! menu.add_submenu("Share", None)
//!     .add_item("Email", ItemOptions::default());
//!
//! let screens = StaticScreens::single(Rect::new(0.0, 0.0, 1280.0, 720.0));
//! let text = FixedWidthMetrics::default();
//! menu.show_at(Point::new(40.0, 40.0), Env::new(&screens, &text));
//!
//! let mut canvas = RecordingCanvas::new();
//! menu.paint(&mut canvas);
//! assert_eq!(canvas.texts(), vec!["Copy", "Ctrl+C", "Share"]);
//! ```

mod controller;
mod error;
mod host;
mod icon;
mod item;
mod popup;
mod row;
mod theme;

pub use controller::{ActionTriggered, ContextMenu, EventResponse, SubscriptionId};
pub use error::{IconError, ThemeError};
pub use host::{ContextTarget, Env, Screens, StaticScreens, TargetId};
pub use icon::{recolor_svg, svg_to_icon, try_svg_to_icon, Icon, MAX_ICON_SIZE};
pub use item::{Callback, ItemHandle, ItemOptions, MenuEntry};
pub use popup::{place, CloseReason, Popup, PopupMessage, CONTENT_PADDING, SHADOW_MARGIN};
pub use row::{Row, RowMessage, ICON_COLUMN_WIDTH, MIN_ROW_WIDTH, SEPARATOR_HEIGHT};
pub use theme::{
    Metrics, MetricsConfig, Palette, PaletteConfig, Theme, ThemeConfig, ThemeVariant,
};
