//! Capabilities the host toolkit provides to the menu.

use fluent_menu_core::{Point, Rect, TextMetrics};
use std::fmt;

/// Usable screen geometry.
pub trait Screens {
    /// Usable area of the screen containing `point`, if any.
    fn screen_at(&self, point: Point) -> Option<Rect>;

    /// Usable area of the primary screen.
    fn primary(&self) -> Rect;

    /// Screen for `point`, falling back to the primary screen.
    fn screen_for(&self, point: Point) -> Rect {
        self.screen_at(point).unwrap_or_else(|| self.primary())
    }
}

/// A fixed list of screens; the first one is primary.
///
/// ```
/// use fluent_menu::{Screens, StaticScreens};
/// use fluent_menu_core::{Point, Rect};
///
/// let screens = StaticScreens::single(Rect::new(0.0, 0.0, 1000.0, 800.0));
/// assert_eq!(screens.screen_for(Point::new(5000.0, 0.0)), screens.primary());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StaticScreens {
    screens: Vec<Rect>,
}

impl StaticScreens {
    /// Create from a list of usable areas. An empty list behaves like one
    /// zero-sized screen at the origin.
    #[must_use]
    pub fn new(screens: Vec<Rect>) -> Self {
        Self { screens }
    }

    /// A single screen.
    #[must_use]
    pub fn single(screen: Rect) -> Self {
        Self::new(vec![screen])
    }
}

impl Screens for StaticScreens {
    fn screen_at(&self, point: Point) -> Option<Rect> {
        self.screens.iter().copied().find(|s| s.hit_test(&point))
    }

    fn primary(&self) -> Rect {
        self.screens.first().copied().unwrap_or_default()
    }
}

/// Identity of a widget the menu can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// A host widget that can request a context menu.
pub trait ContextTarget {
    /// Stable identity used for attach/detach.
    fn id(&self) -> TargetId;

    /// Map a point in the widget's local space to screen space.
    fn map_to_global(&self, local: Point) -> Point;
}

/// Host capabilities needed to build and place a popup.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    /// Screen geometry
    pub screens: &'a dyn Screens,
    /// Text measurement
    pub metrics: &'a dyn TextMetrics,
}

impl<'a> Env<'a> {
    /// Bundle the host capabilities.
    #[must_use]
    pub fn new(screens: &'a dyn Screens, metrics: &'a dyn TextMetrics) -> Self {
        Self { screens, metrics }
    }
}

impl fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Env").finish_non_exhaustive()
    }
}
