//! The popup surface: stacked rows inside a rounded, shadowed panel.
//!
//! A popup is positioned in screen coordinates. Its frame includes a shadow
//! margin on every side; rows live in popup-local coordinates measured from
//! the frame origin.

use crate::host::Screens;
use crate::item::MenuEntry;
use crate::row::{Row, RowMessage, MIN_ROW_WIDTH};
use crate::theme::Theme;
use fluent_menu_core::{
    Canvas, Constraints, Event, Key, LayoutResult, MouseButton, Point, Rect, Size, TextMetrics,
    Transform2D, Widget,
};
use std::sync::Arc;

/// Space around the panel reserved for the drop shadow.
pub const SHADOW_MARGIN: f32 = 12.0;
/// Vertical padding above the first row and below the last.
pub const CONTENT_PADDING: f32 = 4.0;

/// Why a popup closed itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Escape was pressed
    Escape,
    /// A press landed outside the popup
    OutsideClick,
    /// An item was selected
    Selection,
}

/// Message emitted by a popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupMessage {
    /// The entry at this index was activated; the popup is still visible.
    Selected(usize),
    /// The popup hid itself.
    Closed(CloseReason),
}

/// Place a content rectangle of `content` size at `anchor` inside `avail`.
///
/// The content starts at the anchor. If the content plus `margin` would pass
/// the right or bottom edge it shifts back by the overflow, and it is never
/// moved left of or above the usable area. The returned rectangle is the
/// content; the outer frame is that rectangle grown by `margin`.
///
/// ```
/// use fluent_menu::place;
/// use fluent_menu_core::{Point, Rect, Size};
///
/// let screen = Rect::new(0.0, 0.0, 1000.0, 800.0);
/// let r = place(Point::new(950.0, 750.0), Size::new(300.0, 200.0), screen, 12.0);
/// assert!(screen.contains_rect(&r));
/// ```
#[must_use]
pub fn place(anchor: Point, content: Size, avail: Rect, margin: f32) -> Rect {
    let mut x = anchor.x;
    let mut y = anchor.y;
    if x + content.width + margin > avail.right() {
        x = avail.right() - content.width - margin;
    }
    if y + content.height + margin > avail.bottom() {
        y = avail.bottom() - content.height - margin;
    }
    Rect::new(x.max(avail.x), y.max(avail.y), content.width, content.height)
}

/// A popup panel holding one row per menu entry.
#[derive(Debug, Clone)]
pub struct Popup {
    rows: Vec<Row>,
    theme: Arc<Theme>,
    frame: Rect,
    visible: bool,
    focused: bool,
}

impl Popup {
    /// Lay out `rows` top to bottom.
    #[must_use]
    pub fn new(mut rows: Vec<Row>, theme: Arc<Theme>) -> Self {
        let unbounded = Constraints::unbounded();
        let width = rows
            .iter()
            .map(|r| r.measure(unbounded).width)
            .fold(MIN_ROW_WIDTH, f32::max);

        let mut y = SHADOW_MARGIN + CONTENT_PADDING;
        for row in &mut rows {
            let height = row.measure(unbounded).height;
            row.layout(Rect::new(SHADOW_MARGIN, y, width, height));
            y += height;
        }
        let content = Size::new(width, y - SHADOW_MARGIN + CONTENT_PADDING);

        Self {
            rows,
            theme,
            frame: Rect::from_size(content.expand(SHADOW_MARGIN)),
            visible: false,
            focused: false,
        }
    }

    /// Build the rows for `entries`.
    #[must_use]
    pub fn build(entries: &[MenuEntry], theme: Arc<Theme>, text: &dyn TextMetrics) -> Self {
        let any_icons = entries
            .iter()
            .filter_map(MenuEntry::item)
            .any(|item| item.has_icon());

        let rows = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                MenuEntry::Action { item, .. } => {
                    Row::item(index, item.clone(), false, any_icons, theme.clone(), text)
                }
                MenuEntry::Submenu { item, .. } => {
                    Row::item(index, item.clone(), true, any_icons, theme.clone(), text)
                }
                MenuEntry::Separator => Row::separator(index, theme.clone()),
            })
            .collect();

        log::debug!("built popup with {} rows", entries.len());
        Self::new(rows, theme)
    }

    /// Rows in display order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Outer frame in screen coordinates, shadow margin included.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Panel rectangle in screen coordinates.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        self.frame.inset(SHADOW_MARGIN)
    }

    /// Where a child popup opened from this one is anchored.
    #[must_use]
    pub fn submenu_anchor(&self) -> Point {
        Point::new(self.frame.right() - SHADOW_MARGIN, self.frame.y)
    }

    /// The theme rows paint with.
    #[must_use]
    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Whether the popup is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the popup holds keyboard focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Entry index of the hovered row.
    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.rows.iter().find(|r| r.is_hovered()).map(Row::index)
    }

    /// Whether a screen point falls on the popup window.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.visible && self.frame.hit_test(&point)
    }

    /// Swap the theme in place. Returns false, leaving the popup untouched,
    /// when the new theme would change the layout.
    pub fn set_theme(&mut self, theme: Arc<Theme>) -> bool {
        if !self.theme.same_geometry(&theme) {
            return false;
        }
        for row in &mut self.rows {
            row.set_theme(theme.clone());
        }
        self.theme = theme;
        true
    }

    /// Position at `anchor` on the screen that contains it, show and focus.
    pub fn show_at(&mut self, anchor: Point, screens: &dyn Screens) {
        let avail = screens.screen_for(anchor);
        let content = place(
            anchor,
            self.content_rect().size(),
            avail,
            SHADOW_MARGIN,
        );
        self.frame = content.outset(SHADOW_MARGIN);
        for row in &mut self.rows {
            row.reset();
        }
        self.visible = true;
        self.focused = true;
        log::debug!("popup shown at {:?}", self.frame);
    }

    /// Hide without emitting anything.
    pub fn hide(&mut self) {
        if self.visible {
            log::debug!("popup hidden");
        }
        self.visible = false;
        self.focused = false;
        for row in &mut self.rows {
            row.reset();
        }
    }

    fn close(&mut self, reason: CloseReason) -> Option<PopupMessage> {
        self.hide();
        Some(PopupMessage::Closed(reason))
    }

    fn set_hover(&mut self, position: Option<usize>) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.set_hovered(Some(i) == position);
        }
    }

    /// Move keyboard hover over the non-separator rows, wrapping at the ends.
    /// With nothing hovered, down lands on the first row and up on the last.
    fn navigate(&mut self, forward: bool) {
        let targets: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_interactive())
            .map(|(i, _)| i)
            .collect();
        if targets.is_empty() {
            return;
        }

        let n = targets.len() as isize;
        let cur = targets
            .iter()
            .position(|&i| self.rows[i].is_hovered())
            .map_or(if forward { -1 } else { n }, |p| p as isize);
        let step = if forward { 1 } else { -1 };
        let next = targets[(cur + step).rem_euclid(n) as usize];
        log::trace!("keyboard hover {cur} -> {next}");
        self.set_hover(Some(next));
    }

    fn row_at(&self, local: Point) -> Option<usize> {
        self.rows.iter().position(|r| r.bounds().hit_test(&local))
    }

    fn paint_panel(&self, canvas: &mut dyn Canvas) {
        let t = &self.theme;
        let m = SHADOW_MARGIN;
        let w = self.frame.width;
        let h = self.frame.height;
        let radius = t.metrics.corner_radius;
        let base = t.palette.shadow;

        let layers = m as usize;
        for i in 0..layers {
            let i = i as f32;
            let frac = (m - i) / m;
            let inset = m - i;
            canvas.fill_rounded_rect(
                Rect::new(inset, inset + 2.0, w - 2.0 * inset, h - 2.0 * inset - 2.0),
                radius + i * 0.5,
                base.with_alpha(base.a * frac * frac),
            );
        }

        canvas.draw_rounded_rect(
            Rect::new(m, m, w - 2.0 * m, h - 2.0 * m),
            radius,
            t.palette.popup_bg,
            t.palette.popup_border,
            1.0,
        );
    }
}

impl Widget for Popup {
    type Message = PopupMessage;

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.frame.size())
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.frame = self.frame.with_origin(bounds.origin());
        LayoutResult {
            size: self.frame.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.push_transform(Transform2D::translate(self.frame.x, self.frame.y));
        self.paint_panel(canvas);
        for row in &self.rows {
            row.paint(canvas);
        }
        canvas.pop_transform();
    }

    fn event(&mut self, event: &Event) -> Option<PopupMessage> {
        if !self.visible {
            return None;
        }

        match event {
            Event::KeyDown { key: Key::Escape } => return self.close(CloseReason::Escape),
            Event::KeyDown { key: Key::Down } => self.navigate(true),
            Event::KeyDown { key: Key::Up } => self.navigate(false),
            Event::KeyDown { key } if key.is_enter() => {
                let row = self
                    .rows
                    .iter_mut()
                    .find(|r| r.is_hovered() && r.is_enabled())?;
                let RowMessage::Selected(index) = row.activate()?;
                return Some(PopupMessage::Selected(index));
            }
            Event::FocusIn => self.focused = true,
            Event::FocusOut => self.focused = false,
            Event::MouseMove { position } => {
                let local = *position - self.frame.origin();
                let hit = self.row_at(local);
                for (i, row) in self.rows.iter_mut().enumerate() {
                    if Some(i) == hit && !row.is_hovered() {
                        row.event(&Event::MouseEnter);
                    } else if Some(i) != hit && row.is_hovered() {
                        row.event(&Event::MouseLeave);
                    }
                }
            }
            Event::MouseLeave => {
                for row in &mut self.rows {
                    row.event(&Event::MouseLeave);
                }
            }
            Event::MouseDown { position, .. } if !self.frame.hit_test(position) => {
                return self.close(CloseReason::OutsideClick);
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                let local = event.relative_to(self.frame.origin());
                if let Some(i) = self.row_at(*position - self.frame.origin()) {
                    self.rows[i].event(&local);
                }
            }
            Event::MouseUp { .. } => {
                let local = event.relative_to(self.frame.origin());
                let mut selected = None;
                for row in &mut self.rows {
                    if let Some(RowMessage::Selected(index)) = row.event(&local) {
                        selected = Some(index);
                    }
                }
                return selected.map(PopupMessage::Selected);
            }
            _ => {}
        }
        None
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticScreens;
    use crate::item::{ItemHandle, ItemOptions};
    use fluent_menu_core::{DrawCommand, FixedWidthMetrics, RecordingCanvas};
    use proptest::prelude::*;

    fn screen() -> StaticScreens {
        StaticScreens::single(Rect::new(0.0, 0.0, 1000.0, 800.0))
    }

    fn action(text: &str, options: ItemOptions) -> MenuEntry {
        MenuEntry::Action {
            item: ItemHandle::new(text, &options),
            callback: None,
        }
    }

    /// Cut, Copy, separator, Paste (disabled), Wrap (checkable)
    fn sample() -> Vec<MenuEntry> {
        vec![
            action("Cut", ItemOptions::default()),
            action("Copy", ItemOptions::default()),
            MenuEntry::Separator,
            action("Paste", ItemOptions::default().enabled(false)),
            action("Wrap", ItemOptions::default().checkable(true)),
        ]
    }

    fn shown(entries: &[MenuEntry]) -> Popup {
        let mut popup = Popup::build(entries, Theme::light(), &FixedWidthMetrics::default());
        popup.show_at(Point::new(100.0, 100.0), &screen());
        popup
    }

    fn key(popup: &mut Popup, key: Key) -> Option<PopupMessage> {
        popup.event(&Event::KeyDown { key })
    }

    fn row_center(popup: &Popup, index: usize) -> Point {
        let b = popup.rows()[index].bounds();
        popup.frame().origin() + b.center()
    }

    fn click(popup: &mut Popup, at: Point) -> Option<PopupMessage> {
        popup.event(&Event::MouseMove { position: at });
        popup.event(&Event::MouseDown {
            position: at,
            button: MouseButton::Left,
        });
        popup.event(&Event::MouseUp {
            position: at,
            button: MouseButton::Left,
        })
    }

    // =========================================================================
    // Placement Tests
    // =========================================================================

    #[test]
    fn test_place_fits_as_is() {
        let r = place(
            Point::new(100.0, 100.0),
            Size::new(200.0, 100.0),
            Rect::new(0.0, 0.0, 1000.0, 800.0),
            SHADOW_MARGIN,
        );
        assert_eq!(r, Rect::new(100.0, 100.0, 200.0, 100.0));
    }

    #[test]
    fn test_place_near_bottom_right_corner() {
        let screen = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let r = place(
            Point::new(950.0, 750.0),
            Size::new(300.0, 200.0),
            screen,
            SHADOW_MARGIN,
        );
        assert!(screen.contains_rect(&r));
        assert_eq!(r.origin(), Point::new(688.0, 588.0));
        assert!(screen.contains_rect(&r.outset(SHADOW_MARGIN)));
    }

    #[test]
    fn test_place_clamps_to_top_left() {
        let screen = Rect::new(100.0, 50.0, 400.0, 300.0);
        let r = place(
            Point::new(0.0, 0.0),
            Size::new(200.0, 100.0),
            screen,
            SHADOW_MARGIN,
        );
        assert_eq!(r.origin(), Point::new(100.0, 50.0));

        // Too large for the screen: pinned to the top-left edge
        let r = place(
            Point::new(300.0, 300.0),
            Size::new(600.0, 100.0),
            screen,
            SHADOW_MARGIN,
        );
        assert_eq!(r.x, 100.0);
    }

    proptest! {
        #[test]
        fn prop_placed_content_stays_on_screen(
            ax in -500.0f32..2500.0,
            ay in -500.0f32..2500.0,
            w in 1.0f32..900.0,
            h in 1.0f32..700.0,
        ) {
            let screen = Rect::new(0.0, 0.0, 1000.0, 800.0);
            let r = place(Point::new(ax, ay), Size::new(w, h), screen, SHADOW_MARGIN);
            prop_assert!(screen.contains_rect(&r), "{:?} escapes {:?}", r, screen);
        }
    }

    #[test]
    fn test_show_uses_screen_of_anchor() {
        let screens = StaticScreens::new(vec![
            Rect::new(0.0, 0.0, 1000.0, 800.0),
            Rect::new(1000.0, 0.0, 800.0, 600.0),
        ]);
        let mut popup = Popup::build(&sample(), Theme::dark(), &FixedWidthMetrics::default());
        popup.show_at(Point::new(1790.0, 10.0), &screens);
        let content = popup.content_rect();
        assert_eq!(content.right(), 1800.0 - SHADOW_MARGIN);

        // Off every screen: falls back to the primary
        popup.show_at(Point::new(-50.0, -50.0), &screens);
        assert_eq!(popup.content_rect().origin(), Point::ORIGIN);
    }

    // =========================================================================
    // Layout Tests
    // =========================================================================

    #[test]
    fn test_rows_stack_without_gaps() {
        let popup = Popup::build(&sample(), Theme::light(), &FixedWidthMetrics::default());
        let rows = popup.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].bounds().y, SHADOW_MARGIN + CONTENT_PADDING);
        for pair in rows.windows(2) {
            assert_eq!(pair[0].bounds().bottom(), pair[1].bounds().y);
            assert_eq!(pair[0].bounds().width, pair[1].bounds().width);
        }
        assert_eq!(rows[2].bounds().height, 9.0);

        let content = popup.content_rect().size();
        assert_eq!(content, Size::new(MIN_ROW_WIDTH, 4.0 * 32.0 + 9.0 + 8.0));
        assert_eq!(popup.frame().size(), content.expand(SHADOW_MARGIN));
    }

    #[test]
    fn test_rows_keep_entry_indices() {
        let popup = Popup::build(&sample(), Theme::light(), &FixedWidthMetrics::default());
        let indices: Vec<usize> = popup.rows().iter().map(Row::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert!(popup.rows()[2].is_separator());
    }

    #[test]
    fn test_widest_row_sets_width() {
        let long = "x".repeat(40);
        let entries = vec![
            action("Cut", ItemOptions::default()),
            action(&long, ItemOptions::default()),
        ];
        let popup = Popup::build(&entries, Theme::light(), &FixedWidthMetrics::default());
        assert_eq!(popup.content_rect().width, 284.0);
        assert_eq!(popup.rows()[0].bounds().width, 284.0);
    }

    #[test]
    fn test_empty_popup_is_a_bare_panel() {
        let popup = Popup::build(&[], Theme::light(), &FixedWidthMetrics::default());
        assert!(popup.rows().is_empty());
        assert_eq!(
            popup.content_rect().size(),
            Size::new(MIN_ROW_WIDTH, 2.0 * CONTENT_PADDING)
        );
    }

    // =========================================================================
    // Paint Tests
    // =========================================================================

    #[test]
    fn test_shadow_layers_then_panel() {
        let popup = shown(&sample());
        let theme = Theme::light();
        let mut canvas = RecordingCanvas::new();
        popup.paint(&mut canvas);

        let cmds = canvas.commands();
        let frame = popup.frame();
        for (i, cmd) in cmds.iter().take(12).enumerate() {
            let DrawCommand::Rect {
                bounds,
                radius,
                style,
            } = cmd
            else {
                panic!("Expected shadow rect, got {cmd:?}");
            };
            let inset = 12.0 - i as f32;
            assert_eq!(bounds.x, frame.x + inset);
            assert_eq!(bounds.y, frame.y + inset + 2.0);
            assert_eq!(bounds.height, frame.height - 2.0 * inset - 2.0);
            assert_eq!(radius.top_left, 8.0 + i as f32 * 0.5);
            let alpha = style.fill.expect("filled").a;
            let frac = inset / 12.0;
            assert!((alpha - theme.palette.shadow.a * frac * frac).abs() < 1e-6);
        }

        match &cmds[12] {
            DrawCommand::Rect { bounds, style, .. } => {
                assert_eq!(*bounds, popup.content_rect());
                assert_eq!(style.fill, Some(theme.palette.popup_bg));
                let stroke = style.stroke.expect("border");
                assert_eq!(stroke.color, theme.palette.popup_border);
                assert_eq!(stroke.width, 1.0);
            }
            other => panic!("Expected panel rect, got {other:?}"),
        }
        assert_eq!(canvas.texts(), vec!["Cut", "Copy", "Paste", "Wrap"]);
        assert_eq!(canvas.transform_depth(), 0);
    }

    #[test]
    fn test_shadow_fades_outward() {
        let popup = shown(&sample());
        let mut canvas = RecordingCanvas::new();
        popup.paint(&mut canvas);
        let alphas: Vec<f32> = canvas.colors().iter().take(12).map(|c| c.a).collect();
        assert!(alphas.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_set_theme_in_place() {
        let mut popup = shown(&sample());
        assert!(popup.set_theme(Theme::dark()));
        assert!(popup.is_visible());

        let mut canvas = RecordingCanvas::new();
        popup.paint(&mut canvas);
        let dark = Theme::dark().palette.clone();
        for color in canvas.colors() {
            let shadow_layer = color.with_alpha(dark.shadow.a) == dark.shadow;
            assert!(
                shadow_layer || dark.all().contains(&color),
                "{} is not a dark theme color",
                color.to_hex_with_alpha()
            );
        }
        assert!(!canvas.colors().contains(&Theme::light().palette.popup_bg));
    }

    #[test]
    fn test_set_theme_rejects_geometry_change() {
        let mut popup = shown(&sample());
        let mut big = (*Theme::light()).clone();
        big.metrics.row_height = 40.0;
        assert!(!popup.set_theme(Arc::new(big)));
        assert!(Arc::ptr_eq(popup.theme(), &Theme::light()));
    }

    // =========================================================================
    // Keyboard Tests
    // =========================================================================

    #[test]
    fn test_down_from_none_and_wrap() {
        let mut popup = shown(&sample());
        assert_eq!(popup.hovered(), None);
        key(&mut popup, Key::Down);
        assert_eq!(popup.hovered(), Some(0));
        key(&mut popup, Key::Down);
        assert_eq!(popup.hovered(), Some(1));
        // separator skipped, disabled row still reachable
        key(&mut popup, Key::Down);
        assert_eq!(popup.hovered(), Some(3));
        key(&mut popup, Key::Down);
        assert_eq!(popup.hovered(), Some(4));
        key(&mut popup, Key::Down);
        assert_eq!(popup.hovered(), Some(0));
    }

    #[test]
    fn test_up_wraps_to_last() {
        let mut popup = shown(&sample());
        key(&mut popup, Key::Up);
        assert_eq!(popup.hovered(), Some(4));

        popup.set_hover(Some(0));
        key(&mut popup, Key::Up);
        assert_eq!(popup.hovered(), Some(4));
    }

    #[test]
    fn test_enter_on_disabled_row_does_nothing() {
        let mut popup = shown(&sample());
        popup.set_hover(Some(3));
        assert_eq!(key(&mut popup, Key::Enter), None);
        assert!(popup.is_visible());
    }

    #[test]
    fn test_enter_without_hover_does_nothing() {
        let mut popup = shown(&sample());
        assert_eq!(key(&mut popup, Key::NumpadEnter), None);
    }

    #[test]
    fn test_enter_selects_without_toggling() {
        let entries = vec![action("Wrap", ItemOptions::default().checkable(true))];
        let mut popup = shown(&entries);
        key(&mut popup, Key::Down);
        assert_eq!(key(&mut popup, Key::Enter), Some(PopupMessage::Selected(0)));
        assert!(!entries[0].item().is_some_and(ItemHandle::checked));
        assert_eq!(
            key(&mut popup, Key::NumpadEnter),
            Some(PopupMessage::Selected(0))
        );
        assert!(!entries[0].item().is_some_and(ItemHandle::checked));

        let at = row_center(&popup, 0);
        assert_eq!(click(&mut popup, at), Some(PopupMessage::Selected(0)));
        assert!(entries[0].item().is_some_and(ItemHandle::checked));
    }

    #[test]
    fn test_escape_closes_from_any_state() {
        let mut popup = shown(&sample());
        key(&mut popup, Key::Down);
        assert_eq!(
            key(&mut popup, Key::Escape),
            Some(PopupMessage::Closed(CloseReason::Escape))
        );
        assert!(!popup.is_visible());
        assert_eq!(popup.hovered(), None);
        assert_eq!(key(&mut popup, Key::Escape), None);
    }

    #[test]
    fn test_navigation_on_separators_only() {
        let mut popup = shown(&[MenuEntry::Separator, MenuEntry::Separator]);
        key(&mut popup, Key::Down);
        assert_eq!(popup.hovered(), None);
    }

    proptest! {
        #[test]
        fn prop_at_most_one_row_hovered(keys in prop::collection::vec(0u8..3, 0..40)) {
            let mut popup = shown(&sample());
            for k in keys {
                let key = match k {
                    0 => Key::Down,
                    1 => Key::Up,
                    _ => Key::Tab,
                };
                popup.event(&Event::KeyDown { key });
                let hovered = popup.rows().iter().filter(|r| r.is_hovered()).count();
                prop_assert!(hovered <= 1);
                prop_assert!(popup.hovered().map_or(true, |i| i != 2));
            }
        }
    }

    // =========================================================================
    // Pointer Tests
    // =========================================================================

    #[test]
    fn test_hover_follows_pointer() {
        let mut popup = shown(&sample());
        key(&mut popup, Key::Down);

        let at = row_center(&popup, 1);
        popup.event(&Event::MouseMove { position: at });
        assert_eq!(popup.hovered(), Some(1));

        let sep = row_center(&popup, 2);
        popup.event(&Event::MouseMove { position: sep });
        assert_eq!(popup.hovered(), None);
    }

    #[test]
    fn test_click_selects_row() {
        let mut popup = shown(&sample());
        let at = row_center(&popup, 1);
        assert_eq!(click(&mut popup, at), Some(PopupMessage::Selected(1)));
        assert!(popup.is_visible());
    }

    #[test]
    fn test_click_disabled_row_does_nothing() {
        let mut popup = shown(&sample());
        let at = row_center(&popup, 3);
        assert_eq!(click(&mut popup, at), None);
    }

    #[test]
    fn test_outside_press_closes() {
        let mut popup = shown(&sample());
        let msg = popup.event(&Event::MouseDown {
            position: Point::new(5.0, 5.0),
            button: MouseButton::Right,
        });
        assert_eq!(msg, Some(PopupMessage::Closed(CloseReason::OutsideClick)));
        assert!(!popup.is_visible());
        assert!(!popup.contains(row_center(&popup, 0)));
    }

    #[test]
    fn test_hidden_popup_ignores_events() {
        let mut popup = Popup::build(&sample(), Theme::light(), &FixedWidthMetrics::default());
        assert_eq!(key(&mut popup, Key::Escape), None);
        assert!(!popup.is_focused());
    }

    #[test]
    fn test_show_resets_hover_and_focuses() {
        let mut popup = shown(&sample());
        key(&mut popup, Key::Down);
        popup.event(&Event::FocusOut);
        assert!(!popup.is_focused());
        popup.show_at(Point::new(10.0, 10.0), &screen());
        assert!(popup.is_focused());
        assert_eq!(popup.hovered(), None);
    }

    #[test]
    fn test_submenu_anchor() {
        let popup = shown(&sample());
        let content = popup.content_rect();
        assert_eq!(
            popup.submenu_anchor(),
            Point::new(content.right(), content.y - SHADOW_MARGIN)
        );
    }
}
