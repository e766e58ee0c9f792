//! A single popup row: item or separator.
//!
//! Rows paint and hit-test in popup-local coordinates. They hold the item
//! through its shared handle, so state changed elsewhere shows up on the
//! next paint.

use crate::item::ItemHandle;
use crate::theme::Theme;
use fluent_menu_core::{
    Canvas, Color, Constraints, Cursor, Event, LayoutResult, MouseButton, Point, Rect, Size,
    TextMetrics, TextStyle, Widget,
};
use std::sync::Arc;

/// Leading column reserved for the icon or check glyph.
pub const ICON_COLUMN_WIDTH: f32 = 28.0;
/// Narrowest item row.
pub const MIN_ROW_WIDTH: f32 = 180.0;
/// Height of a separator row.
pub const SEPARATOR_HEIGHT: f32 = 9.0;

// Width reserved between label and shortcut when measuring / when painting.
const SHORTCUT_GAP: f32 = 32.0;
const SHORTCUT_PAINT_GAP: f32 = 24.0;
// Width reserved for the submenu chevron when measuring / when painting.
const ARROW_WIDTH: f32 = 20.0;
const ARROW_PAINT_WIDTH: f32 = 16.0;

/// Message emitted by a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMessage {
    /// The row at this item index was activated.
    Selected(usize),
}

#[derive(Debug, Clone)]
enum RowKind {
    Item {
        item: ItemHandle,
        submenu: bool,
        label_width: f32,
        shortcut_width: f32,
    },
    Separator,
}

/// One row of a popup.
#[derive(Debug, Clone)]
pub struct Row {
    index: usize,
    kind: RowKind,
    theme: Arc<Theme>,
    icon_column: bool,
    hovered: bool,
    pressed: bool,
    bounds: Rect,
    line_height: f32,
    shortcut_line_height: f32,
}

impl Row {
    /// Row for an action or submenu item.
    ///
    /// `any_icons` is true when some item in the same popup has an icon, so
    /// labels line up across rows.
    #[must_use]
    pub fn item(
        index: usize,
        item: ItemHandle,
        submenu: bool,
        any_icons: bool,
        theme: Arc<Theme>,
        text: &dyn TextMetrics,
    ) -> Self {
        let m = theme.metrics;
        let label_width = text.text_width(item.text(), m.font_size);
        let shortcut_width = item
            .shortcut()
            .map_or(0.0, |s| text.text_width(s, m.shortcut_font_size));
        let icon_column = any_icons || item.is_checkable();
        Self {
            index,
            kind: RowKind::Item {
                item,
                submenu,
                label_width,
                shortcut_width,
            },
            theme,
            icon_column,
            hovered: false,
            pressed: false,
            bounds: Rect::default(),
            line_height: text.line_height(m.font_size),
            shortcut_line_height: text.line_height(m.shortcut_font_size),
        }
    }

    /// Separator row.
    #[must_use]
    pub fn separator(index: usize, theme: Arc<Theme>) -> Self {
        Self {
            index,
            kind: RowKind::Separator,
            theme,
            icon_column: false,
            hovered: false,
            pressed: false,
            bounds: Rect::default(),
            line_height: 0.0,
            shortcut_line_height: 0.0,
        }
    }

    /// Index of the menu entry this row displays.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The item, unless this is a separator.
    #[must_use]
    pub const fn handle(&self) -> Option<&ItemHandle> {
        match &self.kind {
            RowKind::Item { item, .. } => Some(item),
            RowKind::Separator => None,
        }
    }

    /// Check if this is a separator.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self.kind, RowKind::Separator)
    }

    /// Check if this row opens a submenu.
    #[must_use]
    pub const fn is_submenu(&self) -> bool {
        matches!(self.kind, RowKind::Item { submenu: true, .. })
    }

    /// Item rows follow the item's enabled flag; separators are never enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.handle().is_some_and(ItemHandle::is_enabled)
    }

    /// Whether the row is hovered.
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Whether a left press is armed on this row.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the hover flag (used for keyboard navigation).
    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Drop hover and press state.
    pub fn reset(&mut self) {
        self.hovered = false;
        self.pressed = false;
    }

    /// The theme this row paints with.
    #[must_use]
    pub fn theme(&self) -> &Arc<Theme> {
        &self.theme
    }

    /// Swap the theme. Callers must only do this when metrics are unchanged.
    pub fn set_theme(&mut self, theme: Arc<Theme>) {
        self.theme = theme;
    }

    /// Keyboard activation. Emits `Selected` for an enabled item without
    /// touching its check state; only a completed click toggles.
    pub fn activate(&mut self) -> Option<RowMessage> {
        match &self.kind {
            RowKind::Item { item, .. } if item.is_enabled() => {
                Some(RowMessage::Selected(self.index))
            }
            _ => None,
        }
    }

    fn click(&mut self) -> Option<RowMessage> {
        let message = self.activate()?;
        if let RowKind::Item { item, .. } = &self.kind {
            item.toggle();
        }
        Some(message)
    }

    fn natural_width(&self) -> f32 {
        let RowKind::Item {
            item,
            submenu,
            label_width,
            shortcut_width,
        } = &self.kind
        else {
            return 0.0;
        };

        let pad = self.theme.metrics.h_padding;
        let mut width = pad;
        if self.icon_column {
            width += ICON_COLUMN_WIDTH;
        }
        width += label_width;
        if item.shortcut().is_some() {
            width += SHORTCUT_GAP + shortcut_width;
        }
        if *submenu {
            width += ARROW_WIDTH;
        }
        width + pad
    }

    fn paint_check(&self, canvas: &mut dyn Canvas, x: f32, cy: f32) {
        let color = self.theme.palette.item_check;
        let knee = Point::new(x + 10.0, cy + 4.0);
        canvas.draw_line(Point::new(x + 6.0, cy), knee, color, 2.0);
        canvas.draw_line(knee, Point::new(x + 16.0, cy - 4.0), color, 2.0);
    }

    fn paint_chevron(&self, canvas: &mut dyn Canvas, color: Color) {
        let b = self.bounds;
        let x = b.right() - self.theme.metrics.h_padding - 6.0;
        let cy = b.y + b.height / 2.0;
        let tip = Point::new(x + 4.0, cy);
        canvas.draw_line(Point::new(x, cy - 4.0), tip, color, 1.4);
        canvas.draw_line(tip, Point::new(x, cy + 4.0), color, 1.4);
    }
}

impl Widget for Row {
    type Message = RowMessage;

    fn measure(&self, constraints: Constraints) -> Size {
        match self.kind {
            RowKind::Item { .. } => constraints.constrain(Size::new(
                self.natural_width().max(MIN_ROW_WIDTH),
                self.theme.metrics.row_height,
            )),
            RowKind::Separator => constraints.constrain(Size::new(
                2.0 * self.theme.metrics.h_padding,
                SEPARATOR_HEIGHT,
            )),
        }
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let t = &self.theme;
        let m = t.metrics;
        let b = self.bounds;

        let RowKind::Item {
            item,
            submenu,
            shortcut_width,
            ..
        } = &self.kind
        else {
            let y = b.y + b.height / 2.0;
            canvas.draw_line(
                Point::new(b.x + m.h_padding, y),
                Point::new(b.right() - m.h_padding, y),
                t.palette.separator,
                1.0,
            );
            return;
        };

        let enabled = item.is_enabled();
        if enabled && (self.hovered || self.pressed) {
            let bg = if self.pressed {
                t.palette.item_pressed_bg
            } else {
                t.palette.item_hover_bg
            };
            let pill = Rect::new(b.x + 4.0, b.y, b.width - 8.0, b.height);
            canvas.fill_rounded_rect(pill, m.row_radius, bg);
        }

        let text_color = if enabled {
            t.palette.item_text
        } else {
            t.palette.item_text_disabled
        };
        let cy = b.y + b.height / 2.0;
        let mut x = b.x + m.h_padding;

        if self.icon_column {
            if item.checked() {
                self.paint_check(canvas, x, cy);
            } else if let Some(bitmap) = item.icon().bitmap() {
                let icon_x = x + ((ICON_COLUMN_WIDTH - m.icon_size) / 2.0).floor();
                let icon_y = b.y + ((b.height - m.icon_size) / 2.0).floor();
                canvas.draw_bitmap(
                    bitmap,
                    Rect::new(icon_x, icon_y, m.icon_size, m.icon_size),
                );
            }
            x += ICON_COLUMN_WIDTH;
        }

        let mut label_right = b.right() - m.h_padding;
        if item.shortcut().is_some() {
            label_right -= shortcut_width + SHORTCUT_PAINT_GAP;
        }
        if *submenu {
            label_right -= ARROW_PAINT_WIDTH;
        }
        canvas.push_clip(Rect::new(x, b.y, (label_right - x).max(0.0), b.height));
        canvas.draw_text(
            item.text(),
            Point::new(x, cy - self.line_height / 2.0),
            &TextStyle {
                size: m.font_size,
                color: text_color,
                ..TextStyle::default()
            },
        );
        canvas.pop_clip();

        if let Some(shortcut) = item.shortcut() {
            let color = if enabled {
                t.palette.item_shortcut
            } else {
                t.palette.item_text_disabled
            };
            canvas.draw_text(
                shortcut,
                Point::new(
                    b.right() - m.h_padding - shortcut_width,
                    cy - self.shortcut_line_height / 2.0,
                ),
                &TextStyle {
                    size: m.shortcut_font_size,
                    color,
                    ..TextStyle::default()
                },
            );
        }

        if *submenu {
            self.paint_chevron(canvas, text_color);
        }
    }

    fn event(&mut self, event: &Event) -> Option<RowMessage> {
        if self.is_separator() {
            return None;
        }

        match event {
            Event::MouseEnter => self.hovered = true,
            Event::MouseLeave => {
                self.hovered = false;
                self.pressed = false;
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.is_enabled() && self.bounds.hit_test(position) {
                    self.pressed = true;
                }
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } if self.pressed => {
                self.pressed = false;
                if self.bounds.hit_test(position) {
                    return self.click();
                }
            }
            _ => {}
        }
        None
    }

    fn is_interactive(&self) -> bool {
        !self.is_separator()
    }

    fn cursor(&self) -> Cursor {
        if self.is_enabled() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
