//! Core types and traits for the fluent-menu popup toolkit.
//!
//! This crate provides the host-independent primitives the menu is built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input: [`Event`], [`Key`], [`MouseButton`]
//! - Painting: the [`Canvas`] trait, [`Bitmap`], and a [`RecordingCanvas`]
//! - Host text measurement: [`TextMetrics`]

mod bitmap;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
mod metrics;
pub mod widget;

pub use bitmap::Bitmap;
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::DrawCommand;
pub use event::{Event, Key, MouseButton};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use metrics::{FixedWidthMetrics, TextMetrics};
pub use widget::{Canvas, Cursor, FontWeight, LayoutResult, TextStyle, Transform2D, Widget};
