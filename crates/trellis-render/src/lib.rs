//! Drawing primitives for Trellis.
//!
//! This crate provides the rendering contract widgets are written against:
//! geometry and color types, icon references with per-state variants, and a
//! recording paint surface. Nothing here rasterizes; hosts take the
//! recorded output and composite it however they like.
//!
//! # Recording a Frame
//!
//! ```
//! use trellis_render::{Color, DisplayList, Painter, Point, Rect};
//!
//! let mut list = DisplayList::new();
//! list.fill_rect(Rect::new(0.0, 0.0, 120.0, 32.0), Color::WHITE);
//! list.draw_text("Select all", Point::new(30.0, 22.0), Color::BLACK);
//!
//! assert_eq!(list.len(), 2);
//! ```
//!
//! # State-Dependent Icons
//!
//! ```
//! use trellis_render::{DrawableState, IconSource, Size, StateIconSet};
//!
//! let icon = StateIconSet::new(
//!     IconSource::Named("box_empty".into()),
//!     Size::new(24.0, 24.0),
//! )
//! .with_variant(DrawableState::ALL, IconSource::Named("box_checked".into()));
//!
//! let pressed_all = DrawableState::ENABLED | DrawableState::ALL;
//! assert_eq!(icon.resolve(pressed_all).name(), Some("box_checked"));
//! ```

mod icon;
mod painter;
mod types;

// Geometry and color
pub use types::{Color, Point, Rect, Size};

// Icon model
pub use icon::{DrawableState, IconError, IconSource, StateIconSet};

// Paint surface
pub use painter::{DisplayList, DrawCommand, Painter};
