//! Widget system for Trellis.
//!
//! This module provides the foundational widget architecture:
//!
//! - [`Widget`] trait: the base trait for all UI elements
//! - [`WidgetBase`]: common implementation for widget functionality
//! - [`Checkable`]: the capability interface for toggle-style controls
//! - Size hints and policies for layout negotiation
//! - Widget events for input handling
//! - Declarative attributes for inflation-time configuration
//! - Instance-state snapshots for save/restore across recreation
//!
//! # Creating a Widget
//!
//! To create a custom widget:
//!
//! 1. Define a struct with a `WidgetBase` field
//! 2. Implement the `Widget` trait
//! 3. Provide `size_hint()` for layout
//! 4. Implement `paint()` for rendering
//!
//! ```ignore
//! use trellis::widget::*;
//! use trellis_render::Color;
//!
//! struct MyButton {
//!     base: WidgetBase,
//!     label: String,
//! }
//!
//! impl Widget for MyButton {
//!     fn widget_base(&self) -> &WidgetBase { &self.base }
//!     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
//!
//!     fn size_hint(&self) -> SizeHint {
//!         SizeHint::from_dimensions(80.0, 30.0)
//!     }
//!
//!     fn paint(&self, ctx: &mut PaintContext<'_>) {
//!         let rect = ctx.rect();
//!         ctx.painter().fill_rect(rect, Color::from_rgb8(65, 105, 225));
//!     }
//! }
//! ```

pub mod attributes;
pub mod base;
pub mod events;
pub mod geometry;
pub mod instance_state;
pub mod traits;
pub mod widgets;

pub use attributes::{
    AttributeError, AttributeErrorKind, AttributeSet, AttributeValue, FromAttributeValue,
};
pub use base::{LayoutDirection, VerticalAlignment, WidgetBase};
pub use events::{
    EnterEvent, EventBase, FocusInEvent, FocusOutEvent, FocusReason, Key, KeyPressEvent,
    KeyReleaseEvent, KeyboardModifiers, LeaveEvent, MouseButton, MousePressEvent,
    MouseReleaseEvent, WidgetEvent,
};
pub use geometry::{SizeHint, SizePolicy, SizePolicyPair};
pub use instance_state::{InstanceState, InstanceStateError, InstanceStateErrorKind};
pub use traits::{AsWidget, Checkable, PaintContext, Widget};
