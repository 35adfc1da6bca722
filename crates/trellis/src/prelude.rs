//! Prelude module for Trellis.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use trellis::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot system (`Signal`, `ConnectionId`)
//! - Widget foundation (`Widget`, `WidgetBase`, `PaintContext`, `Checkable`)
//! - Shipped widgets (`AbstractButton`, `TriStateCheckBox`)
//! - Declarative attributes and instance-state snapshots
//! - Geometry and paint types (`Point`, `Size`, `Rect`, `Color`, `DisplayList`)

// ============================================================================
// Signal/Slot System
// ============================================================================

pub use trellis_core::{ConnectionGuard, ConnectionId, Signal};

// ============================================================================
// Object System
// ============================================================================

pub use trellis_core::{init_global_registry, Object, ObjectBase, ObjectId};

// ============================================================================
// Widget Foundation
// ============================================================================

pub use crate::widget::{
    AsWidget, Checkable, LayoutDirection, PaintContext, SizeHint, SizePolicy, SizePolicyPair,
    VerticalAlignment, Widget, WidgetBase,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{
    AbstractButton, ButtonSnapshot, CheckBoxSnapshot, SelectionState, TriStateCheckBox,
};

// ============================================================================
// Attributes and Instance State
// ============================================================================

pub use crate::widget::{AttributeError, AttributeSet, AttributeValue};
pub use crate::widget::{InstanceState, InstanceStateError, InstanceStateErrorKind};

// ============================================================================
// Geometry and Graphics Types
// ============================================================================

pub use trellis_render::{
    Color, DisplayList, DrawCommand, DrawableState, IconSource, Painter, Point, Rect, Size,
    StateIconSet,
};

// ============================================================================
// Event Types
// ============================================================================

pub use crate::widget::{Key, KeyboardModifiers, MouseButton, WidgetEvent};

#[cfg(test)]
mod tests {
    #![allow(unused)]
    use super::*;

    /// Verify that all prelude exports are accessible and the types exist.
    #[test]
    fn test_prelude_types_exist() {
        let _signal: Signal<i32> = Signal::new();

        let _point = Point::new(0.0, 0.0);
        let _size = Size::new(100.0, 100.0);
        let _rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let _color = Color::from_rgb8(255, 255, 255);
        let _list = DisplayList::new();

        let _state = SelectionState::Multiple;
        assert_eq!(_state.to_raw(), -1);
    }

    /// Verify widget types are accessible (compile-time check only).
    #[allow(dead_code)]
    fn _widget_types_check() {
        fn _takes_widget<W: Widget>(_w: &W) {}
        fn _takes_checkable<C: Checkable>(_c: &C) {}

        fn _button(_text: &str) -> AbstractButton {
            AbstractButton::new(_text)
        }
        fn _checkbox(_text: &str) -> TriStateCheckBox {
            TriStateCheckBox::new(_text)
        }
    }
}
