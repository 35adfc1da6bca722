//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the common implementation details
//! for all widgets: geometry, visibility, enabled state, input state, and
//! the redraw/layout request machinery. It coordinates with the object
//! system from `trellis-core`.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use trellis_core::{Object, ObjectBase, ObjectId, ObjectResult, Signal};
use trellis_render::{Point, Rect, Size};

use super::geometry::{SizePolicy, SizePolicyPair};

/// Horizontal reading direction for widget content.
///
/// Widgets that place content at a "leading" or "trailing" edge consult
/// this to decide which physical edge that is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutDirection {
    /// Content flows left to right; the leading edge is the left edge.
    #[default]
    LeftToRight,
    /// Content flows right to left; the leading edge is the right edge.
    RightToLeft,
}

impl LayoutDirection {
    /// Check if this is the right-to-left direction.
    pub fn is_rtl(self) -> bool {
        self == LayoutDirection::RightToLeft
    }
}

impl FromStr for LayoutDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ltr" | "left_to_right" => Ok(LayoutDirection::LeftToRight),
            "rtl" | "right_to_left" => Ok(LayoutDirection::RightToLeft),
            _ => Err(()),
        }
    }
}

/// Vertical placement of content within a widget's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    /// Align to the top edge.
    Top,
    /// Center vertically.
    #[default]
    Center,
    /// Align to the bottom edge.
    Bottom,
}

impl VerticalAlignment {
    /// Compute the top offset for content of `content_height` inside a
    /// region of `available_height`.
    pub fn offset(self, available_height: f32, content_height: f32) -> f32 {
        match self {
            VerticalAlignment::Top => 0.0,
            VerticalAlignment::Center => (available_height - content_height) / 2.0,
            VerticalAlignment::Bottom => available_height - content_height,
        }
    }
}

impl FromStr for VerticalAlignment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(VerticalAlignment::Top),
            "center" => Ok(VerticalAlignment::Center),
            "bottom" => Ok(VerticalAlignment::Bottom),
            _ => Err(()),
        }
    }
}

/// The base implementation for all widgets.
///
/// This struct provides common functionality that all widgets need:
/// - Object system integration (ID, parent-child relationships)
/// - Geometry management (position, size)
/// - Size policies for layout
/// - Visibility, enabled, focus, hover, and pressed state
/// - Redraw and layout requests
///
/// Widget implementations include this as a field and delegate common
/// operations to it.
///
/// # Redraw and Layout Requests
///
/// [`update`](Self::update) and [`request_layout`](Self::request_layout)
/// take `&self`: they are the mutators a change callback is allowed to
/// drive, so they must be callable through a shared reference. The dirty
/// flags are atomics for the same reason. Each call emits the matching
/// signal (`update_requested` / `layout_requested`), which is how hosts
/// and tests observe individual requests rather than just the coalesced
/// flag.
pub struct WidgetBase {
    /// The underlying object base for Object trait implementation.
    object_base: ObjectBase,

    /// The widget's geometry (position relative to parent and size).
    geometry: Rect,

    /// The widget's size policy for layout.
    size_policy: SizePolicyPair,

    /// Horizontal reading direction.
    layout_direction: LayoutDirection,

    /// Whether the widget is visible.
    visible: bool,

    /// Whether the widget is enabled (can receive input).
    enabled: bool,

    /// Whether the widget can receive keyboard focus.
    focusable: bool,

    /// Whether the widget currently has focus.
    focused: bool,

    /// Whether the mouse is currently over this widget.
    hovered: bool,

    /// Whether a press is in progress on this widget.
    pressed: bool,

    /// Whether the widget needs to be repainted.
    needs_repaint: AtomicBool,

    /// Whether the widget needs a layout pass.
    needs_layout: AtomicBool,

    /// Signal emitted when the geometry changes.
    pub geometry_changed: Signal<Rect>,

    /// Signal emitted when visibility changes.
    pub visible_changed: Signal<bool>,

    /// Signal emitted when enabled state changes.
    pub enabled_changed: Signal<bool>,

    /// Signal emitted on every redraw request.
    pub update_requested: Signal<()>,

    /// Signal emitted on every layout (re-measure) request.
    pub layout_requested: Signal<()>,
}

impl WidgetBase {
    /// Create a new widget base.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            object_base: ObjectBase::new::<T>(),
            geometry: Rect::ZERO,
            size_policy: SizePolicyPair::default(),
            layout_direction: LayoutDirection::default(),
            visible: true,
            enabled: true,
            focusable: false,
            focused: false,
            hovered: false,
            pressed: false,
            needs_repaint: AtomicBool::new(true),
            needs_layout: AtomicBool::new(true),
            geometry_changed: Signal::new(),
            visible_changed: Signal::new(),
            enabled_changed: Signal::new(),
            update_requested: Signal::new(),
            layout_requested: Signal::new(),
        }
    }

    // =========================================================================
    // Object System Delegation
    // =========================================================================

    /// Get the widget's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// Get the widget's name.
    pub fn name(&self) -> String {
        self.object_base.name()
    }

    /// Set the widget's name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    /// Get the parent widget's object ID.
    pub fn parent_id(&self) -> Option<ObjectId> {
        self.object_base.parent()
    }

    /// Set the parent widget.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.object_base.set_parent(parent)
    }

    /// Get the IDs of child widgets.
    pub fn children_ids(&self) -> Vec<ObjectId> {
        self.object_base.children()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the widget's geometry (position and size).
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry.
    ///
    /// This will emit `geometry_changed` if the geometry actually changed.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.update();
            self.geometry_changed.emit(rect);
        }
    }

    /// Get the widget's position relative to its parent.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// Get the widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Set the widget's size.
    pub fn set_size(&mut self, size: Size) {
        self.set_geometry(Rect {
            origin: self.geometry.origin,
            size,
        });
    }

    /// Resize the widget.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.set_size(Size::new(width, height));
    }

    /// Get the widget's width.
    #[inline]
    pub fn width(&self) -> f32 {
        self.geometry.size.width
    }

    /// Get the widget's height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.geometry.size.height
    }

    /// Get a rectangle representing the widget's local coordinate space.
    ///
    /// This is always positioned at (0, 0) with the widget's size.
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.geometry.size.width, self.geometry.size.height)
    }

    /// Check if a point (in local coordinates) is inside the widget.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.rect().contains(point)
    }

    // =========================================================================
    // Size Policy
    // =========================================================================

    /// Get the widget's size policy.
    #[inline]
    pub fn size_policy(&self) -> SizePolicyPair {
        self.size_policy
    }

    /// Set the widget's size policy.
    pub fn set_size_policy(&mut self, policy: SizePolicyPair) {
        self.size_policy = policy;
    }

    /// Set horizontal size policy.
    pub fn set_horizontal_policy(&mut self, policy: SizePolicy) {
        self.size_policy.horizontal = policy;
    }

    /// Set vertical size policy.
    pub fn set_vertical_policy(&mut self, policy: SizePolicy) {
        self.size_policy.vertical = policy;
    }

    // =========================================================================
    // Layout Direction
    // =========================================================================

    /// Get the widget's reading direction.
    #[inline]
    pub fn layout_direction(&self) -> LayoutDirection {
        self.layout_direction
    }

    /// Set the widget's reading direction.
    ///
    /// Changing direction re-measures the widget, since edge-anchored
    /// content moves to the opposite side.
    pub fn set_layout_direction(&mut self, direction: LayoutDirection) {
        if self.layout_direction != direction {
            self.layout_direction = direction;
            self.request_layout();
            self.update();
        }
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the widget is visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set whether the widget is visible.
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.update();
            self.visible_changed.emit(visible);
        }
    }

    /// Show the widget.
    pub fn show(&mut self) {
        self.set_visible(true);
    }

    /// Hide the widget.
    pub fn hide(&mut self) {
        self.set_visible(false);
    }

    // =========================================================================
    // Enabled State
    // =========================================================================

    /// Check if the widget is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set whether the widget is enabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.update();
            self.enabled_changed.emit(enabled);
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Check if the widget can receive keyboard focus.
    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable && self.enabled && self.visible
    }

    /// Set whether the widget can receive keyboard focus.
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    /// Check if the widget currently has keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Set the focused state (driven by the host's focus management).
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.update();
        }
    }

    // =========================================================================
    // Hover and Pressed State
    // =========================================================================

    /// Check if the mouse is currently over this widget.
    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Set the hover state (driven by enter/leave events).
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered != hovered {
            self.hovered = hovered;
            self.update();
        }
    }

    /// Check if a press is currently in progress on this widget.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Set the pressed state (driven by press/release events).
    pub fn set_pressed(&mut self, pressed: bool) {
        if self.pressed != pressed {
            self.pressed = pressed;
            self.update();
        }
    }

    // =========================================================================
    // Redraw and Layout Requests
    // =========================================================================

    /// Check if the widget needs to be repainted.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint.load(Ordering::SeqCst)
    }

    /// Request a repaint of the widget.
    ///
    /// Emits `update_requested` on every call; the dirty flag coalesces
    /// multiple requests into a single repaint.
    pub fn update(&self) {
        self.needs_repaint.store(true, Ordering::SeqCst);
        self.update_requested.emit(());
    }

    /// Clear the repaint flag (called by the host after painting).
    pub fn clear_repaint_flag(&self) {
        self.needs_repaint.store(false, Ordering::SeqCst);
    }

    /// Check if the widget needs a layout pass.
    #[inline]
    pub fn needs_layout(&self) -> bool {
        self.needs_layout.load(Ordering::SeqCst)
    }

    /// Request a layout (re-measure) pass.
    ///
    /// Emits `layout_requested` on every call. Used when a change affects
    /// the widget's size hint, such as a new icon with a different
    /// intrinsic size.
    pub fn request_layout(&self) {
        self.needs_layout.store(true, Ordering::SeqCst);
        self.layout_requested.emit(());
    }

    /// Clear the layout flag (called by the host after laying out).
    pub fn clear_layout_flag(&self) {
        self.needs_layout.store(false, Ordering::SeqCst);
    }
}

impl Object for WidgetBase {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

// WidgetBase doesn't implement Drop because ObjectBase handles cleanup.
