//! A checkbox with three selection states.
//!
//! [`TriStateCheckBox`] extends the usual checked/unchecked checkbox with
//! a third "partially selected" state. It is built for the head of a
//! hierarchical selection list: unchecked when no child is selected,
//! [`SelectionState::Multiple`] when some are, and [`SelectionState::All`]
//! when every child is selected.
//!
//! The binary [`Checkable`] view of the control collapses the partial
//! state to unchecked, so hosts that only understand two-state checkboxes
//! still behave sensibly: clicking a partially selected box selects
//! everything.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use trellis_core::{Object, ObjectId, Signal};
use trellis_render::{Color, DrawableState, IconSource, Point, Rect, Size, StateIconSet};

use crate::widget::attributes::{AttributeError, AttributeSet};
use crate::widget::base::{VerticalAlignment, WidgetBase};
use crate::widget::events::{
    Key, KeyPressEvent, KeyReleaseEvent, MouseButton, MousePressEvent, MouseReleaseEvent,
    WidgetEvent,
};
use crate::widget::geometry::SizeHint;
use crate::widget::instance_state::{InstanceState, InstanceStateError};
use crate::widget::traits::{Checkable, PaintContext, Widget};
use crate::widget::widgets::abstract_button::{AbstractButton, ButtonSnapshot};

const LOG_TARGET: &str = "trellis::widget";

/// Icon size used when a plain source is set without an explicit set.
const DEFAULT_ICON_SIZE: Size = Size::new(24.0, 24.0);

// ============================================================================
// Selection State
// ============================================================================

/// The three states of a [`TriStateCheckBox`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionState {
    /// No items are selected.
    #[default]
    Unchecked,
    /// Some, but not all, items are selected.
    Multiple,
    /// Every item is selected.
    All,
}

impl SelectionState {
    /// Encode the state as its wire value.
    pub const fn to_raw(self) -> i32 {
        match self {
            SelectionState::Unchecked => 0,
            SelectionState::Multiple => -1,
            SelectionState::All => -2,
        }
    }

    /// Decode a wire value. Returns `None` for anything out of range.
    pub const fn try_from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(SelectionState::Unchecked),
            -1 => Some(SelectionState::Multiple),
            -2 => Some(SelectionState::All),
            _ => None,
        }
    }

    /// Derive a state from a pair of flags. `all` takes precedence when
    /// both are set.
    pub const fn from_flags(all: bool, multiple: bool) -> Self {
        if all {
            SelectionState::All
        } else if multiple {
            SelectionState::Multiple
        } else {
            SelectionState::Unchecked
        }
    }

    /// The binary projection of the state.
    ///
    /// Only `All` reads as checked; the partial state collapses to
    /// unchecked so that activating a partially selected box selects
    /// everything.
    pub const fn is_checked(self) -> bool {
        matches!(self, SelectionState::All)
    }

    /// The drawable flag used to resolve a state icon variant.
    pub const fn drawable_state(self) -> DrawableState {
        match self {
            SelectionState::Unchecked => DrawableState::UNCHECKED,
            SelectionState::Multiple => DrawableState::MULTIPLE,
            SelectionState::All => DrawableState::ALL,
        }
    }
}

// ============================================================================
// TriStateCheckBox
// ============================================================================

/// A checkbox widget with three selection states.
///
/// State mutators take `&self`: listeners connected to
/// [`state_changed`](Self::state_changed) routinely drive sibling
/// checkboxes (or this one) while holding only a shared handle. A
/// broadcast guard keeps such re-entrant writes from producing nested
/// notification rounds: the nested write lands, redraws, and the new
/// state is what subsequent reads observe, but listeners only hear about
/// the state the outer call was announcing.
pub struct TriStateCheckBox {
    /// Embedded button behavior (text, press handling, binary signals).
    inner: AbstractButton,

    /// The current selection state.
    state: Mutex<SelectionState>,

    /// Set while notification is in flight; nested writes skip their own
    /// notification round.
    broadcasting: AtomicBool,

    /// Optional state-dependent icon.
    icon: Mutex<Option<Arc<StateIconSet>>>,

    /// Vertical placement of the icon within the widget bounds.
    vertical_alignment: VerticalAlignment,

    /// Signal emitted when the selection state changes.
    state_changed: Signal<SelectionState>,
}

/// Serializable snapshot of a checkbox's restorable state.
///
/// The selection state travels as its raw wire value so snapshots stay
/// readable by other tooling; decode rejects out-of-range values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckBoxSnapshot {
    /// Raw selection state (see [`SelectionState::to_raw`]).
    pub state: i32,
    /// Embedded button state.
    pub base: ButtonSnapshot,
}

impl TriStateCheckBox {
    /// Instance-state type tag.
    pub const WIDGET_TYPE: &'static str = "tri_state_checkbox";

    /// Create a new checkbox with the given label, initially unchecked.
    pub fn new(text: impl Into<String>) -> Self {
        let inner = AbstractButton::new(text).with_checkable(true);
        Self {
            inner,
            state: Mutex::new(SelectionState::Unchecked),
            broadcasting: AtomicBool::new(false),
            icon: Mutex::new(None),
            vertical_alignment: VerticalAlignment::default(),
            state_changed: Signal::new(),
        }
    }

    /// Build a checkbox from a declarative attribute set.
    ///
    /// Recognized keys: `text`, `enabled`, `vertical_alignment`,
    /// `layout_direction`, `state_all`, `state_multiple`,
    /// `state_unchecked`, and `icon`. The explicit `state_unchecked` flag
    /// overrides the other two state flags.
    pub fn from_attributes(attrs: &AttributeSet) -> Result<Self, AttributeError> {
        let text = attrs.get::<String>("text")?.unwrap_or_default();
        let mut checkbox = Self::new(text);

        if let Some(enabled) = attrs.get::<bool>("enabled")? {
            checkbox.inner.widget_base_mut().set_enabled(enabled);
        }

        if let Some(alignment) = attrs.get::<String>("vertical_alignment")? {
            let parsed = alignment
                .parse()
                .map_err(|_| AttributeError::invalid_variant("vertical_alignment", &alignment))?;
            checkbox.set_vertical_alignment(parsed);
        }

        if let Some(direction) = attrs.get::<String>("layout_direction")? {
            let parsed = direction
                .parse()
                .map_err(|_| AttributeError::invalid_variant("layout_direction", &direction))?;
            checkbox.inner.widget_base_mut().set_layout_direction(parsed);
        }

        let all = attrs.get_or("state_all", false)?;
        let multiple = attrs.get_or("state_multiple", false)?;
        if all || multiple {
            checkbox.set_state_flags(all, multiple);
        }
        if attrs.get_or("state_unchecked", false)? {
            checkbox.set_state(SelectionState::Unchecked);
        }

        if let Some(icon_ref) = attrs.get::<String>("icon")? {
            let source: IconSource = icon_ref
                .parse()
                .map_err(|_| AttributeError::invalid_variant("icon", &icon_ref))?;
            checkbox.set_icon_source(source);
        }

        Ok(checkbox)
    }

    // =========================================================================
    // Selection State
    // =========================================================================

    /// The current selection state.
    pub fn state(&self) -> SelectionState {
        *self.state.lock()
    }

    /// Set the selection state.
    ///
    /// Setting the current state again is a complete no-op: no redraw, no
    /// notification. Otherwise the state is stored, the binary projection
    /// is synced, exactly one redraw is requested, and then `toggled`
    /// (when the projection changed) and `state_changed` fire in that
    /// order.
    ///
    /// A listener may call back into `set_state`; the nested write takes
    /// effect (last write wins) but does not start a second notification
    /// round.
    pub fn set_state(&self, state: SelectionState) {
        let previous = {
            let mut current = self.state.lock();
            let previous = *current;
            if previous == state {
                return;
            }
            *current = state;
            previous
        };

        tracing::trace!(
            target: LOG_TARGET,
            from = ?previous,
            to = ?state,
            "selection state changed"
        );

        // Keep the embedded button's binary view in sync silently; this
        // widget owns the notification and requests the single redraw.
        self.inner.sync_checked(state.is_checked());
        self.inner.widget_base().update();

        if self.broadcasting.swap(true, Ordering::SeqCst) {
            return;
        }
        if previous.is_checked() != state.is_checked() {
            self.inner.toggled.emit(state.is_checked());
        }
        self.state_changed.emit(state);
        self.broadcasting.store(false, Ordering::SeqCst);
    }

    /// Set the state from a pair of flags; `all` wins when both are set.
    pub fn set_state_flags(&self, all: bool, multiple: bool) {
        self.set_state(SelectionState::from_flags(all, multiple));
    }

    /// Signal emitted when the selection state changes.
    ///
    /// Listeners run in connection order and receive the state the
    /// emitting call stored, even if a listener re-enters and changes it
    /// again.
    pub fn state_changed(&self) -> &Signal<SelectionState> {
        &self.state_changed
    }

    /// Signal emitted when the binary checked projection changes.
    pub fn toggled(&self) -> &Signal<bool> {
        &self.inner.toggled
    }

    /// Signal emitted on activation, after the state has settled.
    pub fn clicked(&self) -> &Signal<bool> {
        &self.inner.clicked
    }

    /// Signal emitted when the checkbox is pressed down.
    pub fn pressed(&self) -> &Signal<()> {
        &self.inner.pressed
    }

    /// Signal emitted when the checkbox is released.
    pub fn released(&self) -> &Signal<()> {
        &self.inner.released
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// The checkbox label.
    pub fn text(&self) -> &str {
        self.inner.text()
    }

    /// Set the checkbox label.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.inner.set_text(text);
    }

    // =========================================================================
    // Icon
    // =========================================================================

    /// The state icon set, if one is configured.
    pub fn icon(&self) -> Option<Arc<StateIconSet>> {
        self.icon.lock().clone()
    }

    /// Set the state icon set.
    ///
    /// Setting the same set again (by identity) is a no-op. A new set
    /// re-measures the widget, since its intrinsic size feeds the size
    /// hint.
    pub fn set_icon(&self, icon: Arc<StateIconSet>) {
        {
            let mut current = self.icon.lock();
            if current
                .as_ref()
                .is_some_and(|existing| Arc::ptr_eq(existing, &icon))
            {
                return;
            }
            *current = Some(icon);
        }
        self.inner.widget_base().request_layout();
        self.inner.widget_base().update();
    }

    /// Set a single icon source for all states.
    ///
    /// Re-setting the source the current single-source icon already uses
    /// is a no-op.
    pub fn set_icon_source(&self, source: IconSource) {
        {
            let current = self.icon.lock();
            if let Some(existing) = current.as_ref() {
                if existing.variant_count() == 0 && existing.fallback() == &source {
                    return;
                }
            }
        }
        self.set_icon(Arc::new(StateIconSet::new(source, DEFAULT_ICON_SIZE)));
    }

    /// Remove the icon.
    pub fn clear_icon(&self) {
        if self.icon.lock().take().is_some() {
            self.inner.widget_base().request_layout();
            self.inner.widget_base().update();
        }
    }

    // =========================================================================
    // Alignment and Insets
    // =========================================================================

    /// Vertical placement of the icon within the widget bounds.
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Set the vertical placement of the icon.
    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        if self.vertical_alignment != alignment {
            self.vertical_alignment = alignment;
            self.inner.widget_base().update();
        }
    }

    /// Horizontal insets `(left, right)` the icon claims from the text
    /// area. The icon sits at the leading edge, so the inset flips under
    /// right-to-left layout.
    pub fn content_insets(&self) -> (f32, f32) {
        let icon_width = self
            .icon
            .lock()
            .as_ref()
            .map(|icon| icon.intrinsic_size().width)
            .unwrap_or(0.0);
        if self.inner.widget_base().layout_direction().is_rtl() {
            (0.0, icon_width)
        } else {
            (icon_width, 0.0)
        }
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Programmatically activate the checkbox.
    ///
    /// Toggles through the three-state rules and emits `clicked` with the
    /// settled binary state. Disabled checkboxes ignore activation.
    pub fn click(&self) {
        if !self.inner.widget_base().is_enabled() {
            return;
        }
        self.toggle();
        self.inner.clicked.emit(self.is_checked());
        self.inner.widget_base().update();
    }

    /// Handle a mouse press event.
    pub fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        self.inner.handle_mouse_press(event)
    }

    /// Handle a mouse release event. A release over the widget while
    /// pressed activates it.
    pub fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }
        if !self.inner.widget_base().is_enabled() {
            return false;
        }

        let was_pressed = self.inner.widget_base().is_pressed();
        let is_over = self.inner.widget_base().contains_point(event.local_pos);

        self.inner.widget_base_mut().set_pressed(false);
        self.inner.released.emit(());

        if is_over && was_pressed {
            self.click();
            return true;
        }
        false
    }

    /// Handle a key press event.
    pub fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        self.inner.handle_key_press(event)
    }

    /// Handle a key release event. Space and Enter activate the checkbox.
    pub fn handle_key_release(&mut self, event: &KeyReleaseEvent) -> bool {
        if !self.inner.widget_base().is_enabled() {
            return false;
        }
        match event.key {
            Key::Space | Key::Enter => {
                self.inner.widget_base_mut().set_pressed(false);
                self.inner.released.emit(());
                self.click();
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Instance State
    // =========================================================================

    /// Capture the checkbox's restorable state.
    pub fn save_instance_state(&self) -> Result<InstanceState, InstanceStateError> {
        let payload = CheckBoxSnapshot {
            state: self.state().to_raw(),
            base: self.inner.snapshot(),
        };
        InstanceState::encode(Self::WIDGET_TYPE, &payload)
    }

    /// Restore a previously captured snapshot.
    ///
    /// The embedded button state is applied first, then the selection
    /// state through [`set_state`](Self::set_state) so connected
    /// listeners observe the restored value. The widget is re-measured
    /// afterwards since the restored text may differ.
    pub fn restore_instance_state(
        &mut self,
        snapshot: &InstanceState,
    ) -> Result<(), InstanceStateError> {
        let payload: CheckBoxSnapshot = snapshot.decode(Self::WIDGET_TYPE)?;
        let state = SelectionState::try_from_raw(payload.state).ok_or_else(|| {
            InstanceStateError::invalid_value_message(
                Self::WIDGET_TYPE,
                format!("selection state {} out of range", payload.state),
            )
        })?;

        tracing::trace!(target: LOG_TARGET, ?state, "restoring instance state");

        self.inner.apply_snapshot(&payload.base);
        self.set_state(state);
        self.inner.widget_base().request_layout();
        Ok(())
    }

    // =========================================================================
    // Painting Helpers
    // =========================================================================

    /// The full drawable state used to resolve an icon variant.
    pub fn drawable_state(&self) -> DrawableState {
        let base = self.inner.widget_base();
        let mut flags = DrawableState::NONE;
        if base.is_enabled() {
            flags |= DrawableState::ENABLED;
        }
        if base.is_pressed() {
            flags |= DrawableState::PRESSED;
        }
        if base.has_focus() {
            flags |= DrawableState::FOCUSED;
        }
        if base.is_hovered() {
            flags |= DrawableState::HOVERED;
        }
        flags | self.state().drawable_state()
    }

    /// Where the icon lands inside `bounds`, honoring layout direction
    /// and vertical alignment. The icon keeps its intrinsic size.
    fn icon_rect(&self, icon: &StateIconSet, bounds: Rect) -> Rect {
        let size = icon.intrinsic_size();
        let x = if self.inner.widget_base().layout_direction().is_rtl() {
            bounds.width() - size.width
        } else {
            0.0
        };
        let y = self.vertical_alignment.offset(bounds.height(), size.height);
        Rect::new(x, y, size.width, size.height)
    }
}

impl Checkable for TriStateCheckBox {
    fn is_checked(&self) -> bool {
        self.state().is_checked()
    }

    /// Map the binary request onto the three-state model: checking
    /// selects everything, unchecking clears everything. The partial
    /// state is never produced by this path.
    fn set_checked(&self, checked: bool) {
        self.set_state(if checked {
            SelectionState::All
        } else {
            SelectionState::Unchecked
        });
    }

    /// Advance through the three-state cycle.
    ///
    /// Both `All` and `Multiple` uncheck; only a fully unchecked box
    /// checks (to `All`).
    fn toggle(&self) {
        self.set_checked(self.state() == SelectionState::Unchecked);
    }
}

impl std::fmt::Debug for TriStateCheckBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriStateCheckBox")
            .field("text", &self.inner.text())
            .field("state", &self.state())
            .field("has_icon", &self.icon.lock().is_some())
            .finish_non_exhaustive()
    }
}

impl Object for TriStateCheckBox {
    fn object_id(&self) -> ObjectId {
        self.inner.widget_base().object_id()
    }
}

impl Widget for TriStateCheckBox {
    fn widget_base(&self) -> &WidgetBase {
        self.inner.widget_base()
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        self.inner.widget_base_mut()
    }

    fn size_hint(&self) -> SizeHint {
        let mut hint = self.inner.default_size_hint();
        if let Some(icon) = self.icon.lock().as_ref() {
            let icon_size = icon.intrinsic_size();
            hint.preferred.width += icon_size.width;
            hint.preferred.height = hint.preferred.height.max(icon_size.height);

            let min = hint.effective_minimum();
            hint = hint.with_minimum(Size::new(
                min.width + icon_size.width,
                min.height.max(icon_size.height),
            ));
        }
        hint
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let bounds = ctx.rect();
        let enabled = self.inner.widget_base().is_enabled();

        if let Some(icon) = self.icon.lock().clone() {
            let rect = self.icon_rect(&icon, bounds);
            let source = icon.resolve(self.drawable_state()).clone();
            ctx.painter().draw_icon(&source, rect);
        }

        let text = self.inner.text();
        if !text.is_empty() {
            let (left_inset, _) = self.content_insets();
            let text_color = if enabled {
                Color::BLACK
            } else {
                Color::from_rgb8(128, 128, 128)
            };
            let padding = 4.0;
            let baseline = self.vertical_alignment.offset(bounds.height(), 16.0) + 12.0;
            ctx.painter().draw_text(
                text,
                Point::new(left_inset + padding, baseline),
                text_color,
            );
        }
    }

    fn event(&mut self, event: &mut WidgetEvent) -> bool {
        let handled = match event {
            WidgetEvent::MousePress(e) => {
                let e = *e;
                self.handle_mouse_press(&e)
            }
            WidgetEvent::MouseRelease(e) => {
                let e = *e;
                self.handle_mouse_release(&e)
            }
            WidgetEvent::KeyPress(e) => {
                let e = *e;
                self.handle_key_press(&e)
            }
            WidgetEvent::KeyRelease(e) => {
                let e = *e;
                self.handle_key_release(&e)
            }
            WidgetEvent::Enter(_) => {
                self.inner.widget_base_mut().set_hovered(true);
                true
            }
            WidgetEvent::Leave(_) => {
                self.inner.widget_base_mut().set_hovered(false);
                self.inner.widget_base_mut().set_pressed(false);
                true
            }
            WidgetEvent::FocusIn(_) => {
                self.inner.widget_base_mut().set_focused(true);
                true
            }
            WidgetEvent::FocusOut(_) => {
                self.inner.widget_base_mut().set_focused(false);
                true
            }
        };
        if handled {
            event.accept();
        }
        handled
    }
}

static_assertions::assert_impl_all!(TriStateCheckBox: Send, Sync);
