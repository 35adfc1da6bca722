//! Abstract button base implementation.
//!
//! This module provides [`AbstractButton`], the base implementation for
//! button-like widgets. Concrete controls embed it and delegate the
//! common behavior:
//!
//! - Text label
//! - Checkable/toggle state
//! - Mouse and keyboard interaction
//! - Standard button signals (clicked, pressed, released, toggled)
//! - Instance-state capture via [`ButtonSnapshot`]

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use trellis_core::{Object, ObjectId, Signal};
use trellis_render::Size;

use crate::widget::{
    Key, KeyPressEvent, MouseButton, MousePressEvent, MouseReleaseEvent, SizeHint, WidgetBase,
};

/// Common functionality for all button widgets.
///
/// The checkable and checked flags use atomics and the mutators take
/// `&self`: a control's checked state is routinely flipped from change
/// callbacks that only hold a shared reference to the widget. Text and
/// other cold configuration keeps ordinary `&mut self` setters.
pub struct AbstractButton {
    /// Widget base for common widget functionality.
    base: WidgetBase,

    /// The button's text label.
    text: String,

    /// Whether the button is checkable (toggle button).
    checkable: AtomicBool,

    /// Whether the button is currently checked (only meaningful if checkable).
    checked: AtomicBool,

    /// Signal emitted when the button is clicked.
    ///
    /// For checkable buttons this fires after the checked state has
    /// settled; the payload is the checked state at that point.
    pub clicked: Signal<bool>,

    /// Signal emitted when the button is pressed down.
    pub pressed: Signal<()>,

    /// Signal emitted when the button is released.
    pub released: Signal<()>,

    /// Signal emitted when the checked state changes.
    pub toggled: Signal<bool>,
}

/// Serializable snapshot of a button's restorable state.
///
/// The text is always captured, even when it never changed after
/// construction, so a snapshot restores cleanly onto a widget built with
/// different construction arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSnapshot {
    /// The text label.
    pub text: String,
    /// Whether the button was checkable.
    pub checkable: bool,
    /// The checked state.
    pub checked: bool,
    /// Whether the button was enabled.
    pub enabled: bool,
}

impl AbstractButton {
    /// Create a new abstract button with the specified text.
    pub fn new(text: impl Into<String>) -> Self {
        let mut base = WidgetBase::new::<Self>();
        // Buttons accept keyboard focus for Space/Enter activation
        base.set_focusable(true);

        Self {
            base,
            text: text.into(),
            checkable: AtomicBool::new(false),
            checked: AtomicBool::new(false),
            clicked: Signal::new(),
            pressed: Signal::new(),
            released: Signal::new(),
            toggled: Signal::new(),
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Get the button's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the button's text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let new_text = text.into();
        if self.text != new_text {
            self.text = new_text;
            self.base.request_layout();
            self.base.update();
        }
    }

    /// Set the text using builder pattern.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    // =========================================================================
    // Checkable State
    // =========================================================================

    /// Check if the button is checkable (toggle button).
    pub fn is_checkable(&self) -> bool {
        self.checkable.load(Ordering::SeqCst)
    }

    /// Set whether the button is checkable.
    ///
    /// When checkable, clicking the button toggles between checked and
    /// unchecked. Making a checked button non-checkable unchecks it.
    pub fn set_checkable(&self, checkable: bool) {
        if self.checkable.swap(checkable, Ordering::SeqCst) != checkable {
            if !checkable && self.checked.swap(false, Ordering::SeqCst) {
                self.toggled.emit(false);
            }
            self.base.update();
        }
    }

    /// Set checkable using builder pattern.
    pub fn with_checkable(self, checkable: bool) -> Self {
        self.checkable.store(checkable, Ordering::SeqCst);
        self
    }

    /// Check if the button is currently checked.
    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::SeqCst)
    }

    /// Set the checked state.
    ///
    /// Only has effect if the button is checkable. Emits `toggled` when
    /// the state actually changes.
    pub fn set_checked(&self, checked: bool) {
        if !self.is_checkable() {
            return;
        }
        if self.checked.swap(checked, Ordering::SeqCst) != checked {
            self.toggled.emit(checked);
            self.base.update();
        }
    }

    /// Store the checked state without emitting `toggled` or requesting
    /// a redraw.
    ///
    /// Wrapping widgets that own their own notification and redraw use
    /// this to keep the binary projection in sync. Bypasses the
    /// checkable gate.
    pub(crate) fn sync_checked(&self, checked: bool) {
        self.checked.store(checked, Ordering::SeqCst);
    }

    /// Set checked state using builder pattern.
    pub fn with_checked(self, checked: bool) -> Self {
        if self.is_checkable() {
            self.checked.store(checked, Ordering::SeqCst);
        }
        self
    }

    /// Toggle the checked state.
    ///
    /// Only has effect if the button is checkable.
    pub fn toggle(&self) {
        if self.is_checkable() {
            self.set_checked(!self.is_checked());
        }
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle a mouse press event.
    ///
    /// Returns `true` if the event was handled.
    pub fn handle_mouse_press(&mut self, event: &MousePressEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }

        if !self.base.is_enabled() {
            return false;
        }

        self.base.set_pressed(true);
        self.pressed.emit(());
        true
    }

    /// Handle a mouse release event.
    ///
    /// Returns `true` if the event was handled and a click occurred.
    pub fn handle_mouse_release(&mut self, event: &MouseReleaseEvent) -> bool {
        if event.button != MouseButton::Left {
            return false;
        }

        if !self.base.is_enabled() {
            return false;
        }

        // Only click if the release is still over the button
        let was_pressed = self.base.is_pressed();
        let is_over = self.base.contains_point(event.local_pos);

        self.base.set_pressed(false);
        self.released.emit(());

        if is_over && was_pressed {
            self.click();
            return true;
        }

        false
    }

    /// Handle a key press event.
    ///
    /// Returns `true` if the event was handled.
    pub fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        if !self.base.is_enabled() {
            return false;
        }

        // Space or Enter activates the button
        match event.key {
            Key::Space | Key::Enter => {
                if !event.is_repeat {
                    self.base.set_pressed(true);
                    self.pressed.emit(());
                }
                true
            }
            _ => false,
        }
    }

    /// Handle a key release event.
    ///
    /// Returns `true` if the event was handled.
    pub fn handle_key_release(&mut self, key: Key) -> bool {
        if !self.base.is_enabled() {
            return false;
        }

        match key {
            Key::Space | Key::Enter => {
                self.base.set_pressed(false);
                self.released.emit(());
                self.click();
                true
            }
            _ => false,
        }
    }

    /// Programmatically click the button.
    ///
    /// This toggles the checked state (if checkable) and emits the
    /// clicked signal with the settled checked state.
    pub fn click(&self) {
        if !self.base.is_enabled() {
            return;
        }

        self.toggle();
        self.clicked.emit(self.is_checked());
        self.base.update();
    }

    // =========================================================================
    // Instance State
    // =========================================================================

    /// Capture the button's restorable state.
    pub fn snapshot(&self) -> ButtonSnapshot {
        ButtonSnapshot {
            text: self.text.clone(),
            checkable: self.is_checkable(),
            checked: self.is_checked(),
            enabled: self.base.is_enabled(),
        }
    }

    /// Apply a previously captured snapshot.
    ///
    /// The checked state is applied silently; callers that need
    /// notification re-derive it from their own state afterwards.
    pub fn apply_snapshot(&mut self, snapshot: &ButtonSnapshot) {
        self.set_text(snapshot.text.clone());
        self.checkable.store(snapshot.checkable, Ordering::SeqCst);
        self.checked.store(snapshot.checked, Ordering::SeqCst);
        self.base.set_enabled(snapshot.enabled);
        self.base.update();
    }

    // =========================================================================
    // Layout Helpers
    // =========================================================================

    /// Approximate the size needed for the button text.
    ///
    /// Trellis records drawing rather than rasterizing, so text metrics
    /// use a fixed per-character advance the host refines at paint time.
    pub fn text_size(&self) -> Size {
        const CHAR_ADVANCE: f32 = 8.0;
        const LINE_HEIGHT: f32 = 16.0;
        if self.text.is_empty() {
            return Size::new(0.0, LINE_HEIGHT);
        }
        Size::new(self.text.chars().count() as f32 * CHAR_ADVANCE, LINE_HEIGHT)
    }

    /// Get the default size hint for the button.
    pub fn default_size_hint(&self) -> SizeHint {
        let text_size = self.text_size();
        let padding = 8.0;
        let min_height = 24.0;

        let preferred = Size::new(
            text_size.width + padding * 2.0,
            (text_size.height + padding).max(min_height),
        );

        SizeHint::new(preferred).with_minimum_dimensions(text_size.width, min_height)
    }

    // =========================================================================
    // WidgetBase Access
    // =========================================================================

    /// Get a reference to the widget base.
    pub fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    /// Get a mutable reference to the widget base.
    pub fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl std::fmt::Debug for AbstractButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbstractButton")
            .field("text", &self.text)
            .field("checkable", &self.is_checkable())
            .field("checked", &self.is_checked())
            .finish_non_exhaustive()
    }
}

impl Object for AbstractButton {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

static_assertions::assert_impl_all!(AbstractButton: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;
    use trellis_core::init_global_registry;
    use trellis_render::{Point, Rect};
    use crate::widget::KeyboardModifiers;

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_set_checked_requires_checkable() {
        setup();
        let button = AbstractButton::new("test");
        button.set_checked(true);
        assert!(!button.is_checked());

        button.set_checkable(true);
        button.set_checked(true);
        assert!(button.is_checked());
    }

    #[test]
    fn test_toggled_is_equality_guarded() {
        setup();
        let button = AbstractButton::new("test");
        button.set_checkable(true);

        let count = Arc::new(AtomicU32::new(0));
        let count_clone = count.clone();
        button.toggled.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        button.set_checked(true);
        button.set_checked(true);
        button.set_checked(false);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_click_emits_clicked_with_settled_state() {
        setup();
        let button = AbstractButton::new("test");
        button.set_checkable(true);

        let last = Arc::new(parking_lot::Mutex::new(None));
        let last_clone = last.clone();
        button.clicked.connect(move |&checked| {
            *last_clone.lock() = Some(checked);
        });

        button.click();
        assert_eq!(*last.lock(), Some(true));
        button.click();
        assert_eq!(*last.lock(), Some(false));
    }

    #[test]
    fn test_disabled_button_ignores_click() {
        setup();
        let mut button = AbstractButton::new("test");
        button.set_checkable(true);
        button.widget_base_mut().set_enabled(false);

        button.click();
        assert!(!button.is_checked());
    }

    #[test]
    fn test_mouse_click_sequence() {
        setup();
        let mut button = AbstractButton::new("test");
        button.set_checkable(true);
        button.widget_base_mut().set_geometry(Rect::new(0.0, 0.0, 80.0, 24.0));

        let press = MousePressEvent::new(
            MouseButton::Left,
            Point::new(10.0, 10.0),
            KeyboardModifiers::NONE,
        );
        assert!(button.handle_mouse_press(&press));
        assert!(button.widget_base().is_pressed());

        let release = MouseReleaseEvent::new(
            MouseButton::Left,
            Point::new(10.0, 10.0),
            KeyboardModifiers::NONE,
        );
        assert!(button.handle_mouse_release(&release));
        assert!(!button.widget_base().is_pressed());
        assert!(button.is_checked());
    }

    #[test]
    fn test_release_outside_does_not_click() {
        setup();
        let mut button = AbstractButton::new("test");
        button.set_checkable(true);
        button.widget_base_mut().set_geometry(Rect::new(0.0, 0.0, 80.0, 24.0));

        let press = MousePressEvent::new(
            MouseButton::Left,
            Point::new(10.0, 10.0),
            KeyboardModifiers::NONE,
        );
        button.handle_mouse_press(&press);

        let release = MouseReleaseEvent::new(
            MouseButton::Left,
            Point::new(200.0, 10.0),
            KeyboardModifiers::NONE,
        );
        assert!(!button.handle_mouse_release(&release));
        assert!(!button.is_checked());
    }

    #[test]
    fn test_key_activation() {
        setup();
        let mut button = AbstractButton::new("test");
        button.set_checkable(true);

        let press = KeyPressEvent::new(Key::Space, KeyboardModifiers::NONE);
        assert!(button.handle_key_press(&press));
        assert!(button.handle_key_release(Key::Space));
        assert!(button.is_checked());

        assert!(!button.handle_key_press(&KeyPressEvent::new(
            Key::Escape,
            KeyboardModifiers::NONE
        )));
    }

    #[test]
    fn test_snapshot_round_trip() {
        setup();
        let mut button = AbstractButton::new("original");
        button.set_checkable(true);
        button.set_checked(true);
        button.widget_base_mut().set_enabled(false);

        let snapshot = button.snapshot();
        assert_eq!(snapshot.text, "original");
        assert!(snapshot.checkable);
        assert!(snapshot.checked);
        assert!(!snapshot.enabled);

        let mut rebuilt = AbstractButton::new("different");
        rebuilt.apply_snapshot(&snapshot);
        assert_eq!(rebuilt.text(), "original");
        assert!(rebuilt.is_checked());
        assert!(!rebuilt.widget_base().is_enabled());
    }
}
