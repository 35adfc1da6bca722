//! Concrete widget implementations.
//!
//! This module contains the built-in widgets:
//!
//! - [`AbstractButton`]: common behavior for button-like controls
//! - [`TriStateCheckBox`]: a checkbox with an extra "partially selected"
//!   state for hierarchical selection UIs

pub mod abstract_button;
pub mod tri_state_checkbox;

pub use abstract_button::{AbstractButton, ButtonSnapshot};
pub use tri_state_checkbox::{CheckBoxSnapshot, SelectionState, TriStateCheckBox};
