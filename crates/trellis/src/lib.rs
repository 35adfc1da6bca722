//! Trellis: a small widget kit for hierarchical selection controls.
//!
//! The centerpiece of the kit is [`TriStateCheckBox`], a checkbox with three
//! states instead of the usual two. It is the control that sits at the top
//! of a "select all children" list: unchecked when nothing below it is
//! selected, showing a partial mark when some children are, and fully
//! checked when every child is.
//!
//! The crate is hosted rather than self-hosting: widgets record their
//! drawing into a [`DisplayList`](trellis_render::DisplayList) and the
//! embedding application composites it, forwards input events, and drives
//! the instance-state save/restore cycle.
//!
//! # Quick Start
//!
//! ```
//! use trellis::prelude::*;
//!
//! trellis_core::init_global_registry();
//!
//! let checkbox = TriStateCheckBox::new("Select all");
//! checkbox.state_changed().connect(|state| {
//!     println!("state: {:?}", state);
//! });
//!
//! checkbox.set_state(SelectionState::Multiple);
//! assert!(!checkbox.is_checked());
//!
//! checkbox.set_state(SelectionState::All);
//! assert!(checkbox.is_checked());
//! ```
//!
//! # Crate Layout
//!
//! - [`widget`] — the widget foundation ([`WidgetBase`](widget::WidgetBase),
//!   the [`Widget`](widget::Widget) trait, events, declarative attributes,
//!   instance-state snapshots) and the shipped widgets.
//! - [`prelude`] — one-stop re-exports for applications.
//!
//! Core infrastructure (objects, signals) lives in [`trellis_core`];
//! geometry, icon, and paint types live in [`trellis_render`].

pub mod prelude;
pub mod widget;

// Re-export the sibling crates so hosts depend on `trellis` alone.
pub use trellis_core as core;
pub use trellis_render as render;

pub use widget::widgets::{SelectionState, TriStateCheckBox};
