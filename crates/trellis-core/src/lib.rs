//! Core systems for Trellis.
//!
//! This crate provides the foundational components of the Trellis UI toolkit:
//!
//! - **Object Model**: Parent-child ownership, naming, registry lookup
//! - **Signal/Slot System**: Type-safe inter-object communication with a
//!   connection-order delivery guarantee
//! - **Logging**: Tracing targets and object tree visualization
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Model Example
//!
//! ```
//! use trellis_core::{Object, ObjectBase, ObjectId, init_global_registry};
//!
//! init_global_registry();
//!
//! struct Panel {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Panel {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! let panel = Panel { base: ObjectBase::new::<Panel>() };
//! panel.base.set_name("sidebar");
//! assert_eq!(panel.base.name(), "sidebar");
//! ```

pub mod logging;
pub mod object;
pub mod signal;

pub use logging::{ObjectTreeDebug, TreeFormatOptions, TreeStyle};
pub use object::{
    Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult, SharedObjectRegistry,
    global_registry, init_global_registry, object_cast, object_cast_mut,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
