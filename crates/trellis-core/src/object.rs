//! Object identity and ownership tracking.
//!
//! Every widget and long-lived helper in Trellis is an *object*: it has a
//! stable [`ObjectId`], an entry in the process-wide registry, and an
//! optional position in a parent/child tree. The registry is what lets a
//! host look up a control by name, and what tears down a subtree when its
//! root is destroyed.
//!
//! Types participate by embedding an [`ObjectBase`] and implementing the
//! [`Object`] trait:
//!
//! ```
//! use trellis_core::{Object, ObjectBase, ObjectId, init_global_registry};
//!
//! // Initialize the registry before creating objects
//! init_global_registry();
//!
//! struct Knob {
//!     base: ObjectBase,
//!     value: f32,
//! }
//!
//! impl Knob {
//!     fn new() -> Self {
//!         Self {
//!             base: ObjectBase::new::<Self>(),
//!             value: 0.0,
//!         }
//!     }
//! }
//!
//! impl Object for Knob {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! let knob = Knob::new();
//! knob.base.set_name("volume");
//! assert_eq!(knob.base.name(), "volume");
//! ```
//!
//! Registration is automatic on construction and reversed on drop.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{Key, KeyData, SlotMap};

slotmap::new_key_type! {
    /// Unique identifier for a registered object.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the id to its raw `u64` form, e.g. for logging.
    pub fn as_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Reconstruct an id from its raw form.
    ///
    /// Only values previously produced by [`as_raw`](Self::as_raw) are
    /// meaningful; anything else will simply fail registry lookups.
    pub fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

/// Errors reported by the object registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object is not present in the registry.
    NotFound(ObjectId),
    /// Reparenting would create a cycle.
    CircularParenting,
    /// The global registry has not been initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectError::NotFound(id) => write!(f, "object {:?} not found in registry", id),
            ObjectError::CircularParenting => {
                write!(f, "reparenting would create a cycle in the object tree")
            }
            ObjectError::RegistryNotInitialized => {
                write!(f, "object registry not initialized (call init_global_registry)")
            }
        }
    }
}

impl std::error::Error for ObjectError {}

/// A specialized Result type for registry operations.
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Per-object bookkeeping held by the registry.
#[derive(Debug)]
struct ObjectData {
    /// The Rust type name, for diagnostics.
    type_name: &'static str,
    /// Optional user-assigned name.
    name: String,
    /// Parent in the object tree, if any.
    parent: Option<ObjectId>,
    /// Children in creation order.
    children: Vec<ObjectId>,
}

/// The object registry: id allocation, names, and the ownership tree.
///
/// Most callers use the process-wide instance via [`global_registry`];
/// a standalone registry is mainly useful in tests.
#[derive(Debug, Default)]
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object of type `T`, returning its id.
    pub fn register<T: Any>(&mut self) -> ObjectId {
        let id = self.objects.insert(ObjectData {
            type_name: std::any::type_name::<T>(),
            name: String::new(),
            parent: None,
            children: Vec::new(),
        });
        tracing::trace!(
            target: "trellis_core::object",
            id = id.as_raw(),
            type_name = self.objects[id].type_name,
            "registered object"
        );
        id
    }

    /// Destroy an object and its entire subtree.
    ///
    /// The object is detached from its parent; it and all descendants are
    /// removed from the registry.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::NotFound(id));
        }

        // Detach from the parent before tearing down the subtree.
        if let Some(parent) = self.objects[id].parent
            && let Some(parent_data) = self.objects.get_mut(parent)
        {
            parent_data.children.retain(|&child| child != id);
        }

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(data) = self.objects.remove(current) {
                pending.extend(data.children);
            }
        }

        tracing::trace!(target: "trellis_core::object", id = id.as_raw(), "destroyed object");
        Ok(())
    }

    /// Whether the registry contains the given object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The registered type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|data| data.type_name)
            .ok_or(ObjectError::NotFound(id))
    }

    /// The user-assigned name of an object (empty if never set).
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.objects
            .get(id)
            .map(|data| data.name.clone())
            .ok_or(ObjectError::NotFound(id))
    }

    /// Assign a name to an object.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::NotFound(id))?;
        data.name = name;
        Ok(())
    }

    /// The parent of an object, if any.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|data| data.parent)
            .ok_or(ObjectError::NotFound(id))
    }

    /// The children of an object, in creation order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.objects
            .get(id)
            .map(|data| data.children.clone())
            .ok_or(ObjectError::NotFound(id))
    }

    /// Reparent an object.
    ///
    /// Passing `None` detaches it. Fails with
    /// [`ObjectError::CircularParenting`] if the new parent is the object
    /// itself or one of its descendants.
    pub fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::NotFound(id));
        }

        if let Some(new_parent) = parent {
            if !self.objects.contains_key(new_parent) {
                return Err(ObjectError::NotFound(new_parent));
            }

            // Walk up from the new parent; finding `id` means a cycle.
            let mut current = Some(new_parent);
            while let Some(ancestor) = current {
                if ancestor == id {
                    return Err(ObjectError::CircularParenting);
                }
                current = self.objects[ancestor].parent;
            }
        }

        let old_parent = self.objects[id].parent;
        if let Some(old) = old_parent
            && let Some(old_data) = self.objects.get_mut(old)
        {
            old_data.children.retain(|&child| child != id);
        }

        self.objects[id].parent = parent;
        if let Some(new_parent) = parent {
            self.objects[new_parent].children.push(id);
        }

        Ok(())
    }

    /// Find a direct child by its user-assigned name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        let data = self.objects.get(id).ok_or(ObjectError::NotFound(id))?;
        Ok(data
            .children
            .iter()
            .copied()
            .find(|&child| self.objects.get(child).is_some_and(|c| c.name == name)))
    }

    /// All objects without a parent, in registry order.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
///
/// All methods take `&self`; mutation goes through an internal `RwLock`.
#[derive(Debug, Default)]
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// See [`ObjectRegistry::register`].
    pub fn register<T: Any>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// See [`ObjectRegistry::destroy`].
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    /// See [`ObjectRegistry::contains`].
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// See [`ObjectRegistry::len`].
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// See [`ObjectRegistry::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// See [`ObjectRegistry::type_name`].
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// See [`ObjectRegistry::object_name`].
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id)
    }

    /// See [`ObjectRegistry::set_object_name`].
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// See [`ObjectRegistry::parent`].
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// See [`ObjectRegistry::children`].
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id)
    }

    /// See [`ObjectRegistry::set_parent`].
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// See [`ObjectRegistry::find_child_by_name`].
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().find_child_by_name(id, name)
    }

    /// See [`ObjectRegistry::root_objects`].
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Initialize the global object registry.
///
/// Idempotent; hosts call this once at startup, before constructing any
/// widget.
pub fn init_global_registry() {
    let _ = GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new);
}

/// Get a reference to the global object registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    GLOBAL_REGISTRY
        .get()
        .ok_or(ObjectError::RegistryNotInitialized)
}

/// The base trait that all objects must implement.
///
/// Types implementing this trait participate in the object tree and can be
/// looked up in the registry. Widgets build on it via their embedded
/// [`ObjectBase`].
///
/// # Related Types
///
/// - [`ObjectBase`] - Helper for implementing this trait
/// - [`ObjectId`] - Returned by [`object_id()`](Self::object_id)
/// - [`object_cast`] - Safe downcasting function
pub trait Object: Any + Send + Sync {
    /// The unique id of this object.
    fn object_id(&self) -> ObjectId;

    /// The Rust type name, for diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Embeddable helper that ties a struct to the global registry.
///
/// Construction registers the object; dropping the base unregisters it
/// (destroying any children along with it).
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Create a new ObjectBase, registering the object in the global registry.
    ///
    /// The registry must be initialized first via [`init_global_registry`].
    ///
    /// # Panics
    ///
    /// Panics if the global registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        let registry = global_registry().expect("Object registry not initialized");
        let id = registry.register::<T>();
        Self { id }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's name from the registry.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .unwrap_or_default()
    }

    /// Set the object's name in the registry.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name.into());
        }
    }

    /// Get the parent object ID.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Set the parent object.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// Get child object IDs.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.find_child_by_name(self.id, name))
            .ok()
            .flatten()
    }
}

impl fmt::Debug for ObjectBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBase").field("id", &self.id).finish()
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        // Automatically unregister from the global registry when dropped.
        if let Ok(registry) = global_registry() {
            let _ = registry.destroy(self.id);
        }
    }
}

/// Safe downcast function for [`Object`] trait objects.
///
/// Returns `Some(&T)` if the object is of type `T`, otherwise `None`.
///
/// # Related
///
/// - [`object_cast_mut`] - Mutable version
/// - [`Object`] - The trait being downcast
pub fn object_cast<T: Object + 'static>(obj: &dyn Object) -> Option<&T> {
    (obj as &dyn Any).downcast_ref::<T>()
}

/// Safe mutable downcast function for [`Object`] trait objects.
///
/// # Related
///
/// - [`object_cast`] - Immutable version
pub fn object_cast_mut<T: Object + 'static>(obj: &mut dyn Object) -> Option<&mut T> {
    (obj as &mut dyn Any).downcast_mut::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestObject {
        base: ObjectBase,
    }

    impl TestObject {
        fn new() -> Self {
            Self {
                base: ObjectBase::new::<Self>(),
            }
        }

        fn named(name: &str) -> Self {
            let obj = Self::new();
            obj.base.set_name(name);
            obj
        }
    }

    impl Object for TestObject {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_object_creation_registers() {
        setup();
        let obj = TestObject::new();
        let registry = global_registry().unwrap();
        assert!(registry.contains(obj.object_id()));
        assert!(registry.type_name(obj.object_id()).unwrap().contains("TestObject"));
    }

    #[test]
    fn test_object_name() {
        setup();
        let obj = TestObject::named("lonely");
        assert_eq!(obj.base.name(), "lonely");
    }

    #[test]
    fn test_drop_unregisters() {
        setup();
        let id = {
            let obj = TestObject::new();
            obj.object_id()
        };
        assert!(!global_registry().unwrap().contains(id));
    }

    #[test]
    fn test_parent_child_links() {
        setup();
        let parent = TestObject::new();
        let child = TestObject::named("child");

        child.base.set_parent(Some(parent.object_id())).unwrap();
        assert_eq!(child.base.parent(), Some(parent.object_id()));
        assert_eq!(parent.base.children(), vec![child.object_id()]);
        assert_eq!(
            parent.base.find_child_by_name("child"),
            Some(child.object_id())
        );
        assert_eq!(parent.base.find_child_by_name("missing"), None);
    }

    #[test]
    fn test_reparent_detaches_from_old_parent() {
        setup();
        let first = TestObject::new();
        let second = TestObject::new();
        let child = TestObject::new();

        child.base.set_parent(Some(first.object_id())).unwrap();
        child.base.set_parent(Some(second.object_id())).unwrap();

        assert!(first.base.children().is_empty());
        assert_eq!(second.base.children(), vec![child.object_id()]);
    }

    #[test]
    fn test_circular_parenting_rejected() {
        setup();
        let a = TestObject::new();
        let b = TestObject::new();

        b.base.set_parent(Some(a.object_id())).unwrap();
        let result = a.base.set_parent(Some(b.object_id()));
        assert_eq!(result, Err(ObjectError::CircularParenting));

        // Self-parenting is the degenerate cycle
        let result = a.base.set_parent(Some(a.object_id()));
        assert_eq!(result, Err(ObjectError::CircularParenting));
    }

    #[test]
    fn test_destroy_cascades_to_children() {
        setup();
        let registry = global_registry().unwrap();

        let parent_id = registry.register::<TestObject>();
        let child_id = registry.register::<TestObject>();
        let grandchild_id = registry.register::<TestObject>();
        registry.set_parent(child_id, Some(parent_id)).unwrap();
        registry.set_parent(grandchild_id, Some(child_id)).unwrap();

        registry.destroy(parent_id).unwrap();
        assert!(!registry.contains(parent_id));
        assert!(!registry.contains(child_id));
        assert!(!registry.contains(grandchild_id));
    }

    #[test]
    fn test_destroy_missing_object_errors() {
        setup();
        let registry = global_registry().unwrap();
        let id = {
            let obj = TestObject::new();
            obj.object_id()
        };
        assert_eq!(registry.destroy(id), Err(ObjectError::NotFound(id)));
    }

    #[test]
    fn test_object_id_raw_roundtrip() {
        setup();
        let obj = TestObject::new();
        let raw = obj.object_id().as_raw();
        assert_eq!(ObjectId::from_raw(raw), obj.object_id());
    }

    #[test]
    fn test_object_cast() {
        setup();
        let obj = TestObject::new();
        let as_dyn: &dyn Object = &obj;
        assert!(object_cast::<TestObject>(as_dyn).is_some());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ObjectError::RegistryNotInitialized.to_string(),
            "object registry not initialized (call init_global_registry)"
        );
        assert!(
            ObjectError::CircularParenting
                .to_string()
                .contains("cycle")
        );
    }
}
