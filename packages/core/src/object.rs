//! Opaque shared objects carried under the `Object` kind.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A shared, atomically reference-counted handle to a value the message
/// knows nothing about.
///
/// Cloning the handle acquires a reference and dropping it releases one. The
/// message never copies or inspects the referenced value, so a duplicated
/// message sees the same object as the original. Use interior mutability
/// (`Mutex`, atomics) in the referenced type if holders need to mutate it.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Any + Send + Sync>);

impl ObjectRef {
    /// Wrap a value in a new shared handle.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        ObjectRef(Arc::new(value))
    }

    /// Share an existing `Arc`.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        ObjectRef(value)
    }

    /// Borrow the referenced value if it is a `T`.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Acquire a typed reference if the value is a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.0).downcast::<T>().ok()
    }

    /// True if both handles refer to the same object.
    pub fn ptr_eq(a: &ObjectRef, b: &ObjectRef) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&a.0), Arc::as_ptr(&b.0))
    }

    /// Number of live handles to the object.
    pub fn strong_count(this: &ObjectRef) -> usize {
        Arc::strong_count(&this.0)
    }

    /// Address of the referenced object, for diagnostics.
    pub fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        ObjectRef::ptr_eq(self, other)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectRef({:#x})", self.addr())
    }
}
