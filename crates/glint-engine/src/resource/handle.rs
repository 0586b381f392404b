use std::fmt;

use crate::device::{NO_ID, RawId};

/// Releases one kind of driver object.
///
/// Implementations are assumed not to fail.
pub trait ResourceDeleter {
    fn destroy(&self, id: RawId);
}

/// Exclusive owner of one raw object id.
///
/// A non-empty id is handed to the deleter exactly once: on `reset`, or on
/// drop. `release` gives the id up without destroying it. The type is not
/// `Clone`; ownership moves with the value.
pub struct ScopedResource<D: ResourceDeleter> {
    id: RawId,
    deleter: D,
}

impl<D: ResourceDeleter> ScopedResource<D> {
    /// Takes ownership of `id`.
    pub fn new(id: RawId, deleter: D) -> Self {
        Self { id, deleter }
    }

    /// Creates a handle that owns nothing yet.
    pub fn empty(deleter: D) -> Self {
        Self::new(NO_ID, deleter)
    }

    /// Raw id; ownership stays with the handle.
    #[inline]
    pub fn id(&self) -> RawId {
        self.id
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id == NO_ID
    }

    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Gives up ownership and returns the raw id. The deleter is not called.
    #[must_use = "the released id is no longer destroyed automatically"]
    pub fn release(&mut self) -> RawId {
        std::mem::replace(&mut self.id, NO_ID)
    }

    /// Destroys the held id (if any) and stores `new_id` in its place.
    pub fn reset(&mut self, new_id: RawId) {
        let old = std::mem::replace(&mut self.id, new_id);
        if old != NO_ID {
            self.deleter.destroy(old);
        }
    }
}

impl<D: ResourceDeleter + Clone> ScopedResource<D> {
    /// Moves ownership into a new handle, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        Self::new(self.release(), self.deleter.clone())
    }
}

impl<D: ResourceDeleter> Drop for ScopedResource<D> {
    fn drop(&mut self) {
        self.reset(NO_ID);
    }
}

impl<D: ResourceDeleter> fmt::Debug for ScopedResource<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ScopedResource").field(&self.id).finish()
    }
}
