//! The object store abstraction.
//!
//! A store owns one [`TypeArena`] per registered kind. [`Holds<T>`] is the
//! type-indexed lookup from a kind to its arena; [`ObjectStore`] provides
//! the kind-generic operations on top of it plus the whole-store sweep.
//! Concrete stores are declared with [`object_store!`](crate::object_store).

use std::cell::{Ref, RefMut};

use hollow_core::{RefCount, StoreError};

use crate::arena::TypeArena;
use crate::handle::Handle;
use crate::stats::{StoreStats, SweepReport};

/// A store that registers the object kind `T`.
pub trait Holds<T>: ObjectStore {
    /// The arena storing every `T` of this store.
    fn arena(&self) -> &TypeArena<T>;
}

/// Operations on a store of typed arenas.
///
/// The required methods act on every registered arena and are generated
/// by [`object_store!`](crate::object_store). The provided methods are
/// generic over one registered kind.
pub trait ObjectStore: Sized {
    /// Reclaim every unreferenced object slot in every arena.
    ///
    /// Arenas are swept in registration order. This is the only operation
    /// that turns objects back into holes; dropping the last handle does not.
    ///
    /// # Errors
    ///
    /// [`StoreError::ArenaBorrowed`] from the first arena that has an
    /// outstanding object guard. Arenas before it stay swept.
    fn sweep(&self) -> Result<SweepReport, StoreError>;

    /// Occupancy of every arena, in registration order.
    fn stats(&self) -> StoreStats;

    /// Whether any arena allocated or reclaimed since the last
    /// [`clear_changed`](Self::clear_changed).
    fn has_changed(&self) -> bool;

    /// Reset every arena's change flag.
    fn clear_changed(&self);

    /// Store `value` and return the first handle to it.
    ///
    /// # Errors
    ///
    /// See [`TypeArena::allocate`].
    fn create<T>(&self, value: T) -> Result<Handle<'_, T, Self>, StoreError>
    where
        Self: Holds<T>,
    {
        let index = <Self as Holds<T>>::arena(self).allocate(value)?;
        Ok(Handle::adopt(index, self))
    }

    /// The arena for kind `T`.
    fn arena_for<T>(&self) -> &TypeArena<T>
    where
        Self: Holds<T>,
    {
        <Self as Holds<T>>::arena(self)
    }

    /// Shared access to the object behind `handle`.
    ///
    /// `None` for the empty handle, a handle from another store, or while
    /// the arena is mutably borrowed.
    fn get<'s, T>(&'s self, handle: &Handle<'s, T, Self>) -> Option<Ref<'s, T>>
    where
        Self: Holds<T>,
    {
        self.try_get(handle).ok()
    }

    /// Shared access to the object behind `handle`.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`], [`StoreError::ForeignHandle`], or the
    /// arena's [`try_get`](TypeArena::try_get) errors.
    fn try_get<'s, T>(&'s self, handle: &Handle<'s, T, Self>) -> Result<Ref<'s, T>, StoreError>
    where
        Self: Holds<T>,
    {
        self.check_owner(handle)?;
        <Self as Holds<T>>::arena(self).try_get(handle.index())
    }

    /// Mutable access to the object behind `handle`.
    ///
    /// `None` for the empty handle, a handle from another store, or while
    /// the arena is borrowed.
    fn get_mut<'s, T>(&'s self, handle: &Handle<'s, T, Self>) -> Option<RefMut<'s, T>>
    where
        Self: Holds<T>,
    {
        self.check_owner(handle).ok()?;
        <Self as Holds<T>>::arena(self).get_mut(handle.index())
    }

    /// Usable slots for kind `T`.
    fn capacity<T>(&self) -> u32
    where
        Self: Holds<T>,
    {
        <Self as Holds<T>>::arena(self).capacity()
    }

    /// Holes on the free list for kind `T`.
    fn free_capacity<T>(&self) -> u32
    where
        Self: Holds<T>,
    {
        <Self as Holds<T>>::arena(self).free_capacity()
    }

    /// Live references to the slot behind `handle`; 0 for the empty handle
    /// and for handles from another store.
    fn num_references<T>(&self, handle: &Handle<'_, T, Self>) -> RefCount
    where
        Self: Holds<T>,
    {
        match self.check_owner(handle) {
            Ok(()) => <Self as Holds<T>>::arena(self).references(handle.index()),
            Err(_) => 0,
        }
    }

    /// Register one extra reference on the slot behind `handle`.
    ///
    /// The extra reference is not owned by any handle: it pins the object
    /// until a matching [`deregister_reference`](Self::deregister_reference).
    /// Returns the new count.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`], [`StoreError::ForeignHandle`], or
    /// [`StoreError::ReferenceOverflow`].
    fn register_reference<T>(&self, handle: &Handle<'_, T, Self>) -> Result<RefCount, StoreError>
    where
        Self: Holds<T>,
    {
        self.check_owner(handle)?;
        <Self as Holds<T>>::arena(self).retain(handle.index())
    }

    /// Remove one reference from the slot behind `handle`.
    ///
    /// Returns the new count.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`], [`StoreError::ForeignHandle`], or
    /// [`StoreError::ReferenceUnderflow`].
    fn deregister_reference<T>(
        &self,
        handle: &Handle<'_, T, Self>,
    ) -> Result<RefCount, StoreError>
    where
        Self: Holds<T>,
    {
        self.check_owner(handle)?;
        <Self as Holds<T>>::arena(self).release(handle.index())
    }

    /// Ensure `handle` is non-empty and was issued by this store.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`] or [`StoreError::ForeignHandle`].
    fn check_owner<T>(&self, handle: &Handle<'_, T, Self>) -> Result<(), StoreError>
    where
        Self: Holds<T>,
    {
        match handle.store() {
            None => Err(StoreError::EmptyHandle),
            Some(owner) if std::ptr::eq(owner, self) => Ok(()),
            Some(_) => Err(StoreError::ForeignHandle {
                kind: <Self as Holds<T>>::arena(self).kind(),
                index: handle.index(),
            }),
        }
    }
}

/// Emit the summary event for a completed store sweep.
#[doc(hidden)]
pub fn log_sweep(store: &'static str, report: &SweepReport) {
    tracing::debug!(store, reclaimed = report.total(), "sweep complete");
}
