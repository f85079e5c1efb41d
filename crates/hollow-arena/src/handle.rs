//! Reference-counted object handles.
//!
//! A [`Handle`] names one slot in one arena of one store and owns a share
//! of that slot's liveness. Its lifecycle is mirrored in the slot counter:
//!
//! | Event | Counter |
//! |-------|---------|
//! | `ObjectStore::create` | set to 1, adopted by the new handle |
//! | `clone` | +1 |
//! | `drop` | −1 |
//! | move, [`Handle::take`] | unchanged |
//!
//! The empty handle (index 0) has no store, never dereferences and never
//! touches a counter. Handles borrow their store, so no handle can outlive
//! the storage it points into.

use std::cell::{Ref, RefMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use hollow_core::{RefCount, SlotIndex, StoreError};

use crate::store::Holds;

/// Counted reference to an object of kind `T` stored in `S`.
///
/// Equality, ordering and hashing compare the slot index only.
#[must_use]
pub struct Handle<'s, T, S: Holds<T>> {
    index: SlotIndex,
    store: Option<&'s S>,
    _kind: PhantomData<fn() -> T>,
}

impl<'s, T, S: Holds<T>> Handle<'s, T, S> {
    /// Wrap a freshly allocated index whose counter is already 1.
    pub(crate) fn adopt(index: SlotIndex, store: &'s S) -> Self {
        debug_assert!(!index.is_sentinel());
        Self {
            index,
            store: Some(store),
            _kind: PhantomData,
        }
    }

    /// The empty handle.
    pub fn empty() -> Self {
        Self {
            index: SlotIndex::SENTINEL,
            store: None,
            _kind: PhantomData,
        }
    }

    /// Whether this is the empty handle.
    pub fn is_empty(&self) -> bool {
        self.index.is_sentinel()
    }

    /// Slot index within the kind's arena; the sentinel for empty handles.
    pub fn index(&self) -> SlotIndex {
        self.index
    }

    /// The store that issued this handle.
    pub fn store(&self) -> Option<&'s S> {
        self.store
    }

    /// Live references to the target slot, this handle included.
    /// Always 0 for the empty handle.
    pub fn num_references(&self) -> RefCount {
        match self.store {
            Some(store) => store.arena().references(self.index),
            None => 0,
        }
    }

    /// Shared access to the target object.
    ///
    /// `None` for the empty handle, or while the arena is mutably borrowed.
    pub fn get(&self) -> Option<Ref<'s, T>> {
        self.try_get().ok()
    }

    /// Mutable access to the target object.
    ///
    /// `None` for the empty handle, or while the arena is borrowed.
    pub fn get_mut(&self) -> Option<RefMut<'s, T>> {
        self.try_get_mut().ok()
    }

    /// Shared access to the target object.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`] for the empty handle, otherwise the
    /// arena's [`try_get`](crate::TypeArena::try_get) errors.
    pub fn try_get(&self) -> Result<Ref<'s, T>, StoreError> {
        let store = self.store.ok_or(StoreError::EmptyHandle)?;
        store.arena().try_get(self.index)
    }

    /// Mutable access to the target object.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`] for the empty handle, otherwise the
    /// arena's [`try_get_mut`](crate::TypeArena::try_get_mut) errors.
    pub fn try_get_mut(&self) -> Result<RefMut<'s, T>, StoreError> {
        let store = self.store.ok_or(StoreError::EmptyHandle)?;
        store.arena().try_get_mut(self.index)
    }

    /// Move the reference out, leaving this handle empty.
    pub fn take(&mut self) -> Self {
        std::mem::replace(self, Self::empty())
    }

    /// Duplicate the handle, registering one more reference.
    ///
    /// Cloning the empty handle yields the empty handle.
    ///
    /// # Errors
    ///
    /// [`StoreError::ReferenceOverflow`] if the slot counter is saturated.
    pub fn try_clone(&self) -> Result<Self, StoreError> {
        let Some(store) = self.store else {
            return Ok(Self::empty());
        };
        store.arena().retain(self.index)?;
        Ok(Self::adopt(self.index, store))
    }

    /// Give up this handle's reference and become empty.
    fn release(&mut self) {
        let index = std::mem::replace(&mut self.index, SlotIndex::SENTINEL);
        if let Some(store) = self.store.take() {
            if let Err(err) = store.arena().release(index) {
                tracing::warn!(%err, "handle released an unaccounted reference");
            }
        }
    }
}

impl<T, S: Holds<T>> Clone for Handle<'_, T, S> {
    /// # Panics
    ///
    /// Panics if the slot counter would overflow; use
    /// [`try_clone`](Handle::try_clone) to handle that case.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(handle) => handle,
            Err(err) => panic!("cannot clone handle: {err}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.release();
        *self = source.clone();
    }
}

impl<T, S: Holds<T>> Drop for Handle<'_, T, S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<T, S: Holds<T>> Default for Handle<'_, T, S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, S: Holds<T>> PartialEq for Handle<'_, T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T, S: Holds<T>> Eq for Handle<'_, T, S> {}

impl<T, S: Holds<T>> PartialOrd for Handle<'_, T, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, S: Holds<T>> Ord for Handle<'_, T, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T, S: Holds<T>> Hash for Handle<'_, T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T, S: Holds<T>> fmt::Debug for Handle<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &std::any::type_name::<T>())
            .field("index", &self.index)
            .finish()
    }
}

impl<T, S: Holds<T>> fmt::Display for Handle<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", std::any::type_name::<T>(), self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObjectStore;

    crate::object_store! {
        struct Pair {
            words: String,
            numbers: u32,
        }
    }

    #[test]
    fn empty_handle_is_inert() {
        let empty: Handle<'_, u32, Pair> = Handle::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.index(), SlotIndex::SENTINEL);
        assert_eq!(empty.num_references(), 0);
        assert!(empty.get().is_none());
        assert_eq!(empty.try_get().err(), Some(StoreError::EmptyHandle));

        let copy = empty.clone();
        assert!(copy.is_empty());
        assert_eq!(Handle::<u32, Pair>::default(), empty);
    }

    #[test]
    fn clone_and_drop_adjust_counter() {
        let store = Pair::new();
        let first = store.create(7u32).unwrap();
        assert_eq!(first.num_references(), 1);

        let second = first.clone();
        assert_eq!(first.num_references(), 2);
        assert_eq!(second.num_references(), 2);

        drop(second);
        assert_eq!(first.num_references(), 1);
    }

    #[test]
    fn move_keeps_counter() {
        let store = Pair::new();
        let original = store.create(1u32).unwrap();
        let moved = original;
        assert_eq!(moved.num_references(), 1);

        let mut holder = vec![moved];
        let back = holder.pop().unwrap();
        assert_eq!(back.num_references(), 1);
    }

    #[test]
    fn take_leaves_source_empty() {
        let store = Pair::new();
        let mut source = store.create(String::from("x")).unwrap();
        let target = source.take();
        assert!(source.is_empty());
        assert_eq!(target.num_references(), 1);
        drop(source);
        assert_eq!(target.num_references(), 1);
    }

    #[test]
    fn clone_from_rebinds() {
        let store = Pair::new();
        let a = store.create(1u32).unwrap();
        let b = store.create(2u32).unwrap();
        let mut c = a.clone();
        assert_eq!(a.num_references(), 2);

        c.clone_from(&b);
        assert_eq!(a.num_references(), 1);
        assert_eq!(b.num_references(), 2);
        assert_eq!(*c.get().unwrap(), 2);
    }

    #[test]
    fn assignment_releases_previous_target() {
        let store = Pair::new();
        let a = store.create(1u32).unwrap();
        let b = store.create(2u32).unwrap();
        let mut slot = a.clone();
        assert_eq!(slot.num_references(), 2);
        slot = b.clone();
        assert_eq!(a.num_references(), 1);
        assert_eq!(b.num_references(), 2);
        drop(slot);
    }

    #[test]
    fn get_mut_writes_through_every_copy() {
        let store = Pair::new();
        let handle = store.create(String::from("abc")).unwrap();
        let alias = handle.clone();
        handle.get_mut().unwrap().push('d');
        assert_eq!(&*alias.get().unwrap(), "abcd");
    }

    #[test]
    fn comparisons_use_index_only() {
        let store = Pair::new();
        let a = store.create(10u32).unwrap();
        let b = store.create(5u32).unwrap();
        assert!(a < b);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);

        let mut set = std::collections::HashSet::new();
        set.insert(a.clone());
        set.insert(a.clone());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_and_debug_name_the_kind() {
        let store = Pair::new();
        let h = store.create(3u32).unwrap();
        assert_eq!(h.to_string(), "u32#1");
        assert!(format!("{h:?}").contains("u32"));
    }
}
