//! Per-kind slot storage with an intrusive free list.
//!
//! A [`TypeArena`] is an ordered, growable sequence of slots for one object
//! kind. Slot 0 is never an object: it is the free-list sentinel, and its
//! `next_hole` link is the head of a singly linked list threaded through
//! every other hole. A link value of 0 terminates the list.
//!
//! ```text
//!  index:    0          1          2          3          4
//!         ┌───────┐  ┌───────┐  ┌───────┐  ┌───────┐  ┌───────┐
//!  slots  │Hole→3 │  │Obj(a) │  │Hole→0 │  │Hole→2 │  │Obj(b) │
//!         └───────┘  └───────┘  └───────┘  └───────┘  └───────┘
//!  counts     0          2          0          0          0
//!                                                      (pending)
//! ```
//!
//! Counters live in a column parallel to the slot entries. Handle copies
//! and drops only touch the counter column, so they never conflict with an
//! outstanding object guard. Structural changes (`allocate`,
//! `reclaim_unreferenced`) need the entry column exclusively and report
//! [`StoreError::ArenaBorrowed`] instead of panicking when a guard is held.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;

use hollow_core::{RefCount, SlotIndex, StoreConfig, StoreError};

use crate::slot::{RefCounter, Slot};
use crate::stats::ArenaStats;

/// Slot storage for one object kind.
pub struct TypeArena<T> {
    /// Entry column. `slots[0]` is always the sentinel hole.
    slots: RefCell<Vec<Slot<T>>>,
    /// Counter column, same length as `slots`.
    counts: RefCell<Vec<RefCounter>>,
    /// Number of holes on the free list.
    free_len: Cell<u32>,
    /// Upper bound on usable slots.
    max_slots: u32,
    /// Set by allocations and by sweeps that reclaim something.
    changed: Cell<bool>,
}

impl<T> TypeArena<T> {
    /// Create an empty arena with default configuration.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::new())
    }

    /// Create an empty arena honouring `config`.
    ///
    /// The config is assumed to be validated; a `max_slots` of zero simply
    /// makes every growth attempt fail.
    pub fn with_config(config: &StoreConfig) -> Self {
        let reserve = config.initial_slots as usize + 1;
        let mut slots = Vec::with_capacity(reserve);
        slots.push(Slot::hole(SlotIndex::SENTINEL));
        let mut counts = Vec::with_capacity(reserve);
        counts.push(RefCounter::new());
        Self {
            slots: RefCell::new(slots),
            counts: RefCell::new(counts),
            free_len: Cell::new(0),
            max_slots: config.max_slots,
            changed: Cell::new(false),
        }
    }

    /// Name of the object kind, used in errors, logs and statistics.
    pub fn kind(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    /// Usable slot count: arena length minus the sentinel.
    pub fn capacity(&self) -> u32 {
        (self.counts.borrow().len() - 1) as u32
    }

    /// The configured slot limit.
    pub fn max_slots(&self) -> u32 {
        self.max_slots
    }

    /// Number of holes on the free list.
    ///
    /// Walks the list from the sentinel. If an object guard currently holds
    /// the entries mutably, the maintained hole count is returned instead.
    pub fn free_capacity(&self) -> u32 {
        let Ok(slots) = self.slots.try_borrow() else {
            return self.free_len.get();
        };
        let mut count = 0u32;
        let mut cursor = slots[0].next_hole().unwrap_or(SlotIndex::SENTINEL);
        while !cursor.is_sentinel() {
            count += 1;
            cursor = slots
                .get(cursor.as_usize())
                .and_then(Slot::next_hole)
                .unwrap_or(SlotIndex::SENTINEL);
        }
        debug_assert_eq!(count, self.free_len.get(), "free list out of sync");
        count
    }

    /// Store `value`, reusing the free-list head if there is one.
    ///
    /// The returned slot's counter is exactly 1; the caller owns that
    /// reference.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ArenaBorrowed`] if an object guard is outstanding.
    /// - [`StoreError::CapacityExceeded`] if no hole is free and the arena
    ///   already holds `max_slots` slots.
    pub fn allocate(&self, value: T) -> Result<SlotIndex, StoreError> {
        let mut slots = self.slots.try_borrow_mut().map_err(|_| self.borrowed())?;
        let mut counts = self.counts.try_borrow_mut().map_err(|_| self.borrowed())?;

        let head = slots[0].next_hole().unwrap_or(SlotIndex::SENTINEL);
        let reused = !head.is_sentinel();
        let index = if reused {
            let next = slots[head.as_usize()]
                .next_hole()
                .unwrap_or(SlotIndex::SENTINEL);
            slots[0] = Slot::hole(next);
            slots[head.as_usize()] = Slot::Object(value);
            self.free_len.set(self.free_len.get() - 1);
            head
        } else {
            let capacity = slots.len() - 1;
            if capacity >= self.max_slots as usize {
                return Err(StoreError::CapacityExceeded {
                    kind: self.kind(),
                    max_slots: self.max_slots,
                });
            }
            slots.push(Slot::Object(value));
            counts.push(RefCounter::new());
            SlotIndex((slots.len() - 1) as u32)
        };
        counts[index.as_usize()].occupy();
        self.changed.set(true);

        tracing::trace!(kind = self.kind(), index = index.get(), reused, "allocated slot");
        Ok(index)
    }

    /// Shared access to the object at `index`, or `None` for holes,
    /// out-of-range indices, or a mutably borrowed arena.
    pub fn get(&self, index: SlotIndex) -> Option<Ref<'_, T>> {
        self.try_get(index).ok()
    }

    /// Mutable access to the object at `index`, or `None` for holes,
    /// out-of-range indices, or an already borrowed arena.
    pub fn get_mut(&self, index: SlotIndex) -> Option<RefMut<'_, T>> {
        self.try_get_mut(index).ok()
    }

    /// Shared access to the object at `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::VacantSlot`] for holes and out-of-range indices,
    /// [`StoreError::ArenaBorrowed`] while a mutable guard is held.
    pub fn try_get(&self, index: SlotIndex) -> Result<Ref<'_, T>, StoreError> {
        let slots = self.slots.try_borrow().map_err(|_| self.borrowed())?;
        Ref::filter_map(slots, |slots| {
            slots.get(index.as_usize()).and_then(Slot::object)
        })
        .map_err(|_| self.vacant(index))
    }

    /// Mutable access to the object at `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::VacantSlot`] for holes and out-of-range indices,
    /// [`StoreError::ArenaBorrowed`] while any other guard is held.
    pub fn try_get_mut(&self, index: SlotIndex) -> Result<RefMut<'_, T>, StoreError> {
        let slots = self.slots.try_borrow_mut().map_err(|_| self.borrowed())?;
        RefMut::filter_map(slots, |slots| {
            slots.get_mut(index.as_usize()).and_then(Slot::object_mut)
        })
        .map_err(|_| self.vacant(index))
    }

    /// Current counter of the slot at `index`; 0 for the sentinel and for
    /// out-of-range indices.
    pub fn references(&self, index: SlotIndex) -> RefCount {
        self.counts
            .borrow()
            .get(index.as_usize())
            .map_or(0, RefCounter::get)
    }

    /// Register one more reference to the slot at `index`.
    ///
    /// Returns the new count.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`] for the sentinel,
    /// [`StoreError::VacantSlot`] for holes and indices past the end,
    /// [`StoreError::ReferenceOverflow`] if the counter is saturated.
    pub fn retain(&self, index: SlotIndex) -> Result<RefCount, StoreError> {
        let counts = self.counter_column(index)?;
        counts[index.as_usize()]
            .increment()
            .ok_or(StoreError::ReferenceOverflow {
                kind: self.kind(),
                index,
            })
    }

    /// Deregister one reference from the slot at `index`.
    ///
    /// Returns the new count. Reaching zero does not free the slot; only
    /// [`reclaim_unreferenced`](Self::reclaim_unreferenced) does.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyHandle`] for the sentinel,
    /// [`StoreError::VacantSlot`] for holes and indices past the end,
    /// [`StoreError::ReferenceUnderflow`] if the counter is already zero.
    pub fn release(&self, index: SlotIndex) -> Result<RefCount, StoreError> {
        let counts = self.counter_column(index)?;
        counts[index.as_usize()]
            .decrement()
            .ok_or(StoreError::ReferenceUnderflow {
                kind: self.kind(),
                index,
            })
    }

    /// Turn every object slot whose counter is zero into a hole.
    ///
    /// Slots are visited in ascending order and each one is pushed onto the
    /// free list, so the highest reclaimed index becomes the new head.
    /// Reclaimed values are dropped after the arena's borrows are released,
    /// so their destructors may use this arena again.
    ///
    /// Returns the number of reclaimed slots.
    ///
    /// # Errors
    ///
    /// [`StoreError::ArenaBorrowed`] if an object guard is outstanding.
    pub fn reclaim_unreferenced(&self) -> Result<u32, StoreError> {
        let mut reclaimed = Vec::new();
        {
            let mut slots = self.slots.try_borrow_mut().map_err(|_| self.borrowed())?;
            let counts = self.counts.try_borrow().map_err(|_| self.borrowed())?;

            let mut head = slots[0].next_hole().unwrap_or(SlotIndex::SENTINEL);
            for (i, (slot, count)) in slots.iter_mut().zip(counts.iter()).enumerate().skip(1) {
                if slot.is_object() && count.get() == 0 {
                    if let Slot::Object(value) = std::mem::replace(slot, Slot::hole(head)) {
                        reclaimed.push(value);
                    }
                    count.vacate();
                    head = SlotIndex(i as u32);
                }
            }
            slots[0] = Slot::hole(head);
        }

        let count = reclaimed.len() as u32;
        if count > 0 {
            self.free_len.set(self.free_len.get() + count);
            self.changed.set(true);
            tracing::debug!(
                kind = self.kind(),
                reclaimed = count,
                free = self.free_len.get(),
                "reclaimed unreferenced slots"
            );
        }
        drop(reclaimed);
        Ok(count)
    }

    /// Object slots with at least one live reference.
    pub fn live_count(&self) -> u32 {
        self.stats().live
    }

    /// Object slots with no references, awaiting reclamation.
    pub fn pending_count(&self) -> u32 {
        self.stats().pending
    }

    /// Snapshot of this arena's occupancy.
    ///
    /// Computed from the counter column and the maintained hole count, so
    /// it is available even while object guards are held.
    pub fn stats(&self) -> ArenaStats {
        let counts = self.counts.borrow();
        let capacity = (counts.len() - 1) as u32;
        let free = self.free_len.get();
        let mut live = 0u32;
        let mut references = 0u64;
        for count in counts.iter().skip(1) {
            let n = count.get();
            if count.is_occupied() && n > 0 {
                live += 1;
                references += u64::from(n);
            }
        }
        ArenaStats {
            kind: self.kind(),
            capacity,
            free,
            live,
            pending: capacity.saturating_sub(free + live),
            references,
        }
    }

    /// Visit every object slot with a non-zero counter, in ascending order.
    ///
    /// # Errors
    ///
    /// [`StoreError::ArenaBorrowed`] while a mutable guard is held.
    pub fn for_each_live<F>(&self, mut f: F) -> Result<(), StoreError>
    where
        F: FnMut(SlotIndex, &T),
    {
        let slots = self.slots.try_borrow().map_err(|_| self.borrowed())?;
        let counts = self.counts.borrow();
        for (i, (slot, count)) in slots.iter().zip(counts.iter()).enumerate().skip(1) {
            if count.get() == 0 {
                continue;
            }
            if let Some(value) = slot.object() {
                f(SlotIndex(i as u32), value);
            }
        }
        Ok(())
    }

    /// Whether anything was allocated or reclaimed since the last
    /// [`clear_changed`](Self::clear_changed).
    pub fn has_changed(&self) -> bool {
        self.changed.get()
    }

    /// Reset the change flag.
    pub fn clear_changed(&self) {
        self.changed.set(false);
    }

    fn counter_column(&self, index: SlotIndex) -> Result<Ref<'_, Vec<RefCounter>>, StoreError> {
        if index.is_sentinel() {
            return Err(StoreError::EmptyHandle);
        }
        let counts = self.counts.try_borrow().map_err(|_| self.borrowed())?;
        if !counts.get(index.as_usize()).is_some_and(RefCounter::is_occupied) {
            return Err(self.vacant(index));
        }
        Ok(counts)
    }

    fn borrowed(&self) -> StoreError {
        StoreError::ArenaBorrowed { kind: self.kind() }
    }

    fn vacant(&self, index: SlotIndex) -> StoreError {
        StoreError::VacantSlot {
            kind: self.kind(),
            index,
        }
    }
}

impl<T> Default for TypeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypeArena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeArena")
            .field("kind", &self.kind())
            .field("capacity", &self.capacity())
            .field("free", &self.free_len.get())
            .field("max_slots", &self.max_slots)
            .finish()
    }
}
