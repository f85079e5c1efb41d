//! Typed slot arenas with reference-counted handles.
//!
//! Objects of a fixed set of kinds are stored densely, one arena per kind,
//! and addressed through [`Handle`]s instead of references. Handles count
//! themselves in their slot; a periodic [`sweep`](ObjectStore::sweep)
//! turns every unreferenced slot into a hole that later creations reuse.
//!
//! # Architecture
//!
//! ```text
//! Store (declared with object_store!)
//! ├── TypeArena<A>
//! │   ├── slots:  [Hole(sentinel) | Object(A) | Hole | ...]
//! │   └── counts: [0              | n         | 0    | ...]
//! ├── TypeArena<B>
//! └── ...
//!
//! Handle<'s, T, Store> ──(index, &'s Store)──► TypeArena<T> slot
//! ```
//!
//! # Slot lifecycle
//!
//! ```text
//! Hole ──create──► Object(refs=1) ⇄ Object(refs=n) ──last drop──►
//!      Object(refs=0, pending) ──sweep──► Hole
//! ```
//!
//! A slot only becomes a hole during a sweep, and only while its counter
//! is zero. Arenas never shrink and never move objects.
//!
//! # Borrowing
//!
//! Stores are single-owner and not `Sync`. Object access goes through
//! `Ref`/`RefMut` guards; while a guard is held, structural operations on
//! that kind's arena (`create`, `sweep`) report
//! [`StoreError::ArenaBorrowed`] rather than panicking. Cloning and
//! dropping handles is always allowed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod handle;
mod macros;
pub mod slot;
pub mod stats;
pub mod store;

// Public re-exports for the primary API surface.
pub use arena::TypeArena;
pub use handle::Handle;
pub use hollow_core::{ConfigError, RefCount, SlotIndex, StoreConfig, StoreError};
pub use stats::{ArenaStats, StoreStats, SweepReport};
pub use store::{Holds, ObjectStore};
