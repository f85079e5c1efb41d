//! Hollow: a typed object arena with reference-counted handles.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Hollow sub-crates. For most users, adding `hollow` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use hollow::prelude::*;
//!
//! #[derive(Debug)]
//! struct Particle { x: f32, y: f32 }
//!
//! hollow::object_store! {
//!     /// Storage for the demo.
//!     pub struct World {
//!         particles: Particle,
//!         labels: String,
//!     }
//! }
//!
//! let world = World::new();
//! let p = world.create(Particle { x: 1.0, y: 2.0 }).unwrap();
//! let alias = p.clone();
//! assert_eq!(p.num_references(), 2);
//!
//! alias.get_mut().unwrap().x = 5.0;
//! assert_eq!(p.get().unwrap().x, 5.0);
//!
//! drop(alias);
//! drop(p);
//! // Dropping the last handle leaves the object pending until a sweep.
//! assert_eq!(world.capacity::<Particle>(), 1);
//! assert_eq!(world.free_capacity::<Particle>(), 0);
//!
//! let report = world.sweep().unwrap();
//! assert_eq!(report.total(), 1);
//! assert_eq!(world.free_capacity::<Particle>(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `hollow-arena` | Type arenas, handles, the store traits, statistics |
//! | [`types`] | `hollow-core` | Slot indices, configuration, error types |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Type arenas, handles and the store traits (`hollow-arena`).
pub use hollow_arena as arena;

/// Slot indices, configuration and error types (`hollow-core`).
pub use hollow_core as types;

pub use hollow_arena::object_store;

/// Common imports for working with a store.
///
/// ```rust
/// use hollow::prelude::*;
/// ```
pub mod prelude {
    pub use hollow_arena::{
        ArenaStats, Handle, Holds, ObjectStore, StoreStats, SweepReport, TypeArena,
    };
    pub use hollow_core::{ConfigError, RefCount, SlotIndex, StoreConfig, StoreError};
}
