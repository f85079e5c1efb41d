//! Core types for the Hollow object arena.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: slot indices,
//! reference-count width, store configuration, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod id;

pub use config::StoreConfig;
pub use error::{ConfigError, StoreError};
pub use id::{RefCount, SlotIndex};
