//! Test utilities and fixture object kinds for Hollow development.
//!
//! Provides a pre-registered [`TestStore`] with four kinds, the
//! [`Fixture`] populated the same way in every suite, and [`Tracked`],
//! a value that reports when it is dropped.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{populate, DropLog, Fixture, Point, TestStore, Tracked, Vector};
