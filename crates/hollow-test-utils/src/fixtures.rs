//! Reusable store fixtures.
//!
//! - [`Point`] and [`Vector`]: small plain-data kinds.
//! - [`Tracked`]: records its id in a shared [`DropLog`] when dropped,
//!   so tests can observe exactly when a sweep releases a value.
//! - [`TestStore`]: registers `Point`, `Vector`, `f64` and `Tracked`.
//! - [`populate`]: fills a store with `n` objects of each plain kind.

use std::cell::RefCell;
use std::rc::Rc;

use hollow_arena::{object_store, Handle, ObjectStore};

/// Integer pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Floating-point pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Shared record of dropped [`Tracked`] ids, in drop order.
#[derive(Clone, Debug, Default)]
pub struct DropLog(Rc<RefCell<Vec<u32>>>);

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A value that appends `id` to this log when dropped.
    pub fn track(&self, id: u32) -> Tracked {
        Tracked {
            id,
            log: self.clone(),
        }
    }

    /// Ids dropped so far.
    pub fn dropped(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }

    /// Number of values dropped so far.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Value that records its own drop.
#[derive(Debug)]
pub struct Tracked {
    pub id: u32,
    log: DropLog,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.0.borrow_mut().push(self.id);
    }
}

object_store! {
    /// Store registering every fixture kind.
    pub struct TestStore {
        points: Point,
        vectors: Vector,
        reals: f64,
        tracked: Tracked,
    }
}

/// Handles created by [`populate`], one vector per kind.
pub struct Fixture<'s> {
    pub points: Vec<Handle<'s, Point, TestStore>>,
    pub vectors: Vec<Handle<'s, Vector, TestStore>>,
    pub reals: Vec<Handle<'s, f64, TestStore>>,
}

/// Create `n` objects of each plain kind, interleaved by kind.
///
/// Object `i` (0-based) of each kind lands at slot `i + 1` of a fresh store:
/// `Point(i, i + 1)`, `Vector(i, i + 2.5)` and `i + 4.6`.
///
/// # Panics
///
/// Panics if the store refuses a creation (full or borrowed arena).
pub fn populate(store: &TestStore, n: u32) -> Fixture<'_> {
    let mut fixture = Fixture {
        points: Vec::with_capacity(n as usize),
        vectors: Vec::with_capacity(n as usize),
        reals: Vec::with_capacity(n as usize),
    };
    for i in 0..n {
        let i = i as i32;
        let f = f64::from(i);
        fixture
            .points
            .push(store.create(Point::new(i, i + 1)).expect("create Point"));
        fixture
            .vectors
            .push(store.create(Vector::new(f, f + 2.5)).expect("create Vector"));
        fixture
            .reals
            .push(store.create(f + 4.6).expect("create f64"));
    }
    fixture
}
