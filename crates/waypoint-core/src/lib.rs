//! **waypoint-core** — small building blocks for puzzle solvers.
//!
//! This crate provides the foundational types used across the *waypoint*
//! workspace: geometry primitives, a persistent cons-list, integer helpers
//! and iterator adapters.

pub mod geom;
pub mod iter;
pub mod list;
pub mod math;

pub use geom::{Offset, Point, Size};
pub use iter::IteratorExt;
pub use list::List;
pub use math::{gcd, lcm};
