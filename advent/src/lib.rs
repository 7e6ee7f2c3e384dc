//! Puzzle solvers built on the `waypoint` path-finding crates.
//!
//! - [`hill`]: fewest steps across an elevation map.
//! - [`caves`]: most pressure a valve network can release in time.

pub mod caves;
pub mod cli;
pub mod error;
pub mod hill;

pub use caves::{CaveNetwork, Valve};
pub use cli::{Args, Command};
pub use error::{Error, Result};
pub use hill::{ElevationMap, Survey};
