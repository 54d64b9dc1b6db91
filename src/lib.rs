//! # SBX - 2D Plock Sandbox
//!
//! A sandbox prototype whose world is a resizable box of plocks.

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod display;
pub mod plock;
pub mod report;
pub mod world;

pub use report::{ErrorFlags, Report};

/// Common imports for internal use
pub mod prelude {
    pub use crate::plock::{Plock, PlockArray, PlockTypeId, PlockTypes};
    pub use crate::report::{ErrorFlags, Report};
    pub use crate::world::{Dimension, PlockBox, PlockId, PlockIdMatrix};
}
