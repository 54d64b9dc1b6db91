//! World management - the plock box and its ID matrix

mod id_matrix;
mod plock_box;

pub use id_matrix::{Dimension, PlockId, PlockIdMatrix};
pub use plock_box::{BoxStats, PlockBox, StorageLimits};
