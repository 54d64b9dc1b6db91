//! Plocks - cell records, their types, and flat plock storage

mod array;
#[allow(clippy::module_inception)]
mod plock;
mod types;

pub use array::{PlockArray, MAX_PLOCK_COUNT};
pub use plock::{Plock, PlockTypeId, TEMPERATURE_UNSET};
pub use types::{PlockType, PlockTypes, COLOR_UNSET};
