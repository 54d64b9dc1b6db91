//! Plock - a single cell of box content

use serde::{Deserialize, Serialize};

/// Temperature a plock holds before anything has set it
pub const TEMPERATURE_UNSET: f64 = -1000.0;

/// Id of a registered plock type (0 = unset)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlockTypeId(pub u8);

impl PlockTypeId {
    pub const UNSET: PlockTypeId = PlockTypeId(0);

    pub fn is_unset(self) -> bool {
        self == Self::UNSET
    }
}

/// A single plock in the box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plock {
    /// Registered type (0 = unset)
    pub type_id: PlockTypeId,
    pub temperature: f64,
}

impl Plock {
    pub const UNSET: Plock = Plock {
        type_id: PlockTypeId::UNSET,
        temperature: TEMPERATURE_UNSET,
    };

    pub fn new(type_id: PlockTypeId, temperature: f64) -> Self {
        Self {
            type_id,
            temperature,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.type_id.is_unset()
    }
}

impl Default for Plock {
    fn default() -> Self {
        Self::UNSET
    }
}
