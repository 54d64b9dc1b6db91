//! Plock type registry
//!
//! Maps a small type id to the color a plock of that type is drawn with.
//! Id 0 is reserved as "unset" and never handed out.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::PlockTypeId;
use crate::report::{messages, ErrorFlags, Report, Result};

/// Color of an unregistered type
pub const COLOR_UNSET: Vec3 = Vec3::new(-1.0, -1.0, -1.0);

/// Appearance template for plocks of one type
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlockType {
    /// RGB, each channel 0.0 - 1.0
    pub color: Vec3,
}

impl PlockType {
    pub fn new(color: Vec3) -> Self {
        Self { color }
    }
}

/// Registry of all plock types
#[derive(Clone, Debug, Default)]
pub struct PlockTypes {
    // Index 0 holds type id 1
    types: Vec<PlockType>,
}

impl PlockTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of RGB colors, ids assigned in order from 1
    pub fn from_colors(colors: &[[f32; 3]]) -> Result<Self> {
        let mut registry = Self::new();
        for color in colors {
            registry.register(PlockType::new(Vec3::from_array(*color)))?;
        }
        Ok(registry)
    }

    /// Parse a RON list of types, e.g. `[(color: (0.8, 0.7, 0.3))]`
    pub fn from_ron(source: &str) -> anyhow::Result<Self> {
        let types: Vec<PlockType> = ron::from_str(source)?;
        let mut registry = Self::new();
        for plock_type in types {
            registry.register(plock_type)?;
        }
        Ok(registry)
    }

    /// Register a new type and return its id
    pub fn register(&mut self, plock_type: PlockType) -> Result<PlockTypeId> {
        let id = u8::try_from(self.types.len() + 1).map_err(|_| {
            Report::new(
                ErrorFlags::TYPE_REGISTRY_FULL,
                messages::TYPE_REGISTRY_FULL,
            )
        })?;
        self.types.push(plock_type);
        log::debug!("Registered plock type {} with color {:?}", id, plock_type.color);
        Ok(PlockTypeId(id))
    }

    pub fn get(&self, id: PlockTypeId) -> Option<&PlockType> {
        if id.is_unset() {
            return None;
        }
        self.types.get(id.0 as usize - 1)
    }

    /// Display color for a type, [`COLOR_UNSET`] for unknown ids
    pub fn color(&self, id: PlockTypeId) -> Vec3 {
        self.get(id).map_or(COLOR_UNSET, |t| t.color)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlockTypeId, &PlockType)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (PlockTypeId(i as u8 + 1), t))
    }
}
