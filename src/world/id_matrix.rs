//! Plock-ID matrix - row-major map from box position to plock array slot

use serde::{Deserialize, Serialize};

use crate::plock::MAX_PLOCK_COUNT;
use crate::report::{Report, Result};

/// Box dimension (0 = unset)
pub type Dimension = u16;

/// Reference from a box position to a plock array slot (0 = unset)
///
/// A set id `n` refers to slot `n - 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlockId(pub u32);

impl PlockId {
    pub const UNSET: PlockId = PlockId(0);

    /// Id referring to plock array slot `index`
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_add(1)
            .and_then(|n| u32::try_from(n).ok())
            .map(PlockId)
    }

    /// Plock array slot this id refers to
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    pub fn is_unset(self) -> bool {
        self == Self::UNSET
    }
}

/// Row-major 2D array of plock ids
///
/// Index = y * width + x
#[derive(Clone, Debug)]
pub struct PlockIdMatrix {
    ids: Vec<PlockId>,
    width: Dimension,
    height: Dimension,
    /// Largest area `set_size` will provide storage for
    limit: u32,
}

impl PlockIdMatrix {
    pub fn new() -> Self {
        Self::with_limit(MAX_PLOCK_COUNT)
    }

    pub fn with_limit(limit: u32) -> Self {
        Self {
            ids: Vec::new(),
            width: 0,
            height: 0,
            limit,
        }
    }

    /// Current (width, height)
    pub fn size(&self) -> (Dimension, Dimension) {
        (self.width, self.height)
    }

    pub fn width(&self) -> Dimension {
        self.width
    }

    pub fn height(&self) -> Dimension {
        self.height
    }

    /// Resize to `width` x `height`, keeping every id whose position exists in
    /// both the old and new dimensions. Uncovered positions are unset.
    ///
    /// `(0, 0)` releases the storage. On failure the matrix is left as it was.
    pub fn set_size(&mut self, width: Dimension, height: Dimension) -> Result<()> {
        if width == 0 && height == 0 {
            self.ids = Vec::new();
            self.width = 0;
            self.height = 0;
            return Ok(());
        }

        let ids = self.resized(width, height)?;
        self.commit(ids, width, height);
        Ok(())
    }

    /// Build the storage `set_size(width, height)` would commit, without
    /// committing it
    pub fn resized(&self, width: Dimension, height: Dimension) -> Result<Vec<PlockId>> {
        let area = width as u64 * height as u64;
        if area > self.limit as u64 {
            log::warn!(
                "Plock ID matrix resize to {}x{} exceeds limit of {}",
                width,
                height,
                self.limit
            );
            return Err(Report::memory_failure());
        }

        let mut ids = Vec::new();
        ids.try_reserve_exact(area as usize)
            .map_err(|_| Report::memory_failure())?;
        ids.resize(area as usize, PlockId::UNSET);

        // Fresh buffer, so source rows are never overwritten mid-copy
        let (old_width, new_width) = (self.width as usize, width as usize);
        let kept_cols = old_width.min(new_width);
        let kept_rows = self.height.min(height) as usize;
        for row in 0..kept_rows {
            let src = row * old_width;
            let dst = row * new_width;
            ids[dst..dst + kept_cols].copy_from_slice(&self.ids[src..src + kept_cols]);
        }

        Ok(ids)
    }

    /// Swap in storage produced by [`PlockIdMatrix::resized`]
    pub(crate) fn commit(&mut self, ids: Vec<PlockId>, width: Dimension, height: Dimension) {
        debug_assert_eq!(ids.len(), width as usize * height as usize);
        self.ids = ids;
        self.width = width;
        self.height = height;
    }

    #[inline]
    fn index(&self, x: Dimension, y: Dimension) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Id at column `x`, row `y`
    #[inline]
    pub fn get(&self, x: Dimension, y: Dimension) -> Option<PlockId> {
        self.index(x, y).map(|i| self.ids[i])
    }

    #[inline]
    pub fn set(&mut self, x: Dimension, y: Dimension, id: PlockId) -> Result<()> {
        let i = self.index(x, y).ok_or_else(Report::out_of_bounds)?;
        self.ids[i] = id;
        Ok(())
    }

    /// All ids of row `y`
    pub fn row(&self, y: Dimension) -> Option<&[PlockId]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        Some(&self.ids[start..start + self.width as usize])
    }

    /// Raw id slice for rendering
    pub fn as_slice(&self) -> &[PlockId] {
        &self.ids
    }

    pub fn is_allocated(&self) -> bool {
        self.ids.capacity() > 0
    }
}

impl Default for PlockIdMatrix {
    fn default() -> Self {
        Self::new()
    }
}
