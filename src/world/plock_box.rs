//! Plock box - the resizable 2D sandbox world
//!
//! A box pairs a [`PlockArray`] with a [`PlockIdMatrix`] and moves through a
//! two-phase lifecycle: created (empty) -> initialized -> [resized]* ->
//! deinitialized -> destroyed. Destroying is only allowed once deinitialized.

use serde::{Deserialize, Serialize};

use super::id_matrix::{Dimension, PlockId, PlockIdMatrix};
use crate::plock::{Plock, PlockArray, MAX_PLOCK_COUNT};
use crate::report::{messages, ErrorFlags, Report, Result};

/// Storage caps for the two halves of a box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLimits {
    /// Max plock array count
    pub max_plocks: u32,
    /// Max plock-ID matrix area
    pub max_plock_ids: u32,
}

impl Default for StorageLimits {
    fn default() -> Self {
        Self {
            max_plocks: MAX_PLOCK_COUNT,
            max_plock_ids: MAX_PLOCK_COUNT,
        }
    }
}

/// Snapshot of box occupancy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxStats {
    pub width: Dimension,
    pub height: Dimension,
    pub plock_count: u32,
    /// Plocks with a type set
    pub occupied: usize,
    /// Matrix positions holding a set id
    pub mapped: usize,
}

/// The sandbox world container
#[derive(Debug)]
pub struct PlockBox {
    initialized: bool,
    width: Dimension,
    height: Dimension,
    plocks: PlockArray,
    plock_ids: PlockIdMatrix,
}

impl PlockBox {
    /// Create a box in the deinitialized state
    pub fn create() -> Self {
        Self::with_limits(StorageLimits::default())
    }

    pub fn with_limits(limits: StorageLimits) -> Self {
        Self {
            initialized: false,
            width: 0,
            height: 0,
            plocks: PlockArray::with_limit(limits.max_plocks),
            plock_ids: PlockIdMatrix::with_limit(limits.max_plock_ids),
        }
    }

    /// Release the box. An initialized box is handed back untouched together
    /// with a `BOX_NOT_DEINIT` report.
    #[allow(clippy::result_large_err)]
    pub fn destroy(self) -> std::result::Result<(), (Self, Report)> {
        if self.initialized {
            return Err((
                self,
                Report::new(ErrorFlags::BOX_NOT_DEINIT, messages::BOX_NOT_DEINIT),
            ));
        }

        log::debug!("Destroyed box");
        Ok(())
    }

    /// Allocate `width * height` plocks and a `width` x `height` ID matrix.
    ///
    /// If sizing either half fails the box stays uninitialized; whatever was
    /// already allocated is released by a following [`PlockBox::deinit`].
    pub fn init(&mut self, width: Dimension, height: Dimension) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Report::missing_argument());
        }
        if self.initialized {
            return Err(Report::new(
                ErrorFlags::BOX_ALREADY_INIT,
                messages::BOX_ALREADY_INIT,
            ));
        }

        self.plocks
            .set_size(area(width, height))
            .map_err(plocks_failed)?;
        self.plock_ids
            .set_size(width, height)
            .map_err(plock_ids_failed)?;

        self.width = width;
        self.height = height;
        self.initialized = true;

        log::debug!("Initialized box {}x{}", width, height);
        Ok(())
    }

    /// Release all storage and reset the dimensions.
    ///
    /// Also accepts a box left partially allocated by a failed `init`.
    pub fn deinit(&mut self) -> Result<()> {
        if !self.initialized && !self.holds_storage() {
            return Err(Report::new(
                ErrorFlags::BOX_ALREADY_DEINIT,
                messages::BOX_ALREADY_DEINIT,
            ));
        }

        self.plocks.set_size(0).map_err(plocks_failed)?;
        self.plock_ids.set_size(0, 0).map_err(plock_ids_failed)?;

        self.width = 0;
        self.height = 0;
        self.initialized = false;

        log::debug!("Deinitialized box");
        Ok(())
    }

    /// Current (width, height)
    pub fn size(&self) -> Result<(Dimension, Dimension)> {
        self.ensure_initialized()?;
        Ok((self.width, self.height))
    }

    pub fn width(&self) -> Result<Dimension> {
        self.size().map(|(width, _)| width)
    }

    pub fn height(&self) -> Result<Dimension> {
        self.size().map(|(_, height)| height)
    }

    /// Resize to `width` x `height`, preserving plocks by index and IDs by
    /// position.
    ///
    /// Both halves are built before either is swapped in, so a failure leaves
    /// storage and dimensions exactly as they were.
    pub fn set_size(&mut self, width: Dimension, height: Dimension) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Report::missing_argument());
        }
        self.ensure_initialized()?;

        let plocks = self
            .plocks
            .resized(area(width, height))
            .map_err(plocks_failed)?;
        let ids = self
            .plock_ids
            .resized(width, height)
            .map_err(plock_ids_failed)?;

        self.plocks.commit(plocks);
        self.plock_ids.commit(ids, width, height);
        self.width = width;
        self.height = height;

        log::debug!("Resized box to {}x{}", width, height);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Plock ID at column `x`, row `y`
    pub fn plock_id(&self, x: Dimension, y: Dimension) -> Option<PlockId> {
        self.plock_ids.get(x, y)
    }

    pub fn set_plock_id(&mut self, x: Dimension, y: Dimension, id: PlockId) -> Result<()> {
        self.ensure_initialized()?;
        self.plock_ids.set(x, y, id)
    }

    /// Plock the ID at (`x`, `y`) refers to.
    ///
    /// `None` for unset IDs and for IDs past the end of the plock array, which
    /// a shrinking resize can leave behind.
    pub fn plock_at(&self, x: Dimension, y: Dimension) -> Option<&Plock> {
        let index = self.plock_id(x, y)?.index()?;
        self.plocks.get(index)
    }

    /// Store `plock` for (`x`, `y`) and point that position at it.
    ///
    /// A position keeps the slot it already refers to. Otherwise it takes a
    /// slot no position refers to, preferring unset plocks. Resizes keep slots
    /// by index and ids by position, so the slot never follows from `x` and `y`.
    pub fn place(&mut self, x: Dimension, y: Dimension, plock: Plock) -> Result<PlockId> {
        self.ensure_initialized()?;
        let current = self.plock_ids.get(x, y).ok_or_else(Report::out_of_bounds)?;

        let slot = match current
            .index()
            .filter(|&index| index < self.plocks.size() as usize)
        {
            Some(slot) => slot,
            None => self.free_slot().ok_or_else(Report::memory_failure)?,
        };
        let id = PlockId::from_index(slot).ok_or_else(Report::out_of_bounds)?;
        self.plocks.set(slot, plock)?;
        self.plock_ids.set(x, y, id)?;
        Ok(id)
    }

    /// First slot no position refers to, unset plocks first
    fn free_slot(&self) -> Option<usize> {
        let mut referenced = vec![false; self.plocks.size() as usize];
        for index in self.plock_ids.as_slice().iter().filter_map(|id| id.index()) {
            if let Some(taken) = referenced.get_mut(index) {
                *taken = true;
            }
        }

        let plocks = self.plocks.as_slice();
        let free = |slot: &usize| !referenced[*slot];
        (0..plocks.len())
            .filter(free)
            .find(|&slot| plocks[slot].is_unset())
            .or_else(|| (0..plocks.len()).find(free))
    }

    pub fn plocks(&self) -> &PlockArray {
        &self.plocks
    }

    pub fn plock_mut(&mut self, index: usize) -> Option<&mut Plock> {
        self.plocks.get_mut(index)
    }

    /// Overwrite plock slot `index` without touching the ID matrix
    pub fn set_plock(&mut self, index: usize, plock: Plock) -> Result<()> {
        self.ensure_initialized()?;
        self.plocks.set(index, plock)
    }

    pub fn plock_ids(&self) -> &PlockIdMatrix {
        &self.plock_ids
    }

    pub fn stats(&self) -> BoxStats {
        BoxStats {
            width: self.width,
            height: self.height,
            plock_count: self.plocks.size(),
            occupied: self.plocks.occupied(),
            mapped: self
                .plock_ids
                .as_slice()
                .iter()
                .filter(|id| !id.is_unset())
                .count(),
        }
    }

    fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(Report::new(
                ErrorFlags::BOX_NOT_INIT,
                messages::BOX_NOT_INIT,
            ));
        }
        Ok(())
    }

    fn holds_storage(&self) -> bool {
        self.plocks.is_allocated()
            || self.plock_ids.is_allocated()
            || self.plock_ids.size() != (0, 0)
    }
}

impl Default for PlockBox {
    fn default() -> Self {
        Self::create()
    }
}

// 65535 * 65535 still fits in u32
fn area(width: Dimension, height: Dimension) -> u32 {
    width as u32 * height as u32
}

fn plocks_failed(cause: Report) -> Report {
    log::warn!("Sizing plock array failed: {}", cause);
    Report::wrap(
        ErrorFlags::PLOCKS_INIT_FAILED,
        messages::PLOCKS_INIT_FAILED,
        cause,
    )
}

fn plock_ids_failed(cause: Report) -> Report {
    log::warn!("Sizing plock ID matrix failed: {}", cause);
    Report::wrap(
        ErrorFlags::PLOCK_IDS_INIT_FAILED,
        messages::PLOCK_IDS_INIT_FAILED,
        cause,
    )
}
