//! Plock array - flat, resizable plock storage owned by a box

use super::Plock;
use crate::report::{Report, Result};

/// Upper bound on the number of plocks a single array can hold
pub const MAX_PLOCK_COUNT: u32 = u32::MAX;

/// Flat plock storage addressed by linear index
#[derive(Clone, Debug)]
pub struct PlockArray {
    plocks: Vec<Plock>,
    /// Largest count `set_size` will provide storage for
    limit: u32,
}

impl PlockArray {
    pub fn new() -> Self {
        Self::with_limit(MAX_PLOCK_COUNT)
    }

    pub fn with_limit(limit: u32) -> Self {
        Self {
            plocks: Vec::new(),
            limit,
        }
    }

    /// Current plock count
    pub fn size(&self) -> u32 {
        self.plocks.len() as u32
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Resize to `count` plocks.
    ///
    /// Plocks below `min(old, count)` are kept, new slots are unset. A count of
    /// zero releases the storage. On failure the array is left as it was.
    pub fn set_size(&mut self, count: u32) -> Result<()> {
        if count == 0 {
            self.plocks = Vec::new();
            return Ok(());
        }

        self.plocks = self.resized(count)?;
        Ok(())
    }

    /// Build the storage `set_size(count)` would commit, without committing it
    pub fn resized(&self, count: u32) -> Result<Vec<Plock>> {
        if count > self.limit {
            log::warn!(
                "Plock array resize to {} exceeds limit of {}",
                count,
                self.limit
            );
            return Err(Report::memory_failure());
        }

        let count = count as usize;
        let mut plocks = Vec::new();
        plocks
            .try_reserve_exact(count)
            .map_err(|_| Report::memory_failure())?;

        let kept = self.plocks.len().min(count);
        plocks.extend_from_slice(&self.plocks[..kept]);
        plocks.resize(count, Plock::UNSET);
        Ok(plocks)
    }

    /// Swap in storage produced by [`PlockArray::resized`]
    pub(crate) fn commit(&mut self, plocks: Vec<Plock>) {
        self.plocks = plocks;
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Plock> {
        self.plocks.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Plock> {
        self.plocks.get_mut(index)
    }

    /// Overwrite the plock at `index`
    pub fn set(&mut self, index: usize, plock: Plock) -> Result<()> {
        let slot = self.plocks.get_mut(index).ok_or_else(Report::out_of_bounds)?;
        *slot = plock;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plock> {
        self.plocks.iter()
    }

    /// Raw plock slice
    pub fn as_slice(&self) -> &[Plock] {
        &self.plocks
    }

    /// Count plocks with a type set
    pub fn occupied(&self) -> usize {
        self.plocks.iter().filter(|p| !p.is_unset()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.plocks.is_empty()
    }

    /// Whether backing storage is currently held
    pub fn is_allocated(&self) -> bool {
        self.plocks.capacity() > 0
    }
}

impl Default for PlockArray {
    fn default() -> Self {
        Self::new()
    }
}
