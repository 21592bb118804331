//! Free-space allocator over the simulated core memory.
//!
//! Maintains a table of disjoint free intervals `(size, addr)`. `find_space`
//! scans in ascending-size order so admission leaves the smallest possible
//! remainder; `defragment` is run after every mutation event (admission,
//! termination) rather than kept continuously sorted, since those events are
//! rare compared to CPU dispatches.

/// A free interval: `size` units starting at `addr`.
pub type Interval = (u64, u64);

#[derive(Debug)]
pub struct FreeSpaceTable {
    core_size: u64,
    entries: Vec<Interval>,
}

impl FreeSpaceTable {
    /// Builds the initial table: a single interval covering the whole core.
    pub fn new(core_size: u64) -> Self {
        let mut entries = Vec::new();
        if core_size > 0 {
            entries.push((core_size, 0));
        }

        Self { core_size, entries }
    }

    pub const fn core_size(&self) -> u64 {
        self.core_size
    }

    pub fn entries(&self) -> &[Interval] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records a free interval. Zero-size inserts are rejected.
    pub fn insert(&mut self, size: u64, addr: u64) {
        if size == 0 {
            return;
        }

        log::trace!("free-space insert: ({size}, {addr})");
        self.entries.push((size, addr));
    }

    /// Returns and removes the smallest interval with `size >= required`,
    /// ties broken by insertion order.
    pub fn find_space(&mut self, required: u64) -> Option<Interval> {
        let mut best: Option<usize> = None;

        for (index, &(size, _addr)) in self.entries.iter().enumerate() {
            if size < required {
                continue;
            }
            match best {
                None => best = Some(index),
                Some(best_index) if size < self.entries[best_index].0 => best = Some(index),
                _ => {}
            }
        }

        let found = best.map(|index| self.entries.remove(index));
        if let Some((size, addr)) = found {
            log::trace!("free-space find_space({required}) -> ({size}, {addr})");
        } else {
            log::trace!("free-space find_space({required}) -> none");
        }
        found
    }

    /// Rebuilds the table in address order, merging adjacent intervals
    /// (`addr_i + size_i == addr_j`) until no adjacency remains.
    pub fn defragment(&mut self) {
        self.entries.sort_unstable_by_key(|&(_size, addr)| addr);

        let mut merged: Vec<Interval> = Vec::with_capacity(self.entries.len());
        for &(size, addr) in &self.entries {
            if let Some(&mut (ref mut last_size, last_addr)) = merged.last_mut()
                && last_addr + *last_size == addr
            {
                *last_size += size;
                continue;
            }
            merged.push((size, addr));
        }

        self.entries = merged;
        log::trace!("free-space defragment -> {:?}", self.entries);
    }

    /// Total free memory currently tracked; used in tests to check that free
    /// and resident intervals tile the core exactly.
    pub fn total_free(&self) -> u64 {
        self.entries.iter().map(|&(size, _addr)| size).sum()
    }
}
