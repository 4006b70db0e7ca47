#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::Geometry;

#[cfg(feature = "std")]
type IndexMap<V> = HashMap<usize, V>;
#[cfg(not(feature = "std"))]
type IndexMap<V> = BTreeMap<usize, V>;

/// Per-index placement memo for one cache generation.
///
/// There is no per-entry eviction: a generation is discarded as a whole when the geometry inputs
/// change or when motion ends.
#[derive(Clone, Debug, Default)]
pub(crate) struct GeometryCache {
    entries: IndexMap<Geometry>,
    generation: u64,
}

impl GeometryCache {
    pub(crate) fn get_or_try_insert<E>(
        &mut self,
        index: usize,
        compute: impl FnOnce() -> Result<Geometry, E>,
    ) -> Result<Geometry, E> {
        if let Some(&hit) = self.entries.get(&index) {
            return Ok(hit);
        }
        let geometry = compute()?;
        self.entries.insert(index, geometry);
        Ok(geometry)
    }

    /// Starts a new, empty generation.
    pub(crate) fn invalidate(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}
