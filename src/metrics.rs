use alloc::vec::Vec;

use crate::{ConfigError, ItemSize, ListConfig, MeasureError};

/// Index ↔ offset translation for one list shape.
///
/// A strategy is stateless itself; anything it learns while measuring lives in the opaque
/// [`Metrics::State`] that the engine owns exclusively and passes back into every call. The
/// engine never looks inside it.
pub trait Metrics {
    type State;

    /// Strategy name used in diagnostics.
    const NAME: &'static str;

    fn new_state(&self, config: &ListConfig) -> Self::State;

    /// Rejects configurations this strategy cannot serve (e.g. the wrong kind of item size).
    fn validate(&self, config: &ListConfig) -> Result<(), ConfigError>;

    /// Offset of the leading edge of `index`. Non-decreasing in `index`.
    fn item_offset(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        index: usize,
    ) -> Result<u64, MeasureError>;

    /// Extent of `index` along the primary axis. Always greater than zero.
    fn item_size(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        index: usize,
    ) -> Result<u32, MeasureError>;

    /// Best current estimate of the content extent. Never less than the end of the last measured
    /// item.
    fn estimated_total_extent(&self, config: &ListConfig, state: &Self::State) -> u64;

    /// First index intersecting `offset`, clamped to `[0, item_count - 1]`.
    fn start_index_for_offset(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        offset: u64,
    ) -> Result<usize, MeasureError>;

    /// Last index intersecting `[offset, offset + viewport)`, given the start index for `offset`.
    /// Clamped to `[start_index, item_count - 1]`.
    fn stop_index_for_start_index(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        start_index: usize,
        offset: u64,
    ) -> Result<usize, MeasureError>;

    /// Forgets everything learned about `index` and later items.
    fn reset_after_index(&self, _state: &mut Self::State, _index: usize) {}
}

/// Every item has the same size. All operations are `O(1)`.
///
/// The state is the item size, read from the configuration once.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSize;

impl Metrics for FixedSize {
    type State = u64;

    const NAME: &'static str = "fixed";

    fn new_state(&self, config: &ListConfig) -> Self::State {
        config.item_size.fixed().map_or(1, u64::from)
    }

    fn validate(&self, config: &ListConfig) -> Result<(), ConfigError> {
        match config.item_size {
            ItemSize::Fixed(0) => Err(ConfigError::ZeroItemSize),
            ItemSize::Fixed(_) => Ok(()),
            ItemSize::PerIndex(_) => Err(ConfigError::SizeSpecMismatch {
                strategy: Self::NAME,
                item_size: config.item_size.kind(),
            }),
        }
    }

    fn item_offset(
        &self,
        _config: &ListConfig,
        state: &mut Self::State,
        index: usize,
    ) -> Result<u64, MeasureError> {
        Ok((index as u64).saturating_mul(*state))
    }

    fn item_size(
        &self,
        _config: &ListConfig,
        state: &mut Self::State,
        _index: usize,
    ) -> Result<u32, MeasureError> {
        Ok(*state as u32)
    }

    fn estimated_total_extent(&self, config: &ListConfig, state: &Self::State) -> u64 {
        (config.item_count as u64).saturating_mul(*state)
    }

    fn start_index_for_offset(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        offset: u64,
    ) -> Result<usize, MeasureError> {
        let last = config.item_count.saturating_sub(1);
        let index = offset / *state;
        Ok(usize::try_from(index).map_or(last, |i| i.min(last)))
    }

    fn stop_index_for_start_index(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        start_index: usize,
        offset: u64,
    ) -> Result<usize, MeasureError> {
        let last = config.item_count.saturating_sub(1);
        let start_index = start_index.min(last);
        let size = *state;
        let start_offset = (start_index as u64).saturating_mul(size);
        let span = offset
            .saturating_add(config.viewport() as u64)
            .saturating_sub(start_offset);
        let visible = usize::try_from(span.div_ceil(size)).unwrap_or(usize::MAX);
        Ok(start_index
            .saturating_add(visible)
            .saturating_sub(1)
            .clamp(start_index, last))
    }
}

/// Offset and size of a measured item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemMetadata {
    pub offset: u64,
    pub size: u32,
}

impl ItemMetadata {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }
}

/// Measured prefix of a variable-size list.
///
/// Entries are only ever appended (in index order) or truncated by
/// [`Metrics::reset_after_index`], so offsets handed out earlier stay valid until a reset.
#[derive(Clone, Debug, Default)]
pub struct VariableSizeState {
    items: Vec<ItemMetadata>,
}

impl VariableSizeState {
    pub fn last_measured_index(&self) -> Option<usize> {
        self.items.len().checked_sub(1)
    }

    pub fn measured(&self) -> &[ItemMetadata] {
        &self.items
    }
}

/// Items are sized by a per-index function, measured lazily in index order.
///
/// Offset lookups binary-search the measured prefix and fall back to an exponential probe past
/// it; the unmeasured tail is extrapolated with `estimated_item_size`.
#[derive(Clone, Copy, Debug, Default)]
pub struct VariableSize;

impl VariableSize {
    fn size_of(config: &ListConfig, index: usize) -> u32 {
        match &config.item_size {
            ItemSize::PerIndex(f) => f(index),
            ItemSize::Fixed(size) => *size,
        }
    }

    /// Measures every item up to and including `index`.
    fn measure(
        config: &ListConfig,
        state: &mut VariableSizeState,
        index: usize,
    ) -> Result<ItemMetadata, MeasureError> {
        while state.items.len() <= index {
            let i = state.items.len();
            let offset = state.items.last().map_or(0, ItemMetadata::end);
            let size = Self::size_of(config, i);
            if size == 0 {
                vwarn!(index = i, "VariableSize: item measured a zero size");
                return Err(MeasureError::NonPositiveSize { index: i });
            }
            state.items.push(ItemMetadata { offset, size });
        }
        Ok(state.items[index])
    }

    /// Index of the last measured item among `items[..=high]` whose offset is `<= offset`.
    fn nearest_measured(items: &[ItemMetadata], high: usize, offset: u64) -> usize {
        let searched = &items[..=high];
        searched
            .partition_point(|m| m.offset <= offset)
            .saturating_sub(1)
    }
}

impl Metrics for VariableSize {
    type State = VariableSizeState;

    const NAME: &'static str = "variable";

    fn new_state(&self, _config: &ListConfig) -> Self::State {
        VariableSizeState::default()
    }

    fn validate(&self, config: &ListConfig) -> Result<(), ConfigError> {
        if config.estimated_item_size == 0 {
            return Err(ConfigError::ZeroEstimatedItemSize);
        }
        match config.item_size {
            ItemSize::PerIndex(_) => Ok(()),
            ItemSize::Fixed(_) => Err(ConfigError::SizeSpecMismatch {
                strategy: Self::NAME,
                item_size: config.item_size.kind(),
            }),
        }
    }

    fn item_offset(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        index: usize,
    ) -> Result<u64, MeasureError> {
        Ok(Self::measure(config, state, index)?.offset)
    }

    fn item_size(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        index: usize,
    ) -> Result<u32, MeasureError> {
        Ok(Self::measure(config, state, index)?.size)
    }

    fn estimated_total_extent(&self, config: &ListConfig, state: &Self::State) -> u64 {
        let count = config.item_count;
        let measured = state.items.len().min(count);
        let measured_end = match measured {
            0 => 0,
            n => state.items[n - 1].end(),
        };
        let unmeasured = (count - measured) as u64;
        measured_end.saturating_add(unmeasured.saturating_mul(config.estimated_item_size as u64))
    }

    fn start_index_for_offset(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        offset: u64,
    ) -> Result<usize, MeasureError> {
        let count = config.item_count;
        if count == 0 {
            return Ok(0);
        }

        let measured = state.items.len().min(count);
        if measured > 0 && state.items[measured - 1].offset >= offset {
            return Ok(Self::nearest_measured(&state.items, measured - 1, offset));
        }

        // Exponential probe past the measured prefix; measuring as we go.
        let mut index = measured.saturating_sub(1);
        let mut interval = 1usize;
        while index < count && Self::measure(config, state, index)?.offset < offset {
            index = index.saturating_add(interval);
            interval = interval.saturating_mul(2);
        }
        let high = index.min(count - 1);
        Self::measure(config, state, high)?;
        Ok(Self::nearest_measured(&state.items, high, offset))
    }

    fn stop_index_for_start_index(
        &self,
        config: &ListConfig,
        state: &mut Self::State,
        start_index: usize,
        offset: u64,
    ) -> Result<usize, MeasureError> {
        let count = config.item_count;
        if count == 0 {
            return Ok(0);
        }

        let start_index = start_index.min(count - 1);
        let max_offset = offset.saturating_add(config.viewport() as u64);
        let mut end = Self::measure(config, state, start_index)?.end();
        let mut stop = start_index;
        while stop < count - 1 && end < max_offset {
            stop += 1;
            end = end.saturating_add(Self::measure(config, state, stop)?.size as u64);
        }
        Ok(stop)
    }

    fn reset_after_index(&self, state: &mut Self::State, index: usize) {
        state.items.truncate(index);
    }
}
