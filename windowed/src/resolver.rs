use crate::Axis;
use crate::cache::MeasuredSizes;
use crate::error::ConfigResult;
use crate::options::{AxisOptions, KeyFn, Sizing};

/// Resolves the size of an item on one axis.
///
/// Resolution order:
/// 1. a fixed size, when configured (measurements are never consulted);
/// 2. the measured size cached for the item's key;
/// 3. the estimate.
pub struct SizeResolver<'a, K, M: ?Sized> {
    sizing: Sizing,
    get_item_key: &'a KeyFn<K>,
    measured: &'a M,
}

impl<'a, K, M: MeasuredSizes<K> + ?Sized> SizeResolver<'a, K, M> {
    /// Builds a resolver from options, failing when no size source is configured.
    pub fn new(options: &'a AxisOptions<K>, axis: Axis, measured: &'a M) -> ConfigResult<Self> {
        Ok(Self::with_sizing(
            options.sizing(axis)?,
            &options.get_item_key,
            measured,
        ))
    }

    pub(crate) fn with_sizing(
        sizing: Sizing,
        get_item_key: &'a KeyFn<K>,
        measured: &'a M,
    ) -> Self {
        Self {
            sizing,
            get_item_key,
            measured,
        }
    }

    pub fn resolve(&self, index: usize) -> u32 {
        match &self.sizing {
            Sizing::Uniform(size) => *size,
            Sizing::Fixed(f) => f(index),
            Sizing::Estimated(estimate) => {
                let key = (self.get_item_key)(index);
                match self.measured.measured_size(&key) {
                    Some(size) => size,
                    None => estimate(index),
                }
            }
        }
    }

    /// Whether the item at `index` is sized from a measurement.
    pub fn is_measured(&self, index: usize) -> bool {
        match &self.sizing {
            Sizing::Estimated(_) => {
                let key = (self.get_item_key)(index);
                self.measured.measured_size(&key).is_some()
            }
            _ => false,
        }
    }

    /// The constant item size, when the axis has one.
    pub fn uniform_size(&self) -> Option<u32> {
        match &self.sizing {
            Sizing::Uniform(size) => Some(*size),
            _ => None,
        }
    }

    pub fn is_fixed(&self) -> bool {
        self.sizing.is_fixed()
    }
}
