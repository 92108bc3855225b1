use alloc::string::{String, ToString};
use core::fmt;

use crate::registry::ObservationRegistry;
use crate::{
    COLUMN_INDEX_MARKER, INDEX_MARKER, ObservedElement, ROW_INDEX_MARKER, ResizeObserver,
};

/// An element whose index marker cannot be trusted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MarkerError {
    #[error("rendered element has no `{marker}` attribute")]
    Missing { marker: &'static str },
    #[error("rendered element has an invalid `{marker}` attribute: {value:?}")]
    Invalid { marker: &'static str, value: String },
}

/// Reads the index stored in `marker` on `element`.
pub fn parse_index<E: ObservedElement + ?Sized>(
    element: &E,
    marker: &'static str,
) -> Result<usize, MarkerError> {
    let value = element
        .marker(marker)
        .ok_or(MarkerError::Missing { marker })?;
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| MarkerError::Invalid {
            marker,
            value: value.to_string(),
        })
}

/// Screens element notifications before their sizes reach an engine.
///
/// Every notification goes through the same steps:
/// 1. a detached element is unobserved and dropped;
/// 2. the index markers are parsed, and a malformed element is dropped with a warning;
/// 3. the element is registered with the observer (a no-op when it already is).
///
/// The caller then feeds the size to the engine and applies the anchor correction.
pub struct MeasurementReconciler<E: ObservedElement> {
    registry: ObservationRegistry<E>,
}

impl<E: ObservedElement> MeasurementReconciler<E> {
    pub fn new() -> Self {
        Self {
            registry: ObservationRegistry::new(),
        }
    }

    pub fn registry(&self) -> &ObservationRegistry<E> {
        &self.registry
    }

    /// Accepts a list item element, returning its `data-index`.
    pub fn accept_item<O>(
        &mut self,
        element: &E,
        observer: &mut O,
    ) -> Result<Option<usize>, MarkerError>
    where
        O: ResizeObserver<E> + ?Sized,
    {
        self.accept(element, observer, |e| parse_index(e, INDEX_MARKER))
    }

    /// Accepts a grid row element, returning its `data-row-index`.
    pub fn accept_row<O>(
        &mut self,
        element: &E,
        observer: &mut O,
    ) -> Result<Option<usize>, MarkerError>
    where
        O: ResizeObserver<E> + ?Sized,
    {
        self.accept(element, observer, |e| parse_index(e, ROW_INDEX_MARKER))
    }

    /// Accepts a grid cell element, returning its `(data-row-index, data-column-index)`.
    pub fn accept_cell<O>(
        &mut self,
        element: &E,
        observer: &mut O,
    ) -> Result<Option<(usize, usize)>, MarkerError>
    where
        O: ResizeObserver<E> + ?Sized,
    {
        self.accept(element, observer, |e| {
            Ok((
                parse_index(e, ROW_INDEX_MARKER)?,
                parse_index(e, COLUMN_INDEX_MARKER)?,
            ))
        })
    }

    /// `Ok(None)` means the element was detached and has been unobserved.
    fn accept<O, T>(
        &mut self,
        element: &E,
        observer: &mut O,
        parse: impl FnOnce(&E) -> Result<T, MarkerError>,
    ) -> Result<Option<T>, MarkerError>
    where
        O: ResizeObserver<E> + ?Sized,
    {
        if !element.is_connected() {
            let id = element.id();
            if self.registry.unregister(&id, observer) {
                wdebug!("unobserved detached element");
            }
            return Ok(None);
        }
        let parsed = match parse(element) {
            Ok(parsed) => parsed,
            Err(err) => {
                wwarn!(error = %err, "dropping size notification");
                return Err(err);
            }
        };
        if self.registry.register(element, observer) {
            wtrace!(observed = self.registry.len(), "observing element");
        }
        Ok(Some(parsed))
    }

    /// Unobserves one element, e.g. when the host unmounts it.
    pub fn forget<O>(&mut self, id: &E::Id, observer: &mut O) -> bool
    where
        O: ResizeObserver<E> + ?Sized,
    {
        self.registry.unregister(id, observer)
    }

    /// Unobserves everything (teardown).
    pub fn teardown<O>(&mut self, observer: &mut O) -> usize
    where
        O: ResizeObserver<E> + ?Sized,
    {
        let count = self.registry.clear(observer);
        wdebug!(count, "MeasurementReconciler::teardown");
        count
    }
}

impl<E: ObservedElement> Default for MeasurementReconciler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ObservedElement> Clone for MeasurementReconciler<E> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
        }
    }
}

impl<E: ObservedElement> fmt::Debug for MeasurementReconciler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasurementReconciler")
            .field("registry", &self.registry)
            .finish()
    }
}
