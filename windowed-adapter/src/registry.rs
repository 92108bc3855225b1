use core::fmt;

use windowed::KeySet;

use crate::{ObservedElement, ResizeObserver};

/// Which elements are currently registered with a resize observer.
///
/// Registering is idempotent: an element that is already observed is not observed twice.
pub struct ObservationRegistry<E: ObservedElement> {
    observed: KeySet<E::Id>,
}

impl<E: ObservedElement> ObservationRegistry<E> {
    pub fn new() -> Self {
        Self {
            observed: KeySet::new(),
        }
    }

    /// Observes `element` unless it already is. Returns `true` when it was newly observed.
    pub fn register<O>(&mut self, element: &E, observer: &mut O) -> bool
    where
        O: ResizeObserver<E> + ?Sized,
    {
        let id = element.id();
        if self.observed.contains(&id) {
            return false;
        }
        observer.observe(element);
        self.observed.insert(id);
        true
    }

    /// Stops observing the element with `id`. Returns `false` when it was not observed.
    pub fn unregister<O>(&mut self, id: &E::Id, observer: &mut O) -> bool
    where
        O: ResizeObserver<E> + ?Sized,
    {
        if !self.observed.remove(id) {
            return false;
        }
        observer.unobserve(id);
        true
    }

    pub fn is_observed(&self, id: &E::Id) -> bool {
        self.observed.contains(id)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Unobserves every registered element. Returns how many there were.
    pub fn clear<O: ResizeObserver<E> + ?Sized>(&mut self, observer: &mut O) -> usize {
        let observed = core::mem::take(&mut self.observed);
        let count = observed.len();
        for id in observed {
            observer.unobserve(&id);
        }
        count
    }
}

impl<E: ObservedElement> Default for ObservationRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ObservedElement> Clone for ObservationRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            observed: self.observed.clone(),
        }
    }
}

impl<E: ObservedElement> fmt::Debug for ObservationRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservationRegistry")
            .field("observed", &self.observed.len())
            .finish()
    }
}
