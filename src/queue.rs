//! Queue registry: maps queue-name to a registered queue handle and owns
//! the queue-name interner. Grounded in `cl4_prof_add_queue` (`profiler.c`):
//! registering a name a second time replaces the previous entry and logs a
//! warning; registration is rejected once `calculate` has run.

use crate::collab::DeviceQueue;
use crate::error::ProfError;
use crate::event::QueueId;
use crate::interner::Interner;
use rustc_hash::FxHashMap;
use std::sync::Arc;

pub struct QueueRegistry<Q: DeviceQueue> {
    names: Interner<crate::event::QueueKind>,
    queues: FxHashMap<QueueId, Arc<Q>>,
    sealed: bool,
}

impl<Q: DeviceQueue> Default for QueueRegistry<Q> {
    fn default() -> Self {
        QueueRegistry {
            names: Interner::new(),
            queues: FxHashMap::default(),
            sealed: false,
        }
    }
}

impl<Q: DeviceQueue> QueueRegistry<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `queue` under `name`. Replaces and warns if `name` is
    /// already registered. Fails if `seal()` has already been called.
    pub fn register(&mut self, name: &str, queue: Arc<Q>) -> Result<(), ProfError> {
        if self.sealed {
            return Err(ProfError::precondition(
                "cannot register a queue after calculate() has run",
            ));
        }
        let id = self.names.intern(name);
        if self.queues.contains_key(&id) {
            log::warn!(
                "profile already contains a queue named '{}'; the existing queue will be replaced",
                name
            );
        }
        self.queues.insert(id, queue);
        Ok(())
    }

    /// Prevents further registration; called once by `calculate`.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn name_of(&self, id: QueueId) -> &str {
        self.names.name_of(id)
    }

    /// The queue-name interner, for callers (the exporter) that need to
    /// resolve queue names for every registered queue rather than one at a
    /// time.
    pub fn names(&self) -> &Interner<crate::event::QueueKind> {
        &self.names
    }

    /// Iterates `(queue-name id, queue)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (QueueId, &Arc<Q>)> {
        self.names.ids().filter_map(move |id| self.queues.get(&id).map(|q| (id, q)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::testing::StubQueue;

    #[test]
    fn replacing_a_name_keeps_registration_order_but_swaps_the_queue() {
        let mut registry = QueueRegistry::<StubQueue>::new();
        registry.register("q0", Arc::new(StubQueue::new())).unwrap();
        let replacement = Arc::new(StubQueue::new().push(
            crate::collab::testing::StubEvent::interval("k", 0, 1),
        ));
        registry.register("q0", replacement.clone()).unwrap();

        let entries: Vec<_> = registry.iter().collect();
        assert_eq!(entries.len(), 1);
        assert!(Arc::ptr_eq(entries[0].1, &replacement));
    }

    #[test]
    fn register_after_seal_is_a_precondition_error() {
        let mut registry = QueueRegistry::<StubQueue>::new();
        registry.seal();
        let err = registry.register("q0", Arc::new(StubQueue::new())).unwrap_err();
        assert_eq!(err.kind, crate::error::ProfErrorKind::Precondition);
    }
}
