//! Dense-id interning for event names and queue names.
//!
//! Both the base spec's `EventNameInterner` and the queue-name interning
//! supplemented in SPEC_FULL.md §3.1 are instances of the same generic
//! type, parameterized by a zero-sized marker so a `NameId` can never be
//! confused with a `QueueId` at the type level.

use rustc_hash::FxHashMap;
use std::marker::PhantomData;

/// A dense id assigned in first-insertion order, tagged with `Kind` so
/// ids from different interners can't be mixed up.
pub struct Id<Kind> {
    index: u32,
    _kind: PhantomData<fn() -> Kind>,
}

impl<Kind> Id<Kind> {
    fn new(index: u32) -> Self {
        Id {
            index,
            _kind: PhantomData,
        }
    }

    pub fn index(self) -> u32 {
        self.index
    }

    /// Reconstructs an id from a raw dense index, e.g. to look up a name
    /// from an `OverlapMatrix` row/column index. The caller is
    /// responsible for the index having come from the matching interner.
    pub fn from_index(index: u32) -> Self {
        Self::new(index)
    }

    #[cfg(test)]
    pub(crate) fn for_test(index: u32) -> Self {
        Self::new(index)
    }
}

impl<Kind> Clone for Id<Kind> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<Kind> Copy for Id<Kind> {}
impl<Kind> PartialEq for Id<Kind> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
impl<Kind> Eq for Id<Kind> {}
impl<Kind> std::hash::Hash for Id<Kind> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}
impl<Kind> PartialOrd for Id<Kind> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<Kind> Ord for Id<Kind> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}
impl<Kind> std::fmt::Debug for Id<Kind> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Id({})", self.index)
    }
}

/// Bijection between strings and dense ids assigned in first-seen order.
///
/// The reverse (id → name) table (`names`) is populated eagerly as ids are
/// assigned, so reverse lookup is always available; callers only rely on
/// it being complete once ingest has finished interning names.
pub struct Interner<Kind> {
    forward: FxHashMap<Box<str>, Id<Kind>>,
    names: Vec<Box<str>>,
}

impl<Kind> Default for Interner<Kind> {
    fn default() -> Self {
        Interner {
            forward: FxHashMap::default(),
            names: Vec::new(),
        }
    }
}

impl<Kind> Interner<Kind> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning its id. Idempotent: a name seen before
    /// returns the id it was first assigned.
    pub fn intern(&mut self, name: &str) -> Id<Kind> {
        if let Some(&id) = self.forward.get(name) {
            return id;
        }
        let id = Id::new(self.names.len() as u32);
        let boxed: Box<str> = name.into();
        self.names.push(boxed.clone());
        self.forward.insert(boxed, id);
        id
    }

    /// Number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reverse lookup. Only meaningful after ingest has finished interning
    /// names; ids are dense in `[0, len())` by construction so this never
    /// panics for an id this interner produced.
    pub fn name_of(&self, id: Id<Kind>) -> &str {
        &self.names[id.index() as usize]
    }

    pub fn ids(&self) -> impl Iterator<Item = Id<Kind>> + '_ {
        (0..self.names.len() as u32).map(Id::new)
    }
}
