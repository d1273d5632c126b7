//! Role-generic node registry.

use tracing::warn;
use tp_core::{Id, IdAlloc};

use crate::error::{StoreError, StoreResult};
use crate::node::NodeEntity;

/// Case-insensitive name collision check.
///
/// Full Unicode lowercasing, matching the original dashboard's
/// `toLowerCase()` comparison rather than ASCII-only folding.
pub(crate) fn names_collide(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// The authoritative collection of one node role.
///
/// Owns its own [`IdAlloc`], so independent registries (and therefore
/// independent stores) never share sequence state. Insertion order is
/// preserved; the registry itself does not sort.
#[derive(Debug, Clone)]
pub struct Registry<T: NodeEntity> {
    entries: Vec<T>,
    alloc: IdAlloc,
}

impl<T: NodeEntity> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NodeEntity> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            alloc: IdAlloc::new(),
        }
    }

    /// Insert a new entity, assigning it a fresh id.
    ///
    /// Fails with [`StoreError::DuplicateName`] if the candidate's name
    /// collides case-insensitively with an existing entry; the registry is
    /// untouched in that case.
    pub fn add(&mut self, mut candidate: T) -> StoreResult<&T> {
        if self
            .entries
            .iter()
            .any(|e| names_collide(e.name(), candidate.name()))
        {
            warn!(role = T::ROLE, name = candidate.name(), "duplicate name rejected");
            return Err(StoreError::DuplicateName {
                role: T::ROLE,
                name: candidate.name().to_string(),
            });
        }
        candidate.set_id(self.alloc.allocate());
        self.entries.push(candidate);
        Ok(self.entries.last().expect("just pushed"))
    }

    /// Replace the entity with the same id, preserving the id.
    ///
    /// Fails with [`StoreError::NotFound`] for an unknown id, and with
    /// [`StoreError::DuplicateName`] if a rename would collide with a
    /// different entry (name uniqueness must survive updates too).
    pub fn update(&mut self, entity: T) -> StoreResult<&T> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.id() == entity.id())
            .ok_or_else(|| {
                warn!(role = T::ROLE, id = %entity.id(), "update target not found");
                StoreError::NotFound {
                    role: T::ROLE,
                    id: entity.id(),
                }
            })?;
        if self
            .entries
            .iter()
            .any(|e| e.id() != entity.id() && names_collide(e.name(), entity.name()))
        {
            warn!(role = T::ROLE, name = entity.name(), "rename collides with existing name");
            return Err(StoreError::DuplicateName {
                role: T::ROLE,
                name: entity.name().to_string(),
            });
        }
        self.entries[idx] = entity;
        Ok(&self.entries[idx])
    }

    /// Remove by id. Idempotent: removing an absent id is a no-op.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: Id) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        before != self.entries.len()
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adopt a pre-validated set of entries wholesale (reconciliation).
    ///
    /// The caller is responsible for name uniqueness; the allocator is
    /// advanced past every adopted id so later adds cannot reuse one.
    pub(crate) fn replace_all(&mut self, entries: Vec<T>) {
        for entry in &entries {
            self.alloc.ensure_above(entry.id());
        }
        self.entries = entries;
    }
}
