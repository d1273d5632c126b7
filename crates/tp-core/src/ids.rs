use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier used across the store.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        // index+1 must be nonzero
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// Checked variant of [`Id::from_index`]: `None` when `index + 1`
    /// would overflow. Use at boundaries that adopt externally supplied
    /// ids.
    pub fn try_from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type SupplierId = Id;
pub type RecipientId = Id;
pub type ConnectionId = Id;

/// Monotonic identifier allocator for one entity kind.
///
/// Owned by the registry or matrix instance that issues the ids, never
/// shared globally, so independent store instances (e.g. in tests) do not
/// leak sequence state into each other. An allocator only moves forward:
/// an id, once issued, is never handed out again, even after the entity
/// it named is deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAlloc {
    next: u32,
}

impl IdAlloc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next id in the sequence.
    pub fn allocate(&mut self) -> Id {
        let id = Id::from_index(self.next);
        self.next += 1;
        id
    }

    /// Advance the sequence past an externally supplied id.
    ///
    /// Used when adopting entities whose ids were issued elsewhere (a
    /// reconciled snapshot), so later allocations cannot collide.
    pub fn ensure_above(&mut self, id: Id) {
        self.next = self.next.max(id.index() + 1);
    }
}
