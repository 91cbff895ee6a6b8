//! Typed outcomes of relation resolution.
//!
//! Hydration is best effort: a related entity that cannot be fetched is left
//! out of the view rather than failing the owning entity. These types keep the
//! omission visible, so "no reference stored" (`Relation::Absent`) is never
//! confused with "reference stored but not resolved" (`Relation::Unresolved`).
//!
//! On the wire both serialize as the plain value: a single relation as the
//! view or `null`, a list as the array of resolved views.

use serde::{Serialize, Serializer};

use crate::enums::EntityKind;

/// Why a stored reference did not produce a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The referenced record does not exist (soft miss).
    NotFound,
    /// The stored reference is not a valid store key; no lookup was made.
    InvalidIdentifier(String),
    /// The store failed while fetching the referenced record or its relations.
    StoreUnavailable(String),
    /// The referenced record could not be decoded.
    DecodeFailure(String),
}

/// A stored reference that did not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub kind: EntityKind,
    pub id: String,
    /// Index in the stored reference list; `None` for single-valued relations.
    pub position: Option<usize>,
    pub reason: UnresolvedReason,
}

/// Outcome of resolving a single-valued relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation<T> {
    /// The raw record holds no reference.
    Absent,
    Resolved(T),
    Unresolved(Unresolved),
}

impl<T> Relation<T> {
    /// The resolved view, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Absent | Self::Unresolved(_) => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Failure detail when a stored reference did not resolve.
    #[must_use]
    pub const fn unresolved(&self) -> Option<&Unresolved> {
        match self {
            Self::Unresolved(unresolved) => Some(unresolved),
            Self::Absent | Self::Resolved(_) => None,
        }
    }

    /// Consume into the resolved view, dropping the status.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Absent | Self::Unresolved(_) => None,
        }
    }
}

impl<T: Serialize> Serialize for Relation<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Outcome of resolving a list-valued relation.
///
/// `items` keeps the stored reference order among the references that
/// resolved; `unresolved` records the rest with their original positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationList<T> {
    items: Vec<T>,
    unresolved: Vec<Unresolved>,
}

impl<T> RelationList<T> {
    /// A list with no stored references.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    /// Collect per-reference outcomes, given in stored order.
    pub fn collect<I>(kind: EntityKind, outcomes: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<T, UnresolvedReason>)>,
    {
        let mut list = Self::empty();
        for (position, (id, outcome)) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(item) => list.items.push(item),
                Err(reason) => list.unresolved.push(Unresolved {
                    kind,
                    id,
                    position: Some(position),
                    reason,
                }),
            }
        }
        list
    }

    /// Resolved views, in stored order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// References that did not resolve, in stored order.
    #[must_use]
    pub fn unresolved(&self) -> &[Unresolved] {
        &self.unresolved
    }

    /// Whether every stored reference resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Number of resolved views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of references stored on the raw record.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.items.len() + self.unresolved.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for RelationList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a, T> IntoIterator for &'a RelationList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for RelationList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
