//! Tracking which fields the last decode supplied.

use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

/// Primary names of the fields populated by the most recent decode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceSet {
    names: BTreeSet<&'static str>,
}

impl PresenceSet {
    /// Create an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: BTreeSet::new(),
        }
    }

    /// Whether the last decode read `name` from the document.
    #[must_use]
    pub fn was_set(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Recorded names in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// Number of recorded names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(crate) fn insert(&mut self, name: &'static str) {
        self.names.insert(name);
    }

    pub(crate) fn clear(&mut self) {
        self.names.clear();
    }
}

/// A record paired with the presence set of its last decode.
///
/// The record stays plain data; `Tracked` dereferences to it so fields are
/// read and written as usual.
///
/// # Examples
///
/// ```
/// use docmap::{Record, Tracked, field};
///
/// #[derive(Debug, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     const TYPE_NAME: &'static str = "Point";
///     docmap::fields!(Point => [field!(Point, x), field!(Point, y)]);
/// }
///
/// let mut point = Tracked::new(Point::default());
/// point.x = 3;
/// assert_eq!(point.x, 3);
/// assert!(!point.was_set("x"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tracked<R> {
    record: R,
    presence: PresenceSet,
}

impl<R> Tracked<R> {
    /// Wrap `record` with an empty presence set.
    #[must_use]
    pub const fn new(record: R) -> Self {
        Self {
            record,
            presence: PresenceSet::new(),
        }
    }

    /// Whether the last decode read `name` from the document.
    #[must_use]
    pub fn was_set(&self, name: &str) -> bool {
        self.presence.was_set(name)
    }

    /// Presence set of the last decode.
    #[must_use]
    pub const fn presence(&self) -> &PresenceSet {
        &self.presence
    }

    /// Discard the presence set.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.record
    }

    /// Split into the record and its presence set.
    #[must_use]
    pub fn into_parts(self) -> (R, PresenceSet) {
        (self.record, self.presence)
    }

    pub(crate) const fn parts_mut(&mut self) -> (&mut R, &mut PresenceSet) {
        (&mut self.record, &mut self.presence)
    }
}

impl<R> From<R> for Tracked<R> {
    fn from(record: R) -> Self {
        Self::new(record)
    }
}

impl<R> Deref for Tracked<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.record
    }
}

impl<R> DerefMut for Tracked<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.record
    }
}
