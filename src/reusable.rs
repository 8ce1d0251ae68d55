//! The reusable object handed out by the pool

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// Identities are process-unique, never reused, and shared by clones.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a [`Reusable`], unique per constructed instance.
///
/// Renders as the bare decimal id, which is also the identity token used by
/// [`Reusable::diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReusableId(u64);

impl fmt::Display for ReusableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An identity-bearing unit of reusable capacity.
///
/// A `Reusable` carries no state beyond its identity. Equality and hashing
/// compare identities only, so two separately constructed instances are never
/// equal even though they are structurally identical. Cloning copies the
/// handle: the clone aliases the same identity, the way copying an object
/// reference does.
///
/// # Examples
///
/// ```
/// use reusable_pool::Reusable;
///
/// let a = Reusable::new();
/// let b = Reusable::new();
///
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reusable {
    id: ReusableId,
}

impl Reusable {
    /// Create an instance with a fresh process-unique identity.
    pub fn new() -> Self {
        Self {
            id: ReusableId(NEXT_ID.fetch_add(1, Ordering::Relaxed)),
        }
    }

    /// The identity of this instance, shared by its clones.
    pub fn id(&self) -> ReusableId {
        self.id
    }

    /// Diagnostic line describing a use of this object.
    ///
    /// The result is always `<id>  :Uso del objeto Reutilizable` and is stable
    /// across repeated calls.
    ///
    /// # Examples
    ///
    /// ```
    /// use reusable_pool::Reusable;
    ///
    /// let r = Reusable::new();
    /// assert_eq!(
    ///     r.diagnostic(),
    ///     format!("{}  :Uso del objeto Reutilizable", r.id())
    /// );
    /// ```
    pub fn diagnostic(&self) -> String {
        format!("{}  :Uso del objeto Reutilizable", self.id)
    }
}

impl Default for Reusable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fresh_instances_are_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(Reusable::new().id()));
        }
    }

    #[test]
    fn clones_alias_the_same_identity() {
        let original = Reusable::new();
        let alias = original.clone();

        assert_eq!(original, alias);
        assert_eq!(original.id(), alias.id());
    }

    #[test]
    fn diagnostic_has_fixed_shape_and_is_stable() {
        let r = Reusable::new();
        let expected = format!("{}  :Uso del objeto Reutilizable", r.id());

        assert_eq!(r.diagnostic(), expected);
        assert_eq!(r.diagnostic(), expected);
    }

    #[test]
    fn id_displays_as_bare_number() {
        let r = Reusable::new();
        let rendered = r.id().to_string();

        assert!(rendered.chars().all(|c| c.is_ascii_digit()));
        assert!(r.diagnostic().starts_with(&rendered));
    }
}
