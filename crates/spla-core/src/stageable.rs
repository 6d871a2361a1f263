//! A value with a committed snapshot and a pending draft.
//!
//! Edits go to the draft. [`Stageable::commit`] makes the draft the new
//! snapshot; [`Stageable::discard`] throws the draft away. The value is dirty
//! while the two differ.

/// A committed value plus an editable pending copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stageable<T> {
    committed: T,
    pending: T,
}

impl<T: Clone + PartialEq> Stageable<T> {
    /// Start clean: pending is a copy of `committed`.
    pub fn new(committed: T) -> Self {
        Self {
            pending: committed.clone(),
            committed,
        }
    }

    /// The last committed value.
    pub fn committed(&self) -> &T {
        &self.committed
    }

    /// The draft value.
    pub fn pending(&self) -> &T {
        &self.pending
    }

    /// Mutable access to the draft.
    pub fn pending_mut(&mut self) -> &mut T {
        &mut self.pending
    }

    /// Whether the draft differs from the committed value.
    pub fn is_dirty(&self) -> bool {
        self.pending != self.committed
    }

    /// Make the draft the committed value.
    pub fn commit(&mut self) {
        self.committed = self.pending.clone();
    }

    /// Reset the draft to the committed value.
    pub fn discard(&mut self) {
        self.pending = self.committed.clone();
    }

    /// Replace both sides with `value`, leaving the state clean.
    pub fn reset(&mut self, value: T) {
        self.pending = value.clone();
        self.committed = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn starts_clean() {
        let s = Stageable::new(3);
        assert!(!s.is_dirty());
        assert_eq!(*s.pending(), 3);
        assert_eq!(*s.committed(), 3);
    }

    #[test]
    fn edit_then_commit() {
        let mut s = Stageable::new(vec![1, 2]);
        s.pending_mut().push(3);
        assert!(s.is_dirty());
        assert_eq!(s.committed(), &vec![1, 2]);

        s.commit();
        assert!(!s.is_dirty());
        assert_eq!(s.committed(), &vec![1, 2, 3]);
    }

    #[test]
    fn edit_then_discard() {
        let mut s = Stageable::new(String::from("a"));
        s.pending_mut().push('b');
        s.discard();
        assert!(!s.is_dirty());
        assert_eq!(s.pending(), "a");
    }

    #[test]
    fn reverting_an_edit_is_clean() {
        let mut s = Stageable::new(BTreeSet::from([1, 2]));
        s.pending_mut().remove(&2);
        assert!(s.is_dirty());
        s.pending_mut().insert(2);
        assert!(!s.is_dirty());
    }

    #[test]
    fn reset_replaces_both() {
        let mut s = Stageable::new(1);
        *s.pending_mut() = 5;
        s.reset(9);
        assert!(!s.is_dirty());
        assert_eq!(*s.committed(), 9);
    }
}
