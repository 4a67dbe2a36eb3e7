//! Position model: integer ordering keys and the move target type.
//!
//! Positions are non-negative integers, strictly increasing left-to-right
//! within a scope. Uniqueness within a scope is a steady-state invariant;
//! contiguity is not: gaps survive deletions until a move renumbers the
//! affected range.

use serde::{Deserialize, Serialize};

/// An entity that participates in a linear order within a parent scope.
///
/// Cards (ordered within a column) and columns (ordered within a board) are
/// two independent instantiations of this contract; the reorder algorithms
/// in [`crate::state`] are written once against it.
pub trait Orderable {
    /// Ordering key within the parent scope
    fn position(&self) -> usize;

    /// Replace the ordering key
    fn set_position(&mut self, position: usize);
}

/// Where a move should land inside the destination scope.
///
/// `End` is the append sentinel: it expands at dispatch time to the rank
/// after the current last sibling, excluding the moving entity itself when
/// it is already a member of the destination scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum MoveTarget {
    /// Explicit final rank among the destination's siblings
    Slot(usize),
    /// Append after the current last sibling
    End,
}

impl MoveTarget {
    /// Final rank for a move that stays inside its scope of `len` siblings
    /// (the moving entity is one of them, so `End` lands on `len - 1`).
    /// `None` when a slot rank lies outside the scope.
    pub fn resolve_within(self, len: usize) -> Option<usize> {
        match self {
            Self::Slot(rank) if rank < len => Some(rank),
            Self::Slot(_) => None,
            Self::End => Some(len.saturating_sub(1)),
        }
    }

    /// Insertion rank for a move into a foreign scope of `len` siblings
    /// (`End` appends at rank `len`). `None` when a slot rank lies past the
    /// append point.
    pub fn resolve_into(self, len: usize) -> Option<usize> {
        match self {
            Self::Slot(rank) if rank <= len => Some(rank),
            Self::Slot(_) => None,
            Self::End => Some(len),
        }
    }
}

/// Position for an entity appended at the end of a scope:
/// `max(existing) + 1`, or `0` when the scope is empty.
pub fn end_position<I>(existing: I) -> usize
where
    I: IntoIterator<Item = usize>,
{
    existing.into_iter().max().map(|p| p + 1).unwrap_or(0)
}

/// Sort entities into display order: stable ascending sort on position.
///
/// Ties cannot occur in steady state; the stable sort keeps insertion order
/// as the fallback if one ever slips through.
pub fn sort_by_position<T: Orderable>(entities: &mut [T]) {
    entities.sort_by_key(|e| e.position());
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: &'static str,
        position: usize,
    }

    impl Orderable for Item {
        fn position(&self) -> usize {
            self.position
        }
        fn set_position(&mut self, position: usize) {
            self.position = position;
        }
    }

    #[test]
    fn test_end_position_empty() {
        assert_eq!(end_position([]), 0);
    }

    #[test]
    fn test_end_position_dense() {
        assert_eq!(end_position([0, 1, 2]), 3);
    }

    #[test]
    fn test_end_position_with_gaps() {
        // gaps are legal; append still lands after the true last sibling
        assert_eq!(end_position([0, 4, 7]), 8);
    }

    #[test]
    fn test_sort_by_position_is_stable() {
        let mut items = vec![
            Item { name: "b", position: 2 },
            Item { name: "a", position: 0 },
            Item { name: "tie1", position: 1 },
            Item { name: "tie2", position: 1 },
        ];
        sort_by_position(&mut items);
        let names: Vec<_> = items.iter().map(|i| i.name).collect();
        assert_eq!(names, ["a", "tie1", "tie2", "b"]);
    }

    #[test]
    fn test_resolve_within() {
        assert_eq!(MoveTarget::Slot(0).resolve_within(3), Some(0));
        assert_eq!(MoveTarget::Slot(2).resolve_within(3), Some(2));
        assert_eq!(MoveTarget::Slot(3).resolve_within(3), None);
        // End lands on the last occupied rank, not one past it
        assert_eq!(MoveTarget::End.resolve_within(3), Some(2));
        assert_eq!(MoveTarget::End.resolve_within(1), Some(0));
    }

    #[test]
    fn test_resolve_into() {
        assert_eq!(MoveTarget::Slot(2).resolve_into(2), Some(2));
        assert_eq!(MoveTarget::Slot(3).resolve_into(2), None);
        assert_eq!(MoveTarget::End.resolve_into(2), Some(2));
        assert_eq!(MoveTarget::End.resolve_into(0), Some(0));
    }

    #[test]
    fn test_move_target_serde() {
        let json = serde_json::to_string(&MoveTarget::Slot(3)).unwrap();
        assert_eq!(json, r#"{"kind":"slot","index":3}"#);
        let parsed: MoveTarget = serde_json::from_str(r#"{"kind":"end"}"#).unwrap();
        assert_eq!(parsed, MoveTarget::End);
    }
}
