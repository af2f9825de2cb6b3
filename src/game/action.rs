//! Legal move templates and the square-set algebra the selection machine
//! narrows them with.

use super::types::Square;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A server-certified legal move shape: one or two source squares and one
/// or two target squares. Length two on either side denotes an entangled
/// (merge or split) move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTemplate {
    /// Source squares, length 1 or 2.
    pub sources: Vec<Square>,
    /// Target squares, length 1 or 2.
    pub targets: Vec<Square>,
}

impl ActionTemplate {
    /// Creates a template from source and target squares.
    pub fn new(sources: Vec<Square>, targets: Vec<Square>) -> Self {
        Self { sources, targets }
    }

    /// Whether the template's source set contains every chosen square,
    /// compared order-insensitively.
    pub fn sources_contain(&self, chosen: &[Square]) -> bool {
        chosen.iter().all(|sq| self.sources.contains(sq))
    }

    /// Whether the template's target set contains every chosen square,
    /// compared order-insensitively.
    pub fn targets_contain(&self, chosen: &[Square]) -> bool {
        chosen.iter().all(|sq| self.targets.contains(sq))
    }

    /// Source squares not yet chosen.
    pub fn remaining_sources<'a>(
        &'a self,
        chosen: &'a [Square],
    ) -> impl Iterator<Item = Square> + 'a {
        self.sources.iter().copied().filter(|sq| !chosen.contains(sq))
    }

    /// Target squares not yet chosen.
    pub fn remaining_targets<'a>(
        &'a self,
        chosen: &'a [Square],
    ) -> impl Iterator<Item = Square> + 'a {
        self.targets.iter().copied().filter(|sq| !chosen.contains(sq))
    }
}

/// A set of squares with explicit set algebra. Backed by an ordered set so
/// iteration (and therefore highlight order) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SquareSet {
    squares: BTreeSet<Square>,
}

impl SquareSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a square.
    pub fn insert(&mut self, square: Square) {
        self.squares.insert(square);
    }

    /// Whether the set contains `square`.
    pub fn contains(&self, square: Square) -> bool {
        self.squares.contains(&square)
    }

    /// Whether the set contains every element of `other`.
    pub fn contains_all(&self, other: &SquareSet) -> bool {
        other.squares.is_subset(&self.squares)
    }

    /// The union of two sets.
    pub fn union(&self, other: &SquareSet) -> SquareSet {
        Self {
            squares: self.squares.union(&other.squares).copied().collect(),
        }
    }

    /// The elements of `self` not in `other`.
    pub fn difference(&self, other: &SquareSet) -> SquareSet {
        Self {
            squares: self.squares.difference(&other.squares).copied().collect(),
        }
    }

    /// Number of squares in the set.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    /// Removes all squares.
    pub fn clear(&mut self) {
        self.squares.clear();
    }

    /// The single element of a one-square set.
    pub fn only(&self) -> Option<Square> {
        if self.squares.len() == 1 {
            self.squares.iter().next().copied()
        } else {
            None
        }
    }

    /// Iterates in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares.iter().copied()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        Self {
            squares: iter.into_iter().collect(),
        }
    }
}

impl Extend<Square> for SquareSet {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        self.squares.extend(iter);
    }
}
