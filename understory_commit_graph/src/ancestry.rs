// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reachability over parent edges.

use alloc::collections::VecDeque;

use hashbrown::HashSet;

use crate::{Adjacency, CommitRecord, build_adjacency};

/// Returns `true` if `ancestor` can be reached from `descendant` by following
/// parent edges.
///
/// The relation is reflexive: every identifier is its own ancestor through the
/// zero-length path, whether or not it names a commit in `commits`. Parent
/// references that do not resolve within `commits` are not followed.
///
/// Builds a fresh adjacency map per call; use [`Ancestry`] to answer many
/// queries over the same commits.
///
/// # Example
///
/// ```
/// use understory_commit_graph::{CommitRecord, is_ancestor};
///
/// let commits = [
///     CommitRecord::new("a", 1),
///     CommitRecord::new("b", 2).with_parent("a"),
///     CommitRecord::new("c", 3).with_parent("b"),
/// ];
/// assert!(is_ancestor(&commits, "a", "c"));
/// assert!(!is_ancestor(&commits, "c", "a"));
/// ```
#[must_use]
pub fn is_ancestor(commits: &[CommitRecord], ancestor: &str, descendant: &str) -> bool {
    Ancestry::new(commits).is_ancestor(ancestor, descendant)
}

/// Ancestry oracle over a fixed commit slice.
///
/// Holds the parent adjacency so that repeated queries (for example while
/// hovering over a graph) only pay for the traversal.
#[derive(Clone, Debug)]
pub struct Ancestry<'a> {
    parents: Adjacency<'a>,
}

impl<'a> Ancestry<'a> {
    /// Indexes the parent edges of `commits`.
    #[must_use]
    pub fn new(commits: &'a [CommitRecord]) -> Self {
        Self {
            parents: build_adjacency(commits),
        }
    }

    /// Returns `true` if `ancestor` is reachable from `descendant` through
    /// zero or more parent edges.
    ///
    /// Breadth-first search from `descendant`. The target test runs when a node
    /// is dequeued, before the visited check, so a self query returns `true`
    /// immediately. Visited nodes are expanded once, which keeps the walk
    /// O(V + E) and makes it terminate on cyclic input.
    ///
    /// Parents are filtered before enqueueing so a dangling id never matches `ancestor`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(descendant);

        while let Some(current) = queue.pop_front() {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(parents) = self.parents.get(current) {
                queue.extend(
                    parents
                        .iter()
                        .map(|p| p.as_str())
                        .filter(|p| self.parents.contains_key(p)),
                );
            }
        }

        false
    }

    /// Returns `true` if `ancestor` is reachable through at least one parent
    /// edge, i.e. it is an ancestor and not the same identifier.
    #[must_use]
    pub fn is_proper_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        ancestor != descendant && self.is_ancestor(ancestor, descendant)
    }
}
