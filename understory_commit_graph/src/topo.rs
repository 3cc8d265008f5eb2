// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Topological ordering of commits (roots first).

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::CommitRecord;

/// Indicates whether a sort resolved every commit or had to break cycles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SortCompletion {
    /// Every commit was emitted by Kahn's algorithm.
    Complete,
    /// Some commits never reached in-degree zero (they sit on or behind a
    /// cycle) and were appended in input order.
    Stalled {
        /// Number of commits appended after the sort stalled.
        remaining: usize,
    },
}

/// Orders commit identifiers so that parents come before their children.
///
/// See [`topo_sort_with_completion`] for the algorithm. The result always
/// contains every input identifier exactly once, even for cyclic input.
///
/// # Example
///
/// ```
/// use understory_commit_graph::{CommitRecord, topo_sort};
///
/// let commits = [
///     CommitRecord::new("c", 3).with_parent("b"),
///     CommitRecord::new("a", 1),
///     CommitRecord::new("b", 2).with_parent("a"),
/// ];
/// assert_eq!(topo_sort(&commits), ["a", "b", "c"]);
/// ```
#[must_use]
pub fn topo_sort(commits: &[CommitRecord]) -> Vec<&str> {
    topo_sort_with_completion(commits).0
}

/// Orders commit identifiers roots first and reports whether cycles were broken.
///
/// # Algorithm
///
/// Kahn's algorithm with a FIFO queue:
///
/// 1. The in-degree of a commit is the number of its parent references that
///    resolve within `commits` (dangling references are ignored).
/// 2. The queue is seeded with every zero in-degree commit, in input order.
/// 3. Each dequeued commit is emitted, and every commit listing it as a parent
///    has its in-degree decremented once per reference. Commits reaching zero
///    are enqueued.
/// 4. Commits still unresolved afterwards are appended in input order and
///    counted in [`SortCompletion::Stalled`].
///
/// Ties are broken by enqueue order, so the output is deterministic for a given
/// input order.
///
/// # Performance
///
/// O(V + E) time and space.
#[must_use]
pub fn topo_sort_with_completion(commits: &[CommitRecord]) -> (Vec<&str>, SortCompletion) {
    let index: HashMap<&str, usize> = commits
        .iter()
        .enumerate()
        .map(|(i, c)| (c.oid.as_str(), i))
        .collect();

    let mut in_degree = vec![0_usize; commits.len()];
    // children[p] lists each commit once per reference to `p`.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); commits.len()];
    for (i, commit) in commits.iter().enumerate() {
        for parent in &commit.parents {
            if let Some(&p) = index.get(parent.as_str()) {
                in_degree[i] += 1;
                children[p].push(i);
            }
        }
    }

    let mut queue: VecDeque<usize> = (0..commits.len())
        .filter(|&i| in_degree[i] == 0)
        .collect();
    let mut emitted = vec![false; commits.len()];
    let mut order = Vec::with_capacity(commits.len());
    while let Some(i) = queue.pop_front() {
        emitted[i] = true;
        order.push(commits[i].oid.as_str());
        for &child in &children[i] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    let remaining = commits.len() - order.len();
    if remaining == 0 {
        return (order, SortCompletion::Complete);
    }
    log::debug!("topological sort stalled; appending {remaining} commits in input order");
    order.extend(
        commits
            .iter()
            .zip(&emitted)
            .filter(|(_, done)| !**done)
            .map(|(c, _)| c.oid.as_str()),
    );
    (order, SortCompletion::Stalled { remaining })
}
