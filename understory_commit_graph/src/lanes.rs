// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy lane (column) allocation for branch swimlanes.

use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::CommitRecord;
use crate::commit::newest_first;

/// Assigns every commit a lane so that linear history stays in one column.
///
/// Commits are visited newest first (stable by timestamp). A growable array of
/// lane slots acts as a free list: each slot is either free or reserved for a
/// parent that has not been visited yet.
///
/// For each commit:
///
/// 1. If a lane was reserved for it, that lane is freed and taken.
///    Otherwise the commit takes the first free lane, appending one if none is
///    free.
/// 2. Each parent that exists in `commits` and is neither assigned nor reserved
///    gets a reservation: the first parent inherits the commit's own lane when
///    that slot is free, every other parent takes the first free lane (or a
///    new one).
///
/// First-parent inheritance keeps the mainline straight; merge sources branch
/// out into side lanes. Lookups scan the lane array, which is bounded by the
/// widest concurrent fan-out rather than by the number of commits.
///
/// # Example
///
/// ```
/// use understory_commit_graph::{CommitRecord, assign_lanes};
///
/// let commits = [
///     CommitRecord::new("root", 1),
///     CommitRecord::new("a", 2).with_parent("root"),
///     CommitRecord::new("b", 3).with_parent("root"),
/// ];
/// let lanes = assign_lanes(&commits);
/// assert_eq!(lanes["b"], 0);
/// assert_eq!(lanes["root"], 0);
/// assert_eq!(lanes["a"], 1);
/// ```
#[must_use]
pub fn assign_lanes(commits: &[CommitRecord]) -> HashMap<&str, usize> {
    let present: HashSet<&str> = commits.iter().map(|c| c.oid.as_str()).collect();
    let mut lanes: Vec<Option<&str>> = Vec::new();
    let mut reserved: HashMap<&str, usize> = HashMap::new();
    let mut assigned: HashMap<&str, usize> = HashMap::with_capacity(commits.len());

    for commit in newest_first(commits) {
        let oid = commit.oid.as_str();
        let lane = match reserved.remove(oid) {
            Some(lane) => {
                lanes[lane] = None;
                lane
            }
            None => first_free(&mut lanes),
        };
        assigned.insert(oid, lane);

        for (i, parent) in commit.parents.iter().enumerate() {
            let parent = parent.as_str();
            if !present.contains(parent)
                || assigned.contains_key(parent)
                || reserved.contains_key(parent)
            {
                continue;
            }
            let slot = if i == 0 && lanes[lane].is_none() {
                lane
            } else {
                first_free(&mut lanes)
            };
            lanes[slot] = Some(parent);
            reserved.insert(parent, slot);
        }
    }

    assigned
}

/// Returns the index of the first free slot, appending one if all are taken.
fn first_free(lanes: &mut Vec<Option<&str>>) -> usize {
    match lanes.iter().position(Option::is_none) {
        Some(i) => i,
        None => {
            lanes.push(None);
            lanes.len() - 1
        }
    }
}
