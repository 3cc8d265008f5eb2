// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use hashbrown::HashMap;

use crate::CommitRecord;

/// Map from commit identifier to its raw parent list.
///
/// Keys and values borrow from the commit slice the map was built from.
pub type Adjacency<'a> = HashMap<&'a str, &'a [String]>;

/// Maps every commit to its parent identifiers.
///
/// Parent lists are returned unfiltered: identifiers that do not resolve within
/// `commits` are kept, and consumers decide how to treat them.
#[must_use]
pub fn build_adjacency(commits: &[CommitRecord]) -> Adjacency<'_> {
    let mut adjacency = HashMap::with_capacity(commits.len());
    for commit in commits {
        adjacency.insert(commit.oid.as_str(), commit.parents.as_slice());
    }
    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_dangling_parents() {
        let commits = [
            CommitRecord::new("a", 1).with_parent("gone"),
            CommitRecord::new("b", 2).with_parents(["a", "x"]),
        ];
        let adjacency = build_adjacency(&commits);
        assert_eq!(adjacency.len(), 2);
        assert_eq!(adjacency["a"], ["gone"]);
        assert_eq!(adjacency["b"], ["a", "x"]);
    }

    #[test]
    fn empty_input_gives_empty_map() {
        assert!(build_adjacency(&[]).is_empty());
    }
}
