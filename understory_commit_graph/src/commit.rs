// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input data model: one record per commit.

use alloc::string::String;
use alloc::vec::Vec;

/// A commit as seen by the layout pipeline.
///
/// Records are read-only inputs; every layout pass works from a fresh slice of
/// them. Identifiers must be unique within a slice. Parent identifiers that do
/// not match any record in the same slice are treated as missing: the commit
/// still gets laid out, but no edge, lane inheritance, or ancestry step goes
/// through the dangling reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitRecord {
    /// Content-addressed identifier.
    pub oid: String,
    /// Parent identifiers in order; the first parent is the mainline.
    ///
    /// Empty for a root commit, two or more for a merge.
    pub parents: Vec<String>,
    /// Monotonic logical or wall-clock time. Larger is newer.
    pub timestamp: i64,
    /// Branch names pointing at this commit.
    pub refs: Vec<String>,
    /// Commit message (usually just the subject line).
    pub message: String,
    /// Whether `HEAD` points at this commit.
    pub is_head: bool,
}

impl CommitRecord {
    /// Creates a root commit with no refs and an empty message.
    #[must_use]
    pub fn new(oid: impl Into<String>, timestamp: i64) -> Self {
        Self {
            oid: oid.into(),
            timestamp,
            ..Self::default()
        }
    }

    /// Appends a parent identifier.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Appends several parent identifiers, keeping their order.
    #[must_use]
    pub fn with_parents<I>(mut self, parents: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.parents.extend(parents.into_iter().map(Into::into));
        self
    }

    /// Appends a branch label.
    #[must_use]
    pub fn with_ref(mut self, name: impl Into<String>) -> Self {
        self.refs.push(name.into());
        self
    }

    /// Sets the commit message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets whether `HEAD` points at this commit.
    #[must_use]
    pub fn with_head(mut self, is_head: bool) -> Self {
        self.is_head = is_head;
        self
    }

    /// Returns `true` if the commit lists no parents.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if the commit lists two or more parents.
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Returns the commits sorted newest first.
///
/// The sort is stable: commits with equal timestamps keep their input order.
/// Lane assignment and row placement both walk this order, so they agree on
/// which of two simultaneous commits comes first.
pub(crate) fn newest_first(commits: &[CommitRecord]) -> Vec<&CommitRecord> {
    let mut order: Vec<&CommitRecord> = commits.iter().collect();
    order.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    order
}
