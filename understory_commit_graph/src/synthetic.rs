// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic synthetic histories for tests and benchmarks.
//!
//! ```
//! use understory_commit_graph::synthetic::SyntheticHistory;
//!
//! let commits = SyntheticHistory::with_commits(500).generate();
//! assert_eq!(commits.len(), 500);
//! assert_eq!(commits, SyntheticHistory::with_commits(500).generate());
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::CommitRecord;

/// Parameters for a generated branch-and-merge history.
///
/// The history starts with a root on `main`. Each further commit either forks
/// a new branch from a random live tip, merges a random side branch back into
/// `main`, or extends a random live branch. Timestamps increase by one per
/// commit, and the same parameters always yield the same records.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntheticHistory {
    /// Number of commits to generate.
    pub commits: usize,
    /// Chance that a commit starts a new branch.
    pub branch_probability: f64,
    /// Chance that a commit merges a side branch into `main`.
    pub merge_probability: f64,
    /// Seed for the generator.
    pub seed: u64,
    /// Whether to shuffle the output so it is not in creation order.
    pub shuffle: bool,
}

impl Default for SyntheticHistory {
    fn default() -> Self {
        Self {
            commits: 200,
            branch_probability: 0.15,
            merge_probability: 0.2,
            seed: 0x9E37_79B9_7F4A_7C15,
            shuffle: false,
        }
    }
}

struct Branch {
    name: String,
    tip: usize,
}

impl SyntheticHistory {
    /// Default parameters with the given commit count.
    #[must_use]
    pub fn with_commits(commits: usize) -> Self {
        Self {
            commits,
            ..Self::default()
        }
    }

    /// Generates the commit records.
    ///
    /// Live branch tips carry their branch name in `refs`, and the tip of
    /// `main` is marked as `HEAD`.
    #[must_use]
    pub fn generate(&self) -> Vec<CommitRecord> {
        let mut rng = Rng::new(self.seed);
        let mut out: Vec<CommitRecord> = Vec::with_capacity(self.commits);
        let mut branches: Vec<Branch> = Vec::new();
        let mut forks = 0_usize;

        for i in 0..self.commits {
            let mut commit = CommitRecord::new(oid(self.seed, i), timestamp(i))
                .with_message(format!("commit {i}"));
            if branches.is_empty() {
                branches.push(Branch {
                    name: String::from("main"),
                    tip: i,
                });
                out.push(commit);
                continue;
            }

            let roll = rng.next_f64();
            if roll < self.branch_probability {
                let from = branches[rng.below(branches.len())].tip;
                commit = commit.with_parent(out[from].oid.clone());
                forks += 1;
                branches.push(Branch {
                    name: format!("feature-{forks}"),
                    tip: i,
                });
            } else if roll < self.branch_probability + self.merge_probability
                && branches.len() > 1
            {
                let side = 1 + rng.below(branches.len() - 1);
                let merged = branches.swap_remove(side);
                commit = commit
                    .with_parents([out[branches[0].tip].oid.clone(), out[merged.tip].oid.clone()])
                    .with_message(format!("Merge {} into main", merged.name));
                branches[0].tip = i;
            } else {
                let branch = rng.below(branches.len());
                commit = commit.with_parent(out[branches[branch].tip].oid.clone());
                branches[branch].tip = i;
            }
            out.push(commit);
        }

        for branch in &branches {
            out[branch.tip].refs.push(branch.name.clone());
        }
        if let Some(main) = branches.first() {
            out[main.tip].is_head = true;
        }

        if self.shuffle {
            // Fisher-Yates.
            for i in (1..out.len()).rev() {
                out.swap(i, rng.below(i + 1));
            }
        }
        out
    }
}

fn timestamp(i: usize) -> i64 {
    i64::try_from(i).unwrap_or(i64::MAX)
}

/// Hex identifier unique per `(seed, index)` within one history.
///
/// `splitmix64` is a bijection, so distinct indices never collide.
fn oid(seed: u64, i: usize) -> String {
    format!("{:016x}", splitmix64(seed.wrapping_add(i as u64)))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Xorshift generator.
#[derive(Clone, Debug)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        // Xorshift never leaves the all-zero state.
        Self(splitmix64(seed) | 1)
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1_u64 << 53) as f64)
    }

    /// Uniform index in `0..n`; `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "The product is below `n`, which is a usize"
        )]
        let i = (self.next_f64() * n as f64) as usize;
        i.min(n - 1)
    }
}
