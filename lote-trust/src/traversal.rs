//! Bounded, deduplicating, breadth-first traversal of a pointer graph of
//! lists.
//!
//! The traversal owns its working set (visited URIs, list budget) for the
//! duration of one invocation; nothing is shared across runs. Cancellation is
//! cooperative: dropping the traversal future drops every in-flight child
//! load with it.

use std::collections::HashSet;
use std::num::NonZeroUsize;

use futures::StreamExt as _;
use thiserror::Error;

use crate::error::{Problem, TraversalLimit};
use crate::jwt::{self, VerifyJwtSignature};
use crate::loader::{LoadLote, LoadOutcome};
use crate::model::{ListOfTrustedEntities, LotePointer};
use crate::profile::{check_profile_compliance, ProfileRegistry};

/// Bounds for one traversal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Number of child lists fetched concurrently within one depth level.
    pub other_lote_parallelism: NonZeroUsize,
    /// The root is depth 0; children beyond this depth are not followed.
    pub max_depth: usize,
    /// Total number of lists loaded, root included.
    pub max_lists: NonZeroUsize,
}

impl Constraints {
    pub fn new(other_lote_parallelism: NonZeroUsize, max_depth: usize, max_lists: NonZeroUsize) -> Self {
        Self {
            other_lote_parallelism,
            max_depth,
            max_lists,
        }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            other_lote_parallelism: NonZeroUsize::new(4).expect("non-zero"),
            max_depth: 3,
            max_lists: NonZeroUsize::new(100).expect("non-zero"),
        }
    }
}

/// Per-list failure policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContinueOnProblem {
    /// The first problem of any kind aborts the whole traversal.
    Never,
    /// Every problem is recorded and the traversal continues.
    Always,
    /// Problems found in a list that was at least retrievable are recorded;
    /// transport failures and missing lists abort.
    #[default]
    AlwaysIfDownloaded,
}

/// A problem attributed to the pointer that led to it.
#[derive(Debug, Error)]
#[error("list at `{}`: {problem}", .pointer.location)]
pub struct TraversalProblem {
    pub pointer: LotePointer,
    pub problem: Problem,
}

/// Ordered result of one traversal: the root list first, then every reachable
/// child in breadth-first discovery order.
#[derive(Debug)]
pub struct TraversalOutcome {
    pub root: (LotePointer, ListOfTrustedEntities),
    pub children: Vec<(LotePointer, ListOfTrustedEntities)>,
    pub problems: Vec<TraversalProblem>,
}

impl TraversalOutcome {
    /// Root and children, in discovery order.
    pub fn lists(&self) -> impl Iterator<Item = &(LotePointer, ListOfTrustedEntities)> {
        std::iter::once(&self.root).chain(self.children.iter())
    }
}

/// The traversal engine, parameterized over its collaborators.
#[derive(Clone, Copy)]
pub struct LoteTraversal<'a> {
    pub loader: &'a dyn LoadLote,
    pub verifier: &'a dyn VerifyJwtSignature,
    pub registry: &'a ProfileRegistry,
    pub constraints: Constraints,
    pub continue_on_problem: ContinueOnProblem,
}

impl LoteTraversal<'_> {
    /// Load the list graph rooted at `root`.
    ///
    /// A failure on the root itself is always fatal: without a root list
    /// there is nothing to attribute children to. Failures on children
    /// follow the configured [`ContinueOnProblem`] policy.
    pub async fn load_lote_and_pointers(&self, root: LotePointer) -> Result<TraversalOutcome, TraversalProblem> {
        let mut visited: HashSet<_> = HashSet::new();
        let mut problems = Vec::new();
        let mut budget = self.constraints.max_lists.get();
        let mut depth_limit_reported = false;
        let mut lists_limit_reported = false;

        visited.insert(root.location.clone());
        budget -= 1;

        debug!(uri = %root.location, "loading root list");

        let root_lote = self
            .fetch_one(&root)
            .await
            .map_err(|problem| TraversalProblem {
                pointer: root.clone(),
                problem,
            })?;

        let root_pair = (root, root_lote);

        let mut children = Vec::new();
        let mut frontier = vec![root_pair.clone()];
        let mut depth = 0usize;

        while !frontier.is_empty() {
            depth += 1;

            // Children discovered at this level, in the order pointers appear
            // in their parents (parents themselves in discovery order).
            let mut level = Vec::new();

            for (_, parent) in &frontier {
                for pointer in parent.pointers() {
                    if visited.contains(&pointer.location) {
                        // First discovery wins; later references are dropped.
                        continue;
                    }

                    if depth > self.constraints.max_depth {
                        if !depth_limit_reported {
                            depth_limit_reported = true;
                            problems.push(TraversalProblem {
                                pointer: pointer.clone(),
                                problem: Problem::TraversalLimitReached {
                                    limit: TraversalLimit::MaxDepth(self.constraints.max_depth),
                                },
                            });
                        }
                        continue;
                    }

                    if budget == 0 {
                        if !lists_limit_reported {
                            lists_limit_reported = true;
                            problems.push(TraversalProblem {
                                pointer: pointer.clone(),
                                problem: Problem::TraversalLimitReached {
                                    limit: TraversalLimit::MaxLists(self.constraints.max_lists.get()),
                                },
                            });
                        }
                        continue;
                    }

                    budget -= 1;
                    visited.insert(pointer.location.clone());
                    level.push(pointer.clone());
                }
            }

            let fetched: Vec<(LotePointer, Result<ListOfTrustedEntities, Problem>)> =
                futures::stream::iter(level)
                    .map(|pointer| async move {
                        debug!(uri = %pointer.location, depth, "loading child list");
                        let result = self.fetch_one(&pointer).await;
                        (pointer, result)
                    })
                    .buffered(self.constraints.other_lote_parallelism.get())
                    .collect()
                    .await;

            let mut next_frontier = Vec::new();

            for (pointer, result) in fetched {
                match result {
                    Ok(lote) => {
                        children.push((pointer.clone(), lote.clone()));
                        next_frontier.push((pointer, lote));
                    }
                    Err(problem) => {
                        let abort = match self.continue_on_problem {
                            ContinueOnProblem::Never => true,
                            ContinueOnProblem::Always => false,
                            ContinueOnProblem::AlwaysIfDownloaded => problem.is_download_failure(),
                        };

                        if abort {
                            return Err(TraversalProblem { pointer, problem });
                        }

                        warn!(uri = %pointer.location, error = %problem, "skipping non-compliant list");
                        problems.push(TraversalProblem { pointer, problem });
                    }
                }
            }

            frontier = next_frontier;
        }

        Ok(TraversalOutcome {
            root: root_pair,
            children,
            problems,
        })
    }

    /// Fetch pipeline for a single list: load, verify signature, decode,
    /// profile-check.
    async fn fetch_one(&self, pointer: &LotePointer) -> Result<ListOfTrustedEntities, Problem> {
        let raw = match self.loader.load(&pointer.location).await? {
            LoadOutcome::Loaded(content) => content,
            LoadOutcome::NotFound => return Err(Problem::NotFound),
        };

        self.verifier
            .verify(&raw, pointer.expected_anchors.as_deref())
            .await?;

        let decoded = jwt::decode_lote(&raw)?;
        let lote = decoded.payload.list_of_trusted_entities;

        // A declared type no registered profile matches is its own problem,
        // distinct from a mismatch with the pointer expectation.
        if let Some(declared) = lote.declared_type()
            && self.registry.find(declared).is_none()
        {
            return Err(Problem::UnknownListType(declared.clone()));
        }

        let profile = self
            .registry
            .find(&pointer.expected_type)
            .ok_or_else(|| Problem::UnknownListType(pointer.expected_type.clone()))?;

        check_profile_compliance(&lote, profile)?;

        Ok(lote)
    }
}
