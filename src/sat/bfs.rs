//! Breadth-first enumeration of partial assignments.
//!
//! The search walks the complete binary decision tree over variables
//! `1..=num_vars` in level order. Each node is a [`PartialAssignment`]; its
//! children append `false` and then `true` for the next variable. Nodes are
//! checked by [`is_promising`] when they leave the frontier, and the first
//! complete node accepted by [`is_solution`] ends the search.
//!
//! Because pruning is sound and the false branch is always queued first, the
//! returned model is the lexicographically smallest one (variable 1 most
//! significant, `0 < 1`).
//!
//! There is no backtracking and no shared state: the frontier owns every node
//! and a node is dropped as soon as it has been expanded.

use crate::sat::assignment::PartialAssignment;
use crate::sat::cnf::Cnf;
use crate::sat::oracle::{is_promising, is_solution};
use crate::sat::solver::{SearchConfig, SearchOutcome, SearchStats, Solver};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// A breadth-first solver bound to one formula.
#[derive(Debug, Clone)]
pub struct BfsSolver {
    /// The formula being searched.
    pub cnf: Cnf,
    /// Budget for each call to `solve`.
    pub config: SearchConfig,
    stats: SearchStats,
}

impl Solver for BfsSolver {
    fn new(cnf: Cnf, config: SearchConfig) -> Self {
        Self {
            cnf,
            config,
            stats: SearchStats::default(),
        }
    }

    /// Runs the search from the empty assignment.
    ///
    /// Calling it again starts over with fresh statistics and yields the same
    /// outcome: the traversal order is fixed.
    fn solve(&mut self) -> SearchOutcome {
        self.stats = SearchStats::default();

        let num_vars = self.cnf.num_vars;
        let mut frontier = VecDeque::from([PartialAssignment::new()]);
        self.stats.max_frontier = frontier.len();

        debug!(
            num_vars,
            clauses = self.cnf.len(),
            max_nodes = ?self.config.max_nodes,
            "starting breadth-first search"
        );

        while let Some(node) = frontier.pop_front() {
            if self.budget_spent() {
                debug!(expanded = self.stats.expanded, "node budget exhausted");
                return SearchOutcome::BudgetExceeded;
            }

            self.stats.expanded += 1;
            self.stats.max_depth = self.stats.max_depth.max(node.len());

            if !is_promising(&self.cnf, &node) {
                self.stats.pruned += 1;
                trace!(depth = node.len(), "pruned");
                continue;
            }

            if node.is_complete(num_vars) {
                if is_solution(&self.cnf, &node, num_vars) {
                    debug!(expanded = self.stats.expanded, "solution found");
                    return SearchOutcome::Satisfiable(node);
                }
                continue;
            }

            frontier.push_back(node.extended(false));
            frontier.push_back(node.extended(true));
            self.stats.max_frontier = self.stats.max_frontier.max(frontier.len());
        }

        debug!(expanded = self.stats.expanded, "frontier exhausted");
        SearchOutcome::Unsatisfiable
    }

    fn stats(&self) -> SearchStats {
        self.stats
    }
}

impl BfsSolver {
    fn budget_spent(&self) -> bool {
        self.config
            .max_nodes
            .is_some_and(|max| self.stats.expanded >= max)
    }
}

/// Searches `cnf` once and returns the outcome with its statistics.
#[must_use]
pub fn search(cnf: Cnf, config: SearchConfig) -> (SearchOutcome, SearchStats) {
    let mut solver = BfsSolver::new(cnf, config);
    let outcome = solver.solve();
    (outcome, solver.stats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cnf(clauses: &[[i32; 3]]) -> Cnf {
        Cnf::from_i32s(clauses).unwrap()
    }

    fn model(outcome: &SearchOutcome) -> String {
        outcome.solution().map(ToString::to_string).unwrap()
    }

    #[test]
    fn test_empty_formula_is_solved_at_root() {
        let (outcome, stats) = search(Cnf::new([]), SearchConfig::unbounded());

        assert_eq!(outcome, SearchOutcome::Satisfiable(PartialAssignment::new()));
        assert_eq!(stats.expanded, 1);
        assert_eq!(stats.pruned, 0);
    }

    #[test]
    fn test_single_clause() {
        let formula = cnf(&[[1, 2, 3]]);
        let (outcome, stats) = search(formula.clone(), SearchConfig::unbounded());

        // 1 root + 2 + 4 on the inner levels, then 000 (pruned) and 001.
        assert_eq!(model(&outcome), "0 0 1");
        assert_eq!(stats.expanded, 9);
        assert_eq!(stats.pruned, 1);
        assert!(formula.verify(outcome.solution().unwrap()));
    }

    #[test]
    fn test_mixed_polarity_clauses() {
        let formula = cnf(&[[1, 2, 3], [-1, -2, -3]]);
        let (outcome, stats) = search(formula.clone(), SearchConfig::unbounded());

        assert_eq!(model(&outcome), "0 0 1");
        assert_eq!(stats.expanded, 9);
        assert!(formula.verify(outcome.solution().unwrap()));
    }

    #[test]
    fn test_contradiction_explores_whole_pruned_tree() {
        let (outcome, stats) = search(
            cnf(&[[1, 1, 1], [-1, -1, -1], [1, 1, 1]]),
            SearchConfig::unbounded(),
        );

        assert_eq!(outcome, SearchOutcome::Unsatisfiable);
        assert_eq!(stats.expanded, 3);
        assert_eq!(stats.pruned, 2);
    }

    #[test]
    fn test_unsat_over_three_variables() {
        // Every one of the eight assignments falsifies exactly one clause.
        let formula = cnf(&[
            [1, 2, 3],
            [1, 2, -3],
            [1, -2, 3],
            [1, -2, -3],
            [-1, 2, 3],
            [-1, 2, -3],
            [-1, -2, 3],
            [-1, -2, -3],
        ]);
        let (outcome, stats) = search(formula, SearchConfig::unbounded());

        assert_eq!(outcome, SearchOutcome::Unsatisfiable);
        assert_eq!(stats.expanded, 15);
        assert_eq!(stats.pruned, 8);
        assert_eq!(stats.max_frontier, 8);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_pruning_cuts_subtrees_early() {
        // x1 must be true; the whole x1 = false half dies at depth 1.
        let formula = cnf(&[[1, 1, 1], [2, 3, 3]]);
        let (outcome, stats) = search(formula, SearchConfig::unbounded());

        // root, [0] pruned, [1], [1,0], [1,1], [1,0,0] pruned, [1,0,1].
        assert_eq!(model(&outcome), "1 0 1");
        assert_eq!(stats.expanded, 7);
        assert_eq!(stats.pruned, 2);
    }

    #[test]
    fn test_unreferenced_low_variables_are_still_branched() {
        let formula = cnf(&[[3, 3, 3]]);
        let (outcome, _) = search(formula, SearchConfig::unbounded());
        assert_eq!(model(&outcome), "0 0 1");
    }

    #[test]
    fn test_budget_exceeded() {
        let formula = cnf(&[[1, 2, 3]]);
        let (outcome, stats) = search(formula, SearchConfig::with_max_nodes(8));

        assert_eq!(outcome, SearchOutcome::BudgetExceeded);
        assert_eq!(stats.expanded, 8);
    }

    #[test]
    fn test_budget_large_enough_changes_nothing() {
        let formula = cnf(&[[1, 2, 3]]);
        let (bounded, bounded_stats) = search(formula.clone(), SearchConfig::with_max_nodes(9));
        let (unbounded, unbounded_stats) = search(formula, SearchConfig::unbounded());

        assert_eq!(bounded, unbounded);
        assert_eq!(bounded_stats, unbounded_stats);
    }

    #[test]
    fn test_exhaustion_within_budget_is_unsat() {
        let formula = cnf(&[[1, 1, 1], [-1, -1, -1]]);
        let (outcome, stats) = search(formula, SearchConfig::with_max_nodes(3));

        assert_eq!(outcome, SearchOutcome::Unsatisfiable);
        assert_eq!(stats.expanded, 3);
    }

    #[test]
    fn test_solve_is_repeatable() {
        let formula = cnf(&[[1, -2, 3], [-1, 2, -4], [2, 3, 4], [-3, -4, 1]]);
        let mut solver = BfsSolver::new(formula, SearchConfig::unbounded());

        let first = solver.solve();
        let first_stats = solver.stats();
        let second = solver.solve();

        assert_eq!(first, second);
        assert_eq!(first_stats, solver.stats());
    }

    fn small_cnf() -> impl Strategy<Value = Cnf> {
        let literal = (1_i32..=5, any::<bool>()).prop_map(|(v, pos)| if pos { v } else { -v });
        prop::collection::vec([literal.clone(), literal.clone(), literal], 0..12)
            .prop_map(|clauses| Cnf::from_i32s(&clauses).unwrap())
    }

    /// The lexicographically smallest model, by brute force.
    fn first_model(cnf: &Cnf) -> Option<PartialAssignment> {
        let n = cnf.num_vars;
        (0_u32..1 << n)
            .map(|mask| (0..n).map(|i| mask >> (n - 1 - i) & 1 == 1).collect())
            .find(|a| cnf.verify(a))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_bfs_finds_lexicographically_first_model(cnf in small_cnf()) {
            let expected = first_model(&cnf);
            let (outcome, stats) = search(cnf.clone(), SearchConfig::unbounded());

            match expected {
                Some(model) => prop_assert_eq!(outcome, SearchOutcome::Satisfiable(model)),
                None => prop_assert_eq!(outcome, SearchOutcome::Unsatisfiable),
            }
            prop_assert!(stats.expanded < 1 << (cnf.num_vars + 1));
        }
    }
}
