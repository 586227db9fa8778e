use crate::sat::assignment::PartialAssignment;
use crate::sat::cnf::Cnf;
use core::fmt;

/// Knobs for a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchConfig {
    /// Stop after this many expanded nodes. `None` searches until the
    /// frontier is exhausted, however large it grows.
    pub max_nodes: Option<usize>,
}

impl SearchConfig {
    /// No node budget.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_nodes: None }
    }

    /// Give up after `max_nodes` expanded nodes.
    #[must_use]
    pub const fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The first complete satisfying assignment in breadth-first order.
    Satisfiable(PartialAssignment),
    /// The frontier ran dry: no assignment satisfies the formula.
    Unsatisfiable,
    /// The node budget ran out before either of the above was established.
    BudgetExceeded,
}

impl SearchOutcome {
    /// The model, if one was found.
    #[must_use]
    pub const fn solution(&self) -> Option<&PartialAssignment> {
        match self {
            Self::Satisfiable(assignment) => Some(assignment),
            _ => None,
        }
    }

    /// A model was found.
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Satisfiable(_))
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfiable(_) => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::BudgetExceeded => write!(f, "UNKNOWN"),
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Nodes taken off the frontier, pruned or not.
    pub expanded: usize,
    /// Nodes discarded by the pruning check.
    pub pruned: usize,
    /// Largest number of nodes waiting in the frontier at once.
    pub max_frontier: usize,
    /// Length of the longest assignment taken off the frontier.
    pub max_depth: usize,
}

/// A search over one formula.
pub trait Solver {
    /// Binds a solver to `cnf`. No work happens until [`Solver::solve`].
    fn new(cnf: Cnf, config: SearchConfig) -> Self;
    /// Runs the search to completion or until the budget runs out.
    fn solve(&mut self) -> SearchOutcome;
    /// Counters from the last call to [`Solver::solve`].
    fn stats(&self) -> SearchStats;
}
