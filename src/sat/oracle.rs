//! Feasibility checks applied to every search node.
//!
//! [`is_promising`] prunes prefixes that can no longer lead to a model;
//! [`is_solution`] is the authoritative check for complete assignments.

use crate::sat::assignment::PartialAssignment;
use crate::sat::cnf::Cnf;

/// Whether some completion of `assignment` could still satisfy `cnf`.
///
/// A node is rejected only when a clause is fully decided (all three
/// variables assigned) and none of its literals holds. Every other clause is
/// either satisfied or still has an undecided literal, so this check never
/// cuts off a prefix of a real model. It may let through nodes whose every
/// completion fails; those die further down the tree.
#[must_use]
pub fn is_promising(cnf: &Cnf, assignment: &PartialAssignment) -> bool {
    let assigned = assignment.len();

    cnf.iter()
        .all(|clause| clause.is_satisfied_by(assignment) || !clause.is_decided(assigned))
}

/// Whether `assignment` is complete over `num_vars` variables and satisfies
/// every clause.
#[must_use]
pub fn is_solution(cnf: &Cnf, assignment: &PartialAssignment, num_vars: usize) -> bool {
    if !assignment.is_complete(num_vars) {
        return false;
    }

    cnf.iter().all(|clause| clause.is_satisfied_by(assignment))
}
