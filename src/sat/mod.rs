#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
/// Prefix assignments, the search nodes.
pub mod assignment;
pub mod bfs;
/// Three-literal clauses.
pub mod clause;
pub mod cnf;
pub mod csv;
pub mod generator;
/// Signed literals over 1-based variables.
pub mod literal;
pub mod oracle;
/// The `Solver` trait and the types a search reports.
pub mod solver;
