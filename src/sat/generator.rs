//! Uniform random 3-SAT instances.
//!
//! Each clause draws three distinct variables from `1..=num_vars` and gives
//! each a random polarity. With a seed the output is reproducible, which the
//! benchmarks rely on.

use crate::error::{Error, Result};
use crate::sat::clause::{CLAUSE_WIDTH, Clause};
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use fastrand::Rng;

/// Size and seed of a random instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Variables to draw from; at least three.
    pub num_vars: usize,
    /// Clauses to emit; at least one.
    pub num_clauses: usize,
    /// Fixed seed, or `None` for a fresh one each run.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// An unseeded configuration.
    #[must_use]
    pub const fn new(num_vars: usize, num_clauses: usize) -> Self {
        Self {
            num_vars,
            num_clauses,
            seed: None,
        }
    }

    /// Makes the output reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generates a random formula.
///
/// The formula's `num_vars` is the highest variable actually drawn, which can
/// be below the requested count for very small clause counts.
///
/// # Errors
///
/// [`Error::InvalidGeneratorParameters`] if fewer than three variables or no
/// clauses are requested, or the variable count does not fit a literal.
pub fn generate(config: &GeneratorConfig) -> Result<Cnf> {
    if config.num_vars < CLAUSE_WIDTH {
        return Err(Error::InvalidGeneratorParameters(format!(
            "need at least {CLAUSE_WIDTH} variables, got {}",
            config.num_vars
        )));
    }
    if config.num_clauses == 0 {
        return Err(Error::InvalidGeneratorParameters(
            "need at least one clause".to_string(),
        ));
    }
    if i32::try_from(config.num_vars).is_err() {
        return Err(Error::InvalidGeneratorParameters(format!(
            "{} variables do not fit a 32-bit literal",
            config.num_vars
        )));
    }

    let mut rng = config.seed.map_or_else(Rng::new, Rng::with_seed);
    let clauses = (0..config.num_clauses)
        .map(|_| random_clause(&mut rng, config.num_vars))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::InvalidGeneratorParameters("literal out of range".to_string()))?;

    Ok(Cnf::new(clauses))
}

fn random_clause(rng: &mut Rng, num_vars: usize) -> Option<Clause> {
    let mut vars = [0; CLAUSE_WIDTH];
    let mut picked = 0;
    while picked < CLAUSE_WIDTH {
        let var = rng.usize(1..=num_vars);
        if !vars[..picked].contains(&var) {
            vars[picked] = var;
            picked += 1;
        }
    }

    let [a, b, c] = vars;
    Some(Clause::new([
        Literal::new(a, rng.bool())?,
        Literal::new(b, rng.bool())?,
        Literal::new(c, rng.bool())?,
    ]))
}
