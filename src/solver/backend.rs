use super::types::{BinarySolver, SolveStatus, SolverError, SolverOutcome};
use crate::program::{BinaryProgram, Relation};
use good_lp::{
    default_solver, variable, variables, Expression, ResolutionError, Solution, SolverModel,
    Variable,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, trace};

/// Backend `good_lp` (feature `microlp`, branch-and-bound pur Rust).
#[derive(Debug, Default, Clone, Copy)]
pub struct GoodLpSolver;

impl GoodLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl BinarySolver for GoodLpSolver {
    fn solve(&self, program: &BinaryProgram) -> Result<SolverOutcome, SolverError> {
        check_program(program)?;

        // Contraintes sans variable : constantes, tranchées sans le backend.
        if program
            .constraints
            .iter()
            .any(|c| c.terms.is_empty() && !c.is_satisfied_by(&[]))
        {
            debug!("constant constraint violated");
            return Ok(SolverOutcome::NotOptimal(SolveStatus::Infeasible));
        }
        if program.num_variables() == 0 {
            return Ok(SolverOutcome::Optimal {
                values: Vec::new(),
                objective: 0.0,
            });
        }

        catch_unwind(AssertUnwindSafe(|| run(program))).map_err(|_| SolverError::Panicked)?
    }
}

fn check_program(program: &BinaryProgram) -> Result<(), SolverError> {
    let n = program.num_variables();
    if program.objective.len() != n {
        return Err(SolverError::MalformedProgram(format!(
            "objective has {} coefficients for {n} variables",
            program.objective.len()
        )));
    }
    if let Some(c) = program
        .constraints
        .iter()
        .find(|c| c.terms.iter().any(|(var, _)| *var >= n))
    {
        return Err(SolverError::MalformedProgram(format!(
            "constraint {} references an unknown variable",
            c.name
        )));
    }
    Ok(())
}

fn run(program: &BinaryProgram) -> Result<SolverOutcome, SolverError> {
    let mut vars = variables!();
    let xs: Vec<Variable> = program
        .variables
        .iter()
        .map(|name| vars.add(variable().binary().name(name.clone())))
        .collect();

    let objective = xs
        .iter()
        .zip(&program.objective)
        .fold(Expression::from(0.0), |acc, (x, w)| acc + *w * *x);

    let mut problem = vars.maximise(objective).using(default_solver);

    for c in program.constraints.iter().filter(|c| !c.terms.is_empty()) {
        let lhs = c
            .terms
            .iter()
            .fold(Expression::from(0.0), |acc, &(var, coeff)| acc + coeff * xs[var]);
        let constraint = match c.relation {
            Relation::AtLeast => lhs.geq(c.rhs),
            Relation::AtMost => lhs.leq(c.rhs),
        };
        trace!(name = %c.name, "constraint added");
        problem = problem.with(constraint);
    }

    match problem.solve() {
        Ok(solution) => {
            // Domaine binaire : arrondi avant le test d'égalité à 1.
            let values: Vec<bool> = xs
                .iter()
                .map(|x| solution.value(*x).round() == 1.0)
                .collect();
            let objective = program.objective_value(&values);
            Ok(SolverOutcome::Optimal { values, objective })
        }
        Err(ResolutionError::Infeasible) => Ok(SolverOutcome::NotOptimal(SolveStatus::Infeasible)),
        Err(ResolutionError::Unbounded) => Ok(SolverOutcome::NotOptimal(SolveStatus::Unbounded)),
        Err(other) => Err(SolverError::Backend(other.to_string())),
    }
}
