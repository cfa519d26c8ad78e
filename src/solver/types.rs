use crate::program::BinaryProgram;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Statut rapporté par le solveur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    Optimal,
    #[serde(rename = "Not Solved")]
    NotSolved,
    Infeasible,
    Unbounded,
    Undefined,
}

impl SolveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::NotSolved => "Not Solved",
            Self::Infeasible => "Infeasible",
            Self::Unbounded => "Unbounded",
            Self::Undefined => "Undefined",
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Résultat d'une résolution.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverOutcome {
    /// `values[i]` vaut `true` si la variable `i` est à 1.
    Optimal { values: Vec<bool>, objective: f64 },
    NotOptimal(SolveStatus),
}

impl SolverOutcome {
    pub fn status(&self) -> SolveStatus {
        match self {
            Self::Optimal { .. } => SolveStatus::Optimal,
            Self::NotOptimal(status) => *status,
        }
    }
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("malformed program: {0}")]
    MalformedProgram(String),
    #[error("solver backend failed: {0}")]
    Backend(String),
    #[error("solver backend panicked")]
    Panicked,
}

/// Tout backend capable de maximiser un objectif linéaire sur variables
/// binaires sous contraintes d'inégalité linéaires.
pub trait BinarySolver {
    fn solve(&self, program: &BinaryProgram) -> Result<SolverOutcome, SolverError>;
}

impl<S: BinarySolver + ?Sized> BinarySolver for Box<S> {
    fn solve(&self, program: &BinaryProgram) -> Result<SolverOutcome, SolverError> {
        (**self).solve(program)
    }
}
