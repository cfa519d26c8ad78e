use crate::model::Shift;
use crate::solver::{SolveStatus, SolverError};
use thiserror::Error;

/// Message renvoyé quand aucune affectation optimale n'existe.
pub const NO_SOLUTION_MESSAGE: &str =
    "no shift satisfying the constraints could be found; reconsider min/max staffing bounds";

/// Issue d'une optimisation : succès ou échec logique (pas une erreur).
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        shifts: Vec<Shift>,
        status: SolveStatus,
        objective_value: f64,
    },
    Failure {
        error: String,
        status: Option<SolveStatus>,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn status(&self) -> Option<SolveStatus> {
        match self {
            Self::Success { status, .. } => Some(*status),
            Self::Failure { status, .. } => *status,
        }
    }

    /// Shifts émis ; vide en cas d'échec.
    pub fn shifts(&self) -> &[Shift] {
        match self {
            Self::Success { shifts, .. } => shifts,
            Self::Failure { .. } => &[],
        }
    }
}

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("optimization panicked")]
    Panicked,
}
