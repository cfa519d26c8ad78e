#![forbid(unsafe_code)]
//! Shift Optimizer — affectation de personnel à des dates sous bornes
//! d'effectif journalières.
//!
//! - Une variable binaire par couple (personne, date).
//! - Objectif : couverture pondérée maximale (poids 1 par défaut).
//! - Résolution déléguée à un [`BinarySolver`] ; `good_lp` par défaut.
//! - Infaisabilité = issue attendue ([`Outcome::Failure`]), pas une erreur.

pub mod io;
pub mod model;
pub mod optimizer;
pub mod program;
pub mod solver;

pub use io::{read_request, write_response, InputError, Response};
pub use model::{Constraints, Request, Shift, ShiftTimes, StaffId, StaffMember, WorkDate};
pub use optimizer::{optimize, OptimizeError, Optimizer, Outcome, NO_SOLUTION_MESSAGE};
pub use program::{BinaryProgram, Formulation, LinearConstraint, Relation};
pub use solver::{BinarySolver, GoodLpSolver, SolveStatus, SolverError, SolverOutcome};
