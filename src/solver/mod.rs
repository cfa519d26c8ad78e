//! Capacité de résolution : programme 0-1 → affectation optimale ou statut.
//!
//! Le cœur ne dépend que du trait [`BinarySolver`] ; [`GoodLpSolver`] est le
//! backend par défaut (`good_lp` + `microlp`, pur Rust).

mod backend;
mod types;

pub use backend::GoodLpSolver;
pub use types::{BinarySolver, SolveStatus, SolverError, SolverOutcome};
