mod types;

pub use types::{OptimizeError, Outcome, NO_SOLUTION_MESSAGE};

use crate::model::{Constraints, Request, Shift, ShiftTimes, StaffMember, WorkDate};
use crate::program::{Formulation, WeightFn};
use crate::solver::{BinarySolver, GoodLpSolver, SolveStatus, SolverError, SolverOutcome};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Optimiseur de shifts : construit le programme 0-1, le résout une fois
/// et relit l'affectation. Aucun état n'est conservé entre deux appels.
pub struct Optimizer {
    solver: Box<dyn BinarySolver + Send + Sync>,
    weight: Arc<WeightFn>,
    times: ShiftTimes,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            solver: Box::new(GoodLpSolver::new()),
            weight: Arc::new(unit_weight),
            times: ShiftTimes::default(),
        }
    }
}

fn unit_weight(_: &StaffMember, _: &WorkDate) -> f64 {
    1.0
}

impl fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optimizer")
            .field("times", &self.times)
            .finish_non_exhaustive()
    }
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poids d'un couple (personne, date) dans l'objectif (1 par défaut).
    pub fn with_weight<F>(mut self, weight: F) -> Self
    where
        F: Fn(&StaffMember, &WorkDate) -> f64 + Send + Sync + 'static,
    {
        self.weight = Arc::new(weight);
        self
    }

    /// Pondère par le champ `priority` de chaque personne (1 si absent).
    pub fn with_priority_weights(self) -> Self {
        self.with_weight(|member, _| member.priority.unwrap_or(1.0))
    }

    pub fn with_shift_times(mut self, times: ShiftTimes) -> Self {
        self.times = times;
        self
    }

    pub fn with_solver<S>(mut self, solver: S) -> Self
    where
        S: BinarySolver + Send + Sync + 'static,
    {
        self.solver = Box::new(solver);
        self
    }

    pub fn shift_times(&self) -> ShiftTimes {
        self.times
    }

    /// Une panique (poids utilisateur, backend) devient `OptimizeError::Panicked`.
    pub fn optimize(&self, request: &Request) -> Result<Outcome, OptimizeError> {
        catch_unwind(AssertUnwindSafe(|| self.run(request))).map_err(|_| OptimizeError::Panicked)?
    }

    fn run(&self, request: &Request) -> Result<Outcome, OptimizeError> {
        let formulation = Formulation::build(
            &request.staff,
            &request.dates,
            request.constraints,
            self.weight.as_ref(),
        );
        debug!(
            staff = formulation.staff.len(),
            dates = formulation.dates.len(),
            variables = formulation.program.num_variables(),
            constraints = formulation.program.constraints.len(),
            "model built"
        );

        let (values, objective) = match self.solver.solve(&formulation.program)? {
            SolverOutcome::Optimal { values, objective } => (values, objective),
            SolverOutcome::NotOptimal(status) => {
                warn!(%status, "no optimal assignment");
                return Ok(Outcome::Failure {
                    error: NO_SOLUTION_MESSAGE.to_string(),
                    status: Some(status),
                });
            }
        };

        if values.len() != formulation.program.num_variables() {
            return Err(SolverError::Backend(format!(
                "solver returned {} values for {} variables",
                values.len(),
                formulation.program.num_variables()
            ))
            .into());
        }

        let shifts = extract_shifts(&formulation, &values, self.times);
        info!(shifts = shifts.len(), objective, "optimal assignment found");
        Ok(Outcome::Success {
            shifts,
            status: SolveStatus::Optimal,
            objective_value: objective,
        })
    }
}

/// Ordre d'émission : personne-majeur, date-mineur.
fn extract_shifts(formulation: &Formulation, values: &[bool], times: ShiftTimes) -> Vec<Shift> {
    let mut out = Vec::new();
    for (staff_idx, member) in formulation.staff.iter().enumerate() {
        for (date_idx, date) in formulation.dates.iter().enumerate() {
            if values[formulation.variable_index(staff_idx, date_idx)] {
                out.push(Shift::new(member.id.clone(), date.clone(), times));
            }
        }
    }
    out
}

/// Optimise avec le backend et les réglages par défaut.
pub fn optimize(
    staff: &[StaffMember],
    dates: &[WorkDate],
    constraints: Constraints,
) -> Result<Outcome, OptimizeError> {
    let request = Request {
        staff: staff.to_vec(),
        dates: dates.to_vec(),
        constraints,
    };
    Optimizer::new().optimize(&request)
}
