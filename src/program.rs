//! Formulation en programme linéaire 0-1.
//!
//! Une variable binaire par couple (personne, date), indexée en ordre
//! personne-majeur : `staff_idx * |dates| + date_idx`. L'objectif est
//! maximisé ; les contraintes sont des inégalités linéaires par date.

use crate::model::{Constraints, StaffMember, WorkDate};
use std::collections::HashSet;
use tracing::warn;

/// Sens d'une inégalité linéaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    AtLeast,
    AtMost,
}

/// `sum(coeff * x[var]) (>=|<=) rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Vérifie la contrainte pour une affectation donnée.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let lhs: f64 = self
            .terms
            .iter()
            .filter(|(var, _)| values.get(*var).copied().unwrap_or(false))
            .map(|(_, coeff)| coeff)
            .sum();
        match self.relation {
            Relation::AtLeast => lhs >= self.rhs,
            Relation::AtMost => lhs <= self.rhs,
        }
    }
}

/// Programme de maximisation sur variables binaires.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinaryProgram {
    pub variables: Vec<String>,
    pub objective: Vec<f64>,
    pub constraints: Vec<LinearConstraint>,
}

impl BinaryProgram {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Valeur de l'objectif pour une affectation.
    pub fn objective_value(&self, values: &[bool]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .filter(|(_, on)| **on)
            .map(|(w, _)| w)
            .sum()
    }
}

/// Pondération d'un couple (personne, date) dans l'objectif.
pub type WeightFn = dyn Fn(&StaffMember, &WorkDate) -> f64 + Send + Sync;

/// Programme construit à partir d'une requête, avec les axes retenus
/// (doublons retirés) pour relire la solution.
#[derive(Debug, Clone)]
pub struct Formulation {
    pub program: BinaryProgram,
    pub staff: Vec<StaffMember>,
    pub dates: Vec<WorkDate>,
}

impl Formulation {
    pub fn build(
        staff: &[StaffMember],
        dates: &[WorkDate],
        constraints: Constraints,
        weight: &WeightFn,
    ) -> Self {
        let staff = dedup_staff(staff);
        let dates = dedup_dates(dates);

        let mut program = BinaryProgram::default();
        for member in &staff {
            for date in &dates {
                program.variables.push(format!("x_{}_{}", member.id, date));
                program.objective.push(weight(member, date));
            }
        }

        let per_date = |date_idx: usize| -> Vec<(usize, f64)> {
            (0..staff.len())
                .map(|staff_idx| (staff_idx * dates.len() + date_idx, 1.0))
                .collect()
        };

        for (date_idx, date) in dates.iter().enumerate() {
            program.constraints.push(LinearConstraint {
                name: format!("MinStaff_{date}"),
                terms: per_date(date_idx),
                relation: Relation::AtLeast,
                rhs: f64::from(constraints.min_staff_per_day),
            });
        }
        for (date_idx, date) in dates.iter().enumerate() {
            program.constraints.push(LinearConstraint {
                name: format!("MaxStaff_{date}"),
                terms: per_date(date_idx),
                relation: Relation::AtMost,
                rhs: f64::from(constraints.max_staff_per_day),
            });
        }

        Self {
            program,
            staff,
            dates,
        }
    }

    pub fn variable_index(&self, staff_idx: usize, date_idx: usize) -> usize {
        staff_idx * self.dates.len() + date_idx
    }
}

fn dedup_staff(staff: &[StaffMember]) -> Vec<StaffMember> {
    let mut seen = HashSet::new();
    staff
        .iter()
        .filter(|m| {
            let fresh = seen.insert(&m.id);
            if !fresh {
                warn!(staff_id = %m.id, "duplicate staff id ignored");
            }
            fresh
        })
        .cloned()
        .collect()
}

fn dedup_dates(dates: &[WorkDate]) -> Vec<WorkDate> {
    let mut seen = HashSet::new();
    dates
        .iter()
        .filter(|d| {
            let fresh = seen.insert(*d);
            if !fresh {
                warn!(date = %d, "duplicate date ignored");
            }
            fresh
        })
        .cloned()
        .collect()
}
