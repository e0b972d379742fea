use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::assembler::{self, Assignment, AssignmentResult};
use crate::fallback;
use crate::model::OptimizeRequest;
use crate::optimiser::{self, SolveOptions};
use crate::oracle;
use crate::preprocess;

/// Terminal outcome of a request, per spec section 4's state machine:
/// `Validate -> Preprocess -> Build -> Solve -> (Extract | Fallback) -> Assemble`.
pub enum Outcome {
    ValidationError(Vec<String>),
    Success(AssignmentResult),
    NoFeasibleSolution,
}

/// Runs one request through the full pipeline. Never panics on bad
/// input — validation failures and solver infeasibility are both
/// ordinary, non-exceptional outcomes.
#[instrument(skip_all, fields(nurses = request.nurses.len(), patients = request.patients.len()))]
pub fn run(request: &OptimizeRequest, time_limit_secs: f64) -> Outcome {
    let violations = crate::validator::validate(&request.nurses, &request.patients);
    if !violations.is_empty() {
        warn!(count = violations.len(), "validation failed");
        return Outcome::ValidationError(violations);
    }

    let prepared = preprocess::prepare(&request.patients);
    let weights = request.config;

    let options = SolveOptions {
        time_limit_seconds: time_limit_secs,
        ..SolveOptions::default()
    };

    // Computed once so the stat is reported the same regardless of
    // which path (MILP or greedy fallback) ultimately produces the
    // solution — see spec section 4.7.
    let blocked_assignments = oracle::count_blocked(&request.nurses, &prepared);

    let start = Instant::now();
    let milp_result = optimiser::solve(&request.nurses, &prepared, weights, &options);

    let (nurse_idx_for, unassigned_patients, fallback_used, objective_value) = match milp_result {
        Ok(solution) => {
            info!("MILP solve succeeded");
            let covered: std::collections::HashSet<usize> =
                solution.placements.iter().map(|p| p.patient_idx).collect();
            let unassigned = prepared.len() - covered.len();
            (
                solution
                    .placements
                    .iter()
                    .map(|p| (p.patient_idx, p.nurse_idx))
                    .collect::<std::collections::HashMap<usize, usize>>(),
                unassigned,
                false,
                solution.objective_value,
            )
        }
        Err(err) => {
            warn!(error = %err, "MILP solve failed, engaging greedy fallback");
            let greedy = fallback::solve_greedy(&request.nurses, &prepared, weights);
            (
                greedy
                    .placements
                    .iter()
                    .map(|p| (p.patient_idx, p.nurse_idx))
                    .collect::<std::collections::HashMap<usize, usize>>(),
                greedy.unassigned_patients,
                true,
                0.0,
            )
        }
    };

    let solution_time_ms = start.elapsed().as_millis() as u64;

    if nurse_idx_for.is_empty() && !prepared.is_empty() {
        return Outcome::NoFeasibleSolution;
    }

    let assignments: Vec<Assignment<'_>> = nurse_idx_for
        .iter()
        .map(|(&patient_idx, &nurse_idx)| Assignment {
            nurse: &request.nurses[nurse_idx],
            patient: &prepared[patient_idx],
        })
        .collect();

    let meta = assembler::AssemblyMeta {
        fallback: fallback_used,
        blocked_assignments,
        objective_value,
        solution_time_ms,
    };

    let result = assembler::assemble(&assignments, &request.nurses, unassigned_patients, meta);
    Outcome::Success(result)
}
