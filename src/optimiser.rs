use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel};
use tracing::{debug, info, warn};

use crate::error::SolveError;
use crate::model::{Nurse, Weights};
use crate::oracle::{count_blocked, is_admissible};
use crate::preprocess::PreparedPatient;
use crate::score::score;

/// Options controlling the solve behaviour.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Maximum wall-clock seconds the solver may run before returning
    /// the best incumbent found so far.
    pub time_limit_seconds: f64,
    /// Soft per-excess-patient penalty encouraging 1:3 over 1:4 ratios.
    pub excess_penalty: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            time_limit_seconds: 30.0,
            excess_penalty: 5.0,
        }
    }
}

/// One (nurse_index, patient_index) assignment extracted from the
/// solved program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub nurse_idx: usize,
    pub patient_idx: usize,
}

#[derive(Debug)]
pub struct MilpSolution {
    pub placements: Vec<Placement>,
    pub objective_value: f64,
}

struct DecisionVariables {
    x: Vec<Vec<good_lp::Variable>>,
    excess: Vec<good_lp::Variable>,
}

fn create_decision_variables(
    vars: &mut good_lp::ProblemVariables,
    nurses: &[Nurse],
    patients: &[PreparedPatient],
) -> DecisionVariables {
    let x: Vec<Vec<_>> = (0..nurses.len())
        .map(|i| {
            (0..patients.len())
                .map(|j| vars.add(variable().binary().name(format!("x_{i}_{j}"))))
                .collect()
        })
        .collect();

    let excess: Vec<_> = (0..nurses.len())
        .map(|i| vars.add(variable().min(0.0).max(4.0).name(format!("excess_{i}"))))
        .collect();

    DecisionVariables { x, excess }
}

fn admissibility_table(nurses: &[Nurse], patients: &[PreparedPatient]) -> Vec<Vec<bool>> {
    nurses
        .iter()
        .map(|n| patients.iter().map(|p| is_admissible(n, p)).collect())
        .collect()
}

fn build_objective(
    nurses: &[Nurse],
    patients: &[PreparedPatient],
    admissible: &[Vec<bool>],
    weights: Weights,
    dv: &DecisionVariables,
    options: &SolveOptions,
) -> Expression {
    let preference: Expression = nurses
        .iter()
        .enumerate()
        .flat_map(|(i, nurse)| {
            patients.iter().enumerate().filter_map(move |(j, patient)| {
                admissible[i][j].then(|| dv.x[i][j] * score(nurse, patient, weights))
            })
        })
        .sum();

    let penalty: Expression = dv.excess.iter().map(|&e| e * options.excess_penalty).sum();

    preference - penalty
}

fn add_constraints<P: SolverModel>(
    mut problem: P,
    nurses: &[Nurse],
    patients: &[PreparedPatient],
    admissible: &[Vec<bool>],
    dv: &DecisionVariables,
) -> P {
    // 1. Patient coverage: every patient covered exactly once.
    for j in 0..patients.len() {
        let total: Expression = (0..nurses.len()).map(|i| dv.x[i][j]).sum();
        problem = problem.with(constraint!(total == 1));
    }

    // 2. Nurse capacity.
    for (i, nurse) in nurses.iter().enumerate() {
        let total: Expression = (0..patients.len()).map(|j| dv.x[i][j]).sum();
        problem = problem.with(constraint!(total <= nurse.max_patients as f64));
    }

    // 3. Admissibility — fix inadmissible pairs to zero.
    for i in 0..nurses.len() {
        for j in 0..patients.len() {
            if !admissible[i][j] {
                problem = problem.with(constraint!(dv.x[i][j] == 0));
            }
        }
    }

    // 4. IV-chemo cap per certified nurse.
    for (i, nurse) in nurses.iter().enumerate() {
        if nurse.iv_cert.is_yes() {
            let iv_count: Expression = patients
                .iter()
                .enumerate()
                .filter(|(_, p)| p.patient.chemo_type.eq_ignore_ascii_case("iv"))
                .map(|(j, _)| dv.x[i][j])
                .sum();
            problem = problem.with(constraint!(iv_count <= 2));
        }
    }

    // 5. Unit cap.
    let unit_total: Expression = nurses
        .iter()
        .enumerate()
        .flat_map(|(i, _)| (0..patients.len()).map(move |j| (i, j)))
        .map(|(i, j)| dv.x[i][j])
        .sum();
    problem = problem.with(constraint!(unit_total <= 20));

    // 6. Excess auxiliary: excess_i >= count_i - 3.
    for i in 0..nurses.len() {
        let count: Expression = (0..patients.len()).map(|j| dv.x[i][j]).sum();
        problem = problem.with(constraint!(dv.excess[i] >= count - 3.0));
    }

    problem
}

fn extract_solution(
    solution: &impl Solution,
    nurses: &[Nurse],
    patients: &[PreparedPatient],
    dv: &DecisionVariables,
    objective: Expression,
) -> MilpSolution {
    let mut placements: Vec<Placement> = Vec::new();
    for (i, nurse) in nurses.iter().enumerate() {
        for (j, patient) in patients.iter().enumerate() {
            if solution.value(dv.x[i][j]) > 0.5 {
                info!(nurse = %nurse.nurse_id, patient = %patient.patient_id(), "assignment");
                placements.push(Placement {
                    nurse_idx: i,
                    patient_idx: j,
                });
            }
        }
    }
    // Tie-breaking: re-sort by (nurse_id, patient_id) so equal-objective
    // optima are reported deterministically.
    placements.sort_by(|a, b| {
        nurses[a.nurse_idx]
            .nurse_id
            .cmp(&nurses[b.nurse_idx].nurse_id)
            .then_with(|| {
                patients[a.patient_idx]
                    .patient_id()
                    .cmp(patients[b.patient_idx].patient_id())
            })
    });

    MilpSolution {
        placements,
        objective_value: solution.eval(objective.clone()),
    }
}

/// Builds and solves the 0/1 assignment program, maximising preference
/// score minus the excess-ratio penalty, subject to the constraints
/// described in spec section 4.5. Returns `Err` if HiGHS can't resolve
/// within the time limit — callers should fall back to the greedy
/// heuristic in that case.
pub fn solve(
    nurses: &[Nurse],
    patients: &[PreparedPatient],
    weights: Weights,
    options: &SolveOptions,
) -> Result<MilpSolution, SolveError> {
    info!(
        nurses = nurses.len(),
        patients = patients.len(),
        "starting MILP solve"
    );

    let admissible = admissibility_table(nurses, patients);
    debug!(
        blocked_assignments = count_blocked(nurses, patients),
        "admissibility table built"
    );

    let mut vars = variables!();
    let dv = create_decision_variables(&mut vars, nurses, patients);
    let objective = build_objective(nurses, patients, &admissible, weights, &dv, options);

    let problem = vars
        .maximise(objective.clone())
        .using(highs)
        .set_time_limit(options.time_limit_seconds);
    let problem = add_constraints(problem, nurses, patients, &admissible, &dv);

    debug!("solving MILP");
    let solution = problem.solve()?;
    info!("MILP solve complete");

    let result = extract_solution(&solution, nurses, patients, &dv, objective);
    if result.placements.len() < patients.len() {
        warn!(
            placed = result.placements.len(),
            total = patients.len(),
            "solver returned incumbent covering fewer patients than expected"
        );
    }
    Ok(result)
}
