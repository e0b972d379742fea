use tracing::{info, warn};

use crate::model::{Nurse, Weights};
use crate::oracle::is_admissible;
use crate::preprocess::PreparedPatient;
use crate::score::score;

/// One (nurse_index, patient_index) pair placed by the greedy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub nurse_idx: usize,
    pub patient_idx: usize,
}

pub struct GreedyResult {
    pub placements: Vec<Placement>,
    pub unassigned_patients: usize,
}

/// Deterministic single-pass heuristic used when the MILP solver
/// returns neither optimal nor feasible. Reuses `is_admissible` and
/// `score` exactly as the MILP path does, so no business rule is
/// duplicated between the two.
pub fn solve_greedy(
    nurses: &[Nurse],
    patients: &[PreparedPatient],
    weights: Weights,
) -> GreedyResult {
    warn!("engaging greedy fallback");

    let mut order: Vec<usize> = (0..patients.len()).collect();
    order.sort_by(|&a, &b| patients[b].final_acuity.cmp(&patients[a].final_acuity));

    let mut counts = vec![0u8; nurses.len()];
    let mut iv_counts = vec![0u8; nurses.len()];
    let mut acuity_load = vec![0u32; nurses.len()];
    let mut placements: Vec<Placement> = Vec::new();
    let mut unassigned = 0usize;

    for &j in &order {
        let patient = &patients[j];
        let is_iv = patient.patient.chemo_type.eq_ignore_ascii_case("iv");

        let best = nurses
            .iter()
            .enumerate()
            .filter(|(i, nurse)| {
                is_admissible(nurse, patient)
                    && counts[*i] < nurse.max_patients
                    && !(is_iv && nurse.iv_cert.is_yes() && iv_counts[*i] >= 2)
            })
            .map(|(i, nurse)| {
                let candidate_score =
                    score(nurse, patient, weights) - 0.3 * acuity_load[i] as f64;
                (i, candidate_score)
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        match best {
            Some((i, _)) => {
                counts[i] += 1;
                if is_iv {
                    iv_counts[i] += 1;
                }
                acuity_load[i] += patient.final_acuity as u32;
                placements.push(Placement {
                    nurse_idx: i,
                    patient_idx: j,
                });
            }
            None => unassigned += 1,
        }
    }

    // Tie-breaking, matching the MILP path: re-sort by (nurse_id, patient_id).
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

    info!(
        placed = placements.len(),
        unassigned, "greedy fallback complete"
    );

    GreedyResult {
        placements,
        unassigned_patients: unassigned,
    }
}
