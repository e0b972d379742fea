use chrono::Utc;
use serde::Serialize;

use crate::model::Nurse;
use crate::oracle::is_admissible;
use crate::preprocess::PreparedPatient;

/// One nurse's assigned patients plus rollup stats, per spec section 4.7.
#[derive(Debug, Clone, Serialize)]
pub struct NurseAssignment {
    pub nurse_id: String,
    pub name: String,
    pub patients: Vec<String>,
    pub patient_count: usize,
    pub total_acuity: u32,
    pub iv_chemo_count: usize,
    pub vesicant_count: usize,
    pub continuity_count: usize,
    pub new_admit_count: usize,
    pub ratio_status: RatioStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioStatus {
    Ideal,
    Maximum,
}

/// Unit-wide stats computed across all nurse rollups, per spec section 4.7.
#[derive(Debug, Clone, Serialize)]
pub struct UnitStats {
    pub total_patients: usize,
    pub nurses_used: usize,
    pub unit_capacity_used: String,
    pub unit_capacity_percentage: f64,
    pub workload_variance: i64,
    pub average_acuity: f64,
    pub ideal_ratios: usize,
    pub max_ratios: usize,
    pub continuity_preserved: usize,
    pub blocked_assignments: usize,
    pub objective_value: f64,
    pub solution_time_ms: u64,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentResult {
    pub success: bool,
    pub fallback: bool,
    pub assignments: Vec<NurseAssignment>,
    pub unassigned_patients: usize,
    pub stats: UnitStats,
}

/// Metadata the solver driver collects alongside the raw placements,
/// needed to populate the unit-wide stats.
#[derive(Debug, Clone, Copy)]
pub struct AssemblyMeta {
    pub fallback: bool,
    pub blocked_assignments: usize,
    pub objective_value: f64,
    pub solution_time_ms: u64,
}

/// One resolved (nurse, patient) pair, independent of whether it came
/// from the MILP extraction or the greedy fallback.
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    pub nurse: &'a Nurse,
    pub patient: &'a PreparedPatient,
}

pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn ratio_status(patient_count: usize) -> RatioStatus {
    if patient_count >= 4 {
        RatioStatus::Maximum
    } else {
        RatioStatus::Ideal
    }
}

/// Groups assignments by nurse, computes per-nurse rollups and
/// unit-wide stats, per spec section 4.7. Nurses with zero assigned
/// patients are omitted from `assignments`.
pub fn assemble(
    assignments: &[Assignment<'_>],
    nurses: &[Nurse],
    unassigned_patients: usize,
    meta: AssemblyMeta,
) -> AssignmentResult {
    let mut rollups: Vec<NurseAssignment> = Vec::new();

    for nurse in nurses {
        let for_nurse: Vec<&Assignment<'_>> = assignments
            .iter()
            .filter(|a| a.nurse.nurse_id == nurse.nurse_id)
            .collect();
        if for_nurse.is_empty() {
            continue;
        }

        let patient_count = for_nurse.len();
        let total_acuity: u32 = for_nurse
            .iter()
            .map(|a| a.patient.final_acuity as u32)
            .sum();
        let iv_chemo_count = for_nurse
            .iter()
            .filter(|a| a.patient.patient.chemo_type.eq_ignore_ascii_case("iv"))
            .count();
        let vesicant_count = for_nurse.iter().filter(|a| a.patient.vesicant).count();
        let continuity_count = for_nurse
            .iter()
            .filter(|a| {
                !a.patient.patient.last_nurse.is_empty()
                    && a.patient.patient.last_nurse == nurse.nurse_id
            })
            .count();
        let new_admit_count = for_nurse
            .iter()
            .filter(|a| a.patient.patient.new_admit.is_yes())
            .count();

        rollups.push(NurseAssignment {
            nurse_id: nurse.nurse_id.clone(),
            name: nurse.name.clone(),
            patients: for_nurse
                .iter()
                .map(|a| a.patient.patient_id().to_string())
                .collect(),
            patient_count,
            total_acuity,
            iv_chemo_count,
            vesicant_count,
            continuity_count,
            new_admit_count,
            ratio_status: ratio_status(patient_count),
        });
    }

    let total_patients = assignments.len() + unassigned_patients;
    let nurses_used = rollups.len();
    let unit_sum: usize = rollups.iter().map(|r| r.patient_count).sum();
    let ideal_ratios = rollups
        .iter()
        .filter(|r| r.ratio_status == RatioStatus::Ideal)
        .count();
    let max_ratios = rollups
        .iter()
        .filter(|r| r.ratio_status == RatioStatus::Maximum)
        .count();
    let continuity_preserved = rollups.iter().map(|r| r.continuity_count).sum();

    let workload_variance = match (
        rollups.iter().map(|r| r.total_acuity).max(),
        rollups.iter().map(|r| r.total_acuity).min(),
    ) {
        (Some(max), Some(min)) => max as i64 - min as i64,
        _ => 0,
    };

    let average_acuity = if assignments.is_empty() {
        0.0
    } else {
        assignments
            .iter()
            .map(|a| a.patient.final_acuity as f64)
            .sum::<f64>()
            / assignments.len() as f64
    };

    let stats = UnitStats {
        total_patients,
        nurses_used,
        unit_capacity_used: format!("{unit_sum}/20"),
        unit_capacity_percentage: unit_sum as f64 / 20.0 * 100.0,
        workload_variance,
        average_acuity,
        ideal_ratios,
        max_ratios,
        continuity_preserved,
        blocked_assignments: meta.blocked_assignments,
        objective_value: meta.objective_value,
        solution_time_ms: meta.solution_time_ms,
        generated_at: now_timestamp(),
    };

    AssignmentResult {
        success: true,
        fallback: meta.fallback,
        assignments: rollups,
        unassigned_patients,
        stats,
    }
}

/// Safety check exposed for the integration test suite: confirms an
/// assembled result contains no pair the oracle would reject.
pub fn assert_no_unsafe_pair(assignments: &[Assignment<'_>]) -> bool {
    assignments
        .iter()
        .all(|a| is_admissible(a.nurse, a.patient))
}
