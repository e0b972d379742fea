use crate::model::Nurse;
use crate::preprocess::PreparedPatient;

/// Pure predicate: is this (nurse, patient) pair admissible under the
/// hard safety/certification rules? Inadmissible pairs must receive
/// decision value 0 in the MILP and must be skipped by the greedy
/// fallback — this function is the single source of truth both paths
/// consult.
pub fn is_admissible(nurse: &Nurse, patient: &PreparedPatient) -> bool {
    let p = &patient.patient;

    let iv_cert_violation = p.chemo_type.eq_ignore_ascii_case("iv") && !nurse.iv_cert.is_yes();
    let vesicant_violation = patient.vesicant && nurse.skill_level < 2;
    let high_acuity_violation = patient.final_acuity >= 8 && nurse.skill_level < 2;
    let new_admit_violation = p.new_admit.is_yes() && nurse.skill_level < 2;
    let cmv_violation = p.cmv_status.is_positive() && nurse.pregnancy_status.is_pregnant();

    !(iv_cert_violation
        || vesicant_violation
        || high_acuity_violation
        || new_admit_violation
        || cmv_violation)
}

/// Counts (nurse, patient) pairs the oracle blocks. Independent of
/// which path (MILP or greedy fallback) ultimately produced a
/// solution, so both can report the same `blocked_assignments` stat.
pub fn count_blocked(nurses: &[Nurse], patients: &[PreparedPatient]) -> usize {
    nurses
        .iter()
        .flat_map(|n| patients.iter().map(move |p| is_admissible(n, p)))
        .filter(|&ok| !ok)
        .count()
}
