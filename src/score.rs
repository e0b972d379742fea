use crate::model::{Nurse, Weights};
use crate::preprocess::PreparedPatient;

/// Computes the preference score for an admissible (nurse, patient)
/// pair. Callers must have already checked `oracle::is_admissible` —
/// this function has no opinion on safety, only preference.
pub fn score(nurse: &Nurse, patient: &PreparedPatient, weights: Weights) -> f64 {
    let p = &patient.patient;
    let mut total = 1.0;

    total += continuity_term(nurse, p, weights);
    total += geography_term(nurse, p, weights);
    total += skill_acuity_term(nurse, patient, weights);
    total += vesicant_term(nurse, patient, weights);
    total += new_admit_term(nurse, p, weights);

    total
}

fn continuity_term(nurse: &Nurse, patient: &crate::model::Patient, weights: Weights) -> f64 {
    if !patient.last_nurse.is_empty() && nurse.nurse_id == patient.last_nurse {
        10.0 * weights.continuity_weight
    } else {
        0.0
    }
}

fn geography_term(nurse: &Nurse, patient: &crate::model::Patient, weights: Weights) -> f64 {
    match (nurse.pod_pref, patient.pod) {
        (Some(pref), Some(pod)) if pref == pod => 8.0 * weights.geography_weight,
        (Some(pref), Some(pod)) if pref.abs_diff_ascii(pod) == 1 => 4.0 * weights.geography_weight,
        _ => 0.0,
    }
}

trait AsciiDiff {
    fn abs_diff_ascii(self, other: char) -> u32;
}

impl AsciiDiff for char {
    fn abs_diff_ascii(self, other: char) -> u32 {
        (self as u32).abs_diff(other as u32)
    }
}

/// Exactly one branch fires — first match wins, per spec section 4.4.
fn skill_acuity_term(nurse: &Nurse, patient: &PreparedPatient, weights: Weights) -> f64 {
    let skill = nurse.skill_level;
    let acuity = patient.final_acuity;

    let bonus = if skill == 3 && acuity >= 8 {
        12.0
    } else if skill == 3 && (5..=7).contains(&acuity) {
        10.0
    } else if skill == 2 && (4..=8).contains(&acuity) {
        10.0
    } else if skill == 1 && acuity <= 5 {
        8.0
    } else {
        let mismatch = (3 * skill as i32 - acuity as i32).unsigned_abs() as f64;
        return -mismatch * weights.skill_weight;
    };

    bonus * weights.skill_weight
}

fn vesicant_term(nurse: &Nurse, patient: &PreparedPatient, weights: Weights) -> f64 {
    if patient.vesicant && nurse.skill_level == 3 {
        5.0 * weights.skill_weight
    } else {
        0.0
    }
}

fn new_admit_term(nurse: &Nurse, patient: &crate::model::Patient, weights: Weights) -> f64 {
    if patient.new_admit.is_yes() && nurse.skill_level >= 2 {
        3.0 * weights.skill_weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CmvStatus, Patient, PregnancyStatus, YesNo};
    use crate::preprocess::prepare;

    fn nurse(skill: u8) -> Nurse {
        Nurse {
            nurse_id: "N001".into(),
            name: "Test".into(),
            role: "RN".into(),
            skill_level: skill,
            iv_cert: YesNo::Yes,
            max_patients: 4,
            pod_pref: None,
            pregnancy_status: PregnancyStatus::N,
            phone: String::new(),
        }
    }

    fn patient(base_acuity: u8) -> PreparedPatient {
        let p = Patient {
            patient_id: "P1".into(),
            initials: "A.B.".into(),
            pod: None,
            base_acuity,
            new_admit: YesNo::No,
            chemo_type: "none".into(),
            chemo_frequency: Default::default(),
            chemo_time: String::new(),
            central_line: "none".into(),
            iv_medications: String::new(),
            isolation: String::new(),
            cmv_status: CmvStatus::Unknown,
            last_nurse: String::new(),
        };
        prepare(&[p]).remove(0)
    }

    #[test]
    fn continuity_bonus_applies_only_on_matching_nonempty_ids() {
        let n = nurse(2);
        let mut p = patient(5);
        p.patient.last_nurse = n.nurse_id.clone();
        let with_match = score(&n, &p, Weights::default());

        p.patient.last_nurse = String::new();
        let without_match = score(&n, &p, Weights::default());

        assert!(with_match > without_match);
    }

    #[test]
    fn geography_adjacent_pod_scores_less_than_exact_match() {
        let mut n = nurse(2);
        n.pod_pref = Some('A');
        let mut exact = patient(5);
        exact.patient.pod = Some('A');
        let mut adjacent = patient(5);
        adjacent.patient.pod = Some('B');

        let weights = Weights::default();
        let exact_score = score(&n, &exact, weights);
        let adjacent_score = score(&n, &adjacent, weights);
        assert!(exact_score > adjacent_score);
    }

    #[test]
    fn skill_three_high_acuity_scores_highest_skill_bonus() {
        let n = nurse(3);
        let p = patient(9);
        let s = score(&n, &p, Weights::default());
        assert!(s > 1.0);
    }

    #[test]
    fn mismatch_yields_negative_skill_term() {
        let n = nurse(1);
        let p = patient(10);
        let s = score(&n, &p, Weights::default());
        // base(1) + mismatch penalty should pull this well below 1.
        assert!(s < 1.0);
    }

    #[test]
    fn weight_monotonicity_for_continuity() {
        let n = nurse(2);
        let mut p = patient(5);
        p.patient.last_nurse = n.nurse_id.clone();

        let low = Weights {
            continuity_weight: 0.1,
            ..Weights::default()
        };
        let high = Weights {
            continuity_weight: 0.9,
            ..Weights::default()
        };
        assert!(score(&n, &p, high) > score(&n, &p, low));
    }
}
