use crate::model::{ChemoFrequency, Patient};

/// A patient after preprocessing: the immutable final_acuity/vesicant
/// derivation layered over the raw input, per spec section 3. Built
/// once per request and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PreparedPatient {
    pub patient: Patient,
    pub final_acuity: u8,
    pub vesicant: bool,
}

impl PreparedPatient {
    pub fn patient_id(&self) -> &str {
        &self.patient.patient_id
    }
}

const VESICANT_KEYWORDS: [&str; 2] = ["antiarrhythmics", "vasopressors"];

fn is_iv_chemo(patient: &Patient) -> bool {
    patient.chemo_type.eq_ignore_ascii_case("iv")
}

fn has_vesicant_medication(patient: &Patient) -> bool {
    let meds = patient.iv_medications.to_ascii_lowercase();
    VESICANT_KEYWORDS.iter().any(|kw| meds.contains(kw))
}

fn derive_final_acuity(patient: &Patient) -> u8 {
    let mut acuity = patient.base_acuity as u16;
    if patient.new_admit.is_yes() {
        acuity += 1;
    }
    if patient.chemo_frequency == ChemoFrequency::Multiple {
        acuity += 1;
    }
    acuity.min(10) as u8
}

fn derive_vesicant(patient: &Patient) -> bool {
    let is_peripheral = patient.central_line.eq_ignore_ascii_case("peripheral");
    is_peripheral && (is_iv_chemo(patient) || has_vesicant_medication(patient))
}

/// Applies the spec section 3 derivations to a request-local copy of the
/// census. Pure and order-independent — never touches caller input.
pub fn prepare(patients: &[Patient]) -> Vec<PreparedPatient> {
    patients
        .iter()
        .cloned()
        .map(|patient| {
            let final_acuity = derive_final_acuity(&patient);
            let vesicant = derive_vesicant(&patient);
            PreparedPatient {
                patient,
                final_acuity,
                vesicant,
            }
        })
        .collect()
}
