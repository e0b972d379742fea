use crate::model::{Nurse, NurseInput, Patient, PatientInput};

/// Wire-to-domain gate: checks presence of the fields spec section 4.1
/// marks required and converts whatever passes into the concrete
/// `Nurse`/`Patient` types `validate` and the rest of the pipeline
/// expect. A request missing one of these fields never reaches the
/// solver — it comes back as an ordinary validation error, not a
/// malformed-request rejection.
pub fn validate_presence(
    nurses: &[NurseInput],
    patients: &[PatientInput],
) -> Result<(Vec<Nurse>, Vec<Patient>), Vec<String>> {
    let mut errors = Vec::new();
    let mut built_nurses = Vec::with_capacity(nurses.len());

    for (i, n) in nurses.iter().enumerate() {
        let nurse_id = match &n.nurse_id {
            Some(v) if !v.is_empty() => Some(v.clone()),
            _ => {
                errors.push(format!("nurse[{i}]: nurse_id is required"));
                None
            }
        };
        let name = match &n.name {
            Some(v) if !v.is_empty() => Some(v.clone()),
            _ => {
                errors.push(format!("nurse[{i}]: name is required"));
                None
            }
        };
        let skill_level = match n.skill_level {
            Some(v) => Some(v),
            None => {
                errors.push(format!("nurse[{i}]: skill_level is required"));
                None
            }
        };
        let iv_cert = match n.iv_cert {
            Some(v) => Some(v),
            None => {
                errors.push(format!("nurse[{i}]: iv_cert is required"));
                None
            }
        };

        if let (Some(nurse_id), Some(name), Some(skill_level), Some(iv_cert)) =
            (nurse_id, name, skill_level, iv_cert)
        {
            built_nurses.push(Nurse {
                nurse_id,
                name,
                role: n.role.clone(),
                skill_level,
                iv_cert,
                max_patients: n.max_patients,
                pod_pref: n.pod_pref,
                pregnancy_status: n.pregnancy_status,
                phone: n.phone.clone(),
            });
        }
    }

    let mut built_patients = Vec::with_capacity(patients.len());

    for (i, p) in patients.iter().enumerate() {
        let patient_id = match &p.patient_id {
            Some(v) if !v.is_empty() => Some(v.clone()),
            _ => {
                errors.push(format!("patient[{i}]: patient_id is required"));
                None
            }
        };
        let initials = match &p.initials {
            Some(v) if !v.is_empty() => Some(v.clone()),
            _ => {
                errors.push(format!("patient[{i}]: initials is required"));
                None
            }
        };
        let base_acuity = match p.base_acuity {
            Some(v) => Some(v),
            None => {
                errors.push(format!("patient[{i}]: base_acuity is required"));
                None
            }
        };
        let chemo_type = match &p.chemo_type {
            Some(v) if !v.is_empty() => Some(v.clone()),
            _ => {
                errors.push(format!("patient[{i}]: chemo_type is required"));
                None
            }
        };

        if let (Some(patient_id), Some(initials), Some(base_acuity), Some(chemo_type)) =
            (patient_id, initials, base_acuity, chemo_type)
        {
            built_patients.push(Patient {
                patient_id,
                initials,
                pod: p.pod,
                base_acuity,
                new_admit: p.new_admit,
                chemo_type,
                chemo_frequency: p.chemo_frequency,
                chemo_time: p.chemo_time.clone(),
                central_line: p.central_line.clone(),
                iv_medications: p.iv_medications.clone(),
                isolation: p.isolation.clone(),
                cmv_status: p.cmv_status,
                last_nurse: p.last_nurse.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok((built_nurses, built_patients))
    } else {
        Err(errors)
    }
}

/// Structural and feasibility-precheck gate. Collects every violation
/// rather than failing on the first, so a caller can fix a request in
/// one round trip.
pub fn validate(nurses: &[Nurse], patients: &[Patient]) -> Vec<String> {
    let mut errors = Vec::new();

    for (i, nurse) in nurses.iter().enumerate() {
        if nurse.nurse_id.is_empty() {
            errors.push(format!("nurse[{i}]: nurse_id is required"));
        }
        if nurse.name.is_empty() {
            errors.push(format!("nurse[{i}]: name is required"));
        }
        if !(1..=3).contains(&nurse.skill_level) {
            errors.push(format!(
                "nurse[{i}]: skill_level must be between 1 and 3"
            ));
        }
        if !(1..=4).contains(&nurse.max_patients) {
            errors.push(format!(
                "nurse[{i}]: max_patients must be between 1 and 4"
            ));
        }
    }

    for (i, patient) in patients.iter().enumerate() {
        if patient.patient_id.is_empty() {
            errors.push(format!("patient[{i}]: patient_id is required"));
        }
        if patient.initials.is_empty() {
            errors.push(format!("patient[{i}]: initials is required"));
        }
        if !(1..=10).contains(&patient.base_acuity) {
            errors.push(format!(
                "patient[{i}]: base_acuity must be between 1 and 10"
            ));
        }
        if patient.chemo_type.is_empty() {
            errors.push(format!("patient[{i}]: chemo_type is required"));
        }
    }

    if patients.len() > 20 {
        errors.push("Unit over capacity: more than 20 patients in census".to_string());
    }

    let iv_patient_count = patients
        .iter()
        .filter(|p| p.chemo_type.eq_ignore_ascii_case("iv"))
        .count();
    let iv_certified_count = nurses.iter().filter(|n| n.iv_cert.is_yes()).count();
    if iv_patient_count > 2 * iv_certified_count {
        errors.push("Insufficient IV certified nurses".to_string());
    }

    let total_capacity: u32 = nurses.iter().map(|n| n.max_patients as u32).sum();
    if (total_capacity as usize) < patients.len() {
        errors.push("Insufficient total nurse capacity for census size".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChemoFrequency, CmvStatus, PregnancyStatus, YesNo};

    fn nurse(iv_cert: bool, max_patients: u8) -> Nurse {
        Nurse {
            nurse_id: "N001".into(),
            name: "Johnson".into(),
            role: "RN".into(),
            skill_level: 3,
            iv_cert: if iv_cert { YesNo::Yes } else { YesNo::No },
            max_patients,
            pod_pref: None,
            pregnancy_status: PregnancyStatus::N,
            phone: String::new(),
        }
    }

    fn patient(id: &str, chemo_type: &str) -> Patient {
        Patient {
            patient_id: id.into(),
            initials: "A.B.".into(),
            pod: None,
            base_acuity: 5,
            new_admit: YesNo::No,
            chemo_type: chemo_type.into(),
            chemo_frequency: ChemoFrequency::Single,
            chemo_time: String::new(),
            central_line: "none".into(),
            iv_medications: String::new(),
            isolation: String::new(),
            cmv_status: CmvStatus::Unknown,
            last_nurse: String::new(),
        }
    }

    #[test]
    fn valid_request_produces_no_errors() {
        let nurses = vec![nurse(true, 4)];
        let patients = vec![patient("P1", "none")];
        assert!(validate(&nurses, &patients).is_empty());
    }

    #[test]
    fn unit_over_capacity_flagged_past_twenty_patients() {
        let nurses = vec![nurse(true, 4)];
        let patients: Vec<Patient> = (0..21).map(|i| patient(&format!("P{i}"), "none")).collect();
        let errors = validate(&nurses, &patients);
        assert!(errors.iter().any(|e| e.contains("over capacity")));
    }

    #[test]
    fn insufficient_iv_staff_flagged() {
        let nurses = vec![nurse(true, 4)];
        let patients = vec![
            patient("P1", "IV"),
            patient("P2", "IV"),
            patient("P3", "IV"),
        ];
        let errors = validate(&nurses, &patients);
        assert!(errors
            .iter()
            .any(|e| e == "Insufficient IV certified nurses"));
    }

    #[test]
    fn insufficient_total_capacity_flagged() {
        let nurses = vec![nurse(true, 1)];
        let patients = vec![patient("P1", "none"), patient("P2", "none")];
        let errors = validate(&nurses, &patients);
        assert!(errors
            .iter()
            .any(|e| e.contains("Insufficient total nurse capacity")));
    }

    #[test]
    fn collects_every_violation_rather_than_stopping_at_first() {
        let nurses = vec![nurse(false, 0)];
        let patients: Vec<Patient> = (0..21).map(|i| patient(&format!("P{i}"), "IV")).collect();
        let errors = validate(&nurses, &patients);
        assert!(errors.len() >= 3);
    }

    fn nurse_input(nurse_id: Option<&str>, skill_level: Option<u8>) -> NurseInput {
        NurseInput {
            nurse_id: nurse_id.map(String::from),
            name: Some("Johnson".into()),
            role: "RN".into(),
            skill_level,
            iv_cert: Some(YesNo::Yes),
            max_patients: 4,
            pod_pref: None,
            pregnancy_status: PregnancyStatus::N,
            phone: String::new(),
        }
    }

    fn patient_input(patient_id: Option<&str>, base_acuity: Option<u8>) -> PatientInput {
        PatientInput {
            patient_id: patient_id.map(String::from),
            initials: Some("A.B.".into()),
            pod: None,
            base_acuity,
            new_admit: YesNo::No,
            chemo_type: Some("none".into()),
            chemo_frequency: ChemoFrequency::Single,
            chemo_time: String::new(),
            central_line: String::new(),
            iv_medications: String::new(),
            isolation: String::new(),
            cmv_status: CmvStatus::Unknown,
            last_nurse: String::new(),
        }
    }

    #[test]
    fn validate_presence_builds_domain_types_when_all_fields_present() {
        let nurses = vec![nurse_input(Some("N1"), Some(3))];
        let patients = vec![patient_input(Some("P1"), Some(5))];
        let (built_nurses, built_patients) = validate_presence(&nurses, &patients).unwrap();
        assert_eq!(built_nurses[0].nurse_id, "N1");
        assert_eq!(built_patients[0].patient_id, "P1");
    }

    #[test]
    fn validate_presence_flags_missing_nurse_id_without_rejecting_the_request() {
        let nurses = vec![nurse_input(None, Some(3))];
        let patients = vec![patient_input(Some("P1"), Some(5))];
        let errors = validate_presence(&nurses, &patients).unwrap_err();
        assert!(errors.iter().any(|e| e == "nurse[0]: nurse_id is required"));
    }

    #[test]
    fn validate_presence_flags_missing_skill_level() {
        let nurses = vec![nurse_input(Some("N1"), None)];
        let patients = vec![patient_input(Some("P1"), Some(5))];
        let errors = validate_presence(&nurses, &patients).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e == "nurse[0]: skill_level is required"));
    }

    #[test]
    fn validate_presence_flags_missing_patient_fields() {
        let nurses = vec![nurse_input(Some("N1"), Some(3))];
        let patients = vec![patient_input(None, None)];
        let errors = validate_presence(&nurses, &patients).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e == "patient[0]: patient_id is required"));
        assert!(errors
            .iter()
            .any(|e| e == "patient[0]: base_acuity is required"));
    }
}
