use serde::{Deserialize, Serialize};

/// A nurse on the roster for the upcoming shift.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Nurse {
    pub nurse_id: String,
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    pub skill_level: u8,
    pub iv_cert: YesNo,
    #[serde(default = "default_max_patients")]
    pub max_patients: u8,
    #[serde(default)]
    pub pod_pref: Option<char>,
    #[serde(default)]
    pub pregnancy_status: PregnancyStatus,
    #[serde(default)]
    pub phone: String,
}

fn default_role() -> String {
    "RN".to_string()
}

fn default_max_patients() -> u8 {
    4
}

/// The source data spells yes/no inconsistently across fields; this
/// normalizes to a bool while still accepting the raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl<'de> Deserialize<'de> for YesNo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw.eq_ignore_ascii_case("y") {
            YesNo::Yes
        } else {
            YesNo::No
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PregnancyStatus {
    Y,
    #[default]
    N,
    #[serde(rename = "N/A")]
    NA,
    #[serde(rename = "Prefer_Not_To_Say")]
    PreferNotToSay,
    Unknown,
}

impl PregnancyStatus {
    pub fn is_pregnant(self) -> bool {
        matches!(self, PregnancyStatus::Y)
    }
}

/// A hospitalized patient on the census for the upcoming shift.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Patient {
    pub patient_id: String,
    pub initials: String,
    #[serde(default)]
    pub pod: Option<char>,
    #[serde(alias = "acuity")]
    pub base_acuity: u8,
    #[serde(default)]
    pub new_admit: YesNo,
    pub chemo_type: String,
    #[serde(default)]
    pub chemo_frequency: ChemoFrequency,
    #[serde(default)]
    pub chemo_time: String,
    #[serde(default)]
    pub central_line: String,
    #[serde(default)]
    pub iv_medications: String,
    #[serde(default)]
    pub isolation: String,
    #[serde(default)]
    pub cmv_status: CmvStatus,
    #[serde(default)]
    pub last_nurse: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChemoFrequency {
    #[default]
    Single,
    Multiple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CmvStatus {
    Positive,
    Negative,
    #[default]
    Unknown,
}

impl CmvStatus {
    pub fn is_positive(self) -> bool {
        matches!(self, CmvStatus::Positive)
    }
}

/// Objective weights. Missing fields fall back to the documented
/// defaults; all are expected non-negative but this is not enforced at
/// the model layer (the MILP builder treats a negative weight as a
/// caller error surfaced through an ordinary — if unintuitive —
/// objective, rather than a validation failure).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct Weights {
    pub continuity_weight: f64,
    pub skill_weight: f64,
    pub geography_weight: f64,
    pub workload_balance_weight: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            continuity_weight: 0.30,
            skill_weight: 0.40,
            geography_weight: 0.20,
            workload_balance_weight: 0.10,
        }
    }
}

/// Top-level request body for `POST /optimize`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OptimizeRequest {
    pub nurses: Vec<Nurse>,
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub config: Weights,
}

/// Wire-level counterpart of `Nurse`. The fields spec section 4.1 marks
/// required are `Option` here so a request missing one deserializes
/// successfully and surfaces as a validation error rather than a
/// malformed-request rejection — see `validator::validate_presence`.
#[derive(Debug, Clone, Deserialize)]
pub struct NurseInput {
    pub nurse_id: Option<String>,
    pub name: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub skill_level: Option<u8>,
    pub iv_cert: Option<YesNo>,
    #[serde(default = "default_max_patients")]
    pub max_patients: u8,
    #[serde(default)]
    pub pod_pref: Option<char>,
    #[serde(default)]
    pub pregnancy_status: PregnancyStatus,
    #[serde(default)]
    pub phone: String,
}

/// Wire-level counterpart of `Patient`, same rationale as `NurseInput`.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientInput {
    pub patient_id: Option<String>,
    pub initials: Option<String>,
    #[serde(default)]
    pub pod: Option<char>,
    #[serde(alias = "acuity")]
    pub base_acuity: Option<u8>,
    #[serde(default)]
    pub new_admit: YesNo,
    pub chemo_type: Option<String>,
    #[serde(default)]
    pub chemo_frequency: ChemoFrequency,
    #[serde(default)]
    pub chemo_time: String,
    #[serde(default)]
    pub central_line: String,
    #[serde(default)]
    pub iv_medications: String,
    #[serde(default)]
    pub isolation: String,
    #[serde(default)]
    pub cmv_status: CmvStatus,
    #[serde(default)]
    pub last_nurse: String,
}

/// Wire-level body for `POST /optimize`. `nurses`/`patients` are still
/// plain (non-`Option`) `Vec`s: a missing top-level key is the one case
/// spec section 4.1/7 does treat as a malformed request rather than a
/// validation error.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizeRequestInput {
    pub nurses: Vec<NurseInput>,
    pub patients: Vec<PatientInput>,
    #[serde(default)]
    pub config: Weights,
}
