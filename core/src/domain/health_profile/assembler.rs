use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    health_profile::{
        entities::{Biometrics, HealthProfile, Medication},
        limits::derive_nutrient_limits,
        value_objects::{DegradeIssue, PartialDegradeWarning},
    },
    user::entities::UserHealthRecord,
};

const MAX_AGE: f64 = 130.0;

/// Outer shape of the onboarding blob. Nested sections stay untyped until
/// each leaf is checked on its own.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OnboardingData {
    biometrics: Option<Value>,
    medical: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MedicalSection {
    medications: Option<Value>,
}

/// Build a [`HealthProfile`] from a stored user record.
///
/// Every field falls back to its default on its own, so the result always
/// carries a usable profile. When any stored value had to be discarded the
/// profile is returned inside [`PartialDegradeWarning`] together with the
/// list of discarded values.
pub fn assemble_health_profile(
    record: &UserHealthRecord,
) -> Result<HealthProfile, PartialDegradeWarning> {
    let mut issues = Vec::new();

    let conditions = decode_conditions(record.conditions.as_deref(), &mut issues);
    let onboarding = decode_onboarding(record.onboarding_data.as_deref(), &mut issues);

    let record_age = record
        .age
        .filter(|age| *age > 0 && f64::from(*age) <= MAX_AGE)
        .map(|age| age as u32);

    let biometrics = decode_biometrics(onboarding.biometrics.as_ref(), record_age, &mut issues);
    let medications = decode_medications(onboarding.medical.as_ref(), &mut issues);
    let nutrient_limits = derive_nutrient_limits(&conditions, biometrics.weight_kg);

    let profile = HealthProfile {
        conditions,
        medications,
        biometrics,
        nutrient_limits,
    };

    if issues.is_empty() {
        Ok(profile)
    } else {
        Err(PartialDegradeWarning { profile, issues })
    }
}

fn is_blank(raw: Option<&str>) -> bool {
    raw.is_none_or(|value| value.trim().is_empty() || value.trim() == "null")
}

fn decode_conditions(raw: Option<&str>, issues: &mut Vec<DegradeIssue>) -> Vec<String> {
    if is_blank(raw) {
        return Vec::new();
    }

    let entries = match serde_json::from_str::<Value>(raw.unwrap_or_default()) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            issues.push(DegradeIssue::ConditionsUnparsable(format!(
                "expected a list, found {}",
                json_kind(&other)
            )));
            return Vec::new();
        }
        Err(e) => {
            issues.push(DegradeIssue::ConditionsUnparsable(e.to_string()));
            return Vec::new();
        }
    };

    let mut conditions: Vec<String> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            Value::String(condition) => {
                let condition = condition.trim();
                if condition.is_empty() || conditions.iter().any(|c| c == condition) {
                    continue;
                }
                conditions.push(condition.to_string());
            }
            other => issues.push(DegradeIssue::InvalidCondition {
                index,
                reason: format!("expected a string, found {}", json_kind(&other)),
            }),
        }
    }

    conditions
}

fn decode_onboarding(raw: Option<&str>, issues: &mut Vec<DegradeIssue>) -> OnboardingData {
    if is_blank(raw) {
        return OnboardingData::default();
    }

    match serde_json::from_str::<Value>(raw.unwrap_or_default()) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_default(),
        Ok(other) => {
            issues.push(DegradeIssue::OnboardingUnparsable(format!(
                "expected an object, found {}",
                json_kind(&other)
            )));
            OnboardingData::default()
        }
        Err(e) => {
            issues.push(DegradeIssue::OnboardingUnparsable(e.to_string()));
            OnboardingData::default()
        }
    }
}

fn decode_biometrics(
    section: Option<&Value>,
    record_age: Option<u32>,
    issues: &mut Vec<DegradeIssue>,
) -> Biometrics {
    let mut biometrics = Biometrics::default();

    let fields = match section {
        None | Some(Value::Null) => None,
        Some(Value::Object(fields)) => Some(fields),
        Some(other) => {
            issues.push(invalid_field(
                "biometrics",
                format!("expected an object, found {}", json_kind(other)),
            ));
            None
        }
    };

    if let Some(fields) = fields {
        if let Some(weight) = positive_number(fields.get("weight"), "biometrics.weight", issues) {
            biometrics.weight_kg = weight;
        }
        if let Some(height) = positive_number(fields.get("height"), "biometrics.height", issues) {
            biometrics.height_cm = height;
        }
        if let Some(age) = positive_number(fields.get("age"), "biometrics.age", issues) {
            let years = age.round();
            if (1.0..=MAX_AGE).contains(&years) {
                biometrics.age = years as u32;
            } else {
                issues.push(invalid_field("biometrics.age", format!("{age} is out of range")));
            }
        }
        match fields.get("gender") {
            None | Some(Value::Null) => {}
            Some(Value::String(gender)) if !gender.trim().is_empty() => {
                biometrics.gender = gender.trim().to_string();
            }
            Some(other) => issues.push(invalid_field(
                "biometrics.gender",
                format!("expected a non-empty string, found {}", json_kind(other)),
            )),
        }
    }

    // The age column is maintained by account settings and wins over the
    // onboarding answer.
    if let Some(age) = record_age {
        biometrics.age = age;
    }

    biometrics
}

fn decode_medications(section: Option<&Value>, issues: &mut Vec<DegradeIssue>) -> Vec<Medication> {
    let medical = match section {
        None | Some(Value::Null) => return Vec::new(),
        Some(value @ Value::Object(_)) => {
            serde_json::from_value::<MedicalSection>(value.clone()).unwrap_or_default()
        }
        Some(other) => {
            issues.push(invalid_field(
                "medical",
                format!("expected an object, found {}", json_kind(other)),
            ));
            return Vec::new();
        }
    };

    let entries = match medical.medications {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            issues.push(invalid_field(
                "medical.medications",
                format!("expected a list, found {}", json_kind(&other)),
            ));
            return Vec::new();
        }
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match decode_medication(entry) {
            Ok(medication) => Some(medication),
            Err(reason) => {
                issues.push(DegradeIssue::InvalidMedication { index, reason });
                None
            }
        })
        .collect()
}

fn decode_medication(entry: &Value) -> Result<Medication, String> {
    match entry {
        Value::String(name) if !name.trim().is_empty() => Ok(Medication {
            name: name.trim().to_string(),
            interactions: Vec::new(),
            warnings: Vec::new(),
        }),
        Value::Object(fields) => {
            let name = fields
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| "missing medication name".to_string())?;

            Ok(Medication {
                name: name.to_string(),
                interactions: string_list(fields.get("interactions")),
                warnings: string_list(fields.get("warnings")),
            })
        }
        other => Err(format!(
            "expected a name or an object, found {}",
            json_kind(other)
        )),
    }
}

/// Accepts a single string or a list; non-string list entries are dropped
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(single)) if !single.trim().is_empty() => {
            vec![single.trim().to_string()]
        }
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Numbers are accepted as JSON numbers or numeric strings ("72.5").
fn positive_number(
    value: Option<&Value>,
    field: &str,
    issues: &mut Vec<DegradeIssue>,
) -> Option<f64> {
    let value = value?;
    let parsed = match value {
        Value::Null => return None,
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(number) if number.is_finite() && number > 0.0 => Some(number),
        _ => {
            issues.push(invalid_field(field, format!("unparsable value {value}")));
            None
        }
    }
}

fn invalid_field(field: &str, reason: String) -> DegradeIssue {
    DegradeIssue::InvalidField {
        field: field.to_string(),
        reason,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::domain::health_profile::entities::{
        DEFAULT_AGE, DEFAULT_GENDER, DEFAULT_HEIGHT_CM, DEFAULT_WEIGHT_KG,
    };

    fn record(conditions: Option<&str>, onboarding: Option<Value>, age: Option<i32>) -> UserHealthRecord {
        UserHealthRecord {
            id: Uuid::new_v4(),
            conditions: conditions.map(str::to_string),
            onboarding_data: onboarding.map(|value| value.to_string()),
            age,
        }
    }

    #[test]
    fn test_empty_record_yields_default_profile() {
        let profile = assemble_health_profile(&record(None, None, None)).unwrap();

        assert!(profile.conditions.is_empty());
        assert!(profile.medications.is_empty());
        assert_eq!(profile.biometrics, Biometrics::default());
        assert_eq!(profile.biometrics.weight_kg, DEFAULT_WEIGHT_KG);
        assert_eq!(profile.biometrics.height_cm, DEFAULT_HEIGHT_CM);
        assert_eq!(profile.biometrics.age, DEFAULT_AGE);
        assert_eq!(profile.biometrics.gender, DEFAULT_GENDER);
    }

    #[test]
    fn test_record_age_used_without_onboarding() {
        let profile = assemble_health_profile(&record(None, None, Some(58))).unwrap();

        assert_eq!(profile.biometrics.age, 58);
        assert_eq!(profile.biometrics.weight_kg, 70.0);
        assert_eq!(profile.biometrics.height_cm, 170.0);
        assert_eq!(profile.biometrics.gender, "Male");
        assert!(profile.medications.is_empty());
    }

    #[test]
    fn test_weight_only_overrides_weight() {
        let onboarding = json!({ "biometrics": { "weight": 92 } });
        let profile = assemble_health_profile(&record(None, Some(onboarding), None)).unwrap();

        assert_eq!(profile.biometrics.weight_kg, 92.0);
        assert_eq!(profile.biometrics.height_cm, 170.0);
        assert_eq!(profile.biometrics.age, 30);
        assert_eq!(profile.biometrics.gender, "Male");
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let onboarding = json!({
            "biometrics": { "weight": "64.5", "height": " 158 ", "age": "41", "gender": "Female" }
        });
        let profile = assemble_health_profile(&record(None, Some(onboarding), None)).unwrap();

        assert_eq!(profile.biometrics.weight_kg, 64.5);
        assert_eq!(profile.biometrics.height_cm, 158.0);
        assert_eq!(profile.biometrics.age, 41);
        assert_eq!(profile.biometrics.gender, "Female");
    }

    #[test]
    fn test_record_age_wins_over_onboarding_age() {
        let onboarding = json!({ "biometrics": { "age": 25 } });
        let profile = assemble_health_profile(&record(None, Some(onboarding), Some(61))).unwrap();

        assert_eq!(profile.biometrics.age, 61);
    }

    #[test]
    fn test_onboarding_age_is_rounded_and_bounded() {
        let onboarding = json!({ "biometrics": { "age": 44.6 } });
        let profile = assemble_health_profile(&record(None, Some(onboarding), None)).unwrap();
        assert_eq!(profile.biometrics.age, 45);

        for age in [json!(0.4), json!(131)] {
            let onboarding = json!({ "biometrics": { "age": age } });
            let warning =
                assemble_health_profile(&record(None, Some(onboarding), None)).unwrap_err();

            assert_eq!(warning.profile.biometrics.age, 30);
            assert!(matches!(
                &warning.issues[0],
                DegradeIssue::InvalidField { field, .. } if field == "biometrics.age"
            ));
        }
    }

    #[test]
    fn test_unparsable_fields_keep_defaults_and_report() {
        let onboarding = json!({
            "biometrics": { "weight": "heavy", "height": -3, "gender": 7 }
        });
        let warning = assemble_health_profile(&record(None, Some(onboarding), None)).unwrap_err();

        assert_eq!(warning.profile.biometrics, Biometrics::default());
        assert_eq!(warning.issues.len(), 3);
        assert!(matches!(
            &warning.issues[0],
            DegradeIssue::InvalidField { field, .. } if field == "biometrics.weight"
        ));
    }

    #[test]
    fn test_malformed_conditions_degrade_to_empty() {
        let warning = assemble_health_profile(&record(Some("[\"CKD3\""), None, None)).unwrap_err();

        assert!(warning.profile.conditions.is_empty());
        assert!(matches!(
            warning.issues.as_slice(),
            [DegradeIssue::ConditionsUnparsable(_)]
        ));
    }

    #[test]
    fn test_conditions_are_deduplicated_in_order() {
        let raw = json!(["CKD3", " Hypertension ", "CKD3", "", 12]).to_string();
        let warning = assemble_health_profile(&record(Some(&raw), None, None)).unwrap_err();

        assert_eq!(warning.profile.conditions, vec!["CKD3", "Hypertension"]);
        assert_eq!(
            warning.issues,
            vec![DegradeIssue::InvalidCondition {
                index: 4,
                reason: "expected a string, found a number".to_string(),
            }]
        );
    }

    #[test]
    fn test_conditions_drive_nutrient_limits() {
        let raw = json!(["CKD3"]).to_string();
        let onboarding = json!({ "biometrics": { "weight": 80 } });
        let profile = assemble_health_profile(&record(Some(&raw), Some(onboarding), None)).unwrap();

        assert_eq!(profile.nutrient_limits.phosphorus_mg, Some(1000));
        assert_eq!(profile.nutrient_limits.protein_g, Some(64));
    }

    #[test]
    fn test_medications_decoded_from_medical_section() {
        let onboarding = json!({
            "medical": {
                "medications": [
                    "Lisinopril",
                    {
                        "name": "Metformin",
                        "interactions": ["alcohol"],
                        "warnings": "take with food"
                    },
                    { "dose": "10mg" },
                    42
                ]
            }
        });
        let warning = assemble_health_profile(&record(None, Some(onboarding), None)).unwrap_err();
        let medications = &warning.profile.medications;

        assert_eq!(medications.len(), 2);
        assert_eq!(medications[0].name, "Lisinopril");
        assert!(medications[0].interactions.is_empty());
        assert_eq!(medications[1].name, "Metformin");
        assert_eq!(medications[1].interactions, vec!["alcohol"]);
        assert_eq!(medications[1].warnings, vec!["take with food"]);
        assert_eq!(warning.issues.len(), 2);
    }

    #[test]
    fn test_missing_medication_path_yields_empty_list() {
        let onboarding = json!({ "medical": { "allergies": ["peanut"] } });
        let profile = assemble_health_profile(&record(None, Some(onboarding), None)).unwrap();

        assert!(profile.medications.is_empty());
    }

    #[test]
    fn test_onboarding_not_an_object() {
        let warning =
            assemble_health_profile(&record(None, Some(json!(["weight", 80])), Some(44)))
                .unwrap_err();

        assert_eq!(warning.profile.biometrics.age, 44);
        assert_eq!(warning.profile.biometrics.weight_kg, 70.0);
        assert!(matches!(
            warning.issues.as_slice(),
            [DegradeIssue::OnboardingUnparsable(_)]
        ));
    }

    #[test]
    fn test_null_columns_are_not_degraded() {
        let mut stored = record(None, None, None);
        stored.conditions = Some("null".to_string());
        stored.onboarding_data = Some("  ".to_string());

        assert!(assemble_health_profile(&stored).is_ok());
    }
}
