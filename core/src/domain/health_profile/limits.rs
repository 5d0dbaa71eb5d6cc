use crate::domain::health_profile::entities::NutrientLimits;

const BASELINE_SODIUM_MG: u32 = 2300;
const BASELINE_ADDED_SUGAR_G: u32 = 50;

/// Ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum KidneyStage {
    Moderate,
    Advanced,
    Dialysis,
}

/// Uppercase and strip everything but ASCII letters and digits, so that
/// "ckd-3", "CKD 3" and "CKD3" compare equal.
pub fn normalize_condition(condition: &str) -> String {
    condition
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn kidney_stage(normalized: &str) -> Option<KidneyStage> {
    if normalized.contains("DIALYSIS") || normalized == "ESRD" {
        return Some(KidneyStage::Dialysis);
    }

    let stage = normalized
        .strip_prefix("CKD")
        .or_else(|| normalized.strip_prefix("CHRONICKIDNEYDISEASE"))?;

    match stage.trim_start_matches("STAGE") {
        "3" | "3A" | "3B" => Some(KidneyStage::Moderate),
        "4" | "5" => Some(KidneyStage::Advanced),
        "5D" => Some(KidneyStage::Dialysis),
        _ => None,
    }
}

fn is_blood_pressure_condition(normalized: &str) -> bool {
    normalized.contains("HYPERTENSION") || normalized.contains("HEARTFAILURE") || normalized == "HTN"
}

fn is_glucose_condition(normalized: &str) -> bool {
    normalized.contains("DIABETES") || normalized == "T1D" || normalized == "T2D"
}

/// Derive daily limits from the condition list. Non-kidney rules take the
/// strictest value. Kidney limits come from the most severe stage listed, so
/// a dialysis patient with a leftover "CKD4" entry still gets dialysis
/// targets. Condition order never changes the result.
pub fn derive_nutrient_limits(conditions: &[String], weight_kg: f64) -> NutrientLimits {
    let mut limits = NutrientLimits {
        sodium_mg: BASELINE_SODIUM_MG,
        potassium_mg: None,
        phosphorus_mg: None,
        added_sugar_g: BASELINE_ADDED_SUGAR_G,
        protein_g: None,
    };

    let protein_for = |grams_per_kg: f64| (weight_kg * grams_per_kg).round() as u32;
    let mut kidney = None;

    for condition in conditions {
        let normalized = normalize_condition(condition);

        if is_blood_pressure_condition(&normalized) {
            limits.sodium_mg = limits.sodium_mg.min(1500);
        }

        if is_glucose_condition(&normalized) {
            limits.added_sugar_g = limits.added_sugar_g.min(25);
        }

        kidney = kidney.max(kidney_stage(&normalized));
    }

    let kidney_limits = match kidney {
        Some(KidneyStage::Moderate) => Some((3000, 1000, protein_for(0.8))),
        Some(KidneyStage::Advanced) => Some((2000, 800, protein_for(0.6))),
        // Dialysis raises the protein target instead of lowering it.
        Some(KidneyStage::Dialysis) => Some((2500, 1000, protein_for(1.2))),
        None => None,
    };

    if let Some((potassium, phosphorus, protein)) = kidney_limits {
        limits.sodium_mg = limits.sodium_mg.min(2000);
        limits.potassium_mg = Some(potassium);
        limits.phosphorus_mg = Some(phosphorus);
        limits.protein_g = Some(protein);
    }

    limits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_normalize_condition() {
        assert_eq!(normalize_condition("ckd-3"), "CKD3");
        assert_eq!(normalize_condition(" Type 2 Diabetes "), "TYPE2DIABETES");
    }

    #[test]
    fn test_baseline_without_conditions() {
        let limits = derive_nutrient_limits(&[], 70.0);
        assert_eq!(limits.sodium_mg, 2300);
        assert_eq!(limits.added_sugar_g, 50);
        assert_eq!(limits.potassium_mg, None);
        assert_eq!(limits.phosphorus_mg, None);
        assert_eq!(limits.protein_g, None);
    }

    #[test]
    fn test_ckd3_limits_scale_protein_with_weight() {
        let limits = derive_nutrient_limits(&conditions(&["CKD3"]), 80.0);
        assert_eq!(limits.sodium_mg, 2000);
        assert_eq!(limits.potassium_mg, Some(3000));
        assert_eq!(limits.phosphorus_mg, Some(1000));
        assert_eq!(limits.protein_g, Some(64));
    }

    #[test]
    fn test_most_severe_stage_and_strictest_sodium_win() {
        let limits =
            derive_nutrient_limits(&conditions(&["CKD 3a", "hypertension", "CKD-Stage-4"]), 70.0);
        assert_eq!(limits.sodium_mg, 1500);
        assert_eq!(limits.potassium_mg, Some(2000));
        assert_eq!(limits.phosphorus_mg, Some(800));
        assert_eq!(limits.protein_g, Some(42));
    }

    #[test]
    fn test_diabetes_lowers_sugar_only() {
        let limits = derive_nutrient_limits(&conditions(&["Type 2 Diabetes"]), 70.0);
        assert_eq!(limits.added_sugar_g, 25);
        assert_eq!(limits.sodium_mg, 2300);
    }

    #[test]
    fn test_dialysis_raises_protein() {
        let limits = derive_nutrient_limits(&conditions(&["CKD5D"]), 70.0);
        assert_eq!(limits.protein_g, Some(84));
        assert_eq!(limits.potassium_mg, Some(2500));
    }

    #[test]
    fn test_condition_order_does_not_matter() {
        let forward = derive_nutrient_limits(&conditions(&["CKD4", "CKD5D"]), 70.0);
        let reverse = derive_nutrient_limits(&conditions(&["CKD5D", "CKD4"]), 70.0);

        assert_eq!(forward, reverse);
        assert_eq!(forward.protein_g, Some(84));
        assert_eq!(forward.potassium_mg, Some(2500));

        let mixed = derive_nutrient_limits(&conditions(&["CKD3", "Diabetes", "CKD4", "HTN"]), 70.0);
        let mixed_reverse =
            derive_nutrient_limits(&conditions(&["HTN", "CKD4", "Diabetes", "CKD3"]), 70.0);
        assert_eq!(mixed, mixed_reverse);
        assert_eq!(mixed.protein_g, Some(42));
        assert_eq!(mixed.sodium_mg, 1500);
    }
}
