use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_AGE: u32 = 30;
pub const DEFAULT_GENDER: &str = "Male";

/// Normalized view of a user's health data, rebuilt for every scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthProfile {
    /// Condition identifiers in first-seen order, without duplicates
    pub conditions: Vec<String>,
    pub medications: Vec<Medication>,
    pub biometrics: Biometrics,
    pub nutrient_limits: NutrientLimits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Medication {
    pub name: String,
    pub interactions: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Biometrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub gender: String,
}

impl Default for Biometrics {
    fn default() -> Self {
        Self {
            weight_kg: DEFAULT_WEIGHT_KG,
            height_cm: DEFAULT_HEIGHT_CM,
            age: DEFAULT_AGE,
            gender: DEFAULT_GENDER.to_string(),
        }
    }
}

/// Daily intake ceilings. `None` means no condition-driven restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NutrientLimits {
    pub sodium_mg: u32,
    pub potassium_mg: Option<u32>,
    pub phosphorus_mg: Option<u32>,
    pub added_sugar_g: u32,
    pub protein_g: Option<u32>,
}

impl HealthProfile {
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }
}
