use crate::domain::{
    health_profile::entities::{HealthProfile, Medication, NutrientLimits},
    menu_scan::{
        schema::get_menu_analysis_schema,
        value_objects::{ImagePayload, ImageMimeType, ModelRequest},
    },
};

pub const MENU_ANALYSIS_INSTRUCTION_VERSION: &str = "menu-analysis/2";

/// Clinical ruleset sent verbatim as the model's system instruction.
pub const MENU_ANALYSIS_INSTRUCTION: &str = r#"You are a clinical dietitian reviewing a restaurant menu photo for one specific patient.

Rules:
1. Identify every distinct dish or drink on the menu. Ignore prices, section headings, decorations and restaurant branding.
2. Classify each item against the patient's conditions, medications and daily nutrient limits:
   - SAFE: fits the patient's limits as typically prepared.
   - CAUTION: acceptable only with a change in preparation or portion.
   - AVOID: likely to exceed a limit or conflict with a condition or medication.
3. Flag hidden risks even when the menu does not state them: phosphorus additives in processed meats, cheeses and colas; hidden sodium in sauces, broths, cured and pickled foods; high sugar in dressings, glazes and drinks; potassium-heavy sides for kidney patients; food-drug interactions for the listed medications.
4. For CAUTION items only, give exactly one concrete modification the patient can ask for (for example "ask for the sauce on the side"). Do not give a modification for SAFE or AVOID items.
5. In nutrition_gaps list nutrients the item lacks or overloads for this patient; use an empty list when there is nothing notable.
6. Keep each reasoning to one or two sentences that reference the patient's conditions or limits.
7. summary is two or three sentences naming the best choices on this menu for the patient.

Respond with JSON only, no markdown and no commentary, in exactly this shape:
{"items":[{"name":"string","status":"SAFE|CAUTION|AVOID","reasoning":"string","modification":"string, CAUTION only","nutrition_gaps":["string"]}],"summary":"string"}"#;

/// Render the patient profile as the context block that accompanies the image.
pub fn render_patient_context(profile: &HealthProfile) -> String {
    let conditions = if profile.has_conditions() {
        profile.conditions.join(", ")
    } else {
        "none reported".to_string()
    };

    let biometrics = &profile.biometrics;
    let mut lines = vec![
        "PATIENT PROFILE".to_string(),
        format!("Conditions: {conditions}"),
        format!(
            "Biometrics: {} kg, {} cm, age {}, {}",
            format_quantity(biometrics.weight_kg),
            format_quantity(biometrics.height_cm),
            biometrics.age,
            biometrics.gender
        ),
    ];

    if profile.medications.is_empty() {
        lines.push("Medications: none reported".to_string());
    } else {
        lines.push("Medications:".to_string());
        lines.extend(profile.medications.iter().map(render_medication));
    }

    lines.push(render_limits(&profile.nutrient_limits));

    let mut context = lines.join("\n");
    context.push('\n');
    context
}

fn render_medication(medication: &Medication) -> String {
    let mut line = format!("- {}", medication.name);
    if !medication.interactions.is_empty() {
        line.push_str(&format!("; interactions: {}", medication.interactions.join(", ")));
    }
    if !medication.warnings.is_empty() {
        line.push_str(&format!("; warnings: {}", medication.warnings.join(", ")));
    }
    line
}

fn render_limits(limits: &NutrientLimits) -> String {
    let mut parts = vec![
        format!("sodium {} mg", limits.sodium_mg),
        format!("added sugar {} g", limits.added_sugar_g),
    ];

    if let Some(potassium) = limits.potassium_mg {
        parts.push(format!("potassium {potassium} mg"));
    }
    if let Some(phosphorus) = limits.phosphorus_mg {
        parts.push(format!("phosphorus {phosphorus} mg"));
    }
    if let Some(protein) = limits.protein_g {
        parts.push(format!("protein {protein} g"));
    }

    format!("Daily limits: {}", parts.join(", "))
}

/// 70.0 renders as "70", 72.5 as "72.5"
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Combine the fixed instruction, the patient context and the image into a
/// single model request. Pure: identical inputs give identical requests.
pub fn build_model_request(
    profile: &HealthProfile,
    image_data: &[u8],
    mime_type: ImageMimeType,
) -> ModelRequest {
    ModelRequest {
        instruction_version: MENU_ANALYSIS_INSTRUCTION_VERSION,
        system_instruction: MENU_ANALYSIS_INSTRUCTION,
        patient_context: render_patient_context(profile),
        image: ImagePayload::encode(image_data, mime_type),
        response_schema: get_menu_analysis_schema(),
    }
}
