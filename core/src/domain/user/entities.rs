use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of a stored user row that health profiling reads.
///
/// `conditions` and `onboarding_data` are JSON documents persisted as text by
/// the onboarding flow; they are decoded leniently by the profile assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserHealthRecord {
    pub id: Uuid,
    pub conditions: Option<String>,
    pub onboarding_data: Option<String>,
    pub age: Option<i32>,
}
