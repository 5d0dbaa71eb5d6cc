use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::domain::health_profile::entities::HealthProfile;

/// A single piece of stored profile data that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DegradeIssue {
    #[error("stored conditions are not a JSON list: {0}")]
    ConditionsUnparsable(String),

    #[error("condition #{index} ignored: {reason}")]
    InvalidCondition { index: usize, reason: String },

    #[error("stored onboarding data is not a JSON object: {0}")]
    OnboardingUnparsable(String),

    #[error("field `{field}` ignored: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("medication #{index} ignored: {reason}")]
    InvalidMedication { index: usize, reason: String },
}

/// Profile assembled with fallbacks for the fields listed in `issues`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("health profile assembled with {} degraded field(s)", .issues.len())]
pub struct PartialDegradeWarning {
    pub profile: HealthProfile,
    pub issues: Vec<DegradeIssue>,
}

impl PartialDegradeWarning {
    pub fn into_profile(self) -> HealthProfile {
        self.profile
    }
}

/// Profile plus the degrade report, as exposed by the preview endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthProfileView {
    pub profile: HealthProfile,
    pub degraded: bool,
    pub issues: Vec<String>,
}

impl From<Result<HealthProfile, PartialDegradeWarning>> for HealthProfileView {
    fn from(assembled: Result<HealthProfile, PartialDegradeWarning>) -> Self {
        match assembled {
            Ok(profile) => Self {
                profile,
                degraded: false,
                issues: Vec::new(),
            },
            Err(warning) => Self {
                issues: warning.issues.iter().map(ToString::to_string).collect(),
                degraded: true,
                profile: warning.profile,
            },
        }
    }
}
