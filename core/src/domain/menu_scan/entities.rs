use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum MenuItemStatus {
    Safe,
    Caution,
    Avoid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuAnalysisItem {
    pub name: String,
    pub status: MenuItemStatus,
    pub reasoning: String,
    /// Only set for CAUTION items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification: Option<String>,
    #[serde(default, alias = "nutritionGaps")]
    pub nutrition_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MenuAnalysisResult {
    pub items: Vec<MenuAnalysisItem>,
    #[serde(default)]
    pub summary: String,
}
