use crate::domain::{
    common::entities::app_errors::CoreError,
    menu_scan::{
        entities::{MenuAnalysisResult, MenuItemStatus},
        ports::LLMClient,
        value_objects::ModelRequest,
    },
};

const UNMODIFIABLE_CAUTION_NOTE: &str = "No safer preparation was suggested, so avoid it.";

/// Send the request to the model and validate what comes back. A single
/// attempt is made; any failure surfaces as [`CoreError::UpstreamError`].
pub async fn analyze<L: LLMClient>(
    client: &L,
    request: ModelRequest,
) -> Result<MenuAnalysisResult, CoreError> {
    let raw_response = client.generate_with_image(request).await?;
    parse_menu_analysis(&raw_response)
}

/// Parse and validate raw model output.
///
/// Model output is untrusted: the JSON must carry a non-empty `items` list.
/// A CAUTION item without a modification is downgraded to AVOID, and
/// modifications on SAFE and AVOID items are dropped.
pub fn parse_menu_analysis(raw_response: &str) -> Result<MenuAnalysisResult, CoreError> {
    let json = extract_json_object(raw_response).ok_or_else(|| {
        tracing::error!("LLM response contains no JSON object");
        CoreError::UpstreamError("LLM response contains no JSON object".to_string())
    })?;

    let parsed: serde_json::Value = serde_json::from_str(json).map_err(|e| {
        tracing::error!("Failed to parse LLM response: {}", e);
        CoreError::UpstreamError(format!("Failed to parse LLM response: {}", e))
    })?;

    let items = parsed
        .get("items")
        .ok_or_else(|| CoreError::UpstreamError("No items field in response".to_string()))?;

    if items.as_array().is_some_and(Vec::is_empty) {
        tracing::warn!("LLM response contains no menu items");
        return Err(CoreError::UpstreamError(
            "No menu items were recognized".to_string(),
        ));
    }

    let mut result: MenuAnalysisResult = serde_json::from_value(parsed).map_err(|e| {
        tracing::error!("Invalid menu analysis format: {}", e);
        CoreError::UpstreamError(format!("Invalid menu analysis format: {}", e))
    })?;

    for item in &mut result.items {
        item.modification = item
            .modification
            .take()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        match item.status {
            // A caution with nothing to change is not actionable; treat it as avoid.
            MenuItemStatus::Caution if item.modification.is_none() => {
                tracing::warn!(item = %item.name, "CAUTION item without modification, downgraded");
                let reasoning = item.reasoning.trim();
                item.reasoning = if reasoning.is_empty() {
                    UNMODIFIABLE_CAUTION_NOTE.to_string()
                } else {
                    format!("{reasoning} {UNMODIFIABLE_CAUTION_NOTE}")
                };
                item.status = MenuItemStatus::Avoid;
            }
            MenuItemStatus::Caution => {}
            MenuItemStatus::Safe | MenuItemStatus::Avoid => item.modification = None,
        }
    }

    Ok(result)
}

/// Models occasionally wrap JSON in a markdown fence or a sentence; keep the
/// outermost object only.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::menu_scan::{
        ports::MockLLMClient,
        value_objects::{ImageMimeType, ImagePayload},
    };

    fn valid_response() -> String {
        json!({
            "items": [
                {
                    "name": "Grilled salmon",
                    "status": "SAFE",
                    "reasoning": "Lean protein within limits.",
                    "modification": "none needed",
                    "nutrition_gaps": []
                },
                {
                    "name": "Caesar salad",
                    "status": "CAUTION",
                    "reasoning": "Dressing is high in sodium.",
                    "modification": "Ask for dressing on the side",
                    "nutrition_gaps": ["sodium"]
                },
                {
                    "name": "Pepperoni pizza",
                    "status": "AVOID",
                    "reasoning": "Processed meat with phosphorus additives.",
                    "nutrition_gaps": ["phosphorus", "sodium"]
                }
            ],
            "summary": "The salmon is the best choice."
        })
        .to_string()
    }

    #[test]
    fn test_parse_valid_response() {
        let result = parse_menu_analysis(&valid_response()).unwrap();

        assert_eq!(result.items.len(), 3);
        assert_eq!(result.items[0].status, MenuItemStatus::Safe);
        assert_eq!(result.items[0].modification, None);
        assert_eq!(
            result.items[1].modification.as_deref(),
            Some("Ask for dressing on the side")
        );
        assert_eq!(result.items[2].nutrition_gaps, vec!["phosphorus", "sodium"]);
        assert_eq!(result.summary, "The salmon is the best choice.");
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{}\n```", valid_response());
        assert_eq!(parse_menu_analysis(&fenced).unwrap().items.len(), 3);
    }

    #[test]
    fn test_empty_items_rejected() {
        let raw = json!({ "items": [], "summary": "Nothing found" }).to_string();
        assert!(matches!(
            parse_menu_analysis(&raw),
            Err(CoreError::UpstreamError(_))
        ));
    }

    #[test]
    fn test_missing_items_rejected() {
        let raw = json!({ "summary": "Nothing found" }).to_string();
        assert_eq!(
            parse_menu_analysis(&raw),
            Err(CoreError::UpstreamError(
                "No items field in response".to_string()
            ))
        );
    }

    #[test]
    fn test_malformed_json_rejected() {
        for raw in ["I could not read this menu.", "{\"items\": [", "{ not json }"] {
            assert!(matches!(
                parse_menu_analysis(raw),
                Err(CoreError::UpstreamError(_))
            ));
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let raw = json!({
            "items": [{ "name": "Soup", "status": "MAYBE", "reasoning": "?" }],
            "summary": ""
        })
        .to_string();
        assert!(matches!(
            parse_menu_analysis(&raw),
            Err(CoreError::UpstreamError(_))
        ));
    }

    #[test]
    fn test_caution_without_modification_downgraded() {
        let raw = json!({
            "items": [
                { "name": "Ramen", "status": "CAUTION", "reasoning": "Salty broth.", "modification": "  " },
                { "name": "Dumplings", "status": "CAUTION", "reasoning": "Soy dip.", "modification": "Skip the dip" }
            ],
            "summary": ""
        })
        .to_string();

        let result = parse_menu_analysis(&raw).unwrap();

        assert_eq!(result.items[0].status, MenuItemStatus::Avoid);
        assert_eq!(result.items[0].modification, None);
        assert!(result.items[0].reasoning.starts_with("Salty broth."));
        assert!(result.items[0].reasoning.ends_with(UNMODIFIABLE_CAUTION_NOTE));
        assert_eq!(result.items[1].status, MenuItemStatus::Caution);
        assert_eq!(result.items[1].modification.as_deref(), Some("Skip the dip"));
    }

    #[tokio::test]
    async fn test_analyze_propagates_client_failure() {
        let mut client = MockLLMClient::new();
        client.expect_generate_with_image().times(1).returning(|_| {
            Box::pin(async {
                Err(CoreError::UpstreamError("LLM API error: timeout".to_string()))
            })
        });

        let request = ModelRequest {
            instruction_version: "test",
            system_instruction: "test",
            patient_context: String::new(),
            image: ImagePayload::encode(b"img", ImageMimeType::Jpeg),
            response_schema: json!({}),
        };

        assert_eq!(
            analyze(&client, request).await,
            Err(CoreError::UpstreamError("LLM API error: timeout".to_string()))
        );
    }
}
