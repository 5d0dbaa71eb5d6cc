use serde_json::json;

/// Returns the JSON schema for menu analysis LLM responses
pub fn get_menu_analysis_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "status": {
                            "type": "string",
                            "enum": ["SAFE", "CAUTION", "AVOID"]
                        },
                        "reasoning": { "type": "string" },
                        "modification": { "type": "string", "nullable": true },
                        "nutrition_gaps": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": ["name", "status", "reasoning", "nutrition_gaps"]
                }
            },
            "summary": { "type": "string" }
        },
        "required": ["items", "summary"]
    })
}
