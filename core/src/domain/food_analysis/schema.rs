use serde_json::json;

/// Returns the JSON schema for single food analysis LLM responses
pub fn get_single_food_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string" },
            "giValue": { "type": "number" },
            "giRating": { "type": "string" },
            "sugarPer100g": { "type": "number" },
            "carbsPer100g": { "type": "number" },
            "advice": { "type": "string" },
            "portionSize": { "type": "string" }
        },
        "required": [
            "name", "giValue", "giRating", "sugarPer100g",
            "carbsPer100g", "advice", "portionSize"
        ]
    })
}

/// Returns the JSON schema for whole meal LLM responses
pub fn get_meal_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "foods": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "sugarPer100g": { "type": "number" },
                        "giRating": { "type": "string" }
                    },
                    "required": ["name", "sugarPer100g", "giRating"]
                }
            },
            "totalSugar": { "type": "number" },
            "totalCarbs": { "type": "number" }
        },
        "required": ["foods", "totalSugar", "totalCarbs"]
    })
}
