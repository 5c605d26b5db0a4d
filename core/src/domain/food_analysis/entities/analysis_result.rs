use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::food_item::{FoodItem, TotalNutrition};
use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub foods: Vec<FoodItem>,
    pub total_nutrition: TotalNutrition,
    /// Expected in `[0, 1]`. Out-of-range values are rejected, never clamped.
    pub confidence_score: f64,
    pub analysis_summary: String,
}

/// The model's own refusal, e.g. when the image holds no recognizable food.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisError {
    pub error: String,
}

/// A decoded reply. Decided once at the decoding boundary; nothing downstream
/// inspects the raw JSON shape again.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisReply {
    Result(AnalysisResult),
    Rejected(AnalysisError),
}

impl AnalysisResult {
    pub fn validate(&self) -> Result<(), CoreError> {
        for (index, food) in self.foods.iter().enumerate() {
            food.validate(&format!("foods[{index}]"))?;
        }
        self.total_nutrition.validate("total_nutrition")?;

        if !(0.0..=1.0).contains(&self.confidence_score) {
            return Err(CoreError::InvalidResultSchema(format!(
                "confidence_score must be within [0, 1], got {}",
                self.confidence_score
            )));
        }
        Ok(())
    }
}

impl AnalysisReply {
    /// Splits a decoded JSON value into the result or the refusal branch.
    ///
    /// An object carrying a string `error` key is a refusal, whatever else it
    /// contains. Anything else must satisfy the full result schema.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let Value::Object(object) = value else {
            return Err(CoreError::InvalidResultSchema(
                "reply is not a JSON object".to_string(),
            ));
        };

        if let Some(error) = object.get("error") {
            return match error {
                Value::String(message) => Ok(AnalysisReply::Rejected(AnalysisError {
                    error: message.clone(),
                })),
                other => Err(CoreError::InvalidResultSchema(format!(
                    "`error` must be a string, got {other}"
                ))),
            };
        }

        let result: AnalysisResult = serde_json::from_value(Value::Object(object))
            .map_err(|e| CoreError::InvalidResultSchema(e.to_string()))?;
        result.validate()?;

        Ok(AnalysisReply::Result(result))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn result_json() -> Value {
        json!({
            "foods": [
                {
                    "name": "Grilled chicken",
                    "estimated_portion": "1 breast",
                    "calories": 280,
                    "protein_g": 53.0,
                    "carbs_g": 0,
                    "fat_g": 6.1,
                    "fiber_g": 0
                },
                {
                    "name": "Rice",
                    "estimated_portion": "1 cup",
                    "calories": 205,
                    "protein_g": 4.3,
                    "carbs_g": 44.5,
                    "fat_g": 0.4,
                    "fiber_g": 0.6
                }
            ],
            "total_nutrition": {
                "calories": 485,
                "protein_g": 57.3,
                "carbs_g": 44.5,
                "fat_g": 6.5,
                "fiber_g": 0.6
            },
            "confidence_score": 0.82,
            "analysis_summary": "A lean, protein-heavy plate."
        })
    }

    #[test]
    fn decodes_result_branch() {
        let reply = AnalysisReply::from_value(result_json()).expect("valid reply");
        let AnalysisReply::Result(result) = reply else {
            panic!("expected result branch");
        };
        assert_eq!(result.foods.len(), 2);
        assert_eq!(result.foods[1].name, "Rice");
        assert_eq!(result.total_nutrition.calories, 485.0);
        assert_eq!(result.total_nutrition.protein_g, 57.3);
        assert_eq!(result.total_nutrition.fiber_g, 0.6);
    }

    #[test]
    fn empty_food_list_is_allowed() {
        let mut value = result_json();
        value["foods"] = json!([]);
        let reply = AnalysisReply::from_value(value).expect("valid reply");
        assert!(matches!(reply, AnalysisReply::Result(r) if r.foods.is_empty()));
    }

    #[test]
    fn error_key_selects_rejected_branch() {
        let reply = AnalysisReply::from_value(json!({"error": "X"})).expect("valid reply");
        assert_eq!(
            reply,
            AnalysisReply::Rejected(AnalysisError {
                error: "X".to_string()
            })
        );
    }

    #[test]
    fn non_string_error_is_schema_violation() {
        let err = AnalysisReply::from_value(json!({"error": 42})).unwrap_err();
        assert!(matches!(err, CoreError::InvalidResultSchema(_)));
    }

    #[test]
    fn missing_total_nutrition_is_schema_violation() {
        let mut value = result_json();
        value.as_object_mut().map(|o| o.remove("total_nutrition"));
        let err = AnalysisReply::from_value(value).unwrap_err();
        assert!(matches!(err, CoreError::InvalidResultSchema(_)));
    }

    #[test]
    fn numeric_strings_are_schema_violations() {
        let mut value = result_json();
        value["foods"][0]["calories"] = json!("280");
        let err = AnalysisReply::from_value(value).unwrap_err();
        assert!(matches!(err, CoreError::InvalidResultSchema(_)));
    }

    #[test]
    fn out_of_range_values_are_rejected_not_clamped() {
        let mut value = result_json();
        value["confidence_score"] = json!(1.4);
        assert!(matches!(
            AnalysisReply::from_value(value).unwrap_err(),
            CoreError::InvalidResultSchema(_)
        ));

        let mut value = result_json();
        value["total_nutrition"]["fat_g"] = json!(-1);
        let err = AnalysisReply::from_value(value).unwrap_err();
        let CoreError::InvalidResultSchema(reason) = err else {
            panic!("expected schema error");
        };
        assert!(reason.contains("total_nutrition.fat_g"));
    }

    #[test]
    fn blank_food_name_is_rejected() {
        let mut value = result_json();
        value["foods"][1]["name"] = json!("   ");
        let err = AnalysisReply::from_value(value).unwrap_err();
        let CoreError::InvalidResultSchema(reason) = err else {
            panic!("expected schema error");
        };
        assert!(reason.contains("foods[1].name"));
    }

    #[test]
    fn non_object_reply_is_schema_violation() {
        let err = AnalysisReply::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, CoreError::InvalidResultSchema(_)));
    }
}
