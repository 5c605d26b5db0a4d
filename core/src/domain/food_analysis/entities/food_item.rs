use serde::{Deserialize, Serialize};

use crate::domain::common::entities::app_errors::CoreError;

/// One food detected in the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub estimated_portion: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

/// Totals as supplied by the model. Not reconciled with the per-food values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalNutrition {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

impl FoodItem {
    pub(crate) fn validate(&self, path: &str) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::InvalidResultSchema(format!(
                "{path}.name must not be empty"
            )));
        }
        check_amounts(
            path,
            [
                ("calories", self.calories),
                ("protein_g", self.protein_g),
                ("carbs_g", self.carbs_g),
                ("fat_g", self.fat_g),
                ("fiber_g", self.fiber_g),
            ],
        )
    }
}

impl TotalNutrition {
    pub(crate) fn validate(&self, path: &str) -> Result<(), CoreError> {
        check_amounts(
            path,
            [
                ("calories", self.calories),
                ("protein_g", self.protein_g),
                ("carbs_g", self.carbs_g),
                ("fat_g", self.fat_g),
                ("fiber_g", self.fiber_g),
            ],
        )
    }
}

fn check_amounts<const N: usize>(path: &str, amounts: [(&str, f64); N]) -> Result<(), CoreError> {
    for (field, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(CoreError::InvalidResultSchema(format!(
                "{path}.{field} must be a non-negative number, got {value}"
            )));
        }
    }
    Ok(())
}
