use crate::domain::common::validation::require_text;
use crate::domain::common::FieldErrors;
use serde::{Deserialize, Serialize};

pub const SCRAP_RATE_MESSAGE: &str = "Scrap rate cannot be more than raw material rate.";

/// Reference data for the product/BOM form's material selector
/// (aggregate a002). Read-only inside the RFQ pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMaterial {
    pub id: i64,
    pub raw_material_name: String,
    pub raw_material_rate: f64,
    #[serde(default)]
    pub scrap_rate: f64,
}

/// Form input for creating/editing a raw material. Values arrive as the
/// operator typed them and are parsed during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawMaterialDto {
    pub raw_material_name: String,
    pub raw_material_rate: String,
    pub scrap_rate: String,
}

impl RawMaterialDto {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(
            &mut errors,
            "raw_material_name",
            &self.raw_material_name,
            "Raw material name is required",
        );

        let rate = self.raw_material_rate.trim().parse::<f64>();
        match &rate {
            Ok(r) if *r >= 0.0 => {}
            _ => errors.push(
                "raw_material_rate",
                "Raw material rate must be a non-negative number",
            ),
        }

        let scrap = self.scrap_rate.trim().parse::<f64>();
        match &scrap {
            Ok(s) if *s >= 0.0 => {
                if let Ok(r) = rate {
                    if *s > r {
                        errors.push("scrap_rate", SCRAP_RATE_MESSAGE);
                    }
                }
            }
            _ => errors.push("scrap_rate", "Scrap rate must be a non-negative number"),
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(rate: &str, scrap: &str) -> RawMaterialDto {
        RawMaterialDto {
            raw_material_name: "EN8 Steel".to_string(),
            raw_material_rate: rate.to_string(),
            scrap_rate: scrap.to_string(),
        }
    }

    #[test]
    fn scrap_rate_must_not_exceed_material_rate() {
        let errors = dto("52.0", "60.0").validate().unwrap_err();
        assert_eq!(errors.get("scrap_rate"), Some(SCRAP_RATE_MESSAGE));
    }

    #[test]
    fn scrap_rate_equal_to_material_rate_is_allowed() {
        assert!(dto("52.0", "52.0").validate().is_ok());
    }

    #[test]
    fn non_numeric_rates_are_rejected() {
        let errors = dto("abc", "1").validate().unwrap_err();
        assert!(errors.get("raw_material_rate").is_some());
    }
}
