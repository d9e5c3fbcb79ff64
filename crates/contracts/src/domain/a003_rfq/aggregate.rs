use crate::domain::common::validation::require_text;
use crate::domain::common::FieldErrors;
use serde::{Deserialize, Serialize};

/// Lifecycle of an RFQ as it moves through the creation pipeline.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RfqStatus {
    #[default]
    Draft,
    ProductsAdded,
    DocumentsAdded,
    Finalized,
}

/// BOM row nested under a SKU: raw material consumption and yield for one
/// assembly. All five fields are mandatory for a row to be valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductLine {
    pub product_name: String,
    pub quantity_per_assembly: f64,
    pub raw_material_id: i64,
    pub yield_percentage: f64,
    pub bom_cost_per_kg: f64,
}

/// One requested part within an RFQ.
///
/// `sku_id` is `None` until the backend has persisted the line; the whole
/// SKU array is submitted as a unit together with the RFQ header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkuLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<i64>,
    pub name: String,
    pub quantity: u32,
    pub description: String,
    pub drawing_no: String,
    pub size: f64,
    #[serde(default)]
    pub repeat: i32,
    #[serde(default)]
    pub products: Vec<ProductLine>,
}

/// Root workflow entity grouping a client, SKUs, products and documents
/// (aggregate a003). `id` is allocated by the backend on the first
/// successful header save and is required by every later pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rfq {
    pub id: i64,
    pub name: String,
    pub owning_user_id: i64,
    pub client_id: i64,
    #[serde(default)]
    pub status: RfqStatus,
    #[serde(default)]
    pub skus: Vec<SkuLine>,
}

// ============================================================================
// Form drafts
// ============================================================================

/// Raw SKU form input. Numeric fields stay strings until validation so the
/// form can echo back exactly what the operator typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkuDraft {
    pub name: String,
    pub quantity: String,
    pub description: String,
    pub drawing_no: String,
    pub size: String,
}

impl SkuDraft {
    /// Parse and validate the five required fields. Returns the typed line
    /// (with `repeat` defaulted to 0) or a field-keyed error map.
    pub fn validate(&self) -> Result<SkuLine, FieldErrors> {
        let mut errors = FieldErrors::new();

        require_text(&mut errors, "name", &self.name, "SKU name is required");
        require_text(
            &mut errors,
            "description",
            &self.description,
            "Description is required",
        );
        require_text(
            &mut errors,
            "drawing_no",
            &self.drawing_no,
            "Drawing number is required",
        );

        let quantity = match self.quantity.trim().parse::<u32>() {
            Ok(q) if q > 0 => Some(q),
            _ => {
                errors.push("quantity", "Quantity must be a positive whole number");
                None
            }
        };

        let size = match self.size.trim().parse::<f64>() {
            Ok(s) if s >= 0.0 => Some(s),
            _ => {
                errors.push("size", "Size must be a non-negative number");
                None
            }
        };

        errors.into_result()?;

        Ok(SkuLine {
            sku_id: None,
            name: self.name.trim().to_string(),
            quantity: quantity.unwrap_or_default(),
            description: self.description.trim().to_string(),
            drawing_no: self.drawing_no.trim().to_string(),
            size: size.unwrap_or_default(),
            repeat: 0,
            products: Vec::new(),
        })
    }
}

/// Raw product/BOM form input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub product_name: String,
    pub quantity_per_assembly: String,
    pub raw_material_id: Option<i64>,
    pub yield_percentage: String,
    pub bom_cost_per_kg: String,
}

impl ProductDraft {
    /// Pre-fill the form for editing an existing row.
    pub fn from_line(line: &ProductLine) -> Self {
        Self {
            product_name: line.product_name.clone(),
            quantity_per_assembly: line.quantity_per_assembly.to_string(),
            raw_material_id: Some(line.raw_material_id),
            yield_percentage: line.yield_percentage.to_string(),
            bom_cost_per_kg: line.bom_cost_per_kg.to_string(),
        }
    }

    /// Parse and validate the five required fields.
    pub fn validate(&self) -> Result<ProductLine, FieldErrors> {
        let mut errors = FieldErrors::new();

        require_text(
            &mut errors,
            "product_name",
            &self.product_name,
            "Product name is required",
        );

        let quantity = match self.quantity_per_assembly.trim().parse::<f64>() {
            Ok(q) if q > 0.0 => Some(q),
            _ => {
                errors.push(
                    "quantity_per_assembly",
                    "Quantity per assembly must be greater than zero",
                );
                None
            }
        };

        let raw_material_id = match self.raw_material_id {
            Some(id) if id > 0 => Some(id),
            _ => {
                errors.push("raw_material_type", "Raw material type is required");
                None
            }
        };

        let yield_pct = match self.yield_percentage.trim().parse::<f64>() {
            Ok(y) if (0.0..=100.0).contains(&y) => Some(y),
            _ => {
                errors.push("yield_percentage", "Yield must be between 0 and 100");
                None
            }
        };

        let bom_cost = match self.bom_cost_per_kg.trim().parse::<f64>() {
            Ok(c) if c >= 0.0 => Some(c),
            _ => {
                errors.push("bom_cost_per_kg", "BOM cost must be a non-negative number");
                None
            }
        };

        errors.into_result()?;

        Ok(ProductLine {
            product_name: self.product_name.trim().to_string(),
            quantity_per_assembly: quantity.unwrap_or_default(),
            raw_material_id: raw_material_id.unwrap_or_default(),
            yield_percentage: yield_pct.unwrap_or_default(),
            bom_cost_per_kg: bom_cost.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku_draft() -> SkuDraft {
        SkuDraft {
            name: "Bracket-A".to_string(),
            quantity: "100".to_string(),
            description: "steel bracket".to_string(),
            drawing_no: "DWG-001".to_string(),
            size: "12.5".to_string(),
        }
    }

    fn product_draft() -> ProductDraft {
        ProductDraft {
            product_name: "Base plate".to_string(),
            quantity_per_assembly: "2".to_string(),
            raw_material_id: Some(3),
            yield_percentage: "85".to_string(),
            bom_cost_per_kg: "1.75".to_string(),
        }
    }

    #[test]
    fn valid_sku_draft_parses_with_repeat_zero() {
        let line = sku_draft().validate().unwrap();
        assert_eq!(line.quantity, 100);
        assert_eq!(line.size, 12.5);
        assert_eq!(line.repeat, 0);
        assert!(line.sku_id.is_none());
        assert!(line.products.is_empty());
    }

    #[test]
    fn sku_draft_rejects_each_missing_required_field() {
        for field in ["name", "quantity", "description", "drawing_no", "size"] {
            let mut draft = sku_draft();
            match field {
                "name" => draft.name.clear(),
                "quantity" => draft.quantity.clear(),
                "description" => draft.description.clear(),
                "drawing_no" => draft.drawing_no.clear(),
                "size" => draft.size.clear(),
                _ => unreachable!(),
            }
            let errors = draft.validate().unwrap_err();
            assert!(errors.get(field).is_some(), "no error recorded for {field}");
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn sku_quantity_must_be_positive_integer() {
        let mut draft = sku_draft();
        draft.quantity = "0".to_string();
        assert!(draft.validate().is_err());
        draft.quantity = "12.5".to_string();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn product_draft_rejects_each_missing_required_field() {
        let cases: Vec<(&str, Box<dyn Fn(&mut ProductDraft)>)> = vec![
            ("product_name", Box::new(|d| d.product_name.clear())),
            (
                "quantity_per_assembly",
                Box::new(|d| d.quantity_per_assembly.clear()),
            ),
            ("raw_material_type", Box::new(|d| d.raw_material_id = None)),
            ("yield_percentage", Box::new(|d| d.yield_percentage.clear())),
            ("bom_cost_per_kg", Box::new(|d| d.bom_cost_per_kg.clear())),
        ];
        for (field, mutate) in cases {
            let mut draft = product_draft();
            mutate(&mut draft);
            let errors = draft.validate().unwrap_err();
            assert!(errors.get(field).is_some(), "no error recorded for {field}");
        }
    }

    #[test]
    fn yield_percentage_out_of_range_is_rejected() {
        let mut draft = product_draft();
        draft.yield_percentage = "101".to_string();
        assert!(draft.validate().is_err());
        draft.yield_percentage = "100".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn product_roundtrip_through_from_line() {
        let line = product_draft().validate().unwrap();
        let again = ProductDraft::from_line(&line).validate().unwrap();
        assert_eq!(line, again);
    }
}
