use crate::domain::a003_rfq::{ProductDraft, ProductLine, SkuDraft, SkuLine};
use crate::domain::common::FieldErrors;

/// Full-array persistence payload for one SKU.
///
/// Every product mutation re-submits the complete array for its SKU —
/// there is no partial/delta update. `revision` is a client-side sequence
/// number so the backend can detect a conflicting concurrent writer
/// instead of silently overwriting.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSave {
    pub sku_index: usize,
    pub sku_id: Option<i64>,
    pub revision: u64,
    pub products: Vec<ProductLine>,
}

/// In-memory SKU list with per-SKU BOM lines.
///
/// Pure draft state until the RFQ header is saved; afterwards the array
/// is (re)submitted as a unit keyed by the RFQ id. Exclusively owned and
/// mutated by the pipeline's current screen — there is exactly one writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkuLines {
    skus: Vec<SkuLine>,
    revisions: Vec<u64>,
}

impl SkuLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a loaded RFQ (edit flow).
    pub fn from_existing(skus: Vec<SkuLine>) -> Self {
        let revisions = vec![0; skus.len()];
        Self { skus, revisions }
    }

    pub fn skus(&self) -> &[SkuLine] {
        &self.skus
    }

    pub fn len(&self) -> usize {
        self.skus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }

    /// Validate and append a SKU. On validation failure nothing mutates
    /// and the field-keyed error map is returned.
    pub fn add_sku(&mut self, draft: &SkuDraft) -> Result<(), FieldErrors> {
        let line = draft.validate()?;
        self.skus.push(line);
        self.revisions.push(0);
        Ok(())
    }

    /// Positional remove; out-of-range is a no-op.
    pub fn remove_sku(&mut self, index: usize) {
        if index < self.skus.len() {
            self.skus.remove(index);
            self.revisions.remove(index);
        }
    }

    /// Validate a product draft, then replace the row at `edit_index` or
    /// append. Returns the complete product array for the SKU, which the
    /// caller must persist immediately.
    pub fn add_or_update_product(
        &mut self,
        sku_index: usize,
        draft: &ProductDraft,
        edit_index: Option<usize>,
    ) -> Result<ProductSave, FieldErrors> {
        let line = draft.validate()?;

        let Some(sku) = self.skus.get_mut(sku_index) else {
            let mut errors = FieldErrors::new();
            errors.push("sku", "Unknown SKU line");
            return Err(errors);
        };

        match edit_index.filter(|i| *i < sku.products.len()) {
            Some(i) => sku.products[i] = line,
            None => sku.products.push(line),
        }

        Ok(self.bump_revision(sku_index))
    }

    /// Positional remove followed by a full-array persist. Returns `None`
    /// when there is nothing to remove — no request must be sent then.
    pub fn remove_product(&mut self, sku_index: usize, index: usize) -> Option<ProductSave> {
        let sku = self.skus.get_mut(sku_index)?;
        if index >= sku.products.len() {
            return None;
        }
        sku.products.remove(index);
        Some(self.bump_revision(sku_index))
    }

    fn bump_revision(&mut self, sku_index: usize) -> ProductSave {
        self.revisions[sku_index] += 1;
        let sku = &self.skus[sku_index];
        ProductSave {
            sku_index,
            sku_id: sku.sku_id,
            revision: self.revisions[sku_index],
            products: sku.products.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sku_draft(name: &str) -> SkuDraft {
        SkuDraft {
            name: name.to_string(),
            quantity: "100".to_string(),
            description: "steel bracket".to_string(),
            drawing_no: "DWG-001".to_string(),
            size: "12.5".to_string(),
        }
    }

    fn product_draft(name: &str) -> ProductDraft {
        ProductDraft {
            product_name: name.to_string(),
            quantity_per_assembly: "2".to_string(),
            raw_material_id: Some(3),
            yield_percentage: "85".to_string(),
            bom_cost_per_kg: "1.75".to_string(),
        }
    }

    #[test]
    fn invalid_sku_draft_does_not_mutate_list() {
        let mut lines = SkuLines::new();
        let mut draft = sku_draft("Bracket-A");
        draft.drawing_no.clear();
        let errors = lines.add_sku(&draft).unwrap_err();
        assert!(errors.get("drawing_no").is_some());
        assert!(lines.is_empty());
    }

    #[test]
    fn added_sku_gets_repeat_zero() {
        let mut lines = SkuLines::new();
        lines.add_sku(&sku_draft("Bracket-A")).unwrap();
        assert_eq!(lines.skus()[0].repeat, 0);
    }

    #[test]
    fn remove_sku_out_of_range_is_noop() {
        let mut lines = SkuLines::new();
        lines.add_sku(&sku_draft("Bracket-A")).unwrap();
        lines.remove_sku(5);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn invalid_product_draft_does_not_persist() {
        let mut lines = SkuLines::new();
        lines.add_sku(&sku_draft("Bracket-A")).unwrap();
        let mut draft = product_draft("Base plate");
        draft.raw_material_id = None;
        let errors = lines.add_or_update_product(0, &draft, None).unwrap_err();
        assert!(errors.get("raw_material_type").is_some());
        assert!(lines.skus()[0].products.is_empty());
    }

    #[test]
    fn add_then_edit_replaces_in_place_and_returns_full_array() {
        let mut lines = SkuLines::new();
        lines.add_sku(&sku_draft("Bracket-A")).unwrap();

        let save = lines
            .add_or_update_product(0, &product_draft("Base plate"), None)
            .unwrap();
        assert_eq!(save.products.len(), 1);
        assert_eq!(save.revision, 1);

        let save = lines
            .add_or_update_product(0, &product_draft("Side plate"), Some(0))
            .unwrap();
        assert_eq!(save.products.len(), 1);
        assert_eq!(save.products[0].product_name, "Side plate");
        assert_eq!(save.revision, 2);
    }

    #[test]
    fn remove_product_on_empty_array_is_noop_with_no_request() {
        let mut lines = SkuLines::new();
        lines.add_sku(&sku_draft("Bracket-A")).unwrap();
        assert_eq!(lines.remove_product(0, 0), None);
        assert_eq!(lines.remove_product(7, 0), None);
    }

    #[test]
    fn remove_product_persists_remaining_array() {
        let mut lines = SkuLines::new();
        lines.add_sku(&sku_draft("Bracket-A")).unwrap();
        lines
            .add_or_update_product(0, &product_draft("Base plate"), None)
            .unwrap();
        lines
            .add_or_update_product(0, &product_draft("Side plate"), None)
            .unwrap();

        let save = lines.remove_product(0, 0).unwrap();
        assert_eq!(save.products.len(), 1);
        assert_eq!(save.products[0].product_name, "Side plate");
        assert_eq!(save.revision, 3);
    }
}
