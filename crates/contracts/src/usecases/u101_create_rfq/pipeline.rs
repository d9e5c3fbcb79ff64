use super::lines::SkuLines;
use super::notification::{compose, EmailTemplate, NotifyRequest};
use super::request::SaveRfqRequest;
use crate::domain::a003_rfq::Rfq;
use crate::domain::common::validation::require_text;
use crate::domain::common::FieldErrors;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Guard message when finalizing without any uploaded document.
pub const FINALIZE_GUARD_MESSAGE: &str =
    "Please upload at least one document before saving the RFQ.";

/// Banner shown when the notification send fails during finalization.
pub const FINALIZE_FAILED_MESSAGE: &str = "Error saving RFQ.";

/// Whether the RFQ quotes a brand-new product (SKU/BOM entry required) or
/// an existing one (the SKU/BOM stage is skipped entirely).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    #[default]
    New,
    Existing,
}

/// Stages of the RFQ creation wizard.
///
/// `Failed` is non-terminal: the operator may retry from the step that
/// failed. `Finalized` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    EditingHeader,
    ChoosingProductType,
    EditingProducts,
    UploadingDocuments,
    Finalized,
    Failed,
}

/// Operator identity and notification wiring, injected once at pipeline
/// start. Nothing in the pipeline reads ambient browser storage mid-flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineContext {
    pub user_id: i64,
    pub user_email: String,
    pub template_tag: String,
    pub email_config_id: i64,
}

/// RFQ header form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RfqHeaderDraft {
    pub name: String,
    pub client_id: Option<i64>,
}

/// The RFQ creation/fulfillment pipeline.
///
/// Pure state machine: all network effects live with the caller, which
/// reports outcomes back through `header_saved`/`header_failed`/
/// `finalized`/`finalize_failed`. The central invariant is that no stage
/// past `EditingHeader` is reachable until the backend has allocated an
/// RFQ id.
#[derive(Debug, Clone, PartialEq)]
pub struct RfqPipeline {
    ctx: PipelineContext,
    stage: PipelineStage,
    rfq_id: Option<i64>,
    product_type: ProductType,
    idempotency_key: Uuid,
    last_error: Option<String>,
    documents: usize,
    pub header: RfqHeaderDraft,
    pub lines: SkuLines,
}

impl RfqPipeline {
    pub fn new(ctx: PipelineContext) -> Self {
        Self {
            ctx,
            stage: PipelineStage::EditingHeader,
            rfq_id: None,
            product_type: ProductType::default(),
            idempotency_key: Uuid::new_v4(),
            last_error: None,
            documents: 0,
            header: RfqHeaderDraft::default(),
            lines: SkuLines::new(),
        }
    }

    /// Seed the pipeline from a persisted RFQ (edit flow). Starts back at
    /// the header stage; the save goes through PUT instead of POST.
    ///
    /// The backend does not persist the product-type choice, so it is
    /// inferred from the SKU list: no SKUs means `Existing`, any SKU means
    /// `New`. Consequence: an existing-product RFQ re-opened for edit
    /// never shows the BOM stage.
    pub fn load_existing(ctx: PipelineContext, rfq: Rfq) -> Self {
        let mut pipeline = Self::new(ctx);
        pipeline.rfq_id = Some(rfq.id);
        pipeline.header = RfqHeaderDraft {
            name: rfq.name,
            client_id: Some(rfq.client_id),
        };
        pipeline.product_type = if rfq.skus.is_empty() {
            ProductType::Existing
        } else {
            ProductType::New
        };
        pipeline.lines = SkuLines::from_existing(rfq.skus);
        pipeline
    }

    pub fn context(&self) -> &PipelineContext {
        &self.ctx
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn rfq_id(&self) -> Option<i64> {
        self.rfq_id
    }

    pub fn is_update(&self) -> bool {
        self.rfq_id.is_some()
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    /// The product type is decided while the header is being edited; the
    /// choice is frozen once the pipeline moves past the branch stage.
    pub fn set_product_type(&mut self, product_type: ProductType) {
        if matches!(
            self.stage,
            PipelineStage::EditingHeader | PipelineStage::ChoosingProductType
        ) {
            self.product_type = product_type;
        }
    }

    pub fn idempotency_key(&self) -> Uuid {
        self.idempotency_key
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }

    /// Reported by the document panel after every re-fetch of the list.
    pub fn set_document_count(&mut self, count: usize) {
        self.documents = count;
    }

    // ========================================================================
    // Header stage
    // ========================================================================

    /// Guard for leaving the header stage: name present, client selected,
    /// and for new-product RFQs at least one SKU.
    pub fn header_guard(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.header.name, "RFQ name is required");
        if self.header.client_id.is_none() {
            errors.push("client", "Client is required");
        }
        if self.product_type == ProductType::New && self.lines.is_empty() {
            errors.push("skus", "Add at least one SKU before saving");
        }
        errors.into_result()
    }

    /// Validate the header and build the combined header+SKUs request.
    pub fn save_request(&self) -> Result<SaveRfqRequest, FieldErrors> {
        self.header_guard()?;
        Ok(SaveRfqRequest {
            p_rfq_name: self.header.name.trim().to_string(),
            p_user_id: self.ctx.user_id,
            p_client_id: self.header.client_id.unwrap_or_default(),
            p_idempotency_key: self.idempotency_key.to_string(),
            p_skus: self.lines.skus().to_vec(),
        })
    }

    /// Header save succeeded: capture the durable RFQ id and advance.
    pub fn header_saved(&mut self, rfq_id: i64) {
        if self.stage == PipelineStage::EditingHeader {
            self.rfq_id = Some(rfq_id);
            self.last_error = None;
            self.stage = PipelineStage::ChoosingProductType;
        }
    }

    /// Header save failed: stay on the header stage and surface the
    /// server's message verbatim. No automatic retry.
    pub fn header_failed(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    // ========================================================================
    // Product type branch
    // ========================================================================

    /// Pure UI branch: "new" continues to the BOM editor, "existing" jumps
    /// straight to document upload. Refused until an RFQ id exists.
    pub fn advance_from_product_type(&mut self) -> Result<(), String> {
        if self.stage != PipelineStage::ChoosingProductType {
            return Err("Save the RFQ header first".to_string());
        }
        if self.rfq_id.is_none() {
            return Err("RFQ id is not available yet".to_string());
        }
        self.stage = match self.product_type {
            ProductType::New => PipelineStage::EditingProducts,
            ProductType::Existing => PipelineStage::UploadingDocuments,
        };
        Ok(())
    }

    // ========================================================================
    // Product / document stages
    // ========================================================================

    /// Operator-triggered move to document upload. No guard: SKUs are not
    /// required to have products attached, BOM rows save individually.
    pub fn proceed_to_documents(&mut self) -> Result<(), String> {
        if self.stage != PipelineStage::EditingProducts {
            return Err("Products stage is not active".to_string());
        }
        self.stage = PipelineStage::UploadingDocuments;
        Ok(())
    }

    /// Backward navigation from documents to the BOM editor; pure UI
    /// transition, nothing is discarded. Only meaningful for new-product
    /// RFQs, which are the only ones with a products stage.
    pub fn back_to_products(&mut self) -> Result<(), String> {
        if self.stage != PipelineStage::UploadingDocuments {
            return Err("Documents stage is not active".to_string());
        }
        if self.product_type != ProductType::New {
            return Err("Existing-product RFQs have no products stage".to_string());
        }
        self.stage = PipelineStage::EditingProducts;
        Ok(())
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    /// Guard for the Save action on the documents stage.
    pub fn finalize_guard(&self) -> Result<i64, String> {
        if self.stage != PipelineStage::UploadingDocuments {
            return Err("Documents stage is not active".to_string());
        }
        let Some(rfq_id) = self.rfq_id else {
            return Err("RFQ id is not available yet".to_string());
        };
        if self.documents == 0 {
            return Err(FINALIZE_GUARD_MESSAGE.to_string());
        }
        Ok(rfq_id)
    }

    /// Build the completion notification from the fetched template. Runs
    /// the finalize guard first, so it cannot fire without documents or id.
    pub fn notify_request(&self, template: &EmailTemplate) -> Result<NotifyRequest, String> {
        let rfq_id = self.finalize_guard()?;
        let email = compose(template, rfq_id);
        Ok(NotifyRequest {
            email_config_id: self.ctx.email_config_id,
            to_mail: self.ctx.user_email.clone(),
            subject: email.subject,
            email_content: email.body,
        })
    }

    /// Notification accepted: the pipeline is done.
    pub fn finalized(&mut self) {
        if self.stage == PipelineStage::UploadingDocuments {
            self.last_error = None;
            self.stage = PipelineStage::Finalized;
        }
    }

    /// Notification (or a step of finalization) failed.
    pub fn finalize_failed(&mut self) {
        if self.stage == PipelineStage::UploadingDocuments {
            self.last_error = Some(FINALIZE_FAILED_MESSAGE.to_string());
            self.stage = PipelineStage::Failed;
        }
    }

    /// Return from `Failed` to the documents stage for another attempt.
    pub fn retry_after_failure(&mut self) {
        if self.stage == PipelineStage::Failed {
            self.last_error = None;
            self.stage = PipelineStage::UploadingDocuments;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_rfq::{SkuDraft, SkuLine};

    fn ctx() -> PipelineContext {
        PipelineContext {
            user_id: 3,
            user_email: "ops@example.com".to_string(),
            template_tag: "rfq-created".to_string(),
            email_config_id: 2,
        }
    }

    fn bracket_sku() -> SkuDraft {
        SkuDraft {
            name: "Bracket-A".to_string(),
            quantity: "100".to_string(),
            description: "steel bracket".to_string(),
            drawing_no: "DWG-001".to_string(),
            size: "12.5".to_string(),
        }
    }

    fn template() -> EmailTemplate {
        EmailTemplate {
            id: 1,
            content: "Thank you for your enquiry.".to_string(),
            signature: "Sales Team".to_string(),
        }
    }

    #[test]
    fn header_guard_requires_name_client_and_sku_for_new_products() {
        let pipeline = RfqPipeline::new(ctx());
        let errors = pipeline.header_guard().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("client").is_some());
        assert!(errors.get("skus").is_some());
    }

    #[test]
    fn header_guard_skips_sku_requirement_for_existing_products() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.set_product_type(ProductType::Existing);
        assert!(pipeline.header_guard().is_ok());
    }

    #[test]
    fn save_request_carries_idempotency_key_and_skus() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.lines.add_sku(&bracket_sku()).unwrap();

        let request = pipeline.save_request().unwrap();
        assert_eq!(request.p_rfq_name, "Q1-Fittings");
        assert_eq!(request.p_client_id, 7);
        assert_eq!(request.p_user_id, 3);
        assert_eq!(request.p_skus.len(), 1);
        assert_eq!(
            request.p_idempotency_key,
            pipeline.idempotency_key().to_string()
        );
    }

    #[test]
    fn scenario_a_new_product_end_to_end() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.lines.add_sku(&bracket_sku()).unwrap();
        assert!(pipeline.save_request().is_ok());

        pipeline.header_saved(42);
        assert_eq!(pipeline.stage(), PipelineStage::ChoosingProductType);
        assert_eq!(pipeline.rfq_id(), Some(42));

        pipeline.advance_from_product_type().unwrap();
        assert_eq!(pipeline.stage(), PipelineStage::EditingProducts);

        pipeline.proceed_to_documents().unwrap();
        assert_eq!(pipeline.stage(), PipelineStage::UploadingDocuments);

        pipeline.set_document_count(1);
        let notify = pipeline.notify_request(&template()).unwrap();
        assert!(notify.subject.contains("RFQ created successfully"));
        assert!(notify.email_content.contains("RFQ with Id: 42"));
        assert_eq!(notify.to_mail, "ops@example.com");
        assert_eq!(notify.email_config_id, 2);

        pipeline.finalized();
        assert_eq!(pipeline.stage(), PipelineStage::Finalized);
    }

    #[test]
    fn scenario_b_existing_product_skips_bom_stage() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q2-Valves".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.set_product_type(ProductType::Existing);
        assert!(pipeline.save_request().is_ok());

        pipeline.header_saved(43);
        pipeline.advance_from_product_type().unwrap();
        assert_eq!(pipeline.stage(), PipelineStage::UploadingDocuments);
        assert!(pipeline.back_to_products().is_err());
    }

    #[test]
    fn scenario_c_failed_header_save_keeps_later_stages_unreachable() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.lines.add_sku(&bracket_sku()).unwrap();

        pipeline.header_failed("Internal server error");
        assert_eq!(pipeline.stage(), PipelineStage::EditingHeader);
        assert_eq!(pipeline.rfq_id(), None);
        assert_eq!(pipeline.last_error(), Some("Internal server error"));
        assert!(pipeline.advance_from_product_type().is_err());
        assert!(pipeline.finalize_guard().is_err());
    }

    #[test]
    fn finalize_blocks_with_zero_documents_and_never_composes() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.lines.add_sku(&bracket_sku()).unwrap();
        pipeline.header_saved(42);
        pipeline.advance_from_product_type().unwrap();
        pipeline.proceed_to_documents().unwrap();

        assert_eq!(
            pipeline.finalize_guard(),
            Err(FINALIZE_GUARD_MESSAGE.to_string())
        );
        assert_eq!(
            pipeline.notify_request(&template()),
            Err(FINALIZE_GUARD_MESSAGE.to_string())
        );
    }

    #[test]
    fn failed_finalization_can_be_retried_from_documents() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.lines.add_sku(&bracket_sku()).unwrap();
        pipeline.header_saved(42);
        pipeline.advance_from_product_type().unwrap();
        pipeline.proceed_to_documents().unwrap();
        pipeline.set_document_count(1);

        pipeline.finalize_failed();
        assert_eq!(pipeline.stage(), PipelineStage::Failed);
        assert_eq!(pipeline.last_error(), Some(FINALIZE_FAILED_MESSAGE));

        pipeline.retry_after_failure();
        assert_eq!(pipeline.stage(), PipelineStage::UploadingDocuments);
        assert!(pipeline.finalize_guard().is_ok());
    }

    #[test]
    fn back_navigation_keeps_lines_intact() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.lines.add_sku(&bracket_sku()).unwrap();
        pipeline.header_saved(42);
        pipeline.advance_from_product_type().unwrap();
        pipeline.proceed_to_documents().unwrap();

        pipeline.back_to_products().unwrap();
        assert_eq!(pipeline.stage(), PipelineStage::EditingProducts);
        assert_eq!(pipeline.lines.len(), 1);
    }

    #[test]
    fn product_type_is_frozen_after_the_branch() {
        let mut pipeline = RfqPipeline::new(ctx());
        pipeline.header.name = "Q1-Fittings".to_string();
        pipeline.header.client_id = Some(7);
        pipeline.lines.add_sku(&bracket_sku()).unwrap();
        pipeline.header_saved(42);
        pipeline.advance_from_product_type().unwrap();

        pipeline.set_product_type(ProductType::Existing);
        assert_eq!(pipeline.product_type(), ProductType::New);
    }

    #[test]
    fn load_existing_seeds_header_lines_and_id() {
        let rfq = Rfq {
            id: 42,
            name: "Q1-Fittings".to_string(),
            owning_user_id: 3,
            client_id: 7,
            status: Default::default(),
            skus: vec![SkuLine {
                sku_id: Some(9),
                name: "Bracket-A".to_string(),
                quantity: 100,
                description: "steel bracket".to_string(),
                drawing_no: "DWG-001".to_string(),
                size: 12.5,
                repeat: 0,
                products: Vec::new(),
            }],
        };
        let pipeline = RfqPipeline::load_existing(ctx(), rfq);
        assert_eq!(pipeline.stage(), PipelineStage::EditingHeader);
        assert!(pipeline.is_update());
        assert_eq!(pipeline.rfq_id(), Some(42));
        assert_eq!(pipeline.header.client_id, Some(7));
        assert_eq!(pipeline.lines.len(), 1);
        assert_eq!(pipeline.product_type(), ProductType::New);
    }

    #[test]
    fn load_existing_without_skus_infers_existing_product_type() {
        let rfq = Rfq {
            id: 43,
            name: "Q2-Valves".to_string(),
            owning_user_id: 3,
            client_id: 7,
            status: Default::default(),
            skus: Vec::new(),
        };
        let mut pipeline = RfqPipeline::load_existing(ctx(), rfq);
        assert_eq!(pipeline.product_type(), ProductType::Existing);

        // Re-saving and branching must skip the BOM stage entirely.
        pipeline.header_saved(43);
        pipeline.advance_from_product_type().unwrap();
        assert_eq!(pipeline.stage(), PipelineStage::UploadingDocuments);
    }
}
