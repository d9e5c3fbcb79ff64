use super::api;
use contracts::domain::a003_rfq::{ProductDraft, SkuDraft};
use contracts::domain::common::FieldErrors;
use contracts::usecases::u101_create_rfq::{
    GetRfqRequest, PipelineContext, ProductSave, ProductType, RfqPipeline, SkuLines,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

/// Delay before leaving the wizard after a successful finalization, so the
/// operator sees the confirmation banner.
const REDIRECT_DELAY_MS: u32 = 2000;

/// Reactive facade over [`RfqPipeline`].
///
/// All signals, so it is `Copy` and closures can capture it freely. The
/// pipeline itself stays pure; this layer runs the HTTP calls and reports
/// their outcomes back into it.
#[derive(Clone, Copy)]
pub struct RfqPipelineViewModel {
    pub pipeline: RwSignal<RfqPipeline>,
    pub header_errors: RwSignal<FieldErrors>,
    pub sku_draft: RwSignal<SkuDraft>,
    pub sku_errors: RwSignal<FieldErrors>,
    pub product_draft: RwSignal<ProductDraft>,
    pub product_errors: RwSignal<FieldErrors>,
    /// SKU whose BOM table the product form currently targets.
    pub active_sku: RwSignal<usize>,
    /// `Some(row)` while the product form edits an existing row in place.
    pub editing_product: RwSignal<Option<usize>>,
    pub banner: RwSignal<Option<String>>,
    pub success_banner: RwSignal<Option<String>>,
    pub is_loading: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    pub is_finalizing: RwSignal<bool>,
}

impl RfqPipelineViewModel {
    pub fn new(ctx: PipelineContext) -> Self {
        Self {
            pipeline: RwSignal::new(RfqPipeline::new(ctx)),
            header_errors: RwSignal::new(FieldErrors::new()),
            sku_draft: RwSignal::new(SkuDraft::default()),
            sku_errors: RwSignal::new(FieldErrors::new()),
            product_draft: RwSignal::new(ProductDraft::default()),
            product_errors: RwSignal::new(FieldErrors::new()),
            active_sku: RwSignal::new(0),
            editing_product: RwSignal::new(None),
            banner: RwSignal::new(None),
            success_banner: RwSignal::new(None),
            is_loading: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            is_finalizing: RwSignal::new(false),
        }
    }

    /// Edit flow: fetch the persisted RFQ and seed the pipeline from it.
    pub fn load_for_edit(self, ctx: PipelineContext, rfq_id: i64, client_id: i64) {
        self.is_loading.set(true);
        leptos::task::spawn_local(async move {
            let request = GetRfqRequest {
                p_user_id: ctx.user_id,
                p_rfq_id: rfq_id,
                p_client_id: client_id,
            };
            match api::fetch_rfq(&request).await {
                Ok(rfq) => {
                    self.pipeline.set(RfqPipeline::load_existing(ctx, rfq));
                }
                Err(e) => {
                    log::error!("Failed to load RFQ {rfq_id}: {e}");
                    self.banner.set(Some(e));
                }
            }
            self.is_loading.set(false);
        });
    }

    // ========================================================================
    // Header stage
    // ========================================================================

    pub fn add_sku(self) {
        let draft = self.sku_draft.get_untracked();
        let mut result = Ok(());
        self.pipeline.update(|p| result = p.lines.add_sku(&draft));
        match result {
            Ok(()) => {
                self.sku_draft.set(SkuDraft::default());
                self.sku_errors.set(FieldErrors::new());
            }
            Err(errors) => self.sku_errors.set(errors),
        }
    }

    pub fn remove_sku(self, index: usize) {
        self.pipeline.update(|p| p.lines.remove_sku(index));
    }

    /// Validate and persist the header (+ SKUs). POST for a fresh RFQ, PUT
    /// when editing a persisted one. On success the server-assigned SKU
    /// ids are read back before the pipeline advances.
    pub fn submit_header(self) {
        let pipeline = self.pipeline.get_untracked();
        let request = match pipeline.save_request() {
            Ok(request) => request,
            Err(errors) => {
                self.header_errors.set(errors);
                return;
            }
        };
        self.header_errors.set(FieldErrors::new());
        self.banner.set(None);
        self.is_submitting.set(true);

        let ctx = pipeline.context().clone();
        let existing_id = pipeline.rfq_id();
        leptos::task::spawn_local(async move {
            let saved = match existing_id {
                Some(id) => api::update_rfq(id, &request).await,
                None => api::save_rfq(&request).await,
            };
            match saved {
                Ok(rfq_id) => {
                    // The save response only carries the RFQ id; SKU ids
                    // come from reading the aggregate back.
                    let lines = api::fetch_rfq(&GetRfqRequest {
                        p_user_id: ctx.user_id,
                        p_rfq_id: rfq_id,
                        p_client_id: request.p_client_id,
                    })
                    .await
                    .map(|rfq| SkuLines::from_existing(rfq.skus));

                    self.pipeline.update(|p| {
                        p.header_saved(rfq_id);
                        match lines {
                            Ok(lines) => p.lines = lines,
                            Err(ref e) => {
                                log::warn!("Could not refresh SKU ids: {e}");
                            }
                        }
                    });
                }
                Err(e) => {
                    log::error!("Header save failed: {e}");
                    self.pipeline.update(|p| p.header_failed(e));
                }
            }
            self.is_submitting.set(false);
        });
    }

    // ========================================================================
    // Product type branch
    // ========================================================================

    pub fn choose_product_type(self, product_type: ProductType) {
        self.pipeline.update(|p| p.set_product_type(product_type));
    }

    pub fn confirm_product_type(self) {
        let mut result = Ok(());
        self.pipeline.update(|p| result = p.advance_from_product_type());
        if let Err(e) = result {
            self.banner.set(Some(e));
        }
    }

    // ========================================================================
    // Products stage
    // ========================================================================

    pub fn start_product_edit(self, sku_index: usize, row: usize) {
        let pipeline = self.pipeline.get_untracked();
        let Some(line) = pipeline
            .lines
            .skus()
            .get(sku_index)
            .and_then(|sku| sku.products.get(row))
        else {
            return;
        };
        self.active_sku.set(sku_index);
        self.editing_product.set(Some(row));
        self.product_draft.set(ProductDraft::from_line(line));
        self.product_errors.set(FieldErrors::new());
    }

    pub fn cancel_product_edit(self) {
        self.editing_product.set(None);
        self.product_draft.set(ProductDraft::default());
        self.product_errors.set(FieldErrors::new());
    }

    pub fn save_product(self) {
        let draft = self.product_draft.get_untracked();
        let sku_index = self.active_sku.get_untracked();
        let edit_index = self.editing_product.get_untracked();

        let mut result: Result<ProductSave, FieldErrors> = Err(FieldErrors::new());
        self.pipeline
            .update(|p| result = p.lines.add_or_update_product(sku_index, &draft, edit_index));
        match result {
            Ok(save) => {
                self.product_errors.set(FieldErrors::new());
                self.product_draft.set(ProductDraft::default());
                self.editing_product.set(None);
                self.persist_products(save);
            }
            Err(errors) => self.product_errors.set(errors),
        }
    }

    pub fn remove_product(self, sku_index: usize, row: usize) {
        let mut save = None;
        self.pipeline
            .update(|p| save = p.lines.remove_product(sku_index, row));
        // None means nothing was removed; no request goes out.
        if let Some(save) = save {
            self.persist_products(save);
        }
    }

    fn persist_products(self, save: ProductSave) {
        let Some(sku_id) = save.sku_id else {
            self.banner
                .set(Some("SKU id is not available yet.".to_string()));
            return;
        };
        let request = contracts::usecases::u101_create_rfq::SaveProductsRequest {
            p_sku_id: sku_id,
            p_revision: save.revision,
            p_products: save.products,
        };
        leptos::task::spawn_local(async move {
            if let Err(e) = api::save_products(&request).await {
                log::error!("Product save failed: {e}");
                self.banner.set(Some(e));
            } else {
                self.banner.set(None);
            }
        });
    }

    pub fn proceed_to_documents(self) {
        let mut result = Ok(());
        self.pipeline.update(|p| result = p.proceed_to_documents());
        if let Err(e) = result {
            self.banner.set(Some(e));
        }
    }

    pub fn back_to_products(self) {
        let mut result = Ok(());
        self.pipeline.update(|p| result = p.back_to_products());
        if let Err(e) = result {
            self.banner.set(Some(e));
        }
    }

    // ========================================================================
    // Documents + finalization
    // ========================================================================

    pub fn document_count_changed(self, count: usize) {
        self.pipeline.update(|p| p.set_document_count(count));
    }

    /// Save on the documents stage: fetch the template, send the
    /// notification, then after a short confirmation pause hand control to
    /// `on_done` (navigation back to the list).
    pub fn finalize(self, on_done: Callback<()>) {
        let pipeline = self.pipeline.get_untracked();
        if let Err(e) = pipeline.finalize_guard() {
            self.banner.set(Some(e));
            return;
        }
        self.banner.set(None);
        self.is_finalizing.set(true);

        let tag = pipeline.context().template_tag.clone();
        leptos::task::spawn_local(async move {
            let outcome = async {
                let template = api::fetch_template(&tag).await?;
                let notify = self
                    .pipeline
                    .get_untracked()
                    .notify_request(&template)?;
                api::send_notification(&notify).await
            }
            .await;

            match outcome {
                Ok(()) => {
                    self.pipeline.update(|p| p.finalized());
                    self.success_banner
                        .set(Some("RFQ saved successfully.".to_string()));
                    self.is_finalizing.set(false);
                    TimeoutFuture::new(REDIRECT_DELAY_MS).await;
                    on_done.run(());
                }
                Err(e) => {
                    log::error!("Finalization failed: {e}");
                    self.pipeline.update(|p| p.finalize_failed());
                    self.is_finalizing.set(false);
                }
            }
        });
    }

    pub fn retry_finalization(self) {
        self.pipeline.update(|p| p.retry_after_failure());
        self.banner.set(None);
    }
}
