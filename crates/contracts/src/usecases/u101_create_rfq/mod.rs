pub mod lines;
pub mod notification;
pub mod pipeline;
pub mod request;

pub use lines::{ProductSave, SkuLines};
pub use notification::{compose, ComposedEmail, EmailTemplate, NotifyRequest, TemplateResponse};
pub use pipeline::{PipelineContext, PipelineStage, ProductType, RfqHeaderDraft, RfqPipeline};
pub use request::{GetRfqRequest, SaveProductsRequest, SaveRfqData, SaveRfqRequest};

use crate::usecases::common::UseCaseMetadata;

pub struct CreateRfq;

impl UseCaseMetadata for CreateRfq {
    fn usecase_index() -> &'static str {
        "u101"
    }

    fn usecase_name() -> &'static str {
        "create_rfq"
    }

    fn display_name() -> &'static str {
        "Create RFQ"
    }

    fn description() -> &'static str {
        "Staged creation of a Request for Quote: header and SKUs, BOM lines, supporting documents, notification"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_full_name_combines_index_and_name() {
        assert_eq!(CreateRfq::full_name(), "u101_create_rfq");
    }
}
