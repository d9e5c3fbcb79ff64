use crate::domain::a003_rfq::{ProductLine, SkuLine};
use serde::{Deserialize, Serialize};

/// Body for POST `/rfq/saverfq` and PUT `/rfq/update/:id`.
///
/// Header and SKUs go up in one request. `p_idempotency_key` is generated
/// client-side once per pipeline run so a retried failed save can be
/// deduplicated server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveRfqRequest {
    pub p_rfq_name: String,
    pub p_user_id: i64,
    pub p_client_id: i64,
    pub p_idempotency_key: String,
    pub p_skus: Vec<SkuLine>,
}

/// Success payload of the header save: the durable RFQ id used by every
/// subsequent pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveRfqData {
    pub id: i64,
}

/// Body for POST `/sku/saveproducts` — always the complete product array
/// for the SKU, never a delta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveProductsRequest {
    pub p_sku_id: i64,
    pub p_revision: u64,
    pub p_products: Vec<ProductLine>,
}

/// Body for POST `/rfq/getrfq`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetRfqRequest {
    pub p_user_id: i64,
    pub p_rfq_id: i64,
    pub p_client_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_serializes_with_p_prefixed_fields() {
        let request = SaveRfqRequest {
            p_rfq_name: "Q1-Fittings".to_string(),
            p_user_id: 3,
            p_client_id: 7,
            p_idempotency_key: "k".to_string(),
            p_skus: Vec::new(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["p_rfq_name"], "Q1-Fittings");
        assert_eq!(json["p_client_id"], 7);
        assert!(json["p_skus"].as_array().unwrap().is_empty());
    }
}
