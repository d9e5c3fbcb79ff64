//! HTTP calls of the RFQ creation pipeline. Every function maps one
//! endpoint; outcomes come back as `Result` and the view model feeds them
//! into the pipeline state machine.

use crate::shared::api_utils::api_url;
use contracts::domain::a003_rfq::Rfq;
use contracts::domain::common::{ApiEnvelope, GENERIC_ERROR};
use contracts::usecases::u101_create_rfq::{
    EmailTemplate, GetRfqRequest, NotifyRequest, SaveProductsRequest, SaveRfqData,
    SaveRfqRequest, TemplateResponse,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

async fn fetch_json<B, T>(method: &str, path: &str, body: Option<&B>) -> Result<T, String>
where
    B: serde::Serialize,
    T: serde::de::DeserializeOwned,
{
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    if let Some(body) = body {
        let payload =
            serde_json::to_string(body).map_err(|e| format!("Failed to encode body: {e}"))?;
        opts.set_body(&JsValue::from_str(&payload));
    }

    let request = Request::new_with_str_and_init(&api_url(path), &opts)
        .map_err(|e| format!("Failed to build request: {e:?}"))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("Failed to set header: {e:?}"))?;
    }

    let window = web_sys::window().ok_or("No window available")?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("Network error: {e:?}"))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| format!("Invalid response: {e:?}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let json = JsFuture::from(
        response
            .json()
            .map_err(|e| format!("Failed to read response: {e:?}"))?,
    )
    .await
    .map_err(|e| format!("Failed to read response: {e:?}"))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| format!("Parse error: {e}"))
}

/// POST `/rfq/saverfq` — persist header + SKUs, returns the new RFQ id.
pub async fn save_rfq(request: &SaveRfqRequest) -> Result<i64, String> {
    let envelope: ApiEnvelope<SaveRfqData> =
        fetch_json("POST", "/rfq/saverfq", Some(request)).await?;
    envelope.into_result().map(|data| data.id)
}

/// PUT `/rfq/update/:id` — re-save the header of a persisted RFQ.
pub async fn update_rfq(rfq_id: i64, request: &SaveRfqRequest) -> Result<i64, String> {
    let envelope: ApiEnvelope<SaveRfqData> =
        fetch_json("PUT", &format!("/rfq/update/{rfq_id}"), Some(request)).await?;
    envelope.into_ack().map(|data| match data {
        Some(data) => data.id,
        None => rfq_id,
    })
}

/// POST `/rfq/getrfq` — the payload is an array with the single matching
/// RFQ; an empty array means not found.
pub async fn fetch_rfq(request: &GetRfqRequest) -> Result<Rfq, String> {
    let envelope: ApiEnvelope<Vec<Rfq>> = fetch_json("POST", "/rfq/getrfq", Some(request)).await?;
    envelope
        .into_result()?
        .into_iter()
        .next()
        .ok_or_else(|| "RFQ not found".to_string())
}

/// POST `/sku/saveproducts` — full-array replace of one SKU's BOM.
pub async fn save_products(request: &SaveProductsRequest) -> Result<(), String> {
    let envelope: ApiEnvelope<serde_json::Value> =
        fetch_json("POST", "/sku/saveproducts", Some(request)).await?;
    envelope.into_ack().map(|_| ())
}

/// GET `/email-template/email-with-tag/:tag` — the matching template is
/// the first element of the `data` array.
pub async fn fetch_template(tag: &str) -> Result<EmailTemplate, String> {
    let response: TemplateResponse =
        fetch_json::<(), _>("GET", &format!("/email-template/email-with-tag/{tag}"), None).await?;
    response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| GENERIC_ERROR.to_string())
}

/// POST `/email-config/notify` — send the completion email.
pub async fn send_notification(request: &NotifyRequest) -> Result<(), String> {
    let envelope: ApiEnvelope<serde_json::Value> =
        fetch_json("POST", "/email-config/notify", Some(request)).await?;
    envelope.into_ack().map(|_| ())
}
