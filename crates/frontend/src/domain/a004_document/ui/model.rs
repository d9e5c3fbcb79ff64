use crate::shared::api_utils::api_url;
use contracts::domain::a004_document::{require_rfq_id, RfqDocument};
use contracts::domain::common::ApiEnvelope;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, FormData, Request, RequestInit, RequestMode, Response};

async fn execute(request: Request) -> Result<Response, String> {
    let window = web_sys::window().ok_or("No window available")?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("Network error: {e:?}"))?;
    response
        .dyn_into::<Response>()
        .map_err(|e| format!("Invalid response: {e:?}"))
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, String> {
    let text = JsFuture::from(
        response
            .text()
            .map_err(|e| format!("Failed to read response: {e:?}"))?,
    )
    .await
    .map_err(|e| format!("Failed to read response: {e:?}"))?;
    let body = text.as_string().ok_or("Response body is not a string")?;
    serde_json::from_str(&body).map_err(|e| format!("Parse error: {e}"))
}

/// GET `/rfq/:id/documents`.
pub async fn fetch_documents(rfq_id: i64) -> Result<Vec<RfqDocument>, String> {
    let rfq_id = require_rfq_id(rfq_id)?;
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = api_url(&format!("/rfq/{rfq_id}/documents"));
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("Failed to build request: {e:?}"))?;

    let response = execute(request).await?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<Vec<RfqDocument>> = read_json(response).await?;
    envelope.into_result()
}

/// POST `/rfq/:id/documents` with a multipart body. The server response is
/// only an acknowledgement; the caller re-fetches the list afterwards.
pub async fn upload_document(rfq_id: i64, file: &File) -> Result<(), String> {
    let rfq_id = require_rfq_id(rfq_id)?;

    let form = FormData::new().map_err(|e| format!("Failed to build form data: {e:?}"))?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|e| format!("Failed to attach file: {e:?}"))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let url = api_url(&format!("/rfq/{rfq_id}/documents"));
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("Failed to build request: {e:?}"))?;

    let response = execute(request).await?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<serde_json::Value> = read_json(response).await?;
    envelope.into_ack().map(|_| ())
}

/// GET `/rfq/:id/download/:doc_id`, returning the raw blob for saving.
pub async fn download_document(rfq_id: i64, doc_id: i64) -> Result<Blob, String> {
    let rfq_id = require_rfq_id(rfq_id)?;
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let url = api_url(&format!("/rfq/{rfq_id}/download/{doc_id}"));
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("Failed to build request: {e:?}"))?;

    let response = execute(request).await?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let blob = JsFuture::from(
        response
            .blob()
            .map_err(|e| format!("Failed to read blob: {e:?}"))?,
    )
    .await
    .map_err(|e| format!("Failed to read blob: {e:?}"))?;
    blob.dyn_into::<Blob>()
        .map_err(|e| format!("Invalid blob: {e:?}"))
}

/// DELETE `/rfq/:id/docdelete/permanent/:doc_id`.
pub async fn delete_document(rfq_id: i64, doc_id: i64) -> Result<(), String> {
    let rfq_id = require_rfq_id(rfq_id)?;
    let opts = RequestInit::new();
    opts.set_method("DELETE");
    opts.set_mode(RequestMode::Cors);

    let url = api_url(&format!("/rfq/{rfq_id}/docdelete/permanent/{doc_id}"));
    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|e| format!("Failed to build request: {e:?}"))?;

    let response = execute(request).await?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<serde_json::Value> = read_json(response).await?;
    envelope.into_ack().map(|_| ())
}
