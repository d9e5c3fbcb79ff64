use crate::shared::api_utils::api_url;
use contracts::domain::a002_raw_material::RawMaterial;
use contracts::domain::common::ApiEnvelope;
use gloo_net::http::Request;

/// Reference data for the BOM form's material selector,
/// via GET `/rawmaterial/`.
pub async fn fetch_all() -> Result<Vec<RawMaterial>, String> {
    let response = Request::get(&api_url("/rawmaterial/"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<Vec<RawMaterial>> = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;

    envelope.into_result()
}
