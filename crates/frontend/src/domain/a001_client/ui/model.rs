use crate::shared::api_utils::api_url;
use contracts::domain::a001_client::{ClientDto, ClientListRow, ClientRef};
use contracts::domain::common::ApiEnvelope;
use gloo_net::http::Request;
use serde::Deserialize;

/// Selection projections for all clients, via GET `/client/getall`.
pub async fn fetch_all() -> Result<Vec<ClientRef>, String> {
    let response = Request::get(&api_url("/client/getall"))
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }

    let envelope: ApiEnvelope<Vec<ClientListRow>> = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {e}"))?;

    let rows = envelope.into_result()?;
    Ok(rows.into_iter().map(ClientRef::from).collect())
}

/// Create a client inline, via POST `/client/save`. Returns the new id.
pub async fn save(dto: &ClientDto) -> Result<i64, String> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    #[derive(Deserialize)]
    struct SaveClientData {
        id: i64,
    }

    let body = serde_json::to_string(dto).map_err(|e| format!("{e}"))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&wasm_bindgen::JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(&api_url("/client/save"), &opts)
        .map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{e:?}"))?;

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    let text: String = text.as_string().ok_or_else(|| "bad text".to_string())?;

    if !resp.ok() {
        return Err(format!("HTTP {}: {}", resp.status(), text));
    }

    let envelope: ApiEnvelope<SaveClientData> =
        serde_json::from_str(&text).map_err(|e| format!("{e}"))?;
    envelope.into_result().map(|data| data.id)
}
