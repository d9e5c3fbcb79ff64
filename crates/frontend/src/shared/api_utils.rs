//! API utilities for frontend-backend communication

/// Base URL for API requests.
///
/// The REST backend is served from the same origin as the console, so the
/// base is simply the window's origin; deployments that front the API
/// elsewhere rewrite at the proxy.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    window.location().origin().unwrap_or_default()
}

/// Build a full API URL from a path (should start with "/").
///
/// # Example
/// ```rust,ignore
/// let url = api_url(&format!("/rfq/{}/documents", rfq_id));
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}
