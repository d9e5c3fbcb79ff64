use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extension allow-list for supporting documents. Advisory only: it feeds
/// the file picker's `accept` filter, the server remains the authority.
pub const ALLOWED_EXTENSIONS: [&str; 8] =
    ["pdf", "doc", "docx", "xls", "xlsx", "jpg", "jpeg", "png"];

/// Binary attachment scoped to an RFQ id (aggregate a004).
/// Deletion is permanent: no soft-delete, no undo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RfqDocument {
    pub id: i64,
    pub rfq_id: i64,
    pub original_name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub file_size: u64,
    pub stored_at: DateTime<Utc>,
}

/// Error for document calls attempted before the RFQ header is saved.
pub const MISSING_RFQ_ID_MESSAGE: &str = "RFQ id is not available yet.";

/// Every document endpoint is scoped to a persisted RFQ. A non-positive
/// id means the header has not been saved yet, so callers must reject
/// before any network traffic.
pub fn require_rfq_id(rfq_id: i64) -> Result<i64, String> {
    if rfq_id <= 0 {
        return Err(MISSING_RFQ_ID_MESSAGE.to_string());
    }
    Ok(rfq_id)
}

/// Case-insensitive check of a filename against the allow-list.
pub fn is_allowed_filename(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    match lower.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ALLOWED_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

/// Value for the file input's `accept` attribute: ".pdf,.doc,...".
pub fn accept_attr() -> String {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|e| format!(".{}", e))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_known_extensions() {
        assert!(is_allowed_filename("drawing.PDF"));
        assert!(is_allowed_filename("bom.xlsx"));
        assert!(is_allowed_filename("photo.jpeg"));
    }

    #[test]
    fn allow_list_rejects_unknown_and_bare_names() {
        assert!(!is_allowed_filename("malware.exe"));
        assert!(!is_allowed_filename("README"));
        assert!(!is_allowed_filename(".pdf"));
    }

    #[test]
    fn zero_and_negative_rfq_ids_are_rejected_before_any_call() {
        assert_eq!(require_rfq_id(0), Err(MISSING_RFQ_ID_MESSAGE.to_string()));
        assert_eq!(require_rfq_id(-1), Err(MISSING_RFQ_ID_MESSAGE.to_string()));
        assert_eq!(require_rfq_id(42), Ok(42));
    }

    #[test]
    fn accept_attr_lists_every_extension() {
        let attr = accept_attr();
        assert!(attr.starts_with(".pdf,"));
        assert_eq!(attr.matches('.').count(), ALLOWED_EXTENSIONS.len());
    }
}
