use serde::{Deserialize, Serialize};

/// Fallback shown when the backend reports a failure without a message.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Response envelope used by every backend endpoint:
/// `{ success: boolean, data?, message? }`.
///
/// `success: false` and transport errors are treated uniformly by the UI,
/// so both collapse into `Err(String)` with the server message preferred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap an envelope that must carry a payload.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            self.data
                .ok_or_else(|| self.message.unwrap_or_else(|| GENERIC_ERROR.to_string()))
        } else {
            Err(self.message.unwrap_or_else(|| GENERIC_ERROR.to_string()))
        }
    }

    /// Unwrap an envelope where the payload is optional (plain acks).
    pub fn into_ack(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message.unwrap_or_else(|| GENERIC_ERROR.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_data_unwraps() {
        let env: ApiEnvelope<i64> = serde_json::from_str(r#"{"success":true,"data":42}"#).unwrap();
        assert_eq!(env.into_result(), Ok(42));
    }

    #[test]
    fn failure_prefers_server_message() {
        let env: ApiEnvelope<i64> =
            serde_json::from_str(r#"{"success":false,"message":"RFQ name already in use"}"#)
                .unwrap();
        assert_eq!(env.into_result(), Err("RFQ name already in use".to_string()));
    }

    #[test]
    fn failure_without_message_falls_back() {
        let env: ApiEnvelope<i64> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(env.into_result(), Err(GENERIC_ERROR.to_string()));
    }

    #[test]
    fn ack_without_payload_is_ok() {
        let env: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(r#"{"success":true,"message":"saved"}"#).unwrap();
        assert_eq!(env.into_ack(), Ok(None));
    }
}
