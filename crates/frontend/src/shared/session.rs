use contracts::usecases::u101_create_rfq::PipelineContext;
use serde::{Deserialize, Serialize};

const APP_STATE_KEY: &str = "appState";

/// Authenticated operator identity and notification wiring.
///
/// Populated by the login flow (an external collaborator) into browser
/// storage under `appState`; read once at startup and provided to the app
/// via context so nothing reads ambient storage mid-flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionContext {
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub rfq_template_tag: String,
    #[serde(default)]
    pub email_config_id: i64,
}

impl SessionContext {
    pub fn load() -> Self {
        match Self::from_storage() {
            Some(session) => session,
            None => {
                log::warn!("appState not found in storage; session context is empty");
                Self::default()
            }
        }
    }

    fn from_storage() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let raw = storage.get_item(APP_STATE_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }

    /// Explicit inputs for a pipeline run.
    pub fn pipeline_context(&self) -> PipelineContext {
        PipelineContext {
            user_id: self.user_id,
            user_email: self.email.clone(),
            template_tag: self.rfq_template_tag.clone(),
            email_config_id: self.email_config_id,
        }
    }
}
