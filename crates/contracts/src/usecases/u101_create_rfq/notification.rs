use serde::{Deserialize, Serialize};

/// Subject line of the completion email.
pub const SUBJECT: &str = "RFQ created successfully";

/// Template fetched by tag via GET `/email-template/email-with-tag/:tagId`.
/// The endpoint wraps it as `{data: [template]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmailTemplate {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub signature: String,
}

/// Response shape of the template lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateResponse {
    #[serde(default)]
    pub data: Vec<EmailTemplate>,
}

/// Rendered notification email.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedEmail {
    pub subject: String,
    pub body: String,
}

/// Plain-text concatenation of the fixed completion message, the template
/// content and the template signature. No escaping or sanitization.
pub fn compose(template: &EmailTemplate, rfq_id: i64) -> ComposedEmail {
    ComposedEmail {
        subject: SUBJECT.to_string(),
        body: format!(
            "RFQ with Id: {} created successfully.\n\n{}\n\n{}",
            rfq_id, template.content, template.signature
        ),
    }
}

/// Body for POST `/email-config/notify`. Fire-and-forget from the UI's
/// perspective: success routes the operator onward, failure blocks
/// finalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub email_config_id: i64,
    pub to_mail: String,
    pub subject: String,
    pub email_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_includes_rfq_id_and_template_parts() {
        let template = EmailTemplate {
            id: 1,
            content: "Thank you for your enquiry.".to_string(),
            signature: "Regards,\nSales Team".to_string(),
        };
        let email = compose(&template, 42);
        assert_eq!(email.subject, "RFQ created successfully");
        assert!(email.body.contains("RFQ with Id: 42"));
        assert!(email.body.contains("Thank you for your enquiry."));
        assert!(email.body.ends_with("Regards,\nSales Team"));
    }

    #[test]
    fn notify_request_uses_camel_case_wire_names() {
        let request = NotifyRequest {
            email_config_id: 2,
            to_mail: "ops@example.com".to_string(),
            subject: SUBJECT.to_string(),
            email_content: "body".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["emailConfigId"], 2);
        assert_eq!(json["toMail"], "ops@example.com");
        assert_eq!(json["emailContent"], "body");
    }
}
