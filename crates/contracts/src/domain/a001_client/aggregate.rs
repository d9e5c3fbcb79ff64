use crate::domain::common::validation::require_text;
use crate::domain::common::FieldErrors;
use serde::{Deserialize, Serialize};

/// Postal address used for billing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillingAddress {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

/// Contact person attached to a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientContact {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub designation: String,
}

/// Customer record (aggregate a001).
///
/// Owned by the backend; immutable once referenced by an RFQ except
/// through its own edit screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub billing_address: BillingAddress,
    #[serde(default)]
    pub tax_id: String,
    #[serde(default)]
    pub contacts: Vec<ClientContact>,
}

impl Client {
    pub fn to_ref(&self) -> ClientRef {
        ClientRef {
            id: self.id,
            label: self.name.clone(),
        }
    }
}

/// Read-only projection for selection widgets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientRef {
    pub id: i64,
    pub label: String,
}

/// Row shape returned by GET `/client/getall`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientListRow {
    pub client_id: i64,
    pub name: String,
}

impl From<ClientListRow> for ClientRef {
    fn from(row: ClientListRow) -> Self {
        ClientRef {
            id: row.client_id,
            label: row.name,
        }
    }
}

/// Save shape for POST `/client/save`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientDto {
    pub p_name: String,
    pub p_email: String,
    #[serde(default)]
    pub p_phone: String,
    #[serde(default)]
    pub p_tax_id: String,
    #[serde(default)]
    pub p_street: String,
    #[serde(default)]
    pub p_city: String,
    #[serde(default)]
    pub p_state: String,
    #[serde(default)]
    pub p_country: String,
}

impl ClientDto {
    /// Minimal checks for the inline "add client" form inside the RFQ
    /// wizard. The full client edit screen is its own page.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.p_name, "Client name is required");
        require_text(&mut errors, "email", &self.p_email, "Client email is required");
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_create_requires_name_and_email() {
        let dto = ClientDto::default();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Client name is required"));
        assert_eq!(errors.get("email"), Some("Client email is required"));
    }

    #[test]
    fn full_client_projects_to_ref() {
        let client = Client {
            id: 7,
            name: "Acme Exports".to_string(),
            email: String::new(),
            phone: String::new(),
            billing_address: BillingAddress::default(),
            tax_id: String::new(),
            contacts: Vec::new(),
        };
        assert_eq!(client.to_ref().label, "Acme Exports");
    }

    #[test]
    fn list_row_projects_to_ref() {
        let row = ClientListRow {
            client_id: 7,
            name: "Acme Exports".to_string(),
        };
        let r: ClientRef = row.into();
        assert_eq!(r.id, 7);
        assert_eq!(r.label, "Acme Exports");
    }
}
