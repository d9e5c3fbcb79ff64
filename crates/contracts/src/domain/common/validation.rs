/// Field-keyed validation errors for a form submission.
///
/// Keeps insertion order so the UI can render messages next to the field
/// that produced them, in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.entries.push((field.to_string(), message.into()));
    }

    /// First message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// `Ok(())` when no errors were recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Record an error when a required text field is blank.
pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.push("name", "Name is required");
        errors.push("quantity", "Quantity is required");
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["name", "quantity"]);
    }

    #[test]
    fn empty_map_converts_to_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn require_text_rejects_whitespace_only() {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", "   ", "Name is required");
        assert_eq!(errors.get("name"), Some("Name is required"));
    }
}
