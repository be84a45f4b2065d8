use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the Freshdesk custom field naming a ticket's company.
pub const COMPANY_FIELD: &str = "cf_empresa";

/// Key added to every ticket returned by the aggregator.
pub const STATUS_NAME_FIELD: &str = "status_name";

static MISSING: Value = Value::Null;

/// A ticket record as returned by Freshdesk.
///
/// The record is kept opaque: every upstream key is preserved and serialized
/// back unchanged. Only `status_name` is ever written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(Map<String, Value>);

impl Ticket {
    /// Raw value of a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `status` field, or `Value::Null` when absent.
    pub fn status(&self) -> &Value {
        self.0.get("status").unwrap_or(&MISSING)
    }

    /// `custom_fields.cf_empresa`, when present and a string.
    pub fn company(&self) -> Option<&str> {
        self.0
            .get("custom_fields")
            .and_then(|fields| fields.get(COMPANY_FIELD))
            .and_then(Value::as_str)
    }

    /// Exact, case-sensitive match on the company field.
    pub fn belongs_to(&self, company: &str) -> bool {
        self.company() == Some(company)
    }

    pub fn status_name(&self) -> Option<&str> {
        self.0.get(STATUS_NAME_FIELD).and_then(Value::as_str)
    }

    pub fn set_status_name(&mut self, name: String) {
        self.0.insert(STATUS_NAME_FIELD.to_string(), Value::String(name));
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for Ticket {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ticket(value: Value) -> Ticket {
        Ticket::try_from(value).unwrap()
    }

    #[test]
    fn test_company_reads_custom_field() {
        let t = ticket(json!({"id": 1, "custom_fields": {"cf_empresa": "Acme"}}));
        assert_eq!(t.company(), Some("Acme"));
    }

    #[test]
    fn test_company_missing_or_non_string() {
        assert_eq!(ticket(json!({"id": 1})).company(), None);
        assert_eq!(ticket(json!({"custom_fields": {}})).company(), None);
        assert_eq!(ticket(json!({"custom_fields": null})).company(), None);
        assert_eq!(
            ticket(json!({"custom_fields": {"cf_empresa": 42}})).company(),
            None
        );
    }

    #[test]
    fn test_belongs_to_is_exact() {
        let t = ticket(json!({"custom_fields": {"cf_empresa": "Acme"}}));
        assert!(t.belongs_to("Acme"));
        assert!(!t.belongs_to("acme"));
        assert!(!t.belongs_to("Acme "));
        assert!(!t.belongs_to(""));
    }

    #[test]
    fn test_status_defaults_to_null() {
        assert_eq!(ticket(json!({"id": 1})).status(), &Value::Null);
        assert_eq!(ticket(json!({"status": 2})).status(), &json!(2));
    }

    #[test]
    fn test_set_status_name_preserves_other_fields() {
        let original = json!({
            "id": 7,
            "subject": "Printer on fire",
            "status": 2,
            "custom_fields": {"cf_empresa": "Acme"}
        });
        let mut t = ticket(original.clone());
        t.set_status_name("Open".to_string());

        assert_eq!(t.status_name(), Some("Open"));
        let mut expected = original.as_object().unwrap().clone();
        expected.insert("status_name".to_string(), json!("Open"));
        assert_eq!(t.as_map(), &expected);
    }

    #[test]
    fn test_serializes_transparently() {
        let t = ticket(json!({"id": 3, "status": 5}));
        assert_eq!(serde_json::to_value(&t).unwrap(), json!({"id": 3, "status": 5}));
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(Ticket::try_from(json!([1, 2])).is_err());
        assert!(Ticket::try_from(json!("ticket")).is_err());
    }
}
