use super::normalizer::file_stem;
use crate::expiry::ExpiryReading;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

const CERTIFICATE_AVAILABLE: &str = "Available";

/// One spreadsheet row describing an inventory item and its halal certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    #[serde(rename = "Item ID", default, deserialize_with = "empty_string_as_none")]
    pub item_id: Option<String>,
    #[serde(rename = "Item Name", default)]
    pub item_name: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Batch/GRIS No.", default)]
    pub batch_number: String,
    #[serde(rename = "Brand", default)]
    pub brand: String,
    #[serde(rename = "Supplier", default)]
    pub supplier: String,
    #[serde(
        rename = "Item Expiry Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub item_expiry: Option<String>,
    #[serde(rename = "Stock Available", default)]
    pub stock_available: String,
    #[serde(
        rename = "Purchased Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub purchased_date: Option<String>,
    #[serde(rename = "Invoice", default, deserialize_with = "empty_string_as_none")]
    pub invoice_url: Option<String>,
    #[serde(rename = "Halal Certificate", default)]
    pub halal_certificate: String,
    #[serde(
        rename = "Halal Certificate URL",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub certificate_url: Option<String>,
    #[serde(
        rename = "Certificate Expiry Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub certificate_expiry: Option<String>,
}

impl InventoryRecord {
    pub fn id(&self) -> &str {
        self.item_id.as_deref().unwrap_or_default()
    }

    pub fn has_halal_certificate(&self) -> bool {
        self.halal_certificate
            .trim()
            .eq_ignore_ascii_case(CERTIFICATE_AVAILABLE)
    }

    pub fn page_file_name(&self) -> String {
        page_file_name(self.id())
    }

    pub fn item_expiry_reading(&self, today: NaiveDate) -> ExpiryReading {
        ExpiryReading::evaluate(self.item_expiry.as_deref(), today)
    }

    /// Certificate expiry only counts when a certificate is on file.
    pub fn certificate_expiry_reading(&self, today: NaiveDate) -> ExpiryReading {
        let raw = if self.has_halal_certificate() {
            self.certificate_expiry.as_deref()
        } else {
            None
        };
        ExpiryReading::evaluate(raw, today)
    }
}

pub fn page_file_name(item_id: &str) -> String {
    format!("item_{}.html", file_stem(item_id))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::ExpiryStatus;

    #[test]
    fn certificate_availability_ignores_case_and_padding() {
        let mut record = InventoryRecord {
            halal_certificate: " available ".to_string(),
            ..InventoryRecord::default()
        };
        assert!(record.has_halal_certificate());

        record.halal_certificate = "Not Available".to_string();
        assert!(!record.has_halal_certificate());
    }

    #[test]
    fn certificate_expiry_is_ignored_without_certificate() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).expect("valid date");
        let record = InventoryRecord {
            halal_certificate: "Not Available".to_string(),
            certificate_expiry: Some("01/04/2025".to_string()),
            ..InventoryRecord::default()
        };
        assert_eq!(
            record.certificate_expiry_reading(today).status,
            ExpiryStatus::NotApplicable
        );
    }

    #[test]
    fn page_file_name_uses_sanitised_id() {
        assert_eq!(page_file_name("HAL-001"), "item_HAL-001.html");
        assert_eq!(page_file_name("a/b"), "item_a_b.html");
    }
}
