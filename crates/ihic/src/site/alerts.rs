use super::markup::mailto;
use crate::expiry::{ExpiryKind, ExpiryStatus};
use crate::inventory::InventoryRecord;

/// E-mail prompt attached to an item or certificate that is expired or close
/// to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryAlert {
    pub kind: ExpiryKind,
    pub caption: &'static str,
    pub subject: String,
    pub body: String,
}

impl ExpiryAlert {
    pub fn for_status(
        kind: ExpiryKind,
        status: &ExpiryStatus,
        record: &InventoryRecord,
    ) -> Option<Self> {
        let caption = kind.alert_text(status)?;
        let (state, phrase) = if status.is_expired() {
            ("Expired", "already expired")
        } else {
            ("Nearly Expired", "nearly expired")
        };
        let name = record.item_name.as_str();

        let (subject, body) = match kind {
            ExpiryKind::Item => (
                format!("High Important : {name} is {state}"),
                format!(
                    "Hi. The {name} with Identification Number of {} is {phrase}. Please do the necessary. Thank you.",
                    record.batch_number
                ),
            ),
            ExpiryKind::Certificate => (
                format!("High Important : {name} Halal Certificate is {state}"),
                format!(
                    "Hi. The {name} Halal certificate is {phrase}. Please do the necessary. Thank you."
                ),
            ),
        };

        Some(Self {
            kind,
            caption,
            subject,
            body,
        })
    }

    pub fn mailto(&self, contact_email: &str) -> String {
        mailto(contact_email, &self.subject, &self.body)
    }
}
