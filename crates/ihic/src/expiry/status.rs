use super::parse::{days_remaining, format_date, parse_date, DateError};
use chrono::NaiveDate;

/// Dates with at least this many days left are considered valid.
pub const NEAR_EXPIRY_WINDOW_DAYS: i64 = 15;
/// Dates at or below this many days left are expired.
pub const EXPIRED_AT_OR_BELOW_DAYS: i64 = 0;

/// Outcome of evaluating an expiry cell against a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryStatus {
    NotApplicable,
    /// Text was present but did not parse; carries the original cell.
    Invalid(String),
    Valid(i64),
    NearExpiry(i64),
    Expired(i64),
}

impl ExpiryStatus {
    pub fn from_days(days: i64) -> Self {
        if days <= EXPIRED_AT_OR_BELOW_DAYS {
            Self::Expired(days)
        } else if days < NEAR_EXPIRY_WINDOW_DAYS {
            Self::NearExpiry(days)
        } else {
            Self::Valid(days)
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::NotApplicable => "not_applicable",
            Self::Invalid(_) => "invalid",
            Self::Valid(_) => "valid",
            Self::NearExpiry(_) => "near_expiry",
            Self::Expired(_) => "expired",
        }
    }

    /// Class applied to the rendered date cell.
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::NotApplicable => "na-value",
            Self::Invalid(_) => "invalid-date",
            Self::Valid(_) => "valid",
            Self::NearExpiry(_) | Self::Expired(_) => "expired",
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::NotApplicable => String::new(),
            Self::Invalid(_) => "(Unrecognised date)".to_string(),
            Self::Expired(_) => "(Expired)".to_string(),
            Self::Valid(1) | Self::NearExpiry(1) => "(Expires in 1 day)".to_string(),
            Self::Valid(days) | Self::NearExpiry(days) => format!("(Expires in {days} days)"),
        }
    }

    pub const fn alert(&self) -> bool {
        matches!(self, Self::NearExpiry(_) | Self::Expired(_))
    }

    pub const fn is_expired(&self) -> bool {
        matches!(self, Self::Expired(_))
    }

    pub const fn days_remaining(&self) -> Option<i64> {
        match self {
            Self::Valid(days) | Self::NearExpiry(days) | Self::Expired(days) => Some(*days),
            Self::NotApplicable | Self::Invalid(_) => None,
        }
    }
}

/// Which expiry a status belongs to; both share the same thresholds and only
/// differ in wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryKind {
    Item,
    Certificate,
}

impl ExpiryKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Item => "Item Expiry Date",
            Self::Certificate => "Certificate Expiry",
        }
    }

    /// Button caption for statuses that raise an alert.
    pub const fn alert_text(self, status: &ExpiryStatus) -> Option<&'static str> {
        match (self, status) {
            (Self::Item, ExpiryStatus::Expired(_)) => Some("Item Expired. Contact PIC"),
            (Self::Item, ExpiryStatus::NearExpiry(_)) => Some("Nearly Expired. Contact PIC"),
            (Self::Certificate, ExpiryStatus::Expired(_)) => {
                Some("Certificate Expired. Contact PIC")
            }
            (Self::Certificate, ExpiryStatus::NearExpiry(_)) => {
                Some("Certificate Nearly Expired. Contact PIC")
            }
            _ => None,
        }
    }
}

/// A parsed expiry cell together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryReading {
    pub date: Option<NaiveDate>,
    pub status: ExpiryStatus,
}

impl ExpiryReading {
    pub fn evaluate(raw: Option<&str>, today: NaiveDate) -> Self {
        match parse_date(raw) {
            Ok(date) => Self {
                date: Some(date),
                status: ExpiryStatus::from_days(days_remaining(date, today)),
            },
            Err(DateError::Empty | DateError::NotApplicable) => Self {
                date: None,
                status: ExpiryStatus::NotApplicable,
            },
            Err(DateError::Malformed { raw }) => Self {
                date: None,
                status: ExpiryStatus::Invalid(raw),
            },
        }
    }

    pub fn formatted_date(&self) -> Option<String> {
        self.date.map(format_date)
    }

    /// Text shown in the date cell, e.g. `22/05/2025 (Expires in 3 days)`.
    pub fn display(&self) -> String {
        match (&self.status, self.date) {
            (ExpiryStatus::NotApplicable, _) => "N/A".to_string(),
            (ExpiryStatus::Invalid(raw), _) => format!("{raw} {}", self.status.text()),
            (status, Some(date)) => format!("{} {}", format_date(date), status.text()),
            (status, None) => status.text(),
        }
    }
}

pub fn classify(raw: Option<&str>, today: NaiveDate) -> ExpiryStatus {
    ExpiryReading::evaluate(raw, today).status
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn classification_boundaries_around_expiry_day() {
        let raw = Some("22/05/2025");
        assert_eq!(classify(raw, ymd(2025, 5, 22)), ExpiryStatus::Expired(0));
        assert_eq!(classify(raw, ymd(2025, 5, 21)), ExpiryStatus::NearExpiry(1));
        assert_eq!(classify(raw, ymd(2025, 5, 8)), ExpiryStatus::NearExpiry(14));
        assert_eq!(classify(raw, ymd(2025, 5, 7)), ExpiryStatus::Valid(15));
        assert_eq!(classify(raw, ymd(2025, 6, 1)), ExpiryStatus::Expired(-10));
    }

    #[test]
    fn missing_sentinel_and_garbage_inputs() {
        let today = ymd(2025, 5, 1);
        assert_eq!(classify(None, today), ExpiryStatus::NotApplicable);
        assert_eq!(classify(Some(" na "), today), ExpiryStatus::NotApplicable);
        assert_eq!(
            classify(Some("31/02/2025"), today),
            ExpiryStatus::Invalid("31/02/2025".to_string())
        );
    }

    #[test]
    fn presentation_helpers_follow_status() {
        let expired = ExpiryStatus::Expired(-3);
        assert_eq!(expired.css_class(), "expired");
        assert_eq!(expired.text(), "(Expired)");
        assert!(expired.alert());
        assert!(expired.is_expired());

        let near = ExpiryStatus::NearExpiry(5);
        assert_eq!(near.css_class(), "expired");
        assert_eq!(near.text(), "(Expires in 5 days)");
        assert!(near.alert());
        assert!(!near.is_expired());

        let valid = ExpiryStatus::Valid(40);
        assert_eq!(valid.css_class(), "valid");
        assert!(!valid.alert());
        assert_eq!(valid.days_remaining(), Some(40));

        assert_eq!(ExpiryStatus::NearExpiry(1).text(), "(Expires in 1 day)");
        assert_eq!(ExpiryStatus::NotApplicable.css_class(), "na-value");
        assert_eq!(ExpiryStatus::NotApplicable.days_remaining(), None);
    }

    #[test]
    fn item_and_certificate_share_thresholds_but_not_wording() {
        let today = ymd(2025, 5, 8);
        let status = classify(Some("22/05/2025"), today);
        assert_eq!(
            ExpiryKind::Item.alert_text(&status),
            Some("Nearly Expired. Contact PIC")
        );
        assert_eq!(
            ExpiryKind::Certificate.alert_text(&status),
            Some("Certificate Nearly Expired. Contact PIC")
        );
        assert_eq!(
            ExpiryKind::Certificate.alert_text(&ExpiryStatus::Valid(30)),
            None
        );
    }

    #[test]
    fn reading_display_combines_date_and_status() {
        let today = ymd(2025, 5, 20);
        assert_eq!(
            ExpiryReading::evaluate(Some("22-5-2025"), today).display(),
            "22/05/2025 (Expires in 2 days)"
        );
        assert_eq!(ExpiryReading::evaluate(Some("NA"), today).display(), "N/A");
        assert_eq!(
            ExpiryReading::evaluate(Some("next week"), today).display(),
            "next week (Unrecognised date)"
        );
    }
}
