use super::alerts::ExpiryAlert;
use super::markup::{escape_html, write_document_end, write_document_start};
use super::SiteSettings;
use crate::expiry::{format_date, parse_date, DateError, ExpiryKind, ExpiryReading};
use crate::inventory::InventoryRecord;
use chrono::NaiveDate;
use std::fmt;

const STOCK_REQUEST_SCRIPT: &str = r#"    <script>
        function sendRequest(button) {
            const quantityInput = document.querySelector('.quantity-input');
            const quantity = quantityInput.value.trim();

            if (!quantity) {
                alert('Please enter a quantity');
                return;
            }

            const itemName = button.dataset.item;
            const subject = `Stock Request - ${itemName}`;
            const body = `Hi. I want to request for ${itemName} with a quantity of ${quantity}. Thank you.`;

            window.location.href = `mailto:${button.dataset.contact}?subject=${encodeURIComponent(subject)}&body=${encodeURIComponent(body)}`;
            quantityInput.value = '';
        }
    </script>"#;

/// Detail page for one inventory record, evaluated against a fixed day.
#[derive(Debug, Clone)]
pub struct ItemPage<'a> {
    record: &'a InventoryRecord,
    settings: &'a SiteSettings,
    item_expiry: ExpiryReading,
    certificate_expiry: ExpiryReading,
    item_alert: Option<ExpiryAlert>,
    certificate_alert: Option<ExpiryAlert>,
}

impl<'a> ItemPage<'a> {
    pub fn build(record: &'a InventoryRecord, today: NaiveDate, settings: &'a SiteSettings) -> Self {
        let item_expiry = record.item_expiry_reading(today);
        let certificate_expiry = record.certificate_expiry_reading(today);
        let item_alert = ExpiryAlert::for_status(ExpiryKind::Item, &item_expiry.status, record);
        let certificate_alert =
            ExpiryAlert::for_status(ExpiryKind::Certificate, &certificate_expiry.status, record);

        Self {
            record,
            settings,
            item_expiry,
            certificate_expiry,
            item_alert,
            certificate_alert,
        }
    }

    pub fn record(&self) -> &InventoryRecord {
        self.record
    }

    pub fn file_name(&self) -> String {
        self.record.page_file_name()
    }

    pub fn item_expiry(&self) -> &ExpiryReading {
        &self.item_expiry
    }

    pub fn certificate_expiry(&self) -> &ExpiryReading {
        &self.certificate_expiry
    }

    pub fn has_alert(&self) -> bool {
        self.item_alert.is_some() || self.certificate_alert.is_some()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn write_product_card(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        writeln!(f, "        <div class=\"info-card\">")?;
        writeln!(f, "            <div class=\"card-title\">Product Info</div>")?;
        detail_row(f, "Item ID", &escape_html(record.id()), "", None)?;
        detail_row(f, "Category", &escape_html(&record.category), "", None)?;
        detail_row(f, "Batch/GRIS No.", &escape_html(&record.batch_number), "", None)?;
        detail_row(f, "Brand", &escape_html(&record.brand), "", None)?;
        detail_row(f, "Supplier", &escape_html(&record.supplier), "", None)?;
        detail_row(
            f,
            ExpiryKind::Item.label(),
            &escape_html(&self.item_expiry.display()),
            self.item_expiry.status.css_class(),
            Some("itemExpiryDate"),
        )?;
        alert_block(
            f,
            "expiryAlertContainer",
            self.item_alert.as_ref(),
            &self.settings.contact_email,
        )?;
        detail_row(
            f,
            "Stock Available",
            &escape_html(&record.stock_available),
            "",
            None,
        )?;
        writeln!(f, "        </div>")
    }

    fn write_purchase_card(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "        <div class=\"info-card\">")?;
        writeln!(f, "            <div class=\"card-title\">Purchase Info</div>")?;
        let (purchased, class) = purchased_display(self.record.purchased_date.as_deref());
        detail_row(f, "Purchased Date", &escape_html(&purchased), class, None)?;
        detail_row(
            f,
            "Invoice",
            &link_or_na(self.record.invoice_url.as_deref(), "View Invoice"),
            "",
            None,
        )?;
        writeln!(f, "        </div>")
    }

    fn write_halal_card(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record;
        let available = record.has_halal_certificate();
        let availability_class = if available {
            "cert-available"
        } else {
            "cert-not-available"
        };
        let availability = if record.halal_certificate.trim().is_empty() {
            "Not Available"
        } else {
            record.halal_certificate.as_str()
        };

        writeln!(f, "        <div class=\"info-card\">")?;
        writeln!(f, "            <div class=\"card-title\">Halal Info</div>")?;
        detail_row(
            f,
            "Halal Certificate",
            &escape_html(availability),
            availability_class,
            None,
        )?;

        if available {
            detail_row(
                f,
                ExpiryKind::Certificate.label(),
                &escape_html(&self.certificate_expiry.display()),
                self.certificate_expiry.status.css_class(),
                Some("certExpiryDate"),
            )?;
            alert_block(
                f,
                "certAlertContainer",
                self.certificate_alert.as_ref(),
                &self.settings.contact_email,
            )?;
            detail_row(
                f,
                "Certificate",
                &link_or_na(record.certificate_url.as_deref(), "View Certificate"),
                "",
                None,
            )?;
        }

        writeln!(f, "        </div>")
    }

    fn write_stock_request(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "        <div class=\"stock-request-box\">")?;
        writeln!(
            f,
            "            <button class=\"btn btn-purple\" type=\"button\">Stock Request</button>"
        )?;
        writeln!(
            f,
            "            <label class=\"quantity-label\" for=\"quantity\">Quantity:</label>"
        )?;
        writeln!(
            f,
            "            <input id=\"quantity\" type=\"text\" class=\"quantity-input\" placeholder=\"Enter quantity\">"
        )?;
        writeln!(
            f,
            "            <button class=\"btn btn-green\" type=\"button\" data-item=\"{}\" data-contact=\"{}\" onclick=\"sendRequest(this)\">Send Request</button>",
            escape_html(&self.record.item_name),
            escape_html(self.settings.contact_email.trim())
        )?;
        writeln!(f, "        </div>")
    }
}

impl fmt::Display for ItemPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(
            "{} - {} Details",
            self.settings.site_title, self.record.item_name
        );
        write_document_start(f, &title, "container")?;
        writeln!(
            f,
            "        <div class=\"item-name\">{}</div>",
            escape_html(&self.record.item_name)
        )?;
        self.write_product_card(f)?;
        self.write_purchase_card(f)?;
        self.write_halal_card(f)?;
        self.write_stock_request(f)?;
        writeln!(
            f,
            "        <a href=\"index.html\" class=\"back-btn\">&larr; Back</a>"
        )?;
        write_document_end(f, Some(STOCK_REQUEST_SCRIPT))
    }
}

fn detail_row(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value_html: &str,
    class: &str,
    id: Option<&str>,
) -> fmt::Result {
    let class_attr = if class.is_empty() {
        "detail-value".to_string()
    } else {
        format!("detail-value {class}")
    };
    let id_attr = id.map(|id| format!(" id=\"{id}\"")).unwrap_or_default();

    writeln!(f, "            <div class=\"detail-row\">")?;
    writeln!(f, "                <div class=\"detail-label\">{label}:</div>")?;
    writeln!(
        f,
        "                <div class=\"{class_attr}\"{id_attr}>{value_html}</div>"
    )?;
    writeln!(f, "            </div>")
}

fn alert_block(
    f: &mut fmt::Formatter<'_>,
    container_id: &str,
    alert: Option<&ExpiryAlert>,
    contact_email: &str,
) -> fmt::Result {
    match alert {
        Some(alert) => {
            writeln!(
                f,
                "            <div id=\"{container_id}\" class=\"alert-container\">"
            )?;
            writeln!(
                f,
                "                <a class=\"btn btn-red\" href=\"{}\">{}</a>",
                escape_html(&alert.mailto(contact_email)),
                alert.caption
            )?;
            writeln!(f, "            </div>")
        }
        None => writeln!(
            f,
            "            <div id=\"{container_id}\" class=\"alert-container\"></div>"
        ),
    }
}

fn link_or_na(url: Option<&str>, caption: &str) -> String {
    match url {
        Some(url) => format!(
            "<a href=\"{}\" class=\"btn btn-blue\">{caption}</a>",
            escape_html(url)
        ),
        None => "<span class=\"na-value\">N/A</span>".to_string(),
    }
}

// Unparseable purchase dates are shown verbatim rather than guessed.
fn purchased_display(raw: Option<&str>) -> (String, &'static str) {
    match parse_date(raw) {
        Ok(date) => (format_date(date), ""),
        Err(DateError::Empty | DateError::NotApplicable) => ("N/A".to_string(), "na-value"),
        Err(DateError::Malformed { raw }) => (raw, "invalid-date"),
    }
}
