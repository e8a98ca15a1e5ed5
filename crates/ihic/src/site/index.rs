use super::markup::{escape_html, write_document_end, write_document_start};
use super::page::ItemPage;
use super::SiteSettings;
use crate::expiry::{format_date, ExpiryReading};
use chrono::NaiveDate;
use std::fmt;

/// Landing page listing every generated item with its expiry standing.
#[derive(Debug, Clone, Copy)]
pub struct IndexPage<'a> {
    pages: &'a [ItemPage<'a>],
    today: NaiveDate,
    settings: &'a SiteSettings,
}

impl<'a> IndexPage<'a> {
    pub fn new(pages: &'a [ItemPage<'a>], today: NaiveDate, settings: &'a SiteSettings) -> Self {
        Self {
            pages,
            today,
            settings,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    fn count(&self, predicate: impl Fn(&ItemPage<'_>) -> bool) -> usize {
        self.pages.iter().filter(|page| predicate(page)).count()
    }
}

impl fmt::Display for IndexPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expired = self.count(|page| {
            page.item_expiry().status.is_expired() || page.certificate_expiry().status.is_expired()
        });
        let attention = self.count(|page| page.has_alert());

        write_document_start(f, &self.settings.site_title, "container wide")?;
        writeln!(
            f,
            "        <div class=\"evaluated-on\">Status as of {}</div>",
            format_date(self.today)
        )?;
        writeln!(f, "        <div class=\"summary\">")?;
        writeln!(f, "            <div><strong>{}</strong><br>Items</div>", self.pages.len())?;
        writeln!(
            f,
            "            <div class=\"expired\"><strong>{attention}</strong><br>Need attention</div>"
        )?;
        writeln!(
            f,
            "            <div class=\"expired\"><strong>{expired}</strong><br>Expired</div>"
        )?;
        writeln!(f, "        </div>")?;

        writeln!(f, "        <div class=\"info-card\">")?;
        writeln!(f, "            <div class=\"card-title\">Inventory</div>")?;
        if self.pages.is_empty() {
            writeln!(
                f,
                "            <p class=\"na-value\">No inventory records found.</p>"
            )?;
        } else {
            writeln!(f, "            <table class=\"inventory-table\">")?;
            writeln!(
                f,
                "                <tr><th>Item ID</th><th>Item</th><th>Category</th><th>Item Expiry</th><th>Certificate Expiry</th></tr>"
            )?;
            for page in self.pages {
                let record = page.record();
                writeln!(
                    f,
                    "                <tr><td>{}</td><td><a href=\"{}\">{}</a></td><td>{}</td>{}{}</tr>",
                    escape_html(record.id()),
                    escape_html(&page.file_name()),
                    escape_html(&record.item_name),
                    escape_html(&record.category),
                    status_cell(page.item_expiry()),
                    status_cell(page.certificate_expiry()),
                )?;
            }
            writeln!(f, "            </table>")?;
        }
        writeln!(f, "        </div>")?;

        write_document_end(f, None)
    }
}

fn status_cell(reading: &ExpiryReading) -> String {
    format!(
        "<td class=\"{}\">{}</td>",
        reading.status.css_class(),
        escape_html(&reading.display())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::InventoryRecord;

    fn settings() -> SiteSettings {
        SiteSettings {
            site_title: "i-HIC".to_string(),
            contact_email: "pic@example.com".to_string(),
        }
    }

    fn record(id: &str, expiry: &str) -> InventoryRecord {
        InventoryRecord {
            item_id: Some(id.to_string()),
            item_name: format!("Item {id}"),
            item_expiry: Some(expiry.to_string()),
            ..InventoryRecord::default()
        }
    }

    #[test]
    fn lists_items_with_links_and_counts() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 22).expect("valid date");
        let records = vec![
            record("A1", "22/05/2025"),
            record("B2", "01/06/2025"),
            record("C3", "01/01/2030"),
        ];
        let settings = settings();
        let pages: Vec<ItemPage<'_>> = records
            .iter()
            .map(|record| ItemPage::build(record, today, &settings))
            .collect();

        let html = IndexPage::new(&pages, today, &settings).render();

        assert!(html.contains("Status as of 22/05/2025"));
        assert!(html.contains("<a href=\"item_A1.html\">Item A1</a>"));
        assert!(html.contains("<td class=\"expired\">22/05/2025 (Expired)</td>"));
        assert!(html.contains("<td class=\"expired\">01/06/2025 (Expires in 10 days)</td>"));
        assert!(html.contains("<strong>3</strong><br>Items"));
        assert!(html.contains("<strong>2</strong><br>Need attention"));
        assert!(html.contains("<strong>1</strong><br>Expired"));
        assert!(html.contains("<td class=\"na-value\">N/A</td>"));
    }

    #[test]
    fn empty_inventory_renders_placeholder() {
        let today = NaiveDate::from_ymd_opt(2025, 5, 22).expect("valid date");
        let settings = settings();
        let html = IndexPage::new(&[], today, &settings).render();
        assert!(html.contains("No inventory records found."));
    }
}
