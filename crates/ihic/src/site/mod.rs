//! Static page rendering and output-directory generation.

mod alerts;
mod generator;
mod index;
mod markup;
mod page;

pub use alerts::ExpiryAlert;
pub use generator::{GeneratedPage, GenerationReport, SiteError, SiteGenerator, INDEX_FILE_NAME};
pub use index::IndexPage;
pub use page::ItemPage;

/// Presentation settings shared by every generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub site_title: String,
    /// Recipient of expiry alerts and stock requests.
    pub contact_email: String,
}
