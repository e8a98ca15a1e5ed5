use super::index::IndexPage;
use super::page::ItemPage;
use super::SiteSettings;
use crate::inventory::{InventoryImport, SkippedRow};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const INDEX_FILE_NAME: &str = "index.html";

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPage {
    pub item_id: String,
    pub file_name: String,
    pub item_status: &'static str,
    pub certificate_status: &'static str,
    pub alert: bool,
}

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub output_dir: PathBuf,
    pub today: NaiveDate,
    pub pages: Vec<GeneratedPage>,
    pub skipped: Vec<SkippedRow>,
    pub alerts: usize,
}

#[derive(Debug, Clone)]
pub struct SiteGenerator {
    settings: SiteSettings,
}

impl SiteGenerator {
    pub fn new(settings: SiteSettings) -> Self {
        Self { settings }
    }

    /// Writes one page per imported record plus `index.html`. Existing files
    /// with the same names are overwritten.
    pub fn generate<P: AsRef<Path>>(
        &self,
        import: &InventoryImport,
        output_dir: P,
        today: NaiveDate,
    ) -> Result<GenerationReport, SiteError> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir).map_err(|source| SiteError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        for row in &import.skipped {
            warn!(
                line = row.line,
                item_id = row.item_id.as_deref().unwrap_or_default(),
                reason = row.reason.label(),
                "skipping inventory row"
            );
        }

        let pages: Vec<ItemPage<'_>> = import
            .records
            .iter()
            .map(|record| ItemPage::build(record, today, &self.settings))
            .collect();

        let mut generated = Vec::with_capacity(pages.len());
        for page in &pages {
            let file_name = page.file_name();
            write_file(&output_dir.join(&file_name), &page.render())?;

            let entry = GeneratedPage {
                item_id: page.record().id().to_string(),
                file_name,
                item_status: page.item_expiry().status.label(),
                certificate_status: page.certificate_expiry().status.label(),
                alert: page.has_alert(),
            };
            info!(
                file = %entry.file_name,
                item_status = entry.item_status,
                certificate_status = entry.certificate_status,
                "generated item page"
            );
            generated.push(entry);
        }

        let index = IndexPage::new(&pages, today, &self.settings);
        write_file(&output_dir.join(INDEX_FILE_NAME), &index.render())?;
        info!(file = INDEX_FILE_NAME, items = pages.len(), "generated index page");

        let alerts = generated.iter().filter(|page| page.alert).count();
        Ok(GenerationReport {
            output_dir: output_dir.to_path_buf(),
            today,
            pages: generated,
            skipped: import.skipped.clone(),
            alerts,
        })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SiteError> {
    fs::write(path, contents).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })
}
