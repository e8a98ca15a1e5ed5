use chrono::{Local, NaiveDate};
use ihic::expiry::parse_date;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) site_dir: Arc<PathBuf>,
}

/// Accepts any date form the spreadsheet accepts (`22/05/2025`, `2025-05-22`).
pub(crate) fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_date(Some(raw)).map_err(|err| format!("failed to parse '{raw}' as a date ({err})"))
}

/// The evaluation day for a run: the explicit value, or the local calendar
/// date read once.
pub(crate) fn resolve_today(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}
