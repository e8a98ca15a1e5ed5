use crate::infra::{parse_date_arg, resolve_today};
use chrono::NaiveDate;
use clap::Args;
use ihic::error::AppError;
use ihic::expiry::ExpiryReading;
use serde::Serialize;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Raw expiry value as it appears in the sheet (e.g. 22/05/2025 or NA)
    pub(crate) value: String,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

/// Serialisable view of an evaluated expiry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ExpiryView {
    pub(crate) value: String,
    pub(crate) today: NaiveDate,
    pub(crate) status: &'static str,
    pub(crate) css_class: &'static str,
    pub(crate) text: String,
    pub(crate) display: String,
    pub(crate) alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) days_remaining: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) expires_on: Option<String>,
}

impl ExpiryView {
    pub(crate) fn evaluate(value: &str, today: NaiveDate) -> Self {
        let reading = ExpiryReading::evaluate(Some(value), today);
        Self {
            value: value.to_string(),
            today,
            status: reading.status.label(),
            css_class: reading.status.css_class(),
            text: reading.status.text(),
            display: reading.display(),
            alert: reading.status.alert(),
            days_remaining: reading.status.days_remaining(),
            expires_on: reading.formatted_date(),
        }
    }
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let CheckArgs { value, today, json } = args;
    let view = ExpiryView::evaluate(&value, resolve_today(today));

    if json {
        let rendered = serde_json::to_string_pretty(&view).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!("{} [{}]", view.display, view.status);
    }

    Ok(())
}
