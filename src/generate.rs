use crate::infra::{parse_date_arg, resolve_today};
use chrono::NaiveDate;
use clap::Args;
use ihic::config::SiteConfig;
use ihic::error::AppError;
use ihic::inventory::InventoryImporter;
use ihic::site::{GenerationReport, SiteGenerator};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Inventory CSV export (overrides APP_INPUT_CSV)
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Directory receiving the generated pages (overrides APP_OUTPUT_DIR)
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Evaluation date for expiry statuses (defaults to today)
    #[arg(long, value_parser = parse_date_arg)]
    pub today: Option<NaiveDate>,
    /// Print the generation report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Imports the sheet and writes the site, resolving "today" exactly once.
pub fn generate_site(site: &SiteConfig, args: &GenerateArgs) -> Result<GenerationReport, AppError> {
    let input = args.input.clone().unwrap_or_else(|| site.input_csv.clone());
    let output = args.output.clone().unwrap_or_else(|| site.output_dir.clone());
    let today = resolve_today(args.today);

    info!(input = %input.display(), output = %output.display(), %today, "generating inventory pages");

    let import = InventoryImporter::from_path(&input)?;
    let report = SiteGenerator::new(site.settings()).generate(&import, &output, today)?;
    Ok(report)
}

pub(crate) fn run_generate(site: &SiteConfig, args: GenerateArgs) -> Result<(), AppError> {
    let report = generate_site(site, &args)?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_generation_report(&report);
    }

    Ok(())
}

fn render_generation_report(report: &GenerationReport) {
    println!("i-HIC page generation");
    println!(
        "Output: {} (evaluated {})",
        report.output_dir.display(),
        report.today
    );

    for page in &report.pages {
        let marker = if page.alert { " !" } else { "" };
        println!(
            "Generated: {} | item {} | certificate {}{}",
            page.file_name, page.item_status, page.certificate_status, marker
        );
    }

    if report.skipped.is_empty() {
        println!("\nSkipped rows: none");
    } else {
        println!("\nSkipped rows");
        for row in &report.skipped {
            println!(
                "- line {} ({}): {}",
                row.line,
                row.item_id.as_deref().unwrap_or("no id"),
                row.reason.label()
            );
        }
    }

    println!(
        "\n{} pages generated, {} need attention. HTML generation complete!",
        report.pages.len(),
        report.alerts
    );
}
