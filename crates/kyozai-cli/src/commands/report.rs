use std::error::Error;
use std::path::Path;

use kyozai_core::aggregate::{ReportOptions, TabReport};
use kyozai_core::model::Category;
use kyozai_core::{build_school_report, load_orders_xlsx};

use crate::commands::load_keywords;
use crate::output;

pub fn run(
    input_file: &Path,
    school: &str,
    tab: Option<&str>,
    bulk_threshold: u32,
    keywords: Option<&Path>,
    output_format: &str,
) -> Result<(), Box<dyn Error>> {
    let tabs: Vec<Category> = match tab {
        Some(label) => {
            let tab = Category::from_str_loose(label)
                .ok_or_else(|| format!("unknown tab '{label}' (expected 通年, 春期, 夏期, 冬期 or 入試)"))?;
            vec![tab]
        }
        None => Category::TABS.to_vec(),
    };

    let config = load_keywords(keywords)?;
    let bytes = std::fs::read(input_file)?;
    let outcome = load_orders_xlsx(&bytes, &config)?;
    let options = ReportOptions::new(bulk_threshold)?;

    let reports: Vec<TabReport> = tabs
        .into_iter()
        .map(|tab| build_school_report(&outcome.records, school, tab, &options))
        .collect::<Result<_, _>>()?;

    match output_format {
        "json" => output::json::print(&reports)?,
        "table" => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                output::table::print_report(report);
            }
            if outcome.trace.dropped() > 0 {
                println!();
                println!(
                    "({} of {} rows dropped during ingestion)",
                    outcome.trace.dropped(),
                    outcome.trace.total_rows
                );
            }
        }
        other => return Err(format!("unknown output format '{other}'").into()),
    }

    Ok(())
}
