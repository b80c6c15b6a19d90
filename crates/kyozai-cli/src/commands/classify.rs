use std::error::Error;
use std::path::Path;

use kyozai_core::classify::classify_product;
use kyozai_core::model::ProductClassification;
use serde_json::json;

use crate::commands::load_keywords;
use crate::output;

pub fn run(names: &[String], keywords: Option<&Path>, output_format: &str) -> Result<(), Box<dyn Error>> {
    if names.is_empty() {
        return Err("no product names given".into());
    }

    let config = load_keywords(keywords)?;
    let classified: Vec<(&String, ProductClassification)> = names
        .iter()
        .map(|name| (name, classify_product(Some(name.as_str()), &config)))
        .collect();

    match output_format {
        "json" => {
            let items: Vec<_> = classified
                .iter()
                .map(|(name, c)| json!({ "product_name": name, "classification": c }))
                .collect();
            output::json::print(&items)?;
        }
        "table" => {
            for (name, c) in &classified {
                output::table::print_classification(name, c);
            }
        }
        other => return Err(format!("unknown output format '{other}'").into()),
    }

    Ok(())
}
