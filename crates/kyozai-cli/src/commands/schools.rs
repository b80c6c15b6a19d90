use std::error::Error;
use std::path::Path;

use kyozai_core::{load_orders_xlsx, school_names};

use crate::commands::load_keywords;

pub fn run(input_file: &Path, keywords: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = load_keywords(keywords)?;
    let bytes = std::fs::read(input_file)?;
    let outcome = load_orders_xlsx(&bytes, &config)?;

    let schools = school_names(&outcome.records);
    if schools.is_empty() {
        println!("No schools found ({} rows dropped)", outcome.trace.dropped());
        return Ok(());
    }

    for (name, count) in &schools {
        println!("{name}  ({count} rows)");
    }
    println!();
    println!(
        "{} schools, {} order rows ({} dropped)",
        schools.len(),
        outcome.trace.retained,
        outcome.trace.dropped()
    );

    Ok(())
}
