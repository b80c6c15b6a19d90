use std::error::Error;
use std::path::Path;

use kyozai_core::keywords::{load_builtin, load_from_path};

use crate::output;

pub fn show() -> Result<(), Box<dyn Error>> {
    let config = load_builtin()?;
    output::json::print(&config)?;
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), Box<dyn Error>> {
    let config = load_from_path(file)?;
    println!(
        "OK: {} (v{}): {} subject groups, {} season groups, {} exam keywords, {} composite keywords",
        config.name,
        config.version,
        config.subjects.len(),
        config.seasons.len(),
        config.exam.len(),
        config.composite.len()
    );
    Ok(())
}
