pub mod classify;
pub mod keywords;
pub mod report;
pub mod schools;

use kyozai_core::error::KyozaiError;
use kyozai_core::keywords::{load_builtin, load_from_path, KeywordConfig};
use std::path::Path;

/// Builtin keyword tables unless a custom file is supplied.
pub fn load_keywords(path: Option<&Path>) -> Result<KeywordConfig, KyozaiError> {
    match path {
        Some(p) => load_from_path(p),
        None => load_builtin(),
    }
}
