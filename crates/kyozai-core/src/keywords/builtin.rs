use crate::error::KyozaiError;
use crate::keywords::schema::KeywordConfig;
use std::path::Path;

const KEYWORDS_JSON: &str = include_str!("../../../../rules/keywords.json");

/// Load the builtin keyword tables shipped with the crate.
pub fn load_builtin() -> Result<KeywordConfig, KyozaiError> {
    let config: KeywordConfig = serde_json::from_str(KEYWORDS_JSON)?;
    config.validate()?;
    Ok(config)
}

/// Load keyword tables from a custom JSON file.
pub fn load_from_path(path: &Path) -> Result<KeywordConfig, KyozaiError> {
    let text = std::fs::read_to_string(path).map_err(|e| KyozaiError::KeywordsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: KeywordConfig =
        serde_json::from_str(&text).map_err(|e| KyozaiError::KeywordsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    config.validate()?;
    Ok(config)
}
