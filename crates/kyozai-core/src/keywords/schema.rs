use crate::error::KyozaiError;
use crate::model::{Season, Subject};
use serde::{Deserialize, Serialize};

/// The keyword tables driving every extractor. Declared order is match
/// priority order, so the lists are `Vec`s rather than maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    pub name: String,
    pub version: String,
    /// Subject keyword groups, evaluated in declared order.
    pub subjects: Vec<SubjectKeywords>,
    /// Season keyword groups, evaluated in declared order.
    pub seasons: Vec<SeasonKeywords>,
    /// Exam markers; any hit overrides season detection.
    pub exam: Vec<String>,
    /// Bundled/omnibus material markers.
    pub composite: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectKeywords {
    pub subject: Subject,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonKeywords {
    pub season: Season,
    pub patterns: Vec<String>,
}

impl KeywordConfig {
    /// Structural checks applied to both the builtin tables and custom files.
    pub fn validate(&self) -> Result<(), KyozaiError> {
        if self.subjects.is_empty() {
            return Err(KyozaiError::KeywordsInvalid(
                "no subject keyword groups defined".into(),
            ));
        }
        for group in &self.subjects {
            if group.subject == Subject::Sonota {
                return Err(KyozaiError::KeywordsInvalid(
                    "その他 is the fallback subject and cannot carry a keyword group".into(),
                ));
            }
            if group.patterns.iter().any(|p| p.is_empty()) || group.patterns.is_empty() {
                return Err(KyozaiError::KeywordsInvalid(format!(
                    "subject group '{}' has an empty pattern list or empty pattern",
                    group.subject
                )));
            }
        }
        for (i, group) in self.subjects.iter().enumerate() {
            if self.subjects[..i].iter().any(|g| g.subject == group.subject) {
                return Err(KyozaiError::KeywordsInvalid(format!(
                    "subject group '{}' declared more than once",
                    group.subject
                )));
            }
        }
        for group in &self.seasons {
            if group.patterns.iter().any(|p| p.is_empty()) || group.patterns.is_empty() {
                return Err(KyozaiError::KeywordsInvalid(format!(
                    "season group '{}' has an empty pattern list or empty pattern",
                    group.season
                )));
            }
        }
        for (i, group) in self.seasons.iter().enumerate() {
            if self.seasons[..i].iter().any(|g| g.season == group.season) {
                return Err(KyozaiError::KeywordsInvalid(format!(
                    "season group '{}' declared more than once",
                    group.season
                )));
            }
        }
        if self.exam.is_empty() || self.exam.iter().any(|k| k.is_empty()) {
            return Err(KyozaiError::KeywordsInvalid(
                "exam keyword list is empty or contains an empty keyword".into(),
            ));
        }
        if self.composite.is_empty() || self.composite.iter().any(|k| k.is_empty()) {
            return Err(KyozaiError::KeywordsInvalid(
                "composite keyword list is empty or contains an empty keyword".into(),
            ));
        }
        Ok(())
    }
}
