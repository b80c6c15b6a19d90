use crate::keywords::schema::KeywordConfig;
use crate::model::Season;

/// Detect the season and exam flag of a normalized product name.
///
/// Exam markers take absolute priority: exam material gets no season even
/// when a seasonal keyword is also present. Season groups are tried in
/// declared order (春期, 夏期, 冬期) and the first hit wins.
pub fn extract_season_and_exam(name: &str, config: &KeywordConfig) -> (Option<Season>, bool) {
    if config.exam.iter().any(|k| name.contains(k.as_str())) {
        return (None, true);
    }

    for group in &config.seasons {
        if group.patterns.iter().any(|p| name.contains(p.as_str())) {
            return (Some(group.season), false);
        }
    }

    (None, false)
}
