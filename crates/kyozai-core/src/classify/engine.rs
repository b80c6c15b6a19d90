use crate::classify::{composite, grade, normalize, season, subject};
use crate::keywords::schema::KeywordConfig;
use crate::model::{Category, ProductClassification};

/// Classify one product name into its full attribute record.
///
/// Normalizes once, then runs the extractors: grade, subject (grade-aware),
/// season/exam, composite. The category follows the priority
/// exam > season > 通年. A missing name yields the default classification.
///
/// Pure function of the string and the keyword tables — safe to memoize per
/// distinct product name.
pub fn classify_product(raw_name: Option<&str>, config: &KeywordConfig) -> ProductClassification {
    let Some(raw) = raw_name else {
        return ProductClassification::default();
    };

    let normalized = normalize::normalize_text(raw);
    let grade = grade::extract_grade(&normalized);
    let subject = subject::extract_subject(&normalized, grade, &config.subjects);
    let (season, is_exam) = season::extract_season_and_exam(&normalized, config);
    let is_composite = composite::is_composite(&normalized, &config.composite);

    ProductClassification {
        grade,
        subject,
        season,
        is_exam,
        is_composite,
        category: Category::derive(is_exam, season),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::load_builtin;
    use crate::model::{Grade, Season, Subject};

    #[test]
    fn seasonal_middle_school_text() {
        let config = load_builtin().unwrap();
        let c = classify_product(Some("中2 数学 夏期講習テキスト"), &config);
        assert_eq!(c.grade, Some(Grade::Middle(2)));
        assert_eq!(c.subject, Subject::Suugaku);
        assert_eq!(c.season, Some(Season::Summer));
        assert!(!c.is_exam);
        assert!(!c.is_composite);
        assert_eq!(c.category, Category::Summer);
    }

    #[test]
    fn exam_keyword_suppresses_season_not_grade() {
        let config = load_builtin().unwrap();
        let c = classify_product(Some("高校入試対策 過去問集"), &config);
        // grade extraction is independent of exam detection, so 高校 still matches
        assert_eq!(c.grade, Some(Grade::HighSchool));
        assert!(c.is_exam);
        assert_eq!(c.season, None);
        assert_eq!(c.category, Category::Exam);
    }

    #[test]
    fn composite_elementary_set() {
        let config = load_builtin().unwrap();
        let c = classify_product(Some("小3算数・国語セット"), &config);
        assert_eq!(c.grade, Some(Grade::Elementary(3)));
        assert_eq!(c.subject, Subject::Sansuu);
        assert!(c.is_composite);
        assert_eq!(c.category, Category::YearRound);
    }

    #[test]
    fn missing_name_yields_default() {
        let config = load_builtin().unwrap();
        let c = classify_product(None, &config);
        assert_eq!(c, ProductClassification::default());
        assert_eq!(c.subject, Subject::Sonota);
        assert_eq!(c.category, Category::YearRound);
    }

    #[test]
    fn empty_name_matches_default() {
        let config = load_builtin().unwrap();
        assert_eq!(
            classify_product(Some(""), &config),
            ProductClassification::default()
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let config = load_builtin().unwrap();
        let name = Some("中1 英語 ウィンター特訓");
        assert_eq!(
            classify_product(name, &config),
            classify_product(name, &config)
        );
    }

    #[test]
    fn exactly_one_category_assigned() {
        let config = load_builtin().unwrap();
        for name in [
            "中2 数学 夏期講習テキスト",
            "高校入試対策 過去問集",
            "小3算数・国語セット",
            "冬期 受験直前パック",
            "英語長文",
        ] {
            let c = classify_product(Some(name), &config);
            assert_eq!(c.category, Category::derive(c.is_exam, c.season));
            if c.is_exam {
                assert_eq!(c.category, Category::Exam);
                assert_eq!(c.season, None);
            }
        }
    }
}
