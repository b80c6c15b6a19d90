use crate::keywords::schema::SubjectKeywords;
use crate::model::{Grade, Subject};

/// Resolve the subject of a normalized product name.
///
/// Collects every keyword group with a hit, in declared group order. The
/// grade disambiguates the 算数/数学 pair: middle schoolers always get
/// 数学, elementary always 算数, because bare 数 is ambiguous across
/// school levels. Otherwise the first group hit wins.
pub fn extract_subject(name: &str, grade: Option<Grade>, groups: &[SubjectKeywords]) -> Subject {
    let mut found: Vec<Subject> = Vec::new();
    for group in groups {
        if group.patterns.iter().any(|p| name.contains(p.as_str())) {
            found.push(group.subject);
        }
    }

    if found.is_empty() {
        return Subject::Sonota;
    }

    let has_math = found.contains(&Subject::Suugaku) || found.contains(&Subject::Sansuu);
    match grade {
        Some(g) if g.is_middle() && has_math => Subject::Suugaku,
        Some(g) if g.is_elementary() && has_math => Subject::Sansuu,
        _ => found[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::load_builtin;

    fn groups() -> Vec<SubjectKeywords> {
        load_builtin().unwrap().subjects
    }

    #[test]
    fn plain_subjects() {
        let g = groups();
        assert_eq!(extract_subject("英語長文", None, &g), Subject::Eigo);
        assert_eq!(extract_subject("現代文読解", None, &g), Subject::Kokugo);
        assert_eq!(extract_subject("物理基礎", None, &g), Subject::Rika);
        assert_eq!(extract_subject("歴史年表", None, &g), Subject::Shakai);
    }

    #[test]
    fn no_keyword_falls_back_to_sonota() {
        assert_eq!(extract_subject("ドリル", None, &groups()), Subject::Sonota);
    }

    #[test]
    fn middle_grade_collapses_to_suugaku() {
        let g = groups();
        assert_eq!(
            extract_subject("数学ワーク", Some(Grade::Middle(2)), &g),
            Subject::Suugaku
        );
        // 算数 keyword on a middle-school product still resolves to 数学
        assert_eq!(
            extract_subject("算数ワーク", Some(Grade::Middle(1)), &g),
            Subject::Suugaku
        );
    }

    #[test]
    fn elementary_grade_collapses_to_sansuu() {
        let g = groups();
        assert_eq!(
            extract_subject("算数ドリル", Some(Grade::Elementary(3)), &g),
            Subject::Sansuu
        );
        assert_eq!(
            extract_subject("数学入門", Some(Grade::Elementary(6)), &g),
            Subject::Sansuu
        );
    }

    #[test]
    fn math_collapse_beats_group_order() {
        // 国語 is declared before 算数, but the grade override wins
        assert_eq!(
            extract_subject("算数・国語セット", Some(Grade::Elementary(3)), &groups()),
            Subject::Sansuu
        );
    }

    #[test]
    fn first_group_wins_without_grade() {
        // both 国語 and 算数 hit; no grade, so declared order decides
        assert_eq!(extract_subject("算数・国語セット", None, &groups()), Subject::Kokugo);
    }

    #[test]
    fn high_school_keeps_first_found() {
        assert_eq!(
            extract_subject("数学III", Some(Grade::HighSchool), &groups()),
            Subject::Suugaku
        );
    }
}
