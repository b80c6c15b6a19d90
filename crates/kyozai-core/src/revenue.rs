//! Projected incremental revenue for a school's annual middle-school slice.
//!
//! The 中3 order profile anchors the estimate: grades with no orders at all
//! inherit a scaled-down copy of it (中1 half, 中2 three quarters), and every
//! core subject without orders contributes its base quantity times the unit
//! price. Averages round half-to-even, matching the source system.

use std::collections::HashMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::model::{Category, ClassifiedOrderRecord, Grade, Subject};

/// Price per book used for the projection.
pub const UNIT_PRICE: i64 = 1500;

const KRS: [Subject; 3] = [Subject::Kokugo, Subject::Rika, Subject::Shakai];

/// Projected incremental revenue for one school.
///
/// Considers only 通年 records for 中1..中3. Returns 0 when that slice is
/// empty; never negative.
pub fn revenue_potential(school_records: &[ClassifiedOrderRecord], unit_price: i64) -> i64 {
    let target: Vec<&ClassifiedOrderRecord> = school_records
        .iter()
        .filter(|r| {
            r.classification.category == Category::YearRound
                && matches!(r.classification.grade, Some(Grade::Middle(_)))
        })
        .collect();

    if target.is_empty() {
        return 0;
    }

    // 中3 baseline for grades without any orders
    let m3_totals = subject_totals(&target, 3);
    let m3_eng_math_max = total(&m3_totals, Subject::Eigo).max(total(&m3_totals, Subject::Suugaku));
    let m3_krs_avg = nonzero_mean(&m3_totals)
        .unwrap_or_else(|| round_half_even(Decimal::from(m3_eng_math_max) / Decimal::from(2)));

    let mut potential: i64 = 0;
    for n in 1..=3u8 {
        let totals = subject_totals(&target, n);

        let (eng_math_base, krs_base) = if !totals.is_empty() {
            let grade_max = totals.values().copied().max().unwrap_or(0);
            let krs = nonzero_mean(&totals)
                .unwrap_or_else(|| round_half_even(Decimal::from(grade_max) / Decimal::from(2)));
            (grade_max, krs)
        } else {
            // scale the 中3 baseline: 中1 gets 2/4, 中2 gets 3/4, 中3 itself 4/4
            let numerator = i64::from(n) + 1;
            (
                scale(m3_eng_math_max, numerator),
                scale(m3_krs_avg, numerator),
            )
        };

        for subject in Subject::MIDDLE_CORE {
            if total(&totals, subject) == 0 {
                let base = if matches!(subject, Subject::Eigo | Subject::Suugaku) {
                    eng_math_base
                } else {
                    krs_base
                };
                potential += base * unit_price;
            }
        }
    }

    potential
}

fn subject_totals(records: &[&ClassifiedOrderRecord], middle_year: u8) -> HashMap<Subject, i64> {
    let mut totals = HashMap::new();
    for r in records {
        if r.classification.grade == Some(Grade::Middle(middle_year)) {
            *totals.entry(r.classification.subject).or_insert(0) += i64::from(r.record.quantity);
        }
    }
    totals
}

fn total(totals: &HashMap<Subject, i64>, subject: Subject) -> i64 {
    totals.get(&subject).copied().unwrap_or(0)
}

/// Rounded mean of the nonzero 国語/理科/社会 totals, if any are nonzero.
fn nonzero_mean(totals: &HashMap<Subject, i64>) -> Option<i64> {
    let nonzero: Vec<i64> = KRS
        .iter()
        .map(|&s| total(totals, s))
        .filter(|&t| t > 0)
        .collect();
    if nonzero.is_empty() {
        return None;
    }
    let sum: i64 = nonzero.iter().sum();
    let mean = Decimal::from(sum) / Decimal::from(nonzero.len() as i64);
    Some(round_half_even(mean))
}

fn scale(value: i64, numerator: i64) -> i64 {
    round_half_even(Decimal::from(value) * Decimal::from(numerator) / Decimal::from(4))
}

/// Banker's rounding to a whole number.
fn round_half_even(value: Decimal) -> i64 {
    value.round().to_i64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderRecord, ProductClassification, Season};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(grade: Grade, subject: Subject, quantity: u32, category: Category) -> ClassifiedOrderRecord {
        ClassifiedOrderRecord {
            record: OrderRecord {
                order_date: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
                school_name: "塾A".into(),
                product_name: format!("{subject}教材"),
                quantity,
            },
            classification: ProductClassification {
                grade: Some(grade),
                subject,
                season: (category == Category::Summer).then_some(Season::Summer),
                is_exam: category == Category::Exam,
                is_composite: false,
                category,
            },
        }
    }

    fn annual(grade: Grade, subject: Subject, quantity: u32) -> ClassifiedOrderRecord {
        record(grade, subject, quantity, Category::YearRound)
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_half_even(dec!(1.5)), 2);
        assert_eq!(round_half_even(dec!(2.5)), 2);
        assert_eq!(round_half_even(dec!(7.5)), 8);
        assert_eq!(round_half_even(dec!(3.2)), 3);
    }

    #[test]
    fn mean_of_one_and_two_rounds_to_two() {
        let totals: HashMap<Subject, i64> =
            [(Subject::Kokugo, 1), (Subject::Rika, 2)].into_iter().collect();
        assert_eq!(nonzero_mean(&totals), Some(2));
    }

    #[test]
    fn empty_slice_yields_zero() {
        assert_eq!(revenue_potential(&[], UNIT_PRICE), 0);
        // elementary-only records leave the middle slice empty
        let records = vec![annual(Grade::Elementary(4), Subject::Sansuu, 8)];
        assert_eq!(revenue_potential(&records, UNIT_PRICE), 0);
    }

    #[test]
    fn seasonal_records_do_not_count() {
        let records = vec![record(Grade::Middle(3), Subject::Eigo, 10, Category::Summer)];
        assert_eq!(revenue_potential(&records, UNIT_PRICE), 0);
    }

    #[test]
    fn worked_baseline_scenario() {
        // 中3 totals: 英語 10, 数学 8, 社会 4; 中1/中2 empty
        let records = vec![
            annual(Grade::Middle(3), Subject::Eigo, 10),
            annual(Grade::Middle(3), Subject::Suugaku, 8),
            annual(Grade::Middle(3), Subject::Shakai, 4),
        ];
        // baseline: engMathMax = 10, krsAvg = mean([4]) = 4
        // 中1 (empty): eng/math base round(10*2/4)=5, krs base round(4*2/4)=2
        //   all five subjects empty -> 5*1500*2 + 2*1500*3 = 24000
        // 中2 (empty): bases round(7.5)=8 and 3 -> 8*1500*2 + 3*1500*3 = 37500
        // 中3: grade max 10, krs avg 4; gaps 国語+理科 -> 4*1500*2 = 12000
        assert_eq!(revenue_potential(&records, UNIT_PRICE), 24000 + 37500 + 12000);
    }

    #[test]
    fn fully_covered_grades_contribute_nothing() {
        let mut records = Vec::new();
        for n in 1..=3 {
            for subject in Subject::MIDDLE_CORE {
                records.push(annual(Grade::Middle(n), subject, 6));
            }
        }
        assert_eq!(revenue_potential(&records, UNIT_PRICE), 0);
    }

    #[test]
    fn krs_fallback_uses_half_of_grade_max() {
        // 中2 only: 英語 9, no 国理社 -> krs base = round(9/2) = round(4.5) = 4
        let records = vec![annual(Grade::Middle(2), Subject::Eigo, 9)];
        // 中2 gaps: 国語/理科/社会 at 4 each, 数学 at 9 (grade max)
        let m2 = 9 * UNIT_PRICE + 3 * 4 * UNIT_PRICE;
        // 中3 baseline comes from 中3 records (none) -> all bases 0, but 中1/中3
        // themselves are empty grades scaled from an all-zero baseline -> 0
        assert_eq!(revenue_potential(&records, UNIT_PRICE), m2);
    }

    #[test]
    fn potential_is_never_negative() {
        let records = vec![
            annual(Grade::Middle(1), Subject::Sonota, 100),
            annual(Grade::Middle(3), Subject::Eigo, 1),
        ];
        assert!(revenue_potential(&records, UNIT_PRICE) >= 0);
    }
}
