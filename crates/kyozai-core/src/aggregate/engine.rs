use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::aggregate::outcome::{
    BucketKind, GradeSection, ProductEntry, SubjectBucket, TabReport,
};
use crate::error::KyozaiError;
use crate::model::{Category, ClassifiedOrderRecord, Grade, Subject};
use crate::revenue;

pub const DEFAULT_BULK_THRESHOLD: u32 = 5;
const BULK_THRESHOLD_MIN: u32 = 1;
const BULK_THRESHOLD_MAX: u32 = 50;

/// Per-call aggregation knobs. The bulk threshold is injected here rather
/// than held in any global state.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub bulk_threshold: u32,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            bulk_threshold: DEFAULT_BULK_THRESHOLD,
        }
    }
}

impl ReportOptions {
    pub fn new(bulk_threshold: u32) -> Result<Self, KyozaiError> {
        if !(BULK_THRESHOLD_MIN..=BULK_THRESHOLD_MAX).contains(&bulk_threshold) {
            return Err(KyozaiError::BulkThresholdRange(bulk_threshold));
        }
        Ok(ReportOptions { bulk_threshold })
    }
}

/// Build the grouped view of one school's orders for one tab.
///
/// `school_records` must already be restricted to a single school; the tab
/// filter, grade lineup, subject grouping, rollups and flags all happen
/// here. Never fails: an empty slice produces an empty, flagged report.
pub fn build_tab_report(
    school_records: &[ClassifiedOrderRecord],
    school_name: &str,
    tab: Category,
    options: &ReportOptions,
) -> TabReport {
    let annual_total: u32 = school_records.iter().map(|r| r.record.quantity).sum();
    let revenue_potential = (tab == Category::YearRound)
        .then(|| revenue::revenue_potential(school_records, revenue::UNIT_PRICE));

    let tab_records: Vec<&ClassifiedOrderRecord> = school_records
        .iter()
        .filter(|r| r.classification.category == tab)
        .collect();

    if tab_records.is_empty() {
        return TabReport {
            school_name: school_name.to_string(),
            tab,
            annual_total_quantity: annual_total,
            bulk_threshold: options.bulk_threshold,
            revenue_potential,
            needs_attention: true,
            grades: Vec::new(),
        };
    }

    let grades = grade_lineup(&tab_records, tab)
        .into_iter()
        .map(|grade| build_grade_section(&tab_records, grade, tab, options))
        .collect();

    TabReport {
        school_name: school_name.to_string(),
        tab,
        annual_total_quantity: annual_total,
        bulk_threshold: options.bulk_threshold,
        revenue_potential,
        needs_attention: false,
        grades,
    }
}

/// Which grades a tab displays, in order.
///
/// 通年 starts at the first elementary grade with orders and runs through
/// 小6, always shows 中1..中3, and appends 高校 when present. 入試 shows
/// only 中3. Seasonal tabs show the three middle grades.
fn grade_lineup(tab_records: &[&ClassifiedOrderRecord], tab: Category) -> Vec<Grade> {
    match tab {
        Category::Exam => vec![Grade::Middle(3)],
        Category::Spring | Category::Summer | Category::Winter => {
            vec![Grade::Middle(1), Grade::Middle(2), Grade::Middle(3)]
        }
        Category::YearRound => {
            let has = |grade: Grade| {
                tab_records
                    .iter()
                    .any(|r| r.classification.grade == Some(grade))
            };

            let mut lineup = Vec::new();
            if let Some(first) = (1..=6).find(|&n| has(Grade::Elementary(n))) {
                lineup.extend((first..=6).map(Grade::Elementary));
            }
            lineup.extend((1..=3).map(Grade::Middle));
            if has(Grade::HighSchool) {
                lineup.push(Grade::HighSchool);
            }
            lineup
        }
    }
}

fn build_grade_section(
    tab_records: &[&ClassifiedOrderRecord],
    grade: Grade,
    tab: Category,
    options: &ReportOptions,
) -> GradeSection {
    let grade_records: Vec<&ClassifiedOrderRecord> = tab_records
        .iter()
        .filter(|r| r.classification.grade == Some(grade))
        .copied()
        .collect();

    if grade_records.is_empty() {
        return GradeSection {
            grade,
            needs_attention: true,
            buckets: Vec::new(),
        };
    }

    if grade == Grade::HighSchool {
        return GradeSection {
            grade,
            needs_attention: false,
            buckets: vec![overall_bucket(&grade_records, options)],
        };
    }

    // strongest subject total in this grade, for the low-emphasis rule
    let mut subject_totals: HashMap<Subject, u32> = HashMap::new();
    for r in &grade_records {
        *subject_totals.entry(r.classification.subject).or_insert(0) += r.record.quantity;
    }
    let max_subject_total = subject_totals.values().copied().max().unwrap_or(0);

    let mut buckets = Vec::new();
    for subject in Subject::DISPLAY_ORDER {
        let subject_records: Vec<&ClassifiedOrderRecord> = grade_records
            .iter()
            .filter(|r| r.classification.subject == subject)
            .copied()
            .collect();

        if subject_records.is_empty() {
            if grade.is_middle() && Subject::MIDDLE_CORE.contains(&subject) {
                buckets.push(SubjectBucket {
                    kind: BucketKind::Subject(subject),
                    total_quantity: 0,
                    needs_attention: true,
                    entries: Vec::new(),
                });
            }
            continue;
        }

        buckets.push(rollup_bucket(
            BucketKind::Subject(subject),
            &subject_records,
            max_subject_total,
            options,
        ));
    }

    // bundled materials get their own bucket on seasonal tabs
    if tab.is_seasonal() {
        let composite_records: Vec<&ClassifiedOrderRecord> = grade_records
            .iter()
            .filter(|r| r.classification.is_composite)
            .copied()
            .collect();
        if !composite_records.is_empty() {
            buckets.push(rollup_bucket(
                BucketKind::Composite,
                &composite_records,
                max_subject_total,
                options,
            ));
        }
    }

    GradeSection {
        grade,
        needs_attention: false,
        buckets,
    }
}

struct DayRollup {
    total: u32,
    peak_quantity: u32,
    peak_date: NaiveDate,
}

/// Group records by (product, day), then fold each product's days into its
/// total and peak day. BTreeMap keys give ascending product-name order and,
/// within a product, ascending dates; with a strict `>` comparison the
/// earliest day holding the maximum wins ties.
fn product_rollups<'a>(
    records: &[&'a ClassifiedOrderRecord],
) -> BTreeMap<&'a str, DayRollup> {
    let mut daily: BTreeMap<(&str, NaiveDate), u32> = BTreeMap::new();
    for r in records {
        *daily
            .entry((r.record.product_name.as_str(), r.record.order_date))
            .or_insert(0) += r.record.quantity;
    }

    let mut rollups: BTreeMap<&str, DayRollup> = BTreeMap::new();
    for ((name, date), quantity) in daily {
        match rollups.get_mut(name) {
            Some(acc) => {
                acc.total += quantity;
                if quantity > acc.peak_quantity {
                    acc.peak_quantity = quantity;
                    acc.peak_date = date;
                }
            }
            None => {
                rollups.insert(
                    name,
                    DayRollup {
                        total: quantity,
                        peak_quantity: quantity,
                        peak_date: date,
                    },
                );
            }
        }
    }
    rollups
}

fn rollup_bucket(
    kind: BucketKind,
    records: &[&ClassifiedOrderRecord],
    max_subject_total: u32,
    options: &ReportOptions,
) -> SubjectBucket {
    let rollups = product_rollups(records);
    let total_quantity: u32 = rollups.values().map(|r| r.total).sum();
    let is_low = max_subject_total > 0 && total_quantity <= max_subject_total / 2;

    let entries = rollups
        .into_iter()
        .map(|(name, r)| ProductEntry {
            product_name: name.to_string(),
            total_quantity: r.total,
            peak_day_quantity: r.peak_quantity,
            peak_day_date: r.peak_date,
            is_bulk: r.peak_quantity >= options.bulk_threshold,
            is_low_emphasis: is_low,
        })
        .collect();

    SubjectBucket {
        kind,
        total_quantity,
        needs_attention: false,
        entries,
    }
}

/// 高校 skips subject grouping: one bucket of products ranked by total,
/// largest first.
fn overall_bucket(records: &[&ClassifiedOrderRecord], options: &ReportOptions) -> SubjectBucket {
    let mut bucket = rollup_bucket(BucketKind::Overall, records, 0, options);
    bucket
        .entries
        .sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    bucket
}
