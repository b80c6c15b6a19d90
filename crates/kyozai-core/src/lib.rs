//! Classification and aggregation engine for educational-material order
//! data. An order workbook is decoded and validated, every product name is
//! classified into grade/subject/season/exam/composite attributes, and a
//! school's orders aggregate into per-tab summaries with a revenue
//! projection for the annual middle-school slice.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod ingest;
pub mod keywords;
pub mod model;
pub mod revenue;

use std::collections::BTreeMap;

use aggregate::{build_tab_report, ReportOptions, TabReport};
use error::KyozaiError;
use ingest::IngestOutcome;
use keywords::KeywordConfig;
use model::{Category, ClassifiedOrderRecord};

/// Decode an xlsx order workbook and run the full ingestion pipeline:
/// column check, row validation, and per-product classification.
pub fn load_orders_xlsx(
    bytes: &[u8],
    config: &KeywordConfig,
) -> Result<IngestOutcome, KyozaiError> {
    let table = ingest::load_workbook(bytes)?;
    ingest::ingest_table(&table, config)
}

/// Distinct school names with their retained order-line counts, sorted by
/// name.
pub fn school_names(records: &[ClassifiedOrderRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.record.school_name.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

/// Build the report for one (school, tab) selection.
///
/// Errors only when the school has no retained orders at all; an empty tab
/// for a known school is a flagged, empty report instead.
pub fn build_school_report(
    records: &[ClassifiedOrderRecord],
    school: &str,
    tab: Category,
    options: &ReportOptions,
) -> Result<TabReport, KyozaiError> {
    let school_rows: Vec<ClassifiedOrderRecord> = records
        .iter()
        .filter(|r| r.record.school_name == school)
        .cloned()
        .collect();
    if school_rows.is_empty() {
        return Err(KyozaiError::SchoolNotFound(school.to_string()));
    }
    Ok(build_tab_report(&school_rows, school, tab, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use model::{OrderRecord, ProductClassification};

    fn record(school: &str) -> ClassifiedOrderRecord {
        ClassifiedOrderRecord {
            record: OrderRecord {
                order_date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                school_name: school.into(),
                product_name: "教材".into(),
                quantity: 1,
            },
            classification: ProductClassification::default(),
        }
    }

    #[test]
    fn school_names_sorted_with_counts() {
        let records = vec![record("乙塾"), record("甲塾"), record("乙塾")];
        assert_eq!(
            school_names(&records),
            vec![("乙塾".to_string(), 2), ("甲塾".to_string(), 1)]
        );
    }

    #[test]
    fn unknown_school_is_an_error() {
        let records = vec![record("甲塾")];
        let result = build_school_report(
            &records,
            "不明塾",
            Category::YearRound,
            &ReportOptions::default(),
        );
        assert!(matches!(result, Err(KyozaiError::SchoolNotFound(_))));
    }
}
